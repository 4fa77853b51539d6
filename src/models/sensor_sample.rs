use derive_more::Display;

use super::sensor_class::SensorClass;

/// One data sample reported by the sensor subsystem.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
#[display(
    fmt = "(SensorSample: class={}, timestamp={}ms, {} bytes)",
    sensor_class,
    timestamp_ms,
    "payload.len()"
)]
pub struct SensorSample {
    pub sensor_class: SensorClass,
    /// Milliseconds since boot, as stamped by the subsystem.
    pub timestamp_ms: u32,
    pub payload: Vec<u8>,
}
