// Centralize all configuration constants
use crate::{
    internals::core::{cadence::CadencePolicy, rate_correction::CorrectionTable},
    models::sensor_class::SensorClass,
};

pub const DEVICE_NAME: &str = "OpenEarable";
pub const FIRMWARE_VERSION: &str = "1.3.0";
pub const HARDWARE_VERSION: &str = "1.3.0";

/// The IMU and barometer drivers run slower than programmed by this factor.
pub const RATE_CORRECTION_FACTOR: f32 = 1.5;

// Scheduler cadence bounds
pub const IDLE_CADENCE_MS: u64 = 1000;
pub const MIN_CADENCE_MS: u64 = 1;
pub const MAX_CADENCE_MS: u64 = 1000;

/// Period of the outer run loop calling `DeviceFacade::update`.
pub const RUN_LOOP_PERIOD_MS: u64 = 10;

// Channel sizes
pub const INBOUND_BYTES_CHANNEL_SIZE: usize = 32;
pub const COMMAND_CHANNEL_SIZE: usize = 32;

/// Undecoded inbound bytes kept while waiting for the rest of a packet.
pub const MAX_PENDING_INBOUND_BYTES: usize = 256;

/// What the device advertises itself as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    pub name: String,
    pub firmware_version: String,
    pub hardware_version: String,
}

impl Default for DeviceIdentity {
    fn default() -> Self {
        Self {
            name: DEVICE_NAME.into(),
            firmware_version: FIRMWARE_VERSION.into(),
            hardware_version: HARDWARE_VERSION.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceConfig {
    pub identity: DeviceIdentity,
    pub corrections: CorrectionTable,
    pub cadence: CadencePolicy,
    /// Sensor classes whose rate drives the scheduler cadence.
    pub tracked_classes: Vec<SensorClass>,
    /// Forward every data sample to persistent storage.
    pub data_logging: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            identity: DeviceIdentity::default(),
            corrections: CorrectionTable::default(),
            cadence: CadencePolicy::default(),
            tracked_classes: vec![SensorClass::Motion, SensorClass::Environmental],
            data_logging: false,
        }
    }
}
