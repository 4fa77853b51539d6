use serde::{Deserialize, Serialize};

/// Used to carry control requests over the wireless link.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum Packet {
    ConfigureSensor(SensorConfigurationPacket),
    StopAllSensors,
}

/// Represents a request to (re)configure a single sensor. The rate is the
/// rate the requester wants to observe; any hardware correction is applied
/// by the firmware after decoding.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SensorConfigurationPacket {
    /// Raw sensor id, see `crate::sensor_id`. Not validated on the wire.
    pub sensor_id: u8,

    /// Requested sample rate in Hz. Zero disables the sensor.
    pub sample_rate: f32,

    /// Requested report latency in milliseconds.
    pub latency: u32,
}

impl SensorConfigurationPacket {
    /// Build a packet which switches a sensor off.
    pub fn stop(sensor_id: u8) -> Self {
        Self {
            sensor_id,
            sample_rate: 0f32,
            latency: 0,
        }
    }

    /// Used to create a new instance of this struct wrapped in a packet.
    pub fn new_packet(sensor_id: u8, sample_rate: f32, latency: u32) -> Packet {
        Packet::ConfigureSensor(Self {
            sensor_id,
            sample_rate,
            latency,
        })
    }
}
