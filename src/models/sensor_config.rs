use common::packet::SensorConfigurationPacket;
use derive_more::Display;
use thiserror::Error;

use super::{
    sample_rate::{SampleRate, SampleRateError},
    sensor_class::{SensorClass, SensorClassError},
};

/// An inbound request to configure one sensor. Rates are as the requester
/// wants to observe them, before any hardware correction.
#[derive(Debug, Display, Clone, Copy, PartialEq)]
#[display(
    fmt = "(SensorConfigRequest: class={}, rate={}, latency={}ms)",
    sensor_class,
    sample_rate,
    latency_ms
)]
pub struct SensorConfigRequest {
    pub sensor_class: SensorClass,
    pub sample_rate: SampleRate,
    pub latency_ms: u32,
}

/// The configuration actually handed to the sensor subsystem, and echoed back
/// by it once the hardware has been reconfigured.
#[derive(Debug, Display, Clone, Copy, PartialEq)]
#[display(
    fmt = "(EffectiveConfig: class={}, rate={}, latency={}ms)",
    sensor_class,
    sample_rate,
    latency_ms
)]
pub struct EffectiveConfig {
    pub sensor_class: SensorClass,
    pub sample_rate: SampleRate,
    pub latency_ms: u32,
}

#[derive(Error, Debug, PartialEq)]
pub enum DecodeError {
    #[error(transparent)]
    SensorClass(#[from] SensorClassError),
    #[error(transparent)]
    SampleRate(#[from] SampleRateError),
}

impl SensorConfigRequest {
    pub fn new(sensor_class: SensorClass, sample_rate: SampleRate, latency_ms: u32) -> Self {
        Self {
            sensor_class,
            sample_rate,
            latency_ms,
        }
    }

    /// A request that switches `sensor_class` off.
    pub fn stop(sensor_class: SensorClass) -> Self {
        Self::new(sensor_class, SampleRate::ZERO, 0)
    }
}

impl TryFrom<SensorConfigurationPacket> for SensorConfigRequest {
    type Error = DecodeError;

    fn try_from(value: SensorConfigurationPacket) -> Result<Self, Self::Error> {
        Ok(SensorConfigRequest {
            sensor_class: SensorClass::try_from(value.sensor_id)?,
            sample_rate: SampleRate::try_from(value.sample_rate)?,
            latency_ms: value.latency,
        })
    }
}
