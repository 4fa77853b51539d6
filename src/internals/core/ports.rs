use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

use crate::models::{sensor_config::EffectiveConfig, sensor_sample::SensorSample};

/// Events pushed by the sensor subsystem towards the device.
#[derive(Debug, Clone, PartialEq)]
pub enum SubsystemEvent {
    /// The hardware now runs with this configuration.
    Accepted(EffectiveConfig),
    /// A data sample was produced.
    Sample(SensorSample),
}

/// Handed to the sensor subsystem during `begin`. Sending never blocks, so
/// it is safe to use from interrupt-driven driver code.
pub type SubsystemEventSender = UnboundedSender<SubsystemEvent>;

pub trait SensorSubsystemPort: Send {
    /// Bind the subsystem's acceptance and data reports to a device.
    fn register_events(&mut self, tx_events: SubsystemEventSender);

    /// Request a hardware reconfiguration. Fire-and-forget: the subsystem
    /// reports `SubsystemEvent::Accepted` once it takes effect, or nothing
    /// when it refuses.
    fn configure(&mut self, config: EffectiveConfig);
}

pub trait SchedulerPort: Send {
    fn set_cadence(&mut self, period: Duration);
    fn tick(&mut self);
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PeripheralError {
    #[error("{0} failed to initialize.")]
    InitFailed(&'static str),
}

pub trait PeripheralPort: Send {
    fn name(&self) -> &'static str;
    fn begin(&mut self) -> Result<(), PeripheralError>;

    /// Periodic servicing for peripherals which need polling.
    fn update(&mut self) {}
}

/// Audio capture follows the microphone configuration.
pub trait AudioCapturePort: PeripheralPort {
    fn on_configuration_accepted(&mut self, config: &EffectiveConfig);
}

/// Persistent sample storage.
pub trait DataLogPort: PeripheralPort {
    fn log_sample(&mut self, sample: &SensorSample);
}
