use tracing::{debug, info, trace};

use crate::{
    config::DeviceIdentity,
    internals::core::ports::{AudioCapturePort, PeripheralError, PeripheralPort},
    models::{sample_rate::SampleRate, sensor_class::SensorClass, sensor_config::EffectiveConfig},
};

/// A peripheral with nothing to do beyond coming up.
pub struct SimulatedPeripheral {
    name: &'static str,
    ready: bool,
}

impl SimulatedPeripheral {
    pub fn new(name: &'static str) -> Self {
        Self { name, ready: false }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }
}

impl PeripheralPort for SimulatedPeripheral {
    fn name(&self) -> &'static str {
        self.name
    }

    fn begin(&mut self) -> Result<(), PeripheralError> {
        self.ready = true;
        Ok(())
    }
}

/// Polled once per run loop tick.
pub struct BatteryMonitor {
    level_percent: u8,
    polls: u64,
}

impl BatteryMonitor {
    pub fn new(level_percent: u8) -> Self {
        Self {
            level_percent: level_percent.min(100),
            polls: 0,
        }
    }

    pub fn polls(&self) -> u64 {
        self.polls
    }
}

impl PeripheralPort for BatteryMonitor {
    fn name(&self) -> &'static str {
        "battery"
    }

    fn begin(&mut self) -> Result<(), PeripheralError> {
        info!("Battery at {}%.", self.level_percent);
        Ok(())
    }

    fn update(&mut self) {
        self.polls += 1;
        trace!("Battery poll #{}: {}%.", self.polls, self.level_percent);
    }
}

/// Records from the microphone while the raw audio class runs at a non-zero
/// rate.
pub struct PdmRecorder {
    ready: bool,
    recording_rate: Option<SampleRate>,
}

impl PdmRecorder {
    pub fn new() -> Self {
        Self {
            ready: false,
            recording_rate: None,
        }
    }

    pub fn recording_rate(&self) -> Option<SampleRate> {
        self.recording_rate
    }
}

impl Default for PdmRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl PeripheralPort for PdmRecorder {
    fn name(&self) -> &'static str {
        "pdm recorder"
    }

    fn begin(&mut self) -> Result<(), PeripheralError> {
        self.ready = true;
        Ok(())
    }
}

impl AudioCapturePort for PdmRecorder {
    fn on_configuration_accepted(&mut self, config: &EffectiveConfig) {
        if config.sensor_class != SensorClass::RawAudio {
            return;
        }
        if !self.ready {
            debug!("Recorder not ready. Ignoring {}.", config);
            return;
        }
        if config.sample_rate.is_active() {
            info!("Recording at {}.", config.sample_rate);
            self.recording_rate = Some(config.sample_rate);
        } else if self.recording_rate.take().is_some() {
            info!("Recording stopped.");
        }
    }
}

/// The wireless link. Starts advertising as soon as it comes up.
pub struct BleRadio {
    identity: DeviceIdentity,
    advertising: bool,
}

impl BleRadio {
    pub fn new(identity: DeviceIdentity) -> Self {
        Self {
            identity,
            advertising: false,
        }
    }

    pub fn is_advertising(&self) -> bool {
        self.advertising
    }
}

impl PeripheralPort for BleRadio {
    fn name(&self) -> &'static str {
        "ble radio"
    }

    fn begin(&mut self) -> Result<(), PeripheralError> {
        info!(
            "Advertising as {} (firmware {}, hardware {}).",
            self.identity.name, self.identity.firmware_version, self.identity.hardware_version
        );
        self.advertising = true;
        Ok(())
    }
}
