//! Fake ports shared by the core tests.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use super::ports::{
    AudioCapturePort, DataLogPort, PeripheralError, PeripheralPort, SchedulerPort,
    SensorSubsystemPort, SubsystemEvent, SubsystemEventSender,
};
use crate::models::{sensor_config::EffectiveConfig, sensor_sample::SensorSample};

#[derive(Default)]
pub struct RecordingScheduler {
    cadences: Vec<Duration>,
    ticks: usize,
}

impl RecordingScheduler {
    pub fn cadence_history(&self) -> Vec<Duration> {
        self.cadences.clone()
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }
}

impl SchedulerPort for RecordingScheduler {
    fn set_cadence(&mut self, period: Duration) {
        self.cadences.push(period);
    }

    fn tick(&mut self) {
        self.ticks += 1;
    }
}

/// Records every configuration and never answers on its own. Tests play the
/// hardware by calling `accept`.
#[derive(Default)]
pub struct ManualSubsystem {
    pub configured: Vec<EffectiveConfig>,
    tx_events: Option<SubsystemEventSender>,
}

impl ManualSubsystem {
    pub fn is_registered(&self) -> bool {
        self.tx_events.is_some()
    }

    pub fn accept(&self, config: EffectiveConfig) {
        self.send(SubsystemEvent::Accepted(config));
    }

    pub fn send(&self, event: SubsystemEvent) {
        self.tx_events
            .as_ref()
            .expect("Subsystem was never registered.")
            .send(event)
            .expect("Device dropped its event receiver.");
    }

    /// Accept everything configured so far, in order.
    pub fn accept_all(&self) {
        for config in self.configured.iter() {
            self.accept(*config);
        }
    }
}

impl SensorSubsystemPort for ManualSubsystem {
    fn register_events(&mut self, tx_events: SubsystemEventSender) {
        self.tx_events = Some(tx_events);
    }

    fn configure(&mut self, config: EffectiveConfig) {
        self.configured.push(config);
    }
}

pub type Journal = Arc<Mutex<Vec<String>>>;

/// A peripheral which writes `"<name>.<call>"` lines into a shared journal.
pub struct JournalPeripheral {
    name: &'static str,
    journal: Journal,
    fail_begin: bool,
}

impl JournalPeripheral {
    pub fn new(name: &'static str, journal: &Journal) -> Self {
        Self {
            name,
            journal: journal.clone(),
            fail_begin: false,
        }
    }

    pub fn failing(name: &'static str, journal: &Journal) -> Self {
        Self {
            fail_begin: true,
            ..Self::new(name, journal)
        }
    }

    fn write(&self, line: String) {
        self.journal.lock().expect("Journal poisoned.").push(line);
    }
}

impl PeripheralPort for JournalPeripheral {
    fn name(&self) -> &'static str {
        self.name
    }

    fn begin(&mut self) -> Result<(), PeripheralError> {
        self.write(format!("{}.begin", self.name));
        if self.fail_begin {
            return Err(PeripheralError::InitFailed(self.name));
        }
        Ok(())
    }

    fn update(&mut self) {
        self.write(format!("{}.update", self.name));
    }
}

impl AudioCapturePort for JournalPeripheral {
    fn on_configuration_accepted(&mut self, config: &EffectiveConfig) {
        self.write(format!("{}.accepted {}", self.name, config.sensor_class));
    }
}

impl DataLogPort for JournalPeripheral {
    fn log_sample(&mut self, sample: &SensorSample) {
        self.write(format!("{}.log {}", self.name, sample.timestamp_ms));
    }
}

pub fn journal_lines(journal: &Journal) -> Vec<String> {
    journal.lock().expect("Journal poisoned.").clone()
}
