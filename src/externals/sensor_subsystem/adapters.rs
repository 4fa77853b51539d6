use std::collections::BTreeMap;

use tracing::{debug, info, trace, warn};

use crate::{
    internals::core::ports::{SensorSubsystemPort, SubsystemEvent, SubsystemEventSender},
    models::{
        sample_rate::SampleRate, sensor_class::SensorClass, sensor_config::EffectiveConfig,
        sensor_sample::SensorSample,
    },
};

/// Stands in for the sensor drivers. Accepts any configuration within the
/// per-class rate limit and refuses the rest without reporting anything.
pub struct SimulatedSensorSubsystem {
    limits: BTreeMap<SensorClass, SampleRate>,
    active: BTreeMap<SensorClass, EffectiveConfig>,
    tx_events: Option<SubsystemEventSender>,
}

impl SimulatedSensorSubsystem {
    pub fn new(limits: impl IntoIterator<Item = (SensorClass, SampleRate)>) -> Self {
        Self {
            limits: limits.into_iter().collect(),
            active: BTreeMap::new(),
            tx_events: None,
        }
    }

    /// The configuration the hardware is currently running for `class`.
    pub fn active(&self, class: SensorClass) -> Option<&EffectiveConfig> {
        self.active.get(&class)
    }

    /// Push a data sample to the registered device.
    pub fn report_sample(&self, sample: SensorSample) {
        self.emit(SubsystemEvent::Sample(sample));
    }

    fn supports(&self, config: &EffectiveConfig) -> bool {
        match self.limits.get(&config.sensor_class) {
            None => true,
            Some(limit) => config.sample_rate <= *limit,
        }
    }

    fn emit(&self, event: SubsystemEvent) {
        let Some(tx_events) = self.tx_events.as_ref() else {
            warn!("No device registered. Dropping {:?}.", event);
            return;
        };
        if let Err(e) = tx_events.send(event) {
            warn!("Failed to report subsystem event. Error: {}", e);
        } else {
            trace!("Reported subsystem event.");
        }
    }
}

impl SensorSubsystemPort for SimulatedSensorSubsystem {
    fn register_events(&mut self, tx_events: SubsystemEventSender) {
        info!("Sensor subsystem bound to device.");
        self.tx_events = Some(tx_events);
    }

    #[tracing::instrument(skip_all)]
    fn configure(&mut self, config: EffectiveConfig) {
        if !self.supports(&config) {
            debug!("Rejecting unsupported {}.", config);
            return;
        }
        debug!("Applying {}.", config);
        self.active.insert(config.sensor_class, config);
        self.emit(SubsystemEvent::Accepted(config));
    }
}
