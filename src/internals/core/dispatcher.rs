use tracing::debug;

use super::{ports::SensorSubsystemPort, rate_correction::CorrectionTable};
use crate::models::{
    sensor_class::SensorClass,
    sensor_config::{EffectiveConfig, SensorConfigRequest},
};

/// Entry point for configuration requests. Corrects the rate and hands the
/// result to the sensor subsystem. The registry is only updated once the
/// subsystem reports the configuration as accepted.
pub struct ConfigurationDispatcher<S: SensorSubsystemPort> {
    corrections: CorrectionTable,
    subsystem: S,
}

impl<S: SensorSubsystemPort> ConfigurationDispatcher<S> {
    pub fn new(corrections: CorrectionTable, subsystem: S) -> Self {
        Self {
            corrections,
            subsystem,
        }
    }

    pub fn effective_config(&self, request: SensorConfigRequest) -> EffectiveConfig {
        EffectiveConfig {
            sensor_class: request.sensor_class,
            sample_rate: self
                .corrections
                .correct(request.sensor_class, request.sample_rate),
            latency_ms: request.latency_ms,
        }
    }

    #[tracing::instrument(skip_all)]
    pub fn configure_sensor(&mut self, request: SensorConfigRequest) {
        let config = self.effective_config(request);
        debug!("Configuring {} as {}.", request, config);
        self.subsystem.configure(config);
    }

    /// Explicitly switch off every sensor class. The registry drains to zero
    /// as the acceptances arrive, not by the time this returns.
    #[tracing::instrument(skip_all)]
    pub fn stop_all(&mut self) {
        debug!("Stopping all sensors.");
        for class in SensorClass::ALL {
            self.configure_sensor(SensorConfigRequest::stop(class));
        }
    }

    pub fn subsystem(&self) -> &S {
        &self.subsystem
    }

    pub fn subsystem_mut(&mut self) -> &mut S {
        &mut self.subsystem
    }
}
