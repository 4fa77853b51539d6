use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info, trace, warn};

use super::{
    cadence::SchedulerCadenceController,
    dispatcher::ConfigurationDispatcher,
    ports::{
        AudioCapturePort, DataLogPort, PeripheralPort, SchedulerPort, SensorSubsystemPort,
        SubsystemEvent, SubsystemEventSender,
    },
    registry::SensorConfigRegistry,
};
use crate::{
    config::{DeviceConfig, DeviceIdentity},
    models::{
        sensor_config::{EffectiveConfig, SensorConfigRequest},
        sensor_sample::SensorSample,
    },
};

/// The collaborators the device brings up around the sensor subsystem.
pub struct Peripherals {
    pub data_log: Box<dyn DataLogPort>,
    pub recorder: Box<dyn AudioCapturePort>,
    pub player: Box<dyn PeripheralPort>,
    pub button: Box<dyn PeripheralPort>,
    pub battery: Box<dyn PeripheralPort>,
    pub led: Box<dyn PeripheralPort>,
    pub radio: Box<dyn PeripheralPort>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DeviceError {
    #[error("Device has already been started.")]
    AlreadyStarted,
    #[error("Device has not been started.")]
    NotStarted,
}

/// Owns the configuration path, the registry and the scheduler cadence.
///
/// Subsystem events arrive over a single-consumer channel and are only ever
/// applied through `&mut self`, so a registry update and the cadence
/// recompute it causes are never observed apart.
pub struct DeviceFacade<S: SensorSubsystemPort, T: SchedulerPort> {
    identity: DeviceIdentity,
    dispatcher: ConfigurationDispatcher<S>,
    registry: SensorConfigRegistry,
    cadence: SchedulerCadenceController<T>,
    peripherals: Peripherals,
    data_logging: bool,
    tx_events: SubsystemEventSender,
    rx_events: UnboundedReceiver<SubsystemEvent>,
    started: bool,
}

impl<S: SensorSubsystemPort, T: SchedulerPort> DeviceFacade<S, T> {
    pub fn new(config: DeviceConfig, subsystem: S, scheduler: T, peripherals: Peripherals) -> Self {
        let (tx_events, rx_events) = mpsc::unbounded_channel();
        Self {
            identity: config.identity,
            dispatcher: ConfigurationDispatcher::new(config.corrections, subsystem),
            registry: SensorConfigRegistry::new(config.tracked_classes),
            cadence: SchedulerCadenceController::new(config.cadence, scheduler),
            peripherals,
            data_logging: config.data_logging,
            tx_events,
            rx_events,
            started: false,
        }
    }

    /// Bring the device up. Storage first so early samples are not lost,
    /// the radio last so nobody can connect before the device is ready.
    /// Storage is only brought up when data logging is enabled.
    #[tracing::instrument(skip_all)]
    pub fn begin(&mut self) -> Result<(), DeviceError> {
        if self.started {
            return Err(DeviceError::AlreadyStarted);
        }
        info!(
            "Starting {} (firmware {}, hardware {}).",
            self.identity.name, self.identity.firmware_version, self.identity.hardware_version
        );

        if self.data_logging {
            begin_peripheral(self.peripherals.data_log.as_mut());
        } else {
            debug!("Data logging disabled, skipping {}.", self.peripherals.data_log.name());
        }
        begin_peripheral(self.peripherals.recorder.as_mut());
        begin_peripheral(self.peripherals.player.as_mut());

        self.dispatcher
            .subsystem_mut()
            .register_events(self.tx_events.clone());

        begin_peripheral(self.peripherals.button.as_mut());
        begin_peripheral(self.peripherals.battery.as_mut());
        begin_peripheral(self.peripherals.led.as_mut());

        self.cadence.start();

        begin_peripheral(self.peripherals.radio.as_mut());

        self.started = true;
        info!("Started.");
        Ok(())
    }

    /// One cooperative tick: apply pending subsystem events, then service
    /// the polled collaborators.
    pub fn update(&mut self) -> Result<(), DeviceError> {
        self.ensure_started()?;
        let applied = self.process_pending_events();
        if applied > 0 {
            trace!("Applied {} subsystem events before tick.", applied);
        }
        self.peripherals.battery.update();
        self.cadence.tick();
        Ok(())
    }

    pub fn configure_sensor(&mut self, request: SensorConfigRequest) -> Result<(), DeviceError> {
        self.ensure_started()?;
        self.dispatcher.configure_sensor(request);
        Ok(())
    }

    pub fn stop_all(&mut self) -> Result<(), DeviceError> {
        self.ensure_started()?;
        self.dispatcher.stop_all();
        Ok(())
    }

    /// Apply every event already queued by the subsystem. Returns how many
    /// were applied.
    pub fn process_pending_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.rx_events.try_recv() {
            self.handle_event(event);
            applied += 1;
        }
        applied
    }

    /// Wait for the next subsystem event.
    pub async fn next_event(&mut self) -> Option<SubsystemEvent> {
        self.rx_events.recv().await
    }

    pub(crate) fn handle_event(&mut self, event: SubsystemEvent) {
        match event {
            SubsystemEvent::Accepted(config) => self.on_configuration_accepted(config),
            SubsystemEvent::Sample(sample) => self.on_sensor_data(&sample),
        }
    }

    #[tracing::instrument(skip_all)]
    fn on_configuration_accepted(&mut self, config: EffectiveConfig) {
        debug!("Accepted {}.", config);
        self.peripherals.recorder.on_configuration_accepted(&config);

        self.registry.update(config.sensor_class, config.sample_rate);
        self.cadence
            .on_registry_changed(self.registry.max_active_rate());
    }

    fn on_sensor_data(&mut self, sample: &SensorSample) {
        if self.data_logging {
            self.peripherals.data_log.log_sample(sample);
        } else {
            trace!("Data logging disabled, dropping {}.", sample);
        }
    }

    /// A sender feeding this device's event channel.
    pub fn event_sender(&self) -> SubsystemEventSender {
        self.tx_events.clone()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn registry(&self) -> &SensorConfigRegistry {
        &self.registry
    }

    pub fn current_cadence(&self) -> Duration {
        self.cadence.current_period()
    }

    pub fn subsystem(&self) -> &S {
        self.dispatcher.subsystem()
    }

    pub fn scheduler(&self) -> &T {
        self.cadence.scheduler()
    }

    fn ensure_started(&self) -> Result<(), DeviceError> {
        if !self.started {
            return Err(DeviceError::NotStarted);
        }
        Ok(())
    }
}

/// Initialization failures are reported and the device carries on without
/// that peripheral.
fn begin_peripheral<P: PeripheralPort + ?Sized>(peripheral: &mut P) {
    match peripheral.begin() {
        Ok(()) => info!("{} ready.", peripheral.name()),
        Err(e) => warn!("Peripheral failed to start. Error: {}", e),
    }
}
