use std::time::Duration;

use tokio::{sync::mpsc::Receiver, time::MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::{
    externals::radio::decode::InboundCommand,
    internals::core::{
        ports::{SchedulerPort, SensorSubsystemPort},
        system::{DeviceError, DeviceFacade},
    },
};

/// Task: The outer run loop. Ticks the device every `period`, applies subsystem
/// events as they arrive and executes inbound commands. Every branch runs to
/// completion before the next is polled, so events never interleave with a
/// tick. Returns the device once cancelled.
#[tracing::instrument(skip_all)]
pub async fn task_device_run_loop<S, T>(
    token: CancellationToken,
    mut device: DeviceFacade<S, T>,
    mut rx_commands: Receiver<InboundCommand>,
    period: Duration,
) -> DeviceFacade<S, T>
where
    S: SensorSubsystemPort,
    T: SchedulerPort,
{
    info!("Started.");

    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = token.cancelled() => {
                warn!("Cancelled.");
                break;
            },
            Some(event) = device.next_event() => {
                device.handle_event(event);
            },
            Some(command) = rx_commands.recv() => {
                if let Err(e) = apply_command(&mut device, command) {
                    error!("Failed to apply inbound command. Error: {}", e);
                }
            },
            _ = ticker.tick() => {
                if let Err(e) = device.update() {
                    error!("Failed to update device. Error: {}", e);
                }
            }
        }
    }

    device
}

fn apply_command<S: SensorSubsystemPort, T: SchedulerPort>(
    device: &mut DeviceFacade<S, T>,
    command: InboundCommand,
) -> Result<(), DeviceError> {
    debug!("Applying inbound command {:?}.", command);
    match command {
        InboundCommand::Configure(request) => device.configure_sensor(request),
        InboundCommand::StopAll => device.stop_all(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::DeviceConfig,
        externals::{
            scheduler::SchedulerModule, sensor_subsystem::SensorSubsystemModule,
        },
        internals::core::{
            cadence::CadencePolicy,
            system::Peripherals,
            testing::{Journal, JournalPeripheral},
        },
        models::{
            sample_rate::SampleRate, sensor_class::SensorClass,
            sensor_config::SensorConfigRequest,
        },
    };
    use tokio::sync::mpsc;

    fn peripherals(journal: &Journal) -> Peripherals {
        Peripherals {
            data_log: Box::new(JournalPeripheral::new("storage", journal)),
            recorder: Box::new(JournalPeripheral::new("recorder", journal)),
            player: Box::new(JournalPeripheral::new("player", journal)),
            button: Box::new(JournalPeripheral::new("button", journal)),
            battery: Box::new(JournalPeripheral::new("battery", journal)),
            led: Box::new(JournalPeripheral::new("led", journal)),
            radio: Box::new(JournalPeripheral::new("radio", journal)),
        }
    }

    #[tokio::test]
    async fn test_run_loop_applies_commands_and_acceptances() {
        let mut device = DeviceFacade::new(
            DeviceConfig::default(),
            SensorSubsystemModule::initialize().sensor_subsystem_adapter,
            SchedulerModule::initialize().scheduler_adapter,
            peripherals(&Journal::default()),
        );
        device.begin().expect("Failed to begin device.");

        let token = CancellationToken::new();
        let (tx_commands, rx_commands) = mpsc::channel(8);
        let handle = tokio::spawn(task_device_run_loop(
            token.clone(),
            device,
            rx_commands,
            Duration::from_millis(5),
        ));

        let environmental = SampleRate::try_from(10f32).expect("Failed to get sample rate.");
        tx_commands
            .send(InboundCommand::Configure(SensorConfigRequest::new(
                SensorClass::Environmental,
                environmental,
                0,
            )))
            .await
            .expect("Failed to send command.");
        tokio::time::sleep(Duration::from_millis(100)).await;
        token.cancel();

        let device = handle.await.expect("Run loop panicked.");
        let corrected = SampleRate::try_from(15f32).expect("Failed to get sample rate.");
        assert_eq!(
            device.registry().rate_of(SensorClass::Environmental),
            Some(corrected)
        );
        assert_eq!(
            device.current_cadence(),
            CadencePolicy::default().period_for(corrected)
        );
        assert_eq!(device.scheduler().period(), device.current_cadence());
        assert!(device.scheduler().ticks() > 0);
    }

    #[tokio::test]
    async fn test_run_loop_stop_all_returns_to_idle() {
        let mut device = DeviceFacade::new(
            DeviceConfig::default(),
            SensorSubsystemModule::initialize().sensor_subsystem_adapter,
            SchedulerModule::initialize().scheduler_adapter,
            peripherals(&Journal::default()),
        );
        device.begin().expect("Failed to begin device.");

        let token = CancellationToken::new();
        let (tx_commands, rx_commands) = mpsc::channel(8);
        let handle = tokio::spawn(task_device_run_loop(
            token.clone(),
            device,
            rx_commands,
            Duration::from_millis(5),
        ));

        let motion = SampleRate::try_from(50f32).expect("Failed to get sample rate.");
        for command in [
            InboundCommand::Configure(SensorConfigRequest::new(SensorClass::Motion, motion, 0)),
            InboundCommand::StopAll,
        ] {
            tx_commands.send(command).await.expect("Failed to send command.");
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
        token.cancel();

        let device = handle.await.expect("Run loop panicked.");
        assert_eq!(device.registry().max_active_rate(), SampleRate::ZERO);
        assert_eq!(device.current_cadence(), CadencePolicy::default().idle());
    }
}
