use std::time::Duration;

use anyhow::Result;
use common::{
    packet::{Packet, SensorConfigurationPacket},
    sensor_id::{ACC_GYRO_MAG, BARO_TEMP, PDM_MIC},
};
use earable_coordinator::{
    config::{DeviceConfig, COMMAND_CHANNEL_SIZE, INBOUND_BYTES_CHANNEL_SIZE, RUN_LOOP_PERIOD_MS},
    externals::{
        event_logging::EventLoggingModule, peripherals::PeripheralsModule,
        scheduler::SchedulerModule, sensor_subsystem::SensorSubsystemModule,
    },
    internals::core::system::{DeviceFacade, Peripherals},
    tasks::{device::task_device_run_loop, inbound::task_decode_inbound_configuration},
};
use tokio::{
    signal,
    sync::mpsc::{self, Sender},
};
use tokio_util::{sync::CancellationToken, task::TaskTracker};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(false)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    let tracker = TaskTracker::new();

    let token = CancellationToken::new();

    let config = DeviceConfig {
        data_logging: true,
        ..DeviceConfig::default()
    };

    let SensorSubsystemModule {
        sensor_subsystem_adapter,
    } = SensorSubsystemModule::initialize();

    let SchedulerModule { scheduler_adapter } = SchedulerModule::initialize();

    let EventLoggingModule { data_log_adapter } = EventLoggingModule::initialize();

    let PeripheralsModule {
        recorder_adapter,
        player_adapter,
        button_adapter,
        battery_adapter,
        led_adapter,
        radio_adapter,
    } = PeripheralsModule::initialize(config.identity.clone());

    let mut device = DeviceFacade::new(
        config,
        sensor_subsystem_adapter,
        scheduler_adapter,
        Peripherals {
            data_log: Box::new(data_log_adapter),
            recorder: Box::new(recorder_adapter),
            player: Box::new(player_adapter),
            button: Box::new(button_adapter),
            battery: Box::new(battery_adapter),
            led: Box::new(led_adapter),
            radio: Box::new(radio_adapter),
        },
    );
    device.begin()?;

    // NOTE: Raw frames as they come off the wireless link.
    let (tx_inbound_bytes, rx_inbound_bytes) = mpsc::channel(INBOUND_BYTES_CHANNEL_SIZE);

    // NOTE: Validated commands for the device.
    let (tx_commands, rx_commands) = mpsc::channel(COMMAND_CHANNEL_SIZE);

    let token_clone = token.clone();
    tracker.spawn(async move {
        task_device_run_loop(
            token_clone,
            device,
            rx_commands,
            Duration::from_millis(RUN_LOOP_PERIOD_MS),
        )
        .await
    });

    let token_clone = token.clone();
    tracker.spawn(async move {
        task_decode_inbound_configuration(token_clone, rx_inbound_bytes, tx_commands).await
    });

    let token_clone = token.clone();
    tracker.spawn(async move { simulate_remote_session(token_clone, tx_inbound_bytes).await });

    let token_clone = token.clone();

    tokio::select! {
        _ = token_clone.cancelled() => {}
        res = signal::ctrl_c() => {
            match res {
                Ok(_) => {
                    token.cancel();
                },
                Err(e)=>{
                    tracing::error!("Failed to listen for ctrl_c. Error: {}", e);
                    token.cancel();
                }
            };
        },
    }

    tracker.close();
    tracker.wait().await;

    Ok(())
}

/// Plays the part of a phone app driving the device over the wireless link.
#[tracing::instrument(skip_all)]
async fn simulate_remote_session(token: CancellationToken, tx_inbound_bytes: Sender<Vec<u8>>) {
    let script = [
        SensorConfigurationPacket::new_packet(BARO_TEMP, 10f32, 0),
        SensorConfigurationPacket::new_packet(ACC_GYRO_MAG, 50f32, 0),
        SensorConfigurationPacket::new_packet(PDM_MIC, 16000f32, 0),
        Packet::StopAllSensors,
    ];

    for packet in script {
        tokio::select! {
            _ = token.cancelled() => return,
            _ = tokio::time::sleep(Duration::from_secs(2)) => {}
        }
        let frame = match postcard::to_allocvec(&packet) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!("Failed to encode packet. Error: {}", e);
                continue;
            }
        };
        tracing::info!("Sending {:?}.", packet);
        if let Err(e) = tx_inbound_bytes.send(frame).await {
            tracing::error!("Failed to send frame. Error: {}", e);
            return;
        }
    }
    tracing::info!("Session finished. Press ctrl-c to exit.");
}
