use self::adapters::{BatteryMonitor, BleRadio, PdmRecorder, SimulatedPeripheral};
use crate::config::DeviceIdentity;

pub mod adapters;

pub struct PeripheralsModule {
    pub recorder_adapter: PdmRecorder,
    pub player_adapter: SimulatedPeripheral,
    pub button_adapter: SimulatedPeripheral,
    pub battery_adapter: BatteryMonitor,
    pub led_adapter: SimulatedPeripheral,
    pub radio_adapter: BleRadio,
}

impl PeripheralsModule {
    pub fn initialize(identity: DeviceIdentity) -> Self {
        Self {
            recorder_adapter: PdmRecorder::new(),
            player_adapter: SimulatedPeripheral::new("audio player"),
            button_adapter: SimulatedPeripheral::new("button"),
            battery_adapter: BatteryMonitor::new(100),
            led_adapter: SimulatedPeripheral::new("led"),
            radio_adapter: BleRadio::new(identity),
        }
    }
}
