use self::adapters::SimulatedSensorSubsystem;
use crate::models::{sample_rate::SampleRate, sensor_class::SensorClass};

pub mod adapters;

// Highest rates the simulated drivers will accept, in Hz.
const MOTION_LIMIT_HZ: f32 = 1600f32;
const ENVIRONMENTAL_LIMIT_HZ: f32 = 200f32;
const RAW_AUDIO_LIMIT_HZ: f32 = 62500f32;

pub struct SensorSubsystemModule {
    pub sensor_subsystem_adapter: SimulatedSensorSubsystem,
}

impl SensorSubsystemModule {
    pub fn initialize() -> Self {
        let limits = [
            (SensorClass::Motion, MOTION_LIMIT_HZ),
            (SensorClass::Environmental, ENVIRONMENTAL_LIMIT_HZ),
            (SensorClass::RawAudio, RAW_AUDIO_LIMIT_HZ),
        ]
        .into_iter()
        .filter_map(|(class, hz)| SampleRate::try_from(hz).ok().map(|rate| (class, rate)));

        Self {
            sensor_subsystem_adapter: SimulatedSensorSubsystem::new(limits),
        }
    }
}
