pub mod sample_rate;
pub mod sensor_class;
pub mod sensor_config;
pub mod sensor_sample;
