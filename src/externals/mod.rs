pub mod event_logging;
pub mod peripherals;
pub mod radio;
pub mod scheduler;
pub mod sensor_subsystem;
