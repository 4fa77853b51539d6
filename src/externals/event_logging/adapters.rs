use tracing::info;

use crate::{
    internals::core::ports::{DataLogPort, PeripheralError, PeripheralPort},
    models::sensor_sample::SensorSample,
};

/// Writes every sample into the trace log in place of the SD card.
#[derive(Default)]
pub struct LogToTracingAdapter {
    logged: u64,
}

impl LogToTracingAdapter {
    pub fn logged(&self) -> u64 {
        self.logged
    }
}

impl PeripheralPort for LogToTracingAdapter {
    fn name(&self) -> &'static str {
        "data logger"
    }

    fn begin(&mut self) -> Result<(), PeripheralError> {
        Ok(())
    }
}

impl DataLogPort for LogToTracingAdapter {
    fn log_sample(&mut self, sample: &SensorSample) {
        self.logged += 1;
        info!("[DATA LOG] {}", sample);
    }
}
