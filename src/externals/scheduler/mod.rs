use std::time::Duration;

use self::adapters::TracingTaskScheduler;
use crate::config::IDLE_CADENCE_MS;

pub mod adapters;

pub struct SchedulerModule {
    pub scheduler_adapter: TracingTaskScheduler,
}

impl SchedulerModule {
    pub fn initialize() -> Self {
        Self {
            scheduler_adapter: TracingTaskScheduler::new(Duration::from_millis(IDLE_CADENCE_MS)),
        }
    }
}
