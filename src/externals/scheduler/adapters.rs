use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::internals::core::ports::SchedulerPort;

/// A periodic scheduler driven by the outer run loop. A tick only runs the
/// scheduled duties once the current period has elapsed since the last run.
pub struct TracingTaskScheduler {
    period: Duration,
    last_run: Option<Instant>,
    ticks: u64,
    runs: u64,
}

impl TracingTaskScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            last_run: None,
            ticks: 0,
            runs: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn runs(&self) -> u64 {
        self.runs
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Returns whether the duties ran on this tick.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        self.ticks += 1;
        let due = match self.last_run {
            None => true,
            Some(last_run) => now.saturating_duration_since(last_run) >= self.period,
        };
        if due {
            self.runs += 1;
            self.last_run = Some(now);
            trace!("Running scheduled duties. Run #{}.", self.runs);
        }
        due
    }
}

impl SchedulerPort for TracingTaskScheduler {
    fn set_cadence(&mut self, period: Duration) {
        debug!("Scheduler period {:?} -> {:?}.", self.period, period);
        self.period = period;
    }

    fn tick(&mut self) {
        self.tick_at(Instant::now());
    }
}
