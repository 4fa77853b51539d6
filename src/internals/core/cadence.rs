use std::time::Duration;

use thiserror::Error;
use tracing::{debug, trace};

use super::ports::SchedulerPort;
use crate::{
    config::{IDLE_CADENCE_MS, MAX_CADENCE_MS, MIN_CADENCE_MS},
    models::sample_rate::SampleRate,
};

/// Maps the fastest active sensor rate to a scheduler period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CadencePolicy {
    idle: Duration,
    min: Duration,
    max: Duration,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CadenceError {
    #[error("Minimum cadence must be non-zero.")]
    ZeroMinimum,
    #[error("Minimum cadence {min:?} exceeds maximum {max:?}.")]
    InvertedRange { min: Duration, max: Duration },
    #[error("Idle cadence {idle:?} must not be faster than the maximum {max:?}.")]
    IdleTooFast { idle: Duration, max: Duration },
}

impl CadencePolicy {
    /// The idle period must be at least `max`, otherwise a sensor starting
    /// up could slow the scheduler down.
    pub fn new(idle: Duration, min: Duration, max: Duration) -> Result<Self, CadenceError> {
        if min.is_zero() {
            return Err(CadenceError::ZeroMinimum);
        }
        if min > max {
            return Err(CadenceError::InvertedRange { min, max });
        }
        if idle < max {
            return Err(CadenceError::IdleTooFast { idle, max });
        }
        Ok(Self { idle, min, max })
    }

    pub fn idle(&self) -> Duration {
        self.idle
    }

    /// Zero runs at the idle period; anything else at one period per sample
    /// of the fastest sensor, clamped to the supported range.
    pub fn period_for(&self, max_active_rate: SampleRate) -> Duration {
        if !max_active_rate.is_active() {
            return self.idle;
        }
        match Duration::try_from_secs_f64(1f64 / f64::from(max_active_rate.hz())) {
            Ok(period) => period.clamp(self.min, self.max),
            Err(_) => self.max,
        }
    }
}

impl Default for CadencePolicy {
    fn default() -> Self {
        Self {
            idle: Duration::from_millis(IDLE_CADENCE_MS),
            min: Duration::from_millis(MIN_CADENCE_MS),
            max: Duration::from_millis(MAX_CADENCE_MS),
        }
    }
}

/// Keeps the scheduler period in step with the registry. Every recompute is
/// applied to the scheduler before returning.
pub struct SchedulerCadenceController<T: SchedulerPort> {
    policy: CadencePolicy,
    scheduler: T,
    current: Duration,
}

impl<T: SchedulerPort> SchedulerCadenceController<T> {
    pub fn new(policy: CadencePolicy, scheduler: T) -> Self {
        Self {
            current: policy.idle(),
            policy,
            scheduler,
        }
    }

    /// Start the scheduler at its idle cadence.
    pub fn start(&mut self) {
        self.current = self.policy.idle();
        debug!("Starting scheduler at idle cadence {:?}.", self.current);
        self.scheduler.set_cadence(self.current);
    }

    #[tracing::instrument(skip_all)]
    pub fn on_registry_changed(&mut self, max_active_rate: SampleRate) {
        let period = self.policy.period_for(max_active_rate);
        if period == self.current {
            trace!("Cadence unchanged at {:?}.", period);
            return;
        }
        debug!(
            "Cadence {:?} -> {:?} for max rate {}.",
            self.current, period, max_active_rate
        );
        self.current = period;
        self.scheduler.set_cadence(period);
    }

    pub fn current_period(&self) -> Duration {
        self.current
    }

    pub fn tick(&mut self) {
        self.scheduler.tick();
    }

    pub fn scheduler(&self) -> &T {
        &self.scheduler
    }
}
