use std::collections::BTreeMap;

use tracing::trace;

use crate::models::{sample_rate::SampleRate, sensor_class::SensorClass};

/// Last accepted effective rate for each sensor class which drives the
/// scheduler cadence. Classes outside the tracked set are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorConfigRegistry {
    rates: BTreeMap<SensorClass, SampleRate>,
}

impl SensorConfigRegistry {
    /// Track `classes`, all starting at zero.
    pub fn new(classes: impl IntoIterator<Item = SensorClass>) -> Self {
        Self {
            rates: classes
                .into_iter()
                .map(|class| (class, SampleRate::ZERO))
                .collect(),
        }
    }

    pub fn is_tracked(&self, class: SensorClass) -> bool {
        self.rates.contains_key(&class)
    }

    pub fn rate_of(&self, class: SensorClass) -> Option<SampleRate> {
        self.rates.get(&class).copied()
    }

    /// Store the accepted rate for `class`. Returns whether the stored state
    /// changed.
    pub fn update(&mut self, class: SensorClass, rate: SampleRate) -> bool {
        match self.rates.get_mut(&class) {
            None => {
                trace!("Ignoring untracked class {}.", class);
                false
            }
            Some(stored) if *stored == rate => false,
            Some(stored) => {
                trace!("Registry {}: {} -> {}.", class, stored, rate);
                *stored = rate;
                true
            }
        }
    }

    pub fn reset(&mut self) {
        for rate in self.rates.values_mut() {
            *rate = SampleRate::ZERO;
        }
    }

    pub fn max_active_rate(&self) -> SampleRate {
        self.rates
            .values()
            .fold(SampleRate::ZERO, |max, rate| max.max(*rate))
    }
}

impl Default for SensorConfigRegistry {
    fn default() -> Self {
        Self::new([SensorClass::Motion, SensorClass::Environmental])
    }
}
