use std::collections::BTreeMap;

use crate::{
    config::RATE_CORRECTION_FACTOR,
    models::{sample_rate::SampleRate, sensor_class::SensorClass},
};

/// Per-class multipliers compensating for the sensor drivers running slower
/// than the rate they are programmed with. Classes without an entry use the
/// default factor.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionTable {
    default_factor: f32,
    overrides: BTreeMap<SensorClass, f32>,
}

impl CorrectionTable {
    /// A table applying `default_factor` to every class. Negative or
    /// non-finite factors are treated as 1.
    pub fn new(default_factor: f32) -> Self {
        Self {
            default_factor: sanitize(default_factor),
            overrides: BTreeMap::new(),
        }
    }

    pub fn with_factor(mut self, class: SensorClass, factor: f32) -> Self {
        self.overrides.insert(class, sanitize(factor));
        self
    }

    pub fn factor(&self, class: SensorClass) -> f32 {
        self.overrides
            .get(&class)
            .copied()
            .unwrap_or(self.default_factor)
    }

    /// Map a requested rate to the rate the hardware must be programmed with.
    pub fn correct(&self, class: SensorClass, requested: SampleRate) -> SampleRate {
        requested.scaled(self.factor(class))
    }
}

impl Default for CorrectionTable {
    /// The microphone driver is exact; everything else runs slow.
    fn default() -> Self {
        Self::new(RATE_CORRECTION_FACTOR).with_factor(SensorClass::RawAudio, 1f32)
    }
}

fn sanitize(factor: f32) -> f32 {
    if factor.is_finite() && factor >= 0f32 {
        factor
    } else {
        1f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(hz: f32) -> SampleRate {
        SampleRate::try_from(hz).expect("Failed to get sample rate.")
    }

    #[test]
    fn test_non_exempt_classes_are_scaled() {
        let table = CorrectionTable::default();
        for hz in [0f32, 1f32, 10f32, 62.5f32, 400f32] {
            for class in [SensorClass::Motion, SensorClass::Environmental] {
                assert_eq!(table.correct(class, rate(hz)).hz(), hz * 1.5);
            }
        }
    }

    #[test]
    fn test_raw_audio_is_unchanged() {
        let table = CorrectionTable::default();
        for hz in [0f32, 8000f32, 16000f32, 44100f32] {
            assert_eq!(table.correct(SensorClass::RawAudio, rate(hz)).hz(), hz);
        }
    }

    #[test]
    fn test_zero_stays_zero() {
        let table = CorrectionTable::default();
        for class in SensorClass::ALL {
            assert_eq!(table.correct(class, SampleRate::ZERO), SampleRate::ZERO);
        }
    }

    #[test]
    fn test_override_is_a_data_change() {
        let table = CorrectionTable::default().with_factor(SensorClass::Environmental, 2f32);
        assert_eq!(table.factor(SensorClass::Environmental), 2f32);
        assert_eq!(table.correct(SensorClass::Environmental, rate(10f32)).hz(), 20f32);
        assert_eq!(table.factor(SensorClass::Motion), 1.5);
    }

    #[test]
    fn test_invalid_factor_falls_back_to_identity() {
        let table = CorrectionTable::new(f32::NAN).with_factor(SensorClass::Motion, -2f32);
        assert_eq!(table.factor(SensorClass::Environmental), 1f32);
        assert_eq!(table.factor(SensorClass::Motion), 1f32);
    }
}
