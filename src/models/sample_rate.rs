use derive_more::Display;
use thiserror::Error;

/// A sample rate in Hz. Always finite and non-negative; zero means the
/// sensor is disabled.
///
/// ```
/// use earable_coordinator::models::sample_rate::SampleRate;
/// let rate = SampleRate::try_from(10f32).expect("Failed to get sample rate.");
/// assert_eq!(rate.hz(), 10f32);
/// assert!(SampleRate::try_from(-1f32).is_err());
/// ```
#[derive(Debug, Display, Clone, Copy, PartialEq, PartialOrd, Default)]
#[display(fmt = "({} Hz)", hz)]
pub struct SampleRate {
    hz: f32,
}

#[derive(Error, Debug, PartialEq)]
pub enum SampleRateError {
    #[error("Sample rate can't be negative. Got {0} Hz.")]
    Negative(f32),
    #[error("Sample rate must be finite.")]
    NotFinite,
}

impl SampleRate {
    /// A disabled sensor.
    pub const ZERO: SampleRate = SampleRate { hz: 0f32 };

    pub fn hz(&self) -> f32 {
        self.hz
    }

    pub fn is_active(&self) -> bool {
        self.hz > 0f32
    }

    /// Multiply by a non-negative factor. Saturates at `f32::MAX` rather than
    /// leaving the valid range.
    pub fn scaled(self, factor: f32) -> SampleRate {
        let hz = self.hz * factor.max(0f32);
        if hz.is_finite() {
            SampleRate { hz }
        } else if self.hz == 0f32 {
            SampleRate::ZERO
        } else {
            SampleRate { hz: f32::MAX }
        }
    }

    /// The larger of two rates.
    pub fn max(self, other: SampleRate) -> SampleRate {
        if other.hz > self.hz {
            other
        } else {
            self
        }
    }
}

impl TryFrom<f32> for SampleRate {
    type Error = SampleRateError;

    fn try_from(hz: f32) -> Result<Self, Self::Error> {
        if !hz.is_finite() {
            return Err(SampleRateError::NotFinite);
        }
        if hz < 0f32 {
            return Err(SampleRateError::Negative(hz));
        }
        // Normalises -0.0.
        Ok(Self { hz: hz.abs() })
    }
}

impl From<SampleRate> for f32 {
    fn from(rate: SampleRate) -> Self {
        rate.hz
    }
}
