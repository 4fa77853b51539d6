use core::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

/// Inertial measurement unit (accelerometer, gyroscope, magnetometer).
pub const ACC_GYRO_MAG: u8 = 0;

/// Barometric pressure and temperature.
pub const BARO_TEMP: u8 = 1;

/// PDM microphone.
pub const PDM_MIC: u8 = 2;

/// Number of sensor ids understood by the firmware.
pub const SENSOR_COUNT: u8 = 3;

/// A sensor id as carried on the wire. Construction through `TryFrom<u8>`
/// guarantees it is one of the ids above.
///
/// ```
/// use common::sensor_id::{SensorId, BARO_TEMP};
/// let id = SensorId::try_from(BARO_TEMP).expect("Failed to get sensor id.");
/// assert_eq!(id.value(), BARO_TEMP);
/// assert!(SensorId::try_from(42u8).is_err());
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SensorId {
    value: u8,
}

/// Represents errors in creating a `SensorId`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SensorIdError {
    /// The raw id is not one of the sensors on this device.
    #[error("Unknown sensor id {0}.")]
    Unknown(u8),
}

impl SensorId {
    /// Get the raw id.
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Iterate over every known sensor id in ascending order.
    pub fn all() -> impl Iterator<Item = SensorId> {
        (0..SENSOR_COUNT).map(|value| SensorId { value })
    }
}

impl TryFrom<u8> for SensorId {
    type Error = SensorIdError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value >= SENSOR_COUNT {
            return Err(SensorIdError::Unknown(value));
        }
        Ok(Self { value })
    }
}

impl From<SensorId> for u8 {
    fn from(id: SensorId) -> Self {
        id.value
    }
}

impl Display for SensorId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "<SensorId: {}>", self.value)
    }
}
