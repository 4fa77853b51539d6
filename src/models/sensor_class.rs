use common::sensor_id::{SensorId, SensorIdError, ACC_GYRO_MAG, BARO_TEMP, PDM_MIC};
use derive_more::Display;
use thiserror::Error;

/// The closed set of sensors a configuration request can address.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SensorClass {
    /// Accelerometer, gyroscope and magnetometer.
    #[display(fmt = "motion")]
    Motion,

    /// Barometric pressure and temperature.
    #[display(fmt = "environmental")]
    Environmental,

    /// PDM microphone samples.
    #[display(fmt = "raw-audio")]
    RawAudio,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SensorClassError {
    #[error("Unknown sensor id {0}.")]
    UnknownId(u8),
}

impl SensorClass {
    /// Every sensor class, in wire id order.
    pub const ALL: [SensorClass; 3] = [
        SensorClass::Motion,
        SensorClass::Environmental,
        SensorClass::RawAudio,
    ];

    /// The id used for this class on the wire.
    pub fn id(self) -> u8 {
        match self {
            SensorClass::Motion => ACC_GYRO_MAG,
            SensorClass::Environmental => BARO_TEMP,
            SensorClass::RawAudio => PDM_MIC,
        }
    }
}

/// A wire id without a class here is refused rather than guessed at.
impl TryFrom<SensorId> for SensorClass {
    type Error = SensorClassError;

    fn try_from(id: SensorId) -> Result<Self, Self::Error> {
        match id.value() {
            ACC_GYRO_MAG => Ok(SensorClass::Motion),
            BARO_TEMP => Ok(SensorClass::Environmental),
            PDM_MIC => Ok(SensorClass::RawAudio),
            other => Err(SensorClassError::UnknownId(other)),
        }
    }
}

impl TryFrom<u8> for SensorClass {
    type Error = SensorClassError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match SensorId::try_from(value) {
            Err(SensorIdError::Unknown(id)) => Err(SensorClassError::UnknownId(id)),
            Ok(id) => SensorClass::try_from(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_map_back_to_the_same_class() {
        for class in SensorClass::ALL {
            assert_eq!(SensorClass::try_from(class.id()), Ok(class));
        }
    }

    #[test]
    fn test_all_is_in_wire_id_order() {
        let ids: Vec<u8> = SensorClass::ALL.iter().map(|c| c.id()).collect();
        let known: Vec<u8> = SensorId::all().map(u8::from).collect();
        assert_eq!(ids, known);
    }

    #[test]
    fn test_every_wire_id_has_its_own_class() {
        let classes: Vec<SensorClass> = SensorId::all()
            .map(|id| SensorClass::try_from(id).expect("Every wire id maps to a class."))
            .collect();
        assert_eq!(classes, SensorClass::ALL.to_vec());
    }

    #[test]
    fn test_unknown_id_is_rejected() {
        assert_eq!(
            SensorClass::try_from(7u8),
            Err(SensorClassError::UnknownId(7))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(SensorClass::RawAudio.to_string(), "raw-audio");
        assert_eq!(SensorClass::Environmental.to_string(), "environmental");
    }
}
