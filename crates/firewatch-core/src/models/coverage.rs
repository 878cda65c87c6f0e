//! Fire-station coverage models.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Fire station number.
pub type StationNumber = u32;

/// Association of an address with the fire station serving it.
///
/// Identity is the address. A station covers many addresses; an address is
/// covered by at most one station.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoverageMapping {
    pub address: String,
    /// Written as a string (`"3"`), read from either a string or a number.
    #[serde(with = "station_format")]
    pub station: StationNumber,
}

impl CoverageMapping {
    pub fn new(address: impl Into<String>, station: StationNumber) -> Self {
        Self {
            address: address.into(),
            station,
        }
    }
}

mod station_format {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawStation {
        Number(StationNumber),
        Text(String),
    }

    pub fn serialize<S: Serializer>(station: &StationNumber, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&station.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<StationNumber, D::Error> {
        match RawStation::deserialize(d)? {
            RawStation::Number(n) => Ok(n),
            RawStation::Text(text) => text.trim().parse().map_err(|_| {
                serde::de::Error::custom(format!("invalid station number: {:?}", text))
            }),
        }
    }
}
