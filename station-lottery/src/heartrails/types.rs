//! HeartRails Express response DTOs.

use serde::{Deserialize, Deserializer};

/// Body of a `getLines` response.
#[derive(Debug, Clone, Deserialize)]
pub struct LinesResponse {
    pub response: LinesBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinesBody {
    /// Line names. Absent when `error` is set.
    #[serde(default)]
    pub line: Vec<String>,

    pub error: Option<String>,
}

/// Body of a `getStations` response.
#[derive(Debug, Clone, Deserialize)]
pub struct StationsResponse {
    pub response: StationsBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationsBody {
    #[serde(default)]
    pub station: Vec<StationDto>,

    pub error: Option<String>,
}

/// One station entry.
#[derive(Debug, Clone, Deserialize)]
pub struct StationDto {
    pub name: String,

    pub line: String,

    pub prefecture: String,

    /// Longitude.
    #[serde(deserialize_with = "number_or_string")]
    pub x: f64,

    /// Latitude.
    #[serde(deserialize_with = "number_or_string")]
    pub y: f64,

    /// Seven-digit postal code, no hyphen.
    #[serde(default)]
    pub postal: Option<String>,

    /// Previous station on the line, `null` at the terminus.
    #[serde(default)]
    pub prev: Option<String>,

    /// Next station on the line, `null` at the terminus.
    #[serde(default)]
    pub next: Option<String>,
}

/// Coordinates are documented as numbers but some mirrors send strings.
fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
