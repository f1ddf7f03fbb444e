//! Station records.

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// A station on a line, as reported by the station provider.
///
/// The same physical station appears once per line serving it, so two
/// `Station` values with the same name may differ in `line` and
/// neighbouring stations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    pub line: String,
    /// Region (prefecture) the station belongs to.
    pub region: String,
    pub coordinate: Coordinate,
    /// Postal code, digits only or with a hyphen (e.g. "160-0022").
    pub postal_code: String,
    pub previous_station: Option<String>,
    pub next_station: Option<String>,
}

impl Station {
    /// The first three digits of the postal code, if present.
    ///
    /// Hyphens and other non-digit characters are ignored.
    pub fn postal_prefix(&self) -> Option<u16> {
        let digits: String = self
            .postal_code
            .chars()
            .filter(char::is_ascii_digit)
            .take(3)
            .collect();

        if digits.len() < 3 {
            return None;
        }

        digits.parse().ok()
    }
}

#[cfg(test)]
pub(crate) fn station(name: &str, line: &str, region: &str, postal: &str, lat: f64, lon: f64) -> Station {
    Station {
        name: name.to_string(),
        line: line.to_string(),
        region: region.to_string(),
        coordinate: Coordinate::new(lat, lon),
        postal_code: postal.to_string(),
        previous_station: None,
        next_station: None,
    }
}
