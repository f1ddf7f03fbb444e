//! Candidate set construction.

use crate::domain::{RegionSelector, Station};

/// Restrict a line's stations to those eligible under `region`.
///
/// Lines routinely cross region borders, so a line listed for one region
/// still returns stations outside it. The result may be empty.
pub fn build_candidates(stations: Vec<Station>, region: &RegionSelector) -> Vec<Station> {
    match region {
        RegionSelector::Nationwide => stations,
        RegionSelector::Region { name } => stations
            .into_iter()
            .filter(|s| &s.region == name)
            .collect(),
        RegionSelector::RegionSubdivision { parent, rule } => stations
            .into_iter()
            .filter(|s| &s.region == parent && rule.matches(s))
            .collect(),
    }
}
