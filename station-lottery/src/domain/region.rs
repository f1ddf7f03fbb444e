//! Regions and their representative points.

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// An administrative area used to scope line searches.
///
/// The representative point is usually the seat of the regional
/// government, not the geometric centre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub representative: Coordinate,
}

impl Region {
    pub fn new(name: impl Into<String>, representative: Coordinate) -> Self {
        Self {
            name: name.into(),
            representative,
        }
    }
}
