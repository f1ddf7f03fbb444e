//! Region catalog.
//!
//! The set of regions a user can restrict a draw to, each with a
//! representative point used by the reachability filter, plus named
//! sub-areas of large regions. The built-in catalog covers Japan's 47
//! prefectures; a JSON file can replace it.

mod file;
mod japan;

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, Region, RegionSelector, SubdivisionRule, TimeBudget};
use crate::lottery::{ReachableRegionSet, reachable_regions_with_slack};

pub use file::{CatalogError, load_catalog, save_catalog};
pub use japan::{TOKYO_CORE, TOKYO_OUTER, japan_prefectures};

/// Area name meaning "no region constraint".
pub const NATIONWIDE: &str = "全国";

/// A named sub-area of a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subdivision {
    pub name: String,
    pub parent: String,
    pub representative: Coordinate,
    pub rule: SubdivisionRule,
}

impl Subdivision {
    /// The selector restricting a draw to this sub-area.
    pub fn selector(&self) -> RegionSelector {
        RegionSelector::RegionSubdivision {
            parent: self.parent.clone(),
            rule: self.rule.clone(),
        }
    }
}

/// An entry the user can pick as the area of a draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Area {
    pub name: String,
    /// Parent region for sub-areas.
    pub parent: Option<String>,
}

/// Regions and sub-areas known to the application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionCatalog {
    regions: Vec<Region>,
    #[serde(default)]
    subdivisions: Vec<Subdivision>,
}

impl RegionCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a region. A region with the same name is replaced.
    pub fn add_region(&mut self, region: Region) {
        match self.regions.iter_mut().find(|r| r.name == region.name) {
            Some(existing) => *existing = region,
            None => self.regions.push(region),
        }
    }

    /// Add a sub-area. A sub-area with the same name is replaced.
    pub fn add_subdivision(&mut self, subdivision: Subdivision) {
        match self
            .subdivisions
            .iter_mut()
            .find(|s| s.name == subdivision.name)
        {
            Some(existing) => *existing = subdivision,
            None => self.subdivisions.push(subdivision),
        }
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn subdivisions(&self) -> &[Subdivision] {
        &self.subdivisions
    }

    pub fn region(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name == name)
    }

    pub fn subdivision(&self, name: &str) -> Option<&Subdivision> {
        self.subdivisions.iter().find(|s| s.name == name)
    }

    /// Number of regions (sub-areas not counted).
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Map a user-facing area name to a region selector.
    ///
    /// The empty string and [`NATIONWIDE`] mean no constraint. Returns
    /// `None` for names the catalog does not know.
    pub fn resolve(&self, area: &str) -> Option<RegionSelector> {
        let area = area.trim();
        if area.is_empty() || area == NATIONWIDE {
            return Some(RegionSelector::Nationwide);
        }

        if let Some(region) = self.region(area) {
            return Some(RegionSelector::region(region.name.clone()));
        }

        self.subdivision(area).map(Subdivision::selector)
    }

    /// Regions reachable from `departure` within `budget`.
    pub fn reachable(
        &self,
        departure: Coordinate,
        budget: TimeBudget,
        slack_km: f64,
    ) -> ReachableRegionSet {
        reachable_regions_with_slack(departure, budget, &self.regions, slack_km)
    }

    /// Areas worth offering for a departure and budget.
    ///
    /// Reachable regions come first, in catalog order, followed by
    /// sub-areas whose parent is reachable. A draw accepts exactly these
    /// areas without resetting to nationwide.
    pub fn selectable_areas(
        &self,
        departure: Coordinate,
        budget: TimeBudget,
        slack_km: f64,
    ) -> Vec<Area> {
        let reachable = self.reachable(departure, budget, slack_km);

        let regions = reachable.names().iter().map(|name| Area {
            name: name.clone(),
            parent: None,
        });

        let subdivisions = self
            .subdivisions
            .iter()
            .filter(|s| reachable.contains(&s.parent))
            .map(|s| Area {
                name: s.name.clone(),
                parent: Some(s.parent.clone()),
            });

        regions.chain(subdivisions).collect()
    }
}

/// Builder for creating region catalogs.
///
/// Provides a fluent API for adding regions and sub-areas.
#[derive(Debug, Default)]
pub struct RegionCatalogBuilder {
    inner: RegionCatalog,
}

impl RegionCatalogBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a region with its representative point.
    pub fn region(mut self, name: &str, latitude: f64, longitude: f64) -> Self {
        self.inner
            .add_region(Region::new(name, Coordinate::new(latitude, longitude)));
        self
    }

    /// Add a sub-area of `parent` defined by a postal-code prefix range.
    pub fn postal_subdivision(
        mut self,
        name: &str,
        parent: &str,
        (latitude, longitude): (f64, f64),
        (min, max): (u16, u16),
    ) -> Self {
        self.inner.add_subdivision(Subdivision {
            name: name.to_string(),
            parent: parent.to_string(),
            representative: Coordinate::new(latitude, longitude),
            rule: SubdivisionRule::PostalPrefix { min, max },
        });
        self
    }

    /// Build the catalog.
    pub fn build(self) -> RegionCatalog {
        self.inner
    }
}
