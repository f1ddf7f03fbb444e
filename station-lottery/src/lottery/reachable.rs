//! Region reachability filter.
//!
//! Shrinks the pool of regions probed by nationwide draws. The filter is a
//! deliberately loose superset; whether a drawn station actually fits the
//! budget is decided per station by the engine.

use tracing::debug;

use crate::domain::{Coordinate, Region, RegionSelector, TimeBudget};

use super::estimate::{AVERAGE_SPEED_KMH, haversine_km};

/// Default slack added to the budget-derived radius, in kilometres.
pub const REACHABILITY_SLACK_KM: f64 = 80.0;

/// Names of regions reachable from a departure point within a budget.
///
/// Always derived fresh from its inputs and never edited afterwards, so a
/// set can be shared freely between concurrent draws. Names keep the order
/// of the region list they were computed from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReachableRegionSet {
    names: Vec<String>,
}

impl ReachableRegionSet {
    /// Build a set from region names, dropping duplicates.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !out.contains(&name) {
                out.push(name);
            }
        }
        Self { names: out }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Radius around the departure within which a region's representative
/// point must lie, or `None` for an unlimited budget.
pub fn reach_radius_km(budget: TimeBudget, slack_km: f64) -> Option<f64> {
    budget
        .limit()
        .map(|mins| f64::from(mins) / 60.0 * AVERAGE_SPEED_KMH + slack_km)
}

/// Regions whose representative point lies within reach of `departure`.
///
/// An unlimited budget admits every region.
pub fn reachable_regions(
    departure: Coordinate,
    budget: TimeBudget,
    all_regions: &[Region],
) -> ReachableRegionSet {
    reachable_regions_with_slack(departure, budget, all_regions, REACHABILITY_SLACK_KM)
}

/// [`reachable_regions`] with an explicit slack radius.
pub fn reachable_regions_with_slack(
    departure: Coordinate,
    budget: TimeBudget,
    all_regions: &[Region],
    slack_km: f64,
) -> ReachableRegionSet {
    let Some(radius) = reach_radius_km(budget, slack_km) else {
        return ReachableRegionSet::from_names(all_regions.iter().map(|r| r.name.clone()));
    };

    let set = ReachableRegionSet::from_names(
        all_regions
            .iter()
            .filter(|r| haversine_km(departure, r.representative) <= radius)
            .map(|r| r.name.clone()),
    );

    debug!(
        %departure,
        %budget,
        radius_km = radius,
        reachable = set.len(),
        total = all_regions.len(),
        "computed reachable regions"
    );

    set
}

/// Drop a region constraint that is no longer reachable.
///
/// A single-region or subdivision selector whose (parent) region is outside
/// `reachable` falls back to nationwide; anything else is returned as-is.
pub fn reconcile_selection(
    selector: RegionSelector,
    reachable: &ReachableRegionSet,
) -> RegionSelector {
    match selector.line_region() {
        Some(region) if !reachable.contains(region) => {
            debug!(%selector, "selected region no longer reachable, resetting to nationwide");
            RegionSelector::Nationwide
        }
        _ => selector,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn region() -> impl Strategy<Value = Region> {
        ("[a-z]{1,6}", -90.0f64..=90.0, -180.0f64..=180.0)
            .prop_map(|(name, lat, lon)| Region::new(name, Coordinate::new(lat, lon)))
    }

    proptest! {
        /// Unlimited budget is the identity on region names
        #[test]
        fn unlimited_is_identity(
            lat in -90.0f64..=90.0,
            lon in -180.0f64..=180.0,
            all in proptest::collection::vec(region(), 0..20),
        ) {
            let set = reachable_regions(Coordinate::new(lat, lon), TimeBudget::UNLIMITED, &all);
            let expected = ReachableRegionSet::from_names(all.iter().map(|r| r.name.clone()));
            prop_assert_eq!(set, expected);
        }

        /// A larger budget never loses a region
        #[test]
        fn monotone_in_budget(
            lat in -90.0f64..=90.0,
            lon in -180.0f64..=180.0,
            small in 1u32..600,
            extra in 0u32..600,
            all in proptest::collection::vec(region(), 0..20),
        ) {
            let d = Coordinate::new(lat, lon);
            let narrow = reachable_regions(d, TimeBudget::minutes(small), &all);
            let wide = reachable_regions(d, TimeBudget::minutes(small + extra), &all);
            for name in narrow.names() {
                prop_assert!(wide.contains(name));
            }
        }
    }
}
