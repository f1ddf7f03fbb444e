//! Lottery configuration.

use crate::domain::{LineSelector, RegionSelector};

/// Configuration parameters for station draws.
#[derive(Debug, Clone)]
pub struct LotteryConfig {
    /// Attempts allowed for nationwide or region-scoped draws.
    pub max_retries: u32,

    /// Attempts allowed when the draw is pinned to a single line.
    /// The candidate pool is small, so fewer attempts are needed to
    /// tell whether any station on it fits the budget.
    pub max_retries_single_line: u32,

    /// Upper bound on a caller-supplied retry count.
    pub max_retries_cap: u32,

    /// Extra radius added to the budget-derived distance when filtering
    /// regions (km).
    pub reachability_slack_km: f64,

    /// Number of regions whose line lists are fetched concurrently when
    /// warming the provider cache.
    pub prefetch_batch_size: usize,
}

impl LotteryConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        max_retries: u32,
        max_retries_single_line: u32,
        max_retries_cap: u32,
        reachability_slack_km: f64,
        prefetch_batch_size: usize,
    ) -> Self {
        Self {
            max_retries,
            max_retries_single_line,
            max_retries_cap,
            reachability_slack_km,
            prefetch_batch_size,
        }
    }

    /// Default retry bound for the given constraints.
    pub fn default_retries(&self, region: &RegionSelector, line: &LineSelector) -> u32 {
        match (region, line) {
            (RegionSelector::Nationwide, _) => self.max_retries,
            (_, LineSelector::SpecificLine { .. }) => self.max_retries_single_line,
            (_, LineSelector::AnyLine) => self.max_retries,
        }
    }

    /// Retry bound to use, honouring a caller override up to the cap.
    pub fn retries_for(
        &self,
        region: &RegionSelector,
        line: &LineSelector,
        requested: Option<u32>,
    ) -> u32 {
        requested
            .unwrap_or_else(|| self.default_retries(region, line))
            .min(self.max_retries_cap)
    }
}

impl Default for LotteryConfig {
    fn default() -> Self {
        Self {
            max_retries: 100,
            max_retries_single_line: 10,
            max_retries_cap: 500,
            reachability_slack_km: 80.0,
            prefetch_batch_size: 8,
        }
    }
}
