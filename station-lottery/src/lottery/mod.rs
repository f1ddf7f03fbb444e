//! Station lottery.
//!
//! Picks a random station reachable from a departure point within a travel
//! time budget:
//!
//! 1. [`reachable_regions`] narrows the regions worth probing,
//! 2. the [`Lottery`] engine draws region → line → station through a
//!    [`StationProvider`],
//! 3. [`build_candidates`] applies the region constraint to each line,
//! 4. [`estimate_minutes`] decides whether the drawn station fits the budget.

mod candidates;
mod config;
mod engine;
mod error;
mod estimate;
mod reachable;

pub use candidates::build_candidates;
pub use config::LotteryConfig;
pub use engine::{
    Lottery, LotteryRequest, LotteryState, NoProgress, Outcome, Progress, ProgressObserver,
    SelectionResult, StationProvider, select,
};
pub use error::{AttemptFailure, LotteryError, ProviderError};
pub use estimate::{AVERAGE_SPEED_KMH, DETOUR_FACTOR, EARTH_RADIUS_KM, estimate_minutes, haversine_km};
pub use reachable::{
    REACHABILITY_SLACK_KM, ReachableRegionSet, reach_radius_km, reachable_regions,
    reachable_regions_with_slack, reconcile_selection,
};
