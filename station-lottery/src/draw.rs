//! One complete draw, from form input to outcome.
//!
//! Resolves the departure, recomputes the reachable regions, drops an area
//! selection that fell out of reach, looks up the selected region's lines
//! and runs the lottery engine. If that lookup fails, the engine retries it
//! within its attempts.

use rand::Rng;
use tracing::{info, trace, warn};

use crate::departure::{Departure, StationDirectory, resolve_departure};
use crate::domain::{Coordinate, LineSelector, RegionSelector, TimeBudget};
use crate::lottery::{
    LotteryConfig, LotteryError, LotteryRequest, Outcome, Progress, StationProvider,
    reconcile_selection, select,
};
use crate::regions::{NATIONWIDE, RegionCatalog};

/// User input for a draw.
#[derive(Debug, Clone)]
pub struct DrawParams {
    pub departure: Departure,
    pub budget: TimeBudget,
    /// Area name from the catalog; `None`, empty or "全国" for nationwide.
    pub area: Option<String>,
    /// Line name, only honoured together with a region or sub-area.
    pub line: Option<String>,
    /// Caller override of the retry bound.
    pub max_retries: Option<u32>,
}

/// Result of a draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Draw {
    pub departure: Coordinate,
    /// Area name the draw ran in.
    pub area: String,
    /// Region constraint the engine actually used.
    pub region: RegionSelector,
    /// The requested area was out of reach and replaced by nationwide.
    pub area_reset: bool,
    pub max_retries: u32,
    pub outcome: Outcome,
}

/// Errors that stop a draw before the first attempt.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DrawError {
    #[error(transparent)]
    Departure(#[from] LotteryError),

    #[error("unknown area: {0}")]
    UnknownArea(String),
}

/// Run a draw against `provider`.
pub async fn run_draw<P, R>(
    provider: &P,
    catalog: &RegionCatalog,
    config: &LotteryConfig,
    params: DrawParams,
    rng: R,
) -> Result<Draw, DrawError>
where
    P: StationProvider + StationDirectory + Sync,
    R: Rng,
{
    let area = params.area.as_deref().unwrap_or_default();
    let requested = catalog
        .resolve(area)
        .ok_or_else(|| DrawError::UnknownArea(area.to_string()))?;

    let departure = resolve_departure(provider, &params.departure).await?;

    let reachable = catalog.reachable(departure, params.budget, config.reachability_slack_km);
    let region = reconcile_selection(requested.clone(), &reachable);
    let area_reset = region != requested;

    let line = match params.line.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() && !region.is_nationwide() => LineSelector::specific(name),
        _ => LineSelector::AnyLine,
    };

    let max_retries = config.retries_for(&region, &line, params.max_retries);

    let request = match region.line_region() {
        None => LotteryRequest::nationwide(departure, params.budget, reachable, max_retries),
        Some(line_region) => {
            let region_lines = match &line {
                LineSelector::SpecificLine { .. } => None,
                LineSelector::AnyLine => match provider.list_lines(line_region).await {
                    Ok(lines) => Some(lines),
                    Err(e) => {
                        warn!(region = line_region, error = %e, "failed to list lines");
                        None
                    }
                },
            };

            LotteryRequest::regional(
                departure,
                params.budget,
                region.clone(),
                region_lines,
                max_retries,
            )
            .with_line(line)
        }
    };

    let outcome = select(provider, &request, rng, |p: &Progress| {
        trace!(progress = %p, "draw progress")
    })
    .await;

    info!(
        %departure,
        budget = %params.budget,
        region = %region,
        area_reset,
        attempts = outcome.attempts(),
        found = outcome.result().is_some(),
        "draw finished"
    );

    let area = if region.is_nationwide() {
        NATIONWIDE.to_string()
    } else {
        area.trim().to_string()
    };

    Ok(Draw {
        departure,
        area,
        region,
        area_reset,
        max_retries,
        outcome,
    })
}
