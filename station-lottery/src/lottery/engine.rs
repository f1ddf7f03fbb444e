//! Station lottery engine.
//!
//! Draws region → line → station until a station within the time budget
//! turns up or the retry budget runs out. The search is a small state
//! machine advanced one attempt at a time by [`Lottery::step`], so callers
//! can drive it themselves or let [`Lottery::run`] loop to completion.
//!
//! Attempts are strictly sequential: the line drawn in an attempt decides
//! which stations are fetched, so there is nothing to parallelise.

use std::fmt;
use std::future::Future;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::{Coordinate, LineSelector, RegionSelector, Station, TimeBudget};

use super::candidates::build_candidates;
use super::error::{AttemptFailure, ProviderError};
use super::estimate::estimate_minutes;
use super::reachable::ReachableRegionSet;

/// Source of lines and stations.
///
/// This abstraction allows the engine to be tested with mock data.
pub trait StationProvider {
    /// Names of the lines serving a region. An empty list is a valid answer.
    fn list_lines(
        &self,
        region: &str,
    ) -> impl Future<Output = Result<Vec<String>, ProviderError>> + Send;

    /// All stations on a line.
    fn list_stations(
        &self,
        line: &str,
    ) -> impl Future<Output = Result<Vec<Station>, ProviderError>> + Send;
}

/// A station the lottery settled on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionResult {
    pub station: Station,
    pub estimated_travel_minutes: u32,
}

/// Parameters of one lottery invocation.
#[derive(Debug, Clone)]
pub struct LotteryRequest {
    /// Where the trip starts.
    pub departure: Coordinate,

    /// Longest acceptable estimated trip.
    pub budget: TimeBudget,

    /// Region constraint.
    pub region: RegionSelector,

    /// Line constraint, ignored for nationwide draws.
    pub line: LineSelector,

    /// Maximum number of attempts.
    pub max_retries: u32,

    /// Regions sampled by nationwide draws.
    pub reachable: ReachableRegionSet,

    /// Lines of the selected region, if already looked up. When `None`,
    /// attempts look them up until one lookup succeeds.
    pub region_lines: Option<Vec<String>>,
}

impl LotteryRequest {
    /// Create a nationwide request over the given reachable regions.
    pub fn nationwide(
        departure: Coordinate,
        budget: TimeBudget,
        reachable: ReachableRegionSet,
        max_retries: u32,
    ) -> Self {
        Self {
            departure,
            budget,
            region: RegionSelector::Nationwide,
            line: LineSelector::AnyLine,
            max_retries,
            reachable,
            region_lines: None,
        }
    }

    /// Create a request restricted to one region (or sub-area). Pass the
    /// region's lines if they have already been fetched.
    pub fn regional(
        departure: Coordinate,
        budget: TimeBudget,
        region: RegionSelector,
        region_lines: Option<Vec<String>>,
        max_retries: u32,
    ) -> Self {
        Self {
            departure,
            budget,
            region,
            line: LineSelector::AnyLine,
            max_retries,
            reachable: ReachableRegionSet::default(),
            region_lines,
        }
    }

    /// Restrict the draw to a line.
    pub fn with_line(mut self, line: LineSelector) -> Self {
        self.line = line;
        self
    }
}

/// Per-attempt progress notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub attempt: u32,
    pub max_attempts: u32,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "searching: attempt {} of {}",
            self.attempt, self.max_attempts
        )
    }
}

/// Receives a [`Progress`] value before each attempt.
pub trait ProgressObserver {
    fn on_progress(&mut self, progress: &Progress);
}

impl<F: FnMut(&Progress)> ProgressObserver for F {
    fn on_progress(&mut self, progress: &Progress) {
        self(progress)
    }
}

/// Observer that ignores progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&mut self, _progress: &Progress) {}
}

/// Where a lottery stands.
#[derive(Debug, Clone, PartialEq)]
pub enum LotteryState {
    /// The next attempt to run (1-based).
    Searching { attempt: u32 },

    /// A station within budget was drawn on attempt `attempts`.
    Found {
        result: SelectionResult,
        attempts: u32,
    },

    /// No attempt produced an acceptable station.
    Exhausted { attempts: u32 },
}

impl LotteryState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LotteryState::Searching { .. })
    }
}

/// Final result of a lottery.
///
/// `Exhausted` is an ordinary answer meaning "nothing fits, relax the
/// constraints", not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Found {
        result: SelectionResult,
        attempts: u32,
    },
    Exhausted {
        attempts: u32,
    },
}

impl Outcome {
    /// The selected station, if any.
    pub fn result(&self) -> Option<&SelectionResult> {
        match self {
            Outcome::Found { result, .. } => Some(result),
            Outcome::Exhausted { .. } => None,
        }
    }

    /// Number of attempts made.
    pub fn attempts(&self) -> u32 {
        match self {
            Outcome::Found { attempts, .. } | Outcome::Exhausted { attempts } => *attempts,
        }
    }
}

/// One lottery invocation.
pub struct Lottery<'a, P: StationProvider, R: Rng, O: ProgressObserver = NoProgress> {
    provider: &'a P,
    request: &'a LotteryRequest,
    rng: R,
    observer: O,
    state: LotteryState,
    /// Line pool of a regional draw, once known.
    lines: Option<Vec<String>>,
}

impl<'a, P: StationProvider, R: Rng> Lottery<'a, P, R, NoProgress> {
    /// Create a lottery that reports no progress.
    pub fn new(provider: &'a P, request: &'a LotteryRequest, rng: R) -> Self {
        Self::with_observer(provider, request, rng, NoProgress)
    }
}

impl<'a, P: StationProvider, R: Rng, O: ProgressObserver> Lottery<'a, P, R, O> {
    /// Create a lottery that reports each attempt to `observer`.
    pub fn with_observer(provider: &'a P, request: &'a LotteryRequest, rng: R, observer: O) -> Self {
        let state = if request.max_retries == 0 {
            LotteryState::Exhausted { attempts: 0 }
        } else {
            LotteryState::Searching { attempt: 1 }
        };

        Self {
            provider,
            request,
            rng,
            observer,
            state,
            lines: request.region_lines.clone(),
        }
    }

    pub fn state(&self) -> &LotteryState {
        &self.state
    }

    /// Run one attempt. Does nothing once the lottery has finished.
    pub async fn step(&mut self) -> &LotteryState {
        let LotteryState::Searching { attempt } = self.state else {
            return &self.state;
        };

        self.observer.on_progress(&Progress {
            attempt,
            max_attempts: self.request.max_retries,
        });

        match self.attempt().await {
            Ok(result) => {
                info!(
                    attempt,
                    station = %result.station.name,
                    line = %result.station.line,
                    minutes = result.estimated_travel_minutes,
                    "station drawn"
                );
                self.state = LotteryState::Found {
                    result,
                    attempts: attempt,
                };
            }
            Err(failure) => {
                debug!(attempt, %failure, "attempt failed");
                if attempt >= self.request.max_retries {
                    info!(
                        attempts = attempt,
                        region = %self.request.region,
                        budget = %self.request.budget,
                        "no station within budget"
                    );
                    self.state = LotteryState::Exhausted { attempts: attempt };
                } else {
                    self.state = LotteryState::Searching {
                        attempt: attempt + 1,
                    };
                }
            }
        }

        &self.state
    }

    /// Step until a terminal state is reached.
    pub async fn run(mut self) -> Outcome {
        while !self.state.is_terminal() {
            self.step().await;
        }

        match self.state {
            LotteryState::Found { result, attempts } => Outcome::Found { result, attempts },
            LotteryState::Exhausted { attempts } => Outcome::Exhausted { attempts },
            LotteryState::Searching { .. } => unreachable!("loop exits only in a terminal state"),
        }
    }

    /// Draw a line, then a station on it, and check the budget.
    async fn attempt(&mut self) -> Result<SelectionResult, AttemptFailure> {
        let request = self.request;

        let line = self.draw_line().await?;
        let stations = self.provider.list_stations(&line).await?;

        let mut candidates = build_candidates(stations, &request.region);
        if candidates.is_empty() {
            return Err(AttemptFailure::EmptyCandidateSet { line });
        }
        let station = candidates.swap_remove(self.rng.gen_range(0..candidates.len()));

        let minutes = estimate_minutes(request.departure, station.coordinate);
        if !request.budget.admits(minutes) {
            return Err(AttemptFailure::OverBudget {
                station: station.name,
                minutes,
                budget: request.budget.as_minutes(),
            });
        }

        Ok(SelectionResult {
            station,
            estimated_travel_minutes: minutes,
        })
    }

    /// Resolve the line pool for this attempt and draw one line from it.
    ///
    /// Nationwide draws pick a fresh region and look its lines up on every
    /// attempt, which is what spreads successive attempts across regions.
    /// Regional draws keep their lines after the first successful lookup; a
    /// failed lookup fails only the current attempt.
    async fn draw_line(&mut self) -> Result<String, AttemptFailure> {
        let request = self.request;

        match request.region.line_region() {
            None => {
                let region = request
                    .reachable
                    .names()
                    .choose(&mut self.rng)
                    .ok_or(AttemptFailure::NoReachableRegions)?;

                let lines = self.provider.list_lines(region).await?;

                lines
                    .choose(&mut self.rng)
                    .cloned()
                    .ok_or_else(|| AttemptFailure::NoLines {
                        region: region.clone(),
                    })
            }
            Some(line_region) => {
                let pool: &[String] = match &request.line {
                    LineSelector::SpecificLine { name } => std::slice::from_ref(name),
                    LineSelector::AnyLine => {
                        if self.lines.is_none() {
                            let lines = self.provider.list_lines(line_region).await?;
                            self.lines = Some(lines);
                        }
                        self.lines.as_deref().unwrap_or_default()
                    }
                };

                pool.choose(&mut self.rng)
                    .cloned()
                    .ok_or_else(|| AttemptFailure::NoLines {
                        region: request.region.to_string(),
                    })
            }
        }
    }
}

/// Run a lottery to completion. Pass [`NoProgress`] to skip reporting.
pub async fn select<P: StationProvider, R: Rng, O: ProgressObserver>(
    provider: &P,
    request: &LotteryRequest,
    rng: R,
    observer: O,
) -> Outcome {
    Lottery::with_observer(provider, request, rng, observer)
        .run()
        .await
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod engine_tests;
