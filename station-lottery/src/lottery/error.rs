//! Lottery error types.

/// Failure reported by a station provider lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The provider could not be reached or answered with an error.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// The provider answered, but the response could not be understood.
    #[error("malformed provider response: {0}")]
    Malformed(String),
}

/// Why a single draw attempt did not produce a station.
///
/// Every variant is recovered by moving on to the next attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttemptFailure {
    /// Nationwide draw with nothing in the reachable-region pool.
    #[error("no reachable regions to draw from")]
    NoReachableRegions,

    /// The drawn region (or the selected region) has no lines.
    #[error("no lines to draw from in {region}")]
    NoLines { region: String },

    /// A line or station lookup failed.
    #[error("lookup failed: {0}")]
    ProviderUnavailable(#[from] ProviderError),

    /// The drawn line has no station matching the region constraint.
    #[error("no eligible stations on {line}")]
    EmptyCandidateSet { line: String },

    /// The drawn station is too far away.
    #[error("{station} is about {minutes} min away, over the {budget} min budget")]
    OverBudget {
        station: String,
        minutes: u32,
        budget: u32,
    },
}

/// Fatal errors that end an invocation before any draw happens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LotteryError {
    /// The departure point's coordinates could not be obtained.
    #[error("could not resolve departure {departure}: {reason}")]
    DepartureUnresolved { departure: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ProviderError::Unavailable("timed out".into());
        assert_eq!(err.to_string(), "provider unavailable: timed out");

        let err = AttemptFailure::from(ProviderError::Malformed("missing station".into()));
        assert_eq!(
            err.to_string(),
            "lookup failed: malformed provider response: missing station"
        );

        let err = AttemptFailure::EmptyCandidateSet {
            line: "JR山手線".into(),
        };
        assert_eq!(err.to_string(), "no eligible stations on JR山手線");

        let err = AttemptFailure::OverBudget {
            station: "札幌".into(),
            minutes: 1600,
            budget: 30,
        };
        assert_eq!(
            err.to_string(),
            "札幌 is about 1600 min away, over the 30 min budget"
        );

        let err = LotteryError::DepartureUnresolved {
            departure: "新宿".into(),
            reason: "no station with that name".into(),
        };
        assert_eq!(
            err.to_string(),
            "could not resolve departure 新宿: no station with that name"
        );
    }
}
