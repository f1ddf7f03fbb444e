//! Travel-time budget.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum travel time the user accepts, in whole minutes.
///
/// A budget of zero is the "unlimited" sentinel: it disables time filtering
/// both when computing reachable regions and when accepting a station.
///
/// # Examples
///
/// ```
/// use station_lottery::domain::TimeBudget;
///
/// let half_hour = TimeBudget::minutes(30);
/// assert!(half_hour.admits(30));
/// assert!(!half_hour.admits(31));
///
/// assert!(TimeBudget::UNLIMITED.admits(10_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeBudget(u32);

impl TimeBudget {
    /// The unlimited budget.
    pub const UNLIMITED: TimeBudget = TimeBudget(0);

    /// A budget of the given number of minutes (`0` means unlimited).
    pub const fn minutes(mins: u32) -> Self {
        Self(mins)
    }

    /// Whether this is the unlimited sentinel.
    pub const fn is_unlimited(&self) -> bool {
        self.0 == 0
    }

    /// The budget in minutes, or `None` if unlimited.
    pub const fn limit(&self) -> Option<u32> {
        if self.is_unlimited() {
            None
        } else {
            Some(self.0)
        }
    }

    /// Whether a trip of `mins` minutes fits the budget.
    pub const fn admits(&self, mins: u32) -> bool {
        self.is_unlimited() || mins <= self.0
    }

    /// Raw minutes value (`0` for unlimited).
    pub const fn as_minutes(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TimeBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.limit() {
            Some(mins) => write!(f, "{mins} min"),
            None => f.write_str("unlimited"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_unlimited() {
        assert!(TimeBudget::minutes(0).is_unlimited());
        assert_eq!(TimeBudget::minutes(0), TimeBudget::UNLIMITED);
        assert_eq!(TimeBudget::default(), TimeBudget::UNLIMITED);
        assert_eq!(TimeBudget::UNLIMITED.limit(), None);
    }

    #[test]
    fn admits_boundary() {
        let budget = TimeBudget::minutes(60);
        assert!(budget.admits(0));
        assert!(budget.admits(60));
        assert!(!budget.admits(61));
        assert_eq!(budget.limit(), Some(60));
    }

    #[test]
    fn display() {
        assert_eq!(TimeBudget::minutes(90).to_string(), "90 min");
        assert_eq!(TimeBudget::UNLIMITED.to_string(), "unlimited");
    }

    #[test]
    fn serde_transparent() {
        let budget: TimeBudget = serde_json::from_str("120").unwrap();
        assert_eq!(budget, TimeBudget::minutes(120));
        assert_eq!(serde_json::to_string(&budget).unwrap(), "120");
    }
}
