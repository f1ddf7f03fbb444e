//! Region and line constraints for a draw.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Station;

/// Predicate splitting a large region into sub-areas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubdivisionRule {
    /// First three postal-code digits fall within `min..=max`.
    PostalPrefix { min: u16, max: u16 },

    /// The station's region field equals the given name.
    RegionEquals { region: String },
}

impl SubdivisionRule {
    /// Whether a station belongs to the sub-area.
    ///
    /// A station without a usable postal code never matches a postal rule.
    pub fn matches(&self, station: &Station) -> bool {
        match self {
            SubdivisionRule::PostalPrefix { min, max } => station
                .postal_prefix()
                .is_some_and(|prefix| (*min..=*max).contains(&prefix)),
            SubdivisionRule::RegionEquals { region } => &station.region == region,
        }
    }
}

/// Which part of the country a draw is restricted to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegionSelector {
    /// Any reachable region.
    #[default]
    Nationwide,

    /// A single region (prefecture).
    Region { name: String },

    /// A sub-area of a region, defined by a rule over station attributes.
    RegionSubdivision {
        parent: String,
        rule: SubdivisionRule,
    },
}

impl RegionSelector {
    /// Shorthand for `RegionSelector::Region`.
    pub fn region(name: impl Into<String>) -> Self {
        RegionSelector::Region { name: name.into() }
    }

    /// The region whose lines are drawn from, or `None` for nationwide.
    ///
    /// For a subdivision this is the parent region.
    pub fn line_region(&self) -> Option<&str> {
        match self {
            RegionSelector::Nationwide => None,
            RegionSelector::Region { name } => Some(name),
            RegionSelector::RegionSubdivision { parent, .. } => Some(parent),
        }
    }

    pub fn is_nationwide(&self) -> bool {
        matches!(self, RegionSelector::Nationwide)
    }
}

impl fmt::Display for RegionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionSelector::Nationwide => f.write_str("nationwide"),
            RegionSelector::Region { name } => f.write_str(name),
            RegionSelector::RegionSubdivision { parent, rule } => match rule {
                SubdivisionRule::PostalPrefix { min, max } => {
                    write!(f, "{parent} (postal {min:03}-{max:03})")
                }
                SubdivisionRule::RegionEquals { region } => write!(f, "{parent} ({region})"),
            },
        }
    }
}

/// Which lines of a region a draw may use.
///
/// Ignored for nationwide draws.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineSelector {
    #[default]
    AnyLine,
    SpecificLine { name: String },
}

impl LineSelector {
    /// Shorthand for `LineSelector::SpecificLine`.
    pub fn specific(name: impl Into<String>) -> Self {
        LineSelector::SpecificLine { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::station::station;

    #[test]
    fn postal_prefix_rule() {
        let core = SubdivisionRule::PostalPrefix { min: 100, max: 179 };

        let shinjuku = station("新宿", "JR山手線", "東京都", "1600022", 35.69, 139.70);
        let tachikawa = station("立川", "JR中央線", "東京都", "1900012", 35.69, 139.41);
        let unknown = station("無番地", "謎線", "東京都", "", 35.69, 139.41);

        assert!(core.matches(&shinjuku));
        assert!(!core.matches(&tachikawa));
        assert!(!core.matches(&unknown));
    }

    #[test]
    fn postal_prefix_rule_is_inclusive() {
        let rule = SubdivisionRule::PostalPrefix { min: 180, max: 208 };
        let low = station("武蔵境", "JR中央線", "東京都", "1800022", 35.70, 139.54);
        let high = station("武蔵村山", "多摩モノレール", "東京都", "2080001", 35.75, 139.39);
        assert!(rule.matches(&low));
        assert!(rule.matches(&high));
    }

    #[test]
    fn region_equals_rule() {
        let rule = SubdivisionRule::RegionEquals {
            region: "神奈川県".to_string(),
        };
        let yokohama = station("横浜", "JR東海道本線", "神奈川県", "2200011", 35.46, 139.62);
        let tokyo = station("東京", "JR東海道本線", "東京都", "1000005", 35.68, 139.77);
        assert!(rule.matches(&yokohama));
        assert!(!rule.matches(&tokyo));
    }

    #[test]
    fn line_region() {
        assert_eq!(RegionSelector::Nationwide.line_region(), None);
        assert_eq!(RegionSelector::region("大阪府").line_region(), Some("大阪府"));

        let sub = RegionSelector::RegionSubdivision {
            parent: "東京都".to_string(),
            rule: SubdivisionRule::PostalPrefix { min: 100, max: 179 },
        };
        assert_eq!(sub.line_region(), Some("東京都"));
    }

    #[test]
    fn display() {
        assert_eq!(RegionSelector::Nationwide.to_string(), "nationwide");
        assert_eq!(RegionSelector::region("北海道").to_string(), "北海道");

        let sub = RegionSelector::RegionSubdivision {
            parent: "東京都".to_string(),
            rule: SubdivisionRule::PostalPrefix { min: 100, max: 179 },
        };
        assert_eq!(sub.to_string(), "東京都 (postal 100-179)");
    }

    #[test]
    fn selector_json_shape() {
        let json = r#"{"kind":"region_subdivision","parent":"東京都","rule":{"kind":"postal_prefix","min":180,"max":208}}"#;
        let selector: RegionSelector = serde_json::from_str(json).unwrap();
        assert_eq!(
            selector,
            RegionSelector::RegionSubdivision {
                parent: "東京都".to_string(),
                rule: SubdivisionRule::PostalPrefix { min: 180, max: 208 },
            }
        );

        let line: LineSelector =
            serde_json::from_str(r#"{"kind":"specific_line","name":"JR山手線"}"#).unwrap();
        assert_eq!(line, LineSelector::specific("JR山手線"));
    }
}
