//! Departure point resolution.
//!
//! A draw starts either from explicit coordinates (the browser's location)
//! or from a station name typed into the form. Names are looked up through a
//! [`StationDirectory`] and resolved to the first matching station.

use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Coordinate, Station};
use crate::lottery::{LotteryError, ProviderError};

/// Where a draw starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Departure {
    Coordinate(Coordinate),
    StationName { name: String },
}

impl Departure {
    pub fn station(name: impl Into<String>) -> Self {
        Departure::StationName { name: name.into() }
    }
}

impl fmt::Display for Departure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Departure::Coordinate(c) => write!(f, "{c}"),
            Departure::StationName { name } => write!(f, "{name}"),
        }
    }
}

/// Station lookup by name.
pub trait StationDirectory {
    /// Stations with exactly this name. An empty list means no match.
    fn find_stations(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Vec<Station>, ProviderError>> + Send;
}

/// Coordinates of the departure point.
pub async fn resolve_departure<D: StationDirectory>(
    directory: &D,
    departure: &Departure,
) -> Result<Coordinate, LotteryError> {
    let name = match departure {
        Departure::Coordinate(c) => return Ok(*c),
        Departure::StationName { name } => name.trim(),
    };

    let unresolved = |reason: String| LotteryError::DepartureUnresolved {
        departure: departure.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(unresolved("empty station name".to_string()));
    }

    let stations = directory
        .find_stations(name)
        .await
        .map_err(|e| unresolved(e.to_string()))?;

    let station = stations
        .into_iter()
        .next()
        .ok_or_else(|| unresolved("no station with that name".to_string()))?;

    debug!(name, line = %station.line, coordinate = %station.coordinate, "resolved departure");
    Ok(station.coordinate)
}

/// A station offered while the user is typing a departure name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationSuggestion {
    pub name: String,
    pub region: String,
    pub lines: Vec<String>,
    pub coordinate: Coordinate,
}

/// Up to `limit` suggestions for the station named exactly `query`, one per
/// region, with all serving lines merged. Partial names match nothing.
pub async fn suggest_stations<D: StationDirectory>(
    directory: &D,
    query: &str,
    limit: usize,
) -> Result<Vec<StationSuggestion>, ProviderError> {
    let query = query.trim();
    if query.is_empty() || limit == 0 {
        return Ok(Vec::new());
    }

    let stations = directory.find_stations(query).await?;

    let mut out: Vec<StationSuggestion> = Vec::new();
    for station in stations {
        if let Some(existing) = out
            .iter_mut()
            .find(|s| s.name == station.name && s.region == station.region)
        {
            if !existing.lines.contains(&station.line) {
                existing.lines.push(station.line);
            }
            continue;
        }

        if out.len() == limit {
            continue;
        }

        out.push(StationSuggestion {
            name: station.name,
            region: station.region,
            lines: vec![station.line],
            coordinate: station.coordinate,
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::station::station;
    use std::sync::Mutex;

    struct MockDirectory {
        stations: Vec<Station>,
        fail: bool,
        calls: Mutex<Vec<String>>,
    }

    impl MockDirectory {
        fn new(stations: Vec<Station>) -> Self {
            Self {
                stations,
                fail: false,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new(Vec::new())
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl StationDirectory for MockDirectory {
        async fn find_stations(&self, name: &str) -> Result<Vec<Station>, ProviderError> {
            self.calls.lock().unwrap().push(name.to_string());
            if self.fail {
                return Err(ProviderError::Unavailable("timed out".into()));
            }
            Ok(self
                .stations
                .iter()
                .filter(|s| s.name == name)
                .cloned()
                .collect())
        }
    }

    fn directory() -> MockDirectory {
        MockDirectory::new(vec![
            station("新宿", "JR山手線", "東京都", "1600022", 35.6909, 139.7003),
            station("新宿", "JR中央線", "東京都", "1600022", 35.6909, 139.7003),
            station("新宿", "小田急小田原線", "東京都", "1600023", 35.6912, 139.6995),
            station("府中", "京王線", "東京都", "1830023", 35.6722, 139.4800),
            station("府中", "JR福塩線", "広島県", "7260005", 34.5683, 133.2365),
        ])
    }

    #[tokio::test]
    async fn coordinate_needs_no_lookup() {
        let dir = directory();
        let here = Coordinate::new(35.0, 135.0);
        let resolved = resolve_departure(&dir, &Departure::Coordinate(here)).await;
        assert_eq!(resolved, Ok(here));
        assert_eq!(dir.call_count(), 0);
    }

    #[tokio::test]
    async fn name_resolves_to_first_match() {
        let dir = directory();
        let resolved = resolve_departure(&dir, &Departure::station(" 新宿 ")).await.unwrap();
        assert_eq!(resolved, Coordinate::new(35.6909, 139.7003));
        assert_eq!(*dir.calls.lock().unwrap(), ["新宿"]);
    }

    #[tokio::test]
    async fn unknown_name_is_unresolved() {
        let err = resolve_departure(&directory(), &Departure::station("存在しない駅"))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "could not resolve departure 存在しない駅: no station with that name"
        );
    }

    #[tokio::test]
    async fn empty_name_is_unresolved_without_lookup() {
        let dir = directory();
        let err = resolve_departure(&dir, &Departure::station("  ")).await;
        assert!(matches!(err, Err(LotteryError::DepartureUnresolved { .. })));
        assert_eq!(dir.call_count(), 0);
    }

    #[tokio::test]
    async fn lookup_failure_is_unresolved() {
        let err = resolve_departure(&MockDirectory::failing(), &Departure::station("新宿"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("provider unavailable: timed out"));
    }

    #[tokio::test]
    async fn suggestions_merge_lines() {
        let suggestions = suggest_stations(&directory(), "新宿", 10).await.unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(
            suggestions[0].lines,
            ["JR山手線", "JR中央線", "小田急小田原線"]
        );
    }

    #[tokio::test]
    async fn suggestions_keep_same_name_in_different_regions() {
        let suggestions = suggest_stations(&directory(), "府中", 10).await.unwrap();
        let regions: Vec<&str> = suggestions.iter().map(|s| s.region.as_str()).collect();
        assert_eq!(regions, ["東京都", "広島県"]);
    }

    #[tokio::test]
    async fn suggestions_respect_limit() {
        let suggestions = suggest_stations(&directory(), "府中", 1).await.unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].region, "東京都");
    }

    #[tokio::test]
    async fn partial_name_suggests_nothing() {
        let dir = directory();
        assert!(suggest_stations(&dir, "新", 10).await.unwrap().is_empty());
        assert_eq!(*dir.calls.lock().unwrap(), ["新"]);
    }

    #[tokio::test]
    async fn blank_query_suggests_nothing() {
        let dir = directory();
        assert!(suggest_stations(&dir, "", 10).await.unwrap().is_empty());
        assert!(suggest_stations(&dir, "新宿", 0).await.unwrap().is_empty());
        assert_eq!(dir.call_count(), 0);
    }

    #[test]
    fn departure_json_shape() {
        let json = serde_json::to_value(Departure::station("新宿")).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "station_name", "name": "新宿"}));

        let parsed: Departure = serde_json::from_str(
            r#"{"kind": "coordinate", "latitude": 35.0, "longitude": 139.0}"#,
        )
        .unwrap();
        assert_eq!(parsed, Departure::Coordinate(Coordinate::new(35.0, 139.0)));
    }
}
