//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::departure::{Departure, StationSuggestion};
use crate::domain::{Coordinate, Station, TimeBudget};
use crate::draw::{Draw, DrawParams};
use crate::lottery::Outcome;
use crate::regions::Area;

/// Request to draw a station.
///
/// The departure is either explicit coordinates (both `latitude` and
/// `longitude`) or a station name.
#[derive(Debug, Deserialize)]
pub struct DrawRequest {
    /// Departure station name
    pub station: Option<String>,

    /// Departure latitude, takes precedence over `station`
    pub latitude: Option<f64>,

    /// Departure longitude
    pub longitude: Option<f64>,

    /// Travel time budget in minutes, 0 or absent for unlimited
    #[serde(default)]
    pub budget: u32,

    /// Area name, absent or "全国" for nationwide
    pub area: Option<String>,

    /// Line name within the area
    pub line: Option<String>,

    /// Override of the attempt limit
    pub max_retries: Option<u32>,
}

impl DrawRequest {
    /// The departure described by this request.
    pub fn departure(&self) -> Result<Departure, String> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Coordinate::parse(lat, lon)
                .map(Departure::Coordinate)
                .map_err(|e| e.to_string()),
            (Some(_), None) | (None, Some(_)) => {
                Err("latitude and longitude must be given together".to_string())
            }
            (None, None) => match self.station.as_deref().map(str::trim) {
                Some(name) if !name.is_empty() => Ok(Departure::station(name)),
                _ => Err("a departure station or coordinates are required".to_string()),
            },
        }
    }

    /// Convert to draw parameters.
    pub fn into_params(self) -> Result<DrawParams, String> {
        let departure = self.departure()?;
        Ok(DrawParams {
            departure,
            budget: TimeBudget::minutes(self.budget),
            area: self.area,
            line: self.line,
            max_retries: self.max_retries,
        })
    }
}

/// Whether a draw produced a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawStatus {
    Found,
    Exhausted,
}

/// Response to a draw.
#[derive(Debug, Serialize)]
pub struct DrawResponse {
    pub status: DrawStatus,

    /// The drawn station, when found
    pub station: Option<StationResult>,

    /// Estimated minutes from the departure to the drawn station
    pub estimated_travel_minutes: Option<u32>,

    /// Attempts made
    pub attempts: u32,

    /// Attempt limit used
    pub max_retries: u32,

    /// Resolved departure point
    pub departure: Coordinate,

    /// Area the draw was restricted to
    pub area: String,

    /// The requested area was out of reach and the draw ran nationwide
    pub area_reset: bool,

    /// Travel time budget in minutes, 0 for unlimited
    pub budget: u32,

    /// When the draw finished, for history logs kept by the client
    pub drawn_at: DateTime<Local>,
}

impl DrawResponse {
    /// Create from a finished draw.
    pub fn from_draw(draw: &Draw, budget: TimeBudget, drawn_at: DateTime<Local>) -> Self {
        let (status, station, minutes) = match &draw.outcome {
            Outcome::Found { result, .. } => (
                DrawStatus::Found,
                Some(StationResult::from_station(&result.station)),
                Some(result.estimated_travel_minutes),
            ),
            Outcome::Exhausted { .. } => (DrawStatus::Exhausted, None, None),
        };

        Self {
            status,
            station,
            estimated_travel_minutes: minutes,
            attempts: draw.outcome.attempts(),
            max_retries: draw.max_retries,
            departure: draw.departure,
            area: draw.area.clone(),
            area_reset: draw.area_reset,
            budget: budget.as_minutes(),
            drawn_at,
        }
    }
}

/// A drawn station.
#[derive(Debug, Clone, Serialize)]
pub struct StationResult {
    pub name: String,
    pub line: String,
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
    pub postal_code: String,
    pub previous_station: Option<String>,
    pub next_station: Option<String>,
}

impl StationResult {
    /// Create from a domain Station.
    pub fn from_station(station: &Station) -> Self {
        Self {
            name: station.name.clone(),
            line: station.line.clone(),
            region: station.region.clone(),
            latitude: station.coordinate.latitude,
            longitude: station.coordinate.longitude,
            postal_code: station.postal_code.clone(),
            previous_station: station.previous_station.clone(),
            next_station: station.next_station.clone(),
        }
    }
}

/// Query for departure station suggestions.
#[derive(Debug, Deserialize)]
pub struct StationSearchRequest {
    /// Station name typed so far
    pub q: String,

    /// Maximum number of results
    pub limit: Option<usize>,
}

/// Departure station suggestions.
#[derive(Debug, Serialize)]
pub struct StationSearchResponse {
    pub stations: Vec<StationSuggestion>,
}

/// Query for the areas selectable from a departure.
#[derive(Debug, Deserialize)]
pub struct AreasQuery {
    pub lat: f64,
    pub lon: f64,

    /// Travel time budget in minutes, 0 or absent for unlimited
    #[serde(default)]
    pub budget: u32,
}

/// Selectable areas, nationwide first.
#[derive(Debug, Serialize)]
pub struct AreasResponse {
    pub areas: Vec<Area>,
}

/// Query for the lines of an area.
#[derive(Debug, Deserialize)]
pub struct LinesQuery {
    pub area: String,
}

/// Lines serving an area.
#[derive(Debug, Serialize)]
pub struct LinesResponse {
    pub area: String,
    pub lines: Vec<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RegionSelector;
    use crate::domain::station::station;
    use crate::lottery::SelectionResult;

    fn request(json: &str) -> DrawRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn departure_from_station_name() {
        let req = request(r#"{"station": " 新宿 ", "budget": 30}"#);
        assert_eq!(req.departure(), Ok(Departure::station("新宿")));
    }

    #[test]
    fn coordinates_take_precedence() {
        let req = request(r#"{"station": "新宿", "latitude": 35.0, "longitude": 139.0}"#);
        assert_eq!(
            req.departure(),
            Ok(Departure::Coordinate(Coordinate::new(35.0, 139.0)))
        );
    }

    #[test]
    fn departure_errors() {
        assert!(request(r#"{}"#).departure().is_err());
        assert!(request(r#"{"station": "  "}"#).departure().is_err());
        assert!(request(r#"{"latitude": 35.0}"#).departure().is_err());
        assert!(request(r#"{"latitude": 135.0, "longitude": 35.0}"#).departure().is_err());
    }

    #[test]
    fn missing_budget_is_unlimited() {
        let params = request(r#"{"station": "新宿"}"#).into_params().unwrap();
        assert!(params.budget.is_unlimited());
        assert!(params.area.is_none());
    }

    #[test]
    fn found_response() {
        let mut s = station("高尾", "JR中央線", "東京都", "1930844", 35.6423, 139.2826);
        s.previous_station = Some("西八王子".into());

        let draw = Draw {
            departure: Coordinate::new(35.6896, 139.7006),
            area: "東京都".into(),
            region: RegionSelector::region("東京都"),
            area_reset: false,
            max_retries: 100,
            outcome: Outcome::Found {
                result: SelectionResult {
                    station: s,
                    estimated_travel_minutes: 74,
                },
                attempts: 3,
            },
        };

        let response = DrawResponse::from_draw(&draw, TimeBudget::minutes(90), Local::now());
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "found");
        assert_eq!(json["station"]["name"], "高尾");
        assert_eq!(json["station"]["previous_station"], "西八王子");
        assert!(json["station"]["next_station"].is_null());
        assert_eq!(json["estimated_travel_minutes"], 74);
        assert_eq!(json["attempts"], 3);
        assert_eq!(json["area"], "東京都");
        assert_eq!(json["budget"], 90);
        assert!(json["drawn_at"].is_string());
    }

    #[test]
    fn exhausted_response() {
        let draw = Draw {
            departure: Coordinate::new(35.6896, 139.7006),
            area: "全国".into(),
            region: RegionSelector::Nationwide,
            area_reset: true,
            max_retries: 100,
            outcome: Outcome::Exhausted { attempts: 100 },
        };

        let response = DrawResponse::from_draw(&draw, TimeBudget::minutes(30), Local::now());
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "exhausted");
        assert!(json["station"].is_null());
        assert_eq!(json["attempts"], 100);
        assert_eq!(json["area"], "全国");
        assert_eq!(json["area_reset"], true);
    }
}
