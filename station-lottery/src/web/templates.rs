//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::TimeBudget;
use crate::draw::Draw;
use crate::lottery::Outcome;
use crate::regions::{NATIONWIDE, RegionCatalog};

/// Budget choices offered by the form, in minutes. 0 is unlimited.
pub const BUDGET_CHOICES: [u32; 6] = [30, 60, 90, 120, 180, 0];

/// Home page with the draw form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub budgets: Vec<BudgetOption>,
    pub areas: Vec<String>,
}

impl IndexTemplate {
    /// Form with every area of the catalog; the page narrows the list once
    /// the departure is known.
    pub fn new(catalog: &RegionCatalog) -> Self {
        let areas = std::iter::once(NATIONWIDE.to_string())
            .chain(catalog.regions().iter().map(|r| r.name.clone()))
            .chain(catalog.subdivisions().iter().map(|s| s.name.clone()))
            .collect();

        Self {
            budgets: BUDGET_CHOICES.iter().copied().map(BudgetOption::new).collect(),
            areas,
        }
    }
}

/// Result card fragment (AJAX response, no page chrome).
#[derive(Template)]
#[template(path = "result_card.html")]
pub struct ResultCardTemplate {
    pub result: ResultView,
}

/// A budget choice in the form.
#[derive(Debug, Clone)]
pub struct BudgetOption {
    pub minutes: u32,
    pub label: String,
}

impl BudgetOption {
    pub fn new(minutes: u32) -> Self {
        let label = match TimeBudget::minutes(minutes).limit() {
            None => "制限なし".to_string(),
            Some(m) if m % 60 == 0 => format!("{}時間以内", m / 60),
            Some(m) if m % 60 == 30 => format!("{}時間半以内", m / 60),
            Some(m) => format!("{m}分以内"),
        };
        Self { minutes, label }
    }
}

/// Result card view model.
#[derive(Debug, Clone)]
pub struct ResultView {
    pub found: bool,
    pub station_name: String,
    pub line: String,
    pub region: String,
    pub previous_station: Option<String>,
    pub next_station: Option<String>,
    pub minutes: u32,
    pub departure_label: String,
    pub attempts: u32,
    pub area_reset: bool,
    pub map_url: String,
}

impl ResultView {
    /// Create from a finished draw. `departure_label` is what the user
    /// typed, or a coordinate description.
    pub fn from_draw(draw: &Draw, departure_label: impl Into<String>) -> Self {
        let departure_label = departure_label.into();

        match &draw.outcome {
            Outcome::Found { result, attempts } => {
                let station = &result.station;
                Self {
                    found: true,
                    station_name: station.name.clone(),
                    line: station.line.clone(),
                    region: station.region.clone(),
                    previous_station: station.previous_station.clone(),
                    next_station: station.next_station.clone(),
                    minutes: result.estimated_travel_minutes,
                    departure_label,
                    attempts: *attempts,
                    area_reset: draw.area_reset,
                    map_url: map_url(&station.name),
                }
            }
            Outcome::Exhausted { attempts } => Self {
                found: false,
                station_name: String::new(),
                line: String::new(),
                region: String::new(),
                previous_station: None,
                next_station: None,
                minutes: 0,
                departure_label,
                attempts: *attempts,
                area_reset: draw.area_reset,
                map_url: String::new(),
            },
        }
    }
}

/// Map search link for a station.
fn map_url(station_name: &str) -> String {
    let query = format!("{station_name}駅");
    reqwest::Url::parse_with_params("https://www.google.com/maps", &[("q", query.as_str())])
        .map(String::from)
        .unwrap_or_default()
}
