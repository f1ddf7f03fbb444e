//! HTTP route handlers.

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use chrono::Local;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tower_http::services::ServeDir;
use tracing::{debug, error, warn};

use crate::departure::{Departure, suggest_stations};
use crate::domain::{Coordinate, TimeBudget};
use crate::draw::{DrawError, run_draw};
use crate::lottery::{LotteryError, ProviderError, StationProvider};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/stations/search", get(search_stations))
        .route("/api/areas", get(list_areas))
        .route("/api/lines", get(list_lines))
        .route("/lottery/draw", post(draw_station))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the draw form.
async fn index_page(State(state): State<AppState>) -> impl IntoResponse {
    Html(
        IndexTemplate::new(&state.catalog)
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// Suggest departure stations whose name matches the query exactly.
async fn search_stations(
    State(state): State<AppState>,
    Query(req): Query<StationSearchRequest>,
) -> Result<Json<StationSearchResponse>, AppError> {
    let limit = req.limit.unwrap_or(10).min(50);
    let stations = suggest_stations(state.provider.as_ref(), &req.q, limit).await?;

    Ok(Json(StationSearchResponse { stations }))
}

/// Areas reachable from a departure within a budget.
async fn list_areas(
    State(state): State<AppState>,
    Query(query): Query<AreasQuery>,
) -> Result<Json<AreasResponse>, AppError> {
    let departure = Coordinate::parse(query.lat, query.lon).map_err(|e| AppError::BadRequest {
        message: format!("Invalid departure: {e}"),
    })?;

    let areas = state.catalog.selectable_areas(
        departure,
        TimeBudget::minutes(query.budget),
        state.config.reachability_slack_km,
    );

    Ok(Json(AreasResponse { areas }))
}

/// Lines serving an area. Sub-areas list the lines of their parent region.
async fn list_lines(
    State(state): State<AppState>,
    Query(query): Query<LinesQuery>,
) -> Result<Json<LinesResponse>, AppError> {
    let selector = state
        .catalog
        .resolve(&query.area)
        .ok_or_else(|| AppError::NotFound {
            message: format!("Unknown area: {}", query.area),
        })?;

    let lines = match selector.line_region() {
        Some(region) => state.provider.list_lines(region).await?,
        None => Vec::new(),
    };

    Ok(Json(LinesResponse {
        area: query.area,
        lines,
    }))
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Draw a station.
async fn draw_station(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: DrawRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, body = %String::from_utf8_lossy(&body), "invalid draw request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let params = req
        .into_params()
        .map_err(|message| AppError::BadRequest { message })?;

    let budget = params.budget;
    let departure_label = match &params.departure {
        Departure::StationName { name } => name.clone(),
        Departure::Coordinate(_) => "現在地".to_string(),
    };

    let draw = run_draw(
        state.provider.as_ref(),
        &state.catalog,
        &state.config,
        params,
        StdRng::from_entropy(),
    )
    .await?;

    // Return HTML or JSON based on Accept header
    if accepts_html(&headers) {
        let template = ResultCardTemplate {
            result: ResultView::from_draw(&draw, departure_label),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else {
        Ok(Json(DrawResponse::from_draw(&draw, budget, Local::now())).into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unprocessable { message: String },
    Upstream { message: String },
    Internal { message: String },
}

impl From<ProviderError> for AppError {
    fn from(e: ProviderError) -> Self {
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl From<DrawError> for AppError {
    fn from(e: DrawError) -> Self {
        match e {
            DrawError::UnknownArea(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            DrawError::Departure(LotteryError::DepartureUnresolved { .. }) => {
                AppError::Unprocessable {
                    message: e.to_string(),
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
