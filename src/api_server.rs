// Axum API Server Module
//
// Purpose: REST API over the crop advisor (soil/weather estimates, season,
// catalog, calendar and crop suggestions)

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use moka::future::Cache;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::advisor::FieldAdvisor;
use crate::calendar::{project_timeline, MONTH_LABELS};
use crate::config::ServerConfig;
use crate::locations::{find_location, sample_locations, LANGUAGES};
use crate::scorer::GrowingConditions;
use crate::season::current_season;
use crate::soil::{estimate_soil, SoilProfile};
use crate::weather::{estimate_weather_with, weather_icon_url};

/// Upper bound on conditions accepted by one batch request
pub const MAX_BATCH_SIZE: usize = 1_000;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub advisor: Arc<FieldAdvisor>,
    pub config: Arc<ServerConfig>,
    /// Soil estimates keyed by the exact coordinate bits. Weather is never cached.
    pub soil_cache: Cache<(u64, u64), SoilProfile>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> anyhow::Result<Self> {
        tracing::info!("Loading crop catalog...");
        let catalog = config.load_catalog()?;
        tracing::info!("Loaded {} crops", catalog.len());

        let advisor = Arc::new(FieldAdvisor::new(catalog).with_draw(config.weather_draw));

        tracing::info!("Initializing Moka soil cache...");
        let soil_cache = Cache::builder()
            .max_capacity(10_000)
            .time_to_live(config.soil_cache_ttl)
            .build();

        Ok(Self {
            advisor,
            config: Arc::new(config),
            soil_cache,
        })
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Sample fields
        .route("/api/locations", get(list_locations))
        .route("/api/locations/:id/report", get(get_location_report))

        // Estimators
        .route("/api/soil", get(get_soil))
        .route("/api/weather", get(get_weather))
        .route("/api/season", get(get_season))
        .route("/api/languages", get(list_languages))

        // Crops
        .route("/api/crops/catalog", get(get_catalog))
        .route("/api/crops/suggest", post(suggest_crops))
        .route("/api/crops/suggest/batch", post(suggest_crops_batch))
        .route("/api/crops/:name/calendar", get(get_crop_calendar))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn list_locations() -> impl IntoResponse {
    Json(sample_locations())
}

async fn get_location_report(
    State(state): State<AppState>,
    id: Result<Path<u32>, PathRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Path(id) = id?;
    let field = find_location(id)
        .ok_or_else(|| AppError::NotFound(format!("Location not found: {}", id)))?;

    // Soil and weather are fetched concurrently, so the slower one bounds the wait
    simulate_latency(state.config.soil_latency().max(state.config.weather_latency())).await;

    let today = chrono::Local::now().date_naive();
    let report = state
        .advisor
        .report_for_field(&field, today, &mut rand::thread_rng());

    let icon_url = weather_icon_url(&report.weather.icon_code);
    let ph_gauge = report.soil.ph_gauge();

    let response = serde_json::json!({
        "report": report,
        "coordinates": field.coordinates_label(),
        "weatherIconUrl": icon_url,
        "phGauge": ph_gauge,
        "monthLabels": MONTH_LABELS,
    });

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
struct CoordinateQuery {
    lat: f64,
    lng: f64,
}

async fn get_soil(
    State(state): State<AppState>,
    query: Result<Query<CoordinateQuery>, QueryRejection>,
) -> Result<Json<SoilProfile>, AppError> {
    let Query(query) = query?;
    let cache_key = (query.lat.to_bits(), query.lng.to_bits());

    if let Some(cached) = state.soil_cache.get(&cache_key).await {
        return Ok(Json(cached));
    }

    simulate_latency(state.config.soil_latency()).await;
    let soil = estimate_soil(query.lat, query.lng);

    state.soil_cache.insert(cache_key, soil.clone()).await;

    Ok(Json(soil))
}

async fn get_weather(
    State(state): State<AppState>,
    query: Result<Query<CoordinateQuery>, QueryRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Query(query) = query?;
    simulate_latency(state.config.weather_latency()).await;

    let reading = estimate_weather_with(
        query.lat,
        query.lng,
        state.advisor.draw(),
        &mut rand::thread_rng(),
    );
    let icon_url = weather_icon_url(&reading.icon_code);

    Ok(Json(serde_json::json!({
        "weather": reading,
        "iconUrl": icon_url,
    })))
}

async fn get_season() -> impl IntoResponse {
    let today = chrono::Local::now().date_naive();
    Json(serde_json::json!({
        "season": current_season(today),
        "date": today.to_string(),
    }))
}

async fn list_languages() -> impl IntoResponse {
    Json(LANGUAGES)
}

async fn get_catalog(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.advisor.catalog().crops().to_vec())
}

async fn get_crop_calendar(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let crop = state
        .advisor
        .catalog()
        .get(&name)
        .ok_or_else(|| AppError::NotFound(format!("Crop not found: {}", name)))?;

    let today = chrono::Local::now().date_naive();

    Ok(Json(serde_json::json!({
        "crop": crop.name,
        "season": crop.season,
        "months": project_timeline(crop, today),
        "monthLabels": MONTH_LABELS,
    })))
}

#[derive(Debug, Deserialize)]
struct SuggestRequest {
    soil: SoilProfile,
    temperature: f64,
    humidity: f64,
    /// Defaults to the current season
    season: Option<String>,
    /// Include per-component points for each suggestion
    #[serde(default)]
    explain: bool,
}

impl SuggestRequest {
    fn into_conditions(self, default_season: &str) -> GrowingConditions {
        let season = self.season.unwrap_or_else(|| default_season.to_string());
        GrowingConditions::new(self.soil, self.temperature, self.humidity, season)
    }
}

async fn suggest_crops(
    State(state): State<AppState>,
    payload: Result<Json<SuggestRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(payload) = payload?;
    let explain = payload.explain;
    let default_season = current_season(chrono::Local::now().date_naive());
    let conditions = payload.into_conditions(default_season.label());

    let scorer = state.advisor.scorer();
    let suggestions = scorer.score(&conditions);

    let mut response = serde_json::json!({
        "season": conditions.season,
        "suggestions": suggestions,
    });

    if explain {
        let breakdowns: Vec<_> = suggestions
            .iter()
            .map(|s| {
                serde_json::json!({
                    "crop": s.crop.name,
                    "points": scorer.breakdown(&s.crop, &conditions),
                })
            })
            .collect();
        response["breakdown"] = serde_json::Value::from(breakdowns);
    }

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
struct BatchSuggestRequest {
    requests: Vec<SuggestRequest>,
}

async fn suggest_crops_batch(
    State(state): State<AppState>,
    payload: Result<Json<BatchSuggestRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(payload) = payload?;
    let batch_size = payload.requests.len();
    if batch_size > MAX_BATCH_SIZE {
        return Err(AppError::BadRequest(format!(
            "Batch of {} exceeds the limit of {}",
            batch_size, MAX_BATCH_SIZE
        )));
    }

    tracing::info!("Scoring batch of {} condition sets", batch_size);

    let default_season = current_season(chrono::Local::now().date_naive());
    let batch: Vec<GrowingConditions> = payload
        .requests
        .into_iter()
        .map(|r| r.into_conditions(default_season.label()))
        .collect();

    // CPU-bound work: run in blocking thread pool
    let advisor = state.advisor.clone();
    let results = tokio::task::spawn_blocking(move || advisor.scorer().score_batch_parallel(&batch))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    Ok(Json(serde_json::json!({
        "count": batch_size,
        "results": results,
    })))
}

async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

// Extractor rejections become JSON error bodies instead of axum's plain text
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
