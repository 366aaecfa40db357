//! HTTP routes for the prospectus dashboard.
//!
//! Every page request refetches from Xano; nothing is cached between requests.

use axum::extract::{Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_http::compression::CompressionLayer;
use tracing::error;

use gs_prospectus::constants::COST_ERROR_MESSAGE;
use gs_prospectus::costs::{aggregate_buckets, expand_all};
use gs_prospectus::html_report::{export_file_name, render_html};
use gs_prospectus::{CostMode, Scenario, XanoClient, load_dashboard};

use crate::pages::HOME_PAGE;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub client: XanoClient,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(|| async { "ok" }))
        .route("/prospectus", get(prospectus))
        .route("/prospectus/export", get(export))
        .route("/api/revenue", get(api_revenue))
        .route("/api/kpis", get(api_kpis))
        .route("/api/costs", get(api_costs))
        .layer(CompressionLayer::new())
        .with_state(state)
}

// ── Errors ──────────────────────────────────────────────────────────────────

/// Error rendered as a JSON body with the given status.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

// ── Query parameters ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScenarioParams {
    scenario: Option<String>,
}

impl ScenarioParams {
    fn scenario(&self) -> Result<Scenario, ApiError> {
        match self.scenario.as_deref() {
            None | Some("") => Ok(Scenario::default()),
            Some(s) => s.parse().map_err(ApiError::bad_request),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ModeParams {
    mode: Option<String>,
}

impl ModeParams {
    fn mode(&self) -> Result<CostMode, ApiError> {
        match self.mode.as_deref() {
            None | Some("") => Ok(CostMode::default()),
            Some(m) => m.parse().map_err(ApiError::bad_request),
        }
    }
}

// ── Pages ───────────────────────────────────────────────────────────────────

async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}

async fn prospectus(State(state): State<AppState>, Query(params): Query<ScenarioParams>) -> Result<Response, ApiError> {
    let scenario = params.scenario()?;
    let snapshot = load_dashboard(&state.client, scenario).await;
    let html = render_html(&snapshot).map_err(|e| {
        error!(error = %e, "Failed to render prospectus page");
        ApiError::internal("failed to render page")
    })?;
    Ok(Html(html).into_response())
}

async fn export(State(state): State<AppState>, Query(params): Query<ScenarioParams>) -> Result<Response, ApiError> {
    let scenario = params.scenario()?;
    let snapshot = load_dashboard(&state.client, scenario).await;
    let html = render_html(&snapshot).map_err(|e| {
        error!(error = %e, "Failed to render export");
        ApiError::internal("failed to render export")
    })?;

    let disposition = format!("attachment; filename=\"{}\"", export_file_name(scenario));
    let mut response = Html(html).into_response();
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        response.headers_mut().insert(header::CONTENT_DISPOSITION, value);
    }
    Ok(response)
}

// ── JSON API ────────────────────────────────────────────────────────────────

async fn api_revenue(
    State(state): State<AppState>,
    Query(params): Query<ScenarioParams>,
) -> Result<Response, ApiError> {
    let scenario = params.scenario()?;
    Ok(Json(state.client.fetch_revenue(scenario).await).into_response())
}

async fn api_kpis(State(state): State<AppState>) -> Response {
    Json(state.client.fetch_kpis().await).into_response()
}

async fn api_costs(State(state): State<AppState>, Query(params): Query<ModeParams>) -> Result<Response, ApiError> {
    let mode = params.mode()?;
    match state.client.fetch_cost_config().await {
        Ok(configs) => {
            let series = expand_all(&configs);
            let rows = aggregate_buckets(&series, mode);
            Ok(Json(json!({ "mode": mode, "series": series, "rows": rows })).into_response())
        }
        Err(e) => {
            error!(error = %e, "Failed to load cost configuration");
            Err(ApiError {
                status: StatusCode::BAD_GATEWAY,
                message: COST_ERROR_MESSAGE.to_string(),
            })
        }
    }
}
