//! # API REST
//!
//! REST API for the symptom checker.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS)
//!
//! Uses `api-shared` for request/response types.

#![warn(rust_2018_idioms)]

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    CheckReq, CheckRes, ConditionRes, HealthRes, HealthService, HistoryRes, LogEntryRes, RulesRes,
    SymptomRes, VocabularyRes,
};
use symcheck_core::CheckerService;

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    service: Arc<CheckerService>,
}

impl AppState {
    pub fn new(service: Arc<CheckerService>) -> Self {
        Self { service }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, list_symptoms, list_rules, check, history),
    components(schemas(
        HealthRes,
        SymptomRes,
        VocabularyRes,
        ConditionRes,
        RulesRes,
        CheckReq,
        CheckRes,
        LogEntryRes,
        HistoryRes,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/symptoms", get(list_symptoms))
        .route("/rules", get(list_rules))
        .route("/check", post(check))
        .route("/history", get(history))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/symptoms",
    responses(
        (status = 200, description = "Selectable symptoms", body = VocabularyRes)
    )
)]
async fn list_symptoms(State(state): State<AppState>) -> Json<VocabularyRes> {
    Json(VocabularyRes::from_matcher(state.service.matcher()))
}

#[utoipa::path(
    get,
    path = "/rules",
    responses(
        (status = 200, description = "Rule table, threshold and urgent symptoms", body = RulesRes)
    )
)]
async fn list_rules(State(state): State<AppState>) -> Json<RulesRes> {
    Json(RulesRes::from_matcher(state.service.matcher()))
}

#[utoipa::path(
    post,
    path = "/check",
    request_body = CheckReq,
    responses(
        (status = 200, description = "Check evaluated and recorded", body = CheckRes),
        (status = 500, description = "Internal server error")
    )
)]
/// Evaluate reported symptoms and append the check to the diagnosis log.
///
/// # Errors
/// Returns `500 Internal Server Error` if the check cannot be recorded.
async fn check(
    State(state): State<AppState>,
    Json(req): Json<CheckReq>,
) -> Result<Json<CheckRes>, (StatusCode, &'static str)> {
    match state.service.check(&req.symptom_set()) {
        Ok(report) => Ok(Json(CheckRes::from(&report))),
        Err(e) => {
            tracing::error!("Record check error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/history",
    responses(
        (status = 200, description = "Logged checks, oldest first", body = HistoryRes),
        (status = 500, description = "Internal server error")
    )
)]
/// List every recorded check.
///
/// # Errors
/// Returns `500 Internal Server Error` if the diagnosis log cannot be read.
async fn history(
    State(state): State<AppState>,
) -> Result<Json<HistoryRes>, (StatusCode, &'static str)> {
    match state.service.history() {
        Ok(entries) => Ok(Json(HistoryRes {
            entries: entries.iter().map(LogEntryRes::from).collect(),
        })),
        Err(e) => {
            tracing::error!("Read history error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}
