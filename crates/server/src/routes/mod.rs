//! Router assembly plus the response shapes shared by several handlers.

pub mod advertisements;
pub mod auth;
pub mod enquiries;
pub mod services;
pub mod uploads;
pub mod visitors;

use std::path::PathBuf;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Json, Router,
};
use common::types::Health;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use service::bulk::IdSet;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{errors::ApiError, openapi::ApiDoc, state::AppState};

/// Room left for multipart boundaries and text fields on top of the image.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Confirmation returned by delete endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub message: String,
    pub deleted_count: u64,
}

impl DeleteResponse {
    pub fn new(message: &str, deleted_count: u64) -> Json<Self> {
        Json(Self { message: message.to_string(), deleted_count })
    }
}

/// Bulk-delete body `{"ids": [...]}`. Kept loose so a missing or non-array
/// `ids` is reported as a validation error rather than a decode failure.
#[derive(Debug, Deserialize)]
pub struct IdsBody {
    #[serde(default)]
    pub ids: Option<Value>,
}

impl IdsBody {
    pub fn into_id_set(self) -> Result<IdSet, ApiError> {
        let Some(Value::Array(values)) = self.ids else {
            return Err(ApiError::BadRequest("No IDs provided".into()));
        };
        let raw = values
            .into_iter()
            .map(|v| match v {
                Value::String(s) => Ok(s),
                other => Err(ApiError::BadRequest(format!("invalid id: {other}"))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(IdSet::parse(raw)?)
    }
}

/// Build the full application router.
///
/// `uploads_dir` is served read-only under `/uploads` when images are kept
/// on local disk.
pub fn build_router(state: AppState, cors: CorsLayer, uploads_dir: Option<PathBuf>) -> Router {
    let body_limit = state.images.max_bytes() + FORM_OVERHEAD_BYTES;

    let api = Router::new()
        .route("/api/login", post(auth::login))
        .route(
            "/api/advertisements",
            get(advertisements::list).post(advertisements::create).delete(advertisements::delete_many),
        )
        .route(
            "/api/advertisements/:id",
            get(advertisements::get).put(advertisements::update).delete(advertisements::delete_one),
        )
        .route("/api/services", get(services::list).post(services::create).delete(services::delete_many))
        .route("/api/services/:id", put(services::update).get(services::get).delete(services::delete_one))
        .route("/api/enquiries", get(enquiries::list).post(enquiries::submit).delete(enquiries::delete_many))
        .route("/api/visitors", get(visitors::list).post(visitors::record).delete(visitors::delete_many))
        .route("/api/upload", post(uploads::upload))
        .layer(DefaultBodyLimit::max(body_limit));

    let mut app = Router::new()
        .route("/health", get(health))
        .merge(api)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    if let Some(dir) = uploads_dir {
        app = app.nest_service("/uploads", ServeDir::new(dir));
    }

    app.with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
