use axum::{extract::State, Json};
use serde::Serialize;

use crate::{
    errors::ApiError,
    extract::{ImageForm, RequestOrigin},
    state::AppState,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub image_url: String,
}

/// Store a standalone image (`image` part) and return its public URL.
#[utoipa::path(post, path = "/api/upload", tag = "uploads", request_body(content = crate::openapi::UploadRequest, content_type = "multipart/form-data"), responses((status = 200, description = "Stored", body = crate::openapi::UploadResponseDoc), (status = 400, description = "Missing, oversized or unsupported file"), (status = 500, description = "Storage failure")))]
pub async fn upload(
    State(state): State<AppState>,
    RequestOrigin(origin): RequestOrigin,
    ImageForm(upload): ImageForm,
) -> Result<Json<UploadResponse>, ApiError> {
    let upload = upload.ok_or_else(|| ApiError::BadRequest("No file uploaded".into()))?;
    let stored = state.images.store(upload, &origin).await?;
    tracing::info!(key = %stored.key, "image uploaded");
    Ok(Json(UploadResponse { image_url: stored.url }))
}
