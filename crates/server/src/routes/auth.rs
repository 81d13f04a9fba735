use axum::{extract::State, Json};
use serde::Serialize;
use service::auth::domain::LoginInput;

use crate::{errors::ApiError, extract::ApiJson, state::AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: &'static str,
    pub is_admin: bool,
}

/// Verify the admin credentials. Every call re-authenticates; nothing is issued.
#[utoipa::path(post, path = "/api/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged in", body = crate::openapi::LoginResponseDoc), (status = 401, description = "Invalid credentials"), (status = 403, description = "Not an admin")))]
pub async fn login(State(state): State<AppState>, ApiJson(input): ApiJson<LoginInput>) -> Result<Json<LoginResponse>, ApiError> {
    let who = state.auth.authenticate(input).await?;
    if !who.is_admin {
        tracing::warn!(username = %who.username, "non-admin login refused");
        return Err(ApiError::Forbidden("Unauthorized: Only admins can login".into()));
    }
    Ok(Json(LoginResponse { message: "Login successful", is_admin: true }))
}
