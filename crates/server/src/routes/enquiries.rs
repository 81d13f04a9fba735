use axum::{extract::State, http::StatusCode, Json};
use models::enquiry::Model as Enquiry;
use serde::Serialize;
use service::enquiries::domain::EnquiryInput;

use super::{DeleteResponse, IdsBody};
use crate::{errors::ApiError, extract::ApiJson, state::AppState};

#[derive(Debug, Serialize)]
pub struct EnquiryResponse {
    pub message: &'static str,
    pub enquiry: Enquiry,
}

/// Submit a contact form; a resubmission with the same name and email
/// replaces the earlier one (200) instead of adding a record (201).
#[utoipa::path(post, path = "/api/enquiries", tag = "enquiries", request_body = crate::openapi::EnquiryRequest, responses((status = 201, description = "Added", body = crate::openapi::EnquiryResponseDoc), (status = 200, description = "Updated", body = crate::openapi::EnquiryResponseDoc), (status = 400, description = "Validation error")))]
pub async fn submit(State(state): State<AppState>, ApiJson(input): ApiJson<EnquiryInput>) -> Result<(StatusCode, Json<EnquiryResponse>), ApiError> {
    let saved = state.enquiries.submit(input).await?;
    let (status, message) = if saved.created {
        (StatusCode::CREATED, "Enquiry added successfully")
    } else {
        (StatusCode::OK, "Enquiry updated successfully")
    };
    Ok((status, Json(EnquiryResponse { message, enquiry: saved.record })))
}

#[utoipa::path(get, path = "/api/enquiries", tag = "enquiries", responses((status = 200, description = "All enquiries", body = [crate::openapi::EnquiryDoc])))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Enquiry>>, ApiError> {
    Ok(Json(state.enquiries.list().await?))
}

#[utoipa::path(delete, path = "/api/enquiries", tag = "enquiries", request_body = crate::openapi::IdsRequest, responses((status = 200, description = "Deleted", body = crate::openapi::DeleteResponseDoc), (status = 400, description = "Empty or malformed id set")))]
pub async fn delete_many(State(state): State<AppState>, ApiJson(body): ApiJson<IdsBody>) -> Result<Json<DeleteResponse>, ApiError> {
    let ids = body.into_id_set()?;
    let deleted = state.enquiries.delete_many(&ids).await?;
    Ok(DeleteResponse::new("Selected enquiries deleted successfully", deleted))
}
