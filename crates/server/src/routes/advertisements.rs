use axum::{extract::State, http::StatusCode, Json};
use models::advertisement::Model as Advertisement;
use service::advertisements::domain::AdvertisementInput;
use uuid::Uuid;

use super::{DeleteResponse, IdsBody};
use crate::{
    errors::ApiError,
    extract::{ApiJson, ApiPath, EntityForm, RequestOrigin},
    state::AppState,
};

#[utoipa::path(get, path = "/api/advertisements", tag = "advertisements", responses((status = 200, description = "All advertisements", body = [crate::openapi::AdvertisementDoc])))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Advertisement>>, ApiError> {
    Ok(Json(state.advertisements.list().await?))
}

#[utoipa::path(get, path = "/api/advertisements/{id}", tag = "advertisements", params(("id" = Uuid, Path, description = "Advertisement id")), responses((status = 200, description = "Found", body = crate::openapi::AdvertisementDoc), (status = 404, description = "Not found")))]
pub async fn get(State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<Advertisement>, ApiError> {
    Ok(Json(state.advertisements.get(id).await?))
}

#[utoipa::path(post, path = "/api/advertisements", tag = "advertisements", request_body(content = crate::openapi::AdvertisementRequest, content_type = "multipart/form-data"), responses((status = 201, description = "Created", body = crate::openapi::AdvertisementDoc), (status = 400, description = "Validation error")))]
pub async fn create(
    State(state): State<AppState>,
    RequestOrigin(origin): RequestOrigin,
    form: EntityForm<AdvertisementInput>,
) -> Result<(StatusCode, Json<Advertisement>), ApiError> {
    let ad = state.advertisements.create(form.fields, form.upload, &origin).await?;
    Ok((StatusCode::CREATED, Json(ad)))
}

#[utoipa::path(put, path = "/api/advertisements/{id}", tag = "advertisements", params(("id" = Uuid, Path, description = "Advertisement id")), request_body(content = crate::openapi::AdvertisementRequest, content_type = "multipart/form-data"), responses((status = 200, description = "Updated", body = crate::openapi::AdvertisementDoc), (status = 400, description = "Validation error"), (status = 404, description = "Not found")))]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    RequestOrigin(origin): RequestOrigin,
    form: EntityForm<AdvertisementInput>,
) -> Result<Json<Advertisement>, ApiError> {
    Ok(Json(state.advertisements.update(id, form.fields, form.upload, &origin).await?))
}

#[utoipa::path(delete, path = "/api/advertisements/{id}", tag = "advertisements", params(("id" = Uuid, Path, description = "Advertisement id")), responses((status = 200, description = "Deleted", body = crate::openapi::DeleteResponseDoc), (status = 404, description = "Not found")))]
pub async fn delete_one(State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<DeleteResponse>, ApiError> {
    state.advertisements.delete(id).await?;
    Ok(DeleteResponse::new("Advertisement deleted successfully", 1))
}

#[utoipa::path(delete, path = "/api/advertisements", tag = "advertisements", request_body = crate::openapi::IdsRequest, responses((status = 200, description = "Deleted", body = crate::openapi::DeleteResponseDoc), (status = 400, description = "Empty or malformed id set")))]
pub async fn delete_many(State(state): State<AppState>, ApiJson(body): ApiJson<IdsBody>) -> Result<Json<DeleteResponse>, ApiError> {
    let ids = body.into_id_set()?;
    let deleted = state.advertisements.delete_many(&ids).await?;
    Ok(DeleteResponse::new("Selected advertisements deleted successfully", deleted))
}
