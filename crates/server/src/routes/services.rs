use axum::{extract::State, http::StatusCode, Json};
use models::service::Model as Service;
use serde::{Deserialize, Serialize};
use service::pagination::Pagination;
use service::services::domain::ServiceInput;
use uuid::Uuid;

use super::{DeleteResponse, IdsBody};
use crate::{
    errors::ApiError,
    extract::{ApiJson, ApiPath, ApiQuery, EntityForm, RequestOrigin},
    state::AppState,
};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number (default 1)
    pub page: Option<u64>,
    /// Page size (default 10, at most 100)
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicesPage {
    pub services: Vec<Service>,
    pub total_count: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

#[utoipa::path(get, path = "/api/services", tag = "services", params(PageQuery), responses((status = 200, description = "One page of services", body = crate::openapi::ServicesPageDoc), (status = 400, description = "Bad query")))]
pub async fn list(State(state): State<AppState>, ApiQuery(q): ApiQuery<PageQuery>) -> Result<Json<ServicesPage>, ApiError> {
    let page = state.services.page(Pagination::from_query(q.page, q.limit)).await?;
    Ok(Json(ServicesPage {
        services: page.items,
        total_count: page.total_count,
        page: page.page,
        limit: page.per_page,
        total_pages: page.total_pages,
    }))
}

#[utoipa::path(get, path = "/api/services/{id}", tag = "services", params(("id" = Uuid, Path, description = "Service id")), responses((status = 200, description = "Found", body = crate::openapi::ServiceDoc), (status = 404, description = "Not found")))]
pub async fn get(State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<Service>, ApiError> {
    Ok(Json(state.services.get(id).await?))
}

#[utoipa::path(post, path = "/api/services", tag = "services", request_body(content = crate::openapi::ServiceRequest, content_type = "multipart/form-data"), responses((status = 201, description = "Created", body = crate::openapi::ServiceDoc), (status = 400, description = "Validation error")))]
pub async fn create(
    State(state): State<AppState>,
    RequestOrigin(origin): RequestOrigin,
    form: EntityForm<ServiceInput>,
) -> Result<(StatusCode, Json<Service>), ApiError> {
    let created = state.services.create(form.fields, form.upload, &origin).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(put, path = "/api/services/{id}", tag = "services", params(("id" = Uuid, Path, description = "Service id")), request_body(content = crate::openapi::ServiceRequest, content_type = "multipart/form-data"), responses((status = 200, description = "Updated", body = crate::openapi::ServiceDoc), (status = 400, description = "Validation error"), (status = 404, description = "Not found")))]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    RequestOrigin(origin): RequestOrigin,
    form: EntityForm<ServiceInput>,
) -> Result<Json<Service>, ApiError> {
    Ok(Json(state.services.update(id, form.fields, form.upload, &origin).await?))
}

#[utoipa::path(delete, path = "/api/services/{id}", tag = "services", params(("id" = Uuid, Path, description = "Service id")), responses((status = 200, description = "Deleted", body = crate::openapi::DeleteResponseDoc), (status = 404, description = "Not found")))]
pub async fn delete_one(State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<DeleteResponse>, ApiError> {
    state.services.delete(id).await?;
    Ok(DeleteResponse::new("Service deleted successfully", 1))
}

#[utoipa::path(delete, path = "/api/services", tag = "services", request_body = crate::openapi::IdsRequest, responses((status = 200, description = "Deleted", body = crate::openapi::DeleteResponseDoc), (status = 400, description = "Empty or malformed id set")))]
pub async fn delete_many(State(state): State<AppState>, ApiJson(body): ApiJson<IdsBody>) -> Result<Json<DeleteResponse>, ApiError> {
    let ids = body.into_id_set()?;
    let deleted = state.services.delete_many(&ids).await?;
    Ok(DeleteResponse::new("Selected services deleted successfully", deleted))
}
