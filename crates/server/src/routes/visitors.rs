use axum::{extract::State, http::StatusCode, Json};
use models::visitor::Model as Visitor;
use serde::Deserialize;
use service::bulk::IdSet;
use service::visitors::domain::VisitInput;

use super::DeleteResponse;
use crate::{
    errors::ApiError,
    extract::{ApiJson, ApiQuery, PeerIp},
    state::AppState,
};

/// `?ids=a&ids=b`; the `ids[]=` spelling is accepted too.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdsQuery {
    #[serde(default)]
    pub ids: Vec<String>,
    #[serde(default, rename = "ids[]")]
    pub ids_brackets: Vec<String>,
}

#[utoipa::path(post, path = "/api/visitors", tag = "visitors", request_body = crate::openapi::VisitRequest, responses((status = 201, description = "Visit recorded", body = crate::openapi::VisitorDoc), (status = 400, description = "Validation error")))]
pub async fn record(
    State(state): State<AppState>,
    PeerIp(peer): PeerIp,
    ApiJson(input): ApiJson<VisitInput>,
) -> Result<(StatusCode, Json<Visitor>), ApiError> {
    let saved = state.visitors.record(input, peer).await?;
    Ok((StatusCode::CREATED, Json(saved.record)))
}

#[utoipa::path(get, path = "/api/visitors", tag = "visitors", responses((status = 200, description = "All visitors, most recent first", body = [crate::openapi::VisitorDoc])))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Visitor>>, ApiError> {
    Ok(Json(state.visitors.list().await?))
}

#[utoipa::path(delete, path = "/api/visitors", tag = "visitors", params(IdsQuery), responses((status = 200, description = "Deleted", body = crate::openapi::DeleteResponseDoc), (status = 400, description = "Empty or malformed id set")))]
pub async fn delete_many(State(state): State<AppState>, ApiQuery(q): ApiQuery<IdsQuery>) -> Result<Json<DeleteResponse>, ApiError> {
    let ids = IdSet::parse(q.ids.iter().chain(q.ids_brackets.iter()))?;
    let deleted = state.visitors.delete_many(&ids).await?;
    Ok(DeleteResponse::new("Visitors deleted successfully", deleted))
}
