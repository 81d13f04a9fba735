//! Request extractors whose rejections render as `{"message": ...}` 400s.

use std::{convert::Infallible, net::SocketAddr};

use axum::{
    async_trait,
    extract::{rejection::PathRejection, ConnectInfo, FromRequest, FromRequestParts, Multipart, Path, Request},
    http::{header, request::Parts},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use service::upload::ImageUpload;

use crate::{errors::ApiError, state::AppState};

/// Name of the multipart part carrying the image file.
pub const IMAGE_FIELD: &str = "image";

/// `axum::Json` with [`ApiError`] rejections.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Query string extractor accepting repeated keys (`ids=a&ids=b`).
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum_extra::extract::Query(value) = axum_extra::extract::Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// `axum::extract::Path` with [`ApiError`] rejections.
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e: PathRejection| ApiError::BadRequest(e.body_text()))?;
        Ok(Self(value))
    }
}

/// Entity fields sent either as `multipart/form-data` (text parts plus an
/// optional `image` file part) or as a JSON object.
pub struct EntityForm<T> {
    pub fields: T,
    pub upload: Option<ImageUpload>,
}

#[async_trait]
impl<T, S> FromRequest<S> for EntityForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_multipart(&req) {
            let multipart = Multipart::from_request(req, state).await?;
            let (text, upload) = read_form(multipart).await?;
            let fields = serde_json::from_value(Value::Object(text))
                .map_err(|e| ApiError::BadRequest(format!("invalid form fields: {e}")))?;
            Ok(Self { fields, upload })
        } else {
            let ApiJson(fields) = ApiJson::<T>::from_request(req, state).await?;
            Ok(Self { fields, upload: None })
        }
    }
}

/// The single image file of a multipart upload, if any.
pub struct ImageForm(pub Option<ImageUpload>);

#[async_trait]
impl<S> FromRequest<S> for ImageForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state).await?;
        let (_, upload) = read_form(multipart).await?;
        Ok(Self(upload))
    }
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.to_ascii_lowercase().starts_with("multipart/form-data"))
}

async fn read_form(mut multipart: Multipart) -> Result<(Map<String, Value>, Option<ImageUpload>), ApiError> {
    let mut text = Map::new();
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else { continue };
        if field.file_name().is_none() {
            text.insert(name, Value::String(field.text().await?));
            continue;
        }
        if name != IMAGE_FIELD {
            return Err(ApiError::BadRequest(format!("unexpected file field: {name}")));
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;
        // browsers submit an empty, unnamed part when no file was picked
        if bytes.is_empty() && file_name.as_deref().map_or(true, str::is_empty) {
            continue;
        }
        if upload.is_some() {
            return Err(ApiError::BadRequest("only one image may be uploaded".into()));
        }
        upload = Some(ImageUpload { bytes: bytes.to_vec(), content_type, file_name });
    }
    Ok((text, upload))
}

/// Scheme and host used to build public URLs for locally stored images.
pub struct RequestOrigin(pub String);

#[async_trait]
impl FromRequestParts<AppState> for RequestOrigin {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(base) = &state.public_base_url {
            return Ok(Self(base.clone()));
        }
        let header_str = |name: &str| parts.headers.get(name).and_then(|v| v.to_str().ok());
        let host = header_str(header::HOST.as_str())
            .map(str::to_string)
            .or_else(|| parts.uri.authority().map(|a| a.to_string()))
            .unwrap_or_else(|| "localhost".to_string());
        let scheme = header_str("x-forwarded-proto").unwrap_or("http");
        Ok(Self(format!("{scheme}://{host}")))
    }
}

/// Client address: first `X-Forwarded-For` entry, else the socket peer.
pub struct PeerIp(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for PeerIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
            .map(str::to_string);
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());
        Ok(Self(forwarded.or(peer)))
    }
}
