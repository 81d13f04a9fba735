use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::{content_key, inspect, ImageStore, ImageUpload, StoredImage};
use crate::errors::ServiceError;

/// Forwards images to a remote image host.
///
/// Upload: `POST {endpoint}` multipart with parts `public_id` and `file`,
/// bearer-authenticated; the JSON reply carries `secure_url` or `url`.
/// Release: `DELETE {endpoint}/{public_id}`.
///
/// Every upload gets its own public id (`<sha256>-<uuid>`), so releasing one
/// record's asset never removes an asset another record points at.
pub struct CloudImageStore {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    max_bytes: usize,
}

#[derive(Debug, Deserialize)]
struct UploadReply {
    #[serde(default)]
    secure_url: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

impl CloudImageStore {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, max_bytes: usize) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint, api_key, max_bytes)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>, api_key: impl Into<String>, max_bytes: usize) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self { client, endpoint, api_key: api_key.into(), max_bytes }
    }

    /// Public id encoded in a hosted URL: the last path segment without extension.
    pub fn public_id(url: &str) -> Option<&str> {
        let path = url.split(['?', '#']).next()?;
        let segment = path.rsplit('/').next()?;
        let id = segment.split('.').next()?;
        if id.is_empty() { None } else { Some(id) }
    }
}

fn storage_err(e: reqwest::Error) -> ServiceError {
    ServiceError::Storage(e.to_string())
}

#[async_trait]
impl ImageStore for CloudImageStore {
    #[instrument(skip(self, upload, _origin), fields(size = upload.bytes.len()))]
    async fn store(&self, upload: ImageUpload, _origin: &str) -> Result<StoredImage, ServiceError> {
        let kind = inspect(&upload, self.max_bytes)?;
        let public_id = format!("{}-{}", content_key(&upload.bytes), Uuid::new_v4().simple());
        let part = Part::bytes(upload.bytes)
            .file_name(format!("{public_id}.{}", kind.extension()))
            .mime_str(kind.mime())
            .map_err(storage_err)?;
        let form = Form::new().text("public_id", public_id.clone()).part("file", part);

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!(endpoint = %self.endpoint, error = %e, "image host unreachable");
                storage_err(e)
            })?;
        let status = resp.status();
        if !status.is_success() {
            error!(endpoint = %self.endpoint, %status, "image host rejected upload");
            return Err(ServiceError::Storage(format!("image host responded {status}")));
        }
        let reply: UploadReply = resp.json().await.map_err(storage_err)?;
        let url = reply
            .secure_url
            .or(reply.url)
            .ok_or_else(|| ServiceError::Storage("image host reply has no url".into()))?;
        info!(%public_id, %url, "image uploaded to host");
        Ok(StoredImage { key: public_id, url })
    }

    async fn release(&self, url: &str) -> Result<(), ServiceError> {
        let Some(public_id) = Self::public_id(url) else {
            warn!(%url, "cannot derive public id; nothing to release");
            return Ok(());
        };
        let resp = self
            .client
            .delete(format!("{}/{}", self.endpoint, public_id))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(storage_err)?;
        let status = resp.status();
        if status.is_success() || status == reqwest::StatusCode::NOT_FOUND {
            info!(%public_id, "image released from host");
            Ok(())
        } else {
            Err(ServiceError::Storage(format!("image host responded {status} on delete")))
        }
    }

    fn max_bytes(&self) -> usize { self.max_bytes }
}
