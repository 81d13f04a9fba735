//! Upload adapter: validates a single image payload and stores it under a
//! content-addressed name, returning a publicly resolvable URL.
//!
//! Two backends implement [`ImageStore`]:
//! - [`local::LocalImageStore`] writes to a directory served under `/uploads`
//! - [`cloud::CloudImageStore`] forwards the bytes to a remote image host

pub mod validate;
pub mod local;
pub mod cloud;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::errors::ServiceError;

pub use validate::{inspect, ImageKind};

/// A single uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    /// Declared MIME type (client controlled).
    pub content_type: Option<String>,
    /// Original file name (client controlled).
    pub file_name: Option<String>,
}

/// Where an image ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Backend-specific storage key (file name or remote public id).
    pub key: String,
    pub url: String,
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Validate and persist `upload`. `origin` is the scheme+host of the
    /// current request, used by backends that serve assets themselves.
    async fn store(&self, upload: ImageUpload, origin: &str) -> Result<StoredImage, ServiceError>;

    /// Drop the asset behind `url` if this backend owns it.
    async fn release(&self, url: &str) -> Result<(), ServiceError>;

    /// Largest accepted payload in bytes.
    fn max_bytes(&self) -> usize;
}

/// Hex SHA-256 of the payload; stable across re-uploads of the same bytes.
pub fn content_key(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Store the upload if one accompanies the request.
pub(crate) async fn store_optional(
    images: &dyn ImageStore,
    upload: Option<ImageUpload>,
    origin: &str,
) -> Result<Option<StoredImage>, ServiceError> {
    match upload {
        Some(upload) => images.store(upload, origin).await.map(Some),
        None => Ok(None),
    }
}

/// Release an image and only log on failure: the owning record is already gone.
pub(crate) async fn release_quietly(images: &dyn ImageStore, url: &str) {
    if let Err(e) = images.release(url).await {
        tracing::warn!(%url, error = %e, "failed to release stored image");
    }
}
