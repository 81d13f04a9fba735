use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use super::{content_key, inspect, ImageStore, ImageUpload, StoredImage};
use crate::errors::ServiceError;

/// URL path under which the server exposes the upload directory.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Stores images in a local directory served read-only by the HTTP layer.
pub struct LocalImageStore {
    root: PathBuf,
    max_bytes: usize,
}

impl LocalImageStore {
    pub fn new<P: Into<PathBuf>>(root: P, max_bytes: usize) -> Self {
        Self { root: root.into(), max_bytes }
    }

    pub fn root(&self) -> &Path { &self.root }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    #[instrument(skip(self, upload), fields(size = upload.bytes.len()))]
    async fn store(&self, upload: ImageUpload, origin: &str) -> Result<StoredImage, ServiceError> {
        let kind = inspect(&upload, self.max_bytes)?;
        let name = format!("{}.{}", content_key(&upload.bytes), kind.extension());
        let path = self.root.join(&name);

        if fs::metadata(&path).await.is_ok() {
            debug!(%name, "image already stored");
        } else {
            fs::create_dir_all(&self.root).await.map_err(|e| {
                error!(dir = %self.root.display(), error = %e, "cannot create upload dir");
                ServiceError::Storage(e.to_string())
            })?;
            // Per-upload temporary name, then rename into place.
            let tmp = self.root.join(format!(".{name}.{}.part", Uuid::new_v4().simple()));
            if let Err(e) = fs::write(&tmp, &upload.bytes).await {
                let _ = fs::remove_file(&tmp).await;
                return Err(ServiceError::Storage(e.to_string()));
            }
            match fs::rename(&tmp, &path).await {
                Ok(()) => info!(%name, "image stored"),
                // A concurrent upload of the same bytes got there first.
                Err(_) if fs::metadata(&path).await.is_ok() => {
                    let _ = fs::remove_file(&tmp).await;
                    debug!(%name, "image stored concurrently");
                }
                Err(e) => {
                    let _ = fs::remove_file(&tmp).await;
                    error!(%name, error = %e, "cannot move image into place");
                    return Err(ServiceError::Storage(e.to_string()));
                }
            }
        }

        let url = format!("{}{}/{}", origin.trim_end_matches('/'), UPLOADS_URL_PREFIX, name);
        Ok(StoredImage { key: name, url })
    }

    /// Local files are content addressed and may back several records, so
    /// they are kept.
    async fn release(&self, url: &str) -> Result<(), ServiceError> {
        debug!(%url, "local image kept on release");
        Ok(())
    }

    fn max_bytes(&self) -> usize { self.max_bytes }
}
