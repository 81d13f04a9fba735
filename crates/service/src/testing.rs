//! Test doubles shared by the store unit tests.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::errors::ServiceError;
use crate::upload::{content_key, inspect, ImageStore, ImageUpload, StoredImage};

pub const MAX_BYTES: usize = 2 * 1024 * 1024;

/// Smallest payload that passes signature sniffing as PNG.
pub fn png() -> ImageUpload {
    ImageUpload {
        bytes: vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0],
        content_type: Some("image/png".into()),
        file_name: Some("banner.png".into()),
    }
}

/// Validates like a real backend and remembers what was stored and released.
#[derive(Default)]
pub struct RecordingImageStore {
    stored: Mutex<Vec<String>>,
    released: Mutex<Vec<String>>,
}

impl RecordingImageStore {
    pub async fn stored_count(&self) -> usize { self.stored.lock().await.len() }

    pub async fn released(&self) -> Vec<String> { self.released.lock().await.clone() }
}

#[async_trait]
impl ImageStore for RecordingImageStore {
    async fn store(&self, upload: ImageUpload, origin: &str) -> Result<StoredImage, ServiceError> {
        let kind = inspect(&upload, MAX_BYTES)?;
        let key = format!("{}.{}", content_key(&upload.bytes), kind.extension());
        let url = format!("{origin}/uploads/{key}");
        self.stored.lock().await.push(url.clone());
        Ok(StoredImage { key, url })
    }

    async fn release(&self, url: &str) -> Result<(), ServiceError> {
        self.released.lock().await.push(url.to_string());
        Ok(())
    }

    fn max_bytes(&self) -> usize { MAX_BYTES }
}
