//! Advertisement store: every advertisement needs a title, a description
//! and an image, either uploaded with the request or given as a URL.

pub mod domain;
pub mod repository;
pub mod seaorm;

use std::sync::Arc;

use models::advertisement::Model as Advertisement;
use models::validate::{present_non_empty, required};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::bulk::IdSet;
use crate::errors::ServiceError;
use crate::upload::{release_quietly, store_optional, ImageStore, ImageUpload};

use domain::{AdvertisementInput, AdvertisementPatch, NewAdvertisement};
use repository::AdvertisementRepository;

#[derive(Clone)]
pub struct AdvertisementService {
    repo: Arc<dyn AdvertisementRepository>,
    images: Arc<dyn ImageStore>,
}

impl AdvertisementService {
    pub fn new(repo: Arc<dyn AdvertisementRepository>, images: Arc<dyn ImageStore>) -> Self {
        Self { repo, images }
    }

    #[instrument(skip_all)]
    pub async fn create(
        &self,
        input: AdvertisementInput,
        upload: Option<ImageUpload>,
        origin: &str,
    ) -> Result<Advertisement, ServiceError> {
        let title = required("title", input.title)?;
        let description = required("description", input.description)?;
        let linked = present_non_empty("image", input.image)?;
        if upload.is_none() && linked.is_none() {
            warn!("advertisement without image");
            return Err(ServiceError::Validation("image is required".into()));
        }

        let stored = store_optional(self.images.as_ref(), upload, origin).await?;
        let image = stored
            .as_ref()
            .map(|s| s.url.clone())
            .or(linked)
            .ok_or_else(|| ServiceError::Validation("image is required".into()))?;
        match self.repo.insert(NewAdvertisement { title, description, image }).await {
            Ok(ad) => {
                info!(advertisement_id = %ad.id, "advertisement created");
                Ok(ad)
            }
            Err(e) => {
                if let Some(s) = stored {
                    release_quietly(self.images.as_ref(), &s.url).await;
                }
                Err(e)
            }
        }
    }

    pub async fn list(&self) -> Result<Vec<Advertisement>, ServiceError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Advertisement, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("Advertisement"))
    }

    /// Overwrite only the supplied fields. Without an upload the stored image
    /// stays as it is unless a replacement URL is given.
    #[instrument(skip(self, input, upload, origin))]
    pub async fn update(
        &self,
        id: Uuid,
        input: AdvertisementInput,
        upload: Option<ImageUpload>,
        origin: &str,
    ) -> Result<Advertisement, ServiceError> {
        let mut patch = AdvertisementPatch {
            title: present_non_empty("title", input.title)?,
            description: present_non_empty("description", input.description)?,
            image: present_non_empty("image", input.image)?,
        };
        let previous = self.get(id).await?;

        let stored = store_optional(self.images.as_ref(), upload, origin).await?;
        if let Some(s) = &stored {
            patch.image = Some(s.url.clone());
        }
        let replaced_image = patch.image.is_some();
        let updated = match self
            .repo
            .update(id, patch)
            .await
            .and_then(|found| found.ok_or_else(|| ServiceError::not_found("Advertisement")))
        {
            Ok(ad) => ad,
            Err(e) => {
                if let Some(s) = stored {
                    release_quietly(self.images.as_ref(), &s.url).await;
                }
                return Err(e);
            }
        };
        if replaced_image && updated.image != previous.image {
            release_quietly(self.images.as_ref(), &previous.image).await;
        }
        info!(advertisement_id = %id, "advertisement updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<Advertisement, ServiceError> {
        let removed = self.repo.delete(id).await?.ok_or_else(|| ServiceError::not_found("Advertisement"))?;
        release_quietly(self.images.as_ref(), &removed.image).await;
        info!(advertisement_id = %id, "advertisement deleted");
        Ok(removed)
    }

    /// Returns how many advertisements were actually removed.
    #[instrument(skip_all, fields(requested = ids.len()))]
    pub async fn delete_many(&self, ids: &IdSet) -> Result<u64, ServiceError> {
        let removed = self.repo.delete_many(ids).await?;
        for ad in &removed {
            release_quietly(self.images.as_ref(), &ad.image).await;
        }
        info!(deleted = removed.len(), "advertisements deleted");
        Ok(removed.len() as u64)
    }
}
