//! Service catalog store: title and description are required, the image is
//! optional. Listing is page-windowed.

pub mod domain;
pub mod repository;
pub mod seaorm;

use std::sync::Arc;

use models::service::Model as Service;
use models::validate::{present_non_empty, required};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::bulk::IdSet;
use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};
use crate::upload::{release_quietly, store_optional, ImageStore, ImageUpload};

use domain::{NewService, ServiceInput, ServicePatch};
use repository::ServiceRepository;

#[derive(Clone)]
pub struct ServiceCatalog {
    repo: Arc<dyn ServiceRepository>,
    images: Arc<dyn ImageStore>,
}

impl ServiceCatalog {
    pub fn new(repo: Arc<dyn ServiceRepository>, images: Arc<dyn ImageStore>) -> Self {
        Self { repo, images }
    }

    #[instrument(skip_all)]
    pub async fn create(
        &self,
        input: ServiceInput,
        upload: Option<ImageUpload>,
        origin: &str,
    ) -> Result<Service, ServiceError> {
        let title = required("title", input.title)?;
        let description = required("description", input.description)?;
        let linked = present_non_empty("image", input.image)?;

        let stored = store_optional(self.images.as_ref(), upload, origin).await?;
        let image = stored.as_ref().map(|s| s.url.clone()).or(linked);
        match self.repo.insert(NewService { title, description, image }).await {
            Ok(svc) => {
                info!(service_id = %svc.id, "service created");
                Ok(svc)
            }
            Err(e) => {
                if let Some(s) = stored {
                    release_quietly(self.images.as_ref(), &s.url).await;
                }
                Err(e)
            }
        }
    }

    pub async fn page(&self, pagination: Pagination) -> Result<Page<Service>, ServiceError> {
        let (_, per_page) = pagination.normalize();
        let (items, total) = self.repo.window(pagination.offset(), per_page).await?;
        Ok(Page::new(items, total, pagination))
    }

    pub async fn get(&self, id: Uuid) -> Result<Service, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("Service"))
    }

    #[instrument(skip(self, input, upload, origin))]
    pub async fn update(
        &self,
        id: Uuid,
        input: ServiceInput,
        upload: Option<ImageUpload>,
        origin: &str,
    ) -> Result<Service, ServiceError> {
        let mut patch = ServicePatch {
            title: present_non_empty("title", input.title)?,
            description: present_non_empty("description", input.description)?,
            image: present_non_empty("image", input.image)?,
        };
        let previous = self.get(id).await?;

        let stored = store_optional(self.images.as_ref(), upload, origin).await?;
        if let Some(s) = &stored {
            patch.image = Some(s.url.clone());
        }
        let updated = match self
            .repo
            .update(id, patch)
            .await
            .and_then(|found| found.ok_or_else(|| ServiceError::not_found("Service")))
        {
            Ok(svc) => svc,
            Err(e) => {
                if let Some(s) = stored {
                    release_quietly(self.images.as_ref(), &s.url).await;
                }
                return Err(e);
            }
        };
        if let Some(old) = previous.image.filter(|old| updated.image.as_ref() != Some(old)) {
            release_quietly(self.images.as_ref(), &old).await;
        }
        info!(service_id = %id, "service updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<Service, ServiceError> {
        let removed = self.repo.delete(id).await?.ok_or_else(|| ServiceError::not_found("Service"))?;
        if let Some(image) = &removed.image {
            release_quietly(self.images.as_ref(), image).await;
        }
        info!(service_id = %id, "service deleted");
        Ok(removed)
    }

    #[instrument(skip_all, fields(requested = ids.len()))]
    pub async fn delete_many(&self, ids: &IdSet) -> Result<u64, ServiceError> {
        let removed = self.repo.delete_many(ids).await?;
        for image in removed.iter().filter_map(|s| s.image.as_deref()) {
            release_quietly(self.images.as_ref(), image).await;
        }
        info!(deleted = removed.len(), "services deleted");
        Ok(removed.len() as u64)
    }
}
