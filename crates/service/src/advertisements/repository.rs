use async_trait::async_trait;
use models::advertisement::Model as Advertisement;
use uuid::Uuid;

use super::domain::{AdvertisementPatch, NewAdvertisement};
use crate::bulk::IdSet;
use crate::errors::ServiceError;

#[async_trait]
pub trait AdvertisementRepository: Send + Sync {
    async fn insert(&self, new: NewAdvertisement) -> Result<Advertisement, ServiceError>;
    /// All rows, oldest first.
    async fn list(&self) -> Result<Vec<Advertisement>, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<Advertisement>, ServiceError>;
    async fn update(&self, id: Uuid, patch: AdvertisementPatch) -> Result<Option<Advertisement>, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<Option<Advertisement>, ServiceError>;
    /// Remove the rows in `ids`, ignoring unknown ones; returns what was removed.
    async fn delete_many(&self, ids: &IdSet) -> Result<Vec<Advertisement>, ServiceError>;
}

/// In-memory repository for tests and database-less runs
pub mod mock {
    use super::*;
    use chrono::Utc;

    use crate::storage::MemoryTable;

    #[derive(Default)]
    pub struct MockAdvertisementRepository {
        table: MemoryTable<Advertisement>,
    }

    #[async_trait]
    impl AdvertisementRepository for MockAdvertisementRepository {
        async fn insert(&self, new: NewAdvertisement) -> Result<Advertisement, ServiceError> {
            let now = Utc::now().into();
            let row = Advertisement {
                id: Uuid::new_v4(),
                title: new.title,
                description: new.description,
                image: new.image,
                created_at: now,
                updated_at: now,
            };
            Ok(self.table.insert(row).await)
        }

        async fn list(&self) -> Result<Vec<Advertisement>, ServiceError> {
            Ok(self.table.list().await)
        }

        async fn get(&self, id: Uuid) -> Result<Option<Advertisement>, ServiceError> {
            Ok(self.table.get(id).await)
        }

        async fn update(&self, id: Uuid, patch: AdvertisementPatch) -> Result<Option<Advertisement>, ServiceError> {
            Ok(self
                .table
                .update(id, |row| {
                    if let Some(title) = patch.title { row.title = title; }
                    if let Some(description) = patch.description { row.description = description; }
                    if let Some(image) = patch.image { row.image = image; }
                    row.updated_at = Utc::now().into();
                })
                .await)
        }

        async fn delete(&self, id: Uuid) -> Result<Option<Advertisement>, ServiceError> {
            Ok(self.table.remove(id).await)
        }

        async fn delete_many(&self, ids: &IdSet) -> Result<Vec<Advertisement>, ServiceError> {
            Ok(self.table.remove_many(ids.as_slice()).await)
        }
    }
}
