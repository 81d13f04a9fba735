use async_trait::async_trait;
use models::service::Model as Service;
use uuid::Uuid;

use super::domain::{NewService, ServicePatch};
use crate::bulk::IdSet;
use crate::errors::ServiceError;

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn insert(&self, new: NewService) -> Result<Service, ServiceError>;
    /// Rows `[offset, offset + limit)` oldest first, plus the total row count.
    async fn window(&self, offset: u64, limit: u64) -> Result<(Vec<Service>, u64), ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<Service>, ServiceError>;
    async fn update(&self, id: Uuid, patch: ServicePatch) -> Result<Option<Service>, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<Option<Service>, ServiceError>;
    async fn delete_many(&self, ids: &IdSet) -> Result<Vec<Service>, ServiceError>;
}

/// In-memory repository for tests and database-less runs
pub mod mock {
    use super::*;
    use chrono::Utc;

    use crate::storage::MemoryTable;

    #[derive(Default)]
    pub struct MockServiceRepository {
        table: MemoryTable<Service>,
    }

    #[async_trait]
    impl ServiceRepository for MockServiceRepository {
        async fn insert(&self, new: NewService) -> Result<Service, ServiceError> {
            let now = Utc::now().into();
            let row = Service {
                id: Uuid::new_v4(),
                title: new.title,
                description: new.description,
                image: new.image,
                created_at: now,
                updated_at: now,
            };
            Ok(self.table.insert(row).await)
        }

        async fn window(&self, offset: u64, limit: u64) -> Result<(Vec<Service>, u64), ServiceError> {
            Ok((self.table.window(offset, limit).await, self.table.count().await))
        }

        async fn get(&self, id: Uuid) -> Result<Option<Service>, ServiceError> {
            Ok(self.table.get(id).await)
        }

        async fn update(&self, id: Uuid, patch: ServicePatch) -> Result<Option<Service>, ServiceError> {
            Ok(self
                .table
                .update(id, |row| {
                    if let Some(title) = patch.title { row.title = title; }
                    if let Some(description) = patch.description { row.description = description; }
                    if let Some(image) = patch.image { row.image = Some(image); }
                    row.updated_at = Utc::now().into();
                })
                .await)
        }

        async fn delete(&self, id: Uuid) -> Result<Option<Service>, ServiceError> {
            Ok(self.table.remove(id).await)
        }

        async fn delete_many(&self, ids: &IdSet) -> Result<Vec<Service>, ServiceError> {
            Ok(self.table.remove_many(ids.as_slice()).await)
        }
    }
}
