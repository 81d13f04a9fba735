use async_trait::async_trait;
use chrono::Utc;
use models::service::{self, Model as Service};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, PaginatorTrait, QueryOrder, QuerySelect, Set};
use uuid::Uuid;

use super::domain::{NewService, ServicePatch};
use super::repository::ServiceRepository;
use crate::bulk::IdSet;
use crate::db::delete_by_ids;
use crate::errors::ServiceError;

/// Postgres binds LIMIT/OFFSET as BIGINT.
const BIGINT_MAX: u64 = i64::MAX as u64;

pub struct SeaOrmServiceRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmServiceRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl ServiceRepository for SeaOrmServiceRepository {
    async fn insert(&self, new: NewService) -> Result<Service, ServiceError> {
        let now = Utc::now();
        let am = service::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(new.title),
            description: Set(new.description),
            image: Set(new.image),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        Ok(am.insert(&self.db).await?)
    }

    async fn window(&self, offset: u64, limit: u64) -> Result<(Vec<Service>, u64), ServiceError> {
        let total = service::Entity::find().count(&self.db).await?;
        let items = service::Entity::find()
            .order_by_asc(service::Column::CreatedAt)
            .order_by_asc(service::Column::Id)
            .offset(offset.min(BIGINT_MAX))
            .limit(limit.min(BIGINT_MAX))
            .all(&self.db)
            .await?;
        Ok((items, total))
    }

    async fn get(&self, id: Uuid) -> Result<Option<Service>, ServiceError> {
        Ok(service::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn update(&self, id: Uuid, patch: ServicePatch) -> Result<Option<Service>, ServiceError> {
        let Some(found) = service::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut am = found.into_active_model();
        if let Some(title) = patch.title { am.title = Set(title); }
        if let Some(description) = patch.description { am.description = Set(description); }
        if let Some(image) = patch.image { am.image = Set(Some(image)); }
        am.updated_at = Set(Utc::now().into());
        Ok(Some(am.update(&self.db).await?))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Service>, ServiceError> {
        let removed = delete_by_ids::<service::Entity>(&self.db, service::Column::Id, &IdSet::from(id)).await?;
        Ok(removed.into_iter().next())
    }

    async fn delete_many(&self, ids: &IdSet) -> Result<Vec<Service>, ServiceError> {
        delete_by_ids::<service::Entity>(&self.db, service::Column::Id, ids).await
    }
}
