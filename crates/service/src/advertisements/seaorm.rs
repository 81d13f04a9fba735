use async_trait::async_trait;
use chrono::Utc;
use models::advertisement::{self, Model as Advertisement};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set};
use uuid::Uuid;

use super::domain::{AdvertisementPatch, NewAdvertisement};
use super::repository::AdvertisementRepository;
use crate::bulk::IdSet;
use crate::db::delete_by_ids;
use crate::errors::ServiceError;

pub struct SeaOrmAdvertisementRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAdvertisementRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl AdvertisementRepository for SeaOrmAdvertisementRepository {
    async fn insert(&self, new: NewAdvertisement) -> Result<Advertisement, ServiceError> {
        let now = Utc::now();
        let am = advertisement::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(new.title),
            description: Set(new.description),
            image: Set(new.image),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        Ok(am.insert(&self.db).await?)
    }

    async fn list(&self) -> Result<Vec<Advertisement>, ServiceError> {
        Ok(advertisement::Entity::find()
            .order_by_asc(advertisement::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Advertisement>, ServiceError> {
        Ok(advertisement::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn update(&self, id: Uuid, patch: AdvertisementPatch) -> Result<Option<Advertisement>, ServiceError> {
        let Some(found) = advertisement::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut am = found.into_active_model();
        if let Some(title) = patch.title { am.title = Set(title); }
        if let Some(description) = patch.description { am.description = Set(description); }
        if let Some(image) = patch.image { am.image = Set(image); }
        am.updated_at = Set(Utc::now().into());
        Ok(Some(am.update(&self.db).await?))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Advertisement>, ServiceError> {
        let removed = delete_by_ids::<advertisement::Entity>(&self.db, advertisement::Column::Id, &IdSet::from(id)).await?;
        Ok(removed.into_iter().next())
    }

    async fn delete_many(&self, ids: &IdSet) -> Result<Vec<Advertisement>, ServiceError> {
        delete_by_ids::<advertisement::Entity>(&self.db, advertisement::Column::Id, ids).await
    }
}
