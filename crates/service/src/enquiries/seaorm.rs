use async_trait::async_trait;
use chrono::Utc;
use models::enquiry::{self, Model as Enquiry};
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use super::domain::NewEnquiry;
use super::repository::EnquiryRepository;
use crate::bulk::IdSet;
use crate::db::delete_by_ids;
use crate::errors::ServiceError;
use crate::upsert::Upserted;

pub struct SeaOrmEnquiryRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmEnquiryRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl EnquiryRepository for SeaOrmEnquiryRepository {
    async fn upsert(&self, new: NewEnquiry) -> Result<Upserted<Enquiry>, ServiceError> {
        let candidate = Uuid::new_v4();
        let now = Utc::now();
        let am = enquiry::ActiveModel {
            id: Set(candidate),
            name: Set(new.name),
            email: Set(new.email),
            mobile: Set(new.mobile),
            subject: Set(new.subject),
            address: Set(new.address),
            message: Set(new.message),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        // relies on the unique index over (name, email)
        let record = enquiry::Entity::insert(am)
            .on_conflict(
                OnConflict::columns([enquiry::Column::Name, enquiry::Column::Email])
                    .update_columns([
                        enquiry::Column::Mobile,
                        enquiry::Column::Subject,
                        enquiry::Column::Address,
                        enquiry::Column::Message,
                        enquiry::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await?;
        let created = record.id == candidate;
        Ok(Upserted { record, created })
    }

    async fn list(&self) -> Result<Vec<Enquiry>, ServiceError> {
        Ok(enquiry::Entity::find()
            .order_by_asc(enquiry::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    async fn delete_many(&self, ids: &IdSet) -> Result<Vec<Enquiry>, ServiceError> {
        delete_by_ids::<enquiry::Entity>(&self.db, enquiry::Column::Id, ids).await
    }
}
