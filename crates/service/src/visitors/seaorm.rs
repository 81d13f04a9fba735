use async_trait::async_trait;
use models::visitor::{self, Model as Visitor};
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use super::domain::NewVisit;
use super::repository::VisitorRepository;
use crate::bulk::IdSet;
use crate::db::delete_by_ids;
use crate::errors::ServiceError;
use crate::upsert::Upserted;

pub struct SeaOrmVisitorRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmVisitorRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl VisitorRepository for SeaOrmVisitorRepository {
    async fn upsert(&self, visit: NewVisit) -> Result<Upserted<Visitor>, ServiceError> {
        let candidate = Uuid::new_v4();
        let am = visitor::ActiveModel {
            id: Set(candidate),
            ip_address: Set(visit.ip_address),
            city: Set(visit.city),
            region: Set(visit.region),
            country: Set(visit.country),
            visit_time: Set(visit.visit_time.into()),
        };
        let record = visitor::Entity::insert(am)
            .on_conflict(
                OnConflict::column(visitor::Column::IpAddress)
                    .update_columns([
                        visitor::Column::City,
                        visitor::Column::Region,
                        visitor::Column::Country,
                        visitor::Column::VisitTime,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await?;
        let created = record.id == candidate;
        Ok(Upserted { record, created })
    }

    async fn list(&self) -> Result<Vec<Visitor>, ServiceError> {
        Ok(visitor::Entity::find()
            .order_by_desc(visitor::Column::VisitTime)
            .all(&self.db)
            .await?)
    }

    async fn delete_many(&self, ids: &IdSet) -> Result<Vec<Visitor>, ServiceError> {
        delete_by_ids::<visitor::Entity>(&self.db, visitor::Column::Id, ids).await
    }
}
