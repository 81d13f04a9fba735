use async_trait::async_trait;
use models::visitor::Model as Visitor;

use super::domain::NewVisit;
use crate::bulk::IdSet;
use crate::errors::ServiceError;
use crate::upsert::Upserted;

#[async_trait]
pub trait VisitorRepository: Send + Sync {
    /// Insert, or refresh location and visit time of the row with the same
    /// address, in a single atomic step.
    async fn upsert(&self, visit: NewVisit) -> Result<Upserted<Visitor>, ServiceError>;
    /// Most recent visit first.
    async fn list(&self) -> Result<Vec<Visitor>, ServiceError>;
    async fn delete_many(&self, ids: &IdSet) -> Result<Vec<Visitor>, ServiceError>;
}

/// In-memory repository for tests and database-less runs
pub mod mock {
    use super::*;
    use uuid::Uuid;

    use crate::storage::MemoryTable;

    #[derive(Default)]
    pub struct MockVisitorRepository {
        table: MemoryTable<Visitor>,
    }

    #[async_trait]
    impl VisitorRepository for MockVisitorRepository {
        async fn upsert(&self, visit: NewVisit) -> Result<Upserted<Visitor>, ServiceError> {
            let candidate = Visitor {
                id: Uuid::new_v4(),
                ip_address: visit.ip_address.clone(),
                city: visit.city.clone(),
                region: visit.region.clone(),
                country: visit.country.clone(),
                visit_time: visit.visit_time.into(),
            };
            let (record, created) = self
                .table
                .upsert_by(
                    |row| row.ip_address == visit.ip_address,
                    |row| {
                        row.city = visit.city.clone();
                        row.region = visit.region.clone();
                        row.country = visit.country.clone();
                        row.visit_time = visit.visit_time.into();
                    },
                    candidate,
                )
                .await;
            Ok(Upserted { record, created })
        }

        async fn list(&self) -> Result<Vec<Visitor>, ServiceError> {
            let mut rows = self.table.list().await;
            rows.sort_by(|a, b| b.visit_time.cmp(&a.visit_time));
            Ok(rows)
        }

        async fn delete_many(&self, ids: &IdSet) -> Result<Vec<Visitor>, ServiceError> {
            Ok(self.table.remove_many(ids.as_slice()).await)
        }
    }
}
