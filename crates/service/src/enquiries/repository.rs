use async_trait::async_trait;
use models::enquiry::Model as Enquiry;

use super::domain::NewEnquiry;
use crate::bulk::IdSet;
use crate::errors::ServiceError;
use crate::upsert::Upserted;

#[async_trait]
pub trait EnquiryRepository: Send + Sync {
    /// Insert, or overwrite the mutable fields of the row with the same
    /// `(name, email)`, in a single atomic step.
    async fn upsert(&self, new: NewEnquiry) -> Result<Upserted<Enquiry>, ServiceError>;
    async fn list(&self) -> Result<Vec<Enquiry>, ServiceError>;
    async fn delete_many(&self, ids: &IdSet) -> Result<Vec<Enquiry>, ServiceError>;
}

/// In-memory repository for tests and database-less runs
pub mod mock {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::storage::MemoryTable;

    #[derive(Default)]
    pub struct MockEnquiryRepository {
        table: MemoryTable<Enquiry>,
    }

    #[async_trait]
    impl EnquiryRepository for MockEnquiryRepository {
        async fn upsert(&self, new: NewEnquiry) -> Result<Upserted<Enquiry>, ServiceError> {
            let now = Utc::now().into();
            let candidate = Enquiry {
                id: Uuid::new_v4(),
                name: new.name.clone(),
                email: new.email.clone(),
                mobile: new.mobile.clone(),
                subject: new.subject.clone(),
                address: new.address.clone(),
                message: new.message.clone(),
                created_at: now,
                updated_at: now,
            };
            let (record, created) = self
                .table
                .upsert_by(
                    |row| row.name == new.name && row.email == new.email,
                    |row| {
                        row.mobile = new.mobile.clone();
                        row.subject = new.subject.clone();
                        row.address = new.address.clone();
                        row.message = new.message.clone();
                        row.updated_at = now;
                    },
                    candidate,
                )
                .await;
            Ok(Upserted { record, created })
        }

        async fn list(&self) -> Result<Vec<Enquiry>, ServiceError> {
            Ok(self.table.list().await)
        }

        async fn delete_many(&self, ids: &IdSet) -> Result<Vec<Enquiry>, ServiceError> {
            Ok(self.table.remove_many(ids.as_slice()).await)
        }
    }
}
