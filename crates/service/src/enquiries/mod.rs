//! Enquiry store: contact-form submissions, one record per `(name, email)`.

pub mod domain;
pub mod repository;
pub mod seaorm;

use std::sync::Arc;

use models::enquiry::Model as Enquiry;
use models::validate::required;
use tracing::{info, instrument};

use crate::bulk::IdSet;
use crate::errors::ServiceError;
use crate::upsert::Upserted;

use domain::{EnquiryInput, NewEnquiry};
use repository::EnquiryRepository;

#[derive(Clone)]
pub struct EnquiryService {
    repo: Arc<dyn EnquiryRepository>,
}

impl EnquiryService {
    pub fn new(repo: Arc<dyn EnquiryRepository>) -> Self { Self { repo } }

    /// Store a submission. A resubmission with the same name and email
    /// overwrites the earlier one instead of adding a record.
    #[instrument(skip_all)]
    pub async fn submit(&self, input: EnquiryInput) -> Result<Upserted<Enquiry>, ServiceError> {
        let new = NewEnquiry {
            name: required("name", input.name)?,
            email: required("email", input.email)?,
            mobile: required("mobile", input.mobile)?,
            subject: required("subject", input.subject)?,
            address: required("address", input.address)?,
            message: required("message", input.message)?,
        };

        let saved = self.repo.upsert(new).await?;
        info!(enquiry_id = %saved.record.id, created = saved.created, "enquiry stored");
        Ok(saved)
    }

    pub async fn list(&self) -> Result<Vec<Enquiry>, ServiceError> {
        self.repo.list().await
    }

    #[instrument(skip_all, fields(requested = ids.len()))]
    pub async fn delete_many(&self, ids: &IdSet) -> Result<u64, ServiceError> {
        let removed = self.repo.delete_many(ids).await?;
        info!(deleted = removed.len(), "enquiries deleted");
        Ok(removed.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repository::mock::MockEnquiryRepository;

    fn service() -> EnquiryService {
        EnquiryService::new(Arc::new(MockEnquiryRepository::default()))
    }

    fn input(message: &str) -> EnquiryInput {
        EnquiryInput {
            name: Some("Jane".into()),
            email: Some("jane@example.com".into()),
            mobile: Some("5550100".into()),
            subject: Some("Quote".into()),
            address: Some("1 Main St".into()),
            message: Some(message.into()),
        }
    }

    #[tokio::test]
    async fn resubmission_updates_single_record() {
        let svc = service();
        let first = svc.submit(input("first")).await.unwrap();
        assert!(first.created);
        let second = svc.submit(input("second")).await.unwrap();
        assert!(!second.created);
        assert_eq!(second.record.id, first.record.id);

        let all = svc.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].message, "second");
    }

    #[tokio::test]
    async fn different_email_is_a_new_enquiry() {
        let svc = service();
        svc.submit(input("a")).await.unwrap();
        let mut other = input("b");
        other.email = Some("jane@other.org".into());
        assert!(svc.submit(other).await.unwrap().created);
        assert_eq!(svc.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn every_field_is_required() {
        let svc = service();
        let mut missing = input("x");
        missing.address = None;
        assert!(matches!(svc.submit(missing).await, Err(ServiceError::Validation(m)) if m == "address is required"));
        let mut blank_email = input("x");
        blank_email.email = Some("  ".into());
        assert!(matches!(svc.submit(blank_email).await, Err(ServiceError::Validation(m)) if m == "email is required"));
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn email_is_stored_as_given() {
        let svc = service();
        let mut local = input("x");
        local.email = Some("jane@localhost".into());
        let saved = svc.submit(local).await.unwrap();
        assert!(saved.created);
        assert_eq!(saved.record.email, "jane@localhost");
    }

    #[tokio::test]
    async fn bulk_delete_counts_removed() {
        let svc = service();
        let saved = svc.submit(input("x")).await.unwrap();
        let ids = IdSet::parse([saved.record.id.to_string(), uuid::Uuid::new_v4().to_string()]).unwrap();
        assert_eq!(svc.delete_many(&ids).await.unwrap(), 1);
        assert!(svc.list().await.unwrap().is_empty());
    }
}
