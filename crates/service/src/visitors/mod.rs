//! Visitor log: one record per network address, refreshed on every visit.

pub mod domain;
pub mod repository;
pub mod seaorm;

use std::sync::Arc;

use chrono::Utc;
use models::validate::required;
use models::visitor::Model as Visitor;
use tracing::{debug, instrument};

use crate::bulk::IdSet;
use crate::errors::ServiceError;
use crate::upsert::Upserted;

use domain::{NewVisit, VisitInput};
use repository::VisitorRepository;

#[derive(Clone)]
pub struct VisitorService {
    repo: Arc<dyn VisitorRepository>,
}

impl VisitorService {
    pub fn new(repo: Arc<dyn VisitorRepository>) -> Self { Self { repo } }

    /// Record a visit stamped with the current time. `peer_ip` stands in for
    /// `ipAddress` when the report omits it.
    #[instrument(skip(self, input))]
    pub async fn record(&self, input: VisitInput, peer_ip: Option<String>) -> Result<Upserted<Visitor>, ServiceError> {
        let ip_address = match input.ip_address.filter(|ip| !ip.trim().is_empty()) {
            Some(ip) => ip,
            None => required("ipAddress", peer_ip)?,
        };
        let visit = NewVisit {
            ip_address: ip_address.trim().to_string(),
            city: required("city", input.city)?,
            region: required("region", input.region)?,
            country: required("country", input.country)?,
            visit_time: Utc::now(),
        };
        let saved = self.repo.upsert(visit).await?;
        debug!(visitor_id = %saved.record.id, created = saved.created, "visit recorded");
        Ok(saved)
    }

    pub async fn list(&self) -> Result<Vec<Visitor>, ServiceError> {
        self.repo.list().await
    }

    #[instrument(skip_all, fields(requested = ids.len()))]
    pub async fn delete_many(&self, ids: &IdSet) -> Result<u64, ServiceError> {
        let removed = self.repo.delete_many(ids).await?;
        tracing::info!(deleted = removed.len(), "visitors deleted");
        Ok(removed.len() as u64)
    }
}
