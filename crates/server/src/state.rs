//! Explicitly constructed request context shared by every handler.

use std::sync::Arc;

use configs::{UploadBackend, UploadConfig};
use sea_orm::DatabaseConnection;
use service::{
    advertisements::{repository::mock::MockAdvertisementRepository, seaorm::SeaOrmAdvertisementRepository, AdvertisementService},
    auth::{repo::seaorm::SeaOrmAdminRepository, repository::{mock::MockAdminRepository, AdminRepository}, AuthService},
    enquiries::{repository::mock::MockEnquiryRepository, seaorm::SeaOrmEnquiryRepository, EnquiryService},
    services::{repository::mock::MockServiceRepository, seaorm::SeaOrmServiceRepository, ServiceCatalog},
    upload::{cloud::CloudImageStore, local::LocalImageStore, ImageStore},
    visitors::{repository::mock::MockVisitorRepository, seaorm::SeaOrmVisitorRepository, VisitorService},
};

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService<dyn AdminRepository>,
    pub advertisements: AdvertisementService,
    pub services: ServiceCatalog,
    pub enquiries: EnquiryService,
    pub visitors: VisitorService,
    pub images: Arc<dyn ImageStore>,
    /// Origin for locally served image URLs; `None` uses the request `Host`.
    pub public_base_url: Option<String>,
}

impl AppState {
    /// Stores backed by PostgreSQL.
    pub fn with_database(db: DatabaseConnection, images: Arc<dyn ImageStore>, public_base_url: Option<String>) -> Self {
        let admins: Arc<dyn AdminRepository> = Arc::new(SeaOrmAdminRepository::new(db.clone()));
        Self {
            auth: AuthService::new(admins),
            advertisements: AdvertisementService::new(Arc::new(SeaOrmAdvertisementRepository::new(db.clone())), images.clone()),
            services: ServiceCatalog::new(Arc::new(SeaOrmServiceRepository::new(db.clone())), images.clone()),
            enquiries: EnquiryService::new(Arc::new(SeaOrmEnquiryRepository::new(db.clone()))),
            visitors: VisitorService::new(Arc::new(SeaOrmVisitorRepository::new(db))),
            images,
            public_base_url,
        }
    }

    /// Stores kept in process memory (`database.backend = "memory"`).
    pub fn in_memory(images: Arc<dyn ImageStore>, public_base_url: Option<String>) -> Self {
        let admins: Arc<dyn AdminRepository> = Arc::new(MockAdminRepository::default());
        Self {
            auth: AuthService::new(admins),
            advertisements: AdvertisementService::new(Arc::new(MockAdvertisementRepository::default()), images.clone()),
            services: ServiceCatalog::new(Arc::new(MockServiceRepository::default()), images.clone()),
            enquiries: EnquiryService::new(Arc::new(MockEnquiryRepository::default())),
            visitors: VisitorService::new(Arc::new(MockVisitorRepository::default())),
            images,
            public_base_url,
        }
    }
}

/// Build the configured image backend.
pub fn image_store(cfg: &UploadConfig) -> Arc<dyn ImageStore> {
    match cfg.backend {
        UploadBackend::Local => Arc::new(LocalImageStore::new(&cfg.dir, cfg.max_bytes)),
        UploadBackend::Cloud => Arc::new(CloudImageStore::new(&cfg.cloud.endpoint, &cfg.cloud.api_key, cfg.max_bytes)),
    }
}
