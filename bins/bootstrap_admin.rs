//! Out-of-band creation of the admin identity.
//!
//! Credentials come from `[admin]` in the config file or from
//! `ADMIN_USERNAME` / `ADMIN_PASSWORD`. Running it again is harmless: an
//! existing account is left untouched.

use std::sync::Arc;

use anyhow::{anyhow, Context};
use migration::MigratorTrait;
use service::auth::{repo::seaorm::SeaOrmAdminRepository, AuthService};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let cfg = configs::AppConfig::load_and_validate()?;
    if cfg.database.backend == configs::DatabaseBackend::Memory {
        return Err(anyhow!("database.backend is memory; the server bootstraps [admin] itself at startup"));
    }
    let admin = cfg
        .admin
        .as_ref()
        .ok_or_else(|| anyhow!("no admin credentials; set [admin] or ADMIN_USERNAME and ADMIN_PASSWORD"))?;

    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await.context("running migrations")?;

    let auth = AuthService::new(Arc::new(SeaOrmAdminRepository::new(db)));
    if auth.bootstrap_admin(&admin.username, &admin.password).await? {
        info!(username = %admin.username, "admin account created");
    } else {
        info!(username = %admin.username, "admin account already exists; nothing changed");
    }
    Ok(())
}
