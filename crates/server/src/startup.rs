use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use configs::{AppConfig, CorsConfig, DatabaseBackend, UploadBackend};
use migration::MigratorTrait;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::routes;
use crate::state::{image_store, AppState};

/// Only the configured frontend origin when set, otherwise permissive.
pub fn build_cors(cfg: &CorsConfig) -> anyhow::Result<CorsLayer> {
    match &cfg.frontend_url {
        Some(origin) => {
            let origin: HeaderValue = origin.parse().with_context(|| format!("invalid cors.frontend_url: {origin}"))?;
            Ok(CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
                .allow_headers(Any))
        }
        None => Ok(CorsLayer::very_permissive()),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}

/// Build the stores for the configured database backend and bootstrap the
/// admin if credentials are configured. Postgres is migrated first.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<AppState> {
    let images = image_store(&cfg.uploads);
    let base = cfg.server.public_base_url.clone();
    let state = match cfg.database.backend {
        DatabaseBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            migration::Migrator::up(&db, None).await.context("running migrations")?;
            AppState::with_database(db, images, base)
        }
        DatabaseBackend::Memory => {
            warn!("database.backend = memory; records are lost on restart");
            AppState::in_memory(images, base)
        }
    };
    if let Some(admin) = &cfg.admin {
        let created = state.auth.bootstrap_admin(&admin.username, &admin.password).await?;
        info!(username = %admin.username, created, "admin bootstrap checked");
    }
    Ok(state)
}

/// Public entry: build the state, then serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let uploads_dir = match cfg.uploads.backend {
        UploadBackend::Local => {
            common::env::ensure_upload_dir(&cfg.uploads.dir).await?;
            Some(PathBuf::from(&cfg.uploads.dir))
        }
        UploadBackend::Cloud => None,
    };

    let state = build_state(&cfg).await?;
    let app = routes::build_router(state, build_cors(&cfg.cors)?, uploads_dir);

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, database = ?cfg.database.backend, uploads = ?cfg.uploads.backend, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
