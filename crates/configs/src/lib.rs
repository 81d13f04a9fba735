use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

/// Upload size cap used when the config does not specify one (2 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub uploads: UploadConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub admin: Option<AdminConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    /// Origin used to build public image URLs, e.g. `https://admin.example.com`.
    /// When unset the request `Host` header is used.
    #[serde(default)]
    pub public_base_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4), public_base_url: None }
    }
}

/// Where records are kept.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    #[default]
    Postgres,
    /// Process memory; everything is lost on restart.
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub backend: DatabaseBackend,
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: DatabaseBackend::Postgres,
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

/// Where uploaded images end up.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UploadBackend {
    #[default]
    Local,
    Cloud,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    #[serde(default)]
    pub backend: UploadBackend,
    #[serde(default = "default_upload_dir")]
    pub dir: String,
    #[serde(default = "default_max_upload_bytes")]
    pub max_bytes: usize,
    #[serde(default)]
    pub cloud: CloudUploadConfig,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            backend: UploadBackend::Local,
            dir: default_upload_dir(),
            max_bytes: default_max_upload_bytes(),
            cloud: CloudUploadConfig::default(),
        }
    }
}

fn default_upload_dir() -> String { "uploads".into() }
fn default_max_upload_bytes() -> usize { DEFAULT_MAX_UPLOAD_BYTES }

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CloudUploadConfig {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CorsConfig {
    #[serde(default)]
    pub frontend_url: Option<String>,
}

/// Credentials for the one-off admin bootstrap.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to defaults when the
    /// file is missing, then apply environment overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path)?
        } else {
            AppConfig::default()
        };
        cfg.apply_env(|key| std::env::var(key).ok())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Overlay environment variables. `lookup` is injectable for tests.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup("DATABASE_BACKEND").as_deref() {
            Some("postgres") => self.database.backend = DatabaseBackend::Postgres,
            Some("memory") => self.database.backend = DatabaseBackend::Memory,
            Some(other) => return Err(anyhow!("DATABASE_BACKEND must be postgres or memory, got {other:?}")),
            None => {}
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow!("PORT must be a number in 1..=65535, got {port:?}: {e}"))?;
        }
        if let Some(base) = lookup("PUBLIC_BASE_URL") {
            self.server.public_base_url = Some(base);
        }
        if let Some(origin) = lookup("FRONTEND_URL") {
            self.cors.frontend_url = Some(origin);
        }
        match lookup("UPLOAD_BACKEND").as_deref() {
            Some("cloud") => self.uploads.backend = UploadBackend::Cloud,
            Some("local") => self.uploads.backend = UploadBackend::Local,
            Some(other) => return Err(anyhow!("UPLOAD_BACKEND must be local or cloud, got {other:?}")),
            None => {}
        }
        if let Some(dir) = lookup("UPLOAD_DIR") {
            self.uploads.dir = dir;
        }
        if let Some(endpoint) = lookup("CLOUD_UPLOAD_ENDPOINT") {
            self.uploads.cloud.endpoint = endpoint;
        }
        if let Some(key) = lookup("CLOUD_UPLOAD_API_KEY") {
            self.uploads.cloud.api_key = key;
        }
        if let (Some(username), Some(password)) = (lookup("ADMIN_USERNAME"), lookup("ADMIN_PASSWORD")) {
            self.admin = Some(AdminConfig { username, password });
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.validate()?;
        self.uploads.validate()?;
        if let Some(admin) = &self.admin {
            if admin.username.trim().is_empty() || admin.password.is_empty() {
                return Err(anyhow!("admin.username and admin.password must both be non-empty"));
            }
        }
        if let Some(origin) = &self.cors.frontend_url {
            if origin.trim().is_empty() {
                self.cors.frontend_url = None;
            }
        }
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        if let Some(base) = &self.public_base_url {
            let trimmed = base.trim().trim_end_matches('/').to_string();
            self.public_base_url = if trimmed.is_empty() { None } else { Some(trimmed) };
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<()> {
        if self.backend == DatabaseBackend::Memory {
            return Ok(());
        }
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl UploadConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_bytes == 0 {
            return Err(anyhow!("uploads.max_bytes must be positive"));
        }
        match self.backend {
            UploadBackend::Local if self.dir.trim().is_empty() => {
                Err(anyhow!("uploads.dir is required for the local backend"))
            }
            UploadBackend::Cloud if self.cloud.endpoint.trim().is_empty() => {
                Err(anyhow!("uploads.cloud.endpoint is required for the cloud backend"))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SAMPLE: &str = r#"
        [server]
        host = "0.0.0.0"
        port = 5000

        [database]
        url = "postgres://admin:pw@localhost:5432/site"

        [uploads]
        backend = "cloud"
        max_bytes = 1024

        [uploads.cloud]
        endpoint = "https://images.example.com/v1/assets"
        api_key = "k"

        [admin]
        username = "admin"
        password = "changeme"
    "#;

    #[test]
    fn parses_full_sample() {
        let mut cfg = parse(SAMPLE).unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.uploads.backend, UploadBackend::Cloud);
        assert_eq!(cfg.uploads.max_bytes, 1024);
        assert_eq!(cfg.uploads.dir, "uploads");
        assert_eq!(cfg.admin.unwrap().username, "admin");
    }

    #[test]
    fn defaults_cap_uploads_at_two_mebibytes() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.uploads.max_bytes, 2 * 1024 * 1024);
        assert_eq!(cfg.uploads.backend, UploadBackend::Local);
        assert!(cfg.admin.is_none());
    }

    #[test]
    fn env_overrides_take_precedence() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("DATABASE_URL", "postgres://u:p@db/site"),
            ("PORT", "9000"),
            ("FRONTEND_URL", "https://www.example.com"),
            ("PUBLIC_BASE_URL", "https://api.example.com/"),
            ("ADMIN_USERNAME", "root"),
            ("ADMIN_PASSWORD", "secret"),
        ]);
        let mut cfg = AppConfig::default();
        cfg.apply_env(|k| env.get(k).map(|v| v.to_string())).unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.database.url, "postgres://u:p@db/site");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.cors.frontend_url.as_deref(), Some("https://www.example.com"));
        assert_eq!(cfg.server.public_base_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(cfg.admin.unwrap().username, "root");
    }

    #[test]
    fn unparsable_env_values_are_errors() {
        let mut cfg = AppConfig::default();
        assert!(cfg.apply_env(|k| (k == "PORT").then(|| "80a".to_string())).is_err());
        assert_eq!(cfg.server.port, 8080);
        assert!(cfg.apply_env(|k| (k == "PORT").then(|| "70000".to_string())).is_err());
        assert!(cfg.apply_env(|k| (k == "UPLOAD_BACKEND").then(|| "s3".to_string())).is_err());
        assert!(cfg.apply_env(|k| (k == "DATABASE_BACKEND").then(|| "mongo".to_string())).is_err());
    }

    #[test]
    fn memory_backend_needs_no_database_url() {
        let mut cfg = parse("[database]\nbackend = \"memory\"\n").unwrap();
        assert_eq!(cfg.database.backend, DatabaseBackend::Memory);
        cfg.normalize_and_validate().unwrap();

        let mut from_env = AppConfig::default();
        from_env.apply_env(|k| (k == "DATABASE_BACKEND").then(|| "memory".to_string())).unwrap();
        from_env.normalize_and_validate().unwrap();
        assert_eq!(from_env.database.backend, DatabaseBackend::Memory);
    }

    #[test]
    fn rejects_missing_or_foreign_database_url() {
        let mut cfg = AppConfig::default();
        assert!(cfg.normalize_and_validate().is_err());
        cfg.database.url = "mysql://localhost/site".into();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn rejects_cloud_backend_without_endpoint() {
        let mut cfg = AppConfig::default();
        cfg.database.url = "postgres://localhost/site".into();
        cfg.uploads.backend = UploadBackend::Cloud;
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn rejects_blank_admin_credentials() {
        let mut cfg = AppConfig::default();
        cfg.database.url = "postgres://localhost/site".into();
        cfg.admin = Some(AdminConfig { username: " ".into(), password: "x".into() });
        assert!(cfg.normalize_and_validate().is_err());
    }
}
