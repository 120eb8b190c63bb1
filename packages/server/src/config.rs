use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    20
}
fn default_min_connections() -> u32 {
    2
}

impl DatabaseConfig {
    /// Pool settings at their defaults for `url`.
    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Admin account created on startup when no admin exists yet.
    #[serde(default)]
    pub bootstrap_username: Option<String>,
    #[serde(default)]
    pub bootstrap_password: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Filesystem,
    S3,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_storage_backend")]
    pub backend: StorageBackend,
    /// Root directory of the filesystem backend.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Prefix joined with an object key to form its public URL.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Upload size limit in bytes. Default: 10 MiB.
    #[serde(default = "default_max_blob_size")]
    pub max_blob_size: u64,
    #[serde(default)]
    pub s3: Option<common::storage::s3::S3Config>,
}

fn default_storage_backend() -> StorageBackend {
    StorageBackend::Filesystem
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("./data/media")
}
fn default_public_base_url() -> String {
    "/media".into()
}
fn default_max_blob_size() -> u64 {
    10 * 1024 * 1024
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            data_dir: default_data_dir(),
            public_base_url: default_public_base_url(),
            max_blob_size: default_max_blob_size(),
            s3: None,
        }
    }
}

impl StorageConfig {
    /// Public URL of the object stored under `key`.
    pub fn public_url(&self, key: &common::storage::BlobKey) -> String {
        format!("{}/{}", self.public_base_url.trim_end_matches('/'), key)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// Seconds a cached public query stays fresh. Default: 300.
    #[serde(default = "default_stale_secs")]
    pub stale_secs: u64,
}

fn default_stale_secs() -> u64 {
    300
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_secs: default_stale_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct GazetteerConfig {
    /// TOML file replacing the built-in marathon city table.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub gazetteer: GazetteerConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., CLUB__AUTH__JWT_SECRET)
            .add_source(Environment::with_prefix("CLUB").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
