/// Skill server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;
use vault_catalog::CatalogConfig;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SkillConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_catalog")]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub playback: PlaybackSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSettings {
    #[serde(default = "default_catalog_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlaybackSettings {
    /// Fixed shuffle seed; unset draws from the thread RNG
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
}

impl SkillConfig {
    /// Load configuration from file and environment
    ///
    /// `path` defaults to `config.toml` in the working directory. Environment
    /// variables override the file, e.g. `VAULT_SERVER__PORT=9000` or
    /// `VAULT_CATALOG__BASE_URL=https://vault.example.com`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        let config_path = path.map_or_else(|| PathBuf::from("config.toml"), Path::to_path_buf);
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        } else if path.is_some() {
            return Err(ServerError::Config(format!(
                "Config file not found: {}",
                config_path.display()
            )));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("VAULT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.catalog.base_url).map_err(|e| {
            ServerError::Config(format!(
                "Invalid catalog URL {:?} (set VAULT_CATALOG__BASE_URL): {}",
                self.catalog.base_url, e
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ServerError::Config(format!(
                "Catalog URL must be http or https (set VAULT_CATALOG__BASE_URL), got {:?}",
                self.catalog.base_url
            )));
        }

        if self.catalog.timeout_secs == 0 {
            return Err(ServerError::Config(
                "Catalog timeout must be at least one second".to_string(),
            ));
        }

        if self.storage.database_url.is_empty() {
            return Err(ServerError::Config("Database URL is required".to_string()));
        }

        Ok(())
    }

    /// Catalog client settings
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig::new(self.catalog.base_url.clone())
            .with_timeouts(self.catalog.timeout_secs, self.catalog.connect_timeout_secs)
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/vault.db".to_string()
}

fn default_catalog() -> CatalogSettings {
    CatalogSettings {
        base_url: default_catalog_url(),
        timeout_secs: default_timeout_secs(),
        connect_timeout_secs: default_connect_timeout_secs(),
    }
}

fn default_catalog_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    5
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            catalog: default_catalog(),
            playback: PlaybackSettings::default(),
        }
    }
}
