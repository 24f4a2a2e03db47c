/// Shared application state
use crate::{config::SkillConfig, error::Result};
use std::sync::Arc;
use vault_catalog::HttpCatalogFetcher;
use vault_playback::{SeededShuffle, Skill};
use vault_storage::SqliteSessionStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub skill: Arc<Skill>,
}

impl AppState {
    pub fn new(skill: Skill) -> Self {
        Self {
            skill: Arc::new(skill),
        }
    }

    /// Wire the SQLite store and HTTP catalog described by `config`
    pub async fn from_config(config: &SkillConfig) -> Result<Self> {
        let store = SqliteSessionStore::connect(&config.storage.database_url).await?;
        tracing::info!("Database connected");

        let catalog = HttpCatalogFetcher::new(config.catalog_config())?;
        tracing::info!("Catalog client targeting {}", catalog.library_url());

        let mut skill = Skill::new(Arc::new(store), Arc::new(catalog));
        if let Some(seed) = config.playback.shuffle_seed {
            tracing::info!("Using fixed shuffle seed {}", seed);
            skill = skill.with_shuffle(Arc::new(SeededShuffle::new(seed)));
        }

        Ok(Self::new(skill))
    }
}
