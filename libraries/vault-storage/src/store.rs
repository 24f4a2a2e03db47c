/// `SessionStore` implementations
use crate::{create_pool, run_migrations, sessions};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::collections::HashMap;
use tokio::sync::RwLock;
use vault_core::{Result, SessionDocument, SessionStore, UserId};

/// `SQLite`-backed session store
///
/// Saves replace the whole row; concurrent turns for the same user are
/// last-writer-wins.
#[derive(Clone)]
pub struct SqliteSessionStore {
    pool: SqlitePool,
}

impl SqliteSessionStore {
    /// Open (creating if missing) the database at `database_url` and migrate it
    ///
    /// # Errors
    /// Returns an error if the connection or a migration fails
    pub async fn connect(database_url: &str) -> crate::Result<Self> {
        let pool = create_pool(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// In-memory database (for testing)
    ///
    /// A single connection keeps every query on the same in-memory database.
    pub async fn in_memory() -> crate::Result<Self> {
        let options = SqliteConnectOptions::new().in_memory(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Wrap an existing, already migrated pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn load(&self, user_id: &UserId) -> Result<Option<SessionDocument>> {
        Ok(sessions::get(&self.pool, user_id.as_str()).await?)
    }

    async fn save(&self, user_id: &UserId, document: &SessionDocument) -> Result<()> {
        Ok(sessions::upsert(&self.pool, user_id.as_str(), document).await?)
    }
}

/// Process-local session store
#[derive(Default)]
pub struct MemorySessionStore {
    documents: RwLock<HashMap<UserId, SessionDocument>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with a stored document
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, user_id: &UserId) -> Result<Option<SessionDocument>> {
        Ok(self.documents.read().await.get(user_id).cloned())
    }

    async fn save(&self, user_id: &UserId, document: &SessionDocument) -> Result<()> {
        self.documents
            .write()
            .await
            .insert(user_id.clone(), document.clone());
        Ok(())
    }
}
