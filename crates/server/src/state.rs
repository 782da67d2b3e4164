//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::{ServerConfig, StorageBackend};
use crate::db::{self, MemoryStore, PgStore, Store};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the repository backing the API.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    store: Arc<dyn Store>,
}

impl AppState {
    /// Create a new application state around an existing store.
    #[must_use]
    pub fn new(config: ServerConfig, store: Arc<dyn Store>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Build state for the configured storage backend, connecting to the
    /// database if needed.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the database pool cannot be created.
    pub async fn connect(config: ServerConfig) -> Result<Self, sqlx::Error> {
        let store: Arc<dyn Store> = match (config.storage, config.database_url.as_ref()) {
            (StorageBackend::Postgres, Some(url)) => {
                let pool = db::create_pool(url).await?;
                tracing::info!("Database pool created");
                Arc::new(PgStore::new(pool))
            }
            (StorageBackend::Postgres, None) => {
                return Err(sqlx::Error::Configuration(
                    "postgres storage selected without a database URL".into(),
                ));
            }
            (StorageBackend::Memory, _) => {
                tracing::warn!("Using in-memory storage; data will not survive a restart");
                Arc::new(MemoryStore::new())
            }
        };

        Ok(Self::new(config, store))
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the repository.
    #[must_use]
    pub fn store(&self) -> &dyn Store {
        self.inner.store.as_ref()
    }
}
