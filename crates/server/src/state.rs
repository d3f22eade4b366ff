use crate::config::ServerConfig;
use anyhow::Context;
use notes::{NoteService, NoteStore};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Note service (shared store handle across requests)
    pub notes: NoteService,
}

impl ServerState {
    /// Connect to the configured store and build the state.
    pub async fn new(config: ServerConfig) -> anyhow::Result<Self> {
        let store = config.store_config().build().await?;
        Self::connect(config, store).await
    }

    /// Build state around `store` once it answers a ping. Drivers connect
    /// lazily, so this is where an unreachable store fails startup.
    pub async fn connect(config: ServerConfig, store: Arc<dyn NoteStore>) -> anyhow::Result<Self> {
        store
            .ping()
            .await
            .context("Document store did not answer at startup")?;
        tracing::info!(
            backend = config.store_backend.as_str(),
            "Connected to document store"
        );
        Ok(Self::with_store(config, store))
    }

    /// Build state around an already constructed store.
    pub fn with_store(config: ServerConfig, store: Arc<dyn NoteStore>) -> Self {
        Self {
            config: Arc::new(config),
            notes: NoteService::new(store),
        }
    }

    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        self.config.is_origin_allowed(origin)
    }
}
