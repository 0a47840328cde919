use std::sync::Arc;

use codex_store::memory::MemoryDocumentStore;
use codex_store::rtdb::RealtimeDbStore;
use codex_store::{CharacterRepo, StoreError};

use crate::auth::gate::{IdentityGate, IdentityProvider};
use crate::auth::identity_toolkit::IdentityToolkitProvider;
use crate::auth::local::LocalIdentityProvider;
use crate::config::{IdentityConfig, ServerConfig, StoreConfig};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Character records with their backend chosen at start-up.
    pub repo: CharacterRepo,
    /// Identity Gate guarding the admin routes.
    pub gate: Arc<IdentityGate>,
    /// Server configuration (session settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
}

/// Misconfiguration detected while assembling [`AppState`].
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to build record store client: {0}")]
    Store(#[from] StoreError),

    #[error("failed to build identity provider client: {0}")]
    IdentityClient(#[from] reqwest::Error),

    #[error("ADMIN_PASSWORD_HASH is not a valid PHC hash string")]
    InvalidPasswordHash,

    #[error("CORS_ORIGINS entry {0:?} is not a usable origin")]
    InvalidCorsOrigin(String),
}

impl AppState {
    /// Select the store backend and identity provider described by `config`.
    pub fn from_config(config: ServerConfig) -> Result<Self, StartupError> {
        let repo = match &config.store {
            StoreConfig::Demo => CharacterRepo::demo(),
            StoreConfig::Memory => CharacterRepo::live(Arc::new(MemoryDocumentStore::new())),
            StoreConfig::Remote { url, auth_token } => CharacterRepo::live(Arc::new(
                RealtimeDbStore::new(url.clone(), auth_token.clone())?,
            )),
        };

        let provider: Option<Arc<dyn IdentityProvider>> = match &config.identity {
            IdentityConfig::Demo => None,
            IdentityConfig::Local { password_hash } => Some(Arc::new(
                LocalIdentityProvider::new(config.admin_identifier.clone(), password_hash.clone())
                    .ok_or(StartupError::InvalidPasswordHash)?,
            )),
            IdentityConfig::Remote { api_key, endpoint } => Some(Arc::new(
                IdentityToolkitProvider::new(endpoint.clone(), api_key.clone())?,
            )),
        };
        let gate = match provider {
            Some(provider) => IdentityGate::new(provider, config.admin_identifier.clone()),
            None => IdentityGate::demo(config.admin_identifier.clone()),
        };

        tracing::info!(
            store_mode = ?repo.mode(),
            store_kind = repo.kind(),
            identity_mode = ?gate.mode(),
            admin = %config.admin_identifier,
            "Application state assembled"
        );

        Ok(Self {
            repo,
            gate: Arc::new(gate),
            config: Arc::new(config),
        })
    }
}
