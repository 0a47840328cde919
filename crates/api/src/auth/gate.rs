//! Identity Gate: the single password check in front of admin operations.
//!
//! The gate verifies a secret for one fixed administrator account through an
//! [`IdentityProvider`] chosen at start-up. Outcomes are the closed set
//! [`AuthFailure`]; turning them into user-facing text is left to
//! [`crate::messages`].

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

/// The literal secret accepted in demo mode.
pub const DEMO_SECRET: &str = "admin";

/// Why a login attempt was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthFailure {
    /// The account does not exist (or the provider will not say which of
    /// account and password was wrong).
    #[error("unknown account or invalid credentials")]
    UnknownAccount,

    #[error("wrong password")]
    WrongPassword,

    /// Too many failed attempts; the provider is refusing for now.
    #[error("too many attempts")]
    RateLimited,

    /// Demo mode and the secret was not [`DEMO_SECRET`].
    #[error("demo secret rejected")]
    DemoSecretRejected,

    /// Provider unreachable or an unrecognised provider error.
    #[error("unexpected identity provider error: {0}")]
    Unexpected(String),
}

/// Which provider backs the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityMode {
    Remote,
    Local,
    Demo,
}

/// Password verification for a single identifier.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn verify_password(&self, identifier: &str, secret: &str) -> Result<(), AuthFailure>;

    fn mode(&self) -> IdentityMode;
}

/// Accepts [`DEMO_SECRET`] for any identifier.
#[derive(Debug, Default)]
pub struct DemoIdentityProvider;

#[async_trait]
impl IdentityProvider for DemoIdentityProvider {
    async fn verify_password(&self, _identifier: &str, secret: &str) -> Result<(), AuthFailure> {
        if secret == DEMO_SECRET {
            Ok(())
        } else {
            Err(AuthFailure::DemoSecretRejected)
        }
    }

    fn mode(&self) -> IdentityMode {
        IdentityMode::Demo
    }
}

/// The administrator that passed the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    pub identifier: String,
}

/// Gate guarding the admin surface.
pub struct IdentityGate {
    provider: Arc<dyn IdentityProvider>,
    admin_identifier: String,
}

impl IdentityGate {
    pub fn new(provider: Arc<dyn IdentityProvider>, admin_identifier: impl Into<String>) -> Self {
        Self {
            provider,
            admin_identifier: admin_identifier.into(),
        }
    }

    /// Gate that only accepts [`DEMO_SECRET`].
    pub fn demo(admin_identifier: impl Into<String>) -> Self {
        Self::new(Arc::new(DemoIdentityProvider), admin_identifier)
    }

    pub fn admin_identifier(&self) -> &str {
        &self.admin_identifier
    }

    pub fn mode(&self) -> IdentityMode {
        self.provider.mode()
    }

    /// Check `secret` against the configured administrator account.
    pub async fn authenticate(&self, secret: &str) -> Result<AdminIdentity, AuthFailure> {
        match self
            .provider
            .verify_password(&self.admin_identifier, secret)
            .await
        {
            Ok(()) => {
                tracing::info!(identifier = %self.admin_identifier, "Admin login succeeded");
                Ok(AdminIdentity {
                    identifier: self.admin_identifier.clone(),
                })
            }
            Err(failure) => {
                tracing::warn!(
                    identifier = %self.admin_identifier,
                    reason = %failure,
                    "Admin login refused"
                );
                Err(failure)
            }
        }
    }
}
