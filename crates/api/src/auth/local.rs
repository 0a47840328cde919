//! Identity provider for a single locally configured administrator.
//!
//! The account is an identifier plus an Argon2id PHC hash. Consecutive
//! failures lock the account for a while, after which attempts are refused
//! with [`AuthFailure::RateLimited`] until the lock expires.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use crate::auth::gate::{AuthFailure, IdentityMode, IdentityProvider};
use crate::auth::password::{is_valid_hash, verify_password};

/// Maximum consecutive failed login attempts before locking the account.
const MAX_FAILED_ATTEMPTS: u32 = 5;

/// Duration in minutes to lock an account after exceeding failed attempts.
const LOCK_DURATION_MINS: i64 = 15;

#[derive(Debug, Default)]
struct AttemptState {
    failed: u32,
    locked_until: Option<DateTime<Utc>>,
}

pub struct LocalIdentityProvider {
    identifier: String,
    password_hash: String,
    attempts: Mutex<AttemptState>,
}

impl LocalIdentityProvider {
    /// Returns `None` if `password_hash` is not a PHC string.
    pub fn new(identifier: impl Into<String>, password_hash: impl Into<String>) -> Option<Self> {
        let password_hash = password_hash.into();
        if !is_valid_hash(&password_hash) {
            return None;
        }
        Some(Self {
            identifier: identifier.into(),
            password_hash,
            attempts: Mutex::new(AttemptState::default()),
        })
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn verify_password(&self, identifier: &str, secret: &str) -> Result<(), AuthFailure> {
        if identifier != self.identifier {
            return Err(AuthFailure::UnknownAccount);
        }

        let mut attempts = self.attempts.lock().await;
        let now = Utc::now();
        if let Some(locked_until) = attempts.locked_until {
            if locked_until > now {
                return Err(AuthFailure::RateLimited);
            }
            attempts.locked_until = None;
        }

        let valid = verify_password(secret, &self.password_hash)
            .map_err(|e| AuthFailure::Unexpected(format!("password verification error: {e}")))?;

        if valid {
            attempts.failed = 0;
            return Ok(());
        }

        attempts.failed += 1;
        if attempts.failed >= MAX_FAILED_ATTEMPTS {
            attempts.failed = 0;
            attempts.locked_until = Some(now + Duration::minutes(LOCK_DURATION_MINS));
            tracing::warn!(identifier, "Admin account locked after repeated failures");
        }
        Err(AuthFailure::WrongPassword)
    }

    fn mode(&self) -> IdentityMode {
        IdentityMode::Local
    }
}
