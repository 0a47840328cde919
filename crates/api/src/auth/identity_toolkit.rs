//! Remote password sign-in against an Identity Toolkit compatible endpoint.
//!
//! `POST {endpoint}/v1/accounts:signInWithPassword?key={api_key}` with
//! `{ email, password, returnSecureToken }`. Failures come back as
//! `{ "error": { "message": "<CODE>[ : detail]" } }` and are classified into
//! [`AuthFailure`] by [`classify_error_code`].

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::auth::gate::{AuthFailure, IdentityMode, IdentityProvider};

/// Default public endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://identitytoolkit.googleapis.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct IdentityToolkitProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl IdentityToolkitProvider {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self::with_client(client, endpoint, api_key))
    }

    pub fn with_client(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn sign_in_url(&self) -> String {
        format!("{}/v1/accounts:signInWithPassword", self.endpoint)
    }
}

#[async_trait]
impl IdentityProvider for IdentityToolkitProvider {
    async fn verify_password(&self, identifier: &str, secret: &str) -> Result<(), AuthFailure> {
        let response = self
            .client
            .post(self.sign_in_url())
            .query(&[("key", self.api_key.as_str())])
            .json(&SignInRequest {
                email: identifier,
                password: secret,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Identity provider unreachable");
                AuthFailure::Unexpected(e.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(envelope) => Err(classify_error_code(&envelope.error.message)),
            Err(_) => {
                tracing::warn!(status = status.as_u16(), %body, "Unrecognised identity provider response");
                Err(AuthFailure::Unexpected(format!(
                    "identity provider returned {status}"
                )))
            }
        }
    }

    fn mode(&self) -> IdentityMode {
        IdentityMode::Remote
    }
}

/// Map a provider error message to an [`AuthFailure`].
///
/// Only the leading code is significant; messages such as
/// `TOO_MANY_ATTEMPTS_TRY_LATER : Access to this account has been temporarily
/// disabled` carry free text after it.
pub fn classify_error_code(message: &str) -> AuthFailure {
    let code = message
        .split([' ', ':'])
        .find(|part| !part.is_empty())
        .unwrap_or_default();

    match code {
        "EMAIL_NOT_FOUND" | "INVALID_EMAIL" | "INVALID_LOGIN_CREDENTIALS" => {
            AuthFailure::UnknownAccount
        }
        "INVALID_PASSWORD" => AuthFailure::WrongPassword,
        c if c.starts_with("TOO_MANY_ATTEMPTS_TRY_LATER") => AuthFailure::RateLimited,
        _ => AuthFailure::Unexpected(message.to_string()),
    }
}
