use crate::auth::identity_toolkit::DEFAULT_ENDPOINT;
use crate::auth::jwt::JwtConfig;

/// Default administrator identifier.
const DEFAULT_ADMIN_EMAIL: &str = "admin@codex.local";

/// Where character records live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// Fixed demo dataset; writes are accepted but not persisted.
    Demo,
    /// In-process document store, lost on restart.
    Memory,
    /// Hosted realtime database reached over REST.
    Remote {
        url: String,
        auth_token: Option<String>,
    },
}

/// How the Identity Gate verifies the admin password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityConfig {
    /// Only the literal demo secret is accepted.
    Demo,
    /// Argon2id PHC hash held in configuration.
    Local { password_hash: String },
    /// Remote password sign-in.
    Remote { api_key: String, endpoint: String },
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development. With
/// nothing configured the server runs entirely in demo mode.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// The single administrator account the Identity Gate checks.
    pub admin_identifier: String,
    pub store: StoreConfig,
    pub identity: IdentityConfig,
    /// JWT token configuration (secret, session lifetime).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                  |
    /// |------------------------|------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                |
    /// | `PORT`                 | `3000`                                   |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`                  |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                     |
    /// | `DEMO_MODE`            | `false`                                  |
    /// | `STORE_URL`            | unset (demo dataset)                     |
    /// | `STORE_AUTH_TOKEN`     | unset                                    |
    /// | `ADMIN_EMAIL`          | `admin@codex.local`                      |
    /// | `IDENTITY_API_KEY`     | unset                                    |
    /// | `IDENTITY_ENDPOINT`    | `https://identitytoolkit.googleapis.com` |
    /// | `ADMIN_PASSWORD_HASH`  | unset                                    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let demo_mode = env_opt("DEMO_MODE").is_some_and(|v| parse_flag(&v));

        let admin_identifier =
            env_opt("ADMIN_EMAIL").unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string());

        let store = store_config(
            demo_mode,
            env_opt("STORE_URL"),
            env_opt("STORE_AUTH_TOKEN"),
        );

        let identity = identity_config(
            demo_mode,
            env_opt("IDENTITY_API_KEY"),
            env_opt("IDENTITY_ENDPOINT"),
            env_opt("ADMIN_PASSWORD_HASH"),
        );

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            admin_identifier,
            store,
            identity,
            jwt,
        }
    }
}

/// A set, non-blank environment variable.
fn env_opt(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Pick the record store. No `STORE_URL` means demo.
fn store_config(
    demo_mode: bool,
    store_url: Option<String>,
    auth_token: Option<String>,
) -> StoreConfig {
    match store_url {
        _ if demo_mode => StoreConfig::Demo,
        None => StoreConfig::Demo,
        Some(url) if url.eq_ignore_ascii_case("memory") => StoreConfig::Memory,
        Some(url) => StoreConfig::Remote { url, auth_token },
    }
}

/// Pick the identity provider. A remote API key wins over a local hash;
/// with neither the gate runs in demo mode.
fn identity_config(
    demo_mode: bool,
    api_key: Option<String>,
    endpoint: Option<String>,
    password_hash: Option<String>,
) -> IdentityConfig {
    if demo_mode {
        return IdentityConfig::Demo;
    }
    match (api_key, password_hash) {
        (Some(api_key), _) => IdentityConfig::Remote {
            api_key,
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        },
        (None, Some(password_hash)) => IdentityConfig::Local { password_hash },
        (None, None) => IdentityConfig::Demo,
    }
}
