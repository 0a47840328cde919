//! User-facing text for refused logins.
//!
//! Kept apart from [`AuthFailure`] so the gate stays free of presentation
//! concerns.

use crate::auth::gate::{AuthFailure, DEMO_SECRET};

/// Human-readable explanation of a refused login.
pub fn auth_failure_message(failure: &AuthFailure, admin_identifier: &str) -> String {
    match failure {
        AuthFailure::UnknownAccount => format!(
            "No account \"{admin_identifier}\" was found or the password is wrong. \
             Make sure this account exists with the identity provider."
        ),
        AuthFailure::WrongPassword => "Wrong password.".to_string(),
        AuthFailure::RateLimited => {
            "Too many failed attempts. Please wait before trying again.".to_string()
        }
        AuthFailure::DemoSecretRejected => {
            format!("Demo mode: use \"{DEMO_SECRET}\" as the password.")
        }
        AuthFailure::Unexpected(detail) => format!("Unexpected error: {detail}"),
    }
}

/// Stable machine-readable code for a refused login.
pub fn auth_failure_code(failure: &AuthFailure) -> &'static str {
    match failure {
        AuthFailure::UnknownAccount => "UNKNOWN_ACCOUNT",
        AuthFailure::WrongPassword => "WRONG_PASSWORD",
        AuthFailure::RateLimited => "RATE_LIMITED",
        AuthFailure::DemoSecretRejected => "DEMO_SECRET_REJECTED",
        AuthFailure::Unexpected(_) => "IDENTITY_PROVIDER_ERROR",
    }
}
