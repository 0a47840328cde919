//! Request extractors.
//!
//! - [`auth::AdminSession`] -- Requires a valid admin session token.

pub mod auth;
