//! Admin authentication: the Identity Gate, its providers, and session tokens.

pub mod gate;
pub mod identity_toolkit;
pub mod jwt;
pub mod local;
pub mod password;
