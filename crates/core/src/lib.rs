//! Domain model and pure logic for the character codex.
//!
//! Zero internal dependencies so the store, the API and any future tooling
//! share one definition of a character and one search behaviour.

pub mod character;
pub mod error;
pub mod search;
