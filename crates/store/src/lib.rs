//! Character record store.
//!
//! - [`document`] -- the hierarchical document-store trait and its errors.
//! - [`rtdb`] -- REST adapter for the hosted realtime database.
//! - [`memory`] -- in-process adapter for development and tests.
//! - [`repositories`] -- [`CharacterRepo`] with its live and demo backends.

pub mod document;
pub mod fixture;
pub mod memory;
pub mod repositories;
pub mod rtdb;

pub use document::{DocumentStore, StoreError};
pub use repositories::{CharacterRepo, StoreMode};
