//! Repository layer over the document store.

pub mod character_repo;

pub use character_repo::{CharacterBackend, CharacterRepo, DemoBackend, LiveBackend, StoreMode};
