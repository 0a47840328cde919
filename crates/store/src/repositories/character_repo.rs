//! Repository for character records.
//!
//! [`CharacterRepo`] applies the read/write failure policy on top of a
//! [`CharacterBackend`] chosen once at construction:
//!
//! - reads (`list`, `get_by_id`) fail open: store errors are logged and an
//!   empty list / `None` is returned;
//! - writes (`create`, `update`, `delete`) propagate every error.

use std::sync::Arc;

use async_trait::async_trait;
use codex_core::character::{Character, CreateCharacter, UpdateCharacter};
use codex_core::search::matches_name;
use serde::Serialize;

use crate::document::{child_path, DocumentStore, StoreError, CHARACTERS_PATH};
use crate::fixture::demo_characters;

/// Which kind of backend a repository was built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    /// Backed by a real document store.
    Live,
    /// Backed by the fixed demo dataset; writes are not persisted.
    Demo,
}

/// Raw record access without any failure policy.
#[async_trait]
pub trait CharacterBackend: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Character>, StoreError>;

    async fn fetch_one(&self, id: &str) -> Result<Option<Character>, StoreError>;

    async fn insert(&self, input: &CreateCharacter) -> Result<Character, StoreError>;

    async fn patch(&self, id: &str, input: &UpdateCharacter) -> Result<(), StoreError>;

    async fn remove(&self, id: &str) -> Result<(), StoreError>;

    fn mode(&self) -> StoreMode;

    /// Adapter name for logs and health output.
    fn kind(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// Live backend
// ---------------------------------------------------------------------------

/// Characters stored as children of `characters/` in a [`DocumentStore`].
pub struct LiveBackend {
    store: Arc<dyn DocumentStore>,
}

impl LiveBackend {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CharacterBackend for LiveBackend {
    async fn fetch_all(&self) -> Result<Vec<Character>, StoreError> {
        let children = self.store.list_children(CHARACTERS_PATH).await?;

        let mut characters = Vec::with_capacity(children.len());
        for (key, value) in children {
            match serde_json::from_value::<CreateCharacter>(value) {
                Ok(fields) => characters.push(Character::from_stored(key, fields)),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Skipping malformed character record");
                }
            }
        }
        Ok(characters)
    }

    async fn fetch_one(&self, id: &str) -> Result<Option<Character>, StoreError> {
        let path = child_path(CHARACTERS_PATH, id)?;
        match self.store.read(&path).await? {
            Some(value) => {
                let fields: CreateCharacter = serde_json::from_value(value)?;
                Ok(Some(Character::from_stored(id, fields)))
            }
            None => Ok(None),
        }
    }

    async fn insert(&self, input: &CreateCharacter) -> Result<Character, StoreError> {
        let value = serde_json::to_value(input)?;
        let key = self.store.write_new(CHARACTERS_PATH, value).await?;
        Ok(input.clone().into_character(Some(key)))
    }

    async fn patch(&self, id: &str, input: &UpdateCharacter) -> Result<(), StoreError> {
        let path = child_path(CHARACTERS_PATH, id)?;
        // The store would create the node on merge; updates must not.
        if self.store.read(&path).await?.is_none() {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
        self.store.merge(&path, serde_json::to_value(input)?).await
    }

    async fn remove(&self, id: &str) -> Result<(), StoreError> {
        let path = child_path(CHARACTERS_PATH, id)?;
        self.store.delete(&path).await
    }

    fn mode(&self) -> StoreMode {
        StoreMode::Live
    }

    fn kind(&self) -> &'static str {
        self.store.kind()
    }
}

// ---------------------------------------------------------------------------
// Demo backend
// ---------------------------------------------------------------------------

/// Serves the fixed demo dataset. Writes are acknowledged and discarded.
pub struct DemoBackend {
    characters: Vec<Character>,
}

impl DemoBackend {
    pub fn new() -> Self {
        Self {
            characters: demo_characters(),
        }
    }
}

impl Default for DemoBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CharacterBackend for DemoBackend {
    async fn fetch_all(&self) -> Result<Vec<Character>, StoreError> {
        Ok(self.characters.clone())
    }

    async fn fetch_one(&self, id: &str) -> Result<Option<Character>, StoreError> {
        Ok(self
            .characters
            .iter()
            .find(|c| c.id.as_deref() == Some(id))
            .cloned())
    }

    async fn insert(&self, input: &CreateCharacter) -> Result<Character, StoreError> {
        tracing::info!(name = %input.name, "Demo mode: character create acknowledged, not persisted");
        Ok(input.clone().into_character(None))
    }

    async fn patch(&self, id: &str, _input: &UpdateCharacter) -> Result<(), StoreError> {
        tracing::info!(id, "Demo mode: character update acknowledged, not persisted");
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), StoreError> {
        tracing::info!(id, "Demo mode: character delete acknowledged, not persisted");
        Ok(())
    }

    fn mode(&self) -> StoreMode {
        StoreMode::Demo
    }

    fn kind(&self) -> &'static str {
        "demo"
    }
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

/// Character CRUD with the fail-open read / strict write policy.
///
/// Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct CharacterRepo {
    backend: Arc<dyn CharacterBackend>,
}

impl CharacterRepo {
    pub fn new(backend: Arc<dyn CharacterBackend>) -> Self {
        Self { backend }
    }

    /// Repository over a live document store.
    pub fn live(store: Arc<dyn DocumentStore>) -> Self {
        Self::new(Arc::new(LiveBackend::new(store)))
    }

    /// Repository over the demo dataset.
    pub fn demo() -> Self {
        Self::new(Arc::new(DemoBackend::new()))
    }

    pub fn mode(&self) -> StoreMode {
        self.backend.mode()
    }

    pub fn kind(&self) -> &'static str {
        self.backend.kind()
    }

    /// All characters, or those whose name contains `query` (ignoring case)
    /// when `query` is non-empty. Returns an empty list if the store fails.
    pub async fn list(&self, query: &str) -> Vec<Character> {
        match self.backend.fetch_all().await {
            Ok(mut characters) => {
                if !query.is_empty() {
                    characters.retain(|c| matches_name(c, query));
                }
                characters
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching characters");
                Vec::new()
            }
        }
    }

    /// The character stored under `id`, or `None` when it is missing,
    /// the id is malformed, or the store fails.
    pub async fn get_by_id(&self, id: &str) -> Option<Character> {
        match self.backend.fetch_one(id).await {
            Ok(character) => character,
            Err(StoreError::InvalidKey(key)) => {
                tracing::debug!(key = %key, "Lookup with malformed character id");
                None
            }
            Err(e) => {
                tracing::error!(id, error = %e, "Error fetching character");
                None
            }
        }
    }

    /// Persist a new character and return it with its generated id.
    pub async fn create(&self, input: &CreateCharacter) -> Result<Character, StoreError> {
        let character = self.backend.insert(input).await.inspect_err(|e| {
            tracing::error!(error = %e, "Error adding character");
        })?;
        tracing::info!(id = ?character.id, name = %character.name, "Character created");
        Ok(character)
    }

    /// Merge the present fields of `input` into the character at `id`.
    ///
    /// Fails with [`StoreError::NotFound`] when no such character exists.
    pub async fn update(&self, id: &str, input: &UpdateCharacter) -> Result<(), StoreError> {
        self.backend.patch(id, input).await.inspect_err(|e| {
            tracing::error!(id, error = %e, "Error updating character");
        })?;
        tracing::info!(id, "Character updated");
        Ok(())
    }

    /// Permanently remove the character at `id`. Deleting an id that does
    /// not exist succeeds.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.backend.remove(id).await.inspect_err(|e| {
            tracing::error!(id, error = %e, "Error deleting character");
        })?;
        tracing::info!(id, "Character deleted");
        Ok(())
    }
}
