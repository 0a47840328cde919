//! Character entity and DTOs.
//!
//! The stored representation of a character is its field object without the
//! `id`: the key under which the record lives in the store *is* the id.
//! All JSON keys are camelCase (`imageUrl`).

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Store-assigned opaque record identifier.
pub type CharacterId = String;

/// A character profile as returned to readers.
///
/// `id` is absent only for records that were never persisted (e.g. a create
/// acknowledged by the demo backend).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CharacterId>,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub universe: String,
    pub abilities: String,
}

impl Character {
    /// Join a store key with the field object stored under it.
    pub fn from_stored(id: impl Into<CharacterId>, fields: CreateCharacter) -> Self {
        fields.into_character(Some(id.into()))
    }
}

/// DTO for creating a new character; also the on-the-wire stored shape.
///
/// Missing keys decode as empty strings so that loosely written records in
/// the store still load. Field presence is enforced by [`Validate`] at the
/// request boundary, not by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateCharacter {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[validate(url(message = "imageUrl must be a valid URL"))]
    pub image_url: String,
    #[validate(length(min = 1, message = "universe is required"))]
    pub universe: String,
    #[validate(length(min = 1, message = "abilities is required"))]
    pub abilities: String,
}

impl CreateCharacter {
    pub fn into_character(self, id: Option<CharacterId>) -> Character {
        Character {
            id,
            name: self.name,
            description: self.description,
            image_url: self.image_url,
            universe: self.universe,
            abilities: self.abilities,
        }
    }
}

/// DTO for a partial update. Only `Some` fields are serialized, so the
/// encoded value is exactly the merge patch sent to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCharacter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "imageUrl must be a valid URL"))]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "universe must not be empty"))]
    pub universe: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "abilities must not be empty"))]
    pub abilities: Option<String>,
}
