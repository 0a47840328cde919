//! Name search and display ordering over an in-memory character list.
//!
//! Matching is plain case-insensitive substring containment on `name`: no
//! ranking, tokenization or fuzzy matching. Callers own the list; nothing
//! here holds state between queries.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::character::Character;

/// Whether `character.name` contains `query`, ignoring case.
///
/// An empty query matches every character; [`filter_by_name`] handles the
/// empty-query case itself before reaching this predicate.
pub fn matches_name(character: &Character, query: &str) -> bool {
    character
        .name
        .to_lowercase()
        .contains(&query.to_lowercase())
}

/// Search `characters` by name, preserving input order.
///
/// An empty or whitespace-only query yields no results. The gallery shows
/// its featured view in that state rather than the full list.
///
/// # Examples
///
/// ```
/// use codex_core::character::CreateCharacter;
/// use codex_core::search::filter_by_name;
///
/// let yoda = CreateCharacter { name: "Yoda".into(), ..Default::default() }.into_character(None);
/// let list = vec![yoda];
/// assert_eq!(filter_by_name(&list, "YO").len(), 1);
/// assert!(filter_by_name(&list, "  ").is_empty());
/// ```
pub fn filter_by_name<'a>(characters: &'a [Character], query: &str) -> Vec<&'a Character> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    characters
        .iter()
        .filter(|c| matches_name(c, query))
        .collect()
}

/// Shuffle a full listing for the featured view.
pub fn shuffle_for_display<R: Rng + ?Sized>(
    mut characters: Vec<Character>,
    rng: &mut R,
) -> Vec<Character> {
    characters.shuffle(rng);
    characters
}
