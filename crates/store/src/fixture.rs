//! Fixed sample dataset served in demo mode.

use codex_core::character::{Character, CreateCharacter};

/// The four demo records, ids `"1"` to `"4"`.
pub fn demo_characters() -> Vec<Character> {
    [
        (
            "1",
            "Harry Potter",
            "Harry Potter",
            "The boy who lived.",
            "https://picsum.photos/400/600",
            "Parseltongue, Flying, Defence Against the Dark Arts",
        ),
        (
            "2",
            "Iron Man",
            "Marvel",
            "Billionaire, playboy, philanthropist.",
            "https://picsum.photos/401/600",
            "Genius intellect, Powered armour",
        ),
        (
            "3",
            "Gandalf",
            "The Lord of the Rings",
            "Guardian of Middle-earth.",
            "https://picsum.photos/402/600",
            "Wizardry, Wisdom, Swordsmanship",
        ),
        (
            "4",
            "Yoda",
            "Star Wars",
            "Legendary Jedi Master.",
            "https://picsum.photos/403/600",
            "The Force, Lightsaber combat, Wisdom",
        ),
    ]
    .into_iter()
    .map(|(id, name, universe, description, image_url, abilities)| {
        Character::from_stored(
            id,
            CreateCharacter {
                name: name.into(),
                description: description.into(),
                image_url: image_url.into(),
                universe: universe.into(),
                abilities: abilities.into(),
            },
        )
    })
    .collect()
}
