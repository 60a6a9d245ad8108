//! Playable characters: each brings its own clip, fire rate and eye height.

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Static catalog entry for a playable character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: usize,
    pub name: String,
    /// Shots per second.
    pub fire_rate: f32,
    /// Clip capacity.
    pub max_ammo: u32,
    /// Seconds to refill the clip.
    pub reload_time: f32,
    /// Eye height above the platform floor; becomes the player's ground height.
    pub eye_height: f32,
    /// Theme colour (RGB, 0..1).
    pub color: [f32; 3],
    pub description: String,
}

impl Character {
    /// Minimum seconds between two shots.
    pub fn shot_interval(&self) -> f64 {
        1.0 / self.fire_rate as f64
    }
}

/// Ordered, immutable list of characters supplied at startup.
#[derive(Debug, Clone)]
pub struct CharacterCatalog {
    characters: Vec<Character>,
}

impl CharacterCatalog {
    /// Validate and wrap a list of characters.
    pub fn new(characters: Vec<Character>) -> Result<Self, CatalogError> {
        if characters.is_empty() {
            return Err(CatalogError::Empty);
        }
        for c in &characters {
            if c.fire_rate <= 0.0 || !c.fire_rate.is_finite() {
                return Err(CatalogError::BadFireRate(c.name.clone()));
            }
            if c.max_ammo == 0 {
                return Err(CatalogError::ZeroAmmo(c.name.clone()));
            }
            if c.reload_time < 0.0 || c.reload_time.is_nan() {
                return Err(CatalogError::BadReload(c.name.clone()));
            }
        }
        Ok(Self { characters })
    }

    /// The four cousins.
    pub fn builtin() -> Self {
        let entry = |id, name: &str, fire_rate, max_ammo, reload_time, eye_height, color, description: &str| {
            Character {
                id,
                name: name.to_string(),
                fire_rate,
                max_ammo,
                reload_time,
                eye_height,
                color,
                description: description.to_string(),
            }
        };
        Self {
            characters: vec![
                entry(0, "Dhruv", 3.0, 30, 2.0, 5.5, rgb(0xff6b9d), "Balanced - good for beginners"),
                entry(1, "Raghav", 6.0, 20, 2.5, 6.0, rgb(0xffd93d), "Fast fire rate, tall (easy aim)"),
                entry(2, "Keshav", 2.0, 40, 1.5, 5.0, rgb(0x6bcb77), "Lots of ammo, short (jump more)"),
                entry(3, "Puru", 5.0, 15, 3.0, 5.8, rgb(0x4d96ff), "Rapid fire, slightly tall"),
            ],
        }
    }

    /// Index actually used for `index`: out-of-range falls back to the first entry.
    pub fn resolve_index(&self, index: usize) -> usize {
        if index < self.characters.len() {
            index
        } else {
            log::warn!("character index {} out of range, using {}", index, self.characters[0].name);
            0
        }
    }

    /// Character at `index`, or the first entry when out of range.
    pub fn get(&self, index: usize) -> &Character {
        self.characters.get(index).unwrap_or(&self.characters[0])
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }
}

impl Default for CharacterCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// `0xRRGGBB` to linear-ish float RGB.
pub fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_builtin_has_four_distinct_characters() {
        let cat = CharacterCatalog::builtin();
        assert_eq!(cat.len(), 4);
        assert_eq!(cat.get(1).name, "Raghav");
        assert_eq!(cat.get(2).max_ammo, 40);
        assert!(cat.iter().enumerate().all(|(i, c)| c.id == i));
    }

    #[test]
    fn catalog_out_of_range_falls_back_to_first() {
        let cat = CharacterCatalog::builtin();
        assert_eq!(cat.get(99).id, 0);
        assert_eq!(cat.resolve_index(99), 0);
        assert_eq!(cat.resolve_index(3), 3);
    }

    #[test]
    fn catalog_rejects_invalid_entries() {
        assert_eq!(CharacterCatalog::new(Vec::new()).unwrap_err(), CatalogError::Empty);

        let mut bad = CharacterCatalog::builtin().get(0).clone();
        bad.fire_rate = 0.0;
        assert!(matches!(CharacterCatalog::new(vec![bad]), Err(CatalogError::BadFireRate(_))));

        let mut empty_clip = CharacterCatalog::builtin().get(0).clone();
        empty_clip.max_ammo = 0;
        assert!(matches!(CharacterCatalog::new(vec![empty_clip]), Err(CatalogError::ZeroAmmo(_))));
    }

    #[test]
    fn character_shot_interval_is_inverse_rate() {
        let cat = CharacterCatalog::builtin();
        assert!((cat.get(0).shot_interval() - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn rgb_splits_channels() {
        assert_eq!(rgb(0xff0000), [1.0, 0.0, 0.0]);
        assert_eq!(rgb(0x0000ff), [0.0, 0.0, 1.0]);
    }
}
