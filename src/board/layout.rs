//! Deterministic tile namespace generation.
//!
//! The map is a hexagon of hexagons. Every tile outside the center belongs to
//! one of six sectors and is named by three letters: the sector, the ring
//! index within the sector and the step along that ring. A radius `r` map has
//! `6 * r(r+1)/2` sector tiles plus the center, `3r² + 3r + 1` in total.
//!
//! Hand-edited maps are expressed as substitutions applied after the generic
//! pass, then banner and relic tiles are tagged by name.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Tile, TileType};

/// Number of sectors around the center tile.
pub const SECTORS: u8 = 6;

/// Largest radius whose ring and step indices still fit in `A..=Z`.
pub const MAX_RADIUS: u8 = 26;

/// Error building the tile registry from a layout.
///
/// Any of these means the static map configuration is inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Radius is zero or too large to be named with single letters.
    #[error("invalid map radius {0} (expected 1..={MAX_RADIUS})")]
    InvalidRadius(u8),
    /// A center or substituted tile collides with an existing name.
    #[error("tile {0} is defined more than once")]
    DuplicateTile(String),
    /// A substitution removes a tile that was never generated.
    #[error("could not find tile {0} to substitute")]
    MissingSubstitutedTile(String),
    /// A banner name is not in the registry.
    #[error("could not find banner tile {0}")]
    UnknownBanner(String),
    /// A relic name is not in the registry.
    #[error("could not find relic tile {0}")]
    UnknownRelic(String),
    /// A name appears in both the banner and relic lists.
    #[error("tile {0} is listed as both banner and relic")]
    ConflictingTag(String),
}

/// Replace one generated tile with a hand-placed one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    /// Generated name to drop.
    pub remove: String,
    /// Name appended in its place.
    pub add: String,
}

/// Static description of the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapLayout {
    /// Hex-map radius in tiles.
    pub radius: u8,
    /// Name of the center tile.
    pub center: String,
    /// Substitutions applied after generation, in order.
    pub substitutions: Vec<Substitution>,
    /// Tiles tagged as banners.
    pub banners: Vec<String>,
    /// Tiles tagged as relics.
    pub relics: Vec<String>,
}

const DEFAULT_BANNER_SUFFIXES: [&str; 4] = ["CA", "AE", "EB", "BD"];
const DEFAULT_RELIC_SUFFIXES: [&str; 4] = ["AC", "DA", "BB", "FA"];

fn per_sector(suffixes: &[&str]) -> Vec<String> {
    (0..SECTORS)
        .flat_map(|sector| {
            suffixes
                .iter()
                .map(move |suffix| format!("{}{suffix}", letter(sector)))
        })
        .collect()
}

impl Default for MapLayout {
    fn default() -> Self {
        Self {
            radius: 7,
            center: "MRX".to_string(),
            substitutions: vec![Substitution {
                remove: "FAG".to_string(),
                add: "FAH".to_string(),
            }],
            banners: per_sector(&DEFAULT_BANNER_SUFFIXES),
            relics: per_sector(&DEFAULT_RELIC_SUFFIXES),
        }
    }
}

/// Letter for a zero-based index (`0 -> 'A'`).
fn letter(index: u8) -> char {
    char::from(b'A' + index)
}

/// Number of tiles a hexagon of the given radius holds, center included.
#[must_use]
pub const fn hex_tile_count(radius: u32) -> u32 {
    3 * radius * radius + 3 * radius + 1
}

/// Generate the sector tile names for a radius, without center or edits.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidRadius`] if the radius is zero or above
/// [`MAX_RADIUS`].
pub fn generate_names(radius: u8) -> Result<Vec<String>, LayoutError> {
    if radius == 0 || radius > MAX_RADIUS {
        return Err(LayoutError::InvalidRadius(radius));
    }

    let mut names = Vec::new();
    for sector in 0..SECTORS {
        for ring in 0..radius {
            for step in 0..radius - ring {
                names.push(format!("{}{}{}", letter(sector), letter(ring), letter(step)));
            }
        }
    }
    Ok(names)
}

impl MapLayout {
    /// Build every tile in registry order, tagged with its type.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] if the layout is internally inconsistent.
    pub fn build(&self) -> Result<Vec<Tile>, LayoutError> {
        let mut names = generate_names(self.radius)?;
        let mut known: HashSet<String> = names.iter().cloned().collect();

        let center = self.center.to_ascii_uppercase();
        if !known.insert(center.clone()) {
            return Err(LayoutError::DuplicateTile(center));
        }
        names.push(center);

        for substitution in &self.substitutions {
            let remove = substitution.remove.to_ascii_uppercase();
            let add = substitution.add.to_ascii_uppercase();
            if !known.remove(&remove) {
                return Err(LayoutError::MissingSubstitutedTile(remove));
            }
            names.retain(|name| *name != remove);
            if !known.insert(add.clone()) {
                return Err(LayoutError::DuplicateTile(add));
            }
            names.push(add);
        }

        let banners = canonical_set(&self.banners);
        let relics = canonical_set(&self.relics);
        if let Some(name) = self
            .banners
            .iter()
            .map(|name| name.to_ascii_uppercase())
            .find(|name| relics.contains(name))
        {
            return Err(LayoutError::ConflictingTag(name));
        }
        if let Some(name) = first_unknown(&self.banners, &known) {
            return Err(LayoutError::UnknownBanner(name));
        }
        if let Some(name) = first_unknown(&self.relics, &known) {
            return Err(LayoutError::UnknownRelic(name));
        }

        Ok(names
            .into_iter()
            .map(|name| {
                let tile_type = if banners.contains(&name) {
                    TileType::Banner
                } else if relics.contains(&name) {
                    TileType::Relic
                } else {
                    TileType::Blank
                };
                let mut tile = Tile::new(name);
                tile.tile_type = tile_type;
                tile
            })
            .collect())
    }
}

fn canonical_set(names: &[String]) -> HashSet<String> {
    names.iter().map(|name| name.to_ascii_uppercase()).collect()
}

fn first_unknown(names: &[String], known: &HashSet<String>) -> Option<String> {
    names
        .iter()
        .map(|name| name.to_ascii_uppercase())
        .find(|name| !known.contains(name))
}
