//! Shared mutable state: the tile and user registries.

use std::collections::HashMap;

use crate::board::{LayoutError, MapLayout, Tile, User, UserId};
use crate::error::{ErrorKind, Rejection};

/// Everything the engine mutates.
///
/// Tiles are keyed by canonical upper-case name; `tile_names` keeps the
/// initialization order used for every listing.
#[derive(Debug, Clone)]
pub struct State {
    pub(crate) tiles: HashMap<String, Tile>,
    pub(crate) users: HashMap<UserId, User>,
    pub(crate) tile_names: Vec<String>,
}

impl State {
    /// Build a fresh state from a layout: all tiles neutral, no users.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] if the layout is inconsistent.
    pub fn new(layout: &MapLayout) -> Result<Self, LayoutError> {
        let tiles = layout.build()?;
        let tile_names = tiles.iter().map(|tile| tile.name.clone()).collect();
        let tiles = tiles
            .into_iter()
            .map(|tile| (tile.name.clone(), tile))
            .collect();

        Ok(Self {
            tiles,
            users: HashMap::new(),
            tile_names,
        })
    }

    /// Tile names in initialization order.
    #[must_use]
    pub fn tile_names(&self) -> &[String] {
        &self.tile_names
    }

    /// Iterate tiles in initialization order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tile_names
            .iter()
            .filter_map(|name| self.tiles.get(name))
    }

    /// Look up a tile by name, ignoring case.
    #[must_use]
    pub fn tile(&self, name: &str) -> Option<&Tile> {
        self.tiles.get(&canonical_name(name))
    }

    /// Number of tiles in the registry.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tile_names.len()
    }

    /// Look up a registered user.
    #[must_use]
    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    /// Number of registered users.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Resolve caller input to a canonical tile key.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::MissingParameter`] for an absent or blank name,
    /// [`ErrorKind::TileDoesNotExist`] for a name outside the registry.
    pub fn resolve(&self, name: Option<&str>) -> Result<String, Rejection> {
        let Some(raw) = name.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Err(Rejection::new(
                ErrorKind::MissingParameter,
                "❌ The `tile` parameter is required.",
            ));
        };

        let key = canonical_name(raw);
        if self.tiles.contains_key(&key) {
            Ok(key)
        } else {
            Err(Rejection::new(
                ErrorKind::TileDoesNotExist,
                format!("❌ Tile {raw} doesn't exist"),
            ))
        }
    }

    /// Display name of a registered user.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::InternalError`] if a tile references a user the registry
    /// does not know, which means the state is corrupt.
    pub fn display_name(&self, id: &str) -> Result<&str, Rejection> {
        self.users
            .get(id)
            .map(|user| user.display_name.as_str())
            .ok_or_else(|| {
                Rejection::new(
                    ErrorKind::InternalError,
                    format!("❌ Internal error: unknown user {id}"),
                )
            })
    }

    /// Record the acting user, refreshing the display name of a known id.
    pub(crate) fn register_user(&mut self, identity: &User) {
        self.users
            .entry(identity.id.clone())
            .and_modify(|user| user.display_name.clone_from(&identity.display_name))
            .or_insert_with(|| identity.clone());
    }

    pub(crate) fn tile_mut(&mut self, key: &str) -> Option<&mut Tile> {
        self.tiles.get_mut(key)
    }
}

/// Canonical form of a tile name.
#[must_use]
pub fn canonical_name(name: &str) -> String {
    name.trim().to_ascii_uppercase()
}
