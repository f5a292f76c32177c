//! World state: layered object collections
//!
//! Two physics layers (level geometry + enemies, and the character layer
//! holding the player) plus two decorative layers that never enter
//! collision or integration. The designated player index is established by
//! the map loader and always resolves to a `Player` object.

use super::object::GameObject;
use crate::assets::PlayerSprites;

#[derive(Debug)]
pub struct World {
    /// Static geometry and enemies; participates in collision
    pub level: Vec<GameObject>,
    /// Controllable characters; currently only the player
    pub characters: Vec<GameObject>,
    /// Decorative, drawn behind the level
    pub background: Vec<GameObject>,
    /// Decorative, drawn in front of everything
    pub foreground: Vec<GameObject>,
    /// Per-state sprite selection for the player
    pub player_sprites: PlayerSprites,
    player_index: usize,
}

impl World {
    /// Assemble a world. `player_index` must point at a `Player` in
    /// `characters`; the map loader is the only construction path and
    /// guarantees this.
    pub fn new(
        level: Vec<GameObject>,
        characters: Vec<GameObject>,
        background: Vec<GameObject>,
        foreground: Vec<GameObject>,
        player_sprites: PlayerSprites,
        player_index: usize,
    ) -> Self {
        debug_assert!(
            characters
                .get(player_index)
                .is_some_and(|obj| obj.is_player()),
            "player index must resolve to a Player object"
        );
        Self {
            level,
            characters,
            background,
            foreground,
            player_sprites,
            player_index,
        }
    }

    pub fn player(&self) -> &GameObject {
        &self.characters[self.player_index]
    }

    pub fn player_mut(&mut self) -> &mut GameObject {
        &mut self.characters[self.player_index]
    }

    pub fn player_index(&self) -> usize {
        self.player_index
    }

    /// Number of objects participating in physics.
    pub fn physics_object_count(&self) -> usize {
        self.level.len() + self.characters.len()
    }
}
