//! Texture handles and sprite lookup tables
//!
//! The simulation never owns pixel data. Textures live wherever the platform
//! glue keeps them; the core stores [`TextureId`] handles and looks up
//! dimensions here when it needs them (parallax wraparound, frame slicing).

use crate::sim::animation::Animation;

/// Opaque handle to a texture owned by the platform glue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u16);

/// Dimensions of one registered texture.
#[derive(Debug, Clone, Copy)]
pub struct TextureInfo {
    pub width: f32,
    pub height: f32,
}

/// Registry mapping [`TextureId`] to texture metadata.
///
/// Ids are handed out in registration order; the glue keeps its GPU-side
/// textures in a parallel list indexed the same way.
#[derive(Debug, Default)]
pub struct TextureStore {
    entries: Vec<TextureInfo>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture's dimensions, returning its handle.
    pub fn register(&mut self, width: f32, height: f32) -> TextureId {
        let id = TextureId(self.entries.len() as u16);
        self.entries.push(TextureInfo { width, height });
        id
    }

    /// Look up a registered texture. Unknown handles are a caller bug.
    pub fn info(&self, id: TextureId) -> Option<TextureInfo> {
        self.entries.get(id.0 as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A texture plus the animation that plays over it.
#[derive(Debug, Clone)]
pub struct SpriteSet {
    pub texture: TextureId,
    pub animation: Animation,
}

/// Index of the idle animation in the player's animation set.
pub const ANIM_IDLE: usize = 0;
/// Index of the run animation.
pub const ANIM_RUN: usize = 1;
/// Index of the jump animation.
pub const ANIM_JUMP: usize = 2;
/// Index of the slide animation.
pub const ANIM_SLIDE: usize = 3;

/// Per-state sprite selection for the player.
///
/// Selection is a pure function of player state, recomputed every frame;
/// see `sim::step`. The player's own animation set is built by
/// [`PlayerSprites::animations`] so the `ANIM_*` indices stay valid.
#[derive(Debug, Clone)]
pub struct PlayerSprites {
    pub idle: SpriteSet,
    pub run: SpriteSet,
    pub jump: SpriteSet,
    pub slide: SpriteSet,
}

impl PlayerSprites {
    /// The player's animation set, ordered to match the `ANIM_*` indices.
    /// Each object gets its own copy so the timers run independently.
    pub fn animations(&self) -> Vec<Animation> {
        vec![
            self.idle.animation.clone(),
            self.run.animation.clone(),
            self.jump.animation.clone(),
            self.slide.animation.clone(),
        ]
    }
}
