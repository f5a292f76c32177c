//! Game object model
//!
//! Every entity in the world is one [`GameObject`]: the player, an enemy,
//! or a piece of static level geometry. Variant-specific behavior hangs off
//! [`ObjectKind`]; everything else (transform, kinematics, collider,
//! animation, texture handle) is shared.

use glam::Vec2;

use super::animation::Animation;
use super::rect::Rect;
use crate::assets::TextureId;

/// Player movement state. Enemy and Level objects carry no state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Running,
    Jumping,
}

/// Variant discriminant plus per-variant payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Player { state: PlayerState },
    Enemy,
    Level,
}

/// One entity in the world.
#[derive(Debug, Clone)]
pub struct GameObject {
    pub kind: ObjectKind,
    /// Top-left world position
    pub position: Vec2,
    /// World units per second
    pub velocity: Vec2,
    /// World units per second squared (input-driven, x only for the player)
    pub acceleration: Vec2,
    /// Last nonzero horizontal input direction, ±1; doubles as sprite flip
    pub direction: f32,
    /// Horizontal speed clamp
    pub max_speed_x: f32,
    /// Whether gravity and integration apply
    pub dynamic: bool,
    /// Result of the previous ground-sensor check
    pub grounded: bool,
    /// Collision rectangle, object-local (offset from `position` + size)
    pub collider: Rect,
    /// Animation set; the active one is indexed by `current_animation`
    pub animations: Vec<Animation>,
    pub current_animation: Option<usize>,
    /// Weak handle into the texture registry
    pub texture: TextureId,
}

impl GameObject {
    /// A static level tile: solid, non-dynamic, identity animation state.
    pub fn level_tile(position: Vec2, collider: Rect, texture: TextureId) -> Self {
        Self {
            kind: ObjectKind::Level,
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            direction: 1.0,
            max_speed_x: 0.0,
            dynamic: false,
            grounded: false,
            collider,
            animations: Vec::new(),
            current_animation: None,
            texture,
        }
    }

    /// A decorative object: drawn, never simulated or collided.
    pub fn decoration(position: Vec2, texture: TextureId) -> Self {
        Self::level_tile(position, Rect::new(0.0, 0.0, 0.0, 0.0), texture)
    }

    /// Absolute collider rectangle at the object's current position.
    #[inline]
    pub fn aabb(&self) -> Rect {
        self.collider.translated(self.position)
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, ObjectKind::Player { .. })
    }

    pub fn is_level(&self) -> bool {
        matches!(self.kind, ObjectKind::Level)
    }

    pub fn player_state(&self) -> Option<PlayerState> {
        match self.kind {
            ObjectKind::Player { state } => Some(state),
            _ => None,
        }
    }

    pub fn set_player_state(&mut self, new_state: PlayerState) {
        if let ObjectKind::Player { ref mut state } = self.kind {
            *state = new_state;
        }
    }

    /// Advance the active animation, if any.
    pub fn step_animation(&mut self, dt: f32) {
        if let Some(index) = self.current_animation {
            if let Some(anim) = self.animations.get_mut(index) {
                anim.step(dt);
            }
        }
    }

    /// Current display frame of the active animation (0 when none).
    pub fn display_frame(&self) -> u32 {
        self.current_animation
            .and_then(|index| self.animations.get(index))
            .map(|anim| anim.current_frame())
            .unwrap_or(0)
    }
}
