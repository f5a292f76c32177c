//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Explicit `dt` passed in, no clock access
//! - Stable iteration order (layer order, then insertion order)
//! - No rendering or platform dependencies
//!
//! The frame delta is used as-is (no fixed-step accumulator), so results
//! are frame-rate dependent. That is inherited behavior, not an accident;
//! see `step`.

pub mod animation;
pub mod collision;
pub mod object;
pub mod rect;
pub mod step;
pub mod world;

pub use animation::Animation;
pub use collision::{ground_sensor, resolve_against, ResolvedAxis};
pub use object::{GameObject, ObjectKind, PlayerState};
pub use rect::Rect;
pub use step::{step, FrameInput};
pub use world::World;
