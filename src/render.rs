//! Pure frame composition
//!
//! The simulation never draws. This module reads final world state and
//! produces an ordered draw-command list plus debug text lines; the
//! platform glue executes them. Layer order: parallax background, background
//! tiles, level objects, characters, foreground tiles.

use crate::assets::{TextureId, TextureStore};
use crate::sim::object::GameObject;
use crate::sim::rect::Rect;
use crate::sim::world::World;

/// One sprite blit: slice `src` out of `texture`, draw at `dst`, optionally
/// mirrored horizontally.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub texture: TextureId,
    pub src: Rect,
    pub dst: Rect,
    pub flip_x: bool,
}

/// Horizontal scroll state for one parallax background layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallaxScroll {
    offset: f32,
}

impl ParallaxScroll {
    /// Advance opposite to the player's motion at `factor` of its speed,
    /// wrapping modulo the layer texture's width.
    pub fn advance(&mut self, player_vel_x: f32, factor: f32, dt: f32, texture_width: f32) {
        self.offset -= player_vel_x * factor * dt;
        if texture_width > 0.0 {
            self.offset = self.offset.rem_euclid(texture_width);
        }
    }

    /// Current wrapped offset, in `[0, texture_width)`.
    pub fn offset(&self) -> f32 {
        self.offset
    }
}

/// A parallax layer bound to its scroll state.
#[derive(Debug, Clone, Copy)]
pub struct ParallaxLayer {
    pub texture: TextureId,
    pub scroll: ParallaxScroll,
}

/// Compose the full frame as an ordered command list.
pub fn compose_frame(
    world: &World,
    store: &TextureStore,
    parallax: &[ParallaxLayer],
) -> Vec<DrawCommand> {
    let mut commands = Vec::new();

    for layer in parallax {
        if let Some(info) = store.info(layer.texture) {
            let src = Rect::new(0.0, 0.0, info.width, info.height);
            // Two copies so the wrap seam is always covered
            let offset = layer.scroll.offset();
            for x in [offset - info.width, offset] {
                commands.push(DrawCommand {
                    texture: layer.texture,
                    src,
                    dst: Rect::new(x, 0.0, info.width, info.height),
                    flip_x: false,
                });
            }
        }
    }

    let layers = [
        &world.background,
        &world.level,
        &world.characters,
        &world.foreground,
    ];
    for layer in layers {
        for obj in layer.iter() {
            if let Some(cmd) = sprite_command(obj, store) {
                commands.push(cmd);
            }
        }
    }

    commands
}

/// The blit for one object: the current animation frame sliced out of its
/// sprite strip, drawn at the object's position, flipped when facing left.
fn sprite_command(obj: &GameObject, store: &TextureStore) -> Option<DrawCommand> {
    let info = store.info(obj.texture)?;
    let frames = obj
        .current_animation
        .and_then(|index| obj.animations.get(index))
        .map(|anim| anim.frame_count())
        .unwrap_or(1)
        .max(1);
    let frame_w = info.width / frames as f32;
    let src = Rect::new(obj.display_frame() as f32 * frame_w, 0.0, frame_w, info.height);
    let dst = Rect::new(obj.position.x, obj.position.y, frame_w, info.height);
    Some(DrawCommand {
        texture: obj.texture,
        src,
        dst,
        flip_x: obj.direction < 0.0,
    })
}

/// Debug overlay text, one entry per line.
pub fn debug_lines(world: &World) -> Vec<String> {
    let player = world.player();
    let state = match player.player_state() {
        Some(state) => format!("{state:?}"),
        None => "-".to_string(),
    };
    vec![
        format!("state: {state}"),
        format!(
            "vel: ({:.1}, {:.1})  dir: {:+.0}",
            player.velocity.x, player.velocity.y, player.direction
        ),
        format!("grounded: {}", player.grounded),
    ]
}
