//! Per-frame update pipeline
//!
//! Order of operations is fixed and significant: gravity, input and state
//! machine, position integration, collision resolution, ground sensor,
//! sprite selection, animation. `dt` is the raw frame delta in seconds;
//! there is no fixed-step accumulator, so physics results vary with frame
//! rate.

use super::collision::{ground_sensor, resolve_against};
use super::object::{GameObject, ObjectKind, PlayerState};
use super::rect::Rect;
use super::world::World;
use crate::assets::{self, PlayerSprites};
use crate::tuning::Tuning;

/// Input sampled once per frame by the platform glue.
///
/// `left`/`right` are held-key state; `jump_pressed` is edge-triggered
/// (down this frame). Holding both directions cancels to zero input.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub jump_pressed: bool,
}

impl FrameInput {
    /// Horizontal input direction: -1, 0 or +1.
    pub fn horizontal(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// One obstacle snapshot for the collision and ground-sensor passes.
struct Obstacle {
    rect: Rect,
    /// Only Level geometry is resolved against; everything overlapping
    /// still counts as standing support.
    solid: bool,
}

/// Advance the whole world by one frame.
pub fn step(world: &mut World, input: &FrameInput, tuning: &Tuning, dt: f32) {
    // Obstacles are snapshotted up front: nothing but the player moves
    // during the pass, and the player is excluded from its own list.
    let obstacles: Vec<Obstacle> = world
        .level
        .iter()
        .map(|obj| Obstacle {
            rect: obj.aabb(),
            solid: obj.is_level(),
        })
        .chain(
            world
                .characters
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != world.player_index())
                .map(|(_, obj)| Obstacle {
                    rect: obj.aabb(),
                    solid: false,
                }),
        )
        .collect();

    // Level layer: gravity and integration for any dynamic object, then
    // animation. No input, no resolution (only the player is resolved).
    for obj in &mut world.level {
        if obj.dynamic {
            obj.velocity.y += tuning.gravity * dt;
            obj.position += obj.velocity * dt;
        }
        obj.step_animation(dt);
    }

    let sprites = world.player_sprites.clone();
    update_player(world.player_mut(), &sprites, input, tuning, &obstacles, dt);

    // Decorations animate but never simulate.
    for obj in world.background.iter_mut().chain(world.foreground.iter_mut()) {
        obj.step_animation(dt);
    }
}

fn update_player(
    player: &mut GameObject,
    sprites: &PlayerSprites,
    input: &FrameInput,
    tuning: &Tuning,
    obstacles: &[Obstacle],
    dt: f32,
) {
    // 1. Gravity
    if player.dynamic {
        player.velocity.y += tuning.gravity * dt;
    }

    // 2. Input, state machine, horizontal acceleration
    let input_dir = input.horizontal();
    if input_dir != 0.0 {
        player.direction = input_dir;
    }

    let state = match player.kind {
        ObjectKind::Player { state } => state,
        _ => return,
    };
    match state {
        PlayerState::Idle => {
            if input_dir != 0.0 {
                player.set_player_state(PlayerState::Running);
            } else if player.velocity.x != 0.0 {
                // Decelerate toward zero, clamping so the step never
                // crosses it
                let decel = player.acceleration.x * dt;
                if decel >= player.velocity.x.abs() {
                    player.velocity.x = 0.0;
                } else {
                    player.velocity.x -= decel * player.velocity.x.signum();
                }
            }
        }
        PlayerState::Running => {
            if input_dir == 0.0 {
                player.set_player_state(PlayerState::Idle);
            }
        }
        // Left only by the ground sensor's false->true transition below
        PlayerState::Jumping => {}
    }

    if input.jump_pressed && player.grounded && state != PlayerState::Jumping {
        player.velocity.y += tuning.jump_impulse;
        player.set_player_state(PlayerState::Jumping);
    }

    player.velocity.x += player.acceleration.x * input_dir * dt;
    if input_dir != 0.0 && player.velocity.x.abs() > player.max_speed_x {
        player.velocity.x = player.max_speed_x * input_dir;
    }

    // 3. Integrate position
    player.position += player.velocity * dt;

    // 4. Collision pass, brute-force against every solid obstacle
    for obstacle in obstacles.iter().filter(|o| o.solid) {
        resolve_against(
            &mut player.position,
            &mut player.velocity,
            &player.collider,
            &obstacle.rect,
        );
    }

    // 5. Ground sensor; landing forces Running no matter how Jumping was
    // entered
    let was_grounded = player.grounded;
    player.grounded = ground_sensor(&player.aabb(), obstacles.iter().map(|o| &o.rect));
    if player.grounded && !was_grounded {
        player.set_player_state(PlayerState::Running);
    }

    // 6. Sprite selection is a pure function of the final state. The slide
    // sprite is a rendering-only sub-state: grounded and moving against
    // the facing direction.
    let state = match player.kind {
        ObjectKind::Player { state } => state,
        _ => return,
    };
    let sliding =
        state == PlayerState::Running && player.grounded && player.velocity.x * player.direction < 0.0;
    let (texture, anim_index) = match (state, sliding) {
        (PlayerState::Idle, _) => (sprites.idle.texture, assets::ANIM_IDLE),
        (PlayerState::Running, false) => (sprites.run.texture, assets::ANIM_RUN),
        (PlayerState::Running, true) => (sprites.slide.texture, assets::ANIM_SLIDE),
        (PlayerState::Jumping, _) => (sprites.jump.texture, assets::ANIM_JUMP),
    };
    player.texture = texture;
    player.current_animation = Some(anim_index);

    // 7. Animation
    player.step_animation(dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{SpriteSet, TextureId};
    use crate::sim::animation::Animation;
    use glam::Vec2;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn sprites() -> PlayerSprites {
        PlayerSprites {
            idle: SpriteSet {
                texture: TextureId(0),
                animation: Animation::new(4, 0.8),
            },
            run: SpriteSet {
                texture: TextureId(1),
                animation: Animation::new(6, 0.5),
            },
            jump: SpriteSet {
                texture: TextureId(2),
                animation: Animation::new(1, 0.5),
            },
            slide: SpriteSet {
                texture: TextureId(3),
                animation: Animation::new(1, 0.5),
            },
        }
    }

    fn test_player(position: Vec2) -> GameObject {
        let sp = sprites();
        GameObject {
            kind: ObjectKind::Player {
                state: PlayerState::Idle,
            },
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::new(300.0, 0.0),
            direction: 1.0,
            max_speed_x: 100.0,
            dynamic: true,
            grounded: false,
            collider: Rect::new(0.0, 0.0, 10.0, 30.0),
            animations: sp.animations(),
            current_animation: Some(assets::ANIM_IDLE),
            texture: TextureId(0),
        }
    }

    fn world_with_tiles(player: GameObject, tile_positions: &[Vec2]) -> World {
        let level = tile_positions
            .iter()
            .map(|&pos| {
                GameObject::level_tile(pos, Rect::new(0.0, 0.0, 32.0, 32.0), TextureId(4))
            })
            .collect();
        World::new(level, vec![player], Vec::new(), Vec::new(), sprites(), 0)
    }

    fn hold_right() -> FrameInput {
        FrameInput {
            right: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_sustained_input_converges_to_max_speed() {
        let mut world = world_with_tiles(test_player(Vec2::ZERO), &[]);
        let input = hold_right();
        for _ in 0..60 {
            step(&mut world, &input, &Tuning::default(), DT);
            assert!(world.player().velocity.x.abs() <= 100.0 + 1e-4);
        }
        assert_eq!(world.player().velocity.x, 100.0);
        // Euler sum: ramp for ~20 frames, then max speed for the rest
        let x = world.player().position.x;
        assert!(x > 80.0 && x < 90.0, "position.x = {x}");
        assert_eq!(world.player().player_state(), Some(PlayerState::Running));
    }

    #[test]
    fn test_deceleration_reaches_exact_zero_without_overshoot() {
        let mut player = test_player(Vec2::ZERO);
        player.velocity.x = 37.0;
        let mut world = world_with_tiles(player, &[]);
        let input = FrameInput::default();

        let mut previous = world.player().velocity.x.abs();
        for _ in 0..20 {
            step(&mut world, &input, &Tuning::default(), DT);
            let speed = world.player().velocity.x.abs();
            assert!(speed <= previous, "speed increased while idle");
            previous = speed;
        }
        assert_eq!(world.player().velocity.x, 0.0);

        // And it holds there
        step(&mut world, &input, &Tuning::default(), DT);
        assert_eq!(world.player().velocity.x, 0.0);
    }

    #[test]
    fn test_both_directions_cancel_to_idle() {
        let mut world = world_with_tiles(test_player(Vec2::ZERO), &[]);
        let input = FrameInput {
            left: true,
            right: true,
            ..Default::default()
        };
        step(&mut world, &input, &Tuning::default(), DT);
        assert_eq!(world.player().velocity.x, 0.0);
        assert_eq!(world.player().player_state(), Some(PlayerState::Idle));
    }

    #[test]
    fn test_direction_persists_after_release() {
        let mut world = world_with_tiles(test_player(Vec2::ZERO), &[]);
        let left = FrameInput {
            left: true,
            ..Default::default()
        };
        for _ in 0..5 {
            step(&mut world, &left, &Tuning::default(), DT);
        }
        assert_eq!(world.player().direction, -1.0);

        step(&mut world, &FrameInput::default(), &Tuning::default(), DT);
        assert_eq!(world.player().direction, -1.0);
    }

    #[test]
    fn test_falling_lands_running_on_first_overlap_frame() {
        // Tile top edge at y=400; feet start 10 units above it
        let mut player = test_player(Vec2::new(8.0, 360.0));
        player.set_player_state(PlayerState::Jumping);
        let mut world = world_with_tiles(player, &[Vec2::new(0.0, 400.0)]);
        let input = FrameInput::default();

        let mut frames = 0;
        while !world.player().grounded {
            assert_eq!(
                world.player().player_state(),
                Some(PlayerState::Jumping),
                "state changed before the sensor fired"
            );
            // The sensor reaches one unit below the feet, never further
            assert!(world.player().aabb().bottom() <= 400.0);
            step(&mut world, &input, &Tuning::default(), DT);
            frames += 1;
            assert!(frames < 240, "never landed");
        }

        // The landing transition happens in the same frame the sensor
        // first overlaps
        assert_eq!(world.player().player_state(), Some(PlayerState::Running));

        // The sensor can fire up to one unit above the surface; a few more
        // frames settle the feet flush and zero the fall speed
        for _ in 0..3 {
            step(&mut world, &input, &Tuning::default(), DT);
        }
        assert_eq!(world.player().velocity.y, 0.0);
        assert!((world.player().aabb().bottom() - 400.0).abs() < 1e-3);
    }

    #[test]
    fn test_jump_applies_impulse_once_and_only_grounded() {
        let mut player = test_player(Vec2::new(8.0, 370.0)); // feet flush at 400
        player.set_player_state(PlayerState::Idle);
        let mut world = world_with_tiles(player, &[Vec2::new(0.0, 400.0)]);
        let tuning = Tuning::default();

        // Settle: first step grounds the player
        step(&mut world, &FrameInput::default(), &tuning, DT);
        assert!(world.player().grounded);

        let jump = FrameInput {
            jump_pressed: true,
            ..Default::default()
        };
        step(&mut world, &jump, &tuning, DT);
        assert_eq!(world.player().player_state(), Some(PlayerState::Jumping));
        assert!(world.player().velocity.y < -150.0);

        // Mid-air presses do nothing but gravity still applies
        let before = world.player().velocity.y;
        step(&mut world, &jump, &tuning, DT);
        let expected = before + tuning.gravity * DT;
        assert!((world.player().velocity.y - expected).abs() < 1e-3);
    }

    #[test]
    fn test_reversal_selects_slide_sprite() {
        let mut player = test_player(Vec2::new(8.0, 370.0));
        player.set_player_state(PlayerState::Running);
        player.velocity.x = 100.0;
        player.direction = 1.0;
        let mut world = world_with_tiles(player, &[Vec2::new(0.0, 400.0)]);

        let left = FrameInput {
            left: true,
            ..Default::default()
        };
        step(&mut world, &left, &Tuning::default(), DT);

        let player = world.player();
        assert_eq!(player.player_state(), Some(PlayerState::Running));
        assert!(player.velocity.x > 0.0);
        assert_eq!(player.direction, -1.0);
        assert_eq!(player.texture, TextureId(3));
        assert_eq!(player.current_animation, Some(assets::ANIM_SLIDE));
    }

    #[test]
    fn test_wall_stops_horizontal_motion() {
        // Wall to the right of the spawn, floor below
        let mut player = test_player(Vec2::new(8.0, 370.0));
        player.set_player_state(PlayerState::Idle);
        let mut world = world_with_tiles(
            player,
            &[
                Vec2::new(0.0, 400.0),
                Vec2::new(32.0, 400.0),
                Vec2::new(64.0, 368.0),
            ],
        );
        let input = hold_right();
        for _ in 0..120 {
            step(&mut world, &input, &Tuning::default(), DT);
        }
        let player = world.player();
        assert_eq!(player.velocity.x, 0.0);
        assert!(player.aabb().right() <= 64.0 + 1e-3);
    }

    proptest! {
        #[test]
        fn prop_speed_clamp_holds_under_any_input(
            inputs in proptest::collection::vec((any::<bool>(), any::<bool>()), 1..300)
        ) {
            let mut world = world_with_tiles(test_player(Vec2::ZERO), &[]);
            for (left, right) in inputs {
                let input = FrameInput { left, right, jump_pressed: false };
                step(&mut world, &input, &Tuning::default(), DT);
                prop_assert!(world.player().velocity.x.abs() <= 100.0 + 1e-3);
            }
        }

        #[test]
        fn prop_idle_deceleration_is_monotonic(start in -500.0f32..500.0) {
            let mut player = test_player(Vec2::ZERO);
            player.velocity.x = start;
            let mut world = world_with_tiles(player, &[]);
            let mut previous = start.abs();
            // 300 u/s² at 60 Hz sheds 5 u/s per frame; 150 frames clears
            // any starting speed below 750
            for _ in 0..150 {
                step(&mut world, &FrameInput::default(), &Tuning::default(), DT);
                let speed = world.player().velocity.x.abs();
                prop_assert!(speed <= previous);
                previous = speed;
            }
            prop_assert_eq!(world.player().velocity.x, 0.0);
        }
    }
}
