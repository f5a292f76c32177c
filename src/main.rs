//! tile-dash entry point
//!
//! Platform glue only: window and input via macroquad, placeholder texture
//! generation, and the frame loop (poll input, step the simulation, compose
//! draw commands, draw, present). Everything gameplay-shaped lives in the
//! library.

use macroquad::prelude::*;

use tile_dash::assets::{PlayerSprites, SpriteSet, TextureId, TextureStore};
use tile_dash::map::{self, MapLayers, TileCatalog, TileDef, TileGrid};
use tile_dash::render::{self, ParallaxLayer, ParallaxScroll};
use tile_dash::sim::{self, Animation, FrameInput};
use tile_dash::sim::rect::Rect as SimRect;
use tile_dash::Tuning;

// Tile codes used by the demo map
const GROUND: u8 = 1;
const PANEL: u8 = 2;
const GRASS: u8 = 3;
const ENEMY: u8 = 8;
const PLAYER: u8 = 9;

fn window_conf() -> Conf {
    Conf {
        window_title: "tile-dash".to_owned(),
        window_width: 1280,
        window_height: 720,
        ..Default::default()
    }
}

/// Generate a placeholder sprite strip: `frames` frames of one solid color,
/// each with a progressively darker band along the top so the loop is
/// visible without shipped art.
fn register_strip(
    store: &mut TextureStore,
    textures: &mut Vec<Texture2D>,
    frames: u16,
    frame_w: u16,
    frame_h: u16,
    base: Color,
) -> TextureId {
    let width = frames * frame_w;
    let mut image = Image::gen_image_color(width, frame_h, base);
    for frame in 0..frames as u32 {
        let shade = 1.0 - frame as f32 / frames.max(2) as f32 * 0.5;
        let band = Color::new(base.r * shade, base.g * shade, base.b * shade, base.a);
        for y in 0..4 {
            for x in 0..frame_w as u32 {
                image.set_pixel(frame * frame_w as u32 + x, y, band);
            }
        }
    }
    let texture = Texture2D::from_image(&image);
    texture.set_filter(FilterMode::Nearest);
    textures.push(texture);
    store.register(width as f32, frame_h as f32)
}

/// Generate a viewport-wide backdrop for one parallax layer. Only the
/// bottom `band_h` rows are opaque so nearer layers reveal farther ones.
fn register_backdrop(
    store: &mut TextureStore,
    textures: &mut Vec<Texture2D>,
    width: u16,
    height: u16,
    band_h: u16,
    color: Color,
) -> TextureId {
    let mut image = Image::gen_image_color(width, height, BLANK);
    for y in (height - band_h) as u32..height as u32 {
        for x in 0..width as u32 {
            image.set_pixel(x, y, color);
        }
    }
    let texture = Texture2D::from_image(&image);
    texture.set_filter(FilterMode::Nearest);
    textures.push(texture);
    store.register(width as f32, height as f32)
}

fn code_for(glyph: char) -> u8 {
    match glyph {
        '.' => 0,
        '#' => GROUND,
        '=' => PANEL,
        'g' => GRASS,
        'E' => ENEMY,
        'P' => PLAYER,
        other => panic!("unknown map glyph {other:?}"),
    }
}

fn grid(rows: &[&str]) -> TileGrid {
    rows.iter()
        .map(|row| row.chars().map(code_for).collect())
        .collect()
}

/// The demo map, authored in-memory. 20x15 cells of 32px fill the 640x480
/// logical viewport exactly.
fn demo_layers() -> MapLayers {
    MapLayers {
        gameplay: grid(&[
            "....................",
            "....................",
            "....................",
            "....................",
            "..........===.......",
            "....................",
            "......==.......E....",
            "...P...........==...",
            "..####..............",
            "....................",
            "............##......",
            "#...........##.....#",
            "##.................#",
            "####..##############",
            "####################",
        ]),
        background: grid(&[
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....g......g........",
            "....................",
            "..g..............g..",
            "....................",
            "....................",
            "....................",
        ]),
        foreground: grid(&[
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            "....................",
            ".........g..........",
            "....................",
            "....................",
        ]),
    }
}

fn build_catalog(store: &mut TextureStore, textures: &mut Vec<Texture2D>) -> TileCatalog {
    let tile = SimRect::new(0.0, 0.0, 32.0, 32.0);

    let idle = register_strip(store, textures, 4, 32, 32, Color::new(0.9, 0.8, 0.3, 1.0));
    let run = register_strip(store, textures, 6, 32, 32, Color::new(0.9, 0.6, 0.2, 1.0));
    let jump = register_strip(store, textures, 1, 32, 32, Color::new(0.9, 0.4, 0.2, 1.0));
    let slide = register_strip(store, textures, 1, 32, 32, Color::new(0.7, 0.3, 0.5, 1.0));
    let enemy = register_strip(store, textures, 2, 32, 32, Color::new(0.8, 0.2, 0.2, 1.0));
    let ground = register_strip(store, textures, 1, 32, 32, Color::new(0.35, 0.25, 0.2, 1.0));
    let panel = register_strip(store, textures, 1, 32, 32, Color::new(0.5, 0.4, 0.3, 1.0));
    let grass = register_strip(store, textures, 2, 32, 32, Color::new(0.3, 0.6, 0.3, 1.0));

    let mut catalog = TileCatalog::new(
        PLAYER,
        ENEMY,
        TileDef {
            texture: enemy,
            animation: Some(Animation::new(2, 1.0)),
            collider: SimRect::new(4.0, 8.0, 24.0, 24.0),
        },
        PlayerSprites {
            idle: SpriteSet {
                texture: idle,
                animation: Animation::new(4, 0.8),
            },
            run: SpriteSet {
                texture: run,
                animation: Animation::new(6, 0.5),
            },
            jump: SpriteSet {
                texture: jump,
                animation: Animation::new(1, 0.5),
            },
            slide: SpriteSet {
                texture: slide,
                animation: Animation::new(1, 0.5),
            },
        },
        SimRect::new(11.0, 6.0, 10.0, 26.0),
    );
    catalog.insert(
        GROUND,
        TileDef {
            texture: ground,
            animation: None,
            collider: tile,
        },
    );
    catalog.insert(
        PANEL,
        TileDef {
            texture: panel,
            animation: None,
            collider: tile,
        },
    );
    catalog.insert(
        GRASS,
        TileDef {
            texture: grass,
            animation: Some(Animation::new(2, 1.2)),
            collider: tile,
        },
    );
    catalog
}

#[macroquad::main(window_conf)]
async fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let tuning = Tuning::load();
    log::info!(
        "Starting tile-dash ({}x{} logical)",
        tuning.logical_width,
        tuning.logical_height
    );

    let mut store = TextureStore::new();
    let mut textures: Vec<Texture2D> = Vec::new();
    let catalog = build_catalog(&mut store, &mut textures);

    let far = register_backdrop(&mut store, &mut textures, 640, 480, 200, Color::new(0.55, 0.7, 0.8, 1.0));
    let near = register_backdrop(&mut store, &mut textures, 640, 480, 120, Color::new(0.4, 0.55, 0.45, 1.0));

    let mut world = match map::load_world(&demo_layers(), &catalog, &tuning) {
        Ok(world) => world,
        Err(err) => {
            log::error!("Failed to load map: {err}");
            std::process::exit(1);
        }
    };

    let mut parallax = [
        ParallaxLayer {
            texture: far,
            scroll: ParallaxScroll::default(),
        },
        ParallaxLayer {
            texture: near,
            scroll: ParallaxScroll::default(),
        },
    ];
    let factors = [tuning.parallax_far, tuning.parallax_near];

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        let dt = get_frame_time();
        let input = FrameInput {
            left: is_key_down(KeyCode::Left) || is_key_down(KeyCode::A),
            right: is_key_down(KeyCode::Right) || is_key_down(KeyCode::D),
            jump_pressed: is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::Up),
        };

        sim::step(&mut world, &input, &tuning, dt);

        let player_vel_x = world.player().velocity.x;
        for (layer, factor) in parallax.iter_mut().zip(factors) {
            let width = store.info(layer.texture).map_or(0.0, |info| info.width);
            layer.scroll.advance(player_vel_x, factor, dt, width);
        }

        clear_background(SKYBLUE);
        let scale_x = screen_width() / tuning.logical_width;
        let scale_y = screen_height() / tuning.logical_height;
        for cmd in render::compose_frame(&world, &store, &parallax) {
            let texture = &textures[cmd.texture.0 as usize];
            draw_texture_ex(
                texture,
                cmd.dst.x * scale_x,
                cmd.dst.y * scale_y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(cmd.dst.w * scale_x, cmd.dst.h * scale_y)),
                    source: Some(macroquad::math::Rect::new(
                        cmd.src.x, cmd.src.y, cmd.src.w, cmd.src.h,
                    )),
                    flip_x: cmd.flip_x,
                    ..Default::default()
                },
            );
        }

        for (i, line) in render::debug_lines(&world).iter().enumerate() {
            draw_text(line, 8.0, 18.0 + 18.0 * i as f32, 20.0, DARKGRAY);
        }

        next_frame().await;
    }

    log::info!("Quit requested, shutting down");
}
