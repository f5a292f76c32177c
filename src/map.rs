//! Tile-map loading
//!
//! Converts rectangular grids of small integer tile codes (0 = empty) into
//! the world's object collections. The grids are in-memory data authored
//! alongside the binary; there is no file-format parsing here. The loader
//! is the only way to build a [`World`], which is what keeps the player
//! invariant honest: a map without exactly one player cell is a hard error,
//! never a world with a dangling player index.

use std::collections::HashMap;
use std::fmt;

use glam::Vec2;

use crate::assets::{self, PlayerSprites, TextureId};
use crate::sim::animation::Animation;
use crate::sim::object::{GameObject, ObjectKind, PlayerState};
use crate::sim::rect::Rect;
use crate::sim::world::World;
use crate::tuning::Tuning;

/// One layer's tile codes, row-major, top row first.
pub type TileGrid = Vec<Vec<u8>>;

/// The three authored layers of a map.
#[derive(Debug, Default)]
pub struct MapLayers {
    /// Collidable gameplay layer: level tiles, the player cell, enemies
    pub gameplay: TileGrid,
    /// Decorative, drawn behind the level; no collision or physics
    pub background: TileGrid,
    /// Decorative, drawn in front of everything
    pub foreground: TileGrid,
}

/// How one tile code is realized on screen and in collision.
#[derive(Debug, Clone)]
pub struct TileDef {
    pub texture: TextureId,
    pub animation: Option<Animation>,
    pub collider: Rect,
}

/// Lookup tables mapping tile codes to sprites and colliders.
#[derive(Debug)]
pub struct TileCatalog {
    /// Code that configures the single player (exactly one cell)
    pub player_code: u8,
    /// Code that spawns an enemy
    pub enemy_code: u8,
    /// Plain tile codes
    defs: HashMap<u8, TileDef>,
    /// Enemy sprite and collider
    pub enemy: TileDef,
    /// Player sprite selection, copied into the world
    pub player_sprites: PlayerSprites,
    /// Player collider, inset from the tile bounds
    pub player_collider: Rect,
}

impl TileCatalog {
    pub fn new(
        player_code: u8,
        enemy_code: u8,
        enemy: TileDef,
        player_sprites: PlayerSprites,
        player_collider: Rect,
    ) -> Self {
        Self {
            player_code,
            enemy_code,
            defs: HashMap::new(),
            enemy,
            player_sprites,
            player_collider,
        }
    }

    pub fn insert(&mut self, code: u8, def: TileDef) {
        debug_assert!(code != 0 && code != self.player_code && code != self.enemy_code);
        self.defs.insert(code, def);
    }

    fn def(&self, code: u8) -> Option<&TileDef> {
        self.defs.get(&code)
    }
}

/// Errors raised while turning tile grids into a world.
#[derive(Debug)]
pub enum MapError {
    /// No cell in the gameplay layer carries the player code
    NoPlayer,
    /// More than one cell carries the player code
    MultiplePlayers {
        first: (usize, usize),
        second: (usize, usize),
    },
    /// A row's length differs from the first row's
    RaggedRow { layer: &'static str, row: usize },
    /// A nonzero code with no catalog entry
    UnknownTile {
        layer: &'static str,
        code: u8,
        row: usize,
        col: usize,
    },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::NoPlayer => write!(f, "map has no player cell"),
            MapError::MultiplePlayers { first, second } => write!(
                f,
                "map has more than one player cell (rows/cols {first:?} and {second:?})"
            ),
            MapError::RaggedRow { layer, row } => {
                write!(f, "{layer} layer row {row} does not match the map width")
            }
            MapError::UnknownTile {
                layer,
                code,
                row,
                col,
            } => write!(
                f,
                "unknown tile code {code} in {layer} layer at row {row}, col {col}"
            ),
        }
    }
}

impl std::error::Error for MapError {}

/// World position of cell (row, col): columns grow rightward, and the
/// bottom map row is aligned with the bottom edge of the logical viewport.
fn cell_position(row: usize, col: usize, total_rows: usize, tuning: &Tuning) -> Vec2 {
    Vec2::new(
        col as f32 * tuning.tile_size,
        tuning.logical_height - (total_rows - row) as f32 * tuning.tile_size,
    )
}

fn check_rectangular(grid: &TileGrid, layer: &'static str) -> Result<(), MapError> {
    let Some(width) = grid.first().map(Vec::len) else {
        return Ok(());
    };
    for (row, cells) in grid.iter().enumerate() {
        if cells.len() != width {
            return Err(MapError::RaggedRow { layer, row });
        }
    }
    Ok(())
}

fn object_from_def(def: &TileDef, position: Vec2, kind: ObjectKind) -> GameObject {
    let mut obj = GameObject::level_tile(position, def.collider, def.texture);
    obj.kind = kind;
    if let Some(anim) = &def.animation {
        obj.animations = vec![anim.clone()];
        obj.current_animation = Some(0);
    }
    obj
}

/// Build a decorative layer: every nonzero cell becomes a drawn-only object.
fn load_decorations(
    grid: &TileGrid,
    layer: &'static str,
    catalog: &TileCatalog,
    tuning: &Tuning,
) -> Result<Vec<GameObject>, MapError> {
    check_rectangular(grid, layer)?;
    let rows = grid.len();
    let mut out = Vec::new();
    for (r, row) in grid.iter().enumerate() {
        for (c, &code) in row.iter().enumerate() {
            if code == 0 {
                continue;
            }
            let def = catalog.def(code).ok_or(MapError::UnknownTile {
                layer,
                code,
                row: r,
                col: c,
            })?;
            let position = cell_position(r, c, rows, tuning);
            let mut obj = GameObject::decoration(position, def.texture);
            if let Some(anim) = &def.animation {
                obj.animations = vec![anim.clone()];
                obj.current_animation = Some(0);
            }
            out.push(obj);
        }
    }
    Ok(out)
}

/// Populate a world from the three map layers.
pub fn load_world(
    layers: &MapLayers,
    catalog: &TileCatalog,
    tuning: &Tuning,
) -> Result<World, MapError> {
    check_rectangular(&layers.gameplay, "gameplay")?;
    let rows = layers.gameplay.len();

    let mut level = Vec::new();
    let mut player_cell: Option<(usize, usize)> = None;

    for (r, row) in layers.gameplay.iter().enumerate() {
        for (c, &code) in row.iter().enumerate() {
            if code == 0 {
                continue;
            }
            let position = cell_position(r, c, rows, tuning);
            if code == catalog.player_code {
                if let Some(first) = player_cell {
                    return Err(MapError::MultiplePlayers {
                        first,
                        second: (r, c),
                    });
                }
                player_cell = Some((r, c));
            } else if code == catalog.enemy_code {
                // Enemies are animated scenery for now: excluded from the
                // resolver, so they stand on their cell rather than obey
                // gravity
                level.push(object_from_def(&catalog.enemy, position, ObjectKind::Enemy));
            } else {
                let def = catalog.def(code).ok_or(MapError::UnknownTile {
                    layer: "gameplay",
                    code,
                    row: r,
                    col: c,
                })?;
                level.push(object_from_def(def, position, ObjectKind::Level));
            }
        }
    }

    let (player_row, player_col) = player_cell.ok_or(MapError::NoPlayer)?;
    let player = GameObject {
        kind: ObjectKind::Player {
            state: PlayerState::Idle,
        },
        position: cell_position(player_row, player_col, rows, tuning),
        velocity: Vec2::ZERO,
        acceleration: Vec2::new(tuning.player_accel, 0.0),
        direction: 1.0,
        max_speed_x: tuning.player_max_speed,
        dynamic: true,
        grounded: false,
        collider: catalog.player_collider,
        animations: catalog.player_sprites.animations(),
        current_animation: Some(assets::ANIM_IDLE),
        texture: catalog.player_sprites.idle.texture,
    };

    let background = load_decorations(&layers.background, "background", catalog, tuning)?;
    let foreground = load_decorations(&layers.foreground, "foreground", catalog, tuning)?;

    log::info!(
        "Loaded map: {} gameplay objects, {} background, {} foreground; player at row {player_row}, col {player_col}",
        level.len() + 1,
        background.len(),
        foreground.len(),
    );

    Ok(World::new(
        level,
        vec![player],
        background,
        foreground,
        catalog.player_sprites.clone(),
        0,
    ))
}
