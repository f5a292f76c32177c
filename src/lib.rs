//! tile-dash - a tiny tile-map platformer demo
//!
//! Core modules:
//! - `sim`: Deterministic simulation (objects, physics, collisions, states)
//! - `map`: Tile-code grids to populated world
//! - `render`: Pure frame composition (draw commands, parallax, debug text)
//! - `assets`: Texture handles and sprite lookup tables
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod map;
pub mod render;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;
