//! Data-driven game balance
//!
//! Every constant the simulation and loader consume lives here, so nothing
//! in the core reaches for a process-wide global. The native binary can
//! override the defaults with a `tuning.json` next to the executable.

use serde::{Deserialize, Serialize};

/// Balance and geometry values threaded through the loader and simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration applied to dynamic objects (units/s²)
    pub gravity: f32,
    /// Vertical velocity change on jump (negative = upward)
    pub jump_impulse: f32,
    /// Horizontal acceleration while a direction key is held (units/s²)
    pub player_accel: f32,
    /// Horizontal speed clamp for the player (units/s)
    pub player_max_speed: f32,
    /// Edge length of one map tile (world units)
    pub tile_size: f32,
    /// Logical viewport width the simulation and rendering operate in
    pub logical_width: f32,
    /// Logical viewport height
    pub logical_height: f32,
    /// Scroll factor for the far parallax layer (fraction of player speed)
    pub parallax_far: f32,
    /// Scroll factor for the near parallax layer
    pub parallax_near: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 500.0,
            jump_impulse: -200.0,
            player_accel: 300.0,
            player_max_speed: 100.0,
            tile_size: 32.0,
            logical_width: 640.0,
            logical_height: 480.0,
            parallax_far: 0.075,
            parallax_near: 0.15,
        }
    }
}

impl Tuning {
    /// Tuning file looked up next to the executable
    const FILE_NAME: &'static str = "tuning.json";

    /// Parse tuning values from a JSON document. Missing fields fall back
    /// to the defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load tuning from `tuning.json` if present, defaults otherwise.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::fs::read_to_string(Self::FILE_NAME) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", Self::FILE_NAME);
                    tuning
                }
                Err(err) => {
                    log::warn!("Ignoring malformed {}: {err}", Self::FILE_NAME);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::default()
    }
}
