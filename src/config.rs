/// Game tuning: the per-game `GameConfig` plus fixed per-entity constants.

use thiserror::Error;

// ── Entity tuning ─────────────────────────────────────────────────────────────

pub const PLAYER_X: f32 = 20.0;
pub const PLAYER_Y: f32 = 100.0;
pub const PLAYER_WIDTH: f32 = 120.0;
pub const PLAYER_HEIGHT: f32 = 190.0;
pub const PLAYER_MAX_SPEED: f32 = 3.0;

/// Muzzle position relative to the player's top-left corner.
pub const MUZZLE_OFFSET_X: f32 = 88.0;
pub const MUZZLE_OFFSET_Y: f32 = 30.0;

pub const PROJECTILE_WIDTH: f32 = 10.0;
pub const PROJECTILE_HEIGHT: f32 = 3.0;
pub const PROJECTILE_SPEED: f32 = 3.0;
/// Projectiles are dropped once they pass this fraction of the arena width.
pub const PROJECTILE_RANGE: f32 = 0.8;

/// Anglers use a 228×169 sprite drawn at 20% scale.
pub const ANGLER_WIDTH: f32 = 228.0 * 0.2;
pub const ANGLER_HEIGHT: f32 = 169.0 * 0.2;
pub const ANGLER_LIVES: u32 = 5;
pub const ANGLER_MIN_SPEED: f32 = -2.0;
pub const ANGLER_MAX_SPEED: f32 = -0.5;

/// Enemies spawn within the top 90% of the arena.
pub const SPAWN_BAND: f32 = 0.9;

// ── Per-game configuration ────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub width: f32,
    pub height: f32,
    pub initial_ammo: u32,
    pub max_ammo: u32,
    pub ammo_interval_ms: f64,
    pub enemy_interval_ms: f64,
    pub winning_score: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 500.0,
            initial_ammo: 20,
            max_ammo: 50,
            ammo_interval_ms: 500.0,
            enemy_interval_ms: 1000.0,
            winning_score: 15,
        }
    }
}

impl GameConfig {
    /// Default tuning on an arena of the given size.
    pub fn with_arena(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Check the preconditions the simulation relies on.  The simulation
    /// itself never fails; a config that passes here keeps every spawn
    /// position inside the arena.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::EmptyArena {
                width: self.width,
                height: self.height,
            });
        }
        if self.height * SPAWN_BAND < ANGLER_HEIGHT {
            return Err(ConfigError::ArenaTooShort {
                height: self.height,
                required: ANGLER_HEIGHT / SPAWN_BAND,
            });
        }
        if !(self.ammo_interval_ms > 0.0) {
            return Err(ConfigError::BadInterval("ammo_interval_ms"));
        }
        if !(self.enemy_interval_ms > 0.0) {
            return Err(ConfigError::BadInterval("enemy_interval_ms"));
        }
        if self.initial_ammo > self.max_ammo {
            return Err(ConfigError::AmmoOverMax {
                initial: self.initial_ammo,
                max: self.max_ammo,
            });
        }
        Ok(())
    }
}

/// Why a `GameConfig` was rejected by [`GameConfig::validate`].
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("arena must have a positive size, got {width}x{height}")]
    EmptyArena { width: f32, height: f32 },
    #[error("arena height {height} cannot host an enemy; need at least {required:.1}")]
    ArenaTooShort { height: f32, required: f32 },
    #[error("{0} must be positive")]
    BadInterval(&'static str),
    #[error("initial ammo {initial} exceeds max ammo {max}")]
    AmmoOverMax { initial: u32, max: u32 },
}
