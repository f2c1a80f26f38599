/// All game entity types — pure data, no logic.

use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    /// The only enemy the arena spawns: a slow fish drifting in from the right.
    Angler,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// Terminal: spawning stops, everything already on screen keeps moving.
    GameOver,
}

/// Axis-aligned rectangle in arena pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Pixels travelled rightward per tick.
    pub speed: f32,
    pub marked_for_deletion: bool,
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    /// Spawn order, unique within one game.
    pub id: u64,
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal velocity, always negative; sampled once at spawn.
    pub speed_x: f32,
    pub lives: u32,
    /// Points awarded when `lives` reaches zero.
    pub score: u32,
    pub marked_for_deletion: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed_y: f32,
    pub max_speed: f32,
    /// Projectiles fired by this player that are still in flight.
    pub projectiles: Vec<Projectile>,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub score: u32,
    pub ammo: u32,
    /// Milliseconds accumulated towards the next ammo refill.
    pub ammo_timer: f64,
    /// Milliseconds accumulated towards the next enemy spawn.
    pub enemy_timer: f64,
    pub status: GameStatus,
    pub frame: u64,
    pub next_enemy_id: u64,
    pub config: GameConfig,
}
