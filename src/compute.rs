/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, the held keys or an RNG handle) and
/// returns a brand-new value.  Side effects are limited to the injected RNG.

use rand::Rng;

use crate::config::{
    GameConfig, ANGLER_HEIGHT, ANGLER_LIVES, ANGLER_MAX_SPEED, ANGLER_MIN_SPEED, ANGLER_WIDTH,
    MUZZLE_OFFSET_X, MUZZLE_OFFSET_Y, PLAYER_HEIGHT, PLAYER_MAX_SPEED, PLAYER_WIDTH, PLAYER_X,
    PLAYER_Y, PROJECTILE_HEIGHT, PROJECTILE_RANGE, PROJECTILE_SPEED, PROJECTILE_WIDTH, SPAWN_BAND,
};
use crate::entities::{Enemy, EnemyKind, GameState, GameStatus, Player, Projectile, Rect};
use crate::input::{HeldKeys, Key};

// ── Bounding boxes ───────────────────────────────────────────────────────────

/// Anything that occupies an axis-aligned box in the arena.
pub trait Bounded {
    fn rect(&self) -> Rect;
}

impl Bounded for Rect {
    fn rect(&self) -> Rect {
        *self
    }
}

impl Bounded for Player {
    fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

impl Bounded for Projectile {
    fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

impl Bounded for Enemy {
    fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

/// Strict AABB overlap: boxes that only share an edge do not collide.
pub fn check_collision(a: &impl Bounded, b: &impl Bounded) -> bool {
    let r1 = a.rect();
    let r2 = b.rect();
    r1.x < r2.x + r2.width
        && r1.x + r1.width > r2.x
        && r1.y < r2.y + r2.height
        && r1.y + r1.height > r2.y
}

// ── Enemy tables ─────────────────────────────────────────────────────────────

fn enemy_size(kind: EnemyKind) -> (f32, f32) {
    match kind {
        EnemyKind::Angler => (ANGLER_WIDTH, ANGLER_HEIGHT),
    }
}

fn enemy_lives(kind: EnemyKind) -> u32 {
    match kind {
        EnemyKind::Angler => ANGLER_LIVES,
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

pub fn init_player() -> Player {
    Player {
        x: PLAYER_X,
        y: PLAYER_Y,
        width: PLAYER_WIDTH,
        height: PLAYER_HEIGHT,
        speed_y: 0.0,
        max_speed: PLAYER_MAX_SPEED,
        projectiles: Vec::new(),
    }
}

/// Build the initial game state for the given configuration.
pub fn init_state(config: GameConfig) -> GameState {
    GameState {
        player: init_player(),
        enemies: Vec::new(),
        score: 0,
        ammo: config.initial_ammo,
        ammo_timer: 0.0,
        enemy_timer: 0.0,
        status: GameStatus::Playing,
        frame: 0,
        next_enemy_id: 0,
        config,
    }
}

pub fn new_projectile(x: f32, y: f32) -> Projectile {
    Projectile {
        x,
        y,
        width: PROJECTILE_WIDTH,
        height: PROJECTILE_HEIGHT,
        speed: PROJECTILE_SPEED,
        marked_for_deletion: false,
    }
}

/// A fresh enemy just past the right edge, at a random height that keeps it
/// fully inside the spawn band.
pub fn spawn_enemy(kind: EnemyKind, id: u64, config: &GameConfig, rng: &mut impl Rng) -> Enemy {
    let (width, height) = enemy_size(kind);
    let lives = enemy_lives(kind);
    let speed_x = rng.gen_range(ANGLER_MIN_SPEED..ANGLER_MAX_SPEED);
    // A negative span only happens on arenas GameConfig::validate rejects.
    let y = rng.gen::<f32>() * (config.height * SPAWN_BAND - height);
    Enemy {
        id,
        kind,
        x: config.width,
        y,
        width,
        height,
        speed_x,
        lives,
        score: lives,
        marked_for_deletion: false,
    }
}

// ── Per-entity updates ───────────────────────────────────────────────────────

pub fn advance_projectile(projectile: &Projectile, arena_width: f32) -> Projectile {
    let x = projectile.x + projectile.speed;
    Projectile {
        x,
        marked_for_deletion: projectile.marked_for_deletion || x > arena_width * PROJECTILE_RANGE,
        ..projectile.clone()
    }
}

pub fn advance_enemy(enemy: &Enemy) -> Enemy {
    let x = enemy.x + enemy.speed_x;
    Enemy {
        x,
        marked_for_deletion: enemy.marked_for_deletion || x + enemy.width < 0.0,
        ..enemy.clone()
    }
}

/// Steer from the held keys (up wins over down), move, then advance and
/// cull the player's projectiles.  Vertical position is not clamped.
pub fn update_player(player: &Player, keys: &HeldKeys, arena_width: f32) -> Player {
    let speed_y = if keys.is_held(Key::Up) {
        -player.max_speed
    } else if keys.is_held(Key::Down) {
        player.max_speed
    } else {
        0.0
    };

    let projectiles = player
        .projectiles
        .iter()
        .map(|p| advance_projectile(p, arena_width))
        .filter(|p| !p.marked_for_deletion)
        .collect();

    Player {
        y: player.y + speed_y,
        speed_y,
        projectiles,
        ..player.clone()
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Fire from the top muzzle, spending one round.  Silently ignored when the
/// magazine is empty.
pub fn shoot_top(state: &GameState) -> GameState {
    if state.ammo == 0 {
        log::trace!("fire ignored: out of ammo");
        return state.clone();
    }
    let p = &state.player;
    let mut projectiles = p.projectiles.clone();
    projectiles.push(new_projectile(p.x + MUZZLE_OFFSET_X, p.y + MUZZLE_OFFSET_Y));
    GameState {
        player: Player {
            projectiles,
            ..p.clone()
        },
        ammo: state.ammo - 1,
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame, `delta_ms` milliseconds after the
/// previous one.  All randomness comes through `rng` so callers control
/// determinism (useful for tests with a seeded RNG).
pub fn tick(state: &GameState, keys: &HeldKeys, delta_ms: f64, rng: &mut impl Rng) -> GameState {
    let config = &state.config;

    // ── 1. Player and its projectiles ────────────────────────────────────────
    let mut player = update_player(&state.player, keys, config.width);

    // ── 2. Ammo regeneration ─────────────────────────────────────────────────
    let (ammo, ammo_timer) = if state.ammo_timer > config.ammo_interval_ms {
        ((state.ammo + 1).min(config.max_ammo), 0.0)
    } else {
        (state.ammo, state.ammo_timer + delta_ms)
    };

    // ── 3. Enemies: move, then resolve collisions ────────────────────────────
    let mut enemies: Vec<Enemy> = state.enemies.iter().map(advance_enemy).collect();
    let mut score = state.score;
    let mut status = state.status;

    for enemy in enemies.iter_mut() {
        // Ramming costs the enemy, never the player.
        if check_collision(&player, &*enemy) {
            enemy.marked_for_deletion = true;
        }

        // Every overlapping projectile is spent, even on an enemy that is
        // already dead; the kill itself is scored once.
        let was_alive = enemy.lives > 0;
        for projectile in player.projectiles.iter_mut() {
            if check_collision(&*projectile, &*enemy) {
                enemy.lives = enemy.lives.saturating_sub(1);
                projectile.marked_for_deletion = true;
            }
        }

        if was_alive && enemy.lives == 0 {
            enemy.marked_for_deletion = true;
            score += enemy.score;
            log::debug!("enemy #{} destroyed, score {}", enemy.id, score);
            if score >= config.winning_score && status == GameStatus::Playing {
                status = GameStatus::GameOver;
                log::info!("game over at frame {} with score {}", state.frame + 1, score);
            }
        }
    }

    // ── 4. Cull ──────────────────────────────────────────────────────────────
    enemies.retain(|e| !e.marked_for_deletion);

    // ── 5. Spawn ─────────────────────────────────────────────────────────────
    let mut next_enemy_id = state.next_enemy_id;
    let spawn_due = state.enemy_timer > config.enemy_interval_ms;
    let enemy_timer = if spawn_due && status == GameStatus::Playing {
        let enemy = spawn_enemy(EnemyKind::Angler, next_enemy_id, config, rng);
        log::debug!(
            "spawned enemy #{} at y={:.1} speed={:.2}",
            enemy.id,
            enemy.y,
            enemy.speed_x
        );
        enemies.push(enemy);
        next_enemy_id += 1;
        0.0
    } else {
        state.enemy_timer + delta_ms
    };

    GameState {
        player,
        enemies,
        score,
        ammo,
        ammo_timer,
        enemy_timer,
        status,
        frame: state.frame + 1,
        next_enemy_id,
        config: config.clone(),
    }
}
