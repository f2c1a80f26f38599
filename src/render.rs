/// Drawing layer — translates game state into calls on a `Surface`.
///
/// No game logic is performed here and the state is never mutated.  The
/// `Surface` trait is a small canvas-style contract (fill colour, font,
/// alignment and shadow state with save/restore scoping) so any backend
/// can present a frame: the terminal front end, or a recorder in tests.

use std::io;

use crate::entities::{Enemy, GameState, GameStatus, Player, Projectile};

// ── Surface contract ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Paint {
    Black,
    White,
    Yellow,
    Red,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Font {
    pub size_px: u32,
    pub family: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub offset_x: f32,
    pub offset_y: f32,
    pub color: Paint,
}

/// A 2D drawing target addressed in arena pixels.
///
/// Style setters affect every later drawing call until changed or until the
/// matching `restore` pops the state saved by `save`.
pub trait Surface {
    fn set_fill(&mut self, paint: Paint);
    fn set_stroke(&mut self, paint: Paint);
    fn set_font(&mut self, font: Font);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_shadow(&mut self, shadow: Option<Shadow>);
    fn save(&mut self);
    fn restore(&mut self);

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> io::Result<()>;
    fn fill_text(&mut self, text: &str, x: f32, y: f32) -> io::Result<()>;
    fn stroke_text(&mut self, text: &str, x: f32, y: f32) -> io::Result<()>;
}

// ── Palette & fonts ───────────────────────────────────────────────────────────

const C_PLAYER: Paint = Paint::Black;
const C_PROJECTILE: Paint = Paint::Yellow;
const C_ENEMY: Paint = Paint::Red;
const C_ENEMY_LIVES: Paint = Paint::Black;
const C_UI: Paint = Paint::White;
const C_UI_SHADOW: Paint = Paint::Black;

const FONT_FAMILY: &str = "Helvetica";
const ENEMY_FONT: Font = Font {
    size_px: 20,
    family: FONT_FAMILY,
};
const UI_FONT: Font = Font {
    size_px: 25,
    family: FONT_FAMILY,
};
const HEADLINE_FONT: Font = Font {
    size_px: 50,
    family: FONT_FAMILY,
};

// ── Public entry point ────────────────────────────────────────────────────────

/// Draw one complete frame: player, then the UI overlay, then enemies.
pub fn draw_game<S: Surface>(surface: &mut S, state: &GameState) -> io::Result<()> {
    draw_player(surface, &state.player)?;
    draw_ui(surface, state)?;
    for enemy in &state.enemies {
        draw_enemy(surface, enemy)?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

pub fn draw_player<S: Surface>(surface: &mut S, player: &Player) -> io::Result<()> {
    surface.set_fill(C_PLAYER);
    surface.fill_rect(player.x, player.y, player.width, player.height)?;
    for projectile in &player.projectiles {
        draw_projectile(surface, projectile)?;
    }
    Ok(())
}

pub fn draw_projectile<S: Surface>(surface: &mut S, projectile: &Projectile) -> io::Result<()> {
    surface.set_fill(C_PROJECTILE);
    surface.fill_rect(projectile.x, projectile.y, projectile.width, projectile.height)
}

/// Body plus the remaining lives, written at the enemy's top-left corner.
pub fn draw_enemy<S: Surface>(surface: &mut S, enemy: &Enemy) -> io::Result<()> {
    surface.set_fill(C_ENEMY);
    surface.fill_rect(enemy.x, enemy.y, enemy.width, enemy.height)?;
    surface.set_fill(C_ENEMY_LIVES);
    surface.set_font(ENEMY_FONT);
    surface.fill_text(&enemy.lives.to_string(), enemy.x, enemy.y)
}

// ── UI overlay ────────────────────────────────────────────────────────────────

/// The two lines shown once the game has ended.
pub fn end_messages(state: &GameState) -> (&'static str, &'static str) {
    if state.score >= state.config.winning_score {
        ("You Win!", "You Done!")
    } else {
        ("You Lost!", "Try again next time!")
    }
}

/// Score, ammo gauge and (after game over) the end message.  All style
/// changes stay inside one save/restore scope.
pub fn draw_ui<S: Surface>(surface: &mut S, state: &GameState) -> io::Result<()> {
    surface.save();
    let result = draw_ui_scoped(surface, state);
    surface.restore();
    result
}

fn draw_ui_scoped<S: Surface>(surface: &mut S, state: &GameState) -> io::Result<()> {
    surface.set_fill(C_UI);
    surface.set_shadow(Some(Shadow {
        offset_x: 2.0,
        offset_y: 2.0,
        color: C_UI_SHADOW,
    }));
    surface.set_font(UI_FONT);
    surface.fill_text(&format!("Score {}", state.score), 20.0, 40.0)?;

    for i in 0..state.ammo {
        surface.fill_rect(20.0 + 5.0 * i as f32, 50.0, 3.0, 20.0)?;
    }

    if state.status == GameStatus::GameOver {
        let (headline, subline) = end_messages(state);
        let cx = state.config.width * 0.5;
        let cy = state.config.height * 0.5;

        surface.set_text_align(TextAlign::Center);
        surface.set_font(HEADLINE_FONT);
        surface.fill_text(headline, cx, cy)?;
        surface.set_stroke(C_UI_SHADOW);
        surface.stroke_text(headline, cx, cy)?;
        surface.set_font(UI_FONT);
        surface.fill_text(subline, cx, cy + HEADLINE_FONT.size_px as f32)?;
    }
    Ok(())
}
