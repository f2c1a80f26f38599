/// Rendering backend — all terminal I/O lives here.
///
/// `TerminalSurface` projects the arena's pixel space onto the terminal's
/// character grid and implements `Surface` with crossterm commands.  No game
/// logic is performed; `render` only frames the picture `draw_game` paints.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal, QueueableCommand,
};
use side_shooter::entities::GameState;
use side_shooter::render::{draw_game, Font, Paint, Shadow, Surface, TextAlign};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_ARENA: Color = Color::DarkBlue;
const C_HINT: Color = Color::DarkGrey;

/// Fonts at least this large are drawn bold.
const HEADLINE_PX: u32 = 40;

fn color_of(paint: Paint) -> Color {
    match paint {
        Paint::Black => Color::Black,
        Paint::White => Color::White,
        Paint::Yellow => Color::Yellow,
        Paint::Red => Color::Red,
    }
}

// ── Surface implementation ────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
struct DrawState {
    fill: Paint,
    stroke: Paint,
    font: Font,
    align: TextAlign,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            fill: Paint::Black,
            stroke: Paint::Black,
            font: Font {
                size_px: 10,
                family: "sans-serif",
            },
            align: TextAlign::Left,
        }
    }
}

pub struct TerminalSurface<'a, W: Write> {
    out: &'a mut W,
    cols: u16,
    rows: u16,
    scale_x: f32,
    scale_y: f32,
    current: DrawState,
    saved: Vec<DrawState>,
}

impl<'a, W: Write> TerminalSurface<'a, W> {
    /// A surface covering `cols × rows` cells that shows the whole arena.
    pub fn new(
        out: &'a mut W,
        cols: u16,
        rows: u16,
        arena_width: f32,
        arena_height: f32,
    ) -> Self {
        Self {
            out,
            cols,
            rows,
            scale_x: cols as f32 / arena_width,
            scale_y: rows as f32 / arena_height,
            current: DrawState::default(),
            saved: Vec::new(),
        }
    }

    /// Cells covered by `[start, start + len)` pixels, clipped to `limit`.
    fn cell_span(start: f32, len: f32, scale: f32, limit: u16) -> Option<(u16, u16)> {
        let lo = (start * scale).floor().max(0.0);
        let hi = ((start + len) * scale).ceil().min(limit as f32);
        if hi <= lo {
            None
        } else {
            Some((lo as u16, hi as u16))
        }
    }

    /// Print `text` with its baseline at arena point (x, y), honouring the
    /// current alignment.  Characters outside the grid are dropped.
    fn put_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        fg: Color,
        bg: Color,
        bold: bool,
    ) -> io::Result<()> {
        // Text sits on the row above its baseline.
        let row = (y * self.scale_y).round() - 1.0;
        if row < 0.0 || row >= self.rows as f32 {
            return Ok(());
        }

        let len = text.chars().count() as f32;
        let mut col = (x * self.scale_x).round();
        if self.current.align == TextAlign::Center {
            col -= (len / 2.0).floor();
        }
        let skip = if col < 0.0 { (-col) as usize } else { 0 };
        let col = col.max(0.0);
        if col >= self.cols as f32 {
            return Ok(());
        }
        let visible: String = text
            .chars()
            .skip(skip)
            .take((self.cols as f32 - col) as usize)
            .collect();
        if visible.is_empty() {
            return Ok(());
        }

        self.out.queue(cursor::MoveTo(col as u16, row as u16))?;
        self.out.queue(style::SetForegroundColor(fg))?;
        self.out.queue(style::SetBackgroundColor(bg))?;
        if bold {
            self.out.queue(style::SetAttribute(Attribute::Bold))?;
        }
        self.out.queue(Print(visible))?;
        if bold {
            self.out.queue(style::SetAttribute(Attribute::NormalIntensity))?;
        }
        Ok(())
    }
}

impl<W: Write> Surface for TerminalSurface<'_, W> {
    fn set_fill(&mut self, paint: Paint) {
        self.current.fill = paint;
    }

    fn set_stroke(&mut self, paint: Paint) {
        self.current.stroke = paint;
    }

    // Cells have one size; headline-sized fonts are drawn bold.
    fn set_font(&mut self, font: Font) {
        self.current.font = font;
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.current.align = align;
    }

    // A 2px offset is far below one cell, so shadows are never drawn.
    fn set_shadow(&mut self, _shadow: Option<Shadow>) {}

    fn save(&mut self) {
        self.saved.push(self.current);
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.current = state;
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> io::Result<()> {
        let Some((c0, c1)) = Self::cell_span(x, width, self.scale_x, self.cols) else {
            return Ok(());
        };
        let Some((r0, r1)) = Self::cell_span(y, height, self.scale_y, self.rows) else {
            return Ok(());
        };
        let run = " ".repeat((c1 - c0) as usize);
        self.out.queue(style::SetBackgroundColor(color_of(self.current.fill)))?;
        for row in r0..r1 {
            self.out.queue(cursor::MoveTo(c0, row))?;
            self.out.queue(Print(&run))?;
        }
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) -> io::Result<()> {
        let fg = color_of(self.current.fill);
        let bold = self.current.font.size_px >= HEADLINE_PX;
        self.put_text(text, x, y, fg, C_ARENA, bold)
    }

    /// Terminals cannot outline glyphs; the text is re-printed bold on a
    /// band of the stroke colour instead.
    fn stroke_text(&mut self, text: &str, x: f32, y: f32) -> io::Result<()> {
        let fg = color_of(self.current.fill);
        let bg = color_of(self.current.stroke);
        self.put_text(text, x, y, fg, bg, true)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame onto a `cols × rows` terminal.  The last row is
/// kept for the controls hint.
pub fn render<W: Write>(out: &mut W, state: &GameState, cols: u16, rows: u16) -> io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let arena_rows = rows.saturating_sub(1);
    draw_arena(out, cols, arena_rows)?;

    let mut surface = TerminalSurface::new(
        out,
        cols,
        arena_rows,
        state.config.width,
        state.config.height,
    );
    draw_game(&mut surface, state)?;

    draw_controls_hint(out, rows)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Background ────────────────────────────────────────────────────────────────

fn draw_arena<W: Write>(out: &mut W, cols: u16, rows: u16) -> io::Result<()> {
    let blank = " ".repeat(cols as usize);
    out.queue(style::SetBackgroundColor(C_ARENA))?;
    for row in 0..rows {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print(&blank))?;
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> io::Result<()> {
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("↑ ↓ / W S : Move   SPACE : Shoot   R : Restart   Q : Quit"))?;
    Ok(())
}
