use std::io;

use side_shooter::compute::{init_state, shoot_top, spawn_enemy};
use side_shooter::config::GameConfig;
use side_shooter::entities::*;
use side_shooter::render::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Clone, Debug, PartialEq)]
enum Op {
    Save,
    Restore,
    Rect { x: f32, y: f32, w: f32, h: f32, fill: Paint },
    Text { text: String, x: f32, y: f32, fill: Paint, font: Option<Font>, align: TextAlign },
    Stroke { text: String, stroke: Paint },
}

#[derive(Clone, Copy, Debug, Default)]
struct Style {
    fill: Option<Paint>,
    stroke: Option<Paint>,
    font: Option<Font>,
    align: TextAlign,
    shadow: Option<Shadow>,
}

/// Records every drawing call together with the style in force.
#[derive(Default)]
struct Recorder {
    ops: Vec<Op>,
    style: Style,
    stack: Vec<Style>,
}

impl Recorder {
    fn fill(&self) -> Paint {
        self.style.fill.unwrap_or(Paint::Black)
    }

    fn texts(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    fn rects_of(&self, paint: Paint) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Rect { fill, .. } if *fill == paint))
            .count()
    }
}

impl Surface for Recorder {
    fn set_fill(&mut self, paint: Paint) {
        self.style.fill = Some(paint);
    }
    fn set_stroke(&mut self, paint: Paint) {
        self.style.stroke = Some(paint);
    }
    fn set_font(&mut self, font: Font) {
        self.style.font = Some(font);
    }
    fn set_text_align(&mut self, align: TextAlign) {
        self.style.align = align;
    }
    fn set_shadow(&mut self, shadow: Option<Shadow>) {
        self.style.shadow = shadow;
    }
    fn save(&mut self) {
        self.stack.push(self.style);
        self.ops.push(Op::Save);
    }
    fn restore(&mut self) {
        if let Some(style) = self.stack.pop() {
            self.style = style;
        }
        self.ops.push(Op::Restore);
    }
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> io::Result<()> {
        let fill = self.fill();
        self.ops.push(Op::Rect {
            x,
            y,
            w: width,
            h: height,
            fill,
        });
        Ok(())
    }
    fn fill_text(&mut self, text: &str, x: f32, y: f32) -> io::Result<()> {
        let op = Op::Text {
            text: text.to_string(),
            x,
            y,
            fill: self.fill(),
            font: self.style.font,
            align: self.style.align,
        };
        self.ops.push(op);
        Ok(())
    }
    fn stroke_text(&mut self, text: &str, _x: f32, _y: f32) -> io::Result<()> {
        let stroke = self.style.stroke.unwrap_or(Paint::Black);
        self.ops.push(Op::Stroke {
            text: text.to_string(),
            stroke,
        });
        Ok(())
    }
}

fn state_with_enemy() -> GameState {
    let mut s = init_state(GameConfig::default());
    let mut rng = StdRng::seed_from_u64(7);
    s.enemies.push(spawn_enemy(EnemyKind::Angler, 0, &s.config, &mut rng));
    s
}

#[test]
fn draw_order_is_player_ui_enemies() {
    let s = shoot_top(&state_with_enemy());
    let mut rec = Recorder::default();
    draw_game(&mut rec, &s).unwrap();

    // Player body first, then its projectile
    assert_eq!(
        rec.ops[0],
        Op::Rect {
            x: 20.0,
            y: 100.0,
            w: 120.0,
            h: 190.0,
            fill: Paint::Black,
        }
    );
    assert_eq!(
        rec.ops[1],
        Op::Rect {
            x: 108.0,
            y: 130.0,
            w: 10.0,
            h: 3.0,
            fill: Paint::Yellow,
        }
    );
    assert_eq!(rec.ops[2], Op::Save);

    let restore = rec.ops.iter().position(|op| *op == Op::Restore).unwrap();
    let enemy_body = rec
        .ops
        .iter()
        .position(|op| matches!(op, Op::Rect { fill: Paint::Red, .. }))
        .unwrap();
    assert!(enemy_body > restore);
    assert!(matches!(rec.ops.last(), Some(Op::Text { text, .. }) if text == "5"));
}

#[test]
fn ui_shows_score_and_ammo_gauge() {
    let mut s = init_state(GameConfig::default());
    s.score = 7;
    s.ammo = 12;
    let mut rec = Recorder::default();
    draw_ui(&mut rec, &s).unwrap();

    assert_eq!(rec.ops.first(), Some(&Op::Save));
    assert_eq!(rec.ops.last(), Some(&Op::Restore));
    assert_eq!(rec.texts(), vec!["Score 7".to_string()]);
    assert_eq!(rec.rects_of(Paint::White), 12);
    let first_round = Op::Rect {
        x: 75.0,
        y: 50.0,
        w: 3.0,
        h: 20.0,
        fill: Paint::White,
    };
    assert!(rec.ops.contains(&first_round));
}

#[test]
fn ui_style_does_not_leak() {
    let s = init_state(GameConfig::default());
    let mut rec = Recorder::default();
    rec.set_fill(Paint::Red);
    draw_ui(&mut rec, &s).unwrap();

    assert_eq!(rec.style.fill, Some(Paint::Red));
    assert!(rec.style.shadow.is_none());
    assert!(rec.style.font.is_none());
    assert!(rec.stack.is_empty());
}

#[test]
fn win_message_after_winning_score() {
    let mut s = init_state(GameConfig::default());
    s.score = 15;
    s.status = GameStatus::GameOver;
    let mut rec = Recorder::default();
    draw_ui(&mut rec, &s).unwrap();

    assert_eq!(
        rec.texts(),
        vec!["Score 15".to_string(), "You Win!".to_string(), "You Done!".to_string()]
    );
    let headline = rec
        .ops
        .iter()
        .find(|op| matches!(op, Op::Text { text, .. } if text == "You Win!"))
        .unwrap();
    match headline {
        Op::Text { x, y, font, align, .. } => {
            assert_eq!((*x, *y), (250.0, 250.0));
            assert_eq!(font.map(|f| f.size_px), Some(50));
            assert_eq!(*align, TextAlign::Center);
        }
        _ => unreachable!(),
    }
    let outline = Op::Stroke {
        text: "You Win!".to_string(),
        stroke: Paint::Black,
    };
    assert!(rec.ops.contains(&outline));
}

#[test]
fn lose_message_below_winning_score() {
    let mut s = init_state(GameConfig::default());
    s.score = 3;
    s.status = GameStatus::GameOver;
    assert_eq!(end_messages(&s), ("You Lost!", "Try again next time!"));
}

#[test]
fn no_end_message_while_playing() {
    let mut s = init_state(GameConfig::default());
    s.score = 20;
    let mut rec = Recorder::default();
    draw_ui(&mut rec, &s).unwrap();
    assert_eq!(rec.texts(), vec!["Score 20".to_string()]);
}

#[test]
fn enemy_shows_remaining_lives() {
    let mut s = state_with_enemy();
    s.enemies[0].lives = 2;
    let enemy = s.enemies[0].clone();
    let mut rec = Recorder::default();
    draw_enemy(&mut rec, &enemy).unwrap();

    assert_eq!(rec.ops.len(), 2);
    match &rec.ops[1] {
        Op::Text { text, x, y, fill, font, .. } => {
            assert_eq!(text, "2");
            assert_eq!((*x, *y), (enemy.x, enemy.y));
            assert_eq!(*fill, Paint::Black);
            let expected = Font {
                size_px: 20,
                family: "Helvetica",
            };
            assert_eq!(*font, Some(expected));
        }
        other => panic!("expected lives text, got {other:?}"),
    }
}

#[test]
fn drawing_does_not_mutate_state() {
    let s = shoot_top(&state_with_enemy());
    let before = s.clone();
    let mut rec = Recorder::default();
    draw_game(&mut rec, &s).unwrap();
    assert_eq!(s, before);
}
