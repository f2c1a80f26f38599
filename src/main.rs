mod display;

use std::collections::HashMap;
use std::io::{self, stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use side_shooter::compute::{init_state, shoot_top, tick};
use side_shooter::config::GameConfig;
use side_shooter::entities::{GameState, GameStatus};
use side_shooter::input::{HeldKeys, Key};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈128 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Releases every held key whose last press/repeat is older than `HOLD_WINDOW`.
fn expire_stale(held: &mut HeldKeys, key_frame: &mut HashMap<Key, u64>, frame: u64) {
    key_frame.retain(|&key, &mut last| {
        let fresh = frame.saturating_sub(last) <= HOLD_WINDOW;
        if !fresh {
            held.release(key);
        }
        fresh
    });
}

/// The movement key a terminal key steers, if any.
fn movement_key(code: &KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::Down),
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum LoopExit {
    Quit,
    Restart,
}

/// Runs one game until the player quits or restarts.
///
/// Movement keys are pressed into a `HeldKeys` set that lives for the whole
/// game.  A `key_frame` map records the frame of each key's last press/repeat
/// so keys can be released on terminals that never report releases.  Space
/// is a discrete trigger: every press or repeat fires once.  The simulation
/// keeps ticking after game over so projectiles and enemies already on
/// screen finish their paths.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
) -> io::Result<LoopExit> {
    let mut rng = thread_rng();

    let mut held = HeldKeys::new();
    let mut key_frame: HashMap<Key, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let (code, kind, modifiers) = match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => (code, kind, modifiers),
                // No release events arrive while unfocused
                Event::FocusLost => {
                    held.clear();
                    key_frame.clear();
                    continue;
                }
                _ => continue,
            };
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    if let Some(key) = movement_key(&code) {
                        held.press(key);
                        key_frame.insert(key, frame);
                    }
                    match code {
                        KeyCode::Char(' ') => *state = shoot_top(state),
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
                            if kind == KeyEventKind::Press =>
                        {
                            return Ok(LoopExit::Quit);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(LoopExit::Quit);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R')
                            if kind == KeyEventKind::Press
                                && state.status == GameStatus::GameOver =>
                        {
                            return Ok(LoopExit::Restart);
                        }
                        _ => {}
                    }
                }
                // Release: drop the key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    if let Some(key) = movement_key(&code) {
                        held.release(key);
                        key_frame.remove(&key);
                    }
                }
            }
        }

        expire_stale(&mut held, &mut key_frame, frame);

        let now = Instant::now();
        let delta_ms = now.duration_since(last_tick).as_secs_f64() * 1000.0;
        last_tick = now;

        *state = tick(state, &held, delta_ms, &mut rng);

        let (cols, rows) = terminal::size()?;
        display::render(out, state, cols, rows)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    // Logs go to stderr, which shares the terminal: redirect it when RUST_LOG is set.
    env_logger::init();

    let config = GameConfig::default();
    config
        .validate()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    let focus_reported = out.execute(event::EnableFocusChange).is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, &config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    if focus_reported {
        let _ = out.execute(event::DisableFocusChange);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, config: &GameConfig) -> io::Result<()> {
    loop {
        let mut state = init_state(config.clone());
        log::info!("new game on a {}x{} arena", config.width, config.height);

        match game_loop(out, &mut state, rx)? {
            LoopExit::Quit => break,
            LoopExit::Restart => {
                log::info!("restarting after a score of {}", state.score);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_expire_after_the_hold_window() {
        let mut held: HeldKeys = [Key::Up, Key::Down].into_iter().collect();
        let mut key_frame = HashMap::from([(Key::Up, 10), (Key::Down, 2)]);

        expire_stale(&mut held, &mut key_frame, 10 + HOLD_WINDOW);
        assert!(held.is_held(Key::Up));
        assert!(!held.is_held(Key::Down));
        assert!(!key_frame.contains_key(&Key::Down));

        expire_stale(&mut held, &mut key_frame, 11 + HOLD_WINDOW);
        assert!(held.is_empty());
        assert!(key_frame.is_empty());
    }

    #[test]
    fn a_refreshed_key_stays_held() {
        let mut held: HeldKeys = [Key::Up].into_iter().collect();
        let mut key_frame = HashMap::from([(Key::Up, 1)]);
        for frame in 2..40 {
            key_frame.insert(Key::Up, frame);
            expire_stale(&mut held, &mut key_frame, frame);
            assert!(held.is_held(Key::Up));
        }
    }

    #[test]
    fn movement_keys_map_arrows_and_wasd() {
        assert_eq!(movement_key(&KeyCode::Up), Some(Key::Up));
        assert_eq!(movement_key(&KeyCode::Char('S')), Some(Key::Down));
        assert_eq!(movement_key(&KeyCode::Char(' ')), None);
    }
}
