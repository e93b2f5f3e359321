mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use dungeon_archer::clock::SystemClock;
use dungeon_archer::compute::GameSession;
use dungeon_archer::config::GameConfig;
use dungeon_archer::entities::{GameEvent, TickInput};
use dungeon_archer::level::DirLevelSource;

use display::Viewport;

const LOG_FILE: &str = "dungeon_archer.log";

/// Frames a key stays "down" after its last press or repeat event.  Needed
/// for terminals without key-release events; OS key repeat (15 Hz or more)
/// refreshes the entry well inside 8 frames at 60 FPS.
const HOLD_WINDOW: u64 = 8;

type Session = GameSession<SystemClock, DirLevelSource>;

/// Whether `key` is still inside its hold window.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|key| is_held(key_frame, key, frame))
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// stdout belongs to the alternate screen, so logs go to a file.
fn init_tracing() -> std::io::Result<()> {
    let file = File::create(LOG_FILE)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact()
        .init();
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
) -> std::io::Result<MenuResult> {
    let (width, height) = terminal::size()?;
    let viewport = Viewport::new(width, height, config.screen_width, config.screen_height);
    display::render_menu(out, &viewport)?;

    loop {
        if let Ok(Event::Key(KeyEvent { code, kind, .. })) = rx.recv() {
            if kind != KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Start),
                KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(MenuResult::Quit),
                _ => {}
            }
        }
    }
}

// ── Audio stand-in ────────────────────────────────────────────────────────────

/// The terminal has no mixer; events are only traced.
fn play_event_sounds(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::ShotFired => debug!("sfx: arrow_shot"),
            GameEvent::HitLanded { damage, .. } => debug!(damage, "sfx: arrow_hit"),
            GameEvent::CoinCollected => debug!("sfx: coin"),
            GameEvent::PotionUsed => debug!("sfx: heal"),
            GameEvent::FireballCast | GameEvent::PlayerHurt { .. } => {}
            GameEvent::LevelCompleted { next_level } => info!(next_level, "level complete"),
            GameEvent::PlayerDied => info!("player died"),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs the session until the player quits.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key, and keys still "fresh" are applied
/// together each frame, so movement on two axes works at once.  Mouse
/// position aims the bow and the left button fires.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let frame_time = Duration::from_secs(1) / session.config().fps.max(1);

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut pointer = (0.0, 0.0);
    let mut fire = false;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let (width, height) = terminal::size()?;
        let config = session.config();
        let viewport = Viewport::new(width, height, config.screen_width, config.screen_height);

        // ── Input ─────────────────────────────────────────────────────────────
        while let Ok(event) = rx.try_recv() {
            match event {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            KeyCode::Esc => session.toggle_pause(),
                            KeyCode::Char('r') | KeyCode::Char('R') => {
                                if let Err(err) = session.restart() {
                                    error!(error = %err, "restart failed");
                                    return Ok(());
                                }
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent {
                    kind, column, row, ..
                }) => {
                    pointer = viewport.pixel_for_terminal_cell(column, row);
                    match kind {
                        MouseEventKind::Down(MouseButton::Left) => fire = true,
                        MouseEventKind::Up(MouseButton::Left) => fire = false,
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        // ── Build this frame's input ──────────────────────────────────────────
        let left = any_held(&key_frame, &[KeyCode::Char('a'), KeyCode::Char('A'), KeyCode::Left], frame);
        let right = any_held(&key_frame, &[KeyCode::Char('d'), KeyCode::Char('D'), KeyCode::Right], frame);
        let up = any_held(&key_frame, &[KeyCode::Char('w'), KeyCode::Char('W'), KeyCode::Up], frame);
        let down = any_held(&key_frame, &[KeyCode::Char('s'), KeyCode::Char('S'), KeyCode::Down], frame);

        let mut input = TickInput {
            fire,
            pointer,
            ..TickInput::default()
        };
        if right {
            input.move_x = 1;
        }
        if left {
            input.move_x = -1;
        }
        if up {
            input.move_y = -1;
        }
        if down {
            input.move_y = 1;
        }

        match session.tick(&input, &mut rng) {
            Ok(events) => play_event_sounds(events),
            // Out of levels: keep showing the final screen until quit.
            Err(err) => info!(error = %err, "run finished"),
        }

        display::render(out, session, &viewport)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    init_tracing()?;
    info!("=== Dungeon Archer startup ===");

    let config = match GameConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "bad config");
            eprintln!("{err}");
            std::process::exit(2);
        }
    };
    let levels = DirLevelSource::new(config.levels_dir.clone());
    let mut session = match GameSession::new(config, SystemClock::new(), levels) {
        Ok(session) => session,
        Err(err) => {
            error!(error = %err, "cannot build first level");
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Ask for release/repeat events; terminals without the kitty protocol
    // ignore this and the hold window takes over.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads happen on their own thread; the loop drains a channel.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = run(&mut out, &mut session, &rx);

    // Restore the terminal even if the loop failed.
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!(
        phase = ?session.phase(),
        score = session.hud().score,
        "=== Dungeon Archer shutdown ==="
    );
    result
}

fn run<W: Write>(
    out: &mut W,
    session: &mut Session,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    match show_menu(out, rx, session.config())? {
        MenuResult::Quit => Ok(()),
        MenuResult::Start => {
            session.start();
            game_loop(out, session, rx)
        }
    }
}
