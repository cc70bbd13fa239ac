//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui,
//! and runs the clipboard and link effects the pure layer requests.
//!
//! Architecture: a key reader thread feeds an mpsc channel. The event
//! loop waits on it with a timeout, so animation time keeps flowing
//! without key presses; each wake measures real elapsed time and ticks
//! the app by exactly that much.

use std::io;
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::konami::KonamiKey;
use crate::toast::ToastKind;
use crate::types::PortfolioData;

use super::state::{Action, App, AppEvent, Effect, Screen};
use super::update::{handle_konami, update};
use super::view::render;

/// Longest wait between wakes when nothing is animating.
const IDLE_POLL: Duration = Duration::from_millis(500);

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        // Sections
        KeyCode::Tab | KeyCode::Char('l') => Some(Action::NextSection),
        KeyCode::BackTab | KeyCode::Char('h') => Some(Action::PrevSection),
        KeyCode::Char(c @ '1'..='5') => Some(Action::NumberKey(c as u8 - b'0')),
        KeyCode::Char('0') | KeyCode::Esc => Some(Action::Home),

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Enter => Some(Action::Enter),

        // Contact
        KeyCode::Char('c') => Some(Action::CopyEmail),
        KeyCode::Char('o') => Some(Action::OpenGithub),
        KeyCode::Char('i') => Some(Action::OpenLinkedin),

        KeyCode::Char('x') => Some(Action::Dismiss),
        KeyCode::Char('q') => Some(Action::Quit),

        _ => None,
    }
}

/// Normalize a key event for the Konami tracker.
pub fn konami_key(key: KeyEvent) -> KonamiKey {
    match key.code {
        KeyCode::Up => KonamiKey::Up,
        KeyCode::Down => KonamiKey::Down,
        KeyCode::Left => KonamiKey::Left,
        KeyCode::Right => KonamiKey::Right,
        KeyCode::Char('b' | 'B') => KonamiKey::B,
        KeyCode::Char('a' | 'A') => KonamiKey::A,
        _ => KonamiKey::Other,
    }
}

/// How long the loop may sleep before the next wake.
pub fn poll_timeout(app: &App, frame_interval: Duration) -> Duration {
    if app.animating() {
        return frame_interval;
    }
    app.hero
        .time_to_next_tick()
        .map_or(IDLE_POLL, |t| t.min(IDLE_POLL))
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREADS
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards them to the channel.
fn spawn_key_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            let event = match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                Ok(Event::Resize(..)) => AppEvent::Resize,
                Ok(_) => continue, // key release, mouse, focus
                Err(_) => break,
            };
            if tx.send(event).is_err() {
                break; // receiver dropped, TUI is shutting down
            }
        }
    });
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the TUI until the user quits.
///
/// Sets up the terminal, mounts the hero, and runs the event loop.
/// The hero is disposed before the terminal is restored.
pub fn run(profile: PortfolioData, config: &Config) -> Result<()> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let mut app = App::new(profile, config);
    let mut effects = Effects::default();
    let frame_interval = config.ui.frame_interval();

    let (tx, rx) = mpsc::channel::<AppEvent>();
    spawn_key_reader(tx);
    info!("tui started");

    let mut last = Instant::now();
    let mut dirty = true;

    loop {
        if dirty {
            terminal.draw(|frame| render(&app, frame))?;
            dirty = false;
        }

        if app.should_quit {
            break;
        }

        let event = rx.recv_timeout(poll_timeout(&app, frame_interval));

        let now = Instant::now();
        dirty |= app.tick(now.duration_since(last));
        last = now;

        match event {
            Ok(AppEvent::Key(key)) => {
                handle_key(&mut app, &mut effects, key);
                dirty = true;
            }
            Ok(AppEvent::Resize) => dirty = true,
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break, // key reader died
        }
    }

    app.hero.dispose();
    restore_terminal()?;
    info!(elapsed_ms = app.clock.as_millis() as u64, "tui stopped");
    Ok(())
}

/// Route one key press: Konami tracking first, then the action.
fn handle_key(app: &mut App, effects: &mut Effects, key: KeyEvent) {
    if handle_konami(app, konami_key(key)) {
        return;
    }
    let Some(action) = map_key(key) else {
        return;
    };
    if action == Action::Dismiss && !matches!(app.screen, Screen::EasterEgg { .. }) {
        app.dismiss_toast();
        return;
    }

    let transition = update(app.screen.clone(), &action, &app.profile);
    if let Some(effect) = app.apply(transition) {
        effects.run(effect, app);
    }
}

// ============================================================================
// EFFECT HANDLING
// ============================================================================

/// Clipboard and link side effects.
///
/// The clipboard handle is kept for the whole session; on X11 the copied
/// text is only served while the handle lives.
#[derive(Default)]
struct Effects {
    clipboard: Option<arboard::Clipboard>,
}

impl Effects {
    /// Run an effect and report the outcome as a toast.
    fn run(&mut self, effect: Effect, app: &mut App) {
        debug!(?effect, "running effect");
        let outcome = match &effect {
            Effect::CopyToClipboard(text) => self.copy(text).map(|()| "Copied to clipboard".to_string()),
            Effect::OpenLink(url) => open_link(url).map(|()| format!("Opening {}", url)),
        };
        match outcome {
            Ok(message) => {
                app.notify(ToastKind::Success, message);
            }
            Err(e) => {
                warn!(error = %e, "effect failed");
                app.notify(ToastKind::Error, e.to_string());
            }
        }
    }

    fn copy(&mut self, text: &str) -> Result<()> {
        let clipboard = match &mut self.clipboard {
            Some(clipboard) => clipboard,
            slot => slot.insert(arboard::Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?),
        };
        clipboard
            .set_text(text.to_owned())
            .map_err(|e| Error::Clipboard(e.to_string()))
    }
}

/// The platform's "open this URL" command and its leading arguments.
fn opener() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "macos") {
        ("open", &[])
    } else if cfg!(target_os = "windows") {
        ("cmd", &["/C", "start", ""])
    } else {
        ("xdg-open", &[])
    }
}

/// Hand a URL to the system opener without waiting for it.
fn open_link(url: &str) -> Result<()> {
    let (program, args) = opener();
    Command::new(program)
        .args(args)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|source| Error::Launch {
            program: program.to_string(),
            source,
        })
}

// ============================================================================
// TESTS
// ============================================================================
