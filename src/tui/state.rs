//! TUI state algebra: pure types, zero effects.
//!
//! Screen variants carry only per-screen transient state (cursors).
//! Shared data (profile, hero, toasts) lives in App. Viewport scroll
//! offsets are derived during rendering, not stored here.

use std::time::Duration;

use crossterm::event::KeyEvent;

use crate::config::Config;
use crate::hero::TerminalHero;
use crate::konami::KonamiTracker;
use crate::profile;
use crate::skills;
use crate::toast::{ToastKind, ToastQueue};
use crate::types::{PortfolioData, Section};

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
///
/// The key reader thread is the only producer. Time is not an event:
/// the loop wakes on a timeout and measures elapsed time itself.
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal key event from the crossterm reader thread.
    Key(KeyEvent),
    /// The terminal was resized; redraw.
    Resize,
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
///
/// Owns the shared data and the current screen. The effects layer
/// reads this to know what to render.
#[derive(Debug)]
pub struct App {
    /// Current screen, carrying per-screen navigation state.
    pub screen: Screen,

    pub profile: PortfolioData,

    /// The typed terminal window. Keeps typing while other screens show.
    pub hero: TerminalHero,

    pub konami: KonamiTracker,

    pub toasts: ToastQueue,

    /// App time since start. Advanced only by `tick`.
    pub clock: Duration,

    /// App time the current screen was entered; drives skill meters.
    pub screen_entered_at: Duration,

    /// Fill level of skill meters, 0-100.
    pub skill_level: u8,

    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
}

impl App {
    /// Build the app and mount the hero.
    pub fn new(profile: PortfolioData, config: &Config) -> Self {
        let entries = profile::hero_entries(&profile, &config.hero);
        let hero = TerminalHero::mount(entries, config.hero.timing(), config.hero.cursor_blink());
        Self {
            screen: Screen::Hero,
            profile,
            hero,
            konami: KonamiTracker::new(),
            toasts: ToastQueue::new(config.ui.toast_lifetime()),
            clock: Duration::ZERO,
            screen_entered_at: Duration::ZERO,
            skill_level: config.ui.skill_level(),
            should_quit: false,
        }
    }

    /// Advance app time. Returns true when something visible changed.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        self.clock += elapsed;
        let revision = self.hero.revision();
        self.hero.advance_with(elapsed, |_, _| {});
        let hero_changed = self.hero.revision() != revision;
        let toasts_changed = self.toasts.expire(self.clock) > 0;
        hero_changed || toasts_changed || self.skills_filling()
    }

    /// Switch screens. Entering a different section restarts its animations.
    pub fn set_screen(&mut self, screen: Screen) {
        if screen.section() != self.screen.section() {
            self.screen_entered_at = self.clock;
        }
        self.screen = screen;
    }

    /// Raise a toast at the current app time.
    pub fn notify(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.toasts.push(kind, message, self.clock)
    }

    /// Close the newest toast. Returns false when none is showing.
    pub fn dismiss_toast(&mut self) -> bool {
        match self.toasts.visible().last() {
            Some(toast) => {
                let id = toast.id;
                self.toasts.dismiss(id)
            }
            None => false,
        }
    }

    /// Time spent on the current screen.
    pub fn screen_elapsed(&self) -> Duration {
        self.clock.saturating_sub(self.screen_entered_at)
    }

    /// True while something needs frame-rate redraws.
    pub fn animating(&self) -> bool {
        !self.hero.is_idle() || !self.toasts.is_empty() || self.skills_filling()
    }

    fn skills_filling(&self) -> bool {
        self.screen.section() == Some(Section::Skills)
            && !skills::settled(self.profile.skills.len(), self.screen_elapsed())
    }
}

// ============================================================================
// SCREENS
// ============================================================================

/// The current TUI screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Screen {
    /// The typed terminal window.
    #[default]
    Hero,

    /// One portfolio section. `cursor` focuses a row in list sections.
    Section { section: Section, cursor: usize },

    /// Konami unlock modal drawn over the screen it interrupted.
    EasterEgg { previous: Box<Screen> },
}

impl Screen {
    /// Open a section with the cursor on its first row.
    pub fn section_view(section: Section) -> Self {
        Screen::Section { section, cursor: 0 }
    }

    /// The section being shown, looking through the easter egg modal.
    pub fn section(&self) -> Option<Section> {
        match self {
            Screen::Hero => None,
            Screen::Section { section, .. } => Some(*section),
            Screen::EasterEgg { previous } => previous.section(),
        }
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user intents, decoupled from key bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    NextSection,
    PrevSection,
    /// Jump to section 1-5.
    NumberKey(u8),
    /// Back to the hero window.
    Home,
    MoveUp,
    MoveDown,
    /// Open the focused item.
    Enter,
    CopyEmail,
    OpenGithub,
    OpenLinkedin,
    /// Close the easter egg modal.
    Dismiss,
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure state transition.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Move to a new screen (or stay on the current one).
    Screen(Screen),
    /// Exit the TUI.
    Quit,
    /// Stay on `screen` and perform a side effect.
    Effect { screen: Screen, effect: Effect },
}

/// Side effects the pure layer can request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    CopyToClipboard(String),
    OpenLink(String),
}

impl App {
    /// Apply a transition. Returns the effect to run, if any.
    pub fn apply(&mut self, transition: Transition) -> Option<Effect> {
        match transition {
            Transition::Screen(screen) => {
                self.set_screen(screen);
                None
            }
            Transition::Quit => {
                self.should_quit = true;
                None
            }
            Transition::Effect { screen, effect } => {
                self.set_screen(screen);
                Some(effect)
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(profile::sample(), &Config::default())
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn app_starts_on_hero_with_typing_pending() {
        let app = app();
        assert_eq!(app.screen, Screen::Hero);
        assert!(!app.hero.is_idle());
        assert!(app.animating());
        assert!(!app.should_quit);
    }

    #[test]
    fn tick_advances_clock_and_hero() {
        let mut app = app();
        assert!(app.tick(ms(80)));
        assert_eq!(app.clock, ms(80));
        assert_eq!(app.hero.elapsed(), ms(80));
        assert_eq!(app.hero.state().revealed_lines[0].command, "w");
    }

    #[test]
    fn entering_a_section_resets_screen_clock() {
        let mut app = app();
        app.tick(ms(500));
        app.set_screen(Screen::section_view(Section::Skills));
        assert_eq!(app.screen_elapsed(), Duration::ZERO);

        app.tick(ms(200));
        // Moving the cursor within the same section keeps the clock.
        app.set_screen(Screen::Section { section: Section::Skills, cursor: 1 });
        assert_eq!(app.screen_elapsed(), ms(200));
    }

    #[test]
    fn easter_egg_keeps_underlying_section() {
        let screen = Screen::EasterEgg {
            previous: Box::new(Screen::section_view(Section::Projects)),
        };
        assert_eq!(screen.section(), Some(Section::Projects));
        assert_eq!(Screen::Hero.section(), None);
    }

    #[test]
    fn toasts_expire_with_app_time() {
        let mut app = app();
        app.notify(ToastKind::Info, "hello");
        assert_eq!(app.toasts.visible().len(), 1);
        app.tick(ms(2_999));
        assert_eq!(app.toasts.visible().len(), 1);
        app.tick(ms(1));
        assert!(app.toasts.is_empty());
    }

    #[test]
    fn dismiss_toast_closes_newest_first() {
        let mut app = app();
        app.notify(ToastKind::Info, "older");
        app.notify(ToastKind::Success, "newer");

        assert!(app.dismiss_toast());
        assert_eq!(app.toasts.visible().len(), 1);
        assert_eq!(app.toasts.visible()[0].message, "older");

        assert!(app.dismiss_toast());
        assert!(!app.dismiss_toast());
    }

    #[test]
    fn skills_screen_animates_until_settled() {
        let mut app = App::new(PortfolioData::default(), &Config::default());
        app.profile.skills = vec!["Rust".into(), "Go".into()];
        // Empty profile hero still has three entries to type.
        app.tick(Duration::from_secs(60));
        assert!(app.hero.is_idle());
        assert!(!app.animating());

        app.set_screen(Screen::section_view(Section::Skills));
        assert!(app.animating());
        app.tick(ms(1_100));
        assert!(!app.animating());
    }

    #[test]
    fn apply_returns_effects_and_sets_quit() {
        let mut app = app();
        let effect = app.apply(Transition::Effect {
            screen: Screen::section_view(Section::Contact),
            effect: Effect::CopyToClipboard("a@b.c".into()),
        });
        assert_eq!(effect, Some(Effect::CopyToClipboard("a@b.c".into())));
        assert_eq!(app.screen.section(), Some(Section::Contact));

        assert_eq!(app.apply(Transition::Quit), None);
        assert!(app.should_quit);
    }
}
