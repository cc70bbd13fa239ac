//! Pure state transitions: (Screen, Action) → Transition.
//!
//! Fully testable without a terminal. Each screen defines which actions
//! it accepts. Unhandled actions return the current screen unchanged.

use tracing::info;

use crate::konami::KonamiKey;
use crate::toast::ToastKind;
use crate::types::{PortfolioData, Section};

use super::state::{Action, App, Effect, Screen, Transition};

/// Pure state transition function.
///
/// Given the current screen, an action, and the profile, produces the
/// next transition. The effects boundary interprets the result.
pub fn update(screen: Screen, action: &Action, profile: &PortfolioData) -> Transition {
    if *action == Action::Quit {
        return Transition::Quit;
    }
    match screen {
        Screen::Hero => update_hero(action, profile),
        Screen::Section { section, cursor } => update_section(section, cursor, action, profile),
        Screen::EasterEgg { previous } => update_easter_egg(previous, action),
    }
}

// ============================================================================
// PER-SCREEN HANDLERS
// ============================================================================

/// Hero: section navigation and contact shortcuts.
fn update_hero(action: &Action, profile: &PortfolioData) -> Transition {
    match action {
        Action::NextSection => Transition::Screen(Screen::section_view(Section::Identity)),
        Action::PrevSection => Transition::Screen(Screen::section_view(Section::Contact)),
        Action::NumberKey(n) => match Section::from_number(*n) {
            Some(section) => Transition::Screen(Screen::section_view(section)),
            None => Transition::Screen(Screen::Hero),
        },
        _ => contact_shortcut(Screen::Hero, action, profile),
    }
}

/// Section: switch sections, move the cursor, open the focused item.
fn update_section(section: Section, cursor: usize, action: &Action, profile: &PortfolioData) -> Transition {
    let len = row_count(section, profile);
    let current = Screen::Section { section, cursor };

    match action {
        Action::NextSection => Transition::Screen(Screen::section_view(section.next())),
        Action::PrevSection => Transition::Screen(Screen::section_view(section.prev())),
        Action::NumberKey(n) => match Section::from_number(*n) {
            Some(target) if target != section => Transition::Screen(Screen::section_view(target)),
            _ => Transition::Screen(current),
        },
        Action::Home => Transition::Screen(Screen::Hero),
        Action::MoveUp => Transition::Screen(Screen::Section {
            section,
            cursor: cursor.saturating_sub(1),
        }),
        Action::MoveDown => {
            let new_cursor = if len == 0 { 0 } else { (cursor + 1).min(len - 1) };
            Transition::Screen(Screen::Section { section, cursor: new_cursor })
        }
        Action::Enter => match section {
            Section::Projects => match profile.project_link(cursor) {
                Some(link) => Transition::Effect {
                    screen: current,
                    effect: Effect::OpenLink(link.to_string()),
                },
                None => Transition::Screen(current),
            },
            Section::Contact if !profile.email.trim().is_empty() => Transition::Effect {
                screen: current,
                effect: Effect::OpenLink(format!("mailto:{}", profile.email)),
            },
            _ => Transition::Screen(current),
        },
        _ => contact_shortcut(current, action, profile),
    }
}

/// EasterEgg: any close key returns to the interrupted screen.
fn update_easter_egg(previous: Box<Screen>, action: &Action) -> Transition {
    match action {
        Action::Dismiss | Action::Home | Action::Enter => Transition::Screen(*previous),
        _ => Transition::Screen(Screen::EasterEgg { previous }),
    }
}

/// Copy-email and open-profile shortcuts, available on every screen
/// outside the modal.
fn contact_shortcut(screen: Screen, action: &Action, profile: &PortfolioData) -> Transition {
    let effect = match action {
        Action::CopyEmail if !profile.email.trim().is_empty() => {
            Some(Effect::CopyToClipboard(profile.email.clone()))
        }
        Action::OpenGithub => non_blank(&profile.github).map(Effect::OpenLink),
        Action::OpenLinkedin => non_blank(&profile.linkedin).map(Effect::OpenLink),
        _ => None,
    };
    match effect {
        Some(effect) => Transition::Effect { screen, effect },
        None => Transition::Screen(screen),
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

/// Number of cursor rows in a section.
pub fn row_count(section: Section, profile: &PortfolioData) -> usize {
    match section {
        Section::Skills => profile.skills.len(),
        Section::Experience => profile.experiences.len(),
        Section::Projects => profile.projects.len(),
        Section::Identity | Section::Contact => 0,
    }
}

// ============================================================================
// KONAMI
// ============================================================================

/// Feed a key to the Konami tracker. On unlock, open the easter egg over
/// the current screen and raise a toast. Returns true on unlock.
pub fn handle_konami(app: &mut App, key: KonamiKey) -> bool {
    if !app.konami.press(key) {
        return false;
    }
    info!("konami code unlocked");
    let previous = std::mem::take(&mut app.screen);
    app.screen = Screen::EasterEgg {
        previous: Box::new(previous),
    };
    app.notify(ToastKind::Success, "CHEAT CODE ACTIVATED");
    true
}

// ============================================================================
// TESTS
// ============================================================================
