//! TUI color semantics and style constants.
//!
//! Pure data, consumed by the rendering layer.
//!
//! Color semantics:
//! - Cyan: chrome and interactive elements (prompts, tabs, key hints)
//! - Green: terminal output and success
//! - Magenta: highlights (the active section, the unlock modal)
//! - Yellow: warnings and tags
//! - Red: errors
//! - Dim: de-emphasized (periods, placeholders)

use ratatui::style::{Color, Modifier, Style};

use crate::toast::ToastKind;

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

/// Success / terminal output, green.
pub const STYLE_SAFE: Style = Style::new().fg(Color::Green);

/// Warning / tags, yellow.
pub const STYLE_WARNING: Style = Style::new().fg(Color::Yellow);

/// Error, red.
pub const STYLE_DANGER: Style = Style::new().fg(Color::Red);

/// Interactive element / keybinding hint, cyan.
pub const STYLE_INTERACTIVE: Style = Style::new().fg(Color::Cyan);

/// Accent, magenta.
pub const STYLE_ACCENT: Style = Style::new().fg(Color::Magenta).add_modifier(Modifier::BOLD);

/// De-emphasized metadata, dark gray.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

/// Important text, bold white.
pub const STYLE_IMPORTANT: Style = Style::new().add_modifier(Modifier::BOLD);

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Title bar / header.
pub const STYLE_TITLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Active tab in the section bar.
pub const STYLE_TAB_ACTIVE: Style = Style::new().fg(Color::Black).bg(Color::Cyan);

/// Cursor row in a list.
pub const STYLE_CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Shell prompt in the hero window.
pub const STYLE_PROMPT: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Typed command text.
pub const STYLE_COMMAND: Style = Style::new().fg(Color::White);

/// Command output text.
pub const STYLE_OUTPUT: Style = Style::new().fg(Color::Green);

/// `whoami` output: the name.
pub const STYLE_NAME: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// `cat role.txt` output.
pub const STYLE_ROLE: Style = Style::new().fg(Color::Cyan);

/// `cat bio.txt` output.
pub const STYLE_BIO: Style = Style::new().fg(Color::Gray);

/// Block cursor.
pub const STYLE_CURSOR_BLOCK: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Window and modal borders.
pub const STYLE_BORDER: Style = Style::new().fg(Color::Cyan);

/// Skill meter fill.
pub const STYLE_PROGRESS: Style = Style::new().fg(Color::Cyan);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

/// Toast style by kind.
pub fn toast_style(kind: ToastKind) -> Style {
    match kind {
        ToastKind::Success => STYLE_SAFE,
        ToastKind::Error => STYLE_DANGER,
        ToastKind::Info => STYLE_INTERACTIVE,
        ToastKind::Warning => STYLE_WARNING,
    }
}

// ============================================================================
// TESTS
// ============================================================================
