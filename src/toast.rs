//! Toast notifications.
//!
//! The queue is plain data owned by the TUI's `App`; whoever holds the
//! app can notify. Toasts expire by elapsed app time, not wall time.

use std::time::Duration;

/// Default time a toast stays on screen.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
    Warning,
}

impl ToastKind {
    /// Single-glyph icon shown before the message.
    pub fn icon(self) -> &'static str {
        match self {
            ToastKind::Success => "✔",
            ToastKind::Error => "✖",
            ToastKind::Info => "ℹ",
            ToastKind::Warning => "!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    /// App time the toast was raised.
    pub shown_at: Duration,
}

#[derive(Debug, Clone)]
pub struct ToastQueue {
    lifetime: Duration,
    next_id: u64,
    toasts: Vec<Toast>,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(TOAST_LIFETIME)
    }
}

impl ToastQueue {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            lifetime,
            next_id: 0,
            toasts: Vec::new(),
        }
    }

    /// Raise a toast at app time `now`. Returns its id.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>, now: Duration) -> u64 {
        self.next_id += 1;
        self.toasts.push(Toast {
            id: self.next_id,
            kind,
            message: message.into(),
            shown_at: now,
        });
        self.next_id
    }

    /// Drop toasts older than the lifetime. Returns how many were removed.
    pub fn expire(&mut self, now: Duration) -> usize {
        let before = self.toasts.len();
        let lifetime = self.lifetime;
        self.toasts
            .retain(|t| now.saturating_sub(t.shown_at) < lifetime);
        before - self.toasts.len()
    }

    /// Remove a toast early.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    /// Visible toasts, oldest first.
    pub fn visible(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
