//! Konami code detection: ↑ ↑ ↓ ↓ ← → ← → B A.
//!
//! Keeps the last ten normalized keys and unlocks once when they spell
//! the code. Key normalization from terminal events lives in the TUI.

use std::collections::VecDeque;

/// Keys that matter to the code. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KonamiKey {
    Up,
    Down,
    Left,
    Right,
    B,
    A,
    Other,
}

pub const SEQUENCE: [KonamiKey; 10] = [
    KonamiKey::Up,
    KonamiKey::Up,
    KonamiKey::Down,
    KonamiKey::Down,
    KonamiKey::Left,
    KonamiKey::Right,
    KonamiKey::Left,
    KonamiKey::Right,
    KonamiKey::B,
    KonamiKey::A,
];

#[derive(Debug, Clone, Default)]
pub struct KonamiTracker {
    recent: VecDeque<KonamiKey>,
    unlocked: bool,
}

impl KonamiTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns true only on the press that unlocks.
    pub fn press(&mut self, key: KonamiKey) -> bool {
        if self.unlocked {
            return false;
        }
        if self.recent.len() == SEQUENCE.len() {
            self.recent.pop_front();
        }
        self.recent.push_back(key);

        if self.recent.iter().eq(SEQUENCE.iter()) {
            self.unlocked = true;
            self.recent.clear();
            return true;
        }
        false
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }
}
