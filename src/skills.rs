//! Skill meters that fill one after another.
//!
//! Bar `i` starts filling `i × STAGGER` after the skills view opens and
//! reaches its level `FILL` later, easing out.

use std::time::Duration;

pub const STAGGER: Duration = Duration::from_millis(100);
pub const FILL: Duration = Duration::from_millis(1000);

/// Progress (0..=level) of bar `index` at `elapsed` since the view opened.
pub fn progress(index: usize, level: u8, elapsed: Duration) -> u8 {
    let start = STAGGER.saturating_mul(index as u32);
    if elapsed <= start {
        return 0;
    }
    let t = elapsed - start;
    if t >= FILL {
        return level;
    }
    let x = t.as_secs_f64() / FILL.as_secs_f64();
    let eased = 1.0 - (1.0 - x) * (1.0 - x);
    (f64::from(level) * eased).round() as u8
}

/// True once every one of `count` bars is full.
pub fn settled(count: usize, elapsed: Duration) -> bool {
    match count {
        0 => true,
        n => elapsed >= STAGGER.saturating_mul((n - 1) as u32) + FILL,
    }
}

/// Text bar of `width` cells for a 0-100 percentage.
pub fn meter(percent: u8, width: usize) -> String {
    let filled = (usize::from(percent.min(100)) * width + 50) / 100;
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(width - filled));
    bar
}
