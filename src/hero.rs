//! Terminal hero: hosts the typewriter sequencer and the blinking cursor.
//!
//! Two concerns, one timer each:
//! - `Typing`: re-armed after every sequencer tick with the delay the
//!   sequencer asks for, until it goes idle.
//! - `CursorBlink`: toggles cursor visibility on a fixed half-period,
//!   forever, independent of typing.
//!
//! The hero owns its timers. [`TerminalHero::dispose`] cancels both and
//! freezes the state; dropping the hero disposes it.

use std::io;
use std::time::Duration;

use tracing::{debug, info};

use crate::sequencer::{self, CommandEntry, CursorSlot, Phase, SequencerState, Step, Timing};
use crate::timer::TimerQueue;

/// Default cursor blink half-period.
pub const CURSOR_BLINK: Duration = Duration::from_millis(530);

/// Timer concerns owned by the hero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TimerKind {
    Typing,
    CursorBlink,
}

/// Something that changed during [`TerminalHero::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroEvent {
    Step(Step),
    CursorToggled { visible: bool },
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroSnapshot {
    pub state: SequencerState,
    pub cursor_visible: bool,
    pub cursor: CursorSlot,
}

#[derive(Debug)]
pub struct TerminalHero {
    entries: Vec<CommandEntry>,
    timing: Timing,
    blink: Duration,
    state: SequencerState,
    cursor_visible: bool,
    timers: TimerQueue<TimerKind>,
    /// Bumped on every state or cursor mutation.
    revision: u64,
    disposed: bool,
}

impl TerminalHero {
    /// Mount the hero and arm both timers.
    ///
    /// Zero-delay work (an empty entry list going idle) happens here, so
    /// an empty hero is idle as soon as it is mounted.
    pub fn mount(entries: Vec<CommandEntry>, timing: Timing, blink: Duration) -> Self {
        Self::mount_with(entries, timing, blink, |_, _| {})
    }

    /// [`TerminalHero::mount`], reporting the zero-delay events to `on_event`.
    pub fn mount_with(
        entries: Vec<CommandEntry>,
        timing: Timing,
        blink: Duration,
        on_event: impl FnMut(&SequencerState, HeroEvent),
    ) -> Self {
        let blink = blink.max(Duration::from_millis(1));
        let mut hero = Self {
            entries,
            timing,
            blink,
            state: SequencerState::new(),
            cursor_visible: true,
            timers: TimerQueue::new(),
            revision: 0,
            disposed: false,
        };
        hero.arm_typing();
        hero.timers.schedule(TimerKind::CursorBlink, blink);
        info!(entries = hero.entries.len(), "hero mounted");
        hero.advance_with(Duration::ZERO, on_event);
        hero
    }

    /// Advance virtual time by `elapsed`, firing every timer that falls due
    /// in order. Returns what changed. Does nothing once disposed.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<HeroEvent> {
        let mut events = Vec::new();
        self.advance_with(elapsed, |_, event| events.push(event));
        events
    }

    /// Like [`TerminalHero::advance`], but hands each event to `on_event`
    /// together with the state as it was right after that event.
    pub fn advance_with(&mut self, elapsed: Duration, mut on_event: impl FnMut(&SequencerState, HeroEvent)) {
        if self.disposed {
            return;
        }

        let until = self.timers.now() + elapsed;
        while let Some(kind) = self.timers.pop_due(until) {
            match kind {
                TimerKind::Typing => {
                    if let Some(step) = self.fire_typing() {
                        on_event(&self.state, HeroEvent::Step(step));
                    }
                }
                TimerKind::CursorBlink => {
                    self.cursor_visible = !self.cursor_visible;
                    self.revision += 1;
                    self.timers.schedule(TimerKind::CursorBlink, self.blink);
                    let visible = self.cursor_visible;
                    on_event(&self.state, HeroEvent::CursorToggled { visible });
                }
            }
        }
        self.timers.advance_to(until);
    }

    /// Cancel all timers. Safe to call any number of times.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        let cancelled = [TimerKind::Typing, TimerKind::CursorBlink]
            .into_iter()
            .filter(|&kind| self.timers.cancel(kind))
            .count();
        self.disposed = true;
        info!(cancelled, idle = self.state.is_idle(), "hero disposed");
    }

    pub fn is_idle(&self) -> bool {
        self.state.is_idle()
    }

    pub fn state(&self) -> &SequencerState {
        &self.state
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Mutation counter; unchanged means nothing needs redrawing.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of outstanding timers (0 after disposal).
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Virtual time elapsed since mount.
    pub fn elapsed(&self) -> Duration {
        self.timers.now()
    }

    /// Time until the next timer fires, if any.
    pub fn time_to_next_tick(&self) -> Option<Duration> {
        self.timers
            .next_deadline()
            .map(|at| at.saturating_sub(self.timers.now()))
    }

    pub fn snapshot(&self) -> HeroSnapshot {
        HeroSnapshot {
            state: self.state.clone(),
            cursor_visible: self.cursor_visible,
            cursor: sequencer::cursor_slot(&self.state),
        }
    }

    fn fire_typing(&mut self) -> Option<Step> {
        let state = std::mem::take(&mut self.state);
        let (next, step) = sequencer::transition(state, &self.entries);
        self.state = next;
        if let Some(step) = step {
            self.revision += 1;
            if !matches!(step, Step::Reveal { .. }) {
                debug!(?step, line = self.state.line_index, "hero phase change");
            }
        }
        self.arm_typing();
        step
    }

    fn arm_typing(&mut self) {
        if let Some(delay) = sequencer::next_delay(&self.state, &self.entries, &self.timing) {
            self.timers.schedule(TimerKind::Typing, delay);
        }
    }
}

impl Drop for TerminalHero {
    fn drop(&mut self) {
        self.dispose();
    }
}

// ============================================================================
// PLAIN TEXT
// ============================================================================

/// The revealed lines as plain text, one prompt per command.
pub fn transcript(state: &SequencerState) -> String {
    let mut out = String::new();
    for line in &state.revealed_lines {
        out.push_str(&format!("❯ {}\n", line.command));
        if !line.output.is_empty() {
            out.push_str(&format!("  {}\n", line.output));
        }
    }
    if state.is_idle() {
        out.push_str("❯\n");
    }
    out
}

/// Play a hero on a plain text stream until it goes idle.
///
/// `wait` is called with each delay before the clock moves by it, and
/// `emit` receives the echoed text of every batch of steps. Returns the
/// final state, whose [`transcript`] equals everything emitted.
pub fn stream(
    entries: Vec<CommandEntry>,
    timing: Timing,
    blink: Duration,
    mut wait: impl FnMut(Duration),
    mut emit: impl FnMut(&str) -> io::Result<()>,
) -> io::Result<SequencerState> {
    let mut text = String::new();
    let mut hero = TerminalHero::mount_with(entries, timing, blink, |state, event| {
        echo_event(&mut text, state, event)
    });
    loop {
        if !text.is_empty() {
            emit(&text)?;
            text.clear();
        }
        if hero.is_idle() {
            break;
        }
        let delay = hero.time_to_next_tick().unwrap_or(Duration::ZERO);
        wait(delay);
        hero.advance_with(delay, |state, event| echo_event(&mut text, state, event));
    }
    hero.dispose();
    Ok(hero.state().clone())
}

fn echo_event(text: &mut String, state: &SequencerState, event: HeroEvent) {
    if let HeroEvent::Step(step) = event {
        text.push_str(&echo(state, step));
    }
}

/// Text to append to a plain stream after `step` produced `state`.
///
/// Echoing every step of a run, in order, writes exactly the
/// [`transcript`] of its final state.
pub fn echo(state: &SequencerState, step: Step) -> String {
    match step {
        Step::Reveal { line, phase } => {
            let Some(revealed) = state.revealed_lines.get(line) else {
                return String::new();
            };
            let (text, lead) = match phase {
                Phase::TypingOutput => (&revealed.output, "  "),
                _ => (&revealed.command, "❯ "),
            };
            let ch = text.chars().last().map(String::from).unwrap_or_default();
            if state.char_index == 1 { format!("{}{}", lead, ch) } else { ch }
        }
        Step::CommandComplete { line } => match state.revealed_lines.get(line) {
            Some(revealed) if revealed.command.is_empty() => "❯ \n".to_string(),
            _ => "\n".to_string(),
        },
        Step::LineComplete { line } => match state.revealed_lines.get(line) {
            Some(revealed) if !revealed.output.is_empty() => "\n".to_string(),
            _ => String::new(),
        },
        Step::Idle => "❯\n".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn mount(entries: Vec<CommandEntry>) -> TerminalHero {
        TerminalHero::mount(entries, Timing::default(), CURSOR_BLINK)
    }

    fn steps(events: &[HeroEvent]) -> Vec<Step> {
        events
            .iter()
            .filter_map(|e| match e {
                HeroEvent::Step(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn mount_arms_one_timer_per_concern() {
        let hero = mount(vec![CommandEntry::new("whoami", "Jane Doe", 50)]);
        assert_eq!(hero.pending_timers(), 2);
        assert!(hero.cursor_visible());
        assert_eq!(hero.time_to_next_tick(), Some(ms(80)));
    }

    #[test]
    fn first_character_appears_after_command_delay() {
        let mut hero = mount(vec![CommandEntry::new("whoami", "Jane Doe", 50)]);
        assert!(hero.advance(ms(79)).is_empty());
        assert!(hero.state().revealed_lines.is_empty());

        let events = hero.advance(ms(1));
        assert_eq!(steps(&events), vec![Step::Reveal { line: 0, phase: Phase::TypingCommand }]);
        assert_eq!(hero.state().revealed_lines[0].command, "w");
    }

    #[test]
    fn whoami_timeline() {
        let mut hero = mount(vec![CommandEntry::new("whoami", "Jane Doe", 50)]);

        // 6 chars at 80ms
        hero.advance(ms(480));
        assert_eq!(hero.state().revealed_lines[0].command, "whoami");
        assert_eq!(hero.state().phase, Phase::TypingCommand);

        // 300ms pause, then output phase
        hero.advance(ms(300));
        assert_eq!(hero.state().phase, Phase::TypingOutput);
        assert!(hero.state().revealed_lines[0].output.is_empty());

        // 8 chars at 50ms
        hero.advance(ms(400));
        assert_eq!(hero.state().revealed_lines[0].output, "Jane Doe");
        assert!(hero.state().revealed_lines[0].is_active);

        // 500ms pause closes the line, idle follows immediately
        hero.advance(ms(500));
        assert!(!hero.state().revealed_lines[0].is_active);
        assert!(hero.is_idle());
    }

    #[test]
    fn empty_entries_are_idle_on_mount() {
        let hero = mount(Vec::new());
        assert!(hero.is_idle());
        // Only the cursor keeps a timer
        assert_eq!(hero.pending_timers(), 1);
    }

    #[test]
    fn phase_transitions_counted_across_real_timeline() {
        let entries = vec![
            CommandEntry::new("whoami", "Jane Doe", 50),
            CommandEntry::new("cat role.txt", "// Engineer", 40),
            CommandEntry::new("cat bio.txt", "", 20),
        ];
        let mut hero = mount(entries);
        let events = hero.advance(Duration::from_secs(60));
        let steps = steps(&events);

        assert_eq!(steps.iter().filter(|s| s.is_phase_transition()).count(), 6);
        assert_eq!(steps.last(), Some(&Step::Idle));
        assert!(hero.is_idle());
    }

    #[test]
    fn dispose_stops_all_mutation() {
        let mut hero = mount(vec![CommandEntry::new("whoami", "Jane Doe", 50)]);
        hero.advance(ms(250));
        let before = hero.snapshot();
        let revision = hero.revision();

        hero.dispose();
        assert_eq!(hero.pending_timers(), 0);

        let events = hero.advance(Duration::from_secs(10));
        assert!(events.is_empty());
        assert_eq!(hero.snapshot(), before);
        assert_eq!(hero.revision(), revision);
    }

    #[test]
    fn dispose_is_idempotent() {
        let mut hero = mount(vec![CommandEntry::new("whoami", "Jane", 50)]);
        hero.dispose();
        hero.dispose();
        assert_eq!(hero.time_to_next_tick(), None);
    }

    #[test]
    fn cursor_blinks_while_idle() {
        let mut hero = mount(Vec::new());
        assert!(hero.is_idle());
        let state = hero.state().clone();

        let events = hero.advance(ms(530));
        assert_eq!(events, vec![HeroEvent::CursorToggled { visible: false }]);

        let events = hero.advance(ms(530));
        assert_eq!(events, vec![HeroEvent::CursorToggled { visible: true }]);

        let events = hero.advance(ms(530 * 4));
        assert_eq!(events.len(), 4);
        assert_eq!(hero.state(), &state);
    }

    #[test]
    fn cursor_blink_does_not_shift_typing() {
        let mut hero = mount(vec![CommandEntry::new("abcdefghij", "", 10)]);
        // 530ms covers one blink and 6 characters (80ms each)
        let events = hero.advance(ms(530));
        let toggles = events
            .iter()
            .filter(|e| matches!(e, HeroEvent::CursorToggled { .. }))
            .count();
        assert_eq!(toggles, 1);
        assert_eq!(hero.state().revealed_lines[0].command, "abcdef");
    }

    #[test]
    fn snapshot_reports_cursor_slot() {
        let mut hero = mount(vec![CommandEntry::new("ls", "ok", 10)]);
        assert_eq!(hero.snapshot().cursor, CursorSlot::Placeholder);
        hero.advance(ms(80));
        assert_eq!(hero.snapshot().cursor, CursorSlot::Command(0));
        hero.advance(Duration::from_secs(5));
        assert_eq!(hero.snapshot().cursor, CursorSlot::Prompt);
    }

    #[test]
    fn zero_blink_period_is_clamped() {
        let mut hero = TerminalHero::mount(Vec::new(), Timing::default(), Duration::ZERO);
        let events = hero.advance(ms(3));
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn transcript_of_finished_run() {
        let entries = vec![CommandEntry::new("whoami", "Ray", 50), CommandEntry::new("cat role.txt", "", 40)];
        let (state, _) = sequencer::run_to_idle(&entries);
        assert_eq!(transcript(&state), "❯ whoami\n  Ray\n❯ cat role.txt\n❯\n");
    }

    #[test]
    fn zero_delay_steps_at_mount_are_reported() {
        let timing = Timing {
            command_char_delay: Duration::ZERO,
            ..Timing::default()
        };
        let mut streamed = String::new();
        let hero = TerminalHero::mount_with(
            vec![CommandEntry::new("ls", "ok", 10)],
            timing,
            CURSOR_BLINK,
            |state, event| {
                if let HeroEvent::Step(step) = event {
                    streamed.push_str(&echo(state, step));
                }
            },
        );
        assert_eq!(hero.state().revealed_lines[0].command, "ls");
        assert_eq!(streamed, "❯ ls");
    }

    #[test]
    fn echoed_steps_spell_the_transcript() {
        let entries = vec![
            CommandEntry::new("whoami", "Rayhan Yoshara", 50),
            CommandEntry::new("cat role.txt", "", 40),
            CommandEntry::new("", "bio ✓", 20),
        ];
        let mut state = SequencerState::new();
        let mut streamed = String::new();
        loop {
            let (next, step) = sequencer::transition(state, &entries);
            state = next;
            match step {
                Some(step) => streamed.push_str(&echo(&state, step)),
                None => break,
            }
        }
        assert_eq!(streamed, transcript(&state));
    }
}
