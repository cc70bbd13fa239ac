//! Typewriter sequencer: the pure state machine behind the hero terminal.
//!
//! Each [`CommandEntry`] is revealed in two phases. First its command is
//! typed one character per tick, then (after a short pause) its output,
//! then the line is closed and the next entry starts. After the last
//! entry the sequencer parks in [`Phase::Idle`] for good.
//!
//! Nothing here knows about clocks or timers. [`transition`] applies a
//! single tick and [`next_delay`] says how long the host should wait
//! before the next one. The host owns the timer (see `hero`).
//!
//! Character indices count `char`s, not bytes, so revealed text is always
//! a valid prefix of the source string.

use std::time::Duration;

// ============================================================================
// TIMING
// ============================================================================

/// Delay between command characters.
pub const COMMAND_CHAR_DELAY: Duration = Duration::from_millis(80);

/// Pause between a finished command and its first output character.
pub const COMMAND_PAUSE: Duration = Duration::from_millis(300);

/// Pause between a finished output and the next command.
pub const LINE_PAUSE: Duration = Duration::from_millis(500);

/// Fixed delays that do not depend on the entry.
///
/// Output speed is per-entry ([`CommandEntry::char_delay`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub command_char_delay: Duration,
    pub command_pause: Duration,
    pub line_pause: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            command_char_delay: COMMAND_CHAR_DELAY,
            command_pause: COMMAND_PAUSE,
            line_pause: LINE_PAUSE,
        }
    }
}

// ============================================================================
// TYPES
// ============================================================================

/// One command/output pair to reveal. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEntry {
    command: String,
    output: String,
    char_delay: Duration,
}

impl CommandEntry {
    pub fn new(command: impl Into<String>, output: impl Into<String>, char_delay_ms: u64) -> Self {
        Self {
            command: command.into(),
            output: output.into(),
            char_delay: Duration::from_millis(char_delay_ms),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Delay between output characters.
    pub fn char_delay(&self) -> Duration {
        self.char_delay
    }
}

/// What the sequencer is currently typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    TypingCommand,
    TypingOutput,
    /// Terminal state. No further mutation.
    Idle,
}

/// The visible part of one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealedLine {
    /// Prefix of the entry's command.
    pub command: String,
    /// Prefix of the entry's output.
    pub output: String,
    /// True until the line's output has been fully revealed and closed.
    pub is_active: bool,
}

/// Complete sequencer state. Snapshots of this are what gets rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequencerState {
    /// Entry being typed. Never decreases.
    pub line_index: usize,
    /// Characters of the current phase already revealed.
    pub char_index: usize,
    pub phase: Phase,
    /// One line per entry that has started, in entry order.
    pub revealed_lines: Vec<RevealedLine>,
}

impl SequencerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }
}

/// Observable effect of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// One character appended to `line` in the given phase.
    Reveal { line: usize, phase: Phase },
    /// Command finished; output phase begins.
    CommandComplete { line: usize },
    /// Output finished; line closed and index advanced.
    LineComplete { line: usize },
    /// All entries done.
    Idle,
}

impl Step {
    /// Command-complete and line-complete are the two phase transitions
    /// per entry. Character reveals and the final idle step are not.
    pub fn is_phase_transition(&self) -> bool {
        matches!(self, Step::CommandComplete { .. } | Step::LineComplete { .. })
    }
}

/// Where the blinking cursor is drawn for a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorSlot {
    /// After the command text of this line.
    Command(usize),
    /// After the output text of this line.
    Output(usize),
    /// On an empty prompt for a line that has not started yet.
    Placeholder,
    /// On the final prompt once idle.
    Prompt,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// How long to wait before the next tick. `None` once idle.
pub fn next_delay(state: &SequencerState, entries: &[CommandEntry], timing: &Timing) -> Option<Duration> {
    let entry = match state.phase {
        Phase::Idle => return None,
        _ => match entries.get(state.line_index) {
            Some(entry) => entry,
            // Past the last entry: settle into idle right away.
            None => return Some(Duration::ZERO),
        },
    };

    let delay = match state.phase {
        Phase::TypingCommand if state.char_index < char_len(&entry.command) => timing.command_char_delay,
        Phase::TypingCommand => timing.command_pause,
        Phase::TypingOutput if state.char_index < char_len(&entry.output) => entry.char_delay,
        Phase::TypingOutput => timing.line_pause,
        Phase::Idle => return None,
    };
    Some(delay)
}

/// Apply one tick. Returns the next state and what happened, or `None`
/// when the state is idle (and therefore unchanged).
pub fn transition(mut state: SequencerState, entries: &[CommandEntry]) -> (SequencerState, Option<Step>) {
    if state.phase == Phase::Idle {
        return (state, None);
    }

    let line = state.line_index;
    let Some(entry) = entries.get(line) else {
        state.phase = Phase::Idle;
        state.char_index = 0;
        return (state, Some(Step::Idle));
    };

    if state.revealed_lines.len() <= line {
        state.revealed_lines.push(RevealedLine {
            is_active: true,
            ..Default::default()
        });
    }

    let step = match state.phase {
        Phase::TypingCommand => {
            if state.char_index < char_len(&entry.command) {
                state.char_index += 1;
                state.revealed_lines[line].command = prefix(&entry.command, state.char_index).to_string();
                Step::Reveal { line, phase: Phase::TypingCommand }
            } else {
                state.phase = Phase::TypingOutput;
                state.char_index = 0;
                Step::CommandComplete { line }
            }
        }
        Phase::TypingOutput => {
            if state.char_index < char_len(&entry.output) {
                state.char_index += 1;
                state.revealed_lines[line].output = prefix(&entry.output, state.char_index).to_string();
                Step::Reveal { line, phase: Phase::TypingOutput }
            } else {
                state.revealed_lines[line].is_active = false;
                state.line_index += 1;
                state.phase = Phase::TypingCommand;
                state.char_index = 0;
                Step::LineComplete { line }
            }
        }
        Phase::Idle => return (state, None),
    };

    (state, Some(step))
}

/// `(state, elapsed ticks) -> state`: apply up to `ticks` transitions.
pub fn advance(mut state: SequencerState, entries: &[CommandEntry], ticks: usize) -> SequencerState {
    for _ in 0..ticks {
        let (next, step) = transition(state, entries);
        state = next;
        if step.is_none() {
            break;
        }
    }
    state
}

/// Run a fresh sequencer to idle, collecting every step.
pub fn run_to_idle(entries: &[CommandEntry]) -> (SequencerState, Vec<Step>) {
    let mut state = SequencerState::new();
    let mut steps = Vec::new();
    loop {
        let (next, step) = transition(state, entries);
        state = next;
        match step {
            Some(step) => steps.push(step),
            None => break,
        }
    }
    (state, steps)
}

/// Cursor placement for rendering.
pub fn cursor_slot(state: &SequencerState) -> CursorSlot {
    match state.phase {
        Phase::Idle => CursorSlot::Prompt,
        _ if state.line_index >= state.revealed_lines.len() => CursorSlot::Placeholder,
        Phase::TypingCommand => CursorSlot::Command(state.line_index),
        Phase::TypingOutput => CursorSlot::Output(state.line_index),
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// First `n` chars of `s`.
fn prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((byte, _)) => &s[..byte],
        None => s,
    }
}

// ============================================================================
// TESTS
// ============================================================================
