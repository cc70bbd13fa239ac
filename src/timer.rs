//! Deferred timers on a virtual clock.
//!
//! A [`TimerQueue`] holds at most one pending timer per key ("concern").
//! Nothing fires on its own: the owner advances the clock and pops due
//! timers in deadline order, so the same code runs under real time (the
//! TUI loop feeds it measured elapsed time) and under tests (which feed
//! it arbitrary durations without sleeping).

use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Deadline {
    at: Duration,
    /// Scheduling order, breaks ties between equal deadlines.
    seq: u64,
}

/// Virtual-clock timer queue keyed by concern.
#[derive(Debug, Clone)]
pub struct TimerQueue<K> {
    now: Duration,
    seq: u64,
    pending: BTreeMap<K, Deadline>,
}

impl<K: Ord + Copy> Default for TimerQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Copy> TimerQueue<K> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            seq: 0,
            pending: BTreeMap::new(),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Arm `key` to fire `delay` from now.
    ///
    /// Replaces any timer already pending for `key`; returns true if one was.
    pub fn schedule(&mut self, key: K, delay: Duration) -> bool {
        self.seq += 1;
        let deadline = Deadline {
            at: self.now + delay,
            seq: self.seq,
        };
        self.pending.insert(key, deadline).is_some()
    }

    /// Cancel the timer for `key`. Cancelling an absent timer is a no-op.
    pub fn cancel(&mut self, key: K) -> bool {
        self.pending.remove(&key).is_some()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.earliest().map(|(_, d)| d.at)
    }

    /// Remove and return the earliest timer due at or before `until`,
    /// moving the clock to its deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<K> {
        let (key, deadline) = self.earliest()?;
        if deadline.at > until {
            return None;
        }
        self.pending.remove(&key);
        self.now = self.now.max(deadline.at);
        Some(key)
    }

    /// Move the clock forward to `until`. Never moves backwards.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    fn earliest(&self) -> Option<(K, Deadline)> {
        self.pending
            .iter()
            .min_by_key(|(_, d)| (d.at, d.seq))
            .map(|(k, d)| (*k, *d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    enum Key {
        A,
        B,
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn pops_in_deadline_order() {
        let mut q = TimerQueue::new();
        q.schedule(Key::A, ms(50));
        q.schedule(Key::B, ms(20));

        assert_eq!(q.pop_due(ms(100)), Some(Key::B));
        assert_eq!(q.now(), ms(20));
        assert_eq!(q.pop_due(ms(100)), Some(Key::A));
        assert_eq!(q.now(), ms(50));
        assert_eq!(q.pop_due(ms(100)), None);
    }

    #[test]
    fn ties_fire_in_scheduling_order() {
        let mut q = TimerQueue::new();
        q.schedule(Key::B, ms(10));
        q.schedule(Key::A, ms(10));
        assert_eq!(q.pop_due(ms(10)), Some(Key::B));
        assert_eq!(q.pop_due(ms(10)), Some(Key::A));
    }

    #[test]
    fn not_due_stays_pending() {
        let mut q = TimerQueue::new();
        q.schedule(Key::A, ms(80));
        assert_eq!(q.pop_due(ms(79)), None);
        assert_eq!(q.len(), 1);
        q.advance_to(ms(79));
        assert_eq!(q.now(), ms(79));
        assert_eq!(q.pop_due(ms(80)), Some(Key::A));
    }

    #[test]
    fn schedule_replaces_existing_timer_for_key() {
        let mut q = TimerQueue::new();
        assert!(!q.schedule(Key::A, ms(10)));
        assert!(q.schedule(Key::A, ms(30)));
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_deadline(), Some(ms(30)));
    }

    #[test]
    fn delays_are_relative_to_current_time() {
        let mut q = TimerQueue::new();
        q.advance_to(ms(100));
        q.schedule(Key::A, ms(5));
        assert_eq!(q.next_deadline(), Some(ms(105)));
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut q = TimerQueue::new();
        q.schedule(Key::A, ms(10));
        assert!(q.cancel(Key::A));
        assert!(!q.cancel(Key::A));
        assert!(!q.cancel(Key::B));
        assert!(q.is_empty());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut q = TimerQueue::new();
        q.schedule(Key::A, ms(10));
        q.schedule(Key::B, ms(20));
        assert!(q.cancel(Key::A));
        assert_eq!(q.pop_due(ms(1_000)), Some(Key::B));
        assert_eq!(q.pop_due(ms(1_000)), None);
    }

    #[test]
    fn clock_never_moves_backwards() {
        let mut q: TimerQueue<Key> = TimerQueue::new();
        q.advance_to(ms(50));
        q.advance_to(ms(10));
        assert_eq!(q.now(), ms(50));
    }
}
