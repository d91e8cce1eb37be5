#![forbid(unsafe_code)]

//! Deferred task scheduling on a virtual clock.
//!
//! Widgets never spawn timers themselves. They describe deferred work as a
//! task value and hand it to a [`Scheduler`]; the host decides when time
//! passes. [`TimerQueue`] is the deterministic implementation used by the
//! cooperative host loop and by tests: nothing fires until the owner asks
//! for due tasks.
//!
//! # Invariants
//!
//! 1. The virtual clock never moves backwards.
//! 2. Tasks pop in deadline order; equal deadlines pop in scheduling order.
//! 3. A task is never popped before its deadline.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use web_time::Duration;

/// Identifier of a scheduled task, unique per queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Raw value, for logging.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Something that can run a task after a delay.
///
/// A zero delay means "next turn": after the current call stack has
/// returned, never synchronously.
pub trait Scheduler<T> {
    /// Schedule `task` to run `delay` after the current instant.
    fn schedule(&mut self, delay: Duration, task: T) -> TimerId;
}

struct Entry<T> {
    due: Duration,
    seq: u64,
    task: T,
}

impl<T> Entry<T> {
    fn key(&self) -> (Duration, u64) {
        (self.due, self.seq)
    }
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Deterministic min-heap of tasks keyed by virtual deadline.
pub struct TimerQueue<T> {
    now: Duration,
    next_seq: u64,
    heap: BinaryHeap<Reverse<Entry<T>>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for TimerQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerQueue")
            .field("now", &self.now)
            .field("pending", &self.heap.len())
            .field("next_deadline", &self.next_deadline())
            .finish()
    }
}

impl<T> TimerQueue<T> {
    /// Create an empty queue with the clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            heap: BinaryHeap::new(),
        }
    }

    /// Current virtual time.
    #[inline]
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Number of pending tasks.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether no task is pending.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Deadline of the earliest pending task.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.heap.peek().map(|Reverse(entry)| entry.due)
    }

    /// Pop the earliest task whose deadline is at or before `limit`.
    ///
    /// The clock moves forward to that task's deadline, so anything the
    /// task schedules is measured from the moment it ran.
    pub fn pop_until(&mut self, limit: Duration) -> Option<(TimerId, T)> {
        if self.next_deadline()? > limit {
            return None;
        }
        let Reverse(entry) = self.heap.pop()?;
        self.now = self.now.max(entry.due);
        Some((TimerId(entry.seq), entry.task))
    }

    /// Pop the earliest task that is already due.
    pub fn pop_due(&mut self) -> Option<(TimerId, T)> {
        self.pop_until(self.now)
    }

    /// Move the clock to `instant`. Earlier instants are ignored.
    pub fn advance_to(&mut self, instant: Duration) {
        self.now = self.now.max(instant);
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&mut self, delta: Duration) {
        self.now = self.now.saturating_add(delta);
    }

    /// Drop every pending task.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

impl<T> Scheduler<T> for TimerQueue<T> {
    fn schedule(&mut self, delay: Duration, task: T) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let due = self.now.saturating_add(delay);
        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "flipcard.timer",
            message = "timer.schedule",
            timer_id = seq,
            due_ms = due.as_millis() as u64
        );
        self.heap.push(Reverse(Entry { due, seq, task }));
        TimerId(seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn nothing_is_due_before_its_deadline() {
        let mut q = TimerQueue::new();
        q.schedule(ms(10), "a");
        assert!(q.pop_due().is_none());
        q.advance(ms(9));
        assert!(q.pop_due().is_none());
        q.advance(ms(1));
        assert_eq!(q.pop_due().map(|(_, t)| t), Some("a"));
        assert!(q.is_empty());
    }

    #[test]
    fn zero_delay_is_due_on_next_pop_not_synchronously() {
        let mut q = TimerQueue::new();
        q.schedule(Duration::ZERO, 1);
        assert_eq!(q.len(), 1);
        assert_eq!(q.pop_due().map(|(_, t)| t), Some(1));
    }

    #[test]
    fn equal_deadlines_pop_in_fifo_order() {
        let mut q = TimerQueue::new();
        q.schedule(ms(5), 'x');
        q.schedule(ms(5), 'y');
        q.schedule(ms(1), 'w');
        q.schedule(ms(5), 'z');
        q.advance(ms(5));
        let order: Vec<char> = std::iter::from_fn(|| q.pop_due().map(|(_, t)| t)).collect();
        assert_eq!(order, vec!['w', 'x', 'y', 'z']);
    }

    #[test]
    fn pop_until_moves_clock_to_task_deadline() {
        let mut q = TimerQueue::new();
        q.schedule(ms(100), ());
        let popped = q.pop_until(ms(600));
        assert!(popped.is_some());
        assert_eq!(q.now(), ms(100));
        // Scheduled from inside the task: measured from 100ms.
        q.schedule(ms(50), ());
        assert_eq!(q.next_deadline(), Some(ms(150)));
    }

    #[test]
    fn clock_never_moves_backwards() {
        let mut q: TimerQueue<()> = TimerQueue::new();
        q.advance_to(ms(30));
        q.advance_to(ms(10));
        assert_eq!(q.now(), ms(30));
    }

    #[test]
    fn timer_ids_are_unique() {
        let mut q = TimerQueue::new();
        let a = q.schedule(ms(1), ());
        let b = q.schedule(ms(1), ());
        assert_ne!(a, b);
        assert!(b.get() > a.get());
    }
}
