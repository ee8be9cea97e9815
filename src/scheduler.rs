//! Timer queue for deferred calibration transitions.
//!
//! A small min-heap of `(deadline, generation)` entries over a virtual clock.
//! Nothing here sleeps: callers move the clock forward explicitly, either by
//! a fixed amount (tests, `--fast` runs) or after awaiting real time.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::time::Duration;

/// Handle returned by [`TimerQueue::schedule`], used to cancel a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Eq, PartialEq)]
struct TimerEntry {
    deadline: Duration,
    generation: u64,
}

impl Ord for TimerEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (earliest deadline first, then FIFO).
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.generation.cmp(&self.generation))
    }
}

impl PartialOrd for TimerEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Deadline-ordered queue of events with cancellable handles.
#[derive(Debug)]
pub struct TimerQueue<E> {
    now: Duration,
    heap: BinaryHeap<TimerEntry>,
    events: HashMap<u64, E>,
    next_generation: u64,
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            heap: BinaryHeap::new(),
            events: HashMap::new(),
            next_generation: 0,
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of live (not fired, not cancelled) timers.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Schedule `event` to fire `delay` after the current virtual time.
    pub fn schedule(&mut self, delay: Duration, event: E) -> TimerHandle {
        let generation = self.next_generation;
        self.next_generation += 1;
        self.heap.push(TimerEntry {
            deadline: self.now + delay,
            generation,
        });
        self.events.insert(generation, event);
        TimerHandle(generation)
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    ///
    /// The heap entry is left in place and skipped lazily when popped.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.events.remove(&handle.0).is_some()
    }

    /// Earliest live deadline, if any.
    pub fn next_deadline(&mut self) -> Option<Duration> {
        self.discard_cancelled();
        self.heap.peek().map(|entry| entry.deadline)
    }

    /// Time remaining until the earliest live deadline.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        let now = self.now;
        self.next_deadline()
            .map(|deadline| deadline.saturating_sub(now))
    }

    /// Pop the earliest live event due at or before `until`.
    ///
    /// The clock moves to the event's deadline, so events scheduled while
    /// handling it are relative to the moment it fired.
    pub fn pop_due(&mut self, until: Duration) -> Option<(Duration, E)> {
        self.discard_cancelled();
        let due = matches!(self.heap.peek(), Some(entry) if entry.deadline <= until);
        if !due {
            return None;
        }
        let entry = self.heap.pop()?;
        let event = self.events.remove(&entry.generation)?;
        if entry.deadline > self.now {
            self.now = entry.deadline;
        }
        Some((entry.deadline, event))
    }

    /// Move the clock forward to `t`. The clock never moves backwards.
    pub fn advance_clock_to(&mut self, t: Duration) {
        if t > self.now {
            self.now = t;
        }
    }

    fn discard_cancelled(&mut self) {
        while let Some(entry) = self.heap.peek() {
            if self.events.contains_key(&entry.generation) {
                break;
            }
            self.heap.pop();
        }
    }
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}
