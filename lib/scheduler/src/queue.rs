//! Delay queue.
//!
//! Tasks are scheduled relative to the queue's clock and released by
//! `pop_due` once their deadline has passed. Nothing fires on its own: a
//! driver sleeps until `next_deadline` and then pops.

use crate::clock::Clock;
use deskchat_core::TaskId;
use std::collections::BTreeMap;
use std::time::Duration;

/// A task released by the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTask<T> {
    /// Task identifier.
    pub id: TaskId,
    /// Elapsed clock time at which the task became due.
    pub due_at: Duration,
    /// The scheduled work.
    pub payload: T,
}

/// Tasks ordered by deadline, then by scheduling order.
pub struct DelayQueue<T, C> {
    clock: C,
    tasks: BTreeMap<(Duration, u64), (TaskId, T)>,
    next_seq: u64,
}

impl<T, C: Clock> DelayQueue<T, C> {
    /// Creates an empty queue driven by `clock`.
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            tasks: BTreeMap::new(),
            next_seq: 0,
        }
    }

    /// Returns the queue's current time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Returns the clock driving this queue.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Schedules `payload` to become due `delay` from now.
    pub fn schedule(&mut self, delay: Duration, payload: T) -> TaskId {
        let due_at = self.clock.now().saturating_add(delay);
        let id = TaskId::new();
        self.tasks.insert((due_at, self.next_seq), (id, payload));
        self.next_seq += 1;
        id
    }

    /// Returns the earliest deadline, if any task is queued.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.tasks.keys().next().map(|(due_at, _)| *due_at)
    }

    /// Removes and returns every task whose deadline has passed.
    pub fn pop_due(&mut self) -> Vec<ScheduledTask<T>> {
        let now = self.clock.now();
        let mut due = Vec::new();
        while let Some(entry) = self.tasks.first_entry() {
            let (due_at, _) = *entry.key();
            if due_at > now {
                break;
            }
            let (id, payload) = entry.remove();
            due.push(ScheduledTask {
                id,
                due_at,
                payload,
            });
        }
        due
    }

    /// Returns the number of queued tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true if no task is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
