//! Time-keyed queue of actions the stage loop fires once they come due.

use std::time::Duration;

struct Scheduled<A> {
    fire_at: Duration,
    seq: u64,
    action: A,
}

/// Actions waiting for a point on the stage clock.
///
/// Nothing here sleeps: the owner passes the current time to
/// [`DeferredQueue::drain_due`] once per tick. Scheduled actions cannot be
/// cancelled.
pub struct DeferredQueue<A> {
    entries: Vec<Scheduled<A>>,
    next_seq: u64,
}

impl<A> Default for DeferredQueue<A> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<A> DeferredQueue<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, fire_at: Duration, action: A) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Scheduled {
            fire_at,
            seq,
            action,
        });
    }

    /// Removes and returns every action with `fire_at <= now`, earliest first.
    /// Actions due at the same instant come out in scheduling order.
    pub fn drain_due(&mut self, now: Duration) -> Vec<A> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|entry| entry.fire_at <= now);
        self.entries = pending;
        due.sort_by_key(|entry| (entry.fire_at, entry.seq));
        due.into_iter().map(|entry| entry.action).collect()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.entries.iter().map(|entry| entry.fire_at).min()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
