//! Deadline queue for simulated host callbacks.
//!
//! Fallback data does not arrive synchronously — it is scheduled with the
//! same delay a real host round trip would have, then routed through
//! the normal inbound path. Overlapping timers are allowed: re-triggering a
//! request while a fallback is pending schedules independently and the last
//! render wins. There is no cancellation.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use crate::ipc::HostCallback;

struct Entry {
    due: Instant,
    seq: u64,
    callback: HostCallback,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // Reversed so the BinaryHeap pops the earliest deadline first;
    // `seq` keeps same-deadline entries in schedule order.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Pending fallback callbacks ordered by deadline.
#[derive(Default)]
pub struct FallbackTimers {
    queue: BinaryHeap<Entry>,
    next_seq: u64,
}

impl FallbackTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `callback` to fire `delay` after `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration, callback: HostCallback) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Entry {
            due: now + delay,
            seq,
            callback,
        });
    }

    /// Pop every callback whose deadline has passed, in schedule order.
    pub fn fire_due(&mut self, now: Instant) -> Vec<HostCallback> {
        let mut due = Vec::new();
        while let Some(entry) = self.queue.peek() {
            if entry.due > now {
                break;
            }
            due.push(self.queue.pop().expect("peeked entry").callback);
        }
        due
    }

    /// The earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.peek().map(|entry| entry.due)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
