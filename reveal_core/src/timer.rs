// Copyright 2026 the Reveal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cancelable deadline queue.
//!
//! [`TimerQueue`] holds at most one pending deadline per key. Hosts never see
//! individual timers: they ask for [`next_deadline`](TimerQueue::next_deadline),
//! arm a single platform timer for it, and drain due entries with
//! [`pop_due`](TimerQueue::pop_due) when it fires. Because every entry is
//! addressable by key, cancellation is exact and disposal can enumerate
//! everything still pending.
//!
//! Entries with equal deadlines pop in scheduling order.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::time::HostTime;

/// A queue of cancelable deadlines keyed by `K`.
#[derive(Clone, Debug)]
pub struct TimerQueue<K> {
    by_deadline: BTreeMap<(HostTime, u64), K>,
    by_key: BTreeMap<K, (HostTime, u64)>,
    next_seq: u64,
}

impl<K: Copy + Ord> Default for TimerQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Ord> TimerQueue<K> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_deadline: BTreeMap::new(),
            by_key: BTreeMap::new(),
            next_seq: 0,
        }
    }

    /// Schedules `key` to fire at `at`, replacing any pending deadline for the
    /// same key.
    pub fn schedule(&mut self, key: K, at: HostTime) {
        self.cancel(key);
        let slot = (at, self.next_seq);
        self.next_seq += 1;
        self.by_deadline.insert(slot, key);
        self.by_key.insert(key, slot);
    }

    /// Cancels the pending deadline for `key`. Returns `true` if one existed.
    pub fn cancel(&mut self, key: K) -> bool {
        match self.by_key.remove(&key) {
            Some(slot) => {
                self.by_deadline.remove(&slot);
                true
            }
            None => false,
        }
    }

    /// Cancels every pending deadline whose key matches `pred`.
    ///
    /// Returns the number of cancelled entries.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&K) -> bool) -> usize {
        let doomed: Vec<K> = self.by_key.keys().copied().filter(|k| pred(k)).collect();
        for key in &doomed {
            self.cancel(*key);
        }
        doomed.len()
    }

    /// Cancels everything. Returns the number of cancelled entries.
    pub fn clear(&mut self) -> usize {
        let n = self.by_key.len();
        self.by_key.clear();
        self.by_deadline.clear();
        n
    }

    /// Returns `true` if `key` has a pending deadline.
    #[must_use]
    pub fn contains(&self, key: K) -> bool {
        self.by_key.contains_key(&key)
    }

    /// Returns the deadline pending for `key`, if any.
    #[must_use]
    pub fn deadline_of(&self, key: K) -> Option<HostTime> {
        self.by_key.get(&key).map(|&(at, _)| at)
    }

    /// Returns the earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<HostTime> {
        self.by_deadline.keys().next().map(|&(at, _)| at)
    }

    /// Removes and returns the earliest entry whose deadline is at or before
    /// `now`, together with that deadline.
    pub fn pop_due(&mut self, now: HostTime) -> Option<(K, HostTime)> {
        let (&slot, _) = self.by_deadline.iter().next()?;
        if slot.0 > now {
            return None;
        }
        let key = self.by_deadline.remove(&slot)?;
        self.by_key.remove(&key);
        Some((key, slot.0))
    }

    /// Number of pending entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Returns `true` if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_deadline_then_schedule_order() {
        let mut q = TimerQueue::new();
        q.schedule('c', HostTime(300));
        q.schedule('a', HostTime(100));
        q.schedule('b', HostTime(100));

        assert_eq!(q.next_deadline(), Some(HostTime(100)), "earliest");
        assert_eq!(q.pop_due(HostTime(250)), Some(('a', HostTime(100))), "first at 100");
        assert_eq!(q.pop_due(HostTime(250)), Some(('b', HostTime(100))), "second at 100");
        assert_eq!(q.pop_due(HostTime(250)), None, "300 not yet due");
        assert_eq!(q.len(), 1, "c still pending");
    }

    #[test]
    fn rescheduling_replaces() {
        let mut q = TimerQueue::new();
        q.schedule(1_u32, HostTime(100));
        q.schedule(1_u32, HostTime(500));
        assert_eq!(q.len(), 1, "one entry per key");
        assert_eq!(q.deadline_of(1), Some(HostTime(500)), "new deadline");
        assert_eq!(q.pop_due(HostTime(200)), None, "old deadline gone");
    }

    #[test]
    fn cancellation() {
        let mut q = TimerQueue::new();
        for k in 0_u32..5 {
            q.schedule(k, HostTime(u64::from(k) * 10));
        }
        assert!(q.cancel(2), "pending key");
        assert!(!q.cancel(2), "already cancelled");
        assert_eq!(q.cancel_where(|k| k % 2 == 1), 2, "odd keys");
        assert!(q.contains(0) && q.contains(4), "even keys remain");
        assert_eq!(q.clear(), 2, "remaining two");
        assert!(q.is_empty(), "empty after clear");
        assert_eq!(q.next_deadline(), None, "no deadline");
    }
}
