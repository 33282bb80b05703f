//! `SpawnQueue` — per-location, timestamp-ordered spawn FIFOs.
//!
//! Each spawn location owns a `VecDeque` sorted by timestamp, so the due
//! check only ever inspects queue fronts.  Events with equal timestamps keep
//! their file order.

use std::collections::{BTreeMap, VecDeque};

use lift_core::SpawnPointId;

use crate::SpawnEvent;

#[derive(Debug, Clone, Default)]
pub struct SpawnQueue {
    inner: BTreeMap<SpawnPointId, VecDeque<SpawnEvent>>,
    /// Cached total event count for O(1) `remaining()`.
    total: usize,
}

impl SpawnQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group `events` by spawn location and sort each group by timestamp.
    pub fn from_events(events: impl IntoIterator<Item = SpawnEvent>) -> Self {
        let mut grouped: BTreeMap<SpawnPointId, Vec<SpawnEvent>> = BTreeMap::new();
        for event in events {
            grouped.entry(event.spawn_point).or_default().push(event);
        }

        let mut total = 0;
        let inner = grouped
            .into_iter()
            .map(|(id, mut list)| {
                list.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
                total += list.len();
                (id, VecDeque::from(list))
            })
            .collect();
        Self { inner, total }
    }

    /// Enqueue one event behind any event with the same or earlier timestamp.
    pub fn push(&mut self, event: SpawnEvent) {
        let queue = self.inner.entry(event.spawn_point).or_default();
        let at = queue.partition_point(|e| e.timestamp <= event.timestamp);
        queue.insert(at, event);
        self.total += 1;
    }

    /// Remove and return every event at `id` with `timestamp <= now`.
    pub fn pop_due(&mut self, id: SpawnPointId, now: f64) -> Vec<SpawnEvent> {
        let Some(queue) = self.inner.get_mut(&id) else { return Vec::new() };
        let due = queue.partition_point(|e| e.timestamp <= now);
        let events: Vec<SpawnEvent> = queue.drain(..due).collect();
        if queue.is_empty() {
            self.inner.remove(&id);
        }
        self.total -= events.len();
        events
    }

    /// [`pop_due`](Self::pop_due) across all locations, in location order.
    pub fn drain_due(&mut self, now: f64) -> Vec<SpawnEvent> {
        let ids: Vec<SpawnPointId> = self
            .inner
            .iter()
            .filter(|(_, q)| q.front().is_some_and(|e| e.timestamp <= now))
            .map(|(&id, _)| id)
            .collect();
        ids.into_iter().flat_map(|id| self.pop_due(id, now)).collect()
    }

    /// Timestamp of the earliest pending event.
    pub fn next_due(&self) -> Option<f64> {
        self.inner
            .values()
            .filter_map(|q| q.front().map(|e| e.timestamp))
            .min_by(f64::total_cmp)
    }

    /// Number of events not yet spawned.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.total
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
