// src/scheduler.rs

//! Ready-set management and priority dispatch.
//!
//! The scheduler holds the edges that are currently eligible to run (inputs
//! satisfied, pool budget already accounted) and hands them out heaviest
//! first. It never blocks: [`Scheduler::next_unit`] returns `None` when
//! nothing is ready and the driving loop polls for completions instead.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use tracing::debug;

use crate::graph::EdgeId;
use crate::graph::pool::ReadySink;

/// Heap entry: descending weight, then ascending schedule sequence.
///
/// The sequence number is assigned monotonically at [`Scheduler::schedule`]
/// time, so equal-weight edges dispatch in the order they became ready. This
/// keeps the heap's ordering a strict total order and dispatch deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ReadyEntry {
    weight: u32,
    seq: u64,
    edge: EdgeId,
}

impl Ord for ReadyEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: greater weight wins, then smaller seq.
        self.weight
            .cmp(&other.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for ReadyEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Set of currently-ready edges paired with a priority queue over them.
///
/// Membership is tracked separately so that [`Scheduler::schedule`] is an
/// idempotent insert-if-absent: duplicate readiness notifications from
/// independent satisfied-dependency checks are safe no-ops, and every ready
/// edge appears in the queue exactly once.
#[derive(Debug, Default)]
pub struct Scheduler {
    ready: HashSet<EdgeId>,
    prioritized: BinaryHeap<ReadyEntry>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue an edge for dispatch. No-op if it is already ready.
    pub fn schedule(&mut self, edge: EdgeId, weight: u32) {
        if !self.ready.insert(edge) {
            debug!(edge = edge.0, "edge already ready; ignoring duplicate schedule");
            return;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.prioritized.push(ReadyEntry { weight, seq, edge });
        debug!(edge = edge.0, weight, "edge scheduled as ready");
    }

    /// Remove and return the highest-priority ready edge, or `None` if the
    /// ready set is empty.
    pub fn next_unit(&mut self) -> Option<EdgeId> {
        let entry = self.prioritized.pop()?;
        self.ready.remove(&entry.edge);
        debug!(
            edge = entry.edge.0,
            weight = entry.weight,
            "dispatching edge"
        );
        Some(entry.edge)
    }

    /// Number of edges currently waiting in the ready set.
    pub fn units_waiting(&self) -> usize {
        self.ready.len()
    }
}

impl ReadySink for Scheduler {
    fn schedule(&mut self, edge: EdgeId, weight: u32) {
        Scheduler::schedule(self, edge, weight);
    }
}
