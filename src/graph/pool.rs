// src/graph/pool.rs

use std::collections::VecDeque;
use std::fmt::Write as _;

use tracing::debug;

use crate::graph::edge::EdgeId;

/// Handle to a [`Pool`] in the registry's pool arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolId(pub(crate) u32);

impl PoolId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Name of the built-in unconstrained pool registered by every fresh
/// registry.
pub const DEFAULT_POOL_NAME: &str = "";

/// Destination for edges a pool releases from its delayed queue.
///
/// Either a raw ready-list (for callers that batch admissions themselves) or
/// the [`crate::scheduler::Scheduler`] directly.
pub trait ReadySink {
    fn schedule(&mut self, edge: EdgeId, weight: u32);
}

impl ReadySink for Vec<EdgeId> {
    fn schedule(&mut self, edge: EdgeId, _weight: u32) {
        self.push(edge);
    }
}

/// A named concurrency budget limiting total weighted in-flight edge work.
///
/// The pool is a pure admission gate plus a waiting line: it knows nothing
/// about the global ready set or the scheduler. Admission is checked at
/// exactly two points — when an edge becomes otherwise-ready (the caller
/// picks [`Pool::delay_edge`] vs. direct scheduling) and when an edge in the
/// same pool finishes (release via [`Pool::retrieve_ready_edges`]).
///
/// `depth == 0` means unlimited: the default pool never tracks usage and
/// never blocks.
#[derive(Debug, Clone)]
pub struct Pool {
    name: String,
    depth: u32,
    /// Weight stamped onto edges created in this pool (spec: per-pool
    /// dispatch weight, default 1).
    edge_weight: u32,
    current_use: u32,
    delayed: VecDeque<EdgeId>,
}

impl Pool {
    pub fn new(name: impl Into<String>, depth: u32) -> Self {
        Self {
            name: name.into(),
            depth,
            edge_weight: 1,
            current_use: 0,
            delayed: VecDeque::new(),
        }
    }

    /// Pool whose edges carry a weight other than the default 1, for edge
    /// classes whose real resource cost is heavier.
    pub fn with_edge_weight(name: impl Into<String>, depth: u32, edge_weight: u32) -> Self {
        Self {
            edge_weight,
            ..Self::new(name, depth)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn edge_weight(&self) -> u32 {
        self.edge_weight
    }

    /// Current weighted in-flight usage. Always 0 for unbounded pools.
    pub fn current_use(&self) -> u32 {
        self.current_use
    }

    pub fn is_unbounded(&self) -> bool {
        self.depth == 0
    }

    /// Number of edges waiting in the delayed queue.
    pub fn delayed_count(&self) -> usize {
        self.delayed.len()
    }

    /// Would admitting `weight` more work stay within budget right now?
    pub fn can_admit(&self, weight: u32) -> bool {
        self.is_unbounded() || self.current_use + weight <= self.depth
    }

    /// Account for an edge transitioning into the dispatched state.
    pub fn edge_scheduled(&mut self, weight: u32) {
        if self.depth != 0 {
            self.current_use += weight;
        }
    }

    /// Account for an edge completing. Must pair with a prior
    /// [`Pool::edge_scheduled`] of the same weight.
    pub fn edge_finished(&mut self, weight: u32) {
        if self.depth != 0 {
            debug_assert!(self.current_use >= weight, "pool usage underflow");
            self.current_use -= weight;
        }
    }

    /// Queue an otherwise-ready edge because the budget is exceeded.
    ///
    /// The unconstrained default pool never gates, so delaying an edge in it
    /// is a caller logic error.
    pub fn delay_edge(&mut self, edge: EdgeId) {
        assert!(self.depth != 0, "cannot delay an edge in an unbounded pool");
        self.delayed.push_back(edge);
        debug!(
            pool = %self.name,
            edge = edge.0,
            delayed = self.delayed.len(),
            "edge delayed; pool budget exceeded"
        );
    }

    /// Release delayed edges into `sink`, strictly front-to-back, while the
    /// budget allows. Stops at the first edge that would overflow: a lighter
    /// edge further back never jumps ahead of a heavier one still blocked
    /// (fairness over strict packing).
    ///
    /// Each released edge is immediately accounted via
    /// [`Pool::edge_scheduled`] so usage stays consistent with what the sink
    /// will dispatch.
    pub fn retrieve_ready_edges(
        &mut self,
        sink: &mut impl ReadySink,
        weight_of: impl Fn(EdgeId) -> u32,
    ) {
        while let Some(&edge) = self.delayed.front() {
            let weight = weight_of(edge);
            if self.current_use + weight > self.depth {
                break;
            }
            self.delayed.pop_front();
            debug!(
                pool = %self.name,
                edge = edge.0,
                weight,
                "releasing delayed edge into ready set"
            );
            sink.schedule(edge, weight);
            self.edge_scheduled(weight);
        }
    }

    /// Append diagnostic state to `out`: name, usage/capacity, and the
    /// description of each delayed edge.
    pub fn dump_into(&self, out: &mut String, describe: impl Fn(EdgeId) -> String) {
        let _ = writeln!(out, "{} ({}/{}) ->", self.name, self.current_use, self.depth);
        for &edge in &self.delayed {
            let _ = writeln!(out, "\t{}", describe(edge));
        }
    }
}
