// src/graph/edge.rs

use crate::graph::node::NodeId;
use crate::graph::pool::PoolId;
use crate::graph::rule::RuleId;

/// Handle to an [`Edge`] in the registry's edge arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub(crate) u32);

impl EdgeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A build action: a rule applied to inputs to produce outputs, gated by a
/// pool.
///
/// Input/output lists are appended to through
/// [`crate::state::State::add_in`] / [`crate::state::State::add_out`] during
/// construction and never reshaped afterwards; only `outputs_ready` mutates
/// during scheduling.
#[derive(Debug, Clone)]
pub struct Edge {
    rule: RuleId,
    pool: PoolId,
    inputs: Vec<NodeId>,
    outputs: Vec<NodeId>,
    /// Dispatch weight, stamped from the pool's per-edge weight at creation.
    /// The same number drives pool admission accounting and scheduler
    /// priority.
    weight: u32,
    outputs_ready: bool,
}

impl Edge {
    pub(crate) fn new(rule: RuleId, pool: PoolId, weight: u32) -> Self {
        Self {
            rule,
            pool,
            inputs: Vec::new(),
            outputs: Vec::new(),
            weight,
            outputs_ready: false,
        }
    }

    pub fn rule(&self) -> RuleId {
        self.rule
    }

    pub fn pool(&self) -> PoolId {
        self.pool
    }

    pub fn inputs(&self) -> &[NodeId] {
        &self.inputs
    }

    pub(crate) fn add_input(&mut self, node: NodeId) {
        self.inputs.push(node);
    }

    pub fn outputs(&self) -> &[NodeId] {
        &self.outputs
    }

    pub(crate) fn add_output(&mut self, node: NodeId) {
        self.outputs.push(node);
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// Override the weight stamped from the pool, for edges whose real cost
    /// is known to differ from their pool's default.
    pub fn set_weight(&mut self, weight: u32) {
        self.weight = weight;
    }

    pub fn outputs_ready(&self) -> bool {
        self.outputs_ready
    }

    pub fn set_outputs_ready(&mut self, ready: bool) {
        self.outputs_ready = ready;
    }
}
