// src/graph/node.rs

use crate::graph::edge::EdgeId;

/// Handle to a [`Node`] in the registry's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Per-build staleness classification of a node.
///
/// Fresh nodes start `Unknown`; the upstream dirty-checking collaborator
/// classifies them `Dirty`/`Clean` during traversal, and
/// [`crate::state::State::reset`] returns every node to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeStatus {
    #[default]
    Unknown,
    Dirty,
    Clean,
}

/// A build artifact, keyed by its normalized path.
///
/// At most one edge produces a node (its in-edge); any number of edges may
/// consume it (its out-edges). Both are back-references maintained by the
/// registry during graph construction and never reshaped afterwards.
#[derive(Debug, Clone)]
pub struct Node {
    path: String,
    in_edge: Option<EdgeId>,
    out_edges: Vec<EdgeId>,
    status: NodeStatus,
}

impl Node {
    pub(crate) fn new(path: String) -> Self {
        Self {
            path,
            in_edge: None,
            out_edges: Vec::new(),
            status: NodeStatus::Unknown,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The single edge that produces this node, if any.
    pub fn in_edge(&self) -> Option<EdgeId> {
        self.in_edge
    }

    pub(crate) fn set_in_edge(&mut self, edge: EdgeId) {
        self.in_edge = Some(edge);
    }

    /// Edges that consume this node, in registration order.
    pub fn out_edges(&self) -> &[EdgeId] {
        &self.out_edges
    }

    pub(crate) fn add_out_edge(&mut self, edge: EdgeId) {
        self.out_edges.push(edge);
    }

    pub fn status(&self) -> NodeStatus {
        self.status
    }

    pub fn set_status(&mut self, status: NodeStatus) {
        self.status = status;
    }

    pub(crate) fn reset_status(&mut self) {
        self.status = NodeStatus::Unknown;
    }
}
