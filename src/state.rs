// src/state.rs

//! The registry binding the whole build graph together.
//!
//! [`State`] owns every rule, pool, node, and edge for the lifetime of the
//! process, stored in indexed arenas. All cross-references between graph
//! objects are [`RuleId`]/[`PoolId`]/[`NodeId`]/[`EdgeId`] handles into those
//! arenas: an index is a lookup key, never a lifetime claim, so the node/edge
//! back-reference web carries no ownership cycles.
//!
//! This is also the only place nodes and edges come into existence; upstream
//! graph-construction collaborators build the graph exclusively through
//! [`State::add_rule`], [`State::add_pool`], [`State::add_edge`],
//! [`State::add_in`], [`State::add_out`], and [`State::add_default`].

use std::cell::Cell;
use std::collections::HashMap;
use std::fmt::Write as _;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::{debug, trace, warn};

use crate::errors::{GraphError, Result};
use crate::graph::edge::{Edge, EdgeId};
use crate::graph::node::{Node, NodeId, NodeStatus};
use crate::graph::pool::{Pool, PoolId, ReadySink};
use crate::graph::rule::{Rule, RuleId};
use crate::graph::spellcheck::edit_distance;

/// Spellcheck cutoff: candidates further than this many edits away are
/// never suggested.
const MAX_VALID_EDIT_DISTANCE: usize = 3;

/// Registry of rules, pools, nodes, and edges, plus the explicit
/// default-target list.
///
/// Logically single-threaded: all mutation happens from the one control
/// thread driving the build loop. List shapes (node out-edges, edge
/// inputs/outputs) mutate only during construction; during scheduling only
/// status flags and pool counters change.
#[derive(Debug)]
pub struct State {
    rules: Vec<Rule>,
    rules_by_name: HashMap<String, RuleId>,

    pools: Vec<Pool>,
    pools_by_name: HashMap<String, PoolId>,

    nodes: Vec<Node>,
    paths: HashMap<String, NodeId>,

    edges: Vec<Edge>,

    /// Explicitly requested default targets, in request order.
    defaults: Vec<NodeId>,

    /// Observability counter for pure node lookups.
    node_lookups: Cell<u64>,
}

impl State {
    /// Fresh registry with the built-in phony rule and the unconstrained
    /// default pool (name `""`, depth 0) pre-registered.
    pub fn new() -> Self {
        let mut state = Self {
            rules: Vec::new(),
            rules_by_name: HashMap::new(),
            pools: Vec::new(),
            pools_by_name: HashMap::new(),
            nodes: Vec::new(),
            paths: HashMap::new(),
            edges: Vec::new(),
            defaults: Vec::new(),
            node_lookups: Cell::new(0),
        };
        state.add_rule(Rule::phony());
        state.add_pool(Pool::new(crate::graph::pool::DEFAULT_POOL_NAME, 0));
        state
    }

    // ---- rules -----------------------------------------------------------

    /// Register a rule. Duplicate names are a broken caller contract.
    pub fn add_rule(&mut self, rule: Rule) -> RuleId {
        assert!(
            self.lookup_rule(rule.name()).is_none(),
            "duplicate rule '{}'",
            rule.name()
        );
        let id = RuleId(self.rules.len() as u32);
        self.rules_by_name.insert(rule.name().to_string(), id);
        self.rules.push(rule);
        id
    }

    pub fn lookup_rule(&self, name: &str) -> Option<RuleId> {
        self.rules_by_name.get(name).copied()
    }

    pub fn rule(&self, id: RuleId) -> &Rule {
        &self.rules[id.index()]
    }

    // ---- pools -----------------------------------------------------------

    /// Register a pool. Duplicate names are a broken caller contract.
    pub fn add_pool(&mut self, pool: Pool) -> PoolId {
        assert!(
            self.lookup_pool(pool.name()).is_none(),
            "duplicate pool '{}'",
            pool.name()
        );
        let id = PoolId(self.pools.len() as u32);
        self.pools_by_name.insert(pool.name().to_string(), id);
        self.pools.push(pool);
        id
    }

    pub fn lookup_pool(&self, name: &str) -> Option<PoolId> {
        self.pools_by_name.get(name).copied()
    }

    pub fn pool(&self, id: PoolId) -> &Pool {
        &self.pools[id.index()]
    }

    pub fn pool_mut(&mut self, id: PoolId) -> &mut Pool {
        &mut self.pools[id.index()]
    }

    // ---- edges -----------------------------------------------------------

    /// Allocate a new edge bound to `rule` and `pool` and append it to the
    /// edge list. Its dispatch weight is the pool's per-edge weight. The
    /// caller attaches inputs/outputs afterwards via [`State::add_in`] /
    /// [`State::add_out`].
    pub fn add_edge(&mut self, rule: RuleId, pool: PoolId) -> EdgeId {
        let id = EdgeId(self.edges.len() as u32);
        let weight = self.pools[pool.index()].edge_weight();
        self.edges.push(Edge::new(rule, pool, weight));
        debug!(edge = id.0, rule = %self.rules[rule.index()].name(), weight, "edge added");
        id
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.index()]
    }

    /// All edges in creation order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> {
        (0..self.edges.len() as u32).map(EdgeId)
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // ---- nodes -----------------------------------------------------------

    /// Node for `path`, created and registered if not yet known. The sole
    /// construction point for nodes.
    pub fn get_node(&mut self, path: &str) -> NodeId {
        if let Some(&id) = self.paths.get(path) {
            return id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(path.to_string()));
        self.paths.insert(path.to_string(), id);
        trace!(node = id.0, path, "node created");
        id
    }

    /// Pure lookup by exact normalized path; never creates.
    pub fn lookup_node(&self, path: &str) -> Option<NodeId> {
        self.node_lookups.set(self.node_lookups.get() + 1);
        self.paths.get(path).copied()
    }

    /// How many [`State::lookup_node`] calls have been made. Metrics hook.
    pub fn node_lookup_count(&self) -> u64 {
        self.node_lookups.get()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// The registered node whose path is nearest to `path` within the
    /// spellcheck cutoff, for "did you mean" diagnostics. Scans nodes in
    /// creation order; the first candidate with the minimum distance wins.
    pub fn spellcheck_node(&self, path: &str) -> Option<NodeId> {
        let allow_replacements = true;
        let mut min_distance = MAX_VALID_EDIT_DISTANCE + 1;
        let mut result = None;

        for (index, node) in self.nodes.iter().enumerate() {
            let distance =
                edit_distance(node.path(), path, allow_replacements, MAX_VALID_EDIT_DISTANCE);
            if distance < min_distance {
                min_distance = distance;
                result = Some(NodeId(index as u32));
            }
        }
        result
    }

    // ---- graph wiring ----------------------------------------------------

    /// Append the node for `path` to `edge`'s inputs and register `edge` as
    /// one of its consumers.
    pub fn add_in(&mut self, edge: EdgeId, path: &str) {
        let node = self.get_node(path);
        self.edges[edge.index()].add_input(node);
        self.nodes[node.index()].add_out_edge(edge);
    }

    /// Append the node for `path` to `edge`'s outputs and make `edge` its
    /// producer. If another edge already produces this node the graph is
    /// ambiguous: warned, not fatal, and the last writer wins.
    pub fn add_out(&mut self, edge: EdgeId, path: &str) {
        let node = self.get_node(path);
        self.edges[edge.index()].add_output(node);
        if self.nodes[node.index()].in_edge().is_some() {
            warn!(
                path,
                "multiple rules generate the same output; build will not be correct, continuing anyway"
            );
        }
        self.nodes[node.index()].set_in_edge(edge);
    }

    /// Record an explicitly requested default target. The node must already
    /// exist; unknown paths fail with a spellcheck suggestion where one is
    /// available, leaving the default list untouched.
    pub fn add_default(&mut self, path: &str) -> Result<()> {
        let Some(node) = self.lookup_node(path) else {
            let suggestion = self
                .spellcheck_node(path)
                .map(|id| self.nodes[id.index()].path().to_string());
            return Err(GraphError::UnknownTarget {
                path: path.to_string(),
                suggestion,
            });
        };
        self.defaults.push(node);
        Ok(())
    }

    /// Explicitly requested default targets, in request order.
    pub fn defaults(&self) -> &[NodeId] {
        &self.defaults
    }

    // ---- graph-wide queries ----------------------------------------------

    /// Nodes produced by some edge but consumed by none: the terminal
    /// artifacts of the graph, and the fallback default targets.
    ///
    /// A non-empty edge list with zero roots cannot arise from legitimate
    /// construction and is reported as an error as well as asserted.
    pub fn root_nodes(&self) -> Result<Vec<NodeId>> {
        let mut root_nodes = Vec::new();
        for edge in &self.edges {
            for &out in edge.outputs() {
                if self.nodes[out.index()].out_edges().is_empty() {
                    root_nodes.push(out);
                }
            }
        }

        if !self.edges.is_empty() && root_nodes.is_empty() {
            debug_assert!(false, "non-empty build graph has no root nodes");
            return Err(GraphError::NoRootNodes);
        }
        Ok(root_nodes)
    }

    /// The explicit default-target list, or every root node if none were
    /// requested.
    pub fn default_nodes(&self) -> Result<Vec<NodeId>> {
        if self.defaults.is_empty() {
            self.root_nodes()
        } else {
            Ok(self.defaults.clone())
        }
    }

    /// Check that no node transitively feeds back into its own inputs.
    ///
    /// Upstream construction is expected to keep the graph acyclic; this is
    /// a diagnostic for loaders that want to verify before scheduling.
    pub fn verify_acyclic(&self) -> Result<()> {
        let mut graph: DiGraphMap<u32, ()> = DiGraphMap::new();

        for id in 0..self.nodes.len() as u32 {
            graph.add_node(id);
        }
        for edge in &self.edges {
            for &input in edge.inputs() {
                for &output in edge.outputs() {
                    graph.add_edge(input.0, output.0, ());
                }
            }
        }

        match toposort(&graph, None) {
            Ok(_order) => Ok(()),
            Err(cycle) => {
                let path = self.nodes[cycle.node_id() as usize].path().to_string();
                Err(GraphError::DependencyCycle(path))
            }
        }
    }

    /// Start a fresh traversal without re-parsing the graph: every node's
    /// status returns to unknown and every edge's outputs-ready flag clears.
    pub fn reset(&mut self) {
        for node in &mut self.nodes {
            node.reset_status();
        }
        for edge in &mut self.edges {
            edge.set_outputs_ready(false);
        }
        debug!("graph state reset for a fresh traversal");
    }

    // ---- pool orchestration ------------------------------------------------

    /// Account `edge` as dispatched in its pool.
    pub fn edge_scheduled(&mut self, edge: EdgeId) {
        let (pool, weight) = {
            let e = &self.edges[edge.index()];
            (e.pool(), e.weight())
        };
        self.pools[pool.index()].edge_scheduled(weight);
    }

    /// Account `edge` as finished in its pool, freeing budget for delayed
    /// edges (release them afterwards via [`State::retrieve_ready_edges`]).
    pub fn edge_finished(&mut self, edge: EdgeId) {
        let (pool, weight) = {
            let e = &self.edges[edge.index()];
            (e.pool(), e.weight())
        };
        self.pools[pool.index()].edge_finished(weight);
    }

    /// Queue `edge` in its pool's delayed line instead of scheduling it.
    pub fn delay_edge(&mut self, edge: EdgeId) {
        let pool = self.edges[edge.index()].pool();
        self.pools[pool.index()].delay_edge(edge);
    }

    /// Release as many of `pool`'s delayed edges into `sink` as the budget
    /// allows, in FIFO order.
    pub fn retrieve_ready_edges(&mut self, pool: PoolId, sink: &mut impl ReadySink) {
        let edges = &self.edges;
        self.pools[pool.index()].retrieve_ready_edges(sink, |edge| edges[edge.index()].weight());
    }

    // ---- diagnostics -------------------------------------------------------

    /// Human-readable description of an edge: its rule name and outputs.
    pub fn describe_edge(&self, edge: EdgeId) -> String {
        let edge = &self.edges[edge.index()];
        let mut desc = self.rules[edge.rule().index()].name().to_string();
        desc.push(':');
        for &out in edge.outputs() {
            desc.push(' ');
            desc.push_str(self.nodes[out.index()].path());
        }
        desc
    }

    /// Diagnostic listing of every node's path and status, followed by each
    /// non-default pool's usage and delayed edges. Debugging only; where the
    /// text goes is the console collaborator's business.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            let status = match node.status() {
                NodeStatus::Unknown => "unknown",
                NodeStatus::Dirty => "dirty",
                NodeStatus::Clean => "clean",
            };
            let _ = writeln!(out, "{} {}", node.path(), status);
        }
        if self.pools.iter().any(|p| !p.name().is_empty()) {
            let _ = writeln!(out, "resource_pools:");
            for pool in &self.pools {
                if !pool.name().is_empty() {
                    pool.dump_into(&mut out, |edge| self.describe_edge(edge));
                }
            }
        }
        out
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
