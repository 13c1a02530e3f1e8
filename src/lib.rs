// src/lib.rs

//! In-memory build-graph and scheduling core for an incremental build tool.
//!
//! This crate tracks build artifacts ([`Node`]s), the actions that produce
//! them ([`Edge`]s, each instantiated from a [`Rule`]), and dispatches edges
//! for execution under per-group concurrency limits ([`Pool`]s).
//!
//! - [`graph`] holds the node/edge/rule/pool value types and pool admission
//!   control.
//! - [`state`] is the registry that owns the whole graph and is the only
//!   place nodes and edges come into existence.
//! - [`scheduler`] maintains the ready set and hands out edges in priority
//!   order.
//!
//! Parsing build files, running subprocesses, and deciding which nodes are
//! stale are all external collaborators: they populate the graph through
//! [`State`] and drive the [`Scheduler`]/[`Pool`] transitions; this core
//! never blocks and never spawns.

pub mod errors;
pub mod graph;
pub mod logging;
pub mod scheduler;
pub mod state;

pub use errors::{GraphError, Result};
pub use graph::{Edge, EdgeId, Node, NodeId, NodeStatus, Pool, PoolId, ReadySink, Rule, RuleId};
pub use scheduler::Scheduler;
pub use state::State;
