// src/graph/mod.rs

//! Value types of the build graph.
//!
//! - [`node`], [`edge`], [`rule`]: the artifacts, actions, and command
//!   templates the graph is made of. All cross-references between them are
//!   index handles into the [`crate::state::State`] arenas, never owning
//!   pointers.
//! - [`pool`]: per-group admission control for weighted concurrent work.
//! - [`spellcheck`]: bounded edit distance for "did you mean" diagnostics.

pub mod edge;
pub mod node;
pub mod pool;
pub mod rule;
pub mod spellcheck;

pub use edge::{Edge, EdgeId};
pub use node::{Node, NodeId, NodeStatus};
pub use pool::{DEFAULT_POOL_NAME, Pool, PoolId, ReadySink};
pub use rule::{PHONY_RULE_NAME, Rule, RuleId};
pub use spellcheck::edit_distance;
