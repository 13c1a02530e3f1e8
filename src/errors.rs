// src/errors.rs

//! Crate-wide error types.
//!
//! Construction-time failures are returned to the immediate caller as
//! [`GraphError`] values; scheduling-time operations never fail (their
//! preconditions are the caller's bookkeeping). Broken caller contracts
//! (duplicate rule registration, delaying an edge in the unconstrained
//! pool) are asserted, not returned.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    /// A default target was requested for a path no node is registered under.
    #[error("unknown target '{path}'{}", .suggestion.as_deref().map(|s| format!(", did you mean '{s}'?")).unwrap_or_default())]
    UnknownTarget {
        path: String,
        /// Nearest known path within spellcheck distance, if any.
        suggestion: Option<String>,
    },

    /// The edge list is non-empty but no node is free of consumers. A
    /// well-formed graph always has at least one terminal node, so this
    /// indicates a deeper invariant break upstream.
    #[error("could not determine root nodes of build graph")]
    NoRootNodes,

    /// An input/output dependency cycle was found in the graph.
    #[error("cycle detected in build graph involving '{0}'")]
    DependencyCycle(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, GraphError>;
