// src/graph/rule.rs

/// Handle to a [`Rule`] in the registry's rule arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleId(pub(crate) u32);

impl RuleId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Name of the built-in no-op rule registered by every fresh registry.
pub const PHONY_RULE_NAME: &str = "phony";

/// A named command template shared by many edges.
///
/// Rules are registered once at setup and immutable afterwards; edges hold a
/// [`RuleId`] handle, never the rule itself. The template is opaque to this
/// core: upstream logic materializes a concrete command from it per edge.
#[derive(Debug, Clone)]
pub struct Rule {
    name: String,
    command: String,
    phony: bool,
}

impl Rule {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            phony: false,
        }
    }

    /// The built-in no-op rule. Its special status is this flag, not a
    /// distinguished instance.
    pub(crate) fn phony() -> Self {
        Self {
            name: PHONY_RULE_NAME.to_string(),
            command: String::new(),
            phony: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn is_phony(&self) -> bool {
        self.phony
    }
}
