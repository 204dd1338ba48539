//! The intent type: a declared unit of work and its owned scope.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::IntentId;

/// A declared unit of work with an owned scope of files it may modify.
///
/// Intents live in the external registry, which owns their full lifecycle.
/// Warden holds a copy of the currently selected intent per gate session and
/// reads it; it never writes one back. The `owned_scope` patterns are
/// read-only for as long as the intent is active; scope validation never
/// mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Registry-assigned unique identifier.
    pub id: IntentId,
    /// Human-readable display name.
    pub name: String,
    /// Lifecycle status, kept free-form. The registry's vocabulary
    /// (conventionally PENDING / IN_PROGRESS / COMPLETED / BLOCKED /
    /// CANCELLED) is not this crate's contract.
    pub status: String,
    /// Ordered scope patterns the intent is authorized to modify without
    /// escalation. See `warden-scope` for the pattern mini-language.
    pub owned_scope: Vec<String>,
    /// Ordered constraint strings the agent must honor.
    pub constraints: Vec<String>,
    /// Ordered acceptance-criterion strings.
    pub acceptance_criteria: Vec<String>,
}

impl Intent {
    /// Create an intent with the given id and name and no scope.
    ///
    /// Primarily useful in tests; production intents come from the registry.
    pub fn new(id: impl Into<IntentId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: "PENDING".to_string(),
            owned_scope: Vec::new(),
            constraints: Vec::new(),
            acceptance_criteria: Vec::new(),
        }
    }

    /// Set the lifecycle status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Set the owned scope patterns.
    #[must_use]
    pub fn with_scope(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.owned_scope = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Add a constraint string.
    #[must_use]
    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraints.push(constraint.into());
        self
    }

    /// Add an acceptance criterion.
    #[must_use]
    pub fn with_criterion(mut self, criterion: impl Into<String>) -> Self {
        self.acceptance_criteria.push(criterion.into());
        self
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.id, self.status, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_builder() {
        let intent = Intent::new("auth-refactor", "Refactor auth module")
            .with_status("IN_PROGRESS")
            .with_scope(["src/auth/", "src/**/*.rs"])
            .with_constraint("no public API changes")
            .with_criterion("all existing tests pass");

        assert_eq!(intent.id.as_str(), "auth-refactor");
        assert_eq!(intent.status, "IN_PROGRESS");
        assert_eq!(intent.owned_scope.len(), 2);
        assert_eq!(intent.constraints.len(), 1);
        assert_eq!(intent.acceptance_criteria.len(), 1);
    }

    #[test]
    fn test_intent_display() {
        let intent = Intent::new("i-1", "Do a thing").with_status("BLOCKED");
        assert_eq!(intent.to_string(), "i-1 [BLOCKED] Do a thing");
    }

    #[test]
    fn test_intent_serialization() {
        let intent = Intent::new("i-1", "Do a thing").with_scope(["src/"]);
        let json = serde_json::to_string(&intent).unwrap();
        let back: Intent = serde_json::from_str(&json).unwrap();
        assert_eq!(intent, back);
        assert!(json.contains("owned_scope"));
    }
}
