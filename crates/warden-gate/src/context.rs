//! Per-session gate context and the intent summary handed to callers.

use serde::{Deserialize, Serialize};
use std::fmt;
use warden_core::{Intent, IntentId};

/// The gate state for one work session.
///
/// There is deliberately no process-global active intent: the caller creates
/// a context per session and threads it through every gate call, so multiple
/// concurrent sessions can hold different active intents against the same
/// [`IntentGate`](crate::IntentGate).
#[derive(Debug, Default, Clone)]
pub struct GateContext {
    active: Option<Intent>,
}

impl GateContext {
    /// A context with no intent selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently active intent, if one is selected.
    #[must_use]
    pub fn active_intent(&self) -> Option<&Intent> {
        self.active.as_ref()
    }

    /// Whether an intent is currently selected.
    #[must_use]
    pub fn has_active_intent(&self) -> bool {
        self.active.is_some()
    }

    pub(crate) fn set_active(&mut self, intent: Intent) {
        self.active = Some(intent);
    }

    pub(crate) fn clear_active(&mut self) {
        self.active = None;
    }
}

/// Structured summary of a freshly selected intent.
///
/// Returned by intent selection for injection into the caller's working
/// context; `Display` renders it as a readable block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentContext {
    /// The intent's id.
    pub intent_id: IntentId,
    /// Display name.
    pub name: String,
    /// Lifecycle status as reported by the registry.
    pub status: String,
    /// Constraints the agent must honor.
    pub constraints: Vec<String>,
    /// The scope patterns the intent may modify without escalation.
    pub owned_scope: Vec<String>,
    /// Acceptance criteria for the work.
    pub acceptance_criteria: Vec<String>,
}

impl From<&Intent> for IntentContext {
    fn from(intent: &Intent) -> Self {
        Self {
            intent_id: intent.id.clone(),
            name: intent.name.clone(),
            status: intent.status.clone(),
            constraints: intent.constraints.clone(),
            owned_scope: intent.owned_scope.clone(),
            acceptance_criteria: intent.acceptance_criteria.clone(),
        }
    }
}

impl fmt::Display for IntentContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Active intent: {} ({})", self.name, self.intent_id)?;
        writeln!(f, "Status: {}", self.status)?;
        write_list(f, "Owned scope", &self.owned_scope)?;
        write_list(f, "Constraints", &self.constraints)?;
        write_list(f, "Acceptance criteria", &self.acceptance_criteria)
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, heading: &str, items: &[String]) -> fmt::Result {
    if items.is_empty() {
        return writeln!(f, "{heading}: (none)");
    }
    writeln!(f, "{heading}:")?;
    for item in items {
        writeln!(f, "  - {item}")?;
    }
    Ok(())
}
