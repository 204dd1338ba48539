//! The intent gate: orchestrates scope checks and approval escalation.

use std::sync::Arc;
use std::time::Duration;

use warden_approval::{ApprovalDecision, ApprovalRequest, ApprovalResult, ApprovalWorkflow, RequestId};
use warden_core::{Intent, IntentId, IntentRegistry};
use warden_scope::{ScopeValidation, are_paths_in_scope, is_path_in_scope};

use crate::context::{GateContext, IntentContext};
use crate::error::{GateError, GateResult};
use crate::tool::{GateVerdict, ToolKind};

/// The outcome a caller branches on after an out-of-scope escalation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApprovalVerdict {
    /// Whether the human approved the change.
    pub approved: bool,
    /// Whether the approval explicitly overrides the scope violation.
    pub requires_override: bool,
}

/// Enforces that mutating operations are intent-scoped and, when
/// out-of-scope, human-approved.
///
/// The gate itself is stateless with respect to sessions: all per-session
/// state lives in the [`GateContext`] the caller threads through each call.
///
/// # Per-mutation flow
///
/// ```text
/// NoIntent --select_intent--> HasIntent --validate_scope--> InScope (proceed)
///                                  |                            |
///                                  |                       OutOfScope
///                                  |                            |
///                                  |            request_approval_for_out_of_scope
///                                  |                            |
///                                  |                     AwaitingDecision
///                                  |                        /        \
///                                  v                   Approved    Rejected
///                             (cleared)                (proceed)    (abort)
/// ```
pub struct IntentGate {
    registry: Arc<dyn IntentRegistry>,
    workflow: Arc<ApprovalWorkflow>,
}

impl IntentGate {
    /// Create a gate over a registry view and an approval workflow.
    #[must_use]
    pub fn new(registry: Arc<dyn IntentRegistry>, workflow: Arc<ApprovalWorkflow>) -> Self {
        Self { registry, workflow }
    }

    /// Select the session's active intent by id.
    ///
    /// Returns a structured summary suitable for injection into the caller's
    /// working context. Replaces any previously active intent.
    ///
    /// # Errors
    ///
    /// [`GateError::UnknownIntent`] if the registry has no such intent; the
    /// caller cannot proceed with the handshake.
    pub fn select_intent(
        &self,
        ctx: &mut GateContext,
        intent_id: &IntentId,
    ) -> GateResult<IntentContext> {
        let intent = self
            .registry
            .get_intent(intent_id)
            .ok_or_else(|| GateError::UnknownIntent(intent_id.clone()))?;

        tracing::debug!(intent_id = %intent.id, status = %intent.status, "intent selected");
        let summary = IntentContext::from(&intent);
        ctx.set_active(intent);
        Ok(summary)
    }

    /// Release the session's active intent.
    ///
    /// Subsequent scope checks report "no active intent" until a new one is
    /// selected.
    pub fn clear_active_intent(&self, ctx: &mut GateContext) {
        if let Some(intent) = ctx.active_intent() {
            tracing::debug!(intent_id = %intent.id, "active intent cleared");
        }
        ctx.clear_active();
    }

    /// Check whether a tool may run in this session.
    ///
    /// Mutating tools require an active intent; everything else is always
    /// allowed.
    #[must_use]
    pub fn gatekeep(&self, ctx: &GateContext, tool: ToolKind) -> GateVerdict {
        if tool.is_mutating() && !ctx.has_active_intent() {
            return GateVerdict::Denied {
                message: format!(
                    "tool '{tool}' can modify files and requires an active intent; \
                     select a valid intent before proceeding"
                ),
            };
        }
        GateVerdict::Allowed
    }

    /// Validate a set of paths against the active intent's owned scope.
    ///
    /// With no active intent the result is out-of-scope with a "no active
    /// intent" reason, deliberately distinct from an ordinary scope miss so
    /// callers can tell "select an intent" apart from "escalate".
    #[must_use]
    pub fn validate_scope(&self, ctx: &GateContext, paths: &[String]) -> ScopeValidation {
        match ctx.active_intent() {
            None => ScopeValidation::outside(
                "no active intent; select an intent before proposing changes",
            ),
            Some(intent) => are_paths_in_scope(paths, &intent.owned_scope),
        }
    }

    /// Whether a single path falls inside the active intent's owned scope.
    ///
    /// Returns `false` (not an error) when no intent is active.
    #[must_use]
    pub fn is_path_in_scope(&self, ctx: &GateContext, path: &str) -> bool {
        ctx.active_intent()
            .is_some_and(|intent| is_path_in_scope(path, &intent.owned_scope).within_scope)
    }

    /// Escalate an out-of-scope change for human approval and suspend until
    /// a decision arrives.
    ///
    /// The summary is augmented with a warning listing every out-of-scope
    /// path and the request is tagged with the active intent's id (if any).
    ///
    /// # Errors
    ///
    /// Propagates [`warden_approval::ApprovalError`] from the wait: a
    /// timeout when `timeout` is bounded, or channel teardown.
    pub async fn request_approval_for_out_of_scope(
        &self,
        ctx: &GateContext,
        summary: &str,
        diff: &str,
        files_affected: &[String],
        out_of_scope_paths: &[String],
        timeout: Option<Duration>,
    ) -> ApprovalResult<ApprovalVerdict> {
        let mut augmented = summary.to_string();
        augmented.push_str("\n\nWARNING: this change touches files outside the owned scope:");
        for path in out_of_scope_paths {
            augmented.push_str("\n  - ");
            augmented.push_str(path);
        }

        let mut request = ApprovalRequest::new(augmented, diff, files_affected.iter().cloned());
        if let Some(intent) = ctx.active_intent() {
            request = request.with_intent(intent.id.clone());
        }

        tracing::debug!(
            request_id = %request.id,
            out_of_scope = out_of_scope_paths.len(),
            "escalating out-of-scope change for approval"
        );

        let decision = self.workflow.submit_for_approval(request, timeout).await?;
        Ok(ApprovalVerdict {
            approved: decision.approved,
            requires_override: decision.is_override(),
        })
    }

    /// Record a human decision. Thin delegation to the workflow.
    pub fn record_approval_decision(
        &self,
        request_id: &RequestId,
        approved: bool,
        approver: &str,
        notes: Option<String>,
        requires_override: Option<bool>,
    ) -> ApprovalDecision {
        self.workflow
            .record_decision(request_id, approved, approver, notes, requires_override)
    }

    /// All approvals currently awaiting a decision.
    #[must_use]
    pub fn get_pending_approvals(&self) -> Vec<ApprovalRequest> {
        self.workflow.get_all_pending_requests()
    }

    /// All decisions recorded for requests tagged with an intent.
    #[must_use]
    pub fn get_intent_approvals(&self, intent_id: &IntentId) -> Vec<ApprovalDecision> {
        self.workflow.get_decisions_by_intent(intent_id)
    }

    /// Whether a request is still awaiting a decision.
    #[must_use]
    pub fn is_approval_pending(&self, request_id: &RequestId) -> bool {
        self.workflow.get_pending_request(request_id).is_some()
    }

    /// The underlying approval workflow.
    #[must_use]
    pub fn workflow(&self) -> &ApprovalWorkflow {
        &self.workflow
    }

    /// Look an intent up without selecting it.
    #[must_use]
    pub fn peek_intent(&self, intent_id: &IntentId) -> Option<Intent> {
        self.registry.get_intent(intent_id)
    }
}

impl std::fmt::Debug for IntentGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentGate")
            .field("workflow", &self.workflow)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::RegistrySnapshot;

    fn gate_with(intents: Vec<Intent>) -> IntentGate {
        IntentGate::new(
            Arc::new(RegistrySnapshot::from_intents(intents)),
            Arc::new(ApprovalWorkflow::in_memory()),
        )
    }

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_select_unknown_intent_fails() {
        let gate = gate_with(vec![]);
        let mut ctx = GateContext::new();
        let err = gate
            .select_intent(&mut ctx, &IntentId::from("missing"))
            .unwrap_err();
        assert!(matches!(err, GateError::UnknownIntent(_)));
        assert!(!ctx.has_active_intent());
    }

    #[test]
    fn test_select_returns_summary_and_activates() {
        let gate = gate_with(vec![
            Intent::new("i-1", "Auth work")
                .with_status("IN_PROGRESS")
                .with_scope(["src/auth/"]),
        ]);
        let mut ctx = GateContext::new();
        let summary = gate.select_intent(&mut ctx, &IntentId::from("i-1")).unwrap();

        assert_eq!(summary.name, "Auth work");
        assert_eq!(summary.owned_scope, vec!["src/auth/"]);
        assert!(ctx.has_active_intent());
    }

    #[test]
    fn test_clear_releases_intent() {
        let gate = gate_with(vec![Intent::new("i-1", "X").with_scope(["src/"])]);
        let mut ctx = GateContext::new();
        gate.select_intent(&mut ctx, &IntentId::from("i-1")).unwrap();

        gate.clear_active_intent(&mut ctx);
        assert!(!ctx.has_active_intent());

        let result = gate.validate_scope(&ctx, &paths(&["src/main.rs"]));
        assert!(!result.within_scope);
        assert!(result.reason.unwrap().contains("no active intent"));
    }

    #[test]
    fn test_gatekeep_requires_intent_for_mutating_tools() {
        let gate = gate_with(vec![Intent::new("i-1", "X")]);
        let ctx = GateContext::new();

        let denied = gate.gatekeep(&ctx, ToolKind::FileWrite);
        assert!(!denied.is_allowed());
        assert!(denied.message().unwrap().contains("active intent"));

        // Non-mutating tools pass without an intent.
        assert!(gate.gatekeep(&ctx, ToolKind::FileRead).is_allowed());
        assert!(gate.gatekeep(&ctx, ToolKind::Search).is_allowed());
    }

    #[test]
    fn test_gatekeep_allows_mutating_with_intent() {
        let gate = gate_with(vec![Intent::new("i-1", "X")]);
        let mut ctx = GateContext::new();
        gate.select_intent(&mut ctx, &IntentId::from("i-1")).unwrap();
        assert!(gate.gatekeep(&ctx, ToolKind::PatchApply).is_allowed());
    }

    #[test]
    fn test_no_intent_distinct_from_scope_miss() {
        let gate = gate_with(vec![Intent::new("i-1", "X").with_scope(["src/auth/"])]);
        let mut ctx = GateContext::new();

        let no_intent = gate.validate_scope(&ctx, &paths(&["README.md"]));
        assert!(no_intent.reason.unwrap().contains("no active intent"));

        gate.select_intent(&mut ctx, &IntentId::from("i-1")).unwrap();
        let miss = gate.validate_scope(&ctx, &paths(&["README.md"]));
        assert!(!miss.within_scope);
        assert!(miss.reason.unwrap().contains("outside scope"));
    }

    #[test]
    fn test_single_path_convenience() {
        let gate = gate_with(vec![Intent::new("i-1", "X").with_scope(["src/auth/"])]);
        let mut ctx = GateContext::new();

        // No active intent: false, not an error.
        assert!(!gate.is_path_in_scope(&ctx, "src/auth/mod.rs"));

        gate.select_intent(&mut ctx, &IntentId::from("i-1")).unwrap();
        assert!(gate.is_path_in_scope(&ctx, "src/auth/mod.rs"));
        assert!(!gate.is_path_in_scope(&ctx, "src/db/mod.rs"));
    }

    #[test]
    fn test_contexts_are_independent_sessions() {
        let gate = gate_with(vec![
            Intent::new("i-1", "First").with_scope(["src/a/"]),
            Intent::new("i-2", "Second").with_scope(["src/b/"]),
        ]);
        let mut first = GateContext::new();
        let mut second = GateContext::new();
        gate.select_intent(&mut first, &IntentId::from("i-1")).unwrap();
        gate.select_intent(&mut second, &IntentId::from("i-2")).unwrap();

        assert!(gate.is_path_in_scope(&first, "src/a/x.rs"));
        assert!(!gate.is_path_in_scope(&first, "src/b/x.rs"));
        assert!(gate.is_path_in_scope(&second, "src/b/x.rs"));
        assert!(!gate.is_path_in_scope(&second, "src/a/x.rs"));
    }
}
