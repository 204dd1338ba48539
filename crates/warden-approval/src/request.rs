//! Approval request and decision types.
//!
//! A request is created once and immutable thereafter; a decision is
//! recorded exactly once per request. Both serialize with snake_case wire
//! fields matching the audit-log record schema.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use warden_core::{IntentId, Timestamp, TurnId};

/// Unique identifier for an approval request.
///
/// Random v4 UUIDs make collision under rapid concurrent creation
/// negligible, which is the invariant that matters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Create a new random request ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req:{}", self.0)
    }
}

/// A request for human approval of a proposed change.
///
/// Carries everything a reviewer needs for an informed decision: a summary,
/// the full diff, and the affected files, plus optional intent/turn tags for
/// later correlation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalRequest {
    /// Unique request identifier.
    #[serde(rename = "request_id")]
    pub id: RequestId,
    /// When the request was created.
    pub timestamp: Timestamp,
    /// Human-readable summary of the proposed change.
    pub change_summary: String,
    /// The full diff text of the proposed change.
    pub diff: String,
    /// Ordered list of files the change touches.
    pub files_affected: Vec<String>,
    /// The intent under which the change was proposed, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent_id: Option<IntentId>,
    /// The agent turn that proposed the change, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turn_id: Option<TurnId>,
}

impl ApprovalRequest {
    /// Create a new approval request. Pure construction; nothing is stored
    /// or logged until the request is submitted.
    pub fn new(
        summary: impl Into<String>,
        diff: impl Into<String>,
        files_affected: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id: RequestId::new(),
            timestamp: Timestamp::now(),
            change_summary: summary.into(),
            diff: diff.into(),
            files_affected: files_affected.into_iter().map(Into::into).collect(),
            intent_id: None,
            turn_id: None,
        }
    }

    /// Tag the request with the intent it was proposed under.
    #[must_use]
    pub fn with_intent(mut self, intent_id: IntentId) -> Self {
        self.intent_id = Some(intent_id);
        self
    }

    /// Tag the request with the turn that proposed it.
    #[must_use]
    pub fn with_turn(mut self, turn_id: TurnId) -> Self {
        self.turn_id = Some(turn_id);
        self
    }
}

impl fmt::Display for ApprovalRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} file(s)): {}",
            self.id,
            self.files_affected.len(),
            self.change_summary
        )
    }
}

/// The decision a human made on an approval request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalDecision {
    /// The request this decision addresses.
    pub request_id: RequestId,
    /// When the decision was made.
    pub timestamp: Timestamp,
    /// Whether the change was approved.
    pub approved: bool,
    /// Identity of the approver.
    pub approver: String,
    /// Free-form notes from the approver.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approver_notes: Option<String>,
    /// Whether the approval explicitly overrides a scope violation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_override: Option<bool>,
}

impl ApprovalDecision {
    /// Create a new decision.
    pub fn new(request_id: RequestId, approved: bool, approver: impl Into<String>) -> Self {
        Self {
            request_id,
            timestamp: Timestamp::now(),
            approved,
            approver: approver.into(),
            approver_notes: None,
            requires_override: None,
        }
    }

    /// Attach approver notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.approver_notes = Some(notes.into());
        self
    }

    /// Mark whether this approval overrides a scope violation.
    #[must_use]
    pub fn with_override(mut self, requires_override: bool) -> Self {
        self.requires_override = Some(requires_override);
        self
    }

    /// Whether this decision acknowledges a scope override. Absent means no.
    #[must_use]
    pub fn is_override(&self) -> bool {
        self.requires_override.unwrap_or(false)
    }
}

impl fmt::Display for ApprovalDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.approved { "approved" } else { "rejected" };
        write!(f, "{} {} by {}", self.request_id, verdict, self.approver)
    }
}
