//! The approval workflow: request lifecycle, indices, and suspension.
//!
//! # Lifecycle
//!
//! 1. A caller constructs an [`ApprovalRequest`] (pure, nothing stored).
//! 2. [`submit_for_approval`](ApprovalWorkflow::submit_for_approval) indexes
//!    it as pending, appends a request-only log record, and suspends until a
//!    matching decision arrives.
//! 3. [`record_decision`](ApprovalWorkflow::record_decision) moves the
//!    request from pending to decided, appends the merged record, and
//!    resumes the suspended caller through its oneshot channel.
//!
//! Once decided, a request never returns to pending; it stays in the decided
//! index and the log permanently.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;
use tokio::sync::oneshot;

use crate::error::{ApprovalError, ApprovalResult, LogResult};
use crate::log::{LogEntry, LogStore, MemoryLogStore};
use crate::request::{ApprovalDecision, ApprovalRequest, RequestId};
use warden_core::{IntentId, TurnId};

/// A decided request: the decision plus whatever request context was known
/// when it was recorded.
///
/// `request` is `None` when the decision referenced a request this process
/// never saw created (e.g. appended by another process sharing the log).
#[derive(Debug, Clone)]
struct DecidedRecord {
    request: Option<ApprovalRequest>,
    decision: ApprovalDecision,
}

/// Manages the full lifecycle of human-approval requests.
///
/// Holds the pending and decided indices, the per-request resumption
/// channels, and the durable log. Thread-safe; cheap to share behind an
/// [`Arc`].
pub struct ApprovalWorkflow {
    store: Arc<dyn LogStore>,
    pending: RwLock<HashMap<RequestId, ApprovalRequest>>,
    decided: RwLock<HashMap<RequestId, DecidedRecord>>,
    /// One sender per suspended `submit_for_approval` call.
    waiters: Mutex<HashMap<RequestId, oneshot::Sender<ApprovalDecision>>>,
}

impl ApprovalWorkflow {
    /// Create a workflow over the given log store, replaying the log to
    /// rebuild both indices.
    ///
    /// Records with a decision populate the decided index; requests that
    /// never received one are reconstructed as pending, so an approval
    /// mid-flight at shutdown is reachable again after restart. A log that
    /// cannot be read degrades to empty indices with a warning.
    #[must_use]
    pub fn new(store: Arc<dyn LogStore>) -> Self {
        let mut pending: HashMap<RequestId, ApprovalRequest> = HashMap::new();
        let mut decided: HashMap<RequestId, DecidedRecord> = HashMap::new();

        match store.read_all() {
            Ok(entries) => {
                for entry in entries {
                    let id = entry.request.id.clone();
                    if let Some(decision) = entry.decision {
                        pending.remove(&id);
                        decided.insert(
                            id,
                            DecidedRecord {
                                request: Some(entry.request),
                                decision,
                            },
                        );
                    } else if !decided.contains_key(&id) {
                        pending.insert(id, entry.request);
                    }
                }
            },
            Err(e) => {
                tracing::warn!("failed to replay approval log, starting empty: {e}");
            },
        }

        if !pending.is_empty() {
            tracing::debug!(count = pending.len(), "reconstructed pending approvals from log");
        }

        Self {
            store,
            pending: RwLock::new(pending),
            decided: RwLock::new(decided),
            waiters: Mutex::new(HashMap::new()),
        }
    }

    /// Create a workflow backed by an in-memory log (tests, ephemeral
    /// sessions).
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryLogStore::new()))
    }

    /// Submit a request and suspend until a matching decision is recorded.
    ///
    /// The request is indexed as pending and appended to the log before the
    /// wait begins. Suspension is event-driven: a oneshot channel keyed by
    /// the request id, fired by [`record_decision`](Self::record_decision).
    /// `timeout: None` waits unboundedly (the caller owns that risk);
    /// `Some(limit)` bounds the wait.
    ///
    /// If a decision for this id already exists, it is returned immediately.
    ///
    /// # Errors
    ///
    /// [`ApprovalError::Timeout`] if the bounded wait elapses; the request
    /// stays pending and a later decision is still recorded, it just no
    /// longer resumes this caller. [`ApprovalError::ChannelClosed`] if the
    /// workflow is cleared underneath the wait.
    pub async fn submit_for_approval(
        &self,
        request: ApprovalRequest,
        timeout: Option<Duration>,
    ) -> ApprovalResult<ApprovalDecision> {
        let id = request.id.clone();

        // Register the waiter before checking the decided index, so a
        // decision racing in between cannot slip past both.
        let (tx, rx) = oneshot::channel();
        self.lock_waiters().insert(id.clone(), tx);

        if let Some(decision) = self.get_decision(&id) {
            self.lock_waiters().remove(&id);
            return Ok(decision);
        }

        self.write_pending().insert(id.clone(), request.clone());
        self.append_entry(&LogEntry::request_only(request));

        tracing::debug!(request_id = %id, "suspended awaiting approval decision");

        let received = match timeout {
            Some(limit) => match tokio::time::timeout(limit, rx).await {
                Ok(received) => received,
                Err(_) => {
                    self.lock_waiters().remove(&id);
                    let timeout_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
                    tracing::debug!(request_id = %id, timeout_ms, "approval wait timed out");
                    return Err(ApprovalError::Timeout { timeout_ms });
                },
            },
            None => rx.await,
        };

        received.map_err(|_| ApprovalError::ChannelClosed)
    }

    /// Record a human decision for a request.
    ///
    /// Moves the request out of the pending index (if present), stores the
    /// decision in the decided index, appends the merged record to the log,
    /// and resumes any caller suspended on this id.
    ///
    /// The request id is not required to be known to this process: a
    /// decision for a request created elsewhere (or expired from pending) is
    /// still indexed and logged, with a stub request context marking the
    /// gap; resumption is then simply a no-op.
    pub fn record_decision(
        &self,
        request_id: &RequestId,
        approved: bool,
        approver: &str,
        notes: Option<String>,
        requires_override: Option<bool>,
    ) -> ApprovalDecision {
        let mut decision = ApprovalDecision::new(request_id.clone(), approved, approver);
        if let Some(notes) = notes {
            decision = decision.with_notes(notes);
        }
        if let Some(requires_override) = requires_override {
            decision = decision.with_override(requires_override);
        }

        let request = self.write_pending().remove(request_id);
        if request.is_none() {
            tracing::warn!(
                request_id = %request_id,
                "recording decision for a request not in the pending index"
            );
        }

        let logged_request = request.clone().unwrap_or_else(|| ApprovalRequest {
            id: request_id.clone(),
            timestamp: decision.timestamp,
            change_summary: "(request not observed by this process)".to_string(),
            diff: String::new(),
            files_affected: Vec::new(),
            intent_id: None,
            turn_id: None,
        });

        self.write_decided().insert(
            request_id.clone(),
            DecidedRecord {
                request,
                decision: decision.clone(),
            },
        );
        self.append_entry(&LogEntry::decided(logged_request, decision.clone()));

        if let Some(tx) = self.lock_waiters().remove(request_id) {
            // The receiver may have timed out and gone; that is fine.
            let _ = tx.send(decision.clone());
        }

        decision
    }

    // -- Query surface --

    /// Get a pending request by id.
    #[must_use]
    pub fn get_pending_request(&self, id: &RequestId) -> Option<ApprovalRequest> {
        self.read_pending().get(id).cloned()
    }

    /// All currently pending requests, oldest first.
    #[must_use]
    pub fn get_all_pending_requests(&self) -> Vec<ApprovalRequest> {
        let mut requests: Vec<ApprovalRequest> = self.read_pending().values().cloned().collect();
        requests.sort_by_key(|r| r.timestamp);
        requests
    }

    /// Get the decision for a request, if one was recorded.
    #[must_use]
    pub fn get_decision(&self, id: &RequestId) -> Option<ApprovalDecision> {
        self.read_decided().get(id).map(|r| r.decision.clone())
    }

    /// Whether a request was explicitly approved.
    ///
    /// Unknown and still-pending requests are not approved; absence is not
    /// an error.
    #[must_use]
    pub fn is_approved(&self, id: &RequestId) -> bool {
        self.get_decision(id).is_some_and(|d| d.approved)
    }

    /// Whether a request's decision acknowledges a scope override.
    #[must_use]
    pub fn requires_override(&self, id: &RequestId) -> bool {
        self.get_decision(id).is_some_and(|d| d.is_override())
    }

    /// All decisions for requests tagged with an intent, oldest first.
    #[must_use]
    pub fn get_decisions_by_intent(&self, intent_id: &IntentId) -> Vec<ApprovalDecision> {
        self.decisions_matching(|r| r.intent_id.as_ref() == Some(intent_id))
    }

    /// All decisions for requests tagged with a turn, oldest first.
    #[must_use]
    pub fn get_decisions_by_turn(&self, turn_id: &TurnId) -> Vec<ApprovalDecision> {
        self.decisions_matching(|r| r.turn_id.as_ref() == Some(turn_id))
    }

    /// Read the full audit log, in append order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    pub fn get_all_log_entries(&self) -> LogResult<Vec<LogEntry>> {
        self.store.read_all()
    }

    /// Destructive reset for test isolation: removes the durable log,
    /// clears both indices, and drops all resumption channels (suspended
    /// callers resume with [`ApprovalError::ChannelClosed`]).
    pub fn clear_all(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!("failed to clear approval log: {e}");
        }
        self.write_pending().clear();
        self.write_decided().clear();
        self.lock_waiters().clear();
    }

    /// Number of pending requests.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.read_pending().len()
    }

    /// Number of decided requests.
    #[must_use]
    pub fn decided_count(&self) -> usize {
        self.read_decided().len()
    }

    // -- Internals --

    fn decisions_matching(
        &self,
        matches: impl Fn(&ApprovalRequest) -> bool,
    ) -> Vec<ApprovalDecision> {
        let decided = self.read_decided();
        let mut decisions: Vec<ApprovalDecision> = decided
            .values()
            .filter(|record| record.request.as_ref().is_some_and(&matches))
            .map(|record| record.decision.clone())
            .collect();
        decisions.sort_by_key(|d| d.timestamp);
        decisions
    }

    /// Append to the durable log, best-effort. Durability degradation is a
    /// warning, never a workflow failure.
    fn append_entry(&self, entry: &LogEntry) {
        if let Err(e) = self.store.append(entry) {
            tracing::warn!(request_id = %entry.request.id, "failed to append approval log entry: {e}");
        }
    }

    fn read_pending(&self) -> std::sync::RwLockReadGuard<'_, HashMap<RequestId, ApprovalRequest>> {
        self.pending.read().unwrap_or_else(|e| {
            tracing::warn!("pending index lock poisoned, recovering");
            e.into_inner()
        })
    }

    fn write_pending(
        &self,
    ) -> std::sync::RwLockWriteGuard<'_, HashMap<RequestId, ApprovalRequest>> {
        self.pending.write().unwrap_or_else(|e| {
            tracing::warn!("pending index lock poisoned, recovering");
            e.into_inner()
        })
    }

    fn read_decided(&self) -> std::sync::RwLockReadGuard<'_, HashMap<RequestId, DecidedRecord>> {
        self.decided.read().unwrap_or_else(|e| {
            tracing::warn!("decided index lock poisoned, recovering");
            e.into_inner()
        })
    }

    fn write_decided(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<RequestId, DecidedRecord>> {
        self.decided.write().unwrap_or_else(|e| {
            tracing::warn!("decided index lock poisoned, recovering");
            e.into_inner()
        })
    }

    fn lock_waiters(
        &self,
    ) -> std::sync::MutexGuard<'_, HashMap<RequestId, oneshot::Sender<ApprovalDecision>>> {
        self.waiters.lock().unwrap_or_else(|e| {
            tracing::warn!("waiter map lock poisoned, recovering");
            e.into_inner()
        })
    }
}

impl std::fmt::Debug for ApprovalWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApprovalWorkflow")
            .field("pending", &self.pending_count())
            .field("decided", &self.decided_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
