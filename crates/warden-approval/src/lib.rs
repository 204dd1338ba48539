//! Warden Approval - Human-in-the-loop escalation for out-of-scope changes.
//!
//! This crate manages the full lifecycle of a human-approval request:
//!
//! - [`ApprovalRequest`] / [`ApprovalDecision`]: the paired records of an
//!   escalation and its outcome
//! - [`ApprovalWorkflow`]: pending/decided in-memory indices, event-driven
//!   suspension until a decision arrives, and startup replay
//! - [`LogStore`]: the append-only audit log (one JSON object per line),
//!   with file-backed and in-memory implementations
//!
//! # Suspension model
//!
//! `submit_for_approval` registers a oneshot channel keyed by request id and
//! awaits it; `record_decision` fires the channel directly. The wait is a
//! cooperative yield, not a thread, and can be bounded with a timeout.
//! Multiple requests may be pending concurrently; each is independent and
//! resolving one has no effect on the others.
//!
//! # Durability
//!
//! Every request and every decision is appended to the log as a
//! self-contained record. Appends are best-effort: a failed write degrades
//! to a warning rather than failing the workflow. On startup the log is
//! replayed in full: decided requests rebuild the decided index, and
//! requests that never received a decision are reconstructed as pending.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use warden_approval::{ApprovalRequest, ApprovalWorkflow};
//!
//! # tokio::runtime::Builder::new_multi_thread().enable_time().build().unwrap().block_on(async {
//! let workflow = Arc::new(ApprovalWorkflow::in_memory());
//! let request = ApprovalRequest::new("Touch README", "diff text", ["README.md"]);
//! let id = request.id.clone();
//!
//! let waiter = {
//!     let workflow = Arc::clone(&workflow);
//!     tokio::spawn(async move { workflow.submit_for_approval(request, None).await })
//! };
//!
//! // Elsewhere, a human decides.
//! tokio::task::yield_now().await;
//! workflow.record_decision(&id, true, "alice", None, None);
//!
//! let decision = waiter.await.unwrap().unwrap();
//! assert!(decision.approved);
//! assert!(workflow.is_approved(&id));
//! # });
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

/// Error types and results for the approval module.
pub mod error;
pub mod log;
pub mod request;
pub mod workflow;

pub use error::{ApprovalError, ApprovalResult, LogError, LogResult};
pub use log::{JsonlLogStore, LogEntry, LogStore, MemoryLogStore};
pub use request::{ApprovalDecision, ApprovalRequest, RequestId};
pub use workflow::ApprovalWorkflow;
