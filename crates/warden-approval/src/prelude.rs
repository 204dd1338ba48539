//! Convenience re-exports.

pub use crate::error::{ApprovalError, ApprovalResult, LogError, LogResult};
pub use crate::log::{JsonlLogStore, LogEntry, LogStore, MemoryLogStore};
pub use crate::request::{ApprovalDecision, ApprovalRequest, RequestId};
pub use crate::workflow::ApprovalWorkflow;
