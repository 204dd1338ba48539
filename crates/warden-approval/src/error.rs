//! Error types for the approval workflow and its durable log.
//!
//! Rejections are not errors: a human saying "no" comes back as an
//! [`ApprovalDecision`](crate::ApprovalDecision) with `approved: false` so
//! callers can branch on it. Errors are reserved for the wait itself going
//! wrong.

/// Errors that can occur while waiting on an approval.
#[derive(Debug, thiserror::Error)]
pub enum ApprovalError {
    /// The bounded wait elapsed before a decision arrived.
    ///
    /// The request stays pending; a later decision is still recorded and
    /// queryable, it just no longer resumes this caller.
    #[error("approval timeout after {timeout_ms}ms")]
    Timeout {
        /// Time awaited before timing out, in milliseconds.
        timeout_ms: u64,
    },

    /// The decision channel was torn down while suspended.
    ///
    /// Happens when the workflow is reset with `clear_all` underneath a
    /// suspended caller.
    #[error("approval workflow was cleared while awaiting a decision")]
    ChannelClosed,
}

/// Result type for approval operations.
pub type ApprovalResult<T> = Result<T, ApprovalError>;

/// Errors from the append-only log backends.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// Filesystem-level failure.
    #[error("log I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record failed to serialize.
    #[error("log serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for log operations.
pub type LogResult<T> = Result<T, LogError>;
