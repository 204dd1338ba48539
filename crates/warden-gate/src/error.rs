//! Error types for the intent gate.
//!
//! Only handshake failures are errors here. "No active intent" and scope
//! misses come back as data ([`ScopeValidation`](warden_scope::ScopeValidation),
//! [`GateVerdict`](crate::GateVerdict)) because callers are expected to
//! branch on them; an unknown intent id has no meaningful continuation.

use warden_core::IntentId;

/// Errors raised by gate operations.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// Intent selection referenced an id the registry does not know.
    #[error("unknown intent id: {0}")]
    UnknownIntent(IntentId),
}

/// Result type for gate operations.
pub type GateResult<T> = Result<T, GateError>;
