//! Identifier newtypes and timestamps shared across the workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A UTC timestamp.
///
/// Thin wrapper over [`chrono::DateTime<Utc>`] so call sites read as
/// `Timestamp::now()` and wire records serialize as RFC 3339 strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    /// The current time.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Check whether this timestamp lies in the future.
    #[must_use]
    pub fn is_future(&self) -> bool {
        self.0 > Utc::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

/// Unique identifier for an intent.
///
/// Assigned by the external registry; Warden treats it as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntentId(pub String);

impl IntentId {
    /// Wrap a registry-assigned identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IntentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for IntentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identifier for a single agent turn within a session.
///
/// Used to correlate approval decisions with the conversational turn that
/// triggered them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnId(pub String);

impl TurnId {
    /// Wrap a caller-assigned turn identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TurnId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_now_not_future() {
        let ts = Timestamp::now();
        assert!(!ts.is_future());
    }

    #[test]
    fn test_timestamp_display_rfc3339() {
        let ts = Timestamp::now();
        // RFC 3339 contains the date/time separator
        assert!(ts.to_string().contains('T'));
    }

    #[test]
    fn test_intent_id_roundtrip() {
        let id = IntentId::new("intent-001");
        assert_eq!(id.as_str(), "intent-001");
        assert_eq!(id.to_string(), "intent-001");
        assert_eq!(IntentId::from("intent-001"), id);
    }

    #[test]
    fn test_turn_id_display() {
        let id = TurnId::new("turn-42");
        assert_eq!(id.to_string(), "turn-42");
    }
}
