//! The append-only approval audit log.
//!
//! One JSON object per line. A record is either a bare request or a request
//! merged with its decision; records are only ever added, never edited or
//! removed, except by the explicit `clear` used for test resets. The log is
//! the single durable source of truth: the workflow's in-memory indices are
//! rebuilt from it on startup.

use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::LogResult;
use crate::request::{ApprovalDecision, ApprovalRequest};
use warden_core::Timestamp;

/// One self-contained audit record.
///
/// Request fields are flattened into the record, so a request-only entry and
/// a merged request+decision entry share the same top-level shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// The request this record describes.
    #[serde(flatten)]
    pub request: ApprovalRequest,
    /// The decision, present only for decision records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<ApprovalDecision>,
    /// When the record was appended.
    pub logged_at: Timestamp,
}

impl LogEntry {
    /// A record for a request awaiting a decision.
    #[must_use]
    pub fn request_only(request: ApprovalRequest) -> Self {
        Self {
            request,
            decision: None,
            logged_at: Timestamp::now(),
        }
    }

    /// A merged record for a request and its decision.
    #[must_use]
    pub fn decided(request: ApprovalRequest, decision: ApprovalDecision) -> Self {
        Self {
            request,
            decision: Some(decision),
            logged_at: Timestamp::now(),
        }
    }

    /// Whether this record carries a decision.
    #[must_use]
    pub fn is_decided(&self) -> bool {
        self.decision.is_some()
    }
}

/// Storage backend for the approval audit log.
///
/// Implementations must be thread-safe. Appends are single-record writes;
/// there is no read-modify-write cycle to race on.
pub trait LogStore: Send + Sync {
    /// Append one record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be serialized or written.
    fn append(&self, entry: &LogEntry) -> LogResult<()>;

    /// Read every record, in append order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read. Individual
    /// malformed records are skipped with a warning, not surfaced as errors.
    fn read_all(&self) -> LogResult<Vec<LogEntry>>;

    /// Destroy the log. Test-isolation reset only.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be removed.
    fn clear(&self) -> LogResult<()>;
}

/// File-backed log store, one JSON object per line.
pub struct JsonlLogStore {
    path: PathBuf,
}

impl JsonlLogStore {
    /// Create a store writing to the given path. The file and its parent
    /// directories are created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The log file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogStore for JsonlLogStore {
    fn append(&self, entry: &LogEntry) -> LogResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let line = serde_json::to_string(entry)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    fn read_all(&self) -> LogResult<Vec<LogEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        let mut entries = Vec::new();
        for line in contents.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<LogEntry>(line) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    tracing::warn!("skipping malformed approval log line: {e}");
                },
            }
        }
        Ok(entries)
    }

    fn clear(&self) -> LogResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for JsonlLogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonlLogStore")
            .field("path", &self.path)
            .finish()
    }
}

/// In-memory log store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryLogStore {
    entries: RwLock<Vec<LogEntry>>,
}

impl MemoryLogStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogStore for MemoryLogStore {
    fn append(&self, entry: &LogEntry) -> LogResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(|e| {
            tracing::warn!("MemoryLogStore lock poisoned, recovering");
            e.into_inner()
        });
        entries.push(entry.clone());
        Ok(())
    }

    fn read_all(&self) -> LogResult<Vec<LogEntry>> {
        let entries = self.entries.read().unwrap_or_else(|e| {
            tracing::warn!("MemoryLogStore lock poisoned, recovering");
            e.into_inner()
        });
        Ok(entries.clone())
    }

    fn clear(&self) -> LogResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(|e| {
            tracing::warn!("MemoryLogStore lock poisoned, recovering");
            e.into_inner()
        });
        entries.clear();
        Ok(())
    }
}

impl std::fmt::Debug for MemoryLogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.entries.read().map(|e| e.len()).unwrap_or(0);
        f.debug_struct("MemoryLogStore")
            .field("count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestId;
    use warden_core::IntentId;

    fn sample_request() -> ApprovalRequest {
        ApprovalRequest::new("edit config", "--- a/c\n+++ b/c\n", ["config.toml"])
            .with_intent(IntentId::from("i-1"))
    }

    #[test]
    fn test_entry_wire_shape() {
        let request = sample_request();
        let entry = LogEntry::request_only(request.clone());
        let json = serde_json::to_string(&entry).unwrap();

        // Flattened request fields at top level, no decision key when absent.
        assert!(json.contains("\"request_id\""));
        assert!(json.contains("\"change_summary\""));
        assert!(json.contains("\"logged_at\""));
        assert!(!json.contains("\"decision\""));

        let decision = ApprovalDecision::new(request.id.clone(), true, "alice");
        let merged = LogEntry::decided(request, decision);
        let json = serde_json::to_string(&merged).unwrap();
        assert!(json.contains("\"decision\""));
        assert!(json.contains("\"approver\":\"alice\""));
        assert!(merged.is_decided());
    }

    #[test]
    fn test_jsonl_append_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlLogStore::new(dir.path().join("logs/approvals.jsonl"));

        let first = sample_request();
        let second = sample_request();
        store.append(&LogEntry::request_only(first.clone())).unwrap();
        store
            .append(&LogEntry::decided(
                second.clone(),
                ApprovalDecision::new(second.id.clone(), false, "bob"),
            ))
            .unwrap();

        let entries = store.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].request.id, first.id);
        assert!(!entries[0].is_decided());
        assert!(entries[1].is_decided());
    }

    #[test]
    fn test_jsonl_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlLogStore::new(dir.path().join("never-written.jsonl"));
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_jsonl_skips_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("approvals.jsonl");
        let store = JsonlLogStore::new(&path);
        store
            .append(&LogEntry::request_only(sample_request()))
            .unwrap();

        // Corrupt the log with a non-JSON line and a truncated record.
        let mut contents = fs::read_to_string(&path).unwrap();
        contents.push_str("this is not json\n{\"request_id\":\n");
        fs::write(&path, contents).unwrap();

        let entries = store.read_all().unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_jsonl_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("approvals.jsonl");
        let store = JsonlLogStore::new(&path);
        store
            .append(&LogEntry::request_only(sample_request()))
            .unwrap();
        assert!(path.exists());

        store.clear().unwrap();
        assert!(!path.exists());
        // Clearing an already-absent log is fine.
        store.clear().unwrap();
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryLogStore::new();
        store
            .append(&LogEntry::request_only(sample_request()))
            .unwrap();
        assert_eq!(store.read_all().unwrap().len(), 1);
        store.clear().unwrap();
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_entry_roundtrip_preserves_ids() {
        let request = sample_request();
        let id: RequestId = request.id.clone();
        let entry = LogEntry::decided(
            request,
            ApprovalDecision::new(id.clone(), true, "alice").with_override(true),
        );
        let json = serde_json::to_string(&entry).unwrap();
        let back: LogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.request.id, id);
        assert_eq!(back.decision.unwrap().request_id, id);
    }
}
