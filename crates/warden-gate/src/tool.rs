//! The closed set of tools the gate knows about.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A tool an agent can invoke.
///
/// A closed enumeration rather than a string list so that
/// [`is_mutating`](ToolKind::is_mutating) stays an exhaustive match: adding
/// a variant refuses to compile until it is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Write or create a file.
    FileWrite,
    /// Delete a file.
    FileDelete,
    /// Apply a patch to the working tree.
    PatchApply,
    /// Execute a shell command.
    ShellExecute,
    /// Read a file.
    FileRead,
    /// List a directory.
    DirectoryList,
    /// Search file contents.
    Search,
}

impl ToolKind {
    /// Whether invoking this tool can mutate the working tree.
    ///
    /// Mutating tools require an active intent; everything else passes the
    /// gate unconditionally.
    #[must_use]
    pub fn is_mutating(self) -> bool {
        match self {
            Self::FileWrite | Self::FileDelete | Self::PatchApply | Self::ShellExecute => true,
            Self::FileRead | Self::DirectoryList | Self::Search => false,
        }
    }

    /// The tool's external name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::FileWrite => "file_write",
            Self::FileDelete => "file_delete",
            Self::PatchApply => "patch_apply",
            Self::ShellExecute => "shell_execute",
            Self::FileRead => "file_read",
            Self::DirectoryList => "directory_list",
            Self::Search => "search",
        }
    }

    /// Map an external tool name onto the closed set.
    ///
    /// Returns `None` for names the gate does not know; callers treat those
    /// as non-mutating (unknown tools are always allowed).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "file_write" => Some(Self::FileWrite),
            "file_delete" => Some(Self::FileDelete),
            "patch_apply" => Some(Self::PatchApply),
            "shell_execute" => Some(Self::ShellExecute),
            "file_read" => Some(Self::FileRead),
            "directory_list" => Some(Self::DirectoryList),
            "search" => Some(Self::Search),
            _ => None,
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The outcome of a gatekeeping check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateVerdict {
    /// The tool may proceed.
    Allowed,
    /// The tool is blocked until the caller selects a valid intent.
    Denied {
        /// Actionable explanation for the caller.
        message: String,
    },
}

impl GateVerdict {
    /// Whether the tool may proceed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// The denial message, if denied.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Allowed => None,
            Self::Denied { message } => Some(message),
        }
    }
}
