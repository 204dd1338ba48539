//! Warden Scope - Pattern matching over file paths and diff text.
//!
//! This crate decides whether proposed file paths fall within an intent's
//! owned scope. It is the pure leaf of the gating system: no state, no I/O,
//! no clock.
//!
//! # Scope-pattern mini-language
//!
//! Each entry in an intent's owned scope is one of, checked in this order:
//!
//! 1. **Exact**: the pattern equals the path verbatim.
//! 2. **Directory**: the pattern ends in `/` and matches anything nested
//!    under that directory, at any depth.
//! 3. **Glob**: `**` spans path separators, `*` and `?` do not.
//!
//! The ordering matters: `src/auth/` covers `src/auth/x/y.ts` as a directory
//! prefix without ever reaching glob logic, and an exact pattern is never
//! glob-interpreted.
//!
//! # Example
//!
//! ```
//! use warden_scope::{is_path_in_scope, are_paths_in_scope};
//!
//! let scope = vec!["src/auth/".to_string(), "docs/*.md".to_string()];
//!
//! assert!(is_path_in_scope("src/auth/jwt/handler.ts", &scope).within_scope);
//! assert!(is_path_in_scope("docs/intro.md", &scope).within_scope);
//!
//! let result = are_paths_in_scope(
//!     &["src/auth/ok.ts".to_string(), "src/db/bad.ts".to_string()],
//!     &scope,
//! );
//! assert!(!result.within_scope);
//! assert_eq!(result.attempted_path.as_deref(), Some("src/db/bad.ts"));
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod diff;
pub mod pattern;
pub mod validate;

pub use diff::extract_files_from_diff;
pub use pattern::ScopePattern;
pub use validate::{ScopeValidation, are_paths_in_scope, is_path_in_scope};
