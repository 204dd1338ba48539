//! Convenience re-exports.

pub use crate::diff::extract_files_from_diff;
pub use crate::pattern::ScopePattern;
pub use crate::validate::{ScopeValidation, are_paths_in_scope, is_path_in_scope};
