//! Path validation against a set of scope patterns.

use serde::{Deserialize, Serialize};

use crate::pattern::{ScopePattern, normalize};

/// The outcome of a scope check.
///
/// Transient: this is returned to callers so they can branch on it
/// (escalate to approval, abort, proceed); it is never persisted. Scope
/// misses are data, not errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeValidation {
    /// Whether every checked path fell within scope.
    pub within_scope: bool,
    /// Human-readable explanation when out of scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Echo of the scope patterns that were checked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_paths: Option<Vec<String>>,
    /// The first offending path, when out of scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempted_path: Option<String>,
}

impl ScopeValidation {
    /// A passing result.
    #[must_use]
    pub fn within() -> Self {
        Self {
            within_scope: true,
            reason: None,
            allowed_paths: None,
            attempted_path: None,
        }
    }

    /// A failing result with the given reason.
    #[must_use]
    pub fn outside(reason: impl Into<String>) -> Self {
        Self {
            within_scope: false,
            reason: Some(reason.into()),
            allowed_paths: None,
            attempted_path: None,
        }
    }

    /// Attach the pattern list that was checked.
    #[must_use]
    pub fn with_allowed_paths(mut self, patterns: Vec<String>) -> Self {
        self.allowed_paths = Some(patterns);
        self
    }

    /// Attach the first offending path.
    #[must_use]
    pub fn with_attempted_path(mut self, path: impl Into<String>) -> Self {
        self.attempted_path = Some(path.into());
        self
    }
}

/// Check a single path against a list of scope patterns.
///
/// Patterns are evaluated in list order and the first match wins. An empty
/// pattern list never matches: an intent with no declared scope owns
/// nothing.
#[must_use]
pub fn is_path_in_scope(path: &str, patterns: &[String]) -> ScopeValidation {
    if patterns.is_empty() {
        return ScopeValidation::outside("no scope defined")
            .with_attempted_path(path);
    }

    let normalized = normalize(path);
    for pattern in patterns {
        if ScopePattern::new(pattern).matches(&normalized) {
            return ScopeValidation::within();
        }
    }

    ScopeValidation::outside(format!(
        "path '{path}' does not match any pattern in the owned scope"
    ))
    .with_allowed_paths(patterns.to_vec())
    .with_attempted_path(path)
}

/// Check a set of paths against a list of scope patterns, all-or-nothing.
///
/// Every path must independently pass [`is_path_in_scope`]. On failure the
/// reason reports the offender count and the ordered list of offending
/// paths; `attempted_path` is the first offender.
#[must_use]
pub fn are_paths_in_scope(paths: &[String], patterns: &[String]) -> ScopeValidation {
    let offending: Vec<&String> = paths
        .iter()
        .filter(|p| !is_path_in_scope(p, patterns).within_scope)
        .collect();

    if offending.is_empty() {
        return ScopeValidation::within();
    }

    let joined = offending
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    ScopeValidation::outside(format!(
        "{} file(s) outside scope: {joined}",
        offending.len()
    ))
    .with_allowed_paths(patterns.to_vec())
    .with_attempted_path(offending[0].clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope(patterns: &[&str]) -> Vec<String> {
        patterns.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_empty_scope_never_matches() {
        let result = is_path_in_scope("src/main.rs", &[]);
        assert!(!result.within_scope);
        assert_eq!(result.reason.as_deref(), Some("no scope defined"));
    }

    #[test]
    fn test_first_match_wins() {
        let patterns = scope(&["src/db/", "src/auth/"]);
        assert!(is_path_in_scope("src/auth/mod.rs", &patterns).within_scope);
    }

    #[test]
    fn test_miss_reports_attempted_path_and_patterns() {
        let patterns = scope(&["src/auth/"]);
        let result = is_path_in_scope("README.md", &patterns);
        assert!(!result.within_scope);
        assert!(result.reason.unwrap().contains("README.md"));
        assert_eq!(result.allowed_paths, Some(patterns));
        assert_eq!(result.attempted_path.as_deref(), Some("README.md"));
    }

    #[test]
    fn test_all_paths_must_pass() {
        let patterns = scope(&["src/auth/"]);
        let paths = vec!["src/auth/ok.ts".to_string(), "src/db/bad.ts".to_string()];
        let result = are_paths_in_scope(&paths, &patterns);
        assert!(!result.within_scope);
        let reason = result.reason.unwrap();
        assert!(reason.contains("1 file(s) outside scope"));
        assert!(reason.contains("src/db/bad.ts"));
        assert_eq!(result.attempted_path.as_deref(), Some("src/db/bad.ts"));
    }

    #[test]
    fn test_multiple_offenders_reported_in_order() {
        let patterns = scope(&["src/auth/"]);
        let paths = vec![
            "docs/a.md".to_string(),
            "src/auth/ok.ts".to_string(),
            "docs/b.md".to_string(),
        ];
        let result = are_paths_in_scope(&paths, &patterns);
        let reason = result.reason.unwrap();
        assert!(reason.contains("2 file(s) outside scope"));
        assert!(reason.contains("docs/a.md, docs/b.md"));
        assert_eq!(result.attempted_path.as_deref(), Some("docs/a.md"));
    }

    #[test]
    fn test_empty_path_set_is_vacuously_in_scope() {
        let result = are_paths_in_scope(&[], &scope(&["src/"]));
        assert!(result.within_scope);
    }

    #[test]
    fn test_validation_serializes_without_absent_fields() {
        let json = serde_json::to_string(&ScopeValidation::within()).unwrap();
        assert!(!json.contains("reason"));
        assert!(json.contains("within_scope"));
    }
}
