//! Scope pattern compilation and matching logic.

use regex::Regex;

/// A single compiled scope pattern.
///
/// Matching applies three tiers in order (exact, directory prefix, then
/// glob) and the first tier that applies wins. See the crate docs for the
/// mini-language.
///
/// Glob patterns compile to anchored regexes rather than a glob library:
/// `src/**/hooks.ts` must require at least one intermediate directory
/// (`src/hooks.ts` does not match), which rules out gitignore-style `**`
/// semantics where `a/**/b` also matches `a/b`.
#[derive(Debug, Clone)]
pub struct ScopePattern {
    raw: String,
    glob: Option<Regex>,
}

impl ScopePattern {
    /// Compile a pattern string.
    ///
    /// Never fails: a glob that does not compile simply never matches via
    /// the glob tier (the exact tier still applies).
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        let raw = normalize(pattern);
        let glob = if raw.contains('*') || raw.contains('?') {
            let expr = glob_to_regex(&raw);
            match Regex::new(&expr) {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::warn!(pattern = %raw, "scope pattern failed to compile: {e}");
                    None
                },
            }
        } else {
            None
        };
        Self { raw, glob }
    }

    /// Check whether a normalized path matches this pattern.
    ///
    /// The caller is expected to pass a path already run through
    /// [`normalize`]; [`crate::is_path_in_scope`] does this.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        // Tier 1: exact match.
        if self.raw == path {
            return true;
        }
        // Tier 2: directory prefix, anything nested under it at any depth.
        if self.raw.ends_with('/') && path.starts_with(&self.raw) {
            return true;
        }
        // Tier 3: glob.
        self.glob.as_ref().is_some_and(|re| re.is_match(path))
    }

    /// The normalized pattern string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl std::fmt::Display for ScopePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Normalize path separators to forward slashes.
///
/// Backslash and forward slash are equivalent in both patterns and paths.
#[must_use]
pub fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

/// Translate a glob pattern into an anchored regex expression.
///
/// `**` matches any sequence including separators, `*` any sequence except a
/// separator, `?` exactly one non-separator character. All other characters
/// with regex meaning are escaped. The expression is anchored to the whole
/// path, never a substring.
fn glob_to_regex(pattern: &str) -> String {
    let mut expr = String::new();
    expr.push('^');
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => {
                if chars.peek() == Some(&'*') {
                    chars.next();
                    expr.push_str(".*");
                } else {
                    expr.push_str("[^/]*");
                }
            },
            '?' => expr.push_str("[^/]"),
            '.' | '+' | '(' | ')' | '[' | ']' | '{' | '}' | '^' | '$' | '|' | '\\' => {
                expr.push('\\');
                expr.push(c);
            },
            _ => expr.push(c),
        }
    }
    expr.push('$');
    expr
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
