//! File path extraction from unified diff text.

/// Extract the file paths a unified diff touches.
///
/// Scans line by line for two independent header signatures:
///
/// - unified-diff file headers: `+++ b/<path>` and `--- a/<path>`
/// - git-style headers: `diff --git a/<path> b/<path>`
///
/// Paths are deduplicated while preserving first-seen order. Lines matching
/// neither signature are ignored, so malformed input never fails; the
/// function returns whatever it could extract, possibly nothing.
#[must_use]
pub fn extract_files_from_diff(diff: &str) -> Vec<String> {
    let mut files: Vec<String> = Vec::new();

    for line in diff.lines() {
        if let Some(rest) = line.strip_prefix("+++ b/") {
            push_unique(&mut files, rest);
        } else if let Some(rest) = line.strip_prefix("--- a/") {
            push_unique(&mut files, rest);
        } else if let Some(rest) = line.strip_prefix("diff --git a/") {
            // `a/<path> b/<path>`; the two sides differ only on renames.
            if let Some((a_side, b_side)) = rest.split_once(" b/") {
                push_unique(&mut files, a_side);
                push_unique(&mut files, b_side);
            }
        }
    }

    files
}

fn push_unique(files: &mut Vec<String>, path: &str) {
    let path = path.trim_end();
    if path.is_empty() {
        return;
    }
    if !files.iter().any(|f| f == path) {
        files.push(path.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_from_unified_headers() {
        let diff = "\
--- a/src/main.rs
+++ b/src/main.rs
@@ -1,3 +1,4 @@
 fn main() {
+    println!(\"hi\");
 }
";
        assert_eq!(extract_files_from_diff(diff), vec!["src/main.rs"]);
    }

    #[test]
    fn test_extracts_from_git_header() {
        let diff = "diff --git a/src/lib.rs b/src/lib.rs\n";
        assert_eq!(extract_files_from_diff(diff), vec!["src/lib.rs"]);
    }

    #[test]
    fn test_git_header_rename_yields_both_sides() {
        let diff = "diff --git a/old/name.rs b/new/name.rs\n";
        assert_eq!(
            extract_files_from_diff(diff),
            vec!["old/name.rs", "new/name.rs"]
        );
    }

    #[test]
    fn test_same_file_twice_appears_once_first_seen_order() {
        let diff = "\
diff --git a/src/a.rs b/src/a.rs
--- a/src/a.rs
+++ b/src/a.rs
@@ -1 +1 @@
-x
+y
diff --git a/src/b.rs b/src/b.rs
--- a/src/b.rs
+++ b/src/b.rs
";
        assert_eq!(extract_files_from_diff(diff), vec!["src/a.rs", "src/b.rs"]);
    }

    #[test]
    fn test_dev_null_sides_are_ignored() {
        // File creation: the `---` side is /dev/null, which matches neither
        // signature and must not produce a phantom path.
        let diff = "\
diff --git a/src/new.rs b/src/new.rs
--- /dev/null
+++ b/src/new.rs
";
        assert_eq!(extract_files_from_diff(diff), vec!["src/new.rs"]);
    }

    #[test]
    fn test_malformed_input_returns_what_it_can() {
        assert!(extract_files_from_diff("not a diff at all").is_empty());
        assert!(extract_files_from_diff("").is_empty());

        let partial = "+++ b/kept.rs\ngarbage line\n+++ broken header without prefix\n";
        assert_eq!(extract_files_from_diff(partial), vec!["kept.rs"]);
    }

    #[test]
    fn test_addition_lines_are_not_headers() {
        // A content line that merely starts with `+` must be ignored.
        let diff = "+++ b/real.rs\n+let x = \"+++ b/fake.rs\";\n";
        assert_eq!(extract_files_from_diff(diff), vec!["real.rs"]);
    }
}
