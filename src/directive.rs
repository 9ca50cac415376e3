//! Client-directive normalization.
//!
//! Removes every standalone `'use client';` statement found near the top of
//! a body. The rewriter re-emits at most one, right below the header.

use regex::Regex;
use std::sync::LazyLock;

/// Number of leading body lines searched for directives.
pub const DIRECTIVE_WINDOW: usize = 12;

static RE_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*(?:'use client'|"use client");?\s*$"#).unwrap());

/// True if `line` is exactly a client directive statement.
pub fn is_directive(line: &str) -> bool {
    RE_DIRECTIVE.is_match(line)
}

/// Result of [`normalize`].
#[derive(Debug, PartialEq, Eq)]
pub struct Normalized {
    pub body: String,
    /// True if the header should carry the client tag and the directive be emitted
    pub client_needed: bool,
}

/// Strip directive lines from the first [`DIRECTIVE_WINDOW`] lines of `body`.
///
/// Leading blank lines are dropped and, like removed directives, do not
/// count toward the window. The window therefore covers the same lines
/// whether or not the body was normalized before.
pub fn normalize(body: &str, wants_client: bool) -> Normalized {
    let mut found = false;
    let mut counted = 0;
    let mut out = String::with_capacity(body.len());

    for line in body.split_inclusive('\n') {
        if counted < DIRECTIVE_WINDOW && is_directive(line) {
            found = true;
            continue;
        }
        if counted == 0 && line.trim().is_empty() {
            continue;
        }
        counted += 1;
        out.push_str(line);
    }

    Normalized {
        body: out,
        client_needed: wants_client || found,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_directive_forms() {
        assert!(is_directive("'use client';"));
        assert!(is_directive("  \"use client\"  \n"));
        assert!(is_directive("'use client'"));
        assert!(!is_directive("'use client\";"));
        assert!(!is_directive("'use server';"));
        assert!(!is_directive("const x = 'use client';"));
    }

    #[test]
    fn removes_duplicates_in_window() {
        let body = "\n'use client';\n\nimport a from 'a';\n\"use client\";\nrun();\n";
        let n = normalize(body, false);
        assert_eq!(n.body, "import a from 'a';\nrun();\n");
        assert!(n.client_needed);
    }

    #[test]
    fn ignores_directives_past_window() {
        let mut body = String::new();
        for i in 0..DIRECTIVE_WINDOW {
            body.push_str(&format!("l{i}\n"));
        }
        body.push_str("'use client';\n");
        let n = normalize(&body, false);
        assert_eq!(n.body, body);
        assert!(!n.client_needed);
    }

    #[test]
    fn leading_blank_lines_do_not_use_up_the_window() {
        let body = format!("{}x();\n'use client';\n", "\n".repeat(11));
        let n = normalize(&body, false);
        assert_eq!(n.body, "x();\n");
        assert!(n.client_needed);
    }

    #[test]
    fn removed_directives_do_not_use_up_the_window() {
        let mut body = String::from("'use client';\n'use client';\n'use client';\n");
        for i in 0..DIRECTIVE_WINDOW - 1 {
            body.push_str(&format!("l{i}\n"));
        }
        body.push_str("'use client';\nlast\n");
        let n = normalize(&body, false);
        assert!(!n.body.contains("use client"), "{}", n.body);
    }

    #[test]
    fn normalized_body_is_a_fixed_point() {
        let body = "\n\n'use client';\n\nimport a;\n\n'use client';\nrun();\n";
        let once = normalize(body, false);
        let again = normalize(&format!("\n'use client';\n\n{}", once.body), false);
        assert_eq!(again.body, once.body);
        assert!(again.client_needed);
    }

    #[test]
    fn blank_lines_inside_the_body_are_kept() {
        let n = normalize("a();\n\n\nb();\n", false);
        assert_eq!(n.body, "a();\n\n\nb();\n");
    }

    #[test]
    fn header_request_alone_is_enough() {
        let n = normalize("code();\n", true);
        assert_eq!(n.body, "code();\n");
        assert!(n.client_needed);
    }

    #[test]
    fn last_line_without_newline() {
        let n = normalize("'use client'", false);
        assert_eq!(n.body, "");
        assert!(n.client_needed);
    }
}
