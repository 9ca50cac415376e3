//! Locating documentation blocks in file content.
//!
//! Two entry points:
//!
//! - [`strip_header_region`] removes the stacked `/** ... */` blocks that sit
//!   at the very top of a file.
//! - [`locate_secondary`] looks a little further down the remaining body for
//!   one more block, e.g. a header that ended up below `'use client';`.
//!
//! Both close a block at its first `*/`.

use crate::model::RawHeaderBlock;
use regex::Regex;
use std::sync::LazyLock;

/// A block anchored at the start of the content, whitespace allowed before it.
static RE_LEADING_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A\s*/\*\*.*?\*/").unwrap());

/// Any block, non-greedy.
static RE_BLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*\*.*?\*/").unwrap());

/// Tags that only appear in file headers, never in function docs.
static RE_HEADER_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:/\*\*)?[ \t]*\*?[ \t]*@(?:file|author|license|created|updated)\b")
        .unwrap()
});

/// Result of [`strip_header_region`].
#[derive(Debug, PartialEq, Eq)]
pub struct Stripped<'a> {
    /// Removed blocks, joined by newlines. Empty when nothing was removed.
    pub region: String,
    pub body: &'a str,
}

/// Remove every consecutive documentation block at the start of `content`.
pub fn strip_header_region(content: &str) -> Stripped<'_> {
    let mut blocks: Vec<&str> = Vec::new();
    let mut rest = content;

    while let Some(m) = RE_LEADING_BLOCK.find(rest) {
        blocks.push(m.as_str().trim_start());
        rest = &rest[m.end()..];
    }

    if blocks.is_empty() {
        return Stripped {
            region: String::new(),
            body: content,
        };
    }

    Stripped {
        region: blocks.join("\n"),
        body: rest,
    }
}

/// Split a header region (or any text) into its documentation blocks.
pub fn blocks(text: &str) -> Vec<&str> {
    RE_BLOCK.find_iter(text).map(|m| m.as_str()).collect()
}

/// Outcome of [`locate_secondary`].
#[derive(Debug, PartialEq, Eq)]
pub enum Secondary {
    None,
    Found(RawHeaderBlock),
    /// The first candidate contains a nested `/**` and cannot be trusted.
    Malformed(RawHeaderBlock),
}

/// Find the first documentation block within the first `scan_lines` lines of
/// `body`.
///
/// The window is a prefix of `body`, so the returned span indexes `body`
/// directly. A block that opens inside the window but closes after it is
/// not matched. With `strict`, blocks carrying no header tag are skipped
/// before anything else is checked.
pub fn locate_secondary(body: &str, scan_lines: usize, strict: bool) -> Secondary {
    let window = &body[..window_end(body, scan_lines)];

    for m in RE_BLOCK.find_iter(window) {
        let block = RawHeaderBlock {
            text: m.as_str().to_string(),
            span: m.range(),
        };
        if strict && !RE_HEADER_TAG.is_match(m.as_str()) {
            continue;
        }
        if m.as_str()[3..].contains("/**") {
            return Secondary::Malformed(block);
        }
        return Secondary::Found(block);
    }

    Secondary::None
}

/// Byte offset just past the `lines`-th line, newline excluded.
fn window_end(body: &str, lines: usize) -> usize {
    if lines == 0 {
        return 0;
    }
    body.match_indices('\n')
        .nth(lines - 1)
        .map(|(i, _)| i)
        .unwrap_or(body.len())
}
