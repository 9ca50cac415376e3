//! Tag extraction from a single `/** ... */` block.
//!
//! Every line loses its decoration first (leading whitespace, one `*`, at
//! most one space), then tags are recognized at the start of the line.

use crate::model::HeaderRecord;
use regex::Regex;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

static RE_DECORATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[ \t]*\*? ?").unwrap());

static RE_AUTHOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^@author\b").unwrap());

static RE_LICENSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^@license\b").unwrap());

static RE_CREATED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@created\b(.*)").unwrap());

static RE_DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@description\b(.*)").unwrap());

/// Client-only marker; only the tag name is matched, case-insensitively.
static RE_CLIENT_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^@(?:client(?:-only)?|use-?client)\b").unwrap()
});

/// Any tag at the start of a line ends the description.
static RE_ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^@\w").unwrap());

/// True if `line` (already undecorated) carries the client-only tag.
pub fn is_client_tag(line: &str) -> bool {
    RE_CLIENT_TAG.is_match(line.trim())
}

/// Parse one documentation block. `None` yields the empty record.
pub fn parse_block(block: Option<&str>) -> HeaderRecord {
    let mut record = HeaderRecord::default();
    let Some(block) = block else {
        return record;
    };

    let lines = split_description_tail(undecorated_lines(block));

    for line in &lines {
        let trimmed = line.trim();
        if RE_AUTHOR.is_match(trimmed) {
            record.push_author(trimmed);
        } else if RE_LICENSE.is_match(trimmed) {
            if record.license.is_none() {
                record.license = Some(trimmed.to_string());
            }
        } else if let Some(caps) = RE_CREATED.captures(trimmed) {
            if record.created.is_none() {
                let value = unquote(caps[1].trim());
                if !value.is_empty() {
                    record.created = Some(value.to_string());
                }
            }
        } else if is_client_tag(trimmed) {
            record.has_client_directive = true;
        }
    }

    record.description = description(&lines);
    record
}

/// Strip the delimiters and the per-line decoration.
fn undecorated_lines(block: &str) -> Vec<String> {
    let inner = block.trim();
    let inner = inner.strip_prefix("/**").unwrap_or(inner);
    let inner = inner.strip_suffix("*/").unwrap_or(inner);

    inner
        .lines()
        .map(|line| RE_DECORATION.replace(line, "").into_owned())
        .collect()
}

/// `@description @tag ...` on one line reads as two lines, so the tag is
/// parsed as a tag and not kept as description text.
fn split_description_tail(lines: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        let tail = RE_DESCRIPTION
            .captures(line.trim_start())
            .map(|caps| caps[1].trim().to_string())
            .filter(|rest| RE_ANY_TAG.is_match(rest));
        match tail {
            Some(tag) => {
                out.push("@description".to_string());
                out.push(tag);
            }
            None => out.push(line),
        }
    }
    out
}

/// Text after `@description` up to the next tag or the end of the block.
fn description(lines: &[String]) -> String {
    let Some(start) = lines
        .iter()
        .position(|l| RE_DESCRIPTION.is_match(l.trim_start()))
    else {
        return String::new();
    };

    let mut collected: Vec<&str> = Vec::new();
    if let Some(caps) = RE_DESCRIPTION.captures(lines[start].trim_start()) {
        let first = caps.get(1).map_or("", |m| m.as_str()).trim();
        if !first.is_empty() {
            collected.push(first);
        }
    }

    for line in &lines[start + 1..] {
        if RE_ANY_TAG.is_match(line.trim_start()) {
            break;
        }
        collected.push(line.trim_end());
    }

    while collected.first().is_some_and(|l| l.is_empty()) {
        collected.remove(0);
    }
    while collected.last().is_some_and(|l| l.is_empty()) {
        collected.pop();
    }
    collected.join("\n")
}

/// Drop one pair of matching surrounding quotes.
fn unquote(value: &str) -> &str {
    for q in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(q) && value.ends_with(q) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
