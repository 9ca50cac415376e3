//! Canonical header rendering.

use crate::config::RenderSettings;
use crate::model::HeaderRecord;
use std::path::{Component, Path};

/// Render the canonical `/** ... */` block, without a trailing newline.
///
/// `file_id` is the forward-slash path written after `@file`.
pub fn build_header(file_id: &str, info: &HeaderRecord, settings: &RenderSettings) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("/**".to_string());
    lines.push(format!(" * @file {}", file_id));

    if info.authors.is_empty() {
        lines.push(decorate(&settings.default_author));
    } else {
        lines.extend(info.authors.iter().map(|a| decorate(a)));
    }

    lines.push(decorate(info.license.as_deref().unwrap_or(&settings.license)));
    lines.push(" *".to_string());
    lines.push(format!(
        " * @created {}",
        info.created.as_deref().unwrap_or(&settings.today)
    ));
    lines.push(format!(
        " * @updated {}",
        settings.updated.as_deref().unwrap_or(&settings.today)
    ));
    lines.push(" *".to_string());
    lines.push(" * @description".to_string());

    if !info.description.is_empty() {
        lines.extend(info.description.split('\n').map(decorate));
    }

    if info.has_client_directive {
        lines.push(decorate(&settings.client_tag));
    }

    lines.push(" */".to_string());
    lines.join("\n")
}

/// Prefix one body line with ` * `; empty lines become ` *`.
fn decorate(line: &str) -> String {
    format!(" * {}", line).trim_end().to_string()
}

/// `path` relative to `base` with `/` separators.
///
/// Falls back to `root`, then to the path as given, when `path` is not
/// below `base`.
pub fn file_id(path: &Path, base: &Path, root: &Path) -> String {
    let rel = path
        .strip_prefix(base)
        .or_else(|_| path.strip_prefix(root))
        .unwrap_or(path);

    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            Component::ParentDir => Some("..".into()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
