//! Per-file pipeline and batch driver.
//!
//! strip → parse → directive normalization → secondary merge (repeated) →
//! render → reassemble → compare → persist.

use crate::config::{RenderSettings, ScanOptions, Settings};
use crate::directive;
use crate::discover;
use crate::format::PostProcessor;
use crate::model::FileUnit;
use crate::parser::{self, header, merge, strip};
use crate::render;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Produce the normalized content of one file. Pure apart from logging.
///
/// Secondary headers are searched for in the directive-normalized body,
/// which is the body as it is written back. Each merged block is excised
/// and the body normalized again until no further header block turns up,
/// so the output is already a fixed point.
pub fn rewrite_content(
    content: &str,
    file_id: &str,
    scan: ScanOptions,
    render_settings: &RenderSettings,
) -> String {
    let stripped = strip::strip_header_region(content);
    let mut info = parser::parse_region(&stripped.region);
    let mut normalized = directive::normalize(stripped.body, info.has_client_directive);

    loop {
        let body = &normalized.body;
        match strip::locate_secondary(body, scan.scan_lines, scan.strict_secondary) {
            strip::Secondary::Found(block) => {
                let secondary = header::parse_block(Some(block.text.as_str()));
                info = merge::merge(&info, &secondary);
                let mut rest = String::with_capacity(body.len());
                rest.push_str(&body[..block.span.start]);
                rest.push_str(&body[block.span.end..]);
                let wants_client = normalized.client_needed || info.has_client_directive;
                normalized = directive::normalize(&rest, wants_client);
            }
            strip::Secondary::Malformed(block) => {
                log::warn!(
                    "{}: nested documentation block at byte {}, secondary header left in place",
                    file_id,
                    block.span.start
                );
                break;
            }
            strip::Secondary::None => break,
        }
    }
    info.has_client_directive = normalized.client_needed;

    let mut out = render::build_header(file_id, &info, render_settings);
    out.push('\n');
    if normalized.client_needed {
        out.push_str(&render_settings.directive);
        out.push_str("\n\n");
    }
    out.push_str(&normalized.body);
    out
}

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Unchanged,
    Changed,
    /// Would change, but the run is report-only
    WouldChange,
}

/// Run the pipeline on one file on disk.
pub fn process_file(path: &Path, settings: &Settings) -> Result<Outcome> {
    let original =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let file_id = render::file_id(path, &settings.base, &settings.root);
    let rewritten = rewrite_content(&original, &file_id, settings.scan, &settings.render);
    let unit = FileUnit {
        path: path.to_path_buf(),
        original,
        rewritten,
    };

    if !unit.is_changed() {
        log::debug!("unchanged {}", file_id);
        return Ok(Outcome::Unchanged);
    }
    if settings.dry_run {
        log::info!("would change {}", file_id);
        return Ok(Outcome::WouldChange);
    }

    write_atomic(&unit.path, &unit.rewritten)?;
    log::info!("changed {}", file_id);
    Ok(Outcome::Changed)
}

/// Replace `path` with `content` in one step: temp file, then rename.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let permissions = fs::metadata(path)
        .with_context(|| format!("failed to stat {}", path.display()))?
        .permissions();

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
    tmp.write_all(content.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;
    fs::set_permissions(tmp.path(), permissions)
        .with_context(|| format!("failed to set permissions for {}", path.display()))?;
    tmp.persist(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Counters printed at the end of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub processed: usize,
    pub changed: usize,
    pub failed: usize,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "processed {} files, changed {}", self.processed, self.changed)?;
        if self.failed > 0 {
            write!(f, ", failed {}", self.failed)?;
        }
        Ok(())
    }
}

/// Process every matching file under the root, then run the post-processor.
///
/// A file that fails is logged and counted; the batch keeps going.
pub fn run(settings: &Settings, post: Option<&dyn PostProcessor>) -> Result<Summary> {
    let files = discover::discover_files(settings)?;
    let mut summary = Summary::default();

    for path in &files {
        match process_file(path, settings) {
            Ok(outcome) => {
                summary.processed += 1;
                if outcome != Outcome::Unchanged {
                    summary.changed += 1;
                }
            }
            Err(e) => {
                log::error!("{:#}", e);
                summary.failed += 1;
            }
        }
    }

    if let Some(post) = post {
        if settings.dry_run {
            log::info!("dry run, skipping {}", post.name());
        } else if let Err(e) = post.run(&settings.root) {
            log::warn!("{} failed: {:#}", post.name(), e);
        }
    }

    Ok(summary)
}
