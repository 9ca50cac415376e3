//! Run settings — built once from the command line, read-only afterwards.

use crate::directive::is_directive;
use crate::parser::header::is_client_tag;
use anyhow::{bail, Context, Result};
use glob::Pattern;
use std::path::{Path, PathBuf};

/// Extensions processed when none are given.
pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx"];

/// Directories skipped during discovery when no `--exclude` is given.
pub const DEFAULT_EXCLUDES: &[&str] = &["**/node_modules", "**/.git"];

/// Format of `@created` / `@updated` dates, e.g. `Fri Sep 12 2025`.
pub const DATE_FORMAT: &str = "%a %b %d %Y";

/// Values the header builder needs. Pure data, no clock access.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub today: String,
    /// Fixed `@updated` value; `None` refreshes to `today`
    pub updated: Option<String>,
    pub default_author: String,
    pub license: String,
    pub client_tag: String,
    pub directive: String,
}

impl RenderSettings {
    /// Stock lines for everything but the date.
    pub fn new(today: impl Into<String>) -> Self {
        Self {
            today: today.into(),
            updated: None,
            default_author: "@author Unknown".to_string(),
            license: "@license MIT".to_string(),
            client_tag: "@client".to_string(),
            directive: "'use client';".to_string(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !is_client_tag(&self.client_tag) {
            bail!(
                "client tag {:?} would not be recognized when the header is read back",
                self.client_tag
            );
        }
        if !is_directive(&self.directive) {
            bail!(
                "directive {:?} would not be recognized when the file is read back",
                self.directive
            );
        }
        Ok(())
    }
}

/// How far and how strictly to look for a stray second header.
///
/// Strict by default: only blocks carrying header tags are merged, so
/// ordinary JSDoc near the top of a file is left alone.
#[derive(Debug, Clone, Copy)]
pub struct ScanOptions {
    pub scan_lines: usize,
    pub strict_secondary: bool,
}

impl ScanOptions {
    pub fn validate(&self) -> Result<()> {
        if self.scan_lines == 0 {
            bail!("--scan-lines must be greater than zero");
        }
        Ok(())
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            scan_lines: 60,
            strict_secondary: true,
        }
    }
}

/// Everything one run needs.
#[derive(Debug, Clone)]
pub struct Settings {
    pub root: PathBuf,
    /// Base directory for `@file` paths
    pub base: PathBuf,
    pub extensions: Vec<String>,
    pub excludes: Vec<Pattern>,
    pub scan: ScanOptions,
    pub dry_run: bool,
    pub render: RenderSettings,
}

impl Settings {
    /// Check everything that must hold before any file is touched.
    pub fn validate(&self) -> Result<()> {
        if !self.root.is_dir() {
            bail!("root directory not found: {}", self.root.display());
        }
        if self.extensions.is_empty() {
            bail!("at least one extension is required");
        }
        self.scan.validate()?;
        self.render.validate()
    }

    pub fn allows_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }
}

/// Compile exclude globs.
pub fn compile_excludes(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| Pattern::new(p).with_context(|| format!("invalid exclude pattern: {}", p)))
        .collect()
}

/// Normalize `--ext` values: `.tsx` and `tsx` are the same.
pub fn normalize_extensions(exts: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for ext in exts {
        let ext = ext.trim().trim_start_matches('.');
        if !ext.is_empty() && !out.iter().any(|e| e == ext) {
            out.push(ext.to_string());
        }
    }
    out
}

/// Local date in [`DATE_FORMAT`].
pub fn today() -> String {
    chrono::Local::now().format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn settings(root: &Path) -> Settings {
        Settings {
            root: root.to_path_buf(),
            base: root.to_path_buf(),
            extensions: normalize_extensions(&["ts".to_string()]),
            excludes: Vec::new(),
            scan: ScanOptions::default(),
            dry_run: false,
            render: RenderSettings::new("Sat Oct 18 2025"),
        }
    }

    #[test]
    fn missing_root_is_rejected() {
        let s = settings(Path::new("/nonexistent/fix-headers/root"));
        let err = s.validate().unwrap_err();
        assert!(err.to_string().contains("root directory not found"));
    }

    #[test]
    fn valid_settings_pass() {
        let dir = TempDir::new().unwrap();
        assert!(settings(dir.path()).validate().is_ok());
    }

    #[test]
    fn unrecognized_client_tag_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut s = settings(dir.path());
        s.render.client_tag = "@browser".to_string();
        assert!(s.validate().is_err());
        s.render.client_tag = "@client Requires a browser".to_string();
        assert!(s.validate().is_ok());
    }

    #[test]
    fn unrecognized_directive_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut s = settings(dir.path());
        s.render.directive = "'use strict';".to_string();
        assert!(s.validate().is_err());
        s.render.directive = "\"use client\"".to_string();
        assert!(s.validate().is_ok());
    }

    #[test]
    fn render_settings_take_today_as_given() {
        let r = RenderSettings::new("Mon Jan 01 2024");
        assert_eq!(r.today, "Mon Jan 01 2024");
        assert_eq!(r.updated, None);
        assert_eq!(r.default_author, "@author Unknown");
    }

    #[test]
    fn secondary_scan_is_strict_by_default() {
        let scan = ScanOptions::default();
        assert!(scan.strict_secondary);
        assert_eq!(scan.scan_lines, 60);
    }

    #[test]
    fn zero_scan_lines_rejected() {
        let dir = TempDir::new().unwrap();
        let mut s = settings(dir.path());
        s.scan.scan_lines = 0;
        assert!(s.validate().is_err());
    }

    #[test]
    fn extension_filter() {
        let s = settings(Path::new("."));
        assert!(s.allows_extension(Path::new("a/b.ts")));
        assert!(!s.allows_extension(Path::new("a/b.css")));
        assert!(!s.allows_extension(Path::new("Makefile")));
    }

    #[test]
    fn extensions_drop_leading_dot() {
        let exts = normalize_extensions(&[".tsx".into(), "js".into(), "".into()]);
        assert_eq!(exts, vec!["tsx", "js"]);
    }

    #[test]
    fn bad_glob_is_an_error() {
        assert!(compile_excludes(&["[".to_string()]).is_err());
        assert_eq!(compile_excludes(&["**/dist".to_string()]).unwrap().len(), 1);
    }

    #[test]
    fn today_has_expected_shape() {
        let t = today();
        assert_eq!(t.split(' ').count(), 4, "{t}");
    }
}
