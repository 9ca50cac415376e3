//! Source file discovery.
//!
//! Walks the root recursively, prunes excluded directories and keeps files
//! whose extension is in the allow-list. The result is sorted for
//! deterministic processing order.

use crate::config::Settings;
use anyhow::{Context, Result};
use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// All files under `settings.root` that should be processed.
pub fn discover_files(settings: &Settings) -> Result<Vec<PathBuf>> {
    let root = settings.root.as_path();
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry.path(), root, &settings.excludes));

    for entry in walker {
        let entry =
            entry.with_context(|| format!("failed to walk directory: {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if settings.allows_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

/// True if the path, taken relative to `root`, matches any exclude pattern.
fn is_excluded(path: &Path, root: &Path, excludes: &[Pattern]) -> bool {
    let Ok(rel) = path.strip_prefix(root) else {
        return false;
    };
    if rel.as_os_str().is_empty() {
        return false;
    }
    excludes.iter().any(|p| p.matches_path(rel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{compile_excludes, RenderSettings, ScanOptions, DEFAULT_EXCLUDES};
    use std::fs;
    use tempfile::TempDir;

    fn settings(root: &Path, excludes: &[&str]) -> Settings {
        let excludes: Vec<String> = excludes.iter().map(|s| s.to_string()).collect();
        Settings {
            root: root.to_path_buf(),
            base: root.to_path_buf(),
            extensions: vec!["js".into(), "tsx".into()],
            excludes: compile_excludes(&excludes).unwrap(),
            scan: ScanOptions::default(),
            dry_run: false,
            render: RenderSettings::new("Sat Oct 18 2025"),
        }
    }

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn filters_by_extension_recursively() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.js");
        touch(dir.path(), "ui/deep/B.tsx");
        touch(dir.path(), "ui/styles.css");
        touch(dir.path(), "README");

        let files = discover_files(&settings(dir.path(), &[])).unwrap();
        let rel: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            rel,
            vec![PathBuf::from("a.js"), PathBuf::from("ui/deep/B.tsx")]
        );
    }

    #[test]
    fn default_excludes_prune_vendor_dirs() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "web/node_modules/pkg/index.js");
        touch(dir.path(), "node_modules/top.js");
        touch(dir.path(), "web/app.js");

        let files = discover_files(&settings(dir.path(), DEFAULT_EXCLUDES)).unwrap();
        assert_eq!(files, vec![dir.path().join("web/app.js")]);
    }

    #[test]
    fn custom_exclude_glob() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "gen/api.js");
        touch(dir.path(), "src/app.js");

        let files = discover_files(&settings(dir.path(), &["gen"])).unwrap();
        assert_eq!(files, vec![dir.path().join("src/app.js")]);
    }
}
