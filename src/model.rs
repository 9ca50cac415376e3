//! Data model for parsed headers — independent of how they are rendered.

use std::ops::Range;
use std::path::PathBuf;

/// Structured content of one documentation header.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HeaderRecord {
    /// Full trimmed `@author` lines, unique by exact text, in first-seen order
    pub authors: Vec<String>,
    /// Full trimmed `@license` line
    pub license: Option<String>,
    /// Value of `@created`
    pub created: Option<String>,
    /// Text under `@description`, may span several lines
    pub description: String,
    pub has_client_directive: bool,
}

impl HeaderRecord {
    /// Append an author line unless the exact text is already present.
    pub fn push_author(&mut self, line: &str) {
        if !self.authors.iter().any(|a| a == line) {
            self.authors.push(line.to_string());
        }
    }
}

/// A `/** ... */` block located inside some content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHeaderBlock {
    pub text: String,
    /// Byte span of `text` within the content it was found in
    pub span: Range<usize>,
}

/// One source file moving through the pipeline.
#[derive(Debug)]
pub struct FileUnit {
    pub path: PathBuf,
    pub original: String,
    pub rewritten: String,
}

impl FileUnit {
    pub fn is_changed(&self) -> bool {
        self.original != self.rewritten
    }
}
