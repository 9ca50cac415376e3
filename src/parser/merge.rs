//! Combine two header records into one.
//!
//! The primary record wins wherever it has a value; the secondary only
//! fills gaps. Authors are unioned.

use crate::model::HeaderRecord;

/// Merge `secondary` into `primary`, producing a new record.
pub fn merge(primary: &HeaderRecord, secondary: &HeaderRecord) -> HeaderRecord {
    let mut merged = HeaderRecord {
        authors: Vec::with_capacity(primary.authors.len() + secondary.authors.len()),
        license: first_present(&primary.license, &secondary.license),
        created: first_present(&primary.created, &secondary.created),
        description: if primary.description.is_empty() {
            secondary.description.clone()
        } else {
            primary.description.clone()
        },
        has_client_directive: primary.has_client_directive || secondary.has_client_directive,
    };

    for author in primary.authors.iter().chain(&secondary.authors) {
        merged.push_author(author);
    }

    merged
}

fn first_present(primary: &Option<String>, secondary: &Option<String>) -> Option<String> {
    match primary {
        Some(v) if !v.is_empty() => Some(v.clone()),
        _ => secondary.clone(),
    }
}
