//! Parser module — locate, parse and merge documentation headers.

pub mod header;
pub mod merge;
pub mod strip;

use crate::model::HeaderRecord;

/// Parse a header region made of one or more stacked blocks.
///
/// Blocks are merged in order, so the first one is primary and later
/// ones only fill gaps.
pub fn parse_region(region: &str) -> HeaderRecord {
    let blocks = strip::blocks(region);
    let Some((first, rest)) = blocks.split_first() else {
        return header::parse_block(None);
    };

    rest.iter().fold(header::parse_block(Some(*first)), |acc, block| {
        merge::merge(&acc, &header::parse_block(Some(*block)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_region_is_empty_record() {
        assert_eq!(parse_region(""), HeaderRecord::default());
    }

    #[test]
    fn stacked_blocks_merge_in_order() {
        let region = "/**\n * @author A\n * @description\n * first\n */\n/**\n * @author B\n * @license ISC\n * @description\n * second\n * @client\n */";
        let rec = parse_region(region);
        assert_eq!(rec.authors, vec!["@author A", "@author B"]);
        assert_eq!(rec.license.as_deref(), Some("@license ISC"));
        assert_eq!(rec.description, "first");
        assert!(rec.has_client_directive);
    }
}
