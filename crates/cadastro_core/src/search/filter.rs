//! First-name substring filter.
//!
//! # Responsibility
//! - Select the records whose first name contains the search text.
//! - Tag each match with its store position for row-level actions.
//!
//! # Invariants
//! - Matching is case-insensitive and on the first name only.
//! - Empty search text matches every record, in store order.
//! - Recomputed from the full sequence on every call; no incremental index.

use crate::model::user::UserRecord;

/// One visible row: a record plus its position in the unfiltered sequence.
///
/// The position is what `update`/`remove` expect, so row controls keep
/// targeting the intended record while a search is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameMatch<'a> {
    pub position: usize,
    pub record: &'a UserRecord,
}

/// Filters records by case-insensitive first-name substring.
pub fn filter_by_first_name<'a>(records: &'a [UserRecord], search: &str) -> Vec<NameMatch<'a>> {
    let needle = search.to_lowercase();
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.first_name.to_lowercase().contains(&needle))
        .map(|(position, record)| NameMatch { position, record })
        .collect()
}
