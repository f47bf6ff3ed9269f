//! Duplicate row removal

use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHasher};

use crate::model::{CellValue, Table};

/// Remove rows that are exact duplicates of an earlier row, comparing
/// every column value (null equals null). The first occurrence of each
/// row is kept, in original order. Returns the number of rows removed.
pub fn remove_duplicates(table: &mut Table) -> usize {
    let before = table.rows.len();

    // Hash buckets hold indices into `kept`; a hash hit is verified by
    // full equality so a collision cannot merge distinct rows.
    let mut buckets: FxHashMap<u64, Vec<usize>> = FxHashMap::default();
    let mut kept: Vec<Vec<CellValue>> = Vec::with_capacity(before);

    for row in table.rows.drain(..) {
        let hash = hash_row(&row);
        let bucket = buckets.entry(hash).or_default();
        if bucket.iter().any(|&idx| kept[idx] == row) {
            continue;
        }
        bucket.push(kept.len());
        kept.push(row);
    }

    table.rows = kept;
    before - table.rows.len()
}

fn hash_row(cells: &[CellValue]) -> u64 {
    let mut hasher = FxHasher::default();
    cells.hash(&mut hasher);
    hasher.finish()
}
