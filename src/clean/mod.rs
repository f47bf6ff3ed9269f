//! Cleaning operations: duplicate removal and mean-fill of missing
//! numeric cells

mod dedup;
mod impute;

pub use dedup::remove_duplicates;
pub use impute::fill_missing_numeric;

/// Counts collected while cleaning one table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanSummary {
    /// Duplicate rows dropped
    pub duplicates_removed: usize,
    /// Missing numeric cells replaced with a column mean
    pub cells_filled: usize,
}
