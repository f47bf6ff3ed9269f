//! Mean-fill of missing numeric cells

use crate::model::{CellValue, Table};

/// For every column whose inferred type is numeric, replace each null
/// cell with the arithmetic mean of the column's non-missing values.
/// A numeric column with no non-missing values is left fully missing.
/// Non-numeric columns are never touched. Returns the number of cells
/// filled.
pub fn fill_missing_numeric(table: &mut Table) -> usize {
    let numeric_indices: Vec<usize> = table
        .columns
        .iter()
        .filter(|c| c.inferred_type.is_numeric())
        .map(|c| c.index)
        .collect();

    let mut filled = 0;
    for col_idx in numeric_indices {
        let mut sum = 0.0;
        let mut count = 0usize;
        for row in &table.rows {
            if let Some(v) = row[col_idx].as_f64() {
                sum += v;
                count += 1;
            }
        }

        // Mean of zero values is undefined; leave the column missing
        if count == 0 {
            continue;
        }

        let mean = sum / count as f64;
        for row in &mut table.rows {
            if row[col_idx].is_null() {
                row[col_idx] = CellValue::Float(mean);
                filled += 1;
            }
        }
    }

    if filled > 0 {
        // Filling an Int column with a Float mean widens its type
        table.infer_column_types();
    }
    filled
}
