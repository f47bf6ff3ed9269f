//! CSV serializer

use crate::error::{Result, SweepError};
use crate::model::Table;

use super::Writer;

/// Serializes a table as comma-delimited text with a header row.
/// Null cells become empty fields.
pub struct CsvWriter;

impl Writer for CsvWriter {
    fn write(&self, table: &Table) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());

        writer.write_record(table.columns.iter().map(|c| c.name.as_str()))?;
        for row in &table.rows {
            writer.write_record(row.iter().map(|cell| cell.display().into_owned()))?;
        }

        writer
            .into_inner()
            .map_err(|e| SweepError::Conversion(e.to_string()))
    }
}
