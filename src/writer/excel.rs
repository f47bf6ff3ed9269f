//! Excel (xlsx) serializer, compiled in behind the `xlsx` feature

use rust_xlsxwriter::Workbook;

use crate::error::{Result, SweepError};
use crate::model::{CellValue, Table};

use super::Writer;

/// Serializes a table as a single-sheet workbook with a header row
pub struct ExcelWriter;

impl Writer for ExcelWriter {
    fn write(&self, table: &Table) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (col_idx, column) in table.columns.iter().enumerate() {
            let col = col_num(col_idx)?;
            worksheet
                .write_string(0, col, &column.name)
                .map_err(|e| SweepError::Conversion(e.to_string()))?;
        }

        for (row_idx, row) in table.rows.iter().enumerate() {
            let row_num = u32::try_from(row_idx + 1)
                .map_err(|_| SweepError::Conversion("Row index overflow".to_string()))?;
            for (col_idx, cell) in row.iter().enumerate() {
                let col = col_num(col_idx)?;
                match cell {
                    // Missing cells stay empty
                    CellValue::Null => {}
                    CellValue::Bool(b) => {
                        worksheet
                            .write_boolean(row_num, col, *b)
                            .map_err(|e| SweepError::Conversion(e.to_string()))?;
                    }
                    // Excel stores all numbers as f64; integers beyond
                    // 2^53 may lose precision
                    CellValue::Int(i) => {
                        worksheet
                            .write_number(row_num, col, *i as f64)
                            .map_err(|e| SweepError::Conversion(e.to_string()))?;
                    }
                    CellValue::Float(f) => {
                        worksheet
                            .write_number(row_num, col, *f)
                            .map_err(|e| SweepError::Conversion(e.to_string()))?;
                    }
                    CellValue::String(s) => {
                        worksheet
                            .write_string(row_num, col, s.as_ref())
                            .map_err(|e| SweepError::Conversion(e.to_string()))?;
                    }
                    CellValue::Date(d) => {
                        worksheet
                            .write_string(row_num, col, d.to_string())
                            .map_err(|e| SweepError::Conversion(e.to_string()))?;
                    }
                    CellValue::DateTime(dt) => {
                        worksheet
                            .write_string(row_num, col, dt.to_string())
                            .map_err(|e| SweepError::Conversion(e.to_string()))?;
                    }
                }
            }
        }

        workbook
            .save_to_buffer()
            .map_err(|e| SweepError::Conversion(e.to_string()))
    }
}

fn col_num(col_idx: usize) -> Result<u16> {
    u16::try_from(col_idx).map_err(|_| SweepError::Conversion("Column index overflow".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{CsvParser, ExcelParser, Parser};

    #[test]
    fn test_xlsx_output_is_a_zip_archive() {
        let table = CsvParser.parse(b"a,b\n1,x\n").unwrap();
        let bytes = ExcelWriter.write(&table).unwrap();
        assert_eq!(&bytes[0..4], b"PK\x03\x04");
    }

    #[test]
    fn test_xlsx_round_trip() {
        let original = CsvParser.parse(b"id,name\n1,alice\n2,bob\n").unwrap();
        let bytes = ExcelWriter.write(&original).unwrap();
        let reparsed = ExcelParser.parse(&bytes).unwrap();
        assert_eq!(reparsed.rows, original.rows);
        assert_eq!(reparsed.columns[0].name, "id");
        assert_eq!(reparsed.columns[1].name, "name");
    }
}
