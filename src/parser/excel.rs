//! Excel (xlsx) file parser

use std::borrow::Cow;
use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx};

use crate::error::{Result, SweepError};
use crate::model::{CellValue, Table};

use super::{columns_from_headers, Parser};

/// Parser for xlsx workbooks; reads the first sheet, header-first
pub struct ExcelParser;

impl Parser for ExcelParser {
    fn parse(&self, bytes: &[u8]) -> Result<Table> {
        let mut workbook = Xlsx::new(Cursor::new(bytes))
            .map_err(|e| SweepError::Parse(format!("Failed to open workbook: {}", e)))?;

        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .ok_or_else(|| SweepError::Parse("No sheets found in workbook".to_string()))?
            .clone();

        let range: Range<Data> = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| SweepError::Parse(format!("Failed to read sheet {}: {}", sheet_name, e)))?;

        parse_range(range)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        ext == "xlsx"
    }
}

fn parse_range(range: Range<Data>) -> Result<Table> {
    let mut rows = range.rows();

    let header_row = rows
        .next()
        .ok_or_else(|| SweepError::Parse("Empty sheet".to_string()))?;
    let columns = columns_from_headers(header_row.iter().map(cell_to_string));
    let mut table = Table::new(columns);

    for row in rows {
        let cells: Vec<CellValue> = row.iter().map(convert_cell).collect();
        table.add_row(cells);
    }

    table.infer_column_types();
    Ok(table)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => format!("{}", dt),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#{:?}", e),
    }
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) => {
            if s.trim().is_empty() {
                CellValue::Null
            } else {
                CellValue::String(Cow::Owned(s.clone()))
            }
        }
        Data::Float(f) => {
            // Excel stores every number as a float; narrow whole values
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                CellValue::Int(*f as i64)
            } else {
                CellValue::Float(*f)
            }
        }
        Data::Int(i) => CellValue::Int(*i),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => {
            let s = format!("{}", dt);
            if let Ok(datetime) = chrono::NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S%.f")
            {
                CellValue::DateTime(datetime)
            } else if let Ok(datetime) =
                chrono::NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f")
            {
                CellValue::DateTime(datetime)
            } else if let Ok(date) = chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
                CellValue::Date(date)
            } else {
                CellValue::String(Cow::Owned(s))
            }
        }
        Data::DateTimeIso(s) => {
            if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
                CellValue::DateTime(dt)
            } else if let Ok(d) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                CellValue::Date(d)
            } else {
                CellValue::String(Cow::Owned(s.clone()))
            }
        }
        Data::DurationIso(s) => CellValue::String(Cow::Owned(s.clone())),
        Data::Error(e) => CellValue::String(Cow::Owned(format!("#{:?}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_cell_narrows_whole_floats() {
        assert_eq!(convert_cell(&Data::Float(3.0)), CellValue::Int(3));
        assert_eq!(convert_cell(&Data::Float(3.5)), CellValue::Float(3.5));
    }

    #[test]
    fn test_convert_cell_blank_string_is_null() {
        assert_eq!(convert_cell(&Data::String("  ".to_string())), CellValue::Null);
        assert_eq!(convert_cell(&Data::Empty), CellValue::Null);
    }

    #[test]
    fn test_garbage_bytes_fail_with_parse_error() {
        let err = ExcelParser.parse(b"not a zip archive").unwrap_err();
        assert!(matches!(err, SweepError::Parse(_)));
    }
}
