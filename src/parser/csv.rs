//! CSV file parser

use std::borrow::Cow;

use crate::error::Result;
use crate::model::{CellValue, Table};

use super::{columns_from_headers, Parser};

/// Parser for CSV files
pub struct CsvParser;

impl Parser for CsvParser {
    fn parse(&self, bytes: &[u8]) -> Result<Table> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers = csv_reader.headers()?.clone();
        let columns = columns_from_headers(headers.iter());
        let mut table = Table::new(columns);

        for result in csv_reader.records() {
            let record = result?;
            let cells: Vec<CellValue> = record.iter().map(parse_cell_value).collect();
            table.add_row(cells);
        }

        table.infer_column_types();
        Ok(table)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        ext == "csv"
    }
}

/// Parse a string value into a CellValue with type inference
fn parse_cell_value(s: &str) -> CellValue {
    let trimmed = s.trim();

    // Check for empty/null
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") || trimmed == "NA" {
        return CellValue::Null;
    }

    // Try parsing as boolean
    if trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("yes") {
        return CellValue::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") || trimmed.eq_ignore_ascii_case("no") {
        return CellValue::Bool(false);
    }

    // Try parsing as integer
    if let Ok(i) = trimmed.parse::<i64>() {
        return CellValue::Int(i);
    }

    // Try parsing as float
    if let Ok(f) = trimmed.parse::<f64>() {
        return CellValue::Float(f);
    }

    // Try parsing as date
    if let Ok(date) = chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return CellValue::Date(date);
    }

    // Try parsing as datetime (ISO 8601)
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return CellValue::DateTime(dt);
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return CellValue::DateTime(dt);
    }

    // Default to string
    CellValue::String(Cow::Owned(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellType;

    #[test]
    fn test_parse_cell_value() {
        assert_eq!(parse_cell_value(""), CellValue::Null);
        assert_eq!(parse_cell_value("null"), CellValue::Null);
        assert_eq!(parse_cell_value("NA"), CellValue::Null);
        assert_eq!(parse_cell_value("true"), CellValue::Bool(true));
        assert_eq!(parse_cell_value("false"), CellValue::Bool(false));
        assert_eq!(parse_cell_value("42"), CellValue::Int(42));
        assert_eq!(parse_cell_value("3.14"), CellValue::Float(3.14));
        assert_eq!(
            parse_cell_value("hello"),
            CellValue::String(Cow::Owned("hello".to_string()))
        );
        assert_eq!(
            parse_cell_value("2024-01-15"),
            CellValue::Date(chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );
    }

    #[test]
    fn test_parse_basic_csv() {
        let table = CsvParser.parse(b"name,age\nalice,30\nbob,25\n").unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.columns[0].name, "name");
        assert_eq!(table.column("age").unwrap().inferred_type, CellType::Int);
        assert_eq!(table.rows[0][1], CellValue::Int(30));
    }

    #[test]
    fn test_short_rows_padded_with_null() {
        let table = CsvParser.parse(b"a,b,c\n1,2\n").unwrap();
        assert_eq!(table.rows[0].len(), 3);
        assert_eq!(table.rows[0][2], CellValue::Null);
    }

    #[test]
    fn test_missing_cells_infer_around_null() {
        let table = CsvParser.parse(b"a,b\n1,\n2,5\n").unwrap();
        assert_eq!(table.rows[0][1], CellValue::Null);
        assert_eq!(table.column("b").unwrap().inferred_type, CellType::Int);
    }

    #[test]
    fn test_mixed_column_inferred_mixed() {
        let table = CsvParser.parse(b"a\n1\nhello\n").unwrap();
        assert_eq!(table.columns[0].inferred_type, CellType::Mixed);
    }
}
