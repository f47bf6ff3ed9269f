//! Parser layer for reading uploaded tabular files

mod csv;
mod excel;

use indexmap::IndexMap;

use crate::error::{Result, SweepError};
use crate::model::{Column, Table};

pub use self::csv::CsvParser;
pub use self::excel::ExcelParser;

/// Trait for parsing raw file bytes into a Table
pub trait Parser: Send + Sync {
    /// Parse file contents and return a Table
    fn parse(&self, bytes: &[u8]) -> Result<Table>;

    /// Check if this parser can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool;
}

/// Factory for creating parsers based on file extension
pub struct ParserFactory {
    parsers: Vec<Box<dyn Parser>>,
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserFactory {
    /// Create a new parser factory with all supported parsers
    pub fn new() -> Self {
        Self {
            parsers: vec![Box::new(CsvParser), Box::new(ExcelParser)],
        }
    }

    /// Get a parser for the given file extension.
    /// Routing is extension-driven only; content is never sniffed.
    pub fn parser_for(&self, extension: &str) -> Result<&dyn Parser> {
        let ext = extension.to_lowercase();
        self.parsers
            .iter()
            .map(|p| p.as_ref())
            .find(|p| p.supports_extension(&ext))
            .ok_or_else(|| SweepError::UnsupportedFormat(extension.to_string()))
    }

    /// Parse file bytes using the parser for the extension
    pub fn parse(&self, bytes: &[u8], extension: &str) -> Result<Table> {
        self.parser_for(extension)?.parse(bytes)
    }
}

/// Build columns from a header row, making names unique: blank headers
/// become `Column{i+1}` and repeated names get a `_{n}` suffix. The
/// suffix keeps incrementing while the candidate matches a name already
/// taken, so a literal `a_1` header can never be shadowed by a renamed
/// duplicate.
pub(crate) fn columns_from_headers<I, S>(headers: I) -> Vec<Column>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    // name -> next suffix to try for a duplicate of that name
    let mut used: IndexMap<String, usize> = IndexMap::new();
    headers
        .into_iter()
        .enumerate()
        .map(|(i, raw)| {
            let base = raw.as_ref().trim();
            let base = if base.is_empty() {
                format!("Column{}", i + 1)
            } else {
                base.to_string()
            };
            let name = match used.get(&base).copied() {
                None => base,
                Some(next) => {
                    let mut n = next;
                    let mut candidate = format!("{}_{}", base, n);
                    while used.contains_key(&candidate) {
                        n += 1;
                        candidate = format!("{}_{}", base, n);
                    }
                    used.insert(base, n + 1);
                    candidate
                }
            };
            used.insert(name.clone(), 1);
            Column::new(name, i)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_for_routes_by_extension() {
        let factory = ParserFactory::new();
        assert!(factory.parser_for("csv").is_ok());
        assert!(factory.parser_for("CSV").is_ok());
        assert!(factory.parser_for("xlsx").is_ok());
    }

    #[test]
    fn test_unsupported_extension() {
        let factory = ParserFactory::new();
        let err = factory.parser_for("txt").err().unwrap();
        assert!(matches!(err, SweepError::UnsupportedFormat(ref ext) if ext == "txt"));
    }

    #[test]
    fn test_txt_rejected_even_when_bytes_are_csv() {
        let factory = ParserFactory::new();
        let err = factory.parse(b"a,b\n1,2\n", "txt").unwrap_err();
        assert!(matches!(err, SweepError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_header_uniquification() {
        let cols = columns_from_headers(["a", "", "a", "b", "a"]);
        let names: Vec<&str> = cols.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "Column2", "a_1", "b", "a_2"]);
    }

    #[test]
    fn test_uniquification_skips_taken_suffix_names() {
        // A renamed duplicate must not shadow a literal `a_1` header
        let cols = columns_from_headers(["a", "a", "a_1"]);
        let names: Vec<&str> = cols.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "a_1", "a_1_1"]);

        let cols = columns_from_headers(["a", "a_1", "a", "a"]);
        let names: Vec<&str> = cols.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "a_1", "a_2", "a_3"]);

        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), names.len());
    }
}
