//! Serializers for converted download payloads

mod csv;
#[cfg(feature = "xlsx")]
mod excel;

use std::path::Path;

use serde::Serialize;

use crate::config::TargetFormat;
use crate::error::Result;
use crate::model::Table;

pub use self::csv::CsvWriter;
#[cfg(feature = "xlsx")]
pub use self::excel::ExcelWriter;

/// Trait for serializing a table into download bytes
pub trait Writer: Send + Sync {
    /// Serialize the table, header row first, no index column
    fn write(&self, table: &Table) -> Result<Vec<u8>>;
}

/// Get a writer for the target format, failing when the format's
/// serializer is not compiled into this build.
pub fn writer_for(format: TargetFormat) -> Result<Box<dyn Writer>> {
    match format {
        TargetFormat::Csv => Ok(Box::new(CsvWriter)),
        #[cfg(feature = "xlsx")]
        TargetFormat::Xlsx => Ok(Box::new(ExcelWriter)),
        #[cfg(not(feature = "xlsx"))]
        TargetFormat::Xlsx => Err(crate::error::SweepError::WriterUnavailable(format)),
    }
}

/// A converted file ready to hand to the caller
#[derive(Debug, Clone, Serialize)]
pub struct Download {
    /// Source file name with its extension replaced by the target's
    pub file_name: String,
    /// MIME type for the receiving application
    pub mime_type: String,
    /// Serialized table contents
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl Download {
    /// Build a download from a serialized table, deriving the suggested
    /// file name from the source name
    pub fn new(source_name: &str, format: TargetFormat, bytes: Vec<u8>) -> Self {
        let file_name = Path::new(source_name)
            .with_extension(format.extension())
            .to_string_lossy()
            .into_owned();
        Self {
            file_name,
            mime_type: format.mime_type().to_string(),
            bytes,
        }
    }
}

/// Serialize a table to the target format
pub fn convert(table: &Table, format: TargetFormat) -> Result<Vec<u8>> {
    writer_for(format)?.write(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_replaces_extension() {
        let d = Download::new("report.csv", TargetFormat::Xlsx, Vec::new());
        assert_eq!(d.file_name, "report.xlsx");
        let d = Download::new("data.xlsx", TargetFormat::Csv, Vec::new());
        assert_eq!(d.file_name, "data.csv");
        assert_eq!(d.mime_type, "text/csv");
    }

    #[test]
    fn test_download_name_with_dotted_stem() {
        // Only the final extension is replaced
        let d = Download::new("export.2024.csv", TargetFormat::Xlsx, Vec::new());
        assert_eq!(d.file_name, "export.2024.xlsx");
    }

    #[cfg(not(feature = "xlsx"))]
    #[test]
    fn test_xlsx_writer_unavailable_without_feature() {
        use crate::error::SweepError;
        let err = writer_for(TargetFormat::Xlsx).err().unwrap();
        assert!(matches!(err, SweepError::WriterUnavailable(TargetFormat::Xlsx)));
        // The message names the CSV fallback
        assert!(err.to_string().contains("csv"));
        // CSV conversion of the same build still works
        assert!(writer_for(TargetFormat::Csv).is_ok());
    }

    #[cfg(feature = "xlsx")]
    #[test]
    fn test_xlsx_writer_available_with_feature() {
        assert!(writer_for(TargetFormat::Xlsx).is_ok());
        assert!(TargetFormat::Xlsx.writer_available());
    }
}
