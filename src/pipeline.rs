//! Per-file processing: parse, clean, select, convert

use log::debug;

use crate::clean::{fill_missing_numeric, remove_duplicates, CleanSummary};
use crate::config::{Config, TargetFormat};
use crate::error::Result;
use crate::model::Table;
use crate::parser::ParserFactory;
use crate::report::FileReport;
use crate::writer::{self, Download};

/// One uploaded file: its name and raw bytes
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// The file-name extension, without the dot
    pub fn extension(&self) -> &str {
        std::path::Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
    }

    /// File size in KiB
    pub fn size_kib(&self) -> f64 {
        self.bytes.len() as f64 / 1024.0
    }
}

/// A per-file pipeline session owning the parsed table. Operations
/// chain in the fixed order parse → clean → select → convert; each step
/// other than parse and convert is optional. One session per file, no
/// cross-file state.
#[derive(Debug)]
pub struct Session {
    source_name: String,
    table: Table,
}

impl Session {
    /// Parse the uploaded file and open a session over its table
    pub fn open(file: &SourceFile) -> Result<Self> {
        let table = ParserFactory::new().parse(&file.bytes, file.extension())?;
        debug!(
            "parsed {}: {} rows x {} columns",
            file.name,
            table.row_count(),
            table.column_count()
        );
        Ok(Self {
            source_name: file.name.clone(),
            table,
        })
    }

    /// The current table, for previews and charting
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Drop duplicate rows, keeping first occurrences
    pub fn remove_duplicates(&mut self) -> usize {
        let removed = remove_duplicates(&mut self.table);
        debug!("{}: removed {} duplicate rows", self.source_name, removed);
        removed
    }

    /// Fill missing numeric cells with their column mean
    pub fn fill_missing_numeric(&mut self) -> usize {
        let filled = fill_missing_numeric(&mut self.table);
        debug!("{}: filled {} missing cells", self.source_name, filled);
        filled
    }

    /// Keep only the named columns, in the given order
    pub fn select_columns(&mut self, names: &[String]) -> Result<()> {
        self.table.select_columns(names)
    }

    /// Serialize the table to the target format
    pub fn convert(&self, target: TargetFormat) -> Result<Download> {
        let bytes = writer::convert(&self.table, target)?;
        debug!(
            "{}: converted to {} ({} bytes)",
            self.source_name,
            target,
            bytes.len()
        );
        Ok(Download::new(&self.source_name, target, bytes))
    }
}

/// Run the configured steps over one file and collect the outcome
pub fn process(file: &SourceFile, config: &Config) -> Result<FileReport> {
    let mut session = Session::open(file)?;
    let rows_in = session.table().row_count();
    let preview = config
        .preview_rows
        .map(|n| crate::report::render_preview(session.table(), n));

    let mut summary = CleanSummary::default();
    if config.remove_duplicates {
        summary.duplicates_removed = session.remove_duplicates();
    }
    if config.fill_missing {
        summary.cells_filled = session.fill_missing_numeric();
    }

    if let Some(ref names) = config.columns {
        session.select_columns(names)?;
    }

    let download = session.convert(config.target)?;

    Ok(FileReport {
        file_name: file.name.clone(),
        size_kib: file.size_kib(),
        rows_in,
        rows_out: session.table().row_count(),
        columns_out: session.table().column_count(),
        duplicates_removed: summary.duplicates_removed,
        cells_filled: summary.cells_filled,
        download,
        preview,
    })
}
