//! Preview rendering and per-file reporting

use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::model::Table;
use crate::writer::Download;

/// Outcome of processing one file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file_name: String,
    pub size_kib: f64,
    pub rows_in: usize,
    pub rows_out: usize,
    pub columns_out: usize,
    pub duplicates_removed: usize,
    pub cells_filled: usize,
    pub download: Download,
    /// Rendered preview of the parsed table, when one was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

/// Per-file entry in a batch report
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileOutcome {
    Ok(FileReport),
    Error { file_name: String, message: String },
}

/// Report over a whole batch, rendered as JSON with `--json`
#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub results: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn all_succeeded(&self) -> bool {
        self.results
            .iter()
            .all(|r| matches!(r, FileOutcome::Ok(_)))
    }
}

/// Render the first `n` rows of a table as a text grid
pub fn render_preview(table: &Table, n: usize) -> String {
    let mut builder = Builder::default();
    builder.push_record(table.columns.iter().map(|c| c.name.clone()));
    for row in table.head(n) {
        builder.push_record(row.iter().map(|cell| cell.display().into_owned()));
    }
    let mut grid = builder.build();
    grid.with(Style::sharp());
    grid.to_string()
}

/// Write a green per-file success line with the operation counts
pub fn write_success(writer: &mut dyn WriteColor, report: &FileReport) -> std::io::Result<()> {
    writer.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
    write!(writer, "ok")?;
    writer.reset()?;
    writeln!(
        writer,
        " {} -> {} ({} rows, {} columns, {} duplicates removed, {} cells filled)",
        report.file_name,
        report.download.file_name,
        report.rows_out,
        report.columns_out,
        report.duplicates_removed,
        report.cells_filled,
    )
}

/// Write a red per-file error line; the batch continues afterwards
pub fn write_failure(
    writer: &mut dyn WriteColor,
    file_name: &str,
    message: &str,
) -> std::io::Result<()> {
    writer.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
    write!(writer, "error")?;
    writer.reset()?;
    writeln!(writer, " {}: {}", file_name, message)
}
