//! Per-file processing options

/// Output format for converted files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TargetFormat {
    #[default]
    Csv,
    Xlsx,
}

impl TargetFormat {
    /// MIME type advertised for a download in this format
    pub fn mime_type(self) -> &'static str {
        match self {
            TargetFormat::Csv => "text/csv",
            TargetFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    /// File extension (without the dot) used for converted files
    pub fn extension(self) -> &'static str {
        match self {
            TargetFormat::Csv => "csv",
            TargetFormat::Xlsx => "xlsx",
        }
    }

    /// Whether this build carries a serializer for the format
    pub fn writer_available(self) -> bool {
        match self {
            TargetFormat::Csv => true,
            TargetFormat::Xlsx => cfg!(feature = "xlsx"),
        }
    }
}

impl std::str::FromStr for TargetFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(TargetFormat::Csv),
            "xlsx" | "excel" => Ok(TargetFormat::Xlsx),
            _ => Err(format!("Unknown target format: {}", s)),
        }
    }
}

impl std::fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetFormat::Csv => write!(f, "csv"),
            TargetFormat::Xlsx => write!(f, "xlsx"),
        }
    }
}

/// Configuration for processing one uploaded file
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Remove duplicate rows before converting
    pub remove_duplicates: bool,
    /// Fill missing numeric cells with the column mean
    pub fill_missing: bool,
    /// Columns to keep, in order; `None` keeps every column
    pub columns: Option<Vec<String>>,
    /// Format the converted output should use
    pub target: TargetFormat,
    /// Render a preview of the first N parsed rows into the report
    pub preview_rows: Option<usize>,
}

impl Config {
    /// Create a config that converts to the given format with no cleaning
    pub fn new(target: TargetFormat) -> Self {
        Self {
            target,
            ..Default::default()
        }
    }

    /// Enable duplicate-row removal
    pub fn with_remove_duplicates(mut self, remove: bool) -> Self {
        self.remove_duplicates = remove;
        self
    }

    /// Enable mean-fill of missing numeric cells
    pub fn with_fill_missing(mut self, fill: bool) -> Self {
        self.fill_missing = fill;
        self
    }

    /// Keep only the named columns, in the given order
    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Capture a preview of the first `rows` parsed rows
    pub fn with_preview(mut self, rows: usize) -> Self {
        self.preview_rows = Some(rows);
        self
    }
}
