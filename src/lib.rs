//! datasweep - Clean and convert tabular data files
//!
//! Ingests uploaded CSV or Excel files, applies basic cleaning
//! (duplicate removal, mean-fill of missing numeric cells), projects
//! columns, and serializes the result in either format as an in-memory
//! download payload with a MIME type and suggested file name.

pub mod clean;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod writer;

pub use config::{Config, TargetFormat};
pub use error::{Result, SweepError};
pub use model::Table;
pub use pipeline::{process, Session, SourceFile};
pub use report::FileReport;
pub use writer::Download;
