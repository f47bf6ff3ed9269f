//! datasweep - Clean and convert tabular data files

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use termcolor::{ColorChoice, StandardStream};

use datasweep::config::{Config, TargetFormat};
use datasweep::pipeline::{self, SourceFile};
use datasweep::report::{write_failure, write_success, BatchReport, FileOutcome};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliTarget {
    Csv,
    Xlsx,
}

impl From<CliTarget> for TargetFormat {
    fn from(t: CliTarget) -> Self {
        match t {
            CliTarget::Csv => TargetFormat::Csv,
            CliTarget::Xlsx => TargetFormat::Xlsx,
        }
    }
}

/// Clean uploaded tabular files (CSV, Excel) and convert between formats
#[derive(Parser, Debug)]
#[command(name = "datasweep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Files to process
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Target format for the converted output
    #[arg(short, long, value_enum, default_value = "csv")]
    to: CliTarget,

    /// Remove duplicate rows
    #[arg(long)]
    dedup: bool,

    /// Fill missing numeric cells with the column mean
    #[arg(long)]
    fill_missing: bool,

    /// Column(s) to keep, in order (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    columns: Vec<String>,

    /// Directory to write converted files into
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// Number of rows to show in the preview
    #[arg(long, default_value_t = 5)]
    preview: usize,

    /// Emit a JSON batch report instead of human output
    #[arg(long)]
    json: bool,

    /// Suppress previews and per-file success lines
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(all_succeeded) => {
            if all_succeeded {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1) // At least one file failed
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();

    let mut config = Config::new(cli.to.into())
        .with_remove_duplicates(cli.dedup)
        .with_fill_missing(cli.fill_missing);
    if !cli.columns.is_empty() {
        config = config.with_columns(cli.columns.clone());
    }
    if !cli.json && !cli.quiet {
        config = config.with_preview(cli.preview);
    }

    fs::create_dir_all(&cli.out)
        .with_context(|| format!("Failed to create output directory: {}", cli.out.display()))?;

    // Files are independent; process the batch in parallel and render
    // the outcomes in input order afterwards
    let outcomes: Vec<FileOutcome> = cli
        .files
        .par_iter()
        .map(|path| process_file(path, &config))
        .collect();

    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    let mut results = Vec::with_capacity(outcomes.len());

    for outcome in outcomes {
        match outcome {
            FileOutcome::Ok(report) => {
                let dest = cli.out.join(&report.download.file_name);
                if let Err(e) = fs::write(&dest, &report.download.bytes) {
                    let message = format!("Failed to write {}: {}", dest.display(), e);
                    if !cli.json {
                        write_failure(&mut stderr, &report.file_name, &message)?;
                    }
                    results.push(FileOutcome::Error {
                        file_name: report.file_name,
                        message,
                    });
                    continue;
                }

                if !cli.json {
                    if let Some(ref preview) = report.preview {
                        println!("{} ({:.1} KiB)", report.file_name, report.size_kib);
                        println!("{}", preview);
                    }
                    if !cli.quiet {
                        write_success(&mut stdout, &report)?;
                    }
                }
                results.push(FileOutcome::Ok(report));
            }
            FileOutcome::Error { file_name, message } => {
                if !cli.json {
                    write_failure(&mut stderr, &file_name, &message)?;
                }
                results.push(FileOutcome::Error { file_name, message });
            }
        }
    }

    let batch = BatchReport { results };
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&batch)?);
    }

    Ok(batch.all_succeeded())
}

/// Process one file; every failure stays per-file so the batch continues
fn process_file(path: &Path, config: &Config) -> FileOutcome {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_string())
        .unwrap_or_else(|| path.display().to_string());

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            return FileOutcome::Error {
                file_name,
                message: format!("Failed to read file: {}", e),
            }
        }
    };

    let source = SourceFile::new(file_name.clone(), bytes);
    match pipeline::process(&source, config) {
        Ok(report) => FileOutcome::Ok(report),
        Err(e) => FileOutcome::Error {
            file_name,
            message: e.to_string(),
        },
    }
}
