//! Subcommands and the input/output plumbing they share.

pub mod charging;
pub mod config;
pub mod periods;

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tracing::{debug, info};

use laskut_core::document::Document;
use laskut_core::models::config::LaskutConfig;
use laskut_core::pdf::document_from_pdf;

/// Output arguments shared by the report commands.
#[derive(Args)]
pub struct OutputArgs {
    /// Output file or directory (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// CSV report
    Csv,
    /// JSON rows
    Json,
}

/// Load the configuration from `-c`, the user config file, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<LaskutConfig> {
    if let Some(path) = config_path {
        return Ok(LaskutConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using configuration from {}", default_path.display());
        Ok(LaskutConfig::from_file(&default_path)?)
    } else {
        Ok(LaskutConfig::default())
    }
}

/// Read an invoice into pages.
///
/// PDFs go through text extraction; with `text` set (or a `.txt` input) the
/// file is taken as already extracted text with form feeds between pages.
pub fn read_document(path: &Path, text: bool) -> anyhow::Result<Document> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    info!("Reading {}", path.display());

    let document = if text || extension == "txt" {
        Document::from_text(&fs::read_to_string(path)?)
    } else if extension == "pdf" {
        document_from_pdf(&fs::read(path)?)?
    } else {
        anyhow::bail!("Unsupported file format: {} (use --text for extracted text)", extension);
    };

    debug!("{} has {} pages", path.display(), document.page_count());
    Ok(document)
}

/// Write a rendered report to a file, into a directory under `default_name`, or to stdout.
pub fn write_output(
    output: Option<&Path>,
    default_name: &str,
    format: OutputFormat,
    content: &str,
) -> anyhow::Result<()> {
    let Some(output) = output else {
        print!("{}", content);
        if format == OutputFormat::Json {
            println!();
        }
        return Ok(());
    };

    let output_path = if output.is_dir() {
        let name = Path::new(default_name);
        match format {
            OutputFormat::Csv => output.join(name),
            OutputFormat::Json => output.join(name.with_extension("json")),
        }
    } else {
        output.to_path_buf()
    };

    fs::write(&output_path, content)?;
    println!(
        "{} Output written to {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

/// Note on stderr when a document yielded nothing.
pub fn warn_if_empty(rows: usize, what: &str) {
    if rows == 0 {
        eprintln!(
            "{} No {} found in the invoice",
            style("!").yellow(),
            what
        );
    }
}
