//! Charging command - monthly totals of a charging-network invoice.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use console::style;
use tracing::info;

use laskut_core::invoice::{ChargingParser, Provider, ProviderParser, summarize};
use laskut_core::report::CsvRenderer;

use super::{OutputArgs, OutputFormat, load_config, read_document, warn_if_empty, write_output};

/// Arguments for the charging command.
#[derive(Args)]
pub struct ChargingArgs {
    /// Charging-network invoice (PDF, or text with --text)
    #[arg(required = true)]
    input: PathBuf,

    /// Input is extracted text with form feeds between pages
    #[arg(long)]
    text: bool,

    /// Print per-session lines to stderr
    #[arg(long)]
    sessions: bool,

    #[command(flatten)]
    output: OutputArgs,
}

pub async fn run(args: ChargingArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let document = read_document(&args.input, args.text)?;
    let sessions = ChargingParser::new()
        .parse_document(&document)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;

    if args.sessions {
        for session in sessions.values().flatten() {
            eprintln!(
                "{} {} {}s {} kWh {} €",
                style("ℹ").blue(),
                session.started_at,
                session.duration.num_seconds(),
                session.kwh,
                session.amount_eur
            );
        }
    }

    let months = summarize(&sessions).context("Failed to summarize charging sessions")?;
    info!("Summarized {} charging months", months.len());
    warn_if_empty(months.len(), "charging sessions");

    let renderer = CsvRenderer::from_config(&config);
    let content = match args.output.format {
        OutputFormat::Csv => renderer.render_charging(&months)?,
        OutputFormat::Json => renderer.charging_json(&months)?,
    };

    write_output(
        args.output.output.as_deref(),
        Provider::ChargingNetwork.report_file_name(),
        args.output.format,
        &content,
    )
}
