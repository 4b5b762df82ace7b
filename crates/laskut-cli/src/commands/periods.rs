//! Period report commands: transfer, energy and combined.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use console::style;
use tracing::{debug, info};

use laskut_core::invoice::merge::{self, MergedRecord};
use laskut_core::invoice::{
    COMBINED_REPORT_FILE_NAME, EnergyParser, Provider, ProviderParser, TransferParser,
};
use laskut_core::models::config::LaskutConfig;
use laskut_core::models::period::PeriodMapping;
use laskut_core::report::CsvRenderer;

use super::{OutputArgs, OutputFormat, load_config, read_document, warn_if_empty, write_output};

/// Arguments for the transfer command.
#[derive(Args)]
pub struct TransferArgs {
    /// Transfer-utility invoice (PDF, or text with --text)
    #[arg(required = true)]
    input: PathBuf,

    /// Input is extracted text with form feeds between pages
    #[arg(long)]
    text: bool,

    #[command(flatten)]
    output: OutputArgs,
}

/// Arguments for the energy command.
#[derive(Args)]
pub struct EnergyArgs {
    /// Energy-retailer invoice (PDF, or text with --text)
    #[arg(required = true)]
    input: PathBuf,

    /// Input is extracted text with form feeds between pages
    #[arg(long)]
    text: bool,

    /// Day transfer kWh per month, e.g. 2023-01:937,2023-02:900
    #[arg(long)]
    day_transfer: Option<String>,

    /// Night transfer kWh per month, e.g. 2023-01:920,2023-02:880
    #[arg(long)]
    night_transfer: Option<String>,

    #[command(flatten)]
    output: OutputArgs,
}

/// Arguments for the combined command.
#[derive(Args)]
pub struct CombinedArgs {
    /// Transfer-utility invoice
    #[arg(long, required = true)]
    transfer: PathBuf,

    /// Energy-retailer invoice
    #[arg(long, required = true)]
    energy: PathBuf,

    /// Inputs are extracted text with form feeds between pages
    #[arg(long)]
    text: bool,

    #[command(flatten)]
    output: OutputArgs,
}

pub async fn run_transfer(args: TransferArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let document = read_document(&args.input, args.text)?;
    let parser = TransferParser::with_page(config.pages.transfer_page);
    let periods = parser
        .parse_document(&document)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;

    let rows = merge::transfer_rows(&periods);
    emit(&config, &rows, Provider::TransferUtility.report_file_name(), &args.output)?;

    debug!("Total processing time: {:?}", start.elapsed());
    Ok(())
}

pub async fn run_energy(args: EnergyArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let day = merge::parse_kwh_list(args.day_transfer.as_deref().unwrap_or(""))
        .context("Invalid --day-transfer list")?;
    let night = merge::parse_kwh_list(args.night_transfer.as_deref().unwrap_or(""))
        .context("Invalid --night-transfer list")?;
    let splits = merge::splits_from_lists(&day, &night);

    let document = read_document(&args.input, args.text)?;
    let parser = EnergyParser::with_page(config.pages.energy_page);
    let periods = parser
        .parse_document(&document)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;

    let unmatched = splits.keys().filter(|k| !periods.contains_key(k)).count();
    if unmatched > 0 {
        eprintln!(
            "{} {} transfer split(s) name months missing from the invoice",
            style("!").yellow(),
            unmatched
        );
    }

    let rows = merge::energy_rows(&periods, &splits)
        .context("Failed to split energy by transfer kWh")?;
    emit(&config, &rows, Provider::EnergyRetailer.report_file_name(), &args.output)?;

    debug!("Total processing time: {:?}", start.elapsed());
    Ok(())
}

pub async fn run_combined(args: CombinedArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    // Each invoice parses on its own blocking thread
    let transfer_task = {
        let path = args.transfer.clone();
        let text = args.text;
        let parser = TransferParser::with_page(config.pages.transfer_page);
        tokio::task::spawn_blocking(move || parse_file(&parser, &path, text))
    };
    let energy_task = {
        let path = args.energy.clone();
        let text = args.text;
        let parser = EnergyParser::with_page(config.pages.energy_page);
        tokio::task::spawn_blocking(move || parse_file(&parser, &path, text))
    };

    let (transfer, energy) = tokio::try_join!(transfer_task, energy_task)?;
    let (transfer, energy) = (transfer?, energy?);

    info!(
        "Merging {} transfer and {} energy periods",
        transfer.len(),
        energy.len()
    );

    let rows = merge::merge(&transfer, &energy).context("Failed to merge invoices")?;
    emit(&config, &rows, COMBINED_REPORT_FILE_NAME, &args.output)?;

    debug!("Total processing time: {:?}", start.elapsed());
    Ok(())
}

fn parse_file<P>(parser: &P, path: &Path, text: bool) -> anyhow::Result<PeriodMapping>
where
    P: ProviderParser<Output = PeriodMapping>,
{
    let document = read_document(path, text)?;
    parser.parse_document(&document).with_context(|| {
        format!(
            "Failed to parse {} invoice {}",
            parser.provider().name(),
            path.display()
        )
    })
}

fn emit(
    config: &LaskutConfig,
    rows: &[MergedRecord],
    default_name: &str,
    output: &OutputArgs,
) -> anyhow::Result<()> {
    warn_if_empty(rows.len(), "billing periods");

    let renderer = CsvRenderer::from_config(config);
    let content = match output.format {
        OutputFormat::Csv => renderer.render_periods(rows)?,
        OutputFormat::Json => renderer.periods_json(rows)?,
    };

    write_output(output.output.as_deref(), default_name, output.format, &content)
}
