//! CLI application for Finnish electricity and charging invoices.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{charging, config, periods};

/// Turn Finnish utility and charging invoices into monthly CSV reports
#[derive(Parser)]
#[command(name = "laskut")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report a transfer-utility invoice (day/night transfer, tax)
    Transfer(periods::TransferArgs),

    /// Report an energy-retailer invoice
    Energy(periods::EnergyArgs),

    /// Combine a transfer and an energy invoice into one report
    Combined(periods::CombinedArgs),

    /// Report a charging-network invoice
    Charging(charging::ChargingArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Transfer(args) => periods::run_transfer(args, config_path).await,
        Commands::Energy(args) => periods::run_energy(args, config_path).await,
        Commands::Combined(args) => periods::run_combined(args, config_path).await,
        Commands::Charging(args) => charging::run(args, config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
