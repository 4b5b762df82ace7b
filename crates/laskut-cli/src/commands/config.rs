//! Config command - inspect and edit the configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use laskut_core::models::config::{CONFIG_KEYS, LaskutConfig};

use super::load_config;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Print one value, e.g. `pages.energy_page`
    Get {
        /// Dotted key
        key: String,
    },

    /// Change one value and save the file
    Set {
        /// Dotted key
        key: String,

        /// New value
        value: String,
    },

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file (default: -c or the user config file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let file = config_file(config_path);
    match args.command {
        ConfigCommand::Show => show_config(&file, config_path),
        ConfigCommand::Get { key } => get_config(&file, config_path, &key),
        ConfigCommand::Set { key, value } => set_config(&file, &key, &value),
        ConfigCommand::Init(init_args) => init_config(init_args, file),
        ConfigCommand::Path => show_path(&file),
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("laskut")
        .join("config.json")
}

/// The file the config command works on: `-c` when given, else the user config file.
fn config_file(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

fn current_config(file: &Path, config_path: Option<&str>) -> anyhow::Result<LaskutConfig> {
    if !file.exists() {
        eprintln!(
            "{} No config file at {}, using defaults.",
            style("ℹ").blue(),
            file.display()
        );
        return Ok(LaskutConfig::default());
    }
    load_config(config_path)
}

fn show_config(file: &Path, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = current_config(file, config_path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn get_config(file: &Path, config_path: Option<&str>, key: &str) -> anyhow::Result<()> {
    let config = current_config(file, config_path)?;
    println!("{}", config.get_value(key)?);
    Ok(())
}

fn set_config(file: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let mut config = if file.exists() {
        LaskutConfig::from_file(file)?
    } else {
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)?;
        }
        LaskutConfig::default()
    };

    config.set_value(key, value)?;
    config.save(file)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        config.get_value(key)?
    );

    Ok(())
}

fn init_config(args: InitArgs, file: PathBuf) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or(file);

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let config = LaskutConfig::default();
    config.save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn show_path(file: &Path) -> anyhow::Result<()> {
    println!("Configuration file: {}", file.display());

    if file.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'laskut config init' to create a configuration file.");
    }
    println!("Keys: {}", CONFIG_KEYS.join(", "));

    Ok(())
}
