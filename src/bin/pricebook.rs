//! pricebook CLI - Command-line interface for price feed queries
//!
//! Provides commands for listing feed currencies, converting amounts, and
//! inspecting the build.
//!
//! ## Example Usage
//!
//! ```bash
//! # List currencies known to the feed
//! pricebook currencies
//!
//! # Convert 125.5 ATOM into OSMO
//! pricebook convert 125.5 ATOM OSMO
//!
//! # Convert into the configured reference currency, from a local file
//! pricebook convert 2.0 ETH --file prices.json
//!
//! # Show build information
//! pricebook info --detailed
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use pricebook::convert::{convert, ConversionQuery};
use pricebook::feed::{self, DEFAULT_FEED_URL};
use pricebook::index::LatestPriceIndex;
use pricebook::observation::PriceObservation;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

/// pricebook: Latest-price indexing and currency conversion
#[derive(Parser)]
#[command(name = "pricebook")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Latest-price indexing and currency conversion", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List currencies with a known price
    Currencies {
        /// Read the feed from a local JSON/CSV file instead of fetching
        #[arg(short = 'f', long)]
        file: Option<PathBuf>,
    },

    /// Convert an amount between currencies
    Convert {
        /// Amount to convert
        #[arg(value_name = "AMOUNT")]
        amount: f64,

        /// Currency to convert from
        #[arg(value_name = "SOURCE")]
        source: String,

        /// Currency to convert to (default: configured reference currency)
        #[arg(value_name = "TARGET")]
        target: Option<String>,

        /// Read the feed from a local JSON/CSV file instead of fetching
        #[arg(short = 'f', long)]
        file: Option<PathBuf>,

        /// Output file for the quote (CSV/JSON)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Show build information
    Info {
        /// Show detailed information
        #[arg(short = 'd', long)]
        detailed: bool,
    },
}

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Config {
    #[serde(default = "default_feed_url")]
    feed_url: String,
    #[serde(default = "default_reference_currency")]
    reference_currency: String,
}

fn default_feed_url() -> String {
    DEFAULT_FEED_URL.to_string()
}

fn default_reference_currency() -> String {
    "USD".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_url: default_feed_url(),
            reference_currency: default_reference_currency(),
        }
    }
}

impl Config {
    fn load(path: Option<&Path>) -> Self {
        if let Some(config_path) = path {
            if config_path.exists() {
                match fs::read_to_string(config_path) {
                    Ok(contents) => match toml::from_str(&contents) {
                        Ok(config) => return config,
                        Err(e) => {
                            eprintln!("{} Failed to parse config: {}", "Warning:".yellow(), e);
                        }
                    },
                    Err(e) => {
                        eprintln!("{} Failed to read config: {}", "Warning:".yellow(), e);
                    }
                }
            }
        } else {
            // Try default location
            if let Some(home) = dirs::home_dir() {
                let default_config = home.join(".pricebook").join("config.toml");
                if default_config.exists() {
                    if let Ok(contents) = fs::read_to_string(&default_config) {
                        if let Ok(config) = toml::from_str(&contents) {
                            return config;
                        }
                    }
                }
            }
        }

        Config::default()
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref());

    if cli.verbose {
        println!(
            "{} v{}",
            "pricebook".cyan().bold(),
            env!("CARGO_PKG_VERSION")
        );
        println!("Feed: {}", config.feed_url.dimmed());
    }

    let result = match cli.command {
        Commands::Currencies { file } => list_currencies(file.as_deref(), cli.verbose, &config),

        Commands::Convert {
            amount,
            source,
            target,
            file,
            output,
        } => run_convert(
            amount,
            &source,
            target.as_deref(),
            file.as_deref(),
            output,
            &config,
        ),

        Commands::Info { detailed } => show_info(detailed, &config),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

// Command implementations
fn list_currencies(
    file: Option<&Path>,
    verbose: bool,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let observations = load_feed(file, config)?;
    let index = LatestPriceIndex::from_observations(observations);

    println!("{}", "Available Currencies".cyan().bold());
    println!("{}", "====================".cyan());
    println!();

    if index.is_empty() {
        println!("{}", "  Feed contains no priced currencies.".dimmed());
        println!();
        return Ok(());
    }

    for (idx, (currency, obs)) in index.iter().enumerate() {
        if verbose {
            println!(
                "  {}. {} {} {}",
                idx + 1,
                currency.bright_green().bold(),
                format!("{:.8}", obs.price).dimmed(),
                obs.timestamp.to_rfc3339().dimmed()
            );
        } else {
            println!("  {}. {}", idx + 1, currency.bright_green().bold());
        }
    }
    println!();

    println!(
        "{} {} currencies priced",
        "✓".green().bold(),
        index.len()
    );
    Ok(())
}

fn run_convert(
    amount: f64,
    source: &str,
    target: Option<&str>,
    file: Option<&Path>,
    output: Option<PathBuf>,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = target.unwrap_or(&config.reference_currency);

    let observations = load_feed(file, config)?;
    let index = LatestPriceIndex::from_observations(observations);

    let quote = convert(&index, &ConversionQuery::new(source, target, amount))?;

    println!("{}", "Conversion Result".green().bold());
    println!("{}", "=================".green());
    println!(
        "  {} {} {}",
        "From:".bold(),
        format!("{:.6}", quote.source_amount),
        quote.source.bright_green().bold()
    );
    println!(
        "  {} {} {}",
        "To:".bold(),
        format!("{:.6}", quote.target_amount).bright_green().bold(),
        quote.target.bright_green().bold()
    );
    println!(
        "  {} {}",
        "Rate:".bold(),
        format!("1 {} = {:.8} {}", quote.source, quote.rate, quote.target).cyan()
    );
    println!();

    // Save quote if output specified
    if let Some(output_path) = output {
        let extension = output_path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("json");

        match extension {
            "json" => {
                let json = serde_json::to_string_pretty(&quote)?;
                fs::write(&output_path, json)?;
                println!(
                    "{} Quote saved to: {}",
                    "✓".green().bold(),
                    output_path.display()
                );
            }
            "csv" => {
                let mut wtr = csv::Writer::from_path(&output_path)?;
                wtr.serialize(&quote)?;
                wtr.flush()?;
                println!(
                    "{} Quote saved to: {}",
                    "✓".green().bold(),
                    output_path.display()
                );
            }
            _ => {
                println!("{} Unknown output format. Using JSON.", "Warning:".yellow());
                let json = serde_json::to_string_pretty(&quote)?;
                fs::write(&output_path, json)?;
            }
        }
    }

    Ok(())
}

fn show_info(detailed: bool, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "{} {}",
        "pricebook".cyan().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!("{}", env!("CARGO_PKG_DESCRIPTION"));
    println!();

    println!("{}", "Configuration".bold());
    println!("{}", "=============".dimmed());
    println!("  {} {}", "Feed endpoint:".bold(), config.feed_url);
    println!(
        "  {} {}",
        "Reference currency:".bold(),
        config.reference_currency
    );
    println!();

    if detailed {
        println!("{}", "Features".bold());
        println!("{}", "========".dimmed());
        println!(
            "  {} {}",
            "HTTP feed client:".bold(),
            feature_status(cfg!(feature = "async"))
        );
        println!(
            "  {} {}",
            "CLI tools:".bold(),
            feature_status(cfg!(feature = "cli"))
        );
        println!();

        println!("{}", "Feed Format".bold());
        println!("{}", "===========".dimmed());
        println!(
            "  {} JSON array of {{currency, date, price}}",
            "Wire shape:".bold()
        );
        println!("  {} currency,date,price header", "CSV shape:".bold());
        println!("  {} latest record per currency wins", "Semantics:".bold());
        println!();
    }

    println!("{}", "Resources".bold());
    println!("{}", "=========".dimmed());
    println!("  {} {}", "Default feed:".bold(), DEFAULT_FEED_URL);
    println!("  {} Apache-2.0", "License:".bold());
    println!();

    Ok(())
}

fn load_feed(
    file: Option<&Path>,
    config: &Config,
) -> Result<Vec<PriceObservation>, Box<dyn std::error::Error>> {
    match file {
        Some(path) => {
            let is_csv = path
                .extension()
                .and_then(|s| s.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("csv"))
                .unwrap_or(false);

            let observations = if is_csv {
                feed::load_csv_file(path)?
            } else {
                feed::load_json_file(path)?
            };
            Ok(observations)
        }
        None => fetch_feed(config),
    }
}

#[cfg(feature = "async")]
fn fetch_feed(config: &Config) -> Result<Vec<PriceObservation>, Box<dyn std::error::Error>> {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")?
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb.set_message(format!("Fetching {}...", config.feed_url));

    let client = pricebook::feed::PriceFeedClient::with_url(&config.feed_url)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(client.fetch());

    pb.finish_and_clear();
    Ok(result?)
}

#[cfg(not(feature = "async"))]
fn fetch_feed(_config: &Config) -> Result<Vec<PriceObservation>, Box<dyn std::error::Error>> {
    Err("Fetching requires the 'async' feature; pass --file to read a local feed".into())
}

fn feature_status(enabled: bool) -> colored::ColoredString {
    if enabled {
        "enabled".green()
    } else {
        "disabled".red()
    }
}
