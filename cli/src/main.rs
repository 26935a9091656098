//! Logistics network CLI
//!
//! Runs one matching cycle from a JSON scenario file and prints the result.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use logistics_network_core::{NetworkConfig, Scenario};
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Carrier/request matching for one scheduling domain
#[derive(Parser)]
#[command(name = "logistics")]
#[command(about = "Plan one logistics cycle from a JSON scenario")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error, off); LOGISTICS_LOG overrides
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Register the scenario's requests and compute the stable matching
    Plan {
        /// Scenario JSON file
        scenario: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: Format,

        /// Replace the scenario's configuration with this JSON file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print only the digest of the cycle report
    Digest {
        /// Scenario JSON file
        scenario: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_env("LOGISTICS_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_scenario(path: &Path) -> Result<Scenario> {
    let json = std::fs::read_to_string(path).with_context(|| format!("reading scenario {}", path.display()))?;
    Scenario::from_json(&json).with_context(|| format!("parsing scenario {}", path.display()))
}

fn plan(path: &Path, format: Format, config: Option<&Path>) -> Result<String> {
    let mut scenario = load_scenario(path)?;
    if let Some(config_path) = config {
        let json = std::fs::read_to_string(config_path)
            .with_context(|| format!("reading config {}", config_path.display()))?;
        scenario.config = NetworkConfig::from_json(&json)?;
    }

    let mut network = scenario.build_network()?;
    let report = network.report(&scenario.world);
    info!(domain = %report.domain, digest = %report.digest(), "cycle planned");

    match format {
        Format::Json => Ok(report.to_json_pretty()?),
        Format::Text => Ok(format!(
            "{}\n{}\ndigest: {}",
            network.summarize(&scenario.world),
            network.summarize_matching(&scenario.world),
            report.digest()
        )),
    }
}

fn run(cli: &Cli) -> Result<String> {
    match &cli.command {
        Commands::Plan {
            scenario,
            format,
            config,
        } => plan(scenario, *format, config.as_deref()),
        Commands::Digest { scenario } => Ok(load_scenario(scenario)?.run()?.digest()),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(&cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
