//! Converter CLI
//!
//! Command-line interface for the Converter API.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use converter_client::ConverterClient;

#[derive(Parser)]
#[command(name = "converter")]
#[command(author, version, about = "Currency converter API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Converter API
    #[arg(
        long,
        env = "CONVERTER_API_URL",
        default_value = "http://localhost:8080"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an amount between two currencies
    Convert {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long, allow_hyphen_values = true)]
        amount: f64,
    },
    /// Store currency rates
    Insert {
        /// Keep rates that are not listed (default replaces every stored rate)
        #[arg(long)]
        merge: bool,
        /// JSON file with a `{"CODE": rate}` mapping, optionally wrapped in `{"currencies": ...}`
        #[arg(long, conflicts_with = "rates")]
        file: Option<PathBuf>,
        /// Rates as CODE=RATE pairs
        #[arg(value_parser = parse_rate_pair)]
        rates: Vec<(String, f64)>,
    },
    /// Check API health
    Health,
}

fn parse_rate_pair(s: &str) -> Result<(String, f64)> {
    let (code, rate) = s
        .split_once('=')
        .with_context(|| format!("expected CODE=RATE, got {s:?}"))?;
    let rate = rate
        .trim()
        .parse()
        .with_context(|| format!("invalid rate for {code}: {rate:?}"))?;
    Ok((code.trim().to_string(), rate))
}

fn read_rates_file(path: &Path) -> Result<BTreeMap<String, f64>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let mut value: serde_json::Value = serde_json::from_str(&content)?;
    if let Some(inner) = value.get_mut("currencies") {
        value = inner.take();
    }
    Ok(serde_json::from_value(value)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = ConverterClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Convert { from, to, amount } => {
            let result = client.convert(&from, &to, amount).await?;
            println!("{}", serde_json::json!({ "result": result }));
        }

        Commands::Insert { merge, file, rates } => {
            let currencies = match file {
                Some(path) => read_rates_file(&path)?,
                None => rates.into_iter().collect(),
            };
            if currencies.is_empty() && merge {
                anyhow::bail!("nothing to insert: pass CODE=RATE pairs or --file");
            }
            let count = currencies.len();
            client.insert(currencies, merge).await?;
            println!(
                "✓ Stored {} rate(s) ({})",
                count,
                if merge { "merged" } else { "replaced" }
            );
        }
    }

    Ok(())
}
