use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use evolve_core::{Transaction, categorize_basic};
use evolve_finance::{
    PredictionCache, Predictor, category_summary, read_transactions_csv, write_transactions_csv,
};
use std::path::{Path, PathBuf};

mod cache;
mod config;
mod logging;
mod state;

use cache::AnyCache;

#[derive(Parser, Debug)]
#[command(name = "evolve", version, about = "Evolve transaction categorizer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Predict a category with the confidence scorer (cached)
    Categorize {
        description: String,

        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        amount: f64,
    },

    /// Categorize with keyword rules and amount buckets only (uncached)
    Basic {
        description: String,

        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        amount: f64,
    },

    /// Show every scored candidate for a description
    Explain {
        description: String,

        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        amount: f64,
    },

    /// Fill in missing categories in a transactions CSV and print it to stdout
    Batch {
        #[arg(long)]
        csv: PathBuf,

        /// Predictions in flight at once (default: 1, sequential)
        #[arg(long, default_value_t = 1)]
        concurrency: usize,
    },

    /// Expense totals per category for a transactions CSV
    Summary {
        #[arg(long)]
        csv: PathBuf,
    },

    /// Configuration file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write ~/.evolve/config.toml with defaults
    Init,

    /// Print the effective configuration
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Categorize { description, amount } => {
            let predictor = build_predictor().await?;
            println!("{}", describe_prediction(&predictor, &description, amount).await);
        }

        Command::Basic { description, amount } => {
            println!("{}", categorize_basic(&description, amount));
        }

        Command::Explain { description, amount } => {
            let predictor = build_predictor().await?;
            let ranked = predictor
                .score_all(&description, amount)
                .with_context(|| format!("scoring {description:?}"))?;
            let threshold = predictor.config().confidence_threshold;
            println!("threshold={threshold:.2}");
            for p in &ranked {
                let mark = if p.confidence >= threshold { "*" } else { " " };
                println!("{mark} {:<20} {:.2}", p.category.as_str(), p.confidence);
            }
            println!("basic: {}", categorize_basic(&description, amount));
        }

        Command::Batch { csv, concurrency } => {
            let predictor = build_predictor().await?;
            let txns = load_csv(&csv)?;
            let count = txns.len();
            let out = if concurrency > 1 {
                predictor.categorize_transactions_concurrent(txns, concurrency).await
            } else {
                predictor.categorize_transactions(txns).await
            };
            let stdout = std::io::stdout();
            write_transactions_csv(stdout.lock(), &out).context("writing CSV to stdout")?;
            tracing::info!(count, "categorized batch");
        }

        Command::Summary { csv } => {
            let predictor = build_predictor().await?;
            let txns = predictor.categorize_transactions(load_csv(&csv)?).await;
            let mut rows: Vec<_> = category_summary(&txns).into_iter().collect();
            rows.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

            println!("Parsed {} transactions from {}\n", txns.len(), csv.display());
            for (category, total) in &rows {
                println!("{category:<20} ${total:.2}");
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

/// Composition root: config, then the cache backend, then the predictor
async fn build_predictor() -> Result<Predictor<AnyCache>> {
    let cfg = config::load_config()?;
    let cache = AnyCache::connect(&cfg.cache, cfg.categorizer.cache_timeout()).await;
    tracing::debug!(backend = cache.name(), "cache ready");
    Ok(Predictor::new(cache, cfg.categorizer))
}

/// One line for `categorize`: the scored prediction, or the basic category
/// when the scoring pipeline rejects the input.
async fn describe_prediction<C: PredictionCache>(
    predictor: &Predictor<C>,
    description: &str,
    amount: f64,
) -> String {
    match predictor.predict(description, amount).await {
        Ok(p) => format!("{} (confidence: {:.2})", p.category, p.confidence),
        Err(e) => {
            tracing::warn!(description, error = %e, "prediction failed; using basic categorizer");
            categorize_basic(description, amount).to_string()
        }
    }
}

fn load_csv(path: &Path) -> Result<Vec<Transaction>> {
    if !path.exists() {
        bail!("CSV not found: {} (pass --csv <path>)", path.display());
    }
    read_transactions_csv(path).with_context(|| format!("parsing {}", path.display()))
}
