use anyhow::Context;
use api_client::{load_history_or_synthetic, FinnhubClient, MarketDataProvider};
use backtester::{run_monthly_momentum_backtest, summarize};
use clap::{Parser, Subcommand};
use configuration::{init_tracing, load_config, load_config_from, BacktestStrategy, Config};
use core_types::PriceSeries;
use scorer::CompositeScorer;
use serde::Deserialize;
use std::path::{Path, PathBuf};

mod output;

/// The main entry point for the Meridian market analysis toolkit.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may already be set.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    }
    .context("Failed to load configuration")?;
    let _log_guard = init_tracing(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Indicators(args) => handle_indicators(args, &config),
        Commands::Score(args) => handle_score(args, &config),
        Commands::Patterns(args) => handle_patterns(args),
        Commands::Backtest(args) => handle_backtest(args, &config).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Technical indicators, signal scoring, chart patterns and calendar backtests.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file (defaults to ./config.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the indicator suite over the last prices and volumes.
    Indicators(InputArgs),
    /// Compute indicators, then score the latest price as BUY, SELL or HOLD.
    Score(InputArgs),
    /// Scan prices for chart patterns.
    Patterns(InputArgs),
    /// Run the calendar strategy backtest.
    Backtest(BacktestArgs),
}

#[derive(Parser)]
struct InputArgs {
    /// JSON file with `prices` and optional `volumes` / `dates` arrays.
    #[arg(long)]
    input: PathBuf,

    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct BacktestArgs {
    /// The ticker to fetch when no input file is given (e.g., "TLT").
    #[arg(long)]
    symbol: String,

    /// JSON file with `prices` and `dates`; skips the market-data fetch.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Seed for the synthetic random walk used when no data is available.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = BacktestStrategy::MonthlyMomentum)]
    strategy: BacktestStrategy,

    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
}

/// The shape of an `--input` file.
#[derive(Debug, Deserialize)]
struct InputFile {
    prices: Vec<f64>,
    #[serde(default)]
    volumes: Option<Vec<f64>>,
    #[serde(default)]
    dates: Option<Vec<String>>,
}

fn read_input(path: &Path) -> anyhow::Result<InputFile> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not a valid input file", path.display()))
}

fn volumes_or_zero(input: &InputFile) -> Vec<f64> {
    match &input.volumes {
        Some(volumes) => volumes.clone(),
        None => {
            tracing::warn!("No volumes in input; volume ratio will read as 0");
            vec![0.0; input.prices.len()]
        }
    }
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_indicators(args: InputArgs, config: &Config) -> anyhow::Result<()> {
    let input = read_input(&args.input)?;
    let volumes = volumes_or_zero(&input);
    let set = indicators::compute_indicators_with(&input.prices, &volumes, &config.indicators)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&set)?);
    } else {
        println!("{}", output::indicator_table(&set));
    }
    Ok(())
}

fn handle_score(args: InputArgs, config: &Config) -> anyhow::Result<()> {
    let input = read_input(&args.input)?;
    let volumes = volumes_or_zero(&input);
    let set = indicators::compute_indicators_with(&input.prices, &volumes, &config.indicators)?;
    let price = *input.prices.last().context("Input has no prices")?;
    let decision = CompositeScorer::new(config.scoring)?.score(price, &set)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&decision)?);
    } else {
        println!("{}", output::decision_table(price, &decision));
    }
    Ok(())
}

fn handle_patterns(args: InputArgs) -> anyhow::Result<()> {
    let input = read_input(&args.input)?;
    let found = patterns::detect_patterns(&input.prices)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&found)?);
    } else if found.is_empty() {
        println!("No patterns detected in {} prices.", input.prices.len());
    } else {
        println!("{}", output::pattern_table(&found));
    }
    Ok(())
}

async fn handle_backtest(args: BacktestArgs, config: &Config) -> anyhow::Result<()> {
    let (series, synthetic) = match &args.input {
        Some(path) => {
            let input = read_input(path)?;
            let dates = input
                .dates
                .context("Backtest input needs a `dates` array alongside `prices`")?;
            (PriceSeries::from_iso_dates(&dates, input.prices)?, false)
        }
        None => {
            let client = match std::env::var("FINNHUB_API_KEY") {
                Ok(key) if !key.is_empty() => Some(FinnhubClient::new(key, &config.market_data)?),
                _ => None,
            };
            let provider = client.as_ref().map(|c| c as &dyn MarketDataProvider);
            let loaded =
                load_history_or_synthetic(provider, &args.symbol, &config.market_data.synthetic, args.seed).await;
            (loaded.history.to_series()?, loaded.synthetic)
        }
    };

    tracing::info!(
        "Running {:?} backtest for {} over {} days",
        args.strategy,
        args.symbol,
        series.len()
    );
    let result = run_monthly_momentum_backtest(&series, &config.backtest, synthetic)?;
    let analysis = summarize(&result, &args.symbol, args.strategy);

    if args.json {
        let body = serde_json::json!({
            "symbol": args.symbol,
            "result": result,
            "analysis": analysis,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!("{}", output::backtest_table(&args.symbol, &result));
        println!("\n{}", analysis.summary);
        for insight in &analysis.key_insights {
            println!("  - {}", insight);
        }
    }
    Ok(())
}
