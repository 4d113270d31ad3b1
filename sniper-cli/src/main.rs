//! Sniper CLI: one-shot pullback snapshot, watchlist and config commands.
//!
//! Commands:
//! - `snapshot`: run one refresh cycle and print the four metrics and the note
//! - `symbols`: list the configured watchlist
//! - `config`: print the effective configuration as TOML

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sniper_core::data::{KrakenProvider, StaticProvider};
use sniper_core::{DataProvider, FormingBarPolicy, TradingPair};
use sniper_runner::{run_cycle, save_snapshot_csv, snapshot_json, DashboardConfig, DashboardSnapshot};

#[derive(Parser)]
#[command(name = "sniper", about = "Pullback Sniper: daily trend / 4H pullback snapshot")]
struct Cli {
    /// Raise log verbosity on stderr (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one refresh cycle and print the metrics.
    Snapshot {
        /// Pair to evaluate, e.g. ETH/USD. Defaults to the first watchlist entry.
        #[arg(long)]
        symbol: Option<String>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the snapshot as JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Also write both annotated legs as CSV into this directory.
        #[arg(long)]
        csv_dir: Option<PathBuf>,

        /// Drop the still-forming bar of each leg before computing.
        #[arg(long, default_value_t = false)]
        closed_only: bool,

        /// Use generated candles instead of calling Kraken.
        #[arg(long, default_value_t = false)]
        demo: bool,
    },
    /// List the configured watchlist.
    Symbols {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the effective configuration as TOML.
    Config {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Snapshot {
            symbol,
            config,
            json,
            csv_dir,
            closed_only,
            demo,
        } => run_snapshot(symbol, config.as_deref(), json, csv_dir.as_deref(), closed_only, demo),
        Commands::Symbols { config } => {
            let config = load_config(config.as_deref())?;
            for (i, pair) in config.watchlist.iter().enumerate() {
                println!("{}  {pair}  ({})", i + 1, KrakenProvider::venue_pair(pair));
            }
            Ok(())
        }
        Commands::Config { config } => {
            let config = load_config(config.as_deref())?;
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<DashboardConfig> {
    match path {
        Some(path) => DashboardConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => {
            let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
            let path = DashboardConfig::default_path(&base);
            DashboardConfig::load_or_default(&path)
                .with_context(|| format!("failed to load config {}", path.display()))
        }
    }
}

fn run_snapshot(
    symbol: Option<String>,
    config_path: Option<&Path>,
    json: bool,
    csv_dir: Option<&Path>,
    closed_only: bool,
    demo: bool,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    if closed_only {
        config.forming_bar = FormingBarPolicy::Exclude;
    }

    let pair = match symbol {
        Some(s) => s.parse::<TradingPair>()?,
        None => config
            .watchlist
            .first()
            .cloned()
            .context("watchlist is empty")?,
    };

    let provider: Box<dyn DataProvider> = if demo {
        Box::new(StaticProvider::demo_for(&pair))
    } else {
        Box::new(KrakenProvider::new(config.exchange.provider_settings())?)
    };

    let snapshot = match run_cycle(provider.as_ref(), &config, &pair, chrono::Utc::now()) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            std::process::exit(1);
        }
    };

    if json {
        println!("{}", snapshot_json(&snapshot)?);
    } else {
        print!("{}", render_summary(&snapshot, provider.name()));
    }

    if let Some(dir) = csv_dir {
        let paths = save_snapshot_csv(&snapshot, dir)?;
        for path in paths {
            eprintln!("Wrote {}", path.display());
        }
    }

    Ok(())
}

fn render_summary(snapshot: &DashboardSnapshot, source: &str) -> String {
    let s = &snapshot.signal;
    let atr = s
        .atr
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| "— (warming up)".to_string());
    let daily_ema = snapshot.daily.params().ema_period;
    let h4_ema = snapshot.intraday.params().ema_period;

    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!("=== {} Pullback Snapshot ===\n", snapshot.pair));
    out.push_str(&format!(
        "Source:         {source} @ {}\n",
        snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!(
        "Bars:           {} daily, {} 4H\n",
        snapshot.daily.len(),
        snapshot.intraday.len()
    ));
    out.push('\n');
    out.push_str(&format!("Price:          ${:.2}\n", s.current_price));
    out.push_str(&format!(
        "Daily Trend:    {} (close {:.2} vs EMA{daily_ema} {:.2})\n",
        s.trend_label(),
        s.daily_close,
        s.daily_ema
    ));
    out.push_str(&format!(
        "4H Pullback:    {:.2}% from EMA{h4_ema} ({}, threshold {:.2}%)\n",
        s.distance_pct,
        s.pullback_label(),
        s.threshold_pct
    ));
    out.push_str(&format!("ATR:            {atr}\n"));
    out.push('\n');
    out.push_str(&format!("{}\n", s.summary_note()));
    out
}
