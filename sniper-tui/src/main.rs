//! Sniper TUI entry point.
//!
//! Refreshes run synchronously on the main thread: the "connecting" status is
//! drawn first, then the cycle blocks until both legs are in or one fails.

use std::fs::File;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use sniper_core::data::{KrakenProvider, StaticProvider};
use sniper_runner::{run_cycle, DashboardConfig};
use sniper_tui::{handle_key, ui, AppState};

#[derive(Parser)]
#[command(name = "sniper-tui", about = "Pullback Sniper terminal dashboard")]
struct Args {
    /// Config file (default: <config dir>/sniper/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Serve generated candles instead of calling Kraken
    #[arg(long)]
    demo: bool,
}

/// Where candles come from for this session.
enum Source {
    Kraken(KrakenProvider),
    Demo,
}

impl Source {
    fn label(&self) -> &'static str {
        match self {
            Source::Kraken(_) => "Kraken",
            Source::Demo => "Demo",
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = init_file_logging()?;

    let config_path = match args.config {
        Some(path) => path,
        None => DashboardConfig::default_path(&dirs::config_dir().unwrap_or_else(|| PathBuf::from("."))),
    };
    let config = DashboardConfig::load_or_default(&config_path)
        .with_context(|| format!("failed to load config {}", config_path.display()))?;

    let source = if args.demo {
        Source::Demo
    } else {
        Source::Kraken(
            KrakenProvider::new(config.exchange.provider_settings())
                .context("failed to build Kraken client")?,
        )
    };
    tracing::info!(source = source.label(), log = %log_path.display(), "starting dashboard");

    // Restore the terminal before printing a panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut app = AppState::new(config, source.label());

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app, &source);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    source: &Source,
) -> Result<()> {
    loop {
        if app.refresh_requested {
            refresh(terminal, app, source)?;
        }

        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                handle_key(app, key);
            }
        }

        if !app.running {
            break;
        }
    }
    Ok(())
}

/// Show the connecting status, then run one blocking cycle for the selected pair.
fn refresh(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    source: &Source,
) -> Result<()> {
    let Some(pair) = app.selected_pair().cloned() else {
        app.refresh_requested = false;
        return Ok(());
    };

    app.set_status(app.connecting_message());
    terminal.draw(|f| ui::draw(f, app))?;

    let now = chrono::Utc::now();
    let result = match source {
        Source::Kraken(provider) => run_cycle(provider, &app.config, &pair, now),
        Source::Demo => run_cycle(&StaticProvider::demo_for(&pair), &app.config, &pair, now),
    };
    app.apply_cycle(result);
    Ok(())
}

/// Log to `<cache dir>/sniper/sniper.log`; the terminal belongs to the UI.
fn init_file_logging() -> Result<PathBuf> {
    let dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sniper");
    std::fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join("sniper.log");
    let file = open_log(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(path)
}

fn open_log(path: &Path) -> Result<File> {
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}
