//! Baatcheet Entry Point
//!
//! Launches the chat UI, or a line-mode session with `--headless`.
//!
//! # Usage
//!
//! ```bash
//! # Full-screen chat
//! baatcheet
//!
//! # Reproducible replies, no typing delay
//! baatcheet --seed 7 --base-delay-ms 0 --jitter-ms 0
//!
//! # Scripted session
//! printf 'hello\nsamay\nalvida\n' | baatcheet --headless
//!
//! # Verbose logging (stderr)
//! RUST_LOG=debug baatcheet --headless
//! ```

use std::io::{self, IsTerminal};
use std::panic;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use baatcheet_core::config::{default_config_path, load_config_from_path, ConfigOverrides};
use baatcheet_core::{Conductor, ConductorConfig, HindiIndia};
use baatcheet_tui::{run_headless, App};

/// baatcheet - a scripted Hindi/English chat companion
#[derive(Parser, Debug)]
#[command(name = "baatcheet")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short = 'c', long, env = "BAATCHEET_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Line mode over stdin/stdout instead of the full-screen UI
    #[arg(long)]
    headless: bool,

    /// Seed for reproducible fallbacks and delays
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Minimum reply delay in milliseconds
    #[arg(long, value_name = "MS")]
    base_delay_ms: Option<u64>,

    /// Maximum extra random reply delay in milliseconds
    #[arg(long, value_name = "MS")]
    jitter_ms: Option<u64>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_delay_ms: self.base_delay_ms,
            jitter_ms: self.jitter_ms,
            seed: self.seed,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr so they never mix with the transcript
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let config = load(&args)?;

    if args.headless {
        let conductor = Conductor::scripted(config);
        let stdin = BufReader::new(tokio::io::stdin());
        let conductor = run_headless(conductor, &HindiIndia, stdin, tokio::io::stdout()).await?;
        conductor.shutdown();
        return Ok(());
    }

    // Check if we have a TTY before attempting initialization
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("❌ Error: baatcheet requires a terminal (TTY)");
        eprintln!();
        eprintln!("For pipes and scripts, use line mode:");
        eprintln!("  printf 'hello\\n' | baatcheet --headless");
        std::process::exit(1);
    }

    run_tui(config).await
}

/// Resolve configuration: file, then environment, then CLI flags
fn load(args: &Args) -> anyhow::Result<ConductorConfig> {
    let path = args.config.clone().or_else(default_config_path);
    let mut loaded = load_config_from_path(path).context("failed to load configuration")?;

    args.overrides().apply(&mut loaded);
    loaded.validate().context("invalid command-line option")?;

    tracing::debug!(
        source = %loaded.source(),
        file = ?loaded.config_file_path,
        "Configuration resolved"
    );
    Ok(loaded.conductor)
}

async fn run_tui(config: ConductorConfig) -> anyhow::Result<()> {
    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(Conductor::scripted(config));
    let result = app.run(&mut terminal).await;
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    // Propagate any errors
    result
}
