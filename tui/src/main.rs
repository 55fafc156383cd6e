//! Termagotchi Entry Point
//!
//! Launches the full-screen virtual pet.
//!
//! Startup: load (or create) the YAML config, hatch or resume the pet,
//! apply offline progress for the time the program was closed, then run
//! the simulation ticker and the TUI side by side.
//!
//! Shutdown: restore the terminal, stop the ticker, and save the pet
//! with the login timestamps for the next offline catch-up.

use std::fs::OpenOptions;
use std::io;
use std::panic;
use std::sync::Arc;

use chrono::Utc;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use simulator_core::config::{self, Config};
use simulator_core::{random_name, ticker, ActionTables, Pet, Simulator};
use termagotchi_tui::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The terminal belongs to the UI, so logs only go to a file, and
    // only when asked for one via TERMAGOTCHI_LOG.
    if let Ok(log_path) = std::env::var("TERMAGOTCHI_LOG") {
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Arc::new(log_file)),
            )
            .with(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    }

    // Check if we have a TTY before attempting initialization
    use std::io::IsTerminal;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: termagotchi requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means:");
        eprintln!("  - Running in a non-interactive environment (CI, container)");
        eprintln!("  - SSH without -t flag");
        eprintln!("  - Piped stdin/stdout");
        std::process::exit(1);
    }

    // A broken or unreadable save is fatal at startup.
    let mut config = config::load()?;

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let result = run_app(&mut terminal, &mut config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Propagate any errors
    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &mut Config,
) -> anyhow::Result<()> {
    // First run hatches a fresh egg with a random name; later runs
    // resume the saved pet.
    let pet = if config.app.last_login.is_some() {
        config.tamagotchi.clone()
    } else {
        tracing::info!("first run, hatching a new egg");
        Pet::hatch(random_name(), Utc::now())
    };

    let sim = Arc::new(Simulator::new(pet, ActionTables::default()));
    sim.apply_offline_progress(config.app.last_login, config.app.current_login);

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let ticker_task = tokio::spawn(ticker::run(Arc::clone(&sim), shutdown_rx));

    let mut app = App::new(Arc::clone(&sim));
    let result = app.run(terminal).await;

    // Stop the ticker before capturing the final pet state.
    let _ = shutdown_tx.send(true);
    let _ = ticker_task.await;

    let now = Utc::now();
    config.app.last_login = Some(now);
    config.app.current_login = now;
    config.tamagotchi = sim.snapshot();
    // Save failure at shutdown is logged, not fatal.
    if let Err(err) = config::save(config) {
        tracing::error!(error = %err, "failed to save pet on shutdown");
    }

    result
}
