use std::sync::Arc;

use clap::Parser;
use tracing::info;

use timedquiz::app::AppState;
use timedquiz::app_dirs::AppDirs;
use timedquiz::cli::Cli;
use timedquiz::config::{config_path, Config, Settings};
use timedquiz::error::Error;
use timedquiz::history::{self, print_history};
use timedquiz::store::{export_attempts, AttemptStore, FileAttemptStore};
use timedquiz::timer::{Clock, TICK_INTERVAL};
use timedquiz::tui::{self, Runtime};
use timedquiz::{logging, source};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let cli = Cli::parse();

    let config = Config::load(&config_path(&cli))?;
    let settings = Settings::resolve(&cli, config);

    let _log_guard = match logging::init(&AppDirs::log_dir(), &settings.log_filter) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: {}", e);
            None
        }
    };
    let mut store = FileAttemptStore::new(&settings.history_file);
    info!(history = %store.path().display(), "starting timedquiz");

    // Handle --clear
    if cli.clear {
        store.clear()?;
        eprintln!("History cleared.");
    }

    // Handle --history
    if cli.history {
        print_history(&store.list_all()?);
        return Ok(());
    }

    // Handle --export
    if let Some(ref export_path) = cli.export {
        export_attempts(&store.list_all()?, export_path)?;
        eprintln!("Attempts exported to {}", export_path.display());
        return Ok(());
    }

    let bank = Arc::new(source::load_bank(settings.quiz.as_deref())?);

    let (clock, timer_rx) = Clock::new(TICK_INTERVAL);
    let (history_tx, history_rx, history_worker) = history::spawn_worker(Box::new(store));
    let runtime = Runtime {
        clock,
        timer_rx,
        history_tx,
        history_rx,
        history_worker,
    };

    tui::run_tui(AppState::new(bank), runtime)?;

    Ok(())
}
