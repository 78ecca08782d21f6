mod app;
mod config;
mod logging;
mod region;
mod ui;

use crate::app::dispatch;
use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::AppState;
use crate::region::{FileStore, HttpDirectory, KeyValueStore, MemoryStore, RegionWorkflow};
use anyhow::{Context, Result};
use crossterm::{
    event::EventStream,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    // Load config, writing the defaults out on first run
    let first_run = config::is_first_run();
    let cfg = config::load_config()?;
    if first_run {
        if let Err(e) = config::save_config(&cfg) {
            eprintln!("Warning: could not write default config: {:#}", e);
        }
    }

    let log_path = logging::init(&cfg.logging)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), log = ?log_path, "starting regionpick");

    let workflow = build_workflow(&cfg)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, cfg, workflow).await;

    // Restore terminal
    restore_terminal()?;

    if let Err(e) = result {
        tracing::error!(error = %e, "exiting with error");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    tracing::info!("bye");
    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

fn build_workflow(cfg: &config::AppConfig) -> Result<RegionWorkflow> {
    let store: Arc<dyn KeyValueStore> = if cfg.storage.persist {
        let path = cfg.storage.resolved_path();
        tracing::info!(path = %path.display(), "using file storage");
        Arc::new(FileStore::new(path))
    } else {
        tracing::info!("persistence disabled; selection lasts for this session only");
        Arc::new(MemoryStore::new())
    };

    let directory = HttpDirectory::new(cfg.directory.endpoint.clone())
        .context("Failed to build HTTP client")?;
    tracing::info!(endpoint = directory.endpoint(), "directory endpoint");

    Ok(RegionWorkflow::new(store, Arc::new(directory)))
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: config::AppConfig,
    workflow: RegionWorkflow,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();
    let tick_rate = std::time::Duration::from_millis(cfg.ui.tick_rate_ms.max(10));

    let mut state = AppState::new(cfg, workflow);

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        loop {
            match reader.next().await {
                Some(Ok(event)) => {
                    if term_tx.send(AppEvent::Terminal(event)).is_err() {
                        break;
                    }
                }
                Some(Err(_)) => break,
                None => break,
            }
        }
    });

    // Spawn tick task
    let tick_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick_rate);
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    // Initial render, then look for a stored selection
    draw(terminal, &mut state)?;
    dispatch::activate(&mut state, &event_tx).await;

    // Main event loop
    loop {
        if state.dirty {
            draw(terminal, &mut state)?;
            state.dirty = false;
        }

        let event = event_rx.recv().await;
        let Some(event) = event else { break };

        let actions = handler::handle_event(&mut state, event);
        dispatch::run_actions(&mut state, actions, &event_tx).await;

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

fn draw(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, state: &mut AppState) -> Result<()> {
    let size = terminal.size()?;
    state.list_height = ui::list_capacity(Rect::new(0, 0, size.width, size.height), state);
    terminal.draw(|f| ui::render(f, state))?;
    Ok(())
}
