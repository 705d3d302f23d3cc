//! falcon-flights — browse Falcon 9 launches in the terminal.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌─────────────┐ watch  ┌───────────┐ AppMsg  ┌──────────┐  draw()  ┌──────────┐
//! │ data_source │ ─────► │ events.rs │ ──────► │  app.rs  │ ───────► │  ui.rs   │
//! │   (tokio)   │        │  (task)   │(channel)│ (state)  │          │ (render) │
//! └─────────────┘        └───────────┘         └──────────┘          └──────────┘
//!        ▲                                          ▲
//!        │ load_next()                              │ handle_key_event()
//!        └──────────── main loop ◄─────────── ┌──────────┐
//!                                             │ input.rs │
//!                                             └──────────┘
//! ```
//!
//! * **`events`** — forwards data-source snapshots to the UI thread.
//! * **`app`** — UI state: latest snapshot, selection, pending load request.
//! * **`ui`** — pure rendering: reads `App` state and draws widgets.
//! * **`input`** — maps key events to `App` mutations.
//! * **`main`** — wires everything together: parse args, set up logging, the
//!   runtime and the terminal, and run the event loop.

mod app;
mod events;
mod input;
mod ui;

use std::fs::File;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use falcon_flights::config::Config;
use falcon_flights::{HttpTransport, LaunchesDataSource, LaunchesQuery, RocketType};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;

// ---------------------------------------------------------------------------
// RAII terminal guard — idiomatic cleanup even on panic
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
///
/// Constructing this struct enters raw mode + alternate screen.  When the
/// value is dropped (normally or during stack unwinding) it restores the
/// terminal.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Install a panic hook that restores the terminal before printing the
/// panic message.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

/// Log to `--log-file` if given.  The terminal belongs to the UI, so there
/// is no stderr fallback.
fn init_logging(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config)?;
    install_panic_hook();

    // -- runtime for fetches and state observation ---------------------------
    let runtime = tokio::runtime::Runtime::new().context("cannot start tokio runtime")?;
    let _enter = runtime.enter();

    // -- data source ---------------------------------------------------------
    let transport = HttpTransport::new(&config.api_root, config.timeout)?;
    let source = LaunchesDataSource::new(
        LaunchesQuery::rocket(RocketType::Falcon9, None),
        config.sort_options.clone(),
        Arc::new(transport),
    );
    info!(api_root = %config.api_root, sort = ?config.sort_options, "starting");

    let rx = events::spawn(&source);

    // -- terminal setup (RAII — Drop restores on exit or panic) --------------
    let mut guard = TerminalGuard::new()?;
    let mut app = App::new();

    // -- main event loop -----------------------------------------------------
    // Runs at ~10 fps (100 ms tick).  Each iteration:
    //   1. Apply any state snapshots from the data source.
    //   2. Forward a pending load request to the data source.
    //   3. Render the UI.
    //   4. Poll for keyboard input (non-blocking, up to tick_rate).
    let tick_rate = Duration::from_millis(100);

    loop {
        while let Ok(msg) = rx.try_recv() {
            app.handle_msg(msg);
        }

        if app.take_load_request() {
            // A no-op while loading or once exhausted.
            source.load_next();
        }

        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key_event(&mut app, key);
            }
        }

        if app.quit {
            break;
        }
    }

    info!("exiting");
    // `guard` is dropped here, restoring the terminal.
    Ok(())
}
