//! Ice Cream Land
//!
//! A terminal ordering kiosk: pick a flavor, add extras and your name,
//! confirm the price (optionally rounding up for charity) and pay.

use std::fs::File;
use std::io;
use std::sync::Mutex;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing_subscriber::{fmt, EnvFilter};

use icecream_land::application::App;
use icecream_land::presentation::{render_ui, InputHandler};

const LOG_FILE: &str = "icecream-land.log";

/// Entry point for the Ice Cream Land kiosk.
///
/// Sets up logging and the terminal, then runs one order session until the
/// customer exits.
///
/// # Errors
///
/// Returns an error if the log file or terminal cannot be set up.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::default();
    tracing::info!("session started");
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "terminal error");
        println!("{err:?}");
    }
    tracing::info!(step = %app.step(), "session ended");

    Ok(())
}

/// Logs go to a file in the temp directory so they never draw over the UI.
/// Verbosity follows `RUST_LOG`, defaulting to `info`.
fn init_logging() -> io::Result<()> {
    let file = File::create(std::env::temp_dir().join(LOG_FILE))?;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .init();
    Ok(())
}

/// Main application event loop.
///
/// Redraws the current screen and dispatches key presses until the
/// customer quits.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                InputHandler::handle_key_event(app, key.code, key.modifiers);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
