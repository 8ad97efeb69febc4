//! Terminal frontend.
//!
//! - app.rs: Application state (session, draft, cursor, modes)
//! - actions.rs: Action dispatch
//! - input.rs: Event loop and key handling
//! - keymap/: Key translation (vim, emacs, custom TOML)
//! - help.rs: Help modal content
//! - ui.rs: ratatui rendering

mod actions;
mod app;
mod help;
mod input;
mod keymap;
mod ui;

pub use app::App;
pub use keymap::load_keymap;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

/// Take over the terminal, run the event loop, and restore the terminal.
pub fn run(app: &mut App) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        let _ = disable_raw_mode();
        return Err(err);
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = input::run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
