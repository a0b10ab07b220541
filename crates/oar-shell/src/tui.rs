//! Terminal setup, restoration, and panic handling.
//!
//! A panic outside a contained section restores the terminal and prints a
//! report. A panic inside one (see [`contain`]) is only logged; the caller
//! recovers and the terminal stays in TUI mode.

use std::cell::Cell;
use std::io::{Stdout, stdout};
use std::panic::{self, AssertUnwindSafe};

use color_eyre::eyre::Result;
use crossterm::{
    ExecutableCommand, cursor,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::error;

pub type Backend = CrosstermBackend<Stdout>;

thread_local! {
    static CONTAINED: Cell<bool> = const { Cell::new(false) };
}

pub struct Tui {
    pub terminal: Terminal<Backend>,
}

impl Tui {
    /// Does NOT enter raw mode yet.
    pub fn new() -> Result<Self> {
        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }

    /// Alternate screen, raw mode, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        stdout().execute(cursor::Hide)?;
        self.terminal.clear()?;
        Ok(())
    }

    /// Best effort; partial failures are ignored.
    pub fn exit(&mut self) {
        restore_terminal();
    }

    pub fn draw<F>(&mut self, render: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(render)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        self.exit();
    }
}

fn restore_terminal() {
    let _ = stdout().execute(cursor::Show);
    let _ = stdout().execute(LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

/// Run `f`, catching a panic instead of tearing the terminal down.
pub fn contain<R>(f: impl FnOnce() -> R) -> std::thread::Result<R> {
    let previous = CONTAINED.with(|c| c.replace(true));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    CONTAINED.with(|c| c.set(previous));
    result
}

fn is_contained() -> bool {
    CONTAINED.with(Cell::get)
}

/// Install panic and error hooks. Call BEFORE entering the terminal so
/// panics during init also get clean output.
pub fn install_hooks() -> Result<()> {
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .display_env_section(false)
        .into_hooks();

    eyre_hook.install()?;

    let panic_hook = panic_hook.into_panic_hook();
    panic::set_hook(Box::new(move |info| {
        if is_contained() {
            error!(panic = %info, "contained panic");
            return;
        }
        restore_terminal();
        panic_hook(info);
    }));

    Ok(())
}
