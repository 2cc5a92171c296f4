//! Shared helpers: terminal ownership and path display.

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::path::Path;

use crate::common::logger::Log;

/// RAII guard that hands the terminal to the session.
///
/// On creation: raw mode, alternate screen, hidden cursor, mouse capture,
/// console logging suspended. Everything is undone on drop, in reverse order.
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode().context("Failed to enable raw terminal mode")?;

        let mut stdout = std::io::stdout();
        if let Err(e) = execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        ) {
            let _ = terminal::disable_raw_mode();
            return Err(e).context("Failed to enter the alternate screen");
        }

        Log::set_console_enabled(false);
        Ok(Self { active: true })
    }

    /// Restore the terminal early; later drops become no-ops.
    pub fn restore(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        let mut stdout = std::io::stdout();
        let _ = execute!(
            stdout,
            cursor::Show,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let raw_mode = terminal::disable_raw_mode();
        Log::set_console_enabled(true);
        if let Err(e) = raw_mode {
            log_pipe!();
            log_critical!("Failed to leave raw terminal mode: {e}");
            log_indented!("Run `reset` to recover the terminal");
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

/// Display a path with the home directory abbreviated to `~`.
pub fn private_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(rest) = path.strip_prefix(&home)
    {
        if rest.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~/{}", rest.display());
    }
    path.display().to_string()
}
