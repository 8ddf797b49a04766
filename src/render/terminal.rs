//! Terminal precondition and raw-mode session. The live view refuses to start without a
//! terminal; leaving the session restores the screen.

use crate::error::WatchError;
use crossterm::{cursor, execute, terminal};
use std::io::{self, IsTerminal};

pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    /// Check that stdout is a terminal with readable geometry, then switch to raw mode on
    /// the alternate screen.
    pub fn enter() -> Result<Self, WatchError> {
        if !io::stdout().is_terminal() {
            return Err(WatchError::NotATerminal);
        }
        Self::size()?;
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self { _private: () })
    }

    /// (columns, rows)
    pub fn size() -> Result<(u16, u16), WatchError> {
        terminal::size().map_err(|source| WatchError::TerminalGeometry { source })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
