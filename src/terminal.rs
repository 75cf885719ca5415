//! Terminal plumbing for the viewer loop
//!
//! Raw mode, alternate screen and non-blocking key polling. The previous
//! terminal state is restored when the guard drops, including on errors
//! and panics that unwind through the render loop.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::ResetColor;
use crossterm::terminal::{
    self, BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};

use crate::compositor::{write_frame, Row};

/// Used when the terminal cannot report its size
const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// What a key press asks the viewer to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ZoomIn,
    ZoomOut,
    TogglePause,
}

/// Map a key event to a viewer action
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::ZoomIn),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(Action::ZoomOut),
        KeyCode::Char(' ') => Some(Action::TogglePause),
        _ => None,
    }
}

/// Framebuffer size in cells for the current terminal.
///
/// One row is left free so the trailing newline of the last row never scrolls.
pub fn framebuffer_size() -> (usize, usize) {
    let (cols, rows) = terminal::size().unwrap_or_else(|e| {
        log::warn!("Could not query terminal size ({}), assuming {}x{}", e, FALLBACK_SIZE.0, FALLBACK_SIZE.1);
        FALLBACK_SIZE
    });
    (cols.max(1) as usize, rows.saturating_sub(1).max(1) as usize)
}

/// Raw-mode terminal session; restores the terminal on drop
pub struct Terminal {
    out: Stdout,
}

impl Terminal {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All)) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        log::debug!("Entered raw mode and alternate screen");
        Ok(Self { out })
    }

    /// Drain pending input without blocking, returning the actions in order
    pub fn poll_actions(&mut self) -> io::Result<Vec<Action>> {
        let mut actions = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                actions.extend(map_key(key));
            }
        }
        Ok(actions)
    }

    /// Write one composited frame; returns the number of color instructions
    pub fn present(&mut self, rows: &[Row]) -> io::Result<usize> {
        queue!(self.out, BeginSynchronizedUpdate)?;
        let changes = write_frame(rows, &mut self.out)?;
        queue!(self.out, EndSynchronizedUpdate)?;
        self.out.flush()?;
        Ok(changes)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            ResetColor,
            Clear(ClearType::All),
            MoveTo(0, 0),
            Show,
            LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
        log::debug!("Restored terminal");
    }
}
