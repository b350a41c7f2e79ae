//! Platform abstraction layer
//!
//! Input reaches the game through [`InputSource`]:
//! - continuous key state, sampled once per frame
//! - discrete events (quit, confirm, cancel), drained once per frame
//!
//! `terminal` provides the crossterm implementation.

pub mod terminal;

use std::fmt;
use std::io;

pub use terminal::{TerminalGuard, TerminalInput};

/// Keys that are held rather than pressed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    pub fire: bool,
}

/// One-shot input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window closed / interrupt
    Quit,
    /// Enter
    Confirm,
    /// Escape
    Cancel,
}

/// Source of player input
pub trait InputSource {
    /// Keys currently held
    fn key_state(&mut self) -> KeyState;

    /// Discrete events received since the last call, oldest first
    fn poll_events(&mut self) -> Vec<InputEvent>;
}

/// Failure talking to the terminal
#[derive(Debug)]
pub enum PlatformError {
    Io(io::Error),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "terminal I/O failed: {e}"),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for PlatformError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
