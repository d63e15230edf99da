#![forbid(unsafe_code)]

//! mullion public facade crate.
//!
//! Re-exports the common types from the internal crates and offers a small
//! prelude for day-to-day usage.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use mullion_core::event::{
    ClickRecognizer, Event, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind,
};
pub use mullion_core::geometry::{Rect, Sides};

#[cfg(not(target_arch = "wasm32"))]
pub use mullion_core::event::map_crossterm_event;

// --- Render re-exports -----------------------------------------------------

pub use mullion_render::buffer::Buffer;
pub use mullion_render::cell::{Cell, CellAttrs, PackedRgba};

// --- Windowing re-exports --------------------------------------------------

pub use mullion_windows::{
    Alignment, BorderSet, BorderType, ButtonSide, Pane, SharedPane, Style, TextPane, Window,
    WindowButton, WindowEdge, WindowManager, share,
};

// --- Errors ----------------------------------------------------------------

/// Top-level error type for mullion embedders.
#[derive(Debug)]
pub enum Error {
    /// I/O failure during terminal operations.
    Io(std::io::Error),
    /// Terminal error with message.
    Terminal(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Terminal(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Standard result type for mullion APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude ---------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Buffer, Error, Event, MouseEvent, Pane, Rect, Result, Style, Window, WindowManager,
    };
}
