#![forbid(unsafe_code)]

//! Title-bar buttons.

use std::fmt;
use std::sync::Arc;

/// Which end of the title bar a button sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonSide {
    #[default]
    Left,
    Right,
}

/// A clickable glyph on a window's title bar.
///
/// Buttons have no lifecycle of their own: the window recomputes every
/// button's horizontal offset in one pass whenever the button set changes.
/// A non-negative offset counts from the window's left edge, a negative one
/// from its right edge.
#[derive(Clone)]
pub struct WindowButton {
    symbol: char,
    side: ButtonSide,
    offset: i16,
    on_click: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl WindowButton {
    pub fn new(symbol: char, side: ButtonSide) -> Self {
        Self {
            symbol,
            side,
            offset: 0,
            on_click: None,
        }
    }

    /// Attach a click callback.
    ///
    /// The callback is invoked outside the window's internal lock, so it may
    /// freely call back into the window or its manager.
    #[must_use]
    pub fn on_click(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_click = Some(Arc::new(handler));
        self
    }

    pub const fn symbol(&self) -> char {
        self.symbol
    }

    pub const fn side(&self) -> ButtonSide {
        self.side
    }

    /// Signed horizontal offset, assigned by the owning window.
    pub const fn offset(&self) -> i16 {
        self.offset
    }

    pub(crate) fn handler(&self) -> Option<Arc<dyn Fn() + Send + Sync>> {
        self.on_click.clone()
    }
}

impl fmt::Debug for WindowButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowButton")
            .field("symbol", &self.symbol)
            .field("side", &self.side)
            .field("offset", &self.offset)
            .field("on_click", &self.on_click.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Reassign every button's offset in insertion order.
///
/// Left-aligned buttons take offsets 2, 5, 8, …; right-aligned buttons take
/// −3, −6, −9, …. Recomputing the whole set keeps offsets consistent no
/// matter how the two alignments interleave.
pub(crate) fn layout_buttons(buttons: &mut [WindowButton]) {
    let mut offset_left: i16 = 2;
    let mut offset_right: i16 = -3;
    for button in buttons {
        match button.side {
            ButtonSide::Left => {
                button.offset = offset_left;
                offset_left += 3;
            }
            ButtonSide::Right => {
                button.offset = offset_right;
                offset_right -= 3;
            }
        }
    }
}
