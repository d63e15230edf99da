#![forbid(unsafe_code)]

//! Styling for window chrome and content.

use mullion_render::cell::{CellAttrs, PackedRgba};

/// A set of optional cell overrides.
///
/// Unset fields leave the target cell's value alone, so styles layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<PackedRgba>,
    pub bg: Option<PackedRgba>,
    pub attrs: Option<CellAttrs>,
}

impl Style {
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: None,
        }
    }

    #[must_use]
    pub const fn fg(mut self, fg: PackedRgba) -> Self {
        self.fg = Some(fg);
        self
    }

    #[must_use]
    pub const fn bg(mut self, bg: PackedRgba) -> Self {
        self.bg = Some(bg);
        self
    }

    #[must_use]
    pub const fn attrs(mut self, attrs: CellAttrs) -> Self {
        self.attrs = Some(attrs);
        self
    }

    /// Whether every field is unset.
    pub const fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_none()
    }
}
