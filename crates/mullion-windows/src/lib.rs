#![forbid(unsafe_code)]

//! Overlapping, draggable, z-ordered windows for character-grid displays.
//!
//! [`WindowManager`] owns a z-ordered stack of [`Window`]s inside a fixed
//! viewport, turns pointer input into drag/resize/raise/focus operations,
//! and clamps every window's geometry to the viewport on each render pass.
//! Both types implement [`Pane`], the content-node contract, so a manager
//! can itself be hosted as a window's content.

pub mod borders;
pub mod button;
pub mod manager;
pub mod style;
pub mod text;
pub mod window;

pub use borders::{BorderSet, BorderType};
pub use button::{ButtonSide, WindowButton};
pub use manager::{WindowEdge, WindowManager};
pub use style::Style;
pub use text::TextPane;
pub use window::Window;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mullion_core::event::MouseEvent;
use mullion_core::geometry::Rect;
use mullion_render::buffer::Buffer;
use mullion_render::cell::Cell;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// The content-node contract.
///
/// A pane can be positioned into a rectangle, drawn into a clipped surface
/// region, given and asked about focus, and offered pointer events.
/// [`Window`] hosts one pane as its content; [`WindowManager`] implements the
/// trait itself so managers nest.
pub trait Pane {
    /// The pane's current rectangle.
    fn rect(&self) -> Rect;

    /// Position the pane into a rectangle.
    fn set_rect(&mut self, rect: Rect);

    /// Draw into the surface. Callers clip the surface to the pane's
    /// rectangle before the call.
    fn render(&mut self, buf: &mut Buffer);

    /// Receive focus.
    fn focus(&mut self);

    /// Give up focus.
    fn blur(&mut self);

    /// Whether the pane currently holds focus.
    fn has_focus(&self) -> bool;

    /// Offer a pointer event. Returns `true` when the event was consumed.
    fn on_mouse(&mut self, event: &MouseEvent) -> bool;
}

/// A shareable, lock-protected pane handle.
///
/// Content is shared this way so the embedder can keep a handle to a hosted
/// pane (and look its window up again via
/// [`WindowManager::find_pane`](manager::WindowManager::find_pane)) while the
/// window owns the hosting slot.
pub type SharedPane = Arc<Mutex<dyn Pane + Send>>;

/// Wrap a pane for hosting in a window.
pub fn share<P: Pane + Send + 'static>(pane: P) -> SharedPane {
    Arc::new(Mutex::new(pane))
}

/// Horizontal alignment for window titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Lock a mutex, ignoring poisoning.
///
/// A poisoned lock means a panic already unwound through a holder; the
/// guarded window/manager state stays structurally valid, so rendering and
/// input keep working.
pub(crate) fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Apply a style's set fields to a cell.
pub(crate) fn apply_style(cell: &mut Cell, style: Style) {
    if let Some(fg) = style.fg {
        cell.fg = fg;
    }
    if let Some(bg) = style.bg {
        cell.bg = bg;
    }
    if let Some(attrs) = style.attrs {
        cell.attrs = attrs;
    }
}

/// Draw a text span, stopping at `max_x` (exclusive).
///
/// Returns the x position after the last drawn grapheme. A wide grapheme
/// that does not fit is not drawn.
pub(crate) fn draw_text_span(
    buf: &mut Buffer,
    mut x: u16,
    y: u16,
    content: &str,
    style: Style,
    max_x: u16,
) -> u16 {
    for grapheme in content.graphemes(true) {
        if x >= max_x {
            break;
        }
        let w = UnicodeWidthStr::width(grapheme) as u16;
        if w == 0 {
            continue;
        }
        if x.saturating_add(w) > max_x {
            break;
        }
        if let Some(c) = grapheme.chars().next() {
            let mut cell = Cell::from_char(c);
            apply_style(&mut cell, style);
            buf.set(x, y, cell);
        }
        x = x.saturating_add(w);
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use mullion_render::cell::PackedRgba;

    #[test]
    fn apply_style_only_touches_set_fields() {
        let mut cell = Cell::from_char('Z').with_fg(PackedRgba::rgb(1, 2, 3));
        apply_style(&mut cell, Style::new().bg(PackedRgba::rgb(9, 9, 9)));
        assert_eq!(cell.fg, PackedRgba::rgb(1, 2, 3));
        assert_eq!(cell.bg, PackedRgba::rgb(9, 9, 9));
        assert_eq!(cell.ch, 'Z');
    }

    #[test]
    fn draw_text_span_stops_at_max_x() {
        let mut buf = Buffer::new(10, 1);
        let end = draw_text_span(&mut buf, 0, 0, "ABCDEF", Style::default(), 3);
        assert_eq!(end, 3);
        assert_eq!(buf.char_at(2, 0), 'C');
        assert_eq!(buf.char_at(3, 0), ' ');
    }

    #[test]
    fn draw_text_span_skips_wide_grapheme_that_does_not_fit() {
        let mut buf = Buffer::new(10, 1);
        let end = draw_text_span(&mut buf, 0, 0, "a世", Style::default(), 2);
        assert_eq!(end, 1);
        assert_eq!(buf.char_at(0, 0), 'a');
        assert_eq!(buf.char_at(1, 0), ' ');
    }
}
