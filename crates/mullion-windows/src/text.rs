#![forbid(unsafe_code)]

//! A minimal text content pane.

use mullion_core::event::MouseEvent;
use mullion_core::geometry::Rect;
use mullion_render::buffer::Buffer;

use crate::{Pane, Style, draw_text_span};

/// Static lines of text, one per row, clipped to the pane's rectangle.
///
/// The simplest useful window content: it tracks focus, draws its lines,
/// and leaves pointer events unconsumed.
#[derive(Debug, Clone, Default)]
pub struct TextPane {
    rect: Rect,
    lines: Vec<String>,
    style: Style,
    focused: bool,
}

impl TextPane {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            lines: text.into().lines().map(str::to_owned).collect(),
            ..Self::default()
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.lines = text.into().lines().map(str::to_owned).collect();
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Pane for TextPane {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    fn render(&mut self, buf: &mut Buffer) {
        for (row, line) in self.lines.iter().enumerate() {
            let y = self.rect.y.saturating_add(row as u16);
            if y >= self.rect.bottom() {
                break;
            }
            draw_text_span(buf, self.rect.x, y, line, self.style, self.rect.right());
        }
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn has_focus(&self) -> bool {
        self.focused
    }

    fn on_mouse(&mut self, _event: &MouseEvent) -> bool {
        false
    }
}
