#![forbid(unsafe_code)]

//! Border glyph sets and chrome drawing.

use crate::{Style, apply_style};
use mullion_core::geometry::Rect;
use mullion_render::buffer::Buffer;
use mullion_render::cell::Cell;

/// Which glyph family a border is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderType {
    /// Single-line box drawing.
    #[default]
    Square,
    /// Single-line with rounded corners.
    Rounded,
    /// Double-line box drawing; used for focused chrome.
    Double,
    /// Plain ASCII fallback.
    Ascii,
}

impl BorderType {
    pub const fn to_border_set(self) -> BorderSet {
        match self {
            Self::Square => BorderSet::SQUARE,
            Self::Rounded => BorderSet::ROUNDED,
            Self::Double => BorderSet::DOUBLE,
            Self::Ascii => BorderSet::ASCII,
        }
    }
}

/// The six glyphs that make up a rectangular border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderSet {
    pub horizontal: char,
    pub vertical: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
}

impl BorderSet {
    pub const SQUARE: Self = Self {
        horizontal: '─',
        vertical: '│',
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
    };

    pub const ROUNDED: Self = Self {
        horizontal: '─',
        vertical: '│',
        top_left: '╭',
        top_right: '╮',
        bottom_left: '╰',
        bottom_right: '╯',
    };

    pub const DOUBLE: Self = Self {
        horizontal: '═',
        vertical: '║',
        top_left: '╔',
        top_right: '╗',
        bottom_left: '╚',
        bottom_right: '╝',
    };

    pub const ASCII: Self = Self {
        horizontal: '-',
        vertical: '|',
        top_left: '+',
        top_right: '+',
        bottom_left: '+',
        bottom_right: '+',
    };
}

/// Draw a full rectangular border along the edges of `area`.
pub(crate) fn draw_border(buf: &mut Buffer, area: Rect, set: BorderSet, style: Style) {
    if area.is_empty() {
        return;
    }

    let cell = |c: char| {
        let mut cell = Cell::from_char(c);
        apply_style(&mut cell, style);
        cell
    };

    let right = area.right() - 1;
    let bottom = area.bottom() - 1;

    for x in area.x..area.right() {
        buf.set(x, area.y, cell(set.horizontal));
        buf.set(x, bottom, cell(set.horizontal));
    }
    for y in area.y..area.bottom() {
        buf.set(area.x, y, cell(set.vertical));
        buf.set(right, y, cell(set.vertical));
    }

    // Corners overwrite the edge glyphs.
    buf.set(area.x, area.y, cell(set.top_left));
    buf.set(right, area.y, cell(set.top_right));
    buf.set(area.x, bottom, cell(set.bottom_left));
    buf.set(right, bottom, cell(set.bottom_right));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_corners_and_edges() {
        let mut buf = Buffer::new(10, 6);
        draw_border(&mut buf, Rect::new(1, 1, 5, 4), BorderSet::SQUARE, Style::default());
        assert_eq!(buf.char_at(1, 1), '┌');
        assert_eq!(buf.char_at(5, 1), '┐');
        assert_eq!(buf.char_at(1, 4), '└');
        assert_eq!(buf.char_at(5, 4), '┘');
        assert_eq!(buf.char_at(3, 1), '─');
        assert_eq!(buf.char_at(1, 2), '│');
        // Interior untouched.
        assert_eq!(buf.char_at(3, 2), ' ');
    }

    #[test]
    fn border_on_empty_area_is_a_noop() {
        let mut buf = Buffer::new(4, 4);
        draw_border(&mut buf, Rect::new(0, 0, 0, 3), BorderSet::DOUBLE, Style::default());
        assert_eq!(buf.char_at(0, 0), ' ');
    }

    #[test]
    fn focused_set_is_double_line() {
        let set = BorderType::Double.to_border_set();
        assert_eq!(set.top_left, '╔');
        assert_eq!(BorderType::Rounded.to_border_set().top_left, '╭');
        assert_eq!(BorderType::Ascii.to_border_set().vertical, '|');
    }
}
