#![forbid(unsafe_code)]

//! Cell and color types.

use bitflags::bitflags;
use unicode_width::UnicodeWidthChar;

/// A packed RGBA color, one byte per channel.
///
/// Alpha 0 is fully transparent; a transparent background leaves whatever is
/// already in the cell visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    pub const TRANSPARENT: Self = Self(0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Fully opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | a as u32)
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    pub const fn is_transparent(self) -> bool {
        self.a() == 0
    }

    /// Source-over composite of `self` onto `dst`.
    pub fn over(self, dst: PackedRgba) -> PackedRgba {
        match self.a() {
            255 => self,
            0 => dst,
            a => {
                let blend = |s: u8, d: u8| -> u8 {
                    let s = s as u32 * a as u32;
                    let d = d as u32 * (255 - a as u32);
                    ((s + d) / 255) as u8
                };
                PackedRgba::rgba(
                    blend(self.r(), dst.r()),
                    blend(self.g(), dst.g()),
                    blend(self.b(), dst.b()),
                    255u8.min(a.saturating_add(dst.a())),
                )
            }
        }
    }
}

bitflags! {
    /// Text attribute flags carried by a cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CellAttrs: u8 {
        const BOLD      = 0b0000_0001;
        const DIM       = 0b0000_0010;
        const ITALIC    = 0b0000_0100;
        const UNDERLINE = 0b0000_1000;
        const REVERSE   = 0b0001_0000;
    }
}

/// One cell of the grid: a glyph plus its colors and attributes.
///
/// A glyph wider than one column occupies its head cell plus
/// [`Cell::CONTINUATION`] marker cells; the continuation marker is the NUL
/// glyph and never reaches a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: PackedRgba,
    pub bg: PackedRgba,
    pub attrs: CellAttrs,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: PackedRgba::WHITE,
            bg: PackedRgba::TRANSPARENT,
            attrs: CellAttrs::empty(),
        }
    }
}

impl Cell {
    /// Marker occupying the trailing columns of a wide glyph.
    pub const CONTINUATION: Self = Self {
        ch: '\0',
        fg: PackedRgba::TRANSPARENT,
        bg: PackedRgba::TRANSPARENT,
        attrs: CellAttrs::empty(),
    };

    /// A default-styled cell holding `c`.
    pub fn from_char(c: char) -> Self {
        Self {
            ch: c,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_fg(mut self, fg: PackedRgba) -> Self {
        self.fg = fg;
        self
    }

    #[must_use]
    pub fn with_bg(mut self, bg: PackedRgba) -> Self {
        self.bg = bg;
        self
    }

    #[must_use]
    pub fn with_attrs(mut self, attrs: CellAttrs) -> Self {
        self.attrs = attrs;
        self
    }

    pub const fn is_continuation(&self) -> bool {
        self.ch == '\0'
    }

    /// Display width of the glyph in columns (0 for the continuation marker).
    pub fn width(&self) -> usize {
        self.ch.width().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_channel_roundtrip() {
        let c = PackedRgba::rgba(1, 2, 3, 4);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (1, 2, 3, 4));
    }

    #[test]
    fn rgb_is_opaque() {
        assert_eq!(PackedRgba::rgb(10, 20, 30).a(), 255);
        assert!(!PackedRgba::rgb(0, 0, 0).is_transparent());
        assert!(PackedRgba::TRANSPARENT.is_transparent());
    }

    #[test]
    fn over_opaque_replaces() {
        let src = PackedRgba::rgb(255, 0, 0);
        let dst = PackedRgba::rgb(0, 255, 0);
        assert_eq!(src.over(dst), src);
    }

    #[test]
    fn over_transparent_keeps_dst() {
        let dst = PackedRgba::rgb(0, 255, 0);
        assert_eq!(PackedRgba::TRANSPARENT.over(dst), dst);
    }

    #[test]
    fn over_partial_blends() {
        let src = PackedRgba::rgba(255, 0, 0, 128);
        let dst = PackedRgba::rgb(0, 0, 0);
        let out = src.over(dst);
        assert!(out.r() > 100 && out.r() < 160);
        assert_eq!(out.a(), 255);
    }

    #[test]
    fn default_cell_is_blank() {
        let cell = Cell::default();
        assert_eq!(cell.ch, ' ');
        assert!(cell.bg.is_transparent());
        assert!(!cell.is_continuation());
    }

    #[test]
    fn widths() {
        assert_eq!(Cell::from_char('x').width(), 1);
        assert_eq!(Cell::from_char('世').width(), 2);
        assert_eq!(Cell::CONTINUATION.width(), 0);
        assert!(Cell::CONTINUATION.is_continuation());
    }
}
