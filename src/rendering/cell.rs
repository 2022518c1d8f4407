//! Terminal cells and half-block compositing.
//!
//! A terminal character is roughly twice as tall as it is wide, so one cell
//! shows two vertically stacked pixels: the glyph is drawn in the foreground
//! color, the rest of the cell in the background color. [`compose`] picks the
//! glyph and colors for one such pixel pair.

use crate::rendering::color::StyledColor;
use crate::rendering::matcher::ColorMatcher;

/// Full block, `█`.
pub const FULL_BLOCK: char = '\u{2588}';
/// Upper half block, `▀`.
pub const UPPER_HALF_BLOCK: char = '\u{2580}';
/// Lower half block, `▄`.
pub const LOWER_HALF_BLOCK: char = '\u{2584}';
/// Blank cell.
pub const BLANK: char = ' ';

/// One character position of the output.
///
/// A channel set to `None` emits no escape code; the terminal keeps whatever
/// color it currently has for it.
///
/// # Example
///
/// ```rust
/// use blockpix::rendering::cell::{Cell, UPPER_HALF_BLOCK};
/// use blockpix::rendering::color::StyledColor;
/// use blockpix::rendering::palette::PaletteColor;
///
/// let cell = Cell::new(UPPER_HALF_BLOCK)
///     .with_fg(StyledColor::Indexed(PaletteColor::Red))
///     .with_bg(StyledColor::TrueColor([0, 0, 40]));
/// assert_eq!(cell.fg, Some(StyledColor::Indexed(PaletteColor::Red)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    /// The foreground color, applied to the glyph.
    pub fg: Option<StyledColor>,
    /// The background color, applied to the rest of the cell.
    pub bg: Option<StyledColor>,
    /// The character to print.
    pub glyph: char,
}

impl Cell {
    /// Creates an uncolored cell showing `glyph`.
    pub fn new(glyph: char) -> Self {
        Self {
            fg: None,
            bg: None,
            glyph,
        }
    }

    /// Returns the same cell with foreground `color`.
    pub fn with_fg(self, color: StyledColor) -> Self {
        Self {
            fg: Some(color),
            ..self
        }
    }

    /// Returns the same cell with background `color`.
    pub fn with_bg(self, color: StyledColor) -> Self {
        Self {
            bg: Some(color),
            ..self
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(BLANK)
    }
}

/// Composes the cell showing `top` above `bottom`.
///
/// *   Equal colors give a blank cell with a black background if the color is
///     black, and a full block in that color otherwise.
/// *   Different colors give an upper half block (`top` on `bottom`), unless
///     `top` is black or `bottom` is bright white. Then the cell is flipped to
///     a lower half block with `bottom` as foreground and `top` as background,
///     so that bright white never ends up as the background next to a black
///     half.
pub fn compose(top: StyledColor, bottom: StyledColor) -> Cell {
    if top == bottom {
        if top.is_black() {
            return Cell::new(BLANK).with_bg(top);
        }
        return Cell::new(FULL_BLOCK).with_fg(top);
    }

    if top.is_black() || bottom.is_bright_white() {
        Cell::new(LOWER_HALF_BLOCK).with_fg(bottom).with_bg(top)
    } else {
        Cell::new(UPPER_HALF_BLOCK).with_fg(top).with_bg(bottom)
    }
}

/// Resolves a pixel pair with `matcher` and composes the resulting cell.
#[inline]
pub fn compose_pixels(top: [u8; 3], bottom: [u8; 3], matcher: &ColorMatcher) -> Cell {
    compose(matcher.resolve(top), matcher.resolve(bottom))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::color::ColorMode;
    use crate::rendering::matcher::MatchStrategy;
    use crate::rendering::palette::PaletteColor;

    fn indexed(c: PaletteColor) -> StyledColor {
        StyledColor::Indexed(c)
    }

    #[test]
    fn test_equal_black_is_blank_with_background() {
        let black = indexed(PaletteColor::Black);
        assert_eq!(
            compose(black, black),
            Cell {
                fg: None,
                bg: Some(black),
                glyph: BLANK
            }
        );

        let rgb_black = StyledColor::TrueColor([0, 0, 0]);
        assert_eq!(compose(rgb_black, rgb_black), Cell::new(BLANK).with_bg(rgb_black));
    }

    #[test]
    fn test_equal_non_black_is_full_block() {
        for entry in crate::rendering::palette::all().iter().skip(1) {
            let c = indexed(entry.id);
            assert_eq!(
                compose(c, c),
                Cell {
                    fg: Some(c),
                    bg: None,
                    glyph: FULL_BLOCK
                }
            );
        }
        let grey = StyledColor::TrueColor([1, 1, 1]);
        assert_eq!(compose(grey, grey), Cell::new(FULL_BLOCK).with_fg(grey));
    }

    #[test]
    fn test_default_orientation() {
        let red = indexed(PaletteColor::Red);
        let blue = indexed(PaletteColor::Blue);
        assert_eq!(
            compose(red, blue),
            Cell::new(UPPER_HALF_BLOCK).with_fg(red).with_bg(blue)
        );

        let white = StyledColor::TrueColor([255, 255, 255]);
        let black = StyledColor::TrueColor([0, 0, 0]);
        assert_eq!(
            compose(white, black),
            Cell::new(UPPER_HALF_BLOCK).with_fg(white).with_bg(black)
        );
    }

    #[test]
    fn test_flipped_orientation() {
        let black = indexed(PaletteColor::Black);
        let red = indexed(PaletteColor::Red);
        let bright_white = indexed(PaletteColor::BrightWhite);

        // black on top
        assert_eq!(
            compose(black, red),
            Cell::new(LOWER_HALF_BLOCK).with_fg(red).with_bg(black)
        );
        // bright white at the bottom
        assert_eq!(
            compose(red, bright_white),
            Cell::new(LOWER_HALF_BLOCK).with_fg(bright_white).with_bg(red)
        );
        // plain white at the bottom keeps the default orientation
        let white = indexed(PaletteColor::White);
        assert_eq!(
            compose(red, white),
            Cell::new(UPPER_HALF_BLOCK).with_fg(red).with_bg(white)
        );
    }

    #[test]
    fn test_compose_pixels_uses_mode_equality() {
        // two slightly different reds snap to the same palette entry...
        let indexed = ColorMatcher::new(ColorMode::Indexed, MatchStrategy::Strict);
        assert_eq!(
            compose_pixels([178, 0, 0], [180, 2, 0], &indexed),
            Cell::new(FULL_BLOCK).with_fg(StyledColor::Indexed(PaletteColor::Red))
        );
        // ...but stay distinct in true color
        let truecolor = ColorMatcher::new(ColorMode::TrueColor, MatchStrategy::Strict);
        assert_eq!(
            compose_pixels([178, 0, 0], [180, 2, 0], &truecolor).glyph,
            UPPER_HALF_BLOCK
        );
    }
}
