//! Serializing cell grids into escape-coded text.
//!
//! The [`Emitter`] walks a grid of [`Cell`]s row by row and writes each glyph,
//! preceded by foreground/background escape codes only when they differ from
//! the previous cell on the same row. Escape codes make up most of the output,
//! so skipping repeats shrinks it considerably.
//!
//! Every row ends with a full style reset and a line feed, and the color state
//! starts out unset again on the next row. Rows can therefore be printed or
//! dropped independently.

use std::fmt;

use crossterm::Command;
use crossterm::style::{Attribute, SetAttribute};

use crate::rendering::cell::Cell;
use crate::rendering::color::StyledColor;
use crate::rendering::grid::Grid;

/// Separator written after the reset at the end of each row.
pub const LINE_SEPARATOR: &str = "\n";

/// Writes cell grids as text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Emitter {
    bias: u32,
}

impl Emitter {
    /// An emitter that skips a code only when it is exactly the previous one.
    pub fn new() -> Self {
        Self { bias: 0 }
    }

    /// An emitter that also skips true-color codes within `bias` (Euclidean
    /// RGB distance) of the previous one. A bias of `0` is exact comparison.
    pub fn with_bias(bias: u32) -> Self {
        Self { bias }
    }

    fn unchanged(
        &self,
        current: Option<StyledColor>,
        previous: Option<Option<StyledColor>>,
    ) -> bool {
        match (current, previous) {
            // first cell of the row
            (_, None) => false,
            (None, Some(None)) => true,
            (Some(a), Some(Some(b))) => a.close_to(b, self.bias),
            _ => false,
        }
    }

    /// Writes one row of cells, followed by a style reset and a line separator.
    pub fn emit_row(&self, row: &[Cell], out: &mut impl fmt::Write) -> fmt::Result {
        // outer None: nothing seen yet on this row; inner None: channel absent
        let mut prev_fg: Option<Option<StyledColor>> = None;
        let mut prev_bg: Option<Option<StyledColor>> = None;

        for cell in row {
            if !self.unchanged(cell.fg, prev_fg) {
                if let Some(fg) = cell.fg {
                    fg.write_fg(out)?;
                }
            }
            if !self.unchanged(cell.bg, prev_bg) {
                if let Some(bg) = cell.bg {
                    bg.write_bg(out)?;
                }
            }
            out.write_char(cell.glyph)?;

            prev_fg = Some(cell.fg);
            prev_bg = Some(cell.bg);
        }

        SetAttribute(Attribute::Reset).write_ansi(out)?;
        out.write_str(LINE_SEPARATOR)
    }

    /// Writes every row of `cells` from top to bottom.
    pub fn emit(&self, cells: &Grid<Cell>, out: &mut impl fmt::Write) -> fmt::Result {
        for row in cells.rows() {
            self.emit_row(row, out)?;
        }
        Ok(())
    }
}

/// Serializes `cells` with exact elision into a new string.
///
/// ```rust
/// use blockpix::rendering::cell::{Cell, FULL_BLOCK};
/// use blockpix::rendering::color::StyledColor;
/// use blockpix::rendering::emitter::emit;
/// use blockpix::rendering::grid::Grid;
/// use blockpix::rendering::palette::PaletteColor;
///
/// let red = Cell::new(FULL_BLOCK).with_fg(StyledColor::Indexed(PaletteColor::Red));
/// let cells = Grid::from_vec(2, 1, vec![red, red]).unwrap();
/// assert_eq!(emit(&cells), "\x1b[31m██\x1b[0m\n");
/// ```
pub fn emit(cells: &Grid<Cell>) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = Emitter::new().emit(cells, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::cell::{BLANK, FULL_BLOCK, LOWER_HALF_BLOCK, UPPER_HALF_BLOCK};
    use crate::rendering::palette::PaletteColor;

    const RESET: &str = "\x1b[0m";

    fn indexed(c: PaletteColor) -> StyledColor {
        StyledColor::Indexed(c)
    }

    fn emit_with(emitter: Emitter, width: usize, height: usize, cells: Vec<Cell>) -> String {
        let grid = Grid::from_vec(width, height, cells).unwrap();
        let mut out = String::new();
        emitter.emit(&grid, &mut out).unwrap();
        out
    }

    #[test]
    fn test_repeated_colors_are_elided() {
        let cell = Cell::new(UPPER_HALF_BLOCK)
            .with_fg(indexed(PaletteColor::Red))
            .with_bg(indexed(PaletteColor::Blue));
        let out = emit_with(Emitter::new(), 3, 1, vec![cell; 3]);
        assert_eq!(out, format!("\x1b[31m\x1b[44m▀▀▀{RESET}\n"));
    }

    #[test]
    fn test_only_changed_channel_is_emitted() {
        let red = indexed(PaletteColor::Red);
        let blue = indexed(PaletteColor::Blue);
        let green = indexed(PaletteColor::Green);
        let cells = vec![
            Cell::new(UPPER_HALF_BLOCK).with_fg(red).with_bg(blue),
            Cell::new(UPPER_HALF_BLOCK).with_fg(green).with_bg(blue),
            Cell::new(UPPER_HALF_BLOCK).with_fg(green).with_bg(red),
        ];
        let out = emit_with(Emitter::new(), 3, 1, cells);
        assert_eq!(out, format!("\x1b[31m\x1b[44m▀\x1b[32m▀\x1b[41m▀{RESET}\n"));
    }

    #[test]
    fn test_absent_channel_is_tracked() {
        let black = indexed(PaletteColor::Black);
        let red = indexed(PaletteColor::Red);
        let cells = vec![
            Cell::new(BLANK).with_bg(black),
            Cell::new(FULL_BLOCK).with_fg(red),
            Cell::new(BLANK).with_bg(black),
            Cell::new(LOWER_HALF_BLOCK).with_fg(red).with_bg(black),
        ];
        let out = emit_with(Emitter::new(), 4, 1, cells);
        // cell 3: bg goes from absent back to black, so it is re-emitted
        // cell 4: bg black was the previous value, only fg is new
        assert_eq!(
            out,
            format!("\x1b[40m \x1b[31m█\x1b[40m \x1b[31m▄{RESET}\n")
        );
    }

    #[test]
    fn test_state_resets_every_row() {
        let red = Cell::new(FULL_BLOCK).with_fg(indexed(PaletteColor::Red));
        let out = emit_with(Emitter::new(), 2, 2, vec![red; 4]);
        assert_eq!(out, format!("\x1b[31m██{RESET}\n\x1b[31m██{RESET}\n"));
        assert_eq!(out.split(LINE_SEPARATOR).filter(|l| !l.is_empty()).count(), 2);
    }

    #[test]
    fn test_true_color_bias() {
        let a = Cell::new(FULL_BLOCK).with_fg(StyledColor::TrueColor([100, 100, 100]));
        let b = Cell::new(FULL_BLOCK).with_fg(StyledColor::TrueColor([102, 101, 100]));
        let c = Cell::new(FULL_BLOCK).with_fg(StyledColor::TrueColor([140, 100, 100]));

        let exact = emit_with(Emitter::new(), 3, 1, vec![a, b, c]);
        assert_eq!(
            exact,
            format!(
                "\x1b[38;2;100;100;100m█\x1b[38;2;102;101;100m█\x1b[38;2;140;100;100m█{RESET}\n"
            )
        );

        let biased = emit_with(Emitter::with_bias(10), 3, 1, vec![a, b, c]);
        assert_eq!(
            biased,
            format!("\x1b[38;2;100;100;100m██\x1b[38;2;140;100;100m█{RESET}\n")
        );
    }

    #[test]
    fn test_emit_convenience_matches_emitter() {
        let cells = vec![
            Cell::new(UPPER_HALF_BLOCK)
                .with_fg(indexed(PaletteColor::Yellow))
                .with_bg(indexed(PaletteColor::Cyan));
            6
        ];
        let grid = Grid::from_vec(3, 2, cells).unwrap();
        let mut out = String::new();
        Emitter::new().emit(&grid, &mut out).unwrap();
        assert_eq!(emit(&grid), out);
    }
}
