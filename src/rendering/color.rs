//! Color modes and styled colors.
//!
//! A [`StyledColor`] is a color that has already been resolved for a
//! [`ColorMode`]: either a palette entry or an exact RGB triple. Equality on
//! `StyledColor` is the comparison the compositor and the emitter rely on,
//! palette identity for indexed colors and exact RGB for true colors.

use std::fmt;

use crossterm::Command;
use crossterm::style::{Color, SetBackgroundColor, SetForegroundColor};
use serde::{Deserialize, Serialize};

use crate::rendering::palette::PaletteColor;
use crate::util;

/// Selects how source colors are turned into escape codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Snap every color to the nearest of the 16 palette colors.
    #[default]
    Indexed,
    /// Pass 24-bit RGB through unchanged. Not every terminal supports this.
    #[serde(alias = "rgb")]
    TrueColor,
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorMode::Indexed => f.write_str("indexed"),
            ColorMode::TrueColor => f.write_str("truecolor"),
        }
    }
}

/// A color resolved for output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyledColor {
    /// One of the 16 palette colors.
    Indexed(PaletteColor),
    /// An exact 24-bit color.
    TrueColor([u8; 3]),
}

impl StyledColor {
    /// Whether this is the palette's black, or RGB `(0, 0, 0)`.
    pub fn is_black(self) -> bool {
        match self {
            StyledColor::Indexed(c) => c == PaletteColor::Black,
            StyledColor::TrueColor(rgb) => rgb == PaletteColor::Black.reference(),
        }
    }

    /// Whether this is the palette's bright white, or RGB `(255, 255, 255)`.
    pub fn is_bright_white(self) -> bool {
        match self {
            StyledColor::Indexed(c) => c == PaletteColor::BrightWhite,
            StyledColor::TrueColor(rgb) => rgb == PaletteColor::BrightWhite.reference(),
        }
    }

    /// Whether `self` and `other` should be considered the same color when
    /// deciding if an escape code can be skipped.
    ///
    /// True colors within `bias` of each other (Euclidean RGB distance) count
    /// as equal. Palette colors always compare exactly.
    pub fn close_to(self, other: StyledColor, bias: u32) -> bool {
        match (self, other) {
            (StyledColor::TrueColor(a), StyledColor::TrueColor(b)) if bias > 0 => {
                util::distance_squared(a, b) <= bias.saturating_mul(bias)
            }
            _ => self == other,
        }
    }

    /// Writes the escape code selecting this color as foreground.
    pub fn write_fg(self, f: &mut impl fmt::Write) -> fmt::Result {
        match self {
            StyledColor::Indexed(c) => write!(f, "\x1b[{}m", c.fg_code()),
            StyledColor::TrueColor([r, g, b]) => {
                SetForegroundColor(Color::Rgb { r, g, b }).write_ansi(f)
            }
        }
    }

    /// Writes the escape code selecting this color as background.
    pub fn write_bg(self, f: &mut impl fmt::Write) -> fmt::Result {
        match self {
            StyledColor::Indexed(c) => write!(f, "\x1b[{}m", c.bg_code()),
            StyledColor::TrueColor([r, g, b]) => {
                SetBackgroundColor(Color::Rgb { r, g, b }).write_ansi(f)
            }
        }
    }

    /// The foreground escape code as a string.
    pub fn fg(self) -> String {
        let mut s = String::new();
        // writing into a String cannot fail
        let _ = self.write_fg(&mut s);
        s
    }

    /// The background escape code as a string.
    pub fn bg(self) -> String {
        let mut s = String::new();
        let _ = self.write_bg(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexed_codes() {
        let red = StyledColor::Indexed(PaletteColor::Red);
        assert_eq!(red.fg(), "\x1b[31m");
        assert_eq!(red.bg(), "\x1b[41m");

        let bright_white = StyledColor::Indexed(PaletteColor::BrightWhite);
        assert_eq!(bright_white.fg(), "\x1b[97m");
        assert_eq!(bright_white.bg(), "\x1b[107m");
    }

    #[test]
    fn test_true_color_codes() {
        let c = StyledColor::TrueColor([1, 22, 255]);
        assert_eq!(c.fg(), "\x1b[38;2;1;22;255m");
        assert_eq!(c.bg(), "\x1b[48;2;1;22;255m");
    }

    #[test]
    fn test_black_and_bright_white() {
        assert!(StyledColor::Indexed(PaletteColor::Black).is_black());
        assert!(StyledColor::TrueColor([0, 0, 0]).is_black());
        assert!(!StyledColor::TrueColor([0, 0, 1]).is_black());
        assert!(!StyledColor::Indexed(PaletteColor::BrightBlack).is_black());

        assert!(StyledColor::Indexed(PaletteColor::BrightWhite).is_bright_white());
        assert!(StyledColor::TrueColor([255, 255, 255]).is_bright_white());
        assert!(!StyledColor::Indexed(PaletteColor::White).is_bright_white());
    }

    #[test]
    fn test_close_to() {
        let a = StyledColor::TrueColor([100, 100, 100]);
        let b = StyledColor::TrueColor([103, 104, 100]);
        assert!(!a.close_to(b, 0));
        assert!(a.close_to(b, 5));
        assert!(!a.close_to(b, 4));

        // palette colors ignore the bias
        let red = StyledColor::Indexed(PaletteColor::Red);
        let bright_red = StyledColor::Indexed(PaletteColor::BrightRed);
        assert!(!red.close_to(bright_red, 1000));
        assert!(red.close_to(red, 0));
    }

    #[test]
    fn test_color_mode_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: ColorMode,
        }
        let w: Wrapper = toml::from_str("mode = \"truecolor\"").unwrap();
        assert_eq!(w.mode, ColorMode::TrueColor);
        let w: Wrapper = toml::from_str("mode = \"rgb\"").unwrap();
        assert_eq!(w.mode, ColorMode::TrueColor);
        let w: Wrapper = toml::from_str("mode = \"indexed\"").unwrap();
        assert_eq!(w.mode, ColorMode::Indexed);
        assert_eq!(ColorMode::TrueColor.to_string(), "truecolor");
    }
}
