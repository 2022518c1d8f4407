//! Mapping arbitrary RGB colors onto [`StyledColor`]s.
//!
//! In indexed mode colors are snapped to the palette with [`nearest`]. In
//! true-color mode they pass through unchanged with [`true_color`].
//!
//! # Early accept
//!
//! [`nearest`] scans the palette in order and returns the *first* entry whose
//! distance is strictly below `threshold`, without looking at the rest. With
//! `threshold > 0` the result is therefore not guaranteed to be the nearest
//! palette color, only a close one. Existing output depends on this, so it is
//! kept as is. Pass a threshold of `0` (or use [`MatchStrategy::Strict`]) for
//! an exact nearest-color search.

use crate::rendering::color::{ColorMode, StyledColor};
use crate::rendering::palette::{self, PaletteColor};
use crate::util;

/// Returns the palette color for `color`, accepting early below `threshold`.
///
/// Distances are Euclidean in RGB space. A `threshold <= 0` disables the early
/// accept and always yields the nearest entry; ties go to the entry that comes
/// first in the palette.
///
/// ```rust
/// use blockpix::rendering::matcher::nearest;
/// use blockpix::rendering::palette::PaletteColor;
///
/// assert_eq!(nearest([178, 0, 0], 5), PaletteColor::Red);
/// assert_eq!(nearest([250, 250, 250], 0), PaletteColor::BrightWhite);
/// ```
pub fn nearest(color: [u8; 3], threshold: i32) -> PaletteColor {
    // compare squared distances: d < t <=> d^2 < t^2 for non-negative t
    let accept_below = if threshold > 0 {
        Some((threshold as u32).saturating_mul(threshold as u32))
    } else {
        None
    };

    let mut closest = PaletteColor::Black;
    let mut closest_dist = u32::MAX;
    for entry in palette::all() {
        let dist = util::distance_squared(entry.reference, color);
        if accept_below.is_some_and(|limit| dist < limit) {
            return entry.id;
        }
        if dist < closest_dist {
            closest_dist = dist;
            closest = entry.id;
        }
    }
    closest
}

/// Returns the palette color nearest to `color`, scanning the whole palette.
pub fn nearest_strict(color: [u8; 3]) -> PaletteColor {
    nearest(color, 0)
}

/// Passes `color` through as an exact 24-bit color.
pub fn true_color(color: [u8; 3]) -> StyledColor {
    StyledColor::TrueColor(color)
}

/// How indexed colors are searched for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Accept the first palette entry closer than the given distance.
    EarlyAccept(i32),
    /// Always search the whole palette.
    Strict,
}

impl MatchStrategy {
    /// Builds a strategy from a plain threshold, `<= 0` meaning strict.
    pub fn from_threshold(threshold: i32) -> Self {
        if threshold > 0 {
            MatchStrategy::EarlyAccept(threshold)
        } else {
            MatchStrategy::Strict
        }
    }

    pub fn threshold(self) -> i32 {
        match self {
            MatchStrategy::EarlyAccept(threshold) => threshold,
            MatchStrategy::Strict => 0,
        }
    }
}

/// Resolves source colors for one [`ColorMode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorMatcher {
    mode: ColorMode,
    strategy: MatchStrategy,
}

impl ColorMatcher {
    pub fn new(mode: ColorMode, strategy: MatchStrategy) -> Self {
        Self { mode, strategy }
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    /// Resolves `color` according to the active mode.
    #[inline]
    pub fn resolve(&self, color: [u8; 3]) -> StyledColor {
        match self.mode {
            ColorMode::Indexed => StyledColor::Indexed(nearest(color, self.strategy.threshold())),
            ColorMode::TrueColor => true_color(color),
        }
    }
}
