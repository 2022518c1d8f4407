//! The fixed 16-color terminal palette.
//!
//! Each entry pairs a [`PaletteColor`] with the RGB value used when matching
//! arbitrary colors against it, and with its SGR parameter. Foreground
//! parameters are 30–37 for the standard colors and 90–97 for the bright ones;
//! the background parameter is always the foreground parameter plus 10.
//!
//! The reference RGB values approximate what common terminals display. They
//! are tuned for matching, not taken from any particular terminal.
//!
//! Entry order matters: the color matcher scans the palette front to back, so
//! earlier entries win ties and early-accept checks.

/// One of the 16 indexed terminal colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PaletteColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

/// A palette color together with its matching reference and escape parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteEntry {
    pub id: PaletteColor,
    /// The RGB value arbitrary colors are compared against.
    pub reference: [u8; 3],
    /// The SGR parameter selecting this color as foreground.
    pub code: u8,
}

impl PaletteEntry {
    const fn new(id: PaletteColor, reference: [u8; 3]) -> Self {
        let index = id as u8;
        let code = if index < 8 { 30 + index } else { 90 + index - 8 };
        Self {
            id,
            reference,
            code,
        }
    }

    /// SGR parameter for this color as foreground.
    pub fn fg_code(&self) -> u8 {
        self.code
    }

    /// SGR parameter for this color as background.
    pub fn bg_code(&self) -> u8 {
        self.code + 10
    }
}

/// All palette entries in matching order: 8 standard colors, then 8 bright ones.
pub const PALETTE: [PaletteEntry; 16] = [
    PaletteEntry::new(PaletteColor::Black, [0, 0, 0]),
    PaletteEntry::new(PaletteColor::Red, [178, 0, 0]),
    PaletteEntry::new(PaletteColor::Green, [50, 184, 26]),
    PaletteEntry::new(PaletteColor::Yellow, [185, 183, 26]),
    PaletteEntry::new(PaletteColor::Blue, [0, 21, 182]),
    PaletteEntry::new(PaletteColor::Magenta, [177, 0, 182]),
    PaletteEntry::new(PaletteColor::Cyan, [47, 186, 184]),
    PaletteEntry::new(PaletteColor::White, [184, 184, 184]),
    PaletteEntry::new(PaletteColor::BrightBlack, [58, 58, 58]),
    PaletteEntry::new(PaletteColor::BrightRed, [247, 48, 58]),
    PaletteEntry::new(PaletteColor::BrightGreen, [89, 255, 68]),
    PaletteEntry::new(PaletteColor::BrightYellow, [255, 255, 67]),
    PaletteEntry::new(PaletteColor::BrightBlue, [85, 91, 253]),
    PaletteEntry::new(PaletteColor::BrightMagenta, [246, 55, 253]),
    PaletteEntry::new(PaletteColor::BrightCyan, [86, 255, 255]),
    PaletteEntry::new(PaletteColor::BrightWhite, [255, 255, 255]),
];

/// Returns every palette entry in matching order.
pub fn all() -> &'static [PaletteEntry; 16] {
    &PALETTE
}

/// Returns the entry for `id`.
pub fn lookup(id: PaletteColor) -> &'static PaletteEntry {
    &PALETTE[id as usize]
}

impl PaletteColor {
    /// The palette entry for this color.
    pub fn entry(self) -> &'static PaletteEntry {
        lookup(self)
    }

    /// The RGB reference value of this color.
    pub fn reference(self) -> [u8; 3] {
        self.entry().reference
    }

    pub fn fg_code(self) -> u8 {
        self.entry().fg_code()
    }

    pub fn bg_code(self) -> u8 {
        self.entry().bg_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_are_in_id_order() {
        for (i, entry) in all().iter().enumerate() {
            assert_eq!(entry.id as usize, i);
            assert_eq!(lookup(entry.id), entry);
        }
    }

    #[test]
    fn test_escape_parameters() {
        assert_eq!(PaletteColor::Black.fg_code(), 30);
        assert_eq!(PaletteColor::White.fg_code(), 37);
        assert_eq!(PaletteColor::BrightBlack.fg_code(), 90);
        assert_eq!(PaletteColor::BrightWhite.fg_code(), 97);

        for entry in all() {
            assert_eq!(entry.bg_code(), entry.fg_code() + 10);
        }
        // bright variants sit 60 above their standard counterparts
        for (standard, bright) in all()[..8].iter().zip(&all()[8..]) {
            assert_eq!(bright.code, standard.code + 60);
        }
    }

    #[test]
    fn test_reference_values() {
        assert_eq!(PaletteColor::Black.reference(), [0, 0, 0]);
        assert_eq!(PaletteColor::Red.reference(), [178, 0, 0]);
        assert_eq!(PaletteColor::BrightWhite.reference(), [255, 255, 255]);
    }
}
