//! Custom 5x8 glyphs for the CGRAM slots
//!
//! The HD44780 character generator RAM holds eight user glyphs. Each glyph is
//! eight bytes, one per pixel row, using the low five bits: bit 4 is the
//! leftmost column, bit 0 the rightmost. Once uploaded, a glyph is displayed
//! by writing its slot number (0-7) as an ordinary character code.
//!
//! ## Example
//!
//! ```
//! use hd44780_pcf8574::Glyph;
//!
//! let heart = Glyph::from_art(
//!     ".....\n\
//!      .*.*.\n\
//!      *****\n\
//!      *****\n\
//!      .***.\n\
//!      ..*..\n\
//!      .....\n\
//!      .....",
//! );
//! assert_eq!(heart.rows(), &[0x00, 0x0A, 0x1F, 0x1F, 0x0E, 0x04, 0x00, 0x00]);
//! ```

use crate::command::SET_CGRAM_ADDRESS;

/// Glyph width in pixels
pub const GLYPH_WIDTH: u8 = 5;

/// Glyph height in pixels
pub const GLYPH_HEIGHT: u8 = 8;

/// Number of CGRAM slots
pub const GLYPH_SLOTS: u8 = 8;

/// Bits of a row byte that hold pixels
const ROW_MASK: u8 = 0x1F;

/// A CGRAM slot index, 0 to 7
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphSlot(u8);

impl GlyphSlot {
    /// Create a slot, or `None` if `slot` is not below [`GLYPH_SLOTS`]
    pub const fn new(slot: u8) -> Option<Self> {
        if slot < GLYPH_SLOTS {
            Some(Self(slot))
        } else {
            None
        }
    }

    /// Character code that displays this slot's glyph
    pub fn code(self) -> u8 {
        self.0
    }

    /// Set-CGRAM-address instruction selecting the first row of this slot
    pub fn cgram_address(self) -> u8 {
        SET_CGRAM_ADDRESS | (self.0 << 3)
    }
}

impl TryFrom<u8> for GlyphSlot {
    type Error = u8;

    fn try_from(slot: u8) -> Result<Self, Self::Error> {
        Self::new(slot).ok_or(slot)
    }
}

/// A 5x8 pixel glyph in CGRAM row format
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Glyph {
    /// One byte per pixel row, top first
    rows: [u8; GLYPH_HEIGHT as usize],
}

impl Glyph {
    /// A glyph with no pixels lit
    pub const fn blank() -> Self {
        Self {
            rows: [0; GLYPH_HEIGHT as usize],
        }
    }

    /// Build a glyph from raw row bytes; bits above bit 4 are dropped
    pub fn from_rows(rows: [u8; GLYPH_HEIGHT as usize]) -> Self {
        Self {
            rows: rows.map(|row| row & ROW_MASK),
        }
    }

    /// Build a glyph by sampling `lit(x, y)` for every pixel
    pub fn from_pixels<F>(mut lit: F) -> Self
    where
        F: FnMut(u8, u8) -> bool,
    {
        let mut glyph = Self::blank();
        for y in 0..GLYPH_HEIGHT {
            for x in 0..GLYPH_WIDTH {
                if lit(x, y) {
                    glyph.set_pixel(x, y, true);
                }
            }
        }
        glyph
    }

    /// Build a glyph from ASCII art
    ///
    /// One line per pixel row; `#` and `*` are lit, anything else is dark.
    /// Leading whitespace on each line is ignored, and lines or columns
    /// beyond 8x5 are dropped.
    pub fn from_art(art: &str) -> Self {
        let mut glyph = Self::blank();
        for (y, line) in art.lines().take(GLYPH_HEIGHT as usize).enumerate() {
            for (x, ch) in line.trim_start().chars().take(GLYPH_WIDTH as usize).enumerate() {
                if matches!(ch, '#' | '*') {
                    glyph.set_pixel(x as u8, y as u8, true);
                }
            }
        }
        glyph
    }

    /// Row bytes as uploaded to CGRAM
    pub fn rows(&self) -> &[u8; GLYPH_HEIGHT as usize] {
        &self.rows
    }

    /// Whether the pixel at (`x`, `y`) is lit; out-of-range pixels are dark
    pub fn pixel(&self, x: u8, y: u8) -> bool {
        if x >= GLYPH_WIDTH || y >= GLYPH_HEIGHT {
            return false;
        }
        self.rows[y as usize] & column_bit(x) != 0
    }

    /// Light or clear the pixel at (`x`, `y`); out-of-range pixels are ignored
    pub fn set_pixel(&mut self, x: u8, y: u8, on: bool) {
        if x >= GLYPH_WIDTH || y >= GLYPH_HEIGHT {
            return;
        }
        let bit = column_bit(x);
        if on {
            self.rows[y as usize] |= bit;
        } else {
            self.rows[y as usize] &= !bit;
        }
    }
}

fn column_bit(x: u8) -> u8 {
    1 << (GLYPH_WIDTH - 1 - x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_bounds() {
        assert!(GlyphSlot::new(0).is_some());
        assert!(GlyphSlot::new(7).is_some());
        assert!(GlyphSlot::new(8).is_none());
        assert_eq!(GlyphSlot::try_from(9), Err(9));
    }

    #[test]
    fn test_cgram_address() {
        assert_eq!(GlyphSlot::new(0).unwrap().cgram_address(), 0x40);
        assert_eq!(GlyphSlot::new(3).unwrap().cgram_address(), 0x58);
        assert_eq!(GlyphSlot::new(7).unwrap().cgram_address(), 0x78);
    }

    #[test]
    fn test_leftmost_column_is_bit_four() {
        let glyph = Glyph::from_pixels(|x, _| x == 0);
        assert_eq!(glyph.rows(), &[0x10; 8]);

        let glyph = Glyph::from_pixels(|x, _| x == 4);
        assert_eq!(glyph.rows(), &[0x01; 8]);
    }

    #[test]
    fn test_from_pixels_diagonal() {
        let glyph = Glyph::from_pixels(|x, y| x == y);
        assert_eq!(glyph.rows(), &[0x10, 0x08, 0x04, 0x02, 0x01, 0, 0, 0]);
    }

    #[test]
    fn test_from_rows_masks_high_bits() {
        let glyph = Glyph::from_rows([0xFF; 8]);
        assert_eq!(glyph.rows(), &[0x1F; 8]);
    }

    #[test]
    fn test_from_art_ignores_extra() {
        let glyph = Glyph::from_art("######\n*...*\n\n\n\n\n\n\n#####");
        assert_eq!(glyph.rows(), &[0x1F, 0x11, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_pixel_roundtrip() {
        let mut glyph = Glyph::blank();
        glyph.set_pixel(2, 5, true);
        assert!(glyph.pixel(2, 5));
        glyph.set_pixel(2, 5, false);
        assert!(!glyph.pixel(2, 5));
        glyph.set_pixel(5, 0, true);
        glyph.set_pixel(0, 8, true);
        assert_eq!(glyph, Glyph::blank());
    }
}
