//! Text alignment and padding presets

/// Position of text inside its field
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Alignment {
    /// Text starts at the field offset, padding follows
    #[default]
    Left,
    /// Text ends at the end of the field, padding precedes
    Right,
    /// Padding split around the text, the extra cell going after it
    Center,
}

/// Common alignment and padding combinations
///
/// ```
/// use hd44780_pcf8574::{Alignment, TextOption};
///
/// assert_eq!(TextOption::PadWithZeros.alignment(), Alignment::Right);
/// assert_eq!(TextOption::PadWithZeros.pad(), b'0');
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum TextOption {
    /// Left-aligned, space padded
    #[default]
    AlignLeft,
    /// Right-aligned, space padded
    AlignRight,
    /// Centered, space padded
    AlignCenter,
    /// Right-aligned, padded with `'0'` (for numbers)
    PadWithZeros,
}

impl TextOption {
    /// Alignment implied by this option
    pub fn alignment(self) -> Alignment {
        match self {
            Self::AlignLeft => Alignment::Left,
            Self::AlignRight | Self::PadWithZeros => Alignment::Right,
            Self::AlignCenter => Alignment::Center,
        }
    }

    /// Padding character implied by this option
    pub fn pad(self) -> u8 {
        match self {
            Self::PadWithZeros => b'0',
            _ => b' ',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_left_aligned_spaces() {
        let option = TextOption::default();
        assert_eq!(option.alignment(), Alignment::Left);
        assert_eq!(option.pad(), b' ');
    }

    #[test]
    fn test_option_alignments() {
        assert_eq!(TextOption::AlignRight.alignment(), Alignment::Right);
        assert_eq!(TextOption::AlignCenter.alignment(), Alignment::Center);
        assert_eq!(TextOption::AlignCenter.pad(), b' ');
    }
}
