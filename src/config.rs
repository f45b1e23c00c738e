//! Driver configuration types and builder

use crate::command::{BACKLIGHT_BIT, MAX_I2C_ADDRESS, PCF8574_ADDRESS, PCF8574A_ADDRESS, ROW_OFFSETS};
pub use crate::error::BuilderError;

/// Size of the HD44780 display data RAM in characters
pub const DDRAM_SIZE: usize = 80;

/// Maximum number of rows addressable through [`ROW_OFFSETS`]
pub const MAX_ROWS: u8 = ROW_OFFSETS.len() as u8;

/// Default delay between the first change and the flush to the panel
pub const DEFAULT_REFRESH_DELAY_MS: u32 = 400;

/// Addresses probed by [`Lcd::connect`](crate::display::Lcd::connect), in order
pub const DEFAULT_PROBE_ADDRESSES: &[u8] = &[PCF8574_ADDRESS, PCF8574A_ADDRESS];

/// Display dimensions in characters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    /// Number of text rows
    pub rows: u8,
    /// Number of characters per row
    pub cols: u8,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - rows is 0 or greater than [`MAX_ROWS`]
    /// - cols is 0
    /// - rows * cols exceeds the controller's [`DDRAM_SIZE`]
    pub fn new(rows: u8, cols: u8) -> Result<Self, BuilderError> {
        if rows == 0 || rows > MAX_ROWS || cols == 0 {
            return Err(BuilderError::InvalidDimensions { rows, cols });
        }
        if rows as usize * cols as usize > DDRAM_SIZE {
            return Err(BuilderError::InvalidDimensions { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Number of character cells
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

/// Backlight state, stored as the expander bit that drives it
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(u8)]
pub enum Backlight {
    /// Backlight off
    Off = 0x00,
    /// Backlight on
    #[default]
    On = BACKLIGHT_BIT,
}

impl Backlight {
    /// Bit to OR into every byte written to the expander
    pub fn bits(self) -> u8 {
        self as u8
    }
}

impl From<bool> for Backlight {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

/// How the driver reports conditions a beginner-facing host would rather ignore
///
/// Covers: no backpack found, dimension mismatch, invalid dimensions and
/// bus failures while sending.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ErrorPolicy {
    /// Log the condition and carry on as if the call succeeded
    #[default]
    Silent,
    /// Return the condition as an [`Error`](crate::error::Error)
    Strict,
}

/// Driver configuration
///
/// Use `Builder` to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Candidate backpack addresses tried by auto-detection
    pub probe_addresses: &'static [u8],
    /// Backlight state applied on (re)connect
    pub backlight: Backlight,
    /// Delay in milliseconds from the first change to the flush
    pub refresh_delay_ms: u32,
    /// Error reporting policy
    pub error_policy: ErrorPolicy,
    /// Character used to blank the display on first use
    pub blank: u8,
}

/// Builder for constructing driver configuration
///
/// # Example
///
/// ```
/// use hd44780_pcf8574::{Builder, ErrorPolicy};
///
/// let config = match Builder::new()
///     .refresh_delay_ms(100)
///     .error_policy(ErrorPolicy::Strict)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.refresh_delay_ms, 100);
/// ```
#[must_use]
pub struct Builder {
    /// Candidate backpack addresses
    probe_addresses: &'static [u8],
    /// Initial backlight state
    backlight: Backlight,
    /// Flush delay in milliseconds
    refresh_delay_ms: u32,
    /// Error reporting policy
    error_policy: ErrorPolicy,
    /// Blank character
    blank: u8,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            probe_addresses: DEFAULT_PROBE_ADDRESSES,
            backlight: Backlight::On,
            refresh_delay_ms: DEFAULT_REFRESH_DELAY_MS,
            error_policy: ErrorPolicy::Silent,
            blank: b' ',
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the addresses tried by auto-detection, in probe order
    pub fn probe_addresses(mut self, addresses: &'static [u8]) -> Self {
        self.probe_addresses = addresses;
        self
    }

    /// Set the backlight state applied on connect
    pub fn backlight(mut self, backlight: Backlight) -> Self {
        self.backlight = backlight;
        self
    }

    /// Set the flush delay
    ///
    /// Changes made within this window are coalesced into one flush.
    pub fn refresh_delay_ms(mut self, delay_ms: u32) -> Self {
        self.refresh_delay_ms = delay_ms;
        self
    }

    /// Set the error reporting policy
    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Set the character used to blank the display on first use
    pub fn blank(mut self, blank: u8) -> Self {
        self.blank = blank;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::NoProbeAddresses` if the address list is empty,
    /// or `BuilderError::InvalidAddress` if an address is not 7-bit.
    pub fn build(self) -> Result<Config, BuilderError> {
        if self.probe_addresses.is_empty() {
            return Err(BuilderError::NoProbeAddresses);
        }
        if let Some(&address) = self
            .probe_addresses
            .iter()
            .find(|&&address| address > MAX_I2C_ADDRESS)
        {
            return Err(BuilderError::InvalidAddress(address));
        }
        Ok(Config {
            probe_addresses: self.probe_addresses,
            backlight: self.backlight,
            refresh_delay_ms: self.refresh_delay_ms,
            error_policy: self.error_policy,
            blank: self.blank,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_common_panels() {
        assert!(Dimensions::new(2, 16).is_ok());
        assert!(Dimensions::new(4, 20).is_ok());
        assert!(Dimensions::new(1, 40).is_ok());
        assert!(Dimensions::new(2, 40).is_ok());
    }

    #[test]
    fn test_dimensions_zero_rejected() {
        assert!(matches!(
            Dimensions::new(0, 16),
            Err(BuilderError::InvalidDimensions { rows: 0, cols: 16 })
        ));
        assert!(Dimensions::new(2, 0).is_err());
    }

    #[test]
    fn test_dimensions_too_many_rows() {
        assert!(Dimensions::new(5, 8).is_err());
    }

    #[test]
    fn test_dimensions_exceeding_ddram() {
        assert!(Dimensions::new(4, 21).is_err());
        assert!(Dimensions::new(1, 81).is_err());
    }

    #[test]
    fn test_cell_count() {
        let dims = Dimensions::new(2, 16).unwrap();
        assert_eq!(dims.cell_count(), 32);
    }

    #[test]
    fn test_backlight_bits() {
        assert_eq!(Backlight::On.bits(), 0x08);
        assert_eq!(Backlight::Off.bits(), 0x00);
        assert_eq!(Backlight::from(false), Backlight::Off);
    }

    #[test]
    fn test_builder_defaults() {
        let config = Builder::new().build().unwrap();
        assert_eq!(config.probe_addresses, &[0x27, 0x3F]);
        assert_eq!(config.backlight, Backlight::On);
        assert_eq!(config.refresh_delay_ms, 400);
        assert_eq!(config.error_policy, ErrorPolicy::Silent);
        assert_eq!(config.blank, b' ');
    }

    #[test]
    fn test_builder_rejects_empty_addresses() {
        let result = Builder::new().probe_addresses(&[]).build();
        assert!(matches!(result, Err(BuilderError::NoProbeAddresses)));
    }

    #[test]
    fn test_builder_rejects_ten_bit_address() {
        let result = Builder::new().probe_addresses(&[0x27, 0x80]).build();
        assert!(matches!(result, Err(BuilderError::InvalidAddress(0x80))));
    }
}
