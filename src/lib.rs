//! HD44780 Character LCD Driver for PCF8574 Backpacks
//!
//! A buffered driver for HD44780-compatible character displays wired to an
//! I2C bus through a PCF8574 or PCF8574A I/O expander.
//!
//! ## Features
//!
//! - `no_std` compatible, no allocator required
//! - `embedded-hal` v1.0 support
//! - Backpack auto-detection (0x27, then 0x3F)
//! - Shadow buffer: only rows that changed are re-sent
//! - Coalescing deferred refresh through a pluggable timer
//! - Left, right and centered text fields with padding
//! - Custom glyphs for the 8 CGRAM slots, drawable with
//!   `embedded-graphics` (with `graphics` feature)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::i2c::{I2c, Operation, SevenBitAddress};
//! use hd44780_pcf8574::{Alignment, Builder, ClockTimer, Glyph, I2cInterface, Lcd};
//!
//! # use core::convert::Infallible;
//! # struct MockI2c;
//! # impl embedded_hal::i2c::ErrorType for MockI2c { type Error = Infallible; }
//! # impl I2c<SevenBitAddress> for MockI2c {
//! #     fn transaction(
//! #         &mut self,
//! #         _address: u8,
//! #         _operations: &mut [Operation<'_>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # fn millis() -> u64 { 0 }
//! let config = match Builder::new().refresh_delay_ms(250).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//! let timer = ClockTimer::new(millis);
//! let mut lcd = Lcd::new(I2cInterface::new(MockI2c), MockDelay, timer, config);
//!
//! if !lcd.is_connected() {
//!     return;
//! }
//!
//! let _ = lcd.define_glyph(0, &Glyph::from_art("..#..\n.###.\n#####"));
//! let _ = lcd.place("Temp", 0, 10, 16, 2, Alignment::Left, b' ');
//! let _ = lcd.set_character_at(0, 15, 16, 2);
//!
//! loop {
//!     // Sends the changed rows once the refresh delay has passed
//!     let _ = lcd.poll();
//! #   break;
//! }
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// Shadow character buffer with dirty-row tracking
pub mod buffer;
/// HD44780 command and PCF8574 pin definitions
pub mod command;
/// Driver configuration types and builder
pub mod config;
/// Buffered display session
pub mod display;
/// Error types for the driver
pub mod error;
/// Custom CGRAM glyphs
pub mod glyph;
/// Hardware interface abstraction
pub mod interface;
/// Nibble protocol encoder
pub mod nibble;
/// Deferred, coalescing refresh
pub mod scheduler;
/// Text alignment and padding
pub mod text;

/// Glyph authoring via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use buffer::ShadowBuffer;
pub use config::{
    Backlight, Builder, Config, DDRAM_SIZE, DEFAULT_PROBE_ADDRESSES, DEFAULT_REFRESH_DELAY_MS,
    Dimensions, ErrorPolicy, MAX_ROWS,
};
pub use display::Lcd;
pub use error::{BuilderError, Error};
pub use glyph::{Glyph, GlyphSlot};
pub use interface::{ExpanderInterface, I2cInterface, InterfaceError};
pub use scheduler::{ClockTimer, ImmediateRefresh, RefreshScheduler, RefreshTimer};
pub use text::{Alignment, TextOption};
