//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level bus errors
//!
//! Under the default [`ErrorPolicy::Silent`](crate::config::ErrorPolicy::Silent)
//! most runtime conditions are logged and swallowed; switch to
//! [`ErrorPolicy::Strict`](crate::config::ErrorPolicy::Strict) to receive them.
//!
//! ## Example
//!
//! ```
//! use hd44780_pcf8574::{Builder, BuilderError, Dimensions};
//!
//! // Empty probe list
//! let result = Builder::new().probe_addresses(&[]).build();
//! assert!(matches!(result, Err(BuilderError::NoProbeAddresses)));
//!
//! // Invalid dimensions
//! let result = Dimensions::new(5, 20); // Too many rows
//! assert!(result.is_err());
//! ```

use crate::config::Dimensions;
use crate::interface::ExpanderInterface;

/// Errors that can occur when driving the display
///
/// Generic over the interface type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<I: ExpanderInterface> {
    /// Interface error (I2C)
    ///
    /// Wraps the underlying bus error from the [`ExpanderInterface`] implementation.
    Interface(I::Error),
    /// No backpack acknowledged at any probe address
    NoDevice,
    /// Address does not fit in 7 bits
    InvalidAddress(u8),
    /// Requested dimensions cannot be driven
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Number of rows requested
        rows: u8,
        /// Number of columns requested
        cols: u8,
    },
    /// Dimensions differ from the ones locked in by the first placement
    DimensionMismatch {
        /// Dimensions the shadow buffer was created with
        expected: Dimensions,
        /// Dimensions passed to the call
        requested: Dimensions,
    },
    /// CGRAM slot outside 0..=7
    InvalidGlyphSlot(u8),
}

impl<I: ExpanderInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(_) => write!(f, "Interface error"),
            Self::NoDevice => write!(f, "No LCD backpack found"),
            Self::InvalidAddress(address) => {
                write!(f, "Invalid I2C address: {address:#04x}")
            }
            Self::InvalidDimensions { rows, cols } => {
                write!(f, "Invalid dimensions: {rows}x{cols}")
            }
            Self::DimensionMismatch {
                expected,
                requested,
            } => write!(
                f,
                "Dimension mismatch: display is {}x{}, call used {}x{}",
                expected.rows, expected.cols, requested.rows, requested.cols
            ),
            Self::InvalidGlyphSlot(slot) => write!(f, "Invalid glyph slot: {slot}"),
        }
    }
}

impl<I: ExpanderInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the driver is created.
#[derive(Debug)]
pub enum BuilderError {
    /// The list of auto-detection addresses is empty
    NoProbeAddresses,
    /// A probe address does not fit in 7 bits
    InvalidAddress(u8),
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Number of rows requested
        rows: u8,
        /// Number of columns requested
        cols: u8,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoProbeAddresses => write!(f, "At least one probe address must be specified"),
            Self::InvalidAddress(address) => {
                write!(f, "Invalid I2C address {address:#04x} (max 0x7f)")
            }
            Self::InvalidDimensions { rows, cols } => write!(
                f,
                "Invalid dimensions {rows}x{cols} (max {} rows, {} cells)",
                crate::config::MAX_ROWS,
                crate::config::DDRAM_SIZE
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
