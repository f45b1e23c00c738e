//! Hardware interface abstraction
//!
//! This module provides the [`ExpanderInterface`] trait and the [`I2cInterface`]
//! struct for talking to a PCF8574 / PCF8574A backpack over I2C.
//!
//! ## Hardware Requirements
//!
//! The backpack only needs an I2C bus (SDA + SCL). The expander has no
//! registers: every byte written drives its eight output lines directly, so
//! the driver never reads from the bus.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::i2c::{I2c, Operation, SevenBitAddress};
//! use hd44780_pcf8574::{ExpanderInterface, I2cInterface};
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
//! let mut interface = I2cInterface::new(MockI2c);
//!
//! // Look for a PCF8574 at its default address
//! if interface.probe(0x27) {
//!     // Backlight on, all other lines low
//!     let _ = interface.write(0x27, &[0x08]);
//! }
//! ```

use core::fmt::Debug;
use embedded_hal::i2c::{Error as _, ErrorKind, I2c, NoAcknowledgeSource};

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for the bus side of an I/O expander backpack
///
/// This trait abstracts over different hardware implementations,
/// allowing the [`Lcd`](crate::display::Lcd) to work with any transport
/// that can address a device and push raw bytes to it.
///
/// ## Implementing
///
/// For most cases, use the provided [`I2cInterface`] struct. Implement this
/// trait yourself when the expander sits behind something else, such as an
/// I2C multiplexer or a host runtime's own bus API.
pub trait ExpanderInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Check whether a device acknowledges at `address`
    ///
    /// The implementation should issue a zero-byte write and report whether
    /// the device acknowledged it. Any failure counts as "not present".
    fn probe(&mut self, address: u8) -> bool;

    /// Write raw bytes to the expander at `address`
    ///
    /// Each byte is latched onto the expander's output lines in turn.
    ///
    /// # Errors
    ///
    /// Returns an error if the bus transaction fails.
    fn write(&mut self, address: u8, bytes: &[u8]) -> InterfaceResult<(), Self::Error>;
}

/// Errors that can occur at the interface level
#[derive(Debug)]
pub enum InterfaceError<I2cErr> {
    /// No device acknowledged the transfer
    NoAcknowledge {
        /// Address that was written
        address: u8,
    },
    /// Any other I2C bus error
    I2c(I2cErr),
}

impl<I2cErr: Debug> core::fmt::Display for InterfaceError<I2cErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoAcknowledge { address } => {
                write!(f, "No acknowledge from device at {address:#04x}")
            }
            Self::I2c(e) => write!(f, "I2C error: {e:?}"),
        }
    }
}

impl<I2cErr: Debug> core::error::Error for InterfaceError<I2cErr> {}

/// I2C interface implementation for PCF8574 backpacks
///
/// Implements [`ExpanderInterface`] for any embedded-hal v1.0 [`I2c`] bus.
///
/// ## Example
///
/// ```rust,no_run
/// use hd44780_pcf8574::{Builder, I2cInterface, ImmediateRefresh, Lcd};
/// # use core::convert::Infallible;
/// # use embedded_hal::delay::DelayNs;
/// # use embedded_hal::i2c::{I2c, Operation, SevenBitAddress};
/// # struct MockI2c;
/// # impl embedded_hal::i2c::ErrorType for MockI2c { type Error = Infallible; }
/// # impl I2c<SevenBitAddress> for MockI2c {
/// #     fn transaction(
/// #         &mut self,
/// #         _address: u8,
/// #         _operations: &mut [Operation<'_>],
/// #     ) -> Result<(), Self::Error> {
/// #         Ok(())
/// #     }
/// # }
/// # struct MockDelay;
/// # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
/// let interface = I2cInterface::new(MockI2c);
/// # let config = match Builder::new().build() {
/// #     Ok(config) => config,
/// #     Err(_) => return,
/// # };
/// let _lcd = Lcd::new(interface, MockDelay, ImmediateRefresh, config);
/// ```
pub struct I2cInterface<I2C> {
    /// I2C bus shared with the backpack
    i2c: I2C,
}

impl<I2C> I2cInterface<I2C>
where
    I2C: I2c,
{
    /// Create a new interface over an I2C bus
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Give back the underlying bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> ExpanderInterface for I2cInterface<I2C>
where
    I2C: I2c,
    I2C::Error: Debug,
{
    type Error = InterfaceError<I2C::Error>;

    fn probe(&mut self, address: u8) -> bool {
        self.i2c.write(address, &[]).is_ok()
    }

    fn write(&mut self, address: u8, bytes: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.i2c.write(address, bytes).map_err(|e| match e.kind() {
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address | NoAcknowledgeSource::Unknown) => {
                InterfaceError::NoAcknowledge { address }
            }
            _ => InterfaceError::I2c(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorType, Operation, SevenBitAddress};

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum MockError {
        Nack,
        Bus,
    }

    impl embedded_hal::i2c::Error for MockError {
        fn kind(&self) -> ErrorKind {
            match self {
                Self::Nack => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address),
                Self::Bus => ErrorKind::Bus,
            }
        }
    }

    /// Bus with a single device that fails every write with `fail_with`
    struct MockI2c {
        present: u8,
        fail_with: Option<MockError>,
        writes: alloc::vec::Vec<(u8, alloc::vec::Vec<u8>)>,
    }

    impl MockI2c {
        fn new(present: u8) -> Self {
            Self {
                present,
                fail_with: None,
                writes: alloc::vec::Vec::new(),
            }
        }
    }

    impl ErrorType for MockI2c {
        type Error = MockError;
    }

    impl I2c<SevenBitAddress> for MockI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if address != self.present {
                return Err(MockError::Nack);
            }
            if let Some(e) = self.fail_with {
                return Err(e);
            }
            for op in operations {
                if let Operation::Write(bytes) = op {
                    self.writes.push((address, bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_probe_acknowledged_address() {
        let mut interface = I2cInterface::new(MockI2c::new(0x3F));
        assert!(interface.probe(0x3F));
        assert!(!interface.probe(0x27));
    }

    #[test]
    fn test_probe_sends_zero_bytes() {
        let mut interface = I2cInterface::new(MockI2c::new(0x27));
        assert!(interface.probe(0x27));
        let i2c = interface.release();
        assert_eq!(i2c.writes, alloc::vec![(0x27, alloc::vec![])]);
    }

    #[test]
    fn test_write_forwards_bytes() {
        let mut interface = I2cInterface::new(MockI2c::new(0x27));
        assert!(interface.write(0x27, &[0x08, 0x0C, 0x08]).is_ok());
        let i2c = interface.release();
        assert_eq!(i2c.writes, alloc::vec![(0x27, alloc::vec![0x08, 0x0C, 0x08])]);
    }

    #[test]
    fn test_write_maps_nack() {
        let mut interface = I2cInterface::new(MockI2c::new(0x27));
        let result = interface.write(0x20, &[0x00]);
        assert!(matches!(
            result,
            Err(InterfaceError::NoAcknowledge { address: 0x20 })
        ));
    }

    #[test]
    fn test_write_maps_bus_error() {
        let mut i2c = MockI2c::new(0x27);
        i2c.fail_with = Some(MockError::Bus);
        let mut interface = I2cInterface::new(i2c);
        let result = interface.write(0x27, &[0x00]);
        assert!(matches!(result, Err(InterfaceError::I2c(MockError::Bus))));
    }
}
