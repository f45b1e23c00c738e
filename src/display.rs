//! Buffered display session
//!
//! [`Lcd`] owns the bus interface, a delay and a refresh timer. It binds to
//! one backpack at a time, initializes the controller, and keeps a
//! [`ShadowBuffer`] that placements write into. Changed rows are pushed to
//! the panel by the deferred refresh.
//!
//! ## Example
//!
//! ```rust,no_run
//! use hd44780_pcf8574::{Alignment, Builder, I2cInterface, ImmediateRefresh, Lcd};
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::i2c::{I2c, Operation, SevenBitAddress};
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
//! let config = match Builder::new().build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//! let mut lcd = Lcd::new(I2cInterface::new(MockI2c), MockDelay, ImmediateRefresh, config);
//!
//! // 16x2 panel: greeting on the first row, counter right-aligned on the second
//! let _ = lcd.place("Hello", 0, 16, 16, 2, Alignment::Center, b' ');
//! let _ = lcd.place("42", 16, 16, 16, 2, Alignment::Right, b' ');
//! ```

use embedded_hal::delay::DelayNs;

use crate::buffer::ShadowBuffer;
use crate::command::{
    BLINK_OFF, CURSOR_OFF, DISPLAY_CONTROL, DISPLAY_ON, ENTRY_LEFT, ENTRY_MODE_SET,
    ENTRY_SHIFT_DECREMENT, FOUR_BIT_NIBBLE, FUNCTION_2LINE, FUNCTION_4BIT, FUNCTION_5X8,
    FUNCTION_SET, MAX_I2C_ADDRESS, POWER_ON_DELAY_MS, RESET_DELAY_US, RESET_NIBBLE, ROW_OFFSETS,
    SET_DDRAM_ADDRESS, SETTLE_DELAY_US,
};
use crate::config::{Backlight, Config, DDRAM_SIZE, Dimensions, ErrorPolicy};
use crate::error::Error;
use crate::glyph::{Glyph, GlyphSlot};
use crate::interface::ExpanderInterface;
use crate::nibble::{RegisterSelect, encode_byte, encode_nibble};
use crate::scheduler::{RefreshScheduler, RefreshTimer};
use crate::text::{Alignment, TextOption};

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// State tied to one bound backpack
#[derive(Debug)]
struct Session {
    /// 7-bit I2C address of the expander
    address: u8,
    /// Current backlight state
    backlight: Backlight,
    /// Created by the first placement, which also locks the dimensions
    shadow: Option<ShadowBuffer>,
}

/// HD44780 display behind a PCF8574 backpack
///
/// All operations are no-ops until a backpack is bound, either explicitly
/// with [`connect`](Self::connect) / [`connect_to`](Self::connect_to) or
/// lazily by the first placement.
pub struct Lcd<I, D, T>
where
    I: ExpanderInterface,
    D: DelayNs,
    T: RefreshTimer,
{
    /// Bus interface
    interface: I,
    /// Blocking delay for protocol timing
    delay: D,
    /// One-shot timer for deferred refresh
    timer: T,
    /// Driver configuration
    config: Config,
    /// Bound backpack, if any
    session: Option<Session>,
    /// Pending refresh
    scheduler: RefreshScheduler<T::Handle>,
}

impl<I, D, T> Lcd<I, D, T>
where
    I: ExpanderInterface,
    D: DelayNs,
    T: RefreshTimer,
{
    /// Create a new, unbound driver
    pub fn new(interface: I, delay: D, timer: T, config: Config) -> Self {
        Self {
            interface,
            delay,
            timer,
            config,
            session: None,
            scheduler: RefreshScheduler::new(),
        }
    }

    /// Tear down the driver and give back its parts
    ///
    /// A pending refresh is cancelled first.
    pub fn release(mut self) -> (I, D, T) {
        self.scheduler.cancel(&mut self.timer);
        (self.interface, self.delay, self.timer)
    }

    /// Driver configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Bind to the first backpack that answers at a probe address
    ///
    /// Returns `Ok(true)` if a backpack is bound, including when one already
    /// was. When nothing answers, returns `Ok(false)`, or `Error::NoDevice`
    /// under [`ErrorPolicy::Strict`].
    pub fn connect(&mut self) -> Result<bool, Error<I>> {
        if self.session.is_some() {
            return Ok(true);
        }

        let addresses = self.config.probe_addresses;
        for &address in addresses {
            if self.interface.probe(address) {
                log::debug!("LCD backpack found at {address:#04x}");
                self.connect_to(address)?;
                return Ok(true);
            }
        }

        self.degrade(Error::NoDevice).map(|()| false)
    }

    /// Bind to the backpack at `address` without probing
    ///
    /// Binding to the current address does nothing. Binding to a different
    /// one cancels the pending refresh, drops the shadow buffer and runs the
    /// full initialization sequence. If initialization fails the driver is
    /// left unbound, so the next connect starts over.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidAddress` if `address` does not fit in 7 bits.
    pub fn connect_to(&mut self, address: u8) -> DisplayResult<I> {
        if address > MAX_I2C_ADDRESS {
            return Err(Error::InvalidAddress(address));
        }
        if self.address() == Some(address) {
            return Ok(());
        }

        self.scheduler.cancel(&mut self.timer);
        self.session = Some(Session {
            address,
            backlight: self.config.backlight,
            shadow: None,
        });
        log::debug!("Initializing LCD at {address:#04x}");
        if let Err(err) = self.init() {
            self.session = None;
            return Err(err);
        }
        Ok(())
    }

    /// Drop the bound backpack, cancelling any pending refresh
    pub fn disconnect(&mut self) {
        self.scheduler.cancel(&mut self.timer);
        if let Some(session) = self.session.take() {
            log::debug!("LCD at {:#04x} disconnected", session.address);
        }
    }

    /// Whether a backpack is bound, trying auto-detection if not
    pub fn is_connected(&mut self) -> bool {
        self.session.is_some() || self.connect().unwrap_or(false)
    }

    /// Address of the bound backpack
    pub fn address(&self) -> Option<u8> {
        self.session.as_ref().map(|session| session.address)
    }

    /// Current backlight state, if bound
    pub fn backlight(&self) -> Option<Backlight> {
        self.session.as_ref().map(|session| session.backlight)
    }

    /// Locked display dimensions, once the first placement happened
    pub fn dimensions(&self) -> Option<Dimensions> {
        self.shadow().map(ShadowBuffer::dimensions)
    }

    /// Shadow buffer contents, row-major
    pub fn contents(&self) -> Option<&[u8]> {
        self.shadow().map(ShadowBuffer::cells)
    }

    /// Shadow buffer contents of one row
    pub fn row(&self, row: u8) -> Option<&[u8]> {
        self.shadow().and_then(|shadow| shadow.row(row))
    }

    /// Rows waiting for the next refresh (bit i = row i)
    pub fn dirty_rows(&self) -> u8 {
        self.shadow().map_or(0, ShadowBuffer::dirty_rows)
    }

    /// Whether a refresh timer is armed
    pub fn is_refresh_pending(&self) -> bool {
        self.scheduler.is_armed()
    }

    /// Write `text` into the field `[offset, offset + length)`
    ///
    /// `columns` and `rows` describe the panel. The first placement locks
    /// them in and blanks the display; later calls with other dimensions
    /// are rejected as a dimension mismatch. Within the field the text is
    /// positioned by `alignment` and the rest is filled with `pad`. Only
    /// cells that actually change are marked for refresh.
    ///
    /// `text` is taken as raw HD44780 character-ROM codes, one cell per
    /// byte; a `&str` should therefore be ASCII.
    #[allow(clippy::too_many_arguments)]
    pub fn place<S: AsRef<[u8]>>(
        &mut self,
        text: S,
        offset: i32,
        length: usize,
        columns: u8,
        rows: u8,
        alignment: Alignment,
        pad: u8,
    ) -> DisplayResult<I> {
        if !self.prepare(columns, rows)? {
            return Ok(());
        }
        if let Some(shadow) = self.shadow_mut() {
            shadow.place(text.as_ref(), offset, length, alignment, pad);
        }
        self.after_update()
    }

    /// [`place`](Self::place) with alignment and padding taken from `option`
    pub fn place_with_option<S: AsRef<[u8]>>(
        &mut self,
        text: S,
        offset: i32,
        length: usize,
        columns: u8,
        rows: u8,
        option: TextOption,
    ) -> DisplayResult<I> {
        self.place(
            text,
            offset,
            length,
            columns,
            rows,
            option.alignment(),
            option.pad(),
        )
    }

    /// Store a single character code at cell `offset`
    ///
    /// Useful for glyph codes 0-7. Offsets outside the display are ignored.
    pub fn set_character_at(
        &mut self,
        code: u8,
        offset: usize,
        columns: u8,
        rows: u8,
    ) -> DisplayResult<I> {
        if !self.prepare(columns, rows)? {
            return Ok(());
        }
        if let Some(shadow) = self.shadow_mut() {
            shadow.set(offset, code);
        }
        self.after_update()
    }

    /// Blank every cell
    ///
    /// Does nothing before the first placement.
    pub fn clear(&mut self) -> DisplayResult<I> {
        let blank = self.config.blank;
        let Some(shadow) = self.shadow_mut() else {
            return Ok(());
        };
        shadow.fill(blank);
        self.after_update()
    }

    /// Switch the backlight
    ///
    /// Takes effect immediately, independent of any pending refresh.
    pub fn set_backlight(&mut self, backlight: Backlight) -> DisplayResult<I> {
        if !self.connect()? {
            return Ok(());
        }
        if let Some(session) = self.session.as_mut() {
            session.backlight = backlight;
        }
        // Any transfer carries the backlight bit; instruction 0 is ignored by the controller
        self.send(RegisterSelect::Command, 0)
    }

    /// Upload a custom glyph into CGRAM slot `slot` (0-7)
    ///
    /// Display it afterwards by placing character code `slot`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidGlyphSlot` if `slot` is greater than 7.
    pub fn define_glyph(&mut self, slot: u8, glyph: &Glyph) -> DisplayResult<I> {
        let slot = GlyphSlot::new(slot).ok_or(Error::InvalidGlyphSlot(slot))?;
        if !self.connect()? {
            return Ok(());
        }
        self.send(RegisterSelect::Command, slot.cgram_address())?;
        for &row in glyph.rows() {
            self.send(RegisterSelect::Data, row)?;
        }
        self.delay.delay_us(SETTLE_DELAY_US);
        Ok(())
    }

    /// Flush now if the refresh timer has fired
    ///
    /// Call this from the host's main loop when the timer has no callback.
    pub fn poll(&mut self) -> DisplayResult<I> {
        if self.scheduler.take_due(&mut self.timer) {
            self.flush()
        } else {
            Ok(())
        }
    }

    /// Send every dirty row to the panel
    ///
    /// This is the refresh timer's callback; it consumes the armed timer.
    pub fn refresh(&mut self) -> DisplayResult<I> {
        self.scheduler.clear();
        self.flush()
    }

    fn shadow(&self) -> Option<&ShadowBuffer> {
        self.session.as_ref().and_then(|session| session.shadow.as_ref())
    }

    fn shadow_mut(&mut self) -> Option<&mut ShadowBuffer> {
        self.session.as_mut().and_then(|session| session.shadow.as_mut())
    }

    /// Report `err` according to the error policy
    fn degrade(&self, err: Error<I>) -> DisplayResult<I> {
        match self.config.error_policy {
            ErrorPolicy::Silent => {
                log::debug!("Ignoring LCD error: {err}");
                Ok(())
            }
            ErrorPolicy::Strict => Err(err),
        }
    }

    /// Bind, lock dimensions on first use and check them
    ///
    /// Returns whether the shadow buffer is ready for a `columns` x `rows` write.
    fn prepare(&mut self, columns: u8, rows: u8) -> Result<bool, Error<I>> {
        if !self.connect()? {
            return Ok(false);
        }

        let Ok(requested) = Dimensions::new(rows, columns) else {
            self.degrade(Error::InvalidDimensions {
                rows,
                cols: columns,
            })?;
            return Ok(false);
        };

        let blank = self.config.blank;
        let Some(session) = self.session.as_mut() else {
            return Ok(false);
        };
        let expected = session
            .shadow
            .get_or_insert_with(|| {
                log::debug!("LCD dimensions locked to {}x{}", requested.cols, requested.rows);
                ShadowBuffer::new(requested, blank)
            })
            .dimensions();

        if expected != requested {
            self.degrade(Error::DimensionMismatch {
                expected,
                requested,
            })?;
            return Ok(false);
        }
        Ok(true)
    }

    /// Arm the refresh if anything is dirty, then yield to a due refresh
    fn after_update(&mut self) -> DisplayResult<I> {
        self.arm_refresh();
        self.poll()
    }

    fn arm_refresh(&mut self) {
        if self.shadow().is_some_and(ShadowBuffer::is_dirty) {
            let delay_ms = self.config.refresh_delay_ms;
            if self.scheduler.schedule(&mut self.timer, delay_ms) {
                log::trace!("LCD refresh armed ({delay_ms} ms)");
            }
        }
    }

    /// Send the dirty rows; rows left behind by a failed write get a new timer
    fn flush(&mut self) -> DisplayResult<I> {
        let result = self.send_dirty_rows();
        if result.is_err() {
            self.arm_refresh();
        }
        result
    }

    fn send_dirty_rows(&mut self) -> DisplayResult<I> {
        let Some(rows) = self.dimensions().map(|dims| dims.rows) else {
            return Ok(());
        };

        for row in 0..rows {
            let mut line = [0u8; DDRAM_SIZE];
            let len = {
                let Some(shadow) = self.shadow_mut() else {
                    return Ok(());
                };
                if !shadow.take_dirty_row(row) {
                    continue;
                }
                let cells = shadow.row(row).unwrap_or_default();
                line[..cells.len()].copy_from_slice(cells);
                cells.len()
            };
            log::trace!("LCD flushing row {row}");
            self.send(
                RegisterSelect::Command,
                SET_DDRAM_ADDRESS | ROW_OFFSETS[row as usize],
            )?;
            for &code in &line[..len] {
                self.send(RegisterSelect::Data, code)?;
            }
        }
        Ok(())
    }

    /// HD44780 4-bit initialization
    fn init(&mut self) -> DisplayResult<I> {
        let backlight = self.backlight().unwrap_or_default().bits();

        self.delay.delay_ms(POWER_ON_DELAY_MS);

        // RS, RW and E low before the first instruction
        self.write(&[backlight])?;
        self.delay.delay_ms(POWER_ON_DELAY_MS);

        // Three 8-bit function sets force a known state, then switch to 4-bit
        for _ in 0..3 {
            self.write(&encode_nibble(RESET_NIBBLE | backlight))?;
            self.delay.delay_us(RESET_DELAY_US);
        }
        self.write(&encode_nibble(FOUR_BIT_NIBBLE | backlight))?;
        self.delay.delay_us(SETTLE_DELAY_US);

        self.send(
            RegisterSelect::Command,
            FUNCTION_SET | FUNCTION_4BIT | FUNCTION_2LINE | FUNCTION_5X8,
        )?;
        self.delay.delay_us(SETTLE_DELAY_US);

        self.send(
            RegisterSelect::Command,
            DISPLAY_CONTROL | DISPLAY_ON | CURSOR_OFF | BLINK_OFF,
        )?;
        self.delay.delay_us(SETTLE_DELAY_US);

        self.send(
            RegisterSelect::Command,
            ENTRY_MODE_SET | ENTRY_LEFT | ENTRY_SHIFT_DECREMENT,
        )?;
        self.delay.delay_us(SETTLE_DELAY_US);

        Ok(())
    }

    /// Send one byte as two nibbles; no-op when unbound
    fn send(&mut self, rs: RegisterSelect, byte: u8) -> DisplayResult<I> {
        let Some(backlight) = self.backlight() else {
            return Ok(());
        };
        self.write(&encode_byte(rs, byte, backlight))
    }

    fn write(&mut self, bytes: &[u8]) -> DisplayResult<I> {
        let Some(address) = self.address() else {
            return Ok(());
        };
        match self.interface.write(address, bytes) {
            Ok(()) => Ok(()),
            Err(e) => {
                log::warn!("I2C write to {address:#04x} failed: {e:?}");
                match self.config.error_policy {
                    ErrorPolicy::Silent => Ok(()),
                    ErrorPolicy::Strict => Err(Error::Interface(e)),
                }
            }
        }
    }
}
