//! Nibble protocol encoder
//!
//! In 4-bit mode the HD44780 takes each byte as two nibbles on D4-D7. For
//! every nibble the expander must present the data with E low, raise E, then
//! drop it again; the controller latches on the falling edge. One nibble is
//! therefore three expander bytes and one full byte is six.
//!
//! ## Example
//!
//! ```
//! use hd44780_pcf8574::nibble::{encode_byte, RegisterSelect};
//! use hd44780_pcf8574::Backlight;
//!
//! // Character 'A' (0x41) with the backlight on
//! let payload = encode_byte(RegisterSelect::Data, b'A', Backlight::On);
//! assert_eq!(payload, [0x49, 0x4D, 0x49, 0x19, 0x1D, 0x19]);
//! ```

use crate::command::{ENABLE_BIT, RS_BIT};
use crate::config::Backlight;

/// Target register of a transfer
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(u8)]
pub enum RegisterSelect {
    /// Instruction register (RS low)
    Command = 0x00,
    /// Data register (RS high)
    Data = RS_BIT,
}

/// Expand one nibble (already in the high four bits) into an enable pulse
///
/// Returns `[value, value | E, value & !E]`.
pub const fn encode_nibble(value: u8) -> [u8; 3] {
    [value, value | ENABLE_BIT, value & !ENABLE_BIT]
}

/// Encode a full byte as two enable pulses, high nibble first
pub fn encode_byte(rs: RegisterSelect, byte: u8, backlight: Backlight) -> [u8; 6] {
    let control = backlight.bits() | rs as u8;
    let high = encode_nibble((byte & 0xF0) | control);
    let low = encode_nibble(((byte << 4) & 0xF0) | control);
    [high[0], high[1], high[2], low[0], low[1], low[2]]
}
