//! HD44780 command definitions and PCF8574 pin mapping
//!
//! The HD44780 is driven in 4-bit mode through a PCF8574 / PCF8574A I/O
//! expander. Every byte written to the expander sets all eight output lines
//! at once:
//!
//! | Bit | Line       |
//! |-----|------------|
//! | 0   | RS         |
//! | 1   | RW         |
//! | 2   | E (enable) |
//! | 3   | Backlight  |
//! | 4-7 | D4-D7      |
//!
//! ## Example
//!
//! ```
//! use hd44780_pcf8574::command;
//!
//! // Function set: 4-bit bus, two lines, 5x8 font
//! let function_set =
//!     command::FUNCTION_SET | command::FUNCTION_4BIT | command::FUNCTION_2LINE | command::FUNCTION_5X8;
//! assert_eq!(function_set, 0x28);
//! ```

// Expander addresses

/// Default address of a PCF8574 backpack (A0-A2 pulled high)
pub const PCF8574_ADDRESS: u8 = 0x27;

/// Default address of a PCF8574A backpack (A0-A2 pulled high)
pub const PCF8574A_ADDRESS: u8 = 0x3F;

/// Largest valid 7-bit I2C address
pub const MAX_I2C_ADDRESS: u8 = 0x7F;

// Expander output lines

/// Register select line (0 = instruction, 1 = data)
pub const RS_BIT: u8 = 0x01;

/// Enable line; the controller latches D4-D7 on its falling edge
pub const ENABLE_BIT: u8 = 0x04;

/// Backlight transistor line
pub const BACKLIGHT_BIT: u8 = 0x08;

// Initialization

/// 8-bit function set nibble, sent three times to force a known state
pub const RESET_NIBBLE: u8 = 0x30;

/// Function set nibble that switches the bus to 4-bit mode
pub const FOUR_BIT_NIBBLE: u8 = 0x20;

// Instruction set

/// Function set instruction (0x20)
///
/// Combine with the `FUNCTION_*` flags below.
pub const FUNCTION_SET: u8 = 0x20;

/// 4-bit data bus
pub const FUNCTION_4BIT: u8 = 0x00;

/// Two (or more) display lines
pub const FUNCTION_2LINE: u8 = 0x08;

/// 5x8 dot character font
pub const FUNCTION_5X8: u8 = 0x00;

/// Display on/off control instruction (0x08)
pub const DISPLAY_CONTROL: u8 = 0x08;

/// Display on
pub const DISPLAY_ON: u8 = 0x04;

/// Cursor off
pub const CURSOR_OFF: u8 = 0x00;

/// Cursor blink off
pub const BLINK_OFF: u8 = 0x00;

/// Entry mode set instruction (0x04)
pub const ENTRY_MODE_SET: u8 = 0x04;

/// Cursor moves right after each write
pub const ENTRY_LEFT: u8 = 0x02;

/// Display does not shift on write
pub const ENTRY_SHIFT_DECREMENT: u8 = 0x00;

/// Set CGRAM address instruction (0x40)
///
/// The glyph slot is encoded in bits 3-5, the pixel row in bits 0-2.
pub const SET_CGRAM_ADDRESS: u8 = 0x40;

/// Set DDRAM address instruction (0x80)
///
/// Moves the cursor; the low 7 bits are the DDRAM address.
pub const SET_DDRAM_ADDRESS: u8 = 0x80;

/// DDRAM address of the first cell of each row
///
/// Rows 2 and 3 continue rows 0 and 1 in memory on 4-line panels.
pub const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

// Timing

/// Power-on settle time before the first instruction
pub const POWER_ON_DELAY_MS: u32 = 50;

/// Spacing between the three reset nibbles
pub const RESET_DELAY_US: u32 = 4100;

/// Settle time after each initialization instruction and glyph upload
pub const SETTLE_DELAY_US: u32 = 1000;
