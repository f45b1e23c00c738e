//! Shadow character buffer
//!
//! [`ShadowBuffer`] mirrors what the panel currently shows (or is about to
//! show) and tracks which rows changed since they were last sent. Writes that
//! store the value a cell already holds leave it clean, so repeating a
//! placement costs no bus traffic.
//!
//! ## Example
//!
//! ```
//! use hd44780_pcf8574::{Alignment, Dimensions, ShadowBuffer};
//!
//! let dims = match Dimensions::new(2, 16) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let mut buffer = ShadowBuffer::new(dims, b' ');
//! buffer.mark_clean();
//!
//! buffer.place(b"42", 0, 4, Alignment::Right, b'0');
//! assert_eq!(&buffer.cells()[..4], b"0042");
//! assert_eq!(buffer.dirty_rows(), 0b01);
//! ```

use crate::config::{DDRAM_SIZE, Dimensions};
use crate::text::Alignment;

/// In-memory copy of the display contents with per-row dirty tracking
#[derive(Clone, Debug, PartialEq)]
pub struct ShadowBuffer {
    /// Locked display dimensions
    dimensions: Dimensions,
    /// Character cells, row-major; only the first `rows * cols` are used
    cells: [u8; DDRAM_SIZE],
    /// Bit i set when row i changed since it was last flushed
    dirty: u8,
}

impl ShadowBuffer {
    /// Create a buffer filled with `blank`, with every row marked dirty
    pub fn new(dimensions: Dimensions, blank: u8) -> Self {
        Self {
            dimensions,
            cells: [blank; DDRAM_SIZE],
            dirty: all_rows(dimensions.rows),
        }
    }

    /// Dimensions the buffer was created with
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// All active cells, row-major
    pub fn cells(&self) -> &[u8] {
        &self.cells[..self.dimensions.cell_count()]
    }

    /// Cells of one row, or `None` if `row` is out of range
    pub fn row(&self, row: u8) -> Option<&[u8]> {
        if row >= self.dimensions.rows {
            return None;
        }
        let cols = self.dimensions.cols as usize;
        let start = row as usize * cols;
        Some(&self.cells[start..start + cols])
    }

    /// Dirty-row bitmask (bit i = row i)
    pub fn dirty_rows(&self) -> u8 {
        self.dirty
    }

    /// Whether any row awaits a flush
    pub fn is_dirty(&self) -> bool {
        self.dirty != 0
    }

    /// Clear the dirty bit of `row`, returning whether it was set
    pub fn take_dirty_row(&mut self, row: u8) -> bool {
        let mask = 1u8 << row;
        let was_dirty = self.dirty & mask != 0;
        self.dirty &= !mask;
        was_dirty
    }

    /// Forget all pending changes
    pub fn mark_clean(&mut self) {
        self.dirty = 0;
    }

    /// Store `value` at `index`, marking its row dirty if the cell changed
    ///
    /// Indices outside the buffer are ignored. Returns whether the cell changed.
    pub fn set(&mut self, index: usize, value: u8) -> bool {
        if index >= self.dimensions.cell_count() || self.cells[index] == value {
            return false;
        }
        self.cells[index] = value;
        self.dirty |= 1 << (index / self.dimensions.cols as usize);
        true
    }

    /// Overwrite every cell with `value`
    pub fn fill(&mut self, value: u8) -> bool {
        let mut changed = false;
        for index in 0..self.dimensions.cell_count() {
            changed |= self.set(index, value);
        }
        changed
    }

    /// Lay `text` out in the field `[offset, offset + length)`
    ///
    /// The field is clipped to the buffer. Cells of the field not covered by
    /// the text are filled with `pad` according to `alignment`; text that
    /// does not fit is cut off at the end of the field. Returns whether any
    /// cell changed.
    pub fn place(
        &mut self,
        text: &[u8],
        offset: i32,
        length: usize,
        alignment: Alignment,
        pad: u8,
    ) -> bool {
        let cells = i64::try_from(self.dimensions.cell_count()).unwrap_or(i64::MAX);
        let offset = i64::from(offset.max(0));
        let length = i64::try_from(length).unwrap_or(i64::MAX);
        let text_len = i64::try_from(text.len()).unwrap_or(i64::MAX);
        let end = offset.saturating_add(length).min(cells);

        let padding_end = match alignment {
            Alignment::Left => offset,
            Alignment::Right => end - text_len,
            Alignment::Center => offset + (end - offset - text_len) / 2,
        };

        let mut changed = false;
        let mut pos = offset;

        while pos < padding_end.min(end) {
            changed |= self.set(pos as usize, pad);
            pos += 1;
        }

        for &byte in text {
            if pos >= end {
                break;
            }
            changed |= self.set(pos as usize, byte);
            pos += 1;
        }

        while pos < end {
            changed |= self.set(pos as usize, pad);
            pos += 1;
        }

        changed
    }
}

/// Mask with one bit set for each of `rows` rows
fn all_rows(rows: u8) -> u8 {
    if rows >= 8 { u8::MAX } else { (1u8 << rows) - 1 }
}
