use crate::error::{CrtcError, Result};
use tracing::trace;

// NB. addresses are u16 as the CPU sees them; indices and lengths are usize to
//     stop endless casting. rows and columns are 1-indexed, like the cursor.

/// the code a cell holds when nothing has been written to it (ASCII space)
pub const BLANK_CODE: u8 = 32;

/// where the screen RAM sits in the CPU's address space
pub const DEFAULT_BASE_ADDR: u16 = 0xf000;

/// how much of the address space the screen RAM occupies
pub const DEFAULT_WINDOW_SIZE: usize = 0x800;

/// The CPU/bus side of the screen: single byte reads and writes at absolute
/// addresses. Anything outside the mapped window is the bus's business, so
/// implementations ignore it rather than fault.
pub trait MemoryMapped {
    /// store a character code at an absolute address
    fn write_cell(&mut self, addr: u16, value: u8);

    /// fetch the character code at an absolute address, if it's mapped
    fn read_cell(&self, addr: u16) -> Option<u8>;

    /// write a chunk of bytes starting at an absolute address
    fn write_block(&mut self, data: &[u8], addr: u16) {
        for (offset, value) in data.iter().enumerate() {
            let a = match u16::try_from(offset).ok().and_then(|o| addr.checked_add(o)) {
                Some(a) => a,
                None => break,
            };
            self.write_cell(a, *value);
        }
    }
}

/// Character memory for the whole mapped window. The visible screen is the
/// first `columns * rows` cells, row-major; whatever is left of the window
/// is margin that the CPU can use but the CRTC never displays or scrolls.
///
/// 64x16 layout in a 2K window at 0xf000:
///   0xf000-0xf3ff  visible cells
///   0xf400-0xf7ff  margin
pub struct ScreenBuffer {
    bytes: Box<[u8]>,
    base_addr: u16,
    columns: usize,
    rows: usize,
}

impl ScreenBuffer {
    pub fn new(base_addr: u16, capacity: usize, columns: usize, rows: usize) -> Result<Self> {
        if columns == 0 || rows == 0 {
            return Err(CrtcError::InvalidGeometry(format!(
                "{}x{} character cells",
                columns, rows
            )));
        }
        if columns * rows > capacity {
            return Err(CrtcError::InvalidGeometry(format!(
                "{}x{} cells don't fit a {} byte window",
                columns, rows, capacity
            )));
        }
        if base_addr as usize + capacity > 0x1_0000 {
            return Err(CrtcError::InvalidGeometry(format!(
                "{} byte window at 0x{:04x} runs off the end of the address space",
                capacity, base_addr
            )));
        }
        Ok(ScreenBuffer {
            bytes: vec![BLANK_CODE; capacity].into_boxed_slice(),
            base_addr,
            columns,
            rows,
        })
    }

    pub fn base_addr(&self) -> u16 {
        self.base_addr
    }

    /// size of the whole window, margin included
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// every cell in the window, row-major
    pub fn cells(&self) -> &[u8] {
        &self.bytes
    }

    /// One visible row, 1-indexed.
    ///
    /// Panics if `row` is 0 or below the bottom of the screen.
    pub fn row(&self, row: usize) -> &[u8] {
        assert!(
            (1..=self.rows).contains(&row),
            "row {} is not on screen",
            row
        );
        let start = (row - 1) * self.columns;
        &self.bytes[start..start + self.columns]
    }

    /// the code at a visible cell, 1-indexed; None off screen
    pub fn cell(&self, col: usize, row: usize) -> Option<u8> {
        self.visible_index(col, row).map(|i| self.bytes[i])
    }

    /// overwrite a visible cell, 1-indexed; off-screen cells are ignored
    pub(crate) fn set(&mut self, col: usize, row: usize, value: u8) {
        if let Some(i) = self.visible_index(col, row) {
            self.bytes[i] = value;
        }
    }

    fn visible_index(&self, col: usize, row: usize) -> Option<usize> {
        if (1..=self.columns).contains(&col) && (1..=self.rows).contains(&row) {
            Some((row - 1) * self.columns + col - 1)
        } else {
            None
        }
    }

    fn window_index(&self, addr: u16) -> Option<usize> {
        let offset = addr.checked_sub(self.base_addr)? as usize;
        (offset < self.bytes.len()).then(|| offset)
    }

    /// blank the whole window, margin included
    pub fn clear(&mut self) {
        self.bytes.fill(BLANK_CODE);
    }

    /// Drop raw bytes onto the screen at a fixed position. There's no wrap
    /// and no cursor tracking: anything past the end of the row is clipped.
    pub fn place_text(&mut self, text: &[u8], col: usize, row: usize) {
        if self.visible_index(col, row).is_none() {
            return;
        }
        let room = self.columns - (col - 1);
        for (i, value) in text.iter().take(room).enumerate() {
            self.set(col + i, row, *value);
        }
    }

    /// shift every visible row up by one and blank the bottom row
    pub fn scroll_up(&mut self) {
        let visible = self.columns * self.rows;
        self.bytes.copy_within(self.columns..visible, 0);
        self.bytes[visible - self.columns..visible].fill(BLANK_CODE);
    }
}

impl MemoryMapped for ScreenBuffer {
    fn write_cell(&mut self, addr: u16, value: u8) {
        match self.window_index(addr) {
            Some(i) => self.bytes[i] = value,
            None => trace!(addr, value, "ignoring write outside screen window"),
        }
    }

    fn read_cell(&self, addr: u16) -> Option<u8> {
        self.window_index(addr).map(|i| self.bytes[i])
    }
}
