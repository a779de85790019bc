/// # cursor
///
/// The 6545-style cursor is driven from the cursor start register (R10):
///  bits 0-4  first scan line of the underline
///  bits 5-6  blink mode
///             00  steady
///             01  no cursor
///             10  blink at 1/16 field rate (fast)
///             11  blink at 1/32 field rate (slow)
/// and the cursor end register (R11), bits 0-4: last scan line.
///
/// Blink timing is counted in frames. The scheduler calls tick() once per
/// frame, so a flashing cursor keeps the same cadence however fast the CPU
/// is running.
use serde::{Deserialize, Serialize};
use tracing::debug;

const SLOW_FLASH_PERIOD: u32 = 40;
const FAST_FLASH_PERIOD: u32 = 20;

const MODE_BITS: u8 = 0b0110_0000;
const SCAN_LINE_BITS: u8 = 0b0001_1111;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorMode {
    #[default]
    NoBlink,
    Hidden,
    SlowFlash,
    FastFlash,
}

impl CursorMode {
    /// frames in one blink cycle, for the modes that blink
    pub fn period(self) -> Option<u32> {
        match self {
            CursorMode::SlowFlash => Some(SLOW_FLASH_PERIOD),
            CursorMode::FastFlash => Some(FAST_FLASH_PERIOD),
            CursorMode::NoBlink | CursorMode::Hidden => None,
        }
    }

    /// decode the blink bits of a cursor start register value
    pub fn from_register(value: u8) -> Self {
        match (value & MODE_BITS) >> 5 {
            0b00 => CursorMode::NoBlink,
            0b01 => CursorMode::Hidden,
            0b10 => CursorMode::FastFlash,
            _ => CursorMode::SlowFlash,
        }
    }
}

/// Cursor position plus blink state. Positions are 1-indexed and always on
/// screen, except that between writes the column may sit one past the last
/// column, meaning the next character wraps first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorTimer {
    column: usize,
    row: usize,
    columns: usize,
    rows: usize,
    mode: CursorMode,
    counter: u32,
    underline: (u8, u8),
}

impl CursorTimer {
    /// a cursor at home on a `columns` x `rows` screen
    pub fn new(columns: usize, rows: usize, mode: CursorMode, underline: (u8, u8)) -> Self {
        CursorTimer {
            column: 1,
            row: 1,
            columns: columns.max(1),
            rows: rows.max(1),
            mode,
            counter: 0,
            underline,
        }
    }

    /// (column, row), 1-indexed
    pub fn position(&self) -> (usize, usize) {
        (self.column, self.row)
    }

    /// move the cursor, pulling anything off screen back to the nearest edge
    pub fn set_position(&mut self, column: usize, row: usize) {
        self.column = column.clamp(1, self.columns + 1);
        self.row = row.clamp(1, self.rows);
    }

    /// advance one frame
    pub fn tick(&mut self) {
        self.counter = match self.mode.period() {
            Some(period) => (self.counter + 1) % period,
            None => 0,
        };
    }

    /// whether the renderer should draw the cursor this frame
    pub fn visible(&self) -> bool {
        match self.mode {
            CursorMode::NoBlink => true,
            CursorMode::Hidden => false,
            CursorMode::SlowFlash | CursorMode::FastFlash => {
                self.mode.period().map_or(true, |p| self.counter < p / 2)
            }
        }
    }

    pub fn mode(&self) -> CursorMode {
        self.mode
    }

    /// switch blink mode; the new mode starts at the top of its visible phase
    pub fn set_mode(&mut self, mode: CursorMode) {
        if mode != self.mode {
            debug!(?mode, "cursor mode");
        }
        self.mode = mode;
        self.counter = 0;
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// first and last pixel rows of the underline, for the renderer
    pub fn underline(&self) -> (u8, u8) {
        self.underline
    }

    pub fn set_underline(&mut self, start: u8, end: u8) {
        self.underline = (start, end);
    }

    /// cursor start register: blink mode and first underline row
    pub fn set_start_register(&mut self, value: u8) {
        self.set_mode(CursorMode::from_register(value));
        self.underline.0 = value & SCAN_LINE_BITS;
    }

    /// cursor end register: last underline row
    pub fn set_end_register(&mut self, value: u8) {
        self.underline.1 = value & SCAN_LINE_BITS;
    }

    pub fn home(&mut self) {
        self.set_position(1, 1);
    }
}
