/// # crtc
///
/// The display controller as the rest of the machine sees it:
///  * the CPU/bus writes character codes through MemoryMapped
///  * the platform loads the character generator once, at bring-up
///  * the scheduler calls tick() once per frame
///  * the renderer takes a snapshot() once per frame and draws it
///
/// run_frame() fixes the order within a frame: the CPU's bundle of writes
/// first, then the blink tick. The order never changes, so the blink cadence
/// stays locked to the frame rate.
use crate::config::CrtcConfig;
use crate::cursor::{CursorMode, CursorTimer};
use crate::error::Result;
use crate::geometry::DisplayGeometry;
use crate::glyph::GlyphTable;
use crate::screen::{MemoryMapped, ScreenBuffer};
use crate::writer::ScrollingWriter;
use tracing::debug;

pub struct Crtc {
    screen: ScreenBuffer,
    glyphs: GlyphTable,
    cursor: CursorTimer,
    geometry: DisplayGeometry,
}

/// where the renderer should draw the cursor this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorView {
    pub column: usize,
    pub row: usize,
    pub visible: bool,
    pub underline: (u8, u8),
}

/// read-only view of everything the renderer needs for one frame
pub struct FrameSnapshot<'a> {
    /// the whole window, margin included
    pub cells: &'a [u8],
    pub glyphs: &'a GlyphTable,
    pub cursor: CursorView,
    pub geometry: &'a DisplayGeometry,
}

impl<'a> FrameSnapshot<'a> {
    /// One visible row of character codes, 1-indexed.
    ///
    /// Panics if `row` is 0 or below the bottom of the screen.
    pub fn row(&self, row: usize) -> &'a [u8] {
        assert!(
            (1..=self.geometry.rows).contains(&row),
            "row {} is not on screen",
            row
        );
        let cells = self.cells;
        let start = (row - 1) * self.geometry.columns;
        &cells[start..start + self.geometry.columns]
    }
}

impl Crtc {
    pub fn new(config: &CrtcConfig) -> Result<Crtc> {
        let geometry = config.geometry.clone();
        geometry.validate()?;
        let screen = ScreenBuffer::new(
            config.base_addr,
            config.window_size,
            geometry.columns,
            geometry.rows,
        )?;
        debug!(
            columns = geometry.columns,
            rows = geometry.rows,
            base_addr = config.base_addr,
            window_size = config.window_size,
            "crtc up"
        );
        Ok(Crtc {
            screen,
            glyphs: GlyphTable::new(config.glyph_count, geometry.cell_height),
            cursor: CursorTimer::new(
                geometry.columns,
                geometry.rows,
                config.cursor_mode,
                config.cursor_underline,
            ),
            geometry,
        })
    }

    /// fill the character generator from a ROM image; allowed once
    pub fn load_glyph_rom(&mut self, rom: &[u8], source_offset: usize, length: usize) -> Result<()> {
        self.glyphs.load(rom, source_offset, length)
    }

    /// blank the screen and home the cursor
    pub fn clear(&mut self) {
        self.screen.clear();
        self.cursor.home();
    }

    /// write raw bytes at a fixed position, clipped at the end of the row
    pub fn place_text(&mut self, text: &[u8], col: usize, row: usize) {
        self.screen.place_text(text, col, row);
    }

    /// teletype text out at the cursor
    pub fn print(&mut self, text: &str) {
        self.writer().print(text);
    }

    pub fn put(&mut self, code: u8) {
        self.writer().put(code);
    }

    fn writer(&mut self) -> ScrollingWriter<'_> {
        ScrollingWriter::new(&mut self.screen, &mut self.cursor)
    }

    /// advance the blink timer by one frame
    pub fn tick(&mut self) {
        self.cursor.tick();
    }

    /// one frame: the CPU's writes, then the blink tick
    pub fn run_frame<F>(&mut self, cpu: F)
    where
        F: FnOnce(&mut dyn MemoryMapped),
    {
        cpu(&mut self.screen);
        self.tick();
    }

    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        let (column, row) = self.cursor.position();
        FrameSnapshot {
            cells: self.screen.cells(),
            glyphs: &self.glyphs,
            cursor: CursorView {
                column: column.min(self.geometry.columns),
                row,
                visible: self.cursor.visible(),
                underline: self.cursor.underline(),
            },
            geometry: &self.geometry,
        }
    }

    pub fn screen(&self) -> &ScreenBuffer {
        &self.screen
    }

    pub fn glyphs(&self) -> &GlyphTable {
        &self.glyphs
    }

    pub fn cursor(&self) -> &CursorTimer {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut CursorTimer {
        &mut self.cursor
    }

    pub fn set_cursor_mode(&mut self, mode: CursorMode) {
        self.cursor.set_mode(mode);
    }

    pub fn geometry(&self) -> &DisplayGeometry {
        &self.geometry
    }

    pub fn set_zoom(&mut self, zoom: u8) {
        self.geometry.zoom = zoom.max(1);
    }

    pub fn set_interlace(&mut self, interlace: bool) {
        self.geometry.interlace = interlace;
    }
}

impl MemoryMapped for Crtc {
    fn write_cell(&mut self, addr: u16, value: u8) {
        self.screen.write_cell(addr, value);
    }

    fn read_cell(&self, addr: u16) -> Option<u8> {
        self.screen.read_cell(addr)
    }
}
