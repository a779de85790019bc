///
/// ## Design
///
/// * emulate the character-cell CRTC only: screen RAM, character generator,
///   cursor and blink timing
/// * the CPU, the bus and the renderer live outside and talk to it through
///   narrow interfaces
/// * time is counted in frames, not wallclock; the scheduler calls tick()
///   once per frame
/// * out-of-window writes are dropped on the floor, like the real decoder
///
/// Model
///
/// Crtc
///  |-- ScreenBuffer  (MemoryMapped: what the CPU/bus writes)
///  |-- GlyphTable    (loaded once from the character ROM)
///  |-- CursorTimer   (position, blink mode, underline)
///  |-- DisplayGeometry
///  `-- snapshot() -> FrameSnapshot (what the renderer reads)
///
/// ScrollingWriter borrows the screen and cursor to teletype text out, which
/// is how the boot banner gets printed.
///
/// The front end (display, input, frame_loop) is a terminal stand-in for the
/// surrounding machine.
pub mod config;
pub mod crtc;
pub mod cursor;
pub mod display;
pub mod error;
pub mod frame_loop;
pub mod geometry;
pub mod glyph;
pub mod input;
pub mod screen;
pub mod writer;

pub use config::CrtcConfig;
pub use crtc::{Crtc, CursorView, FrameSnapshot};
pub use cursor::{CursorMode, CursorTimer};
pub use error::{CrtcError, Result};
pub use geometry::{ColorScheme, DisplayGeometry};
pub use glyph::GlyphTable;
pub use screen::{MemoryMapped, ScreenBuffer, BLANK_CODE};
pub use writer::ScrollingWriter;
