use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CrtcError>;

#[derive(Debug, Error)]
pub enum CrtcError {
    #[error("invalid display geometry: {0}")]
    InvalidGeometry(String),
    #[error("glyph ROM load of {requested} bytes truncated to table capacity of {capacity}")]
    GlyphRomTooLarge { requested: usize, capacity: usize },
    #[error("glyph ROM source ends at {available} bytes; wanted {requested} from offset {offset}")]
    GlyphRomSourceTruncated {
        offset: usize,
        requested: usize,
        available: usize,
    },
    #[error("glyph ROM has already been loaded")]
    GlyphRomAlreadyLoaded,
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}
