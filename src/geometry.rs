use crate::error::{CrtcError, Result};
use serde::{Deserialize, Serialize};

/// Which phosphor the renderer should imitate. The core never looks at this,
/// it just hands it on with every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    #[default]
    White,
    Green,
    Amber,
}

/// static layout of the character screen, fixed when the CRTC is built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayGeometry {
    pub columns: usize,
    pub rows: usize,
    /// pixels per cell, horizontally
    pub cell_width: usize,
    /// pixels per cell, vertically; also the number of glyph rows per character
    pub cell_height: usize,
    pub zoom: u8,
    pub interlace: bool,
    pub color_scheme: ColorScheme,
}

impl Default for DisplayGeometry {
    fn default() -> Self {
        DisplayGeometry {
            columns: 64,
            rows: 16,
            cell_width: 8,
            cell_height: 16,
            zoom: 1,
            interlace: false,
            color_scheme: ColorScheme::White,
        }
    }
}

impl DisplayGeometry {
    /// number of visible cells
    pub fn cell_count(&self) -> usize {
        self.columns * self.rows
    }

    pub fn canvas_width(&self) -> usize {
        self.columns * self.cell_width
    }

    pub fn canvas_height(&self) -> usize {
        self.rows * self.cell_height
    }

    /// reject layouts the controller can't drive
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 || self.rows == 0 {
            return Err(CrtcError::InvalidGeometry(format!(
                "{}x{} character cells",
                self.columns, self.rows
            )));
        }
        // glyph rows are one byte wide
        if self.cell_width == 0 || self.cell_width > 8 || self.cell_height == 0 {
            return Err(CrtcError::InvalidGeometry(format!(
                "{}x{} pixel cell",
                self.cell_width, self.cell_height
            )));
        }
        if self.zoom == 0 {
            return Err(CrtcError::InvalidGeometry("zoom of 0".to_string()));
        }
        Ok(())
    }
}
