use crate::cursor::CursorMode;
use crate::error::Result;
use crate::geometry::DisplayGeometry;
use crate::glyph::DEFAULT_GLYPH_COUNT;
use crate::screen::{DEFAULT_BASE_ADDR, DEFAULT_WINDOW_SIZE};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Everything needed to bring up a CRTC. Missing fields take the defaults,
/// which describe a 64x16 screen in a 2K window at 0xf000.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrtcConfig {
    pub geometry: DisplayGeometry,
    pub base_addr: u16,
    pub window_size: usize,
    pub glyph_count: usize,
    pub cursor_mode: CursorMode,
    pub cursor_underline: (u8, u8),
}

impl Default for CrtcConfig {
    fn default() -> Self {
        CrtcConfig {
            geometry: DisplayGeometry::default(),
            base_addr: DEFAULT_BASE_ADDR,
            window_size: DEFAULT_WINDOW_SIZE,
            glyph_count: DEFAULT_GLYPH_COUNT,
            cursor_mode: CursorMode::SlowFlash,
            cursor_underline: (15, 15),
        }
    }
}

impl CrtcConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CrtcError;
    use crate::geometry::ColorScheme;

    #[test]
    fn test_empty_json_is_default() -> Result<()> {
        assert_eq!(CrtcConfig::from_json_str("{}")?, CrtcConfig::default());
        Ok(())
    }

    #[test]
    fn test_overrides() -> Result<()> {
        let c = CrtcConfig::from_json_str(
            r#"{
                "geometry": {"columns": 80, "rows": 24, "color_scheme": "amber"},
                "base_addr": 32768,
                "window_size": 2048,
                "cursor_mode": "fast_flash",
                "cursor_underline": [10, 11]
            }"#,
        )?;
        assert_eq!(c.geometry.columns, 80);
        assert_eq!(c.geometry.color_scheme, ColorScheme::Amber);
        assert_eq!(c.base_addr, 0x8000);
        assert_eq!(c.cursor_mode, CursorMode::FastFlash);
        assert_eq!(c.cursor_underline, (10, 11));
        assert_eq!(c.glyph_count, DEFAULT_GLYPH_COUNT);
        Ok(())
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            CrtcConfig::from_json_str(r#"{"cursor_mode": "strobe"}"#),
            Err(CrtcError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            CrtcConfig::from_json_file(Path::new("/nonexistent/crtc.json")),
            Err(CrtcError::Io(_))
        ));
    }
}
