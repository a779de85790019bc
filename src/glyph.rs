use crate::error::{CrtcError, Result};
use tracing::{debug, warn};

/// what an undefined glyph row looks like: no pixels lit
pub const BLANK_PATTERN: u8 = 0x00;

/// glyphs per character-generator bank; bank n starts at glyph n * 128
pub const BANK_GLYPHS: usize = 128;

/// how many glyphs the character generator holds
pub const DEFAULT_GLYPH_COUNT: usize = 256;

/// Character generator contents, one byte per pixel row, most significant bit
/// on the left. Glyph `n` occupies bytes `n * rows_per_glyph ..` so a ROM dump
/// can be copied straight in.
///
/// The table is written once at bring-up and only read after that.
pub struct GlyphTable {
    bytes: Box<[u8]>,
    rows_per_glyph: usize,
    loaded: bool,
}

impl GlyphTable {
    pub fn new(glyph_count: usize, rows_per_glyph: usize) -> Self {
        GlyphTable {
            bytes: vec![BLANK_PATTERN; glyph_count * rows_per_glyph].into_boxed_slice(),
            rows_per_glyph,
            loaded: false,
        }
    }

    /// build a table and fill it from a ROM image in one go
    pub fn from_rom(
        glyph_count: usize,
        rows_per_glyph: usize,
        rom: &[u8],
        source_offset: usize,
        length: usize,
    ) -> Result<Self> {
        let mut table = GlyphTable::new(glyph_count, rows_per_glyph);
        table.load(rom, source_offset, length)?;
        Ok(table)
    }

    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    pub fn rows_per_glyph(&self) -> usize {
        self.rows_per_glyph
    }

    pub fn glyph_count(&self) -> usize {
        self.bytes.len().checked_div(self.rows_per_glyph).unwrap_or(0)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Copy `length` bytes of `rom` from `source_offset` into the table.
    ///
    /// Only the first call does anything. A load that doesn't fit, or asks
    /// for more than `rom` has, still copies what it can but reports the
    /// shortfall so bring-up can treat it as a configuration error.
    ///
    /// An offset at or past the end of `rom` has nothing to copy; it's
    /// rejected without using up the one load.
    pub fn load(&mut self, rom: &[u8], source_offset: usize, length: usize) -> Result<()> {
        if self.loaded {
            return Err(CrtcError::GlyphRomAlreadyLoaded);
        }
        if source_offset >= rom.len() {
            warn!(source_offset, available = rom.len(), "glyph ROM offset past end of image");
            return Err(CrtcError::GlyphRomSourceTruncated {
                offset: source_offset,
                requested: length,
                available: rom.len(),
            });
        }
        self.loaded = true;

        let capacity = self.capacity();
        let wanted = length.min(capacity);
        let available = rom.len().saturating_sub(source_offset);
        let count = wanted.min(available);
        if count > 0 {
            self.bytes[..count].copy_from_slice(&rom[source_offset..source_offset + count]);
        }
        debug!(source_offset, count, capacity, "loaded glyph ROM");

        if length > capacity {
            warn!(length, capacity, "glyph ROM truncated to table size");
            return Err(CrtcError::GlyphRomTooLarge {
                requested: length,
                capacity,
            });
        }
        if available < wanted {
            warn!(source_offset, length, available = rom.len(), "glyph ROM image too short");
            return Err(CrtcError::GlyphRomSourceTruncated {
                offset: source_offset,
                requested: length,
                available: rom.len(),
            });
        }
        Ok(())
    }

    /// pixel pattern for one row of a character in bank 0
    pub fn glyph_row(&self, code: u8, pixel_row: usize) -> u8 {
        self.glyph_row_in_bank(0, code, pixel_row)
    }

    /// pixel pattern for one row of a character, with the character slot
    /// shifted along by `bank` banks; anything off the end is blank
    pub fn glyph_row_in_bank(&self, bank: u8, code: u8, pixel_row: usize) -> u8 {
        if pixel_row >= self.rows_per_glyph {
            return BLANK_PATTERN;
        }
        let slot = code as usize + bank as usize * BANK_GLYPHS;
        self.bytes
            .get(slot * self.rows_per_glyph + pixel_row)
            .copied()
            .unwrap_or(BLANK_PATTERN)
    }

    /// all the rows of one bank 0 glyph, if the table holds it
    pub fn glyph(&self, code: u8) -> Option<&[u8]> {
        let start = code as usize * self.rows_per_glyph;
        self.bytes.get(start..start + self.rows_per_glyph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rom(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 7 + i / 256) as u8).collect()
    }

    #[test]
    fn test_starts_blank() {
        let t = GlyphTable::new(256, 16);
        assert_eq!(t.capacity(), 4096);
        assert_eq!(t.glyph_count(), 256);
        assert!(!t.is_loaded());
        assert_eq!(t.glyph_row(b'A', 3), BLANK_PATTERN);
    }

    #[test]
    fn test_exact_load_maps_every_row() -> Result<()> {
        let src = rom(4096);
        let t = GlyphTable::from_rom(256, 16, &src, 0, 4096)?;
        for code in 0..=255u8 {
            for row in 0..16 {
                assert_eq!(t.glyph_row(code, row), src[code as usize * 16 + row]);
            }
        }
        assert!(t.is_loaded());
        Ok(())
    }

    #[test]
    fn test_load_from_offset() -> Result<()> {
        let mut src = vec![0xaa; 0x100];
        src.extend_from_slice(&[0x18, 0x24, 0x42, 0x7e]);
        let mut t = GlyphTable::new(2, 2);
        t.load(&src, 0x100, 4)?;
        assert_eq!(t.glyph(0), Some(&[0x18, 0x24][..]));
        assert_eq!(t.glyph(1), Some(&[0x42, 0x7e][..]));
        assert_eq!(t.glyph(2), None);
        Ok(())
    }

    #[test]
    fn test_oversized_load_truncates_and_reports() {
        let src = rom(64);
        let mut t = GlyphTable::new(4, 8);
        let err = t.load(&src, 0, 64).unwrap_err();
        assert!(matches!(
            err,
            CrtcError::GlyphRomTooLarge {
                requested: 64,
                capacity: 32
            }
        ));
        assert_eq!(t.glyph_row(3, 7), src[31]);
        assert!(t.is_loaded());
    }

    #[test]
    fn test_short_source_reports() {
        let src = rom(10);
        let mut t = GlyphTable::new(4, 8);
        let err = t.load(&src, 4, 16).unwrap_err();
        assert!(matches!(err, CrtcError::GlyphRomSourceTruncated { .. }));
        assert_eq!(t.glyph(0).unwrap()[..6], src[4..10]);
        assert_eq!(t.glyph_row(0, 6), BLANK_PATTERN);
    }

    #[test]
    fn test_offset_past_end_leaves_table_unloaded() -> Result<()> {
        let src = rom(10);
        let mut t = GlyphTable::new(4, 8);
        assert!(matches!(
            t.load(&src, 100, 8),
            Err(CrtcError::GlyphRomSourceTruncated { offset: 100, .. })
        ));
        assert!(matches!(
            t.load(&src, 10, 0),
            Err(CrtcError::GlyphRomSourceTruncated { .. })
        ));
        assert!(t.load(&[], 0, 0).is_err());
        assert!(!t.is_loaded());
        assert!(t.glyph(0).unwrap().iter().all(|b| *b == BLANK_PATTERN));

        // a sensible load still goes through afterwards
        t.load(&src, 2, 8)?;
        assert!(t.is_loaded());
        assert_eq!(t.glyph(0), Some(&src[2..10]));
        Ok(())
    }

    #[test]
    fn test_second_load_rejected() -> Result<()> {
        let mut t = GlyphTable::new(1, 2);
        t.load(&[1, 2], 0, 2)?;
        assert!(matches!(
            t.load(&[9, 9], 0, 2),
            Err(CrtcError::GlyphRomAlreadyLoaded)
        ));
        assert_eq!(t.glyph(0), Some(&[1, 2][..]));
        Ok(())
    }

    #[test]
    fn test_out_of_range_lookups_are_blank() -> Result<()> {
        let t = GlyphTable::from_rom(128, 8, &[0xff; 1024], 0, 1024)?;
        assert_eq!(t.glyph_row(127, 7), 0xff);
        assert_eq!(t.glyph_row(127, 8), BLANK_PATTERN);
        assert_eq!(t.glyph_row(128, 0), BLANK_PATTERN);
        assert_eq!(t.glyph_row_in_bank(1, 0, 0), BLANK_PATTERN);
        Ok(())
    }

    #[test]
    fn test_bank_offset() -> Result<()> {
        let src = rom(4096);
        let t = GlyphTable::from_rom(256, 16, &src, 0, 4096)?;
        assert_eq!(t.glyph_row_in_bank(1, 5, 2), src[(128 + 5) * 16 + 2]);
        assert_eq!(t.glyph_row_in_bank(1, 0x7f, 15), src[4095]);
        assert_eq!(t.glyph_row_in_bank(1, 0x80, 0), BLANK_PATTERN);
        Ok(())
    }
}
