use crate::cursor::CursorTimer;
use crate::screen::ScreenBuffer;
use tracing::trace;

pub const LINE_FEED: u8 = 0x0a;

/// Teletype-style output at the cursor, used for the boot banner. Text wraps
/// at the right edge and the screen scrolls when it runs off the bottom.
///
/// Wrapping is deferred: after a character lands in the last column the
/// cursor sits one past the edge and only moves down when the next character
/// arrives. A character that wraps off the bottom row is swallowed by the
/// scroll it causes, which leaves the cursor at the start of a blank last row.
pub struct ScrollingWriter<'a> {
    screen: &'a mut ScreenBuffer,
    cursor: &'a mut CursorTimer,
}

impl<'a> ScrollingWriter<'a> {
    pub fn new(screen: &'a mut ScreenBuffer, cursor: &'a mut CursorTimer) -> Self {
        ScrollingWriter { screen, cursor }
    }

    pub fn print(&mut self, text: &str) {
        self.print_bytes(text.as_bytes());
    }

    pub fn print_bytes(&mut self, text: &[u8]) {
        for code in text {
            self.put(*code);
        }
    }

    /// append one character code at the cursor
    pub fn put(&mut self, code: u8) {
        let columns = self.screen.columns();
        let rows = self.screen.rows();
        let (mut column, mut row) = self.cursor.position();

        if column > columns {
            column = 1;
            row += 1;
        }

        if code == LINE_FEED {
            // straight to the next row; the rest of this one is left alone
            column = 1;
            row += 1;
        } else if row <= rows {
            self.screen.set(column, row, code);
            column += 1;
        }

        if row > rows {
            row = rows;
            column = 1;
            self.screen.scroll_up();
            trace!("scrolled");
        }
        self.cursor.set_position(column, row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::CursorMode;
    use crate::screen::BLANK_CODE;

    fn setup(columns: usize, rows: usize) -> (ScreenBuffer, CursorTimer) {
        let screen = ScreenBuffer::new(0, columns * rows, columns, rows).unwrap();
        let cursor = CursorTimer::new(columns, rows, CursorMode::NoBlink, (0, 0));
        (screen, cursor)
    }

    #[test]
    fn test_print_advances_cursor() {
        let (mut s, mut c) = setup(8, 4);
        ScrollingWriter::new(&mut s, &mut c).print("abc");
        assert_eq!(s.row(1), b"abc     ");
        assert_eq!(c.position(), (4, 1));
    }

    #[test]
    fn test_line_feed_jumps_rows() {
        let (mut s, mut c) = setup(8, 4);
        ScrollingWriter::new(&mut s, &mut c).print("A\nB");
        assert_eq!(s.row(1), b"A       ");
        assert_eq!(s.row(2), b"B       ");
        assert_eq!(c.position(), (2, 2));
    }

    #[test]
    fn test_line_feed_leaves_rest_of_row() {
        let (mut s, mut c) = setup(4, 3);
        s.place_text(b"wxyz", 1, 1);
        ScrollingWriter::new(&mut s, &mut c).print("a\n");
        assert_eq!(s.row(1), b"axyz");
        assert_eq!(c.position(), (1, 2));
    }

    #[test]
    fn test_wrap_is_deferred() {
        let (mut s, mut c) = setup(4, 3);
        let mut w = ScrollingWriter::new(&mut s, &mut c);
        w.print("abcd");
        w.put(b'e');
        drop(w);
        assert_eq!(s.row(1), b"abcd");
        assert_eq!(s.row(2), b"e   ");
        assert_eq!(c.position(), (2, 2));
    }

    #[test]
    fn test_full_screen_does_not_scroll() {
        let (mut s, mut c) = setup(4, 3);
        ScrollingWriter::new(&mut s, &mut c).print("aaaabbbbcccc");
        assert_eq!(s.cells(), b"aaaabbbbcccc");
        assert_eq!(c.position(), (5, 3));
    }

    #[test]
    fn test_one_past_full_scrolls_once() {
        let (mut s, mut c) = setup(4, 3);
        ScrollingWriter::new(&mut s, &mut c).print("aaaabbbbccccd");
        assert_eq!(s.cells(), b"bbbbcccc    ");
        assert_eq!(c.position(), (1, 3));
    }

    #[test]
    fn test_output_continues_after_scroll() {
        let (mut s, mut c) = setup(4, 3);
        ScrollingWriter::new(&mut s, &mut c).print("aaaabbbbccccdef");
        assert_eq!(s.cells(), b"bbbbccccef  ");
        assert_eq!(c.position(), (3, 3));
    }

    #[test]
    fn test_line_feed_on_last_row_scrolls() {
        let (mut s, mut c) = setup(4, 3);
        ScrollingWriter::new(&mut s, &mut c).print("1\n2\n3\n4");
        assert_eq!(s.cells(), b"2   3   4   ");
        assert_eq!(c.position(), (2, 3));
    }

    #[test]
    fn test_line_feed_after_full_row() {
        let (mut s, mut c) = setup(4, 3);
        ScrollingWriter::new(&mut s, &mut c).print("abcd\nx");
        assert_eq!(s.row(1), b"abcd");
        assert_eq!(s.row(2), &[BLANK_CODE; 4]);
        assert_eq!(s.row(3), b"x   ");
    }

    #[test]
    fn test_single_row_screen() {
        let (mut s, mut c) = setup(3, 1);
        ScrollingWriter::new(&mut s, &mut c).print("abcde");
        assert_eq!(s.cells(), b"e  ");
        assert_eq!(c.position(), (2, 1));
    }
}
