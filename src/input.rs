use crate::writer::LINE_FEED;
use crossterm::event::{poll, read, Event, KeyCode};
use crossterm::terminal;
use std::collections::HashMap;
use std::io;
use std::time::Duration;
use tracing::warn;

/// the code a keyboard hands over for Esc; the front end treats it as "quit"
pub const ESCAPE: u8 = 0x1b;

/// keys that don't carry their own character
const SPECIAL_KEYMAP: [(KeyCode, u8); 3] = [
    (KeyCode::Enter, LINE_FEED),
    (KeyCode::Tab, b' '),
    (KeyCode::Esc, ESCAPE),
];

/// reads keypresses as character codes
pub trait Input {
    /// get a list of all the mapped keys that have been pressed recently,
    /// without flushing them from the buffer
    fn peek_keys(&mut self) -> Result<&[u8], io::Error>;

    /// flush all the keypresses from the buffer
    fn flush_keys(&mut self) -> Result<(), io::Error>;

    /// hand over every keypress so far and empty the buffer in one go, so
    /// nothing that arrives in between gets flushed unseen
    fn take_keys(&mut self) -> Result<Vec<u8>, io::Error>;
}

/// simple implementation of Input, using the terminal in raw mode
pub struct StdinInput {
    buffer: Vec<u8>,
    keymap: HashMap<KeyCode, u8>,
}

impl StdinInput {
    pub fn new() -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        Ok(StdinInput {
            buffer: Vec::new(),
            keymap: HashMap::from(SPECIAL_KEYMAP),
        })
    }

    fn map_key(&self, code: KeyCode) -> Option<u8> {
        match code {
            KeyCode::Char(c) if c.is_ascii() && !c.is_ascii_control() => Some(c as u8),
            other => self.keymap.get(&other).copied(),
        }
    }

    fn read_stdin(&mut self) -> Result<(), io::Error> {
        while poll(Duration::from_millis(0))? {
            match read()? {
                Event::Key(evt) => match self.map_key(evt.code) {
                    Some(mapped_key) => self.buffer.push(mapped_key),
                    None => warn!(key = ?evt.code, "can't map key to a character code"),
                },
                Event::Resize(..) => {}
                other => warn!(event = ?other, "unknown event received"),
            }
        }
        Ok(())
    }
}

impl Drop for StdinInput {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl Input for StdinInput {
    fn peek_keys(&mut self) -> Result<&[u8], io::Error> {
        self.read_stdin()?;
        Ok(self.buffer.as_slice())
    }

    fn flush_keys(&mut self) -> Result<(), io::Error> {
        self.read_stdin()?;
        self.buffer.clear();
        Ok(())
    }

    fn take_keys(&mut self) -> Result<Vec<u8>, io::Error> {
        self.read_stdin()?;
        Ok(std::mem::take(&mut self.buffer))
    }
}

/// dummy Input implementation for testing
pub struct DummyInput {
    bytes: Vec<u8>,
}

impl DummyInput {
    pub fn new(keys: &[u8]) -> Self {
        DummyInput {
            bytes: Vec::from(keys),
        }
    }
}

impl Input for DummyInput {
    fn peek_keys(&mut self) -> Result<&[u8], io::Error> {
        Ok(self.bytes.as_slice())
    }

    fn flush_keys(&mut self) -> Result<(), io::Error> {
        self.bytes.clear();
        Ok(())
    }

    fn take_keys(&mut self) -> Result<Vec<u8>, io::Error> {
        Ok(std::mem::take(&mut self.bytes))
    }
}
