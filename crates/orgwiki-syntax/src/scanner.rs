//! # Scanner - Byte Sources With One Byte Of Pushback
//!
//! The parser pulls input one byte at a time and may push back at most the
//! byte it just read. Anything that can honour that contract implements
//! [`ByteScanner`].
//!
//! Two sources are provided:
//!
//! - [`SliceScanner`] over an in-memory byte slice
//! - [`ReaderScanner`] over any [`std::io::Read`]
//!
//! ```
//! use orgwiki_syntax::scanner::{ByteScanner, SliceScanner};
//!
//! let mut s = SliceScanner::new(b"ab");
//! assert_eq!(s.read_byte(), Some(b'a'));
//! s.unread_byte();
//! assert_eq!(s.read_byte(), Some(b'a'));
//! assert_eq!(s.read_byte(), Some(b'b'));
//! assert_eq!(s.read_byte(), None);
//! ```

use std::io::{self, BufReader, Read};

/// A pull-based byte source with single-level pushback.
pub trait ByteScanner {
    /// Read the next byte, or `None` at end of input.
    fn read_byte(&mut self) -> Option<u8>;

    /// Undo the most recent successful [`read_byte`](Self::read_byte).
    ///
    /// Calling this twice without an intervening read, or after a read
    /// that returned `None`, does nothing.
    fn unread_byte(&mut self);
}

/// Scanner over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct SliceScanner<'a> {
    bytes: &'a [u8],
    pos: usize,
    can_unread: bool,
}

impl<'a> SliceScanner<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            can_unread: false,
        }
    }

    /// Bytes not yet read.
    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }
}

impl ByteScanner for SliceScanner<'_> {
    fn read_byte(&mut self) -> Option<u8> {
        match self.bytes.get(self.pos).copied() {
            Some(b) => {
                self.pos += 1;
                self.can_unread = true;
                Some(b)
            }
            None => {
                self.can_unread = false;
                None
            }
        }
    }

    fn unread_byte(&mut self) {
        if self.can_unread {
            self.pos -= 1;
            self.can_unread = false;
        }
    }
}

/// Scanner over any reader.
///
/// A read failure other than [`io::ErrorKind::Interrupted`] is logged and
/// treated as end of input; the scanner stays exhausted afterwards.
pub struct ReaderScanner<R> {
    reader: BufReader<R>,
    last: Option<u8>,
    pushed_back: bool,
    exhausted: bool,
}

impl<R: Read> ReaderScanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            last: None,
            pushed_back: false,
            exhausted: false,
        }
    }

    fn fill(&mut self) -> Option<u8> {
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return None,
                Ok(_) => return Some(buf[0]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    log::warn!("input read failed, treating as end of input: {e}");
                    return None;
                }
            }
        }
    }
}

impl<R: Read> ByteScanner for ReaderScanner<R> {
    fn read_byte(&mut self) -> Option<u8> {
        if self.pushed_back {
            self.pushed_back = false;
            return self.last;
        }
        if self.exhausted {
            self.last = None;
            return None;
        }
        self.last = self.fill();
        if self.last.is_none() {
            self.exhausted = true;
        }
        self.last
    }

    fn unread_byte(&mut self) {
        if self.last.is_some() {
            self.pushed_back = true;
        }
    }
}
