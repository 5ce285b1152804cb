//! Byte cursor over source text.
//!
//! Reading past the end yields `0`; `is_eof` tells a real NUL byte apart
//! from the end of input.

pub(crate) struct Cursor<'a> {
    bytes: &'a [u8],
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Cursor {
            bytes: source.as_bytes(),
            source,
            pos: 0,
        }
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    #[inline]
    pub(crate) fn current(&self) -> u8 {
        self.bytes.get(self.pos).copied().unwrap_or(0)
    }

    #[inline]
    pub(crate) fn peek(&self) -> u8 {
        self.bytes.get(self.pos + 1).copied().unwrap_or(0)
    }

    /// The character starting at the cursor.
    #[inline]
    pub(crate) fn current_char(&self) -> Option<char> {
        self.source.get(self.pos..)?.chars().next()
    }

    #[inline]
    pub(crate) fn advance(&mut self) {
        self.pos += 1;
    }

    #[inline]
    pub(crate) fn advance_n(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.bytes.len());
    }

    /// Advance over one whole UTF-8 character.
    #[inline]
    pub(crate) fn advance_char(&mut self) {
        let width = self.current_char().map_or(1, char::len_utf8);
        self.advance_n(width);
    }

    /// Source text from `start` to the cursor.
    #[inline]
    pub(crate) fn slice_from(&self, start: usize) -> &'a str {
        self.source.get(start..self.pos).unwrap_or("")
    }

    pub(crate) fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.advance();
        }
    }

    /// Move to the end of the current line's text: the next `\n`, or the
    /// `\r` of a `\r\n`, or the end of input.
    pub(crate) fn eat_line_text(&mut self) {
        let rest = &self.bytes[self.pos..];
        match memchr::memchr(b'\n', rest) {
            Some(offset) => self.pos = self.line_text_end(self.pos + offset),
            None => self.pos = self.bytes.len(),
        }
    }

    /// Move to the next byte of interest inside a string literal: a quote,
    /// a backslash, or a line break (stopping before the `\r` of `\r\n`).
    pub(crate) fn eat_string_text(&mut self) {
        let rest = &self.bytes[self.pos..];
        match memchr::memchr3(b'"', b'\\', b'\n', rest) {
            Some(offset) if rest[offset] == b'\n' => {
                self.pos = self.line_text_end(self.pos + offset);
            }
            Some(offset) => self.pos += offset,
            None => self.pos = self.bytes.len(),
        }
    }

    /// Given the position of a `\n`, where the line's text ends.
    fn line_text_end(&self, newline: usize) -> usize {
        if newline > self.pos && self.bytes[newline - 1] == b'\r' {
            newline - 1
        } else {
            newline
        }
    }
}
