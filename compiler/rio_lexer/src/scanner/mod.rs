//! Hand-written scanner producing one [`Token`] at a time.
//!
//! The scanner is a small state machine: ordinary code, the inside of a
//! string literal, and the text of a comment. Each state dispatches on the
//! current byte; every branch consumes at least one byte, so the scanner
//! always makes progress and covers the whole input.

use crate::cursor::Cursor;
use rio_ir::{Span, Token, TokenKind};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Mode {
    Code,
    /// After an opening `"`, until the closing quote or the end of the line.
    String,
    /// After `#`, until the end of the line.
    Comment,
}

pub(crate) struct Scanner<'a> {
    cursor: Cursor<'a>,
    mode: Mode,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Scanner {
            cursor: Cursor::new(source),
            mode: Mode::Code,
        }
    }

    /// Produce the next token, or `None` at the end of input.
    pub(crate) fn next_token(&mut self) -> Option<Token> {
        if self.cursor.is_eof() {
            return None;
        }
        let start = self.cursor.pos();
        let kind = match self.mode {
            Mode::Code => self.code(),
            Mode::String => match self.string_part() {
                Some(kind) => kind,
                None => self.code(),
            },
            Mode::Comment => match self.comment_text() {
                Some(kind) => kind,
                None => self.code(),
            },
        };
        Some(Token::new(
            kind,
            Span::from_range(start..self.cursor.pos()),
        ))
    }

    // ─── Code ──────────────────────────────────────────────────────

    fn code(&mut self) -> TokenKind {
        self.mode = Mode::Code;
        match self.cursor.current() {
            b' ' | b'\t' => self.hspace(),
            b'\r' => {
                if self.cursor.peek() == b'\n' {
                    self.cursor.advance_n(2);
                    TokenKind::VSpace
                } else {
                    self.hspace()
                }
            }
            b'\n' => self.single(TokenKind::VSpace),
            b'0'..=b'9' => {
                self.cursor.eat_while(|b| b.is_ascii_digit());
                TokenKind::Int
            }
            b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'$' => self.identifier(),
            b'"' => {
                self.mode = Mode::String;
                self.single(TokenKind::StringOpen)
            }
            b'#' => {
                self.mode = Mode::Comment;
                self.single(TokenKind::CommentOpen)
            }
            b'+' => self.single(TokenKind::Add),
            b'-' => self.single(TokenKind::Sub),
            b',' => self.single(TokenKind::Comma),
            b'.' => self.single(TokenKind::Dot),
            b'(' => self.single(TokenKind::RoundOpen),
            b')' => self.single(TokenKind::RoundClose),
            b'=' => self.with_eq(TokenKind::Eq, TokenKind::EqEq),
            b'<' => self.with_eq(TokenKind::Lt, TokenKind::Le),
            b'>' => self.with_eq(TokenKind::Gt, TokenKind::Ge),
            b'!' => self.with_eq(TokenKind::Junk, TokenKind::NEq),
            0x80..=0xFF => match self.cursor.current_char() {
                Some(c) if c.is_alphabetic() => self.identifier(),
                _ => self.junk(),
            },
            _ => self.junk(),
        }
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.cursor.advance();
        kind
    }

    /// `x` alone or `x=` as one token.
    fn with_eq(&mut self, alone: TokenKind, with_eq: TokenKind) -> TokenKind {
        if self.cursor.peek() == b'=' {
            self.cursor.advance_n(2);
            with_eq
        } else {
            self.single(alone)
        }
    }

    /// Spaces, tabs and carriage returns not followed by a newline.
    fn hspace(&mut self) -> TokenKind {
        loop {
            match self.cursor.current() {
                b' ' | b'\t' => self.cursor.advance(),
                b'\r' if self.cursor.peek() != b'\n' => {
                    self.cursor.advance();
                }
                _ => break,
            }
        }
        TokenKind::HSpace
    }

    fn identifier(&mut self) -> TokenKind {
        let start = self.cursor.pos();
        self.cursor.advance_char();
        loop {
            match self.cursor.current() {
                b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' | b'$' => self.cursor.advance(),
                0x80..=0xFF => match self.cursor.current_char() {
                    Some(c) if c.is_alphanumeric() => self.cursor.advance_char(),
                    _ => break,
                },
                _ => break,
            }
        }
        let text = self.cursor.slice_from(start);
        TokenKind::keyword(text).unwrap_or(TokenKind::Id)
    }

    /// One code point no rule accepts.
    fn junk(&mut self) -> TokenKind {
        self.cursor.advance_char();
        TokenKind::Junk
    }

    // ─── Strings ───────────────────────────────────────────────────

    /// Next piece of a string literal, or `None` at a line break, which
    /// ends the literal without consuming anything.
    fn string_part(&mut self) -> Option<TokenKind> {
        match self.cursor.current() {
            b'"' => {
                self.mode = Mode::Code;
                Some(self.single(TokenKind::StringClose))
            }
            b'\n' => None,
            b'\r' if self.cursor.peek() == b'\n' => None,
            b'\\' => Some(self.escape()),
            _ => {
                self.cursor.eat_string_text();
                Some(TokenKind::StringText)
            }
        }
    }

    /// `\` plus one character, or `\u(hex)`. A backslash at the end of a
    /// line or of the input stands alone.
    fn escape(&mut self) -> TokenKind {
        self.cursor.advance();
        match self.cursor.current() {
            _ if self.cursor.is_eof() => {}
            b'\n' => {}
            b'\r' if self.cursor.peek() == b'\n' => {}
            b'u' if self.cursor.peek() == b'(' => {
                self.cursor.advance_n(2);
                self.cursor.eat_while(|b| b.is_ascii_hexdigit());
                if self.cursor.current() == b')' {
                    self.cursor.advance();
                }
            }
            _ => self.cursor.advance_char(),
        }
        TokenKind::Escape
    }

    // ─── Comments ──────────────────────────────────────────────────

    /// Text after `#` up to the line break, or `None` if there is none.
    fn comment_text(&mut self) -> Option<TokenKind> {
        self.mode = Mode::Code;
        let start = self.cursor.pos();
        self.cursor.eat_line_text();
        (self.cursor.pos() > start).then_some(TokenKind::CommentText)
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}
