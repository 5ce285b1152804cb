//! Lexer for Rio.
//!
//! Splits source text into [`Token`]s without losing anything: horizontal
//! space, comments and unrecognized characters all become tokens, so the
//! concatenated token texts always reproduce the input exactly.
//!
//! The lexer never fails. Problems such as an unterminated string are left
//! for the parser to report, since it sees the token structure.

mod cursor;
mod scanner;

use rio_ir::Token;
use scanner::Scanner;
use std::fmt::Write;

/// Reusable lexer; keeps its token buffer between calls.
#[derive(Debug, Default)]
pub struct Lexer {
    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize `source`, replacing the previous result.
    #[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
    pub fn lex(&mut self, source: &str) -> &[Token] {
        self.tokens.clear();
        let mut scanner = Scanner::new(source);
        while let Some(token) = scanner.next_token() {
            self.tokens.push(token);
        }
        tracing::debug!(tokens = self.tokens.len(), "lexed");
        &self.tokens
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

/// Tokenize `source` into a fresh vector.
pub fn lex(source: &str) -> Vec<Token> {
    Scanner::new(source).collect()
}

/// One `Kind "text"` line per token.
pub fn dump_tokens(tokens: &[Token], source: &str) -> String {
    let mut out = String::new();
    for token in tokens {
        let _ = writeln!(out, "{}", token.display(source));
    }
    out
}
