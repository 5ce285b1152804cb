//! Control flow: `switch`, `case`, `else` and `return`.

use super::ParseCx;
use rio_ir::{ParseKind, TokenKind};

impl ParseCx<'_> {
    /// `switch = "switch" [expr] ["then"] seq "end"`
    pub(super) fn parse_switch(&mut self) {
        let start = self.mark();
        self.push_token();
        let kind = match self.peek().kind {
            TokenKind::Then
            | TokenKind::VSpace
            | TokenKind::Case
            | TokenKind::Else
            | TokenKind::End
            | TokenKind::None => ParseKind::SwitchEmpty,
            _ => {
                self.parse_expr();
                ParseKind::Switch
            }
        };
        let body_start = self.mark();
        self.eat(TokenKind::Then);
        self.parse_seq();
        self.commit(ParseKind::Block, body_start);
        self.commit(kind, start);
    }

    /// `case = "case" expr { "," expr } case_body`
    pub(super) fn parse_case(&mut self) {
        let start = self.mark();
        self.push_token();
        let patterns = self.mark();
        self.parse_expr();
        while self.eat(TokenKind::Comma) {
            self.parse_expr();
        }
        self.commit(ParseKind::Args, patterns);
        self.parse_case_body();
        self.commit(ParseKind::Case, start);
    }

    /// `else = "else" case_body`
    pub(super) fn parse_else(&mut self) {
        let start = self.mark();
        self.push_token();
        self.parse_case_body();
        self.commit(ParseKind::Else, start);
    }

    /// `case_body = ["then"] (VSpace { statement | VSpace } | expr)`,
    /// stopping before the next `case`, `else` or `end`.
    fn parse_case_body(&mut self) {
        let start = self.mark();
        self.eat(TokenKind::Then);
        match self.peek().kind {
            TokenKind::VSpace => {
                while self.has() {
                    match self.peek().kind {
                        TokenKind::VSpace => self.push_token(),
                        TokenKind::Case | TokenKind::Else | TokenKind::End => break,
                        _ => self.parse_statement(),
                    }
                }
            }
            TokenKind::Case | TokenKind::Else | TokenKind::End | TokenKind::None => {}
            _ => self.parse_expr(),
        }
        self.commit(ParseKind::Block, start);
    }

    /// `return = "return" [expr]`
    pub(super) fn parse_return(&mut self) {
        let start = self.mark();
        self.push_token();
        match self.peek().kind {
            TokenKind::VSpace
            | TokenKind::End
            | TokenKind::Case
            | TokenKind::Else
            | TokenKind::RoundClose
            | TokenKind::Comma
            | TokenKind::None => {}
            _ => self.parse_expr(),
        }
        self.commit(ParseKind::Return, start);
    }
}
