//! Functions, parameters, variables and bodies.

use super::ParseCx;
use rio_diagnostic::{unclosed_delimiter, Diagnostic, ErrorCode};
use rio_ir::{ParseKind, TokenKind};

impl ParseCx<'_> {
    /// `fun = "fun" [Id] [params] [expr] body`
    ///
    /// An expression between the parameters and the body is the return
    /// type only when `then` follows it; otherwise it is the body's first
    /// statement.
    pub(super) fn parse_fun(&mut self) {
        let start = self.mark();
        self.push_token();
        self.eat(TokenKind::Id);
        if self.peek().kind == TokenKind::RoundOpen {
            self.parse_params();
        }
        let mut body_start = self.mark();
        match self.peek().kind {
            TokenKind::Then | TokenKind::VSpace | TokenKind::End | TokenKind::None => {}
            _ => {
                self.parse_expr();
                if self.peek().kind == TokenKind::Then {
                    body_start = self.mark();
                }
            }
        }
        self.parse_body(body_start);
        self.commit(ParseKind::Fun, start);
    }

    /// `body = "then" (VSpace seq "end" | expr) | seq "end"`
    ///
    /// Commits `work[start..]` as a `Block`, so a statement already staged
    /// before the call becomes the body's first statement.
    pub(super) fn parse_body(&mut self, start: usize) {
        if self.eat(TokenKind::Then) && self.peek().kind != TokenKind::VSpace {
            self.parse_expr();
        } else {
            self.parse_seq();
        }
        self.commit(ParseKind::Block, start);
    }

    /// Statements and line breaks up to and including `end`.
    pub(super) fn parse_seq(&mut self) {
        while self.has() {
            match self.peek().kind {
                TokenKind::VSpace => self.push_token(),
                TokenKind::End => {
                    self.push_token();
                    return;
                }
                _ => self.parse_statement(),
            }
        }
        let span = self.here();
        self.error(
            Diagnostic::error(ErrorCode::E1004)
                .with_message("missing `end`")
                .with_span(span),
        );
    }

    /// `params = "(" [param { "," param }] ")"`
    fn parse_params(&mut self) {
        let start = self.mark();
        let open = self.peek();
        self.push_token();
        let mut closed = false;
        while self.has() {
            match self.peek().kind {
                TokenKind::Comma | TokenKind::VSpace => self.push_token(),
                TokenKind::RoundClose => {
                    self.push_token();
                    closed = true;
                    break;
                }
                _ => self.parse_param(),
            }
        }
        if !closed {
            self.error(unclosed_delimiter(open.span, '('));
        }
        self.commit(ParseKind::Params, start);
    }

    /// `param = Id [expr]`
    fn parse_param(&mut self) {
        let start = self.mark();
        while self.has() {
            match self.peek().kind {
                TokenKind::Comma | TokenKind::RoundClose => break,
                TokenKind::VSpace => self.push_token(),
                _ => self.parse_expr(),
            }
        }
        self.commit(ParseKind::Param, start);
    }

    /// `var = "var" [Id] [expr] ["=" [VSpace] expr]`
    pub(super) fn parse_var(&mut self) {
        let start = self.mark();
        self.push_token();
        self.eat(TokenKind::Id);
        match self.peek().kind {
            TokenKind::Eq | TokenKind::VSpace | TokenKind::End | TokenKind::None => {}
            _ => self.parse_expr(),
        }
        if self.eat(TokenKind::Eq) {
            self.eat(TokenKind::VSpace);
            self.parse_expr();
        }
        self.commit(ParseKind::Var, start);
    }
}
