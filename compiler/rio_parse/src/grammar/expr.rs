//! Expressions: comparison over additive over postfix over atoms.

use super::ParseCx;
use rio_diagnostic::{expected_expression, unclosed_delimiter, unexpected_token, Diagnostic, ErrorCode};
use rio_ir::{ParseKind, TokenKind};
use rio_stack::ensure_sufficient_stack;

impl ParseCx<'_> {
    /// `statement = expr`
    pub(super) fn parse_statement(&mut self) {
        self.parse_expr();
    }

    pub(super) fn parse_expr(&mut self) {
        ensure_sufficient_stack(|| self.parse_compare());
    }

    /// `compare = add { ("==" | "!=" | "<" | "<=" | ">" | ">=") add }`
    fn parse_compare(&mut self) {
        let start = self.mark();
        self.parse_add();
        while matches!(
            self.peek().kind,
            TokenKind::EqEq
                | TokenKind::NEq
                | TokenKind::Lt
                | TokenKind::Le
                | TokenKind::Gt
                | TokenKind::Ge
        ) {
            self.push_token();
            self.parse_add();
            self.commit(ParseKind::Infix, start);
        }
    }

    /// `add = postfix { ("+" | "-") postfix }`
    fn parse_add(&mut self) {
        let start = self.mark();
        self.parse_postfix();
        while matches!(self.peek().kind, TokenKind::Add | TokenKind::Sub) {
            self.push_token();
            self.parse_postfix();
            self.commit(ParseKind::Infix, start);
        }
    }

    /// `postfix = atom { args | "." Id }`
    pub(super) fn parse_postfix(&mut self) {
        let start = self.mark();
        self.parse_atom();
        loop {
            match self.peek().kind {
                TokenKind::RoundOpen => {
                    self.parse_args();
                    self.commit(ParseKind::Call, start);
                }
                TokenKind::Dot => {
                    self.push_token();
                    if !self.eat(TokenKind::Id) {
                        let span = self.here();
                        self.error(
                            Diagnostic::error(ErrorCode::E1005)
                                .with_message("expected member name after `.`")
                                .with_span(span),
                        );
                    }
                    self.commit(ParseKind::Get, start);
                }
                _ => return,
            }
        }
    }

    fn parse_atom(&mut self) {
        let token = self.peek();
        match token.kind {
            TokenKind::Case => self.parse_case(),
            TokenKind::Else => self.parse_else(),
            TokenKind::Fun => self.parse_fun(),
            TokenKind::Id | TokenKind::Int => self.push_token(),
            TokenKind::Plug | TokenKind::Pub => self.parse_modify(),
            TokenKind::Return => self.parse_return(),
            TokenKind::StringOpen => self.parse_string(),
            TokenKind::Sub => self.parse_prefix(),
            TokenKind::Switch => self.parse_switch(),
            TokenKind::Var => self.parse_var(),
            TokenKind::None | TokenKind::VSpace => {
                let span = self.here();
                self.error(expected_expression(span, token.kind.describe()));
            }
            _ => {
                let start = self.mark();
                self.push_token();
                self.commit(ParseKind::Junk, start);
                self.error(unexpected_token(token.span, token.kind.describe()));
            }
        }
    }

    /// `args = "(" [expr { "," expr }] ")"`, line breaks allowed inside.
    fn parse_args(&mut self) {
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
                _ => self.parse_expr(),
            }
        }
        if !closed {
            self.error(unclosed_delimiter(open.span, '('));
        }
        self.commit(ParseKind::Args, start);
    }

    /// `prefix = "-" postfix`
    fn parse_prefix(&mut self) {
        let start = self.mark();
        self.push_token();
        self.parse_postfix();
        self.commit(ParseKind::Prefix, start);
    }

    /// `modify = ("plug" | "pub") { "plug" | "pub" } expr`
    fn parse_modify(&mut self) {
        let start = self.mark();
        self.push_token();
        while matches!(self.peek().kind, TokenKind::Plug | TokenKind::Pub) {
            self.push_token();
        }
        self.parse_expr();
        self.commit(ParseKind::Modify, start);
    }

    /// `string = "\"" { StringText | Escape } ["\""]`
    fn parse_string(&mut self) {
        let start = self.mark();
        let open = self.peek();
        self.push_token();
        let mut closed = false;
        while self.has() {
            match self.peek().kind {
                TokenKind::StringText | TokenKind::Escape => self.push_token(),
                TokenKind::StringClose => {
                    self.push_token();
                    closed = true;
                    break;
                }
                _ => break,
            }
        }
        if !closed {
            self.error(
                Diagnostic::error(ErrorCode::E0001)
                    .with_message("unterminated string literal")
                    .with_span(open.span),
            );
        }
        self.commit(ParseKind::String, start);
    }
}
