//! Parsing state and the work-stack primitives every rule builds on.

mod control;
mod decl;
mod expr;

use rio_diagnostic::Diagnostic;
use rio_ir::{ParseKind, ParseNode, ParseTree, Token, TokenKind};
use tracing::trace;

pub(crate) struct ParseCx<'p> {
    tokens: &'p [Token],
    index: usize,
    tree: &'p mut ParseTree,
    work: &'p mut Vec<ParseNode>,
    diagnostics: &'p mut Vec<Diagnostic>,
}

impl<'p> ParseCx<'p> {
    pub(crate) fn new(
        tokens: &'p [Token],
        tree: &'p mut ParseTree,
        work: &'p mut Vec<ParseNode>,
        diagnostics: &'p mut Vec<Diagnostic>,
    ) -> Self {
        ParseCx {
            tokens,
            index: 0,
            tree,
            work,
            diagnostics,
        }
    }

    /// `module = { statement | VSpace }`
    pub(crate) fn parse_module(&mut self) {
        while self.has() {
            if self.peek().kind == TokenKind::VSpace {
                self.push_token();
            } else {
                self.parse_statement();
            }
        }
        self.commit(ParseKind::Block, 0);
        let staged = self.work.drain(..);
        self.tree.append(staged);
    }

    // ─── Work stack ────────────────────────────────────────────────

    /// Move `work[start..]` into the arena and stage a `kind` parent over
    /// them.
    fn commit(&mut self, kind: ParseKind, start: usize) {
        let kids = self.tree.append(self.work.drain(start..));
        trace!(?kind, kids = kids.len(), "commit");
        self.work.push(ParseNode::branch(kind, kids));
    }

    #[inline]
    fn mark(&self) -> usize {
        self.work.len()
    }

    /// Stage the current token and advance.
    fn push_token(&mut self) {
        if let Some(&token) = self.tokens.get(self.index) {
            self.work.push(ParseNode::leaf(token));
            self.index += 1;
        }
    }

    /// True if a significant token remains. Horizontal space and comments
    /// in front of it are staged on the way.
    fn has(&mut self) -> bool {
        while let Some(&token) = self.tokens.get(self.index) {
            match token.kind {
                TokenKind::CommentOpen => {
                    let start = self.mark();
                    self.push_token();
                    if self.current_kind() == TokenKind::CommentText {
                        self.push_token();
                    }
                    self.commit(ParseKind::Comment, start);
                }
                TokenKind::HSpace | TokenKind::CommentText => self.push_token(),
                _ => return true,
            }
        }
        false
    }

    /// Next significant token, or a `None` token at the end.
    fn peek(&mut self) -> Token {
        if self.has() {
            self.tokens[self.index]
        } else {
            Token::default()
        }
    }

    /// Kind of the raw current token, trivia included.
    fn current_kind(&self) -> TokenKind {
        self.tokens.get(self.index).map_or(TokenKind::None, |t| t.kind)
    }

    /// Stage the next significant token if it is `kind`.
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek().kind == kind {
            self.push_token();
            true
        } else {
            false
        }
    }

    /// Span to blame for something missing at the current position.
    fn here(&mut self) -> rio_ir::Span {
        let token = self.peek();
        if token.kind == TokenKind::None {
            let end = self.tokens.last().map_or(0, |t| t.span.end);
            rio_ir::Span::new(end, end)
        } else {
            token.span
        }
    }

    fn error(&mut self, diagnostic: Diagnostic) {
        trace!(%diagnostic, "parse error");
        self.diagnostics.push(diagnostic);
    }
}
