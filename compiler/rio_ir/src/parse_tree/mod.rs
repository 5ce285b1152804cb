//! Concrete parse tree stored in a flat arena.
//!
//! Nodes are appended in post-order: a node's kids occupy the contiguous
//! range `kids.start..kids.end`, committed before the node itself. Index 0
//! is a `None` sentinel, and the last node appended is the root.
//!
//! The tree is lossless: every token of the input, trivia included, appears
//! as exactly one `Token` leaf.

use crate::{Span, Token, TokenKind};
use std::fmt;

/// Parse node classification.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum ParseKind {
    #[default]
    None,
    Args,
    Block,
    Call,
    Case,
    Comment,
    Else,
    Fun,
    Get,
    Infix,
    Junk,
    Modify,
    Param,
    Params,
    Prefix,
    Return,
    String,
    Switch,
    SwitchEmpty,
    Token,
    Var,
}

/// Contiguous range of kids in the parse arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ParseRange {
    pub start: u32,
    pub end: u32,
}

impl ParseRange {
    pub const EMPTY: ParseRange = ParseRange { start: 0, end: 0 };

    #[inline]
    pub const fn len(self) -> usize {
        (self.end - self.start) as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }
}

/// One parse node. Leaves carry a token; branches carry a kid range.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ParseNode {
    pub kind: ParseKind,
    pub kids: ParseRange,
    pub token: Token,
}

impl ParseNode {
    #[inline]
    pub const fn leaf(token: Token) -> Self {
        ParseNode {
            kind: ParseKind::Token,
            kids: ParseRange::EMPTY,
            token,
        }
    }

    #[inline]
    pub fn branch(kind: ParseKind, kids: ParseRange) -> Self {
        ParseNode {
            kind,
            kids,
            token: Token::default(),
        }
    }
}

/// Flat, reusable parse arena.
#[derive(Clone, Debug)]
pub struct ParseTree {
    nodes: Vec<ParseNode>,
}

impl ParseTree {
    pub fn new() -> Self {
        ParseTree {
            nodes: vec![ParseNode::default()],
        }
    }

    /// Drop back to the sentinel, keeping capacity.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
    }

    /// Number of nodes including the sentinel.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when nothing beyond the sentinel has been appended.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Append `nodes` in order, returning their range.
    pub fn append(&mut self, nodes: impl IntoIterator<Item = ParseNode>) -> ParseRange {
        let start = crate::to_u32(self.nodes.len());
        self.nodes.extend(nodes);
        ParseRange {
            start,
            end: crate::to_u32(self.nodes.len()),
        }
    }

    /// The last node appended, or the sentinel for an empty tree.
    pub fn root(&self) -> ParseRef<'_> {
        self.get(self.nodes.len() - 1)
    }

    /// The node at `index`, or the sentinel when out of range.
    pub fn get(&self, index: usize) -> ParseRef<'_> {
        let index = if index < self.nodes.len() { index } else { 0 };
        ParseRef { tree: self, index }
    }

    pub fn none(&self) -> ParseRef<'_> {
        ParseRef {
            tree: self,
            index: 0,
        }
    }

    /// Indented dump of the tree under the root.
    pub fn display<'a>(&'a self, source: &'a str) -> ParseTreeDisplay<'a> {
        ParseTreeDisplay { tree: self, source }
    }
}

impl Default for ParseTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrowed view of one parse node.
#[derive(Copy, Clone)]
pub struct ParseRef<'t> {
    tree: &'t ParseTree,
    index: usize,
}

impl<'t> ParseRef<'t> {
    #[inline]
    fn node(self) -> &'t ParseNode {
        &self.tree.nodes[self.index]
    }

    #[inline]
    pub fn index(self) -> usize {
        self.index
    }

    #[inline]
    pub fn kind(self) -> ParseKind {
        self.node().kind
    }

    #[inline]
    pub fn token(self) -> Token {
        self.node().token
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self.kind() == ParseKind::None
    }

    /// A token leaf of the given kind.
    #[inline]
    pub fn is_token(self, kind: TokenKind) -> bool {
        self.kind() == ParseKind::Token && self.token().kind == kind
    }

    pub fn kid_count(self) -> usize {
        self.node().kids.len()
    }

    /// The `i`th kid, or the sentinel when out of range.
    pub fn kid(self, i: usize) -> ParseRef<'t> {
        let kids = self.node().kids;
        if i < kids.len() {
            self.tree.get(kids.start as usize + i)
        } else {
            self.tree.none()
        }
    }

    pub fn kids(self) -> impl ExactSizeIterator<Item = ParseRef<'t>> + 't {
        let tree = self.tree;
        let kids = self.node().kids;
        (kids.start as usize..kids.end as usize).map(move |index| ParseRef { tree, index })
    }

    /// Next significant kid at or after `start`, skipping trivia, comments
    /// and line breaks. Returns the index after it and the kid, or
    /// `(kid_count, none)` when nothing is left.
    pub fn next(self, start: usize) -> (usize, ParseRef<'t>) {
        self.next_ex(start, false)
    }

    /// Like [`next`](Self::next), optionally stopping at line breaks.
    pub fn next_ex(self, start: usize, keep_vspace: bool) -> (usize, ParseRef<'t>) {
        let count = self.kid_count();
        for i in start..count {
            let kid = self.kid(i);
            match kid.kind() {
                ParseKind::Comment => {}
                ParseKind::Token => match kid.token().kind {
                    kind if kind.is_trivia() => {}
                    TokenKind::VSpace => {
                        if keep_vspace {
                            return (i + 1, kid);
                        }
                    }
                    _ => return (i + 1, kid),
                },
                _ => return (i + 1, kid),
            }
        }
        (count, self.tree.none())
    }

    /// Index after the next significant kid if it is a `kind` token,
    /// otherwise `kid_count` so later lookups find nothing.
    pub fn expect_token(self, start: usize, kind: TokenKind) -> usize {
        match self.next(start) {
            (next, kid) if kid.is_token(kind) => next,
            _ => self.kid_count(),
        }
    }

    /// Span from the first to the last token under this node.
    pub fn span(self) -> Span {
        match (self.first_token(), self.last_token()) {
            (Some(first), Some(last)) => first.span.merge(last.span),
            _ => Span::DUMMY,
        }
    }

    fn first_token(self) -> Option<Token> {
        match self.kind() {
            ParseKind::Token => Some(self.token()),
            _ => self.kids().find_map(ParseRef::first_token),
        }
    }

    fn last_token(self) -> Option<Token> {
        match self.kind() {
            ParseKind::Token => Some(self.token()),
            _ => (0..self.kid_count())
                .rev()
                .find_map(|i| self.kid(i).last_token()),
        }
    }
}

impl fmt::Debug for ParseRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}#{}", self.kind(), self.index)
    }
}

/// Formats a parse tree with four spaces of indentation per level.
pub struct ParseTreeDisplay<'a> {
    tree: &'a ParseTree,
    source: &'a str,
}

impl ParseTreeDisplay<'_> {
    fn write_node(&self, f: &mut fmt::Formatter<'_>, node: ParseRef<'_>, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            f.write_str("    ")?;
        }
        if node.kind() == ParseKind::Token {
            return writeln!(f, "{}", node.token().display(self.source));
        }
        writeln!(f, "{:?}", node.kind())?;
        for kid in node.kids() {
            self.write_node(f, kid, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for ParseTreeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tree.is_empty() {
            return Ok(());
        }
        self.write_node(f, self.tree.root(), 0)
    }
}

#[cfg(test)]
mod tests;
