//! Parser for Rio.
//!
//! Builds a lossless concrete [`ParseTree`] from tokens. Nodes are staged
//! on a work stack; committing a construct moves its staged kids into the
//! arena as one contiguous range and stages the new parent in their place.
//! Trivia skipped while looking ahead is staged too, so every token ends up
//! in the tree exactly once.
//!
//! Parsing never fails. Malformed input becomes `Junk` nodes or nodes with
//! missing parts, and a [`Diagnostic`] is recorded.

mod grammar;

use grammar::ParseCx;
use rio_diagnostic::Diagnostic;
use rio_ir::{ParseNode, ParseTree, Token};

/// Reusable parser; keeps its arena and work stack between calls.
#[derive(Debug, Default)]
pub struct Parser {
    tree: ParseTree,
    work: Vec<ParseNode>,
    diagnostics: Vec<Diagnostic>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `tokens`, replacing the previous tree. The root is the
    /// module's top-level `Block`.
    #[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
    pub fn parse(&mut self, tokens: &[Token]) -> &ParseTree {
        self.tree.clear();
        self.work.clear();
        self.diagnostics.clear();
        ParseCx::new(tokens, &mut self.tree, &mut self.work, &mut self.diagnostics).parse_module();
        tracing::debug!(
            nodes = self.tree.len(),
            errors = self.diagnostics.len(),
            "parsed"
        );
        &self.tree
    }

    pub fn tree(&self) -> &ParseTree {
        &self.tree
    }

    /// Diagnostics from the last `parse`.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// Result of a one-shot [`parse`].
#[derive(Debug)]
pub struct ParseOutput {
    pub tree: ParseTree,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse `tokens` with a fresh parser.
pub fn parse(tokens: &[Token]) -> ParseOutput {
    let mut parser = Parser::new();
    parser.parse(tokens);
    ParseOutput {
        tree: parser.tree,
        diagnostics: parser.diagnostics,
    }
}

#[cfg(test)]
mod tests;
