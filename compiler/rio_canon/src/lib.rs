//! Normalizer for Rio.
//!
//! Lowers the concrete parse tree into the semantic tree of a [`Module`]:
//! trivia and punctuation disappear, operators become method calls
//! (`a + b` is `a.add(b)`, `-a` is `a.neg()`), string escapes are decoded,
//! modifiers become flags on the declaration they wrap, and `else` becomes
//! a `Case` that always matches.
//!
//! # Pipeline Position
//!
//! ```text
//! Source → Lex → Parse → **Normalize** → (Resolve ⇄ Type)* → Run
//! ```
//!
//! Like the parser, lowering stages nodes on a work stack and commits each
//! construct's children as one contiguous range before building the
//! record that owns them.

mod desugar;
mod literal;
mod lower;

use lower::NormCx;
use rio_diagnostic::Diagnostic;
use rio_ir::{Module, Node, NodeId, ParseTree};

/// Reusable normalizer; keeps its work stack between calls.
#[derive(Debug, Default)]
pub struct Normalizer {
    work: Vec<Node>,
    diagnostics: Vec<Diagnostic>,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lower `tree` into `module`, appending to its arenas, and set
    /// `module.root`. Returns the root.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn norm(&mut self, tree: &ParseTree, source: &str, module: &mut Module) -> NodeId {
        self.work.clear();
        self.diagnostics.clear();
        let root = NormCx::new(source, module, &mut self.work, &mut self.diagnostics)
            .norm_root(tree.root());
        module.root = root;
        tracing::debug!(
            nodes = module.tree.node_count(),
            errors = self.diagnostics.len(),
            "normalized"
        );
        root
    }

    /// Diagnostics from the last `norm`.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// Result of a one-shot [`normalize`].
#[derive(Debug)]
pub struct NormOutput {
    pub module: Module,
    pub diagnostics: Vec<Diagnostic>,
}

/// Lower `tree` into a fresh module.
pub fn normalize(tree: &ParseTree, source: &str) -> NormOutput {
    let mut normalizer = Normalizer::new();
    let mut module = Module::new();
    normalizer.norm(tree, source, &mut module);
    NormOutput {
        module,
        diagnostics: normalizer.diagnostics,
    }
}

#[cfg(test)]
mod tests;
