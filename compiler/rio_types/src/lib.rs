//! Type inference for Rio.
//!
//! Every typing call receives a *wanted* type (the expectation from
//! above, `Idx::NONE` when there is none) and returns the type it
//! inferred. Results are written into the tree: `Fun::ty`, `Var::ty`,
//! and member names after `.` become `Ref`s once the subject's type
//! supplies a method table.
//!
//! Member resolution depends on types and some types depend on resolved
//! references, so the engine alternates this pass with the resolver until
//! neither reports changes.
//!
//! # Rules
//!
//! - A block has the type of its last statement, except that `Never`
//!   (a `return` on the path) sticks once seen. Empty blocks are `Void`.
//! - A function's return type is its explicit annotation if any, else the
//!   first `return` reached in source order, else its body's type.
//! - A variable's type is its annotation, else its initializer's type,
//!   else the wanted type, else a single-letter convention
//!   (`i`..`n` are `Int`, `w`..`z` are `Float`).

mod control_flow;
mod decls;
mod expr;

use rio_diagnostic::Diagnostic;
use rio_ir::{Block, Idx, Module};

/// Return-type state of the function being typed.
#[derive(Copy, Clone, Debug)]
struct FunFrame {
    /// Declared or first-returned type; `NONE` until known.
    ret: Idx,
}

/// Reusable typer state.
#[derive(Debug, Default)]
pub struct Typer {
    funs: Vec<FunFrame>,
    diagnostics: Vec<Diagnostic>,
    changes: usize,
}

impl Typer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one typing round. Returns the number of nodes changed.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn type_module(&mut self, module: &mut Module) -> usize {
        self.funs.clear();
        self.diagnostics.clear();
        self.changes = 0;

        let kids = module
            .tree
            .get::<Block>(module.root)
            .map(|root| root.kids)
            .unwrap_or_default();
        for kid in kids.ids() {
            self.type_node(module, kid, Idx::NONE);
        }

        tracing::debug!(changes = self.changes, types = module.types.len(), "typed");
        self.changes
    }

    /// Diagnostics from the last round.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests;
