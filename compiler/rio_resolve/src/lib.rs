//! Scope resolution for Rio.
//!
//! Walks the semantic tree with a single scope stack and rewrites every
//! identifier in place into a `Ref` to its declaration. Lookup order is
//! innermost scope first, then module-level declarations (`tops`), then
//! builtins (`core`). Member names after `.` are left alone; the typer
//! resolves them once the subject's type is known.
//!
//! Resolution also lays out call frames: each variable gets a slot offset
//! relative to its function's frame (module-level variables get absolute
//! offsets) and each function records its peak slot count as `size`.
//!
//! The pass is idempotent: a second run over an already-resolved module
//! changes nothing and reports zero changes.

mod scope;

use rio_diagnostic::{Diagnostic, ErrorCode};
use rio_ir::{
    Block, Call, Case, Fun, Get, Module, Name, NodeFlags, NodeId, NodeKind, Ref, Return, Switch,
    TokenNode, Var,
};
use rio_stack::ensure_sufficient_stack;
use scope::Scope;

enum Lookup {
    Found(NodeId),
    Captured,
}

/// Reusable resolver state.
#[derive(Debug, Default)]
pub struct Resolver {
    scope: Scope,
    diagnostics: Vec<Diagnostic>,
    changes: usize,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one resolution round. Returns the number of nodes changed.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn resolve(&mut self, module: &mut Module) -> usize {
        self.scope.clear();
        self.diagnostics.clear();
        self.changes = 0;

        let globals = self.collect_tops(module);
        self.scope.push_frame(globals);
        let kids = module
            .tree
            .get::<Block>(module.root)
            .map(|root| root.kids)
            .unwrap_or_default();
        for kid in kids.ids() {
            match module.tree.kind(kid) {
                NodeKind::Var => self.resolve_top_var(module, kid),
                _ => self.walk(module, kid),
            }
        }
        self.scope.pop_frame();

        tracing::debug!(changes = self.changes, "resolved");
        self.changes
    }

    /// Diagnostics from the last round.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Fill `tops` from the root block, first declaration wins. Every
    /// root-level variable is a global with an absolute offset; returns
    /// how many there are.
    fn collect_tops(&mut self, module: &mut Module) -> u32 {
        module.tops.clear();
        let kids = module
            .tree
            .get::<Block>(module.root)
            .map(|root| root.kids)
            .unwrap_or_default();
        let mut globals = 0;
        for kid in kids.ids() {
            let name = match module.tree.kind(kid) {
                NodeKind::Fun => module.tree.get::<Fun>(kid).map(|fun| fun.name),
                NodeKind::Var => {
                    let offset = globals;
                    globals += 1;
                    if let Some(var) = module.tree.get_mut::<Var>(kid) {
                        if var.offset != offset {
                            var.offset = offset;
                            self.changes += 1;
                        }
                    }
                    module.tree.get::<Var>(kid).map(|var| var.name)
                }
                _ => None,
            };
            let Some(name) = name else {
                continue;
            };
            self.mark_top(module, kid);
            if name.is_empty() {
                continue;
            }
            if module.tops.contains_key(&name) {
                let span = module.tree.id_info(kid).span;
                self.diagnostics.push(
                    Diagnostic::error(ErrorCode::E2001)
                        .with_message(format!("`{}` is already declared", module.name(name)))
                        .with_span(span)
                        .with_note("the first declaration is used"),
                );
            } else {
                module.tops.insert(name, kid);
            }
        }
        globals
    }

    fn mark_top(&mut self, module: &mut Module, id: NodeId) {
        let node = module.tree.node(id);
        if let Some(info) = module.tree.info_mut(node) {
            if !info.flags.contains(NodeFlags::TOP) {
                info.flags |= NodeFlags::TOP;
                self.changes += 1;
            }
        }
    }

    fn walk(&mut self, module: &mut Module, id: NodeId) {
        ensure_sufficient_stack(|| self.walk_inner(module, id));
    }

    fn walk_inner(&mut self, module: &mut Module, id: NodeId) {
        let tree = &module.tree;
        match tree.kind(id) {
            NodeKind::None | NodeKind::Native | NodeKind::Ref | NodeKind::Value => {}
            NodeKind::Token => self.resolve_token(module, id),
            NodeKind::Block => {
                let kids = tree.get::<Block>(id).map(|block| block.kids).unwrap_or_default();
                self.scope.push_level();
                for kid in kids.ids() {
                    self.walk(module, kid);
                }
                self.scope.pop_level();
            }
            NodeKind::Call => {
                let Some(call) = tree.get::<Call>(id).copied() else {
                    return;
                };
                // The runner stages a bound receiver and each evaluated
                // argument on the stack, so later arguments see them below
                // any locals they declare.
                let base = self.scope.slots();
                self.walk(module, call.callee);
                let mut staged = module.tree.kind(call.callee) == NodeKind::Get;
                for arg in call.args.ids() {
                    if staged {
                        self.scope.claim_slot();
                    }
                    self.walk(module, arg);
                    staged = true;
                }
                self.scope.reset_slots(base);
            }
            NodeKind::Case => {
                let Some(case) = tree.get::<Case>(id).copied() else {
                    return;
                };
                for pattern in case.patterns.ids() {
                    self.walk(module, pattern);
                }
                self.scope.push_level();
                for kid in case.kids.ids() {
                    self.walk(module, kid);
                }
                self.scope.pop_level();
            }
            NodeKind::Fun => self.resolve_fun(module, id),
            NodeKind::Get => {
                let subject = tree.get::<Get>(id).map(|get| get.subject).unwrap_or_default();
                self.walk(module, subject);
            }
            NodeKind::Return => {
                let value = tree.get::<Return>(id).map(|ret| ret.value).unwrap_or_default();
                self.walk(module, value);
            }
            NodeKind::Switch => {
                let Some(switch) = tree.get::<Switch>(id).copied() else {
                    return;
                };
                self.walk(module, switch.subject);
                for kid in switch.kids.ids() {
                    self.walk(module, kid);
                }
            }
            NodeKind::Var => self.resolve_var(module, id),
        }
    }

    fn resolve_token(&mut self, module: &mut Module, id: NodeId) {
        let Some(token) = module.tree.get::<TokenNode>(id).copied() else {
            return;
        };
        let Some(target) = self.lookup(module, token.name) else {
            self.diagnostics.push(rio_diagnostic::unknown_identifier(
                token.info.span,
                module.name(token.name),
            ));
            return;
        };
        let Lookup::Found(target) = target else {
            self.diagnostics.push(
                Diagnostic::error(ErrorCode::E2003)
                    .with_message(format!(
                        "`{}` is a local of an enclosing function",
                        module.name(token.name)
                    ))
                    .with_span(token.info.span)
                    .with_note("nested functions cannot capture locals"),
            );
            return;
        };
        module.tree.replace(
            id,
            Ref {
                info: token.info,
                target,
            },
        );
        self.changes += 1;
    }

    /// Innermost scope, then `tops`, then `core`. A local of an enclosing
    /// function is found but not usable: its slot lives in another frame.
    fn lookup(&self, module: &Module, name: Name) -> Option<Lookup> {
        if let Some(entry) = self.scope.find(name) {
            let outer_local = entry.frame > 0
                && entry.frame < self.scope.frame_depth()
                && module.tree.kind(entry.target) == NodeKind::Var;
            return Some(if outer_local {
                Lookup::Captured
            } else {
                Lookup::Found(entry.target)
            });
        }
        module
            .tops
            .get(&name)
            .or_else(|| module.core.get(&name))
            .copied()
            .map(Lookup::Found)
    }

    /// Initializer and type first, so `var x = x` sees the outer `x`,
    /// then the slot.
    fn resolve_var(&mut self, module: &mut Module, id: NodeId) {
        let Some(var) = module.tree.get::<Var>(id).copied() else {
            return;
        };
        self.walk(module, var.type_spec);
        self.walk(module, var.value);
        let offset = self.scope.claim_slot();
        if var.offset != offset {
            if let Some(var) = module.tree.get_mut::<Var>(id) {
                var.offset = offset;
            }
            self.changes += 1;
        }
        if !var.name.is_empty() {
            self.scope.declare(var.name, id);
        }
    }

    /// Globals live in `tops`; their offsets were fixed by `collect_tops`.
    /// While a global's initializer runs only the globals before it are on
    /// the stack, so locals inside it start at the global's own offset.
    fn resolve_top_var(&mut self, module: &mut Module, id: NodeId) {
        let Some(var) = module.tree.get::<Var>(id).copied() else {
            return;
        };
        let globals = self.scope.slots();
        self.scope.reset_slots(var.offset);
        self.walk(module, var.type_spec);
        self.walk(module, var.value);
        self.scope.reset_slots(globals);
    }

    fn resolve_fun(&mut self, module: &mut Module, id: NodeId) {
        let Some(fun) = module.tree.get::<Fun>(id).copied() else {
            return;
        };
        // Visible to itself and to later siblings, not only inside the body.
        if !fun.name.is_empty() && !fun.info.flags.contains(NodeFlags::TOP) {
            self.scope.declare(fun.name, id);
        }

        self.scope.push_frame(0);
        for param in fun.params.ids() {
            self.resolve_var(module, param);
        }
        self.walk(module, fun.ret_spec);
        for kid in fun.kids.ids() {
            self.walk(module, kid);
        }
        let size = self.scope.pop_frame();

        if fun.size != size {
            if let Some(fun) = module.tree.get_mut::<Fun>(id) {
                fun.size = size;
            }
            self.changes += 1;
        }
    }
}
