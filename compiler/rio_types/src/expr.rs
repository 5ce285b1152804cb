//! Dispatch, literals, references, blocks, calls and member access.

use crate::Typer;
use rio_diagnostic::{Diagnostic, ErrorCode};
use rio_ir::{
    Block, Call, Fun, Get, Idx, Literal, Module, NodeId, NodeKind, NodeRange, Ref, TokenNode,
    ValueNode, Var,
};
use rio_stack::ensure_sufficient_stack;
use smallvec::SmallVec;

impl Typer {
    /// Type `id` against `wanted` and return its inferred type.
    pub(crate) fn type_node(&mut self, module: &mut Module, id: NodeId, wanted: Idx) -> Idx {
        ensure_sufficient_stack(|| self.type_node_inner(module, id, wanted))
    }

    fn type_node_inner(&mut self, module: &mut Module, id: NodeId, wanted: Idx) -> Idx {
        match module.tree.kind(id) {
            NodeKind::None | NodeKind::Native | NodeKind::Token | NodeKind::Case => Idx::NONE,
            NodeKind::Block => {
                let kids = module
                    .tree
                    .get::<Block>(id)
                    .map(|block| block.kids)
                    .unwrap_or_default();
                self.type_block(module, kids, wanted)
            }
            NodeKind::Call => self.type_call(module, id, wanted),
            NodeKind::Fun => self.type_fun(module, id, wanted),
            NodeKind::Get => self.type_get(module, id),
            NodeKind::Ref => {
                let target = module.tree.get::<Ref>(id).map(|r| r.target).unwrap_or_default();
                type_of_decl(module, target)
            }
            NodeKind::Return => self.type_return(module, id),
            NodeKind::Switch => self.type_switch(module, id, wanted),
            NodeKind::Value => type_of_decl(module, id),
            NodeKind::Var => {
                self.type_var(module, id, wanted);
                Idx::VOID
            }
        }
    }

    /// Last statement's type, with `Never` sticky. The last statement
    /// inherits the block's wanted type.
    pub(crate) fn type_block(&mut self, module: &mut Module, kids: NodeRange, wanted: Idx) -> Idx {
        let mut ty = Idx::VOID;
        let last = kids.len().saturating_sub(1);
        for (i, kid) in kids.ids().enumerate() {
            let want = if i == last { wanted } else { Idx::NONE };
            let kid_ty = self.type_node(module, kid, want);
            if !ty.is_never() {
                ty = kid_ty;
            }
        }
        ty
    }

    /// The callee is typed against a function type returning `wanted`;
    /// arguments against the callee's parameter types. A `Get` callee
    /// binds its subject as the first parameter.
    fn type_call(&mut self, module: &mut Module, id: NodeId, wanted: Idx) -> Idx {
        let Some(call) = module.tree.get::<Call>(id).copied() else {
            return Idx::NONE;
        };
        let want_fun = if wanted.is_some() {
            module.types.fun(&[], wanted)
        } else {
            Idx::NONE
        };
        let callee_ty = self.type_node(module, call.callee, want_fun);
        let (params, ret): (SmallVec<[Idx; 4]>, Idx) = match module.types.fun_parts(callee_ty) {
            Some((params, ret)) => (params.iter().copied().collect(), ret),
            None => (SmallVec::new(), Idx::NONE),
        };
        let bound = usize::from(module.tree.kind(call.callee) == NodeKind::Get);
        for (i, arg) in call.args.ids().enumerate() {
            let want = params.get(i + bound).copied().unwrap_or(Idx::NONE);
            self.type_node(module, arg, want);
        }
        ret
    }

    /// Type the subject, then resolve the member name against the
    /// subject type's method table.
    fn type_get(&mut self, module: &mut Module, id: NodeId) -> Idx {
        let Some(get) = module.tree.get::<Get>(id).copied() else {
            return Idx::NONE;
        };
        let subject_ty = self.type_node(module, get.subject, Idx::NONE);
        match module.tree.kind(get.member) {
            NodeKind::Ref => {
                let target = module
                    .tree
                    .get::<Ref>(get.member)
                    .map(|r| r.target)
                    .unwrap_or_default();
                type_of_decl(module, target)
            }
            NodeKind::Token => {
                let Some(token) = module.tree.get::<TokenNode>(get.member).copied() else {
                    return Idx::NONE;
                };
                let Some(methods) = module.types.methods(subject_ty) else {
                    return Idx::NONE;
                };
                let Some(target) = methods.member(token.name) else {
                    let message = format!(
                        "no member `{}` on `{}`",
                        module.name(token.name),
                        module.types.display(subject_ty)
                    );
                    self.diagnostics.push(
                        Diagnostic::error(ErrorCode::E2004)
                            .with_message(message)
                            .with_span(token.info.span),
                    );
                    return Idx::NONE;
                };
                module.tree.replace(
                    get.member,
                    Ref {
                        info: token.info,
                        target,
                    },
                );
                self.changes += 1;
                tracing::trace!(member = module.name(token.name), "member resolved");
                type_of_decl(module, target)
            }
            _ => Idx::NONE,
        }
    }
}

/// Type of a declaration or literal a reference can point at.
pub(crate) fn type_of_decl(module: &mut Module, id: NodeId) -> Idx {
    match module.tree.kind(id) {
        NodeKind::Fun => module.tree.get::<Fun>(id).map_or(Idx::NONE, |fun| fun.ty),
        NodeKind::Var => module.tree.get::<Var>(id).map_or(Idx::NONE, |var| var.ty),
        NodeKind::Value => {
            let literal = module
                .tree
                .get::<ValueNode>(id)
                .map(|value| value.value.clone())
                .unwrap_or_default();
            match literal {
                Literal::None => Idx::NONE,
                Literal::Bool(_) => Idx::BOOL,
                Literal::Int(_) => Idx::INT,
                Literal::Str(_) => Idx::STRING,
                Literal::Type(ty) => module.types.type_of_type(ty),
            }
        }
        _ => Idx::NONE,
    }
}
