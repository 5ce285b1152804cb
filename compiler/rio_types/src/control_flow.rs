//! `switch` and `return`.

use crate::Typer;
use rio_ir::{Case, Idx, Module, NodeId, NodeKind, Return, Switch};

impl Typer {
    /// `Never`: control does not continue past a return. The first
    /// return in a function without an annotation fixes its return type.
    pub(crate) fn type_return(&mut self, module: &mut Module, id: NodeId) -> Idx {
        let value = module.tree.get::<Return>(id).map(|ret| ret.value).unwrap_or_default();
        let wanted = self.funs.last().map_or(Idx::NONE, |frame| frame.ret);
        let ty = if value.is_some() {
            self.type_node(module, value, wanted)
        } else {
            Idx::VOID
        };
        if let Some(frame) = self.funs.last_mut() {
            if frame.ret.is_none() {
                frame.ret = ty;
            }
        }
        Idx::NEVER
    }

    /// Patterns are typed against the subject (`Bool` without one). The
    /// switch has the type of its first arm that completes normally;
    /// `Never` if every arm returns and an `else` makes it exhaustive.
    pub(crate) fn type_switch(&mut self, module: &mut Module, id: NodeId, wanted: Idx) -> Idx {
        let Some(switch) = module.tree.get::<Switch>(id).copied() else {
            return Idx::NONE;
        };
        let subject = if switch.subject.is_some() {
            self.type_node(module, switch.subject, Idx::NONE)
        } else {
            Idx::BOOL
        };

        let mut ty = Idx::NONE;
        let mut arms = 0;
        let mut all_never = true;
        let mut exhaustive = false;
        for kid in switch.kids.ids() {
            if module.tree.kind(kid) != NodeKind::Case {
                self.type_node(module, kid, Idx::NONE);
                continue;
            }
            let Some(case) = module.tree.get::<Case>(kid).copied() else {
                continue;
            };
            arms += 1;
            exhaustive |= case.always;
            for pattern in case.patterns.ids() {
                self.type_node(module, pattern, subject);
            }
            let arm = self.type_block(module, case.kids, wanted);
            if !arm.is_never() {
                all_never = false;
                if ty.is_none() {
                    ty = arm;
                }
            }
        }

        if arms == 0 {
            Idx::VOID
        } else if all_never {
            if exhaustive {
                Idx::NEVER
            } else {
                Idx::VOID
            }
        } else {
            ty
        }
    }
}
