//! Functions and variables.

use crate::{FunFrame, Typer};
use rio_ir::{Fun, Idx, Module, Name, NodeId, Var};
use smallvec::SmallVec;

impl Typer {
    /// Parameters first, then the signature is written back before the
    /// body is typed so recursive calls see it.
    pub(crate) fn type_fun(&mut self, module: &mut Module, id: NodeId, wanted: Idx) -> Idx {
        let Some(fun) = module.tree.get::<Fun>(id).copied() else {
            return Idx::NONE;
        };
        let (wanted_params, wanted_ret): (SmallVec<[Idx; 4]>, Idx) =
            match module.types.fun_parts(wanted) {
                Some((params, ret)) => (params.iter().copied().collect(), ret),
                None => (SmallVec::new(), Idx::NONE),
            };

        let mut params: SmallVec<[Idx; 4]> = SmallVec::new();
        for (i, param) in fun.params.ids().enumerate() {
            let want = wanted_params.get(i).copied().unwrap_or(Idx::NONE);
            params.push(self.type_var(module, param, want));
        }

        let explicit = if fun.ret_spec.is_some() {
            let spec = self.type_node(module, fun.ret_spec, Idx::NONE);
            module.types.denoted(spec)
        } else {
            None
        };
        let declared = explicit.or_else(|| wanted_ret.is_some().then_some(wanted_ret));
        let known_ret = module
            .types
            .fun_parts(fun.ty)
            .map_or(Idx::NONE, |(_, ret)| ret);
        let early = module.types.fun(&params, declared.unwrap_or(known_ret));
        self.set_fun_ty(module, id, early);

        self.funs.push(FunFrame {
            ret: declared.unwrap_or(Idx::NONE),
        });
        let body = self.type_block(module, fun.kids, declared.unwrap_or(Idx::NONE));
        let frame_ret = self.funs.pop().map_or(Idx::NONE, |frame| frame.ret);

        let ret = if frame_ret.is_some() { frame_ret } else { body };
        let ty = module.types.fun(&params, ret);
        self.set_fun_ty(module, id, ty);
        ty
    }

    fn set_fun_ty(&mut self, module: &mut Module, id: NodeId, ty: Idx) {
        if let Some(fun) = module.tree.get_mut::<Fun>(id) {
            if fun.ty != ty {
                fun.ty = ty;
                self.changes += 1;
            }
        }
    }

    /// Annotation, then initializer, then wanted, then the name
    /// convention. Returns the variable's type; an unknown result keeps
    /// whatever an earlier round found.
    pub(crate) fn type_var(&mut self, module: &mut Module, id: NodeId, wanted: Idx) -> Idx {
        let Some(var) = module.tree.get::<Var>(id).copied() else {
            return Idx::NONE;
        };
        let spec = if var.type_spec.is_some() {
            let spec = self.type_node(module, var.type_spec, Idx::NONE);
            module.types.denoted(spec)
        } else {
            None
        };
        let value = if var.value.is_some() {
            self.type_node(module, var.value, spec.unwrap_or(wanted))
        } else {
            Idx::NONE
        };
        let ty = spec
            .or_else(|| value.is_some().then_some(value))
            .or_else(|| wanted.is_some().then_some(wanted))
            .or_else(|| conventional_type(module, var.name))
            .unwrap_or(Idx::NONE);
        if ty.is_none() {
            return var.ty;
        }
        if ty != var.ty {
            if let Some(var) = module.tree.get_mut::<Var>(id) {
                var.ty = ty;
            }
            self.changes += 1;
        }
        ty
    }
}

/// `i`..`n` are integers and `w`..`z` floats, by convention.
fn conventional_type(module: &Module, name: Name) -> Option<Idx> {
    match module.name(name) {
        "i" | "j" | "k" | "l" | "m" | "n" => Some(Idx::INT),
        "w" | "x" | "y" | "z" => Some(Idx::FLOAT),
        _ => None,
    }
}
