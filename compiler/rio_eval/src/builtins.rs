//! The builtin surface: `log`, the `Int` method table and type values.

use crate::{EvalError, NativeCx, NativeEntry, NativeFn, Natives, Value};
use rio_ir::Idx;
use smallvec::smallvec;

/// Type names bound in `core` to type values.
pub const TYPE_VALUES: [(&str, Idx); 5] = [
    ("Bool", Idx::BOOL),
    ("Float", Idx::FLOAT),
    ("Int", Idx::INT),
    ("String", Idx::STRING),
    ("Void", Idx::VOID),
];

fn log(cx: &NativeCx<'_>, value: &Value) {
    cx.print.println(&value.to_string());
}

fn neg(_: &NativeCx<'_>, args: &[Value]) -> Result<Value, EvalError> {
    match args {
        [Value::Int(n)] => Ok(Value::Int(n.wrapping_neg())),
        [other] => Err(EvalError::ArgTypeMismatch {
            name: "neg".to_owned(),
            expected: "Int",
            found: other.to_string(),
        }),
        _ => Err(EvalError::ArityMismatch {
            name: "neg".to_owned(),
            expected: 1,
            got: args.len(),
        }),
    }
}

fn int_int_int(name: &'static str, call: fn(i32, i32) -> i32) -> NativeEntry {
    NativeEntry {
        name,
        owner: Idx::INT,
        params: smallvec![Idx::INT, Idx::INT],
        ret: Idx::INT,
        call: NativeFn::IntIntInt(call),
    }
}

fn int_int_bool(name: &'static str, call: fn(i32, i32) -> bool) -> NativeEntry {
    NativeEntry {
        name,
        owner: Idx::INT,
        params: smallvec![Idx::INT, Idx::INT],
        ret: Idx::BOOL,
        call: NativeFn::IntIntBool(call),
    }
}

impl Natives {
    /// `log` plus the `Int` methods. Integer arithmetic wraps.
    pub fn with_builtins() -> Self {
        let mut natives = Natives::new();
        natives.register(NativeEntry {
            name: "log",
            owner: Idx::NONE,
            params: smallvec![Idx::NONE],
            ret: Idx::VOID,
            call: NativeFn::Any(log),
        });
        natives.register(int_int_int("add", i32::wrapping_add));
        natives.register(int_int_int("sub", i32::wrapping_sub));
        natives.register(int_int_bool("eq", |a, b| a == b));
        natives.register(int_int_bool("ne", |a, b| a != b));
        natives.register(int_int_bool("gt", |a, b| a > b));
        natives.register(int_int_bool("ge", |a, b| a >= b));
        natives.register(int_int_bool("lt", |a, b| a < b));
        natives.register(int_int_bool("le", |a, b| a <= b));
        natives.register(NativeEntry {
            name: "neg",
            owner: Idx::INT,
            params: smallvec![Idx::INT],
            ret: Idx::INT,
            call: NativeFn::Generic {
                arity: 1,
                call: Box::new(neg),
            },
        });
        natives
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rio_ir::{Fun, Module, NodeKind};

    #[test]
    fn seeds_core_and_int_methods() {
        let natives = Natives::with_builtins();
        let mut module = Module::new();
        natives.seed(&mut module);

        let log = module.core_item("log").unwrap_or_default();
        assert_eq!(module.tree.kind(log), NodeKind::Fun);
        let ty = module.tree.get::<Fun>(log).map_or(Idx::NONE, |fun| fun.ty);
        assert_eq!(module.types.display(ty).to_string(), "Fun(None) Void");

        let int = module.core_item("Int").unwrap_or_default();
        assert_eq!(module.tree.kind(int), NodeKind::Value);
        assert!(module.core_item("add").is_none());

        let methods = module.types.methods(Idx::INT).cloned().unwrap_or_default();
        let names: Vec<&str> = methods
            .members()
            .iter()
            .map(|(name, _)| module.name(*name))
            .collect();
        assert_eq!(names, vec!["add", "sub", "eq", "ne", "gt", "ge", "lt", "le", "neg"]);
    }

    #[test]
    fn native_bodies_point_at_the_registry() {
        let natives = Natives::with_builtins();
        let mut module = Module::new();
        natives.seed(&mut module);
        let log = module.core_item("log").unwrap_or_default();
        let body = module.tree.get::<Fun>(log).map(|fun| fun.kids).unwrap_or_default();
        assert_eq!(body.len(), 1);
        let native = module
            .tree
            .get::<rio_ir::Native>(body.get(0))
            .map(|native| native.id)
            .unwrap_or_default();
        assert_eq!(natives.get(native).map(|entry| entry.name), Some("log"));
    }
}
