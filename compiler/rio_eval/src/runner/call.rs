//! Calls: argument staging, user functions and native dispatch.

use super::{Env, Runner};
use crate::{EvalError, EvalResult, NativeFn, Value};
use rio_ir::{Call, Fun, Get, Native, NodeId, NodeKind};

impl Runner {
    /// Arguments are pushed above the caller's locals and become the
    /// callee's first slots. A `Get` callee pushes its subject first as
    /// the bound receiver.
    ///
    /// A `return` inside the callee expression or an argument abandons the
    /// call: staged values are dropped and the returned value goes up to
    /// the enclosing function.
    pub(super) fn eval_call(&mut self, env: &Env<'_>, id: NodeId) -> EvalResult {
        let tree = &env.module.tree;
        let Some(call) = tree.get::<Call>(id).copied() else {
            return Ok(Value::None);
        };
        let start = self.stack.len();
        let callee = match tree.get::<Get>(call.callee).copied() {
            Some(get) => {
                let subject = self.eval(env, get.subject)?;
                if self.returning {
                    return Ok(subject);
                }
                let member = self.eval(env, get.member)?;
                if self.returning {
                    return Ok(member);
                }
                self.stack.push(subject);
                member
            }
            None => self.eval(env, call.callee)?,
        };
        if self.returning {
            self.stack.truncate(start);
            return Ok(callee);
        }
        let fun = match callee {
            Value::Fun(fun) => fun,
            other => {
                self.stack.truncate(start);
                return Err(EvalError::NotCallable {
                    found: other.to_string(),
                });
            }
        };
        for arg in call.args.ids() {
            let value = self.eval(env, arg)?;
            if self.returning {
                self.stack.truncate(start);
                return Ok(value);
            }
            self.stack.push(value);
        }

        if self.levels.len() > self.max_call_depth {
            return Err(EvalError::StackOverflow {
                depth: self.max_call_depth,
            });
        }
        self.levels.push(start);
        let result = self.invoke(env, fun);
        self.levels.pop();
        self.stack.truncate(start);
        result
    }

    /// Run a function whose arguments are already on the stack above the
    /// current level.
    pub(super) fn invoke(&mut self, env: &Env<'_>, id: NodeId) -> EvalResult {
        let tree = &env.module.tree;
        let Some(fun) = tree.get::<Fun>(id).copied() else {
            return Err(EvalError::NotCallable {
                found: format!("{:?}", tree.kind(id)),
            });
        };
        let argc = self.stack.len() - self.level_start();
        let name = env.module.name(fun.name);
        tracing::trace!(fun = name, args = argc, "call");

        if fun.kids.len() == 1 && tree.kind(fun.kids.get(0)) == NodeKind::Native {
            let native = tree
                .get::<Native>(fun.kids.get(0))
                .map(|native| native.id)
                .unwrap_or_default();
            return self.call_native(env, name, native);
        }

        if argc != fun.params.len() {
            return Err(EvalError::ArityMismatch {
                name: name.to_owned(),
                expected: fun.params.len(),
                got: argc,
            });
        }
        let mut value = Value::None;
        for kid in fun.kids.ids() {
            value = self.eval(env, kid)?;
            if self.returning {
                self.returning = false;
                break;
            }
        }
        Ok(value)
    }

    fn call_native(
        &mut self,
        env: &Env<'_>,
        name: &str,
        native: rio_ir::NativeId,
    ) -> EvalResult {
        let Some(entry) = env.natives.get(native) else {
            return Err(EvalError::NotCallable {
                found: name.to_owned(),
            });
        };
        let start = self.level_start();
        let args = &self.stack[start..];
        match &entry.call {
            NativeFn::IntIntBool(call) => {
                let (a, b) = int_pair(entry.name, args)?;
                Ok(Value::Bool(call(a, b)))
            }
            NativeFn::IntIntInt(call) => {
                let (a, b) = int_pair(entry.name, args)?;
                Ok(Value::Int(call(a, b)))
            }
            NativeFn::Any(call) => match args {
                [value] => {
                    call(&env.native, value);
                    Ok(Value::None)
                }
                _ => Err(arity(entry.name, 1, args.len())),
            },
            NativeFn::Generic { arity: expected, call } => {
                if args.len() != *expected {
                    return Err(arity(entry.name, *expected, args.len()));
                }
                self.args.clear();
                self.args.extend(self.stack[start..].iter().cloned());
                let result = call(&env.native, &self.args);
                self.args.clear();
                result
            }
        }
    }
}

fn arity(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::ArityMismatch {
        name: name.to_owned(),
        expected,
        got,
    }
}

fn int_pair(name: &str, args: &[Value]) -> Result<(i32, i32), EvalError> {
    match args {
        [Value::Int(a), Value::Int(b)] => Ok((*a, *b)),
        [a, b] => {
            let found = if matches!(a, Value::Int(_)) { b } else { a };
            Err(EvalError::ArgTypeMismatch {
                name: name.to_owned(),
                expected: "Int",
                found: found.to_string(),
            })
        }
        _ => Err(arity(name, 2, args.len())),
    }
}
