//! Tree-walking evaluation.
//!
//! Values live on one stack. Each call pushes a *level* recording where
//! its frame starts; a variable reads `stack[level + offset]`, or
//! `stack[offset]` for module-level variables. Declaring a variable is
//! pushing its value, and leaving a block truncates the stack back to the
//! height it entered at, which keeps the resolver's offsets valid.
//!
//! `return` does not unwind: it sets `returning`, and every evaluation
//! step that runs more code afterwards (statement sequences, arguments,
//! receivers, switch subjects and patterns, initializers) checks the flag
//! and hands the returned value straight up. The call boundary of the
//! function being returned from clears it.

mod call;

use crate::{EvalError, EvalResult, NativeCx, Natives, PrintHandler, Value};
use rio_ir::{
    Block, Case, Get, Module, NodeFlags, NodeId, NodeKind, NodeRange, Ref, Return, Switch,
    TokenNode, ValueNode, Var,
};
use rio_stack::ensure_sufficient_stack;

/// Nested calls allowed before a run fails with a stack overflow.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// Everything a run reads but never changes.
struct Env<'a> {
    module: &'a Module,
    natives: &'a Natives,
    native: NativeCx<'a>,
}

/// Reusable interpreter state.
#[derive(Debug)]
pub struct Runner {
    stack: Vec<Value>,
    /// Stack height at entry of each active call.
    levels: Vec<usize>,
    returning: bool,
    /// Scratch arguments for generic natives.
    args: Vec<Value>,
    max_call_depth: usize,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

impl Runner {
    pub fn new() -> Self {
        Runner {
            stack: Vec::new(),
            levels: Vec::new(),
            returning: false,
            args: Vec::new(),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    #[must_use]
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn set_max_call_depth(&mut self, depth: usize) {
        self.max_call_depth = depth;
    }

    /// Evaluate module-level variables in order, then call `main` with no
    /// arguments and return its value.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(
        &mut self,
        module: &Module,
        natives: &Natives,
        print: &PrintHandler,
    ) -> EvalResult {
        self.stack.clear();
        self.levels.clear();
        self.levels.push(0);
        self.args.clear();
        self.returning = false;

        let main = module.top("main").ok_or(EvalError::NoMain)?;
        if module.tree.kind(main) != NodeKind::Fun {
            return Err(EvalError::MainNotFun);
        }
        let env = Env {
            module,
            natives,
            native: NativeCx { print },
        };

        let kids = module
            .tree
            .get::<Block>(module.root)
            .map(|root| root.kids)
            .unwrap_or_default();
        for kid in kids.ids() {
            if module.tree.kind(kid) != NodeKind::Var {
                continue;
            }
            let value = self.eval_var(&env, kid)?;
            if self.returning {
                // No function to return from: the global takes the value.
                self.returning = false;
                self.stack.push(value);
            }
        }
        tracing::debug!(globals = self.stack.len(), "globals ready");

        let start = self.stack.len();
        self.levels.push(start);
        let result = self.invoke(&env, main);
        self.levels.pop();
        self.stack.truncate(start);
        result
    }

    fn level_start(&self) -> usize {
        self.levels.last().copied().unwrap_or(0)
    }

    fn eval(&mut self, env: &Env<'_>, id: NodeId) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(env, id))
    }

    fn eval_inner(&mut self, env: &Env<'_>, id: NodeId) -> EvalResult {
        let tree = &env.module.tree;
        match tree.kind(id) {
            NodeKind::None | NodeKind::Case | NodeKind::Native => Ok(Value::None),
            NodeKind::Value => Ok(tree
                .get::<ValueNode>(id)
                .map(|value| Value::from_literal(&value.value))
                .unwrap_or_default()),
            NodeKind::Ref => {
                let target = tree.get::<Ref>(id).map(|r| r.target).unwrap_or_default();
                self.eval_ref(env, target)
            }
            NodeKind::Token => {
                let name = tree
                    .get::<TokenNode>(id)
                    .map(|token| env.module.name(token.name))
                    .unwrap_or_default();
                Err(EvalError::Unresolved {
                    name: name.to_owned(),
                })
            }
            NodeKind::Var => self.eval_var(env, id),
            NodeKind::Call => self.eval_call(env, id),
            NodeKind::Fun => Ok(Value::Fun(id)),
            NodeKind::Get => {
                let Some(get) = tree.get::<Get>(id).copied() else {
                    return Ok(Value::None);
                };
                let subject = self.eval(env, get.subject)?;
                if self.returning {
                    return Ok(subject);
                }
                self.eval(env, get.member)
            }
            NodeKind::Return => {
                let value = tree.get::<Return>(id).map(|ret| ret.value).unwrap_or_default();
                let value = self.eval(env, value)?;
                self.returning = true;
                Ok(value)
            }
            NodeKind::Switch => self.eval_switch(env, id),
            NodeKind::Block => {
                let kids = tree.get::<Block>(id).map(|block| block.kids).unwrap_or_default();
                self.eval_block(env, kids)
            }
        }
    }

    fn eval_ref(&mut self, env: &Env<'_>, target: NodeId) -> EvalResult {
        let tree = &env.module.tree;
        match tree.kind(target) {
            NodeKind::Fun => Ok(Value::Fun(target)),
            NodeKind::Var => {
                let Some(var) = tree.get::<Var>(target) else {
                    return Ok(Value::None);
                };
                let offset = var.offset as usize;
                let slot = if var.info.flags.contains(NodeFlags::TOP) {
                    offset
                } else {
                    self.level_start() + offset
                };
                self.stack
                    .get(slot)
                    .cloned()
                    .ok_or(EvalError::BadSlot { slot })
            }
            NodeKind::Value => Ok(tree
                .get::<ValueNode>(target)
                .map(|value| Value::from_literal(&value.value))
                .unwrap_or_default()),
            _ => Ok(Value::None),
        }
    }

    /// Push the initializer's value: that push is the variable's slot.
    /// An initializer that returns yields the returned value instead and
    /// claims no slot.
    fn eval_var(&mut self, env: &Env<'_>, id: NodeId) -> EvalResult {
        let value = env
            .module
            .tree
            .get::<Var>(id)
            .map(|var| var.value)
            .unwrap_or_default();
        let value = self.eval(env, value)?;
        if self.returning {
            return Ok(value);
        }
        self.stack.push(value);
        Ok(Value::None)
    }

    /// Statements in order until one returns; the block's locals are
    /// dropped on exit.
    fn eval_block(&mut self, env: &Env<'_>, kids: NodeRange) -> EvalResult {
        let height = self.stack.len();
        let mut value = Value::None;
        for kid in kids.ids() {
            value = self.eval(env, kid)?;
            if self.returning {
                break;
            }
        }
        self.stack.truncate(height);
        Ok(value)
    }

    /// First arm with a pattern equal to the subject (`true` without
    /// one) runs; `else` always matches. No match yields `None`.
    fn eval_switch(&mut self, env: &Env<'_>, id: NodeId) -> EvalResult {
        let tree = &env.module.tree;
        let Some(switch) = tree.get::<Switch>(id).copied() else {
            return Ok(Value::None);
        };
        let subject = if switch.subject.is_some() {
            self.eval(env, switch.subject)?
        } else {
            Value::Bool(true)
        };
        if self.returning {
            return Ok(subject);
        }
        for kid in switch.kids.ids() {
            let Some(case) = tree.get::<Case>(kid).copied() else {
                continue;
            };
            let mut matched = case.always;
            for pattern in case.patterns.ids() {
                if matched {
                    break;
                }
                let value = self.eval(env, pattern)?;
                if self.returning {
                    return Ok(value);
                }
                matched = value == subject;
            }
            if matched {
                return self.eval_block(env, case.kids);
            }
        }
        Ok(Value::None)
    }
}
