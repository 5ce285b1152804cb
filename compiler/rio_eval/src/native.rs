//! Host functions callable from Rio.
//!
//! A native is one of a closed set of signatures. The common small shapes
//! get dedicated variants so the runner can call them without copying
//! arguments; everything else goes through [`NativeFn::Generic`], which
//! receives the arguments as a slice.

use crate::{EvalError, PrintHandler, Value};
use rio_ir::{Fun, Idx, Literal, Module, Name, Native, NativeId, NodeId, Record, Span, ValueNode};
use smallvec::SmallVec;
use std::fmt;

/// What a native can reach besides its arguments.
pub struct NativeCx<'a> {
    pub print: &'a PrintHandler,
}

pub type GenericNative = Box<dyn Fn(&NativeCx<'_>, &[Value]) -> Result<Value, EvalError>>;

pub enum NativeFn {
    IntIntBool(fn(i32, i32) -> bool),
    IntIntInt(fn(i32, i32) -> i32),
    /// One argument of any type, no result.
    Any(fn(&NativeCx<'_>, &Value)),
    Generic { arity: usize, call: GenericNative },
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeFn::IntIntBool(_) => f.write_str("IntIntBool"),
            NativeFn::IntIntInt(_) => f.write_str("IntIntInt"),
            NativeFn::Any(_) => f.write_str("Any"),
            NativeFn::Generic { arity, .. } => write!(f, "Generic({arity})"),
        }
    }
}

/// A registered native with the signature the typer sees.
#[derive(Debug)]
pub struct NativeEntry {
    pub name: &'static str,
    /// Type whose method table holds this native; `NONE` for `core`.
    pub owner: Idx,
    pub params: SmallVec<[Idx; 4]>,
    pub ret: Idx,
    pub call: NativeFn,
}

/// Registry of natives, indexed by `NativeId`.
#[derive(Debug, Default)]
pub struct Natives {
    entries: Vec<NativeEntry>,
}

impl Natives {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: NativeEntry) -> NativeId {
        let id = NativeId::new(u32::try_from(self.entries.len()).unwrap_or(u32::MAX));
        self.entries.push(entry);
        id
    }

    pub fn get(&self, id: NativeId) -> Option<&NativeEntry> {
        self.entries.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NativeId, &NativeEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (NativeId::new(u32::try_from(i).unwrap_or(u32::MAX)), entry))
    }

    /// Publish every native into `module`: `core` functions by name,
    /// methods into their owner's table, plus the builtin type values.
    /// Each native becomes a `Fun` whose body is a single `Native` node.
    #[tracing::instrument(level = "debug", skip_all, fields(natives = self.entries.len()))]
    pub fn seed(&self, module: &mut Module) {
        let mut tables: Vec<(Idx, Record)> = Vec::new();
        for (id, entry) in self.iter() {
            let name = module.names.intern(entry.name);
            let fun = seed_native(module, id, name, entry);
            if entry.owner.is_none() {
                module.core.insert(name, fun);
                continue;
            }
            match tables.iter_mut().find(|(owner, _)| *owner == entry.owner) {
                Some((_, record)) => {
                    record.insert(name, fun);
                }
                None => {
                    let mut record = Record::new();
                    record.insert(name, fun);
                    tables.push((entry.owner, record));
                }
            }
        }
        for (owner, record) in tables {
            module.types.set_methods(owner, record);
        }
        for (text, ty) in crate::TYPE_VALUES {
            let name = module.names.intern(text);
            let info = module.tree.next_info(Span::DUMMY);
            let node = module.tree.add(ValueNode {
                info,
                value: Literal::Type(ty),
            });
            let value = module.tree.push_node(node);
            module.core.insert(name, value);
        }
    }
}

fn seed_native(module: &mut Module, id: NativeId, name: Name, entry: &NativeEntry) -> NodeId {
    let ty = module.types.fun(&entry.params, entry.ret);
    let info = module.tree.next_info(Span::DUMMY);
    let body = module.tree.add(Native { info, id });
    let kids = module.tree.append([body]);
    let info = module.tree.next_info(Span::DUMMY);
    let node = module.tree.add(Fun {
        info,
        name,
        kids,
        ty,
        ..Fun::default()
    });
    module.tree.push_node(node)
}
