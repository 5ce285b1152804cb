//! Type pool.
//!
//! Types are interned: structurally equal `TypeData` always gets the same
//! `Idx`, so type equality is index equality. Primitives sit at fixed
//! indices, and index 0 means "not yet known".
//!
//! The pool also maps a base type to the `Record` of methods callable on
//! it, which is how `a + b` on integers finds `add`.

use crate::{Name, NodeId};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Interned type handle.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    /// Unknown. Analysis fills these in over successive rounds.
    pub const NONE: Idx = Idx(0);
    pub const BOOL: Idx = Idx(1);
    pub const FLOAT: Idx = Idx(2);
    pub const INT: Idx = Idx(3);
    pub const STRING: Idx = Idx(4);
    pub const VOID: Idx = Idx(5);
    /// Type of expressions that never produce a value, such as `return`.
    pub const NEVER: Idx = Idx(6);

    /// Number of pre-interned primitive types.
    pub const PRIMITIVE_COUNT: usize = 7;

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub const fn is_never(self) -> bool {
        self.0 == Self::NEVER.0
    }

    /// Name of a primitive, `None` for composite types.
    pub const fn primitive_name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("None"),
            1 => Some("Bool"),
            2 => Some("Float"),
            3 => Some("Int"),
            4 => Some("String"),
            5 => Some("Void"),
            6 => Some("Never"),
            _ => None,
        }
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.primitive_name() {
            Some(name) => write!(f, "Idx::{name}"),
            None => write!(f, "Idx({})", self.0),
        }
    }
}

/// Methods callable on a base type, by name.
///
/// Members keep their declaration order; lookups go through a name
/// index. Equality and hashing look at the ordered members only.
#[derive(Clone, Debug, Default)]
pub struct Record {
    members: Vec<(Name, NodeId)>,
    index: FxHashMap<Name, NodeId>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member. The first member with a given name wins; returns
    /// false for a duplicate.
    pub fn insert(&mut self, name: Name, id: NodeId) -> bool {
        if self.index.contains_key(&name) {
            return false;
        }
        self.index.insert(name, id);
        self.members.push((name, id));
        true
    }

    pub fn member(&self, name: Name) -> Option<NodeId> {
        self.index.get(&name).copied()
    }

    /// Members in declaration order.
    pub fn members(&self) -> &[(Name, NodeId)] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.members.hash(state);
    }
}

impl FromIterator<(Name, NodeId)> for Record {
    fn from_iter<I: IntoIterator<Item = (Name, NodeId)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, id) in iter {
            record.insert(name, id);
        }
        record
    }
}

/// Structure of an interned type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeData {
    None,
    Bool,
    Float,
    Int,
    String,
    Void,
    Never,
    Fun { params: SmallVec<[Idx; 4]>, ret: Idx },
    List { item: Idx },
    Either { yes: Idx, no: Idx },
    /// The type of a type value: `Int` the value has type `Type(Int)`.
    Type(Idx),
    Record(Record),
}

static UNKNOWN: TypeData = TypeData::None;

/// Interning store for types.
#[derive(Clone, Debug)]
pub struct Pool {
    items: Vec<TypeData>,
    map: FxHashMap<TypeData, Idx>,
    methods: FxHashMap<Idx, Idx>,
}

impl Pool {
    pub fn new() -> Self {
        let mut pool = Pool {
            items: Vec::with_capacity(64),
            map: FxHashMap::default(),
            methods: FxHashMap::default(),
        };
        pool.seed_primitives();
        pool
    }

    fn seed_primitives(&mut self) {
        for data in [
            TypeData::None,
            TypeData::Bool,
            TypeData::Float,
            TypeData::Int,
            TypeData::String,
            TypeData::Void,
            TypeData::Never,
        ] {
            self.intern(data);
        }
        debug_assert_eq!(self.items.len(), Idx::PRIMITIVE_COUNT);
    }

    /// Drop everything but the primitives.
    pub fn clear(&mut self) {
        self.items.clear();
        self.map.clear();
        self.methods.clear();
        self.seed_primitives();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false: primitives are pre-interned.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn intern(&mut self, data: TypeData) -> Idx {
        if let Some(&idx) = self.map.get(&data) {
            return idx;
        }
        let idx = Idx(crate::to_u32(self.items.len()));
        self.items.push(data.clone());
        self.map.insert(data, idx);
        idx
    }

    /// Structure of `idx`; unknown handles read as `TypeData::None`.
    pub fn get(&self, idx: Idx) -> &TypeData {
        self.items.get(idx.index()).unwrap_or(&UNKNOWN)
    }

    pub fn fun(&mut self, params: &[Idx], ret: Idx) -> Idx {
        self.intern(TypeData::Fun {
            params: params.iter().copied().collect(),
            ret,
        })
    }

    pub fn type_of_type(&mut self, ty: Idx) -> Idx {
        self.intern(TypeData::Type(ty))
    }

    pub fn list(&mut self, item: Idx) -> Idx {
        self.intern(TypeData::List { item })
    }

    pub fn either(&mut self, yes: Idx, no: Idx) -> Idx {
        self.intern(TypeData::Either { yes, no })
    }

    /// Parameters and return type of a function type.
    pub fn fun_parts(&self, idx: Idx) -> Option<(&[Idx], Idx)> {
        match self.get(idx) {
            TypeData::Fun { params, ret } => Some((params.as_slice(), *ret)),
            _ => None,
        }
    }

    /// The type a type value denotes: `Type(Int)` gives `Int`.
    pub fn denoted(&self, idx: Idx) -> Option<Idx> {
        match self.get(idx) {
            TypeData::Type(inner) => Some(*inner),
            _ => None,
        }
    }

    /// Register the method table for `owner`.
    pub fn set_methods(&mut self, owner: Idx, record: Record) -> Idx {
        let idx = self.intern(TypeData::Record(record));
        self.methods.insert(owner, idx);
        idx
    }

    pub fn methods(&self, owner: Idx) -> Option<&Record> {
        let idx = self.methods.get(&owner)?;
        match self.get(*idx) {
            TypeData::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn display(&self, idx: Idx) -> TypeDisplay<'_> {
        TypeDisplay { pool: self, idx }
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats a type: `Int`, `Fun(Int, Int) Bool`, `Type(String)`.
pub struct TypeDisplay<'a> {
    pool: &'a Pool,
    idx: Idx,
}

impl fmt::Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.idx.primitive_name() {
            return f.write_str(name);
        }
        let show = |idx| self.pool.display(idx);
        match self.pool.get(self.idx) {
            TypeData::Fun { params, ret } => {
                f.write_str("Fun(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", show(*param))?;
                }
                write!(f, ") {}", show(*ret))
            }
            TypeData::List { item } => write!(f, "List({})", show(*item)),
            TypeData::Either { yes, no } => write!(f, "Either({}, {})", show(*yes), show(*no)),
            TypeData::Type(inner) => write!(f, "Type({})", show(*inner)),
            TypeData::Record(record) => write!(f, "Record({})", record.len()),
            TypeData::None => f.write_str("None"),
            TypeData::Bool => f.write_str("Bool"),
            TypeData::Float => f.write_str("Float"),
            TypeData::Int => f.write_str("Int"),
            TypeData::String => f.write_str("String"),
            TypeData::Void => f.write_str("Void"),
            TypeData::Never => f.write_str("Never"),
        }
    }
}

#[cfg(test)]
mod tests;
