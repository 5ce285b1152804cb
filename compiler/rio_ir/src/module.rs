//! A processed source module.

use crate::{Name, NodeId, Pool, StringInterner, Tree};
use rustc_hash::FxHashMap;
use std::fmt;

/// Everything the analysis stages produce for one source text.
///
/// A module is reusable: `clear()` returns it to the empty state without
/// freeing its arenas, so the same `Module` can be processed into again.
#[derive(Clone, Debug, Default)]
pub struct Module {
    pub tree: Tree,
    pub names: StringInterner,
    pub types: Pool,
    /// Builtins visible from every scope: functions and type values.
    pub core: FxHashMap<Name, NodeId>,
    /// Module-level named declarations, first declaration wins.
    pub tops: FxHashMap<Name, NodeId>,
    /// The module's top-level `Block`.
    pub root: NodeId,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
        self.names.clear();
        self.types.clear();
        self.core.clear();
        self.tops.clear();
        self.root = NodeId::NONE;
    }

    /// Text of an interned name.
    #[inline]
    pub fn name(&self, name: Name) -> &str {
        self.names.lookup(name)
    }

    /// Module-level declaration by name.
    pub fn top(&self, name: &str) -> Option<NodeId> {
        let name = self.names.get(name)?;
        self.tops.get(&name).copied()
    }

    /// Builtin by name.
    pub fn core_item(&self, name: &str) -> Option<NodeId> {
        let name = self.names.get(name)?;
        self.core.get(&name).copied()
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::print::TreePrinter::new(self, f).print_root()
    }
}
