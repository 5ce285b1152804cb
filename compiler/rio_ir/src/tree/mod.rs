//! Semantic tree.
//!
//! Every node kind has its own arena of records, and a shared node arena
//! holds `Node { kind, index }` pairs pointing into them. Children are
//! referenced by `NodeId` (one node) or `NodeRange` (a contiguous run in
//! the shared arena). All arenas start with a sentinel, so id 0 is "none".
//!
//! Later stages mutate records in place: the resolver rewrites identifier
//! nodes into `Ref`s and assigns offsets, the typer fills in types.

use crate::{Idx, Literal, Name, Span, TokenKind};
use bitflags::bitflags;
use std::fmt;

/// Index into the shared node arena. `NodeId::NONE` is the sentinel.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(0);

    #[inline]
    pub const fn new(raw: u32) -> Self {
        NodeId(raw)
    }

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
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "NodeId::NONE")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// Contiguous run of ids in the shared node arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct NodeRange {
    pub start: u32,
    pub end: u32,
}

impl NodeRange {
    pub const EMPTY: NodeRange = NodeRange { start: 0, end: 0 };

    #[inline]
    pub const fn len(self) -> usize {
        (self.end - self.start) as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// The `i`th id, or `NodeId::NONE` when out of range.
    #[inline]
    pub fn get(self, i: usize) -> NodeId {
        if i < self.len() {
            NodeId(self.start + crate::to_u32(i))
        } else {
            NodeId::NONE
        }
    }

    pub fn ids(self) -> impl DoubleEndedIterator<Item = NodeId> + ExactSizeIterator {
        (self.start..self.end).map(NodeId)
    }
}

/// Node classification; selects the per-kind arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum NodeKind {
    #[default]
    None,
    Block,
    Call,
    Case,
    Fun,
    Get,
    Native,
    Ref,
    Return,
    Switch,
    Token,
    Value,
    Var,
}

/// Entry in the shared node arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Node {
    pub kind: NodeKind,
    pub index: u32,
}

bitflags! {
    /// Declaration modifiers and analysis markers.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct NodeFlags: u8 {
        const PLUG = 1 << 0;
        const PUB = 1 << 1;
        /// Module-level declaration.
        const TOP = 1 << 2;
        /// Function parameter.
        const PARAM = 1 << 3;
    }
}

/// Metadata common to every record.
///
/// `index` is a per-module creation counter, stable across runs on the
/// same source. It is what the tree printer shows after `@`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct NodeInfo {
    pub index: u32,
    pub span: Span,
    pub flags: NodeFlags,
}

/// Index into the engine's native function registry.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[repr(transparent)]
pub struct NativeId(u32);

impl NativeId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        NativeId(raw)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Block {
    pub info: NodeInfo,
    pub kids: NodeRange,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Call {
    pub info: NodeInfo,
    pub callee: NodeId,
    pub args: NodeRange,
}

/// One arm of a switch. `else` arms have no patterns and `always` set.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Case {
    pub info: NodeInfo,
    pub patterns: NodeRange,
    pub kids: NodeRange,
    pub always: bool,
}

/// Function literal or declaration. `params` are `Var` nodes.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Fun {
    pub info: NodeInfo,
    pub name: Name,
    pub params: NodeRange,
    pub ret_spec: NodeId,
    pub kids: NodeRange,
    pub ty: Idx,
    /// Peak number of frame slots the body needs: params, locals and the
    /// receivers and arguments staged for calls.
    pub size: u32,
}

/// Member access. Only `subject` is resolved by scope; `member` is
/// resolved against the subject's type.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Get {
    pub info: NodeInfo,
    pub subject: NodeId,
    pub member: NodeId,
}

/// Body of a builtin function.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Native {
    pub info: NodeInfo,
    pub id: NativeId,
}

/// Resolved reference to a declaration.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Ref {
    pub info: NodeInfo,
    pub target: NodeId,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Return {
    pub info: NodeInfo,
    pub value: NodeId,
}

/// Switch; a missing subject means `true`.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Switch {
    pub info: NodeInfo,
    pub subject: NodeId,
    pub kids: NodeRange,
}

/// Identifier not yet resolved.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct TokenNode {
    pub info: NodeInfo,
    pub kind: TokenKind,
    pub name: Name,
}

#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct ValueNode {
    pub info: NodeInfo,
    pub value: Literal,
}

/// Variable or parameter. `offset` is frame-relative inside functions and
/// absolute for module-level variables.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Var {
    pub info: NodeInfo,
    pub name: Name,
    pub type_spec: NodeId,
    pub value: NodeId,
    pub ty: Idx,
    pub offset: u32,
}

/// A record stored in one of the per-kind arenas.
pub trait NodeData: Sized {
    const KIND: NodeKind;

    fn arena(tree: &Tree) -> &[Self];
    fn arena_mut(tree: &mut Tree) -> &mut Vec<Self>;
    fn info(&self) -> &NodeInfo;
    fn info_mut(&mut self) -> &mut NodeInfo;
}

macro_rules! node_data {
    ($($ty:ident => $kind:ident in $field:ident;)*) => {
        $(
            impl NodeData for $ty {
                const KIND: NodeKind = NodeKind::$kind;

                #[inline]
                fn arena(tree: &Tree) -> &[Self] {
                    &tree.$field
                }

                #[inline]
                fn arena_mut(tree: &mut Tree) -> &mut Vec<Self> {
                    &mut tree.$field
                }

                #[inline]
                fn info(&self) -> &NodeInfo {
                    &self.info
                }

                #[inline]
                fn info_mut(&mut self) -> &mut NodeInfo {
                    &mut self.info
                }
            }
        )*
    };
}

node_data! {
    Block => Block in blocks;
    Call => Call in calls;
    Case => Case in cases;
    Fun => Fun in funs;
    Get => Get in gets;
    Native => Native in natives;
    Ref => Ref in refs;
    Return => Return in returns;
    Switch => Switch in switches;
    TokenNode => Token in tokens;
    ValueNode => Value in values;
    Var => Var in vars;
}

/// Arena storage for one module's semantic tree.
#[derive(Clone, Debug)]
pub struct Tree {
    nodes: Vec<Node>,
    blocks: Vec<Block>,
    calls: Vec<Call>,
    cases: Vec<Case>,
    funs: Vec<Fun>,
    gets: Vec<Get>,
    natives: Vec<Native>,
    refs: Vec<Ref>,
    returns: Vec<Return>,
    switches: Vec<Switch>,
    tokens: Vec<TokenNode>,
    values: Vec<ValueNode>,
    vars: Vec<Var>,
    next_index: u32,
}

impl Tree {
    pub fn new() -> Self {
        Tree {
            nodes: vec![Node::default()],
            blocks: vec![Block::default()],
            calls: vec![Call::default()],
            cases: vec![Case::default()],
            funs: vec![Fun::default()],
            gets: vec![Get::default()],
            natives: vec![Native::default()],
            refs: vec![Ref::default()],
            returns: vec![Return::default()],
            switches: vec![Switch::default()],
            tokens: vec![TokenNode::default()],
            values: vec![ValueNode::default()],
            vars: vec![Var::default()],
            next_index: 1,
        }
    }

    /// Drop every arena back to its sentinel, keeping capacity.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.blocks.truncate(1);
        self.calls.truncate(1);
        self.cases.truncate(1);
        self.funs.truncate(1);
        self.gets.truncate(1);
        self.natives.truncate(1);
        self.refs.truncate(1);
        self.returns.truncate(1);
        self.switches.truncate(1);
        self.tokens.truncate(1);
        self.values.truncate(1);
        self.vars.truncate(1);
        self.next_index = 1;
    }

    /// Number of entries in the shared node arena, sentinel included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Node {
        self.nodes.get(id.index()).copied().unwrap_or_default()
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind
    }

    /// Fresh metadata with the next creation index.
    pub fn next_info(&mut self, span: Span) -> NodeInfo {
        let index = self.next_index;
        self.next_index += 1;
        NodeInfo {
            index,
            span,
            flags: NodeFlags::empty(),
        }
    }

    /// Store a record in its arena. The returned `Node` is not yet part of
    /// the shared arena; see [`push_node`](Self::push_node) and
    /// [`append`](Self::append).
    pub fn add<T: NodeData>(&mut self, data: T) -> Node {
        let arena = T::arena_mut(self);
        let index = crate::to_u32(arena.len());
        arena.push(data);
        Node {
            kind: T::KIND,
            index,
        }
    }

    pub fn push_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(crate::to_u32(self.nodes.len()));
        self.nodes.push(node);
        id
    }

    /// Append `nodes` to the shared arena in order, returning their range.
    pub fn append(&mut self, nodes: impl IntoIterator<Item = Node>) -> NodeRange {
        let start = crate::to_u32(self.nodes.len());
        self.nodes.extend(nodes);
        NodeRange {
            start,
            end: crate::to_u32(self.nodes.len()),
        }
    }

    /// Point `id` at a new record, leaving the old record orphaned.
    pub fn replace<T: NodeData>(&mut self, id: NodeId, data: T) {
        let node = self.add(data);
        if let Some(slot) = self.nodes.get_mut(id.index()) {
            *slot = node;
        }
    }

    /// The record behind `id` if it is a `T`.
    #[inline]
    pub fn get<T: NodeData>(&self, id: NodeId) -> Option<&T> {
        self.data(self.node(id))
    }

    #[inline]
    pub fn get_mut<T: NodeData>(&mut self, id: NodeId) -> Option<&mut T> {
        let node = self.node(id);
        self.data_mut(node)
    }

    /// The record behind an arena entry if it is a `T`.
    #[inline]
    pub fn data<T: NodeData>(&self, node: Node) -> Option<&T> {
        if node.kind != T::KIND {
            return None;
        }
        T::arena(self).get(node.index as usize)
    }

    #[inline]
    pub fn data_mut<T: NodeData>(&mut self, node: Node) -> Option<&mut T> {
        if node.kind != T::KIND {
            return None;
        }
        T::arena_mut(self).get_mut(node.index as usize)
    }

    fn info_of<T: NodeData>(&self, node: Node) -> NodeInfo {
        self.data::<T>(node).map(|data| *data.info()).unwrap_or_default()
    }

    /// Metadata of any record; the default for the sentinel.
    pub fn info(&self, node: Node) -> NodeInfo {
        match node.kind {
            NodeKind::None => NodeInfo::default(),
            NodeKind::Block => self.info_of::<Block>(node),
            NodeKind::Call => self.info_of::<Call>(node),
            NodeKind::Case => self.info_of::<Case>(node),
            NodeKind::Fun => self.info_of::<Fun>(node),
            NodeKind::Get => self.info_of::<Get>(node),
            NodeKind::Native => self.info_of::<Native>(node),
            NodeKind::Ref => self.info_of::<Ref>(node),
            NodeKind::Return => self.info_of::<Return>(node),
            NodeKind::Switch => self.info_of::<Switch>(node),
            NodeKind::Token => self.info_of::<TokenNode>(node),
            NodeKind::Value => self.info_of::<ValueNode>(node),
            NodeKind::Var => self.info_of::<Var>(node),
        }
    }

    #[inline]
    pub fn id_info(&self, id: NodeId) -> NodeInfo {
        self.info(self.node(id))
    }

    pub fn info_mut(&mut self, node: Node) -> Option<&mut NodeInfo> {
        match node.kind {
            NodeKind::None => None,
            NodeKind::Block => self.data_mut::<Block>(node).map(NodeData::info_mut),
            NodeKind::Call => self.data_mut::<Call>(node).map(NodeData::info_mut),
            NodeKind::Case => self.data_mut::<Case>(node).map(NodeData::info_mut),
            NodeKind::Fun => self.data_mut::<Fun>(node).map(NodeData::info_mut),
            NodeKind::Get => self.data_mut::<Get>(node).map(NodeData::info_mut),
            NodeKind::Native => self.data_mut::<Native>(node).map(NodeData::info_mut),
            NodeKind::Ref => self.data_mut::<Ref>(node).map(NodeData::info_mut),
            NodeKind::Return => self.data_mut::<Return>(node).map(NodeData::info_mut),
            NodeKind::Switch => self.data_mut::<Switch>(node).map(NodeData::info_mut),
            NodeKind::Token => self.data_mut::<TokenNode>(node).map(NodeData::info_mut),
            NodeKind::Value => self.data_mut::<ValueNode>(node).map(NodeData::info_mut),
            NodeKind::Var => self.data_mut::<Var>(node).map(NodeData::info_mut),
        }
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
