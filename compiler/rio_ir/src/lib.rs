//! Rio IR - data structures shared by every stage of the Rio engine.
//!
//! - Spans and interned names
//! - Tokens produced by the lexer
//! - The concrete parse tree (one flat arena, post-order)
//! - The semantic tree (one arena per node kind plus a shared node arena)
//! - The type pool
//! - `Module`, the unit the analysis stages and the runner work on
//!
//! # Design
//!
//! - **Indices, not pointers**: children are `NodeId`s or contiguous
//!   `NodeRange`s into a shared, append-only node arena.
//! - **Index 0 is absent**: every arena starts with a sentinel, so a zero
//!   index always means "none".
//! - **Truncate, don't reallocate**: `clear()` on each container drops back
//!   to the sentinel-only state and keeps capacity.

mod literal;
mod module;
mod name;
pub mod parse_tree;
mod print;
mod span;
mod token;
pub mod tree;
pub mod types;

pub use literal::Literal;
pub use module::Module;
pub use name::{Name, StringInterner};
pub use parse_tree::{ParseKind, ParseNode, ParseRange, ParseRef, ParseTree};
pub use print::write_string_literal;
pub use span::Span;
pub use token::{Token, TokenDisplay, TokenKind};
pub use tree::{
    Block, Call, Case, Fun, Get, Native, NativeId, Node, NodeData, NodeFlags, NodeId, NodeInfo,
    NodeKind, NodeRange, Ref, Return, Switch, TokenNode, Tree, ValueNode, Var,
};
pub use types::{Idx, Pool, Record, TypeData};

/// Converts an arena length to a `u32` index, saturating at `u32::MAX`.
#[inline]
pub(crate) fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
