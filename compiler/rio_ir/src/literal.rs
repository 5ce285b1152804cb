//! Constant values embedded in the tree.

use crate::Idx;
use std::rc::Rc;

/// Payload of a `Value` node.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Literal {
    #[default]
    None,
    Bool(bool),
    Int(i32),
    Str(Rc<str>),
    /// A type used as a value, such as the builtin `Int`.
    Type(Idx),
}
