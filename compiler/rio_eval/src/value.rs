//! Runtime values.

use rio_ir::{Idx, Literal, NodeId};
use std::fmt;
use std::rc::Rc;

/// A dynamically typed runtime value. Functions are first-class and refer
/// to their `Fun` node.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Value {
    /// Result of statements and `Void` functions.
    #[default]
    None,
    Bool(bool),
    Int(i32),
    Str(Rc<str>),
    Fun(NodeId),
    Type(Idx),
}

impl Value {
    pub fn from_literal(literal: &Literal) -> Self {
        match literal {
            Literal::None => Value::None,
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Int(n) => Value::Int(*n),
            Literal::Str(text) => Value::Str(Rc::clone(text)),
            Literal::Type(ty) => Value::Type(*ty),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "None",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Str(_) => "String",
            Value::Fun(_) => "Fun",
            Value::Type(_) => "Type",
        }
    }
}

/// How `log` shows a value: strings without quotes.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("none"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Str(text) => f.write_str(text),
            Value::Fun(id) => write!(f, "fun@{}", id.raw()),
            Value::Type(ty) => f.write_str(ty.primitive_name().unwrap_or("Type")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display() {
        assert_eq!(Value::Str("hi".into()).to_string(), "hi");
        assert_eq!(Value::Int(-3).to_string(), "-3");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Type(Idx::INT).to_string(), "Int");
        assert_eq!(Value::None.to_string(), "none");
    }

    #[test]
    fn from_literal() {
        assert_eq!(Value::from_literal(&Literal::Int(7)), Value::Int(7));
        assert_eq!(
            Value::from_literal(&Literal::Str("a".into())),
            Value::Str("a".into())
        );
        assert_eq!(Value::from_literal(&Literal::None), Value::None);
    }

    #[test]
    fn strings_compare_by_content() {
        let a = Value::Str(Rc::from("x"));
        let b = Value::Str(Rc::from(String::from("x")));
        assert_eq!(a, b);
        assert_ne!(a, Value::Int(0));
    }
}
