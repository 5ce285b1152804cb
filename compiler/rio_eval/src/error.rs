//! Runtime errors.

use crate::Value;
use thiserror::Error;

/// Result of evaluating one node.
pub type EvalResult = Result<Value, EvalError>;

/// The first fatal condition a run hits. Returned from `Runner::run`;
/// the runner stays usable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("no main")]
    NoMain,
    #[error("main is not a function")]
    MainNotFun,
    #[error("cannot call `{found}`: not a function")]
    NotCallable { found: String },
    #[error("`{name}` takes {expected} argument(s) but {got} were given")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("`{name}` expects {expected}, found {found}")]
    ArgTypeMismatch {
        name: String,
        expected: &'static str,
        found: String,
    },
    #[error("unresolved name `{name}`")]
    Unresolved { name: String },
    #[error("stack overflow: more than {depth} nested calls")]
    StackOverflow { depth: usize },
    #[error("variable slot {slot} is past the top of the stack")]
    BadSlot { slot: usize },
}
