//! Interpreter for Rio.
//!
//! The [`Runner`] walks the analyzed tree with an explicit value stack and
//! a stack of call levels. Host functions live in a [`Natives`] registry;
//! [`Natives::seed`] publishes them into a module's `core` and method
//! tables before analysis so the resolver and typer can see them.
//!
//! Program output goes through a [`PrintHandler`], never through logging.

mod builtins;
mod error;
mod native;
mod print_handler;
mod runner;
mod value;

pub use builtins::TYPE_VALUES;
pub use error::{EvalError, EvalResult};
pub use native::{GenericNative, NativeCx, NativeEntry, NativeFn, Natives};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandler, SharedPrintHandler,
};
pub use runner::{Runner, DEFAULT_MAX_CALL_DEPTH};
pub use value::Value;
