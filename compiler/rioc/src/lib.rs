//! The Rio engine.
//!
//! [`Engine`] owns one instance of every stage and reuses their buffers
//! across calls:
//!
//! ```text
//! process: Source → Lex → Parse → Normalize → seed builtins → (Resolve ⇄ Type)* → Module
//! run:     Module → Runner → Value
//! ```
//!
//! `process` never fails: invalid programs still yield a best-effort
//! module, with problems reported through [`Engine::diagnostics`].
//! `run` returns the first runtime error, after which the engine is
//! ready for the next program.
//!
//! An engine is single-threaded state; use one per thread.

pub mod commands;
mod config;
mod engine;
mod tracing_setup;

pub use config::EngineConfig;
pub use engine::Engine;
pub use tracing_setup::init_tracing;

pub use rio_diagnostic::{Diagnostic, ErrorCode, Severity};
pub use rio_eval::{
    buffer_handler, silent_handler, stdout_handler, EvalError, EvalResult, NativeEntry, NativeFn,
    SharedPrintHandler, Value,
};
pub use rio_ir::Module;
