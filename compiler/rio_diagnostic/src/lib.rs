//! Diagnostics for the Rio engine.
//!
//! Every stage reports problems as [`Diagnostic`] values instead of
//! failing: an error code for searchability, a message, and the primary
//! span. Analysis always runs to completion and the collected diagnostics
//! are handed back next to the module.

mod diagnostic;
mod error_code;
pub mod span_utils;

pub use diagnostic::{
    expected_expression, unclosed_delimiter, unexpected_token, unknown_identifier, Diagnostic,
    Severity,
};
pub use error_code::ErrorCode;
