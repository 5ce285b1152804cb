//! Command handlers for the `rio` CLI.
//!
//! Each submodule implements one command. Shared helpers live here.

use rio_diagnostic::Diagnostic;

mod debug;
mod run;

pub use debug::{lex_file, parse_file, tree_file};
pub use run::run_file;

/// Read a source file, exiting with a readable message on failure.
pub(super) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// Render diagnostics to stderr, followed by an error count.
pub(super) fn report(path: &str, source: &str, diagnostics: &[Diagnostic]) {
    let mut errors = 0usize;
    for diagnostic in diagnostics {
        if diagnostic.is_error() {
            errors += 1;
        }
        eprint!("{}", diagnostic.render(source));
    }
    if errors > 0 {
        eprintln!("{path}: {errors} error(s)");
    }
}
