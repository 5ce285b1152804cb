//! The `run` command: process a file and call its `main`.

use crate::Engine;

use super::{read_file, report};

/// Run a Rio source file.
///
/// Diagnostics are reported but do not stop the run: the module is
/// best-effort and `main` may still be well formed. A runtime error exits
/// with status 1.
pub fn run_file(path: &str) {
    let content = read_file(path);
    let mut engine = Engine::new();
    let module = engine.process(&content);
    report(path, &content, engine.diagnostics());
    if let Err(e) = engine.run(&module) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
