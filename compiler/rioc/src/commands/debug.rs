//! Debug commands: `lex`, `parse` and `tree` for inspecting each stage.

use crate::Engine;
use rio_lexer::{dump_tokens, lex};
use rio_parse::parse;

use super::{read_file, report};

/// Lex a file and print one `Kind "text"` line per token.
pub fn lex_file(path: &str) {
    let content = read_file(path);
    let tokens = lex(&content);
    print!("{}", dump_tokens(&tokens, &content));
}

/// Parse a file and print the concrete parse tree.
pub fn parse_file(path: &str) {
    let content = read_file(path);
    let tokens = lex(&content);
    let output = parse(&tokens);
    print!("{}", output.tree.display(&content));
    report(path, &content, &output.diagnostics);
}

/// Process a file and print the analyzed tree with resolved names.
pub fn tree_file(path: &str) {
    let content = read_file(path);
    let mut engine = Engine::new();
    let module = engine.process(&content);
    print!("{module}");
    report(path, &content, engine.diagnostics());
}
