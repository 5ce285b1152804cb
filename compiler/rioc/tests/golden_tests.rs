//! Golden tests for the engine.
//!
//! Each `tests/golden/<name>.rio` is processed and run. The analyzed tree
//! dump must equal `<name>.tree` and everything `log` printed must equal
//! `<name>.out`. Any diagnostic fails the test.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rioc::{buffer_handler, Engine};

fn golden_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("golden")
}

fn find_rio_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|e| e == "rio"))
                .collect()
        })
        .unwrap_or_default();
    files.sort();
    files
}

fn run_golden_test(path: &Path) {
    let source = fs::read_to_string(path).unwrap();
    let expected_tree = fs::read_to_string(path.with_extension("tree")).unwrap();
    let expected_out = fs::read_to_string(path.with_extension("out")).unwrap();

    let mut engine = Engine::new().with_print_handler(buffer_handler());
    let module = engine.process(&source);
    let rendered: Vec<String> = engine
        .diagnostics()
        .iter()
        .map(|d| d.render(&source))
        .collect();
    assert!(
        rendered.is_empty(),
        "{}: unexpected diagnostics:\n{}",
        path.display(),
        rendered.join("\n")
    );
    assert_eq!(module.to_string(), expected_tree, "{}", path.display());

    let result = engine.run(&module);
    assert!(result.is_ok(), "{}: {result:?}", path.display());
    assert_eq!(
        engine.print_handler().output(),
        expected_out,
        "{}",
        path.display()
    );
}

#[test]
fn golden_files() {
    let files = find_rio_files(&golden_dir());
    assert!(!files.is_empty(), "no golden files found");
    for path in &files {
        run_golden_test(path);
    }
}
