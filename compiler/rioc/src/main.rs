//! Rio CLI

use rioc::commands::{lex_file, parse_file, run_file, tree_file};

fn main() {
    rioc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" | "tree" | "parse" | "lex" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: rio {command} <file.rio>");
                std::process::exit(1);
            };
            match command.as_str() {
                "run" => run_file(path),
                "tree" => tree_file(path),
                "parse" => parse_file(path),
                _ => lex_file(path),
            }
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("rio {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Rio language engine");
    println!();
    println!("Usage: rio <command> <file.rio>");
    println!();
    println!("Commands:");
    println!("  run <file.rio>      Process a program and call its main");
    println!("  tree <file.rio>     Print the analyzed tree with resolved names");
    println!("  parse <file.rio>    Print the concrete parse tree");
    println!("  lex <file.rio>      Print the token stream");
    println!("  help                Show this help message");
    println!("  version             Show version information");
    println!();
    println!("Set RIO_LOG (or RUST_LOG) to enable tracing, e.g. RIO_LOG=debug.");
}
