//! Processing is deterministic and analysis reaches a fixed point.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;
use rioc::{silent_handler, Engine, Module};

const PROGRAMS: &[&str] = &[
    "fun main() log(\"hi\") end",
    "fun add(i, j) then i + j\nfun main() log(add(2, 3)) end",
    "\
var total = 10
fun main()
    var x = 1
    switch
    case x == 1
        var x = total - 3
        log(x)
    else log(0)
    end
    log(x)
end",
    "\
fun main() log(fib(10)) end
fun fib(n) then switch
case n < 2 then n
else fib(n - 1) + fib(n - 2)
end",
    "fun f(i Int, j Int) Int then return i\nfun main() f(1, 2) end",
];

fn engine() -> Engine {
    Engine::new().with_print_handler(silent_handler())
}

#[test]
fn process_is_deterministic() {
    for source in PROGRAMS {
        let first = engine().process(source).to_string();
        let mut reused = engine();
        reused.process("fun other() then 1");
        let second = reused.process(source).to_string();
        assert_eq!(first, second, "{source}");
    }
}

#[test]
fn extra_round_changes_nothing() {
    for source in PROGRAMS {
        let mut engine = engine();
        let mut module = engine.process(source);
        assert!(engine.rounds() < rioc::EngineConfig::DEFAULT_ANALYSIS_ROUNDS);
        let before = module.to_string();
        assert_eq!(engine.analyze_once(&mut module), 0, "{source}");
        assert_eq!(module.to_string(), before);
    }
}

#[test]
fn process_into_matches_process() {
    let mut engine = engine();
    let mut module = Module::new();
    for source in PROGRAMS {
        engine.process_into(source, &mut module);
        let fresh = self::engine().process(source);
        assert_eq!(module.to_string(), fresh.to_string(), "{source}");
    }
}

#[test]
fn run_does_not_modify_the_module() {
    let mut engine = engine();
    let module = engine.process(PROGRAMS[3]);
    let before = module.to_string();
    assert!(engine.run(&module).is_ok());
    assert!(engine.run(&module).is_ok());
    assert_eq!(module.to_string(), before);
}
