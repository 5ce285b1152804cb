use super::*;
use pretty_assertions::assert_eq;
use rio_diagnostic::ErrorCode;
use rio_ir::{Fun, NodeId, NodeKind, Record, Span, ValueNode, Var};
use rio_resolve::Resolver;

fn seed_fun(module: &mut Module, name: &str, params: &[Idx], ret: Idx) -> NodeId {
    let name = module.names.intern(name);
    let ty = module.types.fun(params, ret);
    let info = module.tree.next_info(Span::DUMMY);
    let node = module.tree.add(Fun {
        info,
        name,
        ty,
        ..Fun::default()
    });
    module.tree.push_node(node)
}

/// A module with a small builtin surface: `log`, the `Int` type value
/// and a few `Int` methods.
fn module_for(source: &str) -> Module {
    let parsed = rio_parse::parse(&rio_lexer::lex(source));
    let mut module = rio_canon::normalize(&parsed.tree, source).module;

    let log = seed_fun(&mut module, "log", &[Idx::NONE], Idx::VOID);
    let log_name = module.names.intern("log");
    module.core.insert(log_name, log);

    let int_name = module.names.intern("Int");
    let info = module.tree.next_info(Span::DUMMY);
    let node = module.tree.add(ValueNode {
        info,
        value: rio_ir::Literal::Type(Idx::INT),
    });
    let int = module.tree.push_node(node);
    module.core.insert(int_name, int);

    let mut members = Vec::new();
    for (method, ret) in [
        ("add", Idx::INT),
        ("sub", Idx::INT),
        ("eq", Idx::BOOL),
        ("lt", Idx::BOOL),
    ] {
        let id = seed_fun(&mut module, method, &[Idx::INT, Idx::INT], ret);
        members.push((module.names.intern(method), id));
    }
    module.types.set_methods(Idx::INT, members.into_iter().collect::<Record>());
    module
}

struct Analyzed {
    module: Module,
    resolver: Resolver,
    typer: Typer,
}

fn analyze(source: &str) -> Analyzed {
    let mut module = module_for(source);
    let mut resolver = Resolver::new();
    let mut typer = Typer::new();
    for _ in 0..5 {
        let changes = resolver.resolve(&mut module) + typer.type_module(&mut module);
        if changes == 0 {
            break;
        }
    }
    Analyzed {
        module,
        resolver,
        typer,
    }
}

fn fun_type(module: &Module, name: &str) -> String {
    let ty = module
        .top(name)
        .and_then(|id| module.tree.get::<Fun>(id))
        .map_or(Idx::NONE, |fun| fun.ty);
    module.types.display(ty).to_string()
}

fn codes(typer: &Typer) -> Vec<ErrorCode> {
    typer.diagnostics().iter().map(|d| d.code).collect()
}

fn body_of(module: &Module, name: &str) -> rio_ir::NodeRange {
    module
        .top(name)
        .and_then(|id| module.tree.get::<Fun>(id))
        .map(|fun| fun.kids)
        .unwrap_or_default()
}

#[test]
fn method_calls_through_int_table() {
    let analyzed = analyze("fun add(i, j) then i + j\nfun main() log(add(2, 3)) end");
    let module = &analyzed.module;
    assert!(analyzed.resolver.diagnostics().is_empty());
    assert!(analyzed.typer.diagnostics().is_empty());
    assert_eq!(fun_type(module, "add"), "Fun(Int, Int) Int");
    assert_eq!(fun_type(module, "main"), "Fun() Void");

    let call = body_of(module, "add").get(0);
    let member = module
        .tree
        .get::<rio_ir::Call>(call)
        .and_then(|call| module.tree.get::<rio_ir::Get>(call.callee))
        .map(|get| get.member)
        .unwrap_or_default();
    assert_eq!(module.tree.kind(member), NodeKind::Ref);
}

#[test]
fn explicit_return_type() {
    let analyzed = analyze("fun f(a Int, b Int) Int then a");
    assert_eq!(fun_type(&analyzed.module, "f"), "Fun(Int, Int) Int");
}

#[test]
fn first_return_wins() {
    let analyzed = analyze("fun f()\n    return 1\n    return \"s\"\nend");
    assert_eq!(fun_type(&analyzed.module, "f"), "Fun() Int");
}

#[test]
fn bare_return_is_void() {
    let analyzed = analyze("fun f()\n    log(1)\n    return\nend");
    assert_eq!(fun_type(&analyzed.module, "f"), "Fun() Void");
}

#[test]
fn never_sticks_in_blocks() {
    let mut analyzed = analyze("fun f()\n    1\n    return 2\n    3\nend\nfun g()\n    1\n    \"s\"\nend");
    let returning = body_of(&analyzed.module, "f");
    let plain = body_of(&analyzed.module, "g");
    let typer = &mut analyzed.typer;
    assert_eq!(typer.type_block(&mut analyzed.module, returning, Idx::NONE), Idx::NEVER);
    assert_eq!(typer.type_block(&mut analyzed.module, plain, Idx::NONE), Idx::STRING);
    assert_eq!(
        typer.type_block(&mut analyzed.module, rio_ir::NodeRange::EMPTY, Idx::NONE),
        Idx::VOID
    );
}

#[test]
fn returning_switch_is_never() {
    let source = "fun f(n)\n    switch\n    case n == 0 then return 1\n    else return 2\n    end\nend";
    let analyzed = analyze(source);
    assert_eq!(fun_type(&analyzed.module, "f"), "Fun(Int) Int");
}

#[test]
fn recursion_types_through_rounds() {
    let source = "fun f(n) then switch case n == 0 then 0 else f(n - 1) end";
    let analyzed = analyze(source);
    assert!(analyzed.resolver.diagnostics().is_empty());
    assert!(analyzed.typer.diagnostics().is_empty());
    assert_eq!(fun_type(&analyzed.module, "f"), "Fun(Int) Int");
}

#[test]
fn switch_on_subject() {
    let source = "fun f(n) then switch n case 1 then \"one\" else \"many\" end";
    let analyzed = analyze(source);
    assert_eq!(fun_type(&analyzed.module, "f"), "Fun(Int) String");
}

#[test]
fn variable_type_priorities() {
    let source = "fun main()\n    var a Int = \"s\"\n    var b = \"s\"\n    var x\n    var q\nend";
    let analyzed = analyze(source);
    let module = &analyzed.module;
    let types: Vec<String> = body_of(module, "main")
        .ids()
        .filter_map(|id| module.tree.get::<Var>(id))
        .map(|var| module.types.display(var.ty).to_string())
        .collect();
    assert_eq!(types, vec!["Int", "String", "Float", "None"]);
}

#[test]
fn unknown_member_is_reported() {
    let analyzed = analyze("fun main(n) n.nope end");
    assert_eq!(codes(&analyzed.typer), vec![ErrorCode::E2004]);
}

#[test]
fn members_of_unknown_types_wait() {
    let analyzed = analyze("fun main(s) s.nope end");
    assert!(analyzed.typer.diagnostics().is_empty());
}

#[test]
fn converged_module_is_stable() {
    let source = "var g = 1\nfun add(i, j) then i + j\nfun main()\n    var k = add(g, 2)\n    log(k)\nend";
    let mut analyzed = analyze(source);
    let before = analyzed.module.to_string();
    assert_eq!(analyzed.resolver.resolve(&mut analyzed.module), 0);
    assert_eq!(analyzed.typer.type_module(&mut analyzed.module), 0);
    assert_eq!(analyzed.module.to_string(), before);
}
