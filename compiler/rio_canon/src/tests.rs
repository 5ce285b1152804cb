use super::*;
use pretty_assertions::assert_eq;
use rio_diagnostic::ErrorCode;
use rio_ir::{Block, Call, Case, Fun, Get, Literal, NodeFlags, NodeKind, Switch, ValueNode, Var};

fn norm_source(source: &str) -> NormOutput {
    let parsed = rio_parse::parse(&rio_lexer::lex(source));
    normalize(&parsed.tree, source)
}

fn dump(source: &str) -> String {
    norm_source(source).module.to_string()
}

fn codes(output: &NormOutput) -> Vec<ErrorCode> {
    output.diagnostics.iter().map(|d| d.code).collect()
}

fn root_kids(module: &Module) -> Vec<NodeId> {
    module
        .tree
        .get::<Block>(module.root)
        .map(|block| block.kids.ids().collect())
        .unwrap_or_default()
}

#[test]
fn hello_world() {
    assert_eq!(
        dump("fun main() log(\"hi\") end"),
        "fun main@4() then\n    log(\"hi\")\nend\n"
    );
}

#[test]
fn root_is_last_created() {
    let output = norm_source("x + 1 == y");
    let module = &output.module;
    assert_eq!(module.tree.id_info(module.root).index, 10);
    assert_eq!(module.to_string(), "x.add(1).eq(y)\n");
}

#[test]
fn operators_become_method_calls() {
    assert_eq!(dump("a - b\na != b\na <= b"), "a.sub(b)\na.ne(b)\na.le(b)\n");
}

#[test]
fn member_token_spans_operator() {
    let source = "a + b";
    let output = norm_source(source);
    let module = &output.module;
    let get = module.tree.get::<Call>(root_kids(module)[0]).map(|call| call.callee);
    let member = get
        .and_then(|get| module.tree.get::<Get>(get))
        .map(|get| get.member)
        .unwrap_or_default();
    assert_eq!(module.tree.id_info(member).span.text(source), "+");
}

#[test]
fn prefix_minus() {
    assert_eq!(dump("-5\n-x"), "-5\nx.neg()\n");
}

#[test]
fn int_range() {
    let output = norm_source("-2147483648");
    assert!(output.diagnostics.is_empty());
    assert_eq!(output.module.to_string(), "-2147483648\n");

    let output = norm_source("2147483648");
    assert_eq!(codes(&output), vec![ErrorCode::E0003]);
    assert_eq!(output.module.to_string(), "0\n");
}

#[test]
fn string_escapes() {
    let output = norm_source(r#""a\tb\u(e9)\q""#);
    assert_eq!(codes(&output), vec![ErrorCode::E0005]);
    let module = &output.module;
    let value = module
        .tree
        .get::<ValueNode>(root_kids(module)[0])
        .map(|node| node.value.clone());
    assert_eq!(value, Some(Literal::Str("a\tb\u{e9}\\q".into())));
}

#[test]
fn params_and_vars() {
    assert_eq!(
        dump("fun f(a, b Int) then a\nvar v Int = 2"),
        "fun f@5(a@(1,0), b@(3,0) Int) then\n    a\nend\nvar v@(8,0) Int = 2\n"
    );
}

#[test]
fn params_are_flagged() {
    let output = norm_source("fun f(a) a end");
    let module = &output.module;
    let fun = module.tree.get::<Fun>(root_kids(module)[0]).copied();
    let params = fun.map(|fun| fun.params).unwrap_or_default();
    assert_eq!(params.len(), 1);
    let param = module.tree.get::<Var>(params.get(0)).copied().unwrap_or_default();
    assert!(param.info.flags.contains(NodeFlags::PARAM));
    assert_eq!(module.name(param.name), "a");
}

#[test]
fn var_forms() {
    assert_eq!(
        dump("var a\nvar b = 1\nvar c Int"),
        "var a@(1,0)\nvar b@(3,0) = 1\nvar c@(5,0) Int\n"
    );
}

#[test]
fn return_statement() {
    assert_eq!(
        dump("fun f() return 1 end"),
        "fun f@3() then\n    return 1\nend\n"
    );
}

#[test]
fn modifiers_become_flags() {
    let output = norm_source("pub fun f() end");
    assert_eq!(output.module.to_string(), "pub fun f@1() then\nend\n");
    let module = &output.module;
    let info = module.tree.id_info(root_kids(module)[0]);
    assert!(info.flags.contains(NodeFlags::PUB));
    assert!(!info.flags.contains(NodeFlags::PLUG));
}

#[test]
fn switch_with_else() {
    let source = "switch x\ncase 1, 2 then a\nelse b\nend";
    let output = norm_source(source);
    assert!(output.diagnostics.is_empty());
    assert_eq!(
        output.module.to_string(),
        "switch x then\n    case 1, 2 then\n        a\n    else\n        b\nend\n"
    );
    let module = &output.module;
    let switch = module
        .tree
        .get::<Switch>(root_kids(module)[0])
        .copied()
        .unwrap_or_default();
    let arms: Vec<_> = switch
        .kids
        .ids()
        .filter_map(|id| module.tree.get::<Case>(id).copied())
        .collect();
    assert_eq!(arms.len(), 2);
    assert!(!arms[0].always);
    assert_eq!(arms[0].patterns.len(), 2);
    assert!(arms[1].always);
    assert!(arms[1].patterns.is_empty());
}

#[test]
fn comments_vanish() {
    let output = norm_source("# note\nx # trailing\n");
    let module = &output.module;
    let kids = root_kids(module);
    assert_eq!(kids.len(), 1);
    assert_eq!(module.tree.kind(kids[0]), NodeKind::Token);
}

#[test]
fn empty_source() {
    let output = norm_source("");
    assert!(output.module.root.is_some());
    assert!(root_kids(&output.module).is_empty());
    assert_eq!(output.module.to_string(), "");
}

#[test]
fn normalizer_is_reusable() {
    let source = "fun main() log(1) end";
    let parsed = rio_parse::parse(&rio_lexer::lex(source));
    let mut normalizer = Normalizer::new();
    let mut first = Module::new();
    normalizer.norm(&parsed.tree, source, &mut first);
    let mut second = Module::new();
    normalizer.norm(&parsed.tree, source, &mut second);
    assert_eq!(first.to_string(), second.to_string());
}
