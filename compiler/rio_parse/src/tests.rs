use super::*;
use pretty_assertions::assert_eq;
use rio_diagnostic::ErrorCode;
use rio_ir::{ParseKind, ParseRef, TokenKind};

fn parse_source(source: &str) -> ParseOutput {
    parse(&rio_lexer::lex(source))
}

fn leaves(node: ParseRef<'_>, source: &str, out: &mut String) {
    if node.kind() == ParseKind::Token {
        out.push_str(node.token().text(source));
    }
    for kid in node.kids() {
        leaves(kid, source, out);
    }
}

fn reconstruct(source: &str) -> String {
    let output = parse_source(source);
    let mut out = String::new();
    leaves(output.tree.root(), source, &mut out);
    out
}

/// Significant kids of a node, as kinds.
fn shape(node: ParseRef<'_>) -> Vec<ParseKind> {
    let mut kinds = Vec::new();
    let mut next = 0;
    loop {
        let (after, kid) = node.next(next);
        if kid.is_none() {
            return kinds;
        }
        kinds.push(kid.kind());
        next = after;
    }
}

fn codes(output: &ParseOutput) -> Vec<ErrorCode> {
    output.diagnostics.iter().map(|d| d.code).collect()
}

#[test]
fn test_hello_world_shape() {
    let source = "fun main() log(\"hi\") end";
    let output = parse_source(source);
    assert!(output.diagnostics.is_empty());
    let root = output.tree.root();
    assert_eq!(root.kind(), ParseKind::Block);
    assert_eq!(shape(root), vec![ParseKind::Fun]);

    let fun = root.next(0).1;
    assert_eq!(
        shape(fun),
        vec![
            ParseKind::Token,
            ParseKind::Token,
            ParseKind::Params,
            ParseKind::Block
        ]
    );
    let body = fun.kid(fun.kid_count() - 1);
    assert_eq!(body.kind(), ParseKind::Block);
    assert_eq!(shape(body), vec![ParseKind::Call, ParseKind::Token]);
}

#[test]
fn test_return_type_needs_then() {
    let output = parse_source("fun f(n Int) Int then n");
    let fun = output.tree.root().next(0).1;
    assert_eq!(
        shape(fun),
        vec![
            ParseKind::Token,
            ParseKind::Token,
            ParseKind::Params,
            ParseKind::Token,
            ParseKind::Block
        ]
    );
    let params = fun.kid(3);
    assert_eq!(params.kind(), ParseKind::Params);
    assert_eq!(shape(params), vec![ParseKind::Token, ParseKind::Param, ParseKind::Token]);
}

#[test]
fn test_precedence() {
    let output = parse_source("a + b == c - 1");
    assert!(output.diagnostics.is_empty());
    let root = output.tree.root();
    assert_eq!(shape(root), vec![ParseKind::Infix]);
    let compare = root.next(0).1;
    let lhs = compare.next(0).1;
    assert_eq!(lhs.kind(), ParseKind::Infix);
    assert!(compare.next(compare.next(0).0).1.is_token(TokenKind::EqEq));
}

#[test]
fn test_add_is_left_associative() {
    let output = parse_source("1 - 2 - 3");
    let outer = output.tree.root().next(0).1;
    assert_eq!(outer.kind(), ParseKind::Infix);
    let inner = outer.next(0).1;
    assert_eq!(inner.kind(), ParseKind::Infix);
    assert_eq!(shape(inner), vec![ParseKind::Token, ParseKind::Token, ParseKind::Token]);
}

#[test]
fn test_postfix_chain() {
    let output = parse_source("f(1)(2).x");
    let get = output.tree.root().next(0).1;
    assert_eq!(get.kind(), ParseKind::Get);
    let call = get.next(0).1;
    assert_eq!(call.kind(), ParseKind::Call);
    assert_eq!(call.next(0).1.kind(), ParseKind::Call);
}

#[test]
fn test_switch_forms() {
    let output = parse_source("switch case 1 == 2 then \"a\" else \"b\" end");
    assert!(output.diagnostics.is_empty());
    let switch = output.tree.root().next(0).1;
    assert_eq!(switch.kind(), ParseKind::SwitchEmpty);
    let body = switch.next(1).1;
    assert_eq!(body.kind(), ParseKind::Block);
    assert_eq!(
        shape(body),
        vec![ParseKind::Case, ParseKind::Else, ParseKind::Token]
    );

    let output = parse_source("switch x\ncase 1, 2\n  a\n  b\nelse c\nend");
    assert!(output.diagnostics.is_empty());
    let switch = output.tree.root().next(0).1;
    assert_eq!(switch.kind(), ParseKind::Switch);
    let body = switch.next(switch.next(1).0).1;
    let case = body.next(0).1;
    assert_eq!(case.kind(), ParseKind::Case);
    let patterns = case.next(1).1;
    assert_eq!(patterns.kind(), ParseKind::Args);
    assert_eq!(shape(patterns), vec![ParseKind::Token, ParseKind::Token, ParseKind::Token]);
    let case_body = case.next(2).1;
    assert_eq!(shape(case_body), vec![ParseKind::Token, ParseKind::Token]);
}

#[test]
fn test_return_without_value() {
    let output = parse_source("fun f()\n    return\nend");
    assert!(output.diagnostics.is_empty());
    let fun = output.tree.root().next(0).1;
    let body = fun.next(fun.next(fun.next(1).0).0).1;
    let ret = body.next(0).1;
    assert_eq!(ret.kind(), ParseKind::Return);
    assert_eq!(shape(ret), vec![ParseKind::Token]);
}

#[test]
fn test_var_forms() {
    let output = parse_source("var a Int = 1\nvar b =\n    2\nvar c");
    assert!(output.diagnostics.is_empty());
    let root = output.tree.root();
    assert_eq!(shape(root), vec![ParseKind::Var, ParseKind::Var, ParseKind::Var]);
    let a = root.next(0).1;
    assert_eq!(shape(a).len(), 5);
}

#[test]
fn test_modify() {
    let output = parse_source("pub plug fun f() end");
    let modify = output.tree.root().next(0).1;
    assert_eq!(modify.kind(), ParseKind::Modify);
    assert_eq!(
        shape(modify),
        vec![ParseKind::Token, ParseKind::Token, ParseKind::Fun]
    );
}

#[test]
fn test_comments_are_kept() {
    let source = "# top\nf() # trailing\n";
    let output = parse_source(source);
    let root = output.tree.root();
    assert_eq!(root.kid(0).kind(), ParseKind::Comment);
    assert_eq!(reconstruct(source), source);
}

// ─── Recovery ──────────────────────────────────────────────────────

#[test]
fn test_unclosed_args() {
    let output = parse_source("log(\"hi\"");
    assert_eq!(codes(&output), vec![ErrorCode::E1003]);
}

#[test]
fn test_missing_end() {
    let output = parse_source("fun main()\n    log(1)\n");
    assert_eq!(codes(&output), vec![ErrorCode::E1004]);
}

#[test]
fn test_unterminated_string() {
    let output = parse_source("log(\"hi\n)");
    assert_eq!(codes(&output), vec![ErrorCode::E0001]);
}

#[test]
fn test_junk_is_recorded() {
    let output = parse_source("a ! b");
    assert_eq!(codes(&output), vec![ErrorCode::E1001]);
    let root = output.tree.root();
    assert_eq!(
        shape(root),
        vec![ParseKind::Token, ParseKind::Junk, ParseKind::Token]
    );
}

#[test]
fn test_stray_end() {
    let output = parse_source("end");
    assert_eq!(codes(&output), vec![ErrorCode::E1001]);
}

#[test]
fn test_dangling_operator() {
    let output = parse_source("1 +\n2");
    assert_eq!(codes(&output), vec![ErrorCode::E1002]);
}

#[test]
fn test_empty_source() {
    let output = parse_source("");
    assert_eq!(output.tree.root().kind(), ParseKind::Block);
    assert_eq!(output.tree.root().kid_count(), 0);
}

#[test]
fn test_parser_is_reusable() {
    let mut parser = Parser::new();
    let tokens = rio_lexer::lex("end");
    parser.parse(&tokens);
    assert_eq!(parser.diagnostics().len(), 1);
    let tokens = rio_lexer::lex("f()");
    let tree = parser.parse(&tokens);
    assert_eq!(tree.root().kid_count(), 1);
    assert!(parser.diagnostics().is_empty());
}

#[test]
fn test_dump() {
    let source = "f(x)";
    let output = parse_source(source);
    let expected = "\
Block
    Call
        Id \"f\"
        Args
            RoundOpen \"(\"
            Id \"x\"
            RoundClose \")\"
";
    assert_eq!(output.tree.display(source).to_string(), expected);
}

// ─── Property Tests ────────────────────────────────────────────────

#[test]
fn test_lossless_samples() {
    for source in [
        "fun main() log(\"hi\") end",
        "fun f(n) then switch case n == 0 then 0 else f(n - 1) end",
        "var x = (1\n",
        "end end ) , then",
        "fun (",
        "\"a\\\" # b\n-",
        "pub pub",
        "switch then case",
    ] {
        assert_eq!(reconstruct(source), source, "for {source:?}");
    }
}

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_lossless {
    use super::reconstruct;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn parse_tree_keeps_every_token(
            words in proptest::collection::vec(
                prop_oneof![
                    Just("fun"), Just("end"), Just("then"), Just("switch"), Just("case"),
                    Just("else"), Just("return"), Just("var"), Just("pub"), Just("x"),
                    Just("1"), Just("("), Just(")"), Just(","), Just("+"), Just("-"),
                    Just("=="), Just("="), Just("."), Just("\""), Just("\\"), Just("#"),
                    Just(" "), Just("\n"), Just("!"),
                ],
                0..48,
            )
        ) {
            let source: String = words.concat();
            prop_assert_eq!(reconstruct(&source), source);
        }
    }
}
