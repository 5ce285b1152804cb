use super::*;
use pretty_assertions::assert_eq;

fn leaf(kind: TokenKind, start: u32, end: u32) -> ParseNode {
    ParseNode::leaf(Token::new(kind, Span::new(start, end)))
}

/// `f (x)` as Call[Id, HSpace, Args[(, Id, )]].
fn call_tree() -> ParseTree {
    let mut tree = ParseTree::new();
    let args = tree.append([
        leaf(TokenKind::RoundOpen, 2, 3),
        leaf(TokenKind::Id, 3, 4),
        leaf(TokenKind::RoundClose, 4, 5),
    ]);
    let call = tree.append([
        leaf(TokenKind::Id, 0, 1),
        leaf(TokenKind::HSpace, 1, 2),
        ParseNode::branch(ParseKind::Args, args),
    ]);
    tree.append([ParseNode::branch(ParseKind::Call, call)]);
    tree
}

#[test]
fn test_root_is_last() {
    let tree = call_tree();
    assert_eq!(tree.root().kind(), ParseKind::Call);
    assert_eq!(tree.root().kid_count(), 3);
}

#[test]
fn test_next_skips_trivia() {
    let tree = call_tree();
    let call = tree.root();
    let (next, callee) = call.next(0);
    assert!(callee.is_token(TokenKind::Id));
    let (next, args) = call.next(next);
    assert_eq!(args.kind(), ParseKind::Args);
    let (next, rest) = call.next(next);
    assert!(rest.is_none());
    assert_eq!(next, 3);
}

#[test]
fn test_expect_token_mismatch_exhausts() {
    let tree = call_tree();
    let call = tree.root();
    assert_eq!(call.expect_token(0, TokenKind::Id), 1);
    assert_eq!(call.expect_token(0, TokenKind::Fun), 3);
}

#[test]
fn test_span_covers_leaves() {
    let tree = call_tree();
    assert_eq!(tree.root().span(), Span::new(0, 5));
    assert_eq!(tree.none().span(), Span::DUMMY);
}

#[test]
fn test_display() {
    let tree = call_tree();
    let expected = "\
Call
    Id \"f\"
    HSpace \" \"
    Args
        RoundOpen \"(\"
        Id \"x\"
        RoundClose \")\"
";
    assert_eq!(tree.display("f (x)").to_string(), expected);
}

#[test]
fn test_clear_keeps_sentinel() {
    let mut tree = call_tree();
    tree.clear();
    assert!(tree.is_empty());
    assert!(tree.root().is_none());
    assert_eq!(tree.display("").to_string(), "");
}
