use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_display() {
    let diag = unknown_identifier(Span::new(4, 6), "lg");
    assert_eq!(diag.to_string(), "error[E2002]: unknown identifier `lg`");
    assert!(diag.is_error());
}

#[test]
fn test_render_points_at_span() {
    let source = "fun main()\n    lg(\"hi\")\nend\n";
    let diag = unknown_identifier(Span::new(15, 17), "lg");
    let expected = "\
error[E2002]: unknown identifier `lg`
 --> 2:5
  |
2 |     lg(\"hi\")
  |     ^^
";
    assert_eq!(diag.render(source), expected);
}

#[test]
fn test_render_notes() {
    let diag = Diagnostic::warning(ErrorCode::E2001)
        .with_message("duplicate declaration `f`")
        .with_span(Span::new(0, 1))
        .with_note("the first declaration is used");
    let rendered = diag.render("f");
    assert!(rendered.starts_with("warning[E2001]"));
    assert!(rendered.ends_with("  = note: the first declaration is used\n"));
}

#[test]
fn test_code_stage() {
    assert!(ErrorCode::E0001.is_syntax());
    assert!(ErrorCode::E1004.is_syntax());
    assert!(!ErrorCode::E2002.is_syntax());
}
