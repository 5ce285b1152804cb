//! Tokens produced by the lexer.
//!
//! Tokens carry only a kind and a span; their text is always a slice of
//! the source. Every byte of the source belongs to exactly one token.

use crate::Span;
use std::fmt;

/// Token classification.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum TokenKind {
    /// Not a token. Returned when peeking past the end of input.
    #[default]
    None,
    Add,
    Case,
    Comma,
    CommentOpen,
    CommentText,
    Dot,
    Else,
    End,
    Eq,
    EqEq,
    Escape,
    Fun,
    Ge,
    Gt,
    HSpace,
    Id,
    Int,
    /// A code point no other rule accepts.
    Junk,
    Le,
    Lt,
    NEq,
    Plug,
    Pub,
    Return,
    RoundClose,
    RoundOpen,
    StringClose,
    StringOpen,
    StringText,
    Sub,
    Switch,
    Then,
    Var,
    VSpace,
}

impl TokenKind {
    /// Keyword for an identifier-shaped word, if it is one.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        Some(match text {
            "case" => TokenKind::Case,
            "else" => TokenKind::Else,
            "end" => TokenKind::End,
            "fun" => TokenKind::Fun,
            "plug" => TokenKind::Plug,
            "pub" => TokenKind::Pub,
            "return" => TokenKind::Return,
            "switch" => TokenKind::Switch,
            "then" => TokenKind::Then,
            "var" => TokenKind::Var,
            _ => return None,
        })
    }

    /// Horizontal space and comments. Vertical space is significant.
    #[inline]
    pub const fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::HSpace | TokenKind::CommentOpen | TokenKind::CommentText
        )
    }

    /// Method an infix operator desugars to (`a + b` is `a.add(b)`).
    pub const fn method_name(self) -> Option<&'static str> {
        match self {
            TokenKind::Add => Some("add"),
            TokenKind::Sub => Some("sub"),
            TokenKind::EqEq => Some("eq"),
            TokenKind::NEq => Some("ne"),
            TokenKind::Lt => Some("lt"),
            TokenKind::Le => Some("le"),
            TokenKind::Gt => Some("gt"),
            TokenKind::Ge => Some("ge"),
            _ => None,
        }
    }

    /// Human-readable description for diagnostics.
    pub const fn describe(self) -> &'static str {
        match self {
            TokenKind::None => "end of input",
            TokenKind::Add => "`+`",
            TokenKind::Case => "`case`",
            TokenKind::Comma => "`,`",
            TokenKind::CommentOpen => "`#`",
            TokenKind::CommentText => "comment",
            TokenKind::Dot => "`.`",
            TokenKind::Else => "`else`",
            TokenKind::End => "`end`",
            TokenKind::Eq => "`=`",
            TokenKind::EqEq => "`==`",
            TokenKind::Escape => "escape sequence",
            TokenKind::Fun => "`fun`",
            TokenKind::Ge => "`>=`",
            TokenKind::Gt => "`>`",
            TokenKind::HSpace => "whitespace",
            TokenKind::Id => "identifier",
            TokenKind::Int => "integer",
            TokenKind::Junk => "unrecognized character",
            TokenKind::Le => "`<=`",
            TokenKind::Lt => "`<`",
            TokenKind::NEq => "`!=`",
            TokenKind::Plug => "`plug`",
            TokenKind::Pub => "`pub`",
            TokenKind::Return => "`return`",
            TokenKind::RoundClose => "`)`",
            TokenKind::RoundOpen => "`(`",
            TokenKind::StringClose | TokenKind::StringOpen => "`\"`",
            TokenKind::StringText => "string text",
            TokenKind::Sub => "`-`",
            TokenKind::Switch => "`switch`",
            TokenKind::Then => "`then`",
            TokenKind::Var => "`var`",
            TokenKind::VSpace => "line break",
        }
    }
}

/// A token: kind plus the byte range it covers.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }

    #[inline]
    pub fn text(self, source: &str) -> &str {
        self.span.text(source)
    }

    /// Display as `Kind "text"`, one token per dump line.
    pub fn display(self, source: &str) -> TokenDisplay<'_> {
        TokenDisplay {
            token: self,
            source,
        }
    }
}

/// Formats a token with its source text.
pub struct TokenDisplay<'a> {
    token: Token,
    source: &'a str,
}

impl fmt::Display for TokenDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?}", self.token.kind, self.token.text(self.source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        assert_eq!(TokenKind::keyword("fun"), Some(TokenKind::Fun));
        assert_eq!(TokenKind::keyword("switch"), Some(TokenKind::Switch));
        assert_eq!(TokenKind::keyword("Fun"), None);
        assert_eq!(TokenKind::keyword("main"), None);
    }

    #[test]
    fn test_display() {
        let source = "log(\"hi\")";
        let token = Token::new(TokenKind::Id, Span::new(0, 3));
        assert_eq!(token.display(source).to_string(), "Id \"log\"");
    }

    #[test]
    fn test_method_names() {
        assert_eq!(TokenKind::Add.method_name(), Some("add"));
        assert_eq!(TokenKind::Ge.method_name(), Some("ge"));
        assert_eq!(TokenKind::Dot.method_name(), None);
    }
}
