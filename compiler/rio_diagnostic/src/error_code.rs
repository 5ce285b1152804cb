use std::fmt;

/// Error codes for all engine diagnostics.
///
/// Format: E#### where the first digit is the stage:
/// - E0xxx: lexical (strings, escapes, literals)
/// - E1xxx: syntax
/// - E2xxx: names and types
/// - E9xxx: internal
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Unterminated string literal
    E0001,
    /// Integer literal out of range
    E0003,
    /// Invalid escape sequence
    E0005,

    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Unclosed delimiter
    E1003,
    /// Missing `end`
    E1004,
    /// Expected member name after `.`
    E1005,

    /// Duplicate module-level declaration
    E2001,
    /// Unknown identifier
    E2002,
    /// Reference to a local of an enclosing function
    E2003,
    /// Unknown member
    E2004,

    /// Unexpected parse shape
    E9001,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E9001 => "E9001",
        }
    }

    pub fn is_syntax(self) -> bool {
        matches!(self.as_str().as_bytes().get(1), Some(b'0' | b'1'))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
