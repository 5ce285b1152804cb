//! Core diagnostic type and constructors for common errors.

use rio_ir::Span;
use std::fmt;

use crate::span_utils::LineOffsetTable;
use crate::ErrorCode;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A reported problem.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    /// Where it went wrong. `Span::DUMMY` when there is no source position.
    pub span: Span,
    pub notes: Vec<String>,
}

impl Diagnostic {
    fn new(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            span: Span::DUMMY,
            notes: Vec::new(),
        }
    }

    pub fn error(code: ErrorCode) -> Self {
        Self::new(code, Severity::Error)
    }

    pub fn warning(code: ErrorCode) -> Self {
        Self::new(code, Severity::Warning)
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Render with a `line:col` location and the offending source line.
    ///
    /// ```text
    /// error[E2002]: unknown identifier `lg`
    ///  --> 2:5
    ///   |
    /// 2 |     lg("hi")
    ///   |     ^^
    /// ```
    pub fn render(&self, source: &str) -> String {
        let table = LineOffsetTable::build(source);
        self.render_with(source, &table)
    }

    /// Render reusing a prebuilt line table.
    pub fn render_with(&self, source: &str, table: &LineOffsetTable) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        let _ = writeln!(out, "{self}");
        let (line, col) = table.offset_to_line_col(source, self.span.start);
        let gutter = line.to_string().len();
        let _ = writeln!(out, "{:gutter$}--> {line}:{col}", "");
        if let Some(text) = table.line_text(source, line) {
            let _ = writeln!(out, "{:gutter$} |", "");
            let _ = writeln!(out, "{line} | {text}");
            let width = self.span.text(source).chars().take_while(|&c| c != '\n').count().max(1);
            let pad = col.saturating_sub(1) as usize;
            let _ = writeln!(out, "{:gutter$} | {:pad$}{}", "", "", "^".repeat(width));
        }
        for note in &self.notes {
            let _ = writeln!(out, "{:gutter$} = note: {note}", "");
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}

/// Create an "unexpected token" diagnostic.
pub fn unexpected_token(span: Span, found: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1001)
        .with_message(format!("unexpected {found}"))
        .with_span(span)
}

/// Create an "expected expression" diagnostic.
pub fn expected_expression(span: Span, found: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1002)
        .with_message(format!("expected expression, found {found}"))
        .with_span(span)
}

/// Create an "unclosed delimiter" diagnostic pointing at the opener.
pub fn unclosed_delimiter(open_span: Span, delimiter: char) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1003)
        .with_message(format!("unclosed delimiter `{delimiter}`"))
        .with_span(open_span)
}

/// Create an "unknown identifier" diagnostic.
pub fn unknown_identifier(span: Span, name: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2002)
        .with_message(format!("unknown identifier `{name}`"))
        .with_span(span)
}

#[cfg(test)]
mod tests;
