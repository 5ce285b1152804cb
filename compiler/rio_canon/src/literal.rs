//! Integer and string literal decoding.

use crate::lower::NormCx;
use rio_diagnostic::{Diagnostic, ErrorCode};
use rio_ir::{Literal, ParseRef, Token, TokenKind, ValueNode};
use std::rc::Rc;

impl NormCx<'_> {
    /// Value of an `Int` token, negated when `negative`. Out-of-range
    /// literals are reported and read as zero.
    pub(crate) fn int_value(&mut self, token: Token, negative: bool) -> i32 {
        let text = token.text(self.source);
        let value = text
            .parse::<i64>()
            .ok()
            .map(|n| if negative { -n } else { n })
            .and_then(|n| i32::try_from(n).ok());
        match value {
            Some(value) => value,
            None => {
                let sign = if negative { "-" } else { "" };
                self.error(
                    Diagnostic::error(ErrorCode::E0003)
                        .with_message(format!("integer literal `{sign}{text}` out of range"))
                        .with_span(token.span),
                );
                0
            }
        }
    }

    pub(crate) fn stage_int(&mut self, part: ParseRef<'_>, value: i32) {
        let info = self.info(part);
        self.stage(ValueNode {
            info,
            value: Literal::Int(value),
        });
    }

    /// Concatenate text and decoded escapes into one string value.
    pub(crate) fn norm_string(&mut self, part: ParseRef<'_>) {
        let mut text = String::new();
        for kid in part.kids() {
            if kid.kind() != rio_ir::ParseKind::Token {
                continue;
            }
            let token = kid.token();
            match token.kind {
                TokenKind::StringText => text.push_str(token.text(self.source)),
                TokenKind::Escape => self.escape(token, &mut text),
                _ => {}
            }
        }
        let info = self.info(part);
        self.stage(ValueNode {
            info,
            value: Literal::Str(Rc::from(text)),
        });
    }

    /// Decode one escape token. Unknown escapes are reported and kept
    /// verbatim.
    fn escape(&mut self, token: Token, out: &mut String) {
        let raw = token.text(self.source);
        let body = raw.strip_prefix('\\').unwrap_or(raw);
        let decoded = match body {
            "n" => Some('\n'),
            "r" => Some('\r'),
            "t" => Some('\t'),
            "\"" => Some('"'),
            "\\" => Some('\\'),
            _ => body
                .strip_prefix("u(")
                .and_then(|rest| rest.strip_suffix(')'))
                .filter(|hex| !hex.is_empty())
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .and_then(char::from_u32),
        };
        match decoded {
            Some(c) => out.push(c),
            None => {
                self.error(
                    Diagnostic::error(ErrorCode::E0005)
                        .with_message(format!("invalid escape `{raw}`"))
                        .with_span(token.span),
                );
                out.push_str(raw);
            }
        }
    }
}
