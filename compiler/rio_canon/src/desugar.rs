//! Operators as method calls.
//!
//! `a + b` lowers to `Call(Get(a, add), [b])` and `-a` to
//! `Call(Get(a, neg), [])`. A minus directly before an integer literal
//! folds into a negative literal instead, so `-2147483648` is valid.

use crate::lower::NormCx;
use rio_ir::{Call, Get, NodeId, NodeRange, ParseRef, Span, TokenKind, TokenNode};

impl NormCx<'_> {
    pub(crate) fn norm_infix(&mut self, part: ParseRef<'_>) {
        let (next, lhs_part) = part.next(0);
        let lhs = self.norm_one(lhs_part);
        let (next, op) = part.next(next);
        let (_, rhs_part) = part.next(next);
        let op_token = op.token();
        let method = op_token.kind.method_name().unwrap_or("?");
        let callee = self.method(lhs, method, op_token.span, part);

        let start = self.work_len();
        self.norm(rhs_part);
        let args = self.commit(start);
        let info = self.info(part);
        self.stage(Call { info, callee, args });
    }

    pub(crate) fn norm_prefix(&mut self, part: ParseRef<'_>) {
        let (next, op) = part.next(0);
        let (_, operand) = part.next(next);
        if operand.is_token(TokenKind::Int) {
            let value = self.int_value(operand.token(), true);
            self.stage_int(part, value);
            return;
        }
        let subject = self.norm_one(operand);
        let callee = self.method(subject, "neg", op.token().span, part);
        let info = self.info(part);
        self.stage(Call {
            info,
            callee,
            args: NodeRange::EMPTY,
        });
    }

    /// `subject.method` stored directly in the shared arena.
    fn method(
        &mut self,
        subject: NodeId,
        method: &str,
        op_span: Span,
        part: ParseRef<'_>,
    ) -> NodeId {
        let name = self.module.names.intern(method);
        let member_info = self.module.tree.next_info(op_span);
        let member = self.add_node(TokenNode {
            info: member_info,
            kind: TokenKind::Id,
            name,
        });
        let info = self.info(part);
        self.add_node(Get {
            info,
            subject,
            member,
        })
    }
}
