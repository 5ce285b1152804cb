//! Structural lowering: one method per parse kind.

use rio_diagnostic::{Diagnostic, ErrorCode};
use rio_ir::{
    Block, Call, Case, Fun, Get, Module, Name, Node, NodeData, NodeFlags, NodeId, NodeInfo,
    NodeKind, NodeRange, ParseKind, ParseRef, Return, Switch, Token, TokenKind, TokenNode, Var,
};
use rio_stack::ensure_sufficient_stack;

pub(crate) struct NormCx<'a> {
    pub(crate) source: &'a str,
    pub(crate) module: &'a mut Module,
    work: &'a mut Vec<Node>,
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl<'a> NormCx<'a> {
    pub(crate) fn new(
        source: &'a str,
        module: &'a mut Module,
        work: &'a mut Vec<Node>,
        diagnostics: &'a mut Vec<Diagnostic>,
    ) -> Self {
        NormCx {
            source,
            module,
            work,
            diagnostics,
        }
    }

    pub(crate) fn norm_root(&mut self, root: ParseRef<'_>) -> NodeId {
        let kids = if root.kind() == ParseKind::Block {
            self.norm_kids(root)
        } else {
            NodeRange::EMPTY
        };
        let info = self.info(root);
        self.add_node(Block { info, kids })
    }

    // ─── Work stack ────────────────────────────────────────────────

    /// Move `work[start..]` into the shared arena.
    pub(crate) fn commit(&mut self, start: usize) -> NodeRange {
        self.module.tree.append(self.work.drain(start..))
    }

    pub(crate) fn work_len(&self) -> usize {
        self.work.len()
    }

    /// Lower one parse node and commit it, or `NodeId::NONE` if it
    /// produced nothing.
    pub(crate) fn norm_one(&mut self, part: ParseRef<'_>) -> NodeId {
        let start = self.work.len();
        self.norm(part);
        if self.work.len() == start {
            return NodeId::NONE;
        }
        self.commit(start).get(0)
    }

    /// Lower every kid of `part` and commit them as one range.
    pub(crate) fn norm_kids(&mut self, part: ParseRef<'_>) -> NodeRange {
        let start = self.work.len();
        for kid in part.kids() {
            self.norm(kid);
        }
        self.commit(start)
    }

    /// Stage a record for the parent being built.
    pub(crate) fn stage<T: NodeData>(&mut self, data: T) {
        let node = self.module.tree.add(data);
        self.work.push(node);
    }

    /// Store a record straight into the shared arena.
    pub(crate) fn add_node<T: NodeData>(&mut self, data: T) -> NodeId {
        let node = self.module.tree.add(data);
        self.module.tree.push_node(node)
    }

    /// Fresh metadata spanning `part`. Called after the children are
    /// lowered, so creation indices are post-order.
    pub(crate) fn info(&mut self, part: ParseRef<'_>) -> NodeInfo {
        let span = part.span();
        self.module.tree.next_info(span)
    }

    pub(crate) fn intern(&mut self, token: Token) -> Name {
        let text = token.text(self.source);
        self.module.names.intern(text)
    }

    pub(crate) fn error(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Report kids left over after a construct's expected parts.
    fn expect_end(&mut self, part: ParseRef<'_>, next: usize) {
        let (_, extra) = part.next(next);
        if !extra.is_none() {
            self.error(
                Diagnostic::error(ErrorCode::E9001)
                    .with_message(format!(
                        "unexpected {:?} in {:?}",
                        extra.kind(),
                        part.kind()
                    ))
                    .with_span(extra.span()),
            );
        }
    }

    // ─── Dispatch ──────────────────────────────────────────────────

    pub(crate) fn norm(&mut self, part: ParseRef<'_>) {
        ensure_sufficient_stack(|| match part.kind() {
            ParseKind::None | ParseKind::Comment | ParseKind::Junk => {}
            ParseKind::Token => self.norm_token(part),
            ParseKind::Block => {
                let kids = self.norm_kids(part);
                let info = self.info(part);
                self.stage(Block { info, kids });
            }
            ParseKind::Call => self.norm_call(part),
            ParseKind::Case => self.norm_case(part),
            ParseKind::Else => self.norm_else(part),
            ParseKind::Fun => self.norm_fun(part),
            ParseKind::Get => self.norm_get(part),
            ParseKind::Infix => self.norm_infix(part),
            ParseKind::Modify => self.norm_modify(part),
            ParseKind::Prefix => self.norm_prefix(part),
            ParseKind::Return => self.norm_return(part),
            ParseKind::String => self.norm_string(part),
            ParseKind::Switch => self.norm_switch(part, true),
            ParseKind::SwitchEmpty => self.norm_switch(part, false),
            ParseKind::Var => self.norm_var(part),
            kind @ (ParseKind::Args | ParseKind::Param | ParseKind::Params) => {
                unreachable!("{kind:?} parse node outside its parent")
            }
        });
    }

    /// Identifiers and integers become nodes; punctuation, keywords and
    /// space vanish.
    fn norm_token(&mut self, part: ParseRef<'_>) {
        let token = part.token();
        match token.kind {
            TokenKind::Id => {
                let name = self.intern(token);
                let info = self.info(part);
                self.stage(TokenNode {
                    info,
                    kind: TokenKind::Id,
                    name,
                });
            }
            TokenKind::Int => {
                let value = self.int_value(token, false);
                self.stage_int(part, value);
            }
            _ => {}
        }
    }

    // ─── Expressions ───────────────────────────────────────────────

    fn norm_call(&mut self, part: ParseRef<'_>) {
        let (next, callee_part) = part.next(0);
        let callee = self.norm_one(callee_part);
        let (next, args_part) = part.next(next);
        let args = match args_part.kind() {
            ParseKind::Args => self.norm_kids(args_part),
            _ => NodeRange::EMPTY,
        };
        self.expect_end(part, next);
        let info = self.info(part);
        self.stage(Call { info, callee, args });
    }

    fn norm_get(&mut self, part: ParseRef<'_>) {
        let (next, subject_part) = part.next(0);
        let subject = self.norm_one(subject_part);
        let next = part.expect_token(next, TokenKind::Dot);
        let (next, member_part) = part.next(next);
        let member = self.norm_one(member_part);
        self.expect_end(part, next);
        let info = self.info(part);
        self.stage(Get {
            info,
            subject,
            member,
        });
    }

    /// Flags from leading `pub`/`plug` land on the wrapped node.
    fn norm_modify(&mut self, part: ParseRef<'_>) {
        let mut flags = NodeFlags::empty();
        let mut next = 0;
        let inner = loop {
            let (after, kid) = part.next(next);
            next = after;
            if kid.is_token(TokenKind::Pub) {
                flags |= NodeFlags::PUB;
            } else if kid.is_token(TokenKind::Plug) {
                flags |= NodeFlags::PLUG;
            } else {
                break kid;
            }
        };
        let start = self.work.len();
        self.norm(inner);
        self.expect_end(part, next);
        if let Some(&node) = self.work[start..].last() {
            if let Some(info) = self.module.tree.info_mut(node) {
                info.flags |= flags;
            }
        }
    }

    fn norm_return(&mut self, part: ParseRef<'_>) {
        let next = part.expect_token(0, TokenKind::Return);
        let (next, value_part) = part.next(next);
        let value = self.norm_one(value_part);
        self.expect_end(part, next);
        let info = self.info(part);
        self.stage(Return { info, value });
    }

    // ─── Control flow ──────────────────────────────────────────────

    fn norm_switch(&mut self, part: ParseRef<'_>, has_subject: bool) {
        let mut next = part.expect_token(0, TokenKind::Switch);
        let mut subject = NodeId::NONE;
        if has_subject {
            let (after, subject_part) = part.next(next);
            subject = self.norm_one(subject_part);
            next = after;
        }
        let (next, body) = part.next(next);
        let kids = self.norm_body(body);
        self.expect_end(part, next);
        for kid in kids.ids() {
            if self.module.tree.kind(kid) != NodeKind::Case {
                let span = self.module.tree.id_info(kid).span;
                self.error(
                    Diagnostic::error(ErrorCode::E1001)
                        .with_message("expected `case` or `else` in switch")
                        .with_span(span),
                );
            }
        }
        let info = self.info(part);
        self.stage(Switch {
            info,
            subject,
            kids,
        });
    }

    fn norm_case(&mut self, part: ParseRef<'_>) {
        let next = part.expect_token(0, TokenKind::Case);
        let (next, patterns_part) = part.next(next);
        let patterns = match patterns_part.kind() {
            ParseKind::Args => self.norm_kids(patterns_part),
            _ => NodeRange::EMPTY,
        };
        let (next, body) = part.next(next);
        let kids = self.norm_body(body);
        self.expect_end(part, next);
        let info = self.info(part);
        self.stage(Case {
            info,
            patterns,
            kids,
            always: false,
        });
    }

    fn norm_else(&mut self, part: ParseRef<'_>) {
        let next = part.expect_token(0, TokenKind::Else);
        let (next, body) = part.next(next);
        let kids = self.norm_body(body);
        self.expect_end(part, next);
        let info = self.info(part);
        self.stage(Case {
            info,
            patterns: NodeRange::EMPTY,
            kids,
            always: true,
        });
    }

    fn norm_body(&mut self, body: ParseRef<'_>) -> NodeRange {
        match body.kind() {
            ParseKind::Block => self.norm_kids(body),
            _ => NodeRange::EMPTY,
        }
    }

    // ─── Declarations ──────────────────────────────────────────────

    /// Params and body are committed as ranges before the `Fun` record.
    fn norm_fun(&mut self, part: ParseRef<'_>) {
        let next = part.expect_token(0, TokenKind::Fun);
        let (mut next, mut kid) = part.next(next);
        let mut name = Name::EMPTY;
        if kid.is_token(TokenKind::Id) {
            name = self.intern(kid.token());
            (next, kid) = part.next(next);
        }
        let mut params = NodeRange::EMPTY;
        if kid.kind() == ParseKind::Params {
            params = self.norm_params(kid);
            (next, kid) = part.next(next);
        }
        let mut ret_spec = NodeId::NONE;
        if !kid.is_none() && kid.kind() != ParseKind::Block {
            ret_spec = self.norm_one(kid);
            (next, kid) = part.next(next);
        }
        let kids = self.norm_body(kid);
        self.expect_end(part, next);
        let info = self.info(part);
        self.stage(Fun {
            info,
            name,
            params,
            ret_spec,
            kids,
            ..Fun::default()
        });
    }

    fn norm_params(&mut self, part: ParseRef<'_>) -> NodeRange {
        let start = self.work.len();
        for kid in part.kids() {
            if kid.kind() == ParseKind::Param {
                self.norm_param(kid);
            }
        }
        self.commit(start)
    }

    /// `name [type]` as a parameter `Var`.
    fn norm_param(&mut self, part: ParseRef<'_>) {
        let (next, name_part) = part.next(0);
        if !name_part.is_token(TokenKind::Id) {
            self.error(
                Diagnostic::error(ErrorCode::E1001)
                    .with_message("expected parameter name")
                    .with_span(part.span()),
            );
            return;
        }
        let name = self.intern(name_part.token());
        let (next, type_part) = part.next(next);
        let type_spec = self.norm_one(type_part);
        self.expect_end(part, next);
        let mut info = self.info(part);
        info.flags |= NodeFlags::PARAM;
        self.stage(Var {
            info,
            name,
            type_spec,
            ..Var::default()
        });
    }

    fn norm_var(&mut self, part: ParseRef<'_>) {
        let next = part.expect_token(0, TokenKind::Var);
        let (mut next, mut kid) = part.next(next);
        let mut name = Name::EMPTY;
        if kid.is_token(TokenKind::Id) {
            name = self.intern(kid.token());
            (next, kid) = part.next(next);
        }
        let mut type_spec = NodeId::NONE;
        if !kid.is_none() && !kid.is_token(TokenKind::Eq) {
            type_spec = self.norm_one(kid);
            (next, kid) = part.next(next);
        }
        let mut value = NodeId::NONE;
        if kid.is_token(TokenKind::Eq) {
            let (after, value_part) = part.next(next);
            value = self.norm_one(value_part);
            next = after;
        }
        self.expect_end(part, next);
        let info = self.info(part);
        self.stage(Var {
            info,
            name,
            type_spec,
            value,
            ..Var::default()
        });
    }
}
