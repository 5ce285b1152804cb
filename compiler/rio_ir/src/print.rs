//! Source-like dump of a module's semantic tree.
//!
//! Declarations show their creation index after `@` (variables also show
//! their slot offset as `@(index,offset)`), and references show the index
//! of what they resolved to, so scoping can be checked by reading the dump.

use crate::{
    Block, Call, Case, Fun, Get, Literal, Module, Native, NodeFlags, NodeId, NodeInfo, NodeKind,
    NodeRange, Ref, Return, Switch, TokenNode, ValueNode, Var,
};
use std::fmt::{self, Write};

const INDENT: &str = "    ";

pub(crate) struct TreePrinter<'a, W: Write> {
    module: &'a Module,
    out: W,
}

impl<'a, W: Write> TreePrinter<'a, W> {
    pub(crate) fn new(module: &'a Module, out: W) -> Self {
        TreePrinter { module, out }
    }

    /// One line group per top-level statement.
    pub(crate) fn print_root(&mut self) -> fmt::Result {
        let module = self.module;
        let tree = &module.tree;
        let Some(root) = tree.get::<Block>(self.module.root) else {
            return Ok(());
        };
        for kid in root.kids.ids() {
            self.print_node(kid, 0)?;
            self.out.write_char('\n')?;
        }
        Ok(())
    }

    fn indent(&mut self, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            self.out.write_str(INDENT)?;
        }
        Ok(())
    }

    fn flags(&mut self, info: NodeInfo) -> fmt::Result {
        if info.flags.contains(NodeFlags::PUB) {
            self.out.write_str("pub ")?;
        }
        if info.flags.contains(NodeFlags::PLUG) {
            self.out.write_str("plug ")?;
        }
        Ok(())
    }

    fn print_node(&mut self, id: NodeId, depth: usize) -> fmt::Result {
        let module = self.module;
        let tree = &module.tree;
        match tree.kind(id) {
            NodeKind::None => Ok(()),
            NodeKind::Block => match tree.get::<Block>(id) {
                Some(block) => {
                    let kids = block.kids;
                    self.out.write_str("block")?;
                    self.print_body(kids, depth)
                }
                None => Ok(()),
            },
            NodeKind::Call => match tree.get::<Call>(id).copied() {
                Some(call) => {
                    self.print_node(call.callee, depth)?;
                    self.out.write_char('(')?;
                    self.print_list(call.args, depth)?;
                    self.out.write_char(')')
                }
                None => Ok(()),
            },
            NodeKind::Case => self.print_case(id, depth),
            NodeKind::Fun => self.print_fun(id, depth),
            NodeKind::Get => match tree.get::<Get>(id).copied() {
                Some(get) => {
                    self.print_node(get.subject, depth)?;
                    self.out.write_char('.')?;
                    self.print_node(get.member, depth)
                }
                None => Ok(()),
            },
            NodeKind::Native => match tree.get::<Native>(id) {
                Some(native) => write!(self.out, "native@{}", native.info.index),
                None => Ok(()),
            },
            NodeKind::Ref => match tree.get::<Ref>(id).copied() {
                Some(reference) => self.print_ref(reference),
                None => Ok(()),
            },
            NodeKind::Return => match tree.get::<Return>(id).copied() {
                Some(ret) => {
                    self.out.write_str("return")?;
                    if ret.value.is_some() {
                        self.out.write_char(' ')?;
                        self.print_node(ret.value, depth)?;
                    }
                    Ok(())
                }
                None => Ok(()),
            },
            NodeKind::Switch => self.print_switch(id, depth),
            NodeKind::Token => match tree.get::<TokenNode>(id) {
                Some(token) => self.out.write_str(self.module.name(token.name)),
                None => Ok(()),
            },
            NodeKind::Value => match tree.get::<ValueNode>(id) {
                Some(value) => self.print_literal(&value.value),
                None => Ok(()),
            },
            NodeKind::Var => match tree.get::<Var>(id).copied() {
                Some(var) => {
                    self.flags(var.info)?;
                    self.out.write_str("var ")?;
                    self.print_var(var, depth)
                }
                None => Ok(()),
            },
        }
    }

    fn print_list(&mut self, range: NodeRange, depth: usize) -> fmt::Result {
        for (i, id) in range.ids().enumerate() {
            if i > 0 {
                self.out.write_str(", ")?;
            }
            self.print_node(id, depth)?;
        }
        Ok(())
    }

    /// ` then`, one kid per line one level deeper, then `end`.
    fn print_body(&mut self, kids: NodeRange, depth: usize) -> fmt::Result {
        self.out.write_str(" then")?;
        self.print_lines(kids, depth + 1)?;
        self.out.write_char('\n')?;
        self.indent(depth)?;
        self.out.write_str("end")
    }

    fn print_lines(&mut self, kids: NodeRange, depth: usize) -> fmt::Result {
        for kid in kids.ids() {
            self.out.write_char('\n')?;
            self.indent(depth)?;
            self.print_node(kid, depth)?;
        }
        Ok(())
    }

    fn print_fun(&mut self, id: NodeId, depth: usize) -> fmt::Result {
        let Some(fun) = self.module.tree.get::<Fun>(id).copied() else {
            return Ok(());
        };
        self.flags(fun.info)?;
        self.out.write_str("fun")?;
        if !fun.name.is_empty() {
            self.out.write_char(' ')?;
            self.out.write_str(self.module.name(fun.name))?;
        }
        write!(self.out, "@{}(", fun.info.index)?;
        for (i, param) in fun.params.ids().enumerate() {
            if i > 0 {
                self.out.write_str(", ")?;
            }
            match self.module.tree.get::<Var>(param).copied() {
                Some(var) => self.print_var(var, depth)?,
                None => self.print_node(param, depth)?,
            }
        }
        self.out.write_char(')')?;
        if fun.ret_spec.is_some() {
            self.out.write_char(' ')?;
            self.print_node(fun.ret_spec, depth)?;
        }
        self.print_body(fun.kids, depth)
    }

    /// `name@(index,offset)[ spec][ = value]`
    fn print_var(&mut self, var: Var, depth: usize) -> fmt::Result {
        write!(
            self.out,
            "{}@({},{})",
            self.module.name(var.name),
            var.info.index,
            var.offset
        )?;
        if var.type_spec.is_some() {
            self.out.write_char(' ')?;
            self.print_node(var.type_spec, depth)?;
        }
        if var.value.is_some() {
            self.out.write_str(" = ")?;
            self.print_node(var.value, depth)?;
        }
        Ok(())
    }

    fn print_switch(&mut self, id: NodeId, depth: usize) -> fmt::Result {
        let Some(switch) = self.module.tree.get::<Switch>(id).copied() else {
            return Ok(());
        };
        self.out.write_str("switch")?;
        if switch.subject.is_some() {
            self.out.write_char(' ')?;
            self.print_node(switch.subject, depth)?;
        }
        self.print_body(switch.kids, depth)
    }

    /// `case a, b then` or `else`, body lines one level deeper, no `end`.
    fn print_case(&mut self, id: NodeId, depth: usize) -> fmt::Result {
        let Some(case) = self.module.tree.get::<Case>(id).copied() else {
            return Ok(());
        };
        if case.always {
            self.out.write_str("else")?;
        } else {
            self.out.write_str("case ")?;
            self.print_list(case.patterns, depth)?;
            self.out.write_str(" then")?;
        }
        self.print_lines(case.kids, depth + 1)
    }

    fn print_ref(&mut self, reference: Ref) -> fmt::Result {
        let module = self.module;
        let tree = &module.tree;
        let target = reference.target;
        match tree.kind(target) {
            NodeKind::Fun => match tree.get::<Fun>(target) {
                Some(fun) => write!(self.out, "{}@{}", self.module.name(fun.name), fun.info.index),
                None => Ok(()),
            },
            NodeKind::Var => match tree.get::<Var>(target) {
                Some(var) => write!(
                    self.out,
                    "{}@({},{})",
                    self.module.name(var.name),
                    var.info.index,
                    var.offset
                ),
                None => Ok(()),
            },
            NodeKind::Value => match tree.get::<ValueNode>(target) {
                Some(value) => {
                    self.print_literal(&value.value)?;
                    write!(self.out, "@{}", value.info.index)
                }
                None => Ok(()),
            },
            _ => write!(self.out, "@{}", tree.id_info(target).index),
        }
    }

    fn print_literal(&mut self, literal: &Literal) -> fmt::Result {
        match literal {
            Literal::None => self.out.write_str("none"),
            Literal::Bool(b) => write!(self.out, "{b}"),
            Literal::Int(n) => write!(self.out, "{n}"),
            Literal::Str(text) => write_string_literal(&mut self.out, text),
            Literal::Type(ty) => write!(self.out, "{}", self.module.types.display(*ty)),
        }
    }
}

/// Write `text` as a double-quoted literal. Control characters and
/// anything outside printable ASCII use `\u(hex)`.
pub fn write_string_literal(out: &mut impl Write, text: &str) -> fmt::Result {
    out.write_char('"')?;
    for c in text.chars() {
        match c {
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            ' '..='~' => out.write_char(c)?,
            _ => write!(out, "\\u({:x})", u32::from(c))?,
        }
    }
    out.write_char('"')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NodeData, Span, TokenKind};
    use pretty_assertions::assert_eq;

    fn literal(text: &str) -> String {
        let mut out = String::new();
        let _ = write_string_literal(&mut out, text);
        out
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(literal("hi"), "\"hi\"");
        assert_eq!(literal("a\"b\\c\n"), "\"a\\\"b\\\\c\\n\"");
        assert_eq!(literal("\u{e9}\u{1}"), "\"\\u(e9)\\u(1)\"");
    }

    fn push<T: NodeData>(module: &mut Module, data: T) -> NodeId {
        let node = module.tree.add(data);
        module.tree.push_node(node)
    }

    #[test]
    fn test_print_fun_with_param() {
        let mut module = Module::new();
        let f = module.names.intern("f");
        let x = module.names.intern("x");
        let info = module.tree.next_info(Span::DUMMY);
        let param = module.tree.add(Var {
            info,
            name: x,
            ..Var::default()
        });
        let params = module.tree.append([param]);
        let info = module.tree.next_info(Span::DUMMY);
        let token = module.tree.add(TokenNode {
            info,
            kind: TokenKind::Id,
            name: x,
        });
        let kids = module.tree.append([token]);
        let info = module.tree.next_info(Span::DUMMY);
        let fun = module.tree.add(Fun {
            info,
            name: f,
            params,
            kids,
            ..Fun::default()
        });
        let top = module.tree.append([fun]);
        let info = module.tree.next_info(Span::DUMMY);
        module.root = push(&mut module, Block { info, kids: top });

        assert_eq!(module.to_string(), "fun f@3(x@(1,0)) then\n    x\nend\n");
    }

    #[test]
    fn test_print_empty_module() {
        assert_eq!(Module::new().to_string(), "");
    }
}
