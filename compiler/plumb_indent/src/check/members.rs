//! Methods, constructors and variables.

use plumb_ast::{NodeId, TokenKind};

use super::wrapping::WrapMode;
use super::Checker;
use crate::handler::HandlerId;
use crate::CheckError;

impl Checker<'_> {
    pub(super) fn check_method_def(&mut self, id: HandlerId) -> Result<(), CheckError> {
        let main = self.node_of(id);
        let modifiers = self.require_child(id, main, TokenKind::Modifiers)?;
        let column = self.column(modifiers);
        if self.is_on_start_of_line(modifiers) && !self.indent(id).is_acceptable(column) {
            self.log_error(id, modifiers, "modifier", column);
        }

        if let Some(throws) = self.child(main, TokenKind::LiteralThrows) {
            let start = self.index.line_start(self.declaration_line(id)?);
            let offset = i64::from(self.config.throws_indent);
            let last = self.tree.next_sibling(throws);
            let mode = WrapMode::CheckFirstLine;
            self.check_wrapping_with(id, throws, last, offset, Some(start), mode);
        }
        if let Some(rparen) = self.child(main, TokenKind::Rparen) {
            self.check_wrapping(id, main, Some(rparen));
        }

        if self.left_curly(id)?.is_some() {
            self.check_block_parent(id)?;
        }
        Ok(())
    }

    /// Line of the earliest non-annotation part of a method header: a
    /// keyword modifier, the return type, or the name.
    fn declaration_line(&self, id: HandlerId) -> Result<u32, CheckError> {
        let main = self.node_of(id);
        let mut line = self.line(self.require_child(id, main, TokenKind::Ident)?);
        if let Some(ty) = self.child(main, TokenKind::Type) {
            line = self.first_line(ty);
        }
        let modifiers = self.require_child(id, main, TokenKind::Modifiers)?;
        for modifier in self.tree.children(modifiers) {
            if self.kind(modifier) != TokenKind::Annotation {
                line = line.min(self.line(modifier));
            }
        }
        Ok(line)
    }

    /// Fields and locals are anchored on their first modifier, or on their
    /// type when they have none.
    pub(super) fn check_member_def(&mut self, id: HandlerId) -> Result<(), CheckError> {
        let main = self.node_of(id);
        let modifiers = self.require_child(id, main, TokenKind::Modifiers)?;
        if self.tree.has_children(modifiers) {
            self.check_modifiers(id)?;
        } else {
            let ty = self.require_child(id, main, TokenKind::Type)?;
            let first = self.index.first_token(self.tree, ty);
            let column = self.column(first);
            if self.is_on_start_of_line(first) && !self.indent(id).is_acceptable(column) {
                self.log_error(id, first, "type", column);
            }
        }

        if let Some(semi) = self.declaration_end(main) {
            if !self.is_array_declaration(main) {
                self.check_wrapping(id, main, Some(semi));
            }
        }
        Ok(())
    }

    /// Fields own their `;`; locals are followed by it.
    fn declaration_end(&self, main: NodeId) -> Option<NodeId> {
        self.tree
            .last_child(main)
            .filter(|&last| self.kind(last) == TokenKind::Semi)
            .or_else(|| self.tree.next_sibling(main))
    }

    fn is_array_declaration(&self, main: NodeId) -> bool {
        self.child(main, TokenKind::Type)
            .is_some_and(|ty| self.tree.has_child(ty, TokenKind::ArrayDeclarator))
    }
}
