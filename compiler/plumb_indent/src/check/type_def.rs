//! Type definitions and anonymous class bodies.

use plumb_ast::{NodeId, TokenKind};

use super::wrapping::WrapMode;
use super::Checker;
use crate::handler::HandlerId;
use crate::{CheckError, IndentLevel, SpanSet};

impl Checker<'_> {
    /// Class, interface, enum, annotation type and record definitions.
    ///
    /// The declaration is anchored on its first modifier (annotations
    /// included), or on its name when it has none. The header may wrap; an
    /// annotation type's header is measured from the declaration's own
    /// level with no continuation offset. Enum constants are checked one
    /// basic offset in, with their own continuation lines.
    pub(super) fn check_type_def(&mut self, id: HandlerId) -> Result<(), CheckError> {
        let main = self.node_of(id);
        let modifiers = self.require_child(id, main, TokenKind::Modifiers)?;
        let is_annotation_type = self.kind(main) == TokenKind::AnnotationDef;

        if self.tree.has_children(modifiers) {
            self.check_modifiers(id)?;
        } else if !is_annotation_type {
            let ident = self.require_child(id, main, TokenKind::Ident)?;
            let start = self.line_start_of(ident);
            if !self.indent(id).is_acceptable(start) {
                self.log_error(id, ident, "ident", start);
            }
        }

        let body = self.list_child(id)?;
        if is_annotation_type {
            let at = self.require_child(id, main, TokenKind::At)?;
            if self.is_on_start_of_line(at) {
                let start = self.indent(id).first_level();
                self.check_wrapping_with(id, main, body, 0, Some(start), WrapMode::CheckFirstLine);
            }
        } else {
            self.check_wrapping(id, main, body);
        }

        if self.kind(main) == TokenKind::EnumDef {
            if let Some(body) = body {
                let tree = self.tree;
                for constant in tree.children(body) {
                    if tree.kind(constant) == TokenKind::EnumConstantDef {
                        self.check_enum_constant(id, constant);
                    }
                }
            }
        }

        self.check_block_parent(id)
    }

    fn check_enum_constant(&mut self, id: HandlerId, constant: NodeId) {
        let mut set = SpanSet::new();
        self.collect_unhandled(&mut set, constant);
        let Some(first_line) = set.first_line_node() else {
            return;
        };
        let expected = self.indent(id).offset(self.basic_offset());

        let column = self.column(first_line);
        if self.is_on_start_of_line(first_line) && !expected.is_acceptable(column) {
            let annotated = self
                .tree
                .first_child(first_line)
                .and_then(|annotations| self.tree.first_child(annotations))
                .is_some();
            let subtype = if annotated { "annotation" } else { "" };
            self.log_error_expected(id, first_line, subtype, column, expected.clone());
        }

        if set.last_line_node() != Some(first_line) {
            let last = self.tree.last_child(first_line);
            let offset = self.line_wrap();
            self.check_wrapping_with(
                id,
                first_line,
                last,
                offset,
                Some(expected.first_level()),
                WrapMode::IgnoreFirstLine,
            );
        }
    }

    /// An anonymous class body sits at its `new` expression; a constant
    /// body inside an enum at the enum's member level; anything else at
    /// its parent's level.
    pub(super) fn object_block_indent(
        &self,
        id: HandlerId,
        parent: HandlerId,
    ) -> Result<IndentLevel, CheckError> {
        let main = self.node_of(id);
        match self.parent_kind(main) {
            Some(TokenKind::LiteralNew) => {
                let suggested = self.suggested_child_indent(parent, id)?;
                Ok(self.indent(parent).union(&suggested))
            }
            Some(TokenKind::EnumConstantDef) => self.suggested_child_indent(parent, id),
            _ => Ok(self.indent(parent)),
        }
    }

    /// Only anonymous class bodies are checked here; type bodies are
    /// checked by their definition.
    pub(super) fn check_object_block(&mut self, id: HandlerId) -> Result<(), CheckError> {
        let main = self.node_of(id);
        if self.parent_kind(main) == Some(TokenKind::LiteralNew) {
            self.check_block_parent(id)?;
        }
        Ok(())
    }
}
