//! Array and annotation initializers.

use plumb_ast::TokenKind;

use super::Checker;
use crate::handler::{HandlerId, HandlerKind};
use crate::{CheckError, IndentLevel};

impl Checker<'_> {
    /// Initializers after `new` or `=` line up with the line they continue;
    /// nested initializers follow their enclosing initializer's elements.
    pub(super) fn array_init_indent(
        &self,
        id: HandlerId,
        parent: HandlerId,
    ) -> Result<IndentLevel, CheckError> {
        let main = self.node_of(id);
        let owner = self.require_parent(id, main)?;
        if matches!(self.kind(owner), TokenKind::LiteralNew | TokenKind::Assign) {
            return Ok(IndentLevel::new(self.line_start_of(owner)));
        }
        if self.kind_of(parent) == HandlerKind::ArrayInit {
            return self.children_expected_indent(parent);
        }
        self.suggested_child_indent(parent, id)
    }

    pub(super) fn annotation_array_init_indent(
        &self,
        id: HandlerId,
    ) -> Result<IndentLevel, CheckError> {
        let owner = self.require_parent(id, self.node_of(id))?;
        Ok(IndentLevel::new(self.line_start_of(owner)))
    }

    /// Elements sit one array step or one continuation step in. When the
    /// first element shares the `{` line, later elements may align with it,
    /// or sit one continuation step right of the `{`.
    pub(super) fn array_children_indent(&self, id: HandlerId) -> IndentLevel {
        let main = self.node_of(id);
        let array_step = i64::from(self.config.array_init_indent);
        let mut level = self.indent(id).offsets(&[array_step, self.line_wrap()]);
        let lcurly = self.column(main);
        if let Some(first_element) = self.index.next_column_after(self.line(main), lcurly) {
            let wrapped = i64::from(lcurly) + self.line_wrap();
            level = level
                .with_column(first_element)
                .with_column(wrapped.max(0) as u32);
        }
        level
    }
}
