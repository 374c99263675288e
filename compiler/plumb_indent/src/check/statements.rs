//! Blocks, conditionals, loops and exception handling.

use plumb_ast::{NodeId, TokenKind};

use super::Checker;
use crate::handler::HandlerId;
use crate::{CheckError, IndentLevel};

/// Constructs that check the braces of their own statement list.
const BLOCK_OWNERS: &[TokenKind] = &[
    TokenKind::LiteralFor,
    TokenKind::LiteralWhile,
    TokenKind::LiteralDo,
    TokenKind::LiteralIf,
    TokenKind::LiteralElse,
    TokenKind::LiteralTry,
    TokenKind::LiteralCatch,
    TokenKind::LiteralFinally,
    TokenKind::CtorDef,
    TokenKind::CompactCtorDef,
    TokenKind::MethodDef,
    TokenKind::StaticInit,
    TokenKind::LiteralSynchronized,
];

impl Checker<'_> {
    /// Statement lists are checked here only when they stand on their own
    /// (nested blocks, lambda bodies, initializers, case bodies on their own
    /// lines).
    pub(super) fn check_block(&mut self, id: HandlerId) -> Result<(), CheckError> {
        let main = self.node_of(id);
        let owned = self
            .parent_kind(main)
            .is_some_and(|kind| BLOCK_OWNERS.contains(&kind));
        if !owned && !self.is_same_line_case_group(main) {
            self.check_block_parent(id)?;
        }
        Ok(())
    }

    fn is_same_line_case_group(&self, main: NodeId) -> bool {
        self.tree.parent(main).is_some_and(|parent| {
            self.kind(parent) == TokenKind::CaseGroup && self.same_line(parent, main)
        })
    }

    // if / else

    /// `else if` on one line inherits the `else`'s level.
    pub(super) fn if_indent(
        &self,
        id: HandlerId,
        parent: HandlerId,
    ) -> Result<IndentLevel, CheckError> {
        if self.is_if_after_else(self.node_of(id)) {
            Ok(self.indent(parent))
        } else {
            self.suggested_child_indent(parent, id)
        }
    }

    pub(super) fn is_if_after_else(&self, main: NodeId) -> bool {
        self.tree.parent(main).is_some_and(|parent| {
            self.kind(parent) == TokenKind::LiteralElse && self.same_line(parent, main)
        })
    }

    /// `} else` is not measured on its own.
    pub(super) fn is_else_after_rcurly(&self, id: HandlerId) -> Result<bool, CheckError> {
        let main = self.node_of(id);
        let if_ast = self.require_parent(id, main)?;
        Ok(self
            .child(if_ast, TokenKind::Slist)
            .and_then(|list| self.tree.last_child(list))
            .is_some_and(|rcurly| self.same_line(rcurly, main)))
    }

    pub(super) fn check_if(&mut self, id: HandlerId) -> Result<(), CheckError> {
        self.check_block_parent(id)?;
        let level = self.indent(id).offset(self.basic_offset());
        self.check_condition(id, &level)?;
        let main = self.node_of(id);
        let rparen = self.child(main, TokenKind::Rparen);
        self.check_wrapping(id, main, rparen);
        Ok(())
    }

    /// The expression between the construct's parentheses.
    fn check_condition(&mut self, id: HandlerId, level: &IndentLevel) -> Result<(), CheckError> {
        let lparen = self.require_child(id, self.node_of(id), TokenKind::Lparen)?;
        if let Some(condition) = self.tree.next_sibling(lparen) {
            self.check_expression_subtree(id, condition, level, false, false);
        }
        Ok(())
    }

    // loops

    pub(super) fn check_for(&mut self, id: HandlerId) -> Result<(), CheckError> {
        let main = self.node_of(id);
        let level = self.indent(id).offset(self.basic_offset());
        let clauses: Vec<NodeId> = if self.tree.has_child(main, TokenKind::ForInit) {
            [TokenKind::ForInit, TokenKind::ForCondition, TokenKind::ForIterator]
                .into_iter()
                .filter_map(|kind| self.child(main, kind))
                .collect()
        } else {
            vec![self.require_child(id, main, TokenKind::ForEachClause)?]
        };
        for clause in clauses {
            self.check_expression_subtree(id, clause, &level, false, false);
        }
        self.check_block_parent(id)?;
        let rparen = self.child(main, TokenKind::Rparen);
        self.check_wrapping(id, main, rparen);
        Ok(())
    }

    pub(super) fn check_while(&mut self, id: HandlerId) -> Result<(), CheckError> {
        let level = self.indent(id).offset(self.basic_offset());
        self.check_condition(id, &level)?;
        self.check_block_parent(id)
    }

    /// The closing `while` must line up with `do`.
    pub(super) fn check_do_while(&mut self, id: HandlerId) -> Result<(), CheckError> {
        self.check_block_parent(id)?;
        let main = self.node_of(id);
        let while_ast = self.require_child(id, main, TokenKind::DoWhile)?;
        let column = self.column(while_ast);
        if self.is_on_start_of_line(while_ast) && !self.indent(id).is_acceptable(column) {
            self.log_error(id, while_ast, "while", column);
        }
        let level = self.indent(id);
        self.check_condition(id, &level)
    }

    // try / catch

    pub(super) fn check_try(&mut self, id: HandlerId) -> Result<(), CheckError> {
        self.check_block_parent(id)?;
        let main = self.node_of(id);
        let Some(resource_header) = self.child(main, TokenKind::ResourceSpecification) else {
            return Ok(());
        };
        let paren_level = self.indent(id).offsets(&[0, self.line_wrap()]);
        if let Some(lparen) = self.tree.first_child(resource_header) {
            self.check_resource_part(id, lparen, "lparen", &paren_level);
        }
        if let Some(rparen) = self.tree.last_child(resource_header) {
            self.check_resource_part(id, rparen, "rparen", &paren_level);
        }
        let resource_level =
            IndentLevel::new(self.indent(id).first_level()).offset(self.line_wrap());
        if let Some(resources) = self.child(resource_header, TokenKind::Resources) {
            let tree = self.tree;
            for resource in tree.children(resources) {
                if tree.kind(resource) == TokenKind::Resource {
                    self.check_resource_part(id, resource, "resource", &resource_level);
                }
            }
        }
        Ok(())
    }

    fn check_resource_part(
        &mut self,
        id: HandlerId,
        node: NodeId,
        subtype: &'static str,
        expected: &IndentLevel,
    ) {
        if !self.is_on_start_of_line(node) {
            return;
        }
        let column = self.column(node);
        let misplaced = if self.is_force_strict(id) {
            !expected.is_acceptable(column)
        } else {
            column < expected.first_level()
        };
        if misplaced {
            self.log_error_expected(id, node, subtype, column, expected.clone());
        }
    }

    /// True if `node` sits inside the resource list of its `try`.
    pub(super) fn is_in_resource_specification(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            match self.kind(n) {
                TokenKind::LiteralTry => return false,
                TokenKind::ResourceSpecification => return true,
                _ => current = self.tree.parent(n),
            }
        }
        false
    }

    pub(super) fn check_catch(&mut self, id: HandlerId) -> Result<(), CheckError> {
        self.check_block_parent(id)?;
        let level = self.indent(id);
        self.check_condition(id, &level)
    }

    /// Statement form only; `synchronized` as a method modifier is left
    /// to the method.
    pub(super) fn check_synchronized(&mut self, id: HandlerId) -> Result<(), CheckError> {
        let main = self.node_of(id);
        if self.parent_kind(main) == Some(TokenKind::Modifiers) {
            return Ok(());
        }
        self.check_block_parent(id)?;
        let level = self.indent(id).offset(self.basic_offset());
        self.check_condition(id, &level)?;
        let rparen = self.child(main, TokenKind::Rparen);
        self.check_wrapping(id, main, rparen);
        Ok(())
    }

    // labels

    /// A label may sit at its statement's level or one basic offset left.
    pub(super) fn label_indent(
        &self,
        id: HandlerId,
        parent: HandlerId,
    ) -> Result<IndentLevel, CheckError> {
        let statement = self.suggested_child_indent(parent, id)?;
        Ok(statement.union(&statement.offset(-self.basic_offset())))
    }

    /// The labeled statement keeps the level it would have without the label.
    pub(super) fn label_child_indent(&self, label: HandlerId) -> Result<IndentLevel, CheckError> {
        self.suggested_child_indent(self.parent_of(label), label)
    }

    pub(super) fn check_label(&mut self, id: HandlerId) -> Result<(), CheckError> {
        let main = self.node_of(id);
        let level = self.indent(id);
        self.check_children(id, main, &[TokenKind::Ident], &level, true, false);
        let statement = self
            .tree
            .children(main)
            .find(|&child| self.kind(child) != TokenKind::Ident);
        if let Some(statement) = statement {
            let expected = self.label_child_indent(id)?;
            self.check_expression_subtree(id, statement, &expected, false, false);
        }
        Ok(())
    }
}
