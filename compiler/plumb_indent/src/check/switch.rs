//! `switch` statements and expressions.

use plumb_ast::TokenKind;

use super::Checker;
use crate::handler::HandlerId;
use crate::position::last_descendant;
use crate::CheckError;

const CASE_LABELS: &[TokenKind] = &[TokenKind::LiteralCase, TokenKind::LiteralDefault];

impl Checker<'_> {
    /// The selector may continue at the `switch` level; the body's curlies
    /// are direct children.
    pub(super) fn check_switch(&mut self, id: HandlerId) -> Result<(), CheckError> {
        let level = self.indent(id);
        let lparen = self.require_child(id, self.node_of(id), TokenKind::Lparen)?;
        if let Some(selector) = self.tree.next_sibling(lparen) {
            self.check_expression_subtree(id, selector, &level, false, false);
        }
        self.check_block_parent(id)
    }

    /// `case` and `default` labels, for both `:` groups and `->` rules.
    pub(super) fn check_case(&mut self, id: HandlerId) {
        let main = self.node_of(id);
        let level = self.indent(id);
        self.check_children(id, main, CASE_LABELS, &level, true, false);
    }

    pub(super) fn check_yield(&mut self, id: HandlerId) {
        let main = self.node_of(id);
        let column = self.column(main);
        if self.is_on_start_of_line(main) && !self.indent(id).is_acceptable(column) {
            self.log_error(id, main, "", column);
        }
        let end = self
            .child(main, TokenKind::Semi)
            .unwrap_or_else(|| last_descendant(self.tree, main));
        self.check_wrapping(id, main, Some(end));
    }
}
