//! Package and import declarations.

use plumb_ast::TokenKind;

use super::Checker;
use crate::handler::HandlerId;

impl Checker<'_> {
    pub(super) fn check_package_def(&mut self, id: HandlerId) {
        let main = self.node_of(id);
        let column = self.column(main);
        if self.is_on_start_of_line(main) && !self.indent(id).is_acceptable(column) {
            self.log_error(id, main, "", column);
        }
        let semi = self.child(main, TokenKind::Semi);
        self.check_wrapping(id, main, semi);
    }

    /// Imports are only checked for their continuation lines.
    pub(super) fn check_import(&mut self, id: HandlerId) {
        let main = self.node_of(id);
        let last = self.tree.last_child(main);
        self.check_wrapping(id, main, last);
    }
}
