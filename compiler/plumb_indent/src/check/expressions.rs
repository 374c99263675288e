//! Calls, `new` and lambdas.
//!
//! Expressions rarely start a line, so their levels are derived from the
//! line they are written on rather than from their enclosing construct.

use plumb_ast::{NodeId, TokenKind};

use super::Checker;
use crate::handler::{HandlerId, HandlerKind};
use crate::position::first_ast_node;
use crate::{CheckError, IndentLevel, SpanSet};

impl Checker<'_> {
    // method calls

    /// A call chained onto another call keeps the outer call's level (or
    /// one continuation step in when it wraps to its own line). A call
    /// that does not begin its line is measured from where the line starts.
    pub(super) fn method_call_indent(
        &self,
        id: HandlerId,
        parent: HandlerId,
    ) -> Result<IndentLevel, CheckError> {
        let main = self.node_of(id);
        if self.kind_of(parent) == HandlerKind::MethodCall {
            let container = self.node_of(parent);
            let inline = self.same_line(container, main)
                || self.is_chained_call_wrapped(main)
                || self.are_calls_chained(container, main);
            let indent = self.indent(parent);
            return Ok(if inline {
                indent
            } else {
                indent.offset(self.line_wrap())
            });
        }

        let operand = self.require_first_child(id, main)?;
        if self.kind(operand) == TokenKind::LiteralNew {
            return self.suggested_child_indent(parent, id);
        }
        let mut set = SpanSet::new();
        self.collect_unhandled(&mut set, operand);
        let line_start = self.line_start_of(first_ast_node(self.tree, main));
        match set.first_line_node() {
            Some(first) if self.column(first) != line_start => Ok(IndentLevel::new(line_start)),
            _ => self.suggested_child_indent(parent, id),
        }
    }

    /// `a.b().c()` where the inner call is itself the target of a dot.
    fn is_chained_call_wrapped(&self, main: NodeId) -> bool {
        let tree = self.tree;
        tree.first_child(main)
            .and_then(|dot| tree.first_child(dot))
            .and_then(|target| tree.first_child(target))
            .filter(|&inner_dot| self.kind(inner_dot) == TokenKind::Dot)
            .and_then(|inner_dot| tree.first_child(inner_dot))
            .is_some_and(|inner| self.kind(inner) == TokenKind::MethodCall)
    }

    /// The outer call closes on the line the inner one opens.
    fn are_calls_chained(&self, outer: NodeId, inner: NodeId) -> bool {
        self.child(outer, TokenKind::Rparen)
            .is_some_and(|rparen| self.same_line(rparen, inner))
    }

    /// Arguments are measured from the line the call starts on; arguments
    /// that begin on a later line may sit one basic or one continuation
    /// step in.
    pub(super) fn method_call_child_indent(
        &self,
        call: HandlerId,
        child: HandlerId,
    ) -> IndentLevel {
        let main = self.node_of(call);
        let operand = self.tree.first_child(main).unwrap_or(main);
        let level = IndentLevel::new(self.line_start_of(operand));
        let child_main = self.node_of(child);
        let child_first = self.tree.first_child(child_main).unwrap_or(child_main);
        if self.same_line(child_first, operand) {
            level
        } else {
            level.offsets(&[self.basic_offset(), self.line_wrap()])
        }
    }

    /// Calls used as statements measure their operand; every call with
    /// arguments spread over several lines measures the arguments and the
    /// closing paren.
    pub(super) fn check_method_call(&mut self, id: HandlerId) -> Result<(), CheckError> {
        let main = self.node_of(id);
        let lparen = if self.kind(main) == TokenKind::MethodCall {
            let expr = self.require_parent(id, main)?;
            if self.parent_kind(expr) == Some(TokenKind::Slist) {
                let operand = self.require_first_child(id, main)?;
                let level = self.indent(id);
                self.check_expression_subtree(id, operand, &level, false, false);
                Some(main)
            } else {
                None
            }
        } else {
            Some(self.require_first_child(id, main)?)
        };

        let Some(lparen) = lparen else {
            return Ok(());
        };
        self.check_left_paren(id, lparen);
        let Some(rparen) = self.child(main, TokenKind::Rparen) else {
            return Ok(());
        };
        if !self.same_line(rparen, lparen) {
            if let Some(arguments) = self.child(main, TokenKind::Elist) {
                let level = self.indent(id).offset(self.basic_offset());
                self.check_expression_subtree(id, arguments, &level, false, true);
            }
            self.check_right_paren(id, lparen, rparen);
            let last = self.tree.last_child(main);
            self.check_wrapping(id, main, last);
        }
        Ok(())
    }

    // new

    /// A `new` that starts its line inherits its parent's suggestion, one
    /// continuation step further when it continues an assignment or
    /// `return`. Otherwise it is measured from where its line starts.
    pub(super) fn new_indent(
        &self,
        id: HandlerId,
        parent: HandlerId,
    ) -> Result<IndentLevel, CheckError> {
        let main = self.node_of(id);
        if !self.is_on_start_of_line(main) {
            return Ok(IndentLevel::new(self.line_start_of(main)));
        }
        let level = self.suggested_child_indent(parent, id)?;
        let continues_statement = self
            .tree
            .parent(main)
            .and_then(|expr| self.parent_kind(expr))
            .is_some_and(|kind| matches!(kind, TokenKind::Assign | TokenKind::LiteralReturn));
        Ok(if continues_statement {
            level.offset(self.line_wrap())
        } else {
            level
        })
    }

    pub(super) fn new_child_indent(&self, new: HandlerId, child: HandlerId) -> IndentLevel {
        let offset = if self.kind(self.node_of(child)) == TokenKind::Objblock {
            self.basic_offset()
        } else {
            self.line_wrap()
        };
        self.indent(new).offset(offset)
    }

    pub(super) fn check_new(&mut self, id: HandlerId) -> Result<(), CheckError> {
        let main = self.node_of(id);
        let level = self.indent(id);
        if self.is_on_start_of_line(main) {
            let column = self.column(main);
            if self.misplaced_continuation(id, &level, column) {
                self.log_error(id, main, "", column);
            }
        }
        if let Some(type_name) = self.tree.first_child(main) {
            self.check_expression_subtree(id, type_name, &level, false, false);
        }
        if let Some(lparen) = self.child(main, TokenKind::Lparen) {
            self.check_left_paren(id, lparen);
        }
        Ok(())
    }

    // lambdas

    /// Lambdas passed to calls take the call's suggestion. Otherwise they
    /// are measured from the line of the enclosing expression, one
    /// continuation step in when their parameters start a line.
    pub(super) fn lambda_indent(
        &self,
        id: HandlerId,
        parent: HandlerId,
    ) -> Result<IndentLevel, CheckError> {
        if self.kind_of(parent) == HandlerKind::MethodCall {
            return self.suggested_child_indent(parent, id);
        }
        let main = self.node_of(id);
        let mut anchor = self.require_parent(id, main)?;
        if self.kind_of(parent) == HandlerKind::New {
            anchor = self.tree.parent(anchor).unwrap_or(anchor);
        }
        let level = IndentLevel::new(self.line_start_of(anchor));
        Ok(match self.tree.first_child(main) {
            Some(parameters) if self.is_on_start_of_line(parameters) => {
                level.offset(self.line_wrap())
            }
            _ => level,
        })
    }

    /// A body under a correctly placed lambda may also follow the lambda's
    /// own line.
    pub(super) fn lambda_child_indent(&self, lambda: HandlerId) -> IndentLevel {
        let indent = self.indent(lambda);
        if self.handler(lambda).lambda_aligned {
            indent.with_column(self.line_start_of(self.node_of(lambda)))
        } else {
            indent
        }
    }

    pub(super) fn check_lambda(&mut self, id: HandlerId) -> Result<(), CheckError> {
        let main = self.node_of(id);
        // `case X -> ...` arrows have no parameters
        let parameters = self.tree.first_child(main);
        if let Some(parameters) = parameters {
            if self.is_on_start_of_line(parameters) {
                let level = self.indent(id);
                let column = self.column(parameters);
                if self.misplaced_continuation(id, &level, column) {
                    self.handlers[id.index()].lambda_aligned = false;
                    self.log_error_expected(id, parameters, "arguments", column, level);
                }
            }
        }

        let column = self.column(main);
        if column != self.line_start_of(main) {
            return Ok(());
        }
        let level = if parameters.is_none() {
            let case_label = self.tree.prev_sibling(main).unwrap_or(main);
            IndentLevel::new(self.line_start_of(case_label)).offset(self.line_wrap())
        } else {
            self.indent(id).offset(self.line_wrap())
        };
        if self.misplaced_continuation(id, &level, column) {
            self.handlers[id.index()].lambda_aligned = false;
            self.log_error_expected(id, main, "", column, level);
        }
        Ok(())
    }

    /// Strict handlers want one of the level's columns; lenient ones only
    /// reject columns left of it.
    fn misplaced_continuation(&self, id: HandlerId, level: &IndentLevel, column: u32) -> bool {
        if self.is_force_strict(id) {
            !level.is_acceptable(column)
        } else {
            level.is_greater_than(column)
        }
    }
}
