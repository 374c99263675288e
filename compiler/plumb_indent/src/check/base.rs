//! Shared handler behavior.
//!
//! Block parents (constructs that own braces and a list of children) share
//! one check: top-level token, parentheses, curlies, then the children.
//! Each kind only answers where those pieces are. The nested-expression
//! checks used by every handler live here too.

use plumb_ast::{NodeId, TokenKind};

use super::Checker;
use crate::handler::{HandlerId, HandlerKind};
use crate::position::first_ast_node;
use crate::{CheckError, IndentLevel, SpanSet};

/// Statement kinds a block checks directly.
const STATEMENT_KINDS: &[TokenKind] = &[
    TokenKind::VariableDef,
    TokenKind::Expr,
    TokenKind::Annotation,
    TokenKind::Objblock,
    TokenKind::LiteralBreak,
    TokenKind::LiteralReturn,
    TokenKind::LiteralThrow,
    TokenKind::LiteralContinue,
    TokenKind::CtorCall,
    TokenKind::SuperCtorCall,
];

/// Member kinds a type body checks directly.
const TYPE_BODY_KINDS: &[TokenKind] = &[
    TokenKind::Expr,
    TokenKind::Objblock,
    TokenKind::LiteralBreak,
    TokenKind::LiteralReturn,
    TokenKind::LiteralThrow,
    TokenKind::LiteralContinue,
];

const ELEMENT_KINDS: &[TokenKind] = &[TokenKind::Expr];

const ANNOTATION_ELEMENT_KINDS: &[TokenKind] = &[TokenKind::Expr, TokenKind::Annotation];

impl Checker<'_> {
    // Structure of block parents

    pub(super) fn left_curly(&self, id: HandlerId) -> Result<Option<NodeId>, CheckError> {
        let main = self.node_of(id);
        Ok(match self.kind_of(id) {
            HandlerKind::TypeDef => {
                let body = self.require_child(id, main, TokenKind::Objblock)?;
                self.child(body, TokenKind::Lcurly)
            }
            HandlerKind::ObjectBlock | HandlerKind::Switch => self.child(main, TokenKind::Lcurly),
            HandlerKind::Block | HandlerKind::ArrayInit | HandlerKind::AnnotationArrayInit => {
                Some(main)
            }
            kind if kind.is_block_parent() => self.child(main, TokenKind::Slist),
            _ => None,
        })
    }

    pub(super) fn right_curly(&self, id: HandlerId) -> Result<Option<NodeId>, CheckError> {
        let main = self.node_of(id);
        Ok(match self.kind_of(id) {
            HandlerKind::TypeDef => {
                let body = self.require_child(id, main, TokenKind::Objblock)?;
                self.child(body, TokenKind::Rcurly)
            }
            HandlerKind::ObjectBlock
            | HandlerKind::Switch
            | HandlerKind::Block
            | HandlerKind::ArrayInit
            | HandlerKind::AnnotationArrayInit => self.child(main, TokenKind::Rcurly),
            kind if kind.is_block_parent() => self
                .child(main, TokenKind::Slist)
                .and_then(|list| self.child(list, TokenKind::Rcurly)),
            _ => None,
        })
    }

    /// Both curlies, when the construct has them.
    pub(super) fn curlies(&self, id: HandlerId) -> Result<Option<(NodeId, NodeId)>, CheckError> {
        Ok(self.left_curly(id)?.zip(self.right_curly(id)?))
    }

    /// The keyword that starts the construct, for kinds that have one.
    fn top_level(&self, id: HandlerId) -> Option<NodeId> {
        match self.kind_of(id) {
            HandlerKind::TypeDef
            | HandlerKind::ObjectBlock
            | HandlerKind::MethodDef
            | HandlerKind::Block
            | HandlerKind::ArrayInit
            | HandlerKind::AnnotationArrayInit => None,
            _ => Some(self.node_of(id)),
        }
    }

    /// Node whose children are the construct's statements or members.
    pub(super) fn list_child(&self, id: HandlerId) -> Result<Option<NodeId>, CheckError> {
        let main = self.node_of(id);
        Ok(match self.kind_of(id) {
            HandlerKind::TypeDef => Some(self.require_child(id, main, TokenKind::Objblock)?),
            HandlerKind::ObjectBlock
            | HandlerKind::Block
            | HandlerKind::ArrayInit
            | HandlerKind::AnnotationArrayInit => Some(main),
            HandlerKind::Switch => None,
            _ => self.child(main, TokenKind::Slist),
        })
    }

    /// Single statement body of a construct written without braces.
    fn non_list_child(&self, id: HandlerId) -> Option<NodeId> {
        let main = self.node_of(id);
        match self.kind_of(id) {
            HandlerKind::Else => self.tree.first_child(main),
            HandlerKind::Switch => None,
            _ => self
                .child(main, TokenKind::Rparen)
                .and_then(|rparen| self.tree.next_sibling(rparen)),
        }
    }

    fn checked_child_kinds(kind: HandlerKind) -> &'static [TokenKind] {
        match kind {
            HandlerKind::TypeDef => TYPE_BODY_KINDS,
            HandlerKind::ArrayInit => ELEMENT_KINDS,
            HandlerKind::AnnotationArrayInit => ANNOTATION_ELEMENT_KINDS,
            _ => STATEMENT_KINDS,
        }
    }

    fn can_children_be_nested(kind: HandlerKind) -> bool {
        matches!(
            kind,
            HandlerKind::ArrayInit | HandlerKind::AnnotationArrayInit
        )
    }

    /// Whether lines after the first of a nested expression sit deeper.
    fn should_increase_indent(kind: HandlerKind) -> bool {
        !matches!(kind, HandlerKind::MethodCall | HandlerKind::New)
    }

    /// Level expected for the curlies.
    pub(super) fn curly_indent(&self, id: HandlerId) -> Result<IndentLevel, CheckError> {
        let indent = self.indent(id);
        let braced = indent.offset(i64::from(self.config.brace_adjustment));
        match self.kind_of(id) {
            HandlerKind::ArrayInit | HandlerKind::AnnotationArrayInit => {
                let wrapped = i64::from(braced.last_level()) + self.line_wrap();
                Ok(braced.with_column(wrapped as u32))
            }
            _ => {
                let unadjusted = match self.left_curly(id)? {
                    Some(lcurly) => {
                        !self.is_on_start_of_line(lcurly)
                            || self.parent_kind(lcurly) == Some(TokenKind::InstanceInit)
                    }
                    None => false,
                };
                Ok(if unadjusted { indent } else { braced })
            }
        }
    }

    /// Level expected for the construct's children.
    pub(super) fn children_expected_indent(
        &self,
        id: HandlerId,
    ) -> Result<IndentLevel, CheckError> {
        if matches!(
            self.kind_of(id),
            HandlerKind::ArrayInit | HandlerKind::AnnotationArrayInit
        ) {
            return Ok(self.array_children_indent(id));
        }
        let indent = self.indent(id);
        let mut level = indent.offset(self.basic_offset());
        if indent.is_multi_level() {
            if let Some((lcurly, rcurly)) = self.curlies(id)? {
                if self.is_on_start_of_line(lcurly) {
                    level = IndentLevel::new(self.column(lcurly)).offset(self.basic_offset());
                } else if self.is_on_start_of_line(rcurly) {
                    let curly = self.curly_indent(id)?.offset(self.basic_offset());
                    let wrapped = i64::from(curly.first_level()) + self.line_wrap();
                    level = curly.with_column(wrapped as u32);
                }
            }
        }
        Ok(level)
    }

    // Block parent check

    pub(super) fn check_block_parent(&mut self, id: HandlerId) -> Result<(), CheckError> {
        self.check_top_level_token(id)?;
        let main = self.node_of(id);
        if let Some(lparen) = self.child(main, TokenKind::Lparen) {
            self.check_left_paren(id, lparen);
            if let Some(rparen) = self.child(main, TokenKind::Rparen) {
                self.check_right_paren(id, lparen, rparen);
            }
        }
        let curlies = self.curlies(id)?;
        if let Some((lcurly, rcurly)) = curlies {
            self.check_left_curly(id, lcurly)?;
            self.check_right_curly(id, rcurly)?;
        }
        match self.list_child(id)? {
            Some(list) => {
                let one_line = curlies.is_some_and(|(l, r)| self.same_line(l, r));
                if !one_line {
                    let kind = self.kind_of(id);
                    let level = self.children_expected_indent(id)?;
                    self.check_children(
                        id,
                        list,
                        Self::checked_child_kinds(kind),
                        &level,
                        true,
                        Self::can_children_be_nested(kind),
                    );
                }
            }
            None => self.check_non_list_child(id),
        }
        Ok(())
    }

    fn check_top_level_token(&mut self, id: HandlerId) -> Result<(), CheckError> {
        let skip = match self.kind_of(id) {
            HandlerKind::If => self.is_if_after_else(self.node_of(id)),
            HandlerKind::Else => self.is_else_after_rcurly(id)?,
            _ => false,
        };
        if skip {
            return Ok(());
        }
        if let Some(top) = self.top_level(id) {
            let column = self.column(top);
            if !self.indent(id).is_acceptable(column) && self.is_on_start_of_line(top) {
                self.log_error(id, top, "", column);
            }
        }
        Ok(())
    }

    pub(super) fn check_left_paren(&mut self, id: HandlerId, lparen: NodeId) {
        let column = self.column(lparen);
        if !self.indent(id).is_acceptable(column) && self.is_on_start_of_line(lparen) {
            self.log_error(id, lparen, "lparen", column);
        }
    }

    /// A closing paren may also sit one column right of its opening paren.
    pub(super) fn check_right_paren(&mut self, id: HandlerId, lparen: NodeId, rparen: NodeId) {
        let column = self.column(rparen);
        if column != self.column(lparen) + 1
            && !self.indent(id).is_acceptable(column)
            && self.is_on_start_of_line(rparen)
        {
            self.log_error(id, rparen, "rparen", column);
        }
    }

    fn check_left_curly(&mut self, id: HandlerId, lcurly: NodeId) -> Result<(), CheckError> {
        let column = self.column(lcurly);
        let expected = self.curly_indent(id)?;
        if !expected.is_acceptable(column) && self.is_on_start_of_line(lcurly) {
            self.log_error_expected(id, lcurly, "lcurly", column, expected);
        }
        Ok(())
    }

    /// Anonymous class bodies may also close at the continuation column.
    fn check_right_curly(&mut self, id: HandlerId, rcurly: NodeId) -> Result<(), CheckError> {
        let column = self.column(rcurly);
        let expected = self.curly_indent(id)?;
        let accepted = if self.kind_of(id) == HandlerKind::ObjectBlock {
            let wrapped = i64::from(expected.first_level()) + self.line_wrap();
            expected.with_column(wrapped as u32)
        } else {
            expected.clone()
        };
        if !accepted.is_acceptable(column) && self.is_on_start_of_line(rcurly) {
            self.log_error_expected(id, rcurly, "rcurly", column, expected);
        }
        Ok(())
    }

    fn check_non_list_child(&mut self, id: HandlerId) {
        if let Some(body) = self.non_list_child(id) {
            let level = self.indent(id).offset(self.basic_offset());
            self.check_expression_subtree(id, body, &level, false, false);
        }
    }

    // Modifiers

    /// Every modifier that starts a line must sit at the handler's level.
    pub(super) fn check_modifiers(&mut self, id: HandlerId) -> Result<(), CheckError> {
        let modifiers = self.require_child(id, self.node_of(id), TokenKind::Modifiers)?;
        let tree = self.tree;
        for modifier in tree.children(modifiers) {
            let column = self.column(modifier);
            if self.is_on_start_of_line(modifier) && !self.indent(id).is_acceptable(column) {
                self.log_error(id, modifier, "modifier", column);
            }
        }
        Ok(())
    }

    // Nested expressions

    /// Check each direct child of `parent` whose kind is in `kinds`.
    pub(super) fn check_children(
        &mut self,
        id: HandlerId,
        parent: NodeId,
        kinds: &[TokenKind],
        level: &IndentLevel,
        first_line_matches: bool,
        allow_nesting: bool,
    ) {
        let tree = self.tree;
        for child in tree.children(parent) {
            if kinds.contains(&tree.kind(child)) {
                self.check_expression_subtree(id, child, level, first_line_matches, allow_nesting);
            }
        }
    }

    /// Check the lines of an expression not governed by other handlers.
    ///
    /// With `first_line_matches` the first line must start exactly at
    /// `level`; otherwise lines are only reported when they start left of
    /// it.
    pub(super) fn check_expression_subtree(
        &mut self,
        id: HandlerId,
        subtree: NodeId,
        level: &IndentLevel,
        first_line_matches: bool,
        allow_nesting: bool,
    ) {
        let mut set = SpanSet::new();
        let first = first_ast_node(self.tree, subtree);
        let first_line = self.line(first);
        if first_line_matches && !allow_nesting {
            set.insert(first_line, first);
        }
        self.collect_unhandled(&mut set, subtree);
        self.check_lines_indent(id, &set, level, first_line_matches, first_line, allow_nesting);
    }

    /// Leftmost node per line, skipping nodes other handlers measure.
    pub(super) fn collect_unhandled(&self, set: &mut SpanSet, subtree: NodeId) {
        let tree = self.tree;
        set.extend_from(tree, &self.index, subtree, |node| {
            HandlerKind::is_handled(tree.kind(node))
        });
    }

    fn check_lines_indent(
        &mut self,
        id: HandlerId,
        set: &SpanSet,
        level: &IndentLevel,
        first_line_matches: bool,
        first_line: u32,
        allow_nesting: bool,
    ) {
        let (Some(start_node), Some(end_line)) = (set.first_line_node(), set.last_line()) else {
            return;
        };
        let start_line = self.line(start_node);
        let real_start = self.line_start_of(start_node);
        let start_column = if first_line_matches && !allow_nesting {
            real_start
        } else {
            self.column(start_node)
        };
        if start_column == real_start {
            self.check_line_indent(id, start_node, level, first_line_matches);
        }

        let nested = first_line > start_line && Self::should_increase_indent(self.kind_of(id));
        let following = if first_line_matches || nested {
            level.offset(self.basic_offset())
        } else {
            level.clone()
        };
        for line in start_line + 1..=end_line {
            if let Some(node) = set.node_at(line) {
                self.check_line_indent(id, node, &following, false);
            }
        }
    }

    /// With `must_match` the line start must be acceptable. Otherwise only a
    /// line that `node` starts, and that starts left of `level`, is reported.
    fn check_line_indent(
        &mut self,
        id: HandlerId,
        node: NodeId,
        level: &IndentLevel,
        must_match: bool,
    ) {
        let start = self.line_start_of(node);
        let column = self.column(node);
        let misplaced = if must_match {
            !level.is_acceptable(start)
        } else {
            column == start && level.is_greater_than(start)
        };
        if misplaced {
            self.log_child_error(id, node, start, level.clone());
        }
    }
}
