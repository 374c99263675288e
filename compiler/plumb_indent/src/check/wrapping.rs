//! Continuation lines.
//!
//! When a construct spans several lines, the first node of every line after
//! the first must sit at least `offset` columns right of where the
//! construct's first line starts. Closing parens only need to return to that
//! start, and a few tokens (curlies, `new`, array initializers, `case`,
//! `default`) are left to their own handlers.

use std::collections::BTreeMap;
use std::ops::Bound;

use plumb_ast::{NodeId, TokenKind};

use super::Checker;
use crate::handler::HandlerId;
use crate::{IndentLevel, Violation, ViolationKind};

/// Whether the first line of the wrapped range is checked too.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(super) enum WrapMode {
    IgnoreFirstLine,
    CheckFirstLine,
}

const IGNORED_KINDS: &[TokenKind] = &[
    TokenKind::Lcurly,
    TokenKind::Rcurly,
    TokenKind::LiteralNew,
    TokenKind::ArrayInit,
    TokenKind::LiteralDefault,
    TokenKind::LiteralCase,
];

type FirstNodes = BTreeMap<u32, NodeId>;

impl Checker<'_> {
    /// Check lines from `first` up to (not including) `last` with the
    /// configured continuation offset, skipping the first line.
    pub(super) fn check_wrapping(&mut self, id: HandlerId, first: NodeId, last: Option<NodeId>) {
        let offset = self.line_wrap();
        self.check_wrapping_with(id, first, last, offset, None, WrapMode::IgnoreFirstLine);
    }

    /// `start` overrides the column continuation lines are measured from;
    /// by default it is where the first line starts.
    pub(super) fn check_wrapping_with(
        &mut self,
        id: HandlerId,
        first: NodeId,
        last: Option<NodeId>,
        offset: i64,
        start: Option<u32>,
        mode: WrapMode,
    ) {
        let mut lines = self.first_nodes_on_lines(first, last);
        let Some(&first_line_node) = lines.values().next() else {
            return;
        };
        if self.kind(first_line_node) == TokenKind::At {
            self.check_annotation_lines(id, &mut lines, offset);
        }
        if mode == WrapMode::IgnoreFirstLine {
            lines.pop_first();
        }

        let first_indent = start.unwrap_or_else(|| self.line_start_of(first_line_node));
        let current = shifted(first_indent, offset);
        for &node in lines.values() {
            if self.is_empty_parameter_list(node) || self.is_method_lparen(node) {
                continue;
            }
            let kind = self.kind(node);
            if kind == TokenKind::Rparen {
                self.log_wrap(id, node, first_indent);
            } else if !IGNORED_KINDS.contains(&kind) {
                self.log_wrap(id, node, current);
            }
        }
    }

    /// Leftmost node of each line between `first` and `last`, in preorder.
    ///
    /// Bodies (`OBJBLOCK`, `SLIST`) are skipped to their closing token;
    /// their contents belong to other handlers. On equal columns the later
    /// node wins.
    fn first_nodes_on_lines(&self, first: NodeId, last: Option<NodeId>) -> FirstNodes {
        let mut result = FirstNodes::new();
        result.insert(self.line(first), first);
        let mut current = self.tree.first_child(first);
        while let Some(mut node) = current {
            if Some(node) == last {
                break;
            }
            if matches!(self.kind(node), TokenKind::Objblock | TokenKind::Slist) {
                node = self.tree.last_child(node).unwrap_or(node);
            }
            let line = self.line(node);
            let replace = result
                .get(&line)
                .map_or(true, |&existing| self.column(existing) >= self.column(node));
            if replace {
                result.insert(line, node);
            }
            current = self.next_in_range(node, first);
        }
        result
    }

    /// Next node in preorder that is still inside `bound`.
    fn next_in_range(&self, node: NodeId, bound: NodeId) -> Option<NodeId> {
        if let Some(child) = self.tree.first_child(node) {
            return Some(child);
        }
        let mut current = node;
        loop {
            if current == bound {
                return None;
            }
            if let Some(sibling) = self.tree.next_sibling(current) {
                return Some(sibling);
            }
            current = self.tree.parent(current)?;
        }
    }

    /// Annotation lines are measured from their `@`: the `@` lines and the
    /// line closing the annotation at its column, anything else inside the
    /// annotation one continuation step right of it. Every annotation line
    /// except the last of each range is consumed from `lines`.
    fn check_annotation_lines(&mut self, id: HandlerId, lines: &mut FirstNodes, offset: i64) {
        let Some(&first_line_node) = lines.values().next() else {
            return;
        };
        let mut current = self.tree.parent(first_line_node);
        while let Some(node) = current {
            if self.kind(node) == TokenKind::Annotation {
                if let Some(at) = self.tree.first_child(node) {
                    let range = self.annotation_range(lines, node);
                    self.check_annotation(id, at, lines, &range, offset);
                }
            }
            current = self.tree.next_sibling(node);
        }
    }

    /// Recorded lines from the annotation's own line through the first
    /// recorded line after it ends.
    fn annotation_range(&self, lines: &FirstNodes, annotation: NodeId) -> Vec<u32> {
        let end = self
            .tree
            .last_child(annotation)
            .map_or(self.line(annotation), |last| self.line(last));
        let Some(upper) = lines
            .range((Bound::Excluded(end), Bound::Unbounded))
            .next()
            .or_else(|| lines.iter().next_back())
            .map(|(&line, _)| line)
        else {
            return Vec::new();
        };
        let from = self.line(annotation);
        if from > upper {
            return Vec::new();
        }
        lines.range(from..=upper).map(|(&line, _)| line).collect()
    }

    fn check_annotation(
        &mut self,
        id: HandlerId,
        at: NodeId,
        lines: &mut FirstNodes,
        range: &[u32],
        offset: i64,
    ) {
        let first_indent = self.line_start_of(at);
        let current = shifted(first_indent, offset);
        let annotation = self.tree.parent(at).unwrap_or(at);
        let last_node = self.tree.last_child(annotation).unwrap_or(annotation);
        let last_line = self.line(last_node);

        let mut remaining = range.len();
        for line in range {
            if remaining <= 1 {
                break;
            }
            if let Some(node) = lines.remove(line) {
                let in_array_init = self
                    .tree
                    .ancestor_of_kind(node, TokenKind::AnnotationArrayInit)
                    .is_some();
                if !in_array_init {
                    let closes_alone =
                        self.line(node) == last_line && self.is_end_of_scope(last_node, node);
                    if closes_alone || self.is_leading_at(node) || self.same_line(node, at) {
                        self.log_wrap(id, node, first_indent);
                    } else {
                        self.log_wrap(id, node, current);
                    }
                }
            }
            remaining -= 1;
        }
    }

    /// `@` of an annotation attached to modifiers.
    fn is_leading_at(&self, node: NodeId) -> bool {
        self.kind(node) == TokenKind::At
            && self
                .tree
                .parent(node)
                .and_then(|annotation| self.parent_kind(annotation))
                .is_some_and(|kind| matches!(kind, TokenKind::Modifiers | TokenKind::Annotations))
    }

    /// True if only closing curlies or brackets separate `node` from the
    /// end of the annotation.
    fn is_end_of_scope(&self, last_annotation_node: NodeId, node: NodeId) -> bool {
        let mut check = node;
        while check != last_annotation_node {
            if !matches!(self.kind(check), TokenKind::Rcurly | TokenKind::Rbrack) {
                return false;
            }
            let mut climb = check;
            let next = loop {
                if let Some(sibling) = self.tree.next_sibling(climb) {
                    break sibling;
                }
                match self.tree.parent(climb) {
                    Some(parent) => climb = parent,
                    None => return false,
                }
            };
            check = next;
        }
        true
    }

    fn is_empty_parameter_list(&self, node: NodeId) -> bool {
        self.kind(node) == TokenKind::Parameters && !self.tree.has_children(node)
    }

    fn is_method_lparen(&self, node: NodeId) -> bool {
        self.kind(node) == TokenKind::Lparen && self.parent_kind(node) == Some(TokenKind::MethodDef)
    }

    fn log_wrap(&mut self, id: HandlerId, node: NodeId, expected: u32) {
        let column = self.column(node);
        let misplaced = if self.is_force_strict(id) {
            column != expected
        } else {
            column < expected
        };
        if misplaced {
            let violation = Violation {
                position: self.tree.position(node),
                actual: column,
                expected: IndentLevel::new(expected),
                kind: ViolationKind::Error,
                subject: self.tree.text(node).to_owned(),
                construct: self.handler(id).name,
                subtype: None,
            };
            self.report(node, violation);
        }
    }
}

fn shifted(column: u32, offset: i64) -> u32 {
    (i64::from(column) + offset).max(0) as u32
}
