//! Leftmost node per line.

use std::collections::BTreeMap;

use plumb_ast::{NodeId, SyntaxTree};

use crate::LineIndex;

/// Ordered map from line to the leftmost node recorded on that line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpanSet {
    lines: BTreeMap<u32, NodeId>,
}

impl SpanSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leftmost node per line of the subtree at `root`.
    ///
    /// Nodes for which `stop` returns true are neither recorded nor
    /// descended into; they are measured by their own handlers. On equal
    /// columns the node met first in preorder wins.
    pub fn collect(
        tree: &SyntaxTree,
        index: &LineIndex,
        root: NodeId,
        stop: impl Fn(NodeId) -> bool,
    ) -> Self {
        let mut set = SpanSet::new();
        set.extend_from(tree, index, root, stop);
        set
    }

    /// Like [`SpanSet::collect`], but into an existing set.
    pub fn extend_from(
        &mut self,
        tree: &SyntaxTree,
        index: &LineIndex,
        root: NodeId,
        stop: impl Fn(NodeId) -> bool,
    ) {
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if stop(node) {
                continue;
            }
            self.insert_if_leftmost(tree, index, node);
            let mut children: Vec<NodeId> = tree.children(node).collect();
            children.reverse();
            stack.extend(children);
        }
    }

    /// Record `node` unless its line already holds a node at or left of it.
    pub fn insert_if_leftmost(&mut self, tree: &SyntaxTree, index: &LineIndex, node: NodeId) {
        let column = index.column(node);
        self.lines
            .entry(tree.line(node))
            .and_modify(|existing| {
                if column < index.column(*existing) {
                    *existing = node;
                }
            })
            .or_insert(node);
    }

    /// Record `node` for `line`, replacing any previous entry.
    pub fn insert(&mut self, line: u32, node: NodeId) {
        self.lines.insert(line, node);
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Node of the lowest recorded line.
    pub fn first_line_node(&self) -> Option<NodeId> {
        self.lines.values().next().copied()
    }

    pub fn first_line(&self) -> Option<u32> {
        self.lines.keys().next().copied()
    }

    pub fn last_line(&self) -> Option<u32> {
        self.lines.keys().next_back().copied()
    }

    /// Node of the highest recorded line.
    pub fn last_line_node(&self) -> Option<NodeId> {
        self.lines.values().next_back().copied()
    }

    pub fn node_at(&self, line: u32) -> Option<NodeId> {
        self.lines.get(&line).copied()
    }

    /// Expanded start column recorded for `line`.
    pub fn start_column(&self, index: &LineIndex, line: u32) -> Option<u32> {
        self.node_at(line).map(|node| index.column(node))
    }

    /// Lines and nodes in line order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, NodeId)> + '_ {
        self.lines.iter().map(|(&line, &node)| (line, node))
    }
}
