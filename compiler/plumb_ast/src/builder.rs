//! Incremental tree construction.
//!
//! A parser (or a test) creates tokens in source order, groups them under
//! parent nodes, and finally hands the top-level constructs to
//! [`TreeBuilder::finish`], which wraps them in a `COMPILATION_UNIT` root.
//!
//! Tokens can be placed explicitly with [`TreeBuilder::token_at`] or found
//! by searching the source text forward from a cursor with
//! [`TreeBuilder::token`]. The search does not understand comments or string
//! literals; use [`TreeBuilder::skip`] to step over text that must not match.
//!
//! Imaginary nodes (created with [`TreeBuilder::node`] and no position) take
//! the position of their first non-comment child, or of their next sibling
//! when they have no children, when the tree is finished.

use crate::tree::NodeData;
use crate::{NodeId, Position, SourceText, SyntaxTree, TokenKind, TreeError};

#[derive(Debug)]
struct PendingNode {
    kind: TokenKind,
    text: Option<Box<str>>,
    position: Option<Position>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Builder for [`SyntaxTree`].
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<PendingNode>,
    source: Option<SourceText>,
    cursor: usize,
}

impl TreeBuilder {
    /// Builder without source text. Only [`TreeBuilder::token_at`] can place
    /// tokens.
    pub fn new() -> Self {
        TreeBuilder::default()
    }

    /// Builder that locates tokens in `source`.
    pub fn with_source(source: impl Into<String>) -> Self {
        TreeBuilder {
            nodes: Vec::new(),
            source: Some(SourceText::new(source)),
            cursor: 0,
        }
    }

    /// Current search position.
    pub fn cursor(&self) -> Position {
        self.source
            .as_ref()
            .map_or_else(Position::default, |s| s.position_of(self.cursor))
    }

    /// Create a token at the next occurrence of `text` after the cursor.
    ///
    /// Identifier-like text only matches on word boundaries, so `int` will
    /// not match inside `print`.
    pub fn token(&mut self, kind: TokenKind, text: &str) -> Result<NodeId, TreeError> {
        let offset = self.locate(kind, text)?;
        let position = self
            .source
            .as_ref()
            .map_or_else(Position::default, |s| s.position_of(offset));
        self.cursor = offset + text.len();
        Ok(self.push(kind, Some(text), Some(position)))
    }

    /// Create a token at an explicit position. The cursor is not moved.
    pub fn token_at(&mut self, kind: TokenKind, text: &str, line: u32, column: u32) -> NodeId {
        self.push(kind, Some(text), Some(Position::new(line, column)))
    }

    /// Move the cursor past the next occurrence of `text` without creating
    /// a node.
    pub fn skip(&mut self, text: &str) -> Result<(), TreeError> {
        let offset = self.locate(TokenKind::CommentContent, text)?;
        self.cursor = offset + text.len();
        Ok(())
    }

    /// Create a node without its own position and attach `children` to it.
    pub fn node(
        &mut self,
        kind: TokenKind,
        children: impl IntoIterator<Item = NodeId>,
    ) -> Result<NodeId, TreeError> {
        let id = self.push(kind, None, None);
        self.adopt(id, children)?;
        Ok(id)
    }

    /// Append `children` to an existing node, in order.
    pub fn adopt(
        &mut self,
        parent: NodeId,
        children: impl IntoIterator<Item = NodeId>,
    ) -> Result<(), TreeError> {
        self.pending(parent)?;
        for child in children {
            if child == parent {
                return Err(TreeError::SelfParent { node: child });
            }
            let pending = self.pending(child)?;
            if pending.parent.is_some() {
                return Err(TreeError::AlreadyAttached { node: child });
            }
            self.nodes[child.index()].parent = Some(parent);
            self.nodes[parent.index()].children.push(child);
        }
        Ok(())
    }

    /// Wrap `top_level` in a `COMPILATION_UNIT` root and link the arena.
    ///
    /// Fails if any created node is not reachable from the root.
    pub fn finish(
        mut self,
        top_level: impl IntoIterator<Item = NodeId>,
    ) -> Result<SyntaxTree, TreeError> {
        let root = self.push(TokenKind::CompilationUnit, None, None);
        self.adopt(root, top_level)?;

        let preorder = self.preorder(root);
        if preorder.len() != self.nodes.len() {
            let mut reached = vec![false; self.nodes.len()];
            for id in &preorder {
                reached[id.index()] = true;
            }
            if let Some(index) = reached.iter().position(|&r| !r) {
                return Err(TreeError::Detached {
                    node: NodeId::new(index as u32),
                });
            }
        }

        let positions = self.resolve_positions(&preorder);
        let mut nodes: Vec<NodeData> = self
            .nodes
            .iter()
            .zip(positions)
            .map(|(pending, position)| NodeData {
                kind: pending.kind,
                text: pending.text.clone(),
                position,
                parent: pending.parent,
                first_child: pending.children.first().copied(),
                last_child: pending.children.last().copied(),
                next_sibling: None,
                prev_sibling: None,
            })
            .collect();
        for pending in &self.nodes {
            for pair in pending.children.windows(2) {
                nodes[pair[0].index()].next_sibling = Some(pair[1]);
                nodes[pair[1].index()].prev_sibling = Some(pair[0]);
            }
        }
        Ok(SyntaxTree::from_parts(nodes, root, self.source))
    }

    fn push(&mut self, kind: TokenKind, text: Option<&str>, position: Option<Position>) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(PendingNode {
            kind,
            text: text.map(Box::from),
            position,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    fn pending(&self, id: NodeId) -> Result<&PendingNode, TreeError> {
        self.nodes
            .get(id.index())
            .ok_or(TreeError::UnknownNode { node: id })
    }

    fn locate(&self, kind: TokenKind, text: &str) -> Result<usize, TreeError> {
        let source = self.source.as_ref().ok_or(TreeError::NoSource { kind })?;
        find_token(source.as_str(), self.cursor, text).ok_or_else(|| TreeError::TextNotFound {
            text: text.to_owned(),
            position: source.position_of(self.cursor),
        })
    }

    fn preorder(&self, root: NodeId) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id.index()].children.iter().rev().copied());
        }
        order
    }

    /// Every fallback points at a node later in preorder, so a single pass
    /// in reverse preorder sees each dependency resolved.
    fn resolve_positions(&self, preorder: &[NodeId]) -> Vec<Position> {
        let mut resolved: Vec<Option<Position>> = vec![None; self.nodes.len()];
        let mut next_sibling: Vec<Option<NodeId>> = vec![None; self.nodes.len()];
        for pending in &self.nodes {
            for pair in pending.children.windows(2) {
                next_sibling[pair[0].index()] = Some(pair[1]);
            }
        }
        for &id in preorder.iter().rev() {
            let pending = &self.nodes[id.index()];
            let position = pending
                .position
                .or_else(|| {
                    pending
                        .children
                        .iter()
                        .filter(|c| !self.nodes[c.index()].kind.is_comment())
                        .find_map(|c| resolved[c.index()])
                })
                .or_else(|| next_sibling[id.index()].and_then(|s| resolved[s.index()]));
            resolved[id.index()] = position;
        }
        resolved.into_iter().map(Option::unwrap_or_default).collect()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn find_token(haystack: &str, from: usize, needle: &str) -> Option<usize> {
    let first = needle.chars().next()?;
    let word_start = is_word_char(first);
    let word_end = needle.chars().next_back().is_some_and(is_word_char);
    let mut from = from;
    while let Some(found) = haystack.get(from..)?.find(needle) {
        let start = from + found;
        let end = start + needle.len();
        let clear_before =
            !word_start || !haystack[..start].chars().next_back().is_some_and(is_word_char);
        let clear_after = !word_end || !haystack[end..].chars().next().is_some_and(is_word_char);
        if clear_before && clear_after {
            return Some(start);
        }
        from = start + first.len_utf8();
    }
    None
}
