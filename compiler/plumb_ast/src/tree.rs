//! The finished, immutable syntax tree.
//!
//! Nodes live in one flat arena and link to each other by [`NodeId`]. The
//! tree is read-only once built; the checker never mutates it.

use crate::{NodeId, Position, SourceText, TokenKind};

#[derive(Clone, Debug)]
pub(crate) struct NodeData {
    pub(crate) kind: TokenKind,
    pub(crate) text: Option<Box<str>>,
    pub(crate) position: Position,
    pub(crate) parent: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) last_child: Option<NodeId>,
    pub(crate) next_sibling: Option<NodeId>,
    pub(crate) prev_sibling: Option<NodeId>,
}

/// Position-annotated syntax tree rooted at a `COMPILATION_UNIT` node.
#[derive(Clone, Debug)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
    root: NodeId,
    source: Option<SourceText>,
}

impl SyntaxTree {
    pub(crate) fn from_parts(
        nodes: Vec<NodeData>,
        root: NodeId,
        source: Option<SourceText>,
    ) -> Self {
        SyntaxTree {
            nodes,
            root,
            source,
        }
    }

    #[inline]
    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn source(&self) -> Option<&SourceText> {
        self.source.as_ref()
    }

    /// Number of lines spanned by the tree.
    ///
    /// Uses the source when present, otherwise the last line any node sits on.
    pub fn line_count(&self) -> usize {
        match &self.source {
            Some(source) => source.line_count(),
            None => self
                .nodes
                .iter()
                .map(|n| n.position.line as usize + 1)
                .max()
                .unwrap_or(0),
        }
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> TokenKind {
        self.data(id).kind
    }

    /// Token text, or the kind name for nodes without text.
    pub fn text(&self, id: NodeId) -> &str {
        self.data(id)
            .text
            .as_deref()
            .unwrap_or_else(|| self.kind(id).name())
    }

    #[inline]
    pub fn position(&self, id: NodeId) -> Position {
        self.data(id).position
    }

    #[inline]
    pub fn line(&self, id: NodeId) -> u32 {
        self.data(id).position.line
    }

    /// Raw char column; see [`Position`].
    #[inline]
    pub fn column(&self, id: NodeId) -> u32 {
        self.data(id).position.column
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).parent
    }

    #[inline]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).first_child
    }

    #[inline]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).last_child
    }

    #[inline]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).next_sibling
    }

    #[inline]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).prev_sibling
    }

    pub fn has_children(&self, id: NodeId) -> bool {
        self.data(id).first_child.is_some()
    }

    /// Direct children in order.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.first_child(id),
        }
    }

    /// First direct child of the given kind.
    pub fn find_first_token(&self, id: NodeId, kind: TokenKind) -> Option<NodeId> {
        self.children(id).find(|&child| self.kind(child) == kind)
    }

    /// True if any direct child has the given kind.
    pub fn has_child(&self, id: NodeId, kind: TokenKind) -> bool {
        self.find_first_token(id, kind).is_some()
    }

    /// The node and all its descendants in preorder.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            root: id,
            next: Some(id),
        }
    }

    /// Nearest strict ancestor of the given kind.
    pub fn ancestor_of_kind(&self, id: NodeId, kind: TokenKind) -> Option<NodeId> {
        let mut current = self.parent(id);
        while let Some(node) = current {
            if self.kind(node) == kind {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    /// Every node id in arena order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(NodeId::new)
    }
}

/// Iterator over the direct children of a node.
pub struct Children<'a> {
    tree: &'a SyntaxTree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.next_sibling(current);
        Some(current)
    }
}

/// Preorder iterator over a subtree, driven by sibling links so it needs no
/// auxiliary stack.
pub struct Descendants<'a> {
    tree: &'a SyntaxTree,
    root: NodeId,
    next: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.first_child(current).or_else(|| {
            let mut node = current;
            loop {
                if node == self.root {
                    return None;
                }
                if let Some(sibling) = self.tree.next_sibling(node) {
                    return Some(sibling);
                }
                node = self.tree.parent(node)?;
            }
        });
        Some(current)
    }
}
