//! Expanded columns and line starts.
//!
//! Every question the handlers ask about placement ("where does this line
//! start", "is this node first on its line") is answered from a
//! [`LineIndex`] built once per tree, so no handler rescans source text.

use plumb_ast::{NodeId, SyntaxTree};

/// Per-tree table of expanded node columns and line starts.
#[derive(Clone, Debug)]
pub struct LineIndex {
    /// Expanded column of every node, indexed by `NodeId`.
    columns: Vec<u32>,
    /// Expanded column where each line's first non-blank char sits.
    starts: Vec<Option<u32>>,
    /// Leftmost node on each line, ties going to the earlier node.
    first_nodes: Vec<Option<NodeId>>,
    /// Nodes on each line, sorted by expanded column.
    by_line: Vec<Vec<NodeId>>,
}

impl LineIndex {
    pub fn new(tree: &SyntaxTree, tab_width: u32) -> Self {
        let line_count = tree.line_count();
        let columns: Vec<u32> = tree
            .node_ids()
            .map(|id| match tree.source() {
                Some(source) => source.expanded_column(tree.position(id), tab_width),
                None => tree.column(id),
            })
            .collect();

        let mut by_line: Vec<Vec<NodeId>> = vec![Vec::new(); line_count];
        for id in tree.descendants(tree.root()) {
            if id == tree.root() {
                continue;
            }
            if let Some(line) = by_line.get_mut(tree.line(id) as usize) {
                line.push(id);
            }
        }
        for line in &mut by_line {
            line.sort_by_key(|id| columns[id.index()]);
        }
        let first_nodes: Vec<Option<NodeId>> =
            by_line.iter().map(|line| line.first().copied()).collect();

        let starts = (0..line_count)
            .map(|line| {
                let from_source = tree
                    .source()
                    .and_then(|source| source.indent_width(line as u32, tab_width));
                from_source.or_else(|| first_nodes[line].map(|id| columns[id.index()]))
            })
            .collect();

        LineIndex {
            columns,
            starts,
            first_nodes,
            by_line,
        }
    }

    /// Expanded column of a node.
    #[inline]
    pub fn column(&self, node: NodeId) -> u32 {
        self.columns[node.index()]
    }

    /// Expanded column of the first non-blank char on `line`; 0 when the
    /// line is blank or unknown.
    pub fn line_start(&self, line: u32) -> u32 {
        self.starts
            .get(line as usize)
            .copied()
            .flatten()
            .unwrap_or(0)
    }

    /// Leftmost node on `line`.
    pub fn first_node(&self, line: u32) -> Option<NodeId> {
        self.first_nodes.get(line as usize).copied().flatten()
    }

    /// Expanded column of the first node on `line` strictly right of
    /// `column`.
    pub fn next_column_after(&self, line: u32, column: u32) -> Option<u32> {
        self.by_line
            .get(line as usize)?
            .iter()
            .map(|&id| self.column(id))
            .find(|&c| c > column)
    }

    /// Expanded column where the line holding `node` starts.
    pub fn line_start_of(&self, tree: &SyntaxTree, node: NodeId) -> u32 {
        self.line_start(tree.line(node))
    }

    /// True if nothing but whitespace precedes `node` on its line.
    pub fn is_on_start_of_line(&self, tree: &SyntaxTree, node: NodeId) -> bool {
        self.line_start_of(tree, node) == self.column(node)
    }

    /// Leftmost node of the subtree; the earliest in preorder on ties.
    pub fn first_token(&self, tree: &SyntaxTree, node: NodeId) -> NodeId {
        tree.descendants(node).fold(node, |first, candidate| {
            if self.column(candidate) < self.column(first) {
                candidate
            } else {
                first
            }
        })
    }
}

/// Earliest-positioned node along the first-child chain of `node`.
///
/// Imaginary nodes often sit on an operator token (`EXPR` on `=`, a call
/// on its `(`); walking down the leftmost edge finds where the construct
/// visibly starts.
pub fn first_ast_node(tree: &SyntaxTree, node: NodeId) -> NodeId {
    let mut start = node;
    let mut current = Some(node);
    while let Some(n) = current {
        if tree.position(n) < tree.position(start) {
            start = n;
        }
        current = tree.first_child(n);
    }
    start
}

/// Deepest node along the last-child chain of `node`.
pub fn last_descendant(tree: &SyntaxTree, node: NodeId) -> NodeId {
    let mut last = node;
    while let Some(child) = tree.last_child(last) {
        last = child;
    }
    last
}
