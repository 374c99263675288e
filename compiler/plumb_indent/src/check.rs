//! The check driver.
//!
//! [`Checker`] walks one tree depth-first. Every node of a handled kind gets
//! a handler chained to the nearest enclosing handler, computes its level
//! from that parent, and runs its check before the walk descends. Nodes
//! without a handler are descended into but measured by their enclosing
//! handler.
//!
//! Construct behavior is split by family:
//! - `base` - block-parent defaults and nested-expression checks
//! - `wrapping` - continuation lines
//! - `type_def` - type definitions and anonymous class bodies
//! - `members` - methods and variables
//! - `statements` - blocks, conditionals, loops, `try`
//! - `switch` - `switch`, `case`, arrow rules, `yield`
//! - `expressions` - calls, `new`, lambdas
//! - `arrays` - array and annotation initializers
//! - `file` - package and import declarations

mod arrays;
mod base;
mod expressions;
mod file;
mod members;
mod statements;
mod switch;
mod type_def;
mod wrapping;

use plumb_ast::{NodeId, SyntaxTree, TokenKind};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use crate::handler::{Handler, HandlerId, HandlerKind};
use crate::position::first_ast_node;
use crate::{
    CheckError, IndentConfig, IndentLevel, LineIndex, Violation, ViolationKind, ViolationSink,
};

/// Minimum stack space to keep available before recursing (100KB).
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
#[cfg(not(target_arch = "wasm32"))]
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if it is nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Per-tree checking state.
pub(crate) struct Checker<'a> {
    tree: &'a SyntaxTree,
    index: LineIndex,
    config: &'a IndentConfig,
    handlers: Vec<Handler>,
    /// Handlers created ahead of the walk (call operands) are reused when
    /// the walk reaches their node.
    created: FxHashMap<NodeId, HandlerId>,
    /// Lines that already carry a violation.
    reported_lines: FxHashSet<u32>,
    sink: &'a mut dyn ViolationSink,
}

impl<'a> Checker<'a> {
    pub(crate) fn new(
        tree: &'a SyntaxTree,
        config: &'a IndentConfig,
        sink: &'a mut dyn ViolationSink,
    ) -> Self {
        let primordial = Handler {
            kind: HandlerKind::Primordial,
            node: tree.root(),
            parent: None,
            name: HandlerKind::Primordial.construct_name(TokenKind::CompilationUnit),
            indent: IndentLevel::new(0),
            lambda_aligned: true,
        };
        Checker {
            tree,
            index: LineIndex::new(tree, config.tab_width),
            config,
            handlers: vec![primordial],
            created: FxHashMap::default(),
            reported_lines: FxHashSet::default(),
            sink,
        }
    }

    /// Check every top-level construct, stopping at the first internal error.
    pub(crate) fn check_all(&mut self) -> Result<(), CheckError> {
        let tree = self.tree;
        for node in tree.children(tree.root()) {
            self.walk(node, HandlerId::ROOT)?;
        }
        Ok(())
    }

    /// Check a single top-level construct.
    pub(crate) fn check_top_level(&mut self, node: NodeId) -> Result<(), CheckError> {
        self.walk(node, HandlerId::ROOT)
    }

    fn walk(&mut self, node: NodeId, parent: HandlerId) -> Result<(), CheckError> {
        ensure_sufficient_stack(|| {
            let tree = self.tree;
            let mut current = parent;
            if let Some(kind) = HandlerKind::for_token(tree.kind(node)) {
                let handler = self.handler_for(node, kind, parent)?;
                self.check_handler(handler)?;
                current = handler;
            }
            for child in tree.children(node) {
                self.walk(child, current)?;
            }
            Ok(())
        })
    }

    // Handler creation

    fn handler_for(
        &mut self,
        node: NodeId,
        kind: HandlerKind,
        parent: HandlerId,
    ) -> Result<HandlerId, CheckError> {
        if let Some(&id) = self.created.get(&node) {
            return Ok(id);
        }
        let parent = if self.tree.kind(node) == TokenKind::MethodCall {
            self.call_operand_handler(node, kind, parent)?
        } else {
            parent
        };
        let id = self.create(kind, node, parent)?;
        self.created.insert(node, id);
        Ok(id)
    }

    /// A call inherits from the handler of its leftmost operand (past any
    /// dots), creating that handler ahead of the walk if needed.
    fn call_operand_handler(
        &mut self,
        call: NodeId,
        kind: HandlerKind,
        parent: HandlerId,
    ) -> Result<HandlerId, CheckError> {
        let construct = kind.construct_name(TokenKind::MethodCall);
        let mut target = self.require_first_child_of(construct, call)?;
        while self.tree.kind(target) == TokenKind::Dot {
            target = self.require_first_child_of(construct, target)?;
        }
        match HandlerKind::for_token(self.tree.kind(target)) {
            Some(target_kind) => self.handler_for(target, target_kind, parent),
            None => Ok(parent),
        }
    }

    fn create(
        &mut self,
        kind: HandlerKind,
        node: NodeId,
        parent: HandlerId,
    ) -> Result<HandlerId, CheckError> {
        let id = HandlerId::new(self.handlers.len() as u32);
        let name = kind.construct_name(self.tree.kind(node));
        self.handlers.push(Handler {
            kind,
            node,
            parent: Some(parent),
            name,
            indent: IndentLevel::new(0),
            lambda_aligned: true,
        });
        let indent = self.compute_indent(id)?;
        trace!(handler = name, ?node, %indent, "created handler");
        self.handlers[id.index()].indent = indent;
        Ok(id)
    }

    fn check_handler(&mut self, id: HandlerId) -> Result<(), CheckError> {
        match self.kind_of(id) {
            HandlerKind::Primordial | HandlerKind::Index => {}
            HandlerKind::PackageDef => self.check_package_def(id),
            HandlerKind::Import => self.check_import(id),
            HandlerKind::TypeDef => self.check_type_def(id)?,
            HandlerKind::ObjectBlock => self.check_object_block(id)?,
            HandlerKind::MethodDef => self.check_method_def(id)?,
            HandlerKind::MemberDef => self.check_member_def(id)?,
            HandlerKind::Block => self.check_block(id)?,
            HandlerKind::If => self.check_if(id)?,
            HandlerKind::Else
            | HandlerKind::Finally
            | HandlerKind::StaticInit
            | HandlerKind::ArrayInit
            | HandlerKind::AnnotationArrayInit => self.check_block_parent(id)?,
            HandlerKind::For => self.check_for(id)?,
            HandlerKind::While => self.check_while(id)?,
            HandlerKind::DoWhile => self.check_do_while(id)?,
            HandlerKind::Try => self.check_try(id)?,
            HandlerKind::Catch => self.check_catch(id)?,
            HandlerKind::Synchronized => self.check_synchronized(id)?,
            HandlerKind::Switch => self.check_switch(id)?,
            HandlerKind::Case | HandlerKind::SwitchRule => self.check_case(id),
            HandlerKind::Yield => self.check_yield(id),
            HandlerKind::Lambda => self.check_lambda(id)?,
            HandlerKind::MethodCall => self.check_method_call(id)?,
            HandlerKind::New => self.check_new(id)?,
            HandlerKind::Label => self.check_label(id)?,
        }
        Ok(())
    }

    // Level computation

    /// Level a handler inherits when it is created.
    fn compute_indent(&self, id: HandlerId) -> Result<IndentLevel, CheckError> {
        let parent = self.parent_of(id);
        match self.kind_of(id) {
            HandlerKind::Primordial => Ok(IndentLevel::new(0)),
            HandlerKind::ObjectBlock => self.object_block_indent(id, parent),
            HandlerKind::Case | HandlerKind::SwitchRule => Ok(self
                .indent(parent)
                .offset(i64::from(self.config.case_indent))),
            HandlerKind::Label => self.label_indent(id, parent),
            HandlerKind::If => self.if_indent(id, parent),
            HandlerKind::ArrayInit => self.array_init_indent(id, parent),
            HandlerKind::AnnotationArrayInit => self.annotation_array_init_indent(id),
            HandlerKind::Lambda => self.lambda_indent(id, parent),
            HandlerKind::MethodCall => self.method_call_indent(id, parent),
            HandlerKind::New => self.new_indent(id, parent),
            _ => self.suggested_child_indent(parent, id),
        }
    }

    /// Level `parent` suggests for `child`.
    fn suggested_child_indent(
        &self,
        parent: HandlerId,
        child: HandlerId,
    ) -> Result<IndentLevel, CheckError> {
        let child_kind = self.kind_of(child);
        let indent = self.indent(parent);
        match self.kind_of(parent) {
            HandlerKind::Primordial => Ok(IndentLevel::new(0)),
            HandlerKind::MemberDef
            | HandlerKind::Case
            | HandlerKind::SwitchRule
            | HandlerKind::Index => Ok(indent),
            HandlerKind::If if child_kind == HandlerKind::Else => Ok(indent),
            HandlerKind::Try
                if matches!(child_kind, HandlerKind::Catch | HandlerKind::Finally)
                    || (child_kind == HandlerKind::New
                        && self.is_in_resource_specification(self.node_of(child))) =>
            {
                Ok(indent)
            }
            HandlerKind::Block => {
                let grandparent = self.parent_of(parent);
                let grand_kind = self.kind_of(grandparent);
                if (grand_kind.is_block_parent() && grand_kind != HandlerKind::Block)
                    || (child_kind == HandlerKind::Block && grand_kind == HandlerKind::Case)
                {
                    self.suggested_child_indent(grandparent, child)
                } else {
                    self.children_expected_indent(parent)
                }
            }
            HandlerKind::Lambda => Ok(self.lambda_child_indent(parent)),
            HandlerKind::MethodCall => Ok(self.method_call_child_indent(parent, child)),
            HandlerKind::New => Ok(self.new_child_indent(parent, child)),
            HandlerKind::Label => self.label_child_indent(parent),
            kind if kind.is_block_parent() => self.children_expected_indent(parent),
            _ => Ok(indent.offset(self.basic_offset())),
        }
    }

    // Handler accessors

    #[inline]
    fn handler(&self, id: HandlerId) -> &Handler {
        &self.handlers[id.index()]
    }

    #[inline]
    fn kind_of(&self, id: HandlerId) -> HandlerKind {
        self.handler(id).kind
    }

    #[inline]
    fn node_of(&self, id: HandlerId) -> NodeId {
        self.handler(id).node
    }

    fn indent(&self, id: HandlerId) -> IndentLevel {
        self.handler(id).indent.clone()
    }

    /// Enclosing handler; the primordial handler is its own parent.
    fn parent_of(&self, id: HandlerId) -> HandlerId {
        self.handler(id).parent.unwrap_or(HandlerId::ROOT)
    }

    fn is_force_strict(&self, id: HandlerId) -> bool {
        self.config.is_force_strict(self.kind_of(id))
    }

    fn basic_offset(&self) -> i64 {
        i64::from(self.config.basic_offset)
    }

    fn line_wrap(&self) -> i64 {
        i64::from(self.config.line_wrapping_indentation)
    }

    // Tree queries

    fn kind(&self, node: NodeId) -> TokenKind {
        self.tree.kind(node)
    }

    fn line(&self, node: NodeId) -> u32 {
        self.tree.line(node)
    }

    /// Expanded column.
    fn column(&self, node: NodeId) -> u32 {
        self.index.column(node)
    }

    fn line_start_of(&self, node: NodeId) -> u32 {
        self.index.line_start_of(self.tree, node)
    }

    fn is_on_start_of_line(&self, node: NodeId) -> bool {
        self.index.is_on_start_of_line(self.tree, node)
    }

    fn same_line(&self, a: NodeId, b: NodeId) -> bool {
        self.line(a) == self.line(b)
    }

    fn first_line(&self, node: NodeId) -> u32 {
        self.line(first_ast_node(self.tree, node))
    }

    fn child(&self, node: NodeId, kind: TokenKind) -> Option<NodeId> {
        self.tree.find_first_token(node, kind)
    }

    fn parent_kind(&self, node: NodeId) -> Option<TokenKind> {
        self.tree.parent(node).map(|p| self.kind(p))
    }

    fn require_child(
        &self,
        id: HandlerId,
        node: NodeId,
        kind: TokenKind,
    ) -> Result<NodeId, CheckError> {
        self.child(node, kind).ok_or_else(|| CheckError::MissingChild {
            construct: self.handler(id).name,
            expected: kind,
            position: self.tree.position(node),
        })
    }

    fn require_first_child(&self, id: HandlerId, node: NodeId) -> Result<NodeId, CheckError> {
        self.require_first_child_of(self.handler(id).name, node)
    }

    fn require_first_child_of(
        &self,
        construct: &'static str,
        node: NodeId,
    ) -> Result<NodeId, CheckError> {
        self.tree
            .first_child(node)
            .ok_or_else(|| CheckError::MissingFirstChild {
                construct,
                position: self.tree.position(node),
            })
    }

    fn require_parent(&self, id: HandlerId, node: NodeId) -> Result<NodeId, CheckError> {
        self.tree
            .parent(node)
            .ok_or_else(|| CheckError::MissingParent {
                construct: self.handler(id).name,
                position: self.tree.position(node),
            })
    }

    // Reporting

    fn report(&mut self, node: NodeId, violation: Violation) {
        if self.reported_lines.insert(self.line(node)) {
            debug!(
                line = violation.line() + 1,
                subject = %violation.subject,
                actual = violation.actual,
                expected = %violation.expected,
                "indentation violation"
            );
            self.sink.report(violation);
        }
    }

    /// Report `node` against the handler's own level.
    fn log_error(&mut self, id: HandlerId, node: NodeId, subtype: &'static str, actual: u32) {
        let expected = self.indent(id);
        self.log_error_expected(id, node, subtype, actual, expected);
    }

    fn log_error_expected(
        &mut self,
        id: HandlerId,
        node: NodeId,
        subtype: &'static str,
        actual: u32,
        expected: IndentLevel,
    ) {
        let construct = self.handler(id).name;
        let subject = if subtype.is_empty() {
            construct.to_owned()
        } else {
            format!("{construct} {subtype}")
        };
        let violation = Violation {
            position: self.tree.position(node),
            actual,
            expected,
            kind: ViolationKind::Error,
            subject,
            construct,
            subtype: (!subtype.is_empty()).then_some(subtype),
        };
        self.report(node, violation);
    }

    fn log_child_error(
        &mut self,
        id: HandlerId,
        node: NodeId,
        actual: u32,
        expected: IndentLevel,
    ) {
        let construct = self.handler(id).name;
        let violation = Violation {
            position: self.tree.position(node),
            actual,
            expected,
            kind: ViolationKind::ChildError,
            subject: construct.to_owned(),
            construct,
            subtype: None,
        };
        self.report(node, violation);
    }
}
