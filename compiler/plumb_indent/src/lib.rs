//! Plumb Indent - structural indentation verification
//!
//! Checks that the visual indentation of a parsed source file matches its
//! structure, and reports each mismatch with the expected and actual
//! columns. The tree is never modified.
//!
//! # Architecture
//!
//! - [`IndentLevel`]: the set of columns a line may start at
//! - [`LineIndex`]: expanded columns and line starts, computed once per tree
//! - [`SpanSet`]: leftmost node per line of a subtree
//! - [`HandlerKind`]: which construct governs a node
//! - `check`: the walk, one handler per governed node, chained to the
//!   nearest enclosing handler
//!
//! Checking one tree is single-threaded; [`check_batch`] checks many trees
//! in parallel.
//!
//! # Example
//!
//! ```
//! use plumb_ast::{TokenKind, TreeBuilder};
//! use plumb_indent::{IndentConfig, IndentationCheck};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut b = TreeBuilder::with_source("class A {\n  int x;\n}\n");
//! let modifiers = b.node(TokenKind::Modifiers, [])?;
//! let keyword = b.token(TokenKind::LiteralClass, "class")?;
//! let name = b.token(TokenKind::Ident, "A")?;
//! let lcurly = b.token(TokenKind::Lcurly, "{")?;
//! let field_modifiers = b.node(TokenKind::Modifiers, [])?;
//! let int = b.token(TokenKind::LiteralInt, "int")?;
//! let ty = b.node(TokenKind::Type, [int])?;
//! let x = b.token(TokenKind::Ident, "x")?;
//! let semi = b.token(TokenKind::Semi, ";")?;
//! let field = b.node(TokenKind::VariableDef, [field_modifiers, ty, x, semi])?;
//! let rcurly = b.token(TokenKind::Rcurly, "}")?;
//! let body = b.node(TokenKind::Objblock, [lcurly, field, rcurly])?;
//! let class = b.node(TokenKind::ClassDef, [modifiers, keyword, name, body])?;
//! let tree = b.finish([class])?;
//!
//! let check = IndentationCheck::new(IndentConfig::default())?;
//! let violations = check.check(&tree)?;
//! assert_eq!(violations.len(), 1);
//! assert_eq!(
//!     violations[0].message(),
//!     "'member def type' has incorrect indentation level 2, expected level should be 4."
//! );
//! # Ok(())
//! # }
//! ```

mod batch;
mod check;
mod config;
mod error;
mod handler;
mod level;
mod position;
mod span_set;
mod violation;

use plumb_ast::SyntaxTree;
use tracing::warn;

pub use batch::check_batch;
pub use config::{ConfigError, IndentConfig, StrictPolicy};
pub use error::CheckError;
pub use handler::HandlerKind;
pub use level::IndentLevel;
pub use position::{first_ast_node, last_descendant, LineIndex};
pub use span_set::SpanSet;
pub use violation::{Violation, ViolationKind, ViolationSink};

use check::Checker;

/// A validated configuration, ready to check trees.
///
/// Holds no per-tree state, so one instance can be shared across threads.
#[derive(Clone, Debug, Default)]
pub struct IndentationCheck {
    config: IndentConfig,
}

/// Result of [`IndentationCheck::check_isolated`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// Violations of every construct that could be measured, by position.
    pub violations: Vec<Violation>,
    /// Constructs that could not be measured.
    pub errors: Vec<CheckError>,
}

impl CheckReport {
    /// True if nothing was reported and nothing failed.
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty() && self.errors.is_empty()
    }
}

impl IndentationCheck {
    pub fn new(config: IndentConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(IndentationCheck { config })
    }

    pub fn config(&self) -> &IndentConfig {
        &self.config
    }

    /// Check a whole tree and return its violations ordered by position.
    ///
    /// Stops at the first construct that breaks a structural guarantee.
    #[tracing::instrument(level = "debug", skip_all, fields(nodes = tree.len()))]
    pub fn check(&self, tree: &SyntaxTree) -> Result<Vec<Violation>, CheckError> {
        let mut violations = Vec::new();
        self.check_into(tree, &mut violations)?;
        violations.sort_by_key(|v| v.position);
        Ok(violations)
    }

    /// Check a whole tree, sending violations to `sink` in walk order.
    pub fn check_into(
        &self,
        tree: &SyntaxTree,
        sink: &mut dyn ViolationSink,
    ) -> Result<(), CheckError> {
        Checker::new(tree, &self.config, sink).check_all()
    }

    /// Check each top-level construct on its own, so a malformed construct
    /// does not hide violations in its siblings.
    #[tracing::instrument(level = "debug", skip_all, fields(nodes = tree.len()))]
    pub fn check_isolated(&self, tree: &SyntaxTree) -> CheckReport {
        let mut violations = Vec::new();
        let mut errors = Vec::new();
        {
            let mut checker = Checker::new(tree, &self.config, &mut violations);
            for node in tree.children(tree.root()) {
                if let Err(error) = checker.check_top_level(node) {
                    warn!(%error, "construct skipped");
                    errors.push(error);
                }
            }
        }
        violations.sort_by_key(|v| v.position);
        CheckReport { violations, errors }
    }
}
