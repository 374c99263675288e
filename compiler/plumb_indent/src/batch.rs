//! Parallel checking of independent trees.

use plumb_ast::SyntaxTree;
use rayon::prelude::*;

use crate::{CheckError, IndentationCheck, Violation};

/// Check every tree on the current rayon pool.
///
/// Each tree gets its own handler arena and line index. Results are in
/// input order.
#[tracing::instrument(level = "debug", skip_all, fields(trees = trees.len()))]
pub fn check_batch(
    check: &IndentationCheck,
    trees: &[SyntaxTree],
) -> Vec<Result<Vec<Violation>, CheckError>> {
    trees.par_iter().map(|tree| check.check(tree)).collect()
}
