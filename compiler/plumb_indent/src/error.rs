//! Internal check errors.
//!
//! These are not indentation violations. They mean the tree broke a
//! structural guarantee the checker relies on (a type definition without a
//! body, a call without an operand) and the affected construct could not be
//! measured.

use plumb_ast::{Position, TokenKind};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    #[error("{construct} at {position} has no {expected} child")]
    MissingChild {
        construct: &'static str,
        expected: TokenKind,
        position: Position,
    },

    #[error("{construct} at {position} has no children")]
    MissingFirstChild {
        construct: &'static str,
        position: Position,
    },

    #[error("{construct} at {position} has no parent node")]
    MissingParent {
        construct: &'static str,
        position: Position,
    },
}
