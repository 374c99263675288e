//! Tree construction errors.

use crate::{NodeId, Position, TokenKind};

/// Why a [`TreeBuilder`](crate::TreeBuilder) rejected an operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("token text {text:?} not found at or after {position}")]
    TextNotFound { text: String, position: Position },

    #[error("cannot locate {kind} token: the builder has no source text")]
    NoSource { kind: TokenKind },

    #[error("{node:?} does not belong to this builder")]
    UnknownNode { node: NodeId },

    #[error("{node:?} already has a parent")]
    AlreadyAttached { node: NodeId },

    #[error("{node:?} cannot be its own child")]
    SelfParent { node: NodeId },

    #[error("{node:?} is not reachable from the tree root")]
    Detached { node: NodeId },
}
