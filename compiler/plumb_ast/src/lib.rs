//! Plumb AST - position-annotated syntax trees
//!
//! This crate holds the input side of the indentation checker:
//! - `TokenKind` - the node vocabulary (`CLASS_DEF`, `SLIST`, `IDENT`, ...)
//! - `SyntaxTree` - a flat, immutable node arena with parent/child/sibling links
//! - `TreeBuilder` - incremental construction for parsers and tests
//! - `SourceText` - the raw text, used for tab expansion and line starts
//!
//! # Design
//!
//! - **Flat arena**: nodes are addressed by `NodeId(u32)`; no `Box` trees
//! - **Positions are 0-based**: lines and raw char columns; tabs are expanded
//!   by consumers that know the tab width
//! - **Imaginary nodes**: grouping nodes without a token of their own take
//!   the position of their first child (or next sibling) when finished

mod builder;
mod error;
mod kind;
mod node;
mod source;
mod tree;

pub use builder::TreeBuilder;
pub use error::TreeError;
pub use kind::TokenKind;
pub use node::{NodeId, Position};
pub use source::{expand_tabs, SourceText};
pub use tree::{Children, Descendants, SyntaxTree};
