//! Violations and where they go.

use std::fmt;

use plumb_ast::Position;

use crate::IndentLevel;

/// Whether the offending node is the construct itself or one of its
/// children (statements, members, elements).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "snake_case")
)]
pub enum ViolationKind {
    Error,
    ChildError,
}

/// One indentation mismatch.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Violation {
    /// Raw position of the offending node.
    pub position: Position,
    /// Observed column after tab expansion.
    pub actual: u32,
    pub expected: IndentLevel,
    pub kind: ViolationKind,
    /// The quoted part of the message: a construct name with an optional
    /// subtype (`class def modifier`), or the text of a wrapped token.
    pub subject: String,
    /// Display name of the handler that reported it.
    pub construct: &'static str,
    pub subtype: Option<&'static str>,
}

impl Violation {
    /// 0-based line of the offending node.
    pub fn line(&self) -> u32 {
        self.position.line
    }

    /// Message bundle key.
    pub fn message_key(&self) -> &'static str {
        match (self.kind, self.expected.is_multi_level()) {
            (ViolationKind::Error, false) => "indentation.error",
            (ViolationKind::Error, true) => "indentation.error.multi",
            (ViolationKind::ChildError, false) => "indentation.child.error",
            (ViolationKind::ChildError, true) => "indentation.child.error.multi",
        }
    }

    /// Rendered English message.
    pub fn message(&self) -> String {
        let child = match self.kind {
            ViolationKind::Error => "",
            ViolationKind::ChildError => " child",
        };
        let expected = if self.expected.is_multi_level() {
            "one of the following: "
        } else {
            ""
        };
        format!(
            "'{}'{child} has incorrect indentation level {}, expected level should be {expected}{}.",
            self.subject, self.actual, self.expected
        )
    }
}

/// `line:column: message`, 1-based like editor positions.
impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.position, self.message())
    }
}

/// Receiver for violations as they are found.
pub trait ViolationSink {
    fn report(&mut self, violation: Violation);
}

impl ViolationSink for Vec<Violation> {
    fn report(&mut self, violation: Violation) {
        self.push(violation);
    }
}
