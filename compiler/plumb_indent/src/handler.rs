//! Construct handlers.
//!
//! Every node kind the checker understands maps to one [`HandlerKind`]. A
//! handler records the node it governs, the enclosing handler it inherits
//! from, and the level it computed for that node. Handlers live in a
//! per-tree arena and point at their parent by [`HandlerId`], so the
//! chain is read-only for children and dropped with the check.
//!
//! The behavior of each kind lives in `check`; this module only answers
//! "which handler governs this token" and "what is it called".

use std::fmt;

use plumb_ast::{NodeId, TokenKind};

use crate::IndentLevel;

/// Closed set of construct handlers.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum HandlerKind {
    /// Root of the handler chain, fixed at column 0.
    Primordial,
    PackageDef,
    Import,
    /// Class, interface, enum, annotation type and record definitions.
    TypeDef,
    /// Body of a type definition or anonymous class.
    ObjectBlock,
    /// Methods, constructors and annotation members.
    MethodDef,
    /// Fields and local variables.
    MemberDef,
    /// Statement lists and instance initializers.
    Block,
    If,
    Else,
    For,
    While,
    DoWhile,
    Try,
    Catch,
    Finally,
    Switch,
    Case,
    SwitchRule,
    Yield,
    Synchronized,
    StaticInit,
    ArrayInit,
    AnnotationArrayInit,
    Lambda,
    MethodCall,
    New,
    Label,
    Index,
}

impl HandlerKind {
    /// The handler registered for a token kind, if any.
    pub fn for_token(kind: TokenKind) -> Option<HandlerKind> {
        let handler = match kind {
            TokenKind::CaseGroup => HandlerKind::Case,
            TokenKind::SwitchRule => HandlerKind::SwitchRule,
            TokenKind::LiteralSwitch => HandlerKind::Switch,
            TokenKind::Slist | TokenKind::InstanceInit => HandlerKind::Block,
            TokenKind::PackageDef => HandlerKind::PackageDef,
            TokenKind::LiteralElse => HandlerKind::Else,
            TokenKind::LiteralIf => HandlerKind::If,
            TokenKind::LiteralTry => HandlerKind::Try,
            TokenKind::LiteralCatch => HandlerKind::Catch,
            TokenKind::LiteralFinally => HandlerKind::Finally,
            TokenKind::LiteralDo => HandlerKind::DoWhile,
            TokenKind::LiteralWhile => HandlerKind::While,
            TokenKind::LiteralFor => HandlerKind::For,
            TokenKind::MethodDef
            | TokenKind::CtorDef
            | TokenKind::CompactCtorDef
            | TokenKind::AnnotationFieldDef => HandlerKind::MethodDef,
            TokenKind::ClassDef
            | TokenKind::InterfaceDef
            | TokenKind::EnumDef
            | TokenKind::AnnotationDef
            | TokenKind::RecordDef => HandlerKind::TypeDef,
            TokenKind::Objblock => HandlerKind::ObjectBlock,
            TokenKind::Import | TokenKind::StaticImport => HandlerKind::Import,
            TokenKind::ArrayInit => HandlerKind::ArrayInit,
            TokenKind::AnnotationArrayInit => HandlerKind::AnnotationArrayInit,
            TokenKind::MethodCall | TokenKind::CtorCall | TokenKind::SuperCtorCall => {
                HandlerKind::MethodCall
            }
            TokenKind::LabeledStat => HandlerKind::Label,
            TokenKind::StaticInit => HandlerKind::StaticInit,
            TokenKind::VariableDef => HandlerKind::MemberDef,
            TokenKind::LiteralNew => HandlerKind::New,
            TokenKind::IndexOp => HandlerKind::Index,
            TokenKind::LiteralSynchronized => HandlerKind::Synchronized,
            TokenKind::Lambda => HandlerKind::Lambda,
            TokenKind::LiteralYield => HandlerKind::Yield,
            _ => return None,
        };
        Some(handler)
    }

    /// True if nodes of this kind get their own handler.
    pub fn is_handled(kind: TokenKind) -> bool {
        HandlerKind::for_token(kind).is_some()
    }

    /// Kinds that own braces and a list of child statements or members.
    pub fn is_block_parent(self) -> bool {
        matches!(
            self,
            HandlerKind::TypeDef
                | HandlerKind::ObjectBlock
                | HandlerKind::MethodDef
                | HandlerKind::Block
                | HandlerKind::If
                | HandlerKind::Else
                | HandlerKind::For
                | HandlerKind::While
                | HandlerKind::DoWhile
                | HandlerKind::Try
                | HandlerKind::Catch
                | HandlerKind::Finally
                | HandlerKind::Switch
                | HandlerKind::Synchronized
                | HandlerKind::StaticInit
                | HandlerKind::ArrayInit
                | HandlerKind::AnnotationArrayInit
        )
    }

    /// Display name used in violation messages.
    ///
    /// A few handlers serve several token kinds and name themselves after
    /// the one they govern.
    pub fn construct_name(self, token: TokenKind) -> &'static str {
        match self {
            HandlerKind::Primordial => "primordial",
            HandlerKind::PackageDef => "package def",
            HandlerKind::Import => "import",
            HandlerKind::TypeDef => match token {
                TokenKind::ClassDef => "class def",
                TokenKind::EnumDef => "enum def",
                TokenKind::AnnotationDef => "annotation def",
                TokenKind::RecordDef => "record def",
                _ => "interface def",
            },
            HandlerKind::ObjectBlock => "object def",
            HandlerKind::MethodDef => match token {
                TokenKind::CtorDef => "ctor def",
                TokenKind::CompactCtorDef => "compact ctor def",
                TokenKind::AnnotationFieldDef => "annotation field def",
                _ => "method def",
            },
            HandlerKind::MemberDef => "member def",
            HandlerKind::Block => "block",
            HandlerKind::If => "if",
            HandlerKind::Else => "else",
            HandlerKind::For => "for",
            HandlerKind::While => "while",
            HandlerKind::DoWhile => "do..while",
            HandlerKind::Try => "try",
            HandlerKind::Catch => "catch",
            HandlerKind::Finally => "finally",
            HandlerKind::Switch => "switch",
            HandlerKind::Case => "case",
            HandlerKind::SwitchRule => "switch rule",
            HandlerKind::Yield => "yield",
            HandlerKind::Synchronized => "synchronized",
            HandlerKind::StaticInit => "static initialization",
            HandlerKind::ArrayInit => "array initialization",
            HandlerKind::AnnotationArrayInit => "annotation array initialization",
            HandlerKind::Lambda => "lambda",
            HandlerKind::MethodCall => "method call",
            HandlerKind::New => "new",
            HandlerKind::Label => "label",
            HandlerKind::Index => "index op",
        }
    }
}

/// Index into the per-tree handler arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub(crate) struct HandlerId(u32);

impl HandlerId {
    /// The primordial handler always occupies the first slot.
    pub(crate) const ROOT: HandlerId = HandlerId(0);

    #[inline]
    pub(crate) const fn new(index: u32) -> Self {
        HandlerId(index)
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HandlerId({})", self.0)
    }
}

/// One handler instance, bound to one node.
#[derive(Clone, Debug)]
pub(crate) struct Handler {
    pub(crate) kind: HandlerKind,
    pub(crate) node: NodeId,
    /// `None` only for the primordial handler.
    pub(crate) parent: Option<HandlerId>,
    pub(crate) name: &'static str,
    pub(crate) indent: IndentLevel,
    /// Cleared by a lambda whose own placement was reported, so its body
    /// is not also measured from the lambda's line.
    pub(crate) lambda_aligned: bool,
}
