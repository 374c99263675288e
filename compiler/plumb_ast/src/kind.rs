//! Token kinds.
//!
//! The vocabulary mirrors the token types of the Java grammar the checker
//! was designed around: imaginary grouping nodes (`OBJBLOCK`, `SLIST`,
//! `MODIFIERS`, ...) sit next to real tokens (`LCURLY`, `IDENT`, `SEMI`).
//! Every kind has a stable upper-snake-case name used in messages and when
//! a node carries no text of its own.

use std::fmt;

macro_rules! token_kinds {
    ($( $(#[$meta:meta])* $variant:ident => $name:literal, )*) => {
        /// Kind tag of a syntax node.
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum TokenKind {
            $( $(#[$meta])* $variant, )*
        }

        impl TokenKind {
            /// Every kind, in declaration order.
            pub const ALL: &'static [TokenKind] = &[ $( TokenKind::$variant, )* ];

            /// Canonical upper-snake-case name, e.g. `CLASS_DEF`.
            pub const fn name(self) -> &'static str {
                match self {
                    $( TokenKind::$variant => $name, )*
                }
            }

            /// Inverse of [`TokenKind::name`].
            pub fn from_name(name: &str) -> Option<TokenKind> {
                match name {
                    $( $name => Some(TokenKind::$variant), )*
                    _ => None,
                }
            }
        }
    };
}

token_kinds! {
    /// Root of every tree.
    CompilationUnit => "COMPILATION_UNIT",
    PackageDef => "PACKAGE_DEF",
    Import => "IMPORT",
    StaticImport => "STATIC_IMPORT",

    // Type definitions
    ClassDef => "CLASS_DEF",
    InterfaceDef => "INTERFACE_DEF",
    EnumDef => "ENUM_DEF",
    AnnotationDef => "ANNOTATION_DEF",
    RecordDef => "RECORD_DEF",
    /// Body container of a type definition or anonymous class.
    Objblock => "OBJBLOCK",
    Modifiers => "MODIFIERS",
    Annotations => "ANNOTATIONS",
    Annotation => "ANNOTATION",
    AnnotationMemberValuePair => "ANNOTATION_MEMBER_VALUE_PAIR",
    AnnotationArrayInit => "ANNOTATION_ARRAY_INIT",
    AnnotationFieldDef => "ANNOTATION_FIELD_DEF",
    EnumConstantDef => "ENUM_CONSTANT_DEF",
    RecordComponents => "RECORD_COMPONENTS",
    RecordComponentDef => "RECORD_COMPONENT_DEF",
    ExtendsClause => "EXTENDS_CLAUSE",
    ImplementsClause => "IMPLEMENTS_CLAUSE",
    TypeParameters => "TYPE_PARAMETERS",
    TypeParameter => "TYPE_PARAMETER",
    TypeArguments => "TYPE_ARGUMENTS",
    TypeArgument => "TYPE_ARGUMENT",

    // Members
    MethodDef => "METHOD_DEF",
    CtorDef => "CTOR_DEF",
    CompactCtorDef => "COMPACT_CTOR_DEF",
    VariableDef => "VARIABLE_DEF",
    Parameters => "PARAMETERS",
    ParameterDef => "PARAMETER_DEF",
    Type => "TYPE",
    ArrayDeclarator => "ARRAY_DECLARATOR",
    LiteralThrows => "LITERAL_THROWS",
    InstanceInit => "INSTANCE_INIT",
    StaticInit => "STATIC_INIT",

    // Statements
    /// Statement list; the token itself is the opening `{` when present.
    Slist => "SLIST",
    LabeledStat => "LABELED_STAT",
    EmptyStat => "EMPTY_STAT",
    LiteralIf => "LITERAL_IF",
    LiteralElse => "LITERAL_ELSE",
    LiteralFor => "LITERAL_FOR",
    ForInit => "FOR_INIT",
    ForCondition => "FOR_CONDITION",
    ForIterator => "FOR_ITERATOR",
    ForEachClause => "FOR_EACH_CLAUSE",
    LiteralWhile => "LITERAL_WHILE",
    LiteralDo => "LITERAL_DO",
    /// The `while` keyword closing a do-while loop.
    DoWhile => "DO_WHILE",
    LiteralTry => "LITERAL_TRY",
    ResourceSpecification => "RESOURCE_SPECIFICATION",
    Resources => "RESOURCES",
    Resource => "RESOURCE",
    LiteralCatch => "LITERAL_CATCH",
    LiteralFinally => "LITERAL_FINALLY",
    LiteralSwitch => "LITERAL_SWITCH",
    CaseGroup => "CASE_GROUP",
    LiteralCase => "LITERAL_CASE",
    LiteralDefault => "LITERAL_DEFAULT",
    SwitchRule => "SWITCH_RULE",
    LiteralYield => "LITERAL_YIELD",
    LiteralSynchronized => "LITERAL_SYNCHRONIZED",
    LiteralReturn => "LITERAL_RETURN",
    LiteralBreak => "LITERAL_BREAK",
    LiteralContinue => "LITERAL_CONTINUE",
    LiteralThrow => "LITERAL_THROW",
    LiteralAssert => "LITERAL_ASSERT",

    // Expressions
    Expr => "EXPR",
    Elist => "ELIST",
    /// Method call; the token itself is the opening `(`.
    MethodCall => "METHOD_CALL",
    CtorCall => "CTOR_CALL",
    SuperCtorCall => "SUPER_CTOR_CALL",
    LiteralNew => "LITERAL_NEW",
    ArrayInit => "ARRAY_INIT",
    IndexOp => "INDEX_OP",
    Lambda => "LAMBDA",
    MethodRef => "METHOD_REF",
    Typecast => "TYPECAST",
    Assign => "ASSIGN",
    PlusAssign => "PLUS_ASSIGN",
    Plus => "PLUS",
    Minus => "MINUS",
    Star => "STAR",
    Div => "DIV",
    Equal => "EQUAL",
    NotEqual => "NOT_EQUAL",
    Lt => "LT",
    Gt => "GT",
    Le => "LE",
    Ge => "GE",
    Land => "LAND",
    Lor => "LOR",
    Lnot => "LNOT",
    Question => "QUESTION",
    Inc => "INC",
    Dec => "DEC",
    PostInc => "POST_INC",
    PostDec => "POST_DEC",

    // Keywords
    LiteralClass => "LITERAL_CLASS",
    LiteralInterface => "LITERAL_INTERFACE",
    /// The `enum` keyword.
    Enum => "ENUM",
    LiteralRecord => "LITERAL_RECORD",
    LiteralPublic => "LITERAL_PUBLIC",
    LiteralProtected => "LITERAL_PROTECTED",
    LiteralPrivate => "LITERAL_PRIVATE",
    LiteralStatic => "LITERAL_STATIC",
    Abstract => "ABSTRACT",
    Final => "FINAL",
    LiteralVoid => "LITERAL_VOID",
    LiteralInt => "LITERAL_INT",
    LiteralLong => "LITERAL_LONG",
    LiteralBoolean => "LITERAL_BOOLEAN",
    LiteralChar => "LITERAL_CHAR",
    LiteralDouble => "LITERAL_DOUBLE",
    LiteralThis => "LITERAL_THIS",
    LiteralSuper => "LITERAL_SUPER",
    LiteralNull => "LITERAL_NULL",
    LiteralTrue => "LITERAL_TRUE",
    LiteralFalse => "LITERAL_FALSE",

    // Atoms and punctuation
    Ident => "IDENT",
    NumInt => "NUM_INT",
    NumLong => "NUM_LONG",
    NumDouble => "NUM_DOUBLE",
    StringLiteral => "STRING_LITERAL",
    CharLiteral => "CHAR_LITERAL",
    Dot => "DOT",
    Comma => "COMMA",
    Semi => "SEMI",
    Colon => "COLON",
    Lparen => "LPAREN",
    Rparen => "RPAREN",
    Lcurly => "LCURLY",
    Rcurly => "RCURLY",
    Rbrack => "RBRACK",
    At => "AT",
    Ellipsis => "ELLIPSIS",
    GenericStart => "GENERIC_START",
    GenericEnd => "GENERIC_END",

    // Comments
    SingleLineComment => "SINGLE_LINE_COMMENT",
    BlockCommentBegin => "BLOCK_COMMENT_BEGIN",
    BlockCommentEnd => "BLOCK_COMMENT_END",
    CommentContent => "COMMENT_CONTENT",
}

impl TokenKind {
    /// Comment nodes never anchor a position.
    pub const fn is_comment(self) -> bool {
        matches!(
            self,
            TokenKind::SingleLineComment
                | TokenKind::BlockCommentBegin
                | TokenKind::BlockCommentEnd
                | TokenKind::CommentContent
        )
    }

    /// Kinds that introduce a type definition.
    pub const fn is_type_def(self) -> bool {
        matches!(
            self,
            TokenKind::ClassDef
                | TokenKind::InterfaceDef
                | TokenKind::EnumDef
                | TokenKind::AnnotationDef
                | TokenKind::RecordDef
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
