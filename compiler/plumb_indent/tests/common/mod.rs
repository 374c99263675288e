//! Tree construction helpers shared by the integration tests.
//!
//! Helpers locate their tokens by searching forward through the source, so
//! they must be called in source order.

#![allow(dead_code, reason = "each test binary uses a different subset")]
#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use plumb_ast::{NodeId, SyntaxTree, TokenKind, TreeBuilder};
use plumb_indent::{IndentConfig, IndentationCheck, Violation};

pub struct Source {
    builder: TreeBuilder,
}

impl Source {
    pub fn new(text: &str) -> Self {
        Source {
            builder: TreeBuilder::with_source(text),
        }
    }

    pub fn tok(&mut self, kind: TokenKind, text: &str) -> NodeId {
        self.builder.token(kind, text).unwrap()
    }

    pub fn node(&mut self, kind: TokenKind, children: impl IntoIterator<Item = NodeId>) -> NodeId {
        self.builder.node(kind, children).unwrap()
    }

    pub fn adopt(&mut self, parent: NodeId, children: impl IntoIterator<Item = NodeId>) {
        self.builder.adopt(parent, children).unwrap();
    }

    pub fn empty(&mut self, kind: TokenKind) -> NodeId {
        self.node(kind, [])
    }

    /// `int name;`
    pub fn int_field(&mut self, name: &str) -> NodeId {
        let modifiers = self.empty(TokenKind::Modifiers);
        let int = self.tok(TokenKind::LiteralInt, "int");
        let ty = self.node(TokenKind::Type, [int]);
        let ident = self.tok(TokenKind::Ident, name);
        let semi = self.tok(TokenKind::Semi, ";");
        self.node(TokenKind::VariableDef, [modifiers, ty, ident, semi])
    }

    /// `class Name { members }` without modifiers.
    pub fn class(
        &mut self,
        name: &str,
        members: impl FnOnce(&mut Self) -> Vec<NodeId>,
    ) -> NodeId {
        let modifiers = self.empty(TokenKind::Modifiers);
        self.class_with(modifiers, name, members)
    }

    /// `class Name { members }` with prepared modifiers.
    pub fn class_with(
        &mut self,
        modifiers: NodeId,
        name: &str,
        members: impl FnOnce(&mut Self) -> Vec<NodeId>,
    ) -> NodeId {
        let keyword = self.tok(TokenKind::LiteralClass, "class");
        let ident = self.tok(TokenKind::Ident, name);
        let body = self.braces(TokenKind::Objblock, members);
        self.node(TokenKind::ClassDef, [modifiers, keyword, ident, body])
    }

    /// `{ children }` grouped under an imaginary node.
    pub fn braces(
        &mut self,
        kind: TokenKind,
        children: impl FnOnce(&mut Self) -> Vec<NodeId>,
    ) -> NodeId {
        let lcurly = self.tok(TokenKind::Lcurly, "{");
        let inner = children(self);
        let rcurly = self.tok(TokenKind::Rcurly, "}");
        let mut all = vec![lcurly];
        all.extend(inner);
        all.push(rcurly);
        self.node(kind, all)
    }

    /// `{ statements }` as a statement list.
    pub fn slist(&mut self, statements: impl FnOnce(&mut Self) -> Vec<NodeId>) -> NodeId {
        let slist = self.tok(TokenKind::Slist, "{");
        let mut inner = statements(self);
        inner.push(self.tok(TokenKind::Rcurly, "}"));
        self.adopt(slist, inner);
        slist
    }

    /// `void name() { statements }`
    pub fn void_method(
        &mut self,
        name: &str,
        statements: impl FnOnce(&mut Self) -> Vec<NodeId>,
    ) -> NodeId {
        self.method((TokenKind::LiteralVoid, "void"), name, statements)
    }

    /// `type name() { statements }` for a keyword return type.
    pub fn method(
        &mut self,
        (kind, keyword): (TokenKind, &str),
        name: &str,
        statements: impl FnOnce(&mut Self) -> Vec<NodeId>,
    ) -> NodeId {
        let modifiers = self.empty(TokenKind::Modifiers);
        let keyword = self.tok(kind, keyword);
        let ty = self.node(TokenKind::Type, [keyword]);
        let ident = self.tok(TokenKind::Ident, name);
        let lparen = self.tok(TokenKind::Lparen, "(");
        let parameters = self.empty(TokenKind::Parameters);
        let rparen = self.tok(TokenKind::Rparen, ")");
        let body = self.slist(statements);
        self.node(
            TokenKind::MethodDef,
            [modifiers, ty, ident, lparen, parameters, rparen, body],
        )
    }

    /// `name()` as a call expression.
    pub fn call(&mut self, name: &str) -> NodeId {
        let ident = self.tok(TokenKind::Ident, name);
        let call = self.tok(TokenKind::MethodCall, "(");
        let arguments = self.empty(TokenKind::Elist);
        let rparen = self.tok(TokenKind::Rparen, ")");
        self.adopt(call, [ident, arguments, rparen]);
        call
    }

    /// `name();` as the two statement-list children `EXPR` and `;`.
    pub fn call_statement(&mut self, name: &str) -> Vec<NodeId> {
        let call = self.call(name);
        let expr = self.node(TokenKind::Expr, [call]);
        let semi = self.tok(TokenKind::Semi, ";");
        vec![expr, semi]
    }

    /// `(name)` condition parts: `(`, `EXPR`, `)`.
    pub fn condition(&mut self, name: &str) -> Vec<NodeId> {
        let lparen = self.tok(TokenKind::Lparen, "(");
        let ident = self.tok(TokenKind::Ident, name);
        let expr = self.node(TokenKind::Expr, [ident]);
        let rparen = self.tok(TokenKind::Rparen, ")");
        vec![lparen, expr, rparen]
    }

    pub fn finish(self, top_level: impl IntoIterator<Item = NodeId>) -> SyntaxTree {
        self.builder.finish(top_level).unwrap()
    }
}

/// `class A { void f() { statements } }`
pub fn in_method(text: &str, statements: impl FnOnce(&mut Source) -> Vec<NodeId>) -> SyntaxTree {
    let mut s = Source::new(text);
    let class = s.class("A", |s| vec![s.void_method("f", statements)]);
    s.finish([class])
}

/// Source of a class whose only member is `int x;` at `column`.
pub fn class_with_field_at(column: usize) -> String {
    format!("class A {{\n{}int x;\n}}\n", " ".repeat(column))
}

pub fn field_class(text: &str) -> SyntaxTree {
    let mut s = Source::new(text);
    let class = s.class("A", |s| vec![s.int_field("x")]);
    s.finish([class])
}

pub fn check(tree: &SyntaxTree) -> Vec<Violation> {
    check_with(IndentConfig::default(), tree)
}

pub fn check_with(config: IndentConfig, tree: &SyntaxTree) -> Vec<Violation> {
    IndentationCheck::new(config).unwrap().check(tree).unwrap()
}

/// `(1-based line, actual column, message)` per violation.
pub fn summary(violations: &[Violation]) -> Vec<(u32, u32, String)> {
    violations
        .iter()
        .map(|v| (v.line() + 1, v.actual, v.message()))
        .collect()
}
