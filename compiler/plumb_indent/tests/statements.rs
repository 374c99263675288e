//! Method bodies, conditionals, loops, exception handling and `switch`.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]

mod common;

use common::{check, check_with, in_method, summary, Source};
use plumb_ast::{NodeId, SyntaxTree, TokenKind};
use plumb_indent::{HandlerKind, IndentConfig, IndentLevel, ViolationKind};
use pretty_assertions::assert_eq;

fn local_and_call(text: &str) -> SyntaxTree {
    in_method(text, |s| {
        let modifiers = s.empty(TokenKind::Modifiers);
        let int = s.tok(TokenKind::LiteralInt, "int");
        let ty = s.node(TokenKind::Type, [int]);
        let x = s.tok(TokenKind::Ident, "x");
        let assign = s.tok(TokenKind::Assign, "=");
        let one = s.tok(TokenKind::NumInt, "1");
        let value = s.node(TokenKind::Expr, [one]);
        s.adopt(assign, [value]);
        let local = s.node(TokenKind::VariableDef, [modifiers, ty, x, assign]);
        let semi = s.tok(TokenKind::Semi, ";");
        let mut statements = vec![local, semi];
        statements.extend(s.call_statement("g"));
        statements
    })
}

#[test]
fn method_body_at_two_levels_is_clean() {
    let tree = local_and_call(
        "class A {\n    void f() {\n        int x = 1;\n        g();\n    }\n}\n",
    );
    assert_eq!(check(&tree), vec![]);
}

#[test]
fn misplaced_statement_is_a_child_error() {
    let tree = local_and_call(
        "class A {\n    void f() {\n        int x = 1;\n      g();\n    }\n}\n",
    );
    let violations = check(&tree);
    // the method and the call both see line 4; only one report per line
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].kind, ViolationKind::ChildError);
    assert_eq!(violations[0].message_key(), "indentation.child.error");
    assert_eq!(
        violations[0].message(),
        "'method def' child has incorrect indentation level 6, expected level should be 8."
    );
}

#[test]
fn misplaced_closing_curly() {
    let tree = local_and_call(
        "class A {\n    void f() {\n        int x = 1;\n        g();\n  }\n}\n",
    );
    assert_eq!(
        summary(&check(&tree)),
        vec![(
            5,
            2,
            "'method def rcurly' has incorrect indentation level 2, expected level should be 4."
                .to_owned()
        )]
    );
}

fn if_else(text: &str) -> SyntaxTree {
    in_method(text, |s| {
        let keyword = s.tok(TokenKind::LiteralIf, "if");
        let condition = s.condition("c");
        let then = s.slist(|s| s.call_statement("x"));
        let else_keyword = s.tok(TokenKind::LiteralElse, "else");
        let otherwise = s.slist(|s| s.call_statement("y"));
        s.adopt(else_keyword, [otherwise]);
        let mut children = condition;
        children.push(then);
        children.push(else_keyword);
        s.adopt(keyword, children);
        vec![keyword]
    })
}

#[test]
fn if_else_is_clean() {
    let tree = if_else(concat!(
        "class A {\n",
        "    void f() {\n",
        "        if (c) {\n",
        "            x();\n",
        "        } else {\n",
        "            y();\n",
        "        }\n",
        "    }\n",
        "}\n",
    ));
    assert_eq!(check(&tree), vec![]);
}

#[test]
fn else_body_is_measured_from_the_if() {
    let tree = if_else(concat!(
        "class A {\n",
        "    void f() {\n",
        "        if (c) {\n",
        "            x();\n",
        "        } else {\n",
        "          y();\n",
        "        }\n",
        "    }\n",
        "}\n",
    ));
    assert_eq!(
        summary(&check(&tree)),
        vec![(
            6,
            10,
            "'else' child has incorrect indentation level 10, expected level should be 12."
                .to_owned()
        )]
    );
}

fn switch_statement(text: &str) -> SyntaxTree {
    in_method(text, |s| {
        let keyword = s.tok(TokenKind::LiteralSwitch, "switch");
        let mut children = s.condition("k");
        children.push(s.tok(TokenKind::Lcurly, "{"));

        let case = s.tok(TokenKind::LiteralCase, "case");
        let one = s.tok(TokenKind::NumInt, "1");
        let label = s.node(TokenKind::Expr, [one]);
        let colon = s.tok(TokenKind::Colon, ":");
        s.adopt(case, [label, colon]);
        let mut statements = s.call_statement("g");
        let brk = s.tok(TokenKind::LiteralBreak, "break");
        let semi = s.tok(TokenKind::Semi, ";");
        s.adopt(brk, [semi]);
        statements.push(brk);
        let body = s.node(TokenKind::Slist, statements);
        children.push(s.node(TokenKind::CaseGroup, [case, body]));

        children.push(s.tok(TokenKind::Rcurly, "}"));
        s.adopt(keyword, children);
        vec![keyword]
    })
}

#[test]
fn switch_case_levels_are_clean() {
    let tree = switch_statement(concat!(
        "class A {\n",
        "    void f() {\n",
        "        switch (k) {\n",
        "            case 1:\n",
        "                g();\n",
        "                break;\n",
        "        }\n",
        "    }\n",
        "}\n",
    ));
    assert_eq!(check(&tree), vec![]);
}

#[test]
fn case_label_at_switch_level() {
    let tree = switch_statement(concat!(
        "class A {\n",
        "    void f() {\n",
        "        switch (k) {\n",
        "        case 1:\n",
        "            g();\n",
        "            break;\n",
        "        }\n",
        "    }\n",
        "}\n",
    ));
    let violations = check(&tree);
    assert_eq!(violations.len(), 3);
    assert_eq!(violations[0].line(), 3);
    assert_eq!(violations[0].subject, "case");
    assert_eq!(violations[0].expected, IndentLevel::new(12));
    assert!(violations[1..]
        .iter()
        .all(|v| v.expected == IndentLevel::new(16) && v.actual == 12));
}

/// `while (c) { x(); }` as the statements of a method.
fn while_loop(s: &mut Source) -> Vec<NodeId> {
    let keyword = s.tok(TokenKind::LiteralWhile, "while");
    let mut children = s.condition("c");
    children.push(s.slist(|s| s.call_statement("x")));
    s.adopt(keyword, children);
    vec![keyword]
}

#[test]
fn while_body_is_clean() {
    let tree = in_method(
        "class A {\n    void f() {\n        while (c) {\n            x();\n        }\n    }\n}\n",
        while_loop,
    );
    assert_eq!(check(&tree), vec![]);
}

#[test]
fn shallow_while_body() {
    let tree = in_method(
        "class A {\n    void f() {\n        while (c) {\n          x();\n        }\n    }\n}\n",
        while_loop,
    );
    assert_eq!(
        summary(&check(&tree)),
        vec![(
            4,
            10,
            "'while' child has incorrect indentation level 10, expected level should be 12."
                .to_owned()
        )]
    );
}

fn do_while(text: &str) -> SyntaxTree {
    in_method(text, |s| {
        let keyword = s.tok(TokenKind::LiteralDo, "do");
        let body = s.slist(|s| s.call_statement("x"));
        let closing = s.tok(TokenKind::DoWhile, "while");
        let mut children = vec![body, closing];
        children.extend(s.condition("c"));
        children.push(s.tok(TokenKind::Semi, ";"));
        s.adopt(keyword, children);
        vec![keyword]
    })
}

#[test]
fn do_while_is_clean() {
    let tree = do_while(concat!(
        "class A {\n",
        "    void f() {\n",
        "        do {\n",
        "            x();\n",
        "        } while (c);\n",
        "    }\n",
        "}\n",
    ));
    assert_eq!(check(&tree), vec![]);
}

#[test]
fn do_while_closing_curly() {
    let tree = do_while(concat!(
        "class A {\n",
        "    void f() {\n",
        "        do {\n",
        "            x();\n",
        "      } while (c);\n",
        "    }\n",
        "}\n",
    ));
    assert_eq!(
        summary(&check(&tree)),
        vec![(
            5,
            6,
            "'do..while rcurly' has incorrect indentation level 6, expected level should be 8."
                .to_owned()
        )]
    );
}

#[test]
fn closing_while_on_its_own_line_lines_up_with_do() {
    let tree = do_while(concat!(
        "class A {\n",
        "    void f() {\n",
        "        do {\n",
        "            x();\n",
        "        }\n",
        "          while (c);\n",
        "    }\n",
        "}\n",
    ));
    let violations = check(&tree);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].line(), 5);
    assert_eq!(violations[0].subject, "do..while while");
    assert_eq!(violations[0].actual, 10);
    assert_eq!(violations[0].expected, IndentLevel::new(8));
}

/// `for (String s : items) { x(); }`
fn for_each(s: &mut Source) -> Vec<NodeId> {
    let keyword = s.tok(TokenKind::LiteralFor, "for");
    let lparen = s.tok(TokenKind::Lparen, "(");
    let modifiers = s.empty(TokenKind::Modifiers);
    let string = s.tok(TokenKind::Ident, "String");
    let ty = s.node(TokenKind::Type, [string]);
    let name = s.tok(TokenKind::Ident, "s");
    let variable = s.node(TokenKind::VariableDef, [modifiers, ty, name]);
    let colon = s.tok(TokenKind::Colon, ":");
    let items = s.tok(TokenKind::Ident, "items");
    let iterable = s.node(TokenKind::Expr, [items]);
    let clause = s.node(TokenKind::ForEachClause, [variable, colon, iterable]);
    let rparen = s.tok(TokenKind::Rparen, ")");
    let body = s.slist(|s| s.call_statement("x"));
    s.adopt(keyword, [lparen, clause, rparen, body]);
    vec![keyword]
}

#[test]
fn for_each_is_clean() {
    let tree = in_method(
        concat!(
            "class A {\n",
            "    void f() {\n",
            "        for (String s : items) {\n",
            "            x();\n",
            "        }\n",
            "    }\n",
            "}\n",
        ),
        for_each,
    );
    assert_eq!(check(&tree), vec![]);
}

#[test]
fn deep_for_body() {
    let tree = in_method(
        concat!(
            "class A {\n",
            "    void f() {\n",
            "        for (String s : items) {\n",
            "              x();\n",
            "        }\n",
            "    }\n",
            "}\n",
        ),
        for_each,
    );
    let violations = check(&tree);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].kind, ViolationKind::ChildError);
    assert_eq!(
        violations[0].message(),
        "'for' child has incorrect indentation level 14, expected level should be 12."
    );
}

/// `try { x(); } catch (E e) { y(); } finally { z(); }`
fn try_catch_finally(s: &mut Source) -> Vec<NodeId> {
    let keyword = s.tok(TokenKind::LiteralTry, "try");
    let body = s.slist(|s| s.call_statement("x"));

    let catch = s.tok(TokenKind::LiteralCatch, "catch");
    let lparen = s.tok(TokenKind::Lparen, "(");
    let modifiers = s.empty(TokenKind::Modifiers);
    let exception = s.tok(TokenKind::Ident, "E");
    let ty = s.node(TokenKind::Type, [exception]);
    let name = s.tok(TokenKind::Ident, "e");
    let parameter = s.node(TokenKind::ParameterDef, [modifiers, ty, name]);
    let rparen = s.tok(TokenKind::Rparen, ")");
    let handler = s.slist(|s| s.call_statement("y"));
    s.adopt(catch, [lparen, parameter, rparen, handler]);

    let finally = s.tok(TokenKind::LiteralFinally, "finally");
    let cleanup = s.slist(|s| s.call_statement("z"));
    s.adopt(finally, [cleanup]);

    s.adopt(keyword, [body, catch, finally]);
    vec![keyword]
}

#[test]
fn try_catch_finally_is_clean() {
    let tree = in_method(
        concat!(
            "class A {\n",
            "    void f() {\n",
            "        try {\n",
            "            x();\n",
            "        } catch (E e) {\n",
            "            y();\n",
            "        } finally {\n",
            "            z();\n",
            "        }\n",
            "    }\n",
            "}\n",
        ),
        try_catch_finally,
    );
    assert_eq!(check(&tree), vec![]);
}

#[test]
fn catch_and_finally_are_measured_from_the_try() {
    let tree = in_method(
        concat!(
            "class A {\n",
            "    void f() {\n",
            "        try {\n",
            "            x();\n",
            "        } catch (E e) {\n",
            "              y();\n",
            "        } finally {\n",
            "            z();\n",
            "          }\n",
            "    }\n",
            "}\n",
        ),
        try_catch_finally,
    );
    assert_eq!(
        summary(&check(&tree)),
        vec![
            (
                6,
                14,
                "'catch' child has incorrect indentation level 14, expected level should be 12."
                    .to_owned()
            ),
            (
                9,
                10,
                "'finally rcurly' has incorrect indentation level 10, expected level should be 8."
                    .to_owned()
            ),
        ]
    );
}

/// `try (a; b) { x(); }`
fn try_with_resources(s: &mut Source) -> Vec<NodeId> {
    let keyword = s.tok(TokenKind::LiteralTry, "try");
    let lparen = s.tok(TokenKind::Lparen, "(");
    let a = s.tok(TokenKind::Ident, "a");
    let first = s.node(TokenKind::Resource, [a]);
    let semi = s.tok(TokenKind::Semi, ";");
    let b = s.tok(TokenKind::Ident, "b");
    let second = s.node(TokenKind::Resource, [b]);
    let resources = s.node(TokenKind::Resources, [first, semi, second]);
    let rparen = s.tok(TokenKind::Rparen, ")");
    let header = s.node(TokenKind::ResourceSpecification, [lparen, resources, rparen]);
    let body = s.slist(|s| s.call_statement("x"));
    s.adopt(keyword, [header, body]);
    vec![keyword]
}

fn resources_at(column: usize) -> SyntaxTree {
    let head = concat!("class A {\n", "    void f() {\n", "        try (a;\n");
    let tail = concat!("b) {\n", "            x();\n", "        }\n", "    }\n", "}\n");
    in_method(&[head, &" ".repeat(column), tail].concat(), try_with_resources)
}

#[test]
fn wrapped_resource_at_continuation_offset_is_clean() {
    assert_eq!(check(&resources_at(12)), vec![]);
}

#[test]
fn shallow_resource() {
    assert_eq!(
        summary(&check(&resources_at(10))),
        vec![(
            4,
            10,
            "'try resource' has incorrect indentation level 10, expected level should be 12."
                .to_owned()
        )]
    );
}

#[test]
fn strict_resources_must_sit_at_the_continuation_offset() {
    let deep = resources_at(16);
    assert_eq!(check(&deep), vec![]);

    let strict = IndentConfig::new().with_strict_for(HandlerKind::Try, true);
    let violations = check_with(strict, &deep);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].subject, "try resource");
    assert_eq!(violations[0].actual, 16);
    assert_eq!(violations[0].expected, IndentLevel::new(12));
}

/// `synchronized (lock) { x(); }`
fn synchronized_block(s: &mut Source) -> Vec<NodeId> {
    let keyword = s.tok(TokenKind::LiteralSynchronized, "synchronized");
    let mut children = s.condition("lock");
    children.push(s.slist(|s| s.call_statement("x")));
    s.adopt(keyword, children);
    vec![keyword]
}

#[test]
fn synchronized_is_clean() {
    let tree = in_method(
        concat!(
            "class A {\n",
            "    void f() {\n",
            "        synchronized (lock) {\n",
            "            x();\n",
            "        }\n",
            "    }\n",
            "}\n",
        ),
        synchronized_block,
    );
    assert_eq!(check(&tree), vec![]);
}

#[test]
fn wrapped_synchronized_lock() {
    let tree = in_method(
        concat!(
            "class A {\n",
            "    void f() {\n",
            "        synchronized (\n",
            "          lock) {\n",
            "            x();\n",
            "        }\n",
            "    }\n",
            "}\n",
        ),
        synchronized_block,
    );
    let violations = check(&tree);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].kind, ViolationKind::ChildError);
    assert_eq!(
        violations[0].message(),
        "'synchronized' child has incorrect indentation level 10, expected level should be 12."
    );
}

fn labeled_loop_at(column: usize) -> SyntaxTree {
    let tail = concat!(
        "outer:\n",
        "        while (c) {\n",
        "            x();\n",
        "        }\n",
        "    }\n",
        "}\n",
    );
    let text = ["class A {\n    void f() {\n", &" ".repeat(column), tail].concat();
    in_method(&text, |s| {
        let name = s.tok(TokenKind::Ident, "outer");
        let label = s.tok(TokenKind::LabeledStat, ":");
        let statement = while_loop(s);
        s.adopt(label, [name].into_iter().chain(statement));
        vec![label]
    })
}

#[test]
fn label_at_statement_level_or_one_step_out() {
    assert_eq!(check(&labeled_loop_at(8)), vec![]);
    assert_eq!(check(&labeled_loop_at(4)), vec![]);
}

#[test]
fn misplaced_label() {
    let violations = check(&labeled_loop_at(6));
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].message_key(), "indentation.child.error.multi");
    assert_eq!(
        violations[0].message(),
        "'label' child has incorrect indentation level 6, \
         expected level should be one of the following: 4, 8."
    );
}

fn switch_rules(text: &str) -> SyntaxTree {
    in_method(text, |s| {
        let keyword = s.tok(TokenKind::LiteralSwitch, "switch");
        let mut children = s.condition("k");
        children.push(s.tok(TokenKind::Lcurly, "{"));

        let case = s.tok(TokenKind::LiteralCase, "case");
        let one = s.tok(TokenKind::NumInt, "1");
        let label = s.node(TokenKind::Expr, [one]);
        s.adopt(case, [label]);
        let arrow = s.tok(TokenKind::Lambda, "->");
        let mut rule = vec![case, arrow];
        rule.extend(s.call_statement("x"));
        children.push(s.node(TokenKind::SwitchRule, rule));

        let default = s.tok(TokenKind::LiteralDefault, "default");
        let arrow = s.tok(TokenKind::Lambda, "->");
        let body = s.slist(|s| s.call_statement("y"));
        children.push(s.node(TokenKind::SwitchRule, [default, arrow, body]));

        children.push(s.tok(TokenKind::Rcurly, "}"));
        s.adopt(keyword, children);
        vec![keyword]
    })
}

#[test]
fn switch_rules_are_clean() {
    let tree = switch_rules(concat!(
        "class A {\n",
        "    void f() {\n",
        "        switch (k) {\n",
        "            case 1 -> x();\n",
        "            default -> {\n",
        "                y();\n",
        "            }\n",
        "        }\n",
        "    }\n",
        "}\n",
    ));
    assert_eq!(check(&tree), vec![]);
}

#[test]
fn wrapped_arrow_takes_the_continuation_offset() {
    let wrapped = |arrow_column: usize| {
        let head = concat!(
            "class A {\n",
            "    void f() {\n",
            "        switch (k) {\n",
            "            case 1\n",
        );
        let tail = concat!(
            "-> x();\n",
            "            default -> {\n",
            "                y();\n",
            "            }\n",
            "        }\n",
            "    }\n",
            "}\n",
        );
        switch_rules(&[head, &" ".repeat(arrow_column), tail].concat())
    };
    assert_eq!(check(&wrapped(16)), vec![]);
    assert_eq!(
        summary(&check(&wrapped(12))),
        vec![(
            5,
            12,
            "'lambda' has incorrect indentation level 12, expected level should be 16.".to_owned()
        )]
    );
}

#[test]
fn rule_body_is_measured_from_its_label() {
    let tree = switch_rules(concat!(
        "class A {\n",
        "    void f() {\n",
        "        switch (k) {\n",
        "            case 1 -> x();\n",
        "            default -> {\n",
        "              y();\n",
        "            }\n",
        "        }\n",
        "    }\n",
        "}\n",
    ));
    let violations = check(&tree);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].line(), 5);
    assert_eq!(violations[0].subject, "block");
    assert_eq!(violations[0].expected, IndentLevel::new(16));
}

/// `int f() { return switch (k) { default -> { yield 1; } }; }`
fn yielding_switch(text: &str) -> SyntaxTree {
    let mut s = Source::new(text);
    let class = s.class("A", |s| {
        vec![s.method((TokenKind::LiteralInt, "int"), "f", |s| {
            let ret = s.tok(TokenKind::LiteralReturn, "return");
            let keyword = s.tok(TokenKind::LiteralSwitch, "switch");
            let mut children = s.condition("k");
            children.push(s.tok(TokenKind::Lcurly, "{"));
            let default = s.tok(TokenKind::LiteralDefault, "default");
            let arrow = s.tok(TokenKind::Lambda, "->");
            let body = s.slist(|s| {
                let keyword = s.tok(TokenKind::LiteralYield, "yield");
                let one = s.tok(TokenKind::NumInt, "1");
                let value = s.node(TokenKind::Expr, [one]);
                let semi = s.tok(TokenKind::Semi, ";");
                s.adopt(keyword, [value, semi]);
                vec![keyword]
            });
            children.push(s.node(TokenKind::SwitchRule, [default, arrow, body]));
            children.push(s.tok(TokenKind::Rcurly, "}"));
            s.adopt(keyword, children);
            let value = s.node(TokenKind::Expr, [keyword]);
            let semi = s.tok(TokenKind::Semi, ";");
            s.adopt(ret, [value, semi]);
            vec![ret]
        })]
    });
    s.finish([class])
}

#[test]
fn yield_in_switch_expression_is_clean() {
    let tree = yielding_switch(concat!(
        "class A {\n",
        "    int f() {\n",
        "        return switch (k) {\n",
        "            default -> {\n",
        "                yield 1;\n",
        "            }\n",
        "        };\n",
        "    }\n",
        "}\n",
    ));
    assert_eq!(check(&tree), vec![]);
}

#[test]
fn shallow_yield() {
    let tree = yielding_switch(concat!(
        "class A {\n",
        "    int f() {\n",
        "        return switch (k) {\n",
        "            default -> {\n",
        "              yield 1;\n",
        "            }\n",
        "        };\n",
        "    }\n",
        "}\n",
    ));
    assert_eq!(
        summary(&check(&tree)),
        vec![(
            5,
            14,
            "'yield' has incorrect indentation level 14, expected level should be 16.".to_owned()
        )]
    );
}
