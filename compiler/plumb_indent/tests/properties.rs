//! Property tests over levels and generated sources.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]

mod common;

use common::{check, class_with_field_at, field_class, Source};
use plumb_ast::SyntaxTree;
use plumb_indent::{check_batch, IndentConfig, IndentLevel, IndentationCheck};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

proptest! {
    #[test]
    fn offset_level_accepts_exactly_the_shifted_columns(
        base in prop::collection::vec(0u32..64, 1..4),
        k in 0i64..32,
        column in 0u32..128,
    ) {
        let level = base[1..]
            .iter()
            .fold(IndentLevel::new(base[0]), |level, &c| level.with_column(c));
        let shifted = level.offset(k);
        let expected =
            i64::from(column) >= k && level.is_acceptable((i64::from(column) - k) as u32);
        prop_assert_eq!(shifted.is_acceptable(column), expected);
    }

    #[test]
    fn only_the_basic_offset_is_accepted_for_a_field(column in 0usize..16) {
        let tree = field_class(&class_with_field_at(column));
        let violations = check(&tree);
        if column == 4 {
            prop_assert!(violations.is_empty());
        } else {
            prop_assert_eq!(violations.len(), 1);
            prop_assert_eq!(violations[0].actual, column as u32);
            prop_assert_eq!(&violations[0].expected, &IndentLevel::new(4));
        }
    }

    #[test]
    fn checking_is_idempotent(
        columns in prop::collection::vec(0usize..12, 1..8),
        basic_offset in 1u32..9,
    ) {
        let tree = fields_class(&columns);
        let config = IndentConfig::new().with_basic_offset(basic_offset);
        let check = IndentationCheck::new(config).unwrap();
        let first = check.check(&tree).unwrap();

        let misplaced = columns.iter().filter(|&&c| c != basic_offset as usize).count();
        prop_assert_eq!(first.len(), misplaced);
        prop_assert!(first.windows(2).all(|pair| pair[0].position < pair[1].position));

        let second = check.check(&tree).unwrap();
        prop_assert_eq!(first, second);
    }
}

/// `class A { int f0; int f1; .. }` with field `i` at `columns[i]`.
fn fields_class(columns: &[usize]) -> SyntaxTree {
    let mut text = String::from("class A {\n");
    for (i, column) in columns.iter().enumerate() {
        text.push_str(&format!("{}int f{i};\n", " ".repeat(*column)));
    }
    text.push_str("}\n");
    let mut s = Source::new(&text);
    let class = s.class("A", |s| {
        (0..columns.len())
            .map(|i| s.int_field(&format!("f{i}")))
            .collect()
    });
    s.finish([class])
}

#[test]
fn batch_results_follow_input_order() {
    let trees: Vec<_> = [4, 2, 6, 4]
        .into_iter()
        .map(|column| field_class(&class_with_field_at(column)))
        .collect();
    let results = check_batch(&IndentationCheck::default(), &trees);
    let actual: Vec<Vec<u32>> = results
        .into_iter()
        .map(|result| result.unwrap().iter().map(|v| v.actual).collect())
        .collect();
    assert_eq!(actual, vec![vec![], vec![2], vec![6], vec![]]);
}
