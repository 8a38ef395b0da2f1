use crate::inline::{InlineExpression, InlineExpressionError, evaluate};
use proptest::prelude::*;

fn expand(source: &str) -> Vec<String> {
    evaluate(Some(source)).expect("inline expression should parse")
}

fn reject(source: &str) -> InlineExpressionError {
    evaluate(Some(source)).expect_err("inline expression should be rejected")
}

//
// Literal segments
//

#[test]
fn evaluate_none_and_empty_yield_no_names() {
    assert!(evaluate(None).expect("none should evaluate").is_empty());
    assert!(expand("").is_empty());
    assert!(expand("   ").is_empty());
}

#[test]
fn evaluate_plain_segments_are_trimmed_and_ordered() {
    assert_eq!(expand(" t_order_0, t_order_1 "), ["t_order_0", "t_order_1"]);
}

#[test]
fn evaluate_skips_empty_segments() {
    assert_eq!(expand("a,,b,"), ["a", "b"]);
}

#[test]
fn evaluate_dollar_without_brace_is_literal() {
    assert_eq!(expand("t_$order"), ["t_$order"]);
}

#[test]
fn evaluate_long_literal_list_keeps_every_segment() {
    let source = (0..1024)
        .map(|i| format!("ds_{}.t_user_{i}", i / 64))
        .collect::<Vec<_>>()
        .join(",");
    let names = expand(&source);

    assert_eq!(names.len(), 1024);
    assert_eq!(names[0], "ds_0.t_user_0");
    assert_eq!(names[1023], "ds_15.t_user_1023");
}

//
// Placeholders
//

#[test]
fn evaluate_null_placeholder_contributes_empty_text() {
    assert_eq!(expand("t_order_${null}"), ["t_order_"]);
    assert_eq!(expand("t_order_${}"), ["t_order_"]);
    assert_eq!(expand("t_order_${ null }"), ["t_order_"]);
}

#[test]
fn evaluate_string_literal_placeholder() {
    assert_eq!(expand("t_order_${'xx'}"), ["t_order_xx"]);
    assert_eq!(expand("t_order_${\"yy\"}"), ["t_order_yy"]);
}

#[test]
fn evaluate_list_placeholders_across_segments() {
    assert_eq!(
        expand("t_order_${[0, 1, 2]},t_order_item_${[0, 2]}"),
        [
            "t_order_0",
            "t_order_1",
            "t_order_2",
            "t_order_item_0",
            "t_order_item_2"
        ]
    );
}

#[test]
fn evaluate_range_placeholders_across_segments() {
    assert_eq!(
        expand("t_order_${0..2},t_order_item_${0..1}"),
        [
            "t_order_0",
            "t_order_1",
            "t_order_2",
            "t_order_item_0",
            "t_order_item_1"
        ]
    );
}

#[test]
fn evaluate_cross_join_uses_leftmost_placeholder_as_outer_loop() {
    assert_eq!(
        expand("t_${['new','old']}_order_${1..2}, t_config"),
        [
            "t_new_order_1",
            "t_new_order_2",
            "t_old_order_1",
            "t_old_order_2",
            "t_config"
        ]
    );
}

#[test]
fn evaluate_nested_placeholder_inside_string_literal() {
    let expected = [
        "t_new3_order_1",
        "t_new3_order_2",
        "t_old_order_1",
        "t_old_order_2",
    ];

    assert_eq!(expand("t_${[\"new${1+2}\",'old']}_order_${1..2}"), expected);
    assert_eq!(expand("t_$->{[\"new$->{1+2}\",'old']}_order_$->{1..2}"), expected);
}

#[test]
fn evaluate_nested_placeholder_in_list_entry() {
    assert_eq!(
        expand("t_order_${['new${1+2}','old']}"),
        ["t_order_new3", "t_order_old"]
    );
}

#[test]
fn evaluate_multi_valued_string_and_list_entries_flatten_in_order() {
    assert_eq!(expand("t_${['a${0..1}', 5, 7..8]}"), ["t_a0", "t_a1", "t_5", "t_7", "t_8"]);
}

#[test]
fn evaluate_data_node_expression() {
    assert_eq!(
        expand("ds_${0..1}.t_order_${0..1}"),
        [
            "ds_0.t_order_0",
            "ds_0.t_order_1",
            "ds_1.t_order_0",
            "ds_1.t_order_1"
        ]
    );
}

#[test]
fn evaluate_commas_inside_placeholders_do_not_split_segments() {
    assert_eq!(expand("a_${[',', 'b']}"), ["a_,", "a_b"]);
}

#[test]
fn evaluate_string_escapes() {
    assert_eq!(expand(r"t_${'it\'s'}"), ["t_it's"]);
    assert_eq!(expand(r"t_${'\${1}'}"), ["t_${1}"]);
}

#[test]
fn evaluate_empty_list_yields_no_names_for_that_segment() {
    assert_eq!(expand("t_${[]}, t_config"), ["t_config"]);
}

//
// Arithmetic and ranges
//

#[test]
fn evaluate_arithmetic_follows_standard_precedence() {
    assert_eq!(expand("t_${1 + 2 * 3}"), ["t_7"]);
    assert_eq!(expand("t_${(1 + 2) * 3}"), ["t_9"]);
    assert_eq!(expand("t_${10 - 4 - 3}"), ["t_3"]);
    assert_eq!(expand("t_${7 / 2}_${7 % 2}"), ["t_3_1"]);
    assert_eq!(expand("t_${-2 + 5}"), ["t_3"]);
}

#[test]
fn evaluate_range_bounds_accept_arithmetic() {
    assert_eq!(expand("t_${0..1+1}"), ["t_0", "t_1", "t_2"]);
}

#[test]
fn evaluate_half_open_range_excludes_upper_bound() {
    assert_eq!(expand("t_${0..<3}"), ["t_0", "t_1", "t_2"]);
    assert!(expand("t_${2..<2}").is_empty());
}

#[test]
fn evaluate_single_value_range() {
    assert_eq!(expand("t_${4..4}"), ["t_4"]);
}

//
// Rejections
//

#[test]
fn evaluate_rejects_descending_range() {
    assert!(matches!(
        reject("t_${3..1}"),
        InlineExpressionError::InvalidRange { lo: 3, hi: 1, .. }
    ));
}

#[test]
fn evaluate_rejects_ranges_past_the_expansion_limit() {
    assert!(matches!(
        reject("t_${0..9223372036854775806}"),
        InlineExpressionError::RangeTooLarge { lo: 0, offset: 4, .. }
    ));
    assert!(matches!(
        reject("t_${0..65536}"),
        InlineExpressionError::RangeTooLarge { limit: 65536, .. }
    ));
    assert_eq!(expand("t_${0..<65536}").len(), 65536);
}

#[test]
fn evaluate_rejects_unterminated_placeholder() {
    assert_eq!(
        reject("t_${0..1"),
        InlineExpressionError::UnterminatedPlaceholder { offset: 2 }
    );
}

#[test]
fn evaluate_rejects_unterminated_string() {
    assert_eq!(
        reject("t_${'abc}"),
        InlineExpressionError::UnterminatedString { offset: 4 }
    );
}

#[test]
fn evaluate_rejects_unbalanced_list() {
    assert!(matches!(
        reject("t_${[0, 1}"),
        InlineExpressionError::UnexpectedChar { found: '}', .. }
    ));
}

#[test]
fn evaluate_rejects_dangling_operator() {
    assert!(matches!(
        reject("t_${1+}"),
        InlineExpressionError::UnexpectedChar { found: '}', .. }
    ));
}

#[test]
fn evaluate_rejects_non_integer_arithmetic() {
    assert!(matches!(
        reject("t_${'a' + 1}"),
        InlineExpressionError::NonIntegerOperand { offset: 4 }
    ));
}

#[test]
fn evaluate_rejects_unknown_identifier() {
    assert!(matches!(
        reject("t_${foo}"),
        InlineExpressionError::UnknownIdentifier { ref name, offset: 4 } if name == "foo"
    ));
}

#[test]
fn evaluate_rejects_division_by_zero_and_overflow() {
    assert!(matches!(
        reject("t_${1 / 0}"),
        InlineExpressionError::DivisionByZero { .. }
    ));
    assert!(matches!(
        reject("t_${9223372036854775807 + 1}"),
        InlineExpressionError::ArithmeticOverflow { .. }
    ));
    assert!(matches!(
        reject("t_${99999999999999999999}"),
        InlineExpressionError::IntegerOutOfRange { .. }
    ));
}

#[test]
fn evaluate_rejects_malformed_later_segment_without_partial_output() {
    let err = reject("t_order_0, t_${");

    assert_eq!(
        err,
        InlineExpressionError::UnterminatedPlaceholder { offset: 13 }
    );
    assert_eq!(err.offset(), 13);
}

#[test]
fn parse_counts_segments_and_is_reusable() {
    let expression =
        InlineExpression::parse("t_${0..1}, t_config").expect("expression should parse");

    assert_eq!(expression.segments(), 2);
    assert_eq!(expression.evaluate(), expression.evaluate());
}

//
// Properties
//

proptest! {
    #[test]
    fn range_yields_every_integer_ascending(lo in -50i64..50, span in 0i64..50) {
        let hi = lo + span;
        let names = expand(&format!("t_${{{lo}..{hi}}}"));
        let expected: Vec<String> = (lo..=hi).map(|n| format!("t_{n}")).collect();

        prop_assert_eq!(names.len() as i64, span + 1);
        prop_assert_eq!(names, expected);
    }

    #[test]
    fn literal_segments_round_trip_trimmed(
        segments in prop::collection::vec("[a-z][a-z0-9_.]{0,10}", 1..8),
        pad in " {0,3}",
    ) {
        let source = segments
            .iter()
            .map(|segment| format!("{pad}{segment}{pad}"))
            .collect::<Vec<_>>()
            .join(",");

        prop_assert_eq!(expand(&source), segments);
    }

    #[test]
    fn two_placeholders_cross_join_left_to_right(m in 1usize..6, n in 1usize..6) {
        let left = (0..m).map(|i| format!("'l{i}'")).collect::<Vec<_>>().join(",");
        let names = expand(&format!("t_${{[{left}]}}_${{0..{}}}", n - 1));

        prop_assert_eq!(names.len(), m * n);
        for (index, name) in names.iter().enumerate() {
            prop_assert_eq!(name, &format!("t_l{}_{}", index / n, index % n));
        }
    }

    #[test]
    fn evaluation_is_deterministic(source in "[a-z_]{1,6}(\\$\\{[0-9]\\.\\.[0-9]\\})?(,[a-z_]{1,6})?") {
        let first = evaluate(Some(&source));
        let second = evaluate(Some(&source));

        prop_assert_eq!(first, second);
    }
}
