/// Property-based tests for the conversion engine and text round trips.
///
/// Strategies generate:
/// - Arbitrary i64 / finite f64 values, wrapped as numbers or numeric strings
/// - Random JSON documents (nested objects and arrays, up to 3 levels deep)
///
/// Invariants checked:
/// - A node's kind matches the variant it was built from
/// - Integers survive conversion through both modes
/// - A narrowing failure on a number is always Overflow, never WrongKind
/// - Minified output of a parsed document parses back to an equal node
use json_node::{ConvertErrorKind, IndentStyle, JsonNode, ValueKind};
use proptest::prelude::*;
use serde_json::{Map, Number, Value};

// ============================================================================
// Strategies
// ============================================================================

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|i| Value::Number(Number::from(i))),
        // Quarters have short exact decimal forms.
        (-1_000_000i64..1_000_000)
            .prop_filter_map("finite", |i| Number::from_f64(i as f64 / 4.0))
            .prop_map(Value::Number),
        "[a-zA-Z0-9 _\\-]{0,16}".prop_map(Value::String),
    ]
}

fn arb_document() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(("[a-z]{1,8}", inner), 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn integer_kind_is_number(i in any::<i64>()) {
        prop_assert_eq!(JsonNode::from(i).kind(), ValueKind::Number);
    }

    #[test]
    fn string_kind_is_string(s in ".{0,24}") {
        prop_assert_eq!(JsonNode::from(s).kind(), ValueKind::String);
    }

    #[test]
    fn integers_round_trip_in_both_modes(i in any::<i64>()) {
        let node = JsonNode::from(i);
        prop_assert_eq!(node.try_convert::<i64>(true).unwrap(), i);
        prop_assert_eq!(node.try_convert::<i64>(false).unwrap(), i);
    }

    #[test]
    fn numeric_strings_parse_in_compatible_mode(i in any::<i64>()) {
        let node = JsonNode::from(i.to_string());
        prop_assert_eq!(node.try_convert::<i64>(false).unwrap(), i);
        prop_assert_eq!(
            node.try_convert::<i64>(true).unwrap_err().kind(),
            ConvertErrorKind::WrongKind
        );
    }

    #[test]
    fn narrowing_failures_are_overflow(i in any::<i64>()) {
        let node = JsonNode::from(i);
        match node.try_convert::<i8>(true) {
            Ok(v) => prop_assert_eq!(i64::from(v), i),
            Err(err) => prop_assert_eq!(err.kind(), ConvertErrorKind::Overflow),
        }
        match node.try_convert::<u32>(false) {
            Ok(v) => prop_assert_eq!(i64::from(v), i),
            Err(err) => prop_assert_eq!(err.kind(), ConvertErrorKind::Overflow),
        }
    }

    #[test]
    fn doubles_round_trip(f in -1.0e15f64..1.0e15f64) {
        let node = JsonNode::from(f);
        prop_assert_eq!(node.try_convert::<f64>(true).unwrap(), f);
        let text = node.try_convert::<String>(false).unwrap();
        prop_assert_eq!(JsonNode::from(text).try_convert::<f64>(false).unwrap(), f);
    }

    #[test]
    fn minified_text_round_trips(doc in arb_document()) {
        let node = JsonNode::from(doc.clone());
        let text = node.to_json_string(IndentStyle::Minified).unwrap();
        let reparsed = JsonNode::parse(&text).unwrap();
        prop_assert_eq!(&reparsed, &node);
        prop_assert_eq!(reparsed.to_value(), doc);
    }

    #[test]
    fn indentation_does_not_change_content(doc in arb_document()) {
        let node = JsonNode::from(doc);
        let pretty = node.to_json_string(IndentStyle::Tab).unwrap();
        prop_assert_eq!(JsonNode::parse(&pretty).unwrap(), node);
    }
}
