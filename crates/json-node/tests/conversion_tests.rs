/// Conversion engine tests: strict vs compatible mode, failure classification,
/// null handling, origin-hint-directed parsing and runtime targets.
use chrono::{DateTime, TimeZone, Utc};
use json_node::datetime::to_js_ticks;
use json_node::{
    node_enum, CastError, ConvertErrorKind, ConvertTarget, Deserialized, JsonNode, NodeError,
    ObjectNode, StringNode, UriRef, ValueKind,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

node_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Color { Red = 0, Green = 1, Blue = 5 }
}

fn kind_of<T: json_node::FromNode + std::fmt::Debug>(node: &JsonNode, strict: bool) -> ConvertErrorKind {
    node.try_convert::<T>(strict).unwrap_err().kind()
}

// ============================================================================
// 1. Integers
// ============================================================================

#[test]
fn numeric_string_needs_compatible_mode() {
    let node = JsonNode::from("12");
    let err = node.try_convert::<i32>(true).unwrap_err();
    assert_eq!(err.kind(), ConvertErrorKind::WrongKind);
    assert_eq!(err.message(), "expect a number but it is a string");
    assert_eq!(node.try_convert::<i32>(false).unwrap(), 12);
}

#[test]
fn fractional_double_truncates_only_in_compatible_mode() {
    let node = JsonNode::from(1.75);
    assert_eq!(kind_of::<i32>(&node, true), ConvertErrorKind::WrongKind);
    assert_eq!(node.try_convert::<i32>(false).unwrap(), 1);
    assert_eq!(JsonNode::from(3.0).try_convert::<i32>(true).unwrap(), 3);
}

#[test]
fn out_of_range_is_overflow_not_wrong_kind() {
    assert_eq!(kind_of::<u8>(&JsonNode::from(300), true), ConvertErrorKind::Overflow);
    assert_eq!(kind_of::<u32>(&JsonNode::from(-1), true), ConvertErrorKind::Overflow);
    assert_eq!(kind_of::<i64>(&JsonNode::from(1.0e40), false), ConvertErrorKind::Overflow);
    assert_eq!(
        kind_of::<i32>(&JsonNode::from("3000000000"), false),
        ConvertErrorKind::Overflow
    );
    assert_eq!(kind_of::<i64>(&JsonNode::from(f64::INFINITY), false), ConvertErrorKind::Overflow);
}

#[test]
fn nan_is_not_an_integer() {
    assert_eq!(kind_of::<i32>(&JsonNode::from(f64::NAN), false), ConvertErrorKind::WrongKind);
}

#[test]
fn boundaries_fit() {
    assert_eq!(JsonNode::from(255).try_convert::<u8>(true).unwrap(), 255);
    assert_eq!(JsonNode::from(i64::MIN).try_convert::<i64>(true).unwrap(), i64::MIN);
    assert_eq!(JsonNode::from(-128).try_convert::<i8>(true).unwrap(), -128);
}

#[test]
fn booleans_count_as_numbers_in_compatible_mode() {
    assert_eq!(JsonNode::TRUE.try_convert::<i32>(false).unwrap(), 1);
    assert_eq!(JsonNode::FALSE.try_convert::<f64>(false).unwrap(), 0.0);
    assert_eq!(kind_of::<i32>(&JsonNode::TRUE, true), ConvertErrorKind::WrongKind);
}

#[test]
fn non_numeric_string_is_wrong_kind() {
    assert_eq!(kind_of::<i32>(&JsonNode::from("abc"), false), ConvertErrorKind::WrongKind);
}

#[test]
fn containers_never_become_numbers() {
    let obj = JsonNode::from(ObjectNode::new());
    assert_eq!(kind_of::<i32>(&obj, false), ConvertErrorKind::WrongKind);
}

// ============================================================================
// 2. Floats and decimals
// ============================================================================

#[test]
fn float_from_string() {
    assert_eq!(JsonNode::from("2.5e2").try_convert::<f64>(false).unwrap(), 250.0);
    assert!(JsonNode::from("NaN").try_convert::<f64>(false).unwrap().is_nan());
    assert_eq!(kind_of::<f64>(&JsonNode::from("2.5"), true), ConvertErrorKind::WrongKind);
}

#[test]
fn f32_overflow() {
    assert_eq!(kind_of::<f32>(&JsonNode::from(1.0e300), true), ConvertErrorKind::Overflow);
    assert_eq!(JsonNode::from(1.5).try_convert::<f32>(true).unwrap(), 1.5f32);
}

#[test]
fn decimal_from_string_and_numbers() {
    assert_eq!(
        JsonNode::from("12.50").try_convert::<Decimal>(false).unwrap(),
        Decimal::new(1250, 2)
    );
    assert_eq!(
        JsonNode::from(7).try_convert::<Decimal>(true).unwrap(),
        Decimal::from(7)
    );
    assert_eq!(
        kind_of::<i64>(&JsonNode::from(Decimal::new(35, 1)), true),
        ConvertErrorKind::WrongKind
    );
    assert_eq!(
        JsonNode::from(Decimal::new(35, 1)).try_convert::<i64>(false).unwrap(),
        3
    );
}

// ============================================================================
// 3. Null sources
// ============================================================================

#[test]
fn null_into_value_type_is_not_null_expected() {
    assert_eq!(kind_of::<i32>(&JsonNode::NULL, false), ConvertErrorKind::NotNullExpected);
    assert_eq!(kind_of::<bool>(&JsonNode::UNDEFINED, true), ConvertErrorKind::NotNullExpected);
    assert_eq!(kind_of::<String>(&JsonNode::NULL, false), ConvertErrorKind::NotNullExpected);
}

#[test]
fn null_into_optional_is_none() {
    assert_eq!(JsonNode::NULL.try_convert::<Option<i32>>(true).unwrap(), None);
    assert_eq!(JsonNode::null_string().try_convert::<Option<String>>(true).unwrap(), None);
    assert_eq!(JsonNode::from(4).try_convert::<Option<i32>>(true).unwrap(), Some(4));
}

#[test]
fn null_special_targets() {
    assert_eq!(JsonNode::NULL.try_convert::<Uuid>(true).unwrap(), Uuid::nil());
    assert!(JsonNode::NULL.try_convert::<f64>(false).unwrap().is_nan());
    assert_eq!(kind_of::<f64>(&JsonNode::NULL, true), ConvertErrorKind::NotNullExpected);
    assert!(JsonNode::NULL.try_convert::<()>(true).is_ok());
    assert_eq!(kind_of::<()>(&JsonNode::from(0), true), ConvertErrorKind::WrongKind);
}

// ============================================================================
// 4. Booleans, characters and strings
// ============================================================================

#[test]
fn boolean_strings() {
    assert!(JsonNode::from("TRUE").try_convert::<bool>(true).unwrap());
    assert!(!JsonNode::from("false").try_convert::<bool>(true).unwrap());
    assert_eq!(kind_of::<bool>(&JsonNode::from("1"), true), ConvertErrorKind::WrongKind);
    assert!(JsonNode::from("1").try_convert::<bool>(false).unwrap());
    assert!(!JsonNode::from("0").try_convert::<bool>(false).unwrap());
}

#[test]
fn numbers_as_booleans() {
    assert!(!JsonNode::from(0).try_convert::<bool>(false).unwrap());
    assert!(JsonNode::from(-3).try_convert::<bool>(false).unwrap());
    assert_eq!(kind_of::<bool>(&JsonNode::from(1), true), ConvertErrorKind::WrongKind);
}

#[test]
fn characters() {
    assert_eq!(JsonNode::from("x").try_convert::<char>(true).unwrap(), 'x');
    assert_eq!(JsonNode::from(65).try_convert::<char>(true).unwrap(), 'A');
    assert_eq!(kind_of::<char>(&JsonNode::from("xy"), true), ConvertErrorKind::WrongKind);
    assert_eq!(kind_of::<char>(&JsonNode::from(0xD800), true), ConvertErrorKind::Overflow);
}

#[test]
fn strings_from_scalars_need_compatible_mode() {
    assert_eq!(kind_of::<String>(&JsonNode::from(12), true), ConvertErrorKind::WrongKind);
    assert_eq!(JsonNode::from(12).try_convert::<String>(false).unwrap(), "12");
    assert_eq!(JsonNode::from(1.5).try_convert::<String>(false).unwrap(), "1.5");
    assert_eq!(JsonNode::TRUE.try_convert::<String>(false).unwrap(), "true");
    assert_eq!(JsonNode::FALSE.try_convert::<String>(false).unwrap(), "false");
}

#[test]
fn containers_render_as_json_text() {
    let doc = JsonNode::parse(r#"{"a":[1,2]}"#).unwrap();
    assert_eq!(doc.try_convert::<String>(false).unwrap(), r#"{"a":[1,2]}"#);
}

// ============================================================================
// 5. Origin hints
// ============================================================================

#[test]
fn date_string_answers_integer_requests_with_ticks() {
    let when = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
    let node = JsonNode::from(when);
    assert_eq!(node.try_convert::<i64>(false).unwrap(), to_js_ticks(&when));
    assert_eq!(kind_of::<i64>(&node, true), ConvertErrorKind::WrongKind);
}

#[test]
fn boolean_origin_reads_as_one_or_zero() {
    let hinted = JsonNode::from(StringNode::from_bool(true));
    assert_eq!(hinted.try_convert::<i32>(false).unwrap(), 1);
    // The same text without the hint is not numeric.
    let literal = JsonNode::from("true");
    assert_eq!(kind_of::<i32>(&literal, false), ConvertErrorKind::WrongKind);
}

#[test]
fn float_origin_truncates_to_integer() {
    let node = JsonNode::from(StringNode::from_f64(9.75));
    assert_eq!(node.try_convert::<i32>(false).unwrap(), 9);
}

// ============================================================================
// 6. Dates, GUIDs, bytes and URIs
// ============================================================================

#[test]
fn dates_from_strings_and_ticks() {
    let midnight = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    assert_eq!(
        JsonNode::from("2024-03-01").try_convert::<DateTime<Utc>>(true).unwrap(),
        midnight
    );
    assert_eq!(
        JsonNode::from("2024-03-01T02:00:00+02:00")
            .try_convert::<DateTime<Utc>>(true)
            .unwrap(),
        midnight
    );
    let ticks = to_js_ticks(&midnight);
    assert_eq!(
        JsonNode::from(ticks).try_convert::<DateTime<Utc>>(true).unwrap(),
        midnight
    );
    assert_eq!(
        JsonNode::from(ticks.to_string())
            .try_convert::<DateTime<Utc>>(false)
            .unwrap(),
        midnight
    );
    assert_eq!(
        kind_of::<DateTime<Utc>>(&JsonNode::from("not a date"), false),
        ConvertErrorKind::WrongKind
    );
}

#[test]
fn date_round_trip_through_node() {
    let when = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap();
    let node = JsonNode::from(when);
    assert_eq!(node.try_convert::<DateTime<Utc>>(true).unwrap(), when);
}

#[test]
fn guids() {
    let id = Uuid::parse_str("0b2f9c3e-5d4a-4e7b-9a61-2c8d7e6f5a4b").unwrap();
    assert_eq!(JsonNode::from(id).try_convert::<Uuid>(true).unwrap(), id);
    assert_eq!(kind_of::<Uuid>(&JsonNode::from("nope"), false), ConvertErrorKind::WrongKind);
    assert_eq!(kind_of::<Uuid>(&JsonNode::from(5), false), ConvertErrorKind::WrongKind);
}

#[test]
fn base64_bytes() {
    assert_eq!(
        JsonNode::from("aGVsbG8=").try_convert::<Vec<u8>>(true).unwrap(),
        b"hello".to_vec()
    );
    assert_eq!(kind_of::<Vec<u8>>(&JsonNode::from("!!"), false), ConvertErrorKind::WrongKind);
    assert_eq!(kind_of::<Vec<u8>>(&JsonNode::from(5), false), ConvertErrorKind::WrongKind);
}

#[test]
fn uri_references() {
    let absolute = JsonNode::from("https://example.com/a?b=1")
        .try_convert::<UriRef>(true)
        .unwrap();
    assert!(absolute.is_absolute());
    let relative = JsonNode::from("/docs/index.html")
        .try_convert::<UriRef>(true)
        .unwrap();
    assert_eq!(relative, UriRef::Relative("/docs/index.html".to_string()));
    assert!(JsonNode::from("/docs/index.html")
        .try_convert::<url::Url>(true)
        .is_err());
}

// ============================================================================
// 7. Enums
// ============================================================================

#[test]
fn enums_by_name_or_ordinal() {
    assert_eq!(JsonNode::from("Green").as_enum::<Color>(true).unwrap(), Color::Green);
    assert_eq!(JsonNode::from(5).as_enum::<Color>(true).unwrap(), Color::Blue);
    assert_eq!(JsonNode::from("0").try_convert::<Color>(true).unwrap(), Color::Red);
}

#[test]
fn unknown_enum_members_are_unsupported() {
    assert_eq!(kind_of::<Color>(&JsonNode::from("Purple"), false), ConvertErrorKind::Unsupported);
    assert_eq!(kind_of::<Color>(&JsonNode::from(3), false), ConvertErrorKind::Unsupported);
    assert_eq!(kind_of::<Color>(&JsonNode::NULL, false), ConvertErrorKind::NotNullExpected);
    assert_eq!(kind_of::<Color>(&JsonNode::TRUE, false), ConvertErrorKind::WrongKind);
}

// ============================================================================
// 8. Arbitrary types
// ============================================================================

#[derive(Debug, Deserialize, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

#[test]
fn deserialize_objects() {
    let node = JsonNode::parse(r#"{"x":1,"y":2}"#).unwrap();
    assert_eq!(node.deserialize_as::<Point>().unwrap(), Point { x: 1, y: 2 });
    let Deserialized(point) = node.try_convert::<Deserialized<Point>>(true).unwrap();
    assert_eq!(point, Point { x: 1, y: 2 });
}

#[test]
fn deserialize_failures_are_classified() {
    let node = JsonNode::parse(r#"{"x":"one"}"#).unwrap();
    assert_eq!(
        kind_of::<Deserialized<Point>>(&node, false),
        ConvertErrorKind::DeserializationFailed
    );
    assert_eq!(
        kind_of::<Deserialized<Point>>(&JsonNode::from(3), true),
        ConvertErrorKind::WrongKind
    );
}

// ============================================================================
// 9. Umbrella errors, casts and runtime targets
// ============================================================================

#[test]
fn umbrella_error_variants() {
    assert!(matches!(
        JsonNode::from("x").convert::<i32>(true),
        Err(NodeError::InvalidOperation(_))
    ));
    assert!(matches!(
        JsonNode::NULL.convert::<i32>(true),
        Err(NodeError::InvalidOperation(_))
    ));
    assert!(matches!(
        JsonNode::from(1000).convert::<u8>(true),
        Err(NodeError::NotSupported(_))
    ));
}

#[test]
fn cast_uses_compatible_mode() {
    assert_eq!(JsonNode::from("42").cast::<i64>().unwrap(), 42);
    let err: CastError = JsonNode::from("forty").cast::<i64>().unwrap_err();
    assert!(err.to_string().starts_with("Invalid cast"));
}

#[test]
fn convert_or_default_swallows_failures() {
    assert_eq!(JsonNode::from("oops").convert_or_default::<i32>(false), 0);
    assert_eq!(JsonNode::from("8").convert_or_default::<i32>(false), 8);
}

#[test]
fn runtime_targets() {
    assert_eq!("int".parse::<ConvertTarget>().unwrap(), ConvertTarget::Int32);
    assert_eq!("UUID".parse::<ConvertTarget>().unwrap(), ConvertTarget::Guid);
    assert_eq!(
        "matrix".parse::<ConvertTarget>().unwrap_err().kind(),
        ConvertErrorKind::Unsupported
    );

    let converted = JsonNode::from("12").convert_to(ConvertTarget::Int32, false).unwrap();
    assert!(matches!(converted, JsonNode::Integer(12)));
    let text = JsonNode::from(3).convert_to(ConvertTarget::String, false).unwrap();
    assert_eq!(text.as_str(), Some("3"));
    assert!(JsonNode::from(3).convert_to(ConvertTarget::String, true).is_err());
}

// ============================================================================
// 10. End to end
// ============================================================================

#[test]
fn parse_convert_and_reparse_a_document() {
    let obj = ObjectNode::parse(r#"{"a":1,"b":[true,null,"x"]}"#).unwrap();
    assert_eq!(obj["a"].convert::<i32>(false).unwrap(), 1);

    let b = obj["b"].as_array().unwrap();
    assert_eq!(b.len(), 3);
    assert!(b[0].convert::<bool>(false).unwrap());
    assert_eq!(b[1].kind(), ValueKind::Null);
    assert_eq!(b[2].convert::<String>(false).unwrap(), "x");

    let text = obj.to_string();
    assert_eq!(text, r#"{"a":1,"b":[true,null,"x"]}"#);
    let reparsed = ObjectNode::parse(&text).unwrap();
    assert_eq!(reparsed, obj);
}
