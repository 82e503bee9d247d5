/// Container tests: object and array mutation, typed getters and path lookup.
use json_node::{ArrayNode, FromEnd, JsonNode, NodeError, ObjectNode, ValueKind};

// ============================================================================
// Fixtures
// ============================================================================

fn orders_json() -> &'static str {
    r#"{"region":"north","orders":[{"id":"A-1","total":12.5,"lines":[{"sku":"X1","qty":2},{"sku":"Y7","qty":1}]},{"id":"A-2","total":3,"lines":[]}]}"#
}

fn deep_json() -> &'static str {
    r#"{"level1":{"level2":{"level3":{"value":"keep-me"}}}}"#
}

// ============================================================================
// 1. Objects
// ============================================================================

#[test]
fn set_returns_previous_and_keeps_position() {
    let mut obj = ObjectNode::new();
    assert!(obj.set("a", 1).is_none());
    obj.set("b", 2);
    let previous = obj.set("a", "one").unwrap();
    assert!(matches!(previous, JsonNode::Integer(1)));
    let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["a", "b"]);
}

#[test]
fn setting_undefined_removes_the_key() {
    let mut obj: ObjectNode = [("a", 1), ("b", 2)].into_iter().collect();
    obj.set("a", JsonNode::UNDEFINED);
    assert!(!obj.contains_key("a"));
    assert_eq!(obj.len(), 1);
}

#[test]
fn set_if_absent_does_not_overwrite() {
    let mut obj = ObjectNode::new();
    assert!(obj.set_if_absent("a", 1));
    assert!(!obj.set_if_absent("a", 2));
    assert_eq!(obj.get_i32("a"), Some(1));
}

#[test]
fn remove_preserves_order_of_the_rest() {
    let mut obj = ObjectNode::parse(r#"{"a":1,"b":2,"c":3}"#).unwrap();
    assert!(obj.remove("b").is_some());
    assert!(obj.remove("missing").is_none());
    assert_eq!(obj.to_string(), r#"{"a":1,"c":3}"#);
}

#[test]
fn set_null_stores_null() {
    let mut obj = ObjectNode::new();
    obj.set_null("gone");
    assert_eq!(obj["gone"].kind(), ValueKind::Null);
    assert!(obj.contains_key("gone"));
}

#[test]
fn index_mut_inserts_null() {
    let mut obj = ObjectNode::new();
    obj["fresh"] = JsonNode::from(5);
    assert!(matches!(obj["fresh"], JsonNode::Integer(5)));
    let _ = &mut obj["placeholder"];
    assert_eq!(obj["placeholder"].kind(), ValueKind::Null);
}

#[test]
fn inserting_a_node_into_itself_copies_it() {
    let mut obj = ObjectNode::parse(r#"{"a":1}"#).unwrap();
    let snapshot = obj.clone();
    obj.set("self", snapshot);
    assert_eq!(obj.to_string(), r#"{"a":1,"self":{"a":1}}"#);
}

#[test]
fn mutating_after_self_insertion_leaves_the_copy_alone() {
    let mut obj = ObjectNode::parse(r#"{"a":1}"#).unwrap();
    let snapshot = obj.clone();
    obj.set("self", snapshot);
    obj.set("a", 2);
    assert_eq!(obj.get_i64("a"), Some(2));
    assert!(matches!(obj["self"]["a"], JsonNode::Integer(1)));
    assert_eq!(obj.to_string(), r#"{"a":2,"self":{"a":1}}"#);
}

#[test]
fn schema_and_id_keys() {
    let mut obj = ObjectNode::new();
    assert!(obj.schema().is_none());
    obj.set_schema("https://example.com/schema.json");
    obj.set_id("urn:item:1");
    assert_eq!(obj.schema(), Some("https://example.com/schema.json"));
    assert_eq!(obj.id(), Some("urn:item:1"));
    assert_eq!(obj["$schema"].as_str(), Some("https://example.com/schema.json"));
}

#[test]
fn typed_getters() {
    let obj = ObjectNode::parse(
        r#"{"s":"text","n":"12","f":2.5,"b":"true","d":"2024-03-01","g":null,"o":{},"a":[]}"#,
    )
    .unwrap();
    assert_eq!(obj.get_str("s"), Some("text"));
    assert_eq!(obj.get_i32("n"), Some(12));
    assert_eq!(obj.get_i64("missing"), None);
    assert_eq!(obj.get_f64("f"), Some(2.5));
    assert_eq!(obj.get_f64("g"), None);
    assert_eq!(obj.get_bool("b"), Some(true));
    assert!(obj.get_datetime("d").is_some());
    assert_eq!(obj.get_uuid("g"), None);
    assert!(obj.get_object("o").is_some());
    assert!(obj.get_array("a").is_some());
    assert!(obj.get_object("a").is_none());
}

#[test]
fn required_getter_fails_on_missing_key() {
    let obj = ObjectNode::parse(r#"{"n":"x"}"#).unwrap();
    assert!(matches!(
        obj.value::<i32>("missing", false),
        Err(NodeError::InvalidOperation(_))
    ));
    assert!(obj.value::<i32>("n", false).is_err());
    assert_eq!(obj.value::<Option<i32>>("missing", true).unwrap(), None);
}

#[test]
fn nested_mutation() {
    let mut obj = ObjectNode::parse(r#"{"inner":{"list":[1]}}"#).unwrap();
    obj.get_object_mut("inner")
        .and_then(|inner| inner.get_array_mut("list"))
        .unwrap()
        .push(2);
    assert_eq!(obj.to_string(), r#"{"inner":{"list":[1,2]}}"#);
}

#[test]
fn parse_rejects_non_object_root() {
    assert!(ObjectNode::parse("[1,2]").is_err());
    assert!(ArrayNode::parse(r#"{"a":1}"#).is_err());
}

// ============================================================================
// 2. Arrays
// ============================================================================

#[test]
fn insert_and_remove() {
    let mut arr: ArrayNode = vec![1, 3].into_iter().collect();
    arr.insert(1, 2).unwrap();
    arr.insert(3, 4).unwrap();
    assert_eq!(arr.integers(), vec![1, 2, 3, 4]);
    assert!(matches!(
        arr.insert(9, 0),
        Err(NodeError::IndexOutOfRange { index: 9, len: 4 })
    ));
    assert!(matches!(arr.remove(0), Some(JsonNode::Integer(1))));
    assert!(arr.remove(10).is_none());
    assert_eq!(arr.len(), 3);
}

#[test]
fn set_replaces_in_place() {
    let mut arr: ArrayNode = vec!["a", "b"].into_iter().collect();
    let previous = arr.set(1, "z").unwrap();
    assert_eq!(previous.as_str(), Some("b"));
    assert_eq!(arr.strings().collect::<Vec<_>>(), vec!["a", "z"]);
    assert!(arr.set(2, "y").is_err());
}

#[test]
fn from_end_access() {
    let arr = ArrayNode::parse("[10,20,30]").unwrap();
    assert_eq!(arr.resolve(FromEnd(1)), Some(2));
    assert_eq!(arr.resolve(FromEnd(3)), Some(0));
    assert_eq!(arr.resolve(FromEnd(4)), None);
    assert_eq!(arr.resolve(FromEnd(0)), None);
    assert!(matches!(arr.get_from_end(2), Some(JsonNode::Integer(20))));
    assert!(matches!(arr.value_at_end(1), Ok(JsonNode::Integer(30))));
    assert!(arr.value_at_end(5).is_err());
    assert!(arr[FromEnd(9)].is_undefined());
}

#[test]
fn huge_offsets_from_the_end_are_out_of_range() {
    let arr = ArrayNode::parse("[1,2]").unwrap();
    assert!(matches!(
        arr.value_at_end(1usize << 63),
        Err(NodeError::IndexOutOfRange { len: 2, .. })
    ));
    assert!(matches!(
        arr.value_at_end(usize::MAX),
        Err(NodeError::IndexOutOfRange { len: 2, .. })
    ));
    assert!(matches!(
        arr.value_at_end(3),
        Err(NodeError::IndexOutOfRange { index: -1, len: 2 })
    ));
    assert!(matches!(
        arr.value_at(usize::MAX),
        Err(NodeError::IndexOutOfRange { index: i64::MAX, len: 2 })
    ));
    assert!(arr[FromEnd(usize::MAX)].is_undefined());
}

#[test]
fn positional_access() {
    let arr = ArrayNode::parse(r#"["7",{"k":1},[true]]"#).unwrap();
    assert_eq!(arr.value::<i32>(0, false).unwrap(), 7);
    assert!(arr.value::<i32>(0, true).is_err());
    assert_eq!(arr.try_value::<i32>(1), None);
    assert!(arr.get_object(1).is_some());
    assert!(arr.get_array(2).is_some());
    assert!(matches!(
        arr.value_at(3),
        Err(NodeError::IndexOutOfRange { index: 3, len: 3 })
    ));
    assert!(arr[3].is_undefined());
}

#[test]
fn integers_skips_unconvertible_items() {
    let arr = ArrayNode::parse(r#"[1,"2","x",null,3.9]"#).unwrap();
    assert_eq!(arr.integers(), vec![1, 2, 3]);
}

#[test]
fn truncate_and_clear() {
    let mut arr: ArrayNode = (0..5).collect();
    arr.truncate(2);
    assert_eq!(arr.len(), 2);
    arr.clear();
    assert!(arr.is_empty());
}

// ============================================================================
// 3. Paths
// ============================================================================

#[test]
fn select_follows_keys_and_positions() {
    let doc = JsonNode::parse(orders_json()).unwrap();
    assert_eq!(doc.select("orders.0.id").as_str(), Some("A-1"));
    assert_eq!(doc.select("orders.-1.id").as_str(), Some("A-2"));
    assert_eq!(doc.select("orders.0.lines.1.sku").as_str(), Some("Y7"));
    assert!(matches!(doc.select("orders.0.lines.-2.qty"), JsonNode::Integer(2)));
    assert!(doc.select("orders.5.id").is_undefined());
    assert!(doc.select("orders.-9.id").is_undefined());
    assert!(doc.select("orders.x").is_undefined());
    assert!(doc.select("region.deeper").is_undefined());
    assert_eq!(doc.select("").kind(), ValueKind::Object);
}

#[test]
fn select_tolerates_positions_beyond_any_array() {
    let doc = JsonNode::parse(orders_json()).unwrap();
    assert!(doc.select("orders.9223372036854775807.id").is_undefined());
    assert!(doc.select("orders.-9223372036854775808.id").is_undefined());
    assert!(doc.select("orders.99999999999999999999").is_undefined());
}

#[test]
fn get_path_takes_segments() {
    let doc = JsonNode::parse(orders_json()).unwrap();
    assert!(matches!(doc.get_path(&["orders", "1", "total"]), JsonNode::Integer(3)));
    assert!(doc.get_path(&["orders", "1", "lines", "0"]).is_undefined());
}

#[test]
fn object_get_path() {
    let obj = ObjectNode::parse(deep_json()).unwrap();
    assert_eq!(
        obj.get_path(&["level1", "level2", "level3", "value"]).as_str(),
        Some("keep-me")
    );
    assert!(obj.get_path(&[]).is_undefined());
    assert!(obj.get_path(&["level1", "nope"]).is_undefined());
}
