//! The JSON node sum type.
//!
//! [`JsonNode`] is a closed set of variants. Scalars are immutable values;
//! "mutating" a scalar means replacing the slot that holds it. Containers own
//! their children, so a document is always a tree.

use std::ops::Index;

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use rust_decimal::Decimal;
use url::Url;
use uuid::Uuid;

use crate::array::{ArrayNode, FromEnd};
use crate::kind::ValueKind;
use crate::object::ObjectNode;
use crate::string::StringNode;

/// Shared Undefined node returned by lookups that miss.
pub(crate) static UNDEFINED: JsonNode = JsonNode::Undefined;

/// A JSON value.
#[derive(Debug, Clone, Default)]
pub enum JsonNode {
    /// Absent key or index.
    #[default]
    Undefined,
    /// JSON `null`.
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    Decimal(Decimal),
    String(StringNode),
    Object(ObjectNode),
    Array(ArrayNode),
}

impl JsonNode {
    pub const UNDEFINED: JsonNode = JsonNode::Undefined;
    pub const NULL: JsonNode = JsonNode::Null;
    pub const TRUE: JsonNode = JsonNode::Boolean(true);
    pub const FALSE: JsonNode = JsonNode::Boolean(false);

    /// The kind of this node. Stable for the lifetime of the value.
    pub fn kind(&self) -> ValueKind {
        match self {
            JsonNode::Undefined => ValueKind::Undefined,
            JsonNode::Null => ValueKind::Null,
            JsonNode::Boolean(true) => ValueKind::True,
            JsonNode::Boolean(false) => ValueKind::False,
            JsonNode::Integer(_) | JsonNode::Double(_) | JsonNode::Decimal(_) => {
                ValueKind::Number
            }
            JsonNode::String(s) => s.kind(),
            JsonNode::Object(_) => ValueKind::Object,
            JsonNode::Array(_) => ValueKind::Array,
        }
    }

    pub fn from_i64(value: i64) -> Self {
        JsonNode::Integer(value)
    }

    pub fn from_f64(value: f64) -> Self {
        JsonNode::Double(value)
    }

    pub fn from_decimal(value: Decimal) -> Self {
        JsonNode::Decimal(value)
    }

    pub fn from_bool(value: bool) -> Self {
        JsonNode::Boolean(value)
    }

    pub fn from_string(value: impl Into<String>) -> Self {
        JsonNode::String(StringNode::new(Some(value.into())))
    }

    /// A string node whose text is absent; its kind is `Null`.
    pub fn null_string() -> Self {
        JsonNode::String(StringNode::new(None))
    }

    /// A Base64 string node.
    pub fn from_bytes(value: &[u8]) -> Self {
        JsonNode::String(StringNode::from_bytes(value))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, JsonNode::Undefined)
    }

    /// True for `Null`, `Undefined` and an absent string.
    pub fn is_null_like(&self) -> bool {
        self.kind().is_null_like()
    }

    pub fn is_number(&self) -> bool {
        matches!(
            self,
            JsonNode::Integer(_) | JsonNode::Double(_) | JsonNode::Decimal(_)
        )
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, JsonNode::Boolean(_))
    }

    pub fn is_string(&self) -> bool {
        self.kind() == ValueKind::String
    }

    pub fn is_object(&self) -> bool {
        matches!(self, JsonNode::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, JsonNode::Array(_))
    }

    pub fn as_object(&self) -> Option<&ObjectNode> {
        match self {
            JsonNode::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut ObjectNode> {
        match self {
            JsonNode::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayNode> {
        match self {
            JsonNode::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut ArrayNode> {
        match self {
            JsonNode::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Borrow the text of a present string node.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonNode::String(s) => s.value(),
            _ => None,
        }
    }

    pub fn as_string_node(&self) -> Option<&StringNode> {
        match self {
            JsonNode::String(s) => Some(s),
            _ => None,
        }
    }

    /// The boolean payload, without coercion.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonNode::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Child lookup by key; Undefined unless this is an object holding `key`.
    pub fn get(&self, key: &str) -> &JsonNode {
        match self {
            JsonNode::Object(obj) => obj.get_or_undefined(key),
            _ => &UNDEFINED,
        }
    }

    /// Child lookup by position; Undefined unless this is an array long enough.
    pub fn get_index(&self, index: usize) -> &JsonNode {
        match self {
            JsonNode::Array(arr) => &arr[index],
            _ => &UNDEFINED,
        }
    }

    /// Number of children for containers, characters for strings, zero otherwise.
    pub fn len(&self) -> usize {
        match self {
            JsonNode::Object(obj) => obj.len(),
            JsonNode::Array(arr) => arr.len(),
            JsonNode::String(s) => s.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Index<&str> for JsonNode {
    type Output = JsonNode;

    fn index(&self, key: &str) -> &JsonNode {
        self.get(key)
    }
}

impl Index<usize> for JsonNode {
    type Output = JsonNode;

    fn index(&self, index: usize) -> &JsonNode {
        self.get_index(index)
    }
}

impl Index<FromEnd> for JsonNode {
    type Output = JsonNode;

    fn index(&self, index: FromEnd) -> &JsonNode {
        match self {
            JsonNode::Array(arr) => &arr[index],
            _ => &UNDEFINED,
        }
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),+) => {$(
        impl From<$ty> for JsonNode {
            fn from(value: $ty) -> Self {
                JsonNode::Integer(i64::from(value))
            }
        }
    )+};
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

/// Values above `i64::MAX` become doubles.
impl From<u64> for JsonNode {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(v) => JsonNode::Integer(v),
            Err(_) => JsonNode::Double(value as f64),
        }
    }
}

impl From<usize> for JsonNode {
    fn from(value: usize) -> Self {
        JsonNode::from(value as u64)
    }
}

impl From<isize> for JsonNode {
    fn from(value: isize) -> Self {
        JsonNode::Integer(value as i64)
    }
}

impl From<f32> for JsonNode {
    fn from(value: f32) -> Self {
        JsonNode::Double(f64::from(value))
    }
}

impl From<f64> for JsonNode {
    fn from(value: f64) -> Self {
        JsonNode::Double(value)
    }
}

impl From<Decimal> for JsonNode {
    fn from(value: Decimal) -> Self {
        JsonNode::Decimal(value)
    }
}

impl From<bool> for JsonNode {
    fn from(value: bool) -> Self {
        JsonNode::Boolean(value)
    }
}

impl From<char> for JsonNode {
    fn from(value: char) -> Self {
        JsonNode::from_string(value.to_string())
    }
}

impl From<&str> for JsonNode {
    fn from(value: &str) -> Self {
        JsonNode::from_string(value)
    }
}

impl From<String> for JsonNode {
    fn from(value: String) -> Self {
        JsonNode::from_string(value)
    }
}

impl From<&String> for JsonNode {
    fn from(value: &String) -> Self {
        JsonNode::from_string(value.as_str())
    }
}

impl From<StringNode> for JsonNode {
    fn from(value: StringNode) -> Self {
        JsonNode::String(value)
    }
}

impl From<Uuid> for JsonNode {
    fn from(value: Uuid) -> Self {
        JsonNode::String(StringNode::from_uuid(&value))
    }
}

impl From<DateTime<Utc>> for JsonNode {
    fn from(value: DateTime<Utc>) -> Self {
        JsonNode::String(StringNode::from_datetime(&value))
    }
}

impl From<DateTime<FixedOffset>> for JsonNode {
    fn from(value: DateTime<FixedOffset>) -> Self {
        JsonNode::String(StringNode::from_fixed_datetime(&value))
    }
}

impl From<TimeDelta> for JsonNode {
    fn from(value: TimeDelta) -> Self {
        JsonNode::String(StringNode::from_duration(value))
    }
}

impl From<Url> for JsonNode {
    fn from(value: Url) -> Self {
        JsonNode::String(StringNode::from_url(&value))
    }
}

impl From<ObjectNode> for JsonNode {
    fn from(value: ObjectNode) -> Self {
        JsonNode::Object(value)
    }
}

impl From<ArrayNode> for JsonNode {
    fn from(value: ArrayNode) -> Self {
        JsonNode::Array(value)
    }
}

/// `None` becomes `Null`.
impl<T: Into<JsonNode>> From<Option<T>> for JsonNode {
    fn from(value: Option<T>) -> Self {
        value.map_or(JsonNode::Null, Into::into)
    }
}

impl<T: Into<JsonNode>> From<Vec<T>> for JsonNode {
    fn from(value: Vec<T>) -> Self {
        JsonNode::Array(value.into_iter().collect())
    }
}
