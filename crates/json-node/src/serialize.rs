//! JSON text input and output.
//!
//! Parsing goes through `serde_json` (with `preserve_order`, so object keys
//! keep their document order). Integers that fit `i64` become
//! [`JsonNode::Integer`]; larger unsigned integers and every number with a
//! fraction or exponent become [`JsonNode::Double`].
//!
//! On output, Undefined properties are skipped inside objects and written as
//! `null` elsewhere. Decimals are written as JSON numbers with every digit
//! kept (`serde_json` is built with `arbitrary_precision`).

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};
use serde_json::{Map, Number, Value};

use crate::array::ArrayNode;
use crate::error::{NodeError, Result};
use crate::node::JsonNode;
use crate::object::ObjectNode;
use crate::string::StringNode;

/// Indentation presets for [`JsonNode::to_json_string`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndentStyle {
    /// Single line, no whitespace.
    #[default]
    Minified,
    /// One member per line, no indentation.
    Empty,
    Tab,
    Four,
    Two,
    Eight,
    One,
}

impl IndentStyle {
    /// The per-level indent, or `None` for minified output.
    pub fn indent(self) -> Option<&'static [u8]> {
        match self {
            IndentStyle::Minified => None,
            IndentStyle::Empty => Some(b""),
            IndentStyle::Tab => Some(b"\t"),
            IndentStyle::Four => Some(b"    "),
            IndentStyle::Two => Some(b"  "),
            IndentStyle::Eight => Some(b"        "),
            IndentStyle::One => Some(b" "),
        }
    }
}

impl FromStr for IndentStyle {
    type Err = NodeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minified" | "compact" => Ok(IndentStyle::Minified),
            "empty" | "none" | "0" => Ok(IndentStyle::Empty),
            "tab" => Ok(IndentStyle::Tab),
            "four" | "4" => Ok(IndentStyle::Four),
            "two" | "2" => Ok(IndentStyle::Two),
            "eight" | "8" => Ok(IndentStyle::Eight),
            "one" | "1" => Ok(IndentStyle::One),
            other => Err(NodeError::NotSupported(format!(
                "unknown indent style '{other}'"
            ))),
        }
    }
}

impl JsonNode {
    /// Parse JSON text.
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to JSON text with the given indentation.
    pub fn to_json_string(&self, indent: IndentStyle) -> Result<String> {
        match indent.indent() {
            None => write_with(self, CompactFormatter),
            Some(bytes) => write_with(self, PrettyFormatter::with_indent(bytes)),
        }
    }

    /// Equivalent `serde_json::Value`.
    pub fn to_value(&self) -> Value {
        match self {
            JsonNode::Undefined | JsonNode::Null => Value::Null,
            JsonNode::Boolean(b) => Value::Bool(*b),
            JsonNode::Integer(v) => Value::Number(Number::from(*v)),
            JsonNode::Double(v) => Number::from_f64(*v).map_or(Value::Null, Value::Number),
            JsonNode::Decimal(v) => decimal_number(v).map_or(Value::Null, Value::Number),
            JsonNode::String(s) => s
                .value()
                .map_or(Value::Null, |text| Value::String(text.to_string())),
            JsonNode::Object(obj) => {
                let mut map = Map::with_capacity(obj.len());
                for (key, value) in obj {
                    if !value.is_undefined() {
                        map.insert(key.clone(), value.to_value());
                    }
                }
                Value::Object(map)
            }
            JsonNode::Array(arr) => Value::Array(arr.iter().map(JsonNode::to_value).collect()),
        }
    }
}

fn write_with<F: Formatter>(node: &JsonNode, formatter: F) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    node.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|err| NodeError::InvalidOperation(err.to_string()))
}

/// The decimal's own text as a JSON number.
fn decimal_number(value: &rust_decimal::Decimal) -> Option<Number> {
    Number::from_str(&value.to_string()).ok()
}

/// Map key under which `serde_json` hands out numbers it keeps as text.
const NUMBER_TOKEN: &str = "$serde_json::private::Number";

/// Numbers `serde_json` could not read as `u64` / `i64`: fractions,
/// exponents and out-of-range integers.
fn number_from_text<E: de::Error>(text: &str) -> std::result::Result<JsonNode, E> {
    if let Ok(i) = text.parse::<i64>() {
        return Ok(JsonNode::Integer(i));
    }
    text.parse::<f64>()
        .map(JsonNode::Double)
        .map_err(|_| E::custom(format!("invalid number: {text}")))
}

impl From<Value> for JsonNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => JsonNode::Null,
            Value::Bool(b) => JsonNode::Boolean(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => JsonNode::Integer(i),
                None => JsonNode::Double(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => JsonNode::from_string(s),
            Value::Array(items) => JsonNode::Array(items.into_iter().map(JsonNode::from).collect()),
            Value::Object(map) => JsonNode::Object(map.into_iter().collect()),
        }
    }
}

impl From<&JsonNode> for Value {
    fn from(node: &JsonNode) -> Self {
        node.to_value()
    }
}

impl FromStr for JsonNode {
    type Err = NodeError;

    fn from_str(s: &str) -> Result<Self> {
        JsonNode::parse(s)
    }
}

impl fmt::Display for JsonNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.to_json_string(IndentStyle::Minified).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl fmt::Display for ObjectNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl fmt::Display for ArrayNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

// ============================================================================
// serde
// ============================================================================

impl Serialize for JsonNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            JsonNode::Undefined | JsonNode::Null => serializer.serialize_unit(),
            JsonNode::Boolean(b) => serializer.serialize_bool(*b),
            JsonNode::Integer(v) => serializer.serialize_i64(*v),
            JsonNode::Double(v) => serializer.serialize_f64(*v),
            JsonNode::Decimal(v) => match decimal_number(v) {
                Some(n) => n.serialize(serializer),
                None => serializer.serialize_unit(),
            },
            JsonNode::String(s) => match s.value() {
                Some(text) => serializer.serialize_str(text),
                None => serializer.serialize_unit(),
            },
            JsonNode::Object(obj) => obj.serialize(serializer),
            JsonNode::Array(arr) => arr.serialize(serializer),
        }
    }
}

impl Serialize for ObjectNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let present = self.values().filter(|v| !v.is_undefined()).count();
        let mut map = serializer.serialize_map(Some(present))?;
        for (key, value) in self {
            if !value.is_undefined() {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

impl Serialize for ArrayNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for item in self {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = JsonNode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<JsonNode, E> {
        Ok(JsonNode::Boolean(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<JsonNode, E> {
        Ok(JsonNode::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<JsonNode, E> {
        Ok(JsonNode::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<JsonNode, E> {
        Ok(JsonNode::Double(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<JsonNode, E> {
        Ok(JsonNode::from_string(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<JsonNode, E> {
        Ok(JsonNode::String(StringNode::from(v)))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<JsonNode, E> {
        Ok(JsonNode::Null)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<JsonNode, E> {
        Ok(JsonNode::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> std::result::Result<JsonNode, D::Error> {
        JsonNode::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<JsonNode, A::Error> {
        let mut arr = ArrayNode::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<JsonNode>()? {
            arr.push(item);
        }
        Ok(JsonNode::Array(arr))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<JsonNode, A::Error> {
        let mut obj = ObjectNode::with_capacity(map.size_hint().unwrap_or(0));
        let Some(first) = map.next_key::<String>()? else {
            return Ok(JsonNode::Object(obj));
        };
        if first == NUMBER_TOKEN {
            let text: String = map.next_value()?;
            return number_from_text(&text);
        }
        obj.set(first, map.next_value::<JsonNode>()?);
        while let Some((key, value)) = map.next_entry::<String, JsonNode>()? {
            obj.set(key, value);
        }
        Ok(JsonNode::Object(obj))
    }
}

impl<'de> Deserialize<'de> for JsonNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}

impl<'de> Deserialize<'de> for ObjectNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match JsonNode::deserialize(deserializer)? {
            JsonNode::Object(obj) => Ok(obj),
            other => Err(de::Error::custom(format!(
                "expect an object but it is {}",
                other.kind().name()
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for ArrayNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match JsonNode::deserialize(deserializer)? {
            JsonNode::Array(arr) => Ok(arr),
            other => Err(de::Error::custom(format!(
                "expect an array but it is {}",
                other.kind().name()
            ))),
        }
    }
}
