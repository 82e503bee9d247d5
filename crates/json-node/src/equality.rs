//! Equality and ordering.
//!
//! `==` between nodes is kind-strict: numbers compare by value across the
//! integer/double/decimal variants, `Null` equals `Undefined`, and nodes of
//! different kinds are never equal. [`JsonNode::loose_eq`] and the
//! comparisons against host values coerce instead, and treat any failed
//! coercion as "not equal".

use std::cmp::Ordering;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::array::ArrayNode;
use crate::node::JsonNode;
use crate::object::ObjectNode;

/// Numeric comparison across the three number variants. `None` for NaN or
/// non-numbers.
fn compare_numbers(a: &JsonNode, b: &JsonNode) -> Option<Ordering> {
    match (a, b) {
        (JsonNode::Integer(x), JsonNode::Integer(y)) => Some(x.cmp(y)),
        (JsonNode::Decimal(x), JsonNode::Decimal(y)) => Some(x.cmp(y)),
        (JsonNode::Integer(x), JsonNode::Decimal(y)) => Some(Decimal::from(*x).cmp(y)),
        (JsonNode::Decimal(x), JsonNode::Integer(y)) => Some(x.cmp(&Decimal::from(*y))),
        _ => number_as_f64(a)?.partial_cmp(&number_as_f64(b)?),
    }
}

fn number_as_f64(node: &JsonNode) -> Option<f64> {
    match node {
        JsonNode::Integer(v) => Some(*v as f64),
        JsonNode::Double(v) => Some(*v),
        JsonNode::Decimal(v) => v.to_f64(),
        _ => None,
    }
}

impl PartialEq for JsonNode {
    fn eq(&self, other: &Self) -> bool {
        if self.is_null_like() && other.is_null_like() {
            return true;
        }
        match (self, other) {
            (JsonNode::Boolean(a), JsonNode::Boolean(b)) => a == b,
            (JsonNode::String(a), JsonNode::String(b)) => a == b,
            (JsonNode::Object(a), JsonNode::Object(b)) => a == b,
            (JsonNode::Array(a), JsonNode::Array(b)) => a == b,
            (a, b) if a.is_number() && b.is_number() => {
                compare_numbers(a, b) == Some(Ordering::Equal)
            }
            _ => false,
        }
    }
}

/// Same keys mapping to equal values; key order is not significant.
impl PartialEq for ObjectNode {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|v| v == value))
    }
}

impl PartialEq for ArrayNode {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl JsonNode {
    /// Equality that coerces `other` into this node's shape (compatible
    /// mode) when the kinds differ. Never fails; a failed coercion is "not
    /// equal".
    pub fn loose_eq(&self, other: &JsonNode) -> bool {
        if self == other {
            return true;
        }
        if self.kind() == other.kind() {
            return false;
        }
        match self {
            JsonNode::Boolean(b) => other.try_convert::<bool>(false).is_ok_and(|v| v == *b),
            JsonNode::Integer(_) => match other.try_convert::<f64>(false) {
                Ok(v) => compare_numbers(self, &JsonNode::Double(v)) == Some(Ordering::Equal),
                Err(_) => false,
            },
            JsonNode::Double(d) => other.try_convert::<f64>(false).is_ok_and(|v| v == *d),
            JsonNode::Decimal(d) => other.try_convert::<Decimal>(false).is_ok_and(|v| v == *d),
            JsonNode::String(s) => match s.value() {
                Some(text) => other.try_convert::<String>(false).is_ok_and(|v| v == text),
                None => false,
            },
            _ => false,
        }
    }
}

impl PartialOrd for JsonNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        match (self, other) {
            (JsonNode::Boolean(a), JsonNode::Boolean(b)) => a.partial_cmp(b),
            (JsonNode::String(a), JsonNode::String(b)) => a.value()?.partial_cmp(b.value()?),
            (a, b) if a.is_number() && b.is_number() => compare_numbers(a, b),
            _ => None,
        }
    }
}

macro_rules! impl_host_eq {
    ($($ty:ty),+) => {$(
        impl PartialEq<$ty> for JsonNode {
            fn eq(&self, other: &$ty) -> bool {
                self.loose_eq(&JsonNode::from(other.clone()))
            }
        }

        impl PartialEq<JsonNode> for $ty {
            fn eq(&self, other: &JsonNode) -> bool {
                other == self
            }
        }
    )+};
}

impl_host_eq!(i32, i64, f64, bool, String, Decimal);

impl PartialEq<&str> for JsonNode {
    fn eq(&self, other: &&str) -> bool {
        self.loose_eq(&JsonNode::from(*other))
    }
}

impl PartialEq<str> for JsonNode {
    fn eq(&self, other: &str) -> bool {
        self.loose_eq(&JsonNode::from(other))
    }
}

impl PartialEq<JsonNode> for &str {
    fn eq(&self, other: &JsonNode) -> bool {
        other == self
    }
}
