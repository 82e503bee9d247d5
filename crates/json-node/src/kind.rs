//! The coarse classification every node exposes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a JSON node.
///
/// Booleans carry their value in the kind (`True` / `False`). The three
/// numeric variants (integer, double, decimal) all report `Number`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Undefined,
    Null,
    True,
    False,
    Number,
    String,
    Object,
    Array,
}

impl ValueKind {
    /// `Null` or `Undefined`.
    pub fn is_null_like(self) -> bool {
        matches!(self, ValueKind::Null | ValueKind::Undefined)
    }

    pub fn is_boolean(self) -> bool {
        matches!(self, ValueKind::True | ValueKind::False)
    }

    pub fn is_container(self) -> bool {
        matches!(self, ValueKind::Object | ValueKind::Array)
    }

    /// English noun phrase used in error messages, e.g. "a string".
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Undefined => "undefined",
            ValueKind::Null => "null",
            ValueKind::True | ValueKind::False => "a boolean",
            ValueKind::Number => "a number",
            ValueKind::String => "a string",
            ValueKind::Object => "an object",
            ValueKind::Array => "an array",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueKind::Undefined => "undefined",
            ValueKind::Null => "null",
            ValueKind::True => "true",
            ValueKind::False => "false",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Object => "object",
            ValueKind::Array => "array",
        };
        f.write_str(s)
    }
}
