//! Delimited string lists.
//!
//! Some documents store a list of names as a single delimited string
//! (`"read write admin"`, `"a,b,c"`). A [`StringListConverter`] splits and
//! joins such values, and as a [`SchemaOverride`] it makes the property's
//! schema a string array.

use crate::convert::FromNode;
use crate::node::JsonNode;
use crate::schema::{JsonSchemaDescription, SchemaOverride};

/// Delimiter of a string list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringListConverter {
    Whitespace,
    Comma,
    Semicolon,
}

impl StringListConverter {
    /// Separator written between items when joining.
    pub fn separator(self) -> &'static str {
        match self {
            StringListConverter::Whitespace => " ",
            StringListConverter::Comma => ",",
            StringListConverter::Semicolon => ";",
        }
    }

    /// Split `text` into trimmed, non-empty items.
    pub fn split(self, text: &str) -> Vec<String> {
        let parts: Box<dyn Iterator<Item = &str>> = match self {
            StringListConverter::Whitespace => Box::new(text.split_whitespace()),
            StringListConverter::Comma => Box::new(text.split(',')),
            StringListConverter::Semicolon => Box::new(text.split(';')),
        };
        parts
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn join<S: AsRef<str>>(self, items: &[S]) -> String {
        items
            .iter()
            .map(|item| item.as_ref())
            .collect::<Vec<&str>>()
            .join(self.separator())
    }

    /// Read a list from a delimited string or an array of strings. Array
    /// items are split too; null-like values give an empty list.
    pub fn from_node(self, node: &JsonNode) -> Vec<String> {
        match node {
            JsonNode::Array(arr) => arr
                .iter()
                .filter_map(|item| String::from_node(item, false).ok())
                .flat_map(|text| self.split(&text))
                .collect(),
            other if other.is_null_like() => Vec::new(),
            other => String::from_node(other, false)
                .map(|text| self.split(&text))
                .unwrap_or_default(),
        }
    }

    /// Write a list as a single delimited string.
    pub fn to_node<S: AsRef<str>>(self, items: &[S]) -> JsonNode {
        JsonNode::from_string(self.join(items))
    }
}

impl SchemaOverride for StringListConverter {
    fn override_schema(&self, schema: JsonSchemaDescription) -> JsonSchemaDescription {
        let meta = schema.meta().clone();
        JsonSchemaDescription::Array {
            items: Some(Box::new(JsonSchemaDescription::string())),
            meta,
        }
    }
}
