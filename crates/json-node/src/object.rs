//! Object nodes: ordered string-keyed maps.
//!
//! Keys are unique and iterate in insertion order. Lookups that miss return
//! the shared Undefined node, so `obj["missing"].kind()` is always
//! [`ValueKind::Undefined`](crate::ValueKind::Undefined) and never panics.
//!
//! An object owns its children by value. Inserting `obj.clone()` into `obj`
//! stores an independent deep copy: later mutation of `obj` never reaches
//! the copy, and the tree cannot contain a cycle.

use std::ops::{Index, IndexMut};

use chrono::{DateTime, Utc};
use indexmap::map::{IntoIter, Iter, IterMut, Keys, Values};
use indexmap::IndexMap;
use uuid::Uuid;

use crate::array::ArrayNode;
use crate::convert::FromNode;
use crate::error::{NodeError, Result};
use crate::node::{JsonNode, UNDEFINED};

/// Reserved key holding the schema URI of the document.
pub const SCHEMA_KEY: &str = "$schema";

/// Reserved key holding the identifier of the document.
pub const ID_KEY: &str = "$id";

/// A JSON object.
#[derive(Debug, Clone, Default)]
pub struct ObjectNode {
    entries: IndexMap<String, JsonNode>,
}

impl ObjectNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Parse JSON text whose root must be an object.
    pub fn parse(json: &str) -> Result<Self> {
        match JsonNode::parse(json)? {
            JsonNode::Object(obj) => Ok(obj),
            other => Err(NodeError::InvalidOperation(format!(
                "expect an object but it is {}",
                other.kind().name()
            ))),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> Keys<'_, String, JsonNode> {
        self.entries.keys()
    }

    pub fn values(&self) -> Values<'_, String, JsonNode> {
        self.entries.values()
    }

    pub fn iter(&self) -> Iter<'_, String, JsonNode> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, String, JsonNode> {
        self.entries.iter_mut()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&JsonNode> {
        self.entries.get(key)
    }

    /// The property, or the Undefined node when absent.
    pub fn get_or_undefined(&self, key: &str) -> &JsonNode {
        self.entries.get(key).unwrap_or(&UNDEFINED)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut JsonNode> {
        self.entries.get_mut(key)
    }

    /// Set a property and return the previous value.
    ///
    /// An existing key keeps its position. Setting [`JsonNode::Undefined`]
    /// removes the key, since Undefined means "absent".
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<JsonNode>) -> Option<JsonNode> {
        let key = key.into();
        match value.into() {
            JsonNode::Undefined => self.entries.shift_remove(&key),
            value => self.entries.insert(key, value),
        }
    }

    pub fn set_null(&mut self, key: impl Into<String>) -> Option<JsonNode> {
        self.entries.insert(key.into(), JsonNode::Null)
    }

    /// Set the property only when the key is absent. Returns whether it was set.
    pub fn set_if_absent(&mut self, key: impl Into<String>, value: impl Into<JsonNode>) -> bool {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return false;
        }
        let value = value.into();
        if value.is_undefined() {
            return false;
        }
        self.entries.insert(key, value);
        true
    }

    /// Remove a property, preserving the order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<JsonNode> {
        self.entries.shift_remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The `$schema` property.
    pub fn schema(&self) -> Option<&str> {
        self.get_or_undefined(SCHEMA_KEY).as_str()
    }

    pub fn set_schema(&mut self, uri: impl Into<String>) {
        let uri: String = uri.into();
        self.set(SCHEMA_KEY, uri);
    }

    /// The `$id` property.
    pub fn id(&self) -> Option<&str> {
        self.get_or_undefined(ID_KEY).as_str()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        let id: String = id.into();
        self.set(ID_KEY, id);
    }

    /// Required-value getter: converts the property or fails.
    ///
    /// A missing key fails like a null value (`InvalidOperation`) unless `T`
    /// accepts null.
    pub fn value<T: FromNode>(&self, key: &str, strict: bool) -> Result<T> {
        self.get_or_undefined(key).convert(strict)
    }

    /// Non-failing getter in compatible mode.
    pub fn try_value<T: FromNode>(&self, key: &str) -> Option<T> {
        self.get_or_undefined(key).try_convert(false).ok()
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get_or_undefined(key).as_str()
    }

    pub fn get_i32(&self, key: &str) -> Option<i32> {
        self.try_value(key)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.try_value(key)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        match self.get_or_undefined(key) {
            node if node.is_null_like() => None,
            node => node.try_convert(false).ok(),
        }
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.try_value(key)
    }

    pub fn get_datetime(&self, key: &str) -> Option<DateTime<Utc>> {
        self.try_value(key)
    }

    pub fn get_uuid(&self, key: &str) -> Option<Uuid> {
        match self.get_or_undefined(key) {
            node if node.is_null_like() => None,
            node => node.try_convert(false).ok(),
        }
    }

    pub fn get_object(&self, key: &str) -> Option<&ObjectNode> {
        self.get_or_undefined(key).as_object()
    }

    pub fn get_object_mut(&mut self, key: &str) -> Option<&mut ObjectNode> {
        self.entries.get_mut(key).and_then(JsonNode::as_object_mut)
    }

    pub fn get_array(&self, key: &str) -> Option<&ArrayNode> {
        self.get_or_undefined(key).as_array()
    }

    pub fn get_array_mut(&mut self, key: &str) -> Option<&mut ArrayNode> {
        self.entries.get_mut(key).and_then(JsonNode::as_array_mut)
    }

    /// Follow a sequence of keys (and array positions) from this object.
    pub fn get_path(&self, path: &[&str]) -> &JsonNode {
        match path.split_first() {
            None => &UNDEFINED,
            Some((first, rest)) => crate::path::walk(self.get_or_undefined(first), rest),
        }
    }
}

impl Index<&str> for ObjectNode {
    type Output = JsonNode;

    fn index(&self, key: &str) -> &JsonNode {
        self.get_or_undefined(key)
    }
}

/// Inserts `Null` for a missing key, mirroring `serde_json::Value`.
impl IndexMut<&str> for ObjectNode {
    fn index_mut(&mut self, key: &str) -> &mut JsonNode {
        self.entries.entry(key.to_string()).or_insert(JsonNode::Null)
    }
}

impl<'a> IntoIterator for &'a ObjectNode {
    type Item = (&'a String, &'a JsonNode);
    type IntoIter = Iter<'a, String, JsonNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for ObjectNode {
    type Item = (String, JsonNode);
    type IntoIter = IntoIter<String, JsonNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<JsonNode>> FromIterator<(K, V)> for ObjectNode {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut obj = ObjectNode::new();
        obj.extend(iter);
        obj
    }
}

impl<K: Into<String>, V: Into<JsonNode>> Extend<(K, V)> for ObjectNode {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}
