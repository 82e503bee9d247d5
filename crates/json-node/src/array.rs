//! Array nodes: ordered, index-addressable sequences.
//!
//! Positions can be addressed from the start (`arr[0]`) or from the end
//! (`arr[FromEnd(1)]` is the last element). Indexing never panics: an
//! out-of-range position yields the Undefined node. The `value_at` family
//! reports the same positions as [`NodeError::IndexOutOfRange`] instead.

use std::ops::Index;
use std::slice::{Iter, IterMut};
use std::vec::IntoIter;

use crate::convert::FromNode;
use crate::error::{NodeError, Result};
use crate::node::{JsonNode, UNDEFINED};
use crate::object::ObjectNode;

/// A position counted from the end: `FromEnd(1)` is the last element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FromEnd(pub usize);

/// A JSON array.
#[derive(Debug, Clone, Default)]
pub struct ArrayNode {
    items: Vec<JsonNode>,
}

impl ArrayNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Parse JSON text whose root must be an array.
    pub fn parse(json: &str) -> Result<Self> {
        match JsonNode::parse(json)? {
            JsonNode::Array(arr) => Ok(arr),
            other => Err(NodeError::InvalidOperation(format!(
                "expect an array but it is {}",
                other.kind().name()
            ))),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, JsonNode> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, JsonNode> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[JsonNode] {
        &self.items
    }

    pub fn push(&mut self, value: impl Into<JsonNode>) {
        self.items.push(value.into());
    }

    /// Insert at `index`, shifting later items. `index == len` appends.
    pub fn insert(&mut self, index: usize, value: impl Into<JsonNode>) -> Result<()> {
        if index > self.items.len() {
            return Err(self.out_of_range(position(index)));
        }
        self.items.insert(index, value.into());
        Ok(())
    }

    /// Replace the item at `index` and return the previous one.
    pub fn set(&mut self, index: usize, value: impl Into<JsonNode>) -> Result<JsonNode> {
        let len = self.items.len();
        match self.items.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, value.into())),
            None => Err(NodeError::IndexOutOfRange {
                index: position(index),
                len,
            }),
        }
    }

    pub fn remove(&mut self, index: usize) -> Option<JsonNode> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn get(&self, index: usize) -> Option<&JsonNode> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut JsonNode> {
        self.items.get_mut(index)
    }

    /// `get_from_end(1)` is the last item; `0` and offsets past the start miss.
    pub fn get_from_end(&self, offset: usize) -> Option<&JsonNode> {
        self.resolve(FromEnd(offset)).and_then(|i| self.items.get(i))
    }

    /// Absolute position of a from-end offset, if it lies inside the array.
    pub fn resolve(&self, index: FromEnd) -> Option<usize> {
        if index.0 == 0 {
            return None;
        }
        self.items.len().checked_sub(index.0)
    }

    /// Throwing access by position.
    pub fn value_at(&self, index: usize) -> Result<&JsonNode> {
        self.items
            .get(index)
            .ok_or_else(|| self.out_of_range(position(index)))
    }

    /// Throwing access from the end.
    pub fn value_at_end(&self, offset: usize) -> Result<&JsonNode> {
        self.get_from_end(offset).ok_or_else(|| {
            let len = self.items.len() as i64;
            let index = i64::try_from(offset).map_or(i64::MIN, |o| len.saturating_sub(o));
            self.out_of_range(index)
        })
    }

    /// Required-value getter: converts the item or fails.
    pub fn value<T: FromNode>(&self, index: usize, strict: bool) -> Result<T> {
        self.value_at(index)?.convert(strict)
    }

    /// Non-failing getter in compatible mode.
    pub fn try_value<T: FromNode>(&self, index: usize) -> Option<T> {
        self.items.get(index)?.try_convert(false).ok()
    }

    pub fn get_str(&self, index: usize) -> Option<&str> {
        self.items.get(index)?.as_str()
    }

    pub fn get_object(&self, index: usize) -> Option<&ObjectNode> {
        self.items.get(index)?.as_object()
    }

    pub fn get_array(&self, index: usize) -> Option<&ArrayNode> {
        self.items.get(index)?.as_array()
    }

    /// Texts of the present string items, skipping everything else.
    pub fn strings(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(JsonNode::as_str)
    }

    /// Items convertible to `i64` in compatible mode, skipping the rest.
    pub fn integers(&self) -> Vec<i64> {
        self.items
            .iter()
            .filter_map(|item| item.try_convert::<i64>(false).ok())
            .collect()
    }

    fn out_of_range(&self, index: i64) -> NodeError {
        NodeError::IndexOutOfRange {
            index,
            len: self.items.len(),
        }
    }
}

/// A position as reported in errors, saturating at `i64::MAX`.
fn position(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}

impl Index<usize> for ArrayNode {
    type Output = JsonNode;

    fn index(&self, index: usize) -> &JsonNode {
        self.items.get(index).unwrap_or(&UNDEFINED)
    }
}

impl Index<FromEnd> for ArrayNode {
    type Output = JsonNode;

    fn index(&self, index: FromEnd) -> &JsonNode {
        self.get_from_end(index.0).unwrap_or(&UNDEFINED)
    }
}

impl From<Vec<JsonNode>> for ArrayNode {
    fn from(items: Vec<JsonNode>) -> Self {
        Self { items }
    }
}

impl<T: Into<JsonNode>> FromIterator<T> for ArrayNode {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<T: Into<JsonNode>> Extend<T> for ArrayNode {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a> IntoIterator for &'a ArrayNode {
    type Item = &'a JsonNode;
    type IntoIter = Iter<'a, JsonNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for ArrayNode {
    type Item = JsonNode;
    type IntoIter = IntoIter<JsonNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
