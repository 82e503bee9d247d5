//! Path lookup.
//!
//! A path is a sequence of segments. On an object a segment is a key; on an
//! array it is a position, where a negative position counts from the end
//! (`-1` is the last item). A dotted path such as `"orders.-1.total"` splits
//! on `.`. Anything that cannot be followed yields the Undefined node.

use crate::array::FromEnd;
use crate::node::{JsonNode, UNDEFINED};

/// Follow `segments` from `node`.
pub(crate) fn walk<'a>(node: &'a JsonNode, segments: &[&str]) -> &'a JsonNode {
    let mut current = node;
    for segment in segments {
        current = match current {
            JsonNode::Object(obj) => obj.get_or_undefined(segment),
            JsonNode::Array(arr) => match segment.parse::<i64>() {
                Ok(i) if i >= 0 => usize::try_from(i).map_or(&UNDEFINED, |i| &arr[i]),
                Ok(i) => usize::try_from(i.unsigned_abs()).map_or(&UNDEFINED, |i| &arr[FromEnd(i)]),
                Err(_) => &UNDEFINED,
            },
            _ => &UNDEFINED,
        };
        if current.is_undefined() {
            break;
        }
    }
    current
}

impl JsonNode {
    /// Follow a sequence of keys and positions.
    pub fn get_path(&self, segments: &[&str]) -> &JsonNode {
        walk(self, segments)
    }

    /// Follow a dot-separated path. The empty path is the node itself.
    pub fn select(&self, path: &str) -> &JsonNode {
        if path.is_empty() {
            return self;
        }
        let segments: Vec<&str> = path.split('.').collect();
        walk(self, &segments)
    }
}
