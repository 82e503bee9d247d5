//! # json-node
//!
//! A polymorphic JSON value model with a permissive, mode-aware conversion
//! engine.
//!
//! Every JSON value is a [`JsonNode`]: Undefined (a missing property), null,
//! a boolean, a number (integer, double or decimal), a string, an object or
//! an array. Reading a value into a host type goes through [`FromNode`], in
//! one of two modes:
//!
//! - **strict**: the node's kind must match the target (`"1"` is not a
//!   number, `1` is not a string).
//! - **compatible**: scalars are coerced where a sensible reading exists
//!   (`"1"` is a number, `true` is `1`, `12` is `"12"`).
//!
//! ## Quick start
//!
//! ```rust
//! use json_node::{JsonNode, ObjectNode};
//!
//! let doc = JsonNode::parse(r#"{"name":"Alice","age":"42","tags":["a","b"]}"#).unwrap();
//! assert_eq!(doc["name"].as_str(), Some("Alice"));
//!
//! // "42" is a string: strict mode refuses, compatible mode parses it.
//! assert!(doc["age"].try_convert::<i32>(true).is_err());
//! assert_eq!(doc["age"].try_convert::<i32>(false).unwrap(), 42);
//!
//! // Missing properties read as Undefined, never as a panic.
//! assert!(doc["missing"]["deeper"].is_undefined());
//!
//! let mut obj = ObjectNode::new();
//! obj.set("count", 3);
//! assert_eq!(obj.to_string(), r#"{"count":3}"#);
//! ```
//!
//! ## Modules
//!
//! - [`node`]: `JsonNode` and its constructors
//! - [`string`], [`object`], [`array`]: the string and container nodes
//! - [`convert`]: `FromNode`, runtime conversion targets, enums
//! - [`serialize`]: JSON text in and out, indentation presets
//! - [`schema`]: JSON Schema inference from types and live objects
//! - [`string_list`]: delimited string lists
//! - [`datetime`]: tick and timestamp helpers
//! - [`error`]: error types

pub mod array;
pub mod convert;
pub mod datetime;
mod equality;
pub mod error;
pub mod kind;
pub mod node;
pub mod object;
mod path;
pub mod schema;
pub mod serialize;
pub mod string;
pub mod string_list;

pub use array::{ArrayNode, FromEnd};
pub use convert::{ConvertTarget, Deserialized, FromNode, NodeEnum, UriRef};
pub use error::{CastError, ConvertError, ConvertErrorKind, NodeError, Result};
pub use kind::ValueKind;
pub use node::JsonNode;
pub use object::ObjectNode;
pub use schema::{
    create_schema, create_schema_from_object, Breadcrumb, DescribeType, FieldShape,
    JsonSchemaDescription, ObjectShape, SchemaCreationHandler, SchemaMeta, SchemaOptions,
    SchemaOverride, TypeShape, ITEM_PROPERTY,
};
pub use serialize::IndentStyle;
pub use string::{OriginHint, StringNode};
pub use string_list::StringListConverter;
