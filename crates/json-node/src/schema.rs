//! JSON Schema inference.
//!
//! Two entry points produce a [`JsonSchemaDescription`] tree:
//!
//! - [`create_schema`] walks a static type description ([`DescribeType`]).
//! - [`create_schema_from_object`] walks a live [`ObjectNode`], branching on
//!   each property's [`ValueKind`].
//!
//! Both walks are depth-limited by [`SchemaOptions::max_depth`]: every object
//! or array level counts against the budget, and a container on the last
//! level becomes an untyped `object` / `array` stub, so a budget of `n`
//! never yields a tree deeper than `n` (a budget of 0 behaves like 1). An
//! optional [`SchemaCreationHandler`] may replace the derived schema of every
//! property and array item (bottom-up) and finally of the whole node; it
//! receives a [`Breadcrumb`] describing the ancestry of the node being built.
//! Array items and map values appear in breadcrumbs under the name `*`.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use url::Url;
use uuid::Uuid;

use crate::array::ArrayNode;
use crate::convert::UriRef;
use crate::kind::ValueKind;
use crate::node::JsonNode;
use crate::object::ObjectNode;
use crate::string::OriginHint;

/// Default recursion budget.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Options shared by both schema walks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchemaOptions {
    /// Object/array levels the result may span, the root included.
    pub max_depth: usize,
    /// Description attached to the root schema.
    pub description: Option<String>,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            description: None,
        }
    }
}

impl SchemaOptions {
    /// The depth budget actually applied; the root always takes one level.
    pub fn depth_budget(&self) -> usize {
        self.max_depth.max(1)
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

// ============================================================================
// Schema description tree
// ============================================================================

/// Metadata common to every schema node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaMeta {
    pub description: Option<String>,
    pub nullable: bool,
}

/// An inferred schema.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonSchemaDescription {
    Object {
        properties: IndexMap<String, JsonSchemaDescription>,
        required: Vec<String>,
        additional_properties: Option<Box<JsonSchemaDescription>>,
        meta: SchemaMeta,
    },
    Array {
        items: Option<Box<JsonSchemaDescription>>,
        meta: SchemaMeta,
    },
    String {
        format: Option<String>,
        enum_values: Vec<String>,
        meta: SchemaMeta,
    },
    Number(SchemaMeta),
    Integer(SchemaMeta),
    Boolean(SchemaMeta),
    Null(SchemaMeta),
}

impl JsonSchemaDescription {
    /// An object schema without properties.
    pub fn object() -> Self {
        JsonSchemaDescription::Object {
            properties: IndexMap::new(),
            required: Vec::new(),
            additional_properties: None,
            meta: SchemaMeta::default(),
        }
    }

    /// An array schema; `None` leaves the items untyped.
    pub fn array(items: Option<JsonSchemaDescription>) -> Self {
        JsonSchemaDescription::Array {
            items: items.map(Box::new),
            meta: SchemaMeta::default(),
        }
    }

    pub fn string() -> Self {
        JsonSchemaDescription::String {
            format: None,
            enum_values: Vec::new(),
            meta: SchemaMeta::default(),
        }
    }

    pub fn formatted_string(format: impl Into<String>) -> Self {
        JsonSchemaDescription::String {
            format: Some(format.into()),
            enum_values: Vec::new(),
            meta: SchemaMeta::default(),
        }
    }

    /// The JSON Schema `type` keyword.
    pub fn type_name(&self) -> &'static str {
        match self {
            JsonSchemaDescription::Object { .. } => "object",
            JsonSchemaDescription::Array { .. } => "array",
            JsonSchemaDescription::String { .. } => "string",
            JsonSchemaDescription::Number(_) => "number",
            JsonSchemaDescription::Integer(_) => "integer",
            JsonSchemaDescription::Boolean(_) => "boolean",
            JsonSchemaDescription::Null(_) => "null",
        }
    }

    pub fn meta(&self) -> &SchemaMeta {
        match self {
            JsonSchemaDescription::Object { meta, .. }
            | JsonSchemaDescription::Array { meta, .. }
            | JsonSchemaDescription::String { meta, .. }
            | JsonSchemaDescription::Number(meta)
            | JsonSchemaDescription::Integer(meta)
            | JsonSchemaDescription::Boolean(meta)
            | JsonSchemaDescription::Null(meta) => meta,
        }
    }

    pub fn meta_mut(&mut self) -> &mut SchemaMeta {
        match self {
            JsonSchemaDescription::Object { meta, .. }
            | JsonSchemaDescription::Array { meta, .. }
            | JsonSchemaDescription::String { meta, .. }
            | JsonSchemaDescription::Number(meta)
            | JsonSchemaDescription::Integer(meta)
            | JsonSchemaDescription::Boolean(meta)
            | JsonSchemaDescription::Null(meta) => meta,
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.meta().description.as_deref()
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.meta_mut().description = Some(description.into());
        self
    }

    /// Property schema of an object schema.
    pub fn property(&self, name: &str) -> Option<&JsonSchemaDescription> {
        match self {
            JsonSchemaDescription::Object { properties, .. } => properties.get(name),
            _ => None,
        }
    }

    /// Item schema of an array schema.
    pub fn items(&self) -> Option<&JsonSchemaDescription> {
        match self {
            JsonSchemaDescription::Array { items, .. } => items.as_deref(),
            _ => None,
        }
    }

    /// Nesting depth: scalars are 0, every object or array level adds 1.
    pub fn depth(&self) -> usize {
        match self {
            JsonSchemaDescription::Object {
                properties,
                additional_properties,
                ..
            } => {
                let children = properties
                    .values()
                    .map(JsonSchemaDescription::depth)
                    .chain(additional_properties.iter().map(|s| s.depth()))
                    .max()
                    .unwrap_or(0);
                1 + children
            }
            JsonSchemaDescription::Array { items, .. } => {
                1 + items.as_ref().map_or(0, |s| s.depth())
            }
            _ => 0,
        }
    }

    /// Render as a JSON Schema document fragment.
    pub fn to_node(&self) -> JsonNode {
        let mut obj = ObjectNode::new();
        let meta = self.meta();
        if meta.nullable && !matches!(self, JsonSchemaDescription::Null(_)) {
            obj.set("type", vec![self.type_name(), "null"]);
        } else {
            obj.set("type", self.type_name());
        }
        if let Some(description) = &meta.description {
            obj.set("description", description.as_str());
        }
        match self {
            JsonSchemaDescription::Object {
                properties,
                required,
                additional_properties,
                ..
            } => {
                if !properties.is_empty() {
                    let props: ObjectNode = properties
                        .iter()
                        .map(|(name, schema)| (name.as_str(), schema.to_node()))
                        .collect();
                    obj.set("properties", props);
                }
                if !required.is_empty() {
                    obj.set("required", required.clone());
                }
                if let Some(additional) = additional_properties {
                    obj.set("additionalProperties", additional.to_node());
                }
            }
            JsonSchemaDescription::Array { items, .. } => {
                if let Some(items) = items {
                    obj.set("items", items.to_node());
                }
            }
            JsonSchemaDescription::String {
                format,
                enum_values,
                ..
            } => {
                if let Some(format) = format {
                    obj.set("format", format.as_str());
                }
                if !enum_values.is_empty() {
                    obj.set("enum", enum_values.clone());
                }
            }
            _ => {}
        }
        JsonNode::Object(obj)
    }
}

// ============================================================================
// Breadcrumbs and handlers
// ============================================================================

/// A node's position in the walk: its property name, type name (static walk
/// only), depth below the root and parent.
#[derive(Debug, Clone, Copy)]
pub struct Breadcrumb<'a> {
    pub property: Option<&'a str>,
    pub type_name: Option<&'a str>,
    pub depth: usize,
    parent: Option<&'a Breadcrumb<'a>>,
}

impl<'a> Breadcrumb<'a> {
    pub fn root(type_name: Option<&'a str>) -> Self {
        Self {
            property: None,
            type_name,
            depth: 0,
            parent: None,
        }
    }

    pub fn child(&'a self, property: &'a str, type_name: Option<&'a str>) -> Breadcrumb<'a> {
        Breadcrumb {
            property: Some(property),
            type_name,
            depth: self.depth + 1,
            parent: Some(self),
        }
    }

    pub fn parent(&self) -> Option<&'a Breadcrumb<'a>> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Property names from the root down to this node.
    pub fn path(&self) -> Vec<&'a str> {
        let mut names = Vec::new();
        let mut current = Some(self);
        while let Some(crumb) = current {
            if let Some(property) = crumb.property {
                names.push(property);
            }
            current = crumb.parent;
        }
        names.reverse();
        names
    }

    /// Whether this node or one of its ancestors has the given type name.
    pub fn has_type_in_chain(&self, type_name: &str) -> bool {
        let mut current = Some(self);
        while let Some(crumb) = current {
            if crumb.type_name == Some(type_name) {
                return true;
            }
            current = crumb.parent;
        }
        false
    }
}

/// Breadcrumb property name of array items and map values.
pub const ITEM_PROPERTY: &str = "*";

/// Hook that may replace each derived schema.
pub trait SchemaCreationHandler {
    fn on_created(
        &self,
        schema: JsonSchemaDescription,
        breadcrumb: &Breadcrumb<'_>,
    ) -> JsonSchemaDescription;
}

impl<F> SchemaCreationHandler for F
where
    F: Fn(JsonSchemaDescription, &Breadcrumb<'_>) -> JsonSchemaDescription,
{
    fn on_created(
        &self,
        schema: JsonSchemaDescription,
        breadcrumb: &Breadcrumb<'_>,
    ) -> JsonSchemaDescription {
        self(schema, breadcrumb)
    }
}

fn apply_handler(
    handler: Option<&dyn SchemaCreationHandler>,
    schema: JsonSchemaDescription,
    breadcrumb: &Breadcrumb<'_>,
) -> JsonSchemaDescription {
    match handler {
        Some(handler) => {
            trace!(path = ?breadcrumb.path(), "schema creation handler invoked");
            handler.on_created(schema, breadcrumb)
        }
        None => schema,
    }
}

/// A per-property schema replacement, attached to a [`FieldShape`].
pub trait SchemaOverride: fmt::Debug {
    fn override_schema(&self, schema: JsonSchemaDescription) -> JsonSchemaDescription;
}

// ============================================================================
// Static type descriptions
// ============================================================================

/// Structural description of a host type.
#[derive(Debug, Clone)]
pub enum TypeShape {
    Boolean,
    Integer,
    Number,
    String,
    /// A string with a JSON Schema `format`, e.g. `date-time`.
    Formatted(&'static str),
    /// A string restricted to the member names.
    Enum(Vec<&'static str>),
    Nullable(Box<TypeShape>),
    Sequence(Box<TypeShape>),
    /// String-keyed map with values of one shape.
    Map(Box<TypeShape>),
    Object(ObjectShape),
    /// Any object, properties unknown.
    AnyObject,
    /// Any array, items unknown.
    AnyArray,
}

impl TypeShape {
    pub fn object(name: &'static str, fields: Vec<FieldShape>) -> Self {
        TypeShape::Object(ObjectShape {
            name,
            description: None,
            fields,
        })
    }

    pub fn type_name(&self) -> Option<&'static str> {
        match self {
            TypeShape::Object(obj) => Some(obj.name),
            TypeShape::Nullable(inner) => inner.type_name(),
            _ => None,
        }
    }
}

/// A named record type.
#[derive(Debug, Clone)]
pub struct ObjectShape {
    pub name: &'static str,
    pub description: Option<&'static str>,
    pub fields: Vec<FieldShape>,
}

impl ObjectShape {
    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

/// A property of a record type. The shape is produced lazily so a type may
/// refer to itself.
#[derive(Debug, Clone)]
pub struct FieldShape {
    pub name: &'static str,
    pub description: Option<&'static str>,
    pub required: bool,
    pub shape: fn() -> TypeShape,
    pub converter: Option<&'static dyn SchemaOverride>,
}

impl FieldShape {
    pub fn of<T: DescribeType>(name: &'static str) -> Self {
        Self {
            name,
            description: None,
            required: false,
            shape: T::describe,
            converter: None,
        }
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_override(mut self, converter: &'static dyn SchemaOverride) -> Self {
        self.converter = Some(converter);
        self
    }
}

/// Types that can describe their structure for schema inference.
pub trait DescribeType {
    fn describe() -> TypeShape;
}

macro_rules! impl_describe {
    ($shape:expr => $($ty:ty),+) => {$(
        impl DescribeType for $ty {
            fn describe() -> TypeShape {
                $shape
            }
        }
    )+};
}

impl_describe!(TypeShape::Boolean => bool);
impl_describe!(TypeShape::Integer => i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);
impl_describe!(TypeShape::Number => f32, f64, Decimal);
impl_describe!(TypeShape::String => String, char);
impl_describe!(TypeShape::Formatted("uuid") => Uuid);
impl_describe!(TypeShape::Formatted("date-time") => DateTime<Utc>, DateTime<FixedOffset>);
impl_describe!(TypeShape::Formatted("uri") => Url, UriRef);
impl_describe!(TypeShape::AnyObject => ObjectNode);
impl_describe!(TypeShape::AnyArray => ArrayNode);

impl<T: DescribeType> DescribeType for Option<T> {
    fn describe() -> TypeShape {
        TypeShape::Nullable(Box::new(T::describe()))
    }
}

impl<T: DescribeType> DescribeType for Vec<T> {
    fn describe() -> TypeShape {
        TypeShape::Sequence(Box::new(T::describe()))
    }
}

impl<T: DescribeType> DescribeType for HashMap<String, T> {
    fn describe() -> TypeShape {
        TypeShape::Map(Box::new(T::describe()))
    }
}

impl<T: DescribeType> DescribeType for BTreeMap<String, T> {
    fn describe() -> TypeShape {
        TypeShape::Map(Box::new(T::describe()))
    }
}

impl<T: DescribeType> DescribeType for IndexMap<String, T> {
    fn describe() -> TypeShape {
        TypeShape::Map(Box::new(T::describe()))
    }
}

/// Infer the schema of a static type.
pub fn create_schema<T: DescribeType>(
    options: &SchemaOptions,
    handler: Option<&dyn SchemaCreationHandler>,
) -> JsonSchemaDescription {
    let shape = T::describe();
    let root = Breadcrumb::root(shape.type_name());
    let mut schema = describe_shape(&shape, options.depth_budget(), &root, handler);
    if let Some(description) = &options.description {
        schema.meta_mut().description = Some(description.clone());
    }
    apply_handler(handler, schema, &root)
}

fn describe_shape(
    shape: &TypeShape,
    remaining: usize,
    crumb: &Breadcrumb<'_>,
    handler: Option<&dyn SchemaCreationHandler>,
) -> JsonSchemaDescription {
    match shape {
        TypeShape::Boolean => JsonSchemaDescription::Boolean(SchemaMeta::default()),
        TypeShape::Integer => JsonSchemaDescription::Integer(SchemaMeta::default()),
        TypeShape::Number => JsonSchemaDescription::Number(SchemaMeta::default()),
        TypeShape::String => JsonSchemaDescription::string(),
        TypeShape::Formatted(format) => JsonSchemaDescription::formatted_string(*format),
        TypeShape::Enum(names) => JsonSchemaDescription::String {
            format: None,
            enum_values: names.iter().map(|s| s.to_string()).collect(),
            meta: SchemaMeta::default(),
        },
        TypeShape::Nullable(inner) => {
            let mut schema = describe_shape(inner, remaining, crumb, handler);
            schema.meta_mut().nullable = true;
            schema
        }
        TypeShape::AnyObject => JsonSchemaDescription::object(),
        TypeShape::AnyArray => JsonSchemaDescription::array(None),
        TypeShape::Sequence(_) | TypeShape::Map(_) | TypeShape::Object(_) if remaining <= 1 => {
            debug!(path = ?crumb.path(), "schema depth exhausted, emitting stub");
            match shape {
                TypeShape::Sequence(_) => JsonSchemaDescription::array(None),
                _ => JsonSchemaDescription::object(),
            }
        }
        TypeShape::Sequence(item) => {
            let items = describe_element(item, remaining - 1, crumb, handler);
            JsonSchemaDescription::array(Some(items))
        }
        TypeShape::Map(value) => {
            let values = describe_element(value, remaining - 1, crumb, handler);
            JsonSchemaDescription::Object {
                properties: IndexMap::new(),
                required: Vec::new(),
                additional_properties: Some(Box::new(values)),
                meta: SchemaMeta::default(),
            }
        }
        TypeShape::Object(obj) => {
            let mut properties = IndexMap::with_capacity(obj.fields.len());
            let mut required = Vec::new();
            for field in &obj.fields {
                let field_shape = (field.shape)();
                let child = crumb.child(field.name, field_shape.type_name());
                let mut schema = describe_shape(&field_shape, remaining - 1, &child, handler);
                if let Some(converter) = field.converter {
                    schema = converter.override_schema(schema);
                }
                if let Some(description) = field.description {
                    schema.meta_mut().description = Some(description.to_string());
                }
                let schema = apply_handler(handler, schema, &child);
                if field.required {
                    required.push(field.name.to_string());
                }
                properties.insert(field.name.to_string(), schema);
            }
            JsonSchemaDescription::Object {
                properties,
                required,
                additional_properties: None,
                meta: SchemaMeta {
                    description: obj.description.map(str::to_string),
                    nullable: false,
                },
            }
        }
    }
}

/// Schema of a sequence item or map value, offered to the handler as `*`.
fn describe_element(
    shape: &TypeShape,
    remaining: usize,
    crumb: &Breadcrumb<'_>,
    handler: Option<&dyn SchemaCreationHandler>,
) -> JsonSchemaDescription {
    let item = crumb.child(ITEM_PROPERTY, shape.type_name());
    let schema = describe_shape(shape, remaining, &item, handler);
    apply_handler(handler, schema, &item)
}

// ============================================================================
// Live documents
// ============================================================================

/// Infer the schema of a live object from the kinds of its properties.
pub fn create_schema_from_object(
    obj: &ObjectNode,
    options: &SchemaOptions,
    handler: Option<&dyn SchemaCreationHandler>,
) -> JsonSchemaDescription {
    let root = Breadcrumb::root(None);
    let budget = options.depth_budget();
    let mut schema = if budget <= 1 {
        debug!("schema depth exhausted at the root, emitting stub");
        JsonSchemaDescription::object()
    } else {
        describe_object(obj, budget, &root, handler)
    };
    if let Some(description) = &options.description {
        schema.meta_mut().description = Some(description.clone());
    }
    apply_handler(handler, schema, &root)
}

fn describe_object(
    obj: &ObjectNode,
    remaining: usize,
    crumb: &Breadcrumb<'_>,
    handler: Option<&dyn SchemaCreationHandler>,
) -> JsonSchemaDescription {
    let mut properties = IndexMap::with_capacity(obj.len());
    for (key, value) in obj {
        if value.is_undefined() {
            continue;
        }
        let child = crumb.child(key, None);
        let schema = describe_node(value, remaining - 1, &child, handler);
        properties.insert(key.clone(), apply_handler(handler, schema, &child));
    }
    JsonSchemaDescription::Object {
        properties,
        required: Vec::new(),
        additional_properties: None,
        meta: SchemaMeta::default(),
    }
}

fn describe_node(
    node: &JsonNode,
    remaining: usize,
    crumb: &Breadcrumb<'_>,
    handler: Option<&dyn SchemaCreationHandler>,
) -> JsonSchemaDescription {
    match node.kind() {
        ValueKind::Undefined | ValueKind::Null => JsonSchemaDescription::Null(SchemaMeta::default()),
        ValueKind::True | ValueKind::False => JsonSchemaDescription::Boolean(SchemaMeta::default()),
        ValueKind::Number => match node {
            JsonNode::Integer(_) => JsonSchemaDescription::Integer(SchemaMeta::default()),
            _ => JsonSchemaDescription::Number(SchemaMeta::default()),
        },
        ValueKind::String => match node.as_string_node().map(|s| s.hint()) {
            Some(OriginHint::Date) => JsonSchemaDescription::formatted_string("date-time"),
            Some(OriginHint::Guid) => JsonSchemaDescription::formatted_string("uuid"),
            _ => JsonSchemaDescription::string(),
        },
        ValueKind::Object | ValueKind::Array if remaining <= 1 => {
            debug!(path = ?crumb.path(), "schema depth exhausted, emitting stub");
            if node.is_array() {
                JsonSchemaDescription::array(None)
            } else {
                JsonSchemaDescription::object()
            }
        }
        ValueKind::Object => match node.as_object() {
            Some(obj) => describe_object(obj, remaining, crumb, handler),
            None => JsonSchemaDescription::object(),
        },
        ValueKind::Array => {
            let items = node
                .as_array()
                .map(|arr| describe_items(arr, remaining - 1, crumb, handler));
            JsonSchemaDescription::array(items.flatten())
        }
    }
}

/// The item schema shared by every non-null element, if they agree on a type.
/// The handler sees the agreed schema once, under the `*` breadcrumb.
fn describe_items(
    arr: &ArrayNode,
    remaining: usize,
    crumb: &Breadcrumb<'_>,
    handler: Option<&dyn SchemaCreationHandler>,
) -> Option<JsonSchemaDescription> {
    let item = crumb.child(ITEM_PROPERTY, None);
    let mut schemas = arr
        .iter()
        .filter(|node| !node.is_null_like())
        .map(|node| describe_node(node, remaining, &item, handler));
    let first = schemas.next()?;
    if schemas.all(|s| s.type_name() == first.type_name()) {
        Some(apply_handler(handler, first, &item))
    } else {
        None
    }
}
