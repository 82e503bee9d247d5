//! Conversion engine: maps any node to a requested host type under a strict
//! or a compatible coercion policy.
//!
//! Every target type implements [`FromNode`]. The rules, in the order the
//! engine applies them:
//!
//! 1. **Identity**: `JsonNode` (and `ObjectNode` / `ArrayNode` /
//!    `StringNode` for the matching variant) returns the node itself.
//! 2. **Null source**: `Option<T>` yields `None`; `Uuid` yields the nil UUID;
//!    `f64` / `f32` yield `NaN` in compatible mode; `()` accepts null; every
//!    other target fails with [`ConvertErrorKind::NotNullExpected`].
//! 3. **Numbers**: integer targets are range-checked and report
//!    [`ConvertErrorKind::Overflow`] when the value does not fit. Strings are
//!    parsed only in compatible mode, reading the origin hint first.
//! 4. **Booleans**: `true` / `false` strings (any case) in both modes;
//!    `"1"` / `"0"` and non-zero numbers in compatible mode only.
//! 5. **Dates**: date strings, or JavaScript ticks from integers and
//!    integer-hinted strings.
//! 6. **GUID**, **Base64 bytes**, **char**, **URI**: string forms only
//!    (plus integer code points for `char`).
//! 7. **Enums**: member name first, then ordinal; see [`NodeEnum`].
//! 8. **Arbitrary types**: [`JsonNode::deserialize_as`] and [`Deserialized`]
//!    go through `serde`; failures become
//!    [`ConvertErrorKind::DeserializationFailed`].
//!
//! In strict mode the node's kind must already match the target's natural
//! kind; compatible mode allows cross-kind coercion such as `"42"` → `42`.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use tracing::trace;
use url::Url;
use uuid::Uuid;

use crate::array::ArrayNode;
use crate::datetime::{from_js_ticks, parse_datetime, to_js_ticks};
use crate::error::{CastError, ConvertError, ConvertErrorKind, NodeError};
use crate::kind::ValueKind;
use crate::node::JsonNode;
use crate::object::ObjectNode;
use crate::serialize::IndentStyle;
use crate::string::{format_float, OriginHint, StringNode};

/// Conversion from a node to a host type.
///
/// Implement this for your own types to make them available to
/// [`JsonNode::convert`] and friends.
pub trait FromNode: Sized {
    fn from_node(node: &JsonNode, strict: bool) -> Result<Self, ConvertError>;
}

impl JsonNode {
    /// Convert to `T`, failing with an umbrella [`NodeError`]:
    /// `InvalidOperation` for kind and null mismatches, `NotSupported` for
    /// overflow, unsupported targets and deserialization failures.
    pub fn convert<T: FromNode>(&self, strict: bool) -> crate::error::Result<T> {
        self.try_convert(strict).map_err(NodeError::from)
    }

    /// Convert to `T`, returning the classified failure.
    pub fn try_convert<T: FromNode>(&self, strict: bool) -> Result<T, ConvertError> {
        T::from_node(self, strict).inspect_err(|err| {
            trace!(
                target_type = std::any::type_name::<T>(),
                kind = %self.kind(),
                strict,
                error = %err,
                "conversion failed"
            );
        })
    }

    /// Convert to `T`, or `T::default()` when the conversion fails.
    pub fn convert_or_default<T: FromNode + Default>(&self, strict: bool) -> T {
        self.try_convert(strict).unwrap_or_default()
    }

    /// Explicit narrowing cast in compatible mode; every failure becomes a
    /// single [`CastError`].
    pub fn cast<T: FromNode>(&self) -> Result<T, CastError> {
        self.try_convert(false).map_err(CastError::from)
    }

    /// Convert to an enum by member name or ordinal.
    pub fn as_enum<E: NodeEnum>(&self, strict: bool) -> Result<E, ConvertError> {
        enum_from_node(self, strict)
    }

    /// Materialize an arbitrary `serde` type from this node.
    pub fn deserialize_as<T: DeserializeOwned>(&self) -> Result<T, ConvertError> {
        serde_json::from_value(self.to_value()).map_err(|err| ConvertError::deserialization(&err))
    }

    /// Convert to a target chosen at runtime and wrap the result back into a node.
    pub fn convert_to(&self, target: ConvertTarget, strict: bool) -> Result<JsonNode, ConvertError> {
        let node = match target {
            ConvertTarget::Node => self.clone(),
            ConvertTarget::Null => {
                self.try_convert::<()>(strict)?;
                JsonNode::Null
            }
            ConvertTarget::Boolean => JsonNode::from(self.try_convert::<bool>(strict)?),
            ConvertTarget::Char => JsonNode::from(self.try_convert::<char>(strict)?),
            ConvertTarget::Int8 => JsonNode::from(self.try_convert::<i8>(strict)?),
            ConvertTarget::Int16 => JsonNode::from(self.try_convert::<i16>(strict)?),
            ConvertTarget::Int32 => JsonNode::from(self.try_convert::<i32>(strict)?),
            ConvertTarget::Int64 => JsonNode::from(self.try_convert::<i64>(strict)?),
            ConvertTarget::UInt8 => JsonNode::from(self.try_convert::<u8>(strict)?),
            ConvertTarget::UInt16 => JsonNode::from(self.try_convert::<u16>(strict)?),
            ConvertTarget::UInt32 => JsonNode::from(self.try_convert::<u32>(strict)?),
            ConvertTarget::UInt64 => JsonNode::from(self.try_convert::<u64>(strict)?),
            ConvertTarget::Float32 => JsonNode::from(self.try_convert::<f32>(strict)?),
            ConvertTarget::Float64 => JsonNode::from(self.try_convert::<f64>(strict)?),
            ConvertTarget::Decimal => JsonNode::from(self.try_convert::<Decimal>(strict)?),
            ConvertTarget::String => JsonNode::from(self.try_convert::<String>(strict)?),
            ConvertTarget::Guid => JsonNode::from(self.try_convert::<Uuid>(strict)?),
            ConvertTarget::DateTime => {
                JsonNode::from(self.try_convert::<DateTime<Utc>>(strict)?)
            }
            ConvertTarget::Bytes => JsonNode::from_bytes(&self.try_convert::<Vec<u8>>(strict)?),
            ConvertTarget::Uri => JsonNode::from(self.try_convert::<UriRef>(strict)?.to_string()),
        };
        Ok(node)
    }
}

// ============================================================================
// Identity and containers
// ============================================================================

impl FromNode for JsonNode {
    fn from_node(node: &JsonNode, _strict: bool) -> Result<Self, ConvertError> {
        Ok(node.clone())
    }
}

impl FromNode for ObjectNode {
    fn from_node(node: &JsonNode, _strict: bool) -> Result<Self, ConvertError> {
        match node {
            JsonNode::Object(obj) => Ok(obj.clone()),
            node if node.is_null_like() => Err(not_null("an object", node)),
            node => Err(ConvertError::wrong_kind("an object", node.kind())),
        }
    }
}

impl FromNode for ArrayNode {
    fn from_node(node: &JsonNode, _strict: bool) -> Result<Self, ConvertError> {
        match node {
            JsonNode::Array(arr) => Ok(arr.clone()),
            node if node.is_null_like() => Err(not_null("an array", node)),
            node => Err(ConvertError::wrong_kind("an array", node.kind())),
        }
    }
}

/// A string node converts to itself even when its text is absent.
impl FromNode for StringNode {
    fn from_node(node: &JsonNode, strict: bool) -> Result<Self, ConvertError> {
        match node {
            JsonNode::String(s) => Ok(s.clone()),
            node if node.is_null_like() => Err(not_null("a string", node)),
            node => String::from_node(node, strict).map(StringNode::from),
        }
    }
}

/// `None` for null and undefined, otherwise the inner conversion.
impl<T: FromNode> FromNode for Option<T> {
    fn from_node(node: &JsonNode, strict: bool) -> Result<Self, ConvertError> {
        if node.is_null_like() {
            return Ok(None);
        }
        T::from_node(node, strict).map(Some)
    }
}

/// Accepts only null and undefined.
impl FromNode for () {
    fn from_node(node: &JsonNode, _strict: bool) -> Result<Self, ConvertError> {
        if node.is_null_like() {
            Ok(())
        } else {
            Err(ConvertError::wrong_kind("null", node.kind()))
        }
    }
}

// ============================================================================
// Numbers
// ============================================================================

fn not_null(target: &str, node: &JsonNode) -> ConvertError {
    ConvertError::not_null_expected(target, node.kind())
}

fn not_numeric(text: &str) -> ConvertError {
    ConvertError::new(
        ConvertErrorKind::WrongKind,
        format!("expect a number but the string \"{text}\" is not numeric"),
    )
}

/// Integer reading of a node, wide enough for every integer target.
fn integer_value(node: &JsonNode, strict: bool, target: &str) -> Result<i128, ConvertError> {
    match node {
        node if node.is_null_like() => Err(not_null(target, node)),
        JsonNode::Integer(v) => Ok(i128::from(*v)),
        JsonNode::Double(v) => integer_from_f64(*v, strict, target),
        JsonNode::Decimal(v) => integer_from_decimal(*v, strict, target),
        JsonNode::Boolean(b) if !strict => Ok(i128::from(*b)),
        JsonNode::String(s) if !strict => {
            integer_from_str(s.value().unwrap_or_default(), s.hint(), target)
        }
        node => Err(ConvertError::wrong_kind("a number", node.kind())),
    }
}

fn integer_from_f64(value: f64, strict: bool, target: &str) -> Result<i128, ConvertError> {
    if value.is_nan() {
        return Err(ConvertError::new(
            ConvertErrorKind::WrongKind,
            "expect a number but it is NaN",
        ));
    }
    // i128 tops out near 1.7e38.
    if value.is_infinite() || value.abs() >= 1.0e38 {
        return Err(ConvertError::overflow(value, target));
    }
    if strict && value.fract() != 0.0 {
        return Err(ConvertError::new(
            ConvertErrorKind::WrongKind,
            format!("expect an integer but it is {value}"),
        ));
    }
    Ok(value.trunc() as i128)
}

fn integer_from_decimal(value: Decimal, strict: bool, target: &str) -> Result<i128, ConvertError> {
    if strict && !value.fract().is_zero() {
        return Err(ConvertError::new(
            ConvertErrorKind::WrongKind,
            format!("expect an integer but it is {value}"),
        ));
    }
    value
        .trunc()
        .to_i128()
        .ok_or_else(|| ConvertError::overflow(value, target))
}

/// Origin-specific reading first, then integer, then float.
fn integer_from_str(text: &str, hint: OriginHint, target: &str) -> Result<i128, ConvertError> {
    let text = text.trim();
    match hint {
        OriginHint::Date => {
            if let Some(dt) = parse_datetime(text) {
                return Ok(i128::from(to_js_ticks(&dt)));
            }
        }
        OriginHint::Boolean => {
            if let Some(b) = parse_bool(text, false) {
                return Ok(i128::from(b));
            }
        }
        OriginHint::Float => {
            if let Ok(v) = text.parse::<f64>() {
                return integer_from_f64(v, false, target);
            }
        }
        OriginHint::Literal | OriginHint::Integer | OriginHint::Guid => {}
    }
    if let Ok(v) = text.parse::<i128>() {
        return Ok(v);
    }
    match text.parse::<f64>() {
        Ok(v) => integer_from_f64(v, false, target),
        Err(_) => Err(not_numeric(text)),
    }
}

macro_rules! impl_from_node_for_integer {
    ($($ty:ty),+ $(,)?) => {$(
        impl FromNode for $ty {
            fn from_node(node: &JsonNode, strict: bool) -> Result<Self, ConvertError> {
                let target = stringify!($ty);
                let value = integer_value(node, strict, target)?;
                <$ty>::try_from(value).map_err(|_| ConvertError::overflow(value, target))
            }
        }
    )+};
}

impl_from_node_for_integer!(i8, i16, i32, i64, u8, u16, u32, u64);

fn float_from_str(text: &str, hint: OriginHint) -> Result<f64, ConvertError> {
    let text = text.trim();
    match hint {
        OriginHint::Date => {
            if let Some(dt) = parse_datetime(text) {
                return Ok(to_js_ticks(&dt) as f64);
            }
        }
        OriginHint::Boolean => {
            if let Some(b) = parse_bool(text, false) {
                return Ok(if b { 1.0 } else { 0.0 });
            }
        }
        _ => {}
    }
    text.parse::<f64>().map_err(|_| not_numeric(text))
}

/// Null becomes `NaN` in compatible mode.
impl FromNode for f64 {
    fn from_node(node: &JsonNode, strict: bool) -> Result<Self, ConvertError> {
        match node {
            node if node.is_null_like() => {
                if strict {
                    Err(not_null("f64", node))
                } else {
                    Ok(f64::NAN)
                }
            }
            JsonNode::Integer(v) => Ok(*v as f64),
            JsonNode::Double(v) => Ok(*v),
            JsonNode::Decimal(v) => v.to_f64().ok_or_else(|| ConvertError::overflow(v, "f64")),
            JsonNode::Boolean(b) if !strict => Ok(if *b { 1.0 } else { 0.0 }),
            JsonNode::String(s) if !strict => float_from_str(s.value().unwrap_or_default(), s.hint()),
            node => Err(ConvertError::wrong_kind("a number", node.kind())),
        }
    }
}

impl FromNode for f32 {
    fn from_node(node: &JsonNode, strict: bool) -> Result<Self, ConvertError> {
        let value = f64::from_node(node, strict).map_err(|err| match err.kind() {
            ConvertErrorKind::NotNullExpected => not_null("f32", node),
            _ => err,
        })?;
        if value.is_finite() && value.abs() > f64::from(f32::MAX) {
            return Err(ConvertError::overflow(value, "f32"));
        }
        Ok(value as f32)
    }
}

fn decimal_from_str(text: &str, hint: OriginHint) -> Result<Decimal, ConvertError> {
    let text = text.trim();
    match hint {
        OriginHint::Date => {
            if let Some(dt) = parse_datetime(text) {
                return Ok(Decimal::from(to_js_ticks(&dt)));
            }
        }
        OriginHint::Boolean => {
            if let Some(b) = parse_bool(text, false) {
                return Ok(if b { Decimal::ONE } else { Decimal::ZERO });
            }
        }
        _ => {}
    }
    if let Ok(v) = Decimal::from_str(text).or_else(|_| Decimal::from_scientific(text)) {
        return Ok(v);
    }
    match text.parse::<f64>() {
        Ok(v) => decimal_from_f64(v),
        Err(_) => Err(not_numeric(text)),
    }
}

fn decimal_from_f64(value: f64) -> Result<Decimal, ConvertError> {
    if value.is_nan() {
        return Err(ConvertError::new(
            ConvertErrorKind::WrongKind,
            "expect a number but it is NaN",
        ));
    }
    Decimal::from_f64(value).ok_or_else(|| ConvertError::overflow(value, "decimal"))
}

impl FromNode for Decimal {
    fn from_node(node: &JsonNode, strict: bool) -> Result<Self, ConvertError> {
        match node {
            node if node.is_null_like() => Err(not_null("decimal", node)),
            JsonNode::Integer(v) => Ok(Decimal::from(*v)),
            JsonNode::Double(v) => decimal_from_f64(*v),
            JsonNode::Decimal(v) => Ok(*v),
            JsonNode::Boolean(b) if !strict => Ok(if *b { Decimal::ONE } else { Decimal::ZERO }),
            JsonNode::String(s) if !strict => {
                decimal_from_str(s.value().unwrap_or_default(), s.hint())
            }
            node => Err(ConvertError::wrong_kind("a number", node.kind())),
        }
    }
}

// ============================================================================
// Booleans, characters and strings
// ============================================================================

/// `true` / `false` in any case; `1` / `0` only outside strict mode.
fn parse_bool(text: &str, strict: bool) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") {
        return Some(true);
    }
    if text.eq_ignore_ascii_case("false") {
        return Some(false);
    }
    match text {
        "1" if !strict => Some(true),
        "0" if !strict => Some(false),
        _ => None,
    }
}

impl FromNode for bool {
    fn from_node(node: &JsonNode, strict: bool) -> Result<Self, ConvertError> {
        match node {
            JsonNode::Boolean(b) => Ok(*b),
            node if node.is_null_like() => Err(not_null("bool", node)),
            JsonNode::String(s) => {
                let text = s.value().unwrap_or_default();
                parse_bool(text, strict).ok_or_else(|| {
                    ConvertError::new(
                        ConvertErrorKind::WrongKind,
                        format!("expect a boolean but the string \"{text}\" is not a boolean"),
                    )
                })
            }
            JsonNode::Integer(v) if !strict => Ok(*v != 0),
            JsonNode::Double(v) if !strict && !v.is_nan() => Ok(*v != 0.0),
            JsonNode::Decimal(v) if !strict => Ok(!v.is_zero()),
            node => Err(ConvertError::wrong_kind("a boolean", node.kind())),
        }
    }
}

impl FromNode for char {
    fn from_node(node: &JsonNode, _strict: bool) -> Result<Self, ConvertError> {
        match node {
            node if node.is_null_like() => Err(not_null("char", node)),
            JsonNode::String(s) => {
                let text = s.value().unwrap_or_default();
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(ConvertError::new(
                        ConvertErrorKind::WrongKind,
                        format!(
                            "expect a single character but the string has {} characters",
                            s.len()
                        ),
                    )),
                }
            }
            node if node.is_number() => {
                let code = integer_value(node, true, "char")?;
                u32::try_from(code)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| ConvertError::overflow(code, "char"))
            }
            node => Err(ConvertError::wrong_kind("a string of one character", node.kind())),
        }
    }
}

/// Non-string scalars render their text only in compatible mode; containers
/// render minified JSON.
impl FromNode for String {
    fn from_node(node: &JsonNode, strict: bool) -> Result<Self, ConvertError> {
        match node {
            node if node.is_null_like() => Err(not_null("a string", node)),
            JsonNode::String(s) => Ok(s.value().unwrap_or_default().to_string()),
            node if strict => Err(ConvertError::wrong_kind("a string", node.kind())),
            JsonNode::Integer(v) => Ok(v.to_string()),
            JsonNode::Double(v) => Ok(format_float(*v)),
            JsonNode::Decimal(v) => Ok(v.to_string()),
            JsonNode::Boolean(b) => Ok(if *b { "true" } else { "false" }.to_string()),
            node => node
                .to_json_string(IndentStyle::Minified)
                .map_err(|err| ConvertError::unsupported(err.to_string())),
        }
    }
}

// ============================================================================
// GUID, dates, bytes and URIs
// ============================================================================

/// Null becomes the nil UUID.
impl FromNode for Uuid {
    fn from_node(node: &JsonNode, _strict: bool) -> Result<Self, ConvertError> {
        match node {
            node if node.is_null_like() => Ok(Uuid::nil()),
            JsonNode::String(s) => {
                let text = s.value().unwrap_or_default().trim();
                Uuid::parse_str(text).map_err(|_| {
                    ConvertError::new(
                        ConvertErrorKind::WrongKind,
                        format!("expect a GUID string but \"{text}\" is not a GUID"),
                    )
                })
            }
            node => Err(ConvertError::wrong_kind("a GUID string", node.kind())),
        }
    }
}

fn datetime_from_ticks(ticks: i64) -> Result<DateTime<Utc>, ConvertError> {
    from_js_ticks(ticks).ok_or_else(|| ConvertError::overflow(ticks, "DateTime"))
}

fn datetime_from_str(text: &str, hint: OriginHint, strict: bool) -> Result<DateTime<Utc>, ConvertError> {
    let text = text.trim();
    if hint == OriginHint::Integer {
        if let Ok(ticks) = text.parse::<i64>() {
            return datetime_from_ticks(ticks);
        }
    }
    if let Some(dt) = parse_datetime(text) {
        return Ok(dt);
    }
    if !strict {
        if let Ok(ticks) = text.parse::<i64>() {
            return datetime_from_ticks(ticks);
        }
    }
    Err(ConvertError::new(
        ConvertErrorKind::WrongKind,
        format!("expect a date string but \"{text}\" is not a recognized date"),
    ))
}

/// Integers are JavaScript ticks (milliseconds since the Unix epoch).
impl FromNode for DateTime<Utc> {
    fn from_node(node: &JsonNode, strict: bool) -> Result<Self, ConvertError> {
        match node {
            node if node.is_null_like() => Err(not_null("DateTime", node)),
            JsonNode::String(s) => datetime_from_str(s.value().unwrap_or_default(), s.hint(), strict),
            JsonNode::Integer(ticks) => datetime_from_ticks(*ticks),
            JsonNode::Double(_) | JsonNode::Decimal(_) if !strict => {
                let ticks = i64::from_node(node, false)?;
                datetime_from_ticks(ticks)
            }
            node => Err(ConvertError::wrong_kind("a date string", node.kind())),
        }
    }
}

/// Keeps the offset of RFC 3339 strings; everything else is read as UTC.
impl FromNode for DateTime<FixedOffset> {
    fn from_node(node: &JsonNode, strict: bool) -> Result<Self, ConvertError> {
        if let Some(text) = node.as_str() {
            if let Ok(dt) = DateTime::parse_from_rfc3339(text.trim()) {
                return Ok(dt);
            }
        }
        DateTime::<Utc>::from_node(node, strict).map(|dt| dt.fixed_offset())
    }
}

/// Only Base64 strings convert to bytes.
impl FromNode for Vec<u8> {
    fn from_node(node: &JsonNode, _strict: bool) -> Result<Self, ConvertError> {
        match node {
            node if node.is_null_like() => Err(not_null("a byte array", node)),
            JsonNode::String(s) => STANDARD
                .decode(s.value().unwrap_or_default().trim())
                .map_err(|err| {
                    ConvertError::new(
                        ConvertErrorKind::WrongKind,
                        format!("expect a Base64 string but decoding failed: {err}"),
                    )
                }),
            node => Err(ConvertError::wrong_kind("a Base64 string", node.kind())),
        }
    }
}

/// Requires an absolute URL.
impl FromNode for Url {
    fn from_node(node: &JsonNode, strict: bool) -> Result<Self, ConvertError> {
        let text = String::from_node(node, strict)?;
        Url::parse(text.trim()).map_err(|err| {
            ConvertError::new(
                ConvertErrorKind::WrongKind,
                format!("expect a URL but \"{text}\" is not valid: {err}"),
            )
        })
    }
}

const RELATIVE_BASE: &str = "http://localhost/";

/// An absolute URL or a relative reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UriRef {
    Absolute(Url),
    Relative(String),
}

impl UriRef {
    pub fn parse(text: &str) -> Option<Self> {
        match Url::parse(text) {
            Ok(url) => Some(UriRef::Absolute(url)),
            Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(RELATIVE_BASE)
                .and_then(|base| base.join(text))
                .ok()
                .map(|_| UriRef::Relative(text.to_string())),
            Err(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            UriRef::Absolute(url) => url.as_str(),
            UriRef::Relative(s) => s,
        }
    }

    pub fn is_absolute(&self) -> bool {
        matches!(self, UriRef::Absolute(_))
    }
}

impl fmt::Display for UriRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromNode for UriRef {
    fn from_node(node: &JsonNode, strict: bool) -> Result<Self, ConvertError> {
        let text = String::from_node(node, strict)?;
        UriRef::parse(text.trim()).ok_or_else(|| {
            ConvertError::new(
                ConvertErrorKind::WrongKind,
                format!("expect a URI but \"{text}\" is not valid"),
            )
        })
    }
}

// ============================================================================
// Enums and arbitrary types
// ============================================================================

/// An enum addressable by member name or ordinal.
///
/// Use [`node_enum!`](crate::node_enum) to declare one.
pub trait NodeEnum: Sized {
    /// Member names paired with their ordinals.
    const MEMBERS: &'static [(&'static str, i64)];

    fn from_ordinal(ordinal: i64) -> Option<Self>;

    /// Case-sensitive member lookup.
    fn from_name(name: &str) -> Option<Self> {
        Self::MEMBERS
            .iter()
            .find(|(member, _)| *member == name)
            .and_then(|(_, ordinal)| Self::from_ordinal(*ordinal))
    }
}

/// Name first, ordinal second; unknown names and ordinals are `Unsupported`.
pub fn enum_from_node<E: NodeEnum>(node: &JsonNode, strict: bool) -> Result<E, ConvertError> {
    let type_name = std::any::type_name::<E>();
    let ordinal = match node {
        node if node.is_null_like() => return Err(not_null(type_name, node)),
        JsonNode::String(s) => {
            let text = s.value().unwrap_or_default();
            if let Some(member) = E::from_name(text) {
                return Ok(member);
            }
            text.trim().parse::<i64>().map_err(|_| {
                ConvertError::unsupported(format!("\"{text}\" is not a member of {type_name}"))
            })?
        }
        node if node.is_number() => i64::from_node(node, strict)?,
        node => return Err(ConvertError::wrong_kind("an enum name or ordinal", node.kind())),
    };
    E::from_ordinal(ordinal).ok_or_else(|| {
        ConvertError::unsupported(format!("{ordinal} is not a valid ordinal of {type_name}"))
    })
}

/// Declare an enum that converts from nodes by name or ordinal and
/// describes itself as a string enum in schemas.
///
/// ```
/// json_node::node_enum! {
///     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
///     pub enum Color { Red = 0, Green = 1 }
/// }
///
/// let node = json_node::JsonNode::from("Green");
/// assert_eq!(node.try_convert::<Color>(false).unwrap(), Color::Green);
/// ```
#[macro_export]
macro_rules! node_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident { $($variant:ident = $value:expr),+ $(,)? }
    ) => {
        $(#[$meta])*
        $vis enum $name { $($variant = $value),+ }

        impl $crate::NodeEnum for $name {
            const MEMBERS: &'static [(&'static str, i64)] = &[$((stringify!($variant), $value)),+];

            fn from_ordinal(ordinal: i64) -> ::core::option::Option<Self> {
                $(if ordinal == $value {
                    return ::core::option::Option::Some($name::$variant);
                })+
                ::core::option::Option::None
            }
        }

        impl $crate::FromNode for $name {
            fn from_node(
                node: &$crate::JsonNode,
                strict: bool,
            ) -> ::core::result::Result<Self, $crate::ConvertError> {
                $crate::convert::enum_from_node(node, strict)
            }
        }

        impl $crate::DescribeType for $name {
            fn describe() -> $crate::TypeShape {
                $crate::TypeShape::Enum(
                    <$name as $crate::NodeEnum>::MEMBERS.iter().map(|(name, _)| *name).collect(),
                )
            }
        }
    };
}

/// A `serde` type materialized from a node.
///
/// In strict mode only objects and arrays are accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct Deserialized<T>(pub T);

impl<T: DeserializeOwned> FromNode for Deserialized<T> {
    fn from_node(node: &JsonNode, strict: bool) -> Result<Self, ConvertError> {
        if node.is_null_like() {
            return Err(not_null(std::any::type_name::<T>(), node));
        }
        if strict && !node.kind().is_container() {
            return Err(ConvertError::wrong_kind("an object or an array", node.kind()));
        }
        node.deserialize_as().map(Deserialized)
    }
}

// ============================================================================
// Runtime targets
// ============================================================================

/// A conversion target selected at runtime, e.g. from a command-line flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConvertTarget {
    Node,
    Null,
    Boolean,
    Char,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Decimal,
    String,
    Guid,
    DateTime,
    Bytes,
    Uri,
}

impl ConvertTarget {
    pub fn name(self) -> &'static str {
        match self {
            ConvertTarget::Node => "node",
            ConvertTarget::Null => "null",
            ConvertTarget::Boolean => "bool",
            ConvertTarget::Char => "char",
            ConvertTarget::Int8 => "i8",
            ConvertTarget::Int16 => "i16",
            ConvertTarget::Int32 => "i32",
            ConvertTarget::Int64 => "i64",
            ConvertTarget::UInt8 => "u8",
            ConvertTarget::UInt16 => "u16",
            ConvertTarget::UInt32 => "u32",
            ConvertTarget::UInt64 => "u64",
            ConvertTarget::Float32 => "f32",
            ConvertTarget::Float64 => "f64",
            ConvertTarget::Decimal => "decimal",
            ConvertTarget::String => "string",
            ConvertTarget::Guid => "guid",
            ConvertTarget::DateTime => "datetime",
            ConvertTarget::Bytes => "bytes",
            ConvertTarget::Uri => "uri",
        }
    }
}

impl fmt::Display for ConvertTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown names fail with [`ConvertErrorKind::Unsupported`].
impl FromStr for ConvertTarget {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let target = match s.trim().to_ascii_lowercase().as_str() {
            "node" | "json" => ConvertTarget::Node,
            "null" => ConvertTarget::Null,
            "bool" | "boolean" => ConvertTarget::Boolean,
            "char" => ConvertTarget::Char,
            "i8" | "sbyte" => ConvertTarget::Int8,
            "i16" | "short" => ConvertTarget::Int16,
            "i32" | "int" => ConvertTarget::Int32,
            "i64" | "long" => ConvertTarget::Int64,
            "u8" | "byte" => ConvertTarget::UInt8,
            "u16" | "ushort" => ConvertTarget::UInt16,
            "u32" | "uint" => ConvertTarget::UInt32,
            "u64" | "ulong" => ConvertTarget::UInt64,
            "f32" | "float" | "single" => ConvertTarget::Float32,
            "f64" | "double" => ConvertTarget::Float64,
            "decimal" => ConvertTarget::Decimal,
            "string" | "str" => ConvertTarget::String,
            "guid" | "uuid" => ConvertTarget::Guid,
            "datetime" | "date" => ConvertTarget::DateTime,
            "bytes" | "base64" => ConvertTarget::Bytes,
            "uri" | "url" => ConvertTarget::Uri,
            other => {
                return Err(ConvertError::unsupported(format!(
                    "the target type '{other}' is not supported"
                )))
            }
        };
        Ok(target)
    }
}

impl From<ValueKind> for ConvertTarget {
    /// The natural target of each kind.
    fn from(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Undefined | ValueKind::Null => ConvertTarget::Null,
            ValueKind::True | ValueKind::False => ConvertTarget::Boolean,
            ValueKind::Number => ConvertTarget::Float64,
            ValueKind::String => ConvertTarget::String,
            ValueKind::Object | ValueKind::Array => ConvertTarget::Node,
        }
    }
}
