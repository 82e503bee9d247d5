//! String nodes and their origin hint.
//!
//! A [`StringNode`] records which host type produced its text (an
//! [`OriginHint`]). When the string is later converted back to a number or a
//! date, the conversion engine tries the origin-specific reading first: a
//! string formatted from a date answers `i64` requests with JavaScript ticks
//! instead of failing an integer parse.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, FixedOffset, SecondsFormat, TimeDelta, Utc};
use rust_decimal::Decimal;
use url::Url;
use uuid::Uuid;

use crate::datetime::format_datetime;
use crate::kind::ValueKind;

/// Host type a string value was formatted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum OriginHint {
    #[default]
    Literal = 0,
    Date = 1,
    Integer = 2,
    Float = 3,
    Guid = 4,
    Boolean = 5,
}

/// A JSON string. The wrapped string may be absent, in which case the node
/// reports [`ValueKind::Null`].
#[derive(Debug, Clone, Default)]
pub struct StringNode {
    value: Option<String>,
    hint: OriginHint,
}

impl StringNode {
    /// Wrap a string verbatim. `None` yields a node of kind `Null`.
    pub fn new(value: Option<String>) -> Self {
        Self {
            value,
            hint: OriginHint::Literal,
        }
    }

    fn hinted(value: String, hint: OriginHint) -> Self {
        Self {
            value: Some(value),
            hint,
        }
    }

    pub fn from_datetime(value: &DateTime<Utc>) -> Self {
        Self::hinted(format_datetime(value), OriginHint::Date)
    }

    pub fn from_fixed_datetime(value: &DateTime<FixedOffset>) -> Self {
        Self::hinted(
            value.to_rfc3339_opts(SecondsFormat::Millis, true),
            OriginHint::Date,
        )
    }

    pub fn from_i64(value: i64) -> Self {
        Self::hinted(value.to_string(), OriginHint::Integer)
    }

    pub fn from_u64(value: u64) -> Self {
        Self::hinted(value.to_string(), OriginHint::Integer)
    }

    pub fn from_i32(value: i32) -> Self {
        Self::from_i64(i64::from(value))
    }

    pub fn from_f64(value: f64) -> Self {
        Self::hinted(format_float(value), OriginHint::Float)
    }

    pub fn from_f32(value: f32) -> Self {
        Self::hinted(format_float(f64::from(value)), OriginHint::Float)
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self::hinted(value.to_string(), OriginHint::Float)
    }

    /// Lowercase hyphenated form.
    pub fn from_uuid(value: &Uuid) -> Self {
        Self::hinted(value.hyphenated().to_string(), OriginHint::Guid)
    }

    pub fn from_bool(value: bool) -> Self {
        let s = if value { "true" } else { "false" };
        Self::hinted(s.to_string(), OriginHint::Boolean)
    }

    /// `[-][d.]hh:mm:ss[.fffffff]`.
    pub fn from_duration(value: TimeDelta) -> Self {
        let negative = value < TimeDelta::zero();
        let abs = value.abs();
        let total = abs.num_seconds();
        let days = total / 86_400;
        let hours = (total % 86_400) / 3_600;
        let minutes = (total % 3_600) / 60;
        let seconds = total % 60;
        let ticks = abs.subsec_nanos() / 100;

        let mut s = String::new();
        if negative {
            s.push('-');
        }
        if days > 0 {
            s.push_str(&format!("{days}."));
        }
        s.push_str(&format!("{hours:02}:{minutes:02}:{seconds:02}"));
        if ticks > 0 {
            s.push_str(&format!(".{ticks:07}"));
        }
        Self::hinted(s, OriginHint::Literal)
    }

    pub fn from_url(value: &Url) -> Self {
        Self::hinted(value.as_str().to_string(), OriginHint::Literal)
    }

    /// Standard Base64 with padding.
    pub fn from_bytes(value: &[u8]) -> Self {
        Self::hinted(STANDARD.encode(value), OriginHint::Literal)
    }

    pub fn from_chars(value: &[char]) -> Self {
        Self::hinted(value.iter().collect(), OriginHint::Literal)
    }

    pub fn kind(&self) -> ValueKind {
        if self.value.is_some() {
            ValueKind::String
        } else {
            ValueKind::Null
        }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn into_value(self) -> Option<String> {
        self.value
    }

    pub fn hint(&self) -> OriginHint {
        self.hint
    }

    /// Number of characters; zero when absent.
    pub fn len(&self) -> usize {
        self.value.as_ref().map_or(0, |s| s.chars().count())
    }

    pub fn is_empty(&self) -> bool {
        self.value.as_ref().is_none_or(|s| s.is_empty())
    }
}

impl From<&str> for StringNode {
    fn from(value: &str) -> Self {
        Self::new(Some(value.to_string()))
    }
}

impl From<String> for StringNode {
    fn from(value: String) -> Self {
        Self::new(Some(value))
    }
}

impl From<Option<String>> for StringNode {
    fn from(value: Option<String>) -> Self {
        Self::new(value)
    }
}

/// Equality compares the text only; the origin hint is provenance metadata.
impl PartialEq for StringNode {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

/// Shortest text that round-trips, with `NaN` / `Infinity` / `-Infinity`
/// for the non-finite values.
pub(crate) fn format_float(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        value.to_string()
    }
}
