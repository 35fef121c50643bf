//! Typed values produced by the coercion engine.
//!
//! Every bound specification ends up as an [`ArgValue`]. Built-in conversions
//! produce the primitive variants; custom converters may also return
//! [`ArgValue::Object`] for structured values.
//!
//! ## Extracting Values
//!
//! ```rust
//! use argbind::{ArgValue, Number};
//! use std::convert::TryFrom;
//!
//! let value = ArgValue::from(42);
//! assert_eq!(value.as_i64(), Some(42));
//!
//! let num: i64 = i64::try_from(value).unwrap();
//! assert_eq!(num, 42);
//!
//! let seq = ArgValue::Sequence(vec![ArgValue::from("a"), ArgValue::from("b")]);
//! assert_eq!(seq.as_sequence().map(|s| s.len()), Some(2));
//! ```

use crate::ArgMap;
use chrono::{DateTime, TimeDelta, Utc};
use num_bigint::BigInt;
use serde::{Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// A value converted from one or more command-line strings.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum ArgValue {
    /// The "no value" state of a nullable target
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Char(char),
    BigInt(BigInt),
    Guid(Uuid),
    Duration(TimeDelta),
    DateTime(DateTime<Utc>),
    /// A variant of a declared enumeration, with its underlying value
    Enum {
        name: String,
        value: i64,
    },
    Sequence(Vec<ArgValue>),
    Object(ArgMap),
}

/// A numeric value. Unsigned targets whose values do not fit `i64` use
/// [`Number::Unsigned`].
///
/// # Examples
///
/// ```rust
/// use argbind::Number;
///
/// assert_eq!(Number::Integer(-3).as_i64(), Some(-3));
/// assert_eq!(Number::Unsigned(u64::MAX).as_i64(), None);
/// assert_eq!(Number::Float(2.5).as_f64(), 2.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Unsigned(u64),
    Float(f64),
}

impl Number {
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_) | Number::Unsigned(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Converts this number to an `i64` if it is integral and in range.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Unsigned(u) => i64::try_from(*u).ok(),
            Number::Float(_) => None,
        }
    }

    /// Converts this number to a `u64` if it is integral and non-negative.
    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Number::Integer(i) => u64::try_from(*i).ok(),
            Number::Unsigned(u) => Some(*u),
            Number::Float(_) => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Unsigned(u) => *u as f64,
            Number::Float(f) => *f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Unsigned(u) => write!(f, "{}", u),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl ArgValue {
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, ArgValue::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, ArgValue::Sequence(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns integral numbers as `i64`. Enumerations yield their underlying value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use argbind::ArgValue;
    ///
    /// let color = ArgValue::Enum { name: "Green".to_string(), value: 1 };
    /// assert_eq!(color.as_i64(), Some(1));
    /// assert_eq!(ArgValue::from("1").as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ArgValue::Number(n) => n.as_i64(),
            ArgValue::Enum { value, .. } => Some(*value),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            ArgValue::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ArgValue::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_char(&self) -> Option<char> {
        match self {
            ArgValue::Char(c) => Some(*c),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_guid(&self) -> Option<&Uuid> {
        match self {
            ArgValue::Guid(g) => Some(g),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_duration(&self) -> Option<&TimeDelta> {
        match self {
            ArgValue::Duration(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_date_time(&self) -> Option<&DateTime<Utc>> {
        match self {
            ArgValue::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bigint(&self) -> Option<&BigInt> {
        match self {
            ArgValue::BigInt(bi) => Some(bi),
            _ => None,
        }
    }

    /// Name of the enumeration variant, if this is one.
    #[inline]
    #[must_use]
    pub fn as_enum_name(&self) -> Option<&str> {
        match self {
            ArgValue::Enum { name, .. } => Some(name),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[ArgValue]> {
        match self {
            ArgValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&ArgMap> {
        match self {
            ArgValue::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Null => Ok(()),
            ArgValue::Bool(b) => write!(f, "{}", b),
            ArgValue::Number(n) => write!(f, "{}", n),
            ArgValue::String(s) => write!(f, "{}", s),
            ArgValue::Char(c) => write!(f, "{}", c),
            ArgValue::BigInt(bi) => write!(f, "{}", bi),
            ArgValue::Guid(g) => write!(f, "{}", g),
            ArgValue::Duration(d) => write!(f, "{}", d),
            ArgValue::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            ArgValue::Enum { name, .. } => write!(f, "{}", name),
            ArgValue::Sequence(items) => write!(
                f,
                "{}",
                items
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            ),
            ArgValue::Object(obj) => write!(
                f,
                "{{{}}}",
                obj.iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect::<Vec<_>>()
                    .join(",")
            ),
        }
    }
}

impl Serialize for ArgValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ArgValue::Null => serializer.serialize_unit(),
            ArgValue::Bool(b) => serializer.serialize_bool(*b),
            ArgValue::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            ArgValue::Number(Number::Unsigned(u)) => serializer.serialize_u64(*u),
            ArgValue::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            ArgValue::String(s) => serializer.serialize_str(s),
            ArgValue::Char(c) => serializer.serialize_char(*c),
            ArgValue::BigInt(bi) => serializer.serialize_str(&bi.to_string()),
            ArgValue::Guid(g) => serializer.serialize_str(&g.to_string()),
            ArgValue::Duration(d) => serializer.serialize_str(&d.to_string()),
            ArgValue::DateTime(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            ArgValue::Enum { name, .. } => serializer.serialize_str(name),
            ArgValue::Sequence(items) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for element in items {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            ArgValue::Object(obj) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

/// Failure to extract a Rust value out of an [`ArgValue`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, found {found}")]
pub struct ExtractError {
    pub expected: &'static str,
    pub found: String,
}

impl ExtractError {
    fn new(expected: &'static str, found: &ArgValue) -> Self {
        ExtractError {
            expected,
            found: format!("{:?}", found),
        }
    }
}

impl TryFrom<ArgValue> for i64 {
    type Error = ExtractError;

    fn try_from(value: ArgValue) -> Result<Self, Self::Error> {
        value
            .as_i64()
            .ok_or_else(|| ExtractError::new("integer", &value))
    }
}

impl TryFrom<ArgValue> for u64 {
    type Error = ExtractError;

    fn try_from(value: ArgValue) -> Result<Self, Self::Error> {
        value
            .as_u64()
            .ok_or_else(|| ExtractError::new("unsigned integer", &value))
    }
}

impl TryFrom<ArgValue> for f64 {
    type Error = ExtractError;

    fn try_from(value: ArgValue) -> Result<Self, Self::Error> {
        value
            .as_f64()
            .ok_or_else(|| ExtractError::new("number", &value))
    }
}

impl TryFrom<ArgValue> for bool {
    type Error = ExtractError;

    fn try_from(value: ArgValue) -> Result<Self, Self::Error> {
        value
            .as_bool()
            .ok_or_else(|| ExtractError::new("bool", &value))
    }
}

impl TryFrom<ArgValue> for String {
    type Error = ExtractError;

    fn try_from(value: ArgValue) -> Result<Self, Self::Error> {
        match value {
            ArgValue::String(s) => Ok(s),
            other => Err(ExtractError::new("string", &other)),
        }
    }
}

impl TryFrom<ArgValue> for Vec<ArgValue> {
    type Error = ExtractError;

    fn try_from(value: ArgValue) -> Result<Self, Self::Error> {
        match value {
            ArgValue::Sequence(items) => Ok(items),
            other => Err(ExtractError::new("sequence", &other)),
        }
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Bool(value)
    }
}

impl From<i32> for ArgValue {
    fn from(value: i32) -> Self {
        ArgValue::Number(Number::Integer(value as i64))
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::Number(Number::Integer(value))
    }
}

impl From<u32> for ArgValue {
    fn from(value: u32) -> Self {
        ArgValue::Number(Number::Unsigned(value as u64))
    }
}

impl From<u64> for ArgValue {
    fn from(value: u64) -> Self {
        ArgValue::Number(Number::Unsigned(value))
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        ArgValue::Number(Number::Float(value))
    }
}

impl From<char> for ArgValue {
    fn from(value: char) -> Self {
        ArgValue::Char(value)
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::String(value)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::String(value.to_string())
    }
}

impl From<Uuid> for ArgValue {
    fn from(value: Uuid) -> Self {
        ArgValue::Guid(value)
    }
}

impl From<TimeDelta> for ArgValue {
    fn from(value: TimeDelta) -> Self {
        ArgValue::Duration(value)
    }
}

impl From<Vec<ArgValue>> for ArgValue {
    fn from(value: Vec<ArgValue>) -> Self {
        ArgValue::Sequence(value)
    }
}

impl From<ArgMap> for ArgValue {
    fn from(value: ArgMap) -> Self {
        ArgValue::Object(value)
    }
}

impl<T: Into<ArgValue>> From<Option<T>> for ArgValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ArgValue::Null, Into::into)
    }
}
