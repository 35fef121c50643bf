//! Type coercion of raw argument strings.
//!
//! Raw strings collected for a specification are turned into an [`ArgValue`]
//! according to its [`ConversionType`] and [`TargetShape`]:
//!
//! - flag counters yield the number of occurrences
//! - a custom [`Converter`] takes precedence when one is attached
//! - scalar shapes use the last raw value
//! - sequences convert element-wise and fail as a whole
//!
//! ## Examples
//!
//! ```rust
//! use argbind::convert::convert;
//! use argbind::{ArgValue, ConversionType};
//!
//! let raw = vec!["1".to_string(), "20".to_string()];
//! let value = convert(&raw, &ConversionType::int(), None, false, false, false).unwrap();
//! assert_eq!(value, ArgValue::Sequence(vec![ArgValue::from(1i64), ArgValue::from(20i64)]));
//!
//! let err = convert(&["x".to_string()], &ConversionType::int(), None, true, false, false);
//! assert!(err.is_err());
//! ```

use crate::specification::{ConversionType, EnumType, FloatKind, IntKind};
use crate::{ArgValue, Number};
use chrono::{DateTime, TimeDelta, Utc};
use indexmap::IndexMap;
use num_bigint::BigInt;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// A user-supplied string converter.
///
/// # Examples
///
/// ```rust
/// use argbind::{ArgMap, ArgValue, Converter};
///
/// #[derive(Debug)]
/// struct Endpoint;
///
/// impl Converter for Endpoint {
///     fn convert_from_str(&self, raw: &str) -> Result<ArgValue, String> {
///         let (host, port) = raw.split_once(':').ok_or("expected host:port")?;
///         let port: u64 = port.parse().map_err(|_| "bad port".to_string())?;
///         let mut map = ArgMap::new();
///         map.insert("server".to_string(), ArgValue::from(host));
///         map.insert("port".to_string(), ArgValue::from(port));
///         Ok(ArgValue::Object(map))
///     }
/// }
///
/// let value = Endpoint.convert_from_str("localhost:8080").unwrap();
/// assert_eq!(value.as_object().and_then(|m| m.get("port")), Some(&ArgValue::from(8080u64)));
/// ```
pub trait Converter: fmt::Debug + Send + Sync {
    /// Whether `convert_from_str` should be used at all.
    fn can_convert_from_str(&self) -> bool {
        true
    }

    fn convert_from_str(&self, raw: &str) -> Result<ArgValue, String>;

    fn convert_to_string(&self, value: &ArgValue) -> String {
        value.to_string()
    }

    /// Values reported as the possible values of specifications using this converter.
    fn allowed_values(&self) -> Vec<String> {
        Vec::new()
    }
}

/// How a specification obtains its converter.
#[derive(Clone)]
pub enum ConverterRef {
    /// A ready-made converter
    Instance(Arc<dyn Converter>),
    /// Built with no arguments
    Factory(fn() -> Arc<dyn Converter>),
    /// Built from the target type
    ForType(fn(&ConversionType) -> Arc<dyn Converter>),
    /// Built from a fixed string argument
    WithArgument(fn(&str) -> Arc<dyn Converter>, String),
}

impl ConverterRef {
    #[must_use]
    pub fn instance<C: Converter + 'static>(converter: C) -> Self {
        ConverterRef::Instance(Arc::new(converter))
    }

    /// Produces the converter for a specification converting to `target`.
    #[must_use]
    pub fn instantiate(&self, target: &ConversionType) -> Arc<dyn Converter> {
        match self {
            ConverterRef::Instance(c) => Arc::clone(c),
            ConverterRef::Factory(make) => make(),
            ConverterRef::ForType(make) => make(target),
            ConverterRef::WithArgument(make, arg) => make(arg),
        }
    }
}

impl fmt::Debug for ConverterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConverterRef::Instance(c) => f.debug_tuple("Instance").field(c).finish(),
            ConverterRef::Factory(_) => f.write_str("Factory"),
            ConverterRef::ForType(_) => f.write_str("ForType"),
            ConverterRef::WithArgument(_, arg) => f.debug_tuple("WithArgument").field(arg).finish(),
        }
    }
}

/// Converters registered by target type name.
#[derive(Clone, Debug, Default)]
pub struct ConverterRegistry(IndexMap<String, Arc<dyn Converter>>);

impl ConverterRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `converter` for `type_name`, replacing any earlier registration.
    pub fn register(&mut self, type_name: impl Into<String>, converter: Arc<dyn Converter>) {
        self.0.insert(type_name.into(), converter);
    }

    #[must_use]
    pub fn get(&self, type_name: &str) -> Option<&Arc<dyn Converter>> {
        self.0.get(type_name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("cannot convert '{value}' to {target}: {reason}")]
    BadFormat {
        value: String,
        target: String,
        reason: String,
    },
}

impl ConversionError {
    fn bad_format(value: &str, target: &ConversionType, reason: impl Into<String>) -> Self {
        ConversionError::BadFormat {
            value: value.to_string(),
            target: target.type_name(),
            reason: reason.into(),
        }
    }
}

/// Converts the raw strings bound to one specification.
///
/// `is_scalar` selects the last raw value; otherwise every value is converted
/// into an [`ArgValue::Sequence`]. Flag counters skip conversion and yield the
/// number of raw values.
pub fn convert(
    raw: &[String],
    conversion: &ConversionType,
    converter: Option<&dyn Converter>,
    is_scalar: bool,
    is_flag_counter: bool,
    ignore_enum_case: bool,
) -> Result<ArgValue, ConversionError> {
    if is_flag_counter {
        return Ok(ArgValue::Number(Number::Unsigned(raw.len() as u64)));
    }

    if is_scalar {
        let last = raw
            .last()
            .ok_or_else(|| ConversionError::bad_format("", conversion, "no value"))?;
        return convert_one(last, conversion, converter, ignore_enum_case)
            .map_err(|reason| ConversionError::bad_format(last, conversion, reason));
    }

    raw.iter()
        .map(|value| {
            convert_one(value, conversion, converter, ignore_enum_case)
                .map_err(|reason| ConversionError::bad_format(value, conversion, reason))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(ArgValue::Sequence)
}

fn convert_one(
    raw: &str,
    conversion: &ConversionType,
    converter: Option<&dyn Converter>,
    ignore_enum_case: bool,
) -> Result<ArgValue, String> {
    if let ConversionType::Nullable(inner) = conversion {
        if raw.is_empty() {
            return Ok(ArgValue::Null);
        }
        return convert_one(raw, inner, converter, ignore_enum_case);
    }

    if let Some(c) = converter.filter(|c| c.can_convert_from_str()) {
        return c.convert_from_str(raw);
    }

    match conversion {
        ConversionType::String => Ok(ArgValue::String(raw.to_string())),
        ConversionType::Bool => parse_bool(raw).map(ArgValue::Bool),
        ConversionType::Char => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(ArgValue::Char(c)),
                _ => Err("expected a single character".to_string()),
            }
        }
        ConversionType::Integer(kind) => parse_integer(raw, *kind).map(ArgValue::Number),
        ConversionType::Float(kind) => parse_float(raw, *kind).map(ArgValue::from),
        ConversionType::BigInt => raw
            .parse::<BigInt>()
            .map(ArgValue::BigInt)
            .map_err(|e| e.to_string()),
        ConversionType::Guid => Uuid::parse_str(raw)
            .map(ArgValue::Guid)
            .map_err(|e| e.to_string()),
        ConversionType::Duration => parse_duration(raw).map(ArgValue::Duration),
        ConversionType::DateTime => DateTime::parse_from_rfc3339(raw)
            .map(|dt| ArgValue::DateTime(dt.with_timezone(&Utc)))
            .map_err(|e| e.to_string()),
        ConversionType::Enum(e) => parse_enum(raw, e, ignore_enum_case),
        ConversionType::Nullable(inner) => convert_one(raw, inner, None, ignore_enum_case),
        ConversionType::Custom(name) => Err(format!("no converter for type '{}'", name)),
    }
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err("expected 'true' or 'false'".to_string())
    }
}

fn parse_integer(raw: &str, kind: IntKind) -> Result<Number, String> {
    let parsed: i128 = raw.parse().map_err(|e: std::num::ParseIntError| e.to_string())?;
    let (lo, hi) = kind.bounds();
    if parsed < lo || parsed > hi {
        return Err(format!("out of range for {}", kind.as_str()));
    }
    let number = if kind.is_signed() {
        i64::try_from(parsed).map(Number::Integer)
    } else {
        u64::try_from(parsed).map(Number::Unsigned)
    };
    number.map_err(|e| e.to_string())
}

fn parse_float(raw: &str, kind: FloatKind) -> Result<f64, String> {
    if raw.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return Err("not a decimal number".to_string());
    }
    let value = match kind {
        FloatKind::F32 => raw.parse::<f32>().map(f64::from),
        FloatKind::F64 => raw.parse::<f64>(),
    }
    .map_err(|e| e.to_string())?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err("out of range".to_string())
    }
}

fn parse_enum(raw: &str, target: &EnumType, ignore_case: bool) -> Result<ArgValue, String> {
    let by_name = target.variants().iter().find(|(name, _)| {
        if ignore_case {
            name.to_lowercase() == raw.to_lowercase()
        } else {
            name == raw
        }
    });
    let by_value = || match raw.parse::<i64>() {
        Ok(n) => target.variants().iter().find(|(_, value)| *value == n),
        Err(_) => None,
    };
    by_name
        .or_else(by_value)
        .map(|(name, value)| ArgValue::Enum {
            name: name.clone(),
            value: *value,
        })
        .ok_or_else(|| format!("'{}' is not a variant of {}", raw, target.name))
}

fn parse_digits(part: &str) -> Result<i64, String> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("'{}' is not a number", part));
    }
    part.parse::<i64>().map_err(|e| e.to_string())
}

fn parse_bounded(part: &str, max: i64) -> Result<i64, String> {
    let n = parse_digits(part)?;
    if n > max {
        return Err(format!("component {} exceeds {}", n, max));
    }
    Ok(n)
}

/// Parses `[-][d.]hh:mm[:ss[.fffffff]]` or a whole number of days.
///
/// # Examples
///
/// ```rust
/// use argbind::convert::parse_duration;
/// use chrono::TimeDelta;
///
/// assert_eq!(parse_duration("00:42:00").unwrap(), TimeDelta::minutes(42));
/// assert_eq!(parse_duration("2").unwrap(), TimeDelta::days(2));
/// assert_eq!(parse_duration("-1.00:00:30").unwrap(), -(TimeDelta::days(1) + TimeDelta::seconds(30)));
/// assert!(parse_duration("\"00:42:00\"").is_err());
/// ```
pub fn parse_duration(raw: &str) -> Result<TimeDelta, String> {
    let (negative, body) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };

    let (days, clock) = match body.find(':') {
        None => (parse_digits(body)?, None),
        Some(colon) => match body[..colon].find('.') {
            Some(dot) => (parse_digits(&body[..dot])?, Some(&body[dot + 1..])),
            None => (0, Some(body)),
        },
    };

    let mut seconds = days
        .checked_mul(86_400)
        .ok_or_else(|| "duration out of range".to_string())?;
    let mut nanos = 0u32;

    if let Some(clock) = clock {
        let (clock, fraction) = match clock.split_once('.') {
            Some((c, f)) => (c, Some(f)),
            None => (clock, None),
        };
        let parts: Vec<&str> = clock.split(':').collect();
        if !(2..=3).contains(&parts.len()) || (fraction.is_some() && parts.len() != 3) {
            return Err("expected hh:mm[:ss[.fffffff]]".to_string());
        }
        let hours = parse_bounded(parts[0], 23)?;
        let minutes = parse_bounded(parts[1], 59)?;
        let secs = match parts.get(2) {
            Some(s) => parse_bounded(s, 59)?,
            None => 0,
        };
        seconds = seconds
            .checked_add(hours * 3_600 + minutes * 60 + secs)
            .ok_or_else(|| "duration out of range".to_string())?;

        if let Some(fraction) = fraction {
            if fraction.len() > 7 {
                return Err("at most seven fractional digits".to_string());
            }
            parse_digits(fraction)?;
            let padded = format!("{:0<9}", fraction);
            nanos = padded.parse::<u32>().map_err(|e| e.to_string())?;
        }
    }

    let delta = TimeDelta::new(seconds, nanos).ok_or_else(|| "duration out of range".to_string())?;
    Ok(if negative { -delta } else { delta })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_scalar_uses_last_value() {
        let value = convert(&raw(&["1", "2"]), &ConversionType::int(), None, true, false, false);
        assert_eq!(value.unwrap(), ArgValue::from(2i64));
    }

    #[test]
    fn test_flag_counter_counts() {
        let value = convert(&raw(&["true", "true"]), &ConversionType::int(), None, true, true, false);
        assert_eq!(value.unwrap(), ArgValue::Number(Number::Unsigned(2)));
    }

    #[test]
    fn test_sequence_failure_is_atomic() {
        let err = convert(&raw(&["1", "x", "3"]), &ConversionType::int(), None, false, false, false)
            .unwrap_err();
        let ConversionError::BadFormat { value, .. } = err;
        assert_eq!(value, "x");
    }

    #[test]
    fn test_integer_range_checks() {
        assert!(parse_integer("255", IntKind::U8).is_ok());
        assert!(parse_integer("256", IntKind::U8).is_err());
        assert!(parse_integer("-1", IntKind::U32).is_err());
        assert_eq!(parse_integer("-10", IntKind::I8), Ok(Number::Integer(-10)));
        assert_eq!(
            parse_integer("18446744073709551615", IntKind::U64),
            Ok(Number::Unsigned(u64::MAX))
        );
    }

    #[test]
    fn test_bool_is_case_insensitive() {
        assert_eq!(parse_bool("TRUE"), Ok(true));
        assert_eq!(parse_bool(" false "), Ok(false));
        assert!(parse_bool("yes").is_err());
    }

    #[test]
    fn test_float_rejects_words() {
        assert_eq!(parse_float("0.1", FloatKind::F64), Ok(0.1));
        assert!(parse_float("inf", FloatKind::F64).is_err());
        assert!(parse_float("1e400", FloatKind::F64).is_err());
        assert_eq!(parse_float("1e3", FloatKind::F32), Ok(1000.0));
    }

    #[test]
    fn test_enum_by_name_and_value() {
        let colors = EnumType::from_names("Colors", &["Red", "Green", "Blue"]);
        let red = ArgValue::Enum {
            name: "Red".to_string(),
            value: 0,
        };
        assert_eq!(parse_enum("Red", &colors, false), Ok(red.clone()));
        assert_eq!(parse_enum("0", &colors, false), Ok(red.clone()));
        assert!(parse_enum("red", &colors, false).is_err());
        assert_eq!(parse_enum("red", &colors, true), Ok(red));
        assert!(parse_enum("3", &colors, false).is_err());
        assert!(parse_enum("Yellow", &colors, true).is_err());
    }

    #[test]
    fn test_nullable_empty_is_null() {
        let ty = ConversionType::nullable(ConversionType::long());
        assert_eq!(convert_one("", &ty, None, false), Ok(ArgValue::Null));
        assert_eq!(convert_one("7", &ty, None, false), Ok(ArgValue::from(7i64)));
    }

    #[test]
    fn test_duration_forms() {
        assert_eq!(parse_duration("01:02"), Ok(TimeDelta::minutes(62)));
        assert_eq!(
            parse_duration("00:00:01.5"),
            Ok(TimeDelta::milliseconds(1500))
        );
        assert!(parse_duration("24:00").is_err());
        assert!(parse_duration("00:60").is_err());
        assert!(parse_duration("1:2:3:4").is_err());
        assert!(parse_duration("").is_err());
        assert!(parse_duration("00:00.5").is_err());
    }

    #[test]
    fn test_duration_out_of_range() {
        assert_eq!(
            parse_duration("106751991167300.23:59:59"),
            Err("duration out of range".to_string())
        );
        assert!(parse_duration("-106751991167300.23:59:59").is_err());
        assert!(parse_duration("999999999999999999").is_err());
    }

    #[test]
    fn test_custom_converter_takes_precedence() {
        #[derive(Debug)]
        struct Doubler;
        impl Converter for Doubler {
            fn convert_from_str(&self, raw: &str) -> Result<ArgValue, String> {
                Ok(ArgValue::from(raw.repeat(2)))
            }
        }
        let value = convert(&raw(&["ab"]), &ConversionType::int(), Some(&Doubler), true, false, false);
        assert_eq!(value.unwrap(), ArgValue::from("abab"));
    }

    #[test]
    fn test_converter_declining_falls_back() {
        #[derive(Debug)]
        struct Declines;
        impl Converter for Declines {
            fn can_convert_from_str(&self) -> bool {
                false
            }
            fn convert_from_str(&self, _raw: &str) -> Result<ArgValue, String> {
                Err("never".to_string())
            }
        }
        let value = convert(&raw(&["5"]), &ConversionType::int(), Some(&Declines), true, false, false);
        assert_eq!(value.unwrap(), ArgValue::from(5i64));
    }

    #[test]
    fn test_converter_ref_instantiate() {
        #[derive(Debug)]
        struct Prefix(String);
        impl Converter for Prefix {
            fn convert_from_str(&self, raw: &str) -> Result<ArgValue, String> {
                Ok(ArgValue::from(format!("{}{}", self.0, raw)))
            }
        }
        fn make(arg: &str) -> Arc<dyn Converter> {
            Arc::new(Prefix(arg.to_string()))
        }
        let reference = ConverterRef::WithArgument(make, "pre-".to_string());
        let converter = reference.instantiate(&ConversionType::String);
        assert_eq!(converter.convert_from_str("x"), Ok(ArgValue::from("pre-x")));
        assert!(format!("{:?}", reference).contains("pre-"));
    }
}
