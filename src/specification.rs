//! Declarative descriptions of options and positional values.
//!
//! A [`Specification`] is either a named [`OptionSpec`] (`--name`, `-n`) or a
//! positional [`ValueSpec`] addressed by index. Both carry arity, target type
//! and constraint metadata and are built with chained methods:
//!
//! ```rust
//! use argbind::{ConversionType, OptionSpec, Specification, TargetShape, ValueSpec};
//!
//! let specs: Vec<Specification> = vec![
//!     OptionSpec::scalar('s', "stringvalue", ConversionType::String)
//!         .required()
//!         .help("a string")
//!         .into(),
//!     OptionSpec::sequence('i', "int-seq", ConversionType::int())
//!         .min(2)
//!         .max(4)
//!         .into(),
//!     ValueSpec::scalar(0, ConversionType::long()).meta_name("count").into(),
//! ];
//!
//! assert_eq!(specs[1].shape(), TargetShape::Sequence);
//! assert_eq!(specs[1].max(), Some(4));
//! assert!(specs[2].as_value().is_some());
//! ```

use crate::bound::SpecKey;
use crate::convert::ConverterRef;
use crate::error::NameInfo;
use crate::ArgValue;

/// How many raw strings a specification consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetShape {
    /// Present or absent, no value
    Switch,
    /// Exactly one value
    Scalar,
    /// Zero or more values
    Sequence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
}

impl IntKind {
    /// Inclusive bounds of the kind.
    #[must_use]
    pub const fn bounds(&self) -> (i128, i128) {
        match self {
            IntKind::I8 => (i8::MIN as i128, i8::MAX as i128),
            IntKind::I16 => (i16::MIN as i128, i16::MAX as i128),
            IntKind::I32 => (i32::MIN as i128, i32::MAX as i128),
            IntKind::I64 => (i64::MIN as i128, i64::MAX as i128),
            IntKind::U8 => (0, u8::MAX as i128),
            IntKind::U16 => (0, u16::MAX as i128),
            IntKind::U32 => (0, u32::MAX as i128),
            IntKind::U64 => (0, u64::MAX as i128),
        }
    }

    #[must_use]
    pub const fn is_signed(&self) -> bool {
        matches!(self, IntKind::I8 | IntKind::I16 | IntKind::I32 | IntKind::I64)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IntKind::I8 => "i8",
            IntKind::I16 => "i16",
            IntKind::I32 => "i32",
            IntKind::I64 => "i64",
            IntKind::U8 => "u8",
            IntKind::U16 => "u16",
            IntKind::U32 => "u32",
            IntKind::U64 => "u64",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatKind {
    F32,
    F64,
}

/// A named enumeration with explicit underlying values.
///
/// # Examples
///
/// ```rust
/// use argbind::EnumType;
///
/// let colors = EnumType::from_names("Colors", &["Red", "Green", "Blue"]);
/// assert_eq!(colors.names(), vec!["Red", "Green", "Blue"]);
/// assert_eq!(colors.variants()[2], ("Blue".to_string(), 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    pub name: String,
    variants: Vec<(String, i64)>,
}

impl EnumType {
    #[must_use]
    pub fn new<S: Into<String>>(name: impl Into<String>, variants: Vec<(S, i64)>) -> Self {
        EnumType {
            name: name.into(),
            variants: variants.into_iter().map(|(n, v)| (n.into(), v)).collect(),
        }
    }

    /// Declares variants numbered from zero in declaration order.
    #[must_use]
    pub fn from_names(name: impl Into<String>, names: &[&str]) -> Self {
        EnumType {
            name: name.into(),
            variants: names
                .iter()
                .zip(0i64..)
                .map(|(n, v)| (n.to_string(), v))
                .collect(),
        }
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.variants.iter().map(|(n, _)| n.as_str()).collect()
    }

    #[must_use]
    pub fn variants(&self) -> &[(String, i64)] {
        &self.variants
    }
}

/// The type raw strings are coerced into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionType {
    String,
    Bool,
    Char,
    Integer(IntKind),
    Float(FloatKind),
    BigInt,
    Guid,
    Duration,
    DateTime,
    Enum(EnumType),
    /// The inner type, or `Null` for an empty string
    Nullable(Box<ConversionType>),
    /// A user type handled by a converter registered under this name
    Custom(String),
}

impl ConversionType {
    #[must_use]
    pub const fn int() -> Self {
        ConversionType::Integer(IntKind::I32)
    }

    #[must_use]
    pub const fn long() -> Self {
        ConversionType::Integer(IntKind::I64)
    }

    #[must_use]
    pub const fn double() -> Self {
        ConversionType::Float(FloatKind::F64)
    }

    #[must_use]
    pub fn nullable(inner: ConversionType) -> Self {
        ConversionType::Nullable(Box::new(inner))
    }

    /// The type with any `Nullable` wrapper removed.
    #[must_use]
    pub fn base(&self) -> &ConversionType {
        match self {
            ConversionType::Nullable(inner) => inner.base(),
            other => other,
        }
    }

    /// Name used for converter registration and diagnostics.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use argbind::ConversionType;
    ///
    /// assert_eq!(ConversionType::int().type_name(), "i32");
    /// assert_eq!(ConversionType::nullable(ConversionType::long()).type_name(), "Option<i64>");
    /// assert_eq!(ConversionType::Custom("Endpoint".into()).type_name(), "Endpoint");
    /// ```
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            ConversionType::String => "String".to_string(),
            ConversionType::Bool => "bool".to_string(),
            ConversionType::Char => "char".to_string(),
            ConversionType::Integer(kind) => kind.as_str().to_string(),
            ConversionType::Float(FloatKind::F32) => "f32".to_string(),
            ConversionType::Float(FloatKind::F64) => "f64".to_string(),
            ConversionType::BigInt => "BigInt".to_string(),
            ConversionType::Guid => "Guid".to_string(),
            ConversionType::Duration => "Duration".to_string(),
            ConversionType::DateTime => "DateTime".to_string(),
            ConversionType::Enum(e) => e.name.clone(),
            ConversionType::Nullable(inner) => format!("Option<{}>", inner.type_name()),
            ConversionType::Custom(name) => name.clone(),
        }
    }
}

/// A named option.
///
/// An empty `long` means the option has no long name.
#[derive(Debug, Clone)]
pub struct OptionSpec {
    pub short: Option<char>,
    pub long: String,
    pub required: bool,
    /// Mutually exclusive set; empty for none
    pub set_name: String,
    pub min: Option<usize>,
    pub max: Option<usize>,
    pub separator: Option<char>,
    pub default: Option<ArgValue>,
    pub help: String,
    pub meta_value: String,
    pub possible_values: Vec<String>,
    pub conversion: ConversionType,
    pub shape: TargetShape,
    /// Option group; empty for none
    pub group: String,
    pub flag_counter: bool,
    pub hidden: bool,
    pub converter: Option<ConverterRef>,
}

impl OptionSpec {
    #[must_use]
    pub fn new(
        short: impl Into<Option<char>>,
        long: impl Into<String>,
        conversion: ConversionType,
        shape: TargetShape,
    ) -> Self {
        OptionSpec {
            short: short.into(),
            long: long.into(),
            required: false,
            set_name: String::new(),
            min: None,
            max: None,
            separator: None,
            default: None,
            help: String::new(),
            meta_value: String::new(),
            possible_values: Vec::new(),
            conversion,
            shape,
            group: String::new(),
            flag_counter: false,
            hidden: false,
            converter: None,
        }
    }

    /// A boolean option that takes no value.
    #[must_use]
    pub fn switch(short: impl Into<Option<char>>, long: impl Into<String>) -> Self {
        Self::new(short, long, ConversionType::Bool, TargetShape::Switch)
    }

    #[must_use]
    pub fn scalar(
        short: impl Into<Option<char>>,
        long: impl Into<String>,
        conversion: ConversionType,
    ) -> Self {
        Self::new(short, long, conversion, TargetShape::Scalar)
    }

    #[must_use]
    pub fn sequence(
        short: impl Into<Option<char>>,
        long: impl Into<String>,
        conversion: ConversionType,
    ) -> Self {
        Self::new(short, long, conversion, TargetShape::Sequence)
    }

    /// A switch whose value is the number of times it appears (`-vvv` is 3).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use argbind::{parse, OptionSpec, Specification};
    ///
    /// let specs: Vec<Specification> = vec![OptionSpec::counter('v', "verbose").into()];
    /// let outcome = parse(&["-vvv"], &specs).unwrap();
    /// let values = outcome.values().unwrap();
    /// assert_eq!(values.option("verbose").and_then(|v| v.as_u64()), Some(3));
    /// ```
    #[must_use]
    pub fn counter(short: impl Into<Option<char>>, long: impl Into<String>) -> Self {
        let mut spec = Self::new(short, long, ConversionType::int(), TargetShape::Switch);
        spec.flag_counter = true;
        spec
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn set(mut self, set_name: impl Into<String>) -> Self {
        self.set_name = set_name.into();
        self
    }

    #[must_use]
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    #[must_use]
    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Splits the value following this option on `separator`.
    #[must_use]
    pub fn separator(mut self, separator: char) -> Self {
        self.separator = Some(separator);
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<ArgValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    #[must_use]
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    #[must_use]
    pub fn meta_value(mut self, meta_value: impl Into<String>) -> Self {
        self.meta_value = meta_value.into();
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    #[must_use]
    pub fn converter(mut self, converter: ConverterRef) -> Self {
        self.converter = Some(converter);
        self
    }

    #[must_use]
    pub fn name_info(&self) -> NameInfo {
        NameInfo::new(
            self.short.map(String::from).unwrap_or_default(),
            self.long.clone(),
        )
    }
}

/// A positional value, filled from the non-option arguments in index order.
#[derive(Debug, Clone)]
pub struct ValueSpec {
    pub index: usize,
    pub meta_name: String,
    pub required: bool,
    pub min: Option<usize>,
    pub max: Option<usize>,
    pub default: Option<ArgValue>,
    pub help: String,
    pub meta_value: String,
    pub possible_values: Vec<String>,
    pub conversion: ConversionType,
    pub shape: TargetShape,
    pub hidden: bool,
    pub converter: Option<ConverterRef>,
}

impl ValueSpec {
    #[must_use]
    pub fn new(index: usize, conversion: ConversionType, shape: TargetShape) -> Self {
        ValueSpec {
            index,
            meta_name: String::new(),
            required: false,
            min: None,
            max: None,
            default: None,
            help: String::new(),
            meta_value: String::new(),
            possible_values: Vec::new(),
            conversion,
            shape,
            hidden: false,
            converter: None,
        }
    }

    #[must_use]
    pub fn scalar(index: usize, conversion: ConversionType) -> Self {
        Self::new(index, conversion, TargetShape::Scalar)
    }

    #[must_use]
    pub fn sequence(index: usize, conversion: ConversionType) -> Self {
        Self::new(index, conversion, TargetShape::Sequence)
    }

    #[must_use]
    pub fn meta_name(mut self, meta_name: impl Into<String>) -> Self {
        self.meta_name = meta_name.into();
        self
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<ArgValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    #[must_use]
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    #[must_use]
    pub fn converter(mut self, converter: ConverterRef) -> Self {
        self.converter = Some(converter);
        self
    }
}

/// A named option or a positional value.
#[derive(Debug, Clone)]
pub enum Specification {
    Option(OptionSpec),
    Value(ValueSpec),
}

impl Specification {
    #[inline]
    #[must_use]
    pub fn as_option(&self) -> Option<&OptionSpec> {
        match self {
            Specification::Option(o) => Some(o),
            Specification::Value(_) => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_value(&self) -> Option<&ValueSpec> {
        match self {
            Specification::Value(v) => Some(v),
            Specification::Option(_) => None,
        }
    }

    /// Identity of the specification in bound results.
    #[must_use]
    pub fn key(&self) -> SpecKey {
        match self {
            Specification::Option(o) => SpecKey::Option(o.name_info()),
            Specification::Value(v) => SpecKey::Value(v.index),
        }
    }

    /// Option names; positional values have an empty `NameInfo`.
    #[must_use]
    pub fn name_info(&self) -> NameInfo {
        match self {
            Specification::Option(o) => o.name_info(),
            Specification::Value(_) => NameInfo::empty(),
        }
    }

    #[must_use]
    pub fn conversion(&self) -> &ConversionType {
        match self {
            Specification::Option(o) => &o.conversion,
            Specification::Value(v) => &v.conversion,
        }
    }

    #[must_use]
    pub fn shape(&self) -> TargetShape {
        match self {
            Specification::Option(o) => o.shape,
            Specification::Value(v) => v.shape,
        }
    }

    #[must_use]
    pub fn min(&self) -> Option<usize> {
        match self {
            Specification::Option(o) => o.min,
            Specification::Value(v) => v.min,
        }
    }

    #[must_use]
    pub fn max(&self) -> Option<usize> {
        match self {
            Specification::Option(o) => o.max,
            Specification::Value(v) => v.max,
        }
    }

    #[must_use]
    pub fn required(&self) -> bool {
        match self {
            Specification::Option(o) => o.required,
            Specification::Value(v) => v.required,
        }
    }

    #[must_use]
    pub fn default_value(&self) -> Option<&ArgValue> {
        match self {
            Specification::Option(o) => o.default.as_ref(),
            Specification::Value(v) => v.default.as_ref(),
        }
    }

    #[must_use]
    pub fn converter(&self) -> Option<&ConverterRef> {
        match self {
            Specification::Option(o) => o.converter.as_ref(),
            Specification::Value(v) => v.converter.as_ref(),
        }
    }

    #[must_use]
    pub fn possible_values(&self) -> &[String] {
        match self {
            Specification::Option(o) => &o.possible_values,
            Specification::Value(v) => &v.possible_values,
        }
    }

    pub(crate) fn possible_values_mut(&mut self) -> &mut Vec<String> {
        match self {
            Specification::Option(o) => &mut o.possible_values,
            Specification::Value(v) => &mut v.possible_values,
        }
    }

    /// Mutually exclusive set name; empty for values and unset options.
    #[must_use]
    pub fn set_name(&self) -> &str {
        match self {
            Specification::Option(o) => &o.set_name,
            Specification::Value(_) => "",
        }
    }

    /// Option group name; empty for values and ungrouped options.
    #[must_use]
    pub fn group(&self) -> &str {
        match self {
            Specification::Option(o) => &o.group,
            Specification::Value(_) => "",
        }
    }

    #[must_use]
    pub fn is_flag_counter(&self) -> bool {
        matches!(self, Specification::Option(o) if o.flag_counter)
    }
}

impl From<OptionSpec> for Specification {
    fn from(spec: OptionSpec) -> Self {
        Specification::Option(spec)
    }
}

impl From<ValueSpec> for Specification {
    fn from(spec: ValueSpec) -> Self {
        Specification::Value(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_info_from_names() {
        let spec = OptionSpec::scalar('s', "string", ConversionType::String);
        assert_eq!(spec.name_info(), NameInfo::new("s", "string"));
        let spec = OptionSpec::scalar('x', "", ConversionType::String);
        assert_eq!(spec.name_info(), NameInfo::new("x", ""));
        let spec = OptionSpec::switch(None, "verbose");
        assert_eq!(spec.name_info(), NameInfo::new("", "verbose"));
    }

    #[test]
    fn test_counter_is_switch_shaped() {
        let spec: Specification = OptionSpec::counter('v', "").into();
        assert_eq!(spec.shape(), TargetShape::Switch);
        assert!(spec.is_flag_counter());
    }

    #[test]
    fn test_int_bounds() {
        assert_eq!(IntKind::U8.bounds(), (0, 255));
        assert_eq!(IntKind::I16.bounds(), (-32768, 32767));
        assert!(!IntKind::U64.is_signed());
    }

    #[test]
    fn test_base_strips_nullable() {
        let ty = ConversionType::nullable(ConversionType::nullable(ConversionType::Guid));
        assert_eq!(ty.base(), &ConversionType::Guid);
    }

    #[test]
    fn test_value_spec_key() {
        let spec: Specification = ValueSpec::sequence(1, ConversionType::String).max(2).into();
        assert_eq!(spec.key(), SpecKey::Value(1));
        assert!(spec.name_info().is_empty());
        assert_eq!(spec.set_name(), "");
    }
}
