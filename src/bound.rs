//! Bound values keyed by specification identity.

use crate::error::NameInfo;
use crate::ArgValue;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Identity of a specification: option names or a positional index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SpecKey {
    Option(NameInfo),
    Value(usize),
}

impl fmt::Display for SpecKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecKey::Option(name) => write!(f, "{}", name.name_text()),
            SpecKey::Value(index) => write!(f, "#{}", index),
        }
    }
}

/// Values of every bound specification, in registry order.
///
/// # Examples
///
/// ```rust
/// use argbind::{parse, ConversionType, OptionSpec, Specification, ValueSpec};
///
/// let specs: Vec<Specification> = vec![
///     OptionSpec::scalar('s', "stringvalue", ConversionType::String).into(),
///     ValueSpec::scalar(0, ConversionType::long()).into(),
/// ];
/// let outcome = parse(&["-s", "abc", "42"], &specs).unwrap();
/// let values = outcome.values().unwrap();
///
/// assert_eq!(values.option("stringvalue").and_then(|v| v.as_str()), Some("abc"));
/// assert_eq!(values.option("s").and_then(|v| v.as_str()), Some("abc"));
/// assert_eq!(values.value(0).and_then(|v| v.as_i64()), Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoundValues(IndexMap<SpecKey, ArgValue>);

impl BoundValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: SpecKey, value: ArgValue) -> Option<ArgValue> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &SpecKey) -> Option<&ArgValue> {
        self.0.get(key)
    }

    /// Looks an option up by its short or long name.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&ArgValue> {
        self.0.iter().find_map(|(key, value)| match key {
            SpecKey::Option(info) if info.long_name == name || info.short_name == name => {
                Some(value)
            }
            _ => None,
        })
    }

    /// Looks a positional value up by its index.
    #[must_use]
    pub fn value(&self, index: usize) -> Option<&ArgValue> {
        self.0.get(&SpecKey::Value(index))
    }

    #[must_use]
    pub fn contains(&self, key: &SpecKey) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, SpecKey, ArgValue> {
        self.0.iter()
    }
}

impl IntoIterator for BoundValues {
    type Item = (SpecKey, ArgValue);
    type IntoIter = indexmap::map::IntoIter<SpecKey, ArgValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Serialize for BoundValues {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(&key.to_string(), value)?;
        }
        map.end()
    }
}
