//! Ordered map used for structured argument values.
//!
//! [`ArgMap`] wraps an [`IndexMap`] so that fields produced by a custom
//! converter keep the order in which the converter inserted them.
//!
//! ## Examples
//!
//! ```rust
//! use argbind::{ArgMap, ArgValue};
//!
//! let mut map = ArgMap::new();
//! map.insert("server".to_string(), ArgValue::from("localhost"));
//! map.insert("port".to_string(), ArgValue::from(8080));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("server").and_then(|v| v.as_str()), Some("localhost"));
//! ```

use crate::ArgValue;
use indexmap::IndexMap;

/// An insertion-ordered map of field names to argument values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArgMap(IndexMap<String, ArgValue>);

impl ArgMap {
    #[must_use]
    pub fn new() -> Self {
        ArgMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        ArgMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a field, returning the previous value if the field existed.
    pub fn insert(&mut self, key: String, value: ArgValue) -> Option<ArgValue> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, ArgValue> {
        self.0.keys()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, ArgValue> {
        self.0.iter()
    }
}

impl IntoIterator for ArgMap {
    type Item = (String, ArgValue);
    type IntoIter = indexmap::map::IntoIter<String, ArgValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, ArgValue)> for ArgMap {
    fn from_iter<T: IntoIterator<Item = (String, ArgValue)>>(iter: T) -> Self {
        ArgMap(IndexMap::from_iter(iter))
    }
}
