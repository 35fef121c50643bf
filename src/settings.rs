//! Parser configuration.
//!
//! [`ParserSettings`] controls name matching, the implicit `help`/`version`
//! switches, repeated options, error suppression and converter lookup.
//!
//! ## Examples
//!
//! ```rust
//! use argbind::{ErrorKind, ParserSettings};
//!
//! let settings = ParserSettings::new()
//!     .with_case_sensitive(false)
//!     .with_multi_instance(true)
//!     .ignore_error(ErrorKind::UnknownOption);
//!
//! assert!(!settings.case_sensitive);
//! assert!(settings.is_ignored(ErrorKind::UnknownOption));
//! ```

use crate::convert::{Converter, ConverterRegistry};
use crate::error::ErrorKind;
use std::collections::HashSet;
use std::sync::Arc;

/// Configuration for a [`Parser`](crate::Parser).
///
/// # Examples
///
/// ```rust
/// use argbind::ParserSettings;
///
/// let settings = ParserSettings::default();
/// assert!(settings.case_sensitive);
/// assert!(settings.auto_help);
/// assert!(settings.auto_version);
/// assert!(!settings.multi_instance);
/// ```
#[derive(Clone, Debug)]
pub struct ParserSettings {
    /// Option names must match exactly when set
    pub case_sensitive: bool,
    /// Enumeration variant names match regardless of case when set
    pub case_insensitive_enum_values: bool,
    /// `--help` is recognized when no option claims the name
    pub auto_help: bool,
    /// `--version` is recognized when no option claims the name
    pub auto_version: bool,
    /// Repeated options are accepted instead of reported
    pub multi_instance: bool,
    /// Error kinds removed from the final outcome
    pub ignored_errors: HashSet<ErrorKind>,
    /// Consult `converters` for target types without their own converter
    pub use_registered_converters: bool,
    pub converters: ConverterRegistry,
}

impl Default for ParserSettings {
    fn default() -> Self {
        ParserSettings {
            case_sensitive: true,
            case_insensitive_enum_values: false,
            auto_help: true,
            auto_version: true,
            multi_instance: false,
            ignored_errors: HashSet::new(),
            use_registered_converters: false,
            converters: ConverterRegistry::new(),
        }
    }
}

impl ParserSettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    #[must_use]
    pub fn with_case_insensitive_enum_values(mut self, insensitive: bool) -> Self {
        self.case_insensitive_enum_values = insensitive;
        self
    }

    #[must_use]
    pub fn with_auto_help(mut self, auto_help: bool) -> Self {
        self.auto_help = auto_help;
        self
    }

    #[must_use]
    pub fn with_auto_version(mut self, auto_version: bool) -> Self {
        self.auto_version = auto_version;
        self
    }

    #[must_use]
    pub fn with_multi_instance(mut self, multi_instance: bool) -> Self {
        self.multi_instance = multi_instance;
        self
    }

    /// Suppresses every error of the given kind.
    ///
    /// Ignoring [`ErrorKind::UnknownOption`] lets unrecognized names through
    /// silently.
    #[must_use]
    pub fn ignore_error(mut self, kind: ErrorKind) -> Self {
        self.ignored_errors.insert(kind);
        self
    }

    #[must_use]
    pub fn with_registered_converters(mut self, enabled: bool) -> Self {
        self.use_registered_converters = enabled;
        self
    }

    /// Registers a converter for a target type name and turns on registry lookup.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use argbind::{ArgValue, Converter, ParserSettings};
    ///
    /// #[derive(Debug)]
    /// struct Upper;
    ///
    /// impl Converter for Upper {
    ///     fn convert_from_str(&self, raw: &str) -> Result<ArgValue, String> {
    ///         Ok(ArgValue::from(raw.to_uppercase()))
    ///     }
    /// }
    ///
    /// let settings = ParserSettings::new().with_converter("Shout", Upper);
    /// assert!(settings.use_registered_converters);
    /// assert!(settings.converters.get("Shout").is_some());
    /// ```
    #[must_use]
    pub fn with_converter<C>(mut self, type_name: impl Into<String>, converter: C) -> Self
    where
        C: Converter + 'static,
    {
        self.converters.register(type_name, Arc::new(converter));
        self.use_registered_converters = true;
        self
    }

    #[inline]
    #[must_use]
    pub fn is_ignored(&self, kind: ErrorKind) -> bool {
        self.ignored_errors.contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let settings = ParserSettings::new()
            .with_auto_help(false)
            .with_auto_version(false)
            .with_case_insensitive_enum_values(true);
        assert!(!settings.auto_help);
        assert!(!settings.auto_version);
        assert!(settings.case_insensitive_enum_values);
        assert!(settings.ignored_errors.is_empty());
    }

    #[test]
    fn test_ignore_multiple_kinds() {
        let settings = ParserSettings::new()
            .ignore_error(ErrorKind::UnknownOption)
            .ignore_error(ErrorKind::RepeatedOption)
            .ignore_error(ErrorKind::UnknownOption);
        assert_eq!(settings.ignored_errors.len(), 2);
        assert!(!settings.is_ignored(ErrorKind::MissingRequiredOption));
    }
}
