//! Error types for argument parsing.
//!
//! Errors travel on two separate channels:
//!
//! - [`Error`]: fatal configuration problems. The specifications handed to the
//!   parser are malformed (zero arity bounds, an option that is both in a group
//!   and in a mutually exclusive set, a custom type without a converter, ...).
//!   These are programming errors and parsing never starts.
//! - [`ParseError`]: recoverable problems with the user's input. They are
//!   collected rather than returned on first sight, so a single run reports
//!   every problem at once.
//!
//! ## Examples
//!
//! ```rust
//! use argbind::{parse, OptionSpec, ParseError, Specification};
//!
//! let specs: Vec<Specification> = vec![OptionSpec::switch('v', "verbose").into()];
//! let outcome = parse(&["--nope"], &specs).unwrap();
//!
//! assert_eq!(
//!     outcome.errors(),
//!     &[ParseError::UnknownOption { token: "nope".to_string() }]
//! );
//! ```

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Short and long name of the specification an error refers to.
///
/// Positional values carry an empty `NameInfo`.
///
/// # Examples
///
/// ```rust
/// use argbind::NameInfo;
///
/// let name = NameInfo::new("s", "string-seq");
/// assert_eq!(name.to_string(), "s, string-seq");
/// assert_eq!(name.name_text(), "string-seq");
/// assert!(NameInfo::empty().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct NameInfo {
    pub short_name: String,
    pub long_name: String,
}

impl NameInfo {
    #[must_use]
    pub fn new(short_name: impl Into<String>, long_name: impl Into<String>) -> Self {
        NameInfo {
            short_name: short_name.into(),
            long_name: long_name.into(),
        }
    }

    /// The name used by positional values.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.short_name.is_empty() && self.long_name.is_empty()
    }

    /// The preferred single name: the long name if present, the short one otherwise.
    #[must_use]
    pub fn name_text(&self) -> &str {
        if self.long_name.is_empty() {
            &self.short_name
        } else {
            &self.long_name
        }
    }
}

impl fmt::Display for NameInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.short_name.is_empty(), self.long_name.is_empty()) {
            (false, false) => write!(f, "{}, {}", self.short_name, self.long_name),
            (false, true) => write!(f, "{}", self.short_name),
            (true, false) => write!(f, "{}", self.long_name),
            (true, true) => write!(f, "<value>"),
        }
    }
}

fn join_names(names: &[NameInfo]) -> String {
    names
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Fatal configuration errors raised before any argument is looked at.
///
/// # Examples
///
/// ```rust
/// use argbind::{parse, ConversionType, Error, OptionSpec, Specification};
///
/// let specs: Vec<Specification> = vec![OptionSpec::sequence('i', "", ConversionType::int()).min(0).into()];
/// let err = parse(&["-i", "1"], &specs).unwrap_err();
/// assert!(matches!(err, Error::InvalidRange { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// `min` or `max` is zero, or `min` exceeds `max`
    #[error("Invalid range for {name}: min ({min:?}) and max ({max:?}) must be at least 1 and min must not exceed max")]
    InvalidRange {
        name: NameInfo,
        min: Option<usize>,
        max: Option<usize>,
    },

    /// An option declared without any name
    #[error("An option specification needs a short or a long name")]
    MissingName,

    /// Two options share a name, or two values share an index
    #[error("Duplicate specification '{0}'")]
    Duplicate(String),

    /// Options that belong both to a group and to a mutually exclusive set
    #[error("Options cannot belong to an option group and a mutually exclusive set at once: {}", join_names(.options))]
    GroupOptionAmbiguity { options: Vec<NameInfo> },

    /// A custom target type for which no converter could be resolved
    #[error("No converter available for type '{type_name}' used by {name}")]
    MissingConverter { name: NameInfo, type_name: String },

    /// Structurally malformed argument
    #[error("Malformed argument '{token}': {msg}")]
    Tokenize { token: String, msg: String },
}

impl Error {
    /// Creates a tokenization error for a malformed argument.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use argbind::Error;
    ///
    /// let err = Error::tokenize("--=x", "missing option name");
    /// assert!(err.to_string().contains("--=x"));
    /// ```
    pub fn tokenize(token: &str, msg: &str) -> Self {
        Error::Tokenize {
            token: token.to_string(),
            msg: msg.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Discriminant of a [`ParseError`], used to suppress whole categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    HelpRequested,
    VersionRequested,
    UnknownOption,
    MissingValueOption,
    BadFormatToken,
    BadFormatConversion,
    SequenceOutOfRange,
    MissingRequiredOption,
    MutuallyExclusiveSet,
    MissingGroupOption,
    RepeatedOption,
    SetValueException,
}

/// A recoverable problem with the parsed arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind")]
pub enum ParseError {
    #[error("Help was requested")]
    HelpRequested,

    #[error("Version was requested")]
    VersionRequested,

    #[error("Option '{token}' is unknown")]
    UnknownOption { token: String },

    #[error("Option '{name}' has no value")]
    MissingValueOption { name: NameInfo },

    #[error("Token '{token}' is not recognized")]
    BadFormatToken { token: String },

    #[error("Option '{name}' is defined with a bad format")]
    BadFormatConversion { name: NameInfo },

    #[error("A sequence option '{name}' is defined with fewer or more items than required")]
    SequenceOutOfRange { name: NameInfo },

    #[error("Required option '{name}' is missing")]
    MissingRequiredOption { name: NameInfo },

    #[error("Option '{name}' of set '{set_name}' is not compatible with options of another set")]
    MutuallyExclusiveSet { name: NameInfo, set_name: String },

    #[error("At least one option from group '{group}' ({}) is required", join_names(.names))]
    MissingGroupOption { group: String, names: Vec<NameInfo> },

    #[error("Option '{name}' is defined multiple times")]
    RepeatedOption { name: NameInfo },

    #[error("Error setting value '{value}' to option '{name}': {cause}")]
    SetValueException {
        name: NameInfo,
        cause: String,
        value: String,
    },
}

impl ParseError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            ParseError::HelpRequested => ErrorKind::HelpRequested,
            ParseError::VersionRequested => ErrorKind::VersionRequested,
            ParseError::UnknownOption { .. } => ErrorKind::UnknownOption,
            ParseError::MissingValueOption { .. } => ErrorKind::MissingValueOption,
            ParseError::BadFormatToken { .. } => ErrorKind::BadFormatToken,
            ParseError::BadFormatConversion { .. } => ErrorKind::BadFormatConversion,
            ParseError::SequenceOutOfRange { .. } => ErrorKind::SequenceOutOfRange,
            ParseError::MissingRequiredOption { .. } => ErrorKind::MissingRequiredOption,
            ParseError::MutuallyExclusiveSet { .. } => ErrorKind::MutuallyExclusiveSet,
            ParseError::MissingGroupOption { .. } => ErrorKind::MissingGroupOption,
            ParseError::RepeatedOption { .. } => ErrorKind::RepeatedOption,
            ParseError::SetValueException { .. } => ErrorKind::SetValueException,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_info_display() {
        assert_eq!(NameInfo::new("s", "").to_string(), "s");
        assert_eq!(NameInfo::new("", "long").to_string(), "long");
        assert_eq!(NameInfo::empty().to_string(), "<value>");
    }

    #[test]
    fn test_kind_matches_variant() {
        let err = ParseError::RepeatedOption {
            name: NameInfo::new("s", "shortandlong"),
        };
        assert_eq!(err.kind(), ErrorKind::RepeatedOption);
        assert_eq!(ParseError::HelpRequested.kind(), ErrorKind::HelpRequested);
    }

    #[test]
    fn test_group_error_lists_members() {
        let err = ParseError::MissingGroupOption {
            group: "err-group".to_string(),
            names: vec![NameInfo::new("", "option11"), NameInfo::new("", "option12")],
        };
        let msg = err.to_string();
        assert!(msg.contains("err-group"));
        assert!(msg.contains("option11; option12"));
    }

    #[test]
    fn test_serialize_tagged() {
        let err = ParseError::UnknownOption {
            token: "xyz".to_string(),
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "UnknownOption");
        assert_eq!(json["token"], "xyz");
    }
}
