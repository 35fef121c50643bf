//! # argbind
//!
//! A declarative command-line argument parsing engine.
//!
//! ## What does it do?
//!
//! You describe the options and positional values a program accepts as a list
//! of [`Specification`]s. `argbind` turns raw argument strings into typed,
//! validated values keyed by specification, or into the complete list of
//! problems it found in the input.
//!
//! ## Key Features
//!
//! - **Declarative**: options carry arity, type, default, set and group metadata
//! - **Typed**: integers with range checks, floats, enums, UUIDs, durations,
//!   timestamps, big integers, nullable types and user converters
//! - **Complete diagnostics**: every error is collected in a stable order
//!   instead of stopping at the first one
//! - **Stateless**: a [`Parser`] can be shared between threads and reused
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! argbind = "0.1"
//! ```
//!
//! ### Parsing Options
//!
//! ```rust
//! use argbind::{parse, ConversionType, OptionSpec, Specification, ValueSpec};
//!
//! let specs: Vec<Specification> = vec![
//!     OptionSpec::scalar('s', "stringvalue", ConversionType::String).into(),
//!     OptionSpec::sequence('i', "int-seq", ConversionType::int()).max(4).into(),
//!     OptionSpec::switch('x', "").into(),
//!     ValueSpec::scalar(0, ConversionType::long()).into(),
//! ];
//!
//! let outcome = parse(&["-x", "--stringvalue=hi", "-i", "1", "20", "--", "-7"], &specs).unwrap();
//! let values = outcome.values().unwrap();
//!
//! assert_eq!(values.option("x").and_then(|v| v.as_bool()), Some(true));
//! assert_eq!(values.option("stringvalue").and_then(|v| v.as_str()), Some("hi"));
//! assert_eq!(values.option("i").and_then(|v| v.as_sequence()).map(|s| s.len()), Some(2));
//! assert_eq!(values.value(0).and_then(|v| v.as_i64()), Some(-7));
//! ```
//!
//! ### Reporting Errors
//!
//! ```rust
//! use argbind::{parse, ConversionType, NameInfo, OptionSpec, ParseError, Specification};
//!
//! let specs: Vec<Specification> = vec![
//!     OptionSpec::scalar(None, "str", ConversionType::String).required().into(),
//!     OptionSpec::scalar('n', "", ConversionType::int()).into(),
//! ];
//!
//! let outcome = parse(&["-n", "ten", "--what"], &specs).unwrap();
//! assert_eq!(
//!     outcome.errors(),
//!     &[
//!         ParseError::UnknownOption { token: "what".to_string() },
//!         ParseError::BadFormatConversion { name: NameInfo::new("n", "") },
//!         ParseError::MissingRequiredOption { name: NameInfo::new("", "str") },
//!     ]
//! );
//! ```
//!
//! ## Pipeline
//!
//! - [`tokenizer`]: raw strings to classified tokens
//! - [`registry`]: validated specifications queried by name
//! - [`partition`]: tokens to switches, scalars, sequences and positional values
//! - [`value_group`]: partitioned tokens to `(name, values)` groups
//! - [`convert`]: raw strings to [`ArgValue`]s
//! - [`validate`]: arity, required, mutually exclusive sets and groups
//! - [`Parser`]: runs all of the above
//!
//! See [`syntax`] for the accepted command-line syntax.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Malformed specifications are rejected with [`Error`] before any argument
//!   is read
//! - Malformed input never panics; it is reported as [`ParseError`]s

mod bound;
pub mod convert;
pub mod error;
mod map;
mod parser;
pub mod partition;
pub mod registry;
mod settings;
mod specification;
pub mod syntax;
mod token;
pub mod tokenizer;
pub mod validate;
mod value;
pub mod value_group;

pub use bound::{BoundValues, SpecKey};
pub use convert::{ConversionError, Converter, ConverterRef, ConverterRegistry};
pub use error::{Error, ErrorKind, NameInfo, ParseError, Result};
pub use map::ArgMap;
pub use parser::{Bind, ParseOutcome, Parser};
pub use settings::ParserSettings;
pub use specification::{
    ConversionType, EnumType, FloatKind, IntKind, OptionSpec, Specification, TargetShape,
    ValueSpec,
};
pub use token::{Token, TokenKind};
pub use value::{ArgValue, ExtractError, Number};

/// Parses `args` against `specs` with default [`ParserSettings`].
///
/// # Examples
///
/// ```rust
/// use argbind::{parse, OptionSpec, ParseError, Specification};
///
/// let specs: Vec<Specification> = vec![OptionSpec::switch('v', "verbose").into()];
///
/// assert!(parse(&["-v"], &specs).unwrap().is_parsed());
/// assert_eq!(parse(&["--help"], &specs).unwrap().errors(), &[ParseError::HelpRequested]);
/// ```
///
/// # Errors
///
/// Returns an error if the specifications themselves are invalid, for example
/// a sequence with a maximum of zero or two options sharing a name.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse<S: AsRef<str>>(args: &[S], specs: &[Specification]) -> Result<ParseOutcome> {
    Parser::default().parse(args, specs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_repeatable() {
        let specs: Vec<Specification> = vec![
            OptionSpec::sequence('i', "int-seq", ConversionType::int()).into(),
            OptionSpec::switch('x', "").into(),
        ];
        let args = ["-i", "1", "2", "-x", "-z"];
        let first = parse(&args, &specs).unwrap();
        let second = parse(&args, &specs).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_outcome_serializes() {
        let specs: Vec<Specification> = vec![OptionSpec::switch('x', "").into()];
        let json = serde_json::to_value(parse(&["-x"], &specs).unwrap()).unwrap();
        assert_eq!(json["Parsed"]["x"], true);
    }

    #[test]
    fn test_invalid_specs_are_fatal() {
        let specs: Vec<Specification> = vec![
            OptionSpec::switch('x', "").into(),
            OptionSpec::switch('x', "other").into(),
        ];
        assert!(matches!(parse(&["-x"], &specs), Err(Error::Duplicate(_))));
    }
}
