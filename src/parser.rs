//! The parsing pipeline.
//!
//! [`Parser::parse`] runs every stage in order:
//!
//! 1. build the [`Registry`] (fatal configuration errors stop here)
//! 2. tokenize and split separator lists
//! 3. answer `--help` / `--version` requests
//! 4. partition tokens and bind option groups
//! 5. map positional values onto value specifications
//! 6. convert, apply defaults and hand values to the [`Bind`] hook
//! 7. validate constraints and drop ignored error kinds
//!
//! ## Examples
//!
//! ```rust
//! use argbind::{ConversionType, OptionSpec, Parser, ParserSettings, Specification};
//!
//! let specs: Vec<Specification> = vec![
//!     OptionSpec::sequence('i', "int-seq", ConversionType::int()).into(),
//!     OptionSpec::counter('v', "verbose").into(),
//! ];
//! let parser = Parser::new(ParserSettings::new().with_multi_instance(true));
//!
//! let outcome = parser.parse(&["-i", "1", "2", "-vv", "--int-seq=3"], &specs).unwrap();
//! let values = outcome.values().unwrap();
//! assert_eq!(values.option("int-seq").map(|v| v.to_string()), Some("1 2 3".to_string()));
//! assert_eq!(values.option("v").and_then(|v| v.as_u64()), Some(2));
//! ```

use crate::bound::{BoundValues, SpecKey};
use crate::convert::convert;
use crate::error::{Error, ParseError, Result};
use crate::partition::partition;
use crate::registry::Registry;
use crate::specification::{Specification, TargetShape};
use crate::tokenizer::{explode_separators, tokenize};
use crate::validate::{validate, SpecBinding};
use crate::{ArgValue, ParserSettings};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

/// Receives every bound value; a rejection becomes a
/// [`ParseError::SetValueException`].
///
/// Closures of the shape `FnMut(&SpecKey, &ArgValue) -> Result<(), String>`
/// implement it.
pub trait Bind {
    fn bind(&mut self, key: &SpecKey, value: &ArgValue) -> std::result::Result<(), String>;
}

impl<F> Bind for F
where
    F: FnMut(&SpecKey, &ArgValue) -> std::result::Result<(), String>,
{
    fn bind(&mut self, key: &SpecKey, value: &ArgValue) -> std::result::Result<(), String> {
        self(key, value)
    }
}

struct AcceptAll;

impl Bind for AcceptAll {
    fn bind(&mut self, _key: &SpecKey, _value: &ArgValue) -> std::result::Result<(), String> {
        Ok(())
    }
}

/// Result of a parse: bound values, or every problem found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ParseOutcome {
    Parsed(BoundValues),
    NotParsed(Vec<ParseError>),
}

impl ParseOutcome {
    #[inline]
    #[must_use]
    pub fn is_parsed(&self) -> bool {
        matches!(self, ParseOutcome::Parsed(_))
    }

    #[inline]
    #[must_use]
    pub fn values(&self) -> Option<&BoundValues> {
        match self {
            ParseOutcome::Parsed(values) => Some(values),
            ParseOutcome::NotParsed(_) => None,
        }
    }

    /// The errors; empty when parsing succeeded.
    #[inline]
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        match self {
            ParseOutcome::Parsed(_) => &[],
            ParseOutcome::NotParsed(errors) => errors,
        }
    }

    pub fn into_result(self) -> std::result::Result<BoundValues, Vec<ParseError>> {
        match self {
            ParseOutcome::Parsed(values) => Ok(values),
            ParseOutcome::NotParsed(errors) => Err(errors),
        }
    }
}

/// A reusable parser. Holds no state between calls.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    settings: ParserSettings,
}

impl Parser {
    #[must_use]
    pub fn new(settings: ParserSettings) -> Self {
        Parser { settings }
    }

    #[must_use]
    pub fn settings(&self) -> &ParserSettings {
        &self.settings
    }

    pub fn parse<S: AsRef<str>>(
        &self,
        args: &[S],
        specs: &[Specification],
    ) -> Result<ParseOutcome> {
        self.parse_into(args, specs, &mut AcceptAll)
    }

    /// Parses `args`, passing every bound value (defaults included) to `binder`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use argbind::{ArgValue, ConversionType, OptionSpec, ParseError, Parser, SpecKey, Specification};
    ///
    /// let specs: Vec<Specification> = vec![OptionSpec::scalar('p', "port", ConversionType::long()).into()];
    /// let mut reject_zero = |_: &SpecKey, value: &ArgValue| {
    ///     if value.as_i64() == Some(0) { Err("port 0 is reserved".to_string()) } else { Ok(()) }
    /// };
    ///
    /// let outcome = Parser::default().parse_into(&["-p", "0"], &specs, &mut reject_zero).unwrap();
    /// assert!(matches!(outcome.errors(), [ParseError::SetValueException { .. }]));
    /// ```
    pub fn parse_into<S, B>(
        &self,
        args: &[S],
        specs: &[Specification],
        binder: &mut B,
    ) -> Result<ParseOutcome>
    where
        S: AsRef<str>,
        B: Bind + ?Sized,
    {
        let registry = Registry::new(specs, &self.settings)?;
        let mut errors = Vec::new();

        let mut args: Vec<&str> = args.iter().map(|a| a.as_ref()).collect();
        let tokens = loop {
            match tokenize(&args, |name| registry.shape_of(name)) {
                Ok(tokens) => break tokens,
                Err(Error::Tokenize { token, msg }) => {
                    let Some(at) = args.iter().position(|a| *a == token) else {
                        return Err(Error::Tokenize { token, msg });
                    };
                    args.remove(at);
                    errors.push(ParseError::BadFormatToken { token });
                }
                Err(other) => return Err(other),
            }
        };
        let tokens = explode_separators(tokens, |name| registry.separator_of(name));
        debug!(tokens = tokens.len(), "tokenized");

        if tokens.iter().any(|t| t.is_name() && registry.is_help(&t.text)) {
            return Ok(ParseOutcome::NotParsed(vec![ParseError::HelpRequested]));
        }
        if tokens.iter().any(|t| t.is_name() && registry.is_version(&t.text)) {
            return Ok(ParseOutcome::NotParsed(vec![ParseError::VersionRequested]));
        }

        let partitioned = partition(tokens, |name| registry.type_descriptor(name));
        let specs = registry.specs();
        let mut bindings = vec![SpecBinding::default(); specs.len()];

        for token in &partitioned.errors {
            match registry.find_option(&token.text) {
                Some((pos, spec)) => {
                    bindings[pos].supplied = true;
                    errors.push(ParseError::MissingValueOption {
                        name: spec.name_info(),
                    });
                }
                None => errors.push(ParseError::UnknownOption {
                    token: token.text.clone(),
                }),
            }
        }

        let mut occurrences: IndexMap<usize, Vec<Vec<String>>> = IndexMap::new();
        for (name, group) in partitioned.value_groups {
            if let Some((pos, _)) = registry.find_option(&name) {
                occurrences.entry(pos).or_default().push(group.values);
            }
        }
        occurrences.sort_keys();

        let mut repeated = Vec::new();
        let mut raw_values: IndexMap<usize, Vec<String>> = IndexMap::new();
        for (pos, mut groups) in occurrences {
            let spec = &specs[pos];
            let concatenate = spec.is_flag_counter()
                || (self.settings.multi_instance && spec.shape() == TargetShape::Sequence);
            if groups.len() > 1 && !spec.is_flag_counter() && !self.settings.multi_instance {
                repeated.push(ParseError::RepeatedOption {
                    name: spec.name_info(),
                });
            }
            let raw = if concatenate {
                groups.concat()
            } else {
                groups.pop().unwrap_or_default()
            };
            raw_values.insert(pos, raw);
        }

        let positional: Vec<String> = partitioned.values.iter().map(|t| t.text.clone()).collect();
        let mut cursor = 0;
        for (pos, spec) in registry.values() {
            let remaining = positional.len() - cursor;
            let take = match spec.shape {
                TargetShape::Sequence => spec.max.map_or(remaining, |max| max.min(remaining)),
                TargetShape::Scalar | TargetShape::Switch => remaining.min(1),
            };
            if take > 0 {
                raw_values.insert(pos, positional[cursor..cursor + take].to_vec());
            }
            cursor += take;
        }
        let leftover = positional.len() - cursor;

        let mut conversion_errors = Vec::new();
        let mut converted: IndexMap<usize, ArgValue> = IndexMap::new();
        for (pos, raw) in &raw_values {
            let spec = &specs[*pos];
            bindings[*pos] = SpecBinding {
                supplied: true,
                count: raw.len(),
            };
            let result = convert(
                raw,
                spec.conversion(),
                registry.converter(*pos),
                spec.shape() != TargetShape::Sequence,
                spec.is_flag_counter(),
                self.settings.case_insensitive_enum_values,
            );
            match result {
                Ok(value) => {
                    converted.insert(*pos, value);
                }
                Err(e) => {
                    debug!(spec = %spec.key(), error = %e, "conversion failed");
                    conversion_errors.push(ParseError::BadFormatConversion {
                        name: spec.name_info(),
                    });
                }
            }
        }

        let mut bound = BoundValues::new();
        let mut bind_errors = Vec::new();
        for (pos, spec) in specs.iter().enumerate() {
            let value = match converted.swap_remove(&pos) {
                Some(value) => value,
                None if !bindings[pos].supplied => match spec.default_value() {
                    Some(default) => default.clone(),
                    None => continue,
                },
                None => continue,
            };
            let key = spec.key();
            if let Err(cause) = binder.bind(&key, &value) {
                let offending = match raw_values.get(&pos) {
                    Some(raw) if !spec.is_flag_counter() => raw.join(" "),
                    _ => value.to_string(),
                };
                bind_errors.push(ParseError::SetValueException {
                    name: spec.name_info(),
                    cause,
                    value: offending,
                });
            }
            bound.insert(key, value);
        }

        errors.extend(repeated);
        errors.extend(conversion_errors);
        errors.extend(bind_errors);
        errors.extend(validate(&registry, &bindings, &partitioned.overflow, leftover));
        errors.retain(|e| !self.settings.is_ignored(e.kind()));

        debug!(bound = bound.len(), errors = errors.len(), "parse finished");
        if errors.is_empty() {
            Ok(ParseOutcome::Parsed(bound))
        } else {
            Ok(ParseOutcome::NotParsed(errors))
        }
    }
}
