//! The specification table consulted while parsing.
//!
//! [`Registry::new`] checks the configuration invariants, resolves converters
//! and possible values once, and then answers name lookups for the tokenizer
//! and the partitioner.

use crate::convert::Converter;
use crate::error::{Error, NameInfo, Result};
use crate::partition::TypeDescriptor;
use crate::specification::{ConversionType, OptionSpec, Specification, TargetShape, ValueSpec};
use crate::ParserSettings;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

const HELP: &str = "help";
const VERSION: &str = "version";

/// Validated specifications with their resolved converters.
///
/// # Examples
///
/// ```rust
/// use argbind::registry::Registry;
/// use argbind::{ConversionType, OptionSpec, ParserSettings, Specification, TargetShape};
///
/// let specs: Vec<Specification> = vec![
///     OptionSpec::scalar('s', "stringvalue", ConversionType::String).into(),
/// ];
/// let settings = ParserSettings::new().with_case_sensitive(false);
/// let registry = Registry::new(&specs, &settings).unwrap();
///
/// assert_eq!(registry.shape_of("STRINGVALUE"), Some(TargetShape::Scalar));
/// assert!(registry.is_help("help"));
/// ```
#[derive(Debug)]
pub struct Registry {
    specs: Vec<Specification>,
    converters: Vec<Option<Arc<dyn Converter>>>,
    case_sensitive: bool,
    auto_help: bool,
    auto_version: bool,
}

impl Registry {
    pub fn new(specs: &[Specification], settings: &ParserSettings) -> Result<Self> {
        check_names(specs, settings.case_sensitive)?;
        check_ranges(specs)?;
        check_group_set_ambiguity(specs)?;

        let mut resolved = specs.to_vec();
        let mut converters = Vec::with_capacity(specs.len());
        for spec in &mut resolved {
            let converter = resolve_converter(spec, settings)?;
            if spec.possible_values().is_empty() {
                let possible = match (&converter, spec.conversion().base()) {
                    (Some(c), _) => c.allowed_values(),
                    (None, ConversionType::Enum(e)) => {
                        e.names().into_iter().map(String::from).collect()
                    }
                    _ => Vec::new(),
                };
                *spec.possible_values_mut() = possible;
            }
            converters.push(converter);
        }

        debug!(specs = resolved.len(), "registry built");
        Ok(Registry {
            specs: resolved,
            converters,
            case_sensitive: settings.case_sensitive,
            auto_help: settings.auto_help,
            auto_version: settings.auto_version,
        })
    }

    fn matches(&self, declared: &str, name: &str) -> bool {
        if self.case_sensitive {
            declared == name
        } else {
            declared.to_lowercase() == name.to_lowercase()
        }
    }

    fn option_matches(&self, spec: &OptionSpec, name: &str) -> bool {
        let short_match = spec.short.map_or(false, |c| {
            let mut buf = [0u8; 4];
            self.matches(c.encode_utf8(&mut buf), name)
        });
        short_match || (!spec.long.is_empty() && self.matches(&spec.long, name))
    }

    /// Finds the option claiming `name`, with its position in the table.
    #[must_use]
    pub fn find_option(&self, name: &str) -> Option<(usize, &OptionSpec)> {
        self.options().find(|(_, spec)| self.option_matches(spec, name))
    }

    #[must_use]
    pub fn shape_of(&self, name: &str) -> Option<TargetShape> {
        self.find_option(name).map(|(_, spec)| spec.shape)
    }

    #[must_use]
    pub fn separator_of(&self, name: &str) -> Option<char> {
        self.find_option(name).and_then(|(_, spec)| spec.separator)
    }

    #[must_use]
    pub fn type_descriptor(&self, name: &str) -> Option<TypeDescriptor> {
        self.find_option(name)
            .map(|(_, spec)| TypeDescriptor::new(spec.shape, spec.max))
    }

    /// `name` requests help: auto-help is on and no option claims the name.
    #[must_use]
    pub fn is_help(&self, name: &str) -> bool {
        self.auto_help && self.matches(HELP, name) && self.find_option(name).is_none()
    }

    #[must_use]
    pub fn is_version(&self, name: &str) -> bool {
        self.auto_version && self.matches(VERSION, name) && self.find_option(name).is_none()
    }

    #[must_use]
    pub fn specs(&self) -> &[Specification] {
        &self.specs
    }

    /// Converter resolved for the specification at `pos`.
    #[must_use]
    pub fn converter(&self, pos: usize) -> Option<&dyn Converter> {
        self.converters.get(pos).and_then(|c| c.as_deref())
    }

    pub fn options(&self) -> impl Iterator<Item = (usize, &OptionSpec)> {
        self.specs
            .iter()
            .enumerate()
            .filter_map(|(pos, spec)| spec.as_option().map(|o| (pos, o)))
    }

    /// Positional specifications ordered by index.
    #[must_use]
    pub fn values(&self) -> Vec<(usize, &ValueSpec)> {
        let mut values: Vec<_> = self
            .specs
            .iter()
            .enumerate()
            .filter_map(|(pos, spec)| spec.as_value().map(|v| (pos, v)))
            .collect();
        values.sort_by_key(|(_, v)| v.index);
        values
    }
}

fn check_names(specs: &[Specification], case_sensitive: bool) -> Result<()> {
    let fold = |name: &str| {
        if case_sensitive {
            name.to_string()
        } else {
            name.to_lowercase()
        }
    };

    let mut seen_names = HashSet::new();
    let mut seen_indexes = HashSet::new();
    for spec in specs {
        match spec {
            Specification::Option(o) => {
                if o.short.is_none() && o.long.is_empty() {
                    return Err(Error::MissingName);
                }
                let names = o
                    .short
                    .map(String::from)
                    .into_iter()
                    .chain((!o.long.is_empty()).then(|| o.long.clone()));
                for name in names {
                    if !seen_names.insert(fold(&name)) {
                        return Err(Error::Duplicate(name));
                    }
                }
            }
            Specification::Value(v) => {
                if !seen_indexes.insert(v.index) {
                    return Err(Error::Duplicate(format!("value #{}", v.index)));
                }
            }
        }
    }
    Ok(())
}

fn check_ranges(specs: &[Specification]) -> Result<()> {
    for spec in specs {
        let (min, max) = (spec.min(), spec.max());
        let invalid = min == Some(0)
            || max == Some(0)
            || matches!((min, max), (Some(lo), Some(hi)) if lo > hi);
        if invalid {
            return Err(Error::InvalidRange {
                name: spec.name_info(),
                min,
                max,
            });
        }
    }
    Ok(())
}

fn check_group_set_ambiguity(specs: &[Specification]) -> Result<()> {
    let ambiguous: Vec<NameInfo> = specs
        .iter()
        .filter(|s| !s.group().is_empty() && !s.set_name().is_empty())
        .map(Specification::name_info)
        .collect();
    if ambiguous.is_empty() {
        Ok(())
    } else {
        Err(Error::GroupOptionAmbiguity { options: ambiguous })
    }
}

fn resolve_converter(
    spec: &Specification,
    settings: &ParserSettings,
) -> Result<Option<Arc<dyn Converter>>> {
    let conversion = spec.conversion();
    let converter = match spec.converter() {
        Some(reference) => Some(reference.instantiate(conversion)),
        None if settings.use_registered_converters => settings
            .converters
            .get(&conversion.base().type_name())
            .cloned(),
        None => None,
    };

    match conversion.base() {
        ConversionType::Custom(type_name) if converter.is_none() => Err(Error::MissingConverter {
            name: spec.name_info(),
            type_name: type_name.clone(),
        }),
        _ => Ok(converter),
    }
}
