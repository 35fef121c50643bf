//! Constraint checks run after binding.
//!
//! Checks run in a fixed order and each contributes its errors in registry
//! order:
//!
//! 1. arity of sequences and overflowed values
//! 2. required specifications
//! 3. mutually exclusive sets
//! 4. option groups

use crate::error::{NameInfo, ParseError};
use crate::registry::Registry;
use crate::specification::{Specification, TargetShape};
use crate::token::Token;
use indexmap::IndexMap;
use std::collections::HashSet;

/// What parsing recorded for one specification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpecBinding {
    /// The specification appeared on the command line
    pub supplied: bool,
    /// Number of raw values bound to it
    pub count: usize,
}

/// Runs every check. `bindings` is indexed like `registry.specs()`.
///
/// `overflow` lists values that fell out of full option sequences, and
/// `leftover` counts positional values no value specification consumed.
#[must_use]
pub fn validate(
    registry: &Registry,
    bindings: &[SpecBinding],
    overflow: &[(String, Token)],
    leftover: usize,
) -> Vec<ParseError> {
    let mut errors = enforce_arity(registry, bindings, overflow, leftover);
    errors.extend(enforce_required(registry, bindings));
    errors.extend(enforce_mutually_exclusive_sets(registry, bindings));
    errors.extend(enforce_groups(registry, bindings));
    errors
}

fn binding(bindings: &[SpecBinding], pos: usize) -> SpecBinding {
    bindings.get(pos).copied().unwrap_or_default()
}

pub fn enforce_arity(
    registry: &Registry,
    bindings: &[SpecBinding],
    overflow: &[(String, Token)],
    leftover: usize,
) -> Vec<ParseError> {
    let mut errors = Vec::new();

    for (pos, spec) in registry.options() {
        let bound = binding(bindings, pos);
        let too_few = matches!(spec.min, Some(min) if bound.count < min);
        if spec.shape == TargetShape::Sequence && bound.count > 0 && too_few {
            errors.push(ParseError::MissingValueOption {
                name: spec.name_info(),
            });
        }
    }

    let values = registry.values();
    for (pos, spec) in &values {
        let bound = binding(bindings, *pos);
        let too_few = matches!(spec.min, Some(min) if bound.count < min);
        if spec.shape == TargetShape::Sequence && too_few {
            errors.push(ParseError::SequenceOutOfRange {
                name: NameInfo::empty(),
            });
        }
    }

    let bounded_last = values
        .last()
        .map_or(false, |(_, v)| v.shape == TargetShape::Sequence && v.max.is_some());
    if bounded_last && leftover > 0 {
        errors.push(ParseError::SequenceOutOfRange {
            name: NameInfo::empty(),
        });
    }

    if values.is_empty() {
        let mut reported = HashSet::new();
        for (name, _) in overflow {
            if let Some((pos, spec)) = registry.find_option(name) {
                if reported.insert(pos) {
                    errors.push(ParseError::SequenceOutOfRange {
                        name: spec.name_info(),
                    });
                }
            }
        }
    }

    errors
}

pub fn enforce_required(registry: &Registry, bindings: &[SpecBinding]) -> Vec<ParseError> {
    let specs = registry.specs();
    let any_set_bound = specs
        .iter()
        .enumerate()
        .any(|(pos, s)| !s.set_name().is_empty() && binding(bindings, pos).supplied);

    specs
        .iter()
        .enumerate()
        .filter(|(pos, spec)| {
            spec.required()
                && !binding(bindings, *pos).supplied
                && spec.default_value().is_none()
                && spec.group().is_empty()
                && !(any_set_bound && !spec.set_name().is_empty())
        })
        .map(|(_, spec)| ParseError::MissingRequiredOption {
            name: spec.name_info(),
        })
        .collect()
}

pub fn enforce_mutually_exclusive_sets(
    registry: &Registry,
    bindings: &[SpecBinding],
) -> Vec<ParseError> {
    let bound: Vec<&Specification> = registry
        .specs()
        .iter()
        .enumerate()
        .filter(|(pos, s)| !s.set_name().is_empty() && binding(bindings, *pos).supplied)
        .map(|(_, s)| s)
        .collect();

    let sets: HashSet<&str> = bound.iter().map(|s| s.set_name()).collect();
    if sets.len() < 2 {
        return Vec::new();
    }

    bound
        .into_iter()
        .map(|spec| ParseError::MutuallyExclusiveSet {
            name: spec.name_info(),
            set_name: spec.set_name().to_string(),
        })
        .collect()
}

pub fn enforce_groups(registry: &Registry, bindings: &[SpecBinding]) -> Vec<ParseError> {
    let mut groups: IndexMap<&str, (Vec<NameInfo>, bool)> = IndexMap::new();
    for (pos, spec) in registry.specs().iter().enumerate() {
        if spec.group().is_empty() {
            continue;
        }
        let satisfied = binding(bindings, pos).supplied || spec.default_value().is_some();
        let entry = groups.entry(spec.group()).or_default();
        entry.0.push(spec.name_info());
        entry.1 |= satisfied;
    }

    groups
        .into_iter()
        .filter(|(_, (_, satisfied))| !satisfied)
        .map(|(group, (names, _))| ParseError::MissingGroupOption {
            group: group.to_string(),
            names,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConversionType, OptionSpec, ParserSettings, ValueSpec};

    fn registry(specs: Vec<Specification>) -> Registry {
        Registry::new(&specs, &ParserSettings::default()).unwrap()
    }

    fn supplied(count: usize) -> SpecBinding {
        SpecBinding {
            supplied: true,
            count,
        }
    }

    #[test]
    fn test_option_sequence_below_min() {
        let reg = registry(vec![OptionSpec::sequence('i', "", ConversionType::int())
            .min(2)
            .max(4)
            .into()]);
        let errors = enforce_arity(&reg, &[supplied(1)], &[], 0);
        assert_eq!(
            errors,
            vec![ParseError::MissingValueOption {
                name: NameInfo::new("i", "")
            }]
        );
    }

    #[test]
    fn test_value_sequence_leftover() {
        let reg = registry(vec![ValueSpec::sequence(0, ConversionType::String)
            .min(2)
            .max(2)
            .into()]);
        let errors = enforce_arity(&reg, &[supplied(2)], &[], 1);
        assert_eq!(
            errors,
            vec![ParseError::SequenceOutOfRange {
                name: NameInfo::empty()
            }]
        );
    }

    #[test]
    fn test_overflow_without_value_specs() {
        let reg = registry(vec![OptionSpec::sequence('s', "string-seq", ConversionType::String)
            .max(3)
            .into()]);
        let overflow = vec![
            ("string-seq".to_string(), Token::value("x", 4)),
            ("string-seq".to_string(), Token::value("y", 5)),
        ];
        let errors = enforce_arity(&reg, &[supplied(3)], &overflow, 2);
        assert_eq!(
            errors,
            vec![ParseError::SequenceOutOfRange {
                name: NameInfo::new("s", "string-seq")
            }]
        );
    }

    #[test]
    fn test_required_excused_by_default_and_set() {
        let reg = registry(vec![
            OptionSpec::scalar(None, "a", ConversionType::String).required().default_value("x").into(),
            OptionSpec::scalar(None, "ftpurl", ConversionType::String).required().set("urls").into(),
            OptionSpec::scalar(None, "weburl", ConversionType::String).required().set("urls").into(),
            OptionSpec::scalar(None, "b", ConversionType::String).required().into(),
        ]);
        let errors = enforce_required(
            &reg,
            &[SpecBinding::default(), supplied(1), SpecBinding::default(), SpecBinding::default()],
        );
        assert_eq!(
            errors,
            vec![ParseError::MissingRequiredOption {
                name: NameInfo::new("", "b")
            }]
        );
    }

    #[test]
    fn test_same_set_is_compatible() {
        let reg = registry(vec![
            OptionSpec::switch(None, "a").set("one").into(),
            OptionSpec::switch(None, "b").set("one").into(),
            OptionSpec::switch(None, "c").set("two").into(),
        ]);
        assert!(enforce_mutually_exclusive_sets(&reg, &[supplied(1), supplied(1), SpecBinding::default()]).is_empty());
        let errors = enforce_mutually_exclusive_sets(&reg, &[supplied(1), SpecBinding::default(), supplied(1)]);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_group_satisfied_by_default() {
        let reg = registry(vec![
            OptionSpec::scalar(None, "option11", ConversionType::String).group("err-group").into(),
            OptionSpec::scalar(None, "option12", ConversionType::String).group("err-group").into(),
            OptionSpec::scalar(None, "option21", ConversionType::String)
                .group("ok-group")
                .default_value("d")
                .into(),
        ]);
        let errors = enforce_groups(&reg, &[SpecBinding::default(); 3]);
        assert_eq!(
            errors,
            vec![ParseError::MissingGroupOption {
                group: "err-group".to_string(),
                names: vec![NameInfo::new("", "option11"), NameInfo::new("", "option12")],
            }]
        );
    }
}
