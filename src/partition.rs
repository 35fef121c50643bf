//! Classifying tokens into switches, scalars, sequences and non-options.
//!
//! The partitioner walks the token stream once with a small state machine:
//!
//! - `Searching`: no option is waiting for values
//! - `ScalarNameSeen`: a scalar option waits for its single value
//! - `SequenceNameSeen`: a sequence option accumulates values until its
//!   maximum, the next name, or a plain value after separator-split ones
//!
//! Value tokens that bind to no option, names that resolve to nothing and
//! names that never received their value end up as non-options. Those are
//! then split into positional values and error tokens.
//!
//! ## Examples
//!
//! ```rust
//! use argbind::partition::{partition, TypeDescriptor};
//! use argbind::{TargetShape, Token};
//!
//! let lookup = |name: &str| match name {
//!     "i" => Some(TypeDescriptor::new(TargetShape::Sequence, Some(2))),
//!     "x" => Some(TypeDescriptor::new(TargetShape::Switch, None)),
//!     _ => None,
//! };
//! let tokens = vec![
//!     Token::name("i", 0),
//!     Token::value("1", 1),
//!     Token::value("2", 2),
//!     Token::value("3", 3),
//!     Token::name("x", 4),
//!     Token::name("z", 5),
//! ];
//! let result = partition(tokens, lookup);
//!
//! let names: Vec<_> = result.value_groups.iter().map(|(n, _)| n.as_str()).collect();
//! assert_eq!(names, vec!["x", "i"]);
//! assert_eq!(result.values, vec![Token::value("3", 3)]);
//! assert_eq!(result.errors, vec![Token::name("z", 5)]);
//! assert_eq!(result.overflow.len(), 1);
//! ```

use crate::specification::TargetShape;
use crate::token::{Token, TokenKind};
use crate::value_group::{self, ValueGroup};
use indexmap::IndexMap;
use std::mem;
use tracing::debug;

/// What the partitioner needs to know about a resolved name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub shape: TargetShape,
    pub max_items: Option<usize>,
}

impl TypeDescriptor {
    #[must_use]
    pub fn new(shape: TargetShape, max_items: Option<usize>) -> Self {
        TypeDescriptor { shape, max_items }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PartitionResult {
    /// Switch, then scalar, then sequence groups, each in input order
    pub value_groups: Vec<(String, ValueGroup)>,
    /// Positional values, in input order
    pub values: Vec<Token>,
    /// Names that could not be bound
    pub errors: Vec<Token>,
    /// Values that fell out of a full sequence, with the sequence's name
    pub overflow: Vec<(String, Token)>,
}

/// Tokens sorted into buckets, before grouping.
#[derive(Debug, Clone, Default)]
pub struct TypePartition {
    pub switches: Vec<Token>,
    /// Alternating name and value tokens
    pub scalars: Vec<Token>,
    /// Each name followed by its values
    pub sequences: Vec<Token>,
    pub non_options: Vec<Token>,
    pub overflow: Vec<(String, Token)>,
}

#[derive(Debug)]
enum State {
    Searching,
    ScalarNameSeen(Token),
    SequenceNameSeen(usize),
}

#[derive(Debug)]
struct Accumulator {
    name: Token,
    max: Option<usize>,
    values: Vec<Token>,
}

impl Accumulator {
    fn is_full(&self) -> bool {
        self.max.map_or(false, |max| self.values.len() >= max)
    }
}

pub fn partition<F>(tokens: Vec<Token>, lookup: F) -> PartitionResult
where
    F: Fn(&str) -> Option<TypeDescriptor>,
{
    let typed = partition_by_type(tokens, lookup);
    let (values, errors) = partition_with(typed.non_options, Token::is_value);

    let mut value_groups = value_group::for_switches(typed.switches);
    value_groups.extend(value_group::for_scalars(typed.scalars));
    value_groups.extend(value_group::for_sequences(typed.sequences));

    debug!(
        groups = value_groups.len(),
        values = values.len(),
        errors = errors.len(),
        "partitioned tokens"
    );
    PartitionResult {
        value_groups,
        values,
        errors,
        overflow: typed.overflow,
    }
}

/// Splits tokens by `predicate`, keeping the order of each side.
pub fn partition_with<P>(tokens: Vec<Token>, predicate: P) -> (Vec<Token>, Vec<Token>)
where
    P: Fn(&Token) -> bool,
{
    tokens.into_iter().partition(|t| predicate(t))
}

/// Runs the state machine over `tokens`. Non-options come back sorted by index.
pub fn partition_by_type<F>(tokens: Vec<Token>, lookup: F) -> TypePartition
where
    F: Fn(&str) -> Option<TypeDescriptor>,
{
    let mut out = TypePartition::default();
    let mut sequences: IndexMap<usize, Accumulator> = IndexMap::new();
    let mut state = State::Searching;
    let mut separator_seen = false;
    let mut overflowing: Option<String> = None;

    for token in tokens {
        match token.kind {
            TokenKind::ValueForced => {
                separator_seen = false;
                overflowing = None;
                if let State::ScalarNameSeen(pending) = mem::replace(&mut state, State::Searching) {
                    out.non_options.push(pending);
                }
                out.non_options.push(token);
            }
            TokenKind::Name => {
                separator_seen = false;
                overflowing = None;
                if let State::ScalarNameSeen(pending) = mem::replace(&mut state, State::Searching) {
                    out.non_options.push(pending);
                }
                match lookup(&token.text).map(|d| (d.shape, d.max_items)) {
                    None => out.non_options.push(token),
                    Some((TargetShape::Switch, _)) => out.switches.push(token),
                    Some((TargetShape::Scalar, _)) => state = State::ScalarNameSeen(token),
                    Some((TargetShape::Sequence, max)) => {
                        let key = token.index;
                        sequences.entry(key).or_insert_with(|| Accumulator {
                            name: token,
                            max,
                            values: Vec::new(),
                        });
                        state = State::SequenceNameSeen(key);
                    }
                }
            }
            TokenKind::Value => match mem::replace(&mut state, State::Searching) {
                State::Searching => {
                    separator_seen = false;
                    if let Some(name) = &overflowing {
                        out.overflow.push((name.clone(), token.clone()));
                    }
                    out.non_options.push(token);
                }
                State::ScalarNameSeen(name) => {
                    separator_seen = false;
                    out.scalars.push(name);
                    out.scalars.push(token);
                }
                State::SequenceNameSeen(key) => match sequences.get_mut(&key) {
                    Some(acc) if acc.is_full() => {
                        separator_seen = false;
                        overflowing = Some(acc.name.text.clone());
                        out.overflow.push((acc.name.text.clone(), token.clone()));
                        out.non_options.push(token);
                    }
                    Some(acc) if token.from_separator => {
                        separator_seen = true;
                        acc.values.push(token);
                        state = State::SequenceNameSeen(key);
                    }
                    Some(_) if separator_seen => {
                        separator_seen = false;
                        out.non_options.push(token);
                    }
                    Some(acc) => {
                        acc.values.push(token);
                        state = State::SequenceNameSeen(key);
                    }
                    None => out.non_options.push(token),
                },
            },
        }
    }

    if let State::ScalarNameSeen(pending) = state {
        out.non_options.push(pending);
    }

    for (_, acc) in sequences {
        if acc.values.is_empty() {
            out.non_options.push(acc.name);
        } else {
            out.sequences.push(acc.name);
            out.sequences.extend(acc.values);
        }
    }

    out.non_options.sort_by_key(|t| t.index);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<TypeDescriptor> {
        match name {
            "x" => Some(TypeDescriptor::new(TargetShape::Switch, None)),
            "s" => Some(TypeDescriptor::new(TargetShape::Scalar, None)),
            "i" => Some(TypeDescriptor::new(TargetShape::Sequence, None)),
            "m" => Some(TypeDescriptor::new(TargetShape::Sequence, Some(2))),
            _ => None,
        }
    }

    fn tokens(spec: &[(&str, bool)]) -> Vec<Token> {
        spec.iter()
            .enumerate()
            .map(|(i, (text, is_name))| {
                if *is_name {
                    Token::name(*text, i)
                } else {
                    Token::value(*text, i)
                }
            })
            .collect()
    }

    #[test]
    fn test_scalar_without_value_is_relocated() {
        let result = partition(tokens(&[("s", true), ("x", true)]), lookup);
        assert_eq!(result.errors, vec![Token::name("s", 0)]);
        assert_eq!(result.value_groups.len(), 1);
        assert_eq!(result.value_groups[0].0, "x");
    }

    #[test]
    fn test_trailing_scalar_is_relocated() {
        let result = partition(tokens(&[("a", false), ("s", true)]), lookup);
        assert_eq!(result.values, vec![Token::value("a", 0)]);
        assert_eq!(result.errors, vec![Token::name("s", 1)]);
    }

    #[test]
    fn test_empty_sequence_is_error_token() {
        let result = partition(tokens(&[("i", true)]), lookup);
        assert!(result.value_groups.is_empty());
        assert_eq!(result.errors, vec![Token::name("i", 0)]);
    }

    #[test]
    fn test_sequence_stops_after_separator_values() {
        let mut toks = tokens(&[("i", true), ("1", false), ("2", false), ("3", false)]);
        toks[1].from_separator = true;
        toks[2].from_separator = true;
        let result = partition(toks, lookup);
        assert_eq!(result.value_groups[0].1.values, vec!["1", "2"]);
        assert_eq!(result.values, vec![Token::value("3", 3)]);
        assert!(result.overflow.is_empty());
    }

    #[test]
    fn test_overflow_continues_until_next_name() {
        let result = partition(
            tokens(&[
                ("m", true),
                ("1", false),
                ("2", false),
                ("3", false),
                ("4", false),
                ("x", true),
                ("5", false),
            ]),
            lookup,
        );
        let overflowed: Vec<_> = result.overflow.iter().map(|(n, t)| (n.as_str(), t.index)).collect();
        assert_eq!(overflowed, vec![("m", 3), ("m", 4)]);
        let positional: Vec<_> = result.values.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(positional, vec!["3", "4", "5"]);
    }

    #[test]
    fn test_repeated_sequence_names_are_separate_groups() {
        let result = partition(
            tokens(&[("i", true), ("1", false), ("i", true), ("2", false)]),
            lookup,
        );
        let origins: Vec<_> = result.value_groups.iter().map(|(_, g)| g.origin).collect();
        assert_eq!(origins, vec![0, 2]);
    }

    #[test]
    fn test_group_emission_order() {
        let result = partition(
            tokens(&[("i", true), ("1", false), ("s", true), ("a", false), ("x", true)]),
            lookup,
        );
        let names: Vec<_> = result.value_groups.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["x", "s", "i"]);
    }

    #[test]
    fn test_forced_values_never_bind() {
        let toks = vec![Token::name("s", 0), Token::value_forced("v", 1)];
        let result = partition(toks, lookup);
        assert_eq!(result.errors, vec![Token::name("s", 0)]);
        assert_eq!(result.values, vec![Token::value_forced("v", 1)]);
    }

    #[test]
    fn test_partition_with_keeps_order() {
        let (yes, no) = partition_with(
            tokens(&[("a", false), ("b", true), ("c", false)]),
            Token::is_value,
        );
        assert_eq!(yes.len(), 2);
        assert_eq!(no, vec![Token::name("b", 1)]);
    }
}
