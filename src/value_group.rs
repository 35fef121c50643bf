//! Grouping partitioned tokens into `(name, values)` pairs.

use crate::specification::TargetShape;
use crate::token::Token;

const SWITCH_VALUE: &str = "true";

/// Raw values collected for one occurrence of an option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueGroup {
    /// Index of the name token the values belong to
    pub origin: usize,
    pub values: Vec<String>,
    pub class: TargetShape,
}

/// One group per switch token, carrying `"true"`.
#[must_use]
pub fn for_switches(tokens: Vec<Token>) -> Vec<(String, ValueGroup)> {
    tokens
        .into_iter()
        .map(|token| {
            let group = ValueGroup {
                origin: token.index,
                values: vec![SWITCH_VALUE.to_string()],
                class: TargetShape::Switch,
            };
            (token.text, group)
        })
        .collect()
}

/// Groups alternating name and value tokens.
#[must_use]
pub fn for_scalars(tokens: Vec<Token>) -> Vec<(String, ValueGroup)> {
    tokens
        .chunks_exact(2)
        .map(|pair| {
            let group = ValueGroup {
                origin: pair[0].index,
                values: vec![pair[1].text.clone()],
                class: TargetShape::Scalar,
            };
            (pair[0].text.clone(), group)
        })
        .collect()
}

/// Groups each name token with the value tokens following it.
///
/// Names without values produce no group.
///
/// # Examples
///
/// ```rust
/// use argbind::value_group::for_sequences;
/// use argbind::Token;
///
/// let groups = for_sequences(vec![
///     Token::name("i", 0),
///     Token::value("1", 1),
///     Token::value("2", 2),
///     Token::name("j", 3),
/// ]);
/// assert_eq!(groups.len(), 1);
/// assert_eq!(groups[0].0, "i");
/// assert_eq!(groups[0].1.values, vec!["1", "2"]);
/// ```
#[must_use]
pub fn for_sequences(tokens: Vec<Token>) -> Vec<(String, ValueGroup)> {
    let mut groups: Vec<(String, ValueGroup)> = Vec::new();
    for token in tokens {
        if token.is_name() {
            groups.push((
                token.text,
                ValueGroup {
                    origin: token.index,
                    values: Vec::new(),
                    class: TargetShape::Sequence,
                },
            ));
        } else if let Some((_, group)) = groups.last_mut() {
            group.values.push(token.text);
        }
    }
    groups.retain(|(_, group)| !group.values.is_empty());
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_groups_carry_true() {
        let groups = for_switches(vec![Token::name("x", 2)]);
        assert_eq!(groups[0].1.values, vec!["true"]);
        assert_eq!(groups[0].1.origin, 2);
    }

    #[test]
    fn test_scalar_pairs() {
        let groups = for_scalars(vec![
            Token::name("s", 0),
            Token::value("a", 1),
            Token::name("t", 2),
            Token::value("b", 3),
        ]);
        let flat: Vec<_> = groups
            .iter()
            .map(|(name, g)| (name.as_str(), g.values[0].as_str()))
            .collect();
        assert_eq!(flat, vec![("s", "a"), ("t", "b")]);
    }
}
