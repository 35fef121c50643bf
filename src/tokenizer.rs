//! Splitting raw arguments into classified tokens.
//!
//! | Argument          | Tokens                                   |
//! |-------------------|------------------------------------------|
//! | `--name`          | `Name(name)`                             |
//! | `--name=value`    | `Name(name)`, `Value(value)`             |
//! | `-c`              | `Name(c)`                                |
//! | `-cvalue`         | `Name(c)`, `Value(value)` if `c` takes a value |
//! | `-abc`            | `Name(a)`, `Name(b)`, `Name(c)` otherwise |
//! | `-12`, `-1.5;2`   | `Value` unless `1` is a short name       |
//! | `-`, `text`       | `Value`                                  |
//! | after `--`        | `ValueForced`, verbatim                  |
//!
//! ## Examples
//!
//! ```rust
//! use argbind::tokenizer::tokenize;
//! use argbind::{TargetShape, Token};
//!
//! let lookup = |name: &str| match name {
//!     "s" => Some(TargetShape::Scalar),
//!     "v" => Some(TargetShape::Switch),
//!     _ => None,
//! };
//! let tokens = tokenize(&["-vsabc", "--", "-v"], lookup).unwrap();
//! assert_eq!(
//!     tokens,
//!     vec![
//!         Token::name("v", 0),
//!         Token::name("s", 1),
//!         Token::value("abc", 2),
//!         Token::value_forced("-v", 3),
//!     ]
//! );
//! ```

use crate::error::{Error, Result};
use crate::specification::TargetShape;
use crate::token::{Token, TokenKind};
use tracing::trace;

/// Classifies `args`. `lookup` reports the shape of a known option name.
pub fn tokenize<S, F>(args: &[S], lookup: F) -> Result<Vec<Token>>
where
    S: AsRef<str>,
    F: Fn(&str) -> Option<TargetShape>,
{
    let mut tokens = Vec::with_capacity(args.len());
    let mut forced = false;

    for arg in args {
        let arg = arg.as_ref();
        let next = tokens.len();

        if forced {
            tokens.push(Token::value_forced(arg, next));
        } else if arg == "--" {
            forced = true;
        } else if let Some(rest) = arg.strip_prefix("--") {
            match rest.split_once('=') {
                Some(("", _)) => return Err(Error::tokenize(arg, "missing option name")),
                Some((name, value)) => {
                    tokens.push(Token::name(name, next));
                    tokens.push(Token::value(value, next + 1));
                }
                None => tokens.push(Token::name(rest, next)),
            }
        } else if let Some(rest) = arg.strip_prefix('-') {
            if rest.is_empty() || (starts_with_digit(rest) && lookup(&rest[..1]).is_none()) {
                tokens.push(Token::value(arg, next));
            } else {
                tokenize_short_group(rest, &lookup, &mut tokens);
            }
        } else {
            tokens.push(Token::value(arg, next));
        }
    }

    trace!(count = tokens.len(), "tokenized arguments");
    Ok(tokens)
}

fn tokenize_short_group<F>(group: &str, lookup: &F, tokens: &mut Vec<Token>)
where
    F: Fn(&str) -> Option<TargetShape>,
{
    for (pos, c) in group.char_indices() {
        let name = c.to_string();
        let takes_value = matches!(
            lookup(&name),
            Some(TargetShape::Scalar) | Some(TargetShape::Sequence)
        );
        tokens.push(Token::name(name, tokens.len()));

        let rest = &group[pos + c.len_utf8()..];
        if takes_value && !rest.is_empty() {
            tokens.push(Token::value(rest, tokens.len()));
            return;
        }
    }
}

/// `-12`, `-1.5` and `-978;1234` all read as values.
fn starts_with_digit(text: &str) -> bool {
    text.bytes().next().map_or(false, |b| b.is_ascii_digit())
}

/// Splits the value directly following each option that declares a separator.
///
/// Every piece is flagged `from_separator`, and indexes are renumbered so they
/// stay positional.
///
/// # Examples
///
/// ```rust
/// use argbind::tokenizer::explode_separators;
/// use argbind::Token;
///
/// let tokens = vec![Token::name("n", 0), Token::value("1,2", 1), Token::value("3", 2)];
/// let exploded = explode_separators(tokens, |name| (name == "n").then_some(','));
///
/// let texts: Vec<_> = exploded.iter().map(|t| t.text.as_str()).collect();
/// assert_eq!(texts, vec!["n", "1", "2", "3"]);
/// assert!(exploded[1].from_separator && exploded[2].from_separator);
/// assert!(!exploded[3].from_separator);
/// assert_eq!(exploded[3].index, 3);
/// ```
pub fn explode_separators<F>(tokens: Vec<Token>, separator_of: F) -> Vec<Token>
where
    F: Fn(&str) -> Option<char>,
{
    let mut exploded = Vec::with_capacity(tokens.len());
    let mut separator = None;

    for token in tokens {
        match (token.kind, separator) {
            (TokenKind::Name, _) => {
                separator = separator_of(&token.text);
                exploded.push(token);
            }
            (TokenKind::Value, Some(sep)) => {
                for piece in token.text.split(sep) {
                    exploded.push(Token {
                        kind: TokenKind::Value,
                        text: piece.to_string(),
                        index: 0,
                        from_separator: true,
                    });
                }
                separator = None;
            }
            _ => {
                separator = None;
                exploded.push(token);
            }
        }
    }

    for (index, token) in exploded.iter_mut().enumerate() {
        token.index = index;
    }
    exploded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shapes(name: &str) -> Option<TargetShape> {
        match name {
            "i" | "int-seq" => Some(TargetShape::Sequence),
            "s" | "str" => Some(TargetShape::Scalar),
            "x" | "1" => Some(TargetShape::Switch),
            _ => None,
        }
    }

    fn texts(tokens: &[Token]) -> Vec<(TokenKind, &str)> {
        tokens.iter().map(|t| (t.kind, t.text.as_str())).collect()
    }

    #[test]
    fn test_long_forms() {
        let tokens = tokenize(&["--str", "a", "--int-seq=1", "--str="], shapes).unwrap();
        assert_eq!(
            texts(&tokens),
            vec![
                (TokenKind::Name, "str"),
                (TokenKind::Value, "a"),
                (TokenKind::Name, "int-seq"),
                (TokenKind::Value, "1"),
                (TokenKind::Name, "str"),
                (TokenKind::Value, ""),
            ]
        );
        let indexes: Vec<_> = tokens.iter().map(|t| t.index).collect();
        assert_eq!(indexes, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_empty_long_name_is_malformed() {
        let err = tokenize(&["--=x"], shapes).unwrap_err();
        assert!(matches!(err, Error::Tokenize { ref token, .. } if token == "--=x"));
    }

    #[test]
    fn test_attached_short_value() {
        let tokens = tokenize(&["-i10"], shapes).unwrap();
        assert_eq!(
            texts(&tokens),
            vec![(TokenKind::Name, "i"), (TokenKind::Value, "10")]
        );
    }

    #[test]
    fn test_unknown_short_group_stays_names() {
        let tokens = tokenize(&["-zx"], shapes).unwrap();
        assert_eq!(
            texts(&tokens),
            vec![(TokenKind::Name, "z"), (TokenKind::Name, "x")]
        );
    }

    #[test]
    fn test_negative_numbers() {
        let tokens = tokenize(&["-i", "-3", "-2.5", "-1"], shapes).unwrap();
        assert_eq!(
            texts(&tokens),
            vec![
                (TokenKind::Name, "i"),
                (TokenKind::Value, "-3"),
                (TokenKind::Value, "-2.5"),
                (TokenKind::Name, "1"),
            ]
        );
    }

    #[test]
    fn test_dash_digit_lists_are_values() {
        let tokens = tokenize(&["-i", "-978;1234;0", "-9x"], shapes).unwrap();
        assert_eq!(
            texts(&tokens),
            vec![
                (TokenKind::Name, "i"),
                (TokenKind::Value, "-978;1234;0"),
                (TokenKind::Value, "-9x"),
            ]
        );
    }

    #[test]
    fn test_dash_alone_and_forced() {
        let tokens = tokenize(&["-", "--", "--str", "--"], shapes).unwrap();
        assert_eq!(
            texts(&tokens),
            vec![
                (TokenKind::Value, "-"),
                (TokenKind::ValueForced, "--str"),
                (TokenKind::ValueForced, "--"),
            ]
        );
    }

    #[test]
    fn test_utf8_short_group() {
        let tokens = tokenize(&["-sá∂"], shapes).unwrap();
        assert_eq!(
            texts(&tokens),
            vec![(TokenKind::Name, "s"), (TokenKind::Value, "á∂")]
        );
    }

    #[test]
    fn test_explode_only_directly_following_value() {
        let tokens = vec![
            Token::name("n", 0),
            Token::value_forced("a:b", 1),
            Token::name("n", 2),
            Token::value("c", 3),
        ];
        let exploded = explode_separators(tokens, |_| Some(':'));
        assert_eq!(exploded[1].text, "a:b");
        assert!(!exploded[1].from_separator);
        assert!(exploded[3].from_separator);
    }
}
