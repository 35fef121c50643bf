//! Classified command-line tokens.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// An option name, without dashes
    Name,
    /// A value that may bind to a preceding option
    Value,
    /// A value following `--`, never bound to an option
    ValueForced,
}

/// One classified argument.
///
/// `index` is the token's position in the stream and its identity: tokens with
/// equal text are distinct when their indexes differ.
///
/// # Examples
///
/// ```rust
/// use argbind::{Token, TokenKind};
///
/// let a = Token::value("10", 1);
/// let b = Token::value("10", 3);
/// assert_ne!(a, b);
/// assert!(a.is_value());
/// assert_eq!(Token::name("x", 0).kind, TokenKind::Name);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub index: usize,
    /// Produced by splitting a value on an option's separator
    pub from_separator: bool,
}

impl Token {
    #[must_use]
    pub fn name(text: impl Into<String>, index: usize) -> Self {
        Token {
            kind: TokenKind::Name,
            text: text.into(),
            index,
            from_separator: false,
        }
    }

    #[must_use]
    pub fn value(text: impl Into<String>, index: usize) -> Self {
        Token {
            kind: TokenKind::Value,
            text: text.into(),
            index,
            from_separator: false,
        }
    }

    #[must_use]
    pub fn value_forced(text: impl Into<String>, index: usize) -> Self {
        Token {
            kind: TokenKind::ValueForced,
            text: text.into(),
            index,
            from_separator: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_name(&self) -> bool {
        self.kind == TokenKind::Name
    }

    /// True for both plain and forced values.
    #[inline]
    #[must_use]
    pub fn is_value(&self) -> bool {
        matches!(self.kind, TokenKind::Value | TokenKind::ValueForced)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Name => write!(f, "-{}", self.text),
            TokenKind::Value | TokenKind::ValueForced => write!(f, "{}", self.text),
        }
    }
}
