//! Command-Line Syntax Reference
//!
//! This module documents the argument syntax accepted by the parser and how
//! each form is bound to specifications.
//!
//! # Overview
//!
//! Arguments are read left to right. Each one is classified as an option name,
//! a value, or a forced value, and values are then attached to the option
//! that precedes them according to that option's shape.
//!
//! # Option Names
//!
//! | Form | Meaning |
//! |------|---------|
//! | `--name` | long option |
//! | `--name=value` | long option with attached value (`--name=` attaches `""`) |
//! | `-n` | short option |
//! | `-nvalue` | short option `n` with attached value, when `n` takes a value |
//! | `-abc` | the short switches `a`, `b` and `c` |
//! | `--` | every later argument is a positional value |
//!
//! **Rules**:
//! - `--=value` has no name and is reported as a bad token
//! - `-` on its own is a value
//! - `-12`, `-0.5` and `-1;2;3` are values unless their first digit is
//!   itself a short option
//! - name comparison is exact unless case-insensitive matching is enabled
//!
//! # Shapes
//!
//! ## Switches
//!
//! A switch takes no value and binds `true`. A flag counter is a switch that
//! binds the number of times it appeared:
//!
//! ```text
//! -v          verbose = true
//! -vvv        verbosity = 3
//! ```
//!
//! ## Scalars
//!
//! A scalar takes exactly the next value. A scalar followed by another option,
//! by `--`, or by nothing at all is reported as missing its value:
//!
//! ```text
//! --str hello     str = "hello"
//! --str=hello     str = "hello"
//! -shello         s = "hello"
//! --str --x       MissingValueOption(str)
//! ```
//!
//! ## Sequences
//!
//! A sequence takes every following value up to its maximum, or until the
//! next option:
//!
//! ```text
//! --int-seq 1 20 300     int-seq = [1, 20, 300]
//! --int-seq=1 20 300     int-seq = [1, 20, 300]
//! -i10 20                i = [10, 20]
//! ```
//!
//! Values past the maximum become positional values. When no positional value
//! is declared they are reported as `SequenceOutOfRange` for the option.
//!
//! # Separators
//!
//! An option declaring a separator splits the value right after it:
//!
//! ```text
//! --ids 1,2,3 9      ids = [1, 2, 3], positional "9"
//! ```
//!
//! Once split values have been collected, a plain value closes the sequence
//! and is left for the positional values.
//!
//! # Positional Values
//!
//! Values bound to no option fill the value specifications in index order.
//! A scalar takes one value; a sequence takes up to its maximum or all that
//! remain. Values left over after a bounded sequence in the last position are
//! reported as `SequenceOutOfRange`; otherwise extra values are ignored.
//!
//! # Type Conversions
//!
//! | Type | Accepted text |
//! |------|---------------|
//! | `String` | anything |
//! | `Bool` | `true` / `false`, any case, surrounding blanks ignored |
//! | `Char` | exactly one character |
//! | `Integer` | decimal digits with optional sign, range checked per width |
//! | `Float` | decimal or exponent notation; no `inf` / `NaN` |
//! | `BigInt` | decimal digits of any length |
//! | `Guid` | hyphenated or simple hex UUID |
//! | `Duration` | `[-][d.]hh:mm[:ss[.fffffff]]` or whole days |
//! | `DateTime` | RFC 3339 (`2024-01-15T10:30:00Z`) |
//! | `Enum` | a variant name, or the number of a declared variant |
//! | `Nullable` | the inner type, or `""` for no value |
//!
//! A custom converter replaces the built-in conversion for its specification.
//!
//! # Help and Version
//!
//! `--help` and `--version` end parsing with `HelpRequested` or
//! `VersionRequested` when enabled in the settings and no option of that name
//! is declared.
//!
//! # Error Order
//!
//! Errors are reported in this order, each group in input or declaration
//! order:
//!
//! 1. bad tokens, unknown options, options missing their value
//! 2. repeated options
//! 3. conversion failures
//! 4. values rejected by the binding hook
//! 5. arity, required options, mutually exclusive sets, option groups
