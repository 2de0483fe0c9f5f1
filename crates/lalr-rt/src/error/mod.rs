//! # Error Types
//!
//! Errors raised while building a parser and while running it.
//!
//! ## Overview
//!
//! - [`GrammarError`]: construction-time problems. A malformed configuration
//!   never starts accepting input.
//! - [`ParseError`]: syntax errors in the input. [`UnexpectedToken`] is the
//!   only kind and carries the diagnostic context.
//! - [`Fault`]: internal-consistency faults of a parse table, kept apart from
//!   input errors so callers can tell a bad table from bad input.
//! - [`Error`]: what a parse returns, wrapping the above plus failures of
//!   reduction callbacks.
//! - [`PatternError`]: invalid patterns in the lexer model.
//!
//! ## Usage
//!
//! ```rust,ignore
//! match parser.parse(tokens) {
//!     Ok(value) => use_value(value),
//!     Err(Error::Parse(ParseError::UnexpectedToken(err))) => {
//!         eprintln!("{err}");
//!         eprintln!("expected one of {:?}", err.expected);
//!     }
//!     Err(err) if err.is_fault() => panic!("parse table is broken: {err}"),
//!     Err(err) => return Err(err.into()),
//! }
//! ```
//!
//! ## Diagnostics Support
//!
//! When the `diagnostics` feature is enabled, [`GrammarError`], [`Fault`]
//! and [`PatternError`] implement [`miette::Diagnostic`].

mod context;

pub use context::Context;

use crate::backend::lr::{Lookahead, StateId};
use crate::grammar::{BoxError, RuleId, Symbol};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

#[cfg(feature = "diagnostics")]
use miette::Diagnostic;

/// Problems detected while building a parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum GrammarError {
    #[error("rule `{rule}` declares priority {priority}, LALR rules cannot be prioritized")]
    #[cfg_attr(
        feature = "diagnostics",
        diagnostic(
            code(grammar::prioritized_rule),
            help("remove the priority or use a parser that resolves ambiguity")
        )
    )]
    PrioritizedRule { rule: String, priority: i32 },

    #[error("grammar analysis failed: {0}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::analysis)))]
    Analysis(String),

    #[error("malformed parse table: {0}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::malformed_table)))]
    MalformedTable(Fault),
}

/// Internal-consistency faults of a parse table.
///
/// These never describe bad input. Against a correctly built table they do
/// not occur.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum Fault {
    #[error("state {0} is not in the table")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(table::unknown_state)))]
    UnknownState(StateId),

    #[error("rule {0} is not in the analysis")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(table::unknown_rule)))]
    UnknownRule(RuleId),

    #[error("reduce by rule {rule} pops {len} values but the rule has {expected} symbols")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(table::rule_length)))]
    RuleLengthMismatch {
        rule: RuleId,
        len: usize,
        expected: usize,
    },

    #[error("no goto on `{symbol}` from state {state}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(table::missing_goto)))]
    MissingGoto { state: StateId, symbol: Symbol },

    #[error("goto on `{symbol}` from state {state} is not a shift")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(table::goto_not_shift)))]
    GotoNotShift { state: StateId, symbol: Symbol },

    #[error("state {state} shifts into the accepting state on `{lookahead}`")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(table::accept_mid_stream)))]
    AcceptMidStream { state: StateId, lookahead: Lookahead },

    #[error("end of input shifts to state {found}, the accepting state is {expected}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(table::wrong_accept_state)))]
    WrongAcceptState { found: StateId, expected: StateId },

    #[error("accepted with {count} values on the stack, expected exactly one")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(table::leftover_values)))]
    LeftoverValues { count: usize },

    #[error("reduce by rule {rule} pops {len} values, only {depth} on the stack")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(table::stack_underflow)))]
    StackUnderflow {
        rule: RuleId,
        len: usize,
        depth: usize,
    },

    #[error("table already holds {count} states, the most a state id can address")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(table::too_many_states)))]
    TooManyStates { count: usize },
}

impl From<Fault> for GrammarError {
    fn from(fault: Fault) -> Self {
        Self::MalformedTable(fault)
    }
}

/// Invalid patterns in the lexer model.
#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum PatternError {
    #[error(transparent)]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pattern::regex)))]
    Regex(#[from] regex::Error),

    #[error(transparent)]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pattern::syntax)))]
    Syntax(#[from] Box<regex_syntax::Error>),

    #[error("unknown regex flag `{0}`")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(pattern::unknown_flag)))]
    UnknownFlag(char),
}

/// The action table has no entry for the current state and lookahead.
#[derive(Debug, Clone)]
pub struct UnexpectedToken<T> {
    /// The offending token, `None` at end of input
    pub token: Option<T>,
    /// The lookahead that had no entry
    pub lookahead: Lookahead,
    /// State the automaton was in
    pub state: StateId,
    /// Every lookahead that state accepts
    pub expected: BTreeSet<Lookahead>,
    /// Line of the token (or of the last token, at end of input)
    pub line: Option<usize>,
    /// Column of the token (or of the last token, at end of input)
    pub column: Option<usize>,
    /// Input following the token
    pub context: Context,
}

impl<T> UnexpectedToken<T> {
    /// Whether the error was raised at end of input
    #[must_use]
    pub const fn at_end(&self) -> bool {
        self.token.is_none()
    }

    /// Whether `lookahead` would have been accepted
    #[must_use]
    pub fn expects(&self, lookahead: &Lookahead) -> bool {
        self.expected.contains(lookahead)
    }
}

struct Position(Option<usize>);

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(n) => write!(f, "{n}"),
            None => f.write_str("?"),
        }
    }
}

impl<T: fmt::Debug> fmt::Display for UnexpectedToken<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.token {
            Some(token) => write!(f, "Unexpected token {token:?}")?,
            None => f.write_str("Unexpected end of input")?,
        }
        writeln!(
            f,
            " at line {}, column {}.",
            Position(self.line),
            Position(self.column)
        )?;
        f.write_str("Expected: ")?;
        for (i, lookahead) in self.expected.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{lookahead}")?;
        }
        write!(f, "\nContext: {}", self.context)
    }
}

impl<T: fmt::Debug> std::error::Error for UnexpectedToken<T> {}

/// Syntax errors in the input.
#[derive(Debug, Clone)]
pub enum ParseError<T> {
    UnexpectedToken(Box<UnexpectedToken<T>>),
}

impl<T> ParseError<T> {
    #[must_use]
    pub fn expected(&self) -> &BTreeSet<Lookahead> {
        match self {
            Self::UnexpectedToken(err) => &err.expected,
        }
    }

    #[must_use]
    pub fn token(&self) -> Option<&T> {
        match self {
            Self::UnexpectedToken(err) => err.token.as_ref(),
        }
    }
}

impl<T> From<UnexpectedToken<T>> for ParseError<T> {
    fn from(err: UnexpectedToken<T>) -> Self {
        Self::UnexpectedToken(Box::new(err))
    }
}

impl<T: fmt::Debug> fmt::Display for ParseError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl<T: fmt::Debug> std::error::Error for ParseError<T> {}

/// Failure of a parse.
#[derive(Debug)]
pub enum Error<T> {
    /// The input is not in the language
    Parse(ParseError<T>),
    /// A reduction callback failed; `source` is the callback's own error
    Reduce { rule: Symbol, source: BoxError },
    /// The parse table is inconsistent
    Fault(Fault),
}

impl<T> Error<T> {
    /// Whether this error points at the parse table rather than the input
    #[must_use]
    pub const fn is_fault(&self) -> bool {
        matches!(self, Self::Fault(_))
    }

    #[must_use]
    pub fn as_unexpected_token(&self) -> Option<&UnexpectedToken<T>> {
        match self {
            Self::Parse(ParseError::UnexpectedToken(err)) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl<T> From<ParseError<T>> for Error<T> {
    fn from(err: ParseError<T>) -> Self {
        Self::Parse(err)
    }
}

impl<T> From<UnexpectedToken<T>> for Error<T> {
    fn from(err: UnexpectedToken<T>) -> Self {
        Self::Parse(err.into())
    }
}

impl<T> From<Fault> for Error<T> {
    fn from(fault: Fault) -> Self {
        Self::Fault(fault)
    }
}

impl<T: fmt::Debug> fmt::Display for Error<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => fmt::Display::fmt(err, f),
            Self::Reduce { rule, .. } => write!(f, "reduction of `{rule}` failed"),
            Self::Fault(fault) => write!(f, "parser fault: {fault}"),
        }
    }
}

impl<T: fmt::Debug> std::error::Error for Error<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Reduce { source, .. } => Some(source.as_ref()),
            Self::Parse(_) | Self::Fault(_) => None,
        }
    }
}
