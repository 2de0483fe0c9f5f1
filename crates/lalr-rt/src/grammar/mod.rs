//! # Grammar Module
//!
//! Symbols, rules and the configuration objects handed to the runtime.
//!
//! ## Overview
//!
//! The runtime never looks at a grammar as a graph of rules. It sees:
//!
//! - **Symbols**: names of terminal types and non-terminals
//! - **Rules**: a left-hand symbol, its expansion, an optional alias and an
//!   optional priority (which this engine rejects)
//! - **Configuration**: [`ParserConf`] (rules, callbacks, start symbol) and
//!   [`LexerConf`] (token definitions for an external lexer)
//! - **Callbacks**: one [`Reduction`] per rule, resolved by name once at
//!   construction
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lalr_rt::grammar::{CallbackRegistry, ParserConf, Rule};
//!
//! let rules = vec![
//!     Rule::new("sum", ["sum", "PLUS", "NUMBER"]).with_alias("add"),
//!     Rule::new("sum", ["NUMBER"]),
//! ];
//! let callbacks = CallbackRegistry::<Value>::new()
//!     .with_fn("add", |children| add(children))
//!     .with_fn("sum", |mut children| children.remove(0));
//! let conf = ParserConf::new(rules, callbacks, "sum");
//! ```

pub mod callbacks;
pub mod conf;

pub use callbacks::*;
pub use conf::*;

use compact_str::CompactString;
use smallvec::SmallVec;
use std::borrow::Borrow;
use std::fmt;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Name of a terminal type or non-terminal.
///
/// Symbols hash and compare like the string they hold, so tables keyed by
/// `Symbol` can be probed with a plain `&str`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(transparent))]
pub struct Symbol(CompactString);

impl Symbol {
    #[must_use]
    pub fn new(name: impl Into<CompactString>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<CompactString> for Symbol {
    fn from(name: CompactString) -> Self {
        Self(name)
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Trait for anything the runtime can consume as input.
///
/// Only [`kind`](Token::kind) drives the automaton. The remaining accessors
/// feed diagnostics and default to "unknown".
pub trait Token {
    /// The declared type of this token, used as the lookahead key
    fn kind(&self) -> &str;

    /// Source text of the token, if the token carries one
    fn value(&self) -> Option<&str> {
        None
    }

    /// 1-based line the token starts on
    fn line(&self) -> Option<usize> {
        None
    }

    /// 1-based column the token starts at
    fn column(&self) -> Option<usize> {
        None
    }
}

impl<T: Token + ?Sized> Token for &T {
    fn kind(&self) -> &str {
        (**self).kind()
    }

    fn value(&self) -> Option<&str> {
        (**self).value()
    }

    fn line(&self) -> Option<usize> {
        (**self).line()
    }

    fn column(&self) -> Option<usize> {
        (**self).column()
    }
}

/// Index of a rule inside an [`Analysis`](crate::backend::lr::Analysis).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct RuleId(pub u32);

impl RuleId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A grammar rule `origin -> expansion`.
///
/// Rules are produced by grammar front-ends and consumed by analyzers; the
/// runtime only needs the origin (for the goto after a reduce), the
/// expansion length and the name its callback is registered under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Rule {
    /// Left-hand symbol
    pub origin: Symbol,
    /// Right-hand symbols, in order
    pub expansion: SmallVec<[Symbol; 4]>,
    /// Name used to look up the rule's callback instead of `origin`
    pub alias: Option<Symbol>,
    /// Priority for conflict resolution. LALR rules must leave this unset.
    pub priority: Option<i32>,
}

impl Rule {
    #[must_use]
    pub fn new<S>(origin: impl Into<Symbol>, expansion: impl IntoIterator<Item = S>) -> Self
    where
        S: Into<Symbol>,
    {
        Self {
            origin: origin.into(),
            expansion: expansion.into_iter().map(Into::into).collect(),
            alias: None,
            priority: None,
        }
    }

    /// An empty (epsilon) rule
    #[must_use]
    pub fn empty(origin: impl Into<Symbol>) -> Self {
        Self::new::<Symbol>(origin, [])
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<Symbol>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    #[must_use]
    pub const fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// The name this rule's reduction callback is registered under
    #[must_use]
    pub fn callback_name(&self) -> &Symbol {
        self.alias.as_ref().unwrap_or(&self.origin)
    }

    /// Number of symbols a reduce by this rule pops
    #[must_use]
    pub fn len(&self) -> usize {
        self.expansion.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expansion.is_empty()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.origin)?;
        for symbol in &self.expansion {
            write!(f, " {symbol}")?;
        }
        if let Some(alias) = &self.alias {
            write!(f, " ({alias})")?;
        }
        Ok(())
    }
}
