//! # LALR(1) Runtime
//!
//! Executes a precomputed shift-reduce automaton over a token stream.
//!
//! The table comes from an [`Analyzer`]; this module only checks it and runs
//! it. Each parse keeps a state stack (starting with the start state) and a
//! value stack in lock step:
//!
//! - **shift** pushes the token, converted into the value type, and the
//!   target state
//! - **reduce** pops one entry per symbol of the rule, hands the popped
//!   values to the rule's callback and pushes the result together with the
//!   goto state for the rule's origin
//! - at end of input the automaton keeps reducing until it shifts into the
//!   accepting state; the single remaining value is the result
//!
//! ## Example
//!
//! ```rust,ignore
//! use lalr_rt::backend::lr::LalrParser;
//! use lalr_rt::grammar::ParserConf;
//!
//! let conf = ParserConf::new(rules, callbacks, "sum");
//! let parser: LalrParser<Value> = LalrParser::new(&conf, &analyzer)?;
//! let value = parser.parse(tokens)?;
//! ```

mod config;
mod input;
mod parser;
mod table;

pub use config::{LalrConfig, DEFAULT_CONTEXT_WINDOW};
pub use input::{SliceSource, Stream, TokenSource};
pub use table::{Action, Analysis, Analyzer, Lookahead, ParseTable, State, StateId};

use crate::error::{Error, GrammarError};
use crate::grammar::{placeholder, Callbacks, ParserConf, Reduction, Rule, Token};
use parser::ParseContext;
use std::fmt;

/// A checked LALR(1) automaton with its resolved reduction callbacks.
///
/// Holds only immutable data. [`parse`](Self::parse) takes `&self`, so one
/// parser can serve any number of threads at once.
pub struct LalrParser<V> {
    table: ParseTable,
    rules: Vec<Rule>,
    reductions: Vec<Reduction<V>>,
    start_state: StateId,
    end_state: StateId,
    config: LalrConfig,
}

impl<V: Default + 'static> LalrParser<V> {
    /// Analyze `conf.rules` and build a parser from the result.
    ///
    /// # Errors
    ///
    /// - [`GrammarError::PrioritizedRule`] if any rule has a priority; the
    ///   analyzer is not run in that case
    /// - whatever the analyzer reports
    /// - [`GrammarError::MalformedTable`] if the produced table is
    ///   inconsistent with its rules
    pub fn new<C, A>(conf: &ParserConf<C>, analyzer: &A) -> Result<Self, GrammarError>
    where
        C: Callbacks<V>,
        A: Analyzer + ?Sized,
    {
        if let Some(rule) = conf.rules.iter().find(|rule| rule.priority.is_some()) {
            return Err(GrammarError::PrioritizedRule {
                rule: rule.to_string(),
                priority: rule.priority.unwrap_or_default(),
            });
        }
        let analysis = analyzer.analyze(&conf.rules, &conf.start)?;
        Self::from_analysis(analysis, &conf.callbacks)
    }

    /// Build a parser from an existing analysis.
    ///
    /// Every rule's callback is looked up once, by alias if it has one and
    /// by origin otherwise. Rules without a callback reduce to
    /// `V::default()`.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::MalformedTable`] if the table is inconsistent
    /// with `analysis.rules`.
    pub fn from_analysis<C>(analysis: Analysis, callbacks: &C) -> Result<Self, GrammarError>
    where
        C: Callbacks<V> + ?Sized,
    {
        let Analysis {
            table,
            rules,
            start_state,
            end_state,
        } = analysis;
        table.check(&rules, start_state, end_state)?;

        let reductions = rules
            .iter()
            .map(|rule| {
                callbacks.resolve(rule.callback_name().as_str()).unwrap_or_else(|| {
                    tracing::debug!(
                        target: "lalr_rt::parser",
                        callback = %rule.callback_name(),
                        "no callback registered, reducing to default"
                    );
                    placeholder()
                })
            })
            .collect();

        tracing::debug!(
            target: "lalr_rt::parser",
            states = table.len(),
            rules = rules.len(),
            "parser constructed"
        );
        Ok(Self {
            table,
            rules,
            reductions,
            start_state,
            end_state,
            config: LalrConfig::default(),
        })
    }
}

impl<V> LalrParser<V> {
    #[must_use]
    pub fn with_config(mut self, config: LalrConfig) -> Self {
        self.config = config;
        self
    }

    /// Parse a token stream to a single value.
    ///
    /// Tokens are pulled one at a time and never more than one ahead of the
    /// automaton. On a syntax error nothing further is pulled.
    ///
    /// # Errors
    ///
    /// - [`Error::Parse`] when the input is not in the language
    /// - [`Error::Reduce`] when a callback fails, with its error as `source`
    /// - [`Error::Fault`] when the table turns out to be inconsistent
    pub fn parse<I>(&self, tokens: I) -> Result<V, Error<I::Item>>
    where
        I: IntoIterator,
        I::Item: Token,
        V: From<I::Item>,
    {
        self.parse_source(Stream::new(tokens), |_| {})
    }

    /// Like [`parse`](Self::parse), calling `observer` with every state
    /// pushed on the stack, starting with the start state.
    ///
    /// # Errors
    ///
    /// See [`parse`](Self::parse).
    pub fn parse_observed<I, O>(&self, tokens: I, observer: O) -> Result<V, Error<I::Item>>
    where
        I: IntoIterator,
        I::Item: Token,
        V: From<I::Item>,
        O: FnMut(StateId),
    {
        self.parse_source(Stream::new(tokens), observer)
    }

    /// Parse a slice of tokens. Syntax errors carry the tokens following
    /// the offending one as context.
    ///
    /// # Errors
    ///
    /// See [`parse`](Self::parse).
    pub fn parse_slice<T>(&self, tokens: &[T]) -> Result<V, Error<T>>
    where
        T: Token + Clone + fmt::Debug,
        V: From<T>,
    {
        self.parse_source(SliceSource::new(tokens), |_| {})
    }

    /// Parse from any [`TokenSource`], with a state observer.
    ///
    /// # Errors
    ///
    /// See [`parse`](Self::parse).
    pub fn parse_source<S, O>(&self, source: S, observer: O) -> Result<V, Error<S::Item>>
    where
        S: TokenSource,
        V: From<S::Item>,
        O: FnMut(StateId),
    {
        let ctx = ParseContext {
            table: &self.table,
            rules: &self.rules,
            reductions: &self.reductions,
            start_state: self.start_state,
            end_state: self.end_state,
            config: &self.config,
        };
        parser::parse(&ctx, source, observer)
    }

    #[must_use]
    pub const fn table(&self) -> &ParseTable {
        &self.table
    }

    /// Rules as indexed by the table's reduce actions
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub const fn start_state(&self) -> StateId {
        self.start_state
    }

    #[must_use]
    pub const fn end_state(&self) -> StateId {
        self.end_state
    }

    #[must_use]
    pub const fn config(&self) -> &LalrConfig {
        &self.config
    }
}

impl<V> fmt::Debug for LalrParser<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LalrParser")
            .field("states", &self.table.len())
            .field("rules", &self.rules.len())
            .field("start_state", &self.start_state)
            .field("end_state", &self.end_state)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
