//! # lalr-rt
//!
//! A table-driven LALR(1) parsing runtime.
//!
//! ## Overview
//!
//! Given a precomputed shift-reduce automaton and a lazy sequence of tokens,
//! `lalr-rt` drives a deterministic push-down automaton to completion,
//! invoking one reduction callback per rule application, and produces a
//! single semantic value or a precise syntax error.
//!
//! - **Runtime**: [`LalrParser`] checks an [`Analysis`] once and then
//!   parses any number of inputs, concurrently if needed
//! - **Configuration**: rules, callbacks and token definitions, see
//!   [`grammar`]
//! - **Lexer model**: literal and regex patterns, their regex rendering and
//!   length bounds, and the terminals built from them, see [`lexer`]
//! - **Errors**: syntax errors with expected tokens and context, kept apart
//!   from table faults, see [`error`]
//!
//! Table construction is not part of this crate. Anything implementing
//! [`Analyzer`] can supply tables, and a precomputed [`Analysis`] is an
//! analyzer itself.
//!
//! ## Quick Start
//!
//! ```rust
//! use lalr_rt::backend::lr::{Action, Analysis, LalrParser, Lookahead, ParseTable, StateId};
//! use lalr_rt::grammar::{CallbackRegistry, Rule};
//! use lalr_rt::lexer::Token;
//!
//! #[derive(Debug, Default, PartialEq)]
//! enum Value {
//!     #[default]
//!     Empty,
//!     Token(Token),
//!     Number(i64),
//! }
//!
//! impl From<Token> for Value {
//!     fn from(token: Token) -> Self {
//!         Value::Token(token)
//!     }
//! }
//!
//! // sum -> sum PLUS NUMBER | NUMBER
//! let rules = vec![
//!     Rule::new("sum", ["sum", "PLUS", "NUMBER"]).with_alias("add"),
//!     Rule::new("sum", ["NUMBER"]),
//! ];
//! let mut table = ParseTable::with_states(6);
//! for (state, lookahead, action) in [
//!     (0, Lookahead::symbol("NUMBER"), Action::shift(2)),
//!     (0, Lookahead::symbol("sum"), Action::shift(1)),
//!     (1, Lookahead::symbol("PLUS"), Action::shift(3)),
//!     (1, Lookahead::End, Action::shift(5)),
//!     (2, Lookahead::symbol("PLUS"), Action::reduce(1, 1)),
//!     (2, Lookahead::End, Action::reduce(1, 1)),
//!     (3, Lookahead::symbol("NUMBER"), Action::shift(4)),
//!     (4, Lookahead::symbol("PLUS"), Action::reduce(0, 3)),
//!     (4, Lookahead::End, Action::reduce(0, 3)),
//! ] {
//!     table.insert(StateId(state), lookahead, action)?;
//! }
//! let analysis = Analysis::new(table, rules, StateId(0), StateId(5));
//!
//! fn number(value: &Value) -> i64 {
//!     match value {
//!         Value::Token(token) => token.value.parse().unwrap_or_default(),
//!         Value::Number(n) => *n,
//!         Value::Empty => 0,
//!     }
//! }
//!
//! let callbacks = CallbackRegistry::new()
//!     .with_fn("add", |children: Vec<Value>| {
//!         Value::Number(number(&children[0]) + number(&children[2]))
//!     })
//!     .with_fn("sum", |children: Vec<Value>| Value::Number(number(&children[0])));
//!
//! let parser = LalrParser::from_analysis(analysis, &callbacks)?;
//! let tokens = [
//!     Token::new("NUMBER", "1"),
//!     Token::new("PLUS", "+"),
//!     Token::new("NUMBER", "2"),
//! ];
//! assert_eq!(parser.parse(tokens)?, Value::Number(3));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Modules
//!
//! - [`backend`] - The LALR(1) runtime and its parse tables
//! - [`grammar`] - Symbols, rules, callbacks and configuration
//! - [`lexer`] - Patterns, terminals and tokens
//! - [`parser`] - Batch parsing over a shared parser
//! - [`error`] - Error types and diagnostics

pub mod backend;
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod parser;

// Re-export commonly used types
pub use backend::lr::{
    Action, Analysis, Analyzer, LalrConfig, LalrParser, Lookahead, ParseTable, StateId,
};
pub use error::{Error, Fault, GrammarError, ParseError, PatternError, UnexpectedToken};
pub use grammar::{
    CallbackRegistry, Callbacks, LexerConf, ParserConf, Rule, RuleId, Symbol,
    Token as GrammarToken, TokenDef,
};
pub use lexer::{Pattern, Terminal, Token};
pub use parser::{BatchParser, ParseBatch};
