//! Hand-built tables and value types shared by the integration tests.

#![allow(dead_code)]

use lalr_rt::backend::lr::{Action, Analysis, Lookahead, ParseTable, StateId};
use lalr_rt::grammar::{CallbackRegistry, Rule};
use lalr_rt::lexer::Token;

/// Route `tracing` output through the test harness; `RUST_LOG` picks levels.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Empty,
    Token(Token),
    Number(i64),
}

impl Value {
    pub fn number(&self) -> i64 {
        match self {
            Self::Token(token) => token.value.parse().unwrap_or_default(),
            Self::Number(n) => *n,
            Self::Empty => 0,
        }
    }
}

impl From<Token> for Value {
    fn from(token: Token) -> Self {
        Self::Token(token)
    }
}

/// A table with `count` states and the given entries.
pub fn build(count: usize, entries: &[(u32, Lookahead, Action)]) -> ParseTable {
    let mut table = ParseTable::with_states(count);
    for (state, lookahead, action) in entries {
        table
            .insert(StateId(*state), lookahead.clone(), *action)
            .expect("state exists");
    }
    table
}

/// `S -> LPAR S RPAR S | <empty>`, accepting state 6.
pub fn parens_analysis() -> Analysis {
    let rules = vec![
        Rule::new("S", ["LPAR", "S", "RPAR", "S"]),
        Rule::empty("S"),
    ];
    let table = build(
        7,
        &[
            (0, Lookahead::symbol("LPAR"), Action::shift(2)),
            (0, Lookahead::End, Action::reduce(1, 0)),
            (0, Lookahead::symbol("S"), Action::shift(1)),
            (1, Lookahead::End, Action::shift(6)),
            (2, Lookahead::symbol("LPAR"), Action::shift(2)),
            (2, Lookahead::symbol("RPAR"), Action::reduce(1, 0)),
            (2, Lookahead::symbol("S"), Action::shift(3)),
            (3, Lookahead::symbol("RPAR"), Action::shift(4)),
            (4, Lookahead::symbol("LPAR"), Action::shift(2)),
            (4, Lookahead::symbol("RPAR"), Action::reduce(1, 0)),
            (4, Lookahead::End, Action::reduce(1, 0)),
            (4, Lookahead::symbol("S"), Action::shift(5)),
            (5, Lookahead::symbol("RPAR"), Action::reduce(0, 4)),
            (5, Lookahead::End, Action::reduce(0, 4)),
        ],
    );
    Analysis::new(table, rules, StateId(0), StateId(6))
}

/// Nesting depth: `max(inner + 1, rest)`, empty is 0.
pub fn depth_callbacks() -> CallbackRegistry<Value> {
    CallbackRegistry::new().with_fn("S", |children: Vec<Value>| match children.as_slice() {
        [_, inner, _, rest] => Value::Number((inner.number() + 1).max(rest.number())),
        _ => Value::Number(0),
    })
}

/// `E -> E PLUS NUM | NUM`, accepting state 5.
pub fn sum_analysis() -> Analysis {
    let rules = vec![
        Rule::new("E", ["E", "PLUS", "NUM"]).with_alias("add"),
        Rule::new("E", ["NUM"]),
    ];
    let table = build(
        6,
        &[
            (0, Lookahead::symbol("NUM"), Action::shift(2)),
            (0, Lookahead::symbol("E"), Action::shift(1)),
            (1, Lookahead::symbol("PLUS"), Action::shift(3)),
            (1, Lookahead::End, Action::shift(5)),
            (2, Lookahead::symbol("PLUS"), Action::reduce(1, 1)),
            (2, Lookahead::End, Action::reduce(1, 1)),
            (3, Lookahead::symbol("NUM"), Action::shift(4)),
            (4, Lookahead::symbol("PLUS"), Action::reduce(0, 3)),
            (4, Lookahead::End, Action::reduce(0, 3)),
        ],
    );
    Analysis::new(table, rules, StateId(0), StateId(5))
}

pub fn sum_callbacks() -> CallbackRegistry<Value> {
    CallbackRegistry::new()
        .with_fn("add", |children: Vec<Value>| {
            Value::Number(children[0].number() + children[2].number())
        })
        .with_fn("E", |children: Vec<Value>| Value::Number(children[0].number()))
}

/// Tokens for a string of `(` and `)`, other characters skipped.
pub fn paren_tokens(text: &str) -> Vec<Token> {
    text.chars()
        .enumerate()
        .filter_map(|(i, c)| {
            let kind = match c {
                '(' => "LPAR",
                ')' => "RPAR",
                _ => return None,
            };
            Some(Token::new(kind, c.to_string()).at(1, i + 1))
        })
        .collect()
}

/// Tokens for whitespace-separated numbers and `+`.
pub fn sum_tokens(text: &str) -> Vec<Token> {
    let mut column = 1;
    text.split(' ')
        .filter_map(|word| {
            let at = column;
            column += word.len() + 1;
            if word.is_empty() {
                return None;
            }
            let kind = if word == "+" { "PLUS" } else { "NUM" };
            Some(Token::new(kind, word).at(1, at))
        })
        .collect()
}
