#![no_main]
use libfuzzer_sys::fuzz_target;
use lalr_rt::backend::lr::{Action, Analysis, LalrParser, Lookahead, ParseTable, StateId};
use lalr_rt::grammar::{CallbackRegistry, Rule};
use lalr_rt::lexer::Token;

#[derive(Debug, Default)]
struct Depth(usize);

impl From<Token> for Depth {
    fn from(_: Token) -> Self {
        Self(0)
    }
}

/// `S -> LPAR S RPAR S | <empty>`
fn parser() -> LalrParser<Depth> {
    let rules = vec![
        Rule::new("S", ["LPAR", "S", "RPAR", "S"]),
        Rule::empty("S"),
    ];
    let mut table = ParseTable::with_states(7);
    for (state, lookahead, action) in [
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
    ] {
        table.insert(StateId(state), lookahead, action).unwrap();
    }
    let callbacks = CallbackRegistry::new().with_fn("S", |c: Vec<Depth>| match c.as_slice() {
        [_, inner, _, rest] => Depth((inner.0 + 1).max(rest.0)),
        _ => Depth(0),
    });
    LalrParser::from_analysis(Analysis::new(table, rules, StateId(0), StateId(6)), &callbacks)
        .unwrap()
}

fn balanced_depth(data: &[u8]) -> Option<usize> {
    let (mut depth, mut max) = (0usize, 0usize);
    for &byte in data {
        if byte & 1 == 0 {
            depth += 1;
            max = max.max(depth);
        } else {
            depth = depth.checked_sub(1)?;
        }
    }
    (depth == 0).then_some(max)
}

fuzz_target!(|data: &[u8]| {
    let tokens: Vec<Token> = data
        .iter()
        .map(|byte| {
            if byte & 1 == 0 {
                Token::new("LPAR", "(")
            } else {
                Token::new("RPAR", ")")
            }
        })
        .collect();

    let result = parser().parse_slice(&tokens);
    match (balanced_depth(data), result) {
        (Some(depth), Ok(value)) => assert_eq!(value.0, depth),
        (None, Err(err)) => assert!(err.as_unexpected_token().is_some(), "{err}"),
        (expected, result) => panic!("expected {expected:?}, got {result:?}"),
    }
});
