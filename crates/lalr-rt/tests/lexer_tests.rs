//! Tests for the lexer model: token definitions, terminals and the way an
//! external lexer feeds the runtime

mod common;

use common::{sum_analysis, sum_callbacks, Value};
use lalr_rt::backend::lr::LalrParser;
use lalr_rt::grammar::{LexerConf, PostLex, Symbol, TokenDef, TokenStream};
use lalr_rt::lexer::{Flag, Pattern, Terminal, Token, Width};

/// Longest match wins, ties go to the higher priority.
fn tokenize(conf: &LexerConf, text: &str) -> Vec<Token> {
    let terminals = conf.terminals().expect("patterns compile");
    let mut tokens = Vec::new();
    let mut pos = 0;
    while pos < text.len() {
        let best = terminals
            .iter()
            .zip(&conf.tokens)
            .filter_map(|(terminal, def)| {
                let range = terminal.match_at(text, pos)?;
                (!range.is_empty()).then_some((range, def))
            })
            .max_by(|(a, x), (b, y)| a.len().cmp(&b.len()).then(x.priority.cmp(&y.priority)));
        let Some((range, def)) = best else {
            panic!("no token at {pos}");
        };
        if !conf.is_ignored(def.name.as_str()) {
            tokens.push(Token::new(def.name.clone(), &text[range.clone()]).at(1, pos + 1));
        }
        pos = range.end;
    }
    let stream: TokenStream<'_> = Box::new(tokens.into_iter());
    conf.postprocess(stream).collect()
}

/// Folds `++` into a single plus, the way a post-lex pass rewrites tokens.
struct CollapsePlus;

impl PostLex for CollapsePlus {
    fn process<'a>(&'a self, tokens: TokenStream<'a>) -> TokenStream<'a> {
        let mut previous_plus = false;
        Box::new(tokens.filter(move |token| {
            let plus = token.kind == "PLUS";
            let keep = !(plus && previous_plus);
            previous_plus = plus;
            keep
        }))
    }

    fn always_accept(&self) -> &[Symbol] {
        &[]
    }
}

fn conf() -> LexerConf {
    LexerConf::new(vec![
        TokenDef::new("NUM", Pattern::regex("[0-9]+")),
        TokenDef::new("PLUS", Pattern::literal("+")),
        TokenDef::new("WS", Pattern::regex(" +")),
        TokenDef::new("KEYWORD", Pattern::literal("sum").with_flags([Flag::CaseInsensitive]))
            .with_priority(3),
        TokenDef::new("NAME", Pattern::regex("[a-zA-Z]+")),
    ])
    .with_ignore(["WS"])
}

#[test]
fn test_tokenize_and_parse() {
    let conf = conf();
    let tokens = tokenize(&conf, "12 + 30 +4");
    let kinds: Vec<&str> = tokens.iter().map(|t| t.kind.as_str()).collect();
    assert_eq!(kinds, ["NUM", "PLUS", "NUM", "PLUS", "NUM"]);
    assert_eq!(tokens[2].column, Some(6));

    let parser = LalrParser::from_analysis(sum_analysis(), &sum_callbacks()).unwrap();
    assert_eq!(parser.parse(tokens).unwrap(), Value::Number(46));
}

#[test]
fn test_priority_breaks_length_ties() {
    let tokens = tokenize(&conf(), "SUM sums");
    let kinds: Vec<&str> = tokens.iter().map(|t| t.kind.as_str()).collect();
    // `SUM` ties with NAME and wins by priority; `sums` is longer as a NAME
    assert_eq!(kinds, ["KEYWORD", "NAME"]);
}

#[test]
fn test_postlex_rewrites_stream() {
    let conf = conf().with_postlex(CollapsePlus);
    let tokens = tokenize(&conf, "1 ++ 2");
    let kinds: Vec<&str> = tokens.iter().map(|t| t.kind.as_str()).collect();
    assert_eq!(kinds, ["NUM", "PLUS", "NUM"]);
    assert!(conf.postlex.as_ref().is_some_and(|p| p.always_accept().is_empty()));
}

#[test]
fn test_terminals_follow_definitions() {
    let conf = conf();
    let terminals = conf.terminals().unwrap();
    assert_eq!(terminals.len(), conf.tokens.len());
    assert_eq!(terminals[1].name(), "PLUS");
    assert_eq!(terminals[1].to_string(), r"/\+/");
    assert_eq!(terminals[3].to_string(), "/(?i:sum)/");
}

#[test]
fn test_invalid_definition_fails_to_compile() {
    let conf = LexerConf::new(vec![TokenDef::new("BAD", Pattern::regex("[0-9"))]);
    assert!(conf.terminals().is_err());
}

#[test]
fn test_kind_terminals_match_lexed_tokens() {
    let tokens = tokenize(&conf(), "1 + 2");
    let plus = Terminal::kind("PLUS");
    let matched: Vec<bool> = tokens.iter().map(|t| plus.matches(t)).collect();
    assert_eq!(matched, [false, true, false]);
}

#[test]
fn test_terminal_identity() {
    let a = Terminal::regexp("A", &Pattern::literal("x")).unwrap();
    let b = Terminal::regexp("B", &Pattern::literal("x")).unwrap();
    assert_eq!(a, b);
    assert_ne!(Terminal::kind("A"), Terminal::kind("B"));
    assert_ne!(a, Terminal::kind("x"));
}

#[test]
fn test_widths_of_definitions() {
    let conf = conf();
    let widths: Vec<Width> = conf
        .tokens
        .iter()
        .map(|def| def.pattern.width().unwrap())
        .collect();
    assert_eq!(widths[0], Width { min: 1, max: None });
    assert_eq!(widths[1], Width::exact(1));
    assert_eq!(widths[3], Width::exact(3));
}

#[test]
fn test_token_def_display() {
    let def = TokenDef::new("PLUS", Pattern::literal("+"));
    assert_eq!(def.to_string(), r"TokenDef(PLUS, \+)");
}
