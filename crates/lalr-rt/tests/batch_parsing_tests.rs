//! Tests for batch parsing over a shared parser
//!
//! Runs sequentially by default and on the rayon pool with `--features parallel`;
//! the results must be the same either way.

mod common;

use common::{init_tracing, sum_analysis, sum_callbacks, sum_tokens, Value};
use lalr_rt::backend::lr::LalrParser;
use lalr_rt::parser::{aggregate_results, BatchParser, ParseBatch};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn batch_parser() -> BatchParser<Value> {
    let parser = LalrParser::from_analysis(sum_analysis(), &sum_callbacks()).unwrap();
    BatchParser::new(parser)
}

fn batch(count: usize) -> ParseBatch<lalr_rt::lexer::Token> {
    let mut batch = ParseBatch::new();
    for n in 1..=count {
        let text = if n % 5 == 0 {
            // every fifth input is malformed
            "1 + + 1".to_string()
        } else {
            vec!["2"; n].join(" + ")
        };
        batch.add(format!("input-{n}"), sum_tokens(&text));
    }
    batch
}

#[test]
fn test_batch_matches_isolated_parses() {
    init_tracing();
    let batch_parser = batch_parser();
    let batch = batch(20);
    let results = batch_parser.parse_batch(&batch);

    assert_eq!(results.len(), batch.len());
    for (result, (id, tokens)) in results.iter().zip(&batch.inputs) {
        assert_eq!(&result.id, id);
        let isolated = batch_parser.parser().parse_slice(tokens);
        match (&result.result, isolated) {
            (Ok(value), Ok(expected)) => assert_eq!(value, &expected),
            (Err(err), Err(expected)) => assert_eq!(err.to_string(), expected.to_string()),
            (got, expected) => panic!("{id}: batch gave {got:?}, isolated gave {expected:?}"),
        }
    }
}

#[test]
fn test_batch_results_in_order() {
    let results = batch_parser().parse_batch(&batch(6));
    let values: Vec<Option<i64>> = results
        .iter()
        .map(|r| r.result.as_ref().ok().map(Value::number))
        .collect();
    assert_eq!(values, [Some(2), Some(4), Some(6), Some(8), None, Some(12)]);
}

#[test]
fn test_batch_summary() {
    let results = batch_parser().parse_batch(&batch(10));
    let summary = aggregate_results(&results);
    assert_eq!(summary.total, 10);
    assert_eq!(summary.successful, 8);
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.faults, 0);
    assert!((summary.success_rate() - 80.0).abs() < 1e-9);
}

#[test]
fn test_batch_progress_reports_every_input() {
    let calls = AtomicUsize::new(0);
    let highest = AtomicUsize::new(0);
    let progress = |done: usize, total: usize| {
        assert_eq!(total, 12);
        calls.fetch_add(1, Ordering::SeqCst);
        highest.fetch_max(done, Ordering::SeqCst);
    };
    let results = batch_parser().parse_batch_with_progress(&batch(12), &progress);
    assert_eq!(results.len(), 12);
    assert_eq!(calls.load(Ordering::SeqCst), 12);
    assert_eq!(highest.load(Ordering::SeqCst), 12);
}

#[test]
fn test_batch_parser_shares_the_parser() {
    let parser = Arc::new(LalrParser::from_analysis(sum_analysis(), &sum_callbacks()).unwrap());
    let batch_parser = BatchParser::new(Arc::clone(&parser));
    let copy = batch_parser.clone();
    assert!(Arc::ptr_eq(batch_parser.parser(), copy.parser()));
    assert_eq!(Arc::strong_count(&parser), 3);
}

#[test]
fn test_empty_batch() {
    let batch: ParseBatch<lalr_rt::lexer::Token> = ParseBatch::default();
    assert!(batch_parser().parse_batch(&batch).is_empty());
}
