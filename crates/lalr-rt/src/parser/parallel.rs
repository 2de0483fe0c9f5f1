//! # Batch Parsing
//!
//! Runs one [`LalrParser`] over many independent token sequences.
//!
//! ## Overview
//!
//! A parser holds only immutable data, so a batch needs no locking: every
//! input gets its own stacks and the shared table is only read. With the
//! `parallel` feature the batch is spread over rayon's thread pool,
//! otherwise the inputs are parsed one after another. Either way each
//! result is exactly what an isolated [`LalrParser::parse_slice`] call
//! would return.

use crate::backend::lr::LalrParser;
use crate::error::Error;
use crate::grammar::Token;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of parsing one input of a batch
#[derive(Debug)]
pub struct BatchResult<V, T> {
    /// The input identifier
    pub id: String,
    pub result: Result<V, Error<T>>,
    /// Parsing duration
    pub duration: Duration,
}

impl<V, T> BatchResult<V, T> {
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// A batch of token sequences to parse
#[derive(Debug, Clone)]
pub struct ParseBatch<T> {
    /// Inputs to parse: (id, tokens)
    pub inputs: Vec<(String, Vec<T>)>,
}

impl<T> ParseBatch<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self { inputs: Vec::new() }
    }

    pub fn add(&mut self, id: impl Into<String>, tokens: impl IntoIterator<Item = T>) {
        self.inputs.push((id.into(), tokens.into_iter().collect()));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

impl<T> Default for ParseBatch<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Progress callback for batch parsing: `(completed, total)`
pub type ProgressCallback<'a> = &'a (dyn Fn(usize, usize) + Send + Sync);

/// Parses batches of inputs against a shared parser
pub struct BatchParser<V> {
    parser: Arc<LalrParser<V>>,
}

impl<V> Clone for BatchParser<V> {
    fn clone(&self) -> Self {
        Self {
            parser: Arc::clone(&self.parser),
        }
    }
}

impl<V> fmt::Debug for BatchParser<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchParser")
            .field("parser", &self.parser)
            .finish()
    }
}

impl<V> BatchParser<V> {
    #[must_use]
    pub fn new(parser: impl Into<Arc<LalrParser<V>>>) -> Self {
        Self {
            parser: parser.into(),
        }
    }

    #[must_use]
    pub const fn parser(&self) -> &Arc<LalrParser<V>> {
        &self.parser
    }

    /// Parse every input of the batch, results in batch order.
    pub fn parse_batch<T>(&self, batch: &ParseBatch<T>) -> Vec<BatchResult<V, T>>
    where
        T: Token + Clone + fmt::Debug + Send + Sync,
        V: From<T> + Send,
    {
        self.run(batch, |_, _| {})
    }

    /// Like [`parse_batch`](Self::parse_batch), reporting progress after
    /// every finished input. Calls may arrive from several threads.
    pub fn parse_batch_with_progress<T>(
        &self,
        batch: &ParseBatch<T>,
        progress: ProgressCallback<'_>,
    ) -> Vec<BatchResult<V, T>>
    where
        T: Token + Clone + fmt::Debug + Send + Sync,
        V: From<T> + Send,
    {
        self.run(batch, progress)
    }

    fn run<T, P>(&self, batch: &ParseBatch<T>, progress: P) -> Vec<BatchResult<V, T>>
    where
        T: Token + Clone + fmt::Debug + Send + Sync,
        V: From<T> + Send,
        P: Fn(usize, usize) + Send + Sync,
    {
        let total = batch.len();
        let completed = AtomicUsize::new(0);
        tracing::debug!(target: "lalr_rt::batch", inputs = total, "parsing batch");

        #[cfg(feature = "parallel")]
        let inputs = batch.inputs.par_iter();
        #[cfg(not(feature = "parallel"))]
        let inputs = batch.inputs.iter();

        inputs
            .map(|(id, tokens)| {
                let start = Instant::now();
                let result = self.parser.parse_slice(tokens);
                let duration = start.elapsed();

                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                progress(done, total);

                BatchResult {
                    id: id.clone(),
                    result,
                    duration,
                }
            })
            .collect()
    }
}

/// Summary of batch parsing results
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    /// Inputs whose failure points at the parse table rather than the input
    pub faults: usize,
    pub total_duration: Duration,
    pub avg_duration: Duration,
}

impl BatchSummary {
    /// Success rate as a percentage
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.successful as f64 / self.total as f64) * 100.0
        }
    }
}

/// Aggregate results from batch parsing
#[must_use]
pub fn aggregate_results<V, T>(results: &[BatchResult<V, T>]) -> BatchSummary {
    let total = results.len();
    let successful = results.iter().filter(|r| r.is_ok()).count();
    let faults = results
        .iter()
        .filter(|r| matches!(&r.result, Err(err) if err.is_fault()))
        .count();
    let total_duration: Duration = results.iter().map(|r| r.duration).sum();
    let avg_duration = u32::try_from(total)
        .ok()
        .filter(|&n| n > 0)
        .map_or(Duration::ZERO, |n| total_duration / n);

    BatchSummary {
        total,
        successful,
        failed: total - successful,
        faults,
        total_duration,
        avg_duration,
    }
}
