//! # Parser Module
//!
//! Caller-facing helpers built on the LALR runtime in [`backend::lr`].
//!
//! [`backend::lr`]: crate::backend::lr

pub mod parallel;

pub use parallel::{aggregate_results, BatchParser, BatchResult, BatchSummary, ParseBatch};
