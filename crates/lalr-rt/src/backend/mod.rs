//! # Parser Backends
//!
//! This module provides the automaton that executes parse tables.
//!
//! ## Available Backends
//!
//! - **LALR(1)**: Bottom-up shift-reduce parsing over a precomputed table
//!   - One token of lookahead, pulled lazily
//!   - Reduction callbacks resolved once per rule
//!   - Shareable across threads without locking
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lalr_rt::backend::lr::{LalrConfig, LalrParser};
//!
//! let parser = LalrParser::new(&conf, &analyzer)?
//!     .with_config(LalrConfig::default().with_context_window(3));
//! let value = parser.parse(tokens)?;
//! ```
//!
//! ## Error Handling
//!
//! There is no error recovery: the first token without a table entry ends
//! the parse with [`UnexpectedToken`](crate::error::UnexpectedToken), and no
//! further input is read.

pub mod lr;
