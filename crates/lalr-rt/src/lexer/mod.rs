//! # Lexer Module
//!
//! The pattern and terminal model lexers are built from.
//!
//! ## Overview
//!
//! This crate does not tokenize text. It provides what a lexer needs to
//! agree with the parser on:
//!
//! - **Patterns**: literal strings and regex bodies, with inline flags,
//!   their regex rendering and the length bounds of what they match
//! - **Terminals**: a compiled regex matched at an offset, or a token type
//!   matched against lexed tokens
//! - **Tokens**: a concrete token type lexers can emit
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lalr_rt::lexer::{Pattern, Terminal};
//!
//! let number = Terminal::regexp("NUMBER", &Pattern::regex("[0-9]+"))?;
//! assert_eq!(number.match_at("x = 42", 4), Some(4..6));
//!
//! let width = Pattern::regex("[0-9]+").width()?;
//! assert_eq!((width.min, width.max), (1, None));
//! ```

pub mod pattern;
pub mod terminal;
pub mod token;

pub use pattern::{Flag, Pattern, Width};
pub use terminal::Terminal;
pub use token::Token;
