use crate::grammar::{Symbol, Token as GrammarToken};
use compact_str::CompactString;
use std::fmt;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// A token produced by a lexer.
///
/// Carries its declared type, the matched text and, when the lexer tracks
/// them, the 1-based line and column it starts at.
///
/// # Example
///
/// ```rust,ignore
/// use lalr_rt::lexer::Token;
///
/// let token = Token::new("NUMBER", "42").at(3, 7);
/// assert_eq!(token.to_string(), "\"42\"(NUMBER)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Token {
    pub kind: Symbol,
    pub value: CompactString,
    pub line: Option<usize>,
    pub column: Option<usize>,
}

impl Token {
    #[must_use]
    pub fn new(kind: impl Into<Symbol>, value: impl Into<CompactString>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
            line: None,
            column: None,
        }
    }

    /// Attach a source position
    #[must_use]
    pub const fn at(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

impl GrammarToken for Token {
    fn kind(&self) -> &str {
        self.kind.as_str()
    }

    fn value(&self) -> Option<&str> {
        Some(self.value.as_str())
    }

    fn line(&self) -> Option<usize> {
        self.line
    }

    fn column(&self) -> Option<usize> {
        self.column
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.value.as_str(), self.kind)
    }
}
