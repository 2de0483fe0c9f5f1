//! Terminals: the units a lexer matches and a parser table is keyed by.

use super::{Flag, Pattern};
use crate::error::PatternError;
use crate::grammar::{Symbol, Token};
use regex::Regex;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;

/// A matching unit, backed either by a regex or by a declared token type.
///
/// Two terminals are equal when they are the same variant over the same
/// data: the regex source for [`Terminal::Regexp`], the type name for
/// [`Terminal::Kind`]. A regexp terminal's name is not part of its identity.
#[derive(Debug, Clone)]
pub enum Terminal {
    /// Matches raw text
    Regexp {
        name: Symbol,
        /// Rendered pattern source, as produced by [`Pattern::to_regexp`]
        source: String,
        /// The pattern anchored at the start of the haystack
        anchored: Regex,
    },
    /// Matches tokens whose kind equals the symbol
    Kind(Symbol),
}

impl Terminal {
    /// Compile a pattern into a regexp terminal.
    ///
    /// # Errors
    ///
    /// Returns the regex engine's error for an invalid regex body.
    pub fn regexp(name: impl Into<Symbol>, pattern: &Pattern) -> Result<Self, PatternError> {
        let source = pattern.to_regexp();
        // a trailing `#` comment must not swallow the closing paren
        let close = if pattern.flags().contains(&Flag::IgnoreWhitespace) {
            "\n)"
        } else {
            ")"
        };
        let anchored = pattern.build(&format!("\\A(?:{}{close}", pattern.body()))?;
        Ok(Self::Regexp {
            name: name.into(),
            source,
            anchored,
        })
    }

    #[must_use]
    pub fn kind(name: impl Into<Symbol>) -> Self {
        Self::Kind(name.into())
    }

    #[must_use]
    pub const fn name(&self) -> &Symbol {
        match self {
            Self::Regexp { name, .. } | Self::Kind(name) => name,
        }
    }

    /// Match raw text starting exactly at byte offset `pos`.
    ///
    /// Returns the matched byte range. Always `None` for kind terminals and
    /// for offsets that are out of range or not on a char boundary.
    #[must_use]
    pub fn match_at(&self, text: &str, pos: usize) -> Option<Range<usize>> {
        let Self::Regexp { anchored, .. } = self else {
            return None;
        };
        let rest = text.get(pos..)?;
        anchored
            .find(rest)
            .map(|found| pos + found.start()..pos + found.end())
    }

    /// Match an already lexed token by its declared type.
    ///
    /// Always `false` for regexp terminals.
    #[must_use]
    pub fn matches<T: Token + ?Sized>(&self, token: &T) -> bool {
        match self {
            Self::Kind(kind) => kind == token.kind(),
            Self::Regexp { .. } => false,
        }
    }
}

impl PartialEq for Terminal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Regexp { source: a, .. }, Self::Regexp { source: b, .. }) => a == b,
            (Self::Kind(a), Self::Kind(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Terminal {}

impl Hash for Terminal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Regexp { source, .. } => source.hash(state),
            Self::Kind(kind) => kind.hash(state),
        }
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regexp { source, .. } => write!(f, "/{source}/"),
            Self::Kind(kind) => write!(f, "{kind}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Token as LexedToken;
    use hashbrown::HashSet;

    #[test]
    fn regexp_matches_at_offset_only() {
        let number = Terminal::regexp("NUMBER", &Pattern::regex("[0-9]+")).unwrap();
        assert_eq!(number.match_at("ab123cd", 2), Some(2..5));
        assert_eq!(number.match_at("ab123cd", 0), None);
        assert_eq!(number.match_at("ab123cd", 50), None);
    }

    #[test]
    fn regexp_respects_char_boundaries() {
        let any = Terminal::regexp("ANY", &Pattern::regex(".")).unwrap();
        assert_eq!(any.match_at("é", 1), None);
        assert_eq!(any.match_at("é", 0), Some(0..2));
    }

    #[test]
    fn alternation_is_anchored_as_a_whole() {
        let op = Terminal::regexp("OP", &Pattern::regex("a|b")).unwrap();
        assert_eq!(op.match_at("xb", 0), None);
        assert_eq!(op.match_at("xb", 1), Some(1..2));
    }

    #[test]
    fn flagged_patterns_match_at_offset() {
        let spaced = Pattern::literal("a b").with_flags([Flag::IgnoreWhitespace]);
        let spaced = Terminal::regexp("SPACED", &spaced).unwrap();
        assert_eq!(spaced.match_at("a b", 0), Some(0..3));
        assert_eq!(spaced.match_at("ab", 0), None);

        let digits = Pattern::regex("[0-9]+ # digits").with_flags([Flag::IgnoreWhitespace]);
        let digits = Terminal::regexp("DIGITS", &digits).unwrap();
        assert_eq!(digits.match_at("x42 y", 1), Some(1..3));
    }

    #[test]
    fn multi_line_does_not_unanchor() {
        let word = Pattern::regex("^[a-z]+").with_flags([Flag::MultiLine]);
        let word = Terminal::regexp("WORD", &word).unwrap();
        assert_eq!(word.match_at("12\nab", 0), None);
        assert_eq!(word.match_at("12\nab", 3), Some(3..5));
    }

    #[test]
    fn kind_terminal_matches_tokens() {
        let plus = Terminal::kind("PLUS");
        assert!(plus.matches(&LexedToken::new("PLUS", "+")));
        assert!(!plus.matches(&LexedToken::new("MINUS", "-")));
        assert_eq!(plus.match_at("+", 0), None);

        let regexp = Terminal::regexp("PLUS", &Pattern::literal("+")).unwrap();
        assert!(!regexp.matches(&LexedToken::new("PLUS", "+")));
    }

    #[test]
    fn equality_requires_same_variant_and_data() {
        let a = Terminal::regexp("A", &Pattern::literal("+")).unwrap();
        let b = Terminal::regexp("B", &Pattern::literal("+")).unwrap();
        let c = Terminal::regexp("A", &Pattern::literal("-")).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(Terminal::kind("A"), Terminal::kind("B"));
        assert_ne!(
            Terminal::kind(r"\+"),
            Terminal::regexp("X", &Pattern::literal("+")).unwrap()
        );
    }

    #[test]
    fn usable_as_set_keys() {
        let mut set = HashSet::new();
        set.insert(Terminal::kind("PLUS"));
        set.insert(Terminal::kind("PLUS"));
        set.insert(Terminal::regexp("PLUS", &Pattern::literal("+")).unwrap());
        assert_eq!(set.len(), 2);
    }
}
