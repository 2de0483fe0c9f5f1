use crate::error::PatternError;
use compact_str::CompactString;
use regex::{Regex, RegexBuilder};
use regex_syntax::ParserBuilder;
use std::collections::BTreeSet;
use std::fmt::{self, Write as _};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Regex flag, spelled the way the `regex` crate spells it inline.
///
/// Matchers get their flags through builder setters; the letters only appear
/// in the rendered source. Flags are kept in a [`BTreeSet`], so variant order
/// is rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Flag {
    /// `i`
    CaseInsensitive,
    /// `m`
    MultiLine,
    /// `s`
    DotMatchesNewLine,
    /// `U`
    SwapGreed,
    /// `u`
    Unicode,
    /// `x`
    IgnoreWhitespace,
    /// `R`
    Crlf,
}

impl Flag {
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'i' => Some(Self::CaseInsensitive),
            'm' => Some(Self::MultiLine),
            's' => Some(Self::DotMatchesNewLine),
            'U' => Some(Self::SwapGreed),
            'u' => Some(Self::Unicode),
            'x' => Some(Self::IgnoreWhitespace),
            'R' => Some(Self::Crlf),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::CaseInsensitive => 'i',
            Self::MultiLine => 'm',
            Self::DotMatchesNewLine => 's',
            Self::SwapGreed => 'U',
            Self::Unicode => 'u',
            Self::IgnoreWhitespace => 'x',
            Self::Crlf => 'R',
        }
    }
}

/// Length bounds of the strings a pattern can match, in bytes.
///
/// `max == None` means the pattern has no upper bound (e.g. `a+`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Width {
    pub min: usize,
    pub max: Option<usize>,
}

impl Width {
    #[must_use]
    pub const fn exact(len: usize) -> Self {
        Self {
            min: len,
            max: Some(len),
        }
    }

    #[must_use]
    pub const fn is_bounded(&self) -> bool {
        self.max.is_some()
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "{}..={max}", self.min),
            None => write!(f, "{}..", self.min),
        }
    }
}

/// The text a terminal is defined by.
///
/// A literal and a regex pattern never compare equal, even over the same
/// text: `"a.b"` as a literal matches one string, as a regex it matches many.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Pattern {
    /// Matches its value verbatim
    Literal {
        value: CompactString,
        flags: BTreeSet<Flag>,
    },
    /// A regex body in `regex` crate syntax
    Regex {
        value: CompactString,
        flags: BTreeSet<Flag>,
    },
}

impl Pattern {
    #[must_use]
    pub fn literal(value: impl Into<CompactString>) -> Self {
        Self::Literal {
            value: value.into(),
            flags: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn regex(value: impl Into<CompactString>) -> Self {
        Self::Regex {
            value: value.into(),
            flags: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_flags(mut self, new_flags: impl IntoIterator<Item = Flag>) -> Self {
        match &mut self {
            Self::Literal { flags, .. } | Self::Regex { flags, .. } => flags.extend(new_flags),
        }
        self
    }

    /// Parse flag letters such as `"im"`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::UnknownFlag`] for a letter the regex engine
    /// does not know.
    pub fn parse_flags(letters: &str) -> Result<BTreeSet<Flag>, PatternError> {
        letters
            .chars()
            .map(|c| Flag::from_char(c).ok_or(PatternError::UnknownFlag(c)))
            .collect()
    }

    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Literal { value, .. } | Self::Regex { value, .. } => value.as_str(),
        }
    }

    #[must_use]
    pub const fn flags(&self) -> &BTreeSet<Flag> {
        match self {
            Self::Literal { flags, .. } | Self::Regex { flags, .. } => flags,
        }
    }

    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal { .. })
    }

    /// The regex body without flags: escaped for literals, verbatim for
    /// regex patterns.
    ///
    /// Literal whitespace is escaped too, so the body still matches itself
    /// under [`Flag::IgnoreWhitespace`].
    #[must_use]
    pub fn body(&self) -> String {
        match self {
            Self::Literal { value, .. } => escape_literal(value),
            Self::Regex { value, .. } => value.to_string(),
        }
    }

    /// Render as regex source.
    ///
    /// Flags become one `(?flags:...)` group around the body. Used for
    /// display and identity; matchers are built from [`body`](Self::body)
    /// and the flag set.
    #[must_use]
    pub fn to_regexp(&self) -> String {
        let body = self.body();
        let flags = self.flags();
        if flags.is_empty() {
            return body;
        }
        let letters: String = flags.iter().map(|flag| flag.as_char()).collect();
        format!("(?{letters}:{body})")
    }

    /// Compile the pattern.
    ///
    /// # Errors
    ///
    /// Returns the regex engine's error for an invalid regex body.
    pub fn compile(&self) -> Result<Regex, PatternError> {
        self.build(&self.body())
    }

    /// Compile `source` under this pattern's flags.
    pub(crate) fn build(&self, source: &str) -> Result<Regex, PatternError> {
        let mut builder = RegexBuilder::new(source);
        for flag in self.flags() {
            match flag {
                Flag::CaseInsensitive => builder.case_insensitive(true),
                Flag::MultiLine => builder.multi_line(true),
                Flag::DotMatchesNewLine => builder.dot_matches_new_line(true),
                Flag::SwapGreed => builder.swap_greed(true),
                Flag::Unicode => builder.unicode(true),
                Flag::IgnoreWhitespace => builder.ignore_whitespace(true),
                Flag::Crlf => builder.crlf(true),
            };
        }
        Ok(builder.build()?)
    }

    /// Minimum and maximum match length.
    ///
    /// # Errors
    ///
    /// Returns a syntax error when a regex body does not parse.
    pub fn width(&self) -> Result<Width, PatternError> {
        match self {
            Self::Literal { value, .. } => Ok(Width::exact(value.len())),
            Self::Regex { value, flags } => {
                let mut parser = ParserBuilder::new();
                for flag in flags {
                    match flag {
                        Flag::CaseInsensitive => parser.case_insensitive(true),
                        Flag::MultiLine => parser.multi_line(true),
                        Flag::DotMatchesNewLine => parser.dot_matches_new_line(true),
                        Flag::SwapGreed => parser.swap_greed(true),
                        Flag::Unicode => parser.unicode(true),
                        Flag::IgnoreWhitespace => parser.ignore_whitespace(true),
                        Flag::Crlf => parser.crlf(true),
                    };
                }
                let hir = parser.build().parse(value).map_err(Box::new)?;
                let properties = hir.properties();
                // A regex that can never match has no minimum either.
                Ok(match properties.minimum_len() {
                    Some(min) => Width {
                        min,
                        max: properties.maximum_len(),
                    },
                    None => Width::exact(0),
                })
            }
        }
    }

    /// # Errors
    ///
    /// See [`width`](Self::width).
    pub fn min_width(&self) -> Result<usize, PatternError> {
        Ok(self.width()?.min)
    }

    /// `None` when unbounded.
    ///
    /// # Errors
    ///
    /// See [`width`](Self::width).
    pub fn max_width(&self) -> Result<Option<usize>, PatternError> {
        Ok(self.width()?.max)
    }
}

/// `regex::escape`, plus whitespace, which the escaper leaves alone.
fn escape_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in regex::escape(value).chars() {
        match c {
            ' ' => escaped.push_str("\\ "),
            c if c.is_whitespace() => {
                let _ = write!(escaped, "\\x{{{:X}}}", u32::from(c));
            }
            c => escaped.push(c),
        }
    }
    escaped
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_regexp())
    }
}
