//! Parser and lexer configuration.
//!
//! Both are plain data assembled once by a grammar front-end and shared
//! read-only afterwards.

use super::{Rule, Symbol};
use crate::error::PatternError;
use crate::lexer::{Pattern, Terminal, Token};
use hashbrown::HashSet;
use std::fmt;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Default lexer priority of a [`TokenDef`]
pub const DEFAULT_TOKEN_PRIORITY: i32 = 1;

/// Rule set handed to an analyzer, with the callbacks for its reductions.
#[derive(Debug, Clone)]
pub struct ParserConf<C> {
    /// Rules in declaration order
    pub rules: Vec<Rule>,
    /// Holder the reduction callbacks are resolved from
    pub callbacks: C,
    /// Start symbol
    pub start: Symbol,
}

impl<C> ParserConf<C> {
    #[must_use]
    pub fn new(rules: Vec<Rule>, callbacks: C, start: impl Into<Symbol>) -> Self {
        Self {
            rules,
            callbacks,
            start: start.into(),
        }
    }
}

/// A named terminal definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct TokenDef {
    pub name: Symbol,
    pub pattern: Pattern,
    /// Lexer tie-breaking priority. Stored here, interpreted by lexers.
    pub priority: i32,
}

impl TokenDef {
    #[must_use]
    pub fn new(name: impl Into<Symbol>, pattern: Pattern) -> Self {
        Self {
            name: name.into(),
            pattern,
            priority: DEFAULT_TOKEN_PRIORITY,
        }
    }

    #[must_use]
    pub const fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl fmt::Display for TokenDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenDef({}, {})", self.name, self.pattern)
    }
}

/// Boxed token stream passed through a [`PostLex`] hook
pub type TokenStream<'a> = Box<dyn Iterator<Item = Token> + 'a>;

/// Hook a lexer runs over its output before the parser sees it.
pub trait PostLex: Send + Sync {
    /// Rewrite the token stream
    fn process<'a>(&'a self, tokens: TokenStream<'a>) -> TokenStream<'a>;

    /// Terminal names the lexer must always produce, even when the parser
    /// state would not accept them
    fn always_accept(&self) -> &[Symbol] {
        &[]
    }
}

/// Terminal definitions consumed by an external lexer.
#[derive(Default)]
pub struct LexerConf {
    pub tokens: Vec<TokenDef>,
    /// Terminal names the lexer drops instead of emitting
    pub ignore: HashSet<Symbol, ahash::RandomState>,
    pub postlex: Option<Box<dyn PostLex>>,
}

impl LexerConf {
    #[must_use]
    pub fn new(tokens: Vec<TokenDef>) -> Self {
        Self {
            tokens,
            ignore: HashSet::with_hasher(ahash::RandomState::new()),
            postlex: None,
        }
    }

    #[must_use]
    pub fn with_ignore<S: Into<Symbol>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.ignore.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_postlex(mut self, postlex: impl PostLex + 'static) -> Self {
        self.postlex = Some(Box::new(postlex));
        self
    }

    #[must_use]
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore.contains(name)
    }

    /// Look up a definition by terminal name
    #[must_use]
    pub fn token(&self, name: &str) -> Option<&TokenDef> {
        self.tokens.iter().find(|def| def.name == name)
    }

    /// Compile every definition into a regexp [`Terminal`], in definition order.
    ///
    /// # Errors
    ///
    /// Returns the first pattern that fails to compile.
    pub fn terminals(&self) -> Result<Vec<Terminal>, PatternError> {
        self.tokens
            .iter()
            .map(|def| Terminal::regexp(def.name.clone(), &def.pattern))
            .collect()
    }

    /// Run the post-lex hook, if any, over a token stream
    pub fn postprocess<'a>(&'a self, tokens: TokenStream<'a>) -> TokenStream<'a> {
        match &self.postlex {
            Some(postlex) => postlex.process(tokens),
            None => tokens,
        }
    }
}

impl fmt::Debug for LexerConf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexerConf")
            .field("tokens", &self.tokens)
            .field("ignore", &self.ignore)
            .field("postlex", &self.postlex.is_some())
            .finish()
    }
}
