//! Token sources the automaton pulls from.

use crate::error::Context;
use crate::grammar::Token;
use std::fmt;

/// A forward-only supply of tokens.
///
/// The parser calls [`next_token`](Self::next_token) only after the previous
/// token has been fully processed and never asks for more than one token of
/// lookahead.
pub trait TokenSource {
    type Item: Token;

    fn next_token(&mut self) -> Option<Self::Item>;

    /// Up to `window` items following the most recently pulled token.
    ///
    /// Only used to build syntax error messages. Sources that cannot look
    /// ahead without consuming report [`Context::Unavailable`].
    fn context(&self, window: usize) -> Context {
        let _ = window;
        Context::Unavailable
    }
}

/// Adapts any iterator of tokens. No look-ahead context.
#[derive(Debug, Clone)]
pub struct Stream<I> {
    iter: I,
}

impl<I: Iterator> Stream<I> {
    pub fn new(tokens: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            iter: tokens.into_iter(),
        }
    }

    pub fn into_inner(self) -> I {
        self.iter
    }
}

impl<I> TokenSource for Stream<I>
where
    I: Iterator,
    I::Item: Token,
{
    type Item = I::Item;

    fn next_token(&mut self) -> Option<I::Item> {
        self.iter.next()
    }
}

/// Borrows a slice of tokens, so errors can show what comes next.
pub struct SliceSource<'a, T> {
    tokens: &'a [T],
    pos: usize,
}

impl<'a, T> SliceSource<'a, T> {
    #[must_use]
    pub const fn new(tokens: &'a [T]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Number of tokens pulled so far
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }
}

impl<T> fmt::Debug for SliceSource<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceSource")
            .field("len", &self.tokens.len())
            .field("pos", &self.pos)
            .finish()
    }
}

impl<'a, T> TokenSource for SliceSource<'a, T>
where
    T: Token + Clone + fmt::Debug,
{
    type Item = T;

    fn next_token(&mut self) -> Option<T> {
        let token = self.tokens.get(self.pos)?.clone();
        self.pos += 1;
        Some(token)
    }

    fn context(&self, window: usize) -> Context {
        let rest = self.tokens.get(self.pos..).unwrap_or_default();
        Context::from_items(&rest[..window.min(rest.len())])
    }
}
