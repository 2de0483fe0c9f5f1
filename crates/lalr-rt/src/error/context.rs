//! Upcoming-input context attached to syntax errors.

use crate::grammar::{Symbol, Token};
use std::fmt;

/// A short view of the input that follows an offending token.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Context {
    /// `(value, kind)` pairs of tokens that expose their text
    Tokens(Vec<(String, Symbol)>),
    /// Debug rendering of items that do not expose their text
    Raw(String),
    /// The input cannot be looked ahead into
    #[default]
    Unavailable,
}

impl Context {
    /// Build a context from the items following the offending token.
    ///
    /// Uses `value(kind)` pairs when every item exposes a value, the raw
    /// debug slice otherwise.
    pub fn from_items<T: Token + fmt::Debug>(items: &[T]) -> Self {
        let pairs: Option<Vec<(String, Symbol)>> = items
            .iter()
            .map(|item| {
                item.value()
                    .map(|value| (value.to_owned(), Symbol::from(item.kind())))
            })
            .collect();
        match pairs {
            Some(pairs) => Self::Tokens(pairs),
            None => Self::Raw(format!("{items:?}")),
        }
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tokens(pairs) => {
                for (i, (value, kind)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{value:?}({kind})")?;
                }
                Ok(())
            }
            Self::Raw(raw) => f.write_str(raw),
            Self::Unavailable => f.write_str("<no context>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Token as LexedToken;

    #[derive(Debug)]
    struct Bare(&'static str);

    impl Token for Bare {
        fn kind(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn tokens_with_values_render_as_pairs() {
        let items = [LexedToken::new("NUMBER", "2"), LexedToken::new("PLUS", "+")];
        let context = Context::from_items(&items);
        assert_eq!(context.to_string(), r#""2"(NUMBER) "+"(PLUS)"#);
    }

    #[test]
    fn tokens_without_values_render_raw() {
        let context = Context::from_items(&[Bare("A"), Bare("B")]);
        assert_eq!(context, Context::Raw(r#"[Bare("A"), Bare("B")]"#.to_string()));
    }

    #[test]
    fn empty_slice_is_empty_pairs() {
        let context = Context::from_items::<LexedToken>(&[]);
        assert_eq!(context, Context::Tokens(Vec::new()));
        assert_eq!(context.to_string(), "");
    }

    #[test]
    fn unavailable_placeholder() {
        assert_eq!(Context::Unavailable.to_string(), "<no context>");
        assert!(!Context::default().is_available());
    }
}
