//! Reduction callbacks and the registry they are resolved from.

use super::Symbol;
use hashbrown::HashMap;
use std::fmt;
use std::sync::Arc;

/// Error type a reduction callback may fail with.
///
/// The runtime hands it back to the caller untouched inside
/// [`Error::Reduce`](crate::error::Error::Reduce).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A resolved reduction callback.
///
/// Receives the values popped for the rule's expansion, in source order,
/// and produces the value pushed for the rule's origin.
pub type Reduction<V> = Arc<dyn Fn(Vec<V>) -> Result<V, BoxError> + Send + Sync>;

/// Source of reduction callbacks, looked up by rule name or alias.
///
/// Lookup happens exactly once per rule when a parser is constructed.
pub trait Callbacks<V> {
    /// Return the callback registered under `name`, if any
    fn resolve(&self, name: &str) -> Option<Reduction<V>>;
}

impl<V, C: Callbacks<V> + ?Sized> Callbacks<V> for &C {
    fn resolve(&self, name: &str) -> Option<Reduction<V>> {
        (**self).resolve(name)
    }
}

/// Map-based [`Callbacks`] implementation.
pub struct CallbackRegistry<V> {
    callbacks: HashMap<Symbol, Reduction<V>, ahash::RandomState>,
}

impl<V> CallbackRegistry<V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            callbacks: HashMap::with_hasher(ahash::RandomState::new()),
        }
    }

    /// Register a fallible callback, replacing any previous one for `name`
    pub fn register<F>(&mut self, name: impl Into<Symbol>, callback: F) -> &mut Self
    where
        F: Fn(Vec<V>) -> Result<V, BoxError> + Send + Sync + 'static,
    {
        self.callbacks.insert(name.into(), Arc::new(callback));
        self
    }

    /// Builder form of [`register`](Self::register)
    #[must_use]
    pub fn with<F>(mut self, name: impl Into<Symbol>, callback: F) -> Self
    where
        F: Fn(Vec<V>) -> Result<V, BoxError> + Send + Sync + 'static,
    {
        self.register(name, callback);
        self
    }

    /// Register a callback that cannot fail
    #[must_use]
    pub fn with_fn<F>(self, name: impl Into<Symbol>, callback: F) -> Self
    where
        F: Fn(Vec<V>) -> V + Send + Sync + 'static,
    {
        self.with(name, move |children| Ok(callback(children)))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.callbacks.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl<V> Default for CallbackRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for CallbackRegistry<V> {
    fn clone(&self) -> Self {
        Self {
            callbacks: self.callbacks.clone(),
        }
    }
}

impl<V> fmt::Debug for CallbackRegistry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.callbacks.keys().map(Symbol::as_str).collect();
        names.sort_unstable();
        f.debug_struct("CallbackRegistry")
            .field("callbacks", &names)
            .finish()
    }
}

impl<V> Callbacks<V> for CallbackRegistry<V> {
    fn resolve(&self, name: &str) -> Option<Reduction<V>> {
        self.callbacks.get(name).cloned()
    }
}

/// Placeholder used for rules without a registered callback
pub(crate) fn placeholder<V: Default + 'static>() -> Reduction<V> {
    Arc::new(|_: Vec<V>| -> Result<V, BoxError> { Ok(V::default()) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_registered_callbacks() {
        let registry = CallbackRegistry::<i64>::new()
            .with_fn("sum", |children| children.iter().sum())
            .with("fail", |_| Err("nope".into()));

        let sum = registry.resolve("sum").expect("sum is registered");
        assert_eq!(sum(vec![1, 2, 3]).unwrap(), 6);

        let fail = registry.resolve("fail").expect("fail is registered");
        assert_eq!(fail(vec![]).unwrap_err().to_string(), "nope");

        assert!(registry.resolve("missing").is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn placeholder_yields_default() {
        let reduction = placeholder::<Option<String>>();
        assert_eq!(reduction(vec![Some("x".into())]).unwrap(), None);
    }

    #[test]
    fn debug_lists_sorted_names() {
        let registry = CallbackRegistry::<u8>::new()
            .with_fn("b", |_| 0)
            .with_fn("a", |_| 0);
        assert_eq!(
            format!("{registry:?}"),
            r#"CallbackRegistry { callbacks: ["a", "b"] }"#
        );
    }
}
