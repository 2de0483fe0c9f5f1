/// Default number of upcoming items shown in syntax errors
pub const DEFAULT_CONTEXT_WINDOW: usize = 5;

/// Configuration for LALR parser
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct LalrConfig {
    /// Number of items after the offending token to include in error context
    pub context_window: usize,
}

impl LalrConfig {
    #[must_use]
    pub const fn with_context_window(mut self, window: usize) -> Self {
        self.context_window = window;
        self
    }
}

impl Default for LalrConfig {
    fn default() -> Self {
        Self {
            context_window: DEFAULT_CONTEXT_WINDOW,
        }
    }
}
