//! Ordered fallback chains for cascading attribute lookups.

/// An ordered chain of optional providers where the first present value wins.
///
/// Later providers are only consulted (and, for [`then_with`](Self::then_with),
/// only evaluated) while no value has been found.
///
/// ```
/// use unslide::style::Fallback;
///
/// let size = Fallback::new(None)
///     .then(Some(24.0))
///     .then_with(|| Some(18.0))
///     .or(40.0);
/// assert_eq!(size, 24.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[must_use]
pub struct Fallback<T> {
    value: Option<T>,
}

impl<T> Fallback<T> {
    /// Start a chain with its first provider.
    pub fn new(first: Option<T>) -> Self {
        Self { value: first }
    }

    /// Consult `next` if nothing was found yet.
    pub fn then(self, next: Option<T>) -> Self {
        Self {
            value: self.value.or(next),
        }
    }

    /// Lazily consult `next` if nothing was found yet.
    pub fn then_with(self, next: impl FnOnce() -> Option<T>) -> Self {
        Self {
            value: self.value.or_else(next),
        }
    }

    /// The first present value, if any.
    pub fn resolve(self) -> Option<T> {
        self.value
    }

    /// The first present value, or `default`.
    pub fn or(self, default: T) -> T {
        self.value.unwrap_or(default)
    }
}

impl<T> Default for Fallback<T> {
    fn default() -> Self {
        Self { value: None }
    }
}
