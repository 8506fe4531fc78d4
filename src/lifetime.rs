//! Provider lifetime definitions.

/// Caching behaviour of a factory or class provider
///
/// Constant providers have no creation step and report [`Lifetime::Singleton`]
/// since they always hand out the same value.
///
/// # Examples
///
/// ```rust
/// use ferrous_injector::Lifetime;
///
/// assert_eq!(Lifetime::from_singleton(true), Lifetime::Singleton);
/// assert_eq!(Lifetime::from_singleton(false), Lifetime::Transient);
/// assert!(Lifetime::Singleton.is_singleton());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifetime {
    /// Constructed on first `get`, then cached in the provider forever
    Singleton,
    /// Constructed again on every `get`, never cached
    #[default]
    Transient,
}

impl Lifetime {
    /// Maps the binder's `singleton` flag onto a lifetime.
    pub fn from_singleton(singleton: bool) -> Self {
        if singleton {
            Lifetime::Singleton
        } else {
            Lifetime::Transient
        }
    }

    pub fn is_singleton(self) -> bool {
        self == Lifetime::Singleton
    }
}
