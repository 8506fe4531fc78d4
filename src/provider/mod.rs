//! Provider strategies.
//!
//! A provider knows how to produce the value for one token. The injector owns
//! the lookup and delegation logic, providers own production and caching:
//!
//! - [`ConstantProvider`] hands out a value that already exists
//! - [`FactoryProvider`] invokes a [`Factory`](crate::Factory) through the injector
//! - [`ClassProvider`] constructs a [`Constructable`](crate::Constructable) through the injector
//!
//! Factory and class providers can be singletons. A singleton provider runs
//! its production step once, even under concurrent first access, and returns
//! the cached value from then on. The cache belongs to the provider instance,
//! not to the token or the injector.

use once_cell::sync::OnceCell;

use crate::error::DiResult;
use crate::injector::Injector;
use crate::lifetime::Lifetime;
use crate::registration::AnyArc;
use crate::token::Token;

mod class;
mod constant;
mod factory;

pub use class::ClassProvider;
pub use constant::ConstantProvider;
pub use factory::FactoryProvider;

/// Which strategy a provider implements, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Constant,
    Factory,
    Class,
    /// A caller-supplied [`Provider`] implementation
    Custom,
}

/// Strategy producing the value for one token.
///
/// `get` receives the injector the provider was found in, which is where any
/// sub-dependencies are resolved from. Implementations must not mutate state
/// beyond their own cache.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::{AtomicU64, Ordering};
/// use std::sync::Arc;
/// use ferrous_injector::{AnyArc, DiResult, Injector, Provider, Token};
///
/// struct Sequence {
///     token: Token,
///     next: AtomicU64,
/// }
///
/// impl Provider for Sequence {
///     fn token(&self) -> &Token {
///         &self.token
///     }
///
///     fn get(&self, _injector: &Injector) -> DiResult<AnyArc> {
///         Ok(Arc::new(self.next.fetch_add(1, Ordering::SeqCst)))
///     }
/// }
///
/// let injector = Injector::root();
/// let seq: Arc<dyn Provider> = Arc::new(Sequence { token: "seq".into(), next: AtomicU64::new(0) });
/// injector.bind(seq).unwrap();
///
/// assert_eq!(*injector.get::<u64>("seq").unwrap(), 0);
/// assert_eq!(*injector.get::<u64>("seq").unwrap(), 1);
/// ```
pub trait Provider: Send + Sync {
    /// The key the provider is registered under.
    fn token(&self) -> &Token;

    /// Produces the value.
    fn get(&self, injector: &Injector) -> DiResult<AnyArc>;

    fn kind(&self) -> ProviderKind {
        ProviderKind::Custom
    }

    fn lifetime(&self) -> Lifetime {
        Lifetime::Transient
    }
}

/// Construct-once cache shared by factory and class providers.
pub(crate) struct InstanceCache {
    lifetime: Lifetime,
    cell: OnceCell<AnyArc>,
}

impl InstanceCache {
    pub(crate) fn new(lifetime: Lifetime) -> Self {
        Self {
            lifetime,
            cell: OnceCell::new(),
        }
    }

    pub(crate) fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// Runs `create` every time for transients and once for singletons.
    ///
    /// Concurrent first callers of a singleton block until the winner has
    /// finished. A failed creation leaves the cell empty.
    #[inline(always)]
    pub(crate) fn get_or_create<F>(&self, create: F) -> DiResult<AnyArc>
    where
        F: FnOnce() -> DiResult<AnyArc>,
    {
        match self.lifetime {
            Lifetime::Singleton => {
                if let Some(value) = self.cell.get() {
                    return Ok(value.clone());
                }
                self.cell.get_or_try_init(create).cloned()
            }
            Lifetime::Transient => create(),
        }
    }

    pub(crate) fn is_populated(&self) -> bool {
        self.cell.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DiError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn singleton_cache_runs_once() {
        let cache = InstanceCache::new(Lifetime::Singleton);
        let runs = AtomicUsize::new(0);
        let make = || {
            runs.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(7u32) as AnyArc)
        };
        let a = cache.get_or_create(make).unwrap();
        let b = cache.get_or_create(make).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_singleton_creation_can_retry() {
        let cache = InstanceCache::new(Lifetime::Singleton);
        let failed = cache.get_or_create(|| Err(DiError::TypeMismatch("u32")));
        assert!(failed.is_err());
        assert!(!cache.is_populated());
        assert!(cache.get_or_create(|| Ok(Arc::new(1u32) as AnyArc)).is_ok());
        assert!(cache.is_populated());
    }

    #[test]
    fn transient_cache_never_stores() {
        let cache = InstanceCache::new(Lifetime::Transient);
        let a = cache.get_or_create(|| Ok(Arc::new(1u8) as AnyArc)).unwrap();
        let b = cache.get_or_create(|| Ok(Arc::new(1u8) as AnyArc)).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert!(!cache.is_populated());
    }
}
