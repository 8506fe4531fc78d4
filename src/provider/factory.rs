use std::fmt;

use crate::error::DiResult;
use crate::injector::Injector;
use crate::lifetime::Lifetime;
use crate::registration::AnyArc;
use crate::target::{Factory, Target};
use crate::token::Token;

use super::{InstanceCache, Provider, ProviderKind};

/// Provider that invokes a [`Factory`] with its resolved manifest.
///
/// ```rust
/// use std::sync::Arc;
/// use ferrous_injector::{Factory, FactoryProvider, Injector};
///
/// let injector = Injector::root();
/// injector.bind_constant("base", 40u32).unwrap();
///
/// let answer = Factory::new(|args| Ok(*args.next::<u32>()? + 2)).with_manifest(["base"]);
/// injector.bind(FactoryProvider::new("answer", answer, true)).unwrap();
///
/// let a = injector.get::<u32>("answer").unwrap();
/// let b = injector.get::<u32>("answer").unwrap();
/// assert_eq!(*a, 42);
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
pub struct FactoryProvider {
    token: Token,
    target: Target,
    cache: InstanceCache,
}

impl FactoryProvider {
    pub fn new(token: impl Into<Token>, factory: Factory, singleton: bool) -> Self {
        Self::with_lifetime(token, factory, Lifetime::from_singleton(singleton))
    }

    pub fn with_lifetime(token: impl Into<Token>, factory: Factory, lifetime: Lifetime) -> Self {
        Self {
            token: token.into(),
            target: Target::Factory(factory),
            cache: InstanceCache::new(lifetime),
        }
    }
}

impl Provider for FactoryProvider {
    fn token(&self) -> &Token {
        &self.token
    }

    fn get(&self, injector: &Injector) -> DiResult<AnyArc> {
        self.cache.get_or_create(|| injector.apply(&self.target))
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Factory
    }

    fn lifetime(&self) -> Lifetime {
        self.cache.lifetime()
    }
}

impl fmt::Debug for FactoryProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryProvider")
            .field("token", &self.token)
            .field("target", &self.target)
            .field("lifetime", &self.cache.lifetime())
            .field("cached", &self.cache.is_populated())
            .finish()
    }
}
