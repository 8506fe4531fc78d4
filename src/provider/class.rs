use std::fmt;

use crate::error::DiResult;
use crate::injector::Injector;
use crate::lifetime::Lifetime;
use crate::registration::AnyArc;
use crate::target::{Class, Constructable, Target};
use crate::token::Token;

use super::{InstanceCache, Provider, ProviderKind};

/// Provider that asks the injector to `apply` a constructable type.
pub struct ClassProvider {
    token: Token,
    target: Target,
    cache: InstanceCache,
}

impl ClassProvider {
    pub fn new(token: impl Into<Token>, class: Class, singleton: bool) -> Self {
        Self::with_lifetime(token, class, Lifetime::from_singleton(singleton))
    }

    pub fn with_lifetime(token: impl Into<Token>, class: Class, lifetime: Lifetime) -> Self {
        Self {
            token: token.into(),
            target: Target::Class(class),
            cache: InstanceCache::new(lifetime),
        }
    }

    /// Binds `T` under its own type token.
    pub fn of<T: Constructable>(singleton: bool) -> Self {
        Self::new(Token::of::<T>(), Class::of::<T>(), singleton)
    }
}

impl Provider for ClassProvider {
    fn token(&self) -> &Token {
        &self.token
    }

    fn get(&self, injector: &Injector) -> DiResult<AnyArc> {
        self.cache.get_or_create(|| injector.apply(&self.target))
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Class
    }

    fn lifetime(&self) -> Lifetime {
        self.cache.lifetime()
    }
}

impl fmt::Debug for ClassProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassProvider")
            .field("token", &self.token)
            .field("target", &self.target)
            .field("lifetime", &self.cache.lifetime())
            .field("cached", &self.cache.is_populated())
            .finish()
    }
}
