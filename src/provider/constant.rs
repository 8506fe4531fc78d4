use std::fmt;
use std::sync::Arc;

use crate::error::DiResult;
use crate::injector::Injector;
use crate::lifetime::Lifetime;
use crate::registration::AnyArc;
use crate::token::Token;

use super::{Provider, ProviderKind};

/// Provider wrapping a value that already exists.
///
/// Every `get` returns the same `Arc`, so identity is preserved across calls.
/// There is no creation step and therefore nothing to gate behind a singleton
/// flag.
///
/// ```rust
/// use std::sync::Arc;
/// use ferrous_injector::{ConstantProvider, Injector};
///
/// let shared = Arc::new(String::from("config"));
/// let injector = Injector::root();
/// injector.bind(ConstantProvider::from_arc("cfg", shared.clone())).unwrap();
///
/// let resolved = injector.get::<String>("cfg").unwrap();
/// assert!(Arc::ptr_eq(&shared, &resolved));
/// ```
pub struct ConstantProvider {
    token: Token,
    value: AnyArc,
    type_name: &'static str,
}

impl ConstantProvider {
    pub fn new<T: Send + Sync + 'static>(token: impl Into<Token>, value: T) -> Self {
        Self::from_arc(token, Arc::new(value))
    }

    /// Wraps an `Arc` the caller keeps, so resolved values are pointer-equal to it.
    pub fn from_arc<T: Send + Sync + 'static>(token: impl Into<Token>, value: Arc<T>) -> Self {
        Self {
            token: token.into(),
            value,
            type_name: std::any::type_name::<T>(),
        }
    }

    pub(crate) fn from_any(token: Token, value: AnyArc, type_name: &'static str) -> Self {
        Self {
            token,
            value,
            type_name,
        }
    }
}

impl Provider for ConstantProvider {
    fn token(&self) -> &Token {
        &self.token
    }

    #[inline(always)]
    fn get(&self, _injector: &Injector) -> DiResult<AnyArc> {
        Ok(self.value.clone())
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Constant
    }

    fn lifetime(&self) -> Lifetime {
        Lifetime::Singleton
    }
}

impl fmt::Debug for ConstantProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstantProvider")
            .field("token", &self.token)
            .field("type", &self.type_name)
            .finish()
    }
}
