//! Provider registry storage.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::provider::Provider;
use crate::token::Token;

/// Type-erased shared value produced by providers.
pub type AnyArc = Arc<dyn Any + Send + Sync>;

#[cfg(feature = "ahash")]
pub(crate) type TokenMap<V> = HashMap<Token, V, ahash::RandomState>;
#[cfg(not(feature = "ahash"))]
pub(crate) type TokenMap<V> = HashMap<Token, V>;

/// Token to provider mapping owned by one injector.
///
/// A token maps to at most one provider. `insert` never overwrites.
#[derive(Default)]
pub(crate) struct Registry {
    providers: TokenMap<Arc<dyn Provider>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Inserts `provider` unless its token is taken. Returns whether it was stored.
    pub(crate) fn insert(&mut self, provider: Arc<dyn Provider>) -> bool {
        use std::collections::hash_map::Entry;

        match self.providers.entry(provider.token().clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(provider);
                true
            }
        }
    }

    /// Clones the provider out so callers can drop the lock before calling it.
    #[inline(always)]
    pub(crate) fn get(&self, token: &Token) -> Option<Arc<dyn Provider>> {
        self.providers.get(token).cloned()
    }

    #[inline(always)]
    pub(crate) fn contains(&self, token: &Token) -> bool {
        self.providers.contains_key(token)
    }

    pub(crate) fn len(&self) -> usize {
        self.providers.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&Token, &Arc<dyn Provider>)> {
        self.providers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ConstantProvider;
    use crate::Injector;

    #[test]
    fn first_insert_wins() {
        let mut registry = Registry::new();
        assert!(registry.insert(Arc::new(ConstantProvider::new("k", 1u8))));
        assert!(!registry.insert(Arc::new(ConstantProvider::new("k", 2u8))));
        assert_eq!(registry.len(), 1);

        let kept = registry.get(&Token::from("k")).unwrap();
        let value = kept.get(&Injector::root()).unwrap().downcast::<u8>().unwrap();
        assert_eq!(*value, 1);
    }
}
