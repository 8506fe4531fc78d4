//! Binding descriptors for introspection and diagnostics.

use crate::lifetime::Lifetime;
use crate::provider::ProviderKind;
use crate::token::Token;

/// Snapshot of one local binding of an injector.
///
/// Descriptors only cover the injector they were taken from. Parent bindings
/// are visible by walking [`Injector::parent`](crate::Injector::parent).
///
/// # Examples
///
/// ```rust
/// use ferrous_injector::{Factory, Injector, Lifetime, Manifest, ProviderKind};
///
/// let injector = Injector::root();
/// injector.bind_constant("url", "postgres://localhost".to_string()).unwrap();
/// injector.bind_factory("id", Factory::new(|_| Ok(7u64)).with_manifest(Manifest::empty()), true).unwrap();
///
/// let descriptors = injector.descriptors();
/// let url = descriptors.iter().find(|d| d.display_name() == "url").unwrap();
/// assert_eq!(url.kind, ProviderKind::Constant);
///
/// let id = descriptors.iter().find(|d| d.display_name() == "id").unwrap();
/// assert_eq!(id.kind, ProviderKind::Factory);
/// assert_eq!(id.lifetime, Lifetime::Singleton);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingDescriptor {
    /// The token the provider is bound under
    pub token: Token,
    /// Strategy of the bound provider
    pub kind: ProviderKind,
    /// Caching behaviour of the bound provider
    pub lifetime: Lifetime,
}

impl BindingDescriptor {
    pub fn display_name(&self) -> &str {
        self.token.display_name()
    }

    pub fn is_singleton(&self) -> bool {
        self.lifetime.is_singleton()
    }
}
