use std::sync::Arc;

use parking_lot::RwLock;

use super::{Injector, InjectorInner};
use crate::config::{DuplicatePolicy, InjectorOptions};
use crate::manifest::{DeclaredManifests, ManifestSource};
use crate::observer::{InjectorObserver, Observers};
use crate::registration::Registry;

enum ParentChoice {
    Global,
    Root,
    Explicit(Injector),
}

/// Builder for [`Injector`]s with a custom parent, manifest source, observers
/// or options.
///
/// Without a call to [`root`](Self::root) or [`parent`](Self::parent) the
/// built injector's parent is the global injector. Whatever is not set
/// explicitly is inherited from the parent: its manifest source, its options,
/// and its observers (extra observers are appended after the inherited ones).
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use ferrous_injector::{DuplicatePolicy, Injector, LoggingObserver, ManifestRegistry};
///
/// let injector = Injector::builder()
///     .root()
///     .manifests(Arc::new(ManifestRegistry::new()))
///     .observer(Arc::new(LoggingObserver::new()))
///     .duplicate_policy(DuplicatePolicy::Error)
///     .build();
///
/// assert!(injector.parent().is_none());
/// assert_eq!(injector.options().duplicate_policy, DuplicatePolicy::Error);
/// ```
pub struct InjectorBuilder {
    parent: ParentChoice,
    manifests: Option<Arc<dyn ManifestSource>>,
    observers: Observers,
    options: Option<InjectorOptions>,
    max_depth: Option<usize>,
    duplicate_policy: Option<DuplicatePolicy>,
}

impl InjectorBuilder {
    pub(crate) fn new() -> Self {
        Self {
            parent: ParentChoice::Global,
            manifests: None,
            observers: Observers::new(),
            options: None,
            max_depth: None,
            duplicate_policy: None,
        }
    }

    /// Build a root injector with no parent.
    pub fn root(mut self) -> Self {
        self.parent = ParentChoice::Root;
        self
    }

    pub fn parent(mut self, parent: &Injector) -> Self {
        self.parent = ParentChoice::Explicit(parent.clone());
        self
    }

    /// Where the injector reads dependency manifests from.
    pub fn manifests(mut self, source: Arc<dyn ManifestSource>) -> Self {
        self.manifests = Some(source);
        self
    }

    pub fn observer(mut self, observer: Arc<dyn InjectorObserver>) -> Self {
        self.observers.add(observer);
        self
    }

    pub fn options(mut self, options: InjectorOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Overrides one field of the explicit or inherited options.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Overrides one field of the explicit or inherited options.
    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = Some(policy);
        self
    }

    pub fn build(self) -> Injector {
        let parent = match self.parent {
            ParentChoice::Global => Some(crate::global::global().clone()),
            ParentChoice::Root => None,
            ParentChoice::Explicit(parent) => Some(parent),
        };

        let inherited = parent.as_ref().map(|p| &p.inner);

        let manifests = self
            .manifests
            .or_else(|| inherited.map(|p| p.manifests.clone()))
            .unwrap_or_else(|| Arc::new(DeclaredManifests));

        let mut options = self
            .options
            .or_else(|| inherited.map(|p| p.options.clone()))
            .unwrap_or_default();
        if let Some(max_depth) = self.max_depth {
            options = options.with_max_depth(max_depth);
        }
        if let Some(policy) = self.duplicate_policy {
            options = options.with_duplicate_policy(policy);
        }

        let mut observers = inherited.map(|p| p.observers.clone()).unwrap_or_default();
        observers.extend(self.observers);

        let depth = parent.as_ref().map_or(0, |p| p.depth() + 1);

        tracing::trace!(depth, observers = observers.len(), "created injector");

        Injector {
            inner: Arc::new(InjectorInner {
                registry: RwLock::new(Registry::new()),
                parent,
                manifests,
                observers,
                options,
                depth,
            }),
        }
    }
}
