//! The injector: registry, resolver and hierarchy.
//!
//! An [`Injector`] owns a token to provider mapping and an optional parent.
//! Resolution is an upward linear search: the local registry first, then each
//! ancestor in turn, failing with [`DiError::Unresolved`] once the root has
//! been checked. Nothing found in an ancestor is copied down, every call walks
//! the chain again.

use std::any::type_name;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;

use crate::binding::Binding;
use crate::config::{DuplicatePolicy, InjectorOptions};
use crate::descriptors::BindingDescriptor;
use crate::error::{DiError, DiResult};
use crate::internal::ResolutionGuard;
use crate::manifest::ManifestSource;
use crate::observer::Observers;
use crate::provider::{ClassProvider, ConstantProvider, FactoryProvider, Provider};
use crate::registration::{AnyArc, Registry};
use crate::target::{ArgValues, Arguments, Class, Constructable, Factory, Target};
use crate::token::Token;

mod builder;

pub use builder::InjectorBuilder;

/// Hierarchical dependency injector.
///
/// Injectors are cheap to clone; clones share the same registry. A child holds
/// a strong reference to its parent, a parent knows nothing about its
/// children.
///
/// # Thread Safety
///
/// The registry sits behind a read-write lock that is never held while a
/// provider runs, so factories may resolve and even bind on the injector that
/// invoked them. Singleton providers construct exactly once under concurrent
/// access.
///
/// # Examples
///
/// ```
/// use ferrous_injector::{manifest, Arguments, Constructable, DiResult, Injector, Manifest};
///
/// struct Receiver {
///     num: i32,
/// }
///
/// impl Receiver {
///     fn sum(&self, other: i32) -> i32 {
///         self.num + other
///     }
/// }
///
/// impl Constructable for Receiver {
///     fn manifest() -> Option<Manifest> {
///         Some(manifest!["NUM"])
///     }
///
///     fn construct(args: &mut Arguments) -> DiResult<Self> {
///         Ok(Receiver { num: *args.next::<i32>()? })
///     }
/// }
///
/// let injector = Injector::root();
/// injector.bind_constant("NUM", 6i32).unwrap();
///
/// let receiver = injector.construct::<Receiver>().unwrap();
/// assert_eq!(receiver.sum(5), 11);
/// ```
#[derive(Clone)]
pub struct Injector {
    inner: Arc<InjectorInner>,
}

pub(crate) struct InjectorInner {
    registry: RwLock<Registry>,
    parent: Option<Injector>,
    manifests: Arc<dyn ManifestSource>,
    observers: Observers,
    options: InjectorOptions,
    depth: usize,
}

impl Injector {
    /// Creates an injector whose parent is the global injector.
    ///
    /// This reads, and therefore locks, the global injector.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates an injector with no parent.
    pub fn root() -> Self {
        Self::builder().root().build()
    }

    /// Creates an injector delegating to `parent`.
    pub fn with_parent(parent: &Injector) -> Self {
        Self::builder().parent(parent).build()
    }

    pub fn builder() -> InjectorBuilder {
        InjectorBuilder::new()
    }

    /// Creates a child whose parent is `self`.
    ///
    /// The child shares this injector's manifest source, observers and
    /// options, and starts with an empty registry.
    ///
    /// ```
    /// use ferrous_injector::Injector;
    ///
    /// let root = Injector::root();
    /// root.bind_constant("NUM", 6).unwrap();
    ///
    /// let child = root.spawn();
    /// assert_eq!(*child.get::<i32>("NUM").unwrap(), 6);
    /// assert!(!child.contains(&"NUM".into()));
    /// ```
    pub fn spawn(&self) -> Injector {
        Self::builder().parent(self).build()
    }

    pub fn parent(&self) -> Option<&Injector> {
        self.inner.parent.as_ref()
    }

    /// Number of ancestors, 0 for a root.
    pub fn depth(&self) -> usize {
        self.inner.depth
    }

    pub fn options(&self) -> &InjectorOptions {
        &self.inner.options
    }

    /// True when both handles point at the same injector.
    pub fn ptr_eq(a: &Injector, b: &Injector) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    #[inline(always)]
    fn id(&self) -> usize {
        Arc::as_ptr(&self.inner) as *const () as usize
    }

    // ----- Binding -----

    /// Registers a provider, spec record or bare class.
    ///
    /// Binding never constructs anything. If the token is already bound
    /// locally the existing provider stays in place: with the default
    /// [`DuplicatePolicy::Warn`] a warning is logged and `Ok` returned, with
    /// [`DuplicatePolicy::Error`] the call fails with
    /// [`DiError::DuplicateBinding`].
    ///
    /// ```
    /// use ferrous_injector::{BindingSpec, Injector};
    ///
    /// let injector = Injector::root();
    /// injector
    ///     .bind(BindingSpec::new("k").provide_constant("first"))?
    ///     .bind(BindingSpec::new("k").provide_constant("second"))?;
    ///
    /// assert_eq!(*injector.get::<&str>("k")?, "first");
    /// # Ok::<(), ferrous_injector::DiError>(())
    /// ```
    pub fn bind(&self, binding: impl Into<Binding>) -> DiResult<&Self> {
        let provider = binding.into().into_provider()?;
        let token = provider.token().clone();
        let kind = provider.kind();

        let inserted = self.inner.registry.write().insert(provider);
        if inserted {
            tracing::debug!(token = %token, ?kind, depth = self.depth(), "bound provider");
            return Ok(self);
        }

        match self.inner.options.duplicate_policy {
            DuplicatePolicy::Warn => {
                tracing::warn!(token = %token, "token already bound, keeping the existing provider");
                self.inner.observers.duplicate_binding(&token);
                Ok(self)
            }
            DuplicatePolicy::Error => Err(DiError::DuplicateBinding(token)),
        }
    }

    /// Binds `value` as a constant.
    pub fn bind_constant<T: Send + Sync + 'static>(
        &self,
        token: impl Into<Token>,
        value: T,
    ) -> DiResult<&Self> {
        self.bind(ConstantProvider::new(token, value))
    }

    /// Binds `factory` under `token`.
    pub fn bind_factory(
        &self,
        token: impl Into<Token>,
        factory: Factory,
        singleton: bool,
    ) -> DiResult<&Self> {
        self.bind(FactoryProvider::new(token, factory, singleton))
    }

    /// Binds `T` under its own type token.
    pub fn bind_class<T: Constructable>(&self, singleton: bool) -> DiResult<&Self> {
        self.bind(ClassProvider::of::<T>(singleton))
    }

    /// Binds `T` under `token`.
    pub fn bind_class_as<T: Constructable>(
        &self,
        token: impl Into<Token>,
        singleton: bool,
    ) -> DiResult<&Self> {
        self.bind(ClassProvider::new(token, Class::of::<T>(), singleton))
    }

    // ----- Resolution -----

    /// Resolves every token in order.
    ///
    /// The output has the same length and order as `tokens`. The first failure
    /// aborts the batch and no partial results are returned.
    pub fn resolve(&self, tokens: &[Token]) -> DiResult<Vec<AnyArc>> {
        tokens.iter().map(|token| self.resolve_one(token)).collect()
    }

    /// Resolves one token, walking up the parent chain if needed.
    ///
    /// The provider runs against the injector it was found in, so its own
    /// dependencies resolve from that level upwards.
    pub fn resolve_one(&self, token: &Token) -> DiResult<AnyArc> {
        let mut current = self;
        let mut hops = 0;

        loop {
            let local = current.inner.registry.read().get(token);
            if let Some(provider) = local {
                return current.produce(token, provider.as_ref());
            }

            match current.parent() {
                Some(parent) => {
                    hops += 1;
                    tracing::debug!(token = %token, hops, "delegating to parent injector");
                    self.inner.observers.delegated(token, hops);
                    current = parent;
                }
                None => break,
            }
        }

        let error = DiError::Unresolved(token.clone());
        self.inner.observers.resolution_failed(token, &error);
        Err(error)
    }

    fn produce(&self, token: &Token, provider: &dyn Provider) -> DiResult<AnyArc> {
        let observers = &self.inner.observers;
        if !observers.has_observers() {
            return self.produce_guarded(token, provider);
        }

        let start = Instant::now();
        observers.resolving(token);
        let result = self.produce_guarded(token, provider);
        match &result {
            Ok(_) => observers.resolved(token, start.elapsed()),
            Err(error) => observers.resolution_failed(token, error),
        }
        result
    }

    #[inline(always)]
    fn produce_guarded(&self, token: &Token, provider: &dyn Provider) -> DiResult<AnyArc> {
        let _guard = ResolutionGuard::enter(self.id(), token, self.inner.options.max_depth)?;
        tracing::trace!(token = %token, kind = ?provider.kind(), "resolving locally");
        provider.get(self)
    }

    /// Resolves `token` and downcasts the value to `T`.
    pub fn get<T: Send + Sync + 'static>(&self, token: impl Into<Token>) -> DiResult<Arc<T>> {
        self.resolve_one(&token.into())?
            .downcast::<T>()
            .map_err(|_| DiError::TypeMismatch(type_name::<T>()))
    }

    /// Resolves the value bound under `T`'s own type token.
    pub fn get_type<T: Send + Sync + 'static>(&self) -> DiResult<Arc<T>> {
        self.get::<T>(Token::of::<T>())
    }

    /// Like [`get`](Self::get) but panics on failure.
    pub fn get_required<T: Send + Sync + 'static>(&self, token: impl Into<Token>) -> Arc<T> {
        let token = token.into();
        self.get::<T>(token.clone())
            .unwrap_or_else(|e| panic!("Failed to resolve {} as {}: {}", token, type_name::<T>(), e))
    }

    // ----- Construction -----

    /// Resolves the target's manifest and invokes it with the values.
    ///
    /// Fails with [`DiError::ManifestUnavailable`] before resolving anything if
    /// the manifest source has no entry for the target. Arguments are resolved
    /// in manifest order and passed positionally.
    pub fn apply(&self, target: &Target) -> DiResult<AnyArc> {
        let manifest = self
            .inner
            .manifests
            .manifest(target)
            .ok_or_else(|| DiError::ManifestUnavailable(target.name()))?;

        let values = manifest
            .tokens()
            .iter()
            .map(|token| self.resolve_one(token))
            .collect::<DiResult<ArgValues>>()?;

        let mut args = Arguments::new(target.name(), values);
        target.invoke(&mut args)
    }

    /// Builds a fresh `T` through [`apply`](Self::apply).
    ///
    /// This bypasses any binding for `T`: every call constructs.
    pub fn construct<T: Constructable>(&self) -> DiResult<Arc<T>> {
        self.apply(&Target::Class(Class::of::<T>()))?
            .downcast::<T>()
            .map_err(|_| DiError::TypeMismatch(type_name::<T>()))
    }

    /// Invokes `factory` through [`apply`](Self::apply).
    pub fn invoke<T: Send + Sync + 'static>(&self, factory: &Factory) -> DiResult<Arc<T>> {
        self.apply(&Target::Factory(factory.clone()))?
            .downcast::<T>()
            .map_err(|_| DiError::TypeMismatch(type_name::<T>()))
    }

    // ----- Introspection -----

    /// True if `token` is bound on this injector itself.
    pub fn contains(&self, token: &Token) -> bool {
        self.inner.registry.read().contains(token)
    }

    /// True if `token` is bound here or on any ancestor.
    pub fn is_resolvable(&self, token: &Token) -> bool {
        self.ancestry().any(|injector| injector.contains(token))
    }

    /// Iterates over `self` and then each ancestor up to the root.
    pub fn ancestry(&self) -> impl Iterator<Item = &Injector> {
        std::iter::successors(Some(self), |injector| injector.parent())
    }

    /// Number of local bindings.
    pub fn len(&self) -> usize {
        self.inner.registry.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the local bindings.
    pub fn descriptors(&self) -> Vec<BindingDescriptor> {
        self.inner
            .registry
            .read()
            .iter()
            .map(|(token, provider)| BindingDescriptor {
                token: token.clone(),
                kind: provider.kind(),
                lifetime: provider.lifetime(),
            })
            .collect()
    }

    #[cfg(feature = "diagnostics")]
    pub fn to_debug_string(&self) -> String {
        let mut s = String::new();
        s.push_str("=== Injector Debug ===\n");
        for injector in self.ancestry() {
            s.push_str(&format!("Level {} ({} bindings):\n", injector.depth(), injector.len()));
            let mut descriptors = injector.descriptors();
            descriptors.sort_by(|a, b| a.token.to_string().cmp(&b.token.to_string()));
            for d in descriptors {
                s.push_str(&format!("  {}: {:?} {:?}\n", d.token, d.kind, d.lifetime));
            }
        }
        s
    }
}

impl fmt::Debug for Injector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Injector")
            .field("bindings", &self.len())
            .field("depth", &self.inner.depth)
            .field("observers", &self.inner.observers.len())
            .field("options", &self.inner.options)
            .finish()
    }
}
