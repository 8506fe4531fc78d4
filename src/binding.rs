//! What `Injector::bind` accepts.

use std::fmt;
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::lifetime::Lifetime;
use crate::provider::{ClassProvider, ConstantProvider, FactoryProvider, Provider};
use crate::registration::AnyArc;
use crate::target::{Class, Factory};
use crate::token::Token;

/// Declarative binding record resolved into the right provider variant.
///
/// Exactly one strategy should be set. When several are, the precedence is
/// class, then factory, then constant. The `singleton` flag is ignored for
/// constants.
///
/// # Examples
///
/// ```rust
/// use ferrous_injector::{manifest, Arguments, BindingSpec, Class, Constructable, DiResult, Injector, Manifest};
///
/// struct Receiver {
///     num: i32,
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
/// injector
///     .bind(BindingSpec::new("NUM").provide_constant(6i32))?
///     .bind(BindingSpec::new("receiver").provide(Class::of::<Receiver>()).singleton(true))?;
///
/// assert_eq!(injector.get::<Receiver>("receiver")?.num, 6);
/// # Ok::<(), ferrous_injector::DiError>(())
/// ```
#[derive(Default, Clone)]
pub struct BindingSpec {
    key: Option<Token>,
    provide: Option<Class>,
    provide_factory: Option<Factory>,
    provide_constant: Option<(AnyArc, &'static str)>,
    singleton: bool,
}

impl BindingSpec {
    pub fn new(key: impl Into<Token>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::default()
        }
    }

    pub fn key(mut self, key: impl Into<Token>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Produce the value by constructing `class`.
    pub fn provide(mut self, class: Class) -> Self {
        self.provide = Some(class);
        self
    }

    /// Produce the value by invoking `factory`.
    pub fn provide_factory(mut self, factory: Factory) -> Self {
        self.provide_factory = Some(factory);
        self
    }

    /// Produce `value` itself.
    pub fn provide_constant<T: Send + Sync + 'static>(self, value: T) -> Self {
        self.provide_constant_arc(Arc::new(value))
    }

    pub fn provide_constant_arc<T: Send + Sync + 'static>(mut self, value: Arc<T>) -> Self {
        self.provide_constant = Some((value, std::any::type_name::<T>()));
        self
    }

    pub fn singleton(mut self, singleton: bool) -> Self {
        self.singleton = singleton;
        self
    }

    pub(crate) fn into_provider(self) -> DiResult<Arc<dyn Provider>> {
        let key = self
            .key
            .ok_or(DiError::InvalidProvider("binding spec has no key"))?;
        let lifetime = Lifetime::from_singleton(self.singleton);

        if let Some(class) = self.provide {
            return Ok(Arc::new(ClassProvider::with_lifetime(key, class, lifetime)));
        }
        if let Some(factory) = self.provide_factory {
            return Ok(Arc::new(FactoryProvider::with_lifetime(key, factory, lifetime)));
        }
        if let Some((value, type_name)) = self.provide_constant {
            return Ok(Arc::new(ConstantProvider::from_any(key, value, type_name)));
        }
        Err(DiError::InvalidProvider("binding spec names no provider strategy"))
    }
}

impl fmt::Debug for BindingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingSpec")
            .field("key", &self.key)
            .field("provide", &self.provide)
            .field("provide_factory", &self.provide_factory)
            .field("provide_constant", &self.provide_constant.as_ref().map(|(_, name)| name))
            .field("singleton", &self.singleton)
            .finish()
    }
}

/// Anything `bind` can register.
///
/// A bare [`Class`] binds a transient class provider under the class's own
/// type token. `None` converts to [`Binding::Absent`], which `bind` rejects
/// with [`DiError::InvalidProvider`].
pub enum Binding {
    Provider(Arc<dyn Provider>),
    Spec(BindingSpec),
    Class(Class),
    Absent,
}

impl Binding {
    pub(crate) fn into_provider(self) -> DiResult<Arc<dyn Provider>> {
        match self {
            Binding::Provider(provider) => Ok(provider),
            Binding::Spec(spec) => spec.into_provider(),
            Binding::Class(class) => {
                let token = class.id().clone();
                Ok(Arc::new(ClassProvider::with_lifetime(token, class, Lifetime::Transient)))
            }
            Binding::Absent => Err(DiError::InvalidProvider("no binding given")),
        }
    }
}

impl From<Arc<dyn Provider>> for Binding {
    fn from(provider: Arc<dyn Provider>) -> Self {
        Binding::Provider(provider)
    }
}

impl From<ConstantProvider> for Binding {
    fn from(provider: ConstantProvider) -> Self {
        Binding::Provider(Arc::new(provider))
    }
}

impl From<FactoryProvider> for Binding {
    fn from(provider: FactoryProvider) -> Self {
        Binding::Provider(Arc::new(provider))
    }
}

impl From<ClassProvider> for Binding {
    fn from(provider: ClassProvider) -> Self {
        Binding::Provider(Arc::new(provider))
    }
}

impl From<BindingSpec> for Binding {
    fn from(spec: BindingSpec) -> Self {
        Binding::Spec(spec)
    }
}

impl From<Class> for Binding {
    fn from(class: Class) -> Self {
        Binding::Class(class)
    }
}

impl<B: Into<Binding>> From<Option<B>> for Binding {
    fn from(binding: Option<B>) -> Self {
        binding.map_or(Binding::Absent, Into::into)
    }
}
