//! Things an injector can `apply`: constructable types and factory functions.

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::error::{DiError, DiResult};
use crate::manifest::Manifest;
use crate::registration::AnyArc;
use crate::token::{Symbol, Token};

pub(crate) type ArgValues = SmallVec<[AnyArc; 4]>;

/// Resolved positional inputs handed to a constructor or factory.
///
/// Values appear in manifest order. Constructors usually pull them off one at
/// a time with [`Arguments::next`]; random access is available through
/// [`Arguments::get`].
///
/// ```rust
/// use ferrous_injector::{manifest, Arguments, Constructable, DiResult, Manifest};
///
/// struct Endpoint {
///     host: String,
///     port: u16,
/// }
///
/// impl Constructable for Endpoint {
///     fn manifest() -> Option<Manifest> {
///         Some(manifest!["host", "port"])
///     }
///
///     fn construct(args: &mut Arguments) -> DiResult<Self> {
///         Ok(Endpoint {
///             host: args.next::<String>()?.to_string(),
///             port: *args.next::<u16>()?,
///         })
///     }
/// }
/// ```
pub struct Arguments {
    target: String,
    values: ArgValues,
    cursor: usize,
}

impl Arguments {
    pub(crate) fn new(target: impl Into<String>, values: ArgValues) -> Self {
        Self {
            target: target.into(),
            values,
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the argument at `index` downcast to `T`.
    pub fn get<T: Send + Sync + 'static>(&self, index: usize) -> DiResult<Arc<T>> {
        let value = self.raw(index)?.clone();
        value
            .downcast::<T>()
            .map_err(|_| DiError::TypeMismatch(type_name::<T>()))
    }

    /// Returns the next unread argument downcast to `T` and advances.
    pub fn next<T: Send + Sync + 'static>(&mut self) -> DiResult<Arc<T>> {
        let value = self.get::<T>(self.cursor)?;
        self.cursor += 1;
        Ok(value)
    }

    /// Type-erased access for constructors that forward values untouched.
    pub fn raw(&self, index: usize) -> DiResult<&AnyArc> {
        self.values.get(index).ok_or_else(|| DiError::MissingArgument {
            target: self.target.clone(),
            index,
        })
    }
}

impl fmt::Debug for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arguments")
            .field("target", &self.target)
            .field("len", &self.values.len())
            .field("cursor", &self.cursor)
            .finish()
    }
}

/// A type the injector can build from resolved arguments.
///
/// `manifest` is the type's own declaration of what it needs, in constructor
/// parameter order. Returning `None` means the dependencies are unknown, which
/// is different from `Some` of an empty manifest: the former makes `apply` fail,
/// the latter constructs with no arguments. Whether the declared manifest is
/// used at all depends on the injector's [`ManifestSource`](crate::ManifestSource).
pub trait Constructable: Send + Sync + Sized + 'static {
    fn manifest() -> Option<Manifest> {
        None
    }

    fn construct(args: &mut Arguments) -> DiResult<Self>;
}

type ClassCtor = fn(&mut Arguments) -> DiResult<AnyArc>;

fn construct_erased<T: Constructable>(args: &mut Arguments) -> DiResult<AnyArc> {
    Ok(Arc::new(T::construct(args)?))
}

/// Type-erased handle to a [`Constructable`] type.
#[derive(Clone)]
pub struct Class {
    id: Token,
    name: &'static str,
    declared: fn() -> Option<Manifest>,
    ctor: ClassCtor,
}

impl Class {
    pub fn of<T: Constructable>() -> Self {
        Self {
            id: Token::of::<T>(),
            name: type_name::<T>(),
            declared: T::manifest,
            ctor: construct_erased::<T>,
        }
    }

    /// The type-identity token of the class.
    pub fn id(&self) -> &Token {
        &self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn declared_manifest(&self) -> Option<Manifest> {
        (self.declared)()
    }

    pub(crate) fn construct(&self, args: &mut Arguments) -> DiResult<AnyArc> {
        (self.ctor)(args)
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Class").field(&self.name).finish()
    }
}

type FactoryFn = Arc<dyn Fn(&mut Arguments) -> DiResult<AnyArc> + Send + Sync>;

/// A production function the injector can invoke with resolved arguments.
///
/// Every factory has an identity token used to look up its manifest. Factories
/// created with [`Factory::new`] get a fresh [`Symbol`], so two anonymous
/// factories never share a manifest entry.
///
/// ```rust
/// use ferrous_injector::{Factory, Injector};
///
/// let injector = Injector::root();
/// injector.bind_constant("NUM", 6i32).unwrap();
///
/// let double = Factory::new(|args| Ok(*args.next::<i32>()? * 2)).with_manifest(["NUM"]);
/// assert_eq!(*injector.invoke::<i32>(&double).unwrap(), 12);
/// ```
#[derive(Clone)]
pub struct Factory {
    id: Token,
    output: &'static str,
    declared: Option<Manifest>,
    func: FactoryFn,
}

impl Factory {
    /// Wraps `f` under an anonymous, unique identity.
    pub fn new<T, F>(f: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&mut Arguments) -> DiResult<T> + Send + Sync + 'static,
    {
        Self::named(Symbol::new(type_name::<T>()), f)
    }

    /// Wraps `f` under `id`, which manifest registries can refer to.
    pub fn named<T, F>(id: impl Into<Token>, f: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&mut Arguments) -> DiResult<T> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            output: type_name::<T>(),
            declared: None,
            func: Arc::new(move |args| Ok(Arc::new(f(args)?) as AnyArc)),
        }
    }

    /// Declares the argument tokens of the function, in parameter order.
    pub fn with_manifest(mut self, manifest: impl Into<Manifest>) -> Self {
        self.declared = Some(manifest.into());
        self
    }

    pub fn id(&self) -> &Token {
        &self.id
    }

    /// Type name of the value the function produces.
    pub fn output(&self) -> &'static str {
        self.output
    }

    pub(crate) fn declared_manifest(&self) -> Option<Manifest> {
        self.declared.clone()
    }

    pub(crate) fn call(&self, args: &mut Arguments) -> DiResult<AnyArc> {
        (self.func)(args)
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("id", &self.id)
            .field("output", &self.output)
            .field("declared", &self.declared)
            .finish()
    }
}

/// What `apply` should run once the manifest is resolved.
///
/// The tag is fixed when the target is created, so the injector never has to
/// guess whether it holds a constructor or a plain function.
#[derive(Clone, Debug)]
pub enum Target {
    Class(Class),
    Factory(Factory),
}

impl Target {
    pub fn id(&self) -> &Token {
        match self {
            Target::Class(class) => class.id(),
            Target::Factory(factory) => factory.id(),
        }
    }

    /// Name used in errors and logs.
    pub fn name(&self) -> String {
        match self {
            Target::Class(class) => class.name().to_string(),
            Target::Factory(factory) => format!("factory {} -> {}", factory.id(), factory.output()),
        }
    }

    /// The manifest the target declares about itself, if any.
    pub fn declared_manifest(&self) -> Option<Manifest> {
        match self {
            Target::Class(class) => class.declared_manifest(),
            Target::Factory(factory) => factory.declared_manifest(),
        }
    }

    pub(crate) fn invoke(&self, args: &mut Arguments) -> DiResult<AnyArc> {
        match self {
            Target::Class(class) => class.construct(args),
            Target::Factory(factory) => factory.call(args),
        }
    }
}

impl From<Class> for Target {
    fn from(class: Class) -> Self {
        Target::Class(class)
    }
}

impl From<Factory> for Target {
    fn from(factory: Factory) -> Self {
        Target::Factory(factory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn next_walks_positions_in_order() {
        let mut args = Arguments::new("T", smallvec![
            Arc::new(1u8) as AnyArc,
            Arc::new("two".to_string()) as AnyArc,
        ]);
        assert_eq!(*args.next::<u8>().unwrap(), 1);
        assert_eq!(args.next::<String>().unwrap().as_str(), "two");
        assert!(matches!(
            args.next::<u8>(),
            Err(DiError::MissingArgument { index: 2, .. })
        ));
    }

    #[test]
    fn wrong_type_is_a_mismatch() {
        let args = Arguments::new("T", smallvec![Arc::new(1u8) as AnyArc]);
        assert!(matches!(args.get::<u16>(0), Err(DiError::TypeMismatch("u16"))));
    }

    #[test]
    fn anonymous_factories_have_distinct_ids() {
        let a = Factory::new(|_| Ok(1u8));
        let b = Factory::new(|_| Ok(1u8));
        assert_ne!(a.id(), b.id());
        assert_eq!(a.output(), "u8");
    }
}
