//! Dependency manifests and the sources that supply them.
//!
//! A manifest is the ordered list of tokens a target needs. The injector never
//! computes one itself: it asks its [`ManifestSource`] and fails with
//! [`DiError::ManifestUnavailable`](crate::DiError::ManifestUnavailable) when
//! the source has nothing for the target.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use smallvec::SmallVec;

use crate::registration::TokenMap;
use crate::target::{Constructable, Target};
use crate::token::Token;

/// Ordered tokens a target requires.
///
/// ```rust
/// use ferrous_injector::{manifest, Manifest, Token};
///
/// struct Clock;
///
/// let m = manifest!["NUM", Token::of::<Clock>()];
/// assert_eq!(m.len(), 2);
/// assert_eq!(m.tokens()[0], Token::from("NUM"));
/// assert!(Manifest::empty().is_empty());
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    tokens: SmallVec<[Token; 4]>,
}

impl Manifest {
    /// A manifest for a target that takes no arguments.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Appends a token.
    pub fn with(mut self, token: impl Into<Token>) -> Self {
        self.tokens.push(token.into());
        self
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Debug for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.tokens.iter().map(|t| t.to_string())).finish()
    }
}

impl FromIterator<Token> for Manifest {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Token>> for Manifest {
    fn from(tokens: Vec<Token>) -> Self {
        tokens.into_iter().collect()
    }
}

impl<T: Into<Token>, const N: usize> From<[T; N]> for Manifest {
    fn from(tokens: [T; N]) -> Self {
        tokens.into_iter().map(Into::into).collect()
    }
}

/// Builds a [`Manifest`] from anything convertible into a [`Token`].
#[macro_export]
macro_rules! manifest {
    () => {
        $crate::Manifest::empty()
    };
    ($($token:expr),+ $(,)?) => {
        $crate::Manifest::empty()$(.with($token))+
    };
}

/// Supplies dependency manifests to an injector.
///
/// This is the seam between the resolution core and however dependencies are
/// discovered. Returning `None` means "unknown", never "no dependencies".
pub trait ManifestSource: Send + Sync {
    fn manifest(&self, target: &Target) -> Option<Manifest>;
}

/// Reads the manifest each target declares about itself.
///
/// This is the default source: [`Constructable::manifest`] for classes and
/// [`Factory::with_manifest`](crate::Factory::with_manifest) for factories.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeclaredManifests;

impl ManifestSource for DeclaredManifests {
    fn manifest(&self, target: &Target) -> Option<Manifest> {
        target.declared_manifest()
    }
}

/// Explicit table of manifests keyed by target identity.
///
/// Entries win over the fallback source, which lets a caller override what a
/// type declares or supply manifests for types that declare nothing.
///
/// ```rust
/// use std::sync::Arc;
/// use ferrous_injector::{manifest, Arguments, Constructable, DiResult, Injector, ManifestRegistry};
///
/// struct Greeter(String);
///
/// impl Constructable for Greeter {
///     fn construct(args: &mut Arguments) -> DiResult<Self> {
///         Ok(Greeter(args.next::<String>()?.to_string()))
///     }
/// }
///
/// let manifests = ManifestRegistry::new();
/// manifests.register_class::<Greeter>(manifest!["greeting"]);
///
/// let injector = Injector::builder().root().manifests(Arc::new(manifests)).build();
/// injector.bind_constant("greeting", "hello".to_string()).unwrap();
/// assert_eq!(injector.construct::<Greeter>().unwrap().0, "hello");
/// ```
#[derive(Default)]
pub struct ManifestRegistry {
    entries: RwLock<TokenMap<Manifest>>,
    fallback: Option<Arc<dyn ManifestSource>>,
}

impl ManifestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry that asks `fallback` for targets it has no entry for.
    pub fn with_fallback(fallback: Arc<dyn ManifestSource>) -> Self {
        Self {
            entries: RwLock::new(TokenMap::default()),
            fallback: Some(fallback),
        }
    }

    /// Records the manifest for the target identified by `id`.
    pub fn register(&self, id: impl Into<Token>, manifest: impl Into<Manifest>) -> &Self {
        self.entries.write().insert(id.into(), manifest.into());
        self
    }

    pub fn register_class<T: Constructable>(&self, manifest: impl Into<Manifest>) -> &Self {
        self.register(Token::of::<T>(), manifest)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl ManifestSource for ManifestRegistry {
    fn manifest(&self, target: &Target) -> Option<Manifest> {
        if let Some(found) = self.entries.read().get(target.id()) {
            return Some(found.clone());
        }
        self.fallback.as_ref().and_then(|f| f.manifest(target))
    }
}

impl fmt::Debug for ManifestRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManifestRegistry")
            .field("entries", &self.entries.read().len())
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}
