//! # ferrous-injector
//!
//! Hierarchical, token-keyed dependency injection for Rust.
//!
//! ## Features
//!
//! - **Tokens**: bind by string name, unique [`Symbol`], or type identity
//! - **Three provider strategies**: constants, factories and classes, each
//!   factory or class provider optionally a singleton
//! - **Hierarchies**: child injectors delegate unresolved tokens to their
//!   parent, a parent never sees a child's bindings
//! - **Explicit manifests**: dependency lists come from a pluggable
//!   [`ManifestSource`], never from reflection
//! - **Cycle detection**: a provider that needs itself fails with
//!   [`DiError::Circular`] instead of recursing forever
//! - **Global injector**: an init-once process-wide root, the default parent
//!   of [`Injector::new`]
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_injector::{manifest, Arguments, Constructable, DiResult, Injector, Manifest};
//! use std::sync::Arc;
//!
//! struct Database {
//!     url: String,
//! }
//!
//! struct UserService {
//!     db: Arc<Database>,
//! }
//!
//! impl Constructable for UserService {
//!     fn manifest() -> Option<Manifest> {
//!         Some(manifest!["db"])
//!     }
//!
//!     fn construct(args: &mut Arguments) -> DiResult<Self> {
//!         Ok(UserService { db: args.next()? })
//!     }
//! }
//!
//! let injector = Injector::root();
//! injector.bind_constant("db", Database { url: "postgres://localhost".to_string() })?;
//! injector.bind_class::<UserService>(true)?;
//!
//! let users = injector.get_type::<UserService>()?;
//! assert_eq!(users.db.url, "postgres://localhost");
//! # Ok::<(), ferrous_injector::DiError>(())
//! ```
//!
//! ## Hierarchies
//!
//! ```rust
//! use ferrous_injector::Injector;
//!
//! let root = Injector::root();
//! root.bind_constant("NUM", 6i32).unwrap();
//!
//! let child = root.spawn();
//! child.bind_constant("NUM", 7i32).unwrap();
//!
//! assert_eq!(*child.get::<i32>("NUM").unwrap(), 7);
//! assert_eq!(*root.get::<i32>("NUM").unwrap(), 6);
//! ```
//!
//! ## Lifetimes
//!
//! - **Singleton**: constructed on first resolution and cached by the provider
//! - **Transient**: constructed on every resolution
//!
//! Constants are always singletons.

pub mod binding;
pub mod config;
pub mod descriptors;
pub mod error;
pub mod global;
pub mod injector;
pub mod lifetime;
pub mod manifest;
pub mod observer;
pub mod provider;
pub mod target;
pub mod token;

mod internal;
mod registration;

pub use binding::{Binding, BindingSpec};
pub use config::{DuplicatePolicy, InjectorOptions, DEFAULT_MAX_DEPTH};
pub use descriptors::BindingDescriptor;
pub use error::{DiError, DiResult};
pub use global::{global, global_state, set_global, GlobalState};
pub use injector::{Injector, InjectorBuilder};
pub use lifetime::Lifetime;
pub use manifest::{DeclaredManifests, Manifest, ManifestRegistry, ManifestSource};
pub use observer::{InjectorObserver, LoggingObserver, MetricsObserver};
pub use provider::{ClassProvider, ConstantProvider, FactoryProvider, Provider, ProviderKind};
pub use registration::AnyArc;
pub use target::{Arguments, Class, Constructable, Factory, Target};
pub use token::{Symbol, Token};
