//! Receiver demo: constructing a type from a declared manifest
//!
//! This example demonstrates:
//! - Binding a constant under a string token
//! - Declaring a type's dependencies with a manifest
//! - Constructing directly with `construct` and through a singleton binding
//! - Logging resolutions with `tracing`

use ferrous_injector::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

struct Receiver {
    num: Arc<i32>,
}

impl Receiver {
    fn sum(&self, other: i32) -> i32 {
        *self.num + other
    }
}

impl Constructable for Receiver {
    fn manifest() -> Option<Manifest> {
        Some(manifest!["NUM"])
    }

    fn construct(args: &mut Arguments) -> DiResult<Self> {
        Ok(Receiver { num: args.next()? })
    }
}

fn main() -> DiResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let injector = Injector::builder()
        .root()
        .observer(Arc::new(LoggingObserver::with_scope("demo")))
        .build();

    injector.bind_constant("NUM", 6i32)?;

    let receiver = injector.construct::<Receiver>()?;
    println!("receiver.sum(5) = {}", receiver.sum(5));

    injector.bind_class_as::<Receiver>("receiver", true)?;
    let shared = injector.get::<Receiver>("receiver")?;
    let again = injector.get::<Receiver>("receiver")?;
    println!("singleton reused: {}", Arc::ptr_eq(&shared, &again));

    for descriptor in injector.descriptors() {
        println!("{} -> {:?} ({:?})", descriptor.token, descriptor.kind, descriptor.lifetime);
    }

    Ok(())
}
