//! Hierarchy demo: request injectors layered over an application root
//!
//! This example demonstrates:
//! - A global application injector assigned at startup
//! - Per-request child injectors that shadow and extend the root
//! - Explicit manifests supplied through a `ManifestRegistry`
//! - Counting resolutions and delegations with `MetricsObserver`

use ferrous_injector::*;
use std::sync::Arc;

struct Config {
    greeting: String,
}

struct Handler {
    config: Arc<Config>,
    user: Arc<String>,
}

impl Handler {
    fn respond(&self) -> String {
        format!("{}, {}!", self.config.greeting, self.user)
    }
}

// No declared manifest: the registry below supplies it
impl Constructable for Handler {
    fn construct(args: &mut Arguments) -> DiResult<Self> {
        Ok(Handler {
            config: args.next()?,
            user: args.next()?,
        })
    }
}

fn main() -> DiResult<()> {
    tracing_subscriber::fmt::init();

    let manifests = ManifestRegistry::with_fallback(Arc::new(DeclaredManifests));
    manifests.register_class::<Handler>(manifest![Token::of::<Config>(), "user"]);

    let metrics = Arc::new(MetricsObserver::new());
    let app = Injector::builder()
        .root()
        .manifests(Arc::new(manifests))
        .observer(metrics.clone())
        .build();
    app.bind_constant(Token::of::<Config>(), Config { greeting: "Hello".to_string() })?;
    app.bind_constant("user", "anonymous".to_string())?;
    set_global(app)?;

    for user in ["ada", "grace"] {
        // Injector::new hangs off the global application injector
        let request = Injector::new();
        request.bind_constant("user", user.to_string())?;
        println!("{}", request.construct::<Handler>()?.respond());
    }

    println!("{}", global().construct::<Handler>()?.respond());
    println!(
        "resolutions: {}, delegations: {}",
        metrics.resolution_count(),
        metrics.delegation_count()
    );

    Ok(())
}
