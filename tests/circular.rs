use ferrous_injector::{
    manifest, Arguments, Constructable, DiError, DiResult, Factory, Injector, Manifest,
    DEFAULT_MAX_DEPTH,
};
use std::sync::Arc;

#[derive(Debug)]
struct ServiceA {
    _b: Arc<ServiceB>,
}

#[derive(Debug)]
struct ServiceB {
    _a: Arc<ServiceA>,
}

impl Constructable for ServiceA {
    fn manifest() -> Option<Manifest> {
        Some(manifest!["B"])
    }

    fn construct(args: &mut Arguments) -> DiResult<Self> {
        Ok(ServiceA { _b: args.next()? })
    }
}

impl Constructable for ServiceB {
    fn manifest() -> Option<Manifest> {
        Some(manifest!["A"])
    }

    fn construct(args: &mut Arguments) -> DiResult<Self> {
        Ok(ServiceB { _a: args.next()? })
    }
}

fn bind_cycle(injector: &Injector, singleton: bool) {
    injector.bind_class_as::<ServiceA>("A", singleton).unwrap();
    injector.bind_class_as::<ServiceB>("B", singleton).unwrap();
}

#[test]
fn test_circular_dependency_detection() {
    let injector = Injector::root();
    bind_cycle(&injector, false);

    match injector.get::<ServiceA>("A") {
        Err(DiError::Circular(path)) => assert_eq!(path, vec!["A", "B", "A"]),
        other => panic!("Expected circular dependency error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_circular_singletons_do_not_deadlock() {
    let injector = Injector::root();
    bind_cycle(&injector, true);

    assert!(matches!(injector.get::<ServiceB>("B"), Err(DiError::Circular(_))));
    // the failed attempt leaves nothing cached and the guard stack clean
    assert!(matches!(injector.get::<ServiceB>("B"), Err(DiError::Circular(_))));
}

#[test]
fn test_self_dependency() {
    let injector = Injector::root();
    injector
        .bind_factory(
            "me",
            Factory::new(|args| Ok(*args.next::<u8>()?)).with_manifest(["me"]),
            false,
        )
        .unwrap();

    match injector.get::<u8>("me") {
        Err(DiError::Circular(path)) => assert_eq!(path, vec!["me", "me"]),
        other => panic!("Expected circular dependency error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_cycle_message_lists_path() {
    let injector = Injector::root();
    bind_cycle(&injector, false);

    let err = injector.get::<ServiceA>("A").unwrap_err();
    assert_eq!(err.to_string(), "Circular dependency: A -> B -> A");
}

#[test]
fn test_diamond_is_not_a_cycle() {
    let injector = Injector::root();
    injector.bind_constant("base", 1u32).unwrap();
    injector
        .bind_factory("left", Factory::new(|a| Ok(*a.next::<u32>()? + 1)).with_manifest(["base"]), false)
        .unwrap();
    injector
        .bind_factory("right", Factory::new(|a| Ok(*a.next::<u32>()? + 2)).with_manifest(["base"]), false)
        .unwrap();

    let top = Factory::new(|a| Ok(*a.next::<u32>()? + *a.next::<u32>()?)).with_manifest(["left", "right"]);
    assert_eq!(*injector.invoke::<u32>(&top).unwrap(), 5);
}

#[test]
fn test_depth_limit() {
    let injector = Injector::builder().root().max_depth(3).build();
    injector.bind_constant("t0", 0u32).unwrap();
    for i in 1..6 {
        let previous = format!("t{}", i - 1);
        injector
            .bind_factory(
                format!("t{}", i),
                Factory::new(|a| Ok(*a.next::<u32>()? + 1)).with_manifest([previous]),
                false,
            )
            .unwrap();
    }

    assert_eq!(*injector.get::<u32>("t2").unwrap(), 2);
    assert!(matches!(injector.get::<u32>("t5"), Err(DiError::DepthExceeded(3))));
}

fn bind_chain(injector: &Injector, length: usize) {
    injector.bind_constant("t0", 0u32).unwrap();
    for i in 1..=length {
        let previous = format!("t{}", i - 1);
        injector
            .bind_factory(
                format!("t{}", i),
                Factory::new(|a| Ok(*a.next::<u32>()? + 1)).with_manifest([previous]),
                false,
            )
            .unwrap();
    }
}

#[test]
fn test_default_depth_limit_fails_before_stack_overflow() {
    let injector = Injector::root();
    bind_chain(&injector, DEFAULT_MAX_DEPTH + 1);

    let within = format!("t{}", DEFAULT_MAX_DEPTH - 1);
    assert_eq!(*injector.get::<u32>(within.as_str()).unwrap(), (DEFAULT_MAX_DEPTH - 1) as u32);

    let over = format!("t{}", DEFAULT_MAX_DEPTH + 1);
    match injector.get::<u32>(over.as_str()) {
        Err(DiError::DepthExceeded(limit)) => assert_eq!(limit, DEFAULT_MAX_DEPTH),
        other => panic!("Expected DepthExceeded, got {:?}", other.map(|v| *v)),
    }
}

#[test]
fn test_recovers_after_error() {
    let injector = Injector::root();
    bind_cycle(&injector, false);
    injector.bind_constant("ok", 1u8).unwrap();

    let _ = injector.get::<ServiceA>("A");
    assert_eq!(*injector.get::<u8>("ok").unwrap(), 1);
}
