/// Lazy default initialization of the global injector
///
/// Lives in its own test binary so that no other test has touched the global
/// injector first.

use ferrous_injector::{global, global_state, set_global, DiError, GlobalState, Injector};

#[test]
fn test_first_read_defaults_and_locks() {
    assert_eq!(global_state(), GlobalState::Uninitialized);

    // Injector::new reads the global, which creates an empty root
    let child = Injector::new();
    assert_eq!(global_state(), GlobalState::DefaultInitialized);
    assert!(global().parent().is_none());
    assert!(global().is_empty());
    assert!(Injector::ptr_eq(child.parent().unwrap(), global()));
    assert_eq!(child.depth(), 1);

    // the default global can no longer be replaced
    assert!(matches!(set_global(Injector::root()), Err(DiError::GlobalAlreadySet)));

    // but it can still be bound to, and children see it
    global().bind_constant("shared", "from global").unwrap();
    assert_eq!(*child.get::<&str>("shared").unwrap(), "from global");
    assert!(Injector::ptr_eq(global(), global()));
}
