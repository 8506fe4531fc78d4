/// Concurrent access integration tests
///
/// These tests verify that injectors behave correctly when shared across
/// threads: singletons construct exactly once, transients stay independent,
/// and binding while other threads resolve is safe.

use crossbeam_utils::thread;
use ferrous_injector::{manifest, Arguments, Constructable, DiResult, Factory, Injector, Manifest};
use serial_test::serial;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::time::Duration;

static SLOW_BUILT: AtomicUsize = AtomicUsize::new(0);

struct SlowService {
    id: usize,
}

impl Constructable for SlowService {
    fn manifest() -> Option<Manifest> {
        Some(manifest![])
    }

    fn construct(_: &mut Arguments) -> DiResult<Self> {
        std::thread::sleep(Duration::from_millis(20));
        Ok(SlowService {
            id: SLOW_BUILT.fetch_add(1, Ordering::SeqCst),
        })
    }
}

#[test]
#[serial]
fn test_singleton_constructed_once_under_contention() {
    SLOW_BUILT.store(0, Ordering::SeqCst);
    let injector = Injector::root();
    injector.bind_class::<SlowService>(true).unwrap();

    let threads = 16;
    let barrier = Barrier::new(threads);

    let ids: Vec<usize> = thread::scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                s.spawn(|_| {
                    barrier.wait();
                    injector.get_type::<SlowService>().unwrap().id
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    })
    .unwrap();

    assert_eq!(SLOW_BUILT.load(Ordering::SeqCst), 1);
    assert!(ids.iter().all(|id| *id == ids[0]));
}

#[test]
#[serial]
fn test_parent_singleton_shared_by_children_on_threads() {
    SLOW_BUILT.store(0, Ordering::SeqCst);
    let root = Injector::root();
    root.bind_class::<SlowService>(true).unwrap();

    let threads = 8;
    let barrier = Barrier::new(threads);

    thread::scope(|s| {
        for _ in 0..threads {
            s.spawn(|_| {
                let child = root.spawn();
                barrier.wait();
                child.get_type::<SlowService>().unwrap();
            });
        }
    })
    .unwrap();

    assert_eq!(SLOW_BUILT.load(Ordering::SeqCst), 1);
}

#[test]
fn test_transient_instances_per_thread() {
    let injector = Injector::root();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    injector
        .bind_factory(
            "request",
            Factory::new(move |_| Ok(counter.fetch_add(1, Ordering::SeqCst))).with_manifest(manifest![]),
            false,
        )
        .unwrap();

    let threads = 8;
    let per_thread = 50;
    thread::scope(|s| {
        for _ in 0..threads {
            s.spawn(|_| {
                for _ in 0..per_thread {
                    injector.get::<usize>("request").unwrap();
                }
            });
        }
    })
    .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), threads * per_thread);
}

#[test]
fn test_bind_while_resolving() {
    let injector = Injector::root();
    injector.bind_constant("stable", 1u32).unwrap();

    thread::scope(|s| {
        s.spawn(|_| {
            for i in 0..200 {
                injector.bind_constant(format!("dynamic-{}", i), i).unwrap();
            }
        });
        for _ in 0..4 {
            s.spawn(|_| {
                for _ in 0..200 {
                    assert_eq!(*injector.get::<u32>("stable").unwrap(), 1);
                }
            });
        }
    })
    .unwrap();

    assert_eq!(injector.len(), 201);
}

#[test]
fn test_factory_may_bind_on_its_own_injector() {
    let injector = Injector::root();
    let handle = injector.clone();
    injector
        .bind_factory(
            "lazy",
            Factory::new(move |_| {
                handle.bind_constant("registered-late", 5u8)?;
                Ok(())
            })
            .with_manifest(manifest![]),
            true,
        )
        .unwrap();

    injector.get::<()>("lazy").unwrap();
    assert_eq!(*injector.get::<u8>("registered-late").unwrap(), 5);
}

#[test]
fn test_cycle_detection_is_per_thread() {
    let injector = Injector::root();
    let threads = 4;
    let barrier = Arc::new(Barrier::new(threads));
    let gate = barrier.clone();
    injector
        .bind_factory(
            "rendezvous",
            Factory::new(move |_| {
                gate.wait();
                Ok(7u8)
            })
            .with_manifest(manifest![]),
            false,
        )
        .unwrap();

    // every thread has "rendezvous" in progress at the same time, which is not a cycle
    thread::scope(|s| {
        for _ in 0..threads {
            s.spawn(|_| assert_eq!(*injector.get::<u8>("rendezvous").unwrap(), 7));
        }
    })
    .unwrap();
}
