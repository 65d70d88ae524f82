/// Concurrent access integration tests
///
/// These tests verify that ferrous-inject behaves correctly under concurrent
/// access: singletons built once, transients built per call, registration
/// racing with resolution.

use ferrous_inject::{Constructors, Container, Injectable, Lifetime, Resolver};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};
use std::thread;
use std::time::Duration;

const THREADS: usize = 16;

#[derive(Debug)]
struct Expensive {
    serial: usize,
}

#[test]
fn test_singleton_built_once_across_threads() {
    let built = Arc::new(AtomicUsize::new(0));
    let built_clone = built.clone();

    let container = Container::new();
    container.add_singleton_factory(move || {
        let serial = built_clone.fetch_add(1, Ordering::SeqCst);
        // Widen the race window
        thread::sleep(Duration::from_millis(20));
        Expensive { serial }
    });

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let container = container.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                container.resolve::<Expensive>().unwrap()
            })
        })
        .collect();

    let results: Vec<Arc<Expensive>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(built.load(Ordering::SeqCst), 1);
    assert!(results.iter().all(|r| Arc::ptr_eq(r, &results[0])));
    assert_eq!(results[0].serial, 0);
}

#[test]
fn test_transient_built_per_resolution_across_threads() {
    let counter = Arc::new(AtomicUsize::new(0));
    let counter_clone = counter.clone();

    let container = Container::new();
    container.add_transient_factory(move || counter_clone.fetch_add(1, Ordering::SeqCst) as u64);

    let seen = Mutex::new(Vec::new());
    crossbeam_utils::thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|_| {
                let value = *container.resolve::<u64>().unwrap();
                seen.lock().unwrap().push(value);
            });
        }
    })
    .unwrap();

    let mut seen = seen.into_inner().unwrap();
    seen.sort_unstable();
    assert_eq!(seen, (0..THREADS as u64).collect::<Vec<_>>());
}

struct Leaf;
struct Branch {
    leaf: Arc<Leaf>,
}

impl Injectable for Leaf {
    fn constructors() -> Constructors<Self> {
        Constructors::single(|| Leaf)
    }
}

impl Injectable for Branch {
    fn constructors() -> Constructors<Self> {
        Constructors::single(|leaf: Arc<Leaf>| Branch { leaf })
    }
}

#[test]
fn test_nested_singletons_resolve_concurrently() {
    let container = Container::new();
    container.add_singleton_class::<Leaf>().unwrap();
    container.add_transient_class::<Branch>().unwrap();

    let barrier = Barrier::new(THREADS);
    let branches = Mutex::new(Vec::new());
    crossbeam_utils::thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|_| {
                barrier.wait();
                let branch = container.resolve::<Branch>().unwrap();
                branches.lock().unwrap().push(branch);
            });
        }
    })
    .unwrap();

    let branches = branches.into_inner().unwrap();
    assert_eq!(branches.len(), THREADS);
    assert!(branches.iter().all(|b| Arc::ptr_eq(&b.leaf, &branches[0].leaf)));
}

#[test]
fn test_registration_races_with_resolution() {
    let container = Container::new();
    container.add_value(0usize);

    crossbeam_utils::thread::scope(|s| {
        s.spawn(|_| {
            for i in 0..200usize {
                container.add_value(i);
                container.add_named_factory("square", Lifetime::Transient, move || i * i);
            }
        });
        for _ in 0..4 {
            s.spawn(|_| {
                for _ in 0..200 {
                    assert!(container.resolve::<usize>().is_ok());
                    if let Ok(square) = container.resolve_named::<usize>("square") {
                        let root = (*square as f64).sqrt() as usize;
                        assert_eq!(root * root, *square);
                    }
                }
            });
        }
    })
    .unwrap();

    assert_eq!(*container.resolve::<usize>().unwrap(), 199);
    assert_eq!(*container.resolve_named::<usize>("square").unwrap(), 199 * 199);
}

#[test]
fn test_children_created_concurrently_are_isolated() {
    let parent = Container::new();
    parent.add_value(String::from("shared"));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let parent = parent.clone();
            thread::spawn(move || {
                let child = parent.create_child();
                child.add_value(i);
                assert_eq!(child.resolve::<String>().unwrap().as_str(), "shared");
                *child.resolve::<usize>().unwrap()
            })
        })
        .collect();

    let mut values: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    values.sort_unstable();
    assert_eq!(values, (0..THREADS).collect::<Vec<_>>());
    assert!(!parent.can_resolve::<usize>());
}

#[test]
fn test_cycle_detection_is_per_thread() {
    // Two threads resolving the same transient chain must not see each other's frames
    let container = Container::new();
    container.add_value(1u8);
    container.add_transient_factory(|b: Arc<u8>| {
        thread::sleep(Duration::from_millis(5));
        *b as u16
    });
    container.add_transient_factory(|c: Arc<u16>| *c as u32);

    let barrier = Barrier::new(THREADS);
    crossbeam_utils::thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|_| {
                barrier.wait();
                assert_eq!(*container.resolve::<u32>().unwrap(), 1);
            });
        }
    })
    .unwrap();
}
