use ferrous_inject::{Container, DiError, Lifetime, Resolver, TypeKey};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, PartialEq)]
struct Settings {
    verbose: bool,
}

#[test]
fn test_value_round_trip() {
    let container = Container::new();
    container.add_value(Settings { verbose: true });

    let a = container.resolve::<Settings>().unwrap();
    let b = container.resolve::<Settings>().unwrap();
    assert_eq!(*a, Settings { verbose: true });
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn test_named_bindings_are_disambiguated() {
    let container = Container::new();
    container.add_value(1u32);
    container.add_named_value("a", 2u32);
    container.add_named_value("b", 3u32);

    assert_eq!(*container.resolve::<u32>().unwrap(), 1);
    assert_eq!(*container.resolve_named::<u32>("a").unwrap(), 2);
    assert_eq!(*container.resolve_named::<u32>("b").unwrap(), 3);
}

#[test]
fn test_unknown_name_is_not_found() {
    let container = Container::new();
    container.add_named_value("a", 2u32);

    match container.resolve_named::<u32>("c") {
        Err(DiError::NotFound(key)) => assert_eq!(key, TypeKey::named::<u32>("c")),
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_named_only_type_has_no_unnamed_binding() {
    let container = Container::new();
    container.add_named_value("a", 2u32);

    assert!(!container.can_resolve::<u32>());
    assert!(matches!(container.resolve::<u32>(), Err(DiError::NotFound(_))));
}

#[test]
fn test_registering_again_replaces() {
    let container = Container::new();
    container.add_value(1u32);
    container.add_value(2u32);
    container.add_named_value("x", 3u32);
    container.add_named_value("x", 4u32);

    assert_eq!(*container.resolve::<u32>().unwrap(), 2);
    assert_eq!(*container.resolve_named::<u32>("x").unwrap(), 4);
    // Self-binding, unnamed u32, named u32
    assert_eq!(container.binding_count(), 3);
}

#[test]
fn test_unresolvable_dependency_fails_fast() {
    struct Missing;
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();

    let container = Container::new();
    container.add_transient_factory(move |_: Arc<Missing>| {
        calls_clone.fetch_add(1, Ordering::SeqCst);
        7u64
    });

    assert!(container.can_resolve::<u64>());
    assert!(!container.can_resolve::<Missing>());
    match container.resolve::<u64>() {
        Err(DiError::NotFound(key)) => assert_eq!(key, TypeKey::of::<Missing>()),
        other => panic!("Expected NotFound, got {:?}", other),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_singleton_factory_runs_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();

    let container = Container::new();
    container.add_singleton_factory(move || {
        calls_clone.fetch_add(1, Ordering::SeqCst);
        String::from("once")
    });

    for _ in 0..5 {
        assert_eq!(container.resolve::<String>().unwrap().as_str(), "once");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_failed_singleton_is_retried() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();

    let container = Container::new();
    container.add_singleton_factory(move |flag: Arc<bool>| {
        calls_clone.fetch_add(1, Ordering::SeqCst);
        *flag as u8
    });

    assert!(container.resolve::<u8>().is_err());
    container.add_value(true);
    assert_eq!(*container.resolve::<u8>().unwrap(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_transient_factory_builds_each_time() {
    let container = Container::new();
    container.add_named_factory("fresh", Lifetime::Transient, || vec![0u8; 4]);

    let a = container.resolve_named::<Vec<u8>>("fresh").unwrap();
    let b = container.resolve_named::<Vec<u8>>("fresh").unwrap();
    assert_eq!(a, b);
    assert!(!Arc::ptr_eq(&a, &b));
}

#[test]
fn test_instances_keep_reference_identity() {
    let shared = Arc::new(Settings { verbose: false });
    let container = Container::new();
    container.add_named_instance("shared", shared.clone());

    let resolved = container.resolve_named::<Settings>("shared").unwrap();
    assert!(Arc::ptr_eq(&resolved, &shared));
}

#[test]
fn test_container_resolves_itself() {
    let container = Container::new();
    let resolved = container.resolve::<Container>().unwrap();
    assert!(resolved.same(&container));
    assert!(container.can_resolve::<Container>());
}

#[test]
#[should_panic(expected = "Failed to resolve")]
fn test_resolve_required_panics_when_missing() {
    let container = Container::new();
    let _ = container.resolve_required::<Settings>();
}

#[test]
fn test_descriptors_describe_bindings() {
    let container = Container::new();
    container.add_named_value("port", 8080u16);
    container.add_transient_factory(|| 1u64);

    let descriptors = container.descriptors();
    assert_eq!(descriptors.len(), 3);

    let port = descriptors.iter().find(|d| d.key == TypeKey::named::<u16>("port")).unwrap();
    assert_eq!(port.lifetime, Lifetime::Singleton);
    assert!(port.is_named());

    let number = descriptors.iter().find(|d| d.key == TypeKey::of::<u64>()).unwrap();
    assert_eq!(number.lifetime, Lifetime::Transient);
}
