#![no_main]

use ferrous_inject::{Container, DiError, Injection, Lifetime, ResolverCore, TypeKey};
use libfuzzer_sys::fuzz_target;
use std::sync::Arc;

const NAMES: [&str; 4] = ["a", "b", "c", "d"];

fn key_for(byte: u8) -> TypeKey {
    match byte % 5 {
        0 => TypeKey::of::<u32>(),
        n => TypeKey::named::<u32>(NAMES[(n - 1) as usize]),
    }
}

fn lifetime_for(byte: u8) -> Lifetime {
    if byte & 0x80 == 0 {
        Lifetime::Singleton
    } else {
        Lifetime::Transient
    }
}

// Interprets the input as a stream of (op, arg) pairs against a small
// container hierarchy; resolution must never panic and must agree with
// can_resolve.
fuzz_target!(|data: &[u8]| {
    let mut containers = vec![Container::new()];

    for pair in data.chunks_exact(2) {
        let (op, arg) = (pair[0], pair[1]);
        let current = containers[(op as usize >> 4) % containers.len()].clone();
        let key = key_for(arg);

        match op % 6 {
            0 => {
                match key.service_name() {
                    Some(name) => current.add_named_value(name, arg as u32),
                    None => current.add_value(arg as u32),
                };
            }
            1 => {
                let value = arg as u32;
                match key.service_name() {
                    Some(name) => current.add_named_factory(name, lifetime_for(arg), move || value),
                    None => current.add_transient_factory(move || value),
                };
            }
            2 => {
                // Depends on another key, possibly itself
                let dependency = key_for(arg.rotate_left(3));
                let name = key.service_name().unwrap_or("self");
                let plan = Injection::new().key(dependency);
                let _ = current.add_named_injected_factory(
                    name,
                    plan,
                    lifetime_for(arg),
                    |v: Arc<u32>| v.wrapping_add(1),
                );
            }
            3 => {
                if containers.len() < 8 {
                    containers.push(current.create_child());
                }
            }
            _ => {
                let can = current.can_resolve_key(&key);
                match current.resolve_any(&key) {
                    Ok(instance) => {
                        assert!(can);
                        assert!(instance.downcast::<u32>().is_ok());
                    }
                    Err(DiError::NotFound(_)) => {}
                    Err(DiError::Circular(path)) => {
                        assert!(can);
                        assert!(path.len() >= 2);
                        assert_eq!(path.first(), path.last());
                    }
                    Err(other) => panic!("unexpected error: {}", other),
                }
            }
        }
    }
});
