/// Property-based tests for token resolution
///
/// These tests check that resolution follows the hierarchy rules regardless
/// of the names, values and depths involved.

use ferrous_injector::{DiError, Factory, Injector, Token};
use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

// Property: a constant resolves to the value it was bound with, as the same instance
proptest! {
    #[test]
    fn constant_resolution_consistency(name in "[a-zA-Z_][a-zA-Z0-9_.]{0,20}", value in any::<i64>()) {
        let injector = Injector::root();
        injector.bind_constant(name.as_str(), value).unwrap();

        let first = injector.get::<i64>(name.as_str()).unwrap();
        let second = injector.get::<i64>(name.as_str()).unwrap();

        prop_assert_eq!(*first, value);
        prop_assert!(Arc::ptr_eq(&first, &second));
    }
}

// Property: resolve returns one value per token, in input order
proptest! {
    #[test]
    fn resolve_preserves_arity_and_order(
        values in prop::collection::hash_map("[a-z]{1,8}", any::<u32>(), 1..10),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..20),
    ) {
        let injector = Injector::root();
        let keys: Vec<String> = values.keys().cloned().collect();
        for (key, value) in &values {
            injector.bind_constant(key.as_str(), *value).unwrap();
        }

        let requested: Vec<String> = picks.iter().map(|i| keys[i.index(keys.len())].clone()).collect();
        let tokens: Vec<Token> = requested.iter().map(|k| Token::from(k.as_str())).collect();
        let resolved = injector.resolve(&tokens).unwrap();

        prop_assert_eq!(resolved.len(), tokens.len());
        for (key, value) in requested.iter().zip(resolved) {
            let value = value.downcast::<u32>().unwrap();
            prop_assert_eq!(*value, values[key]);
        }
    }
}

// Property: the nearest binding on the path to the root wins
proptest! {
    #[test]
    fn nearest_binding_wins(
        depth in 1usize..8,
        bound_levels in prop::collection::btree_set(0usize..8, 0..8),
    ) {
        let mut chain = vec![Injector::root()];
        for _ in 0..depth {
            let child = chain.last().unwrap().spawn();
            chain.push(child);
        }
        for level in bound_levels.iter().copied().filter(|l| *l <= depth) {
            chain[level].bind_constant("value", level).unwrap();
        }

        let leaf = chain.last().unwrap();
        let expected = bound_levels.iter().copied().filter(|l| *l <= depth).max();
        match (leaf.get::<usize>("value"), expected) {
            (Ok(found), Some(level)) => prop_assert_eq!(*found, level),
            (Err(DiError::Unresolved(_)), None) => {}
            (other, expected) => prop_assert!(false, "unexpected {:?} for {:?}", other.map(|v| *v), expected),
        }
    }
}

// Property: bindings never leak from a child to any ancestor
proptest! {
    #[test]
    fn child_bindings_stay_local(names in prop::collection::hash_set("[a-z]{1,6}", 1..10)) {
        let root = Injector::root();
        let child = root.spawn();
        for name in &names {
            child.bind_constant(name.as_str(), ()).unwrap();
        }
        for name in &names {
            prop_assert!(!root.is_resolvable(&Token::from(name.as_str())));
            prop_assert!(child.contains(&Token::from(name.as_str())));
        }
    }
}

// Property: a transient factory runs once per resolution
proptest! {
    #[test]
    fn transient_factory_call_count(resolutions in 0usize..30) {
        let injector = Injector::root();
        let calls = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = calls.clone();
        injector
            .bind_factory(
                "n",
                Factory::new(move |_| Ok(counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst)))
                    .with_manifest(Vec::<Token>::new()),
                false,
            )
            .unwrap();

        let mut seen = HashMap::new();
        for _ in 0..resolutions {
            let value = injector.get::<usize>("n").unwrap();
            *seen.entry(*value).or_insert(0) += 1;
        }
        prop_assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), resolutions);
        prop_assert!(seen.values().all(|count| *count == 1));
    }
}
