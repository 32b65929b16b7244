use super::*;

use crate::primitive::{Closure, Number, ToSymbol};


fn int(i: i64) -> Sexp {
    Number::Integer(i).into()
}

#[test]
fn chain_lookup() {
    let mut env = MemEnv::new();
    let root = env.root();
    let child = env.derive(root);
    let grandchild = env.derive(child);

    env.define(root, "a".to_symbol(), int(1));
    env.define(child, "b".to_symbol(), int(2));

    assert_eq!(env.lookup(grandchild, "a"), Some(&int(1)));
    assert_eq!(env.lookup(grandchild, "b"), Some(&int(2)));
    assert_eq!(env.lookup(root, "b"), None);
    assert_eq!(env.lookup(grandchild, "c"), None);
    assert_eq!(env.parent(grandchild), Some(child));
    assert_eq!(env.parent(root), None);
}

#[test]
fn shadowing() {
    let mut env = MemEnv::new();
    let root = env.root();
    let child = env.derive(root);

    env.define(root, "x".to_symbol(), int(1));
    env.define(child, "x".to_symbol(), int(2));
    assert_eq!(env.lookup(child, "x"), Some(&int(2)));
    assert_eq!(env.lookup(root, "x"), Some(&int(1)));

    env.define(root, "x".to_symbol(), int(3));
    assert_eq!(env.lookup(root, "x"), Some(&int(3)));
}

#[test]
fn mutate_where_found() {
    let mut env = MemEnv::new();
    let root = env.root();
    let child = env.derive(root);
    env.define(root, "x".to_symbol(), int(1));

    assert_eq!(env.resolve(child, "x"), Some(root));
    *env.lookup_mut(child, "x").unwrap() = int(5);
    assert_eq!(env.lookup(root, "x"), Some(&int(5)));
    assert!(env.symbols(child).next().is_none());

    assert!(env.lookup_mut(child, "y").is_none());
}

#[test]
fn release_uncaptured() {
    let mut env = MemEnv::new();
    let root = env.root();

    let a = env.derive(root);
    let b = env.derive(a);
    assert_eq!(env.frame_count(), 3);
    env.release(b);
    env.release(a);
    assert_eq!(env.frame_count(), 1);

    // Root is never released, and freed slots are reused.
    env.release(root);
    assert_eq!(env.frame_count(), 1);
    assert_eq!(env.derive(root), a);
}

#[test]
fn release_keeps_captured() {
    let mut env = MemEnv::new();
    let root = env.root();

    let a = env.derive(root);
    env.define(a, "kept".to_symbol(), int(7));
    let held = env.capture(a);
    assert_eq!(held.id(), a);
    assert_eq!(env.capture(a), held);
    env.release(a);

    assert_eq!(env.frame_count(), 2);
    assert_eq!(env.lookup(held.id(), "kept"), Some(&int(7)));
}

#[test]
fn collect_unreferenced() {
    let mut env = MemEnv::new();
    let root = env.root();

    let a = env.derive(root);
    let held = env.capture(a);
    env.release(a);
    let b = env.derive(root);
    env.capture(b);
    env.release(b);
    assert!(env.has_captured());

    assert_eq!(env.collect(), 1);
    assert_eq!(env.frame_count(), 2);
    assert_eq!(env.parent(held.id()), Some(root));

    drop(held);
    assert_eq!(env.collect(), 1);
    assert_eq!(env.frame_count(), 1);
    assert!(!env.has_captured());
}

#[test]
fn collect_follows_bindings() {
    let mut env = MemEnv::new();
    let root = env.root();

    // root binds a closure over a; a's child b is only reachable as a's
    // closure's environment parent.
    let a = env.derive(root);
    let over_a = Closure::new(vec![], int(1), env.capture(a));
    env.define(root, "f".to_symbol(), over_a.into());
    env.release(a);
    let b = env.derive(a);
    let over_b = Closure::new(vec![], int(2), env.capture(b));
    env.define(root, "g".to_symbol(), list!(list!(over_b)));
    env.release(b);

    assert_eq!(env.collect(), 0);
    assert_eq!(env.frame_count(), 3);

    env.define(root, "g".to_symbol(), int(0));
    assert_eq!(env.collect(), 1);
    env.define(root, "f".to_symbol(), int(0));
    assert_eq!(env.collect(), 1);
    assert_eq!(env.frame_count(), 1);
}

#[test]
fn collect_self_referencing_frame() {
    let mut env = MemEnv::new();
    let root = env.root();

    // A closure stored in the very frame it captured.
    let a = env.derive(root);
    let recur = Closure::new(vec![], int(1), env.capture(a));
    env.define(a, "recur".to_symbol(), recur.into());
    env.release(a);
    assert_eq!(env.frame_count(), 2);

    assert_eq!(env.collect(), 1);
    assert_eq!(env.frame_count(), 1);
}

#[test]
fn collect_keeps_externally_held_lists() {
    let mut env = MemEnv::new();
    let root = env.root();

    let a = env.derive(root);
    let over_a = Closure::new(vec![], int(1), env.capture(a));
    env.release(a);
    let outside = list!(over_a);
    let b = env.derive(root);
    env.capture(b);
    env.define(b, "shared".to_symbol(), outside.clone());
    env.release(b);

    // b is garbage, but the list it binds is also held here, and that keeps
    // a alive.
    assert_eq!(env.collect(), 1);
    assert_eq!(env.frame_count(), 2);

    drop(outside);
    assert_eq!(env.collect(), 1);
    assert_eq!(env.frame_count(), 1);
}
