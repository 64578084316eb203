//! Tests for the storage building blocks
//!
//! These tests verify:
//! - Path resolution and lexical normalization
//! - Record encoding (tab-indented, newline-terminated)
//! - Lock registry lookup-or-create semantics

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Barrier};
use std::thread;

use atlasdoc::storage::{normalize, LockRegistry, PathResolver, RecordCodec};
use atlasdoc::AtlasError;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Point {
    x: i32,
    y: i32,
}

// =============================================================================
// Path Resolver Tests
// =============================================================================

#[test]
fn test_record_and_temp_paths() {
    let resolver = PathResolver::new("/data/db");

    assert_eq!(resolver.collection_dir("users"), PathBuf::from("/data/db/users"));
    assert_eq!(
        resolver.record_path("users", "Kamo"),
        PathBuf::from("/data/db/users/Kamo.json")
    );
    assert_eq!(
        resolver.temp_path("users", "Kamo"),
        PathBuf::from("/data/db/users/Kamo.json.tmp")
    );

    let (final_path, temp_path) = resolver.record_paths("users", "Kamo");
    assert_eq!(final_path, resolver.record_path("users", "Kamo"));
    assert_eq!(temp_path, resolver.temp_path("users", "Kamo"));
}

#[test]
fn test_resolver_normalizes_root() {
    let resolver = PathResolver::new("/data/./db/../db/");
    assert_eq!(resolver.root(), Path::new("/data/db"));
}

#[test]
fn test_normalize() {
    assert_eq!(normalize(Path::new("a/./b/../c")), PathBuf::from("a/c"));
    assert_eq!(normalize(Path::new("./")), PathBuf::from("."));
    assert_eq!(normalize(Path::new("")), PathBuf::from("."));
    assert_eq!(normalize(Path::new("../x")), PathBuf::from("../x"));
    assert_eq!(normalize(Path::new("a/../../x")), PathBuf::from("../x"));
    assert_eq!(normalize(Path::new("/../x")), PathBuf::from("/x"));
}

#[test]
fn test_resource_name() {
    assert_eq!(
        PathResolver::resource_name(Path::new("/db/users/Kamo.json")),
        Some("Kamo".to_string())
    );
    assert_eq!(PathResolver::resource_name(Path::new("/db/users/Kamo.json.tmp")), None);
    assert_eq!(PathResolver::resource_name(Path::new("/db/users/notes.txt")), None);
    assert_eq!(PathResolver::resource_name(Path::new("/db/users/README")), None);
}

// =============================================================================
// Record Codec Tests
// =============================================================================

#[test]
fn test_encode_is_tab_indented_with_trailing_newline() {
    let bytes = RecordCodec::encode(&Point { x: 1, y: -2 }).unwrap();
    let text = String::from_utf8(bytes).unwrap();

    assert_eq!(text, "{\n\t\"x\": 1,\n\t\"y\": -2\n}\n");
}

#[test]
fn test_encode_decode() {
    let bytes = RecordCodec::encode(&Point { x: 7, y: 9 }).unwrap();
    let point: Point = RecordCodec::decode(&bytes, Path::new("p.json")).unwrap();

    assert_eq!(point, Point { x: 7, y: 9 });
}

#[test]
fn test_encode_unrepresentable_value() {
    let mut map = BTreeMap::new();
    map.insert(vec![1u8, 2], "value");

    let result = RecordCodec::encode(&map);
    assert!(matches!(result, Err(AtlasError::Serialization(_))));
}

#[test]
fn test_decode_wrong_shape_reports_path() {
    let result: Result<Point, _> =
        RecordCodec::decode(b"{\"x\": \"one\"}\n", Path::new("/db/points/p.json"));

    match result {
        Err(AtlasError::Deserialization { path, .. }) => {
            assert_eq!(path, PathBuf::from("/db/points/p.json"));
        }
        other => panic!("expected Deserialization error, got {:?}", other),
    }
}

// =============================================================================
// Lock Registry Tests
// =============================================================================

#[test]
fn test_lock_for_returns_same_lock() {
    let registry = LockRegistry::new();

    let a1 = registry.lock_for("users");
    let a2 = registry.lock_for("users");
    let b = registry.lock_for("orders");

    assert!(Arc::ptr_eq(&a1, &a2));
    assert!(!Arc::ptr_eq(&a1, &b));
    assert_eq!(registry.collection_count(), 2);
    assert!(registry.contains("users"));
    assert!(!registry.contains("items"));
}

#[test]
fn test_lock_for_race_creates_one_lock() {
    let registry = Arc::new(LockRegistry::new());
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                registry.lock_for("fresh")
            })
        })
        .collect();

    let locks: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(registry.collection_count(), 1);
    for lock in &locks[1..] {
        assert!(Arc::ptr_eq(&locks[0], lock));
    }
}

#[test]
fn test_lock_for_equivalent_names_share_lock() {
    let registry = LockRegistry::new();

    let plain = registry.lock_for("users");
    let trailing = registry.lock_for("users/");
    let dotted = registry.lock_for("./users");

    assert!(Arc::ptr_eq(&plain, &trailing));
    assert!(Arc::ptr_eq(&plain, &dotted));
    assert_eq!(registry.collection_count(), 1);
    assert!(registry.contains("users/"));

    let _held = plain.lock();
    assert!(trailing.try_lock().is_none());
}

#[test]
fn test_locks_are_independent() {
    let registry = LockRegistry::new();

    let users = registry.lock_for("users");
    let orders = registry.lock_for("orders");

    let _users_guard = users.lock();
    assert!(orders.try_lock().is_some());
    assert!(users.try_lock().is_none());
}
