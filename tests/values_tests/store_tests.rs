//! Value Store Tests
//!
//! These tests verify:
//! - In-memory store operations
//! - Snapshot persistence and reload
//! - Flush strategies
//! - Corruption detection

use std::fs;
use std::sync::Arc;
use std::thread;

use binsensor_cc::config::FlushStrategy;
use binsensor_cc::values::{FileStore, MemoryStore, ValueStore};
use binsensor_cc::CcError;
use tempfile::TempDir;

// =============================================================================
// MemoryStore Tests
// =============================================================================

#[test]
fn test_memory_set_get_remove() {
    let store = MemoryStore::new();
    assert!(store.is_empty());

    store.set(b"key".to_vec(), b"value".to_vec()).unwrap();
    assert_eq!(store.get(b"key").unwrap(), Some(b"value".to_vec()));
    assert_eq!(store.entry_count(), 1);

    assert!(store.remove(b"key").unwrap());
    assert!(!store.remove(b"key").unwrap());
    assert_eq!(store.get(b"key").unwrap(), None);
}

#[test]
fn test_memory_overwrite() {
    let store = MemoryStore::new();
    store.set(b"key".to_vec(), b"one".to_vec()).unwrap();
    store.set(b"key".to_vec(), b"two".to_vec()).unwrap();

    assert_eq!(store.entry_count(), 1);
    assert_eq!(store.get(b"key").unwrap(), Some(b"two".to_vec()));
}

#[test]
fn test_memory_concurrent_writers() {
    let store = Arc::new(MemoryStore::new());

    let handles: Vec<_> = (0..4u8)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..50u8 {
                    store.set(vec![t, i], vec![i]).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.entry_count(), 200);
}

// =============================================================================
// FileStore Tests
// =============================================================================

#[test]
fn test_file_store_persists_across_reopen() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("values.bin");

    {
        let store = FileStore::open(&path, FlushStrategy::EveryWrite).unwrap();
        store.set(b"a".to_vec(), b"1".to_vec()).unwrap();
        store.set(b"b".to_vec(), b"2".to_vec()).unwrap();
        store.remove(b"a").unwrap();
    }

    let store = FileStore::open(&path, FlushStrategy::EveryWrite).unwrap();
    assert_eq!(store.get(b"a").unwrap(), None);
    assert_eq!(store.get(b"b").unwrap(), Some(b"2".to_vec()));
    assert_eq!(store.entry_count(), 1);
}

#[test]
fn test_file_store_creates_parent_directories() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("dir").join("values.bin");

    let store = FileStore::open(&path, FlushStrategy::EveryWrite).unwrap();
    store.set(b"k".to_vec(), b"v".to_vec()).unwrap();

    assert!(path.exists());
}

#[test]
fn test_file_store_manual_flush() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("values.bin");

    let store = FileStore::open(&path, FlushStrategy::Manual).unwrap();
    store.set(b"k".to_vec(), b"v".to_vec()).unwrap();
    assert_eq!(store.pending_writes(), 1);
    assert!(!path.exists());

    store.close().unwrap();
    assert!(path.exists());

    let reopened = FileStore::open(&path, FlushStrategy::Manual).unwrap();
    assert_eq!(reopened.get(b"k").unwrap(), Some(b"v".to_vec()));
}

#[test]
fn test_file_store_every_n_writes() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("values.bin");

    let store = FileStore::open(&path, FlushStrategy::EveryNWrites { count: 3 }).unwrap();
    store.set(b"1".to_vec(), vec![]).unwrap();
    store.set(b"2".to_vec(), vec![]).unwrap();
    assert!(!path.exists());
    assert_eq!(store.pending_writes(), 2);

    store.set(b"3".to_vec(), vec![]).unwrap();
    assert!(path.exists());
    assert_eq!(store.pending_writes(), 0);
}

#[test]
fn test_file_store_detects_crc_corruption() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("values.bin");

    {
        let store = FileStore::open(&path, FlushStrategy::EveryWrite).unwrap();
        store.set(b"key".to_vec(), b"value".to_vec()).unwrap();
    }

    let mut bytes = fs::read(&path).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    fs::write(&path, &bytes).unwrap();

    match FileStore::open(&path, FlushStrategy::EveryWrite) {
        Err(CcError::StoreCorruption(_)) => {}
        Err(e) => panic!("Expected StoreCorruption, got {:?}", e),
        Ok(_) => panic!("Expected StoreCorruption, got a store"),
    }
}

#[test]
fn test_file_store_detects_truncated_header() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("values.bin");
    fs::write(&path, b"BSC").unwrap();

    assert!(matches!(
        FileStore::open(&path, FlushStrategy::EveryWrite),
        Err(CcError::StoreCorruption(_))
    ));
}

#[test]
fn test_file_store_rejects_foreign_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("values.bin");
    fs::write(&path, b"definitely not a snapshot file").unwrap();

    assert!(matches!(
        FileStore::open(&path, FlushStrategy::EveryWrite),
        Err(CcError::StoreCorruption(_))
    ));
}
