//! Persistent key-value storage collaborator
//!
//! The store persists as a single JSON blob under a namespace. Where and when
//! the blob becomes durable is the storage implementation's concern; the
//! store only calls `set` after every mutation.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::rc::Rc;

use thiserror::Error;

/// Errors raised by a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("could not determine the configuration directory")]
    NoConfigDir,
}

/// Namespaced blob storage
pub trait Storage {
    /// Read the blob stored under `namespace`, if any
    fn get(&self, namespace: &str) -> Result<Option<String>, StorageError>;

    /// Replace the blob stored under `namespace`
    fn set(&mut self, namespace: &str, blob: &str) -> Result<(), StorageError>;
}

/// In-memory storage
///
/// Clones share the same underlying map, so a caller can keep a handle and
/// inspect what the store committed.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    blobs: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage pre-seeded with one blob
    pub fn with_blob(namespace: &str, blob: impl Into<String>) -> Self {
        let storage = Self::new();
        storage
            .blobs
            .borrow_mut()
            .insert(namespace.to_string(), blob.into());
        storage
    }

    /// Current blob under `namespace` (for inspection)
    pub fn blob(&self, namespace: &str) -> Option<String> {
        self.blobs.borrow().get(namespace).cloned()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, namespace: &str) -> Result<Option<String>, StorageError> {
        Ok(self.blob(namespace))
    }

    fn set(&mut self, namespace: &str, blob: &str) -> Result<(), StorageError> {
        self.blobs
            .borrow_mut()
            .insert(namespace.to_string(), blob.to_string());
        Ok(())
    }
}
