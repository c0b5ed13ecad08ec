//! Store persistence
//!
//! Wraps a [`NicknameStore`] together with the storage collaborator it was
//! loaded from. Every mutation goes through [`PersistentStore::update`] or
//! [`PersistentStore::try_update`], which write the blob back immediately:
//! there is no separate flush step. A mutation whose commit fails is rolled
//! back, so memory never runs ahead of storage.

use tracing::{debug, warn};

use crate::STORAGE_NAMESPACE;
use crate::error::StoreError;
use crate::storage::Storage;
use crate::store::NicknameStore;

/// A nickname store that commits to storage on every mutation
pub struct PersistentStore {
    store: NicknameStore,
    storage: Box<dyn Storage>,
    namespace: String,
}

impl std::fmt::Debug for PersistentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistentStore")
            .field("namespace", &self.namespace)
            .field("nicknames", &self.store.len())
            .field("settings", self.store.settings())
            .finish()
    }
}

impl PersistentStore {
    /// Load the store from the default namespace
    pub fn load(storage: Box<dyn Storage>) -> Self {
        Self::load_from(storage, STORAGE_NAMESPACE)
    }

    /// Load the store from `namespace`, or default it
    ///
    /// Returns a default store if:
    /// - Nothing is stored under the namespace
    /// - The storage backend fails to read
    /// - The blob is not valid JSON for the store layout
    ///
    /// Nothing is written until the first mutation, so an unreadable blob is
    /// left on disk for the user to recover.
    pub fn load_from(storage: Box<dyn Storage>, namespace: &str) -> Self {
        let store = match storage.get(namespace) {
            Ok(Some(blob)) => match NicknameStore::from_json(&blob) {
                Ok(store) => store,
                Err(e) => {
                    warn!(namespace, error = %e, "stored nickname blob is malformed, using defaults");
                    NicknameStore::default()
                }
            },
            Ok(None) => NicknameStore::default(),
            Err(e) => {
                warn!(namespace, error = %e, "failed to read nickname storage, using defaults");
                NicknameStore::default()
            }
        };

        debug!(namespace, nicknames = store.len(), "nickname store loaded");

        Self {
            store,
            storage,
            namespace: namespace.to_string(),
        }
    }

    /// Read access to the current store state
    pub fn store(&self) -> &NicknameStore {
        &self.store
    }

    /// Apply an infallible mutation and commit it
    pub fn update<R>(&mut self, mutate: impl FnOnce(&mut NicknameStore) -> R) -> Result<R, StoreError> {
        self.try_update(|store| Ok::<R, StoreError>(mutate(store)))
    }

    /// Apply a fallible mutation and commit it on success
    ///
    /// The mutation is responsible for leaving the store unchanged when it
    /// fails; nothing is written in that case.
    pub fn try_update<R, E>(
        &mut self,
        mutate: impl FnOnce(&mut NicknameStore) -> Result<R, E>,
    ) -> Result<R, StoreError>
    where
        StoreError: From<E>,
    {
        let snapshot = self.store.clone();
        let result = mutate(&mut self.store)?;
        if let Err(e) = self.commit() {
            warn!(namespace = %self.namespace, error = %e, "commit failed, rolling back");
            self.store = snapshot;
            return Err(e);
        }
        Ok(result)
    }

    /// Write the current state to storage
    pub fn commit(&mut self) -> Result<(), StoreError> {
        let blob = self.store.to_json()?;
        self.storage.set(&self.namespace, &blob)?;
        Ok(())
    }

    /// Drop the in-memory handle, returning the storage collaborator
    pub fn into_storage(self) -> Box<dyn Storage> {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImportError;
    use crate::storage::{MemoryStorage, StorageError};

    struct FailingStorage;

    impl Storage for FailingStorage {
        fn get(&self, _namespace: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::NoConfigDir)
        }

        fn set(&mut self, _namespace: &str, _blob: &str) -> Result<(), StorageError> {
            Err(StorageError::NoConfigDir)
        }
    }

    #[test]
    fn test_load_absent_defaults() {
        let persistent = PersistentStore::load(Box::new(MemoryStorage::new()));
        assert_eq!(persistent.store(), &NicknameStore::default());
    }

    #[test]
    fn test_load_malformed_defaults_without_overwriting() {
        let storage = MemoryStorage::with_blob(STORAGE_NAMESPACE, "{oops");
        let persistent = PersistentStore::load(Box::new(storage.clone()));
        assert!(persistent.store().is_empty());
        assert_eq!(storage.blob(STORAGE_NAMESPACE).as_deref(), Some("{oops"));
    }

    #[test]
    fn test_load_read_failure_defaults() {
        let persistent = PersistentStore::load(Box::new(FailingStorage));
        assert!(persistent.store().is_empty());
    }

    #[test]
    fn test_update_commits_immediately() {
        let storage = MemoryStorage::new();
        let mut persistent = PersistentStore::load(Box::new(storage.clone()));

        persistent
            .try_update(|store| store.set_nickname("42", "Nick"))
            .expect("update");

        let blob = storage.blob(STORAGE_NAMESPACE).expect("committed");
        let reloaded = NicknameStore::from_json(&blob).expect("parse");
        assert_eq!(reloaded.nickname("42"), Some("Nick"));
    }

    #[test]
    fn test_reload_sees_previous_session() {
        let storage = MemoryStorage::new();
        {
            let mut persistent = PersistentStore::load(Box::new(storage.clone()));
            persistent
                .update(|store| store.add_to_filter("7"))
                .expect("update");
        }
        let persistent = PersistentStore::load(Box::new(storage));
        assert!(persistent.store().settings().is_filtered("7"));
    }

    #[test]
    fn test_failed_import_does_not_commit() {
        let storage = MemoryStorage::new();
        let mut persistent = PersistentStore::load(Box::new(storage.clone()));

        let result = persistent.try_update(|store| store.import_all("{not json"));
        assert!(matches!(
            result,
            Err(StoreError::Import(ImportError::Malformed(_)))
        ));
        assert!(storage.blob(STORAGE_NAMESPACE).is_none());
    }

    #[test]
    fn test_commit_failure_is_reported() {
        let mut persistent = PersistentStore::load(Box::new(FailingStorage));
        let result = persistent.update(|store| store.clear_all());
        assert!(matches!(result, Err(StoreError::Storage(_))));
    }

    #[test]
    fn test_failed_commit_rolls_back_import() {
        let mut persistent = PersistentStore::load(Box::new(FailingStorage));
        let result = persistent.try_update(|store| store.import_all(r#"{"42":"Nick"}"#));
        assert!(matches!(result, Err(StoreError::Storage(_))));
        assert_eq!(persistent.store().nickname("42"), None);
        assert!(persistent.store().is_empty());
    }

    #[test]
    fn test_failed_commit_rolls_back_settings() {
        let mut persistent = PersistentStore::load(Box::new(FailingStorage));
        let result = persistent.update(|store| store.settings_mut().enabled = false);
        assert!(result.is_err());
        assert!(persistent.store().settings().enabled);
    }

    #[test]
    fn test_custom_namespace() {
        let storage = MemoryStorage::new();
        let mut persistent = PersistentStore::load_from(Box::new(storage.clone()), "other");
        persistent.commit().expect("commit");
        assert!(storage.blob("other").is_some());
        assert!(storage.blob(STORAGE_NAMESPACE).is_none());
    }
}
