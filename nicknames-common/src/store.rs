//! Nickname store
//!
//! Holds the identifier → nickname mapping and the settings record. This is
//! pure data: every method is synchronous and performs no I/O. Persistence
//! is layered on top by [`crate::PersistentStore`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ImportError, StoreError};
use crate::settings::Settings;
use crate::validators::{normalize_nickname, validate_identifier};

/// Outcome of [`NicknameStore::set_nickname`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NicknameChange {
    /// The trimmed nickname was stored
    Set(String),
    /// The input was blank, so any existing entry was deleted
    Cleared,
}

/// Counts reported after a successful import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    /// Entries merged into the store
    pub imported: usize,
    /// Entries whose value was blank after trimming
    pub skipped: usize,
}

/// One row of the saved-nickname list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedNickname {
    pub user_id: String,
    pub nickname: String,
    /// Host-supplied label for the user (username, or the identifier itself)
    pub label: String,
}

/// The persisted nickname state
///
/// Serializes to the blob layout `{"nicknames": {...}, "settings": {...}}`.
/// Either key may be missing, in which case it is default-initialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NicknameStore {
    #[serde(default)]
    nicknames: BTreeMap<String, String>,
    #[serde(default)]
    settings: Settings,
}

impl NicknameStore {
    /// Create an empty store with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a persisted blob
    ///
    /// Entries with blank values or invalid identifiers are dropped so the
    /// loaded store upholds the same invariants as one built through
    /// [`Self::set_nickname`], and always re-imports its own export.
    pub fn from_json(blob: &str) -> Result<Self, serde_json::Error> {
        let mut store: Self = serde_json::from_str(blob)?;
        store.nicknames.retain(|user_id, nickname| {
            if let Err(e) = validate_identifier(user_id) {
                warn!(%user_id, error = %e, "dropping stored nickname with invalid identifier");
                return false;
            }
            let trimmed = nickname.trim();
            if trimmed.is_empty() {
                return false;
            }
            if trimmed.len() != nickname.len() {
                *nickname = trimmed.to_string();
            }
            true
        });
        Ok(store)
    }

    /// Serialize the whole store as a persisted blob
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    // ==================== Settings ====================

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    // ==================== Nicknames ====================

    /// Stored nickname for a user, without prefix or suffix
    pub fn nickname(&self, user_id: &str) -> Option<&str> {
        self.nicknames.get(user_id).map(String::as_str)
    }

    pub fn has_nickname(&self, user_id: &str) -> bool {
        self.nicknames.contains_key(user_id)
    }

    /// Number of saved nicknames
    pub fn len(&self) -> usize {
        self.nicknames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nicknames.is_empty()
    }

    /// All saved nicknames ordered by identifier
    pub fn nicknames(&self) -> impl Iterator<Item = (&str, &str)> {
        self.nicknames
            .iter()
            .map(|(id, nickname)| (id.as_str(), nickname.as_str()))
    }

    /// Set or clear the nickname for a user
    ///
    /// The raw input is trimmed. A blank result deletes any existing entry.
    /// There is no length limit.
    pub fn set_nickname(&mut self, user_id: &str, raw: &str) -> Result<NicknameChange, StoreError> {
        validate_identifier(user_id).map_err(|source| StoreError::InvalidIdentifier {
            id: user_id.to_string(),
            source,
        })?;

        match normalize_nickname(raw) {
            Some(nickname) => {
                self.nicknames
                    .insert(user_id.to_string(), nickname.to_string());
                Ok(NicknameChange::Set(nickname.to_string()))
            }
            None => {
                self.nicknames.remove(user_id);
                Ok(NicknameChange::Cleared)
            }
        }
    }

    /// Delete the nickname for a user, returning the previous value
    pub fn remove_nickname(&mut self, user_id: &str) -> Option<String> {
        self.nicknames.remove(user_id)
    }

    /// Delete every nickname, returning how many were removed
    pub fn clear_all(&mut self) -> usize {
        let count = self.nicknames.len();
        self.nicknames.clear();
        count
    }

    // ==================== Filter Set ====================

    /// Add a user to the filter set
    ///
    /// Returns `false` when the user was already present (no-op).
    pub fn add_to_filter(&mut self, user_id: &str) -> bool {
        self.settings.filtered_users.insert(user_id.to_string())
    }

    /// Remove a user from the filter set
    ///
    /// Returns `false` when the user was not present (no-op).
    pub fn remove_from_filter(&mut self, user_id: &str) -> bool {
        self.settings.filtered_users.remove(user_id)
    }

    /// Empty the filter set, returning how many users were removed
    pub fn clear_filter(&mut self) -> usize {
        let count = self.settings.filtered_users.len();
        self.settings.filtered_users.clear();
        count
    }

    // ==================== Export / Import ====================

    /// Export the nickname mapping as pretty-printed JSON
    pub fn export_all(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.nicknames)
    }

    /// Merge an exported nickname mapping into the store
    ///
    /// The whole document is validated before anything is written: on any
    /// error the store is left untouched. Existing entries are overwritten on
    /// key collision; identifiers absent from the document are kept.
    /// Entries with blank values are skipped.
    pub fn import_all(&mut self, json: &str) -> Result<ImportSummary, ImportError> {
        let document: serde_json::Value = serde_json::from_str(json)?;
        let object = document.as_object().ok_or(ImportError::NotAnObject)?;

        let mut staged = Vec::with_capacity(object.len());
        let mut summary = ImportSummary::default();
        for (user_id, value) in object {
            validate_identifier(user_id).map_err(|source| ImportError::InvalidIdentifier {
                id: user_id.clone(),
                source,
            })?;
            let raw = value
                .as_str()
                .ok_or_else(|| ImportError::NonStringValue(user_id.clone()))?;
            match normalize_nickname(raw) {
                Some(nickname) => staged.push((user_id.clone(), nickname.to_string())),
                None => summary.skipped += 1,
            }
        }

        summary.imported = staged.len();
        self.nicknames.extend(staged);
        Ok(summary)
    }

    // ==================== Search ====================

    /// Saved nicknames matching a search query
    ///
    /// Matching is case-insensitive against the nickname, the label produced
    /// by `label_for` and the identifier. A blank query matches everything.
    pub fn search<F>(&self, query: &str, label_for: F) -> Vec<SavedNickname>
    where
        F: Fn(&str) -> String,
    {
        let query = query.trim().to_lowercase();
        self.nicknames
            .iter()
            .filter_map(|(user_id, nickname)| {
                let label = label_for(user_id);
                let matches = query.is_empty()
                    || nickname.to_lowercase().contains(&query)
                    || label.to_lowercase().contains(&query)
                    || user_id.to_lowercase().contains(&query);
                matches.then(|| SavedNickname {
                    user_id: user_id.clone(),
                    nickname: nickname.clone(),
                    label,
                })
            })
            .collect()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loaded_invalid_identifier_is_dropped() {
        let store =
            NicknameStore::from_json(r#"{"nicknames":{"a b":"X","":"Y","42":"Nick"}}"#)
                .expect("parse");
        assert_eq!(store.len(), 1);
        assert_eq!(store.nickname("42"), Some("Nick"));
    }

    #[test]
    fn test_loaded_store_reimports_its_export() {
        let mut store =
            NicknameStore::from_json(r#"{"nicknames":{"a b":"X","42":"Nick","7":"Bob"}}"#)
                .expect("parse");
        let before = store.clone();
        let exported = store.export_all().expect("export");
        let summary = store.import_all(&exported).expect("import");
        assert_eq!(summary.imported, 2);
        assert_eq!(store, before);
    }

    fn store_with(entries: &[(&str, &str)]) -> NicknameStore {
        let mut store = NicknameStore::new();
        for (id, nickname) in entries {
            store.set_nickname(id, nickname).expect("set nickname");
        }
        store
    }

    #[test]
    fn test_set_nickname_trims() {
        let mut store = NicknameStore::new();
        let change = store.set_nickname("42", "  Nick  ").expect("set");
        assert_eq!(change, NicknameChange::Set("Nick".to_string()));
        assert_eq!(store.nickname("42"), Some("Nick"));
    }

    #[test]
    fn test_set_blank_nickname_deletes() {
        let mut store = store_with(&[("42", "Nick")]);
        let change = store.set_nickname("42", "   ").expect("set");
        assert_eq!(change, NicknameChange::Cleared);
        assert!(!store.has_nickname("42"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_blank_nickname_without_entry() {
        let mut store = NicknameStore::new();
        assert_eq!(
            store.set_nickname("42", "").expect("set"),
            NicknameChange::Cleared
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_nickname_rejects_invalid_identifier() {
        let mut store = NicknameStore::new();
        let err = store.set_nickname("", "Nick").unwrap_err();
        assert!(matches!(err, StoreError::InvalidIdentifier { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_nickname() {
        let mut store = store_with(&[("42", "Nick")]);
        assert_eq!(store.remove_nickname("42").as_deref(), Some("Nick"));
        assert_eq!(store.remove_nickname("42"), None);
    }

    #[test]
    fn test_filter_set_is_idempotent() {
        let mut store = NicknameStore::new();
        assert!(store.add_to_filter("42"));
        assert!(!store.add_to_filter("42"));
        assert_eq!(store.settings().filtered_users.len(), 1);

        assert!(store.remove_from_filter("42"));
        assert!(!store.remove_from_filter("42"));
        assert!(!store.remove_from_filter("99"));
        assert!(store.settings().filtered_users.is_empty());
    }

    #[test]
    fn test_clear_filter() {
        let mut store = NicknameStore::new();
        store.add_to_filter("1");
        store.add_to_filter("2");
        assert_eq!(store.clear_filter(), 2);
        assert_eq!(store.clear_filter(), 0);
    }

    #[test]
    fn test_clear_all_reports_count() {
        let mut store = store_with(&[("1", "a"), ("2", "b"), ("3", "c")]);
        assert_eq!(store.clear_all(), 3);
        assert!(store.is_empty());
        assert_eq!(store.clear_all(), 0);
    }

    #[test]
    fn test_export_is_pretty_nickname_map() {
        let store = store_with(&[("42", "Nick")]);
        let json = store.export_all().expect("export");
        assert_eq!(json, "{\n  \"42\": \"Nick\"\n}");
    }

    #[test]
    fn test_export_empty() {
        assert_eq!(NicknameStore::new().export_all().expect("export"), "{}");
    }

    #[test]
    fn test_import_merges_and_overwrites() {
        let mut store = store_with(&[("1", "Old"), ("2", "Kept")]);
        let summary = store
            .import_all(r#"{"1": "New", "3": "Added"}"#)
            .expect("import");

        assert_eq!(summary.imported, 2);
        assert_eq!(summary.skipped, 0);
        assert_eq!(store.nickname("1"), Some("New"));
        assert_eq!(store.nickname("2"), Some("Kept"));
        assert_eq!(store.nickname("3"), Some("Added"));
    }

    #[test]
    fn test_import_malformed_leaves_store_unchanged() {
        let mut store = store_with(&[("42", "Nick")]);
        let before = store.clone();

        let err = store.import_all("{not json").unwrap_err();
        assert!(matches!(err, ImportError::Malformed(_)));
        assert_eq!(store, before);
    }

    #[test]
    fn test_import_rejects_non_object() {
        let mut store = NicknameStore::new();
        assert!(matches!(
            store.import_all(r#"["42"]"#),
            Err(ImportError::NotAnObject)
        ));
        assert!(matches!(
            store.import_all("\"Nick\""),
            Err(ImportError::NotAnObject)
        ));
    }

    #[test]
    fn test_import_rejects_non_string_value_atomically() {
        let mut store = store_with(&[("42", "Nick")]);
        let before = store.clone();

        let err = store.import_all(r#"{"1": "One", "2": 2}"#).unwrap_err();
        assert!(matches!(err, ImportError::NonStringValue(id) if id == "2"));
        assert_eq!(store, before);
    }

    #[test]
    fn test_import_rejects_invalid_identifier() {
        let mut store = NicknameStore::new();
        let err = store.import_all(r#"{"": "Nobody"}"#).unwrap_err();
        assert!(matches!(err, ImportError::InvalidIdentifier { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_import_skips_blank_values_and_trims() {
        let mut store = store_with(&[("1", "Kept")]);
        let summary = store
            .import_all(r#"{"1": "   ", "2": "  Two  "}"#)
            .expect("import");

        assert_eq!(summary.imported, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(store.nickname("1"), Some("Kept"));
        assert_eq!(store.nickname("2"), Some("Two"));
    }

    #[test]
    fn test_import_of_export_is_noop() {
        let mut store = store_with(&[("1", "One"), ("2", "Two words"), ("3", "用户")]);
        let before = store.clone();

        let exported = store.export_all().expect("export");
        store.import_all(&exported).expect("import");
        assert_eq!(store, before);
    }

    #[test]
    fn test_from_json_defaults_missing_keys() {
        let store = NicknameStore::from_json("{}").expect("parse");
        assert!(store.is_empty());
        assert_eq!(store.settings(), &Settings::default());

        let store = NicknameStore::from_json(r#"{"nicknames":{"42":"Nick"}}"#).expect("parse");
        assert_eq!(store.nickname("42"), Some("Nick"));
        assert_eq!(store.settings(), &Settings::default());
    }

    #[test]
    fn test_from_json_drops_blank_entries() {
        let store =
            NicknameStore::from_json(r#"{"nicknames":{"1":"  ","2":" Two "}}"#).expect("parse");
        assert!(!store.has_nickname("1"));
        assert_eq!(store.nickname("2"), Some("Two"));
    }

    #[test]
    fn test_blob_roundtrip() {
        let mut store = store_with(&[("42", "Nick")]);
        store.settings_mut().show_prefix = true;
        store.add_to_filter("7");

        let blob = store.to_json().expect("serialize");
        let loaded = NicknameStore::from_json(&blob).expect("parse");
        assert_eq!(loaded, store);
    }

    #[test]
    fn test_search_matches_nickname_label_and_id() {
        let store = store_with(&[("100", "Alpha"), ("200", "Beta"), ("300", "Gamma")]);
        let label = |id: &str| match id {
            "200" => "bob".to_string(),
            other => other.to_string(),
        };

        let all = store.search("", label);
        assert_eq!(all.len(), 3);

        let by_nickname = store.search("ALP", label);
        assert_eq!(by_nickname.len(), 1);
        assert_eq!(by_nickname[0].user_id, "100");

        let by_label = store.search("Bob", label);
        assert_eq!(by_label.len(), 1);
        assert_eq!(by_label[0].nickname, "Beta");
        assert_eq!(by_label[0].label, "bob");

        let by_id = store.search("30", label);
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].nickname, "Gamma");

        assert!(store.search("zzz", label).is_empty());
    }
}
