//! Nicknames Common Library
//!
//! Shared types for Nicknames Everywhere: the nickname store, its settings
//! record, the resolution engine that decides whether a displayed name is
//! overridden, and the storage collaborator the store persists through.

mod error;
pub mod persistent;
pub mod resolve;
pub mod settings;
pub mod storage;
pub mod store;
pub mod validators;

pub use error::{ImportError, StoreError};
pub use persistent::PersistentStore;
pub use resolve::{Override, resolve};
pub use settings::{FilterMode, Settings};
pub use storage::{MemoryStorage, Storage, StorageError};
pub use store::{ImportSummary, NicknameChange, NicknameStore, SavedNickname};

/// Namespace under which the store blob is persisted
pub const STORAGE_NAMESPACE: &str = "nicknames-everywhere";

/// Placeholder shown between prefix and suffix in the settings preview
pub const PREVIEW_NICKNAME: &str = "YourNickname";

/// Build the live preview string for a prefix/suffix pair
///
/// The preview uses the same concatenation the resolution engine applies,
/// so whitespace in either affix is shown exactly as it will be rendered.
pub fn affix_preview(prefix: &str, suffix: &str) -> String {
    format!("{prefix}{PREVIEW_NICKNAME}{suffix}")
}
