//! Error types for store mutations and imports

use thiserror::Error;

use crate::storage::StorageError;
use crate::validators::IdentifierError;

/// Errors raised while mutating or persisting the store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid user identifier {id:?}: {source}")]
    InvalidIdentifier {
        id: String,
        #[source]
        source: IdentifierError,
    },
    #[error("failed to serialize store: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Import(#[from] ImportError),
}

/// Errors raised while parsing an import document
///
/// Any of these leaves the store exactly as it was before the import.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("import is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("import must be a JSON object mapping user identifiers to nicknames")]
    NotAnObject,
    #[error("nickname for {0:?} is not a string")]
    NonStringValue(String),
    #[error("invalid user identifier {id:?}: {source}")]
    InvalidIdentifier {
        id: String,
        #[source]
        source: IdentifierError,
    },
}
