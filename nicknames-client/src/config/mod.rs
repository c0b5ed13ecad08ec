//! Configuration persistence
//!
//! The nickname store is saved as one JSON file per storage namespace under
//! the platform config directory.

mod storage;

pub use storage::FileStorage;
