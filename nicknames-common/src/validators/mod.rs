//! Input validation functions
//!
//! Validators for the two kinds of user input the store accepts: the opaque
//! identifiers nicknames are keyed by, and the raw nickname text typed into a
//! prompt or read from an import document.

mod identifier;
mod nickname;

pub use identifier::{IdentifierError, MAX_IDENTIFIER_LENGTH, validate_identifier};
pub use nickname::normalize_nickname;
