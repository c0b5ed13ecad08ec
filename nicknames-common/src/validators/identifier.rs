//! User identifier validation
//!
//! Identifiers are opaque keys owned by the host. The store only rejects
//! values that cannot possibly be a host key: empty strings, oversized
//! strings, and anything containing whitespace or control characters.

/// Maximum length for user identifiers in characters
pub const MAX_IDENTIFIER_LENGTH: usize = 128;

/// Validation error for user identifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// Identifier is empty
    Empty,
    /// Identifier exceeds maximum length
    TooLong,
    /// Identifier contains whitespace or control characters
    InvalidCharacters,
}

impl std::fmt::Display for IdentifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentifierError::Empty => write!(f, "identifier is empty"),
            IdentifierError::TooLong => write!(
                f,
                "identifier is longer than {} characters",
                MAX_IDENTIFIER_LENGTH
            ),
            IdentifierError::InvalidCharacters => {
                write!(f, "identifier contains whitespace or control characters")
            }
        }
    }
}

impl std::error::Error for IdentifierError {}

/// Validate a user identifier
///
/// Checks:
/// - Not empty
/// - Does not exceed maximum length (128 characters)
/// - Contains no whitespace and no control characters
///
/// # Errors
///
/// Returns an `IdentifierError` variant describing the validation failure.
pub fn validate_identifier(user_id: &str) -> Result<(), IdentifierError> {
    if user_id.is_empty() {
        return Err(IdentifierError::Empty);
    }
    if user_id.chars().count() > MAX_IDENTIFIER_LENGTH {
        return Err(IdentifierError::TooLong);
    }
    if user_id
        .chars()
        .any(|ch| ch.is_whitespace() || ch.is_control())
    {
        return Err(IdentifierError::InvalidCharacters);
    }
    Ok(())
}
