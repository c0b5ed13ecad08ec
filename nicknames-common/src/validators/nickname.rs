//! Nickname normalization
//!
//! Nicknames have no length limit and no character restrictions. The only
//! rule is that surrounding whitespace is dropped and a blank result means
//! "no nickname".

/// Normalize raw nickname input
///
/// Returns the trimmed nickname, or `None` when nothing but whitespace
/// remains (callers delete the entry in that case).
pub fn normalize_nickname(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
