//! Nickname resolution engine
//!
//! Decides whether the name displayed for a user is overridden, and with
//! what text. Resolution is a pure function of the identifier and the store:
//! it never mutates anything and never performs I/O, so hosts may call it
//! re-entrantly from any display callback.
//!
//! Order of checks:
//! 1. Kill-switch (`enabled`)
//! 2. Filter gate (whitelist / blacklist)
//! 3. Nickname lookup
//! 4. Prefix / suffix formatting

use std::fmt;

use crate::store::NicknameStore;

/// The replacement display string for a user
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Override(String);

impl Override {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Override {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Override {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Override> for String {
    fn from(value: Override) -> Self {
        value.0
    }
}

/// Resolve the display override for a user
///
/// Returns `None` when the original name should be shown unmodified.
pub fn resolve(user_id: &str, store: &NicknameStore) -> Option<Override> {
    let settings = store.settings();
    if !settings.enabled {
        return None;
    }

    // Filter gate runs before the nickname lookup
    if !settings.passes_filter(user_id) {
        return None;
    }

    let nickname = store.nickname(user_id).filter(|n| !n.is_empty())?;

    if settings.show_prefix {
        Some(Override(format!(
            "{}{}{}",
            settings.prefix, nickname, settings.suffix
        )))
    } else {
        Some(Override(nickname.to_string()))
    }
}
