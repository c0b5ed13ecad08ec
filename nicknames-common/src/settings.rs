//! Nickname display settings

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Constants
// =============================================================================

/// Default text placed before a nickname when affixes are shown
pub const DEFAULT_PREFIX: &str = "[";

/// Default text placed after a nickname when affixes are shown
pub const DEFAULT_SUFFIX: &str = "]";

// =============================================================================
// Filter Mode
// =============================================================================

/// How the filtered user set gates nickname overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Every user with a nickname gets the override
    #[default]
    None,
    /// Only users in the filter set get the override
    Whitelist,
    /// Users in the filter set never get the override
    Blacklist,
}

impl FilterMode {
    /// All modes in display order (for pickers)
    pub const ALL: &'static [FilterMode] =
        &[FilterMode::None, FilterMode::Whitelist, FilterMode::Blacklist];

    /// Whether the filter set takes part in resolution
    pub fn is_active(self) -> bool {
        self != FilterMode::None
    }

    /// Stable lowercase name, matching the persisted form
    pub fn as_str(self) -> &'static str {
        match self {
            FilterMode::None => "none",
            FilterMode::Whitelist => "whitelist",
            FilterMode::Blacklist => "blacklist",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Settings
// =============================================================================

/// User preferences controlling how nicknames are applied
///
/// Serialized with camelCase keys. Every field falls back to its default when
/// missing, so blobs written by older builds still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Global kill-switch
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether group-specific nicknames from the host roster are superseded
    #[serde(default = "default_true")]
    pub override_server_nicks: bool,

    /// Whether `prefix` and `suffix` wrap the nickname
    #[serde(default)]
    pub show_prefix: bool,

    /// Text placed before the nickname
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Text placed after the nickname
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// How `filtered_users` is interpreted
    #[serde(default)]
    pub filter_mode: FilterMode,

    /// User identifiers in the whitelist or blacklist
    #[serde(default)]
    pub filtered_users: BTreeSet<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            override_server_nicks: default_true(),
            show_prefix: false,
            prefix: default_prefix(),
            suffix: default_suffix(),
            filter_mode: FilterMode::default(),
            filtered_users: BTreeSet::new(),
        }
    }
}

impl Settings {
    /// Whether a user identifier is in the filter set
    pub fn is_filtered(&self, user_id: &str) -> bool {
        self.filtered_users.contains(user_id)
    }

    /// Whether the filter gate lets an override through for this user
    pub fn passes_filter(&self, user_id: &str) -> bool {
        match self.filter_mode {
            FilterMode::None => true,
            FilterMode::Whitelist => self.is_filtered(user_id),
            FilterMode::Blacklist => !self.is_filtered(user_id),
        }
    }
}

// =============================================================================
// Default Functions (for serde)
// =============================================================================

fn default_true() -> bool {
    true
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_suffix() -> String {
    DEFAULT_SUFFIX.to_string()
}

// =============================================================================
// Tests
// =============================================================================
