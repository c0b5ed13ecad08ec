//! GUI message and form state types

use std::fmt;

use iced_toasts::ToastId;
use nicknames_common::FilterMode;

use crate::i18n::t;

/// Messages handled by [`crate::app::NicknamesApp::update`]
#[derive(Debug, Clone)]
pub enum Message {
    // General
    EnabledToggled(bool),
    OverrideServerNicksToggled(bool),

    // Display
    ShowPrefixToggled(bool),
    PrefixChanged(String),
    SuffixChanged(String),

    // Filter
    FilterModeSelected(FilterModeChoice),
    NewFilterUserChanged(String),
    AddFilteredUserPressed,
    RemoveFilteredUser(String),
    ClearFilterPressed,

    // Saved nicknames
    SearchChanged(String),
    NewUserIdChanged(String),
    NewNicknameChanged(String),
    AddNicknamePressed,
    EditPressed(String),
    EditChanged(String),
    EditSubmitted,
    EditCancelled,
    DeletePressed(String),

    // Data management
    ExportPressed,
    ImportPressed,
    /// `None` if the file dialog was cancelled
    ImportLoaded(Option<Result<String, String>>),
    ClearAllPressed,

    // Confirmation and toasts
    ConfirmPressed,
    CancelConfirm,
    DismissToast(ToastId),
}

/// Filter mode as shown in the picker (localized label)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterModeChoice(pub FilterMode);

impl FilterModeChoice {
    pub fn all() -> Vec<FilterModeChoice> {
        FilterMode::ALL.iter().copied().map(FilterModeChoice).collect()
    }
}

impl fmt::Display for FilterModeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&t(&format!("filter-mode-{}", self.0.as_str())))
    }
}

/// Destructive action waiting for the user to confirm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingConfirm {
    ClearAll,
    ClearFilter,
}

/// A saved nickname being edited in place
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub user_id: String,
    pub value: String,
}

/// Transient form state of the nickname manager
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub search: String,
    pub new_user_id: String,
    pub new_nickname: String,
    pub new_filter_user_id: String,
    pub editing: Option<EditState>,
    pub pending: Option<PendingConfirm>,
}
