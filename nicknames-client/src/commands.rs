//! In-context nickname commands
//!
//! These are the actions reachable from wherever a user identity is shown.
//! The menu augmentation attaches them to host menu entries; the host hands
//! them back to [`crate::plugin::Plugin::perform`] when an entry is pressed.

/// A nickname action targeting one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NicknameCommand {
    /// Prompt for a new nickname (placeholder is the user's current name)
    EditNickname { user_id: String, display_name: String },
    /// Delete the user's nickname
    RemoveNickname { user_id: String },
    /// Add the user to the whitelist or blacklist
    AddToFilter { user_id: String },
    /// Remove the user from the whitelist or blacklist
    RemoveFromFilter { user_id: String },
}

impl NicknameCommand {
    /// The user this command targets
    pub fn user_id(&self) -> &str {
        match self {
            NicknameCommand::EditNickname { user_id, .. }
            | NicknameCommand::RemoveNickname { user_id }
            | NicknameCommand::AddToFilter { user_id }
            | NicknameCommand::RemoveFromFilter { user_id } => user_id,
        }
    }
}
