//! Settings handlers (general, display and filter sections)

use iced::Task;

use crate::app::{NicknamesApp, reported};
use crate::types::{FilterModeChoice, Message, PendingConfirm};

impl NicknamesApp {
    // ==================== General ====================

    pub fn handle_enabled_toggled(&mut self, enabled: bool) -> Task<Message> {
        reported(self.plugin.set_enabled(enabled));
        Task::none()
    }

    /// Also installs or removes the roster override while the plugin is active
    pub fn handle_override_server_nicks_toggled(&mut self, enabled: bool) -> Task<Message> {
        reported(self.plugin.set_override_server_nicks(enabled));
        Task::none()
    }

    // ==================== Display ====================

    pub fn handle_show_prefix_toggled(&mut self, show: bool) -> Task<Message> {
        reported(self.plugin.set_show_prefix(show));
        Task::none()
    }

    pub fn handle_prefix_changed(&mut self, prefix: String) -> Task<Message> {
        reported(self.plugin.set_prefix(&prefix));
        Task::none()
    }

    pub fn handle_suffix_changed(&mut self, suffix: String) -> Task<Message> {
        reported(self.plugin.set_suffix(&suffix));
        Task::none()
    }

    // ==================== Filter ====================

    pub fn handle_filter_mode_selected(&mut self, choice: FilterModeChoice) -> Task<Message> {
        reported(self.plugin.set_filter_mode(choice.0));
        Task::none()
    }

    pub fn handle_new_filter_user_changed(&mut self, value: String) -> Task<Message> {
        self.form.new_filter_user_id = value;
        Task::none()
    }

    /// Add the typed identifier to the active filter list
    ///
    /// The input is cleared only if the identifier was accepted.
    pub fn handle_add_filtered_user_pressed(&mut self) -> Task<Message> {
        let user_id = self.form.new_filter_user_id.trim().to_string();
        if user_id.is_empty() || !self.plugin.settings().filter_mode.is_active() {
            return Task::none();
        }
        if reported(self.plugin.add_to_filter(&user_id)).is_some() {
            self.form.new_filter_user_id.clear();
        }
        Task::none()
    }

    pub fn handle_remove_filtered_user(&mut self, user_id: String) -> Task<Message> {
        reported(self.plugin.remove_from_filter(&user_id));
        Task::none()
    }

    /// Ask before clearing (nothing to clear is a no-op)
    pub fn handle_clear_filter_pressed(&mut self) -> Task<Message> {
        if !self.plugin.settings().filtered_users.is_empty() {
            self.form.pending = Some(PendingConfirm::ClearFilter);
        }
        Task::none()
    }
}
