//! Saved nickname list handlers

use iced::Task;

use crate::app::{NicknamesApp, reported};
use crate::types::{EditState, Message};

impl NicknamesApp {
    pub fn handle_search_changed(&mut self, query: String) -> Task<Message> {
        self.form.search = query;
        Task::none()
    }

    pub fn handle_new_user_id_changed(&mut self, value: String) -> Task<Message> {
        self.form.new_user_id = value;
        Task::none()
    }

    pub fn handle_new_nickname_changed(&mut self, value: String) -> Task<Message> {
        self.form.new_nickname = value;
        Task::none()
    }

    /// Save the nickname typed into the add row
    ///
    /// The inputs are cleared only if the nickname was accepted.
    pub fn handle_add_nickname_pressed(&mut self) -> Task<Message> {
        let user_id = self.form.new_user_id.trim().to_string();
        if user_id.is_empty() {
            return Task::none();
        }
        if reported(self.plugin.apply_nickname(&user_id, &self.form.new_nickname)).is_some() {
            self.form.new_user_id.clear();
            self.form.new_nickname.clear();
        }
        Task::none()
    }

    /// Start editing a saved nickname in place
    pub fn handle_edit_pressed(&mut self, user_id: String) -> Task<Message> {
        let value = self.plugin.nickname(&user_id).unwrap_or_default();
        self.form.editing = Some(EditState { user_id, value });
        Task::none()
    }

    pub fn handle_edit_changed(&mut self, value: String) -> Task<Message> {
        if let Some(editing) = &mut self.form.editing {
            editing.value = value;
        }
        Task::none()
    }

    /// Save the edit; a blank value removes the nickname
    pub fn handle_edit_submitted(&mut self) -> Task<Message> {
        if let Some(editing) = self.form.editing.take() {
            reported(self.plugin.apply_nickname(&editing.user_id, &editing.value));
        }
        Task::none()
    }

    pub fn handle_edit_cancelled(&mut self) -> Task<Message> {
        self.form.editing = None;
        Task::none()
    }

    pub fn handle_delete_pressed(&mut self, user_id: String) -> Task<Message> {
        if self
            .form
            .editing
            .as_ref()
            .is_some_and(|editing| editing.user_id == user_id)
        {
            self.form.editing = None;
        }
        reported(self.plugin.remove_nickname(&user_id));
        Task::none()
    }
}
