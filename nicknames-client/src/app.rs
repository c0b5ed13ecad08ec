//! Standalone nickname manager
//!
//! Runs the plugin without a chat host so saved nicknames and settings can
//! be managed directly. Plugin toasts are queued by [`AppUi`] and pushed to
//! the window's toast container after every update; confirmations are asked
//! in the view before the action is dispatched.

use std::cell::RefCell;
use std::rc::Rc;

use iced::{Element, Task};
use iced_toasts::{ToastContainer, toast, toast_container};
use nicknames_common::Storage;
use tracing::{debug, warn};

use crate::config::FileStorage;
use crate::host::Host;
use crate::plugin::{Plugin, PluginError};
use crate::types::{FormState, Message};
use crate::ui::{Confirmation, InputPrompt, ToastLevel, Ui};
use crate::views;

/// Host with no display seams
#[derive(Debug, Default)]
pub struct StandaloneHost;

impl Host for StandaloneHost {}

/// [`Ui`] backed by the manager window
///
/// Toasts raised while the plugin runs are held until the app drains them.
#[derive(Debug, Default)]
pub struct AppUi {
    queued: RefCell<Vec<(String, ToastLevel)>>,
}

impl AppUi {
    /// Take every toast raised since the last call
    pub fn take_toasts(&self) -> Vec<(String, ToastLevel)> {
        self.queued.take()
    }
}

impl Ui for AppUi {
    fn toast(&self, message: &str, level: ToastLevel) {
        self.queued.borrow_mut().push((message.to_string(), level));
    }

    /// The view has already asked by the time an action reaches the plugin
    fn confirm(&self, confirmation: &Confirmation) -> bool {
        debug!(title = %confirmation.title, "confirmed in view");
        true
    }

    /// Nicknames are edited inline, so the plugin never needs to prompt
    fn prompt_text(&self, _prompt: &InputPrompt) -> Option<String> {
        None
    }
}

/// Nickname manager application state
pub struct NicknamesApp {
    pub(crate) plugin: Plugin,
    pub(crate) ui: Rc<AppUi>,
    pub(crate) form: FormState,
    toasts: ToastContainer<'static, Message>,
}

impl NicknamesApp {
    /// Build the manager over `storage`
    pub fn with_storage(storage: Box<dyn Storage>) -> Self {
        let ui = Rc::new(AppUi::default());
        let plugin = Plugin::new(Rc::new(StandaloneHost), ui.clone(), storage);
        Self {
            plugin,
            ui,
            form: FormState::default(),
            toasts: toast_container(Message::DismissToast),
        }
    }

    /// Initialize from the platform config directory
    ///
    /// Falls back to in-memory storage (with an error toast) if the config
    /// directory cannot be determined.
    pub fn new() -> (Self, Task<Message>) {
        let mut app = match FileStorage::open_default() {
            Ok(storage) => Self::with_storage(Box::new(storage)),
            Err(e) => {
                warn!(error = %e, "no config directory, nicknames will not be saved");
                let app = Self::with_storage(Box::new(nicknames_common::MemoryStorage::new()));
                app.ui.toast(&e.to_string(), ToastLevel::Error);
                app
            }
        };
        app.show_toasts();
        (app, Task::none())
    }

    /// Push queued plugin toasts to the toast container
    fn show_toasts(&mut self) {
        for (message, level) in self.ui.take_toasts() {
            self.toasts.push(toast(&message).level(toast_level(level)));
        }
    }

    /// Process a message and update application state
    pub fn update(&mut self, message: Message) -> Task<Message> {
        let task = self.dispatch(message);
        self.show_toasts();
        task
    }

    fn dispatch(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::EnabledToggled(enabled) => self.handle_enabled_toggled(enabled),
            Message::OverrideServerNicksToggled(enabled) => {
                self.handle_override_server_nicks_toggled(enabled)
            }
            Message::ShowPrefixToggled(show) => self.handle_show_prefix_toggled(show),
            Message::PrefixChanged(prefix) => self.handle_prefix_changed(prefix),
            Message::SuffixChanged(suffix) => self.handle_suffix_changed(suffix),
            Message::FilterModeSelected(choice) => self.handle_filter_mode_selected(choice),
            Message::NewFilterUserChanged(value) => self.handle_new_filter_user_changed(value),
            Message::AddFilteredUserPressed => self.handle_add_filtered_user_pressed(),
            Message::RemoveFilteredUser(user_id) => self.handle_remove_filtered_user(user_id),
            Message::ClearFilterPressed => self.handle_clear_filter_pressed(),
            Message::SearchChanged(query) => self.handle_search_changed(query),
            Message::NewUserIdChanged(value) => self.handle_new_user_id_changed(value),
            Message::NewNicknameChanged(value) => self.handle_new_nickname_changed(value),
            Message::AddNicknamePressed => self.handle_add_nickname_pressed(),
            Message::EditPressed(user_id) => self.handle_edit_pressed(user_id),
            Message::EditChanged(value) => self.handle_edit_changed(value),
            Message::EditSubmitted => self.handle_edit_submitted(),
            Message::EditCancelled => self.handle_edit_cancelled(),
            Message::DeletePressed(user_id) => self.handle_delete_pressed(user_id),
            Message::ExportPressed => self.handle_export_pressed(),
            Message::ImportPressed => self.handle_import_pressed(),
            Message::ImportLoaded(result) => self.handle_import_loaded(result),
            Message::ClearAllPressed => self.handle_clear_all_pressed(),
            Message::ConfirmPressed => self.handle_confirm_pressed(),
            Message::CancelConfirm => self.handle_cancel_confirm(),
            Message::DismissToast(id) => {
                self.toasts.dismiss(id);
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        self.toasts.view(views::settings_view(
            self.plugin.settings(),
            self.plugin.saved_nicknames(&self.form.search),
            self.plugin.nickname_count(),
            &self.form,
        ))
    }

    pub fn title(&self) -> String {
        crate::i18n::t("window-title")
    }
}

fn toast_level(level: ToastLevel) -> iced_toasts::ToastLevel {
    match level {
        ToastLevel::Info => iced_toasts::ToastLevel::Info,
        ToastLevel::Success => iced_toasts::ToastLevel::Success,
        ToastLevel::Error => iced_toasts::ToastLevel::Error,
    }
}

/// Drop a plugin result whose failure the plugin has already reported
pub(crate) fn reported<T>(result: Result<T, PluginError>) -> Option<T> {
    result
        .inspect_err(|e| debug!(error = %e, "action failed"))
        .ok()
}
