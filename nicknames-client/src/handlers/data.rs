//! Data management handlers (export, import, clear all) and confirmations

use iced::Task;
use rfd::AsyncFileDialog;
use tracing::warn;

use crate::app::{NicknamesApp, reported};
use crate::i18n::t_args;
use crate::types::{Message, PendingConfirm};
use crate::ui::{ClipboardBuffer, ToastLevel, Ui};

impl NicknamesApp {
    // ==================== Export / Import ====================

    /// Copy every nickname to the clipboard as pretty JSON
    pub fn handle_export_pressed(&mut self) -> Task<Message> {
        let buffer = ClipboardBuffer::new();
        if reported(self.plugin.export_to(&buffer)).is_none() {
            return Task::none();
        }
        match buffer.take() {
            Some(json) => iced::clipboard::write(json),
            None => Task::none(),
        }
    }

    /// Handle import button pressed - opens file dialog
    pub fn handle_import_pressed(&mut self) -> Task<Message> {
        Task::future(async {
            let file = AsyncFileDialog::new()
                .add_filter("JSON", &["json"])
                .pick_file()
                .await;

            match file {
                Some(handle) => {
                    let bytes = handle.read().await;
                    let text = String::from_utf8(bytes).map_err(|e| e.to_string());
                    Message::ImportLoaded(Some(text))
                }
                // User cancelled - no change
                None => Message::ImportLoaded(None),
            }
        })
    }

    /// Merge an imported file into the store
    pub fn handle_import_loaded(&mut self, result: Option<Result<String, String>>) -> Task<Message> {
        match result {
            None => {}
            Some(Ok(text)) => {
                reported(self.plugin.import_text(Some(&text)));
            }
            Some(Err(error)) => {
                warn!(%error, "import file is not UTF-8");
                self.ui.toast(
                    &t_args("toast-import-read-failed", &[("error", &error)]),
                    ToastLevel::Error,
                );
            }
        }
        Task::none()
    }

    // ==================== Clear All ====================

    /// Ask before deleting every nickname (nothing to delete is a no-op)
    pub fn handle_clear_all_pressed(&mut self) -> Task<Message> {
        if self.plugin.nickname_count() > 0 {
            self.form.pending = Some(PendingConfirm::ClearAll);
        }
        Task::none()
    }

    // ==================== Confirmation ====================

    pub fn handle_confirm_pressed(&mut self) -> Task<Message> {
        match self.form.pending.take() {
            Some(PendingConfirm::ClearAll) => {
                if reported(self.plugin.clear_all()).is_some() {
                    self.form.editing = None;
                }
            }
            Some(PendingConfirm::ClearFilter) => {
                reported(self.plugin.clear_filter_list());
            }
            None => {}
        }
        Task::none()
    }

    pub fn handle_cancel_confirm(&mut self) -> Task<Message> {
        self.form.pending = None;
        Task::none()
    }
}
