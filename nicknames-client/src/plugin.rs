//! Plugin context
//!
//! [`Plugin`] owns everything that lives between activation and
//! deactivation: the persistent store, the patch registry and the host and
//! UI collaborators. User actions report their outcome through toasts and
//! also return it, so callers without a UI can inspect results directly.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use nicknames_common::{
    FilterMode, ImportError, ImportSummary, NicknameChange, NicknameStore, Override,
    PersistentStore, SavedNickname, Settings, Storage, StoreError,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::commands::NicknameCommand;
use crate::host::Host;
use crate::i18n::{t, t_args};
use crate::patch::{
    InstallReport, InterceptionPoint, PatchContext, PatchManager, RosterPoint, SharedStore,
    standard_points,
};
use crate::ui::{Confirmation, InputPrompt, TextSink, TextSource, ToastLevel, Ui};

/// Errors from plugin-level operations
#[derive(Debug, Error)]
pub enum PluginError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to read import: {0}")]
    Read(#[source] io::Error),
    #[error("failed to write export: {0}")]
    Write(#[source] io::Error),
    #[error("nothing to import")]
    NothingToImport,
}

impl PluginError {
    fn is_malformed_import(&self) -> bool {
        matches!(self, PluginError::Store(StoreError::Import(_)))
    }
}

/// The plugin context object
pub struct Plugin {
    host: Rc<dyn Host>,
    ui: Rc<dyn Ui>,
    store: SharedStore,
    context: PatchContext,
    patches: PatchManager,
    points: Vec<Box<dyn InterceptionPoint>>,
    active: bool,
}

impl Plugin {
    /// Load the store and build the context (nothing is installed yet)
    pub fn new(host: Rc<dyn Host>, ui: Rc<dyn Ui>, storage: Box<dyn Storage>) -> Self {
        let store = Rc::new(RefCell::new(PersistentStore::load(storage)));
        Self {
            host,
            ui,
            context: PatchContext::new(Rc::clone(&store)),
            store,
            patches: PatchManager::new(),
            points: standard_points(),
            active: false,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Install every interception point the host supports
    pub fn activate(&mut self) -> InstallReport {
        let report = self
            .patches
            .install_all(&self.points, self.host.as_ref(), &self.context);
        self.active = true;
        info!(points = self.patches.len(), "nicknames activated");
        report
    }

    /// Remove every installed hook; returns how many points were removed
    pub fn deactivate(&mut self) -> usize {
        let removed = self.patches.uninstall_all();
        self.active = false;
        info!(removed, "nicknames deactivated");
        removed
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn patches(&self) -> &PatchManager {
        &self.patches
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn resolve(&self, user_id: &str) -> Option<Override> {
        self.context.resolve(user_id)
    }

    pub fn nickname(&self, user_id: &str) -> Option<String> {
        self.read(|store| store.nickname(user_id).map(str::to_string))
    }

    pub fn settings(&self) -> Settings {
        self.read(|store| store.settings().clone())
    }

    pub fn nickname_count(&self) -> usize {
        self.read(NicknameStore::len)
    }

    /// Saved nicknames matching `query`, labelled with the host's username
    pub fn saved_nicknames(&self, query: &str) -> Vec<SavedNickname> {
        let host = Rc::clone(&self.host);
        self.read(|store| {
            store.search(query, |user_id| {
                host.user(user_id)
                    .map(|user| user.username)
                    .unwrap_or_else(|| user_id.to_string())
            })
        })
    }

    fn read<R>(&self, read: impl FnOnce(&NicknameStore) -> R) -> R {
        read(self.store.borrow().store())
    }

    // =========================================================================
    // Nicknames
    // =========================================================================

    /// Set or clear a nickname without notifying
    pub fn set_nickname(&self, user_id: &str, raw: &str) -> Result<NicknameChange, PluginError> {
        let change = self
            .store
            .borrow_mut()
            .try_update(|store| store.set_nickname(user_id, raw))?;
        debug!(user_id, ?change, "nickname updated");
        Ok(change)
    }

    /// Set or clear a nickname and report it with a toast
    pub fn apply_nickname(&self, user_id: &str, raw: &str) -> Result<NicknameChange, PluginError> {
        let result = self.set_nickname(user_id, raw);
        match &result {
            Ok(NicknameChange::Set(nickname)) => self.ui.toast(
                &t_args("toast-nickname-set", &[("nickname", nickname.as_str())]),
                ToastLevel::Success,
            ),
            Ok(NicknameChange::Cleared) => {
                self.ui.toast(&t("toast-nickname-removed"), ToastLevel::Info)
            }
            Err(PluginError::Store(e)) => self.report_failure(e),
            Err(_) => {}
        }
        result
    }

    /// Prompt for a user's nickname, pre-filled with the current one
    ///
    /// Returns `Ok(None)` if the prompt was cancelled.
    pub fn prompt_set_nickname(
        &self,
        user_id: &str,
        display_name: &str,
    ) -> Result<Option<NicknameChange>, PluginError> {
        let prompt = InputPrompt {
            title: t("prompt-set-nickname-title"),
            placeholder: display_name.to_string(),
            initial_value: self.nickname(user_id).unwrap_or_default(),
            confirm_text: t("button-save"),
            cancel_text: t("button-cancel"),
        };
        let Some(value) = self.ui.prompt_text(&prompt) else {
            debug!(user_id, "nickname prompt cancelled");
            return Ok(None);
        };
        self.apply_nickname(user_id, &value).map(Some)
    }

    /// Remove a nickname; returns whether one existed
    pub fn remove_nickname(&self, user_id: &str) -> Result<bool, PluginError> {
        let result = self
            .store
            .borrow_mut()
            .update(|store| store.remove_nickname(user_id).is_some());
        match &result {
            Ok(_) => self.ui.toast(&t("toast-nickname-removed"), ToastLevel::Info),
            Err(e) => self.report_failure(e),
        }
        Ok(result?)
    }

    /// Delete every nickname after confirmation
    ///
    /// Returns how many were removed (zero if cancelled).
    pub fn clear_all(&self) -> Result<usize, PluginError> {
        let count = self.nickname_count();
        let confirmation = Confirmation {
            title: t("confirm-clear-all-title"),
            content: t_args("confirm-clear-all-content", &[("count", count.to_string().as_str())]),
            confirm_text: t("button-delete-all"),
            cancel_text: t("button-cancel"),
        };
        if !self.ui.confirm(&confirmation) {
            return Ok(0);
        }

        let result = self.store.borrow_mut().update(NicknameStore::clear_all);
        match &result {
            Ok(removed) => {
                info!(removed, "all nicknames cleared");
                self.ui.toast(
                    &t_args("toast-cleared", &[("count", removed.to_string().as_str())]),
                    ToastLevel::Success,
                );
            }
            Err(e) => self.report_failure(e),
        }
        Ok(result?)
    }

    // =========================================================================
    // Filter
    // =========================================================================

    pub fn add_to_filter(&self, user_id: &str) -> Result<bool, PluginError> {
        let result = self.store.borrow_mut().update(|store| store.add_to_filter(user_id));
        self.report_filter_change(&result, "toast-filter-added");
        Ok(result?)
    }

    pub fn remove_from_filter(&self, user_id: &str) -> Result<bool, PluginError> {
        let result = self
            .store
            .borrow_mut()
            .update(|store| store.remove_from_filter(user_id));
        self.report_filter_change(&result, "toast-filter-removed");
        Ok(result?)
    }

    fn report_filter_change(&self, result: &Result<bool, StoreError>, key: &str) {
        match result {
            Ok(_) => {
                let mode = self.settings().filter_mode;
                self.ui.toast(&t_args(key, &[("mode", mode.as_str())]), ToastLevel::Success);
            }
            Err(e) => self.report_failure(e),
        }
    }

    /// Empty the filter set after confirmation
    pub fn clear_filter_list(&self) -> Result<usize, PluginError> {
        let settings = self.settings();
        let confirmation = Confirmation {
            title: t("confirm-clear-filter-title"),
            content: t_args(
                "confirm-clear-filter-content",
                &[
                    ("count", settings.filtered_users.len().to_string().as_str()),
                    ("mode", settings.filter_mode.as_str()),
                ],
            ),
            confirm_text: t("button-clear"),
            cancel_text: t("button-cancel"),
        };
        if !self.ui.confirm(&confirmation) {
            return Ok(0);
        }

        let result = self.store.borrow_mut().update(NicknameStore::clear_filter);
        match &result {
            Ok(_) => self.ui.toast(&t("toast-filter-cleared"), ToastLevel::Success),
            Err(e) => self.report_failure(e),
        }
        Ok(result?)
    }

    // =========================================================================
    // Settings
    // =========================================================================

    pub fn set_enabled(&self, enabled: bool) -> Result<(), PluginError> {
        self.update_settings(|settings| settings.enabled = enabled)
    }

    pub fn set_show_prefix(&self, show_prefix: bool) -> Result<(), PluginError> {
        self.update_settings(|settings| settings.show_prefix = show_prefix)
    }

    /// Set the prefix verbatim (whitespace is kept)
    pub fn set_prefix(&self, prefix: &str) -> Result<(), PluginError> {
        self.update_settings(|settings| settings.prefix = prefix.to_string())
    }

    /// Set the suffix verbatim (whitespace is kept)
    pub fn set_suffix(&self, suffix: &str) -> Result<(), PluginError> {
        self.update_settings(|settings| settings.suffix = suffix.to_string())
    }

    pub fn set_filter_mode(&self, mode: FilterMode) -> Result<(), PluginError> {
        self.update_settings(|settings| settings.filter_mode = mode)
    }

    /// Toggle the roster override, installing or removing its hook live
    pub fn set_override_server_nicks(&mut self, enabled: bool) -> Result<(), PluginError> {
        self.update_settings(|settings| settings.override_server_nicks = enabled)?;
        if !self.is_active() {
            return Ok(());
        }
        if let Some(point) = self.points.iter().find(|p| p.name() == RosterPoint::NAME) {
            let changed = self
                .patches
                .sync(point.as_ref(), self.host.as_ref(), &self.context);
            debug!(enabled, changed, "roster override synced");
        }
        Ok(())
    }

    fn update_settings(&self, apply: impl FnOnce(&mut Settings)) -> Result<(), PluginError> {
        let result = self
            .store
            .borrow_mut()
            .update(|store| apply(store.settings_mut()));
        if let Err(e) = &result {
            self.report_failure(e);
        }
        Ok(result?)
    }

    // =========================================================================
    // Import / Export
    // =========================================================================

    /// Write every nickname as pretty JSON; returns how many were exported
    pub fn export_to(&self, sink: &dyn TextSink) -> Result<usize, PluginError> {
        let (json, count) = self.read(|store| (store.export_all(), store.len()));
        let json = json.map_err(StoreError::from)?;
        if let Err(e) = sink.write_text(&json) {
            warn!(error = %e, "failed to write export");
            self.ui.toast(&e.to_string(), ToastLevel::Error);
            return Err(PluginError::Write(e));
        }
        self.ui.toast(
            &t_args("toast-exported", &[("count", count.to_string().as_str())]),
            ToastLevel::Success,
        );
        Ok(count)
    }

    /// Read JSON from `source` and merge it into the store
    ///
    /// The store is untouched until the read completes, and untouched after
    /// it if the text is not a valid nickname map.
    pub async fn import_from(&self, source: &dyn TextSource) -> Result<ImportSummary, PluginError> {
        match source.read_text().await {
            Ok(text) => self.import_text(text.as_deref()),
            Err(e) => {
                warn!(error = %e, "failed to read import");
                self.ui.toast(
                    &t_args("toast-import-read-failed", &[("error", e.to_string().as_str())]),
                    ToastLevel::Error,
                );
                Err(PluginError::Read(e))
            }
        }
    }

    /// Merge already-read import text into the store
    pub fn import_text(&self, text: Option<&str>) -> Result<ImportSummary, PluginError> {
        let Some(text) = text.filter(|text| !text.trim().is_empty()) else {
            self.ui.toast(&t("toast-import-empty"), ToastLevel::Info);
            return Err(PluginError::NothingToImport);
        };

        let result = self
            .store
            .borrow_mut()
            .try_update(|store| store.import_all(text))
            .map_err(PluginError::from);
        match &result {
            Ok(summary) => {
                info!(imported = summary.imported, skipped = summary.skipped, "nicknames imported");
                self.ui.toast(
                    &t_args("toast-imported", &[("count", summary.imported.to_string().as_str())]),
                    ToastLevel::Success,
                );
            }
            Err(e) if e.is_malformed_import() => {
                warn!(error = %e, "rejected import");
                self.ui.toast(&t("toast-import-invalid"), ToastLevel::Error);
            }
            Err(PluginError::Store(e)) => self.report_failure(e),
            Err(_) => {}
        }
        result
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Carry out a menu command
    ///
    /// Failures have already been reported to the user, so they are only
    /// logged here.
    pub fn perform(&self, command: &NicknameCommand) {
        let result = match command {
            NicknameCommand::EditNickname {
                user_id,
                display_name,
            } => self.prompt_set_nickname(user_id, display_name).map(|_| ()),
            NicknameCommand::RemoveNickname { user_id } => {
                self.remove_nickname(user_id).map(|_| ())
            }
            NicknameCommand::AddToFilter { user_id } => self.add_to_filter(user_id).map(|_| ()),
            NicknameCommand::RemoveFromFilter { user_id } => {
                self.remove_from_filter(user_id).map(|_| ())
            }
        };
        if let Err(e) = result {
            debug!(user_id = command.user_id(), error = %e, "command failed");
        }
    }

    fn report_failure(&self, error: &StoreError) {
        warn!(error = %error, "nickname store update failed");
        let message = match error {
            StoreError::Import(ImportError::Malformed(_)) => t("toast-import-invalid"),
            other => t_args("toast-save-failed", &[("error", other.to_string().as_str())]),
        };
        self.ui.toast(&message, ToastLevel::Error);
    }
}

impl Drop for Plugin {
    fn drop(&mut self) {
        if self.is_active() {
            self.deactivate();
        }
    }
}
