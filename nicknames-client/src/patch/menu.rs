use std::rc::Rc;

use nicknames_common::NicknameStore;
use tracing::debug;

use super::{Disposer, InterceptionPoint, PatchContext, PatchError};
use crate::commands::NicknameCommand;
use crate::hook::Hook;
use crate::host::{Host, MenuAction, MenuCommand, User};
use crate::i18n::t;

const EDIT_ICON: &str = "ic_edit";
const REMOVE_ICON: &str = "ic_message_delete";
const FILTER_ICON: &str = "ic_filter";

/// Host entries our entries are placed in front of
const ANCHOR_KEYS: &[&str] = &["block", "ignore"];
const ANCHOR_LABELS: &[&str] = &["Block", "Ignore"];

/// Adds nickname entries to the user action menu
///
/// Entries appear even while nicknames are disabled, so a user can still be
/// given a nickname ahead of turning the feature back on.
#[derive(Debug, Clone, Copy, Default)]
pub struct MenuPoint;

impl MenuPoint {
    pub const NAME: &'static str = "menu";
}

impl InterceptionPoint for MenuPoint {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn install(&self, host: &dyn Host, ctx: &PatchContext) -> Result<Disposer, PatchError> {
        let slot = host
            .user_actions_slot()
            .ok_or(PatchError::TargetNotFound("user action menu"))?;
        let id = slot.attach(menu_hook(ctx.clone()));
        debug!(point = Self::NAME, slot = slot.name(), "hook attached");
        Ok(Disposer::for_hook(Self::NAME, &slot, id))
    }
}

fn menu_hook(ctx: PatchContext) -> Hook<User, Vec<MenuAction>> {
    Rc::new(move |user: &User, mut actions: Vec<MenuAction>| {
        let Some(entries) = ctx.with_store(|store| nickname_entries(user, store)) else {
            return actions;
        };
        let at = insertion_index(&actions);
        actions.splice(at..at, entries);
        actions
    })
}

/// Menu entries for one user, reflecting current state
pub fn nickname_entries(user: &User, store: &NicknameStore) -> Vec<MenuAction> {
    let has_nickname = store.has_nickname(&user.id);
    let mut entries = Vec::with_capacity(3);

    entries.push(MenuAction {
        key: "set-custom-nickname".to_string(),
        label: t(if has_nickname {
            "menu-edit-nickname"
        } else {
            "menu-set-nickname"
        }),
        icon: Some(EDIT_ICON.to_string()),
        destructive: false,
        command: MenuCommand::Nickname(NicknameCommand::EditNickname {
            user_id: user.id.clone(),
            display_name: user.display_label().to_string(),
        }),
    });

    if has_nickname {
        entries.push(MenuAction {
            key: "remove-custom-nickname".to_string(),
            label: t("menu-remove-nickname"),
            icon: Some(REMOVE_ICON.to_string()),
            destructive: true,
            command: MenuCommand::Nickname(NicknameCommand::RemoveNickname {
                user_id: user.id.clone(),
            }),
        });
    }

    let settings = store.settings();
    if settings.filter_mode.is_active() {
        let listed = settings.is_filtered(&user.id);
        let key = format!(
            "{}-{}",
            if listed { "remove" } else { "add" },
            settings.filter_mode.as_str()
        );
        let user_id = user.id.clone();
        entries.push(MenuAction {
            label: t(&format!("menu-{key}")),
            key,
            icon: Some(FILTER_ICON.to_string()),
            destructive: false,
            command: MenuCommand::Nickname(if listed {
                NicknameCommand::RemoveFromFilter { user_id }
            } else {
                NicknameCommand::AddToFilter { user_id }
            }),
        });
    }

    entries
}

/// Where nickname entries go: before the first block/ignore entry, else last
pub fn insertion_index(actions: &[MenuAction]) -> usize {
    actions
        .iter()
        .position(|action| {
            ANCHOR_KEYS.contains(&action.key.as_str())
                || ANCHOR_LABELS.iter().any(|label| action.label.contains(label))
        })
        .unwrap_or(actions.len())
}
