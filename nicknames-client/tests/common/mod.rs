//! Shared fixtures for client integration tests

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use nicknames_client::hook::HookSlot;
use nicknames_client::host::{
    Host, IdentitySlot, MenuAction, MenuSlot, Node, RenderSlot, RosterQuery, RosterSlot, Surface,
    User,
};
use nicknames_client::ui::{Confirmation, InputPrompt, ToastLevel, Ui};
use nicknames_client::Plugin;
use nicknames_common::MemoryStorage;

/// In-memory chat host exposing every seam
pub struct TestHost {
    pub display_name: Rc<IdentitySlot>,
    pub name: Rc<IdentitySlot>,
    pub roster: Rc<RosterSlot>,
    pub renders: HashMap<Surface, Rc<RenderSlot>>,
    pub user_actions: Rc<MenuSlot>,
    users: HashMap<String, User>,
}

impl TestHost {
    pub fn new() -> Self {
        let renders = Surface::ALL
            .iter()
            .map(|surface| (*surface, HookSlot::new(surface.as_str())))
            .collect();
        Self {
            display_name: HookSlot::new("getDisplayName"),
            name: HookSlot::new("getName"),
            roster: HookSlot::new("getNick"),
            renders,
            user_actions: HookSlot::new("getUserActions"),
            users: HashMap::new(),
        }
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.users.insert(user.id.clone(), user);
        self
    }

    /// Name the host would display for a user
    pub fn display_name_of(&self, user: &User) -> String {
        self.display_name
            .call(user, user.display_label().to_string())
    }

    pub fn name_of(&self, user: &User) -> String {
        self.name.call(user, user.username.clone())
    }

    /// Group nickname lookup with the host's own value
    pub fn nick_in_group(&self, user_id: &str, server_nick: Option<&str>) -> Option<String> {
        let query = RosterQuery::new("guild-1", user_id);
        self.roster.call(&query, server_nick.map(str::to_string))
    }

    pub fn render(&self, surface: Surface, tree: Node) -> Node {
        self.renders[&surface].call(&surface, tree)
    }

    /// Action menu as the host builds it, after hooks
    pub fn menu_for(&self, user: &User) -> Vec<MenuAction> {
        let actions = vec![
            MenuAction::host("profile", "View Profile"),
            MenuAction::host("message", "Message"),
            MenuAction::host("block", "Block"),
            MenuAction::host("report", "Report"),
        ];
        self.user_actions.call(user, actions)
    }

    /// Hooks attached across every seam
    pub fn attached_hooks(&self) -> usize {
        self.display_name.len()
            + self.name.len()
            + self.roster.len()
            + self.user_actions.len()
            + self.renders.values().map(|slot| slot.len()).sum::<usize>()
    }

    /// Whether anything besides the host refers to a seam
    pub fn seams_unreferenced(&self) -> bool {
        fn alone<A: ?Sized, R>(slot: &Rc<HookSlot<A, R>>) -> bool {
            Rc::strong_count(slot) == 1 && Rc::weak_count(slot) == 0
        }
        alone(&self.display_name)
            && alone(&self.name)
            && alone(&self.roster)
            && alone(&self.user_actions)
            && self.renders.values().all(|slot| alone(slot))
    }
}

impl Host for TestHost {
    fn display_name_slot(&self) -> Option<Rc<IdentitySlot>> {
        Some(Rc::clone(&self.display_name))
    }

    fn name_slot(&self) -> Option<Rc<IdentitySlot>> {
        Some(Rc::clone(&self.name))
    }

    fn roster_slot(&self) -> Option<Rc<RosterSlot>> {
        Some(Rc::clone(&self.roster))
    }

    fn render_slot(&self, surface: Surface) -> Option<Rc<RenderSlot>> {
        self.renders.get(&surface).cloned()
    }

    fn user_actions_slot(&self) -> Option<Rc<MenuSlot>> {
        Some(Rc::clone(&self.user_actions))
    }

    fn user(&self, user_id: &str) -> Option<User> {
        self.users.get(user_id).cloned()
    }
}

/// UI that records what it was asked and answers from a script
#[derive(Default)]
pub struct RecordingUi {
    pub toasts: RefCell<Vec<(String, ToastLevel)>>,
    pub confirmations: RefCell<Vec<Confirmation>>,
    pub prompts: RefCell<Vec<InputPrompt>>,
    pub confirm_answer: Cell<bool>,
    pub prompt_answer: RefCell<Option<String>>,
}

impl RecordingUi {
    pub fn last_toast(&self) -> Option<String> {
        self.toasts
            .borrow()
            .last()
            .map(|(message, _)| message.clone())
    }

    pub fn answer_prompt(&self, answer: &str) {
        *self.prompt_answer.borrow_mut() = Some(answer.to_string());
    }
}

impl Ui for RecordingUi {
    fn toast(&self, message: &str, level: ToastLevel) {
        self.toasts.borrow_mut().push((message.to_string(), level));
    }

    fn confirm(&self, confirmation: &Confirmation) -> bool {
        self.confirmations.borrow_mut().push(confirmation.clone());
        self.confirm_answer.get()
    }

    fn prompt_text(&self, prompt: &InputPrompt) -> Option<String> {
        self.prompts.borrow_mut().push(prompt.clone());
        self.prompt_answer.borrow().clone()
    }
}

/// Everything a test needs around one plugin
pub struct Harness {
    pub host: Rc<TestHost>,
    pub ui: Rc<RecordingUi>,
    pub storage: MemoryStorage,
    pub plugin: Plugin,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(TestHost::new(), MemoryStorage::new())
    }

    pub fn with(host: TestHost, storage: MemoryStorage) -> Self {
        let host = Rc::new(host);
        let ui = Rc::new(RecordingUi::default());
        let plugin = Plugin::new(host.clone(), ui.clone(), Box::new(storage.clone()));
        Self {
            host,
            ui,
            storage,
            plugin,
        }
    }
}

pub fn alice() -> User {
    User::new("42", "alice")
}

pub fn bob() -> User {
    User::new("7", "bob")
}
