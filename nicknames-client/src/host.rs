//! Host display pipeline model
//!
//! The host application owns users, rosters, rendered trees and menus. It
//! exposes the points where a name is about to be displayed as hook slots;
//! this crate only ever sees the host through the [`Host`] trait.

use std::fmt;
use std::rc::Rc;

use crate::commands::NicknameCommand;
use crate::hook::HookSlot;

// =============================================================================
// Users
// =============================================================================

/// A user as the host presents it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Stable opaque identifier
    pub id: String,
    /// Account username
    pub username: String,
    /// Optional profile-wide display name
    pub global_name: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            global_name: None,
        }
    }

    #[must_use]
    pub fn with_global_name(mut self, global_name: impl Into<String>) -> Self {
        self.global_name = Some(global_name.into());
        self
    }

    /// Name the host would show without any override
    pub fn display_label(&self) -> &str {
        self.global_name.as_deref().unwrap_or(&self.username)
    }
}

/// Arguments of a roster nickname lookup (`getNick(groupId, userId)`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterQuery {
    pub group_id: String,
    pub user_id: String,
}

impl RosterQuery {
    pub fn new(group_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            user_id: user_id.into(),
        }
    }
}

// =============================================================================
// Rendered Trees
// =============================================================================

/// Places in the UI that render a user's name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Username,
    DisplayName,
    MemberListItem,
    MessageHeader,
    UserMention,
}

impl Surface {
    pub const ALL: &'static [Surface] = &[
        Surface::Username,
        Surface::DisplayName,
        Surface::MemberListItem,
        Surface::MessageHeader,
        Surface::UserMention,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Surface::Username => "username",
            Surface::DisplayName => "display-name",
            Surface::MemberListItem => "member-list-item",
            Surface::MessageHeader => "message-header",
            Surface::UserMention => "user-mention",
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered display tree
///
/// Leaves are text. Elements may be addressed to a user, meaning the text
/// beneath them shows that user's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Element {
        tag: String,
        user: Option<User>,
        children: Vec<Node>,
    },
}

impl Node {
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(content.into())
    }

    pub fn element(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Element {
            tag: tag.into(),
            user: None,
            children,
        }
    }

    pub fn for_user(tag: impl Into<String>, user: User, children: Vec<Node>) -> Self {
        Node::Element {
            tag: tag.into(),
            user: Some(user),
            children,
        }
    }

    /// Concatenated text of every leaf, in document order
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(content) => out.push_str(content),
            Node::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }
}

// =============================================================================
// Menus
// =============================================================================

/// What happens when a menu entry is pressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuCommand {
    /// An entry the host built itself, identified by the host's own key
    Host(String),
    /// An entry added by the nickname menu augmentation
    Nickname(NicknameCommand),
}

/// One entry of a user action menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuAction {
    pub key: String,
    pub label: String,
    pub icon: Option<String>,
    pub destructive: bool,
    pub command: MenuCommand,
}

impl MenuAction {
    /// Build a host-owned entry
    pub fn host(key: impl Into<String>, label: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            command: MenuCommand::Host(key.clone()),
            key,
            label: label.into(),
            icon: None,
            destructive: false,
        }
    }
}

// =============================================================================
// Host
// =============================================================================

/// Identity lookup seam (`getDisplayName(user)` / `getName(user)`)
pub type IdentitySlot = HookSlot<User, String>;

/// Roster lookup seam (`getNick(groupId, userId)`)
pub type RosterSlot = HookSlot<RosterQuery, Option<String>>;

/// Render seam for one surface
pub type RenderSlot = HookSlot<Surface, Node>;

/// User action menu seam
pub type MenuSlot = HookSlot<User, Vec<MenuAction>>;

/// The externally-owned application nicknames are displayed in
///
/// Every seam is optional: a host that lacks one returns `None`, and the
/// corresponding interception point is skipped.
pub trait Host {
    fn display_name_slot(&self) -> Option<Rc<IdentitySlot>> {
        None
    }

    fn name_slot(&self) -> Option<Rc<IdentitySlot>> {
        None
    }

    fn roster_slot(&self) -> Option<Rc<RosterSlot>> {
        None
    }

    fn render_slot(&self, surface: Surface) -> Option<Rc<RenderSlot>> {
        let _ = surface;
        None
    }

    fn user_actions_slot(&self) -> Option<Rc<MenuSlot>> {
        None
    }

    /// Look up a user by identifier (used to label saved nicknames)
    fn user(&self, user_id: &str) -> Option<User> {
        let _ = user_id;
        None
    }
}
