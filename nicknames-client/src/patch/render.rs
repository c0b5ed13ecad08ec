//! Rendered text substitution
//!
//! Runs after the host has produced a display tree. Inside any element
//! addressed to a user with an override, text leaves have that user's known
//! name replaced by the nickname. Only whole tokens are replaced, so a
//! username that happens to be a substring of other text is left alone.

use std::rc::Rc;

use tracing::debug;

use super::{Disposer, InterceptionPoint, PatchContext, PatchError};
use crate::hook::Hook;
use crate::host::{Host, Node, Surface, User};

/// Rewrites names in rendered trees on every surface the host offers
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderPoint;

impl RenderPoint {
    pub const NAME: &'static str = "render";
}

impl InterceptionPoint for RenderPoint {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn install(&self, host: &dyn Host, ctx: &PatchContext) -> Result<Disposer, PatchError> {
        let mut parts = Vec::new();
        for surface in Surface::ALL {
            let Some(slot) = host.render_slot(*surface) else {
                continue;
            };
            let id = slot.attach(render_hook(ctx.clone()));
            debug!(point = Self::NAME, %surface, "hook attached");
            parts.push(Disposer::for_hook(Self::NAME, &slot, id));
        }
        if parts.is_empty() {
            return Err(PatchError::TargetNotFound("render surfaces"));
        }
        Ok(Disposer::combine(Self::NAME, parts))
    }
}

fn render_hook(ctx: PatchContext) -> Hook<Surface, Node> {
    Rc::new(move |_: &Surface, tree: Node| substitute(tree, &ctx))
}

/// A known name and what replaces it
struct Rewrite {
    names: Vec<String>,
    replacement: String,
}

impl Rewrite {
    fn for_user(user: &User, ctx: &PatchContext) -> Option<Self> {
        let replacement = ctx.resolve(&user.id)?.into_string();
        let mut names = vec![user.username.clone()];
        if let Some(global_name) = user.global_name.as_ref().filter(|g| **g != user.username) {
            names.push(global_name.clone());
        }
        Some(Self { names, replacement })
    }

    fn apply(&self, text: &str) -> Option<String> {
        replace_tokens(text, self.names.as_slice(), &self.replacement)
    }
}

/// Substitute nicknames throughout a rendered tree
///
/// A tree with no matching text comes back unchanged.
pub fn substitute(tree: Node, ctx: &PatchContext) -> Node {
    visit(tree, None, ctx)
}

fn visit(node: Node, active: Option<&Rewrite>, ctx: &PatchContext) -> Node {
    match node {
        Node::Text(content) => match active.and_then(|rewrite| rewrite.apply(&content)) {
            Some(replaced) => Node::Text(replaced),
            None => Node::Text(content),
        },
        Node::Element {
            tag,
            user,
            children,
        } => {
            let own = user.as_ref().and_then(|u| Rewrite::for_user(u, ctx));
            let scope = own.as_ref().or(active);
            let children: Vec<Node> = children
                .into_iter()
                .map(|child| visit(child, scope, ctx))
                .collect();

            if let (Some(user), Some(rewrite)) = (&user, &own) {
                let shown: String = children.iter().map(Node::text_content).collect();
                if !shown.contains(&rewrite.replacement) {
                    debug!(user_id = %user.id, %tag, "no known name under user element");
                }
            }

            Node::Element {
                tag,
                user,
                children,
            }
        }
    }
}

/// Replace whole-token occurrences of `token` in `text`
///
/// A token boundary is the start or end of the string or any character that
/// is not alphanumeric or `_`. Returns `None` when nothing matched.
pub fn replace_token(text: &str, token: &str, replacement: &str) -> Option<String> {
    replace_tokens(text, &[token], replacement)
}

/// Replace whole-token occurrences of any of `tokens` in `text`
///
/// Every token is matched against the original text in a single pass, so
/// inserted text is never rescanned. Where matches overlap, the earliest
/// (then longest) wins.
pub fn replace_tokens<T: AsRef<str>>(text: &str, tokens: &[T], replacement: &str) -> Option<String> {
    let mut matches: Vec<(usize, usize)> = Vec::new();
    for token in tokens {
        let token = token.as_ref();
        if token.is_empty() {
            continue;
        }
        for (start, _) in text.match_indices(token) {
            let end = start + token.len();
            let open = text[..start].chars().next_back().is_none_or(|c| !is_word_char(c));
            let close = text[end..].chars().next().is_none_or(|c| !is_word_char(c));
            if open && close {
                matches.push((start, end));
            }
        }
    }
    if matches.is_empty() {
        return None;
    }
    matches.sort_unstable_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (start, end) in matches {
        if start < last {
            continue;
        }
        out.push_str(&text[last..start]);
        out.push_str(replacement);
        last = end;
    }
    out.push_str(&text[last..]);
    Some(out)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use nicknames_common::{MemoryStorage, PersistentStore};

    use super::*;
    use crate::hook::HookSlot;
    use crate::host::RenderSlot;

    fn context() -> PatchContext {
        let mut store = PersistentStore::load(Box::new(MemoryStorage::new()));
        store
            .try_update(|s| s.set_nickname("42", "Nick"))
            .expect("set");
        PatchContext::new(Rc::new(RefCell::new(store)))
    }

    fn header(user: User, name: &str) -> Node {
        Node::element(
            "header",
            vec![
                Node::for_user("name", user, vec![Node::text(name)]),
                Node::text(" alice wrote"),
            ],
        )
    }

    #[test]
    fn test_replace_token_boundaries() {
        assert_eq!(replace_token("alice", "alice", "Nick").as_deref(), Some("Nick"));
        assert_eq!(replace_token("@alice!", "alice", "Nick").as_deref(), Some("@Nick!"));
        assert_eq!(
            replace_token("alice and alice", "alice", "N").as_deref(),
            Some("N and N")
        );
        assert_eq!(replace_token("malice", "alice", "Nick"), None);
        assert_eq!(replace_token("alice_b", "alice", "Nick"), None);
        assert_eq!(replace_token("alice2 alice", "alice", "N").as_deref(), Some("alice2 N"));
        assert_eq!(replace_token("bob", "", "Nick"), None);
    }

    #[test]
    fn test_replace_token_at_start_only() {
        assert_eq!(replace_token("alice: hi", "alice", "N").as_deref(), Some("N: hi"));
        assert_eq!(replace_token("alicex alice", "alice", "N").as_deref(), Some("alicex N"));
    }

    #[test]
    fn test_replace_tokens_never_rescans_replacement() {
        assert_eq!(
            replace_tokens("bob", &["bob", "Bobby"], "[Bobby]").as_deref(),
            Some("[Bobby]")
        );
        assert_eq!(
            replace_tokens("bob and Bobby", &["bob", "Bobby"], "N").as_deref(),
            Some("N and N")
        );
        assert_eq!(replace_tokens("bobby", &["bob", "Bobby"], "N"), None);
        assert_eq!(replace_tokens("Ann Lee", &["Ann", "Ann Lee"], "N").as_deref(), Some("N"));
    }

    #[test]
    fn test_nickname_containing_global_name_with_affixes() {
        let mut store = PersistentStore::load(Box::new(MemoryStorage::new()));
        store
            .try_update(|s| s.set_nickname("7", "Bobby"))
            .expect("set");
        store
            .update(|s| {
                let settings = s.settings_mut();
                settings.show_prefix = true;
                settings.prefix = "[".to_string();
                settings.suffix = "]".to_string();
            })
            .expect("settings");
        let ctx = PatchContext::new(Rc::new(RefCell::new(store)));

        let user = User::new("7", "bob").with_global_name("Bobby");
        let tree = Node::for_user("name", user.clone(), vec![Node::text("bob")]);
        assert_eq!(substitute(tree, &ctx).text_content(), "[Bobby]");

        let tree = Node::for_user("name", user, vec![Node::text("Bobby (bob)")]);
        assert_eq!(substitute(tree, &ctx).text_content(), "[Bobby] ([Bobby])");
    }

    #[test]
    fn test_substitution_is_scoped_to_user_element() {
        let ctx = context();
        let tree = substitute(header(User::new("42", "alice"), "alice"), &ctx);
        // Text outside the user element is untouched
        assert_eq!(tree.text_content(), "Nick alice wrote");
    }

    #[test]
    fn test_global_name_is_replaced() {
        let ctx = context();
        let user = User::new("42", "alice").with_global_name("Alice A");
        let tree = substitute(header(user, "Alice A"), &ctx);
        assert_eq!(tree.text_content(), "Nick alice wrote");
    }

    #[test]
    fn test_unknown_user_is_unchanged() {
        let ctx = context();
        let tree = header(User::new("7", "alice"), "alice");
        assert_eq!(substitute(tree.clone(), &ctx), tree);
    }

    #[test]
    fn test_mismatched_text_is_unchanged() {
        let ctx = context();
        let tree = header(User::new("42", "alice"), "someone else");
        assert_eq!(substitute(tree.clone(), &ctx), tree);
    }

    #[test]
    fn test_installs_on_offered_surfaces() {
        struct Mentions(Rc<RenderSlot>);
        impl Host for Mentions {
            fn render_slot(&self, surface: Surface) -> Option<Rc<RenderSlot>> {
                (surface == Surface::UserMention).then(|| Rc::clone(&self.0))
            }
        }

        let ctx = context();
        let host = Mentions(HookSlot::new("mention"));
        let disposer = RenderPoint.install(&host, &ctx).expect("install");

        let mention = Node::for_user("mention", User::new("42", "alice"), vec![Node::text("@alice")]);
        assert_eq!(
            host.0.call(&Surface::UserMention, mention.clone()).text_content(),
            "@Nick"
        );

        disposer.dispose().expect("dispose");
        assert_eq!(host.0.call(&Surface::UserMention, mention.clone()), mention);
    }

    #[test]
    fn test_no_surfaces_is_a_miss() {
        struct Bare;
        impl Host for Bare {}
        assert!(matches!(
            RenderPoint.install(&Bare, &context()),
            Err(PatchError::TargetNotFound(_))
        ));
    }
}
