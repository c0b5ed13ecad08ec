use std::rc::Rc;

use tracing::debug;

use super::{Disposer, InterceptionPoint, PatchContext, PatchError};
use crate::hook::Hook;
use crate::host::{Host, IdentitySlot, User};

/// Overrides `getDisplayName` and `getName`
///
/// Installs into whichever of the two the host exposes; one disposer
/// reverses both.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityPoint;

impl IdentityPoint {
    pub const NAME: &'static str = "identity";
}

impl InterceptionPoint for IdentityPoint {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn install(&self, host: &dyn Host, ctx: &PatchContext) -> Result<Disposer, PatchError> {
        let slots: Vec<Rc<IdentitySlot>> = [host.display_name_slot(), host.name_slot()]
            .into_iter()
            .flatten()
            .collect();
        if slots.is_empty() {
            return Err(PatchError::TargetNotFound("identity lookup"));
        }

        let parts: Vec<Disposer> = slots
            .iter()
            .map(|slot| {
                let id = slot.attach(identity_hook(ctx.clone()));
                debug!(point = Self::NAME, slot = slot.name(), "hook attached");
                Disposer::for_hook(Self::NAME, slot, id)
            })
            .collect();
        Ok(Disposer::combine(Self::NAME, parts))
    }
}

fn identity_hook(ctx: PatchContext) -> Hook<User, String> {
    Rc::new(move |user: &User, original: String| match ctx.resolve(&user.id) {
        Some(nickname) => nickname.into_string(),
        None => original,
    })
}
