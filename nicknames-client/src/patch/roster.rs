use std::rc::Rc;

use nicknames_common::{Override, Settings};
use tracing::debug;

use super::{Disposer, InterceptionPoint, PatchContext, PatchError};
use crate::hook::Hook;
use crate::host::{Host, RosterQuery};

/// Overrides per-group nicknames (`getNick(groupId, userId)`)
///
/// Only installed while `overrideServerNicks` is on; turning the setting off
/// removes the hook rather than leaving a no-op behind.
#[derive(Debug, Clone, Copy, Default)]
pub struct RosterPoint;

impl RosterPoint {
    pub const NAME: &'static str = "roster";
}

impl InterceptionPoint for RosterPoint {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn wanted(&self, settings: &Settings) -> bool {
        settings.override_server_nicks
    }

    fn install(&self, host: &dyn Host, ctx: &PatchContext) -> Result<Disposer, PatchError> {
        let slot = host
            .roster_slot()
            .ok_or(PatchError::TargetNotFound("roster lookup"))?;
        let id = slot.attach(roster_hook(ctx.clone()));
        debug!(point = Self::NAME, slot = slot.name(), "hook attached");
        Ok(Disposer::for_hook(Self::NAME, &slot, id))
    }
}

fn roster_hook(ctx: PatchContext) -> Hook<RosterQuery, Option<String>> {
    Rc::new(move |query: &RosterQuery, original: Option<String>| {
        ctx.resolve(&query.user_id)
            .map(Override::into_string)
            .or(original)
    })
}
