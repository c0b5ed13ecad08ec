//! Interception points
//!
//! Each point knows how to attach a hook to one class of host seam and
//! hands back a [`Disposer`] that reverses exactly that attachment. The
//! [`PatchManager`] keeps the disposers and guarantees each runs once.

mod identity;
mod manager;
mod menu;
mod render;
mod roster;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use nicknames_common::{NicknameStore, Override, PersistentStore, Settings, resolve};
use thiserror::Error;
use tracing::{debug, error};

use crate::hook::{HookId, HookSlot};
use crate::host::Host;

pub use identity::IdentityPoint;
pub use manager::{InstallOutcome, InstallReport, PatchManager};
pub use menu::{MenuPoint, insertion_index, nickname_entries};
pub use render::{RenderPoint, replace_token, substitute};
pub use roster::RosterPoint;

/// Store shared between the plugin and every installed hook
pub type SharedStore = Rc<RefCell<PersistentStore>>;

/// Errors raised while installing or removing a hook
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("host does not expose {0}")]
    TargetNotFound(&'static str),
    #[error("hook on {slot} was already detached")]
    AlreadyDetached { slot: &'static str },
    #[error("{slot} was dropped by the host")]
    TargetDropped { slot: &'static str },
}

// =============================================================================
// Interception Point
// =============================================================================

/// One class of host seam the plugin intercepts
pub trait InterceptionPoint {
    fn name(&self) -> &'static str;

    /// Whether current settings call for this point to be installed
    fn wanted(&self, settings: &Settings) -> bool {
        let _ = settings;
        true
    }

    /// Attach hooks to the host, returning the handle that removes them
    fn install(&self, host: &dyn Host, ctx: &PatchContext) -> Result<Disposer, PatchError>;
}

/// The four points in installation order
pub fn standard_points() -> Vec<Box<dyn InterceptionPoint>> {
    vec![
        Box::new(IdentityPoint),
        Box::new(RosterPoint),
        Box::new(RenderPoint),
        Box::new(MenuPoint),
    ]
}

// =============================================================================
// Disposer
// =============================================================================

type Undo = Box<dyn FnOnce() -> Result<(), PatchError>>;

/// Reverses one install
///
/// Runs at most once. A disposer dropped without being disposed still
/// detaches its hooks, logging any failure.
pub struct Disposer {
    point: &'static str,
    undo: Vec<Undo>,
}

impl std::fmt::Debug for Disposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Disposer")
            .field("point", &self.point)
            .field("pending", &self.undo.len())
            .finish()
    }
}

impl Disposer {
    pub fn new(point: &'static str, undo: impl FnOnce() -> Result<(), PatchError> + 'static) -> Self {
        Self {
            point,
            undo: vec![Box::new(undo)],
        }
    }

    /// Disposer detaching `id` from `slot`
    ///
    /// Holds the slot weakly so an installed hook never keeps the host alive.
    pub fn for_hook<A, R>(point: &'static str, slot: &Rc<HookSlot<A, R>>, id: HookId) -> Self
    where
        A: ?Sized + 'static,
        R: 'static,
    {
        let name = slot.name();
        let slot: Weak<HookSlot<A, R>> = Rc::downgrade(slot);
        Self::new(point, move || {
            let slot = slot.upgrade().ok_or(PatchError::TargetDropped { slot: name })?;
            if slot.detach(id) {
                debug!(point, slot = name, "hook detached");
                Ok(())
            } else {
                Err(PatchError::AlreadyDetached { slot: name })
            }
        })
    }

    /// Merge several disposers into one
    pub fn combine(point: &'static str, parts: impl IntoIterator<Item = Disposer>) -> Self {
        let undo = parts
            .into_iter()
            .flat_map(|mut part| std::mem::take(&mut part.undo))
            .collect();
        Self { point, undo }
    }

    pub fn point(&self) -> &'static str {
        self.point
    }

    /// Run every undo step
    ///
    /// All steps run even if one fails; the first failure is returned.
    pub fn dispose(mut self) -> Result<(), PatchError> {
        self.run()
    }

    fn run(&mut self) -> Result<(), PatchError> {
        let mut first = None;
        for undo in std::mem::take(&mut self.undo) {
            if let Err(e) = undo() {
                first.get_or_insert(e);
            }
        }
        first.map_or(Ok(()), Err)
    }
}

impl Drop for Disposer {
    fn drop(&mut self) {
        if self.undo.is_empty() {
            return;
        }
        if let Err(e) = self.run() {
            error!(point = self.point, error = %e, "failed to dispose dropped hook");
        }
    }
}

// =============================================================================
// Context
// =============================================================================

/// What installed hooks see of the plugin
#[derive(Clone)]
pub struct PatchContext {
    store: SharedStore,
}

impl PatchContext {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Resolve a user's override, falling back to the original name
    ///
    /// Never panics: if the store is being mutated while the host calls back
    /// into a hook, the original name is shown.
    pub fn resolve(&self, user_id: &str) -> Option<Override> {
        match self.store.try_borrow() {
            Ok(store) => resolve(user_id, store.store()),
            Err(_) => {
                debug!(user_id, "store busy, showing original name");
                None
            }
        }
    }

    /// Read the store, or `None` if it is mutably borrowed
    pub fn with_store<R>(&self, read: impl FnOnce(&NicknameStore) -> R) -> Option<R> {
        match self.store.try_borrow() {
            Ok(store) => Some(read(store.store())),
            Err(_) => {
                debug!("store busy, skipping read");
                None
            }
        }
    }
}
