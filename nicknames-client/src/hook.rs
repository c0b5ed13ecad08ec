//! Hook slots
//!
//! A [`HookSlot`] is a seam the host exposes at one point of its display
//! pipeline. The host computes its original value, then passes it through
//! every attached hook in attachment order before using it. Hooks are keyed
//! by a [`HookId`] so each one can be detached individually.
//!
//! Slots are single-threaded (`Rc`/`RefCell`). Calling a slot does not hold
//! the internal borrow while hooks run, so a hook may re-enter the host and
//! trigger further slot calls.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// A hook receives the call arguments and the value produced so far
pub type Hook<A, R> = Rc<dyn Fn(&A, R) -> R>;

/// Handle for one attached hook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HookId(u64);

/// An interceptable point in the host's display pipeline
pub struct HookSlot<A: ?Sized, R> {
    name: &'static str,
    next_id: Cell<u64>,
    hooks: RefCell<Vec<(HookId, Hook<A, R>)>>,
}

impl<A: ?Sized, R> fmt::Debug for HookSlot<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookSlot")
            .field("name", &self.name)
            .field("hooks", &self.len())
            .finish()
    }
}

impl<A: ?Sized, R> HookSlot<A, R> {
    /// Create an empty slot
    pub fn new(name: &'static str) -> Rc<Self> {
        Rc::new(Self {
            name,
            next_id: Cell::new(0),
            hooks: RefCell::new(Vec::new()),
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of attached hooks
    pub fn len(&self) -> usize {
        self.hooks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.borrow().is_empty()
    }

    /// Attach a hook, returning the handle needed to detach it
    pub fn attach(&self, hook: Hook<A, R>) -> HookId {
        let id = HookId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.hooks.borrow_mut().push((id, hook));
        id
    }

    /// Detach a hook
    ///
    /// Returns `false` if no hook with this handle is attached.
    pub fn detach(&self, id: HookId) -> bool {
        let mut hooks = self.hooks.borrow_mut();
        match hooks.iter().position(|(hook_id, _)| *hook_id == id) {
            Some(index) => {
                hooks.remove(index);
                true
            }
            None => false,
        }
    }

    /// Run `original` through every attached hook
    pub fn call(&self, args: &A, original: R) -> R {
        let hooks: Vec<Hook<A, R>> = self
            .hooks
            .borrow()
            .iter()
            .map(|(_, hook)| Rc::clone(hook))
            .collect();
        hooks
            .into_iter()
            .fold(original, |value, hook| hook(args, value))
    }
}
