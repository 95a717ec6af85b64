//! Callback registry.
//!
//! Callbacks live in an arena of slots indexed by [`CallbackHandle`]. Slots
//! are never reused, so iteration order is registration order and a stale
//! handle can never reach a newer callback.

use courier_core::{Action, Callback};
use std::sync::Arc;

/// Identifies a registered callback.
///
/// Returned by every registration; pass it to `attach` to add actions to the
/// same callback, or to `off` to unregister it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallbackHandle(usize);

impl CallbackHandle {
    /// The slot index behind this handle.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A shared, dynamically dispatched callback.
pub type SharedCallback<C, T> = Arc<dyn Callback<C, T>>;

/// A callback with the actions it is registered for.
pub struct Registration<C, T> {
    callback: SharedCallback<C, T>,
    actions: Vec<Action<T>>,
}

impl<C, T> Registration<C, T> {
    /// The registered callback.
    pub fn callback(&self) -> &SharedCallback<C, T> {
        &self.callback
    }

    /// The actions the callback fires on.
    pub fn actions(&self) -> &[Action<T>] {
        &self.actions
    }
}

impl<C, T> Clone for Registration<C, T> {
    fn clone(&self) -> Self {
        Self {
            callback: self.callback.clone(),
            actions: self.actions.clone(),
        }
    }
}

/// Insertion-ordered storage of registrations.
pub(crate) struct Registry<C, T> {
    slots: Vec<Option<Registration<C, T>>>,
    live: usize,
}

impl<C, T> Registry<C, T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
        }
    }

    pub(crate) fn insert(
        &mut self,
        callback: SharedCallback<C, T>,
        actions: Vec<Action<T>>,
    ) -> CallbackHandle {
        let handle = CallbackHandle(self.slots.len());
        self.slots.push(Some(Registration { callback, actions }));
        self.live += 1;
        handle
    }

    /// Add `action` to a live registration. Returns `false` for a stale handle.
    pub(crate) fn attach(&mut self, handle: CallbackHandle, action: Action<T>) -> bool {
        match self.slots.get_mut(handle.0) {
            Some(Some(registration)) => {
                registration.actions.push(action);
                true
            }
            _ => false,
        }
    }

    /// Empty a slot. Returns `false` if it was already empty.
    pub(crate) fn remove(&mut self, handle: CallbackHandle) -> bool {
        let removed = self.slots.get_mut(handle.0).and_then(Option::take).is_some();
        if removed {
            self.live -= 1;
        }
        removed
    }

    pub(crate) fn get(&self, handle: CallbackHandle) -> Option<&Registration<C, T>> {
        self.slots.get(handle.0).and_then(Option::as_ref)
    }

    /// Copy of the live registrations, in registration order.
    pub(crate) fn snapshot(&self) -> Vec<(CallbackHandle, Registration<C, T>)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                slot.as_ref()
                    .map(|registration| (CallbackHandle(index), registration.clone()))
            })
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.live
    }
}

impl<C, T> Clone for Registry<C, T> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            live: self.live,
        }
    }
}
