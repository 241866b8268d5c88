//! Per-concern authority.
//!
//! Each of sort, search, pagination and selection is either owned by the
//! controller (uncontrolled) or by the caller (controlled). The mode is fixed
//! when the controller is built, from whether a change callback was supplied,
//! and every interaction handler matches on it exactly once.

use std::fmt;

use crate::engine::{SelectionSet, SortState};
use crate::error::CallbackError;

/// Receives the requested sort.
pub type SortCallback = Box<dyn FnMut(&SortState) -> Result<(), CallbackError>>;

/// Receives the typed search term.
pub type SearchCallback = Box<dyn FnMut(&str) -> Result<(), CallbackError>>;

/// Receives the requested page number.
pub type PageCallback = Box<dyn FnMut(usize) -> Result<(), CallbackError>>;

/// Receives the new selection.
pub type SelectCallback<K> = Box<dyn FnMut(&SelectionSet<K>) -> Result<(), CallbackError>>;

/// Who owns a concern's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Controlled,
    Uncontrolled,
}

/// Authority over a concern, holding the caller's callback when controlled.
pub enum Authority<F> {
    /// The controller applies changes itself.
    Uncontrolled,
    /// The controller reports changes through the callback.
    Controlled(F),
}

impl<F> Authority<F> {
    /// `Controlled` when a callback is present.
    pub fn from_callback(callback: Option<F>) -> Self {
        match callback {
            Some(f) => Authority::Controlled(f),
            None => Authority::Uncontrolled,
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Authority::Controlled(_) => Mode::Controlled,
            Authority::Uncontrolled => Mode::Uncontrolled,
        }
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self, Authority::Controlled(_))
    }
}

impl<F> fmt::Debug for Authority<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Authority::Controlled(_) => f.write_str("Controlled(..)"),
            Authority::Uncontrolled => f.write_str("Uncontrolled"),
        }
    }
}

/// A concern's current value together with its authority.
pub struct ConcernState<T, F> {
    pub value: T,
    pub authority: Authority<F>,
}

impl<T, F> ConcernState<T, F> {
    pub fn new(value: T, callback: Option<F>) -> Self {
        Self {
            value,
            authority: Authority::from_callback(callback),
        }
    }

    pub fn mode(&self) -> Mode {
        self.authority.mode()
    }
}

impl<T: fmt::Debug, F> fmt::Debug for ConcernState<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcernState")
            .field("value", &self.value)
            .field("authority", &self.authority)
            .finish()
    }
}
