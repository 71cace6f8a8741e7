//! Modal visibility state.
//!
//! # Invariants
//! - The create modal is structural: it only toggles between `Closed` and
//!   `Open` and keeps no per-invocation data.
//! - View and delete-confirmation modals are transient: each open carries
//!   its own payload, replaces any previous instance of the same kind, and
//!   closing drops the payload so nothing leaks into a later open.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Which dialog of a module an action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalKind {
    Create,
    View,
    DeleteConfirm,
}

impl ModalKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::View => "view",
            Self::DeleteConfirm => "delete",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "create" => Some(Self::Create),
            "view" => Some(Self::View),
            "delete" | "delete_confirm" => Some(Self::DeleteConfirm),
            _ => None,
        }
    }

    pub fn is_transient(self) -> bool {
        !matches!(self, Self::Create)
    }
}

impl Display for ModalKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

/// Pre-existing dialog whose visibility toggles.
#[derive(Debug, Clone, Default)]
pub struct StructuralModal {
    state: ModalState,
}

impl StructuralModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.state = ModalState::Open;
    }

    /// Returns whether the modal was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.state, ModalState::Closed) == ModalState::Open
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ModalState::Open
    }
}

/// Dialog constructed per invocation around `payload`.
#[derive(Debug, Clone)]
pub struct TransientModal<T> {
    payload: Option<T>,
}

impl<T> Default for TransientModal<T> {
    fn default() -> Self {
        Self { payload: None }
    }
}

impl<T> TransientModal<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens around `payload`, returning the discarded previous instance.
    pub fn open(&mut self, payload: T) -> Option<T> {
        self.payload.replace(payload)
    }

    /// Closes and hands back the payload, if any.
    pub fn close(&mut self) -> Option<T> {
        self.payload.take()
    }

    pub fn current(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    pub fn state(&self) -> ModalState {
        if self.payload.is_some() {
            ModalState::Open
        } else {
            ModalState::Closed
        }
    }

    pub fn is_open(&self) -> bool {
        self.payload.is_some()
    }
}
