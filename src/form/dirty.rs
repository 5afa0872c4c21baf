//! Dirty-state controller: derives control enablement from the change set.

use super::diff::{ChangeSet, ComparePolicy, DiffError};
use super::field::FormField;
use super::snapshot::Snapshot;

/// Enablement of the form's actions and the tab's unsaved marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    /// Save is only possible with pending changes.
    pub submit_enabled: bool,
    /// Forwarding is blocked while changes are pending.
    pub send_enabled: bool,
    /// The owning tab shows an unsaved indicator.
    pub unsaved: bool,
}

/// Current change set of a form plus the explicitly set send state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirtyState {
    changes: ChangeSet,
    send_allowed: bool,
}

impl DirtyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes the change set against `snapshot`.
    ///
    /// Does nothing until the snapshot has been taken. Safe to call
    /// repeatedly.
    pub fn refresh(
        &mut self,
        snapshot: &Snapshot,
        live: &[FormField],
        policy: &ComparePolicy,
    ) -> Result<(), DiffError> {
        if !snapshot.is_taken() {
            return Ok(());
        }
        self.changes = snapshot.diff(live, policy)?;
        tracing::trace!(changes = %self.changes, "form change set refreshed");
        Ok(())
    }

    /// Sets the send control's own state, e.g. disabled once forwarded.
    pub fn set_send_allowed(&mut self, allowed: bool) {
        self.send_allowed = allowed;
    }

    pub fn send_allowed(&self) -> bool {
        self.send_allowed
    }

    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    pub fn is_dirty(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Derives the enablement of submit, send and the unsaved marker.
    pub fn controls(&self) -> Controls {
        let dirty = self.is_dirty();
        Controls {
            submit_enabled: dirty,
            send_enabled: !dirty && self.send_allowed,
            unsaved: dirty,
        }
    }
}
