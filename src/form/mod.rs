//! Form dirty-state tracking: field records, snapshots, diffing and the
//! navigation gate that protects unsaved edits.
//!
//! Fields are plain data ([`FormField`]); the TUI translates key events into
//! edits on a [`TrackedForm`], which re-diffs against its [`Snapshot`] after
//! every change.

pub mod diff;
pub mod dirty;
pub mod field;
pub mod gate;
pub mod registry;
pub mod snapshot;
pub mod tracked;

pub use diff::{ChangeSet, ComparePolicy, DiffError, diff};
pub use dirty::{Controls, DirtyState};
pub use field::{Control, ControlKind, FormField, SelectOption};
pub use gate::{Confirm, Decision, GateState, NavigationGate, Notify, Outcome, any_unsaved};
pub use registry::{FormElementIndex, Partition};
pub use snapshot::Snapshot;
pub use tracked::TrackedForm;
