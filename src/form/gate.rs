//! Navigation gate: holds back actions that would discard unsaved edits.
//!
//! Stepwise use from an event loop:
//!
//! 1. [`NavigationGate::request`] either proceeds immediately (clean form)
//!    or parks the navigation and waits for a decision.
//! 2. [`NavigationGate::resolve`] turns the user's [`Decision`] into an
//!    [`Outcome`].
//! 3. For [`Outcome::SaveThenProceed`] the caller saves and hands the result
//!    to [`NavigationGate::finish_save`], which releases the navigation only
//!    on success.
//!
//! [`NavigationGate::navigate`] runs all three steps with blocking
//! collaborators.

use std::fmt::Display;

/// Gate state as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// No pending changes.
    Clean,
    /// The form has pending changes.
    Dirty,
    /// A navigation is waiting for the user to decide.
    PendingConfirmation,
}

/// The user's answer to the save-or-discard prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Save,
    Discard,
    /// Closed without an explicit choice. Treated as [`Decision::Discard`].
    Dismiss,
}

/// Result of one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<N> {
    /// Run the navigation now.
    Proceed(N),
    /// Save the active entity, then run the navigation.
    SaveThenProceed(N),
    /// The navigation will not run.
    Cancelled,
}

impl<N> Outcome<N> {
    /// Maps the carried navigation.
    pub fn map<M>(self, f: impl FnOnce(N) -> M) -> Outcome<M> {
        match self {
            Self::Proceed(n) => Outcome::Proceed(f(n)),
            Self::SaveThenProceed(n) => Outcome::SaveThenProceed(f(n)),
            Self::Cancelled => Outcome::Cancelled,
        }
    }
}

/// Modal save-or-discard confirmation.
pub trait Confirm {
    fn confirm_save(&mut self) -> Decision;
}

/// Fire-and-forget user feedback.
pub trait Notify {
    fn success(&mut self, message: &str);
    fn error(&mut self, message: &str, timeout_secs: u64);
}

/// How long save failures stay on screen.
pub const SAVE_ERROR_TIMEOUT_SECS: u64 = 8;

/// Per-form gate holding at most one parked navigation.
#[derive(Debug, Clone)]
pub struct NavigationGate<N> {
    pending: Option<N>,
}

impl<N> Default for NavigationGate<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> NavigationGate<N> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Returns the gate state given whether the guarded form is dirty.
    pub fn state(&self, dirty: bool) -> GateState {
        match (&self.pending, dirty) {
            (Some(_), _) => GateState::PendingConfirmation,
            (None, true) => GateState::Dirty,
            (None, false) => GateState::Clean,
        }
    }

    /// Returns the parked navigation, if any.
    pub fn pending(&self) -> Option<&N> {
        self.pending.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Attempts a navigation.
    ///
    /// Returns `Some(Proceed)` when the form is clean and `None` after
    /// parking the navigation behind a confirmation. An attempt made while
    /// another one is parked is `Some(Cancelled)`.
    pub fn request(&mut self, dirty: bool, nav: N) -> Option<Outcome<N>> {
        if self.pending.is_some() {
            tracing::debug!("navigation dropped: confirmation already pending");
            return Some(Outcome::Cancelled);
        }
        if !dirty {
            return Some(Outcome::Proceed(nav));
        }
        tracing::debug!("navigation parked behind save confirmation");
        self.pending = Some(nav);
        None
    }

    /// Applies the user's decision to the parked navigation.
    pub fn resolve(&mut self, decision: Decision) -> Outcome<N> {
        let Some(nav) = self.pending.take() else {
            return Outcome::Cancelled;
        };
        tracing::debug!(?decision, "save confirmation resolved");
        match decision {
            Decision::Save => Outcome::SaveThenProceed(nav),
            Decision::Discard | Decision::Dismiss => Outcome::Proceed(nav),
        }
    }

    /// Completes a [`Outcome::SaveThenProceed`].
    ///
    /// On success the navigation is returned for the caller to run. On
    /// failure the error is reported through `notifier` and the navigation
    /// is dropped.
    pub fn finish_save<E: Display>(
        nav: N,
        result: Result<(), E>,
        notifier: &mut impl Notify,
    ) -> Option<N> {
        match result {
            Ok(()) => Some(nav),
            Err(e) => {
                tracing::warn!(error = %e, "save before navigation failed");
                notifier.error(&format!("Save failed: {e}"), SAVE_ERROR_TIMEOUT_SECS);
                None
            }
        }
    }

    /// Runs a whole navigation attempt with blocking collaborators.
    ///
    /// `proceed` is the navigation continuation. It runs for
    /// [`Outcome::Proceed`] and after a successful save, never after a
    /// failed one.
    pub fn navigate<R, E: Display>(
        &mut self,
        dirty: bool,
        nav: N,
        confirm: &mut impl Confirm,
        save: impl FnOnce() -> Result<(), E>,
        notifier: &mut impl Notify,
        proceed: impl FnOnce(N) -> R,
    ) -> Outcome<R> {
        let outcome = match self.request(dirty, nav) {
            Some(outcome) => outcome,
            None => self.resolve(confirm.confirm_save()),
        };
        match outcome {
            Outcome::Proceed(nav) => Outcome::Proceed(proceed(nav)),
            Outcome::SaveThenProceed(nav) => match Self::finish_save(nav, save(), notifier) {
                Some(nav) => Outcome::SaveThenProceed(proceed(nav)),
                None => Outcome::Cancelled,
            },
            Outcome::Cancelled => Outcome::Cancelled,
        }
    }
}

/// Returns `true` if any of the given forms has unsaved changes.
pub fn any_unsaved<I>(dirty_flags: I) -> bool
where
    I: IntoIterator<Item = bool>,
{
    dirty_flags.into_iter().any(|dirty| dirty)
}
