//! Actions returned by screen event handlers.

use crossterm::event::KeyEvent;

use super::app::Screen;

/// Which kind of record a tab or list works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Report,
    User,
}

impl EntityKind {
    pub fn list_screen(self) -> Screen {
        match self {
            Self::Report => Screen::ReportList,
            Self::User => Screen::UserList,
        }
    }
}

/// Direction for tab switching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabDirection {
    Prev,
    Next,
}

/// An action that a screen handler returns to the [`App`](super::App).
///
/// The `App` interprets these to update global state and navigate between
/// screens. Actions that would replace or hide a dirty form pass through the
/// navigation gate first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Navigate to the given screen.
    Navigate(Screen),
    /// Open a stored record, either into the active tab or a new one.
    Open {
        kind: EntityKind,
        id: u64,
        new_tab: bool,
    },
    /// Open a blank record in a new tab.
    Create(EntityKind),
    /// Replace the active tab with a blank record of the same kind.
    NewEntity,
    /// Save the active tab.
    Save,
    /// Move to the neighbouring tab.
    SwitchTab(TabDirection),
    /// Close the active tab.
    CloseTab,
    /// Forward the report in the active tab.
    Forward,
    /// Soft-delete a record.
    SoftDelete(EntityKind, u64),
    /// Undo a soft delete.
    Restore(EntityKind, u64),
    /// Permanently remove a soft-deleted record.
    HardDelete(EntityKind, u64),
    /// The list's query or page changed; reload it from storage.
    Reload(EntityKind),
    /// Show an error toast.
    Error(String),
    /// Quit the application.
    Quit,
}

/// Common behavior for all screen state types.
pub trait ScreenState {
    /// Process a key event and return an [`Action`] for the `App` to apply.
    fn handle_key(&mut self, key: KeyEvent) -> Action;
}
