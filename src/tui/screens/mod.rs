//! TUI screen implementations.

pub mod editor;
pub mod help;
pub mod list;
pub mod report_list;
pub mod user_list;

pub use editor::{Bound, EditorState, EditorTab, draw_editor};
pub use help::{HelpState, draw_help};
pub use list::{ListState, Listing, draw_list};
pub use report_list::ReportListState;
pub use user_list::UserListState;
