//! Reusable TUI widgets.

pub mod confirm;
pub mod form;
pub mod notification;
pub mod status_bar;
pub mod tab_bar;

pub use confirm::{decision_for, draw_confirm};
pub use form::draw_form;
pub use notification::{Notifier, Toast, ToastKind, draw_notification};
pub use status_bar::{StatusBarContext, draw_status_bar};
pub use tab_bar::{TabLabel, draw_tab_bar};
