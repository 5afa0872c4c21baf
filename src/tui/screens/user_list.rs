//! User list.

use ratatui::layout::Constraint;

use super::list::{ListState, Listing};
use crate::model::{User, UserQuery};
use crate::tui::action::EntityKind;

pub type UserListState = ListState<User>;

impl Listing for User {
    type Query = UserQuery;

    const ENTITY: EntityKind = EntityKind::User;
    const TITLE: &'static str = "Users";
    const HEADER: &'static [&'static str] =
        &["#", "Username", "Name", "Email", "Role", "Active", "Forwards"];

    fn widths() -> Vec<Constraint> {
        vec![
            Constraint::Length(5),
            Constraint::Length(16),
            Constraint::Length(20),
            Constraint::Min(16),
            Constraint::Length(10),
            Constraint::Length(6),
            Constraint::Length(8),
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.username.clone(),
            self.full_name.clone(),
            self.email.clone(),
            self.role.label().to_string(),
            if self.active { "yes" } else { "no" }.to_string(),
            self.forward_categories.len().to_string(),
        ]
    }

    fn search_text(query: &mut UserQuery) -> &mut String {
        &mut query.text
    }

    fn include_deleted(query: &mut UserQuery) -> &mut bool {
        &mut query.include_deleted
    }
}
