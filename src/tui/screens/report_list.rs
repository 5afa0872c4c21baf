//! Report list: newest first, searchable, filterable by category.

use ratatui::layout::Constraint;

use super::list::{ListState, Listing};
use crate::model::{Category, Report, ReportQuery};
use crate::tui::action::EntityKind;

pub type ReportListState = ListState<Report>;

impl Listing for Report {
    type Query = ReportQuery;

    const ENTITY: EntityKind = EntityKind::Report;
    const TITLE: &'static str = "Reports";
    const HEADER: &'static [&'static str] =
        &["#", "Received", "Caller", "Category", "Priority", "Summary", "Fwd"];

    fn widths() -> Vec<Constraint> {
        vec![
            Constraint::Length(5),
            Constraint::Length(17),
            Constraint::Length(18),
            Constraint::Length(19),
            Constraint::Length(9),
            Constraint::Min(10),
            Constraint::Length(3),
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.call_received.format("%Y-%m-%d %H:%M").to_string(),
            self.caller_name.clone(),
            self.category.label().to_string(),
            self.priority.label().to_string(),
            self.summary.clone(),
            if self.is_forwarded() { "✓" } else { "" }.to_string(),
        ]
    }

    fn search_text(query: &mut ReportQuery) -> &mut String {
        &mut query.text
    }

    fn include_deleted(query: &mut ReportQuery) -> &mut bool {
        &mut query.include_deleted
    }

    /// All categories, then each one in turn.
    fn cycle_filter(query: &mut ReportQuery) -> bool {
        let all = Category::all();
        query.category = match query.category {
            None => all.first().copied(),
            Some(current) => all
                .iter()
                .position(|c| *c == current)
                .and_then(|i| all.get(i + 1))
                .copied(),
        };
        true
    }

    fn filter_label(query: &ReportQuery) -> Option<String> {
        query.category.map(|c| c.label().to_string())
    }
}
