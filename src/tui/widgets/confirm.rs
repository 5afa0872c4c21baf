//! Save-or-discard modal shown while a navigation is parked.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::form::{ChangeSet, Decision};

/// Maps a key press in the modal to a decision.
///
/// `s` saves, `d` discards, `Esc` dismisses. Other keys are swallowed.
pub fn decision_for(key: KeyEvent) -> Option<Decision> {
    match key.code {
        KeyCode::Char('s' | 'S') => Some(Decision::Save),
        KeyCode::Char('d' | 'D') => Some(Decision::Discard),
        KeyCode::Esc => Some(Decision::Dismiss),
        _ => None,
    }
}

/// Renders the modal centered over `area`, listing the changed fields.
#[mutants::skip]
pub fn draw_confirm(title: &str, changes: &ChangeSet, frame: &mut Frame, area: Rect) {
    let [row] = Layout::vertical([Constraint::Length(9)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(60)])
        .flex(Flex::Center)
        .areas(row);

    let block = Block::default()
        .title(" Unsaved changes ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let key = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let changed = if changes.is_empty() {
        "(several tabs)".to_string()
    } else {
        changes.to_string()
    };
    let lines = vec![
        Line::from(format!("{title} has unsaved changes:")),
        Line::from(Span::styled(changed, Style::default().fg(Color::Cyan))),
        Line::from(""),
        Line::from(vec![
            Span::styled("s", key),
            Span::raw(" save   "),
            Span::styled("d", key),
            Span::raw(" discard   "),
            Span::styled("Esc", key),
            Span::raw(" dismiss"),
        ]),
    ];

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        popup,
    );
}
