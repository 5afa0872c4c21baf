//! Status bar widget: control enablement and unsaved state of the active tab.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::form::Controls;

/// Data passed to the status bar widget.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBarContext {
    pub controls: Controls,
    /// Changed field names, comma-separated.
    pub changes: String,
    /// Whether the tab can be forwarded at all (reports only).
    pub forwardable: bool,
}

fn key_span(label: &'static str, enabled: bool) -> Span<'static> {
    if enabled {
        Span::styled(label, Style::default().fg(Color::Cyan))
    } else {
        Span::styled(
            label,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
        )
    }
}

/// Renders a one-line status bar.
///
/// `^S save` is live only with unsaved changes, `^F forward` only when the
/// report is clean and forwardable, followed by the unsaved field list.
#[mutants::skip]
pub fn draw_status_bar(ctx: &StatusBarContext, frame: &mut Frame, area: Rect) {
    let mut spans = vec![key_span("^S save", ctx.controls.submit_enabled)];
    if ctx.forwardable {
        spans.push(Span::raw("  "));
        spans.push(key_span("^F forward", ctx.controls.send_enabled));
    }
    spans.push(Span::raw("  "));
    if ctx.controls.unsaved {
        spans.push(Span::styled(
            format!("\u{25cf} unsaved: {}", ctx.changes),
            Style::default().fg(Color::Yellow),
        ));
    } else {
        spans.push(Span::styled("saved", Style::default().fg(Color::Green)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
