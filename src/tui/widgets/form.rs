//! Renders a [`TrackedForm`] as a column of bordered field boxes.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::form::{Control, FormField, TrackedForm};

const TEXT_AREA_HEIGHT: u16 = 6;

/// Rows a field needs, borders included.
pub fn field_height(field: &FormField) -> u16 {
    match &field.control {
        Control::Input { .. } | Control::Checkbox { .. } | Control::Select { .. } => 3,
        Control::MultiSelect { options } => {
            u16::try_from(options.len()).unwrap_or(u16::MAX).saturating_add(2)
        }
        Control::TextArea { .. } => TEXT_AREA_HEIGHT,
    }
}

/// Index of the first field to draw so the focused one fits in `height` rows.
pub fn scroll_start(form: &TrackedForm, height: u16) -> usize {
    let fields = form.fields();
    if fields.is_empty() {
        return 0;
    }
    let focus = form.focus().min(fields.len().saturating_sub(1));
    let mut start = 0;
    loop {
        let used: u16 = fields[start..=focus.max(start)]
            .iter()
            .map(field_height)
            .fold(0, u16::saturating_add);
        if used <= height || start >= focus {
            return start;
        }
        start += 1;
    }
}

fn cursor() -> Span<'static> {
    Span::styled(
        "\u{2588}",
        Style::default().add_modifier(Modifier::SLOW_BLINK),
    )
}

fn body(field: &FormField, focused: bool, option_cursor: usize) -> Vec<Line<'_>> {
    match &field.control {
        Control::Input { secret, value } => {
            let shown = if *secret {
                "*".repeat(value.chars().count())
            } else {
                value.clone()
            };
            let mut spans = vec![Span::raw(shown)];
            if focused {
                spans.push(cursor());
            }
            vec![Line::from(spans)]
        }
        Control::TextArea { value } => {
            let mut lines: Vec<Line> = value.split('\n').map(Line::raw).collect();
            if focused && let Some(last) = lines.last_mut() {
                last.push_span(cursor());
            }
            lines
        }
        Control::Checkbox { checked } => {
            let mark = if *checked { "[x]" } else { "[ ]" };
            vec![Line::from(mark)]
        }
        Control::Select { options } => {
            let label = options
                .iter()
                .find(|o| o.selected)
                .map_or("(none)", |o| o.label.as_str());
            if focused {
                vec![Line::from(format!("\u{25c0} {label} \u{25b6}"))]
            } else {
                vec![Line::from(label.to_string())]
            }
        }
        Control::MultiSelect { options } => options
            .iter()
            .enumerate()
            .map(|(i, o)| {
                let mark = if o.selected { "[x]" } else { "[ ]" };
                let text = format!("{mark} {}", o.label);
                if focused && i == option_cursor {
                    Line::styled(text, Style::default().add_modifier(Modifier::REVERSED))
                } else {
                    Line::raw(text)
                }
            })
            .collect(),
    }
}

/// Renders a form within the given area, scrolled to keep focus visible.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_form(form: &TrackedForm, frame: &mut Frame, area: Rect) {
    let start = scroll_start(form, area.height);
    let visible = &form.fields()[start..];
    let mut constraints: Vec<Constraint> = visible
        .iter()
        .map(|f| Constraint::Length(field_height(f)))
        .collect();
    constraints.push(Constraint::Min(0));

    let rows = Layout::vertical(constraints).split(area);
    let changes = form.changes();

    for (offset, field) in visible.iter().enumerate() {
        let i = start + offset;
        let row = rows[offset];
        if row.height == 0 {
            break;
        }
        let is_focused = i == form.focus();

        let border_color = if field.error.is_some() {
            Color::Red
        } else if is_focused {
            Color::Yellow
        } else {
            Color::DarkGray
        };

        let mut label = field.label.clone();
        if field.required {
            label.push_str(" *");
        }
        let modified = changes.contains(&field.name)
            || changes.iter().any(|c| c.starts_with(&format!("{}-", field.name)));
        if modified {
            label.push_str(" \u{25cf}");
        }

        let block = Block::default()
            .title(label)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        let paragraph = Paragraph::new(body(field, is_focused, form.option_cursor()))
            .wrap(Wrap { trim: false })
            .block(block);
        frame.render_widget(paragraph, row);

        // Error overlaps the bottom border of the field.
        if let Some(ref err) = field.error {
            let error_line = Paragraph::new(Span::styled(err, Style::default().fg(Color::Red)));
            let err_area = Rect {
                x: row.x + 2,
                y: row.y + row.height.saturating_sub(1),
                width: row.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(error_line, err_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::form::{ComparePolicy, SelectOption};

    fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
        let mut s = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
            }
            s.push('\n');
        }
        s
    }

    fn make_form() -> TrackedForm {
        let mut form = TrackedForm::new(
            vec![
                FormField::text("caller_name", "Caller").required(),
                FormField::password("password", "Password"),
                FormField::checkbox("follow_up", "Follow-up"),
                FormField::select(
                    "priority",
                    "Priority",
                    vec![SelectOption::new("low", "Low"), SelectOption::new("high", "High")],
                )
                .with_selected(&["low"]),
                FormField::multi_select(
                    "departments",
                    "Departments",
                    vec![
                        SelectOption::new("police", "Police"),
                        SelectOption::new("fire", "Fire"),
                    ],
                ),
                FormField::text_area("narrative", "Narrative"),
            ],
            ComparePolicy::default(),
        );
        form.take_snapshot().unwrap();
        form
    }

    fn render(form: &TrackedForm, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| draw_form(form, frame, frame.area()))
            .unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    mod heights {
        use super::*;

        #[test]
        fn per_control_kind() {
            let form = make_form();
            let heights: Vec<u16> = form.fields().iter().map(field_height).collect();
            assert_eq!(heights, vec![3, 3, 3, 3, 4, 6]);
        }

        #[test]
        fn no_scroll_when_everything_fits() {
            let form = make_form();
            assert_eq!(scroll_start(&form, 40), 0);
        }

        #[test]
        fn scrolls_to_keep_focus_visible() {
            let mut form = make_form();
            form.focus_field("narrative");
            // Narrative (6) + departments (4) fit in 10 rows.
            assert_eq!(scroll_start(&form, 10), 4);
        }
    }

    mod rendering {
        use super::*;

        #[test]
        fn shows_labels_and_required_marker() {
            let output = render(&make_form(), 40, 30);
            assert!(output.contains("Caller *"));
            assert!(output.contains("Narrative"));
            assert!(output.contains("[ ] Police"));
        }

        #[test]
        fn masks_secret_input() {
            let mut form = make_form();
            form.set_text("password", "hunter22").unwrap();
            let output = render(&form, 40, 30);
            assert!(output.contains("********"));
            assert!(!output.contains("hunter22"));
        }

        #[test]
        fn marks_modified_fields() {
            let mut form = make_form();
            form.set_text("caller_name", "Ada").unwrap();
            form.set_selected("departments", "fire", true).unwrap();
            let output = render(&form, 40, 30);
            assert!(output.contains("Caller * \u{25cf}"));
            assert!(output.contains("Departments \u{25cf}"));
            assert!(!output.contains("Narrative \u{25cf}"));
        }

        #[test]
        fn shows_error_text() {
            let mut form = make_form();
            form.set_error("caller_name", "caller name is required");
            let output = render(&form, 40, 30);
            assert!(output.contains("caller name is required"));
        }
    }
}
