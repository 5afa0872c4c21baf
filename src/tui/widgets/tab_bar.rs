use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Tabs;

/// Title and unsaved flag of one editor tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabLabel {
    pub title: String,
    pub unsaved: bool,
}

impl TabLabel {
    /// Text shown in the bar; unsaved tabs get a trailing `*`.
    pub fn text(&self) -> String {
        if self.unsaved {
            format!("{} *", self.title)
        } else {
            self.title.clone()
        }
    }
}

#[mutants::skip]
pub fn draw_tab_bar(labels: &[TabLabel], active: usize, frame: &mut Frame, area: Rect) {
    let titles: Vec<Line> = labels
        .iter()
        .map(|l| {
            let style = if l.unsaved {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            Line::styled(l.text(), style)
        })
        .collect();
    let tabs = Tabs::new(titles)
        .select(active)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .divider("|");
    frame.render_widget(tabs, area);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    #[test]
    fn unsaved_marker() {
        let clean = TabLabel {
            title: "#1 Bike".into(),
            unsaved: false,
        };
        let dirty = TabLabel {
            title: "New report".into(),
            unsaved: true,
        };
        assert_eq!(clean.text(), "#1 Bike");
        assert_eq!(dirty.text(), "New report *");
    }

    #[test]
    fn renders_all_tabs() {
        let labels = vec![
            TabLabel {
                title: "#1 Bike".into(),
                unsaved: false,
            },
            TabLabel {
                title: "@jdoe".into(),
                unsaved: true,
            },
        ];
        let mut terminal = Terminal::new(TestBackend::new(40, 1)).unwrap();
        terminal
            .draw(|frame| draw_tab_bar(&labels, 1, frame, frame.area()))
            .unwrap();
        let buf = terminal.backend().buffer();
        let line: String = (0..buf.area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect();
        assert!(line.contains("#1 Bike"));
        assert!(line.contains("@jdoe *"));
    }
}
