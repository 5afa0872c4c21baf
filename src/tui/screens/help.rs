//! Scrollable keybinding reference for the current screen.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;

static GLOBAL_KEYS: &[(&str, &str)] = &[
    ("Ctrl+R", "report list"),
    ("Ctrl+U", "user list"),
    ("Ctrl+E", "editor tabs"),
    ("Ctrl+Q", "quit (asks to save unsaved tabs)"),
    ("F1", "help"),
];

static LIST_KEYS: &[(&str, &str)] = &[
    ("↑/↓", "navigate"),
    ("←/→, PgUp/PgDn", "previous / next page"),
    ("/", "search; Enter applies, Esc cancels"),
    ("Enter", "open in the active tab"),
    ("o", "open in a new tab"),
    ("n", "new record"),
    ("d", "delete"),
    ("r", "restore deleted"),
    ("D", "purge deleted"),
    ("x", "show / hide deleted"),
    ("q", "quit"),
];

static REPORT_LIST_KEYS: &[(&str, &str)] = &[("c", "cycle category filter")];

static EDITOR_KEYS: &[(&str, &str)] = &[
    ("Tab / Shift-Tab", "next / prev field"),
    ("←/→", "change selection"),
    ("Space", "toggle checkbox or option"),
    ("Ctrl+S", "save"),
    ("Ctrl+F", "forward report"),
    ("Ctrl+N", "new record in this tab"),
    ("Ctrl+W", "close tab"),
    ("Alt+←/→", "previous / next tab"),
    ("Esc", "back to list"),
];

static CONFIRM_KEYS: &[(&str, &str)] = &[
    ("s", "save, then continue"),
    ("d", "discard changes, then continue"),
    ("Esc", "close; same as discard"),
];

static HELP_KEYS: &[(&str, &str)] = &[("↑/↓", "scroll"), ("q / Esc", "back")];

/// State for the help screen.
#[derive(Debug, Clone)]
pub struct HelpState {
    scroll: u16,
    origin: Screen,
}

impl Default for HelpState {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpState {
    /// Creates a new [`HelpState`] scrolled to the top with origin [`Screen::ReportList`].
    pub fn new() -> Self {
        Self {
            scroll: 0,
            origin: Screen::ReportList,
        }
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Returns the screen that opened help.
    pub fn origin(&self) -> Screen {
        self.origin
    }

    /// Sets the screen to return to and scrolls back to the top.
    pub fn open_from(&mut self, screen: Screen) {
        self.origin = screen;
        self.scroll = 0;
    }
}

impl ScreenState for HelpState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                Action::None
            }
            KeyCode::Char('q') | KeyCode::Esc => Action::Navigate(self.origin),
            _ => Action::None,
        }
    }
}

fn screen_name(screen: Screen) -> &'static str {
    match screen {
        Screen::ReportList => "Reports",
        Screen::UserList => "Users",
        Screen::Editor => "Editor",
        Screen::Help => "Help",
    }
}

fn build_section(title: &'static str, keys: &[(&'static str, &'static str)]) -> Vec<Line<'static>> {
    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(Color::Yellow);
    let dim_style = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(title, header_style)),
    ];
    for (key, desc) in keys {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<20}"), key_style),
            Span::styled(*desc, dim_style),
        ]));
    }
    lines
}

fn help_content(origin: Screen) -> Vec<Line<'static>> {
    let mut lines = match origin {
        Screen::ReportList => {
            let mut lines = build_section("Reports", LIST_KEYS);
            lines.extend(build_section("Report filters", REPORT_LIST_KEYS));
            lines
        }
        Screen::UserList => build_section("Users", LIST_KEYS),
        Screen::Editor => {
            let mut lines = build_section("Editor", EDITOR_KEYS);
            lines.extend(build_section("Unsaved changes prompt", CONFIRM_KEYS));
            lines
        }
        Screen::Help => build_section("Help", HELP_KEYS),
    };
    lines.extend(build_section("Everywhere", GLOBAL_KEYS));
    lines
}

/// Renders the help screen.
#[mutants::skip]
pub fn draw_help(state: &HelpState, frame: &mut Frame, area: Rect) {
    let title = format!(" Help – {} ", screen_name(state.origin()));
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [content_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let content_lines = help_content(state.origin());
    let total = u16::try_from(content_lines.len()).unwrap_or(u16::MAX);
    let capped_scroll = state.scroll().min(total.saturating_sub(content_area.height));

    let paragraph = Paragraph::new(content_lines).scroll((capped_scroll, 0));
    frame.render_widget(paragraph, content_area);

    let footer =
        Paragraph::new("↑/↓: scroll  q/Esc: back").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
