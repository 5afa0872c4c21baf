//! Paged, searchable record list shared by the report and user screens.

use std::fmt::Debug;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};

use crate::model::{Page, Query, paginate};
use crate::storage::{Record, StorageError, Store};
use crate::tui::action::{Action, EntityKind, ScreenState};

/// A record type that can be shown in a [`ListState`].
pub trait Listing: Record + Clone + Debug {
    type Query: Query<Self> + Clone + Debug + Default;

    const ENTITY: EntityKind;
    const TITLE: &'static str;
    const HEADER: &'static [&'static str];

    fn widths() -> Vec<Constraint>;
    fn row(&self) -> Vec<String>;

    fn search_text(query: &mut Self::Query) -> &mut String;
    fn include_deleted(query: &mut Self::Query) -> &mut bool;

    /// Advances an extra filter, if the listing has one.
    fn cycle_filter(_query: &mut Self::Query) -> bool {
        false
    }

    /// Describes the active extra filter for the title bar.
    fn filter_label(_query: &Self::Query) -> Option<String> {
        None
    }
}

/// State for a record list screen.
#[derive(Debug, Clone)]
pub struct ListState<R: Listing> {
    query: R::Query,
    page_no: usize,
    page: Page<R>,
    selected: Option<usize>,
    /// Search input while the user is typing, `None` otherwise.
    search: Option<String>,
}

impl<R: Listing> Default for ListState<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Listing> ListState<R> {
    /// Creates an empty state. Call [`load`](Self::load) to populate from storage.
    pub fn new() -> Self {
        Self {
            query: R::Query::default(),
            page_no: 0,
            page: paginate(Vec::new(), 0, 1),
            selected: None,
            search: None,
        }
    }

    /// Runs the current query against the store.
    pub fn load(&mut self, store: &Store, per_page: usize) -> Result<(), StorageError> {
        self.page = store.search(&self.query, self.page_no, per_page)?;
        self.page_no = self.page.page;
        let len = self.page.items.len();
        self.selected = match (len, self.selected) {
            (0, _) => None,
            (_, Some(i)) => Some(i.min(len - 1)),
            (_, None) => Some(0),
        };
        Ok(())
    }

    pub fn query(&self) -> &R::Query {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut R::Query {
        &mut self.query
    }

    pub fn page(&self) -> &Page<R> {
        &self.page
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_record(&self) -> Option<&R> {
        self.selected.and_then(|i| self.page.items.get(i))
    }

    /// The search input, while the user is typing one.
    pub fn search_input(&self) -> Option<&str> {
        self.search.as_deref()
    }

    fn reload_from_start(&mut self) -> Action {
        self.page_no = 0;
        self.selected = None;
        Action::Reload(R::ENTITY)
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Action {
        let Some(input) = self.search.as_mut() else {
            return Action::None;
        };
        match key.code {
            KeyCode::Char(ch) => input.push(ch),
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Enter => {
                let text = std::mem::take(input);
                self.search = None;
                *R::search_text(&mut self.query) = text;
                return self.reload_from_start();
            }
            KeyCode::Esc => self.search = None,
            _ => {}
        }
        Action::None
    }

    fn on_selected(&self, f: impl FnOnce(&R) -> Action) -> Action {
        self.selected_record().map_or(Action::None, f)
    }

    fn open(&self, new_tab: bool) -> Action {
        self.on_selected(|r| {
            if r.is_deleted() {
                Action::Error("Restore the record before opening it".into())
            } else {
                Action::Open {
                    kind: R::ENTITY,
                    id: r.id(),
                    new_tab,
                }
            }
        })
    }

    fn select_prev(&mut self) {
        self.selected = match self.selected {
            Some(i) if i > 0 => Some(i - 1),
            other => other,
        };
    }

    fn select_next(&mut self) {
        self.selected = match self.selected {
            Some(i) if i + 1 < self.page.items.len() => Some(i + 1),
            other => other,
        };
    }
}

impl<R: Listing> ScreenState for ListState<R> {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if self.search.is_some() {
            return self.handle_search_key(key);
        }
        match key.code {
            KeyCode::Up => {
                self.select_prev();
                Action::None
            }
            KeyCode::Down => {
                self.select_next();
                Action::None
            }
            KeyCode::Left | KeyCode::PageUp if self.page.has_prev() => {
                self.page_no -= 1;
                self.selected = None;
                Action::Reload(R::ENTITY)
            }
            KeyCode::Right | KeyCode::PageDown if self.page.has_next() => {
                self.page_no += 1;
                self.selected = None;
                Action::Reload(R::ENTITY)
            }
            KeyCode::Char('/') => {
                self.search = Some(R::search_text(&mut self.query).clone());
                Action::None
            }
            KeyCode::Char('x') => {
                let include = R::include_deleted(&mut self.query);
                *include = !*include;
                self.reload_from_start()
            }
            KeyCode::Char('c') => {
                if R::cycle_filter(&mut self.query) {
                    self.reload_from_start()
                } else {
                    Action::None
                }
            }
            KeyCode::Char('d') => self.on_selected(|r| Action::SoftDelete(R::ENTITY, r.id())),
            KeyCode::Char('r') => self.on_selected(|r| Action::Restore(R::ENTITY, r.id())),
            KeyCode::Char('D') => self.on_selected(|r| Action::HardDelete(R::ENTITY, r.id())),
            KeyCode::Enter => self.open(false),
            KeyCode::Char('o') => self.open(true),
            KeyCode::Char('n') => Action::Create(R::ENTITY),
            KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        }
    }
}

/// Renders a record list with its search line and footer.
#[mutants::skip]
pub fn draw_list<R: Listing>(state: &ListState<R>, frame: &mut Frame, area: Rect) {
    let page = state.page();
    let mut title = format!(
        " {} ({}/{}, {} total) ",
        R::TITLE,
        page.page + 1,
        page.page_count,
        page.total
    );
    let mut query = state.query.clone();
    if let Some(label) = R::filter_label(&query) {
        title.push_str(&format!("[{label}] "));
    }
    if *R::include_deleted(&mut query) {
        title.push_str("[+deleted] ");
    }
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [search_area, table_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    let search_line = match state.search_input() {
        Some(input) => Line::styled(format!("/{input}_"), Style::default().fg(Color::Yellow)),
        None => {
            let text = R::search_text(&mut query);
            if text.is_empty() {
                Line::styled("/ to search", Style::default().fg(Color::DarkGray))
            } else {
                Line::from(format!("search: {text}"))
            }
        }
    };
    frame.render_widget(Paragraph::new(search_line), search_area);

    if page.items.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from("Nothing here."),
            Line::from("Press 'n' to create one."),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(empty, table_area);
    } else {
        let header = Row::new(R::HEADER.to_vec())
            .style(Style::default().add_modifier(Modifier::BOLD))
            .bottom_margin(1);
        let rows: Vec<Row> = page
            .items
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let mut style = if record.is_deleted() {
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default()
                };
                if state.selected() == Some(i) {
                    style = style.fg(Color::Black).bg(Color::Yellow);
                }
                Row::new(record.row()).style(style)
            })
            .collect();
        frame.render_widget(Table::new(rows, R::widths()).header(header), table_area);
    }

    let footer = Paragraph::new(
        "n: new  Enter: open  o: open in tab  d/r/D: delete/restore/purge  x: deleted  ←/→: page",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
