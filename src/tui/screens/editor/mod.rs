//! Tabbed editor: each tab owns one [`TrackedForm`] bound to a report or user.

pub mod report;
pub mod user;

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::config::Config;
use crate::form::{ComparePolicy, Control, FormField, TrackedForm, any_unsaved};
use crate::model::{Report, User};
use crate::storage::{StorageError, Store};
use crate::tui::action::{Action, EntityKind, ScreenState, TabDirection};
use crate::tui::error::AppError;
use crate::tui::widgets::{
    StatusBarContext, TabLabel, draw_form, draw_status_bar, draw_tab_bar,
};

/// The record behind a tab; `None` until first saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bound {
    Report(Option<Report>),
    User(Option<User>),
}

impl Bound {
    /// An unsaved record of the given kind.
    pub fn blank(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Report => Self::Report(None),
            EntityKind::User => Self::User(None),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Report(_) => EntityKind::Report,
            Self::User(_) => EntityKind::User,
        }
    }

    pub fn id(&self) -> Option<u64> {
        match self {
            Self::Report(r) => r.as_ref().map(|r| r.id),
            Self::User(u) => u.as_ref().map(|u| u.id),
        }
    }

    fn fields(&self) -> Vec<FormField> {
        match self {
            Self::Report(Some(r)) => report::fields(r),
            Self::Report(None) => report::blank_fields(),
            Self::User(Some(u)) => user::fields(u),
            Self::User(None) => user::blank_fields(),
        }
    }

    fn send_allowed(&self) -> bool {
        matches!(self, Self::Report(Some(r)) if r.can_forward())
    }

    pub fn title(&self) -> String {
        match self {
            Self::Report(Some(r)) => r.title(),
            Self::Report(None) => "New report".to_string(),
            Self::User(Some(u)) => u.title(),
            Self::User(None) => "New user".to_string(),
        }
    }
}

/// One editor tab.
#[derive(Debug, Clone)]
pub struct EditorTab {
    bound: Bound,
    form: TrackedForm,
}

impl EditorTab {
    /// Renders `bound` into a fresh form and takes the baseline.
    pub fn new(bound: Bound, policy: ComparePolicy) -> Result<Self, AppError> {
        let mut form = TrackedForm::new(Vec::new(), policy);
        form.load(bound.fields())?;
        form.set_send_allowed(bound.send_allowed());
        Ok(Self { bound, form })
    }

    pub fn bound(&self) -> &Bound {
        &self.bound
    }

    pub fn form(&self) -> &TrackedForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TrackedForm {
        &mut self.form
    }

    pub fn kind(&self) -> EntityKind {
        self.bound.kind()
    }

    pub fn title(&self) -> String {
        self.bound.title()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.form.is_dirty()
    }

    pub fn label(&self) -> TabLabel {
        TabLabel {
            title: self.title(),
            unsaved: self.has_unsaved_changes(),
        }
    }

    /// Renders a different record into this tab and re-baselines.
    pub fn render(&mut self, bound: Bound) -> Result<(), AppError> {
        self.form.load(bound.fields())?;
        self.form.set_send_allowed(bound.send_allowed());
        self.bound = bound;
        Ok(())
    }

    /// Re-renders the bound record, keeping focus on the same field.
    fn rerender(&mut self) -> Result<(), AppError> {
        let focused = self.form.focused().map(|f| f.name.clone());
        self.form.load(self.bound.fields())?;
        self.form.set_send_allowed(self.bound.send_allowed());
        if let Some(name) = focused {
            self.form.focus_field(&name);
        }
        Ok(())
    }

    /// Drops unsaved edits.
    pub fn discard(&mut self) -> Result<(), AppError> {
        self.form.revert()?;
        Ok(())
    }

    // Marks every blank required field; returns how many there were.
    fn mark_blank_required(&mut self) -> usize {
        let blanks: Vec<String> = self
            .form
            .fields()
            .iter()
            .filter(|f| f.required && !f.read_only && f.is_blank())
            .map(|f| f.name.clone())
            .collect();
        for name in &blanks {
            self.form.set_error(name, "required");
        }
        blanks.len()
    }

    /// Validates, persists and re-baselines the tab.
    ///
    /// On failure the form keeps its edits and gets per-field errors.
    pub fn save(&mut self, store: &Store) -> Result<(), AppError> {
        if !self.form.controls().submit_enabled {
            return Err(AppError::Unavailable("no changes to save"));
        }
        self.form.clear_errors();
        let blank = self.mark_blank_required();
        if blank > 0 {
            return Err(AppError::Incomplete(blank));
        }

        match &mut self.bound {
            Bound::Report(existing) => {
                let draft = report::draft(&self.form);
                let built = match existing {
                    Some(current) => {
                        let mut next = current.clone();
                        next.apply(draft).map(|()| next)
                    }
                    None => Report::from_draft(draft),
                };
                let candidate = match built {
                    Ok(r) => r,
                    Err(e) => {
                        self.form.set_error(report::field_for(&e), e.to_string());
                        return Err(e.into());
                    }
                };
                *existing = Some(store.save_report(candidate)?);
            }
            Bound::User(existing) => {
                let draft = user::draft(&self.form);
                let built = match existing {
                    Some(current) => {
                        let mut next = current.clone();
                        next.apply(draft).map(|()| next)
                    }
                    None => User::from_draft(draft),
                };
                let candidate = match built {
                    Ok(u) => u,
                    Err(e) => {
                        self.form.set_error(user::field_for(&e), e.to_string());
                        return Err(e.into());
                    }
                };
                match store.save_user(candidate) {
                    Ok(saved) => *existing = Some(saved),
                    Err(e @ StorageError::DuplicateUsername(_)) => {
                        self.form.set_error(user::USERNAME, "already taken");
                        return Err(e.into());
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
        self.rerender()
    }

    /// Forwards the bound report. Only clean, forwardable reports qualify.
    pub fn forward(&mut self, store: &Store) -> Result<PathBuf, AppError> {
        let Bound::Report(Some(current)) = &self.bound else {
            return Err(AppError::Unavailable("only saved reports can be forwarded"));
        };
        if !self.form.controls().send_enabled {
            return Err(AppError::Unavailable(
                "save changes before forwarding, or report already forwarded",
            ));
        }
        let (forwarded, path) = store.forward_report(current.id)?;
        self.bound = Bound::Report(Some(forwarded));
        self.rerender()?;
        Ok(path)
    }

    fn focused_control(&self) -> Option<&Control> {
        self.form.focused().map(|f| &f.control)
    }

    fn edit(&mut self, key: KeyEvent) -> Result<(), AppError> {
        let on_options = matches!(
            self.focused_control(),
            Some(Control::Checkbox { .. } | Control::MultiSelect { .. })
        );
        let on_multi = matches!(self.focused_control(), Some(Control::MultiSelect { .. }));
        let on_text_area = matches!(self.focused_control(), Some(Control::TextArea { .. }));
        match key.code {
            KeyCode::Tab => self.form.focus_next(),
            KeyCode::BackTab => self.form.focus_prev(),
            KeyCode::Down if on_multi => self.form.cycle(true)?,
            KeyCode::Up if on_multi => self.form.cycle(false)?,
            KeyCode::Down => self.form.focus_next(),
            KeyCode::Up => self.form.focus_prev(),
            KeyCode::Right => self.form.cycle(true)?,
            KeyCode::Left => self.form.cycle(false)?,
            KeyCode::Backspace => self.form.delete_char()?,
            KeyCode::Enter if on_text_area => self.form.insert_newline()?,
            KeyCode::Enter if on_options => self.form.toggle()?,
            KeyCode::Enter => self.form.focus_next(),
            KeyCode::Char(' ') if on_options => self.form.toggle()?,
            KeyCode::Char(ch) => self.form.insert_char(ch)?,
            _ => {}
        }
        Ok(())
    }
}

impl ScreenState for EditorTab {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers == KeyModifiers::CONTROL {
            return match key.code {
                KeyCode::Char('s') => Action::Save,
                KeyCode::Char('n') => Action::NewEntity,
                KeyCode::Char('w') => Action::CloseTab,
                KeyCode::Char('f') => Action::Forward,
                _ => Action::None,
            };
        }
        if key.modifiers == KeyModifiers::ALT {
            return match key.code {
                KeyCode::Left => Action::SwitchTab(TabDirection::Prev),
                KeyCode::Right => Action::SwitchTab(TabDirection::Next),
                _ => Action::None,
            };
        }
        if key.code == KeyCode::Esc {
            return Action::Navigate(self.kind().list_screen());
        }
        match self.edit(key) {
            Ok(()) => Action::None,
            Err(e) => Action::Error(e.to_string()),
        }
    }
}

/// All open tabs and which one is active.
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    tabs: Vec<EditorTab>,
    active: usize,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare policy for a kind of record, from configuration.
    pub fn policy(config: &Config, kind: EntityKind) -> ComparePolicy {
        match kind {
            EntityKind::Report => config.forms.report.policy(),
            EntityKind::User => config.forms.user.policy(),
        }
    }

    pub fn tabs(&self) -> &[EditorTab] {
        &self.tabs
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> Option<&EditorTab> {
        self.tabs.get(self.active)
    }

    pub fn active_mut(&mut self) -> Option<&mut EditorTab> {
        self.tabs.get_mut(self.active)
    }

    /// Whether the active tab has unsaved edits.
    pub fn active_dirty(&self) -> bool {
        self.active().is_some_and(EditorTab::has_unsaved_changes)
    }

    /// Whether any tab has unsaved edits.
    pub fn any_unsaved(&self) -> bool {
        any_unsaved(self.tabs.iter().map(EditorTab::has_unsaved_changes))
    }

    /// Appends a tab and makes it active.
    pub fn push(&mut self, tab: EditorTab) {
        self.tabs.push(tab);
        self.active = self.tabs.len() - 1;
    }

    /// Index of the tab already showing this record.
    pub fn find(&self, kind: EntityKind, id: u64) -> Option<usize> {
        self.tabs
            .iter()
            .position(|t| t.kind() == kind && t.bound().id() == Some(id))
    }

    /// Index of the neighbouring tab, wrapping around.
    pub fn neighbour(&self, direction: TabDirection) -> Option<usize> {
        let len = self.tabs.len();
        if len < 2 {
            return None;
        }
        Some(match direction {
            TabDirection::Next => (self.active + 1) % len,
            TabDirection::Prev => (self.active + len - 1) % len,
        })
    }

    pub fn set_active(&mut self, index: usize) {
        if index < self.tabs.len() {
            self.active = index;
        }
    }

    /// Removes the active tab; the one to its left becomes active.
    pub fn close_active(&mut self) -> Option<EditorTab> {
        if self.tabs.is_empty() {
            return None;
        }
        let tab = self.tabs.remove(self.active);
        self.active = self.active.saturating_sub(1).min(self.tabs.len().saturating_sub(1));
        Some(tab)
    }

    /// Drops stale tabs bound to a record that no longer exists.
    pub fn forget(&mut self, kind: EntityKind, id: u64) {
        while let Some(i) = self.find(kind, id) {
            self.tabs.remove(i);
            if self.active > i || self.active >= self.tabs.len() {
                self.active = self.active.saturating_sub(1);
            }
        }
    }

    pub fn labels(&self) -> Vec<TabLabel> {
        self.tabs.iter().map(EditorTab::label).collect()
    }
}

impl ScreenState for EditorState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match self.active_mut() {
            Some(tab) => tab.handle_key(key),
            None if key.code == KeyCode::Esc => Action::Navigate(EntityKind::Report.list_screen()),
            None => Action::None,
        }
    }
}

/// Renders the tab bar, the active form and its status line.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_editor(state: &EditorState, frame: &mut Frame, area: Rect) {
    let [tabs_area, form_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    draw_tab_bar(&state.labels(), state.active_index(), frame, tabs_area);

    let Some(tab) = state.active() else {
        let empty = Paragraph::new("No open tabs. Press Esc for the report list.")
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, form_area);
        return;
    };

    let block = Block::default()
        .title(format!(" {} ", tab.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(form_area);
    frame.render_widget(block, form_area);
    draw_form(tab.form(), frame, inner);

    let ctx = StatusBarContext {
        controls: tab.form().controls(),
        changes: tab.form().changes().to_string(),
        forwardable: tab.kind() == EntityKind::Report,
    };
    draw_status_bar(&ctx, frame, status_area);
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyEventState};
    use tempfile::TempDir;

    use super::*;
    use crate::model::{Category, Priority, ReportDraft};

    fn press(code: KeyCode) -> KeyEvent {
        key(code, KeyModifiers::NONE)
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn make_store() -> (TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::with_path(dir.path()).unwrap();
        (dir, store)
    }

    fn stored_report(store: &Store) -> Report {
        let report = Report::from_draft(ReportDraft {
            caller_name: "Ada".into(),
            caller_phone: String::new(),
            call_received: "2026-03-14 09:30".into(),
            location: String::new(),
            category: Category::Theft,
            priority: Priority::Normal,
            departments: vec![],
            emergency_dispatched: false,
            follow_up: false,
            summary: "Bike".into(),
            narrative: String::new(),
        })
        .unwrap();
        store.save_report(report).unwrap()
    }

    fn report_tab(report: Option<Report>) -> EditorTab {
        EditorTab::new(Bound::Report(report), Config::default().forms.report.policy()).unwrap()
    }

    fn type_text(tab: &mut EditorTab, text: &str) {
        for ch in text.chars() {
            tab.handle_key(press(KeyCode::Char(ch)));
        }
    }

    mod tab {
        use super::*;

        #[test]
        fn new_tab_is_clean() {
            let tab = report_tab(None);
            assert!(!tab.has_unsaved_changes());
            assert_eq!(tab.title(), "New report");
            assert_eq!(tab.form().focused().unwrap().name, report::CALLER_NAME);
        }

        #[test]
        fn typing_makes_tab_dirty() {
            let mut tab = report_tab(None);
            type_text(&mut tab, "Ada");
            assert!(tab.has_unsaved_changes());
            assert_eq!(tab.form().value(report::CALLER_NAME), "Ada");
            assert_eq!(tab.label().text(), "New report *");
        }

        #[test]
        fn editing_back_to_baseline_is_clean() {
            let mut tab = report_tab(None);
            type_text(&mut tab, "A");
            tab.handle_key(press(KeyCode::Backspace));
            assert!(!tab.has_unsaved_changes());
        }

        #[test]
        fn space_toggles_checkbox() {
            let mut tab = report_tab(None);
            tab.form_mut().focus_field(report::FOLLOW_UP);
            tab.handle_key(press(KeyCode::Char(' ')));
            assert!(tab.form().field(report::FOLLOW_UP).unwrap().checked());
            assert!(tab.form().changes().contains(report::FOLLOW_UP));
        }

        #[test]
        fn arrows_cycle_select() {
            let mut tab = report_tab(None);
            tab.form_mut().focus_field(report::PRIORITY);
            tab.handle_key(press(KeyCode::Right));
            assert_eq!(tab.form().value(report::PRIORITY), "high");
            tab.handle_key(press(KeyCode::Left));
            assert!(!tab.has_unsaved_changes());
        }

        #[test]
        fn multi_select_cursor_and_toggle() {
            let mut tab = report_tab(None);
            tab.form_mut().focus_field(report::DEPARTMENTS);
            tab.handle_key(press(KeyCode::Down));
            tab.handle_key(press(KeyCode::Char(' ')));
            insta::assert_snapshot!(tab.form().changes(), @"departments-fire");
        }

        #[test]
        fn enter_in_text_area_adds_line() {
            let mut tab = report_tab(None);
            tab.form_mut().focus_field(report::NARRATIVE);
            type_text(&mut tab, "a");
            tab.handle_key(press(KeyCode::Enter));
            type_text(&mut tab, "b");
            assert_eq!(tab.form().value(report::NARRATIVE), "a\nb");
        }

        #[test]
        fn control_keys_map_to_actions() {
            let mut tab = report_tab(None);
            let ctrl = KeyModifiers::CONTROL;
            assert_eq!(tab.handle_key(key(KeyCode::Char('s'), ctrl)), Action::Save);
            assert_eq!(tab.handle_key(key(KeyCode::Char('n'), ctrl)), Action::NewEntity);
            assert_eq!(tab.handle_key(key(KeyCode::Char('w'), ctrl)), Action::CloseTab);
            assert_eq!(tab.handle_key(key(KeyCode::Char('f'), ctrl)), Action::Forward);
            assert_eq!(
                tab.handle_key(key(KeyCode::Right, KeyModifiers::ALT)),
                Action::SwitchTab(TabDirection::Next)
            );
            assert_eq!(
                tab.handle_key(key(KeyCode::Left, KeyModifiers::ALT)),
                Action::SwitchTab(TabDirection::Prev)
            );
            assert_eq!(
                tab.handle_key(press(KeyCode::Esc)),
                Action::Navigate(EntityKind::Report.list_screen())
            );
            assert!(!tab.has_unsaved_changes(), "shortcuts must not edit the form");
        }
    }

    mod save {
        use super::*;

        #[test]
        fn clean_tab_has_nothing_to_save() {
            let (_dir, store) = make_store();
            let stored = stored_report(&store);
            let mut tab = report_tab(Some(stored.clone()));
            assert!(matches!(tab.save(&store), Err(AppError::Unavailable(_))));
            assert_eq!(store.load::<Report>(stored.id).unwrap(), stored);
            assert!(tab.form().controls().send_enabled);
        }

        #[test]
        fn blank_required_fields_block_save() {
            let (_dir, store) = make_store();
            let mut tab = report_tab(None);
            tab.form_mut().focus_field(report::FOLLOW_UP);
            tab.form_mut().toggle().unwrap();
            let err = tab.save(&store).unwrap_err();
            assert!(matches!(err, AppError::Incomplete(2)));
            assert!(tab.form().field(report::CALLER_NAME).unwrap().error.is_some());
            assert!(tab.form().field(report::SUMMARY).unwrap().error.is_some());
            assert!(store.list::<Report>().unwrap().is_empty());
        }

        #[test]
        fn validation_error_lands_on_field_and_keeps_dirty() {
            let (_dir, store) = make_store();
            let mut tab = report_tab(None);
            tab.form_mut().set_text(report::CALLER_NAME, "Ada").unwrap();
            tab.form_mut().set_text(report::SUMMARY, "Bike").unwrap();
            tab.form_mut().set_text(report::CALL_RECEIVED, "soon").unwrap();
            assert!(tab.save(&store).is_err());
            assert!(tab.has_unsaved_changes());
            let err = tab.form().field(report::CALL_RECEIVED).unwrap().error.clone();
            assert!(err.unwrap().contains("soon"));
        }

        #[test]
        fn successful_save_rebaselines() {
            let (_dir, store) = make_store();
            let mut tab = report_tab(None);
            tab.form_mut().set_text(report::CALLER_NAME, "Ada").unwrap();
            tab.form_mut().set_text(report::SUMMARY, "Bike").unwrap();
            tab.save(&store).unwrap();
            assert!(!tab.has_unsaved_changes());
            assert_eq!(tab.bound().id(), Some(1));
            assert_eq!(tab.title(), "#1 Bike");
            assert!(tab.form().controls().send_enabled);
        }

        #[test]
        fn duplicate_username_marks_field() {
            let (_dir, store) = make_store();
            let policy = ComparePolicy::default();
            for _ in 0..2 {
                let mut tab = EditorTab::new(Bound::User(None), policy.clone()).unwrap();
                let form = tab.form_mut();
                form.set_text(user::USERNAME, "jdoe").unwrap();
                form.set_text(user::FULL_NAME, "Jane Doe").unwrap();
                form.set_text(user::EMAIL, "jane@example.org").unwrap();
                form.set_text(user::PASSWORD, "correct horse").unwrap();
                form.set_text(user::PASSWORD_CONFIRMATION, "correct horse").unwrap();
                if tab.save(&store).is_err() {
                    assert_eq!(
                        tab.form().field(user::USERNAME).unwrap().error.as_deref(),
                        Some("already taken")
                    );
                    return;
                }
            }
            panic!("second save with the same username should fail");
        }
    }

    mod forward {
        use super::*;

        #[test]
        fn forward_clean_report() {
            let (_dir, store) = make_store();
            let mut tab = report_tab(Some(stored_report(&store)));
            let path = tab.forward(&store).unwrap();
            assert!(path.exists());
            assert!(!tab.form().controls().send_enabled);
            assert!(matches!(
                tab.forward(&store),
                Err(AppError::Unavailable(_))
            ));
        }

        #[test]
        fn dirty_report_cannot_be_forwarded() {
            let (_dir, store) = make_store();
            let mut tab = report_tab(Some(stored_report(&store)));
            tab.form_mut().set_text(report::SUMMARY, "Edited").unwrap();
            assert!(matches!(
                tab.forward(&store),
                Err(AppError::Unavailable(_))
            ));
        }

        #[test]
        fn new_report_cannot_be_forwarded() {
            let (_dir, store) = make_store();
            let mut tab = report_tab(None);
            assert!(tab.forward(&store).is_err());
        }
    }

    mod tabs {
        use super::*;

        fn three_tabs() -> EditorState {
            let mut state = EditorState::new();
            for _ in 0..3 {
                state.push(report_tab(None));
            }
            state
        }

        #[test]
        fn push_activates_new_tab() {
            let state = three_tabs();
            assert_eq!(state.active_index(), 2);
            assert_eq!(state.tabs().len(), 3);
        }

        #[test]
        fn neighbour_wraps() {
            let mut state = three_tabs();
            assert_eq!(state.neighbour(TabDirection::Next), Some(0));
            state.set_active(0);
            assert_eq!(state.neighbour(TabDirection::Prev), Some(2));
        }

        #[test]
        fn single_tab_has_no_neighbour() {
            let mut state = EditorState::new();
            state.push(report_tab(None));
            assert_eq!(state.neighbour(TabDirection::Next), None);
        }

        #[test]
        fn close_moves_left() {
            let mut state = three_tabs();
            state.set_active(1);
            state.close_active().unwrap();
            assert_eq!(state.active_index(), 0);
            state.close_active().unwrap();
            state.close_active().unwrap();
            assert!(state.is_empty());
            assert!(state.close_active().is_none());
        }

        #[test]
        fn any_unsaved_is_or_over_tabs() {
            let mut state = three_tabs();
            assert!(!state.any_unsaved());
            state.set_active(1);
            state
                .active_mut()
                .unwrap()
                .form_mut()
                .set_text(report::SUMMARY, "x")
                .unwrap();
            assert!(state.any_unsaved());
            state.set_active(0);
            assert!(!state.active_dirty());
        }

        #[test]
        fn find_and_forget() {
            let (_dir, store) = make_store();
            let report = stored_report(&store);
            let mut state = three_tabs();
            state.push(report_tab(Some(report.clone())));
            assert_eq!(state.find(EntityKind::Report, report.id), Some(3));
            state.forget(EntityKind::Report, report.id);
            assert_eq!(state.find(EntityKind::Report, report.id), None);
            assert_eq!(state.tabs().len(), 3);
            assert!(state.active_index() < 3);
        }
    }
}
