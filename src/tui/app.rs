use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout};
use ratatui::{Frame, Terminal};

use crate::config::Config;
use crate::form::{ChangeSet, NavigationGate, Notify, Outcome};
use crate::model::{Report, User};
use crate::storage::Store;

use super::action::{Action, EntityKind, ScreenState};
use super::error::AppError;
use super::screens::{
    Bound, EditorState, EditorTab, HelpState, ReportListState, UserListState, draw_editor,
    draw_help, draw_list,
};
use super::widgets::{Notifier, decision_for, draw_confirm, draw_notification};

/// Poll interval while no toast is waiting to expire.
const IDLE_POLL: Duration = Duration::from_secs(1);

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Paged list of reports.
    ReportList,
    /// Paged list of users.
    UserList,
    /// Tabbed record editor.
    Editor,
    /// Show keybinding help.
    Help,
}

/// A navigation that can drop the active tab's edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingNav {
    /// Replace the active tab with a blank record.
    NewEntity,
    /// Activate the tab at this index.
    SwitchTab(usize),
    /// Load a stored record into the active tab.
    Render { kind: EntityKind, id: u64 },
    CloseTab,
    /// Leave the application; guards every tab, not just the active one.
    Quit,
}

/// Top-level application state.
pub struct App {
    screen: Screen,
    store: Store,
    config: Config,
    reports: ReportListState,
    users: UserListState,
    editor: EditorState,
    help: HelpState,
    gate: NavigationGate<PendingNav>,
    notifier: Notifier,
    should_quit: bool,
}

impl App {
    /// Creates a new `App` on the [`Screen::ReportList`] screen.
    pub fn new(store: Store, config: Config) -> Result<Self, AppError> {
        let mut app = Self {
            screen: Screen::ReportList,
            store,
            notifier: Notifier::new(config.notification_timeout_secs),
            config,
            reports: ReportListState::new(),
            users: UserListState::new(),
            editor: EditorState::new(),
            help: HelpState::new(),
            gate: NavigationGate::new(),
            should_quit: false,
        };
        let per_page = app.config.page_size();
        app.reports.load(&app.store, per_page)?;
        app.users.load(&app.store, per_page)?;
        Ok(app)
    }

    /// Main event loop: draw → poll event → dispatch → expire toasts.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            let timeout = self
                .notifier
                .next_deadline(Instant::now())
                .unwrap_or(IDLE_POLL);
            if event::poll(timeout)?
                && let Event::Key(key) = event::read()?
            {
                self.handle_key(key);
            }
            self.notifier.expire(Instant::now());
        }
        tracing::info!("calldesk exiting");
        Ok(())
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let [body, toast] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

        match self.screen {
            Screen::ReportList => draw_list(&self.reports, frame, body),
            Screen::UserList => draw_list(&self.users, frame, body),
            Screen::Editor => draw_editor(&self.editor, frame, body),
            Screen::Help => draw_help(&self.help, frame, body),
        }

        if let Some(nav) = self.gate.pending() {
            let (title, changes) = self.confirm_subject(*nav);
            draw_confirm(&title, &changes, frame, body);
        }
        draw_notification(&self.notifier, frame, toast);
    }

    // The tab whose edits the confirmation is about.
    fn confirm_subject(&self, nav: PendingNav) -> (String, ChangeSet) {
        let tab = match nav {
            PendingNav::Quit if !self.editor.active_dirty() => self
                .editor
                .tabs()
                .iter()
                .find(|t| t.has_unsaved_changes()),
            _ => self.editor.active(),
        };
        tab.map_or_else(
            || ("This form".to_string(), ChangeSet::default()),
            |t| (t.title(), t.form().changes().clone()),
        )
    }

    /// Handles a key event: the confirmation first, then global keys, then
    /// the current screen.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.gate.is_pending() {
            if let Some(decision) = decision_for(key) {
                let outcome = self.gate.resolve(decision);
                self.apply_outcome(outcome);
            }
            return;
        }

        if key.modifiers == KeyModifiers::CONTROL {
            let action = match key.code {
                KeyCode::Char('r') => Some(Action::Navigate(Screen::ReportList)),
                KeyCode::Char('u') => Some(Action::Navigate(Screen::UserList)),
                KeyCode::Char('e') => Some(Action::Navigate(Screen::Editor)),
                KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            };
            if let Some(action) = action {
                self.apply(action);
                return;
            }
        }

        if key.code == KeyCode::F(1) {
            if self.screen != Screen::Help {
                self.help.open_from(self.screen);
                self.screen = Screen::Help;
            }
            return;
        }

        let action = match self.screen {
            Screen::ReportList => self.reports.handle_key(key),
            Screen::UserList => self.users.handle_key(key),
            Screen::Editor => self.editor.handle_key(key),
            Screen::Help => self.help.handle_key(key),
        };
        self.apply(action);
    }

    /// Applies a screen action, reporting failures as error toasts.
    pub fn apply(&mut self, action: Action) {
        if let Err(e) = self.try_apply(action) {
            tracing::warn!(error = %e, "action failed");
            self.notify_error(&e.to_string());
        }
    }

    fn notify_error(&mut self, message: &str) {
        let timeout = self.config.notification_timeout_secs;
        self.notifier.error(message, timeout);
    }

    fn try_apply(&mut self, action: Action) -> Result<(), AppError> {
        match action {
            Action::None => {}
            Action::Navigate(screen) => self.navigate(screen)?,
            Action::Open { kind, id, new_tab } => {
                if let Some(index) = self.editor.find(kind, id) {
                    if index == self.editor.active_index() {
                        self.screen = Screen::Editor;
                    } else {
                        self.request_navigation(PendingNav::SwitchTab(index));
                    }
                } else if new_tab || self.editor.is_empty() {
                    let tab = self.tab_for(self.load_bound(kind, id)?)?;
                    self.editor.push(tab);
                    self.screen = Screen::Editor;
                } else {
                    self.request_navigation(PendingNav::Render { kind, id });
                }
            }
            Action::Create(kind) => {
                let tab = self.tab_for(Bound::blank(kind))?;
                self.editor.push(tab);
                self.screen = Screen::Editor;
            }
            Action::NewEntity => self.request_navigation(PendingNav::NewEntity),
            Action::SwitchTab(direction) => {
                if let Some(index) = self.editor.neighbour(direction) {
                    self.request_navigation(PendingNav::SwitchTab(index));
                }
            }
            Action::CloseTab => self.request_navigation(PendingNav::CloseTab),
            Action::Save => {
                let title = self.save_active()?;
                self.notifier.success(&format!("Saved {title}"));
            }
            Action::Forward => {
                let Some(tab) = self.editor.active_mut() else {
                    return Ok(());
                };
                let path = tab.forward(&self.store)?;
                self.notifier
                    .success(&format!("Forwarded to {}", path.display()));
                self.reload(EntityKind::Report)?;
            }
            Action::SoftDelete(kind, id) => {
                match kind {
                    EntityKind::Report => self.store.soft_delete::<Report>(id).map(drop)?,
                    EntityKind::User => self.store.soft_delete::<User>(id).map(drop)?,
                }
                self.notifier.success("Deleted");
                self.reload(kind)?;
            }
            Action::Restore(kind, id) => {
                match kind {
                    EntityKind::Report => self.store.restore::<Report>(id).map(drop)?,
                    EntityKind::User => self.store.restore::<User>(id).map(drop)?,
                }
                self.notifier.success("Restored");
                self.reload(kind)?;
            }
            Action::HardDelete(kind, id) => {
                match kind {
                    EntityKind::Report => self.store.hard_delete::<Report>(id)?,
                    EntityKind::User => self.store.hard_delete::<User>(id)?,
                }
                self.editor.forget(kind, id);
                self.notifier.success("Purged");
                self.reload(kind)?;
            }
            Action::Reload(kind) => self.reload(kind)?,
            Action::Error(message) => self.notify_error(&message),
            Action::Quit => self.request_navigation(PendingNav::Quit),
        }
        Ok(())
    }

    fn navigate(&mut self, screen: Screen) -> Result<(), AppError> {
        match screen {
            Screen::ReportList => self.reload(EntityKind::Report)?,
            Screen::UserList => self.reload(EntityKind::User)?,
            Screen::Editor | Screen::Help => {}
        }
        self.screen = screen;
        Ok(())
    }

    fn reload(&mut self, kind: EntityKind) -> Result<(), AppError> {
        let per_page = self.config.page_size();
        match kind {
            EntityKind::Report => self.reports.load(&self.store, per_page)?,
            EntityKind::User => self.users.load(&self.store, per_page)?,
        }
        Ok(())
    }

    fn load_bound(&self, kind: EntityKind, id: u64) -> Result<Bound, AppError> {
        Ok(match kind {
            EntityKind::Report => Bound::Report(Some(self.store.load(id)?)),
            EntityKind::User => Bound::User(Some(self.store.load(id)?)),
        })
    }

    fn tab_for(&self, bound: Bound) -> Result<EditorTab, AppError> {
        let policy = EditorState::policy(&self.config, bound.kind());
        EditorTab::new(bound, policy)
    }

    // --- Navigation gate ---

    /// Runs `nav` now if nothing would be lost, otherwise parks it behind
    /// the confirmation.
    fn request_navigation(&mut self, nav: PendingNav) {
        let dirty = match nav {
            PendingNav::Quit => self.editor.any_unsaved(),
            _ => self.editor.active_dirty(),
        };
        match self.gate.request(dirty, nav) {
            Some(outcome) => self.apply_outcome(outcome),
            None => tracing::info!(?nav, "waiting for save confirmation"),
        }
    }

    fn apply_outcome(&mut self, outcome: Outcome<PendingNav>) {
        let nav = match outcome {
            Outcome::Proceed(nav) => Some(nav),
            Outcome::SaveThenProceed(nav) => {
                let result = self.save_before(nav);
                let saved = NavigationGate::finish_save(nav, result, &mut self.notifier);
                if saved.is_some() {
                    self.notifier.success("Saved");
                }
                saved
            }
            Outcome::Cancelled => None,
        };
        if let Some(nav) = nav
            && let Err(e) = self.proceed(nav)
        {
            tracing::warn!(error = %e, ?nav, "navigation failed");
            self.notify_error(&e.to_string());
        }
    }

    fn save_before(&mut self, nav: PendingNav) -> Result<(), AppError> {
        match nav {
            PendingNav::Quit => self.save_all(),
            _ => self.save_active().map(drop),
        }
    }

    fn save_active(&mut self) -> Result<String, AppError> {
        let Some(tab) = self.editor.active_mut() else {
            return Err(AppError::Unavailable("no open tab"));
        };
        tab.save(&self.store)?;
        let title = tab.title();
        let kind = tab.kind();
        self.reload(kind)?;
        Ok(title)
    }

    /// Saves every dirty tab; the first failing tab becomes active.
    fn save_all(&mut self) -> Result<(), AppError> {
        let dirty: Vec<usize> = self
            .editor
            .tabs()
            .iter()
            .enumerate()
            .filter(|(_, t)| t.has_unsaved_changes())
            .map(|(i, _)| i)
            .collect();
        for index in dirty {
            self.editor.set_active(index);
            self.save_active()?;
        }
        Ok(())
    }

    /// Runs a navigation that the gate released.
    fn proceed(&mut self, nav: PendingNav) -> Result<(), AppError> {
        tracing::debug!(?nav, "navigation proceeds");
        match nav {
            PendingNav::NewEntity => {
                if let Some(tab) = self.editor.active_mut() {
                    let blank = Bound::blank(tab.kind());
                    tab.render(blank)?;
                }
                self.screen = Screen::Editor;
            }
            PendingNav::SwitchTab(index) => {
                if let Some(tab) = self.editor.active_mut() {
                    tab.discard()?;
                }
                self.editor.set_active(index);
                self.screen = Screen::Editor;
            }
            PendingNav::Render { kind, id } => {
                let bound = self.load_bound(kind, id)?;
                if let Some(tab) = self.editor.active_mut() {
                    tab.render(bound)?;
                }
                self.screen = Screen::Editor;
            }
            PendingNav::CloseTab => {
                self.editor.close_active();
            }
            PendingNav::Quit => self.should_quit = true,
        }
        Ok(())
    }

    // --- Accessors ---

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub fn reports(&self) -> &ReportListState {
        &self.reports
    }

    pub fn users(&self) -> &UserListState {
        &self.users
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Returns `true` while the save-or-discard prompt is showing.
    pub fn is_confirming(&self) -> bool {
        self.gate.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    use super::*;
    use crate::model::ReportDraft;
    use crate::tui::screens::editor::report;
    use crate::tui::widgets::ToastKind;

    fn make_app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::with_path(dir.path()).unwrap();
        (dir, App::new(store, Config::default()).unwrap())
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        key(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        key(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn alt(code: KeyCode) -> KeyEvent {
        key(code, KeyModifiers::ALT)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(press(KeyCode::Char(ch)));
        }
    }

    fn seed_report(app: &App, summary: &str) -> Report {
        let report = Report::from_draft(ReportDraft {
            caller_name: "Ada".into(),
            caller_phone: String::new(),
            call_received: "2026-03-14 09:30".into(),
            location: String::new(),
            category: Default::default(),
            priority: Default::default(),
            departments: vec![],
            emergency_dispatched: false,
            follow_up: false,
            summary: summary.into(),
            narrative: String::new(),
        })
        .unwrap();
        app.store.save_report(report).unwrap()
    }

    /// Opens two blank report tabs; the second is active.
    fn two_tabs(app: &mut App) {
        app.apply(Action::Create(EntityKind::Report));
        app.apply(Action::Create(EntityKind::Report));
        assert_eq!(app.editor().active_index(), 1);
    }

    fn active_tab(app: &App) -> &EditorTab {
        app.editor().active().unwrap()
    }

    fn last_toast(app: &App) -> (String, ToastKind) {
        let toast = app.notifier().current().unwrap();
        (toast.message.clone(), toast.kind)
    }

    mod screens {
        use super::*;

        #[test]
        fn new_starts_on_report_list() {
            let (_dir, app) = make_app();
            assert_eq!(app.screen(), Screen::ReportList);
            assert!(!app.should_quit());
            assert!(app.editor().is_empty());
        }

        #[test]
        fn global_shortcuts() {
            let (_dir, mut app) = make_app();
            app.handle_key(ctrl('u'));
            assert_eq!(app.screen(), Screen::UserList);
            app.handle_key(ctrl('e'));
            assert_eq!(app.screen(), Screen::Editor);
            app.handle_key(ctrl('r'));
            assert_eq!(app.screen(), Screen::ReportList);
        }

        #[test]
        fn f1_opens_help_and_returns() {
            let (_dir, mut app) = make_app();
            app.handle_key(ctrl('u'));
            app.handle_key(press(KeyCode::F(1)));
            assert_eq!(app.screen(), Screen::Help);
            app.handle_key(press(KeyCode::Esc));
            assert_eq!(app.screen(), Screen::UserList);
        }

        #[test]
        fn release_events_are_ignored() {
            let (_dir, mut app) = make_app();
            app.handle_key(release(KeyCode::Char('q')));
            assert!(!app.should_quit());
        }

        #[test]
        fn n_on_list_opens_blank_tab() {
            let (_dir, mut app) = make_app();
            app.handle_key(press(KeyCode::Char('n')));
            assert_eq!(app.screen(), Screen::Editor);
            assert_eq!(active_tab(&app).title(), "New report");
        }

        #[test]
        fn esc_in_editor_returns_to_list() {
            let (_dir, mut app) = make_app();
            app.apply(Action::Create(EntityKind::User));
            app.handle_key(press(KeyCode::Esc));
            assert_eq!(app.screen(), Screen::UserList);
            assert_eq!(app.editor().tabs().len(), 1, "leaving the editor keeps tabs");
        }
    }

    mod gate {
        use super::*;

        #[test]
        fn clean_switch_proceeds_without_prompt() {
            let (_dir, mut app) = make_app();
            two_tabs(&mut app);
            app.handle_key(alt(KeyCode::Right));
            assert!(!app.is_confirming());
            assert_eq!(app.editor().active_index(), 0);
        }

        #[test]
        fn dirty_new_entity_discard_resets() {
            let (_dir, mut app) = make_app();
            app.apply(Action::Create(EntityKind::Report));
            type_text(&mut app, "Ada");
            assert!(active_tab(&app).has_unsaved_changes());

            app.handle_key(ctrl('n'));
            assert!(app.is_confirming());
            assert_eq!(active_tab(&app).form().value(report::CALLER_NAME), "Ada");

            app.handle_key(press(KeyCode::Char('d')));
            assert!(!app.is_confirming());
            assert!(!active_tab(&app).has_unsaved_changes());
            assert_eq!(active_tab(&app).form().value(report::CALLER_NAME), "");
        }

        #[test]
        fn dismiss_is_discard() {
            let (_dir, mut app) = make_app();
            two_tabs(&mut app);
            type_text(&mut app, "Ada");
            app.handle_key(alt(KeyCode::Left));
            assert!(app.is_confirming());
            app.handle_key(press(KeyCode::Esc));
            assert!(!app.is_confirming());
            assert_eq!(app.editor().active_index(), 0);
            assert!(!app.editor().any_unsaved(), "departing tab was reverted");
        }

        #[test]
        fn keys_are_swallowed_while_confirming() {
            let (_dir, mut app) = make_app();
            app.apply(Action::Create(EntityKind::Report));
            type_text(&mut app, "A");
            app.handle_key(ctrl('w'));
            assert!(app.is_confirming());
            app.handle_key(press(KeyCode::Char('x')));
            app.handle_key(ctrl('q'));
            assert!(app.is_confirming());
            assert!(!app.should_quit());
            assert_eq!(active_tab(&app).form().value(report::CALLER_NAME), "A");
        }

        #[test]
        fn save_failure_keeps_tab_dirty_and_stays() {
            let (_dir, mut app) = make_app();
            two_tabs(&mut app);
            type_text(&mut app, "Ada");
            app.handle_key(alt(KeyCode::Left));
            app.handle_key(press(KeyCode::Char('s')));

            assert!(!app.is_confirming());
            assert_eq!(app.editor().active_index(), 1, "navigation must not run");
            assert!(active_tab(&app).has_unsaved_changes());
            let (message, kind) = last_toast(&app);
            assert_eq!(kind, ToastKind::Error);
            assert!(message.starts_with("Save failed"), "{message}");
        }

        #[test]
        fn save_then_proceed() {
            let (_dir, mut app) = make_app();
            two_tabs(&mut app);
            type_text(&mut app, "Ada");
            app.editor
                .active_mut()
                .unwrap()
                .form_mut()
                .set_text(report::SUMMARY, "Bike")
                .unwrap();
            app.handle_key(alt(KeyCode::Left));
            app.handle_key(press(KeyCode::Char('s')));

            assert_eq!(app.editor().active_index(), 0);
            assert!(!app.editor().any_unsaved());
            assert_eq!(app.editor().tabs()[1].title(), "#1 Bike");
            assert_eq!(app.reports().page().total, 1);
            assert_eq!(last_toast(&app).1, ToastKind::Success);
        }

        #[test]
        fn open_into_dirty_tab_asks_first() {
            let (_dir, mut app) = make_app();
            let stored = seed_report(&app, "Bike");
            app.apply(Action::Create(EntityKind::Report));
            type_text(&mut app, "Zed");
            app.apply(Action::Open {
                kind: EntityKind::Report,
                id: stored.id,
                new_tab: false,
            });
            assert!(app.is_confirming());
            app.handle_key(press(KeyCode::Char('d')));
            assert_eq!(active_tab(&app).title(), "#1 Bike");
            assert_eq!(app.editor().tabs().len(), 1);
        }

        #[test]
        fn reopening_active_record_keeps_edits() {
            let (_dir, mut app) = make_app();
            let stored = seed_report(&app, "Bike");
            let open = Action::Open {
                kind: EntityKind::Report,
                id: stored.id,
                new_tab: false,
            };
            app.apply(open.clone());
            app.editor
                .active_mut()
                .unwrap()
                .form_mut()
                .set_text(report::LOCATION, "Pier 9")
                .unwrap();
            app.handle_key(ctrl('r'));

            app.apply(open);
            assert!(!app.is_confirming());
            assert_eq!(app.screen(), Screen::Editor);
            assert_eq!(active_tab(&app).form().value(report::LOCATION), "Pier 9");
            assert!(active_tab(&app).has_unsaved_changes());
        }

        #[test]
        fn open_in_new_tab_skips_gate() {
            let (_dir, mut app) = make_app();
            let stored = seed_report(&app, "Bike");
            app.apply(Action::Create(EntityKind::Report));
            type_text(&mut app, "Zed");
            app.apply(Action::Open {
                kind: EntityKind::Report,
                id: stored.id,
                new_tab: true,
            });
            assert!(!app.is_confirming());
            assert_eq!(app.editor().tabs().len(), 2);
            assert!(app.editor().any_unsaved());
        }

        #[test]
        fn open_already_open_record_switches() {
            let (_dir, mut app) = make_app();
            let stored = seed_report(&app, "Bike");
            let open = Action::Open {
                kind: EntityKind::Report,
                id: stored.id,
                new_tab: true,
            };
            app.apply(open.clone());
            app.apply(Action::Create(EntityKind::Report));
            app.apply(open);
            assert_eq!(app.editor().tabs().len(), 2);
            assert_eq!(app.editor().active_index(), 0);
        }
    }

    mod quit {
        use super::*;

        #[test]
        fn clean_quit_is_immediate() {
            let (_dir, mut app) = make_app();
            two_tabs(&mut app);
            app.handle_key(ctrl('q'));
            assert!(app.should_quit());
        }

        #[test]
        fn q_on_list_quits() {
            let (_dir, mut app) = make_app();
            app.handle_key(press(KeyCode::Char('q')));
            assert!(app.should_quit());
        }

        #[test]
        fn any_dirty_tab_blocks_quit() {
            let (_dir, mut app) = make_app();
            two_tabs(&mut app);
            app.editor.set_active(0);
            type_text(&mut app, "Ada");
            app.editor.set_active(1);
            assert!(!app.editor().active_dirty());

            app.handle_key(ctrl('q'));
            assert!(app.is_confirming());
            assert!(!app.should_quit());
            app.handle_key(press(KeyCode::Esc));
            assert!(app.should_quit());
        }

        #[test]
        fn failed_save_on_quit_stays_open() {
            let (_dir, mut app) = make_app();
            two_tabs(&mut app);
            app.editor.set_active(0);
            type_text(&mut app, "Ada");
            app.editor.set_active(1);
            app.handle_key(ctrl('q'));
            app.handle_key(press(KeyCode::Char('s')));
            assert!(!app.should_quit());
            assert_eq!(app.editor().active_index(), 0, "failing tab is shown");
            assert_eq!(last_toast(&app).1, ToastKind::Error);
        }
    }

    mod records {
        use super::*;

        #[test]
        fn ctrl_s_saves_active_tab() {
            let (_dir, mut app) = make_app();
            app.apply(Action::Create(EntityKind::Report));
            type_text(&mut app, "Ada");
            app.editor
                .active_mut()
                .unwrap()
                .form_mut()
                .set_text(report::SUMMARY, "Bike")
                .unwrap();
            app.handle_key(ctrl('s'));
            assert!(!active_tab(&app).has_unsaved_changes());
            assert_eq!(last_toast(&app), ("Saved #1 Bike".to_string(), ToastKind::Success));
        }

        #[test]
        fn ctrl_s_on_clean_tab_writes_nothing() {
            let (_dir, mut app) = make_app();
            let stored = seed_report(&app, "Bike");
            app.apply(Action::Open {
                kind: EntityKind::Report,
                id: stored.id,
                new_tab: true,
            });
            app.handle_key(ctrl('s'));
            let (message, kind) = last_toast(&app);
            assert_eq!(kind, ToastKind::Error);
            assert!(message.contains("no changes to save"), "{message}");
            assert_eq!(app.store.load::<Report>(stored.id).unwrap(), stored);
        }

        #[test]
        fn forward_writes_outbox() {
            let (_dir, mut app) = make_app();
            let stored = seed_report(&app, "Bike");
            app.apply(Action::Open {
                kind: EntityKind::Report,
                id: stored.id,
                new_tab: true,
            });
            app.handle_key(ctrl('f'));
            let (message, kind) = last_toast(&app);
            assert_eq!(kind, ToastKind::Success);
            assert!(message.starts_with("Forwarded to"));
            assert!(app.store.outbox().read_dir().unwrap().next().is_some());

            app.handle_key(ctrl('f'));
            assert_eq!(last_toast(&app).1, ToastKind::Error);
        }

        #[test]
        fn delete_restore_purge() {
            let (_dir, mut app) = make_app();
            let stored = seed_report(&app, "Bike");
            app.apply(Action::Open {
                kind: EntityKind::Report,
                id: stored.id,
                new_tab: true,
            });

            app.apply(Action::SoftDelete(EntityKind::Report, stored.id));
            assert_eq!(app.reports().page().total, 0);
            app.apply(Action::HardDelete(EntityKind::Report, stored.id));
            assert!(app.editor().is_empty(), "tab of purged record is closed");
            assert!(app.store.load::<Report>(stored.id).is_err());
        }

        #[test]
        fn restore_live_record_is_error_toast() {
            let (_dir, mut app) = make_app();
            let stored = seed_report(&app, "Bike");
            app.apply(Action::Restore(EntityKind::Report, stored.id));
            assert_eq!(last_toast(&app).1, ToastKind::Error);
        }
    }
}
