// App state and main event loop.
// Owns the data snapshot, filter form, and keyboard input handling.

use std::io;

use chrono::{DateTime, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use tracing::info;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::data::{self, DataLoad, MergedTable, RefreshReport};
use crate::error::Result;
use crate::github::GitHubClient;
use crate::state::{
    ConsoleLog, FilterForm, Focus, LoadingState, Notice, NoticeKind, ResultsState,
};
use crate::ui;

/// Rows moved by PgUp/PgDn in the results table.
const PAGE_SIZE: usize = 20;

/// Active tab in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Problems,
    Console,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Problems => "Problems",
            Tab::Console => "Console",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Problems => Tab::Console,
            Tab::Console => Tab::Problems,
        }
    }
}

/// Blocking work to run before the next input poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingAction {
    /// Use the cache if present, otherwise fetch.
    Load,
    /// Fetch everything again and replace the cache.
    Refresh,
}

/// Main application state.
pub struct App {
    /// Currently active tab.
    pub active_tab: Tab,
    pub client: GitHubClient,
    pub store: CacheStore,
    /// Current table snapshot, replaced wholesale on load or refresh.
    pub data: LoadingState<MergedTable>,
    pub form: FilterForm,
    pub results: ResultsState,
    pub console: ConsoleLog,
    /// Outcome of the last load or refresh.
    pub data_notice: Option<Notice>,
    /// When the cache file was last written.
    pub cached_at: Option<DateTime<Utc>>,
    /// Whether the help overlay is visible.
    pub show_help: bool,
    /// Whether the app should exit.
    pub should_quit: bool,
    pending: Option<PendingAction>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let store = CacheStore::new(config.cache_path.clone());
        let client = GitHubClient::new(config)?;

        Ok(Self {
            active_tab: Tab::default(),
            client,
            store,
            data: LoadingState::Loading,
            form: FilterForm::new(),
            results: ResultsState::new(),
            console: ConsoleLog::new(),
            data_notice: None,
            cached_at: None,
            show_help: false,
            should_quit: false,
            pending: Some(PendingAction::Load),
        })
    }

    /// Main event loop.
    pub async fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;

            if let Some(action) = self.pending.take() {
                self.perform(action).await;
                continue;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Run a load or refresh to completion. The UI stays on the loading
    /// screen drawn before this call until it returns.
    async fn perform(&mut self, action: PendingAction) {
        let load = match action {
            PendingAction::Load => data::load_or_fetch(&mut self.client, &self.store).await,
            PendingAction::Refresh => {
                DataLoad::Fetched(data::refresh(&mut self.client, &self.store).await)
            }
        };
        info!(rows = load.table().len(), "data ready");
        self.apply_load(load);
    }

    /// Queue a refresh from GitHub and show the loading state.
    pub fn request_refresh(&mut self) {
        if self.pending.is_some() || self.data.is_loading() {
            return;
        }
        info!("manual refresh requested");
        self.console.info("Refreshing data from GitHub");
        self.data = LoadingState::Loading;
        self.pending = Some(PendingAction::Refresh);
    }

    /// Install a freshly loaded table and report how it was obtained.
    fn apply_load(&mut self, load: DataLoad) {
        let table = match load {
            DataLoad::Cached(table) => {
                let message = format!(
                    "Loaded {} problems from cache ({})",
                    table.len(),
                    self.store.path().display()
                );
                self.console.info(message.clone());
                self.data_notice = Some(Notice::new(NoticeKind::Info, message));
                table
            }
            DataLoad::Fetched(report) => self.report_refresh(report),
        };

        self.cached_at = self.store.modified_at().ok().map(DateTime::<Utc>::from);
        self.form.set_companies(table.companies());
        self.data = LoadingState::Loaded(table);
        self.refilter();
    }

    fn report_refresh(&mut self, report: RefreshReport) -> MergedTable {
        let RefreshReport {
            listing_error,
            merge,
        } = report;

        for skipped in &merge.skipped {
            self.console
                .warn(format!("Skipped {}: {}", skipped.path, skipped.reason));
        }
        if let Some(e) = &merge.cache_error {
            self.console.error(format!("Could not write cache: {}", e));
        }

        self.data_notice = Some(match listing_error {
            Some(e) => {
                self.console.error(e.to_string());
                Notice::new(NoticeKind::Error, e.to_string())
            }
            None => {
                let message = format!(
                    "Refreshed data from GitHub: {} problems from {} files ({} skipped)",
                    merge.table.len(),
                    merge.loaded,
                    merge.skipped.len()
                );
                self.console.info(message.clone());
                Notice::new(NoticeKind::Success, message)
            }
        });

        merge.table
    }

    /// Recompute the filtered view from the current snapshot and form.
    fn refilter(&mut self) {
        match self.data.data() {
            Some(table) => self.results.recompute(table, &self.form.criteria()),
            None => self.results.clear(),
        }
    }

    /// Handle keyboard and other events.
    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        if ctrl && key.code == KeyCode::Char('r') {
            self.request_refresh();
            return;
        }

        if key.code == KeyCode::F(2) {
            self.active_tab = self.active_tab.next();
            self.clear_console_badge_if_viewing();
            return;
        }

        let typing = self.active_tab == Tab::Problems && self.form.focus == Focus::Search;
        if !typing {
            match key.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('r') => {
                    self.request_refresh();
                    return;
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                    return;
                }
                _ => {}
            }
        }

        match self.active_tab {
            Tab::Problems => self.handle_problems_key(key),
            Tab::Console => self.handle_console_key(key),
        }
    }

    fn handle_problems_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => {
                self.form.focus = self.form.focus.next();
                return;
            }
            KeyCode::BackTab => {
                self.form.focus = self.form.focus.prev();
                return;
            }
            _ => {}
        }

        let changed = match self.form.focus {
            Focus::Company => match key.code {
                KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
                    self.form.prev_company();
                    true
                }
                KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
                    self.form.next_company();
                    true
                }
                _ => false,
            },
            Focus::Recency => match key.code {
                KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
                    self.form.prev_recency();
                    true
                }
                KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
                    self.form.next_recency();
                    true
                }
                _ => false,
            },
            Focus::Search => match key.code {
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.form.push_char(c);
                    true
                }
                KeyCode::Backspace => self.form.pop_char(),
                KeyCode::Esc => self.form.clear_query(),
                KeyCode::Down | KeyCode::Enter => {
                    self.form.focus = Focus::Results;
                    false
                }
                _ => false,
            },
            Focus::Results => {
                match key.code {
                    KeyCode::Up | KeyCode::Char('k') => self.results.select_prev(),
                    KeyCode::Down | KeyCode::Char('j') => self.results.select_next(),
                    KeyCode::PageUp => self.results.page_up(PAGE_SIZE),
                    KeyCode::PageDown => self.results.page_down(PAGE_SIZE),
                    KeyCode::Home | KeyCode::Char('g') => self.results.select_first(),
                    KeyCode::End | KeyCode::Char('G') => self.results.select_last(),
                    KeyCode::Char('/') => self.form.focus = Focus::Search,
                    _ => {}
                }
                false
            }
        };

        if changed {
            self.refilter();
        }
    }

    fn handle_console_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.console.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.console.select_next(),
            _ => {}
        }
    }

    /// Clear console badge when viewing console tab.
    fn clear_console_badge_if_viewing(&mut self) {
        if self.active_tab == Tab::Console {
            self.console.mark_read();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CompanyFilter;
    use crate::data::table::tests::table;
    use crate::state::ResultsView;
    use tempfile::TempDir;

    fn app_with_table(dir: &TempDir) -> App {
        let config = Config {
            cache_path: dir.path().join("merged_problems.csv"),
            ..Config::default()
        };
        let mut app = App::new(config).unwrap();
        app.pending = None;
        app.apply_load(DataLoad::Cached(table(
            &["Title", "Frequency", "Company"],
            &[
                &["Two Sum", "85", "Google"],
                &["Two Sum", "50", "Meta"],
                &["LRU Cache", "65", "Meta"],
            ],
        )));
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_initial_load_populates_companies() {
        let temp_dir = TempDir::new().unwrap();
        let app = app_with_table(&temp_dir);

        assert_eq!(app.form.company_option_count(), 3);
        assert_eq!(app.results.row_count(), 3);
        assert_eq!(app.data_notice.as_ref().unwrap().kind, NoticeKind::Info);
    }

    #[test]
    fn test_typing_filters_results() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app_with_table(&temp_dir);

        // Letters go to the search box, so 'q' and 'r' do not quit or refresh.
        type_str(&mut app, "lru");
        assert!(!app.should_quit);
        assert_eq!(app.results.row_count(), 1);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.results.row_count(), 3);
    }

    #[test]
    fn test_company_and_recency_selectors() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app_with_table(&temp_dir);

        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.form.focus, Focus::Company);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.form.company(), CompanyFilter::Named("Meta".into()));
        assert_eq!(app.results.row_count(), 2);

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.form.focus, Focus::Recency);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.results.row_count(), 1);
        press(&mut app, KeyCode::Right);
        assert!(matches!(app.results.view, ResultsView::Matches(ref t) if t.is_empty()));
        assert_eq!(app.results.notice().kind, NoticeKind::Warning);
    }

    #[test]
    fn test_refresh_and_quit_outside_search() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app_with_table(&temp_dir);

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.pending, Some(PendingAction::Refresh));
        assert!(app.data.is_loading());

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_listing_failure_report() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app_with_table(&temp_dir);

        app.apply_load(DataLoad::Fetched(RefreshReport {
            listing_error: Some(crate::error::LeetfindError::DirectoryListFailed {
                reason: "HTTP 500".to_string(),
            }),
            merge: crate::data::merge::MergeReport {
                table: MergedTable::default(),
                loaded: 0,
                skipped: Vec::new(),
                cache_error: None,
            },
        }));

        assert_eq!(app.data_notice.as_ref().unwrap().kind, NoticeKind::Error);
        assert_eq!(app.results.view, ResultsView::NoData);
        assert_eq!(app.console.unread, 1);
        assert_eq!(app.form.company_option_count(), 1);
    }

    #[test]
    fn test_console_badge_cleared_on_view() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app_with_table(&temp_dir);
        app.console.warn("Skipped google/All.csv");

        press(&mut app, KeyCode::F(2));
        assert_eq!(app.active_tab, Tab::Console);
        assert_eq!(app.console.unread, 0);
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app_with_table(&temp_dir);

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
    }
}
