use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use qms_core::overdue::local_today;
use qms_core::{Catalog, Choice, Domain, FilterOption, Query, ALL_FILTER};
use ratatui::widgets::TableState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Overview,
    Documents,
    Audits,
    Training,
    NonConformance,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Overview,
        Screen::Documents,
        Screen::Audits,
        Screen::Training,
        Screen::NonConformance,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Screen::Overview => "Dashboard",
            Screen::Documents => "Documents",
            Screen::Audits => "Audits",
            Screen::Training => "Training",
            Screen::NonConformance => "Non-Conformance",
        }
    }

    pub fn domain(self) -> Option<Domain> {
        match self {
            Screen::Overview => None,
            Screen::Documents => Some(Domain::Documents),
            Screen::Audits => Some(Domain::Audits),
            Screen::Training => Some(Domain::Training),
            Screen::NonConformance => Some(Domain::NonConformance),
        }
    }

    pub fn index(self) -> usize {
        match self {
            Screen::Overview => 0,
            Screen::Documents => 1,
            Screen::Audits => 2,
            Screen::Training => 3,
            Screen::NonConformance => 4,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// `1` is the dashboard, `2`..`5` the record screens.
    pub fn from_digit(digit: char) -> Option<Self> {
        let index = digit.to_digit(10)? as usize;
        index.checked_sub(1).and_then(|idx| Self::ALL.get(idx).copied())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
}

/// Per-screen query inputs and the rows they currently select.
#[derive(Debug, Default)]
pub struct ViewState {
    pub search: String,
    /// Index into the screen's filter options; 0 is `all`.
    pub filter_index: usize,
    /// Store positions of the matching records, in store order.
    pub rows: Vec<usize>,
    pub table_state: TableState,
}

pub struct App {
    pub catalog: Catalog,
    pub today: NaiveDate,
    pub pinned_today: bool,
    pub screen: Screen,
    pub input_mode: InputMode,
    pub views: [ViewState; 4],
    pub show_detail: bool,
    pub show_help: bool,
    should_quit: bool,
}

impl App {
    pub fn new(catalog: Catalog, pinned_today: Option<NaiveDate>) -> Self {
        let mut app = Self {
            catalog,
            today: pinned_today.unwrap_or_else(local_today),
            pinned_today: pinned_today.is_some(),
            screen: Screen::Overview,
            input_mode: InputMode::Normal,
            views: Default::default(),
            show_detail: false,
            show_help: false,
            should_quit: false,
        };
        for domain in Domain::ALL {
            app.refresh_view(*domain);
        }
        app
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Follows the local calendar date unless the date was pinned at startup.
    pub fn on_tick(&mut self) {
        if self.pinned_today {
            return;
        }
        let today = local_today();
        if today != self.today {
            tracing::info!(%today, previous = %self.today, "evaluation date rolled over");
            self.today = today;
        }
    }

    pub fn view(&self, domain: Domain) -> &ViewState {
        &self.views[view_slot(domain)]
    }

    pub fn view_mut(&mut self, domain: Domain) -> &mut ViewState {
        &mut self.views[view_slot(domain)]
    }

    pub fn filter_options(&self, domain: Domain) -> Vec<FilterOption> {
        match domain {
            Domain::Documents => self.catalog.documents.filter_options(),
            Domain::Audits => self.catalog.audits.filter_options(),
            Domain::Training => self.catalog.training.filter_options(),
            Domain::NonConformance => self.catalog.non_conformances.filter_options(),
        }
    }

    pub fn active_filter(&self, domain: Domain) -> Option<FilterOption> {
        let options = self.filter_options(domain);
        let index = self.view(domain).filter_index;
        options.get(index).or_else(|| options.first()).copied()
    }

    pub fn query(&self, domain: Domain) -> Query {
        let view = self.view(domain);
        let filter = self
            .active_filter(domain)
            .map_or(ALL_FILTER, |option| option.value);
        Query::new(Some(&view.search), Some(filter))
    }

    /// Re-runs the screen's query and moves the selection to the first match.
    pub fn refresh_view(&mut self, domain: Domain) {
        let query = self.query(domain);
        let rows = match domain {
            Domain::Documents => self.catalog.documents.positions(&query),
            Domain::Audits => self.catalog.audits.positions(&query),
            Domain::Training => self.catalog.training.positions(&query),
            Domain::NonConformance => self.catalog.non_conformances.positions(&query),
        };

        let view = self.view_mut(domain);
        let selected = if rows.is_empty() { None } else { Some(0) };
        view.rows = rows;
        view.table_state.select(selected);
    }

    /// Store position of the highlighted record on a record screen.
    pub fn selected_position(&self, domain: Domain) -> Option<usize> {
        let view = self.view(domain);
        view.table_state
            .selected()
            .and_then(|selected| view.rows.get(selected).copied())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        if self.input_mode == InputMode::Search {
            self.handle_search_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Esc => {
                if self.show_help {
                    self.show_help = false;
                } else if self.show_detail {
                    self.show_detail = false;
                }
            }
            KeyCode::Tab => self.switch_screen(self.screen.next()),
            KeyCode::BackTab => self.switch_screen(self.screen.prev()),
            KeyCode::Char(digit @ '1'..='5') => {
                if let Some(screen) = Screen::from_digit(digit) {
                    self.switch_screen(screen);
                }
            }
            KeyCode::Char('/') => {
                if self.screen.domain().is_some() {
                    self.input_mode = InputMode::Search;
                }
            }
            KeyCode::Char('f') => self.cycle_filter(),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Enter => {
                if self.screen.domain().is_some() {
                    self.show_help = false;
                    self.show_detail = !self.show_detail;
                }
            }
            KeyCode::Char('?') => {
                self.show_help = !self.show_help;
            }
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) {
        match event.kind {
            MouseEventKind::ScrollUp => self.move_selection(-1),
            MouseEventKind::ScrollDown => self.move_selection(1),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let Some(domain) = self.screen.domain() else {
            self.input_mode = InputMode::Normal;
            return;
        };
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                if self.view_mut(domain).search.pop().is_some() {
                    self.refresh_view(domain);
                }
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.view_mut(domain).search.clear();
                self.refresh_view(domain);
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.view_mut(domain).search.push(ch);
                self.refresh_view(domain);
            }
            _ => {}
        }
    }

    fn switch_screen(&mut self, screen: Screen) {
        if self.screen != screen {
            tracing::debug!(from = self.screen.title(), to = screen.title(), "switch screen");
            self.screen = screen;
            self.show_detail = false;
        }
    }

    fn cycle_filter(&mut self) {
        let Some(domain) = self.screen.domain() else {
            return;
        };
        let count = self.filter_options(domain).len().max(1);
        let view = self.view_mut(domain);
        view.filter_index = (view.filter_index + 1) % count;
        self.refresh_view(domain);
    }

    fn move_selection(&mut self, delta: isize) {
        let Some(domain) = self.screen.domain() else {
            return;
        };
        let view = self.view_mut(domain);
        if view.rows.is_empty() {
            return;
        }

        let current = view.table_state.selected().unwrap_or(0) as isize;
        let len = view.rows.len() as isize;
        let mut next = current + delta;
        if next < 0 {
            next = len - 1;
        }
        if next >= len {
            next = 0;
        }
        view.table_state.select(Some(next as usize));
    }
}

fn view_slot(domain: Domain) -> usize {
    match domain {
        Domain::Documents => 0,
        Domain::Audits => 1,
        Domain::Training => 2,
        Domain::NonConformance => 3,
    }
}
