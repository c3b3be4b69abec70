use crate::fetch::FetchRequest;
use crate::types::{FetchOutcome, Mode, SavedView, View};
use ratatui::widgets::TableState;
use std::time::{Duration, Instant};

pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct App {
    /// The single active display region. Only `set_view` replaces it.
    view: View,
    pub mode: Mode,
    pub state: TableState,
    pub loading: bool,
    pub spinner_tick: usize,
    pub last_tick: Instant,
    pub search_input: String,
    pub status_message: Option<(String, Instant)>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            view: View::Summary { owners: Vec::new() },
            mode: Mode::Browse,
            state: TableState::default(),
            loading: false,
            spinner_tick: 0,
            last_tick: Instant::now(),
            search_input: String::new(),
            status_message: None,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Replace the active view. Every other region ceases to exist at
    /// this point; selection resets to the first row.
    pub fn set_view(&mut self, view: View) {
        self.view = view;
        if self.row_count() == 0 {
            self.state.select(None);
        } else {
            self.state.select(Some(0));
        }
    }

    /// Fold a completed fetch into the view. A failure leaves the
    /// current view untouched and reports on the status line only.
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) {
        self.loading = false;
        match outcome {
            FetchOutcome::SummaryLoaded(owners) => self.set_view(View::Summary { owners }),
            FetchOutcome::PageLoaded {
                category,
                page,
                rows,
                nav,
            } => self.set_view(View::CategoryList {
                category,
                page,
                rows,
                nav,
            }),
            FetchOutcome::SearchLoaded(sections) => {
                self.set_view(View::SearchResults { sections });
            }
            FetchOutcome::DetailLoaded(owner) => self.set_view(View::OwnerDetail { owner }),
            FetchOutcome::Failed(msg) => self.show_message(&msg),
        }
    }

    /// Number of selectable rows in the active view.
    pub fn row_count(&self) -> usize {
        match &self.view {
            View::Summary { owners } => owners.len(),
            View::CategoryList { rows, .. } => rows.len(),
            View::SearchResults { sections } => sections.iter().map(|s| s.rows.len()).sum(),
            View::OwnerDetail { .. } => 0,
        }
    }

    /// Owner the currently selected row links to, if any.
    pub fn selected_owner_id(&self) -> Option<u64> {
        let selected = self.state.selected()?;
        match &self.view {
            View::Summary { owners } => owners.get(selected).map(|o| o.id),
            View::CategoryList { rows, .. } => rows.get(selected).map(|r| r.owner_id),
            View::SearchResults { sections } => sections
                .iter()
                .flat_map(|s| &s.rows)
                .nth(selected)
                .map(|r| r.owner_id),
            View::OwnerDetail { .. } => None,
        }
    }

    /// Request that would re-load the active view. Search results have
    /// no re-loadable address once the query is gone.
    pub fn current_request(&self) -> Option<FetchRequest> {
        match &self.view {
            View::Summary { .. } => Some(FetchRequest::Summary),
            View::CategoryList { category, page, .. } => Some(FetchRequest::CategoryPage {
                category: *category,
                page: page.clone(),
            }),
            View::SearchResults { .. } => None,
            View::OwnerDetail { owner } => Some(FetchRequest::OwnerDetail { owner_id: owner.id }),
        }
    }

    /// Session-store address of the active view.
    pub fn saved_view(&self) -> SavedView {
        match &self.view {
            View::Summary { .. } => SavedView::Summary,
            View::CategoryList { category, page, .. } => SavedView::CategoryList {
                category: *category,
                page: page.clone(),
            },
            View::SearchResults { .. } => SavedView::SearchResults,
            View::OwnerDetail { owner } => SavedView::OwnerDetail { owner_id: owner.id },
        }
    }

    pub fn next(&mut self) {
        let count = self.row_count();
        if count == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let count = self.row_count();
        if count == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    count - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
    }

    pub fn tick_spinner(&mut self) {
        if self.last_tick.elapsed() >= Duration::from_millis(80) {
            self.spinner_tick = (self.spinner_tick + 1) % SPINNER_FRAMES.len();
            self.last_tick = Instant::now();
        }
        // Clear old status messages
        if let Some((_, time)) = &self.status_message {
            if time.elapsed() > Duration::from_secs(3) {
                self.status_message = None;
            }
        }
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_tick]
    }

    pub fn show_message(&mut self, msg: &str) {
        self.status_message = Some((msg.to_string(), Instant::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, ListRow, OwnerSummary, PageNav, SearchSection};

    fn row(owner_id: u64, label: &str) -> ListRow {
        ListRow {
            owner_id,
            label: label.to_string(),
        }
    }

    #[test]
    fn outcome_replaces_view_and_resets_selection() {
        let mut app = App::new();
        app.apply_outcome(FetchOutcome::PageLoaded {
            category: Category::Properties,
            page: "1".to_string(),
            rows: vec![row(3, "1 ELM ST"), row(4, "2 OAK AVE")],
            nav: PageNav::default(),
        });
        assert!(matches!(app.view(), View::CategoryList { .. }));
        assert_eq!(app.state.selected(), Some(0));

        // Switching views drops the previous region entirely.
        app.next();
        app.apply_outcome(FetchOutcome::SummaryLoaded(vec![OwnerSummary {
            id: 1,
            full_name: "SMITH JOHN".to_string(),
            property_count: 2,
        }]));
        assert!(matches!(app.view(), View::Summary { .. }));
        assert_eq!(app.state.selected(), Some(0));
    }

    #[test]
    fn failure_keeps_view_and_sets_status() {
        let mut app = App::new();
        app.apply_outcome(FetchOutcome::SummaryLoaded(vec![OwnerSummary {
            id: 1,
            full_name: "SMITH JOHN".to_string(),
            property_count: 2,
        }]));
        app.begin_fetch();
        app.apply_outcome(FetchOutcome::Failed("connection refused".to_string()));
        assert!(matches!(app.view(), View::Summary { .. }));
        assert!(!app.loading);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn selection_flattens_search_sections() {
        let mut app = App::new();
        app.apply_outcome(FetchOutcome::SearchLoaded(vec![
            SearchSection {
                category: Category::Owners,
                rows: vec![row(1, "SMITH JOHN")],
            },
            SearchSection {
                category: Category::Companies,
                rows: vec![row(2, "ACME LLC"), row(3, "ZENITH LLC")],
            },
        ]));
        assert_eq!(app.row_count(), 3);
        app.next();
        app.next();
        assert_eq!(app.selected_owner_id(), Some(3));
        app.next(); // wraps
        assert_eq!(app.selected_owner_id(), Some(1));
    }

    #[test]
    fn detail_view_has_no_selectable_rows() {
        let mut app = App::new();
        app.apply_outcome(FetchOutcome::DetailLoaded(crate::types::OwnerDetail {
            id: 42,
            full_name: "SMITH JOHN".to_string(),
            address: "PO BOX 1".to_string(),
            property_count: Some(1),
            llc_name: None,
            properties: vec!["1 ELM ST".to_string()],
        }));
        assert_eq!(app.row_count(), 0);
        assert_eq!(app.state.selected(), None);
        assert_eq!(app.selected_owner_id(), None);
        assert_eq!(
            app.current_request(),
            Some(FetchRequest::OwnerDetail { owner_id: 42 })
        );
    }
}
