use crate::api::{normalize_query, RecordsApi};
use crate::app::App;
use crate::fetch::{spawn_fetch, FetchRequest};
use crate::types::{Category, FetchOutcome, Mode, SessionStore, View};
use crossterm::event::KeyCode;
use std::sync::{mpsc, Arc};

/// Everything a key press can do. Keys map to actions in one table
/// (`action_for`); `dispatch` is the only place actions turn into
/// fetches or state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextRow,
    PrevRow,
    OpenSelectedOwner,
    GoHome,
    ListCategory(Category),
    PageNext,
    PagePrev,
    OpenSearch,
    Reload,
    SubmitSearch,
    CancelSearch,
    InputChar(char),
    InputBackspace,
}

/// The event-to-action table, keyed by input mode and key.
pub fn action_for(mode: Mode, key: KeyCode) -> Option<Action> {
    match mode {
        Mode::Browse => match key {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::NextRow),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::PrevRow),
            KeyCode::Enter => Some(Action::OpenSelectedOwner),
            KeyCode::Char('h') | KeyCode::Esc => Some(Action::GoHome),
            KeyCode::Char('o' | '1') => Some(Action::ListCategory(Category::Owners)),
            KeyCode::Char('p' | '2') => Some(Action::ListCategory(Category::Properties)),
            KeyCode::Char('c' | '3') => Some(Action::ListCategory(Category::Companies)),
            KeyCode::Right | KeyCode::Char('n') => Some(Action::PageNext),
            KeyCode::Left | KeyCode::Char('b') => Some(Action::PagePrev),
            KeyCode::Char('/') => Some(Action::OpenSearch),
            KeyCode::Char('R') => Some(Action::Reload),
            _ => None,
        },
        Mode::Search => match key {
            KeyCode::Esc => Some(Action::CancelSearch),
            KeyCode::Enter => Some(Action::SubmitSearch),
            KeyCode::Backspace => Some(Action::InputBackspace),
            KeyCode::Char(c) => Some(Action::InputChar(c)),
            _ => None,
        },
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum AfterAction {
    Continue,
    Quit,
}

/// Execute one action. Fetches go to a background thread and report on
/// `tx`; the session store is best-effort and never fatal.
pub fn dispatch(
    app: &mut App,
    action: Action,
    api: &Arc<dyn RecordsApi>,
    tx: &mpsc::Sender<FetchOutcome>,
    session: Option<&dyn SessionStore>,
) -> AfterAction {
    match action {
        Action::Quit => return AfterAction::Quit,
        Action::NextRow => app.next(),
        Action::PrevRow => app.previous(),
        Action::OpenSelectedOwner => {
            if let Some(owner_id) = app.selected_owner_id() {
                start(app, FetchRequest::OwnerDetail { owner_id }, api, tx);
            }
        }
        Action::GoHome => start(app, FetchRequest::Summary, api, tx),
        Action::ListCategory(category) => {
            start(
                app,
                FetchRequest::CategoryPage {
                    category,
                    page: "1".to_string(),
                },
                api,
                tx,
            );
        }
        Action::PageNext | Action::PagePrev => {
            if let Some(request) = page_request(app, action) {
                start(app, request, api, tx);
            }
        }
        Action::OpenSearch => {
            app.search_input.clear();
            app.mode = Mode::Search;
        }
        Action::Reload => {
            if let Some(request) = app.current_request() {
                start(app, request, api, tx);
            }
        }
        Action::SubmitSearch => {
            // The input is cleared at dispatch time, so it is empty
            // afterward whether the request succeeds or fails.
            let raw = std::mem::take(&mut app.search_input);
            app.mode = Mode::Browse;
            let query = normalize_query(&raw);
            if query.is_empty() {
                return AfterAction::Continue;
            }
            if let Some(store) = session {
                let _ = store.set_from_search();
            }
            start(app, FetchRequest::Search { query }, api, tx);
        }
        Action::CancelSearch => {
            app.search_input.clear();
            app.mode = Mode::Browse;
        }
        Action::InputChar(c) => app.search_input.push(c),
        Action::InputBackspace => {
            app.search_input.pop();
        }
    }
    AfterAction::Continue
}

/// Request for the adjacent page, if the active view is a category
/// list and the nav carries the matching token.
fn page_request(app: &App, action: Action) -> Option<FetchRequest> {
    let View::CategoryList { category, nav, .. } = app.view() else {
        return None;
    };
    let token = match action {
        Action::PageNext => nav.next_page.as_ref()?,
        Action::PagePrev => nav.prev_page.as_ref()?,
        _ => return None,
    };
    Some(FetchRequest::CategoryPage {
        category: *category,
        page: token.clone(),
    })
}

fn start(
    app: &mut App,
    request: FetchRequest,
    api: &Arc<dyn RecordsApi>,
    tx: &mpsc::Sender<FetchOutcome>,
) {
    app.begin_fetch();
    spawn_fetch(api.clone(), request, tx.clone());
}
