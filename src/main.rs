mod api;
mod app;
mod cli;
mod fetch;
mod handlers;
mod session;
mod types;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::{
    io,
    sync::{mpsc, Arc},
    time::Duration,
};

use api::{normalize_query, HttpApi, RecordsApi};
use app::App;
use cli::Args;
use fetch::{spawn_fetch, FetchRequest};
use handlers::{action_for, dispatch, AfterAction};
use session::SqliteStore;
use types::{FetchOutcome, SavedView, SessionStore};

fn main() -> Result<()> {
    let args = Args::parse();
    let api: Arc<dyn RecordsApi> = Arc::new(HttpApi::new(&args.api_url));

    let session = match SqliteStore::open() {
        Ok(store) => Some(store),
        Err(e) => {
            eprintln!("Warning: session store unavailable: {e}");
            None
        }
    };

    let initial = initial_request(&args, session.as_ref());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let res = run_app(&mut terminal, &mut app, &api, session.as_ref(), initial);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// Decide what to load first: explicit CLI targets beat the saved
/// session, and the came-from-search flag forces the summary rather
/// than restoring a stale search display.
fn initial_request(args: &Args, session: Option<&SqliteStore>) -> FetchRequest {
    if let Some(owner_id) = args.owner {
        return FetchRequest::OwnerDetail { owner_id };
    }
    if let Some(raw) = &args.query {
        let query = normalize_query(raw);
        if !query.is_empty() {
            if let Some(store) = session {
                let _ = store.set_from_search();
            }
            return FetchRequest::Search { query };
        }
    }

    let Some(store) = session else {
        return FetchRequest::Summary;
    };
    let from_search = store.take_from_search().unwrap_or(false);
    if args.fresh || from_search {
        return FetchRequest::Summary;
    }

    match store.load_last_view().unwrap_or(None) {
        Some(SavedView::CategoryList { category, page }) => {
            FetchRequest::CategoryPage { category, page }
        }
        Some(SavedView::OwnerDetail { owner_id }) => FetchRequest::OwnerDetail { owner_id },
        // Search results have no restorable address; everything else
        // lands on the summary.
        Some(SavedView::Summary | SavedView::SearchResults) | None => FetchRequest::Summary,
    }
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    api: &Arc<dyn RecordsApi>,
    session: Option<&SqliteStore>,
    initial: FetchRequest,
) -> Result<()> {
    let (tx, rx) = mpsc::channel::<FetchOutcome>();

    app.begin_fetch();
    spawn_fetch(api.clone(), initial, tx.clone());

    loop {
        app.tick_spinner();

        // Fold in completed fetches. No ordering guarantee: the last
        // outcome to arrive wins the view.
        while let Ok(outcome) = rx.try_recv() {
            let failed = matches!(outcome, FetchOutcome::Failed(_));
            app.apply_outcome(outcome);
            if !failed {
                if let Some(store) = session {
                    let _ = store.save_last_view(&app.saved_view());
                }
            }
        }

        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if let Some(action) = action_for(app.mode, key.code) {
                    let session_dyn = session.map(|s| s as &dyn SessionStore);
                    if dispatch(app, action, api, &tx, session_dyn) == AfterAction::Quit {
                        return Ok(());
                    }
                }
            }
        }
    }
}
