mod detail;
mod help;
mod list;
mod results;
mod search;
mod summary;
mod title;

use crate::app::App;
use crate::types::{Mode, View};
use ratatui::prelude::*;

pub fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(area);

    // Title
    title::render_title(f, app, main_chunks[0]);

    // Exactly one region renders into the content area; the others do
    // not exist while this view is active.
    let content = main_chunks[1];
    if matches!(app.view(), View::Summary { .. }) {
        summary::render_summary(f, app, content);
    } else if matches!(app.view(), View::CategoryList { .. }) {
        list::render_category_list(f, app, content);
    } else if matches!(app.view(), View::SearchResults { .. }) {
        results::render_results(f, app, content);
    } else {
        detail::render_detail(f, app, content);
    }

    // Help bar or search input
    if app.mode == Mode::Search {
        search::render_search_input(f, app, main_chunks[2]);
    } else {
        help::render_help_bar(f, app, main_chunks[2]);
    }
}
