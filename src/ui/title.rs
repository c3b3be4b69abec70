use crate::app::App;
use crate::types::View;
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

pub fn render_title(f: &mut Frame, app: &App, area: Rect) {
    let heading = match app.view() {
        View::Summary { owners } => {
            if owners.is_empty() {
                "Top Owners".to_string()
            } else {
                format!("Top {} Owners by Property Count", owners.len())
            }
        }
        View::CategoryList {
            category,
            page,
            rows,
            ..
        } => format!("{} | page {page} | {} records", category.label(), rows.len()),
        View::SearchResults { sections } => {
            let total: usize = sections.iter().map(|s| s.rows.len()).sum();
            format!("Search Results | {total} records")
        }
        View::OwnerDetail { owner } => format!("Owner #{} | {}", owner.id, owner.full_name),
    };

    let loading = if app.loading {
        format!(" {} loading...", app.spinner())
    } else {
        String::new()
    };

    let title_block = Paragraph::new(format!(" Parcelview | {heading}{loading} "))
        .style(Style::default().fg(Color::Cyan).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(title_block, area);
}
