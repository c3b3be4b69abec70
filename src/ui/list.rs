use crate::app::App;
use crate::types::{PageNav, View};
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
};

pub fn render_category_list(f: &mut Frame, app: &mut App, area: Rect) {
    let View::CategoryList {
        category,
        page,
        rows,
        nav,
    } = app.view()
    else {
        return;
    };

    let title = format!(" {} (page {page}) ", category.label());
    let nav_line = nav_controls(nav).join("   ");

    let items: Vec<Row> = rows
        .iter()
        .map(|r| Row::new(vec![Cell::from(r.label.clone())]).height(1))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let table = Table::new(items, [Constraint::Min(20)])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(title),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    f.render_stateful_widget(table, chunks[0], &mut app.state);

    let nav_bar = Paragraph::new(nav_line)
        .style(Style::default().fg(Color::Yellow))
        .centered();
    f.render_widget(nav_bar, chunks[1]);
}

/// Pagination controls to display: one per token present in the nav.
pub fn nav_controls(nav: &PageNav) -> Vec<&'static str> {
    let mut controls = Vec::new();
    if nav.prev_page.is_some() {
        controls.push("< prev (b)");
    }
    if nav.next_page.is_some() {
        controls.push("(n) next >");
    }
    controls
}
