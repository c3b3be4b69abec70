use crate::app::App;
use crate::types::View;
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Cell, Row, Table},
};

pub fn render_summary(f: &mut Frame, app: &mut App, area: Rect) {
    let View::Summary { owners } = app.view() else {
        return;
    };

    let header_cells = ["Owner", "Properties"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow).bold()));
    let header = Row::new(header_cells).height(1).bottom_margin(1);

    let rows: Vec<Row> = owners
        .iter()
        .map(|o| {
            Row::new(vec![
                Cell::from(o.full_name.clone()),
                Cell::from(o.property_count.to_string()),
            ])
            .height(1)
        })
        .collect();

    let table = Table::new(rows, [Constraint::Min(30), Constraint::Length(12)])
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" Top Owners "),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    f.render_stateful_widget(table, area, &mut app.state);
}
