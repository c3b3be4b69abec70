use crate::app::App;
use crate::types::{SearchSection, View};
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState},
};

pub fn render_results(f: &mut Frame, app: &App, area: Rect) {
    let View::SearchResults { sections } = app.view() else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Search Results ");

    if sections.is_empty() {
        let msg = Paragraph::new("No Results...")
            .style(Style::default().fg(Color::DarkGray))
            .centered()
            .block(block);
        f.render_widget(msg, area);
        return;
    }

    // One header row per category that returned records, followed by
    // its rows. Headers are not selectable, so the flat selection index
    // is remapped for display.
    let mut display_rows: Vec<Row> = Vec::new();
    for section in sections {
        display_rows.push(
            Row::new(vec![Cell::from(format!("{}:", section.category.label()))
                .style(Style::default().fg(Color::Yellow).bold())]),
        );
        for r in &section.rows {
            display_rows.push(Row::new(vec![Cell::from(format!("  {}", r.label))]));
        }
    }

    let selected = app.state.selected().map(|i| display_index(sections, i));

    let table = Table::new(display_rows, [Constraint::Min(20)])
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut display_state = TableState::default();
    display_state.select(selected);
    f.render_stateful_widget(table, area, &mut display_state);
}

/// Map a flat row index (headers excluded) to its display index
/// (headers included).
pub fn display_index(sections: &[SearchSection], flat: usize) -> usize {
    let mut remaining = flat;
    let mut display = 0;
    for section in sections {
        display += 1; // section header
        if remaining < section.rows.len() {
            return display + remaining;
        }
        remaining -= section.rows.len();
        display += section.rows.len();
    }
    display
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, ListRow};

    fn section(category: Category, labels: &[&str]) -> SearchSection {
        SearchSection {
            category,
            rows: labels
                .iter()
                .map(|l| ListRow {
                    owner_id: 1,
                    label: (*l).to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn flat_indexes_skip_section_headers() {
        let sections = vec![
            section(Category::Owners, &["SMITH JOHN"]),
            section(Category::Companies, &["ACME LLC", "ZENITH LLC"]),
        ];
        assert_eq!(display_index(&sections, 0), 1);
        assert_eq!(display_index(&sections, 1), 3);
        assert_eq!(display_index(&sections, 2), 4);
    }
}
