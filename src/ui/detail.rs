use crate::app::App;
use crate::types::{OwnerDetail, View};
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

pub fn render_detail(f: &mut Frame, app: &App, area: Rect) {
    let View::OwnerDetail { owner } = app.view() else {
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    for (label, value) in detail_fields(owner) {
        lines.push(Line::from(vec![
            Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
            Span::styled(value, Style::default().fg(Color::White)),
        ]));
        lines.push(Line::from(""));
    }

    if !owner.properties.is_empty() {
        lines.push(Line::from(Span::styled(
            "Properties:",
            Style::default().fg(Color::Yellow).bold(),
        )));
        for address in &owner.properties {
            lines.push(Line::from(Span::styled(
                format!("  {address}"),
                Style::default().fg(Color::White),
            )));
        }
    }

    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(format!(" Owner #{} ", owner.id)),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(panel, area);
}

/// Label/value pairs for the detail panel. The company line exists only
/// when the owner has one.
pub fn detail_fields(owner: &OwnerDetail) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("Name", owner.full_name.clone()),
        ("Address", owner.address.clone()),
    ];
    if let Some(count) = owner.property_count {
        fields.push(("Property Count", count.to_string()));
    }
    if let Some(llc) = &owner.llc_name {
        fields.push(("Company", llc.clone()));
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner(llc_name: Option<&str>) -> OwnerDetail {
        OwnerDetail {
            id: 42,
            full_name: "SMITH JOHN".to_string(),
            address: "PO BOX 1".to_string(),
            property_count: Some(3),
            llc_name: llc_name.map(ToString::to_string),
            properties: vec!["1 ELM ST".to_string()],
        }
    }

    #[test]
    fn company_line_only_when_present() {
        let fields = detail_fields(&owner(None));
        assert!(!fields.iter().any(|(label, _)| *label == "Company"));

        let fields = detail_fields(&owner(Some("SMITH HOLDINGS LLC")));
        assert!(fields
            .iter()
            .any(|(label, value)| *label == "Company" && value == "SMITH HOLDINGS LLC"));
    }
}
