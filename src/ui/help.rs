use crate::app::App;
use crate::types::Mode;
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

pub fn render_help_bar(f: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.mode {
        Mode::Browse => {
            if let Some((msg, _)) = &app.status_message {
                msg.as_str()
            } else {
                "j/k: Nav | Enter: Owner | o/p/c: Owners/Properties/Companies | b/n: Page | /: Search | h: Home | R: Reload | q: Quit"
            }
        }
        Mode::Search => "Type query | Enter: Search | Esc: Cancel",
    };

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(help, area);
}
