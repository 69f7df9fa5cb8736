use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;

pub fn draw_instructions(f: &mut Frame, area: Rect, state: &AppState) {
    let mut lines = vec![Line::from("")];

    for text in &state.bank().instructions {
        lines.push(Line::from(vec![
            Span::styled(" • ", Style::default().fg(Color::Cyan)),
            Span::raw(text.as_str()),
        ]));
        lines.push(Line::from(""));
    }

    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        " Instructions ",
        Style::default().add_modifier(Modifier::BOLD),
    ));
    let widget = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
