use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;

pub fn draw_statusbar(f: &mut Frame, area: Rect, state: &AppState) {
    let view = state.session.view();
    let answered = state.session.state().answers.len();

    let mut spans = vec![
        Span::raw(" "),
        Span::styled(
            format!("✓ {} answered", answered),
            Style::default().fg(Color::Green),
        ),
        Span::raw("   "),
        Span::styled(
            format!("○ {} left", view.total.saturating_sub(answered)),
            Style::default().fg(Color::White),
        ),
        Span::raw("   "),
        Span::styled(
            format!("{} attempts", state.history.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if let Some(status) = &state.status {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(status.clone(), Style::default().fg(Color::Yellow)));
    }

    let widget = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Rgb(30, 30, 30)));
    f.render_widget(widget, area);
}
