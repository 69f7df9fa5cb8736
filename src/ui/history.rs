use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::history::numbered;

pub fn draw_history(f: &mut Frame, area: Rect, state: &AppState) {
    let width = area.width.saturating_sub(2) as usize;
    let mut lines: Vec<Line> = Vec::new();

    for (n, attempt) in numbered(&state.history) {
        let label = format!(" Attempt #{}", n);
        let score = format!("{}/{} ", attempt.score, attempt.total_questions);
        let date = format!(
            " {}",
            attempt.date.with_timezone(&chrono::Local).format("%Y-%m-%d")
        );
        let pct = format!("{}% ", attempt.percentage());

        let pad = width.saturating_sub(label.chars().count() + score.chars().count());
        lines.push(Line::from(vec![
            Span::styled(label, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" ".repeat(pad)),
            Span::styled(score, Style::default().add_modifier(Modifier::BOLD)),
        ]));

        let pad = width.saturating_sub(date.chars().count() + pct.chars().count());
        lines.push(Line::from(vec![
            Span::styled(date, Style::default().fg(Color::DarkGray)),
            Span::raw(" ".repeat(pad)),
            Span::styled(pct, Style::default().fg(Color::DarkGray)),
        ]));
    }

    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        " Previous Attempts ",
        Style::default().add_modifier(Modifier::BOLD),
    ));
    f.render_widget(Paragraph::new(lines).block(block), area);
}
