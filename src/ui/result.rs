use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::model::percentage;

pub fn draw_complete(f: &mut Frame, area: Rect, state: &AppState) {
    let quiz = state.session.state();
    let answered = quiz.answers.len();
    let timed_out = quiz.time_left == 0 && answered < quiz.question_count();

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "🏆  Quiz Complete!",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if timed_out {
        lines.push(Line::from(Span::styled(
            "Time ran out.",
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        format!("{}/{}", quiz.score, answered),
        Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(format!(
        "Final Score: {}%",
        percentage(quiz.score as usize, answered)
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[r] Try Again",
        Style::default().fg(Color::Green),
    )));
    lines.push(Line::from(""));

    let block = Block::default().borders(Borders::ALL);
    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}
