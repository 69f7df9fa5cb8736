use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;
use crate::model::{QuestionKind, MAX_OPTIONS};
use crate::timer::format_time_left;

pub fn draw_question(f: &mut Frame, area: Rect, state: &AppState) {
    let view = state.session.view();
    let Some(question) = view.current_question else {
        return;
    };

    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // time gauge
            Constraint::Length(1), // time remaining
            Constraint::Length(1), // spacer
            Constraint::Min(3),    // question
        ])
        .split(inner);

    let total = state.session.state().total_time().max(1);
    let ratio = (view.time_left as f64 / total as f64).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Blue).bg(Color::Rgb(40, 40, 40)))
        .ratio(ratio)
        .label("");
    f.render_widget(gauge, rows[0]);

    let remaining = Paragraph::new(Line::from(vec![
        Span::raw(" Time Remaining: "),
        Span::styled(
            format_time_left(view.time_left),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]));
    f.render_widget(remaining, rows[1]);

    let mut lines = vec![
        Line::from(Span::styled(
            format!(" Question {} of {}", view.index + 1, view.total),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for text in question.prompt.lines() {
        lines.push(Line::from(format!(" {}", text)));
    }
    lines.push(Line::from(""));

    match &question.kind {
        QuestionKind::MultipleChoice(options) => {
            // The parser caps options at MAX_OPTIONS, so every index has a letter.
            for (i, option) in options.iter().take(MAX_OPTIONS).enumerate() {
                let label = char::from(b'A' + i as u8);
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {}. ", label),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(option.as_str()),
                ]));
                lines.push(Line::from(""));
            }
        }
        QuestionKind::Integer => {
            let (text, style) = if state.integer_input.is_empty() {
                ("Enter your answer".to_string(), Style::default().fg(Color::DarkGray))
            } else {
                (state.integer_input.clone(), Style::default().fg(Color::White))
            };
            lines.push(Line::from(vec![
                Span::raw("  > "),
                Span::styled(text, style),
                Span::styled("█", Style::default().fg(Color::Gray)),
            ]));
            lines.push(Line::from(""));
            let submit_style = if state.integer_input_ready() {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            lines.push(Line::from(Span::styled("  [Enter] Submit Answer", submit_style)));
        }
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(widget, rows[3]);
}
