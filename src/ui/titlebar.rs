use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::timer::format_time_left;

/// Remaining seconds at which the timer turns red.
const LOW_TIME_SECS: u32 = 30;

pub fn draw_titlebar(f: &mut Frame, area: Rect, state: &AppState) {
    let view = state.session.view();

    let timer_text = if view.is_complete {
        " finished ".to_string()
    } else {
        format!(" {} remaining ", format_time_left(view.time_left))
    };
    let timer_span = if !view.is_complete && view.time_left <= LOW_TIME_SECS {
        Span::styled(
            timer_text.clone(),
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(timer_text.clone(), Style::default().fg(Color::Rgb(200, 200, 120)))
    };

    let title_text = format!("[ {} ]", state.bank().title);
    let title_span = Span::styled(
        title_text.clone(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    // Center the title, keep the timer flush right
    let available = area.width as usize;
    let title_len = title_text.chars().count();
    let timer_len = timer_text.chars().count();
    let center_pad = available.saturating_sub(title_len) / 2;
    let right_pad = available.saturating_sub(center_pad + title_len + timer_len);

    let line = Line::from(vec![
        Span::raw(" ".repeat(center_pad)),
        title_span,
        Span::raw(" ".repeat(right_pad)),
        timer_span,
    ]);

    let widget = Paragraph::new(line)
        .style(Style::default().bg(Color::DarkGray))
        .alignment(Alignment::Left);
    f.render_widget(widget, area);
}
