use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, Dialog, Screen};

pub fn draw_dialog(f: &mut Frame, area: Rect, state: &AppState) {
    let Some(dialog) = state.top_dialog() else {
        return;
    };

    match dialog {
        Dialog::ConfirmQuit => draw_confirm_quit(f, area, state),
        Dialog::Help => draw_help(f, area),
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn draw_confirm_quit(f: &mut Frame, area: Rect, state: &AppState) {
    let note = if state.screen() == Screen::Quiz {
        "   This attempt will not be recorded."
    } else {
        "   Your attempts are saved."
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Quit?",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(note),
        Line::from(""),
        Line::from(vec![
            Span::styled("   [Enter] Confirm", Style::default().fg(Color::Green)),
            Span::raw("    "),
            Span::styled("[Esc] Cancel", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
    ];

    let rect = centered_rect(44, lines.len() as u16 + 2, area);
    f.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let widget = Paragraph::new(lines).block(block);
    f.render_widget(widget, rect);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Key Bindings",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("   a-z        Pick an option"),
        Line::from("   0-9, -     Type a number"),
        Line::from("   Backspace  Delete last digit"),
        Line::from("   Enter      Submit number"),
        Line::from("   Ctrl+R     Restart the quiz"),
        Line::from("   r          Try again (when finished)"),
        Line::from("   Ctrl+Q     Quit"),
        Line::from("   ?          This help"),
        Line::from("   Esc        Close dialog"),
        Line::from(""),
        Line::from(Span::styled(
            "        [Esc] Close",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    let rect = centered_rect(46, lines.len() as u16 + 2, area);
    f.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .border_style(Style::default().fg(Color::Cyan));
    let widget = Paragraph::new(lines).block(block);
    f.render_widget(widget, rect);
}
