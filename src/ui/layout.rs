use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::app::AppState;

pub struct AppLayout {
    pub titlebar: Rect,
    pub instructions: Option<Rect>,
    pub main: Rect,
    pub history: Option<Rect>,
    pub statusbar: Rect,
    pub keybar: Rect,
}

/// Attempts shown before the panel stops growing.
const HISTORY_ROWS_SHOWN: usize = 5;

/// Rows given to the history panel: two per attempt plus borders, capped.
fn history_height(state: &AppState) -> u16 {
    if state.history.is_empty() {
        return 0;
    }
    state.history.len().min(HISTORY_ROWS_SHOWN) as u16 * 2 + 2
}

pub fn compute_layout(area: Rect, state: &AppState) -> AppLayout {
    let history_rows = history_height(state);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),            // titlebar
            Constraint::Min(8),               // main (+ instructions)
            Constraint::Length(history_rows), // previous attempts
            Constraint::Length(1),            // statusbar
            Constraint::Length(1),            // keybar
        ])
        .split(area);

    let (instructions, main) = if state.show_instructions() {
        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(33), Constraint::Percentage(67)])
            .split(vertical[1]);
        (Some(middle[0]), middle[1])
    } else {
        (None, vertical[1])
    };

    AppLayout {
        titlebar: vertical[0],
        instructions,
        main,
        history: (history_rows > 0).then_some(vertical[2]),
        statusbar: vertical[3],
        keybar: vertical[4],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuizAttempt;
    use crate::parser::parse_bank;
    use chrono::Utc;
    use std::sync::Arc;

    const BANK: &str = "---\ntime_limit: 60\n---\n## 1. Type 1\n\n> integer: 1\n";

    fn with_history(n: usize) -> AppState {
        let mut state = AppState::new(Arc::new(parse_bank(BANK, "t.md").unwrap()));
        let attempt = QuizAttempt {
            id: "1".to_string(),
            date: Utc::now(),
            score: 1,
            total_questions: 1,
            time_per_question: 60.0,
        };
        state.history = vec![attempt; n];
        state
    }

    #[test]
    fn history_panel_grows_then_caps() {
        assert_eq!(history_height(&with_history(0)), 0);
        assert_eq!(history_height(&with_history(2)), 6);
        assert_eq!(history_height(&with_history(5)), 12);
        assert_eq!(history_height(&with_history(40_000)), 12);
    }

    #[test]
    fn long_history_still_leaves_room_for_the_quiz() {
        let state = with_history(40_000);
        let layout = compute_layout(Rect::new(0, 0, 80, 24), &state);
        assert_eq!(layout.history.map(|r| r.height), Some(12));
        assert!(layout.main.height >= 8);
    }
}
