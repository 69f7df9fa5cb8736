use std::sync::Arc;

use crate::history::{sort_most_recent_first, HistoryEvent};
use crate::model::{Answer, QuestionBank, QuestionKind, QuizAttempt};
use crate::session::QuizSession;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Quiz,
    Complete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    ConfirmQuit,
    Help,
}

/// Everything the TUI renders from. The quiz itself lives in `session`;
/// the rest is presentation state.
#[derive(Debug)]
pub struct AppState {
    pub session: QuizSession,
    pub integer_input: String,
    /// Most recent first.
    pub history: Vec<QuizAttempt>,
    pub status: Option<String>,
    pub dialog_stack: Vec<Dialog>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        Self {
            session: QuizSession::new(bank),
            integer_input: String::new(),
            history: Vec::new(),
            status: None,
            dialog_stack: Vec::new(),
            should_quit: false,
        }
    }

    pub fn screen(&self) -> Screen {
        if self.session.state().is_complete {
            Screen::Complete
        } else {
            Screen::Quiz
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        self.session.bank()
    }

    /// Instructions sit beside the first question until it is answered.
    pub fn show_instructions(&self) -> bool {
        self.screen() == Screen::Quiz
            && self.session.state().current_index == 0
            && !self.bank().instructions.is_empty()
    }

    pub fn current_is_integer(&self) -> bool {
        self.session
            .current_question()
            .map_or(false, |q| q.kind == QuestionKind::Integer)
    }

    pub fn select_choice(&mut self, idx: usize) -> Option<QuizAttempt> {
        let options = match self.session.current_question().map(|q| &q.kind) {
            Some(QuestionKind::MultipleChoice(options)) => options.len(),
            _ => return None,
        };
        if idx >= options {
            return None;
        }
        self.session.submit(Answer::Choice(idx))
    }

    /// True once the typed value holds at least one digit.
    pub fn integer_input_ready(&self) -> bool {
        self.integer_input.chars().any(|c| c.is_ascii_digit())
    }

    /// Submits the typed value. Does nothing until it holds a digit.
    pub fn submit_integer(&mut self) -> Option<QuizAttempt> {
        if !self.current_is_integer() || !self.integer_input_ready() {
            return None;
        }
        let answer = Answer::Text(std::mem::take(&mut self.integer_input));
        self.session.submit(answer)
    }

    /// Accepts digits, and a minus sign in first position.
    pub fn push_input_char(&mut self, c: char) {
        if c.is_ascii_digit() || (c == '-' && self.integer_input.is_empty()) {
            self.integer_input.push(c);
        }
    }

    pub fn pop_input_char(&mut self) {
        self.integer_input.pop();
    }

    pub fn restart(&mut self) {
        self.session.restart();
        self.integer_input.clear();
        self.status = None;
    }

    pub fn apply_history(&mut self, event: HistoryEvent) {
        let attempts = match event {
            HistoryEvent::Loaded(attempts) => attempts,
            HistoryEvent::Saved(attempts) => {
                self.status = Some("Attempt saved.".to_string());
                attempts
            }
            HistoryEvent::Failed { error, attempts } => {
                self.status = Some(format!("Attempt not saved: {}", error));
                attempts
            }
        };
        self.history = attempts;
        sort_most_recent_first(&mut self.history);
    }

    pub fn has_dialog(&self) -> bool {
        !self.dialog_stack.is_empty()
    }

    pub fn top_dialog(&self) -> Option<&Dialog> {
        self.dialog_stack.last()
    }

    pub fn push_dialog(&mut self, dialog: Dialog) {
        self.dialog_stack.push(dialog);
    }

    pub fn pop_dialog(&mut self) -> Option<Dialog> {
        self.dialog_stack.pop()
    }
}
