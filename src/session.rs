use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::model::{Answer, Question, QuestionBank, QuizAttempt};
use crate::state::{Event, QuizState, Step};

/// Snapshot handed to the presentation layer.
#[derive(Debug, Clone)]
pub struct QuizView<'a> {
    pub current_question: Option<&'a Question>,
    pub index: usize,
    pub total: usize,
    pub time_left: u32,
    pub is_complete: bool,
    pub score: u32,
}

/// One running quiz: the bank, its state, and the token that identifies
/// the current run so ticks from a superseded clock can be dropped.
#[derive(Debug)]
pub struct QuizSession {
    bank: Arc<QuestionBank>,
    state: QuizState,
    generation: u64,
}

impl QuizSession {
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        let state = QuizState::new(bank.total_time, bank.question_count());
        Self {
            bank,
            state,
            generation: 0,
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn view(&self) -> QuizView<'_> {
        QuizView {
            current_question: self.current_question(),
            index: self.state.current_index,
            total: self.bank.question_count(),
            time_left: self.state.time_left,
            is_complete: self.state.is_complete,
            score: self.state.score,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        if self.state.is_complete {
            return None;
        }
        self.bank.questions.get(self.state.current_index)
    }

    pub fn submit(&mut self, answer: Answer) -> Option<QuizAttempt> {
        self.apply_at(Event::SubmitAnswer(answer), Utc::now()).1
    }

    /// Applies a clock tick if it belongs to this run.
    pub fn tick(&mut self, generation: u64) -> Option<QuizAttempt> {
        if generation != self.generation {
            debug!(generation, current = self.generation, "dropping stale tick");
            return None;
        }
        self.apply_at(Event::Tick, Utc::now()).1
    }

    pub fn restart(&mut self) {
        self.apply_at(Event::Restart, Utc::now());
    }

    /// Applies `event`; returns the attempt to record when this event
    /// completed the run.
    pub fn apply_at(&mut self, event: Event, now: DateTime<Utc>) -> (Step, Option<QuizAttempt>) {
        let step = self.state.apply(&self.bank.questions, event);
        match step {
            Step::Completed => {
                let attempt = self.attempt_at(now);
                info!(
                    score = attempt.score,
                    total = attempt.total_questions,
                    answered = self.state.answers.len(),
                    time_left = self.state.time_left,
                    "quiz complete"
                );
                (step, Some(attempt))
            }
            Step::Restarted => {
                self.generation += 1;
                debug!(generation = self.generation, "quiz restarted");
                (step, None)
            }
            Step::Advanced | Step::Ignored => (step, None),
        }
    }

    fn attempt_at(&self, now: DateTime<Utc>) -> QuizAttempt {
        QuizAttempt {
            id: now.timestamp_millis().to_string(),
            date: now,
            score: self.state.score,
            total_questions: self.bank.question_count() as u32,
            time_per_question: self.bank.time_per_question(),
        }
    }
}
