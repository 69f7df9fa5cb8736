//! The quiz state machine.
//!
//! `QuizState` moves through `AwaitingAnswer(i)` for each question and ends in
//! `Complete`, either because every question was answered or because the
//! clock ran out. All mutation goes through [`QuizState::apply`].

use crate::model::{Answer, Question};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SubmitAnswer(Answer),
    Tick,
    Restart,
}

/// What an applied event did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Nothing changed: the event is not valid in the current state.
    Ignored,
    Advanced,
    /// The state just became complete. Reported once per session.
    Completed,
    Restarted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingAnswer(usize),
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizState {
    pub current_index: usize,
    pub answers: Vec<Answer>,
    pub score: u32,
    pub time_left: u32,
    pub is_complete: bool,
    total_time: u32,
    question_count: usize,
}

impl QuizState {
    pub fn new(total_time: u32, question_count: usize) -> Self {
        Self {
            current_index: 0,
            answers: Vec::new(),
            score: 0,
            time_left: total_time,
            is_complete: question_count == 0 || total_time == 0,
            total_time,
            question_count,
        }
    }

    pub fn total_time(&self) -> u32 {
        self.total_time
    }

    pub fn question_count(&self) -> usize {
        self.question_count
    }

    pub fn phase(&self) -> Phase {
        if self.is_complete {
            Phase::Complete
        } else {
            Phase::AwaitingAnswer(self.current_index)
        }
    }

    /// Pure form of [`QuizState::apply`].
    pub fn transition(mut self, questions: &[Question], event: Event) -> (Self, Step) {
        let step = self.apply(questions, event);
        (self, step)
    }

    pub fn apply(&mut self, questions: &[Question], event: Event) -> Step {
        match event {
            Event::SubmitAnswer(answer) => self.submit(questions, answer),
            Event::Tick => self.tick(),
            Event::Restart => {
                *self = Self::new(self.total_time, self.question_count);
                Step::Restarted
            }
        }
    }

    fn submit(&mut self, questions: &[Question], answer: Answer) -> Step {
        let Phase::AwaitingAnswer(idx) = self.phase() else {
            return Step::Ignored;
        };
        let Some(question) = questions.get(idx) else {
            return Step::Ignored;
        };

        if answer.matches(&question.correct) {
            self.score += 1;
        }
        self.answers.push(answer);
        self.current_index = idx + 1;

        if self.current_index >= self.question_count {
            self.is_complete = true;
            Step::Completed
        } else {
            Step::Advanced
        }
    }

    fn tick(&mut self) -> Step {
        if self.is_complete {
            return Step::Ignored;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.is_complete = true;
            Step::Completed
        } else {
            Step::Advanced
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CorrectAnswer, QuestionKind};

    fn questions() -> Vec<Question> {
        vec![
            Question {
                id: 1,
                prompt: "Pick b".to_string(),
                kind: QuestionKind::MultipleChoice(vec!["a".into(), "b".into(), "c".into()]),
                correct: CorrectAnswer::Option(1),
            },
            Question {
                id: 2,
                prompt: "6 * 7".to_string(),
                kind: QuestionKind::Integer,
                correct: CorrectAnswer::Value("42".to_string()),
            },
            Question {
                id: 3,
                prompt: "Pick a".to_string(),
                kind: QuestionKind::MultipleChoice(vec!["a".into(), "b".into()]),
                correct: CorrectAnswer::Option(0),
            },
        ]
    }

    fn fresh() -> QuizState {
        QuizState::new(120, 3)
    }

    #[test]
    fn initial_state_awaits_first_question() {
        let state = fresh();
        assert_eq!(state.phase(), Phase::AwaitingAnswer(0));
        assert_eq!(state.time_left, 120);
        assert!(state.answers.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn answers_track_accepted_submissions() {
        let qs = questions();
        let mut state = fresh();
        let inputs = [
            Answer::Choice(0),
            Answer::Text("1".into()),
            Answer::Choice(1),
            Answer::Choice(0),
            Answer::Choice(0),
        ];
        let mut accepted = 0;
        for answer in inputs {
            if state.apply(&qs, Event::SubmitAnswer(answer)) != Step::Ignored {
                accepted += 1;
            }
            assert_eq!(state.answers.len(), accepted);
            assert!(state.answers.len() <= qs.len());
        }
        assert_eq!(accepted, 3);
    }

    #[test]
    fn mixed_answers_score_two_of_three() {
        let qs = questions();
        let mut state = fresh();
        assert_eq!(state.apply(&qs, Event::SubmitAnswer(Answer::Choice(1))), Step::Advanced);
        assert_eq!(
            state.apply(&qs, Event::SubmitAnswer(Answer::Text("41".into()))),
            Step::Advanced
        );
        assert_eq!(state.apply(&qs, Event::SubmitAnswer(Answer::Choice(0))), Step::Completed);

        assert_eq!(state.score, 2);
        assert_eq!(state.answers.len(), 3);
        assert!(state.is_complete);
        assert_eq!(state.phase(), Phase::Complete);
    }

    #[test]
    fn integer_answer_compares_as_string() {
        let qs = questions();
        let mut state = fresh();
        state.apply(&qs, Event::SubmitAnswer(Answer::Choice(1)));
        state.apply(&qs, Event::SubmitAnswer(Answer::Choice(42)));
        assert_eq!(state.score, 2);
    }

    #[test]
    fn ticking_to_zero_completes_regardless_of_progress() {
        let qs = questions();
        let mut state = fresh();
        state.apply(&qs, Event::SubmitAnswer(Answer::Choice(1)));

        let mut completions = 0;
        for _ in 0..200 {
            if state.apply(&qs, Event::Tick) == Step::Completed {
                completions += 1;
            }
        }
        assert_eq!(state.time_left, 0);
        assert!(state.is_complete);
        assert_eq!(completions, 1);
        assert_eq!(state.answers.len(), 1);
    }

    #[test]
    fn submit_after_completion_is_ignored() {
        let qs = questions();
        let mut state = QuizState::new(1, 3);
        assert_eq!(state.apply(&qs, Event::Tick), Step::Completed);
        let before = state.clone();
        assert_eq!(
            state.apply(&qs, Event::SubmitAnswer(Answer::Choice(1))),
            Step::Ignored
        );
        assert_eq!(state, before);
    }

    #[test]
    fn last_answer_and_expiry_complete_once() {
        let qs = questions();
        let mut state = QuizState::new(3, 3);
        state.apply(&qs, Event::SubmitAnswer(Answer::Choice(1)));
        state.apply(&qs, Event::SubmitAnswer(Answer::Choice(42)));
        state.apply(&qs, Event::Tick);
        state.apply(&qs, Event::Tick);

        let steps = [
            state.apply(&qs, Event::SubmitAnswer(Answer::Choice(0))),
            state.apply(&qs, Event::Tick),
        ];
        assert_eq!(steps, [Step::Completed, Step::Ignored]);
    }

    #[test]
    fn restart_resets_everything() {
        let qs = questions();
        let mut state = fresh();
        state.apply(&qs, Event::SubmitAnswer(Answer::Choice(1)));
        state.apply(&qs, Event::Tick);
        state.apply(&qs, Event::Tick);

        let (state, step) = state.transition(&qs, Event::Restart);
        assert_eq!(step, Step::Restarted);
        assert_eq!(state, fresh());

        let mut done = QuizState::new(1, 3);
        done.apply(&qs, Event::Tick);
        done.apply(&qs, Event::Restart);
        assert_eq!(done, QuizState::new(1, 3));
    }
}
