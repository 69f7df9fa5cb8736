use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct Frontmatter {
    pub title: Option<String>,
    /// Total time for the whole quiz, in seconds.
    pub time_limit: u32,
}

#[derive(Debug, Clone)]
pub struct QuestionBank {
    pub title: String,
    pub instructions: Vec<String>,
    pub questions: Vec<Question>,
    pub total_time: u32,
    pub source: String,
}

impl QuestionBank {
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Static time budget per question, not a measured duration.
    pub fn time_per_question(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        self.total_time as f64 / self.questions.len() as f64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub id: u32,
    pub prompt: String,
    pub kind: QuestionKind,
    pub correct: CorrectAnswer,
}

/// Options are picked with the keys `a` to `z`.
pub const MAX_OPTIONS: usize = 26;

#[derive(Debug, Clone, PartialEq)]
pub enum QuestionKind {
    MultipleChoice(Vec<String>),
    Integer,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CorrectAnswer {
    Option(usize),
    Value(String),
}

impl CorrectAnswer {
    pub fn normalized(&self) -> String {
        match self {
            CorrectAnswer::Option(idx) => idx.to_string(),
            CorrectAnswer::Value(v) => v.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Choice(usize),
    Text(String),
}

impl Answer {
    /// Against a value, both answer shapes compare as strings, so
    /// `Choice(42)` and `Text("42")` score the same against `"42"`.
    /// An option index is only ever matched by a `Choice`.
    pub fn normalized(&self) -> String {
        match self {
            Answer::Choice(idx) => idx.to_string(),
            Answer::Text(t) => t.trim().to_string(),
        }
    }

    pub fn matches(&self, correct: &CorrectAnswer) -> bool {
        match (self, correct) {
            (Answer::Choice(idx), CorrectAnswer::Option(expected)) => idx == expected,
            (Answer::Text(_), CorrectAnswer::Option(_)) => false,
            (_, CorrectAnswer::Value(_)) => self.normalized() == correct.normalized(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub id: String,
    pub date: DateTime<Utc>,
    pub score: u32,
    pub total_questions: u32,
    pub time_per_question: f64,
}

impl QuizAttempt {
    pub fn percentage(&self) -> u32 {
        percentage(self.score as usize, self.total_questions as usize)
    }
}

pub fn percentage(score: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((score as f64 / total as f64) * 100.0).round() as u32
}
