use std::path::PathBuf;

use thiserror::Error;

/// Problems with a question bank file.
#[derive(Error, Debug)]
pub enum BankError {
    #[error("Quiz file must start with YAML frontmatter (---)")]
    MissingFrontmatter,

    #[error("No closing --- for frontmatter")]
    UnclosedFrontmatter,

    #[error("Invalid frontmatter: {0}")]
    Frontmatter(#[from] serde_yaml::Error),

    #[error("Question heading must be in format '## N. Prompt', got: {0}")]
    BadHeading(String),

    #[error("Question {0} must mark exactly one option as correct, found {1}")]
    CorrectOptionCount(u32, usize),

    #[error("Question {0} has {1} options; at most 26 (A-Z) are supported")]
    TooManyOptions(u32, usize),

    #[error("Question {0} has neither options nor an `integer:` answer")]
    MissingAnswer(u32),

    #[error("time_limit must be greater than zero")]
    ZeroTimeLimit,

    #[error("Quiz has no questions")]
    Empty,

    #[error("Path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("No .md quiz files found in {}", .0.display())]
    NoQuizFile(PathBuf),

    #[error("Multiple .md files found. Specify which one:\n{}", .0.join("\n"))]
    MultipleQuizFiles(Vec<String>),

    #[error("Cannot read quiz file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Failures of the attempt store. None of these are fatal to a quiz session.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Attempt storage unavailable: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot encode attempts: {0}")]
    Encode(#[from] serde_yaml::Error),

    #[error("Attempt history at {} is corrupt (use --clear to reset)", .0.display())]
    Corrupt(PathBuf),

    #[error("Attempt storage disabled")]
    Disabled,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Bank(#[from] BankError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Cannot set up logging: {0}")]
    Logging(String),
}
