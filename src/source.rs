use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::BankError;
use crate::model::QuestionBank;
use crate::parser::parse_bank;

/// Bank used when no quiz path is given.
pub const DEFAULT_BANK: &str = include_str!("../quizzes/default.md");

pub fn load_bank(path: Option<&Path>) -> Result<QuestionBank, BankError> {
    let Some(path) = path else {
        debug!("using built-in question bank");
        return parse_bank(DEFAULT_BANK, "built-in");
    };

    let quiz_path = resolve_quiz_path(path)?;
    let content = std::fs::read_to_string(&quiz_path).map_err(|source| BankError::Read {
        path: quiz_path.clone(),
        source,
    })?;

    let name = quiz_path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    let bank = parse_bank(&content, &name)?;
    info!(
        source = %quiz_path.display(),
        questions = bank.question_count(),
        time_limit = bank.total_time,
        "loaded question bank"
    );
    Ok(bank)
}

pub fn resolve_quiz_path(path: &Path) -> Result<PathBuf, BankError> {
    if path.is_file() {
        Ok(path.to_path_buf())
    } else if path.is_dir() {
        find_quiz_file(path)
    } else {
        Err(BankError::NotFound(path.to_path_buf()))
    }
}

fn find_quiz_file(dir: &Path) -> Result<PathBuf, BankError> {
    let entries = std::fs::read_dir(dir).map_err(|source| BankError::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut md_files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().map_or(false, |e| e == "md"))
        .collect();

    match md_files.len() {
        0 => Err(BankError::NoQuizFile(dir.to_path_buf())),
        1 => Ok(md_files.remove(0)),
        _ => {
            md_files.sort();
            let names = md_files
                .iter()
                .map(|p| format!("  - {}", p.file_name().unwrap_or_default().to_string_lossy()))
                .collect();
            Err(BankError::MultipleQuizFiles(names))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn default_bank_parses() {
        let bank = load_bank(None).unwrap();
        assert!(!bank.questions.is_empty());
        assert!(!bank.instructions.is_empty());
        assert!(bank.total_time > 0);
    }

    #[test]
    fn directory_with_single_quiz_resolves() {
        let dir = tempdir().unwrap();
        let quiz = dir.path().join("quiz.md");
        fs::write(&quiz, "---\ntime_limit: 30\n---\n## 1. Q\n\n> integer: 3\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        assert_eq!(resolve_quiz_path(dir.path()).unwrap(), quiz);
        let bank = load_bank(Some(dir.path())).unwrap();
        assert_eq!(bank.source, "quiz.md");
    }

    #[test]
    fn directory_with_two_quizzes_is_ambiguous() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.md"), "").unwrap();
        fs::write(dir.path().join("b.md"), "").unwrap();
        assert!(matches!(
            resolve_quiz_path(dir.path()).unwrap_err(),
            BankError::MultipleQuizFiles(names) if names.len() == 2
        ));
    }

    #[test]
    fn missing_path_is_reported() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.md");
        assert!(matches!(
            load_bank(Some(&missing)).unwrap_err(),
            BankError::NotFound(_)
        ));
    }
}
