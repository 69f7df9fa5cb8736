use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::error::BankError;
use crate::model::*;

pub fn parse_bank(content: &str, source: &str) -> Result<QuestionBank, BankError> {
    let (frontmatter, body) = split_frontmatter(content)?;
    let fm: Frontmatter = serde_yaml::from_str(&frontmatter)?;

    if fm.time_limit == 0 {
        return Err(BankError::ZeroTimeLimit);
    }

    let (heading, instructions, questions) = parse_body(&body)?;
    if questions.is_empty() {
        return Err(BankError::Empty);
    }

    let title = match fm.title {
        Some(t) => t,
        None if !heading.is_empty() => heading,
        None => "Quiz".to_string(),
    };

    Ok(QuestionBank {
        title,
        instructions,
        questions,
        total_time: fm.time_limit,
        source: source.to_string(),
    })
}

fn split_frontmatter(content: &str) -> Result<(String, String), BankError> {
    let trimmed = content.trim_start();
    if !trimmed.starts_with("---") {
        return Err(BankError::MissingFrontmatter);
    }

    let after_first = &trimmed[3..];
    let end_pos = after_first
        .find("\n---")
        .ok_or(BankError::UnclosedFrontmatter)?;

    let fm = after_first[..end_pos].trim().to_string();
    let body = after_first[end_pos + 4..].to_string();

    Ok((fm, body))
}

/// Options collected for the question currently being parsed.
#[derive(Default)]
struct PendingQuestion {
    heading: String,
    body: Vec<String>,
    options: Vec<(String, bool)>,
    integer: Option<String>,
}

fn parse_body(body: &str) -> Result<(String, Vec<String>, Vec<Question>), BankError> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TASKLISTS);

    let mut title = String::new();
    let mut instructions: Vec<String> = Vec::new();
    let mut questions: Vec<Question> = Vec::new();

    let mut pending: Option<PendingQuestion> = None;

    let mut in_h1 = false;
    let mut in_h2 = false;
    let mut in_blockquote = false;
    let mut blockquote_text = String::new();
    let mut in_list_item = false;
    let mut list_item_text = String::new();
    let mut task_list_checked: Option<bool> = None;
    let mut in_paragraph = false;
    let mut paragraph_text = String::new();

    for event in Parser::new_ext(body, opts) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => match level {
                HeadingLevel::H1 => in_h1 = true,
                HeadingLevel::H2 => {
                    if let Some(done) = pending.take() {
                        questions.push(finalize_question(done)?);
                    }
                    pending = Some(PendingQuestion::default());
                    in_h2 = true;
                }
                _ => {}
            },
            Event::End(TagEnd::Heading(level)) => match level {
                HeadingLevel::H1 => in_h1 = false,
                HeadingLevel::H2 => in_h2 = false,
                _ => {}
            },
            Event::Start(Tag::BlockQuote(_)) => {
                in_blockquote = true;
                blockquote_text = String::new();
            }
            Event::End(TagEnd::BlockQuote(_)) => {
                in_blockquote = false;
                if let Some(q) = pending.as_mut() {
                    if let Some(value) = blockquote_text.trim().strip_prefix("integer:") {
                        q.integer = Some(value.trim().to_string());
                    }
                }
            }
            Event::Start(Tag::Item) => {
                in_list_item = true;
                list_item_text = String::new();
                task_list_checked = None;
            }
            Event::End(TagEnd::Item) => {
                in_list_item = false;
                let text = list_item_text.trim().to_string();
                match (pending.as_mut(), task_list_checked.take()) {
                    (Some(q), Some(checked)) => q.options.push((text, checked)),
                    (Some(q), None) if !text.is_empty() => q.body.push(text),
                    (None, _) if !text.is_empty() => instructions.push(text),
                    _ => {}
                }
            }
            Event::TaskListMarker(checked) => {
                task_list_checked = Some(checked);
            }
            Event::Start(Tag::Paragraph) => {
                in_paragraph = true;
                paragraph_text = String::new();
            }
            Event::End(TagEnd::Paragraph) => {
                in_paragraph = false;
                let text = paragraph_text.trim().to_string();
                if !text.is_empty() && !in_blockquote && !in_list_item {
                    match pending.as_mut() {
                        Some(q) => q.body.push(text),
                        None => instructions.push(text),
                    }
                }
            }
            Event::Text(text) => {
                if in_h1 {
                    title.push_str(&text);
                } else if in_h2 {
                    if let Some(q) = pending.as_mut() {
                        q.heading.push_str(&text);
                    }
                } else if in_blockquote {
                    blockquote_text.push_str(&text);
                } else if in_list_item {
                    list_item_text.push_str(&text);
                } else if in_paragraph {
                    paragraph_text.push_str(&text);
                }
            }
            Event::Code(code) => {
                let c = format!("`{}`", code);
                if in_h2 {
                    if let Some(q) = pending.as_mut() {
                        q.heading.push_str(&c);
                    }
                } else if in_list_item {
                    list_item_text.push_str(&c);
                } else if in_paragraph {
                    paragraph_text.push_str(&c);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if in_blockquote {
                    blockquote_text.push(' ');
                } else if in_list_item {
                    list_item_text.push(' ');
                } else if in_paragraph {
                    paragraph_text.push(' ');
                }
            }
            _ => {}
        }
    }

    if let Some(done) = pending.take() {
        questions.push(finalize_question(done)?);
    }

    Ok((title.trim().to_string(), instructions, questions))
}

fn finalize_question(pending: PendingQuestion) -> Result<Question, BankError> {
    let (id, heading) = parse_h2_title(&pending.heading)?;

    let mut prompt = heading;
    for extra in &pending.body {
        prompt.push('\n');
        prompt.push_str(extra);
    }

    if !pending.options.is_empty() {
        if pending.options.len() > MAX_OPTIONS {
            return Err(BankError::TooManyOptions(id, pending.options.len()));
        }
        let marked: Vec<usize> = pending
            .options
            .iter()
            .enumerate()
            .filter(|(_, (_, checked))| *checked)
            .map(|(i, _)| i)
            .collect();
        if marked.len() != 1 {
            return Err(BankError::CorrectOptionCount(id, marked.len()));
        }
        let options = pending.options.into_iter().map(|(text, _)| text).collect();
        return Ok(Question {
            id,
            prompt,
            kind: QuestionKind::MultipleChoice(options),
            correct: CorrectAnswer::Option(marked[0]),
        });
    }

    match pending.integer {
        Some(value) if !value.is_empty() => Ok(Question {
            id,
            prompt,
            kind: QuestionKind::Integer,
            correct: CorrectAnswer::Value(value),
        }),
        _ => Err(BankError::MissingAnswer(id)),
    }
}

fn parse_h2_title(text: &str) -> Result<(u32, String), BankError> {
    let trimmed = text.trim();
    // Expected format: "1. Prompt text"
    let (num_str, prompt) = trimmed
        .split_once('.')
        .ok_or_else(|| BankError::BadHeading(trimmed.to_string()))?;
    let number: u32 = num_str
        .trim()
        .parse()
        .map_err(|_| BankError::BadHeading(trimmed.to_string()))?;
    Ok((number, prompt.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "---\ntime_limit: 60\n---\n\n# Tiny\n\n## 1. Pick one\n\n- [ ] no\n- [x] yes\n\n## 2. How many?\n\n> integer: 7\n";

    #[test]
    fn parses_both_question_kinds() {
        let bank = parse_bank(SMALL, "tiny.md").unwrap();
        assert_eq!(bank.title, "Tiny");
        assert_eq!(bank.total_time, 60);
        assert_eq!(bank.questions.len(), 2);
        assert_eq!(
            bank.questions[0].kind,
            QuestionKind::MultipleChoice(vec!["no".to_string(), "yes".to_string()])
        );
        assert_eq!(bank.questions[0].correct, CorrectAnswer::Option(1));
        assert_eq!(bank.questions[1].kind, QuestionKind::Integer);
        assert_eq!(bank.questions[1].correct, CorrectAnswer::Value("7".to_string()));
    }

    #[test]
    fn rejects_missing_frontmatter() {
        let err = parse_bank("# No frontmatter\n", "x.md").unwrap_err();
        assert!(matches!(err, BankError::MissingFrontmatter));
    }

    #[test]
    fn rejects_two_correct_options() {
        let content = "---\ntime_limit: 10\n---\n## 1. Q\n\n- [x] a\n- [x] b\n";
        let err = parse_bank(content, "x.md").unwrap_err();
        assert!(matches!(err, BankError::CorrectOptionCount(1, 2)));
    }

    #[test]
    fn rejects_more_options_than_letter_keys() {
        let mut content = "---\ntime_limit: 10\n---\n## 1. Q\n\n".to_string();
        for i in 0..27 {
            let mark = if i == 26 { "x" } else { " " };
            content.push_str(&format!("- [{}] option {}\n", mark, i));
        }
        let err = parse_bank(&content, "x.md").unwrap_err();
        assert!(matches!(err, BankError::TooManyOptions(1, 27)));
    }

    #[test]
    fn accepts_a_full_alphabet_of_options() {
        let mut content = "---\ntime_limit: 10\n---\n## 1. Q\n\n".to_string();
        for i in 0..26 {
            let mark = if i == 25 { "x" } else { " " };
            content.push_str(&format!("- [{}] option {}\n", mark, i));
        }
        let bank = parse_bank(&content, "x.md").unwrap();
        assert_eq!(bank.questions[0].correct, CorrectAnswer::Option(25));
    }

    #[test]
    fn rejects_question_without_answer() {
        let content = "---\ntime_limit: 10\n---\n## 3. Q\n\nJust text.\n";
        let err = parse_bank(content, "x.md").unwrap_err();
        assert!(matches!(err, BankError::MissingAnswer(3)));
    }

    #[test]
    fn rejects_zero_time_limit() {
        let content = "---\ntime_limit: 0\n---\n## 1. Q\n\n> integer: 1\n";
        assert!(matches!(
            parse_bank(content, "x.md").unwrap_err(),
            BankError::ZeroTimeLimit
        ));
    }

    #[test]
    fn rejects_bad_heading() {
        let content = "---\ntime_limit: 10\n---\n## Question one\n\n> integer: 1\n";
        assert!(matches!(
            parse_bank(content, "x.md").unwrap_err(),
            BankError::BadHeading(_)
        ));
    }
}
