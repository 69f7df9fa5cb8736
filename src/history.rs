use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use tracing::{info, warn};

use crate::model::QuizAttempt;
use crate::store::AttemptStore;

#[derive(Debug)]
pub enum HistoryCommand {
    Load,
    Save(QuizAttempt),
}

#[derive(Debug, Clone, PartialEq)]
pub enum HistoryEvent {
    Loaded(Vec<QuizAttempt>),
    Saved(Vec<QuizAttempt>),
    /// The attempt could not be stored. Carries the current history, which
    /// may be empty if it could not be read either.
    Failed {
        error: String,
        attempts: Vec<QuizAttempt>,
    },
}

/// Spawns the thread that owns the store. Store calls never run on the
/// thread driving the quiz; results come back on the returned receiver.
/// The worker drains every queued command and exits once the command
/// sender is dropped; join the handle to wait for pending saves.
pub fn spawn_worker(
    mut store: Box<dyn AttemptStore>,
) -> (
    mpsc::Sender<HistoryCommand>,
    mpsc::Receiver<HistoryEvent>,
    JoinHandle<()>,
) {
    let (cmd_tx, cmd_rx) = mpsc::channel::<HistoryCommand>();
    let (ev_tx, ev_rx) = mpsc::channel::<HistoryEvent>();

    let handle = thread::spawn(move || {
        for cmd in cmd_rx {
            let event = handle_command(store.as_mut(), cmd);
            // Nobody listening any more; keep going so queued saves land.
            let _ = ev_tx.send(event);
        }
    });

    (cmd_tx, ev_rx, handle)
}

pub fn handle_command(store: &mut dyn AttemptStore, cmd: HistoryCommand) -> HistoryEvent {
    match cmd {
        HistoryCommand::Load => HistoryEvent::Loaded(load_or_empty(store)),
        HistoryCommand::Save(attempt) => match store.save(&attempt) {
            Ok(()) => {
                info!(id = %attempt.id, score = attempt.score, "attempt recorded");
                HistoryEvent::Saved(load_or_empty(store))
            }
            Err(e) => {
                warn!(id = %attempt.id, error = %e, "attempt not saved");
                HistoryEvent::Failed {
                    error: e.to_string(),
                    attempts: load_or_empty(store),
                }
            }
        },
    }
}

fn load_or_empty(store: &dyn AttemptStore) -> Vec<QuizAttempt> {
    match store.list_all() {
        Ok(attempts) => attempts,
        Err(e) => {
            warn!(error = %e, "cannot read attempt history, showing none");
            Vec::new()
        }
    }
}

pub fn sort_most_recent_first(attempts: &mut [QuizAttempt]) {
    attempts.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Pairs each attempt with its display number. Expects most-recent-first
/// order, so the newest attempt gets the highest number.
pub fn numbered(attempts: &[QuizAttempt]) -> Vec<(usize, &QuizAttempt)> {
    let total = attempts.len();
    attempts
        .iter()
        .enumerate()
        .map(|(i, a)| (total - i, a))
        .collect()
}

pub fn print_history(attempts: &[QuizAttempt]) {
    let mut sorted = attempts.to_vec();
    sort_most_recent_first(&mut sorted);

    if sorted.is_empty() {
        println!("No attempts recorded yet.");
        return;
    }
    println!("Previous attempts: {}", sorted.len());
    for (n, attempt) in numbered(&sorted) {
        println!(
            "  Attempt #{:<3} {}  {}/{}  {}%",
            n,
            attempt.date.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M"),
            attempt.score,
            attempt.total_questions,
            attempt.percentage()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryAttemptStore;
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    fn attempt(id: &str, hour: u32) -> QuizAttempt {
        QuizAttempt {
            id: id.to_string(),
            date: Utc.with_ymd_and_hms(2026, 6, 1, hour, 0, 0).unwrap(),
            score: 1,
            total_questions: 3,
            time_per_question: 40.0,
        }
    }

    #[test]
    fn sorts_newest_first_and_counts_down() {
        let mut attempts = vec![attempt("a", 8), attempt("c", 12), attempt("b", 10)];
        sort_most_recent_first(&mut attempts);
        let ids: Vec<_> = attempts.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["c", "b", "a"]);

        let numbers: Vec<_> = numbered(&attempts).iter().map(|(n, _)| *n).collect();
        assert_eq!(numbers, [3, 2, 1]);
    }

    #[test]
    fn save_reports_updated_history() {
        let mut store = MemoryAttemptStore::new();
        assert_eq!(
            handle_command(&mut store, HistoryCommand::Load),
            HistoryEvent::Loaded(vec![])
        );
        assert_eq!(
            handle_command(&mut store, HistoryCommand::Save(attempt("a", 9))),
            HistoryEvent::Saved(vec![attempt("a", 9)])
        );
    }

    #[test]
    fn failures_degrade_to_empty_history() {
        let mut store = MemoryAttemptStore::disabled();
        assert_eq!(
            handle_command(&mut store, HistoryCommand::Load),
            HistoryEvent::Loaded(vec![])
        );
        match handle_command(&mut store, HistoryCommand::Save(attempt("a", 9))) {
            HistoryEvent::Failed { error, attempts } => {
                assert!(error.contains("disabled"));
                assert!(attempts.is_empty());
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn worker_round_trip() {
        let (tx, rx, handle) = spawn_worker(Box::new(MemoryAttemptStore::new()));
        tx.send(HistoryCommand::Load).unwrap();
        tx.send(HistoryCommand::Save(attempt("a", 9))).unwrap();

        let wait = Duration::from_secs(2);
        assert_eq!(rx.recv_timeout(wait).unwrap(), HistoryEvent::Loaded(vec![]));
        assert_eq!(
            rx.recv_timeout(wait).unwrap(),
            HistoryEvent::Saved(vec![attempt("a", 9)])
        );

        drop(tx);
        handle.join().unwrap();
        assert!(matches!(
            rx.recv_timeout(wait),
            Err(mpsc::RecvTimeoutError::Disconnected)
        ));
    }
}
