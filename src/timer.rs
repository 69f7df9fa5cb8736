use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::trace;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// One interval elapsed for the run identified by `session`.
    Tick { session: u64 },
}

/// Handle to a running countdown thread. Cancelled on drop.
#[derive(Debug)]
pub struct Countdown {
    session: u64,
    cancel: Arc<AtomicBool>,
}

impl Countdown {
    pub fn start(session: u64, interval: Duration, tx: mpsc::Sender<TimerEvent>) -> Self {
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = cancel.clone();

        thread::spawn(move || loop {
            thread::sleep(interval);
            if flag.load(Ordering::SeqCst) {
                break;
            }
            trace!(session, "tick");
            if tx.send(TimerEvent::Tick { session }).is_err() {
                break;
            }
        });

        Self { session, cancel }
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Keeps at most one countdown alive and feeds every one into the same
/// channel.
pub struct Clock {
    interval: Duration,
    tx: mpsc::Sender<TimerEvent>,
    active: Option<Countdown>,
}

impl Clock {
    pub fn new(interval: Duration) -> (Self, mpsc::Receiver<TimerEvent>) {
        let (tx, rx) = mpsc::channel();
        let clock = Self {
            interval,
            tx,
            active: None,
        };
        (clock, rx)
    }

    /// Starts a countdown for `session`, cancelling any previous one.
    pub fn start(&mut self, session: u64) {
        self.stop();
        self.active = Some(Countdown::start(session, self.interval, self.tx.clone()));
    }

    pub fn stop(&mut self) {
        if let Some(countdown) = self.active.take() {
            countdown.cancel();
        }
    }

    pub fn active_session(&self) -> Option<u64> {
        self.active.as_ref().map(Countdown::session)
    }
}

/// Formats seconds as `m:ss`.
pub fn format_time_left(total_secs: u32) -> String {
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{}:{:02}", minutes, seconds)
}
