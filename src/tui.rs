use std::io;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::CrosstermBackend;
use ratatui::Terminal;
use tracing::{debug, info, warn};

use crate::app::{AppState, Dialog, Screen};
use crate::error::Error;
use crate::history::{HistoryCommand, HistoryEvent};
use crate::model::QuizAttempt;
use crate::timer::{Clock, TimerEvent};

/// Channels and the clock the loop drives besides the app state.
pub struct Runtime {
    pub clock: Clock,
    pub timer_rx: mpsc::Receiver<TimerEvent>,
    pub history_tx: mpsc::Sender<HistoryCommand>,
    pub history_rx: mpsc::Receiver<HistoryEvent>,
    pub history_worker: JoinHandle<()>,
}

impl Runtime {
    fn record(&mut self, attempt: QuizAttempt) {
        self.clock.stop();
        if self.history_tx.send(HistoryCommand::Save(attempt)).is_err() {
            warn!("history worker gone, attempt dropped");
        }
    }

    /// Stops the clock and waits for the history worker to finish every
    /// queued save.
    fn shutdown(self) {
        let Runtime {
            mut clock,
            history_tx,
            history_rx,
            history_worker,
            ..
        } = self;
        clock.stop();
        drop(history_tx);
        if history_worker.join().is_err() {
            warn!("history worker panicked");
        }
        drop(history_rx);
    }
}

pub fn run_tui(mut state: AppState, mut rt: Runtime) -> Result<(), Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    rt.clock.start(state.session.generation());
    let _ = rt.history_tx.send(HistoryCommand::Load);

    let result = main_loop(&mut terminal, &mut state, &mut rt);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    rt.shutdown();

    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    rt: &mut Runtime,
) -> Result<(), Error> {
    loop {
        terminal.draw(|f| crate::ui::draw(f, state))?;

        if state.should_quit {
            info!("quit requested");
            break;
        }

        // Poll for input events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(key, state, rt);
                }
            }
        }

        // Handle timer events
        while let Ok(TimerEvent::Tick { session }) = rt.timer_rx.try_recv() {
            if let Some(attempt) = state.session.tick(session) {
                rt.record(attempt);
            }
        }

        // Handle history events
        while let Ok(ev) = rt.history_rx.try_recv() {
            debug!(?ev, "history update");
            state.apply_history(ev);
        }
    }

    Ok(())
}

pub fn handle_key(key: KeyEvent, state: &mut AppState, rt: &mut Runtime) {
    // Handle dialog keys first
    if state.has_dialog() {
        handle_dialog_key(key, state);
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('c') => {
                state.push_dialog(Dialog::ConfirmQuit);
            }
            KeyCode::Char('r') => restart(state, rt),
            _ => {}
        }
        return;
    }

    match state.screen() {
        Screen::Quiz => handle_quiz_key(key, state, rt),
        Screen::Complete => match key.code {
            KeyCode::Enter | KeyCode::Char('r') => restart(state, rt),
            KeyCode::Char('q') | KeyCode::Esc => state.push_dialog(Dialog::ConfirmQuit),
            KeyCode::Char('?') => state.push_dialog(Dialog::Help),
            _ => {}
        },
    }
}

fn handle_quiz_key(key: KeyEvent, state: &mut AppState, rt: &mut Runtime) {
    if key.code == KeyCode::Char('?') {
        state.push_dialog(Dialog::Help);
        return;
    }

    let attempt = if state.current_is_integer() {
        match key.code {
            KeyCode::Char(c) => {
                state.push_input_char(c);
                None
            }
            KeyCode::Backspace => {
                state.pop_input_char();
                None
            }
            KeyCode::Enter => state.submit_integer(),
            _ => None,
        }
    } else {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                let idx = (c.to_ascii_lowercase() as u8 - b'a') as usize;
                state.select_choice(idx)
            }
            _ => None,
        }
    };

    if let Some(attempt) = attempt {
        rt.record(attempt);
    }
}

fn handle_dialog_key(key: KeyEvent, state: &mut AppState) {
    match state.top_dialog().cloned() {
        Some(Dialog::ConfirmQuit) => match key.code {
            KeyCode::Enter | KeyCode::Char('y') => {
                state.pop_dialog();
                state.should_quit = true;
            }
            KeyCode::Esc | KeyCode::Char('n') => {
                state.pop_dialog();
            }
            _ => {}
        },
        Some(Dialog::Help) => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') => {
                state.pop_dialog();
            }
            _ => {}
        },
        None => {}
    }
}

fn restart(state: &mut AppState, rt: &mut Runtime) {
    state.restart();
    rt.clock.start(state.session.generation());
}
