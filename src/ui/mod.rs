pub mod dialog;
pub mod history;
pub mod instructions;
pub mod keybar;
pub mod layout;
pub mod question;
pub mod result;
pub mod statusbar;
pub mod titlebar;

use ratatui::Frame;

use crate::app::{AppState, Screen};

pub fn draw(f: &mut Frame, state: &AppState) {
    let area = f.area();
    let layout = layout::compute_layout(area, state);

    titlebar::draw_titlebar(f, layout.titlebar, state);

    match state.screen() {
        Screen::Quiz => {
            if let Some(panel) = layout.instructions {
                instructions::draw_instructions(f, panel, state);
            }
            question::draw_question(f, layout.main, state);
        }
        Screen::Complete => {
            result::draw_complete(f, layout.main, state);
        }
    }

    if let Some(panel) = layout.history {
        history::draw_history(f, panel, state);
    }
    statusbar::draw_statusbar(f, layout.statusbar, state);
    keybar::draw_keybar(f, layout.keybar, state);

    // Draw dialog overlay if any
    if state.has_dialog() {
        dialog::draw_dialog(f, area, state);
    }
}
