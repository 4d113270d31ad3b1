//! Keyboard input dispatch: help overlay first, then global keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::AppState;

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.show_help {
        match key.code {
            KeyCode::Char('?') | KeyCode::Esc => app.show_help = false,
            KeyCode::Char('q') => app.running = false,
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('r') => app.request_refresh(),
        KeyCode::Left | KeyCode::Char('h') => app.select_prev(),
        KeyCode::Right | KeyCode::Char('l') => app.select_next(),
        KeyCode::Char(c @ '1'..='9') => {
            let slot = c as usize - '1' as usize;
            if slot < app.watchlist().len() {
                app.select(slot);
            } else {
                app.set_warning(format!("no pair in slot {c}"));
            }
        }
        _ => {}
    }
}
