use crate::app::handlers::KeyOutcome;
use crate::app::screen::HomeAction;
use crate::app::{AppState, StatusLineMode};
use crossterm::event::KeyCode;

pub fn handle_menu_key(app: &mut AppState, key: KeyCode) -> KeyOutcome {
    let last = HomeAction::ALL.len().saturating_sub(1);
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.menu_selected = app.menu_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.menu_selected = usize::min(app.menu_selected + 1, last);
        }
        KeyCode::Home => app.menu_selected = 0,
        KeyCode::End => app.menu_selected = last,
        KeyCode::Enter => {
            let action = HomeAction::ALL[app.menu_selected.min(last)];
            return KeyOutcome::Run(action);
        }
        KeyCode::Char('?') => {
            app.status_line_mode = match app.status_line_mode {
                StatusLineMode::Info => StatusLineMode::Help,
                StatusLineMode::Help => StatusLineMode::Info,
            };
        }
        KeyCode::Char('q') => return KeyOutcome::Quit,
        _ => return KeyOutcome::Ignored,
    }
    app.needs_redraw = true;
    KeyOutcome::Redraw
}
