use crate::app::AppState;
use crossterm::event::KeyCode;
use ui_facade::modal::ModalAction;

/// The front modal swallows every key; settling it reveals the next one.
pub fn handle_modal_key(app: &mut AppState, key: KeyCode) -> bool {
    let Some(dialog) = app.modals.front_mut() else {
        return false;
    };
    let settled = match key {
        KeyCode::Left | KeyCode::BackTab => {
            dialog.select_previous();
            false
        }
        KeyCode::Right | KeyCode::Tab => {
            dialog.select_next();
            false
        }
        KeyCode::Enter => {
            let action = dialog.selected_action();
            dialog.dismiss(action)
        }
        KeyCode::Char('y') | KeyCode::Char('Y') => dialog.dismiss(ModalAction::Ok),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            dialog.dismiss(ModalAction::Cancel)
        }
        _ => return false,
    };
    if settled || dialog.is_settled() {
        app.modals.pop_front();
    }
    app.needs_redraw = true;
    true
}
