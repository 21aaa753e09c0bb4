use crate::app::AppState;
use crossterm::event::KeyCode;

pub fn handle_select_key(app: &mut AppState, key: KeyCode) -> bool {
    let Some(dialog) = app.selects.front_mut() else {
        return false;
    };
    match key {
        KeyCode::Up => dialog.move_up(),
        KeyCode::Down => dialog.move_down(),
        KeyCode::Backspace => dialog.pop_query_char(),
        KeyCode::Char(' ') if dialog.multi_select => dialog.toggle(),
        KeyCode::Char(ch) => dialog.push_query_char(ch),
        KeyCode::Enter => {
            dialog.confirm();
        }
        KeyCode::Esc => {
            dialog.cancel();
        }
        _ => return false,
    }
    if dialog.is_settled() {
        app.selects.pop_front();
    }
    app.needs_redraw = true;
    true
}
