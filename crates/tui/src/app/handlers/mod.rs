pub(crate) mod menu;
pub(crate) mod modal;
pub(crate) mod select;
pub(crate) mod signature;

use crate::app::screen::HomeAction;
use crate::app::AppState;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    Redraw,
    Run(HomeAction),
    Quit,
}

impl KeyOutcome {
    fn from_redraw(redraw: bool) -> Self {
        if redraw {
            KeyOutcome::Redraw
        } else {
            KeyOutcome::Ignored
        }
    }
}

/// Routes a key to whichever surface is in front: modal, then selection,
/// then signature pad, then fragment, then the menu.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> KeyOutcome {
    if key.kind != KeyEventKind::Press {
        return KeyOutcome::Ignored;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyOutcome::Quit;
    }
    if app.input_blocked() {
        if key.code == KeyCode::Char('q') {
            return KeyOutcome::Quit;
        }
        return KeyOutcome::Ignored;
    }
    if !app.modals.is_empty() {
        return KeyOutcome::from_redraw(modal::handle_modal_key(app, key.code));
    }
    if !app.selects.is_empty() {
        return KeyOutcome::from_redraw(select::handle_select_key(app, key.code));
    }
    if !app.signatures.is_empty() {
        return KeyOutcome::from_redraw(signature::handle_signature_key(app, key.code));
    }
    if app.fragment.is_some() && key.code == KeyCode::Esc {
        app.fragment = None;
        app.needs_redraw = true;
        return KeyOutcome::Redraw;
    }
    menu::handle_menu_key(app, key.code)
}

pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent) -> bool {
    if !app.modals.is_empty() || !app.selects.is_empty() {
        return false;
    }
    signature::handle_signature_mouse(app, mouse)
}
