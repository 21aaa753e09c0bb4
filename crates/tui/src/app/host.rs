use crate::app::state::LogKind;
use crate::app::AppState;
use std::cell::RefCell;
use std::rc::Rc;
use ui_facade::i18n::TextBundle;
use ui_facade::modal::ModalDialog;
use ui_facade::routing::{RouteHistory, RouteParams, Router};
use ui_facade::select::SelectDialog;
use ui_facade::signature::SignaturePad;
use ui_facade::{FacadeError, HostUi};

/// Host side of the facade for the terminal UI. Presented surfaces are parked
/// in [`AppState`] for the event loop to drive; nothing here holds a borrow
/// past the call that took it.
pub struct TerminalHost {
    state: Rc<RefCell<AppState>>,
    bundle: TextBundle,
    history: RouteHistory,
}

impl TerminalHost {
    pub fn new(state: Rc<RefCell<AppState>>, bundle: TextBundle) -> Self {
        Self {
            state,
            bundle,
            history: RouteHistory::starting_at("home"),
        }
    }

    fn sync_route(&self) {
        let route = self
            .history
            .current()
            .map(|entry| entry.route)
            .unwrap_or_default();
        let mut state = self.state.borrow_mut();
        state.push_line(LogKind::Status, format!("route → {route}"));
        state.route = route;
    }
}

impl HostUi for TerminalHost {
    fn text(&self, key: &str, params: &[&str]) -> String {
        self.bundle.text(key, params)
    }

    fn present_modal(&self, dialog: ModalDialog) {
        let mut state = self.state.borrow_mut();
        state.modals.push_back(dialog);
        state.needs_redraw = true;
    }

    fn present_select(&self, dialog: SelectDialog) {
        let mut state = self.state.borrow_mut();
        state.selects.push_back(dialog);
        state.needs_redraw = true;
    }

    fn present_signature(&self, pad: SignaturePad) -> Result<(), FacadeError> {
        let mut state = self.state.borrow_mut();
        if !state.mouse_capture_enabled {
            return Err(FacadeError::SurfaceUnavailable(
                "mouse capture is disabled, nothing can draw on the pad".to_string(),
            ));
        }
        state.signatures.push_back(pad);
        state.needs_redraw = true;
        Ok(())
    }

    fn set_busy(&self, visible: bool) {
        let mut state = self.state.borrow_mut();
        state.busy = visible;
        state.needs_redraw = true;
    }

    fn toast(&self, message: &str) {
        self.state.borrow_mut().push_line(LogKind::Toast, message);
    }
}

impl Router for TerminalHost {
    fn navigate_to(&self, route: &str, params: &RouteParams) {
        self.history.navigate_to(route, params);
        self.sync_route();
    }

    fn previous_route(&self) -> Option<String> {
        self.history.previous_route()
    }

    fn go_back(&self) {
        self.history.go_back();
        self.sync_route();
    }
}
