use crate::app::AppState;
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ui_facade::signature::{EventDisposition, PadState, PointerEvent, PointerPhase};

pub fn handle_signature_key(app: &mut AppState, key: KeyCode) -> bool {
    let Some(pad) = app.signatures.front_mut() else {
        return false;
    };
    match key {
        KeyCode::Char('c') | KeyCode::Char('C') => pad.clear(),
        KeyCode::Enter | KeyCode::Char('s') => {
            pad.save();
        }
        KeyCode::Esc => {
            pad.cancel();
        }
        _ => return false,
    }
    if pad.is_settled() {
        app.signatures.pop_front();
        app.signature_canvas = None;
        app.signature_drawing = false;
    }
    app.needs_redraw = true;
    true
}

/// Feeds left-button mouse input to the front pad as pointer events. The
/// canvas geometry comes from the last draw; dragging off the canvas ends
/// the stroke.
pub fn handle_signature_mouse(app: &mut AppState, mouse: MouseEvent) -> bool {
    let Some(geometry) = app.signature_canvas else {
        return false;
    };
    let Some(pad) = app.signatures.front_mut() else {
        return false;
    };
    let inside = geometry.contains(mouse.column, mouse.row);
    let phase = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if inside => PointerPhase::Down,
        MouseEventKind::Drag(MouseButton::Left) if inside => PointerPhase::Move,
        MouseEventKind::Drag(MouseButton::Left) => PointerPhase::Leave,
        MouseEventKind::Up(MouseButton::Left) => PointerPhase::Up,
        _ => return false,
    };
    let (origin_x, origin_y) = geometry.client_origin();
    pad.set_origin(origin_x, origin_y);
    let (x, y) = geometry.cell_to_client(mouse.column, mouse.row);
    let disposition = pad.handle_pointer(PointerEvent::mouse_at_client(phase, x, y));
    app.signature_drawing = matches!(pad.state(), PadState::Drawing { .. });
    if disposition == EventDisposition::Ignored {
        return false;
    }
    app.needs_redraw = true;
    true
}

#[cfg(test)]
mod tests {
    use super::{handle_signature_key, handle_signature_mouse};
    use crate::app::host::TerminalHost;
    use crate::app::{AppState, CanvasGeometry};
    use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use ratatui::layout::Rect;
    use std::cell::RefCell;
    use std::rc::Rc;
    use ui_facade::i18n::TextBundle;
    use ui_facade::signature::{capture_signature, PadState, SignatureConfig, SignatureOutcome};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn pad_host() -> (Rc<RefCell<AppState>>, TerminalHost) {
        let state = Rc::new(RefCell::new(AppState {
            mouse_capture_enabled: true,
            ..AppState::default()
        }));
        state.borrow_mut().signature_canvas = Some(CanvasGeometry {
            area: Rect::new(4, 2, 20, 10),
            scale: 4,
        });
        (state.clone(), TerminalHost::new(state, TextBundle::default()))
    }

    fn config() -> SignatureConfig {
        SignatureConfig {
            width: 80,
            height: 80,
            ..SignatureConfig::default()
        }
    }

    #[tokio::test]
    async fn drag_draws_and_enter_saves() {
        let (state, host) = pad_host();
        let outcome = capture_signature(&host, config());
        let left = MouseButton::Left;
        assert!(handle_signature_mouse(&mut state.borrow_mut(), mouse(MouseEventKind::Down(left), 5, 3)));
        assert!(state.borrow().signature_drawing);
        handle_signature_mouse(&mut state.borrow_mut(), mouse(MouseEventKind::Drag(left), 12, 6));
        handle_signature_mouse(&mut state.borrow_mut(), mouse(MouseEventKind::Up(left), 12, 6));
        {
            let app = state.borrow();
            let pad = app.signatures.front().expect("pad");
            assert_eq!(pad.state(), PadState::IdleWithContent);
            assert_ne!(pad.raster().pixel(6, 12), Some(pad.background()));
        }
        assert!(handle_signature_key(&mut state.borrow_mut(), KeyCode::Enter));
        assert!(state.borrow().signatures.is_empty());
        match outcome.await.expect("capture") {
            SignatureOutcome::Saved(image) => assert_eq!((image.width, image.height), (80, 80)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn dragging_off_the_canvas_ends_the_stroke() {
        let (state, host) = pad_host();
        let _outcome = capture_signature(&host, config());
        let left = MouseButton::Left;
        handle_signature_mouse(&mut state.borrow_mut(), mouse(MouseEventKind::Down(left), 6, 4));
        handle_signature_mouse(&mut state.borrow_mut(), mouse(MouseEventKind::Drag(left), 40, 4));
        let app = state.borrow();
        assert!(!app.signature_drawing);
        assert_eq!(
            app.signatures.front().map(|pad| pad.state()),
            Some(PadState::IdleWithContent)
        );
    }

    #[tokio::test]
    async fn clear_keeps_the_pad_open_and_escape_cancels() {
        let (state, host) = pad_host();
        let outcome = capture_signature(&host, config());
        let left = MouseButton::Left;
        handle_signature_mouse(&mut state.borrow_mut(), mouse(MouseEventKind::Down(left), 6, 4));
        handle_signature_key(&mut state.borrow_mut(), KeyCode::Char('c'));
        assert_eq!(
            state.borrow().signatures.front().map(|pad| pad.state()),
            Some(PadState::Blank)
        );
        handle_signature_key(&mut state.borrow_mut(), KeyCode::Esc);
        assert!(state.borrow().signature_canvas.is_none());
        assert_eq!(outcome.await.expect("capture"), SignatureOutcome::Cancelled);
    }
}
