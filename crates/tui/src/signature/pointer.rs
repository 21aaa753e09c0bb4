#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Leave,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerPosition {
    Surface { x: f32, y: f32 },
    Client { x: f32, y: f32 },
}

impl PointerPosition {
    pub fn to_local(self, origin: (f32, f32)) -> (f32, f32) {
        match self {
            PointerPosition::Surface { x, y } => (x, y),
            PointerPosition::Client { x, y } => (x - origin.0, y - origin.1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub kind: PointerKind,
    pub position: PointerPosition,
}

impl PointerEvent {
    pub fn mouse(phase: PointerPhase, x: f32, y: f32) -> Self {
        Self {
            phase,
            kind: PointerKind::Mouse,
            position: PointerPosition::Surface { x, y },
        }
    }

    pub fn touch(phase: PointerPhase, client_x: f32, client_y: f32) -> Self {
        Self {
            phase,
            kind: PointerKind::Touch,
            position: PointerPosition::Client {
                x: client_x,
                y: client_y,
            },
        }
    }

    /// Mouse input that arrives in screen coordinates, as terminal events do.
    pub fn mouse_at_client(phase: PointerPhase, client_x: f32, client_y: f32) -> Self {
        Self {
            phase,
            kind: PointerKind::Mouse,
            position: PointerPosition::Client {
                x: client_x,
                y: client_y,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    Handled,
    PreventDefault,
    Ignored,
}
