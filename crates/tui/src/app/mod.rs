pub(crate) mod handlers;
pub(crate) mod host;
pub(crate) mod screen;
pub(crate) mod state;
pub(crate) mod util;
pub(crate) mod view;

pub(crate) use crate::app::state::{CanvasGeometry, FragmentView, StatusLineMode};
use crate::app::state::{LogKind, LogLine};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use ui_facade::modal::ModalDialog;
use ui_facade::select::SelectDialog;
use ui_facade::signature::SignaturePad;

const MAX_LOG_LINES: usize = 500;

pub struct WrappedLogCache {
    pub width: usize,
    pub log_version: u64,
    pub wrapped: Vec<LogLine>,
}

/// Everything the terminal host renders. Presented surfaces queue up and the
/// front one is active; dropping one settles its caller with the dismiss
/// outcome.
pub struct AppState {
    pub log: Vec<LogLine>,
    pub log_version: u64,
    pub wrapped_log_cache: Option<WrappedLogCache>,
    pub menu_selected: usize,
    pub modals: VecDeque<ModalDialog>,
    pub selects: VecDeque<SelectDialog>,
    pub signatures: VecDeque<SignaturePad>,
    pub signature_canvas: Option<CanvasGeometry>,
    pub signature_drawing: bool,
    pub fragment: Option<FragmentView>,
    pub busy: bool,
    pub route: String,
    pub status_line_mode: StatusLineMode,
    pub mouse_capture_enabled: bool,
    pub spinner_index: usize,
    pub spinner_last_tick: Instant,
    pub needs_redraw: bool,
    pub should_quit: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            log: Vec::new(),
            log_version: 0,
            wrapped_log_cache: None,
            menu_selected: 0,
            modals: VecDeque::new(),
            selects: VecDeque::new(),
            signatures: VecDeque::new(),
            signature_canvas: None,
            signature_drawing: false,
            fragment: None,
            busy: false,
            route: "home".to_string(),
            status_line_mode: StatusLineMode::Info,
            mouse_capture_enabled: false,
            spinner_index: 0,
            spinner_last_tick: Instant::now(),
            needs_redraw: true,
            should_quit: false,
        }
    }
}

impl AppState {
    pub fn push_line(&mut self, kind: LogKind, text: impl Into<String>) {
        self.push_log_line(LogLine::new(kind, text));
    }

    pub fn push_log_line(&mut self, line: LogLine) {
        self.log.push(line);
        if self.log.len() > MAX_LOG_LINES {
            let overflow = self.log.len() - MAX_LOG_LINES;
            self.log.drain(..overflow);
        }
        self.log_version = self.log_version.wrapping_add(1);
        self.needs_redraw = true;
    }

    pub fn has_overlay(&self) -> bool {
        !self.modals.is_empty()
            || !self.selects.is_empty()
            || !self.signatures.is_empty()
            || self.fragment.is_some()
    }

    /// Input other than quitting is held back while the busy overlay shows,
    /// unless a dialog is up on top of it.
    pub fn input_blocked(&self) -> bool {
        self.busy && self.modals.is_empty() && self.selects.is_empty() && self.signatures.is_empty()
    }

    pub fn spinner_frame(&self) -> &'static str {
        const FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];
        FRAMES[self.spinner_index % FRAMES.len()]
    }

    pub fn update_spinner(&mut self, now: Instant) -> bool {
        if !self.busy {
            self.spinner_index = 0;
            self.spinner_last_tick = now;
            return false;
        }
        if now.duration_since(self.spinner_last_tick) >= Duration::from_millis(120) {
            self.spinner_last_tick = now;
            self.spinner_index = self.spinner_index.saturating_add(1);
            return true;
        }
        false
    }

    /// Drops every presented surface so awaiting callers settle.
    pub fn close_all_surfaces(&mut self) {
        self.modals.clear();
        self.selects.clear();
        self.signatures.clear();
        self.signature_canvas = None;
        self.signature_drawing = false;
        self.fragment = None;
    }
}
