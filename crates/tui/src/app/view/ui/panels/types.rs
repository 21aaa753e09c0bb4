use ratatui::style::{Color, Style};

pub(in crate::app::view::ui) struct PanelView {
    pub(super) title: String,
    pub(super) accent: Color,
    pub(super) lines: Vec<(String, Style)>,
    pub(super) selected: Option<usize>,
    pub(super) buttons: Vec<String>,
    pub(super) selected_button: usize,
    pub(super) hint: Option<String>,
}
