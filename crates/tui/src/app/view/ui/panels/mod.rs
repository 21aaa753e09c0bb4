mod canvas;
mod dialogs;
mod render;
mod types;

pub(super) use canvas::render_signature_panel;
pub(super) use dialogs::{
    build_busy_panel_view, build_fragment_panel_view, build_modal_panel_view,
    build_select_panel_view,
};
pub(super) use render::render_panel;
