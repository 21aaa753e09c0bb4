mod constants;
mod log;
mod menu;
mod panels;
mod status;
mod style;
mod text;

use crate::app::AppState;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use self::constants::{HEADER_HEIGHT, MENU_WIDTH, STATUS_HEIGHT};
use self::log::tail_log_lines;
use self::menu::build_menu_lines;
use self::panels::{
    build_busy_panel_view, build_fragment_panel_view, build_modal_panel_view,
    build_select_panel_view, render_panel, render_signature_panel,
};
use self::status::{build_header_line, build_status_line};

fn bordered(title: &'static str, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::raw(title))
}

/// Draws the whole screen. Overlays stack fragment, signature pad, selection
/// and modal from bottom to top; the pad's on-screen geometry is written
/// back to `app` for mouse mapping.
pub fn draw_ui(f: &mut Frame, app: &mut AppState) {
    let size = f.area();
    if size.width == 0 || size.height == 0 {
        return;
    }
    f.render_widget(Clear, size);

    let [header, body, footer] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(1),
        Constraint::Length(STATUS_HEIGHT),
    ])
    .areas(size);
    f.render_widget(
        Paragraph::new(build_header_line(app, header.width as usize)),
        header,
    );
    f.render_widget(
        Paragraph::new(build_status_line(app, footer.width as usize)),
        footer,
    );

    let menu_width = MENU_WIDTH.min(body.width / 2);
    let [menu_area, log_area] =
        Layout::horizontal([Constraint::Length(menu_width), Constraint::Min(1)]).areas(body);

    let menu_block = bordered(" Home ", !app.has_overlay());
    let menu_inner = menu_block.inner(menu_area);
    f.render_widget(menu_block, menu_area);
    let menu_lines = build_menu_lines(app, menu_inner.width as usize, menu_inner.height as usize);
    f.render_widget(Paragraph::new(Text::from(menu_lines)), menu_inner);

    let log_block = bordered(" Log ", false);
    let log_inner = log_block.inner(log_area);
    f.render_widget(log_block, log_area);
    let log_lines = tail_log_lines(app, log_inner.width as usize, log_inner.height as usize);
    f.render_widget(Paragraph::new(Text::from(log_lines)), log_inner);

    draw_overlays(f, size, app);
}

fn draw_overlays(f: &mut Frame, area: Rect, app: &mut AppState) {
    if let Some(fragment) = app.fragment.as_ref() {
        render_panel(f, area, &build_fragment_panel_view(fragment));
    }
    let geometry = app
        .signatures
        .front()
        .and_then(|pad| render_signature_panel(f, area, pad));
    app.signature_canvas = geometry;
    if let Some(dialog) = app.selects.front() {
        render_panel(f, area, &build_select_panel_view(dialog));
    }
    if let Some(dialog) = app.modals.front() {
        render_panel(f, area, &build_modal_panel_view(dialog));
    }
    if app.input_blocked() {
        render_panel(f, area, &build_busy_panel_view(app.spinner_frame()));
    }
}
