use crate::app::{AppState, StatusLineMode};
use crate::app::util::text::truncate_to_width;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub(super) fn build_header_line(app: &AppState, width: usize) -> Line<'static> {
    let title = "UI Facade Demo";
    let route = truncate_to_width(&format!("  route: {}", app.route), width.saturating_sub(title.len()));
    Line::from(vec![
        Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(route, Style::default().add_modifier(Modifier::DIM)),
    ])
}

pub(super) fn build_status_line(app: &AppState, width: usize) -> Line<'static> {
    let mut segments = Vec::new();
    match app.status_line_mode {
        StatusLineMode::Info => {
            if app.busy {
                segments.push(format!("{} busy", app.spinner_frame()));
            } else {
                segments.push("idle".to_string());
            }
            let open = app.modals.len() + app.selects.len() + app.signatures.len();
            if open > 0 {
                segments.push(format!("dialogs: {open}"));
            }
            segments.push(format!(
                "mouse: {}",
                if app.mouse_capture_enabled { "on" } else { "off" }
            ));
            segments.push("? help".to_string());
            segments.push("q quit".to_string());
        }
        StatusLineMode::Help => {
            segments.push("↑/↓ Enter run".to_string());
            segments.push("dialogs: ←/→ Enter Esc y/n".to_string());
            segments.push("select: type Space Enter Esc".to_string());
            segments.push("signature: drag c Enter Esc".to_string());
            segments.push("Ctrl+C quit".to_string());
            segments.push("? info".to_string());
        }
    }
    let text = truncate_to_width(&segments.join("  •  "), width);
    let style = if app.busy {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    Line::from(Span::styled(text, style))
}
