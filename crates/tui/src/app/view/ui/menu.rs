use crate::app::screen::HomeAction;
use crate::app::util::text::truncate_to_width;
use crate::app::AppState;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use super::constants::SELECTED_FG;

/// Menu rows scrolled so the selected entry stays in view.
pub(super) fn build_menu_lines(app: &AppState, width: usize, height: usize) -> Vec<Line<'static>> {
    if height == 0 {
        return Vec::new();
    }
    let selected = app.menu_selected.min(HomeAction::ALL.len().saturating_sub(1));
    let start = (selected + 1).saturating_sub(height);
    HomeAction::ALL
        .iter()
        .enumerate()
        .skip(start)
        .take(height)
        .map(|(index, action)| {
            let is_selected = index == selected;
            let marker = if is_selected { "> " } else { "  " };
            let label = truncate_to_width(action.label(), width.saturating_sub(2));
            let style = if is_selected {
                Style::default().fg(SELECTED_FG).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!("{marker}{label}"), style))
        })
        .collect()
}
