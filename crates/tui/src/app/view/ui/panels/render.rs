use crate::app::util::text::{truncate_to_width, wrap_line};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::super::constants::{PANEL_BG, POPUP_MARGIN, POPUP_MIN_WIDTH, SELECTED_FG};
use super::super::text::widest;
use super::types::PanelView;

/// A `width` x `height` rect centered in `area`, shrunk to fit.
pub(in crate::app::view::ui) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Wraps the body and picks a window of at most `max_lines` rows that keeps
/// the selected line visible. The selected line gets a `> ` marker.
pub(super) fn build_panel_body(view: &PanelView, max_lines: usize, max_width: usize) -> Vec<Line<'static>> {
    if max_lines == 0 || view.lines.is_empty() {
        return Vec::new();
    }
    let content_width = max_width.saturating_sub(2).max(1);
    let mut expanded: Vec<(usize, String, Style)> = Vec::new();
    for (line_index, (line, style)) in view.lines.iter().enumerate() {
        if line.is_empty() {
            expanded.push((line_index, String::new(), *style));
            continue;
        }
        for wrapped in wrap_line(line, content_width) {
            expanded.push((line_index, wrapped, *style));
        }
    }

    let total = expanded.len();
    let visible = total.min(max_lines);
    let selected_row = view
        .selected
        .and_then(|selected| expanded.iter().position(|(index, _, _)| *index == selected))
        .unwrap_or(0);
    let start = (selected_row + 1).saturating_sub(visible).min(total - visible);

    let mut out = Vec::with_capacity(visible);
    let mut previous: Option<usize> = None;
    for (line_index, text, style) in &expanded[start..start + visible] {
        let is_selected = view.selected == Some(*line_index);
        let marker = if is_selected && previous != Some(*line_index) {
            "> "
        } else {
            "  "
        };
        let style = if is_selected {
            style.fg(SELECTED_FG).add_modifier(Modifier::BOLD)
        } else {
            *style
        };
        out.push(Line::from(Span::styled(format!("{marker}{text}"), style)));
        previous = Some(*line_index);
    }
    out
}

fn button_line(view: &PanelView) -> Line<'static> {
    let mut spans = Vec::new();
    for (index, label) in view.buttons.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw("  "));
        }
        let style = if index == view.selected_button {
            Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!("[ {label} ]"), style));
    }
    Line::from(spans)
}

pub(in crate::app::view::ui) fn render_panel(f: &mut Frame, area: Rect, view: &PanelView) {
    let max_width = area.width.saturating_sub(POPUP_MARGIN * 2);
    let max_height = area.height.saturating_sub(POPUP_MARGIN);
    if max_width < 4 || max_height < 3 {
        return;
    }
    let buttons_width = view
        .buttons
        .iter()
        .map(|label| label.len() as u16 + 6)
        .sum::<u16>();
    let content_width = widest(view.lines.iter().map(|(text, _)| text.as_str()))
        .saturating_add(2)
        .max(widest(view.hint.iter()))
        .max(widest([view.title.as_str()]).saturating_add(2))
        .max(buttons_width);
    let width = (content_width + 2).max(POPUP_MIN_WIDTH).min(max_width);
    let inner_width = width.saturating_sub(2) as usize;

    let footer_rows = u16::from(!view.buttons.is_empty()) + u16::from(view.hint.is_some());
    let body_budget = max_height.saturating_sub(2 + footer_rows) as usize;
    let body = build_panel_body(view, body_budget, inner_width);
    let height = (body.len() as u16 + footer_rows + 2).min(max_height);

    let popup = centered_rect(area, width, height);
    f.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(view.accent))
        .title(Span::styled(
            format!(" {} ", truncate_to_width(&view.title, inner_width.saturating_sub(2))),
            Style::default().fg(view.accent).add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(PANEL_BG));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let mut rows = body;
    if !view.buttons.is_empty() {
        rows.push(button_line(view));
    }
    if let Some(hint) = view.hint.as_ref() {
        rows.push(Line::from(Span::styled(
            truncate_to_width(hint, inner_width),
            Style::default().add_modifier(Modifier::DIM),
        )));
    }
    f.render_widget(Paragraph::new(Text::from(rows)), inner);
}
