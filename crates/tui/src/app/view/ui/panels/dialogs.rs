use crate::app::state::FragmentView;
use crate::app::util::text::sanitize_for_tui;
use ratatui::style::{Color, Modifier, Style};
use ui_facade::modal::ModalDialog;
use ui_facade::select::SelectDialog;

use super::super::style::{modal_accent, severity_style};
use super::types::PanelView;

fn message_lines(message: &str) -> impl Iterator<Item = (String, Style)> + '_ {
    message
        .lines()
        .map(|line| (sanitize_for_tui(line), Style::default()))
}

pub(in crate::app::view::ui) fn build_modal_panel_view(dialog: &ModalDialog) -> PanelView {
    let mut lines: Vec<(String, Style)> = message_lines(&dialog.message).collect();
    if !dialog.details.is_empty() {
        if !lines.is_empty() {
            lines.push((String::new(), Style::default()));
        }
        for detail in &dialog.details {
            let code = detail
                .code
                .as_deref()
                .map(|code| format!(" ({code})"))
                .unwrap_or_default();
            lines.push((
                format!(
                    "{}: {}{code}",
                    detail.severity.display_label(),
                    sanitize_for_tui(&detail.message)
                ),
                severity_style(detail.severity),
            ));
        }
    }
    let actions = dialog.actions();
    PanelView {
        title: dialog.title.clone(),
        accent: modal_accent(dialog.kind),
        lines,
        selected: None,
        buttons: dialog.button_labels.clone(),
        selected_button: dialog.selected.min(actions.len().saturating_sub(1)),
        hint: None,
    }
}

pub(in crate::app::view::ui) fn build_select_panel_view(dialog: &SelectDialog) -> PanelView {
    let mut lines = vec![(
        format!("Search: {}▏", dialog.query()),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if dialog.visible_len() == 0 {
        lines.push((
            dialog.no_data_text.clone(),
            Style::default().add_modifier(Modifier::DIM),
        ));
    }
    for (index, item) in dialog.visible_items().enumerate() {
        let check = match (dialog.multi_select, dialog.is_checked(index)) {
            (false, _) => "",
            (true, true) => "[x] ",
            (true, false) => "[ ] ",
        };
        let description = if item.description.is_empty() {
            String::new()
        } else {
            format!("  {}", item.description)
        };
        lines.push((format!("{check}{}{description}", item.title), Style::default()));
    }
    let hint = if dialog.multi_select {
        "type to filter • ↑/↓ move • Space toggle • Enter confirm • Esc cancel"
    } else {
        "type to filter • ↑/↓ move • Enter select • Esc cancel"
    };
    PanelView {
        title: dialog.title.clone(),
        accent: Color::Cyan,
        lines,
        selected: (dialog.visible_len() > 0).then(|| dialog.cursor() + 1),
        buttons: Vec::new(),
        selected_button: 0,
        hint: Some(hint.to_string()),
    }
}

pub(in crate::app::view::ui) fn build_fragment_panel_view(fragment: &FragmentView) -> PanelView {
    PanelView {
        title: fragment.title.clone(),
        accent: Color::Magenta,
        lines: fragment
            .lines
            .iter()
            .map(|line| (line.clone(), Style::default()))
            .collect(),
        selected: None,
        buttons: Vec::new(),
        selected_button: 0,
        hint: Some("Esc hide".to_string()),
    }
}

pub(in crate::app::view::ui) fn build_busy_panel_view(spinner: &str) -> PanelView {
    PanelView {
        title: "Busy".to_string(),
        accent: Color::Yellow,
        lines: vec![(format!("{spinner} Working..."), Style::default())],
        selected: None,
        buttons: Vec::new(),
        selected_button: 0,
        hint: Some("Ctrl+C quits".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::{build_modal_panel_view, build_select_panel_view};
    use crate::app::host::TerminalHost;
    use crate::app::AppState;
    use std::cell::RefCell;
    use std::rc::Rc;
    use ui_facade::facade::Facade;
    use ui_facade::i18n::TextBundle;
    use ui_facade::select::{SelectConfig, SelectableItem};
    use ui_facade::service_error::RawServiceError;
    use ui_facade::HostUi;

    fn wired() -> (Rc<RefCell<AppState>>, Facade) {
        let state = Rc::new(RefCell::new(AppState::default()));
        let host: Rc<dyn HostUi> = Rc::new(TerminalHost::new(state.clone(), TextBundle::default()));
        (state, Facade::new(host))
    }

    #[test]
    fn service_error_details_become_severity_rows() {
        let (state, facade) = wired();
        let body = r#"{"error":{"innererror":{"errordetails":[
            {"severity":"warning","message":"Price defaulted","code":"FIELD/002"}]}}}"#;
        let _shown = facade.show_service_error(&RawServiceError::default().with_body(body));
        let app = state.borrow();
        let view = build_modal_panel_view(app.modals.front().expect("modal"));
        let texts: Vec<&str> = view.lines.iter().map(|(text, _)| text.as_str()).collect();
        assert_eq!(texts, vec!["Warning: Price defaulted (FIELD/002)"]);
        assert_eq!(view.buttons, vec!["Close".to_string()]);
    }

    #[test]
    fn select_view_marks_checks_and_cursor() {
        let (state, facade) = wired();
        let items = vec![
            SelectableItem::new("1", "Laptop", ""),
            SelectableItem::new("2", "Mouse", "Unit Price: 25 USD"),
        ];
        let config = SelectConfig {
            multi_select: true,
            ..SelectConfig::default()
        };
        let _chosen = facade.select_from(items, config);
        let mut app = state.borrow_mut();
        let dialog = app.selects.front_mut().expect("select");
        dialog.move_down();
        dialog.toggle();
        let view = build_select_panel_view(dialog);
        assert_eq!(view.lines[1].0, "[ ] Laptop");
        assert_eq!(view.lines[2].0, "[x] Mouse  Unit Price: 25 USD");
        assert_eq!(view.selected, Some(2));
    }
}
