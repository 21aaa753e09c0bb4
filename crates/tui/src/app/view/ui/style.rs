use crate::app::state::{LogKind, LogSpan, LogTone};
use ratatui::style::{Color, Modifier, Style};
use ui_facade::modal::ModalKind;
use ui_facade::service_error::Severity;

pub(super) fn style_for(span: &LogSpan) -> Style {
    style_for_kind(span.kind, span.tone)
}

fn style_for_kind(kind: LogKind, tone: LogTone) -> Style {
    let summary = match kind {
        LogKind::System => Style::default().fg(Color::Cyan),
        LogKind::Action => Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
        LogKind::Toast => Style::default().fg(Color::Magenta),
        LogKind::Success => Style::default().fg(Color::Green),
        LogKind::Info => Style::default().fg(Color::LightBlue),
        LogKind::Warning => Style::default().fg(Color::Yellow),
        LogKind::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        LogKind::Status => Style::default().fg(Color::Blue),
        LogKind::Space => Style::default().fg(Color::Black),
    };
    match tone {
        LogTone::Summary => summary,
        LogTone::Detail => summary.add_modifier(Modifier::DIM),
    }
}

pub(super) fn modal_accent(kind: ModalKind) -> Color {
    match kind {
        ModalKind::Error => Color::Red,
        ModalKind::Warning => Color::Yellow,
        ModalKind::Success => Color::Green,
        ModalKind::Info => Color::LightBlue,
        ModalKind::Confirm => Color::Cyan,
    }
}

pub(super) fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Error => Style::default().fg(Color::Red),
        Severity::Warning => Style::default().fg(Color::Yellow),
        Severity::Info => Style::default().fg(Color::LightBlue),
    }
}
