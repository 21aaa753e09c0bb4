use crate::app::state::{LogLine, LogSpan};
use crate::app::util::text::{char_width, wrap_line};
use crate::app::{AppState, WrappedLogCache};
use ratatui::text::{Line, Span};

use super::style::style_for;

/// Splits a multi-span line into rows no wider than `width`, keeping each
/// fragment's span kind and tone.
fn wrap_multi_span_line(line: &LogLine, width: usize) -> Vec<LogLine> {
    let mut rows = Vec::new();
    let mut current: Vec<LogSpan> = Vec::new();
    let mut used = 0_usize;
    for span in line.spans() {
        let mut part = String::new();
        for ch in span.text.chars() {
            let ch_width = char_width(ch);
            if used + ch_width > width && used > 0 {
                if !part.is_empty() {
                    let mut piece = span.clone();
                    piece.text = std::mem::take(&mut part);
                    current.push(piece);
                }
                rows.push(LogLine::new_with_spans(std::mem::take(&mut current)));
                used = 0;
            }
            part.push(ch);
            used += ch_width;
        }
        if !part.is_empty() {
            let mut piece = span.clone();
            piece.text = part;
            current.push(piece);
        }
    }
    if !current.is_empty() {
        rows.push(LogLine::new_with_spans(current));
    }
    rows
}

pub(super) fn wrap_log_lines(lines: &[LogLine], width: usize) -> Vec<LogLine> {
    let mut out = Vec::new();
    for line in lines {
        let text = line.plain_text();
        if text.is_empty() {
            out.push(line.clone());
            continue;
        }
        if line.is_single_span() {
            out.extend(
                wrap_line(&text, width)
                    .into_iter()
                    .map(|wrapped| line.with_text(wrapped)),
            );
            continue;
        }
        out.extend(wrap_multi_span_line(line, width));
    }
    out
}

pub(super) fn cached_wrap_log_lines(app: &mut AppState, width: usize) -> &[LogLine] {
    if width == 0 {
        return &[];
    }
    let cache_hit = matches!(
        app.wrapped_log_cache.as_ref(),
        Some(cache) if cache.width == width && cache.log_version == app.log_version
    );
    if !cache_hit {
        app.wrapped_log_cache = Some(WrappedLogCache {
            width,
            log_version: app.log_version,
            wrapped: wrap_log_lines(&app.log, width),
        });
    }
    app.wrapped_log_cache
        .as_ref()
        .map(|cache| cache.wrapped.as_slice())
        .unwrap_or(&[])
}

pub(super) fn log_lines_to_lines(lines: &[LogLine]) -> Vec<Line<'static>> {
    lines
        .iter()
        .map(|line| {
            let styled = line
                .spans()
                .iter()
                .map(|span| Span::styled(span.text.clone(), style_for(span)))
                .collect::<Vec<_>>();
            Line::from(styled)
        })
        .collect()
}

/// The last `height` wrapped rows, i.e. the log pinned to its tail.
pub(super) fn tail_log_lines(app: &mut AppState, width: usize, height: usize) -> Vec<Line<'static>> {
    let wrapped = cached_wrap_log_lines(app, width);
    let start = wrapped.len().saturating_sub(height);
    log_lines_to_lines(&wrapped[start..])
}
