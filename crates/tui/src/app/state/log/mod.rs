use crate::app::util::text::sanitize_for_tui;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogKind {
    System,
    Action,
    Toast,
    Success,
    Info,
    Warning,
    Error,
    Status,
    Space,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogTone {
    Summary,
    Detail,
}

#[derive(Clone, Debug)]
pub struct LogSpan {
    pub kind: LogKind,
    pub tone: LogTone,
    pub text: String,
}

impl LogSpan {
    pub fn new(kind: LogKind, tone: LogTone, text: impl Into<String>) -> Self {
        let raw = text.into();
        Self {
            kind,
            tone,
            text: sanitize_for_tui(&raw),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LogLine {
    pub spans: Vec<LogSpan>,
}

impl LogLine {
    pub fn new(kind: LogKind, text: impl Into<String>) -> Self {
        Self::new_with_tone(kind, LogTone::Summary, text)
    }

    pub fn new_with_tone(kind: LogKind, tone: LogTone, text: impl Into<String>) -> Self {
        Self {
            spans: vec![LogSpan::new(kind, tone, text)],
        }
    }

    pub fn new_with_spans(spans: Vec<LogSpan>) -> Self {
        Self { spans }
    }

    pub fn spans(&self) -> &[LogSpan] {
        &self.spans
    }

    pub fn kind(&self) -> LogKind {
        self.spans
            .first()
            .map(|span| span.kind)
            .unwrap_or(LogKind::System)
    }

    pub fn tone(&self) -> LogTone {
        self.spans
            .first()
            .map(|span| span.tone)
            .unwrap_or(LogTone::Summary)
    }

    pub fn is_single_span(&self) -> bool {
        self.spans.len() <= 1
    }

    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self::new_with_tone(self.kind(), self.tone(), text)
    }

    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }
}
