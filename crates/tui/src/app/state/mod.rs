pub(crate) mod log;
pub(crate) mod surfaces;

pub(crate) use log::{LogKind, LogLine, LogSpan, LogTone};
pub(crate) use surfaces::{CanvasGeometry, FragmentView, StatusLineMode};
