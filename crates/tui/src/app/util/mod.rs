pub(crate) mod clipboard;
pub(crate) mod text;

pub(crate) use clipboard::copy_text_to_clipboard;
