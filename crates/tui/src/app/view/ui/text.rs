use crate::app::util::text::visual_width;

/// Display width of the widest line, clamped to what fits in a `u16` area.
pub(super) fn widest(lines: impl IntoIterator<Item = impl AsRef<str>>) -> u16 {
    let width = lines
        .into_iter()
        .map(|line| visual_width(line.as_ref()))
        .max()
        .unwrap_or(0);
    u16::try_from(width).unwrap_or(u16::MAX)
}
