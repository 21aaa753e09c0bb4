use crate::app::state::CanvasGeometry;
use crate::app::util::text::truncate_to_width;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};
use ratatui::Frame;
use ui_facade::signature::{Raster, Rgba, SignaturePad};

use super::super::constants::{POPUP_MARGIN, POPUP_MIN_WIDTH};
use super::super::text::widest;
use super::render::centered_rect;

/// Raster pixels per cell column so that the whole raster fits in
/// `columns` x `rows` cells, each cell showing two half-block pixels rows.
pub(super) fn canvas_scale(width: u32, height: u32, columns: u16, rows: u16) -> u32 {
    let columns = u32::from(columns.max(1));
    let pixel_rows = u32::from(rows.max(1)) * 2;
    width
        .div_ceil(columns)
        .max(height.div_ceil(pixel_rows))
        .max(1)
}

fn to_color(color: Rgba) -> Color {
    Color::Rgb(color.r(), color.g(), color.b())
}

/// First inked pixel in a `size` x `size` block, or the background.
fn block_color(raster: &Raster, background: Rgba, x0: u32, y0: u32, size: u32) -> Rgba {
    for y in y0..y0 + size {
        for x in x0..x0 + size {
            match raster.pixel(x, y) {
                Some(pixel) if pixel != background => return pixel,
                _ => {}
            }
        }
    }
    background
}

struct SignatureCanvas<'a> {
    pad: &'a SignaturePad,
    scale: u32,
}

impl Widget for SignatureCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let raster = self.pad.raster();
        let background = self.pad.background();
        for row in 0..area.height {
            for column in 0..area.width {
                let x0 = u32::from(column) * self.scale;
                let y0 = u32::from(row) * 2 * self.scale;
                let top = block_color(raster, background, x0, y0, self.scale);
                let bottom = block_color(raster, background, x0, y0 + self.scale, self.scale);
                if let Some(cell) = buf.cell_mut((area.x + column, area.y + row)) {
                    cell.set_symbol("▀")
                        .set_fg(to_color(top))
                        .set_bg(to_color(bottom));
                }
            }
        }
    }
}

/// Draws the pad as a popup and reports where its pixels landed so mouse
/// input can be mapped back onto the raster.
pub(in crate::app::view::ui) fn render_signature_panel(
    f: &mut Frame,
    area: Rect,
    pad: &SignaturePad,
) -> Option<CanvasGeometry> {
    let max_columns = area.width.saturating_sub(POPUP_MARGIN * 2 + 2);
    let max_rows = area.height.saturating_sub(POPUP_MARGIN + 3);
    if max_columns < 4 || max_rows < 2 {
        return None;
    }
    let raster = pad.raster();
    let scale = canvas_scale(raster.width(), raster.height(), max_columns, max_rows);
    let columns = u16::try_from(raster.width().div_ceil(scale)).unwrap_or(max_columns).min(max_columns);
    let rows = u16::try_from(raster.height().div_ceil(scale * 2)).unwrap_or(max_rows).min(max_rows);

    let hint = format!(
        "drag to draw • c {} • Enter {} • Esc {}",
        pad.labels.clear, pad.labels.save, pad.labels.cancel
    );
    let width = (columns.max(widest([hint.as_str()])).max(widest([pad.title.as_str()]) + 2) + 2)
        .max(POPUP_MIN_WIDTH)
        .min(area.width.saturating_sub(POPUP_MARGIN * 2));
    let popup = centered_rect(area, width, rows + 3);
    f.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            format!(" {} ", pad.title),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let canvas = Rect {
        x: inner.x + inner.width.saturating_sub(columns) / 2,
        y: inner.y,
        width: columns.min(inner.width),
        height: rows.min(inner.height),
    };
    f.render_widget(SignatureCanvas { pad, scale }, canvas);
    let hint_area = Rect {
        x: inner.x,
        y: inner.y + canvas.height,
        width: inner.width,
        height: inner.height.saturating_sub(canvas.height),
    };
    f.render_widget(
        Paragraph::new(Span::styled(
            truncate_to_width(&hint, inner.width as usize),
            Style::default().add_modifier(Modifier::DIM),
        )),
        hint_area,
    );
    Some(CanvasGeometry {
        area: canvas,
        scale,
    })
}

#[cfg(test)]
mod tests {
    use super::{block_color, canvas_scale};
    use ui_facade::signature::{LineCap, Pen, Raster, Rgba};

    #[test]
    fn scale_fits_both_dimensions() {
        assert_eq!(canvas_scale(450, 250, 90, 25), 5);
        assert_eq!(canvas_scale(100, 400, 100, 10), 20);
        assert_eq!(canvas_scale(10, 10, 200, 200), 1);
    }

    #[test]
    fn blocks_pick_up_any_ink() {
        let mut raster = Raster::new(8, 8, Rgba::WHITE);
        let pen = Pen {
            color: Rgba::BLACK,
            width: 1.0,
            cap: LineCap::Round,
        };
        raster.stamp_dot(5.5, 1.5, &pen);
        assert_eq!(block_color(&raster, Rgba::WHITE, 4, 0, 4), Rgba::BLACK);
        assert_eq!(block_color(&raster, Rgba::WHITE, 0, 0, 4), Rgba::WHITE);
        assert_eq!(block_color(&raster, Rgba::WHITE, 6, 6, 4), Rgba::WHITE);
    }
}
