use ratatui::layout::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StatusLineMode {
    #[default]
    Info,
    Help,
}

/// Where the signature canvas landed on screen during the last draw and
/// how many raster pixels one terminal cell spans horizontally. A cell is
/// two half-block rows tall, so it covers `2 * scale` pixels vertically.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasGeometry {
    pub area: Rect,
    pub scale: u32,
}

impl CanvasGeometry {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.area.x
            && column < self.area.x + self.area.width
            && row >= self.area.y
            && row < self.area.y + self.area.height
    }

    /// Client pixel coordinates at the center of a terminal cell.
    pub fn cell_to_client(&self, column: u16, row: u16) -> (f32, f32) {
        let scale = self.scale as f32;
        (
            f32::from(column) * scale + scale / 2.0,
            f32::from(row) * 2.0 * scale + scale,
        )
    }

    pub fn client_origin(&self) -> (f32, f32) {
        let scale = self.scale as f32;
        (f32::from(self.area.x) * scale, f32::from(self.area.y) * 2.0 * scale)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FragmentView {
    pub title: String,
    pub lines: Vec<String>,
}
