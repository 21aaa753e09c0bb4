use crate::error::FacadeError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const BLACK: Rgba = Rgba([0, 0, 0, 255]);
    pub const WHITE: Rgba = Rgba([255, 255, 255, 255]);

    pub fn r(self) -> u8 {
        self.0[0]
    }

    pub fn g(self) -> u8 {
        self.0[1]
    }

    pub fn b(self) -> u8 {
        self.0[2]
    }
}

/// Accepts `#rgb` and `#rrggbb`; the leading `#` is optional.
impl FromStr for Rgba {
    type Err = FacadeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let hex = value.trim().trim_start_matches('#');
        let invalid = || FacadeError::InvalidConfig(format!("unsupported color `{value}`"));
        if !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                let mut rgb = [0_u8; 3];
                for (slot, digit) in rgb.iter_mut().zip(hex.chars()) {
                    let nibble = channel(&digit.to_string())?;
                    *slot = nibble * 17;
                }
                Ok(Rgba([rgb[0], rgb[1], rgb[2], 255]))
            }
            6 => Ok(Rgba([
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                255,
            ])),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r(), self.g(), self.b())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Round,
    Butt,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    pub color: Rgba,
    pub width: f32,
    pub cap: LineCap,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl fmt::Debug for Raster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Raster {
    pub fn new(width: u32, height: u32, background: Rgba) -> Self {
        let mut raster = Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        };
        raster.fill(background);
        raster
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn fill(&mut self, color: Rgba) {
        for pixel in self.pixels.chunks_exact_mut(4) {
            pixel.copy_from_slice(&color.0);
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let mut rgba = [0_u8; 4];
        rgba.copy_from_slice(&self.pixels[offset..offset + 4]);
        Some(Rgba(rgba))
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels[offset..offset + 4].copy_from_slice(&color.0);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn stamp_dot(&mut self, x: f32, y: f32, pen: &Pen) {
        // A butt cap on a zero-length segment paints nothing; a dot needs
        // an extent, so stamp it round.
        let dot = Pen {
            cap: LineCap::Round,
            ..*pen
        };
        self.draw_segment((x, y), (x, y), &dot);
    }

    /// Paints every pixel whose center lies within half the pen width of the
    /// segment. Round caps measure distance to the nearest point on the
    /// segment; butt caps only count pixels that project inside it.
    pub fn draw_segment(&mut self, from: (f32, f32), to: (f32, f32), pen: &Pen) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let radius = (pen.width / 2.0).max(0.5);
        let min_x = (from.0.min(to.0) - radius).floor().max(0.0) as u32;
        let min_y = (from.1.min(to.1) - radius).floor().max(0.0) as u32;
        let max_x = (from.0.max(to.0) + radius).ceil().min(self.width as f32 - 1.0);
        let max_y = (from.1.max(to.1) + radius).ceil().min(self.height as f32 - 1.0);
        if max_x < 0.0 || max_y < 0.0 {
            return;
        }
        let (max_x, max_y) = (max_x as u32, max_y as u32);

        let dx = to.0 - from.0;
        let dy = to.1 - from.1;
        let length_sq = dx * dx + dy * dy;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;
                let raw_t = if length_sq == 0.0 {
                    0.0
                } else {
                    ((px - from.0) * dx + (py - from.1) * dy) / length_sq
                };
                if pen.cap == LineCap::Butt && !(0.0..=1.0).contains(&raw_t) {
                    continue;
                }
                let t = raw_t.clamp(0.0, 1.0);
                let nearest_x = from.0 + t * dx;
                let nearest_y = from.1 + t * dy;
                let distance_sq = (px - nearest_x).powi(2) + (py - nearest_y).powi(2);
                if distance_sq <= radius * radius {
                    self.set_pixel(x, y, pen.color);
                }
            }
        }
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, FacadeError> {
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder
                .write_header()
                .map_err(|error| FacadeError::Encode(format!("failed to write PNG header: {error}")))?;
            writer
                .write_image_data(&self.pixels)
                .map_err(|error| FacadeError::Encode(format!("failed to encode PNG bytes: {error}")))?;
        }
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::{LineCap, Pen, Raster, Rgba};

    fn pen(width: f32, cap: LineCap) -> Pen {
        Pen {
            color: Rgba::BLACK,
            width,
            cap,
        }
    }

    #[test]
    fn colors_parse_short_and_long_hex() {
        assert_eq!("#000000".parse::<Rgba>().ok(), Some(Rgba::BLACK));
        assert_eq!("#fff".parse::<Rgba>().ok(), Some(Rgba::WHITE));
        assert_eq!("1e90ff".parse::<Rgba>().ok(), Some(Rgba([0x1e, 0x90, 0xff, 255])));
        assert!("#12345".parse::<Rgba>().is_err());
        assert!("#gg0000".parse::<Rgba>().is_err());
        assert_eq!(Rgba([0x1e, 0x90, 0xff, 255]).to_string(), "#1e90ff");
    }

    #[test]
    fn horizontal_segment_covers_its_span() {
        let mut raster = Raster::new(20, 10, Rgba::WHITE);
        raster.draw_segment((2.0, 5.0), (17.0, 5.0), &pen(2.0, LineCap::Round));
        for x in 2..17 {
            assert_eq!(raster.pixel(x, 5), Some(Rgba::BLACK), "x = {x}");
            assert_eq!(raster.pixel(x, 4), Some(Rgba::BLACK), "x = {x}");
        }
        assert_eq!(raster.pixel(10, 1), Some(Rgba::WHITE));
        assert_eq!(raster.pixel(10, 8), Some(Rgba::WHITE));
    }

    #[test]
    fn round_caps_extend_past_the_endpoint_and_butt_caps_do_not() {
        let mut round = Raster::new(20, 10, Rgba::WHITE);
        round.draw_segment((5.0, 5.0), (10.0, 5.0), &pen(4.0, LineCap::Round));
        assert_eq!(round.pixel(11, 5), Some(Rgba::BLACK));

        let mut butt = Raster::new(20, 10, Rgba::WHITE);
        butt.draw_segment((5.0, 5.0), (10.0, 5.0), &pen(4.0, LineCap::Butt));
        assert_eq!(butt.pixel(11, 5), Some(Rgba::WHITE));
        assert_eq!(butt.pixel(7, 5), Some(Rgba::BLACK));
    }

    #[test]
    fn drawing_off_the_edge_is_clipped() {
        let mut raster = Raster::new(4, 4, Rgba::WHITE);
        raster.draw_segment((-10.0, -10.0), (1.0, 1.0), &pen(2.0, LineCap::Round));
        raster.draw_segment((50.0, 50.0), (60.0, 60.0), &pen(2.0, LineCap::Round));
        assert_eq!(raster.pixel(0, 0), Some(Rgba::BLACK));
        assert_eq!(raster.pixel(3, 3), Some(Rgba::WHITE));
        assert_eq!(raster.pixel(4, 0), None);
    }

    #[test]
    fn dot_is_round_even_with_butt_pen() {
        let mut raster = Raster::new(10, 10, Rgba::WHITE);
        raster.stamp_dot(5.0, 5.0, &pen(2.0, LineCap::Butt));
        assert_eq!(raster.pixel(5, 5), Some(Rgba::BLACK));
    }

    #[test]
    fn png_output_has_signature_bytes() {
        let raster = Raster::new(3, 2, Rgba::WHITE);
        let bytes = raster.encode_png().expect("encode");
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
