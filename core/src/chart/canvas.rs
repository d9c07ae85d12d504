//! Minimal raster drawing on top of `image::RgbImage`.

use crate::error::ChartError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::f64::consts::TAU;
use std::io::Cursor;

pub const MIN_SIDE: u32 = 64;

pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
pub const AXIS: Rgb<u8> = Rgb([64, 64, 64]);
pub const GRID: Rgb<u8> = Rgb([225, 225, 225]);

/// Plot area inside the canvas margins, in pixel coordinates.
#[derive(Debug, Clone, Copy)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotArea {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

pub struct Canvas {
    img: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self, ChartError> {
        if width < MIN_SIDE || height < MIN_SIDE {
            return Err(ChartError::CanvasTooSmall { width, height });
        }
        Ok(Canvas {
            img: RgbImage::from_pixel(width, height, BACKGROUND),
        })
    }

    pub fn width(&self) -> u32 {
        self.img.width()
    }

    pub fn height(&self) -> u32 {
        self.img.height()
    }

    pub fn plot_area(&self) -> PlotArea {
        let w = self.width() as f64;
        let h = self.height() as f64;
        let margin = (w.min(h) / 10.0).round();
        PlotArea {
            left: margin,
            top: margin / 2.0,
            right: w - margin / 2.0,
            bottom: h - margin,
        }
    }

    fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height() {
            self.img.put_pixel(x as u32, y as u32, color);
        }
    }

    /// Fill the half-open rectangle [x0, x1) x [y0, y1), clipped to the canvas.
    pub fn fill_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgb<u8>) {
        let (x0, x1) = (x0.min(x1).round() as i64, x0.max(x1).round() as i64);
        let (y0, y1) = (y0.min(y1).round() as i64, y0.max(y1).round() as i64);
        for y in y0..y1 {
            for x in x0..x1 {
                self.put(x, y, color);
            }
        }
    }

    /// Draw a straight segment by stamping squares of side `thickness` along it.
    pub fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), thickness: f64, color: Rgb<u8>) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        let half = thickness / 2.0;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let (x, y) = (from.0 + dx * t, from.1 + dy * t);
            self.fill_rect(x - half, y - half, x + half, y + half, color);
        }
    }

    pub fn draw_axes(&mut self, area: PlotArea) {
        self.draw_line((area.left, area.top), (area.left, area.bottom), 2.0, AXIS);
        self.draw_line((area.left, area.bottom), (area.right, area.bottom), 2.0, AXIS);
    }

    /// Horizontal grid lines for a value axis running from 0 to `max`.
    pub fn draw_grid(&mut self, area: PlotArea, max: f64) {
        if max <= 0.0 {
            return;
        }
        let step = (max / 5.0).ceil().max(1.0);
        let mut value = step;
        while value <= max {
            let y = area.bottom - value / max * area.height();
            self.draw_line((area.left, y), (area.right, y), 1.0, GRID);
            value += step;
        }
    }

    /// Fill a disc split into slices. Slices start at 12 o'clock and run
    /// clockwise; each is given as a fraction of the whole.
    pub fn fill_pie(&mut self, center: (f64, f64), radius: f64, slices: &[(f64, Rgb<u8>)]) {
        let Some(&(_, last_color)) = slices.last() else {
            return;
        };
        let (cx, cy) = center;
        let r2 = radius * radius;
        let y_range = (cy - radius).floor() as i64..=(cy + radius).ceil() as i64;
        for y in y_range {
            for x in (cx - radius).floor() as i64..=(cx + radius).ceil() as i64 {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                if dx * dx + dy * dy > r2 {
                    continue;
                }
                let mut angle = dx.atan2(-dy);
                if angle < 0.0 {
                    angle += TAU;
                }
                let position = angle / TAU;
                let mut cumulative = 0.0;
                let mut color = last_color;
                for &(fraction, slice_color) in slices {
                    cumulative += fraction;
                    if position < cumulative {
                        color = slice_color;
                        break;
                    }
                }
                self.put(x, y, color);
            }
        }
    }

    pub fn into_png(self) -> Result<Vec<u8>, ChartError> {
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(self.img).write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }

    pub fn into_png_base64(self) -> Result<String, ChartError> {
        Ok(STANDARD.encode(self.into_png()?))
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.img.get_pixel(x, y)
    }
}

pub fn hex(color: Rgb<u8>) -> String {
    let [r, g, b] = color.0;
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);
    const BLUE: Rgb<u8> = Rgb([0, 0, 255]);

    #[test]
    fn test_rejects_tiny_canvas() {
        assert!(matches!(
            Canvas::new(10, 400),
            Err(ChartError::CanvasTooSmall { width: 10, .. })
        ));
    }

    #[test]
    fn test_fill_rect_is_clipped() {
        let mut canvas = Canvas::new(64, 64).unwrap();
        canvas.fill_rect(-10.0, -10.0, 5.0, 5.0, RED);
        assert_eq!(canvas.pixel(0, 0), RED);
        assert_eq!(canvas.pixel(4, 4), RED);
        assert_eq!(canvas.pixel(5, 5), BACKGROUND);
    }

    #[test]
    fn test_pie_slices_start_at_top_clockwise() {
        let mut canvas = Canvas::new(100, 100).unwrap();
        canvas.fill_pie((50.0, 50.0), 40.0, &[(0.5, RED), (0.5, BLUE)]);
        // right half is the first slice, left half the second
        assert_eq!(canvas.pixel(70, 50), RED);
        assert_eq!(canvas.pixel(30, 50), BLUE);
        assert_eq!(canvas.pixel(2, 2), BACKGROUND);
    }

    #[test]
    fn test_png_encoding_has_signature() {
        let png = Canvas::new(64, 64).unwrap().into_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_hex() {
        assert_eq!(hex(Rgb([78, 121, 167])), "#4e79a7");
    }
}
