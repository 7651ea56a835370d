use std::io::{self, Write};

use crate::color::{Hsl, Rgb};
use crate::math_utils::{self, Point};
use crate::settings::*;

/// Geometry of a color wheel inscribed in a square canvas.
///
/// Angles are measured from the positive x axis with y growing downwards,
/// so hue runs clockwise on screen. Saturation is the distance from the
/// center relative to the radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wheel {
    size: u32,
}

impl Wheel {
    /// Sizes are clamped to `MIN_CANVAS_SIZE..=MAX_CANVAS_SIZE`.
    pub fn new(size: u32) -> Self {
        Self {
            size: size.clamp(MIN_CANVAS_SIZE, MAX_CANVAS_SIZE),
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn radius(&self) -> f64 {
        self.size as f64 / 2.0
    }

    /// Color of the pixel at (`col`, `row`), or `None` outside the circle.
    pub fn hsl_at_pixel(&self, col: u32, row: u32) -> Option<Hsl> {
        let radius = self.radius();
        let dx = (col as f64 - radius) / radius;
        let dy = (row as f64 - radius) / radius;
        let unit = Point::new(dx, dy);
        let dist = unit.norm();
        if dist > 1.0 {
            return None;
        }
        let hue = math_utils::to_degrees(unit.angle());
        Some(Hsl::new(hue, dist, WHEEL_LIGHTNESS))
    }

    /// Maps a click, relative to the canvas's top-left corner, to the
    /// guessed color. Clicks outside the wheel yield `None`.
    pub fn guess_at(&self, click: Point) -> Option<Hsl> {
        let radius = self.radius();
        let offset = Point::new(click.x - radius, click.y - radius);
        let dist = offset.norm();
        if dist > radius {
            return None;
        }
        let hue = math_utils::to_degrees(offset.angle());
        Some(Hsl::new(hue, dist / radius, WHEEL_LIGHTNESS))
    }

    /// Canvas position showing the given hue (degrees) and saturation.
    pub fn pixel_for(&self, hue: f64, saturation: f64) -> Point {
        let radius = self.radius();
        let angle = math_utils::to_radians(hue);
        Point::new(
            radius + angle.cos() * saturation * radius,
            radius + angle.sin() * saturation * radius,
        )
    }

    pub fn render(&self) -> WheelImage {
        let mut image = WheelImage::blank(self.size);
        for row in 0..self.size {
            for col in 0..self.size {
                if let Some(hsl) = self.hsl_at_pixel(col, row) {
                    image.put(col, row, hsl.to_rgb());
                }
            }
        }
        log::debug!("rendered {0}x{0} wheel", self.size);
        image
    }
}

/// RGBA raster of a rendered wheel. Pixels outside the circle keep alpha 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelImage {
    size: u32,
    pixels: Vec<u8>,
}

impl WheelImage {
    fn blank(size: u32) -> Self {
        Self {
            size,
            pixels: vec![0; (size as usize) * (size as usize) * 4],
        }
    }

    fn offset(&self, col: u32, row: u32) -> usize {
        ((row as usize) * (self.size as usize) + col as usize) * 4
    }

    fn put(&mut self, col: u32, row: u32, rgb: Rgb) {
        let i = self.offset(col, row);
        self.pixels[i..i + 4].copy_from_slice(&[rgb.red, rgb.green, rgb.blue, 255]);
    }

    #[cfg(any(test, feature = "gui"))]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[cfg(any(test, feature = "gui"))]
    pub fn rgba_at(&self, col: u32, row: u32) -> [u8; 4] {
        let i = self.offset(col, row);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Writes a binary PPM, painting untouched pixels with `background`.
    pub fn write_ppm<W: Write>(&self, out: &mut W, background: Rgb) -> io::Result<()> {
        write!(out, "P6\n{0} {0}\n255\n", self.size)?;
        let mut body = Vec::with_capacity(self.pixels.len() / 4 * 3);
        for px in self.pixels.chunks_exact(4) {
            if px[3] == 0 {
                body.extend_from_slice(&background.channels());
            } else {
                body.extend_from_slice(&px[..3]);
            }
        }
        out.write_all(&body)?;
        out.flush()
    }
}
