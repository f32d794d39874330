//! Software raster surface.
//!
//! The canvas is a plain RGBA8 pixel buffer (straight alpha) that the field
//! draws into on the CPU. The windowed driver uploads it as a texture each
//! frame; headless hosts can snapshot it to PNG or ignore it entirely.
//!
//! Two primitives cover both particle kinds:
//!
//! - a powder disc: solid color out to 60 % of the radius, then a linear
//!   falloff to fully transparent at the edge;
//! - a rice grain: a rotated filled ellipse with a soft rim, plus a smaller
//!   white highlight ellipse offset toward the grain's upper-left to fake a
//!   sheen.

use std::path::Path;

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::error::SnapshotError;
use crate::visuals::Color;

/// Normalized width of the soft rim on ellipse edges.
const EDGE_SOFTNESS: f32 = 0.15;

/// Highlight geometry relative to the grain's half-extents.
const HIGHLIGHT_OFFSET: Vec2 = Vec2::new(-0.2, -0.3);
const HIGHLIGHT_SCALE: Vec2 = Vec2::new(0.3, 0.2);
const HIGHLIGHT_ALPHA: f32 = 0.4;

/// One canvas pixel: straight-alpha RGBA, texture-upload compatible.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    /// Fully transparent black.
    pub const TRANSPARENT: Pixel = Pixel {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };
}

/// An owned RGBA8 pixel buffer with particle draw primitives.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Canvas {
    /// Create a transparent canvas of the given pixel extents.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Pixel::TRANSPARENT; (width as usize) * (height as usize)],
        }
    }

    /// Canvas width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The pixel data as raw RGBA8 bytes, row-major from the top-left.
    /// Suitable for direct texture upload.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Read one pixel. Out-of-bounds reads return transparent black.
    pub fn pixel(&self, x: u32, y: u32) -> Pixel {
        if x >= self.width || y >= self.height {
            return Pixel::TRANSPARENT;
        }
        self.pixels[(y * self.width + x) as usize]
    }

    /// Reset every pixel to transparent black.
    pub fn clear(&mut self) {
        self.pixels.fill(Pixel::TRANSPARENT);
    }

    /// Replace the buffer with a fresh transparent one of new extents.
    ///
    /// Nothing is scaled or copied; the caller redraws whatever should
    /// survive the resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![Pixel::TRANSPARENT; (width as usize) * (height as usize)];
    }

    /// Source-over blend one pixel. `alpha` is the source coverage in
    /// [0, 1]; the color is straight (not premultiplied).
    fn blend(&mut self, x: u32, y: u32, color: Color, alpha: f32) {
        if x >= self.width || y >= self.height || alpha <= 0.0 {
            return;
        }
        let sa = alpha.min(1.0);
        let dst = &mut self.pixels[(y * self.width + x) as usize];

        let da = dst.a as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return;
        }

        let mix = |src: u8, dst: u8| {
            let out = (src as f32 * sa + dst as f32 * da * (1.0 - sa)) / out_a;
            out.round().clamp(0.0, 255.0) as u8
        };
        dst.r = mix(color.r, dst.r);
        dst.g = mix(color.g, dst.g);
        dst.b = mix(color.b, dst.b);
        dst.a = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }

    /// Pixel columns/rows covered by a bounding box around `center` with
    /// half-extents `(ex, ey)`, clamped to the canvas.
    fn bounds(&self, center: Vec2, ex: f32, ey: f32) -> Option<(u32, u32, u32, u32)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        if center.x + ex < 0.0 || center.y + ey < 0.0 {
            return None;
        }
        let x0 = (center.x - ex).floor().max(0.0) as u32;
        let y0 = (center.y - ey).floor().max(0.0) as u32;
        let x1 = ((center.x + ex).ceil() as i64).min(self.width as i64 - 1);
        let y1 = ((center.y + ey).ceil() as i64).min(self.height as i64 - 1);
        if x1 < x0 as i64 || y1 < y0 as i64 {
            return None;
        }
        Some((x0, y0, x1 as u32, y1 as u32))
    }

    /// Draw a powder disc: solid center, transparent rim.
    pub fn fill_powder(&mut self, center: Vec2, radius: f32, color: Color, opacity: f32) {
        if radius <= 0.0 || opacity <= 0.0 {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.bounds(center, radius, radius) else {
            return;
        };

        for y in y0..=y1 {
            for x in x0..=x1 {
                let offset = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
                let d = offset.length() / radius;
                // Gradient stops: solid to 0.6, transparent at 1.0.
                let coverage = if d <= 0.6 {
                    1.0
                } else if d < 1.0 {
                    (1.0 - d) / 0.4
                } else {
                    continue;
                };
                self.blend(x, y, color, coverage * opacity);
            }
        }
    }

    /// Draw a rice grain: a rotated ellipse with a sheen highlight.
    ///
    /// `half` holds the grain's half-width and half-height; `rotation` is
    /// in degrees.
    pub fn fill_grain(&mut self, center: Vec2, half: Vec2, rotation: f32, color: Color, opacity: f32) {
        if half.x <= 0.0 || half.y <= 0.0 || opacity <= 0.0 {
            return;
        }
        let theta = rotation.to_radians();
        let (sin, cos) = theta.sin_cos();

        // Axis-aligned extents of the rotated ellipse.
        let ex = ((half.x * cos).powi(2) + (half.y * sin).powi(2)).sqrt() + 1.0;
        let ey = ((half.x * sin).powi(2) + (half.y * cos).powi(2)).sqrt() + 1.0;
        let Some((x0, y0, x1, y1)) = self.bounds(center, ex, ey) else {
            return;
        };

        let highlight_center = HIGHLIGHT_OFFSET * half;
        let highlight_half = HIGHLIGHT_SCALE * half;

        for y in y0..=y1 {
            for x in x0..=x1 {
                let offset = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
                // Into the grain's unrotated frame.
                let local = Vec2::new(
                    offset.x * cos + offset.y * sin,
                    -offset.x * sin + offset.y * cos,
                );

                let body = (local / half).length();
                if let Some(coverage) = rim_coverage(body) {
                    self.blend(x, y, color, coverage * opacity);
                }

                let sheen = ((local - highlight_center) / highlight_half).length();
                if let Some(coverage) = rim_coverage(sheen) {
                    self.blend(x, y, Color::WHITE, coverage * HIGHLIGHT_ALPHA * opacity);
                }
            }
        }
    }

    /// Write the canvas to a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), SnapshotError> {
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }
        let img = image::RgbaImage::from_raw(self.width, self.height, self.bytes().to_vec())
            .ok_or(SnapshotError::BufferMismatch)?;
        img.save(path)?;
        Ok(())
    }
}

/// Coverage of a normalized ellipse distance: full inside, a soft rim near
/// the edge, `None` outside.
#[inline]
fn rim_coverage(v: f32) -> Option<f32> {
    if v >= 1.0 {
        None
    } else if v > 1.0 - EDGE_SOFTNESS {
        Some((1.0 - v) / EDGE_SOFTNESS)
    } else {
        Some(1.0)
    }
}
