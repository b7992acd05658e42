//! Core types for the rasterizer

use serde::{Serialize, Deserialize};

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Clamp a real channel value into [0, 255], truncating toward zero
#[inline]
pub(crate) fn clamp_channel(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.clamp(0.0, 255.0) as u8
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0, a: 255 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from real channel values, clamping each to [0, 255]
    pub fn from_f64(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
            a: clamp_channel(a),
        }
    }

    /// Straight alpha compositing of `src` over `dst`.
    ///
    /// RGB: `src * sa + dst * (1 - sa)`, alpha: `sa + da * (1 - sa)` with
    /// `sa = src.a / 255`. Every channel is truncated and clamped.
    pub fn blend(src: Color, dst: Color) -> Color {
        // Single division per channel keeps exact results exact before truncation
        let sa = src.a as f64;
        let inv = 255.0 - sa;
        let mix = |s: u8, d: u8| (s as f64 * sa + d as f64 * inv) / 255.0;
        Color::from_f64(
            mix(src.r, dst.r),
            mix(src.g, dst.g),
            mix(src.b, dst.b),
            (sa * 255.0 + dst.a as f64 * inv) / 255.0,
        )
    }

    /// Blend this color over `dst`
    pub fn over(self, dst: Color) -> Color {
        Color::blend(self, dst)
    }

    /// Same color with alpha scaled by `coverage` (0.0-1.0)
    pub fn with_coverage(self, coverage: f64) -> Self {
        Self {
            a: clamp_channel(self.a as f64 * coverage.clamp(0.0, 1.0)),
            ..self
        }
    }

    /// Linear interpolation between two colors, `t` in [0, 1]
    pub fn lerp(self, other: Color, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| a as f64 * (1.0 - t) + b as f64 * t;
        Color::from_f64(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    /// Apply shading (multiply RGB by intensity 0.0-1.0), alpha untouched
    pub fn shade(self, intensity: f64) -> Self {
        let i = intensity.clamp(0.0, 1.0);
        Self {
            r: clamp_channel(self.r as f64 * i),
            g: clamp_channel(self.g as f64 * i),
            b: clamp_channel(self.b as f64 * i),
            a: self.a,
        }
    }

    /// Convert to [u8; 4] in RGBA order
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// How `Image::set_pixel` combines an incoming color with the stored one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WriteMode {
    /// Replace the stored pixel
    Overwrite,
    /// Alpha-composite the incoming color over the stored pixel
    #[default]
    Blend,
}

/// A screen-space vertex: integer pixel position, depth and color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
    pub depth: f64,
    pub color: Color,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32, color: Color) -> Self {
        Self { x, y, depth: 0.0, color }
    }

    pub fn with_depth(x: i32, y: i32, depth: f64, color: Color) -> Self {
        Self { x, y, depth, color }
    }
}
