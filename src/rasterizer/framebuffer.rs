//! Pixel and depth buffers
//!
//! Logical coordinates put (0, 0) at the bottom-left with Y growing upward.
//! Pixel storage is row-major with the top row first, so every access flips Y.

use std::path::Path;

use super::png;
use super::types::{Color, WriteMode};
use crate::error::{RasterError, Result};

/// Number of cells for a `width x height` grid, rejecting empty or oversized grids
fn cell_count(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(RasterError::InvalidDimensions { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(RasterError::InvalidDimensions { width, height })
}

/// RGBA framebuffer for software rendering
#[derive(Debug, Clone)]
pub struct Framebuffer {
    pixels: Vec<Color>,
    width: u32,
    height: u32,
    mode: WriteMode,
}

impl Framebuffer {
    /// Create a framebuffer filled with opaque black
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, Color::BLACK)
    }

    /// Create a framebuffer with every pixel set to `fill`
    pub fn filled(width: u32, height: u32, fill: Color) -> Result<Self> {
        let count = cell_count(width, height)?;
        Ok(Self {
            pixels: vec![fill; count],
            width,
            height,
            mode: WriteMode::default(),
        })
    }

    pub fn with_write_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn set_write_mode(&mut self, mode: WriteMode) {
        self.mode = mode;
    }

    #[inline]
    pub fn write_mode(&self) -> WriteMode {
        self.mode
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixels in storage order (top row first)
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Storage index for logical (x, y), `None` when out of bounds
    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        let row = (self.height - 1 - y as u32) as usize;
        Some(row * self.width as usize + x as usize)
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Write `color` at logical (x, y). Out-of-bounds writes are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = match self.mode {
                WriteMode::Overwrite => color,
                WriteMode::Blend => Color::blend(color, self.pixels[idx]),
            };
        }
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    /// Encode the current contents as a PNG file image
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        png::encode(self.width, self.height, &self.pixels)
    }

    /// Encode and write to `path`
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

/// Per-pixel depth record, larger values are closer to the viewer
#[derive(Debug, Clone)]
pub struct DepthBuffer {
    values: Vec<f64>,
    width: u32,
    height: u32,
}

impl DepthBuffer {
    /// Create a depth buffer with every cell at negative infinity
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let count = cell_count(width, height)?;
        Ok(Self {
            values: vec![f64::NEG_INFINITY; count],
            width,
            height,
        })
    }

    /// Depth buffer matching a framebuffer's dimensions
    pub fn for_framebuffer(fb: &Framebuffer) -> Self {
        Self {
            values: vec![f64::NEG_INFINITY; fb.pixels.len()],
            width: fb.width,
            height: fb.height,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<f64> {
        self.index(x, y).map(|idx| self.values[idx])
    }

    /// Store `depth` if it is strictly greater than the current value.
    /// Returns true when the value was replaced.
    #[inline]
    pub fn test_and_set(&mut self, x: i32, y: i32, depth: f64) -> bool {
        match self.index(x, y) {
            Some(idx) if depth > self.values[idx] => {
                self.values[idx] = depth;
                true
            }
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        self.values.fill(f64::NEG_INFINITY);
    }

    pub(crate) fn ensure_matches(&self, fb: &Framebuffer) -> Result<()> {
        if self.width != fb.width || self.height != fb.height {
            return Err(RasterError::DepthBufferMismatch {
                width: fb.width,
                height: fb.height,
                depth_width: self.width,
                depth_height: self.height,
            });
        }
        Ok(())
    }
}
