//! Normals, directional lighting and orthographic projection

use crate::rasterizer::{Color, ScreenPoint, Vec3};

use super::model::Model;

/// Unit normal of triangle (a, b, c), `None` if it has no area
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Option<Vec3> {
    (b - a).cross(c - a).normalize()
}

impl Model {
    /// Per-vertex normals: normalized sum of the unit normals of adjacent faces.
    /// Vertices touching no (non-degenerate) face get `Vec3::ZERO`.
    pub fn vertex_normals(&self) -> Vec<Vec3> {
        let mut sums = vec![Vec3::ZERO; self.vertices().len()];
        for (i, face) in self.faces().iter().enumerate() {
            let [a, b, c] = self.triangle(i);
            if let Some(n) = face_normal(a, b, c) {
                for &v in face {
                    sums[v] = sums[v] + n;
                }
            }
        }
        sums.into_iter()
            .map(|s| s.normalize().unwrap_or(Vec3::ZERO))
            .collect()
    }
}

/// A single directional light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// Direction the light travels, unit length
    direction: Vec3,
}

impl Light {
    /// `None` if `direction` is the zero vector
    pub fn new(direction: Vec3) -> Option<Self> {
        direction.normalize().map(|direction| Self { direction })
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Lambert intensity in [0, 1] for a surface with unit normal `normal`
    pub fn intensity(&self, normal: Vec3) -> f64 {
        normal.dot(-self.direction).clamp(0.0, 1.0)
    }
}

/// Orthographic mapping of [-1, 1] x/y onto the pixel grid, z kept as depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection {
    pub width: u32,
    pub height: u32,
}

impl Projection {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn project(&self, v: Vec3, color: Color) -> ScreenPoint {
        let sx = (v.x + 1.0) * (self.width.saturating_sub(1)) as f64 / 2.0;
        let sy = (v.y + 1.0) * (self.height.saturating_sub(1)) as f64 / 2.0;
        ScreenPoint::with_depth(sx as i32, sy as i32, v.z, color)
    }
}
