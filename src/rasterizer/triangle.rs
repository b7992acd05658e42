//! Barycentric triangle fill with depth testing

use super::framebuffer::{DepthBuffer, Framebuffer};
use super::math::Vec3;
use super::types::{Color, ScreenPoint};
use crate::error::Result;

/// Signed area term for edge (a, b) and point p.
/// The sign tells which side of the edge `p` lies on.
#[inline]
pub fn edge_function(a: Vec3, b: Vec3, p: Vec3) -> f64 {
    (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
}

/// Barycentric weights of `p` in triangle (v0, v1, v2), using x and y only.
/// Returns `None` for a zero-area triangle.
pub fn barycentric(p: Vec3, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<[f64; 3]> {
    let area = edge_function(v0, v1, v2);
    if area == 0.0 {
        return None;
    }
    Some([
        edge_function(v1, v2, p) / area,
        edge_function(v2, v0, p) / area,
        edge_function(v0, v1, p) / area,
    ])
}

fn position(p: &ScreenPoint) -> Vec3 {
    Vec3::new(p.x as f64, p.y as f64, p.depth)
}

/// Fill a triangle, interpolating color and depth across it.
///
/// A pixel is written only when its interpolated depth is strictly greater
/// than the depth buffer entry. Returns the number of pixels written.
pub fn fill_triangle(
    fb: &mut Framebuffer,
    depth: &mut DepthBuffer,
    v0: ScreenPoint,
    v1: ScreenPoint,
    v2: ScreenPoint,
) -> Result<usize> {
    depth.ensure_matches(fb)?;

    let (p0, p1, p2) = (position(&v0), position(&v1), position(&v2));
    let area = edge_function(p0, p1, p2);
    if area == 0.0 {
        return Ok(0);
    }

    // Bounding box clamped to the image
    let min_x = v0.x.min(v1.x).min(v2.x).max(0);
    let max_x = v0.x.max(v1.x).max(v2.x).min(fb.width() as i32 - 1);
    let min_y = v0.y.min(v1.y).min(v2.y).max(0);
    let max_y = v0.y.max(v1.y).max(v2.y).min(fb.height() as i32 - 1);

    // Weighted sums are divided by the area once so uniform attributes stay exact
    let mix = |w: [f64; 3], a: f64, b: f64, c: f64| (w[0] * a + w[1] * b + w[2] * c) / area;
    let channel = |w: [f64; 3], f: fn(&Color) -> u8| {
        mix(w, f(&v0.color) as f64, f(&v1.color) as f64, f(&v2.color) as f64)
    };

    let mut written = 0;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = Vec3::new(x as f64, y as f64, 0.0);
            let w = [
                edge_function(p1, p2, p),
                edge_function(p2, p0, p),
                edge_function(p0, p1, p),
            ];

            // Inside when every barycentric weight is non-negative
            if w.iter().any(|&wi| wi / area < 0.0) {
                continue;
            }

            let z = mix(w, p0.z, p1.z, p2.z);
            if !depth.test_and_set(x, y, z) {
                continue;
            }

            let color = Color::from_f64(
                channel(w, |c| c.r),
                channel(w, |c| c.g),
                channel(w, |c| c.b),
                channel(w, |c| c.a),
            );
            fb.set_pixel(x, y, color);
            written += 1;
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RasterError;
    use crate::rasterizer::types::WriteMode;

    fn white(x: i32, y: i32) -> ScreenPoint {
        ScreenPoint::with_depth(x, y, 0.0, Color::WHITE)
    }

    #[test]
    fn test_barycentric_inside() {
        let v0 = Vec3::new(0.0, 0.0, 0.0);
        let v1 = Vec3::new(10.0, 0.0, 0.0);
        let v2 = Vec3::new(5.0, 10.0, 0.0);
        for p in [Vec3::new(5.0, 3.0, 0.0), Vec3::new(4.0, 1.0, 0.0), Vec3::new(6.0, 7.0, 0.0)] {
            let w = barycentric(p, v0, v1, v2).unwrap();
            assert!(w.iter().all(|&wi| wi > 0.0 && wi < 1.0));
            assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_barycentric_degenerate() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(2.0, 2.0, 0.0);
        let c = Vec3::new(4.0, 4.0, 0.0);
        assert_eq!(barycentric(Vec3::ZERO, a, b, c), None);
    }

    #[test]
    fn test_white_right_triangle() {
        let mut fb = Framebuffer::new(32, 32).unwrap();
        let mut depth = DepthBuffer::for_framebuffer(&fb);
        let written = fill_triangle(&mut fb, &mut depth, white(0, 0), white(10, 0), white(0, 10)).unwrap();

        assert_eq!(written, 66);
        for y in 0..32 {
            for x in 0..32 {
                let inside = x + y <= 10;
                let expected = if inside { Color::WHITE } else { Color::BLACK };
                assert_eq!(fb.get_pixel(x, y), Some(expected), "pixel ({x}, {y})");
                let d = depth.get(x, y).unwrap();
                if inside {
                    assert_eq!(d, 0.0);
                } else {
                    assert_eq!(d, f64::NEG_INFINITY);
                }
            }
        }
        assert_eq!(fb.get_pixel(20, 20), Some(Color::BLACK));
    }

    #[test]
    fn test_winding_order_does_not_matter() {
        let mut a = Framebuffer::new(16, 16).unwrap();
        let mut da = DepthBuffer::for_framebuffer(&a);
        fill_triangle(&mut a, &mut da, white(1, 1), white(12, 2), white(4, 13)).unwrap();

        let mut b = Framebuffer::new(16, 16).unwrap();
        let mut db = DepthBuffer::for_framebuffer(&b);
        fill_triangle(&mut b, &mut db, white(1, 1), white(4, 13), white(12, 2)).unwrap();

        assert_eq!(a.pixels(), b.pixels());
    }

    #[test]
    fn test_depth_idempotent() {
        let mut fb = Framebuffer::new(16, 16).unwrap();
        let mut depth = DepthBuffer::for_framebuffer(&fb);
        let tri = [
            ScreenPoint::with_depth(0, 0, 1.0, Color::with_alpha(255, 0, 0, 128)),
            ScreenPoint::with_depth(15, 2, 3.0, Color::with_alpha(0, 255, 0, 128)),
            ScreenPoint::with_depth(5, 14, 2.0, Color::with_alpha(0, 0, 255, 128)),
        ];
        let first = fill_triangle(&mut fb, &mut depth, tri[0], tri[1], tri[2]).unwrap();
        assert!(first > 0);
        let snapshot = fb.pixels().to_vec();

        let second = fill_triangle(&mut fb, &mut depth, tri[0], tri[1], tri[2]).unwrap();
        assert_eq!(second, 0);
        assert_eq!(fb.pixels(), &snapshot[..]);
    }

    #[test]
    fn test_closer_triangle_wins() {
        let mut fb = Framebuffer::new(8, 8).unwrap().with_write_mode(WriteMode::Overwrite);
        let mut depth = DepthBuffer::for_framebuffer(&fb);
        let far = |x, y| ScreenPoint::with_depth(x, y, -5.0, Color::RED);
        let near = |x, y| ScreenPoint::with_depth(x, y, 5.0, Color::GREEN);

        fill_triangle(&mut fb, &mut depth, near(0, 0), near(7, 0), near(0, 7)).unwrap();
        fill_triangle(&mut fb, &mut depth, far(0, 0), far(7, 0), far(0, 7)).unwrap();
        assert_eq!(fb.get_pixel(1, 1), Some(Color::GREEN));

        fill_triangle(&mut fb, &mut depth, far(7, 7), far(0, 7), far(7, 0)).unwrap();
        assert_eq!(fb.get_pixel(6, 6), Some(Color::RED));
        // Shared diagonal stays with the nearer triangle
        assert_eq!(fb.get_pixel(0, 7), Some(Color::GREEN));
    }

    #[test]
    fn test_color_interpolation_truncates() {
        let mut fb = Framebuffer::new(4, 4).unwrap().with_write_mode(WriteMode::Overwrite);
        let mut depth = DepthBuffer::for_framebuffer(&fb);
        let v0 = ScreenPoint::with_depth(0, 0, 0.0, Color::with_alpha(0, 0, 0, 255));
        let v1 = ScreenPoint::with_depth(3, 0, 0.0, Color::with_alpha(255, 0, 0, 255));
        let v2 = ScreenPoint::with_depth(0, 3, 0.0, Color::with_alpha(0, 0, 0, 255));
        fill_triangle(&mut fb, &mut depth, v0, v1, v2).unwrap();
        // x / 3 of the way toward red: 255 / 3 = 85, 510 / 3 = 170
        assert_eq!(fb.get_pixel(1, 0).unwrap().r, 85);
        assert_eq!(fb.get_pixel(2, 0).unwrap().r, 170);
        assert_eq!(fb.get_pixel(3, 0).unwrap().r, 255);
    }

    #[test]
    fn test_zero_area_draws_nothing() {
        let mut fb = Framebuffer::new(8, 8).unwrap();
        let mut depth = DepthBuffer::for_framebuffer(&fb);
        let n = fill_triangle(&mut fb, &mut depth, white(0, 0), white(3, 3), white(6, 6)).unwrap();
        assert_eq!(n, 0);
        assert!(fb.pixels().iter().all(|&c| c == Color::BLACK));
    }

    #[test]
    fn test_offscreen_triangle_is_clamped() {
        let mut fb = Framebuffer::new(8, 8).unwrap();
        let mut depth = DepthBuffer::for_framebuffer(&fb);
        let n = fill_triangle(&mut fb, &mut depth, white(-10, -10), white(30, -10), white(-10, 30)).unwrap();
        assert!(n > 0);
        assert_eq!(fb.get_pixel(0, 0), Some(Color::WHITE));

        let n = fill_triangle(&mut fb, &mut depth, white(20, 20), white(30, 20), white(20, 30)).unwrap();
        assert_eq!(n, 0);
    }

    #[test]
    fn test_depth_buffer_mismatch_rejected() {
        let mut fb = Framebuffer::new(8, 8).unwrap();
        let mut depth = DepthBuffer::new(8, 4).unwrap();
        let err = fill_triangle(&mut fb, &mut depth, white(0, 0), white(3, 0), white(0, 3)).unwrap_err();
        assert!(matches!(err, RasterError::DepthBufferMismatch { .. }));
    }
}
