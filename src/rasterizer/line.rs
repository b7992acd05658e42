//! Antialiased lines (Xiaolin Wu) with per-endpoint color

use super::framebuffer::Framebuffer;
use super::types::{Color, ScreenPoint};

#[inline]
fn fpart(x: f64) -> f64 {
    x - x.floor()
}

#[inline]
fn rfpart(x: f64) -> f64 {
    1.0 - fpart(x)
}

/// Draw an antialiased line from `p0` to `p1`.
///
/// Coverage is carried in alpha, so the result depends on the framebuffer's
/// write mode. Color is interpolated linearly between the endpoint pixels.
/// Coincident endpoints draw nothing. Drawing `p1 -> p0` gives the same output.
/// Samples with zero coverage are skipped, so `Overwrite` mode never writes
/// fully transparent pixels beside the line.
pub fn draw_line(fb: &mut Framebuffer, p0: ScreenPoint, p1: ScreenPoint) {
    let (mut x0, mut y0) = (p0.x as f64, p0.y as f64);
    let (mut x1, mut y1) = (p1.x as f64, p1.y as f64);
    let (mut c0, mut c1) = (p0.color, p1.color);

    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
        std::mem::swap(&mut c0, &mut c1);
    }

    let dx = x1 - x0;
    if dx == 0.0 {
        return;
    }
    let gradient = (y1 - y0) / dx;
    let extent = i64::from(if steep { fb.height() } else { fb.width() });

    // Coordinates are i64 so endpoints at the i32 limits cannot overflow;
    // anything outside i32 is off the framebuffer anyway.
    let mut plot = |x: i64, y: i64, color: Color, coverage: f64| {
        let c = color.with_coverage(coverage);
        if c.a == 0 {
            return;
        }
        let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) else {
            return;
        };
        if steep {
            fb.set_pixel(y, x, c);
        } else {
            fb.set_pixel(x, y, c);
        }
    };

    // First endpoint
    let xend = x0.round();
    let yend = y0 + gradient * (xend - x0);
    let xgap = rfpart(x0 + 0.5);
    let xpxl1 = xend as i64;
    let ypxl1 = yend.floor() as i64;
    plot(xpxl1, ypxl1, c0, rfpart(yend) * xgap);
    plot(xpxl1, ypxl1 + 1, c0, fpart(yend) * xgap);
    let intery_start = yend;

    // Second endpoint
    let xend = x1.round();
    let yend = y1 + gradient * (xend - x1);
    let xgap = fpart(x1 + 0.5);
    let xpxl2 = xend as i64;
    let ypxl2 = yend.floor() as i64;
    plot(xpxl2, ypxl2, c1, rfpart(yend) * xgap);
    plot(xpxl2, ypxl2 + 1, c1, fpart(yend) * xgap);

    // Main line body, limited to columns that can land on the framebuffer
    let span = (xpxl2 - xpxl1) as f64;
    let first = (xpxl1 + 1).max(0);
    let last = xpxl2.min(extent);
    let mut intery = intery_start + gradient * (first - xpxl1) as f64;
    for x in first..last {
        let t = (x - xpxl1) as f64 / span;
        let color = c0.lerp(c1, t);
        let ipart = intery.floor() as i64;
        plot(x, ipart, color, rfpart(intery));
        plot(x, ipart.saturating_add(1), color, fpart(intery));
        intery += gradient;
    }
}
