//! Mesh render pass: project, light, fill, optional wireframe

use tracing::{debug, info, warn};

use crate::config::RenderConfig;
use crate::error::Result;
use crate::rasterizer::{draw_line, fill_triangle, Color, DepthBuffer, Framebuffer, ScreenPoint, WriteMode};

use super::lighting::{Light, Projection};
use super::model::Model;

/// Render `model` with `config`
pub fn render_model(model: &Model, config: &RenderConfig) -> Result<Framebuffer> {
    render_model_with_progress(model, config, |_| {})
}

/// Render `model`, calling `on_face` with the index of each face once it is drawn
pub fn render_model_with_progress<F: FnMut(usize)>(
    model: &Model,
    config: &RenderConfig,
    mut on_face: F,
) -> Result<Framebuffer> {
    let mut fb = Framebuffer::filled(config.width, config.height, config.background)?
        .with_write_mode(config.write_mode);
    let mut depth = DepthBuffer::for_framebuffer(&fb);

    let mut model = model.clone();
    if config.normalize {
        model.normalize_geometry();
    }

    let light = Light::new(config.light_direction);
    if light.is_none() {
        warn!("light direction is zero, rendering unlit");
    }
    let projection = Projection::new(config.width, config.height);

    // Shade and project every vertex once
    let screen: Vec<ScreenPoint> = model
        .vertex_normals()
        .iter()
        .zip(model.vertices())
        .map(|(&normal, &v)| {
            let intensity = light.map_or(1.0, |l| l.intensity(normal));
            projection.project(v, config.base_color.shade(intensity))
        })
        .collect();

    let mut filled = 0;
    for (i, &[a, b, c]) in model.faces().iter().enumerate() {
        filled += fill_triangle(&mut fb, &mut depth, screen[a], screen[b], screen[c])?;
        on_face(i);
    }

    if let Some(color) = config.wireframe {
        let edge = |p: ScreenPoint| ScreenPoint { color, ..p };
        for &[a, b, c] in model.faces() {
            draw_line(&mut fb, edge(screen[a]), edge(screen[b]));
            draw_line(&mut fb, edge(screen[b]), edge(screen[c]));
            draw_line(&mut fb, edge(screen[c]), edge(screen[a]));
        }
        debug!(edges = model.faces().len() * 3, "wireframe drawn");
    }

    info!(
        faces = model.faces().len(),
        pixels = filled,
        width = config.width,
        height = config.height,
        "render pass complete"
    );
    Ok(fb)
}

/// Test pattern: cells where `(x / cell) % 2 == (y / cell) % 2` get a
/// position-dependent color, the rest stay black
pub fn checkerboard(width: u32, height: u32, cell: u32) -> Result<Framebuffer> {
    let mut fb = Framebuffer::new(width, height)?.with_write_mode(WriteMode::Overwrite);
    let cell = cell.max(1);
    for x in 0..width {
        for y in 0..height {
            if (x / cell) % 2 == (y / cell) % 2 {
                let color = Color::from_f64(2.0 * x as f64, 2.0 * y as f64, 150.0, 255.0);
                fb.set_pixel(x as i32, y as i32, color);
            }
        }
    }
    Ok(fb)
}
