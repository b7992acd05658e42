//! CPU software rasterizer
//!
//! Features:
//! - Alpha-composited or overwriting pixel writes
//! - Antialiased, color-interpolated lines (Xiaolin Wu)
//! - Barycentric triangle fill with Gouraud colors and a z-buffer
//! - PNG output (RGBA, zlib level 9)

mod framebuffer;
mod line;
mod math;
pub mod png;
mod triangle;
mod types;

pub use framebuffer::*;
pub use line::*;
pub use math::*;
pub use triangle::*;
pub use types::*;
