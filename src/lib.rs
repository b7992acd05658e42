//! tinyraster: CPU software rasterizer with PNG output
//!
//! - Antialiased lines with interpolated color
//! - Barycentric, z-buffered triangles
//! - OBJ meshes with a single directional light
//! - Orthographic projection

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod error;
pub mod rasterizer;
pub mod scene;

pub use error::{RasterError, Result};
