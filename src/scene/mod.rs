//! Scene layer feeding the rasterizer
//!
//! Loads meshes, lights them with a single directional light and projects
//! them orthographically into screen space.

mod lighting;
mod model;
mod render;

pub use lighting::*;
pub use model::*;
pub use render::*;
