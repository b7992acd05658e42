//! Error type shared by the rasterizer and the scene layer

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("image dimensions must be non-zero and fit in memory (got {width}x{height})")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("depth buffer is {depth_width}x{depth_height} but image is {width}x{height}")]
    DepthBufferMismatch {
        width: u32,
        height: u32,
        depth_width: u32,
        depth_height: u32,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to load model {path}: {source}")]
    ModelLoad {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("face {face} references vertex {index} but the model has {vertex_count} vertices")]
    InvalidFace {
        face: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("config parse error: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),

    #[error("config serialize error: {0}")]
    ConfigSerialize(#[from] ron::Error),
}

pub type Result<T> = std::result::Result<T, RasterError>;
