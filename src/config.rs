//! Render configuration
//!
//! Uses RON (Rusty Object Notation) for human-readable config files.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rasterizer::{Color, Vec3, WriteMode};

/// Everything the mesh render pass needs besides the model itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    /// Color of every vertex before lighting
    pub base_color: Color,
    /// Direction the light travels in model space
    pub light_direction: Vec3,
    pub write_mode: WriteMode,
    /// Draw triangle edges in this color after filling
    pub wireframe: Option<Color>,
    /// Rescale the model into [-1, 1] before projecting
    pub normalize: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            background: Color::BLACK,
            base_color: Color::WHITE,
            light_direction: Vec3::new(0.0, 0.0, -1.0),
            write_mode: WriteMode::Blend,
            wireframe: None,
            normalize: true,
        }
    }
}

impl RenderConfig {
    /// Load a config from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Parse a config from a RON string; missing fields take their defaults
    pub fn from_ron(s: &str) -> Result<Self> {
        Ok(ron::from_str(s)?)
    }

    pub fn to_ron(&self) -> Result<String> {
        let config = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .indentor("  ".to_string());
        Ok(ron::ser::to_string_pretty(self, config)?)
    }

    /// Save the config to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_ron()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RasterError;

    #[test]
    fn test_roundtrip() {
        let config = RenderConfig {
            width: 64,
            height: 32,
            wireframe: Some(Color::with_alpha(10, 20, 30, 128)),
            write_mode: WriteMode::Overwrite,
            ..RenderConfig::default()
        };
        let text = config.to_ron().unwrap();
        assert_eq!(RenderConfig::from_ron(&text).unwrap(), config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = RenderConfig::from_ron("(width: 100, light_direction: (x: 1.0, y: 0.0, z: 0.0))").unwrap();
        assert_eq!(config.width, 100);
        assert_eq!(config.height, 512);
        assert_eq!(config.light_direction, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(config.write_mode, WriteMode::Blend);
    }

    #[test]
    fn test_parse_error() {
        let err = RenderConfig::from_ron("(width: \"wide\")").unwrap_err();
        assert!(matches!(err, RasterError::ConfigParse(_)));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("tinyraster-config-{}.ron", std::process::id()));
        let config = RenderConfig { normalize: false, ..RenderConfig::default() };
        config.save(&path).unwrap();
        let loaded = RenderConfig::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = RenderConfig::load("/no/such/config.ron").unwrap_err();
        assert!(matches!(err, RasterError::Io(_)));
    }
}
