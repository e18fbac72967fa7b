//! Editor configuration (`kurv.toml`)

use crate::error::ConfigError;
use kurv_core::Color;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Curve drawing settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EditorConfig {
    /// Screen-space length of drawn tangent handles
    #[serde(default = "default_tangent_length")]
    pub tangent_length: f32,
    /// Fixed decimals in path data; shortest form when unset
    #[serde(default)]
    pub path_precision: Option<usize>,
    /// Color of scalar channels and of components without their own color
    #[serde(default = "default_color")]
    pub default_color: Color,
    /// Per-component channel colors
    #[serde(default = "default_component_colors")]
    pub component_colors: FxHashMap<String, Color>,
}

fn default_tangent_length() -> f32 {
    50.0
}

fn default_color() -> Color {
    Color::WHITE
}

fn default_component_colors() -> FxHashMap<String, Color> {
    [
        ("x", 0xDB3E3E),
        ("y", 0x51E22D),
        ("z", 0x00A3FF),
        ("w", 0x8700FF),
    ]
    .into_iter()
    .map(|(name, hex)| (name.to_string(), Color::from_hex(hex)))
    .collect()
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tangent_length: default_tangent_length(),
            path_precision: None,
            default_color: default_color(),
            component_colors: default_component_colors(),
        }
    }
}

impl EditorConfig {
    /// Parse from TOML; missing fields take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded editor config");
        Ok(config)
    }

    /// Color for a component channel
    pub fn color_for(&self, component: &str) -> Color {
        self.component_colors
            .get(component)
            .copied()
            .unwrap_or(self.default_color)
    }
}
