//! Animation documents (TOML)
//!
//! ```toml
//! name = "position"
//! easing = { function = "sine", mode = "in_out" }
//!
//! [[keys]]
//! frame = 0
//! value = { x = 0.0, y = 1.0 }
//! out_tangent = { x = 0.5, y = 0.0 }
//! ```

use anyhow::{Context, Result};
use kurv_animation::{Animation, AnimationKey, Easing};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct AnimationDocument {
    pub name: String,
    #[serde(default)]
    pub easing: Option<Easing>,
    #[serde(default)]
    pub keys: Vec<AnimationKey>,
}

impl AnimationDocument {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse animation document")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid animation in {}", path.display()))
    }

    pub fn into_animation(self) -> Animation {
        let mut animation = Animation::from_keys(self.name, self.keys);
        animation.set_easing(self.easing);
        animation
    }
}
