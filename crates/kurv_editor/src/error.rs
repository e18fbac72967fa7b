//! Editor error types

use crate::projection::ValueProjection;
use kurv_animation::KeyId;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from curve edits
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Key index past the end of the curve
    #[error("key index {index} out of range for curve with {len} keys")]
    KeyIndexOutOfRange { index: usize, len: usize },

    /// A component tangent had to be created but the curve has no builder
    #[error("no tangent builder for component '{component}'")]
    MissingTangentBuilder { component: String },

    /// The animation no longer has the key this entry mirrors
    #[error("animation has no key {0:?}")]
    SourceKeyMissing(KeyId),

    /// Animation value is scalar under a component projection, or the reverse
    #[error("animation value does not match {projection} projection")]
    ShapeMismatch { projection: ValueProjection },
}

/// Result type for curve operations
pub type Result<T> = std::result::Result<T, CurveError>;

/// Errors loading editor configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid editor config: {0}")]
    Parse(#[from] toml::de::Error),
}
