//! Which part of an animated value a curve shows

use crate::error::{CurveError, Result};
use kurv_animation::AnimatedValue;
use std::fmt;

/// Scalar channels read the value directly; component channels read one
/// named field (`x`, `y`, ...) of a structured value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueProjection {
    Scalar,
    Component(String),
}

impl ValueProjection {
    pub fn component(name: impl Into<String>) -> Self {
        ValueProjection::Component(name.into())
    }

    /// Component name, if any
    pub fn name(&self) -> Option<&str> {
        match self {
            ValueProjection::Scalar => None,
            ValueProjection::Component(name) => Some(name),
        }
    }

    /// Read the projected number, `None` when the shape does not match
    pub fn read(&self, value: &AnimatedValue) -> Option<f32> {
        match self {
            ValueProjection::Scalar => value.as_scalar(),
            ValueProjection::Component(name) => value.component(name),
        }
    }

    /// Write the projected number into `target`.
    ///
    /// Scalar projections replace the whole value; component projections set
    /// one field and fail on scalar targets.
    pub fn write(&self, target: &mut AnimatedValue, value: f32) -> Result<()> {
        match self {
            ValueProjection::Scalar => {
                *target = AnimatedValue::Scalar(value);
                Ok(())
            }
            ValueProjection::Component(name) => match target.as_components_mut() {
                Some(components) => {
                    components.set(name, value);
                    Ok(())
                }
                None => Err(CurveError::ShapeMismatch {
                    projection: self.clone(),
                }),
            },
        }
    }
}

impl fmt::Display for ValueProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueProjection::Scalar => f.write_str("scalar"),
            ValueProjection::Component(name) => write!(f, ".{}", name),
        }
    }
}
