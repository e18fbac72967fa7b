//! Kurv Animation Engine
//!
//! Keyed animations sampled by frame.
//!
//! # Features
//!
//! - **Animated values**: scalars or named components (`x`, `y`, `z`, ...)
//! - **Tangents**: Hermite interpolation when both neighbouring tangents exist
//! - **Easing**: gradient shaping per key or per animation
//! - **Stable key identity**: keys are addressed by [`KeyId`], not position

pub mod easing;
pub mod keyframe;
pub mod source;
pub mod value;

pub use easing::{Easing, EasingFunction, EasingMode};
pub use keyframe::{Animation, AnimationKey, Interpolation, KeyId};
pub use source::{share, AnimationSource, SharedAnimation};
pub use value::{AnimatedValue, ComponentValues};
