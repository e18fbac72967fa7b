//! Kurv Curve Editor
//!
//! Presentation and edit layer for animation curves. A [`Curve`] mirrors one
//! channel of an animation, derives cubic bezier path data and tangent handle
//! positions for drawing, and writes handle drags and key edits back into the
//! animation, notifying observers after every edit.
//!
//! # Example
//!
//! ```rust
//! use kurv_animation::{share, Animation, AnimationKey};
//! use kurv_editor::{curves_for_animation, EditorConfig};
//!
//! let animation = share(Animation::from_keys(
//!     "opacity",
//!     vec![AnimationKey::new(0.0, 0.0), AnimationKey::new(10.0, 1.0)],
//! ));
//!
//! let mut curves = curves_for_animation(&animation, &EditorConfig::default()).unwrap();
//! let curve = &mut curves[0];
//!
//! curve.update_out_tangent_from_control_point(0, 0.5).unwrap();
//! assert_eq!(curve.keys()[0].out_tangent, Some(0.25));
//! ```

pub mod channels;
pub mod config;
pub mod curve;
pub mod error;
pub mod projection;

pub use channels::curves_for_animation;
pub use config::EditorConfig;
pub use curve::{ControlPoint, Curve, CurveChange, KeyEntry, TangentBuilder, TangentSide};
pub use error::{ConfigError, CurveError, Result};
pub use projection::ValueProjection;
